//! waybar-probes: single-shot status probes for Waybar custom modules
//!
//! Each probe reads a few OS interfaces, prints one JSON line and exits 0.
//! Missing data never fails a probe; it shows up as a placeholder instead.
//!
//! - cpu: per-thread load and temperature grid
//! - gpu: NVIDIA (nvidia-smi) or AMD (sysfs) load, temperature, power, clock
//! - apps: glyphs for the distinct window classes Hyprland reports
//! - sysmon: CPU, GPU, memory and storage dashboard

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub mod config;
pub mod probes;
pub mod sensors;
pub mod shared;

#[cfg(target_os = "linux")]
pub mod linux;

pub use probes::{Probe, StatusRecord};

/// Log to stderr; stdout belongs to Waybar
pub fn init_logging() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Collect and print one record
pub fn run(probe: Probe) -> anyhow::Result<()> {
    let config = config::Config::load();
    tracing::debug!("Running {:?} probe", probe);
    let record = probe.collect(&config);
    probes::emit(&record)
}

/// Entry point shared by the binaries: always exits 0
pub fn main_for(probe: Probe) {
    init_logging();
    if let Err(e) = run(probe) {
        tracing::error!("Failed to write {:?} record: {}", probe, e);
    }
}
