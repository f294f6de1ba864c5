//! Probes - each turns one facet of the machine into a Waybar record

pub mod apps;
pub mod cpu;
pub mod gpu;
pub mod sysmon;

use crate::config::Config;
use serde::Serialize;
use std::io::Write;

/// One line of Waybar custom-module JSON
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatusRecord {
    pub text: String,
    pub tooltip: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,
}

impl StatusRecord {
    pub fn new(text: impl Into<String>, tooltip: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            tooltip: tooltip.into(),
            class: None,
            alt: None,
        }
    }

    pub fn with_class(mut self, class: &str) -> Self {
        self.class = Some(class.to_string());
        self
    }

    pub fn with_alt(mut self, alt: &str) -> Self {
        self.alt = Some(alt.to_string());
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Probe {
    Cpu,
    Gpu,
    Apps,
    Sysmon,
}

impl Probe {
    pub fn collect(self, config: &Config) -> StatusRecord {
        match self {
            Probe::Cpu => cpu::collect(),
            Probe::Gpu => gpu::collect(),
            Probe::Apps => apps::collect(config),
            Probe::Sysmon => sysmon::collect(config),
        }
    }
}

/// Print the record as a single JSON line
pub fn emit(record: &StatusRecord) -> anyhow::Result<()> {
    let line = serde_json::to_string(record)?;
    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{}", line)?;
    stdout.flush()?;
    Ok(())
}
