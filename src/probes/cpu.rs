//! CPU probe: aggregate load on the bar, per-thread load and temperature grid in the tooltip

use super::StatusRecord;
use crate::sensors::cpu::{CpuSnapshot, CpuSource, SysinfoCpu};
use crate::shared::markup::{bold, escape, tt};
use std::time::Duration;

pub const CLASS: &str = "custom-cpu";

/// Long enough for a stable per-thread reading
pub const SAMPLE_WINDOW: Duration = Duration::from_secs(1);

pub fn collect() -> StatusRecord {
    let mut source = SysinfoCpu::new();
    render(&source.sample(SAMPLE_WINDOW))
}

pub fn render(snapshot: &CpuSnapshot) -> StatusRecord {
    let threads = snapshot.usages.len();
    let average = snapshot.average_usage();
    let temps = snapshot.core_temperatures().per_thread(threads);

    let cells: Vec<String> = snapshot
        .usages
        .iter()
        .zip(&temps)
        .enumerate()
        .map(|(i, (usage, temp))| format!("Core {:<2}: {:>3.0}% ({:.0}°C)", i, usage, temp))
        .collect();
    let grid = cells
        .chunks(2)
        .map(|row| row.join("   |   "))
        .collect::<Vec<_>>()
        .join("\n");

    let tooltip = format!(
        "{} - {:.1}%\nCores: {}\n\n{}",
        bold(&escape(&snapshot.name)),
        average,
        threads,
        tt(&grid)
    );

    StatusRecord::new(format!("{:.0}%", average), tooltip).with_class(CLASS)
}
