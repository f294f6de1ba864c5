//! GPU probe

use super::StatusRecord;
use crate::sensors::gpu::{self, GpuInfo};
use crate::shared::markup::escape;

pub const CLASS: &str = "custom-gpu";

pub fn collect() -> StatusRecord {
    render(gpu::detect().as_ref())
}

pub fn render(gpu: Option<&GpuInfo>) -> StatusRecord {
    let Some(gpu) = gpu else {
        return StatusRecord::new("N/A", "No GPU detected");
    };

    let tooltip = format!(
        "{}\nUsage: {}%\nTemp: {}°C\nPower: {:.1} W\nClock: {} MHz",
        escape(&gpu.name),
        gpu.usage,
        gpu.temperature,
        gpu.power_watts,
        gpu.clock_mhz
    );

    StatusRecord::new(format!("{}%", gpu.usage), tooltip).with_class(CLASS)
}
