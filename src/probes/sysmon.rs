//! Aggregate system monitor: CPU, GPU, memory and storage in one colorized record

use super::StatusRecord;
use crate::config::Config;
use crate::sensors::cpu::{CpuSnapshot, CpuSource, SysinfoCpu};
use crate::sensors::gpu::{self, GpuInfo};
use crate::sensors::memory::{MemorySource, MemoryStats, SysinfoMemory};
use crate::sensors::storage::{FilesystemSource, StorageFilter, StorageSummary, SysinfoDisks};
use crate::shared::markup::{escape, span, tt};
use crate::shared::severity::{color, Scale, ACCENT, DIM};
use crate::shared::gigabytes;
use std::time::Duration;

pub const CLASS: &str = "custom-sysmon";
pub const ALT: &str = "sysmon";

/// Short sample; the dashboard cares about trend, not precision
const SAMPLE_WINDOW: Duration = Duration::from_millis(100);

const CPU_ICON: &str = "\u{f2db}";
const GPU_ICON: &str = "\u{f08ae}";
const MEM_ICON: &str = "\u{efc5}";
const SSD_ICON: &str = "\u{f0a0}";

const DRIVE_NAME_WIDTH: usize = 10;

/// Everything the dashboard shows; any part may be a placeholder
pub struct Dashboard {
    pub cpu: CpuSnapshot,
    pub gpu: Option<GpuInfo>,
    pub memory: MemoryStats,
    pub storage: StorageSummary,
}

pub fn collect(config: &Config) -> StatusRecord {
    let cpu = SysinfoCpu::new().sample(SAMPLE_WINDOW);
    let gpu = gpu::detect();
    let memory = SysinfoMemory.memory();
    let filter = StorageFilter::new(&config.storage);
    let storage = StorageSummary::from_partitions(&SysinfoDisks.partitions(), &filter);

    render(&Dashboard {
        cpu,
        gpu,
        memory,
        storage,
    })
}

pub fn render(dash: &Dashboard) -> StatusRecord {
    StatusRecord::new(bar_text(dash), tooltip(dash))
        .with_class(CLASS)
        .with_alt(ALT)
}

/// "Intel(R) Core(TM) i7-8550U CPU @ 1.80GHz" -> "Intel Core i7-8550U CPU"
pub fn clean_cpu_name(name: &str) -> String {
    let name = name.replace("(R)", "").replace("(TM)", "");
    name.split('@').next().unwrap_or("").trim().to_string()
}

fn bar_text(dash: &Dashboard) -> String {
    let cpu_temp = dash.cpu.package_temperature().map(f64::from);
    let cpu = span(
        color(cpu_temp, Scale::Temperature),
        &format!("{} {:.0}°C", CPU_ICON, cpu_temp.unwrap_or(0.0)),
    );

    let gpu = match &dash.gpu {
        Some(g) if g.usage > 0 => span(
            color(Some(g.temperature.into()), Scale::Temperature),
            &format!("{} {}%", GPU_ICON, g.usage),
        ),
        Some(g) => span(
            color(Some(g.temperature.into()), Scale::Temperature),
            &format!("{} N/A", GPU_ICON),
        ),
        None => span(DIM, &format!("{} N/A", GPU_ICON)),
    };

    let mem = span(
        color(Some(dash.memory.ram_percent()), Scale::Utilization),
        &format!("{} {:.1}G", MEM_ICON, gigabytes(dash.memory.ram_used)),
    );

    let disk = span(
        color(Some(dash.storage.percent()), Scale::Utilization),
        &format!("{} {:.1}G", SSD_ICON, dash.storage.used_gb),
    );

    [cpu, gpu, mem, disk].join("  ")
}

fn separator() -> String {
    "─".repeat(30)
}

fn tooltip(dash: &Dashboard) -> String {
    let mut lines = Vec::new();
    lines.extend(cpu_section(&dash.cpu));
    lines.push(separator());
    lines.extend(gpu_section(dash.gpu.as_ref()));
    lines.push(separator());
    lines.extend(memory_section(&dash.memory));
    lines.push(separator());
    lines.extend(storage_section(&dash.storage));
    lines.join("\n")
}

fn cpu_section(cpu: &CpuSnapshot) -> Vec<String> {
    let usage = f64::from(cpu.average_usage());
    let temp = cpu.package_temperature().unwrap_or(0.0);
    vec![
        span(
            ACCENT,
            &format!("{} CPU: {}", CPU_ICON, escape(&clean_cpu_name(&cpu.name))),
        ),
        format!(
            "  Usage: {} | {:.0}°C",
            span(color(Some(usage), Scale::Utilization), &format!("{:.1}%", usage)),
            temp
        ),
        format!(
            "  Freq:  {}MHz / {}MHz",
            cpu.frequency.current_mhz, cpu.frequency.max_mhz
        ),
    ]
}

fn gpu_section(gpu: Option<&GpuInfo>) -> Vec<String> {
    let Some(gpu) = gpu else {
        return vec![span(ACCENT, &format!("{} GPU: Not Found", GPU_ICON))];
    };

    let mut freq = format!("{}MHz", gpu.clock_mhz);
    if gpu.max_clock_mhz > 0 {
        freq.push_str(&format!(" / {}MHz", gpu.max_clock_mhz));
    }

    vec![
        span(ACCENT, &format!("{} GPU: {}", GPU_ICON, escape(&gpu.name))),
        format!(
            "  Usage: {} | Power: {:.1}W",
            span(
                color(Some(gpu.usage.into()), Scale::Utilization),
                &format!("{}%", gpu.usage)
            ),
            gpu.power_watts
        ),
        format!(
            "  Temp:  {} | Freq: {}",
            span(
                color(Some(gpu.temperature.into()), Scale::Temperature),
                &format!("{}°C", gpu.temperature)
            ),
            freq
        ),
    ]
}

fn memory_row(label: &str, used: u64, total: u64, percent: f64) -> String {
    tt(&format!(
        "{:<7} | {:4.1} GB | {:4.1} GB | {}",
        label,
        gigabytes(used),
        gigabytes(total),
        span(color(Some(percent), Scale::Utilization), &format!("{:.1}%", percent))
    ))
}

fn memory_section(mem: &MemoryStats) -> Vec<String> {
    vec![
        span(ACCENT, &format!("{} MEMORY SYSTEM", MEM_ICON)),
        tt("Type    | Used    | Total   | Util"),
        memory_row("RAM", mem.ram_used, mem.ram_total, mem.ram_percent()),
        memory_row("Swap", mem.swap_used, mem.swap_total, mem.swap_percent()),
    ]
}

fn truncate_name(name: &str) -> String {
    if name.chars().count() > DRIVE_NAME_WIDTH {
        let head: String = name.chars().take(DRIVE_NAME_WIDTH).collect();
        format!("{}..", head)
    } else {
        name.to_string()
    }
}

fn storage_section(storage: &StorageSummary) -> Vec<String> {
    let mut lines = vec![
        span(
            ACCENT,
            &format!("{} STORAGE ({:.0}%)", SSD_ICON, storage.percent()),
        ),
        tt("Drive        | Used   | Free   | Util"),
    ];

    for drive in &storage.drives {
        let name = format!("{:<12}", truncate_name(&drive.name));
        lines.push(tt(&format!(
            "{} | {:<4.1} G | {:<4.1} G | {}",
            escape(&name),
            drive.used_gb,
            drive.free_gb(),
            span(
                color(Some(drive.percent()), Scale::Utilization),
                &format!("{:>2.0}%", drive.percent())
            )
        )));
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sensors::cpu::{CpuFrequency, SensorReading};
    use crate::sensors::storage::Drive;

    fn dashboard(gpu: Option<GpuInfo>) -> Dashboard {
        Dashboard {
            cpu: CpuSnapshot {
                name: "Intel(R) Core(TM) i7-8550U CPU @ 1.80GHz".to_string(),
                usages: vec![20.0, 40.0],
                sensors: vec![SensorReading::new("Package id 0", 62.0)],
                frequency: CpuFrequency {
                    current_mhz: 1800,
                    max_mhz: 4000,
                },
            },
            gpu,
            memory: MemoryStats {
                ram_used: 8_000_000_000,
                ram_total: 16_000_000_000,
                swap_used: 0,
                swap_total: 4_000_000_000,
            },
            storage: StorageSummary {
                drives: vec![
                    Drive {
                        name: "Root ( / )".to_string(),
                        used_gb: 100.0,
                        total_gb: 500.0,
                    },
                    Drive {
                        name: "Steamlibrary".to_string(),
                        used_gb: 900.0,
                        total_gb: 1000.0,
                    },
                ],
                used_gb: 1000.0,
                total_gb: 1500.0,
            },
        }
    }

    fn radeon() -> GpuInfo {
        GpuInfo {
            name: "Radeon 780M".to_string(),
            usage: 35,
            temperature: 70,
            power_watts: 12.0,
            clock_mhz: 2700,
            max_clock_mhz: 0,
        }
    }

    #[test]
    fn test_clean_cpu_name() {
        assert_eq!(
            clean_cpu_name("Intel(R) Core(TM) i7-8550U CPU @ 1.80GHz"),
            "Intel Core i7-8550U CPU"
        );
        assert_eq!(clean_cpu_name("AMD Ryzen 7 7840U"), "AMD Ryzen 7 7840U");
    }

    #[test]
    fn test_record_shape() {
        let record = render(&dashboard(Some(radeon())));
        assert_eq!(record.class.as_deref(), Some(CLASS));
        assert_eq!(record.alt.as_deref(), Some(ALT));

        assert!(record.text.contains(&format!("<span foreground='#f9e2af'>{} 62°C</span>", CPU_ICON)));
        assert!(record.text.contains(&format!("{} 35%", GPU_ICON)));
        assert!(record.text.contains(&format!("{} 8.0G", MEM_ICON)));
        assert!(record.text.contains(&format!("{} 1000.0G", SSD_ICON)));

        assert!(record.tooltip.contains("CPU: Intel Core i7-8550U CPU"));
        assert!(record.tooltip.contains("  Freq:  1800MHz / 4000MHz"));
        assert!(record.tooltip.contains("GPU: Radeon 780M"));
        assert!(record.tooltip.contains("Freq: 2700MHz"));
        assert!(!record.tooltip.contains("2700MHz / "));
        assert!(record.tooltip.contains("STORAGE (67%)"));
        assert_eq!(record.tooltip.matches(&separator()).count(), 3);
    }

    #[test]
    fn test_missing_gpu_keeps_other_sections() {
        let record = render(&dashboard(None));
        assert!(record.text.contains(&format!("<span foreground='{}'>{} N/A</span>", DIM, GPU_ICON)));
        assert!(record.tooltip.contains("GPU: Not Found"));
        assert!(record.tooltip.contains("CPU: Intel Core i7-8550U CPU"));
        assert!(record.tooltip.contains("MEMORY SYSTEM"));
        assert!(record.tooltip.contains("STORAGE"));
    }

    #[test]
    fn test_idle_gpu_shows_na() {
        let mut gpu = radeon();
        gpu.usage = 0;
        let record = render(&dashboard(Some(gpu)));
        assert!(record.text.contains(&format!("{} N/A", GPU_ICON)));
    }

    #[test]
    fn test_memory_rows() {
        let record = render(&dashboard(None));
        assert!(record.tooltip.contains("<tt>RAM     |  8.0 GB | 16.0 GB | "));
        assert!(record.tooltip.contains("<tt>Swap    |  0.0 GB |  4.0 GB | "));
        assert!(record.tooltip.contains("<span foreground='#f9e2af'>50.0%</span>"));
    }

    #[test]
    fn test_drive_names_truncated() {
        let record = render(&dashboard(None));
        assert!(record.tooltip.contains("<tt>Steamlibra.. | 900.0 G | 100.0 G | "));
        assert!(record.tooltip.contains("<tt>Root ( / )   | 100.0 G | 400.0 G | "));
    }

    #[test]
    fn test_no_sensors_uses_placeholders() {
        let mut dash = dashboard(None);
        dash.cpu.sensors.clear();
        dash.storage = StorageSummary::default();
        let record = render(&dash);
        assert!(record.text.contains(&format!("<span foreground='#ffffff'>{} 0°C</span>", CPU_ICON)));
        assert!(record.tooltip.contains("STORAGE (0%)"));
    }
}
