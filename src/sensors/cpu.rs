//! CPU sensors - identity, per-thread load, frequency, temperatures

use crate::shared::{absorb, read_number, read_trimmed};
use std::path::Path;
use std::time::Duration;
use sysinfo::{Components, CpuRefreshKind, RefreshKind, System};

pub const UNKNOWN_CPU: &str = "Unknown CPU";

/// Package-wide labels, best first: AMD k10temp/zenpower, then Intel coretemp
const PACKAGE_LABELS: [&str; 4] = ["Tctl", "Tdie", "Package id 0", "Tccd1"];

/// Chips whose unlabelled readings (`k10temp temp1`) stand in for the package
const PACKAGE_CHIPS: [&str; 4] = ["k10temp", "coretemp", "zenpower", "asus"];

/// One temperature sensor. The label is the hwmon `tempN_label` text
/// (`Core 3`, `Tctl`), or `<chip> tempN` when the chip ships no label file.
#[derive(Debug, Clone, PartialEq)]
pub struct SensorReading {
    pub label: String,
    pub celsius: f32,
}

impl SensorReading {
    pub fn new(label: impl Into<String>, celsius: f32) -> Self {
        Self {
            label: label.into(),
            celsius,
        }
    }

    /// Label is exactly `name`, with or without a leading chip name
    fn has_label(&self, name: &str) -> bool {
        self.label
            .strip_suffix(name)
            .is_some_and(|rest| rest.is_empty() || rest.ends_with(' '))
    }

    fn is_from(&self, chip: &str) -> bool {
        self.label.split_whitespace().next() == Some(chip)
    }

    /// `Some(n)` for per-core labels like `Core 7`
    fn core_index(&self) -> Option<u32> {
        let mut words = self.label.split_whitespace();
        words.find(|word| *word == "Core")?;
        words.next()?.parse().ok()
    }
}

/// The reading that best represents the whole package. hwmon readings come
/// in no particular order, so this goes by label rather than position.
fn package_reading(readings: &[SensorReading]) -> Option<&SensorReading> {
    PACKAGE_LABELS
        .iter()
        .find_map(|name| readings.iter().find(|r| r.has_label(name)))
        .or_else(|| {
            PACKAGE_CHIPS
                .iter()
                .find_map(|chip| readings.iter().find(|r| r.is_from(chip)))
        })
}

/// Temperatures as the hardware exposes them
#[derive(Debug, Clone, PartialEq)]
pub enum CoreTemperatures {
    /// One value per physical core (Intel coretemp `Core N`)
    PerCore(Vec<f32>),
    /// A single package value (AMD Tctl/Tdie)
    Package(f32),
    Unavailable,
}

impl CoreTemperatures {
    pub fn from_readings(readings: &[SensorReading]) -> Self {
        let mut cores: Vec<(u32, f32)> = readings
            .iter()
            .filter_map(|r| r.core_index().map(|i| (i, r.celsius)))
            .collect();
        if !cores.is_empty() {
            cores.sort_by_key(|(i, _)| *i);
            return Self::PerCore(cores.into_iter().map(|(_, t)| t).collect());
        }

        match package_reading(readings) {
            Some(r) if r.celsius > 0.0 => Self::Package(r.celsius),
            _ => Self::Unavailable,
        }
    }

    /// Spread the readings over `threads` logical CPUs. With N per-core
    /// values each covers `max(1, threads / N)` consecutive threads and the
    /// last value fills any remainder, so every thread gets a value.
    pub fn per_thread(&self, threads: usize) -> Vec<f32> {
        match self {
            Self::Package(t) => vec![*t; threads],
            Self::PerCore(values) => match values.last() {
                Some(&last) => {
                    let ratio = (threads / values.len()).max(1);
                    let mut spread: Vec<f32> = values
                        .iter()
                        .flat_map(|&t| std::iter::repeat(t).take(ratio))
                        .collect();
                    spread.resize(threads, last);
                    spread
                }
                None => vec![0.0; threads],
            },
            Self::Unavailable => vec![0.0; threads],
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CpuFrequency {
    pub current_mhz: u64,
    pub max_mhz: u64,
}

/// Everything one probe run knows about the CPU
#[derive(Debug, Clone, PartialEq)]
pub struct CpuSnapshot {
    pub name: String,
    /// Percent busy per logical thread
    pub usages: Vec<f32>,
    pub sensors: Vec<SensorReading>,
    pub frequency: CpuFrequency,
}

impl CpuSnapshot {
    pub fn average_usage(&self) -> f32 {
        if self.usages.is_empty() {
            return 0.0;
        }
        self.usages.iter().sum::<f32>() / self.usages.len() as f32
    }

    pub fn core_temperatures(&self) -> CoreTemperatures {
        CoreTemperatures::from_readings(&self.sensors)
    }

    pub fn package_temperature(&self) -> Option<f32> {
        package_reading(&self.sensors).map(|r| r.celsius)
    }
}

pub trait CpuSource {
    /// Block for `window` and report load measured across it
    fn sample(&mut self, window: Duration) -> CpuSnapshot;
}

/// CPU data from sysinfo plus a couple of direct procfs/sysfs reads
pub struct SysinfoCpu {
    sys: System,
}

impl Default for SysinfoCpu {
    fn default() -> Self {
        Self::new()
    }
}

impl SysinfoCpu {
    pub fn new() -> Self {
        let sys = System::new_with_specifics(
            RefreshKind::nothing().with_cpu(CpuRefreshKind::everything()),
        );
        Self { sys }
    }

    fn name(&self) -> String {
        let from_proc = absorb(read_trimmed(Path::new("/proc/cpuinfo")), "/proc/cpuinfo")
            .and_then(|info| parse_model_name(&info));
        from_proc
            .or_else(|| {
                self.sys
                    .cpus()
                    .first()
                    .map(|c| c.brand().trim().to_string())
                    .filter(|b| !b.is_empty())
            })
            .unwrap_or_else(|| UNKNOWN_CPU.to_string())
    }

    fn frequency(&self) -> CpuFrequency {
        let cpus = self.sys.cpus();
        let current_mhz = if cpus.is_empty() {
            0
        } else {
            cpus.iter().map(|c| c.frequency()).sum::<u64>() / cpus.len() as u64
        };
        let max_khz: Option<u64> = absorb(
            read_number(Path::new(
                "/sys/devices/system/cpu/cpu0/cpufreq/cpuinfo_max_freq",
            )),
            "cpuinfo_max_freq",
        );

        CpuFrequency {
            current_mhz,
            max_mhz: max_khz.map(|khz| khz / 1000).unwrap_or(0),
        }
    }
}

impl CpuSource for SysinfoCpu {
    fn sample(&mut self, window: Duration) -> CpuSnapshot {
        std::thread::sleep(window.max(sysinfo::MINIMUM_CPU_UPDATE_INTERVAL));
        self.sys.refresh_cpu_all();

        let usages = self.sys.cpus().iter().map(|c| c.cpu_usage()).collect();

        CpuSnapshot {
            name: self.name(),
            usages,
            sensors: temperature_readings(),
            frequency: self.frequency(),
        }
    }
}

fn temperature_readings() -> Vec<SensorReading> {
    let components = Components::new_with_refreshed_list();
    let readings: Vec<SensorReading> = components
        .iter()
        .filter_map(|c| {
            c.temperature()
                .filter(|t| t.is_finite())
                .map(|t| SensorReading::new(c.label(), t))
        })
        .collect();
    tracing::debug!("Found {} temperature sensors", readings.len());
    readings
}

/// The `model name` field of /proc/cpuinfo
pub fn parse_model_name(cpuinfo: &str) -> Option<String> {
    cpuinfo
        .lines()
        .find(|line| line.starts_with("model name"))
        .and_then(|line| line.split_once(':'))
        .map(|(_, name)| name.trim().to_string())
        .filter(|name| !name.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn readings(list: &[(&str, f32)]) -> Vec<SensorReading> {
        list.iter().map(|(l, t)| SensorReading::new(*l, *t)).collect()
    }

    #[test]
    fn test_parse_model_name() {
        let info = "processor\t: 0\nvendor_id\t: AuthenticAMD\nmodel name\t: AMD Ryzen 7 7840U w/ Radeon 780M Graphics\n";
        assert_eq!(
            parse_model_name(info).as_deref(),
            Some("AMD Ryzen 7 7840U w/ Radeon 780M Graphics")
        );
        assert_eq!(parse_model_name("processor : 0\n"), None);
    }

    #[test]
    fn test_intel_per_core_sorted_numerically() {
        let temps = CoreTemperatures::from_readings(&readings(&[
            ("Package id 0", 60.0),
            ("Core 10", 55.0),
            ("Core 2", 52.0),
            ("Core 0", 50.0),
            ("acpitz temp1", 30.0),
        ]));
        assert_eq!(temps, CoreTemperatures::PerCore(vec![50.0, 52.0, 55.0]));
    }

    #[test]
    fn test_amd_package_prefers_tctl() {
        let temps = CoreTemperatures::from_readings(&readings(&[
            ("Tccd1", 48.0),
            ("Tccd2", 47.0),
            ("Tctl", 51.5),
        ]));
        assert_eq!(temps, CoreTemperatures::Package(51.5));

        let temps = CoreTemperatures::from_readings(&readings(&[("Tccd1", 48.0)]));
        assert_eq!(temps, CoreTemperatures::Package(48.0));
        assert_eq!(temps.per_thread(4), vec![48.0; 4]);
    }

    #[test]
    fn test_unlabelled_chip_reading() {
        let temps = CoreTemperatures::from_readings(&readings(&[
            ("nvme Composite", 38.0),
            ("k10temp temp1", 44.0),
        ]));
        assert_eq!(temps, CoreTemperatures::Package(44.0));
    }

    #[test]
    fn test_no_cpu_sensors() {
        let temps = CoreTemperatures::from_readings(&readings(&[
            ("nvme Composite", 40.0),
            ("edge", 55.0),
        ]));
        assert_eq!(temps, CoreTemperatures::Unavailable);
        assert_eq!(temps.per_thread(3), vec![0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_per_thread_replication_covers_every_thread() {
        for sensors in 1..=6usize {
            for threads in sensors..=16 {
                let values: Vec<f32> = (0..sensors).map(|i| 40.0 + i as f32).collect();
                let spread = CoreTemperatures::PerCore(values.clone()).per_thread(threads);
                assert_eq!(spread.len(), threads);

                let ratio = threads / sensors;
                for value in &values {
                    let count = spread.iter().filter(|t| *t == value).count();
                    assert!(
                        count >= ratio,
                        "{} sensors / {} threads: {} covered {} threads",
                        sensors,
                        threads,
                        value,
                        count
                    );
                }
            }
        }
    }

    #[test]
    fn test_per_thread_hyperthreading_pairs() {
        let spread = CoreTemperatures::PerCore(vec![50.0, 60.0]).per_thread(4);
        assert_eq!(spread, vec![50.0, 50.0, 60.0, 60.0]);

        let spread = CoreTemperatures::PerCore(vec![50.0, 60.0]).per_thread(5);
        assert_eq!(spread, vec![50.0, 50.0, 60.0, 60.0, 60.0]);
    }

    fn snapshot(sensors: Vec<SensorReading>) -> CpuSnapshot {
        CpuSnapshot {
            name: "x".into(),
            usages: vec![],
            sensors,
            frequency: CpuFrequency::default(),
        }
    }

    #[test]
    fn test_package_temperature_by_label_not_position() {
        let intel = snapshot(readings(&[
            ("Core 3", 58.0),
            ("Core 0", 55.0),
            ("Package id 0", 61.0),
        ]));
        assert_eq!(intel.package_temperature(), Some(61.0));
        assert_eq!(intel.average_usage(), 0.0);

        let amd = snapshot(readings(&[("Tccd1", 48.0), ("Tctl", 70.0)]));
        assert_eq!(amd.package_temperature(), Some(70.0));

        let none = snapshot(readings(&[("nvme Composite", 40.0)]));
        assert_eq!(none.package_temperature(), None);
    }
}
