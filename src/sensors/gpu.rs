//! GPU sensors - NVIDIA through nvidia-smi, AMD through the amdgpu sysfs tree

use crate::shared::{absorb, read_number, read_trimmed, run_command, SourceError};
use std::fs;
use std::path::{Path, PathBuf};

pub const AMD_DEFAULT_NAME: &str = "AMD Radeon Graphics";
const AMD_VENDOR_ID: &str = "0x1002";

const NVIDIA_STATS_QUERY: &str =
    "--query-gpu=utilization.gpu,temperature.gpu,power.draw,clocks.gr,clocks.max.sm";
const NVIDIA_CSV: &str = "--format=csv,noheader,nounits";

#[derive(Debug, Clone, PartialEq)]
pub struct GpuInfo {
    pub name: String,
    /// Percent busy
    pub usage: u32,
    /// Degrees Celsius
    pub temperature: u32,
    pub power_watts: f32,
    pub clock_mhz: u32,
    /// 0 when the driver does not report it (typical for iGPUs)
    pub max_clock_mhz: u32,
}

pub trait GpuSource {
    fn vendor(&self) -> &'static str;
    fn read(&self) -> Result<GpuInfo, SourceError>;
}

/// First source that answers wins
pub fn detect_gpu(sources: &[&dyn GpuSource]) -> Option<GpuInfo> {
    for source in sources {
        match source.read() {
            Ok(info) => {
                tracing::debug!("Using {} GPU: {}", source.vendor(), info.name);
                return Some(info);
            }
            Err(e) => tracing::debug!("{} GPU unavailable: {}", source.vendor(), e),
        }
    }
    None
}

/// NVIDIA first, then AMD
pub fn detect() -> Option<GpuInfo> {
    let nvidia = NvidiaSmi::default();

    #[cfg(target_os = "linux")]
    {
        let amd = AmdSysfs::default();
        let sources: [&dyn GpuSource; 2] = [&nvidia, &amd];
        detect_gpu(&sources)
    }

    #[cfg(not(target_os = "linux"))]
    {
        let sources: [&dyn GpuSource; 1] = [&nvidia];
        detect_gpu(&sources)
    }
}

// === NVIDIA ===

pub struct NvidiaSmi {
    program: String,
}

impl Default for NvidiaSmi {
    fn default() -> Self {
        Self {
            program: "nvidia-smi".to_string(),
        }
    }
}

impl GpuSource for NvidiaSmi {
    fn vendor(&self) -> &'static str {
        "NVIDIA"
    }

    fn read(&self) -> Result<GpuInfo, SourceError> {
        let name = run_command(&self.program, &["--query-gpu=name", NVIDIA_CSV])?;
        let stats = run_command(&self.program, &[NVIDIA_STATS_QUERY, NVIDIA_CSV])?;

        let name = name.lines().next().unwrap_or("").trim().to_string();
        parse_nvidia_stats(name, &stats)
    }
}

/// Parse `utilization, temperature, power, clock, max clock` from the first
/// CSV line nvidia-smi prints.
pub fn parse_nvidia_stats(name: String, csv: &str) -> Result<GpuInfo, SourceError> {
    let line = csv.lines().next().unwrap_or("");
    let fields: Vec<&str> = line.split(',').map(str::trim).collect();
    let &[usage, temp, power, clock, max_clock] = fields.as_slice() else {
        return Err(SourceError::parse("nvidia-smi stats", line));
    };

    let int = |field: &str| -> Result<u32, SourceError> {
        field
            .parse()
            .map_err(|_| SourceError::parse("nvidia-smi stats", line))
    };

    Ok(GpuInfo {
        name,
        usage: int(usage)?,
        temperature: int(temp)?,
        power_watts: power
            .parse()
            .map_err(|_| SourceError::parse("nvidia-smi power", line))?,
        clock_mhz: int(clock)?,
        max_clock_mhz: int(max_clock)?,
    })
}

// === AMD ===

pub struct AmdSysfs {
    drm_root: PathBuf,
    query_lspci: bool,
}

impl Default for AmdSysfs {
    fn default() -> Self {
        Self {
            drm_root: PathBuf::from("/sys/class/drm"),
            query_lspci: true,
        }
    }
}

impl AmdSysfs {
    /// Read a fake sysfs tree; the name always falls back to the default
    pub fn with_root(drm_root: impl Into<PathBuf>) -> Self {
        Self {
            drm_root: drm_root.into(),
            query_lspci: false,
        }
    }

    /// First `cardN` (in name order) whose PCI vendor is AMD
    fn find_card(&self) -> Result<PathBuf, SourceError> {
        let entries = fs::read_dir(&self.drm_root).map_err(|source| SourceError::Io {
            path: self.drm_root.clone(),
            source,
        })?;

        let mut cards: Vec<PathBuf> = entries
            .flatten()
            .map(|e| e.path())
            .filter(|p| {
                p.file_name()
                    .map(|n| n.to_string_lossy())
                    .is_some_and(|n| n.starts_with("card") && !n.contains('-'))
            })
            .collect();
        cards.sort();

        cards
            .into_iter()
            .find(|card| {
                read_trimmed(&card.join("device/vendor"))
                    .map(|v| v.to_lowercase().contains(AMD_VENDOR_ID))
                    .unwrap_or(false)
            })
            .ok_or(SourceError::NotFound("AMD card"))
    }

    fn name(&self) -> String {
        if !self.query_lspci {
            return AMD_DEFAULT_NAME.to_string();
        }
        absorb(run_command("lspci", &["-mm"]), "lspci")
            .and_then(|out| parse_lspci_name(&out))
            .unwrap_or_else(|| AMD_DEFAULT_NAME.to_string())
    }
}

impl GpuSource for AmdSysfs {
    fn vendor(&self) -> &'static str {
        "AMD"
    }

    fn read(&self) -> Result<GpuInfo, SourceError> {
        let card = self.find_card()?;
        let device = card.join("device");

        let mut info = GpuInfo {
            name: self.name(),
            usage: absorb(read_number(&device.join("gpu_busy_percent")), "gpu_busy_percent")
                .unwrap_or(0),
            temperature: 0,
            power_watts: 0.0,
            clock_mhz: 0,
            max_clock_mhz: 0,
        };

        if let Some(hwmon) = first_hwmon(&device) {
            let temp = read_number::<u64>(&hwmon.join("temp1_input"));
            if let Some(millidegrees) = absorb(temp, "temp1_input") {
                info.temperature = (millidegrees / 1000) as u32;
            }
            let power = read_number::<f64>(&hwmon.join("power1_average"));
            if let Some(microwatts) = absorb(power, "power1_average") {
                info.power_watts = (microwatts / 1_000_000.0) as f32;
            }
            let freq = read_number::<u64>(&hwmon.join("freq1_input"));
            if let Some(hz) = absorb(freq, "freq1_input") {
                info.clock_mhz = (hz / 1_000_000) as u32;
            }
        }

        if info.clock_mhz == 0 {
            info.clock_mhz = absorb(read_trimmed(&device.join("pp_dpm_sclk")), "pp_dpm_sclk")
                .and_then(|table| parse_active_sclk(&table))
                .unwrap_or(0);
        }

        Ok(info)
    }
}

fn first_hwmon(device: &Path) -> Option<PathBuf> {
    let mut hwmons: Vec<PathBuf> = fs::read_dir(device.join("hwmon"))
        .ok()?
        .flatten()
        .map(|e| e.path())
        .filter(|p| {
            p.file_name()
                .is_some_and(|n| n.to_string_lossy().starts_with("hwmon"))
        })
        .collect();
    hwmons.sort();
    hwmons.into_iter().next()
}

/// Marketing name of the first AMD display controller in `lspci -mm` output.
///
/// Lines look like `04:00.0 "VGA compatible controller" "Advanced Micro
/// Devices, Inc. [AMD/ATI]" "Phoenix1" -rc4 ...`.
pub fn parse_lspci_name(output: &str) -> Option<String> {
    output.lines().find_map(|line| {
        let parts: Vec<&str> = line.split('"').collect();
        let class = parts.get(1)?.to_lowercase();
        let vendor = parts.get(3)?;

        if !(class.contains("vga") || class.contains("3d")) {
            return None;
        }
        let is_amd = vendor
            .split(|c: char| !c.is_ascii_alphanumeric())
            .any(|word| word.eq_ignore_ascii_case("amd") || word.eq_ignore_ascii_case("ati"));
        if !is_amd {
            return None;
        }

        match parts.get(5).map(|s| s.trim()) {
            Some(device) if !device.is_empty() => Some(device.to_string()),
            _ => Some(vendor.trim().to_string()),
        }
    })
}

/// Current shader clock from the legacy `pp_dpm_sclk` table; the active
/// level is the line ending in `*` (`1: 1200Mhz *`).
pub fn parse_active_sclk(table: &str) -> Option<u32> {
    table.lines().find_map(|line| {
        let level = line.trim_end().strip_suffix('*')?;
        let freq = level.split_whitespace().last()?;
        let digits = freq
            .strip_suffix("Mhz")
            .or_else(|| freq.strip_suffix("MHz"))?;
        digits.parse().ok()
    })
}
