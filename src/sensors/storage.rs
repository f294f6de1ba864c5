//! Mounted filesystem usage, filtered down to the partitions a person cares about

use crate::config::StorageConfig;
use crate::shared::{gigabytes, percent};
use std::path::{Path, PathBuf};
use sysinfo::Disks;

const EXCLUDED_FS_TYPES: [&str; 5] = ["squashfs", "tracefs", "overlay", "tmpfs", "devtmpfs"];
const EXCLUDED_MOUNTS: [&str; 4] = ["/boot", "/boot/efi", "/run", "/dev"];

#[derive(Debug, Clone, PartialEq)]
pub struct Partition {
    pub mount_point: PathBuf,
    pub fs_type: String,
    pub total_bytes: u64,
    pub used_bytes: u64,
}

pub trait FilesystemSource {
    fn partitions(&self) -> Vec<Partition>;
}

pub struct SysinfoDisks;

impl FilesystemSource for SysinfoDisks {
    fn partitions(&self) -> Vec<Partition> {
        let disks = Disks::new_with_refreshed_list();
        disks
            .iter()
            .map(|disk| {
                let total = disk.total_space();
                Partition {
                    mount_point: disk.mount_point().to_path_buf(),
                    fs_type: disk.file_system().to_string_lossy().into_owned(),
                    total_bytes: total,
                    used_bytes: total.saturating_sub(disk.available_space()),
                }
            })
            .collect()
    }
}

/// Pseudo/ephemeral filesystems and system mount points to skip
#[derive(Debug, Clone)]
pub struct StorageFilter {
    fs_types: Vec<String>,
    mount_prefixes: Vec<PathBuf>,
}

impl Default for StorageFilter {
    fn default() -> Self {
        Self::new(&StorageConfig::default())
    }
}

impl StorageFilter {
    pub fn new(extra: &StorageConfig) -> Self {
        let fs_types = EXCLUDED_FS_TYPES
            .iter()
            .map(|s| s.to_string())
            .chain(extra.exclude_fs_types.iter().cloned())
            .collect();
        let mount_prefixes = EXCLUDED_MOUNTS
            .iter()
            .map(PathBuf::from)
            .chain(extra.exclude_mounts.iter().map(PathBuf::from))
            .collect();
        Self {
            fs_types,
            mount_prefixes,
        }
    }

    pub fn excludes(&self, partition: &Partition) -> bool {
        self.fs_types.iter().any(|t| *t == partition.fs_type)
            || self
                .mount_prefixes
                .iter()
                .any(|prefix| partition.mount_point.starts_with(prefix))
    }
}

/// One row of the storage table, in decimal GB
#[derive(Debug, Clone, PartialEq)]
pub struct Drive {
    pub name: String,
    pub used_gb: f64,
    pub total_gb: f64,
}

impl Drive {
    pub fn free_gb(&self) -> f64 {
        self.total_gb - self.used_gb
    }

    pub fn percent(&self) -> f64 {
        percent(self.used_gb, self.total_gb)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct StorageSummary {
    pub drives: Vec<Drive>,
    pub used_gb: f64,
    pub total_gb: f64,
}

impl StorageSummary {
    pub fn from_partitions(partitions: &[Partition], filter: &StorageFilter) -> Self {
        let drives: Vec<Drive> = partitions
            .iter()
            .filter(|p| !filter.excludes(p))
            .map(|p| Drive {
                name: friendly_name(&p.mount_point),
                used_gb: gigabytes(p.used_bytes),
                total_gb: gigabytes(p.total_bytes),
            })
            .collect();

        let used_gb = drives.iter().map(|d| d.used_gb).sum();
        let total_gb = drives.iter().map(|d| d.total_gb).sum();

        Self {
            drives,
            used_gb,
            total_gb,
        }
    }

    /// Overall utilization; 0 when nothing was counted
    pub fn percent(&self) -> f64 {
        percent(self.used_gb, self.total_gb)
    }
}

pub fn friendly_name(mount_point: &Path) -> String {
    if mount_point == Path::new("/") {
        return "Root ( / )".to_string();
    }
    if mount_point == Path::new("/home") {
        return "Home".to_string();
    }

    let last = mount_point
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let mut chars = last.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => "Data".to_string(),
    }
}
