//! RAM and swap usage

use crate::shared::percent;
use sysinfo::{MemoryRefreshKind, RefreshKind, System};

/// Byte counts
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MemoryStats {
    pub ram_used: u64,
    pub ram_total: u64,
    pub swap_used: u64,
    pub swap_total: u64,
}

impl MemoryStats {
    pub fn ram_percent(&self) -> f64 {
        percent(self.ram_used as f64, self.ram_total as f64)
    }

    pub fn swap_percent(&self) -> f64 {
        percent(self.swap_used as f64, self.swap_total as f64)
    }
}

pub trait MemorySource {
    fn memory(&self) -> MemoryStats;
}

pub struct SysinfoMemory;

impl MemorySource for SysinfoMemory {
    fn memory(&self) -> MemoryStats {
        let sys = System::new_with_specifics(
            RefreshKind::nothing().with_memory(MemoryRefreshKind::everything()),
        );
        MemoryStats {
            ram_used: sys.used_memory(),
            ram_total: sys.total_memory(),
            swap_used: sys.used_swap(),
            swap_total: sys.total_swap(),
        }
    }
}
