//! Sensors - read-only data sources behind small capability traits

pub mod cpu;
pub mod gpu;
pub mod memory;
pub mod storage;
pub mod windows;
