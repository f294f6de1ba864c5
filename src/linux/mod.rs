//! Linux module - compositor integrations
//!
//! Only compiled on Linux.

pub mod hyprland;
