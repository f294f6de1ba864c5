//! waybar-probes: multi-call entry point
//!
//! `waybar-probes cpu` is equivalent to `cpu-info`, and so on. A missing or
//! unknown subcommand is a usage error (clap's exit code 2) and prints
//! nothing on stdout; only a parsed probe carries the always-exit-0 contract.

use clap::{Parser, Subcommand};
use waybar_probes::Probe;

// === CLI ===

#[derive(Parser)]
#[command(name = "waybar-probes")]
#[command(about = "Single-shot status probes for Waybar custom modules")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Per-thread CPU load and temperature
    Cpu,
    /// GPU load, temperature, power and clock
    Gpu,
    /// Glyphs for running applications
    Apps,
    /// CPU, GPU, memory and storage dashboard
    Sysmon,
}

impl From<Commands> for Probe {
    fn from(command: Commands) -> Self {
        match command {
            Commands::Cpu => Probe::Cpu,
            Commands::Gpu => Probe::Gpu,
            Commands::Apps => Probe::Apps,
            Commands::Sysmon => Probe::Sysmon,
        }
    }
}

fn main() {
    let cli = Cli::parse();
    waybar_probes::main_for(cli.command.into());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subcommands_map_to_probes() {
        let cli = Cli::try_parse_from(["waybar-probes", "sysmon"]).unwrap();
        assert!(matches!(Probe::from(cli.command), Probe::Sysmon));

        let cli = Cli::try_parse_from(["waybar-probes", "apps"]).unwrap();
        assert!(matches!(Probe::from(cli.command), Probe::Apps));
    }

    #[test]
    fn test_missing_subcommand_is_usage_error() {
        let err = match Cli::try_parse_from(["waybar-probes"]) {
            Ok(_) => panic!("parsed without a subcommand"),
            Err(e) => e,
        };
        assert_eq!(err.exit_code(), 2);
        assert!(Cli::try_parse_from(["waybar-probes", "disk"]).is_err());
    }
}
