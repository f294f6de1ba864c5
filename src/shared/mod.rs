//! Shared utilities for waybar-probes

pub mod markup;
pub mod severity;

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::str::FromStr;

/// Why a data source came back empty. Never reaches the user; probes log it
/// and fall back to a default.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to run {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{program} exited with {status}: {stderr}")]
    ExitStatus {
        program: String,
        status: std::process::ExitStatus,
        stderr: String,
    },

    #[error("could not parse {what} from {input:?}")]
    Parse { what: &'static str, input: String },

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("no {0} found")]
    NotFound(&'static str),
}

impl SourceError {
    pub fn parse(what: &'static str, input: impl Into<String>) -> Self {
        Self::Parse {
            what,
            input: input.into(),
        }
    }
}

/// Turn a failed read into "data unavailable", leaving a trace in the debug log
pub fn absorb<T>(result: Result<T, SourceError>, what: &str) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::debug!("{} unavailable: {}", what, e);
            None
        }
    }
}

/// Run a command to completion and return its stdout
pub fn run_command(program: &str, args: &[&str]) -> Result<String, SourceError> {
    let output = Command::new(program)
        .args(args)
        .output()
        .map_err(|source| SourceError::Spawn {
            program: program.to_string(),
            source,
        })?;

    if !output.status.success() {
        return Err(SourceError::ExitStatus {
            program: program.to_string(),
            status: output.status,
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

/// Read a sysfs/procfs style file, trimmed
pub fn read_trimmed(path: &Path) -> Result<String, SourceError> {
    fs::read_to_string(path)
        .map(|s| s.trim().to_string())
        .map_err(|source| SourceError::Io {
            path: path.to_path_buf(),
            source,
        })
}

/// Read a file holding a single number
pub fn read_number<T: FromStr>(path: &Path) -> Result<T, SourceError> {
    let raw = read_trimmed(path)?;
    raw.parse().map_err(|_| SourceError::parse("number", raw))
}

/// Bytes to decimal gigabytes
pub fn gigabytes(bytes: u64) -> f64 {
    bytes as f64 / 1e9
}

/// `used / total` as a percentage, 0 when there is no capacity
pub fn percent(used: f64, total: f64) -> f64 {
    if total > 0.0 {
        used / total * 100.0
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percent_zero_capacity() {
        assert_eq!(percent(10.0, 0.0), 0.0);
        assert_eq!(percent(25.0, 100.0), 25.0);
    }

    #[test]
    fn test_gigabytes_is_decimal() {
        assert_eq!(gigabytes(1_500_000_000), 1.5);
    }

    #[test]
    fn test_read_number() {
        let dir = tempfile::tempdir().unwrap();
        let good = dir.path().join("temp1_input");
        fs::write(&good, "48000\n").unwrap();
        assert_eq!(read_number::<u64>(&good).unwrap(), 48000);

        let bad = dir.path().join("garbage");
        fs::write(&bad, "n/a").unwrap();
        assert!(matches!(
            read_number::<u64>(&bad),
            Err(SourceError::Parse { .. })
        ));

        assert!(matches!(
            read_number::<u64>(&dir.path().join("missing")),
            Err(SourceError::Io { .. })
        ));
    }

    #[test]
    fn test_run_command_missing_program() {
        let err = run_command("definitely-not-a-real-program-xyz", &[]).unwrap_err();
        assert!(matches!(err, SourceError::Spawn { .. }));
    }
}
