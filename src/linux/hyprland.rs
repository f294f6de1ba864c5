//! Hyprland client list via hyprctl

use crate::sensors::windows::WindowListSource;
use crate::shared::{absorb, run_command, SourceError};
use serde::Deserialize;

/// The one field we need from `hyprctl clients -j`
#[derive(Debug, Deserialize)]
struct Client {
    #[serde(default)]
    class: Option<String>,
}

pub struct Hyprctl {
    program: String,
}

impl Default for Hyprctl {
    fn default() -> Self {
        Self {
            program: "hyprctl".to_string(),
        }
    }
}

impl Hyprctl {
    fn clients(&self) -> Result<Vec<String>, SourceError> {
        let json = run_command(&self.program, &["clients", "-j"])?;
        parse_clients(&json)
    }
}

impl WindowListSource for Hyprctl {
    fn window_classes(&self) -> Vec<String> {
        absorb(self.clients(), "hyprctl clients").unwrap_or_default()
    }
}

pub fn parse_clients(json: &str) -> Result<Vec<String>, SourceError> {
    let clients: Vec<Client> = serde_json::from_str(json)?;
    Ok(clients.into_iter().filter_map(|c| c.class).collect())
}
