//! Running-applications probe: one glyph per distinct window class

use super::StatusRecord;
use crate::config::Config;
use crate::sensors::windows;
use crate::shared::markup::escape;
use std::collections::{BTreeSet, HashMap};

pub const CLASS: &str = "custom-running-apps";

const DEFAULT_GLYPH: &str = "\u{f2d0}";

const BUILTIN_GLYPHS: [(&str, &str); 10] = [
    ("firefox", "\u{f269}"),
    ("code", "\u{f121}"),
    ("terminal", "\u{f489}"),
    ("kitty", "\u{f489}"),
    ("discord", "\u{f392}"),
    ("spotify", "\u{f1bc}"),
    ("vlc", "\u{fa7b}"),
    ("thunar", "\u{f07c}"),
    ("obs", "\u{f22e}"),
    ("rofi", "\u{f002}"),
];

/// Window class -> glyph, built-ins overlaid with the user's config
pub struct GlyphTable {
    glyphs: HashMap<String, String>,
    fallback: String,
}

impl Default for GlyphTable {
    fn default() -> Self {
        Self::new(&Config::default())
    }
}

impl GlyphTable {
    pub fn new(config: &Config) -> Self {
        let mut glyphs: HashMap<String, String> = BUILTIN_GLYPHS
            .iter()
            .map(|(class, glyph)| (class.to_string(), glyph.to_string()))
            .collect();
        for (class, glyph) in &config.glyphs {
            glyphs.insert(class.to_lowercase(), glyph.clone());
        }

        Self {
            glyphs,
            fallback: config
                .default_glyph
                .clone()
                .unwrap_or_else(|| DEFAULT_GLYPH.to_string()),
        }
    }

    pub fn glyph(&self, class: &str) -> &str {
        self.glyphs.get(class).unwrap_or(&self.fallback)
    }
}

pub fn collect(config: &Config) -> StatusRecord {
    let source = windows::detect();
    render(source.window_classes(), &GlyphTable::new(config))
}

pub fn render(classes: impl IntoIterator<Item = String>, glyphs: &GlyphTable) -> StatusRecord {
    let unique: BTreeSet<String> = classes
        .into_iter()
        .filter(|c| !c.is_empty())
        .map(|c| c.to_lowercase())
        .collect();

    let text = unique
        .iter()
        .map(|class| glyphs.glyph(class))
        .collect::<Vec<_>>()
        .join(" ");
    let names = unique
        .iter()
        .map(|class| escape(class))
        .collect::<Vec<_>>()
        .join(", ");

    StatusRecord::new(text, format!("Running: {}", names)).with_class(CLASS)
}
