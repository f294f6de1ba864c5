//! Pango markup helpers. Waybar renders these; we only have to emit them well formed.

/// Escape text for embedding inside markup
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '\'' => out.push_str("&apos;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

/// Foreground-colored span. `inner` is already markup.
pub fn span(color: &str, inner: &str) -> String {
    format!("<span foreground='{}'>{}</span>", color, inner)
}

/// Monospace span
pub fn tt(inner: &str) -> String {
    format!("<tt>{}</tt>", inner)
}

pub fn bold(inner: &str) -> String {
    format!("<b>{}</b>", inner)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape() {
        assert_eq!(escape("AT&T <GPU>"), "AT&amp;T &lt;GPU&gt;");
        assert_eq!(escape("plain"), "plain");
    }

    #[test]
    fn test_span() {
        assert_eq!(
            span("#a6e3a1", "42%"),
            "<span foreground='#a6e3a1'>42%</span>"
        );
        assert_eq!(tt(&bold("x")), "<tt><b>x</b></tt>");
    }
}
