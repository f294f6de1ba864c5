//! Severity bands: map a reading to a display color

/// Catppuccin-style palette
pub const ACCENT: &str = "#f5c2e7";
pub const NEUTRAL: &str = "#ffffff";
pub const DIM: &str = "#777";

/// Which set of breakpoints applies to a reading
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scale {
    /// Degrees Celsius: 45 / 60 / 75 / 85
    Temperature,
    /// Percent: 30 / 50 / 70 / 85
    Utilization,
}

impl Scale {
    fn breakpoints(self) -> [f64; 4] {
        match self {
            Scale::Temperature => [45.0, 60.0, 75.0, 85.0],
            Scale::Utilization => [30.0, 50.0, 70.0, 85.0],
        }
    }
}

/// Ordered least to most severe
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Low,
    MidLow,
    Mid,
    MidHigh,
    High,
}

impl Severity {
    const BANDS: [Severity; 5] = [
        Severity::Low,
        Severity::MidLow,
        Severity::Mid,
        Severity::MidHigh,
        Severity::High,
    ];

    /// Band for a reading, `None` if the value is not a usable number
    pub fn classify(value: f64, scale: Scale) -> Option<Self> {
        if !value.is_finite() {
            return None;
        }
        let band = scale
            .breakpoints()
            .iter()
            .take_while(|&&limit| value >= limit)
            .count();
        Some(Self::BANDS[band])
    }

    pub fn color(self) -> &'static str {
        match self {
            Severity::Low => "#a6e3a1",
            Severity::MidLow => "#89dceb",
            Severity::Mid => "#f9e2af",
            Severity::MidHigh => "#fab387",
            Severity::High => "#f38ba8",
        }
    }
}

/// Color for an optional reading; absent or non-finite values are neutral
pub fn color(value: Option<f64>, scale: Scale) -> &'static str {
    value
        .and_then(|v| Severity::classify(v, scale))
        .map(Severity::color)
        .unwrap_or(NEUTRAL)
}
