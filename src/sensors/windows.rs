//! Window list of the running compositor

pub trait WindowListSource {
    /// Raw window class of every client, duplicates included
    fn window_classes(&self) -> Vec<String>;
}

/// Compositors we know how to talk to, in order of preference
pub fn detect() -> Box<dyn WindowListSource> {
    #[cfg(target_os = "linux")]
    {
        Box::new(crate::linux::hyprland::Hyprctl::default())
    }

    #[cfg(not(target_os = "linux"))]
    {
        Box::new(NoWindows)
    }
}

/// Platforms without a supported compositor
#[cfg(not(target_os = "linux"))]
pub struct NoWindows;

#[cfg(not(target_os = "linux"))]
impl WindowListSource for NoWindows {
    fn window_classes(&self) -> Vec<String> {
        Vec::new()
    }
}
