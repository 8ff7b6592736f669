//! Display mode presets for the cat viewer.
//!
//! - **Minimal**: cats only
//! - **Standard**: cats plus the status bar
//! - **Debug**: adds radius rings around the followed cat and index details

/// Display mode presets for the visualization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DisplayMode {
    Minimal,

    #[default]
    Standard,

    Debug,
}

impl DisplayMode {
    pub fn shows_status_bar(&self) -> bool {
        !matches!(self, DisplayMode::Minimal)
    }

    pub fn shows_rings(&self) -> bool {
        matches!(self, DisplayMode::Debug)
    }

    /// Cycle to the next display mode.
    ///
    /// Order: Minimal -> Standard -> Debug -> Minimal
    pub fn cycle(&self) -> DisplayMode {
        match self {
            DisplayMode::Minimal => DisplayMode::Standard,
            DisplayMode::Standard => DisplayMode::Debug,
            DisplayMode::Debug => DisplayMode::Minimal,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            DisplayMode::Minimal => "Minimal",
            DisplayMode::Standard => "Standard",
            DisplayMode::Debug => "Debug",
        }
    }

    /// Get a short description of what this mode shows.
    pub fn description(&self) -> &'static str {
        match self {
            DisplayMode::Minimal => "cats only",
            DisplayMode::Standard => "cats + status bar",
            DisplayMode::Debug => "rings + index details",
        }
    }
}
