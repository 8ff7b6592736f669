pub mod camera;
pub mod cats;
pub mod colors;
pub mod display_mode;
pub mod field;
pub mod symbols;
pub mod ui;

pub use camera::Camera;
pub use cats::{CatsWidget, RadiusRings};
pub use colors::{mood_colors_for_mode, ColorMode, MoodColors};
pub use display_mode::DisplayMode;
pub use field::{inner_area, FieldWidget};
pub use symbols::detect_unicode;
pub use ui::{EmptyStateWidget, HelpOverlay, StatusBar};
