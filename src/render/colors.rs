//! Colors for the cat viewer.
//!
//! Mood colors come in one palette per terminal color depth, plus a few
//! helpers for dimming and picking a palette from the environment.

use ratatui::style::Color;

use drunk_cats::Mood;

/// Color depth/mode for different terminal capabilities
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorMode {
    /// Full 24-bit RGB color support
    #[default]
    TrueColor,
    /// 256 color mode (xterm-256color)
    Color256,
    /// Basic 16 ANSI colors
    Basic16,
    /// Monochrome mode (grayscale only)
    Monochrome,
}

impl ColorMode {
    /// Guess the color depth from `NO_COLOR`, `COLORTERM` and `TERM`
    pub fn detect() -> Self {
        if std::env::var_os("NO_COLOR").is_some() {
            return ColorMode::Monochrome;
        }
        if let Ok(colorterm) = std::env::var("COLORTERM") {
            let colorterm = colorterm.to_lowercase();
            if colorterm.contains("truecolor") || colorterm.contains("24bit") {
                return ColorMode::TrueColor;
            }
        }
        match std::env::var("TERM") {
            Ok(term) if term.contains("256color") => ColorMode::Color256,
            Ok(term) if term == "dumb" => ColorMode::Monochrome,
            Ok(_) => ColorMode::Basic16,
            Err(_) => ColorMode::TrueColor,
        }
    }
}

/// Colors for each mood
#[derive(Debug, Clone, Copy)]
pub struct MoodColors {
    pub calm: Color,
    pub hisses: Color,
    pub wants_to_fight: Color,
}

impl MoodColors {
    /// Get the color for a given mood
    pub fn get(&self, mood: Mood) -> Color {
        match mood {
            Mood::Calm => self.calm,
            Mood::Hisses => self.hisses,
            Mood::WantsToFight => self.wants_to_fight,
        }
    }
}

/// Default mood colors (TrueColor)
pub const MOOD_COLORS: MoodColors = MoodColors {
    calm: Color::Rgb(0, 158, 115),            // Bluish green
    hisses: Color::Rgb(240, 228, 66),         // Yellow
    wants_to_fight: Color::Rgb(213, 94, 0),   // Vermillion
};

/// Mood colors for 256-color mode
pub const MOOD_COLORS_256: MoodColors = MoodColors {
    calm: Color::Indexed(36),
    hisses: Color::Indexed(227),
    wants_to_fight: Color::Indexed(166),
};

/// Mood colors for basic 16-color mode
pub const MOOD_COLORS_BASIC: MoodColors = MoodColors {
    calm: Color::Green,
    hisses: Color::Yellow,
    wants_to_fight: Color::Red,
};

/// Mood colors for monochrome mode
pub const MOOD_COLORS_MONO: MoodColors = MoodColors {
    calm: Color::Rgb(110, 110, 110),
    hisses: Color::Rgb(190, 190, 190),
    wants_to_fight: Color::Rgb(255, 255, 255),
};

/// Dim a color by a factor (0.0 = black, 1.0 = unchanged)
///
/// Non-RGB colors are returned unchanged.
pub fn dim_color(color: Color, factor: f32) -> Color {
    let factor = factor.clamp(0.0, 1.0);
    match color {
        Color::Rgb(r, g, b) => Color::Rgb(
            (r as f32 * factor) as u8,
            (g as f32 * factor) as u8,
            (b as f32 * factor) as u8,
        ),
        other => other,
    }
}

/// Get mood colors for a specific color mode
pub fn mood_colors_for_mode(mode: ColorMode) -> &'static MoodColors {
    match mode {
        ColorMode::TrueColor => &MOOD_COLORS,
        ColorMode::Color256 => &MOOD_COLORS_256,
        ColorMode::Basic16 => &MOOD_COLORS_BASIC,
        ColorMode::Monochrome => &MOOD_COLORS_MONO,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dim_color_rgb() {
        let color = Color::Rgb(100, 200, 50);
        assert_eq!(dim_color(color, 0.5), Color::Rgb(50, 100, 25));
        assert_eq!(dim_color(color, 1.0), color);
        assert_eq!(dim_color(color, 0.0), Color::Rgb(0, 0, 0));
    }

    #[test]
    fn test_dim_color_non_rgb() {
        assert_eq!(dim_color(Color::Blue, 0.5), Color::Blue);
    }

    #[test]
    fn test_mood_colors_get() {
        assert_eq!(MOOD_COLORS.get(Mood::Calm), MOOD_COLORS.calm);
        assert_eq!(MOOD_COLORS.get(Mood::WantsToFight), MOOD_COLORS.wants_to_fight);
    }

    #[test]
    fn test_palette_for_mode() {
        assert_eq!(
            mood_colors_for_mode(ColorMode::Basic16).get(Mood::Hisses),
            Color::Yellow
        );
        assert_eq!(
            mood_colors_for_mode(ColorMode::TrueColor).get(Mood::Calm),
            MOOD_COLORS.calm
        );
    }
}
