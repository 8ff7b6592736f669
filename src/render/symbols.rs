//! Symbol system with Unicode and ASCII fallbacks

use drunk_cats::Mood;

/// Symbol with Unicode and ASCII fallback
#[derive(Debug, Clone, Copy)]
pub struct Symbol {
    /// Unicode character for modern terminals
    pub unicode: char,
    /// ASCII fallback for limited terminals
    pub ascii: char,
    /// Human-readable name for the symbol
    pub name: &'static str,
}

impl Symbol {
    pub const fn new(unicode: char, ascii: char, name: &'static str) -> Self {
        Self {
            unicode,
            ascii,
            name,
        }
    }

    /// Render the appropriate character based on Unicode support
    pub fn render(&self, use_unicode: bool) -> char {
        if use_unicode {
            self.unicode
        } else {
            self.ascii
        }
    }
}

/// One glyph per mood
pub struct MoodSymbols {
    pub calm: Symbol,
    pub hisses: Symbol,
    pub wants_to_fight: Symbol,
}

impl MoodSymbols {
    pub fn get(&self, mood: Mood) -> &Symbol {
        match mood {
            Mood::Calm => &self.calm,
            Mood::Hisses => &self.hisses,
            Mood::WantsToFight => &self.wants_to_fight,
        }
    }
}

pub const MOOD_SYMBOLS: MoodSymbols = MoodSymbols {
    calm: Symbol::new('\u{2022}', '.', "calm"),            // U+2022 Bullet (•)
    hisses: Symbol::new('\u{25C6}', '*', "hisses"),        // U+25C6 Black Diamond (◆)
    wants_to_fight: Symbol::new('\u{2716}', 'X', "fight"), // U+2716 Heavy Multiplication X (✖)
};

/// Marker drawn around the followed cat
pub const FOLLOW_MARKER: (Symbol, Symbol) = (
    Symbol::new('\u{27E8}', '[', "follow_left"),  // U+27E8 (⟨)
    Symbol::new('\u{27E9}', ']', "follow_right"), // U+27E9 (⟩)
);

/// Dot used for radius rings and the map outline
pub const RING_DOT: Symbol = Symbol::new('\u{00B7}', '.', "ring"); // U+00B7 Middle Dot (·)

/// Detect if the terminal supports Unicode characters
///
/// Checks locale variables for UTF-8 and falls back to known terminals.
pub fn detect_unicode() -> bool {
    for var in ["LC_ALL", "LC_CTYPE", "LANG"] {
        if let Ok(value) = std::env::var(var) {
            if value.to_lowercase().contains("utf") {
                return true;
            }
        }
    }

    if let Ok(term_program) = std::env::var("TERM_PROGRAM") {
        let unicode_terminals = [
            "iTerm.app",
            "Apple_Terminal",
            "vscode",
            "Hyper",
            "Alacritty",
            "kitty",
            "WezTerm",
        ];
        if unicode_terminals.iter().any(|t| term_program.contains(t)) {
            return true;
        }
    }

    if let Ok(term) = std::env::var("TERM") {
        let unicode_terms = ["xterm", "screen", "tmux", "rxvt"];
        if unicode_terms.iter().any(|t| term.contains(t)) {
            return true;
        }
    }

    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symbol_render() {
        let sym = Symbol::new('\u{25C6}', '<', "diamond");
        assert_eq!(sym.render(true), '\u{25C6}');
        assert_eq!(sym.render(false), '<');
    }

    #[test]
    fn test_mood_symbols() {
        assert_eq!(MOOD_SYMBOLS.get(Mood::Calm).name, "calm");
        assert_eq!(MOOD_SYMBOLS.get(Mood::Hisses).name, "hisses");
        assert_eq!(MOOD_SYMBOLS.get(Mood::WantsToFight).render(false), 'X');
    }
}
