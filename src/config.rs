use std::path::PathBuf;

use log::LevelFilter;

use crate::piece::Color;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GlyphStyle {
    /// `K Q R B N P` for White, lower case for Black.
    Letters,
    /// Chess symbols from the Unicode "Chess Symbols" block.
    Unicode,
}

/// Settings for the console front ends. None of these affect the rules.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlayConfig {
    pub glyphs: GlyphStyle,
    /// Side drawn at the bottom of the board.
    pub perspective: Color,
    /// Redraw from the point of view of whoever is to move.
    pub auto_flip: bool,
    pub show_coordinates: bool,
    pub log_level: LevelFilter,
    /// Also append log records here.
    pub log_file: Option<PathBuf>,
}

impl Default for PlayConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Environment variables read by [`PlayConfig::from_env`].
pub const ENV_VARS: [&str; 5] = [
    "CHESS_GLYPHS",
    "CHESS_PERSPECTIVE",
    "CHESS_FLIP",
    "CHESS_LOG",
    "CHESS_LOG_FILE",
];

impl PlayConfig {
    pub fn new() -> Self {
        PlayConfig {
            glyphs: GlyphStyle::Letters,
            perspective: Color::White,
            auto_flip: false,
            show_coordinates: true,
            log_level: LevelFilter::Warn,
            log_file: None,
        }
    }

    /// Defaults overridden by whichever of [`ENV_VARS`] are set.
    pub fn from_env() -> Self {
        let mut config = Self::new();
        for key in ENV_VARS {
            if let Ok(value) = std::env::var(key) {
                config.apply_var(key, &value);
            }
        }
        config
    }

    /// Apply one setting. Returns false, leaving the config unchanged, for an
    /// unknown key or a value that does not parse.
    pub fn apply_var(&mut self, key: &str, value: &str) -> bool {
        if key == "CHESS_LOG_FILE" {
            let path = value.trim();
            self.log_file = (!path.is_empty()).then(|| PathBuf::from(path));
            return true;
        }
        let value = value.trim().to_ascii_lowercase();
        match (key, value.as_str()) {
            ("CHESS_GLYPHS", "letters") => self.glyphs = GlyphStyle::Letters,
            ("CHESS_GLYPHS", "unicode") => self.glyphs = GlyphStyle::Unicode,
            ("CHESS_PERSPECTIVE", "white") => self.perspective = Color::White,
            ("CHESS_PERSPECTIVE", "black") => self.perspective = Color::Black,
            ("CHESS_FLIP", "1" | "true" | "yes") => self.auto_flip = true,
            ("CHESS_FLIP", "0" | "false" | "no") => self.auto_flip = false,
            ("CHESS_LOG", level) => match level.parse() {
                Ok(level) => self.log_level = level,
                Err(_) => return false,
            },
            _ => return false,
        }
        true
    }

    /// Which side to draw at the bottom when `to_move` is on move.
    pub fn perspective_for(&self, to_move: Color) -> Color {
        if self.auto_flip {
            to_move
        } else {
            self.perspective
        }
    }
}
