//! Error type shared by layout, font loading and encoding.

use std::fmt;
use std::path::PathBuf;

/// Which of the two puzzle glyphs a validation error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GlyphRole {
    Wrong,
    Target,
}

impl fmt::Display for GlyphRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GlyphRole::Wrong => f.write_str("wrong"),
            GlyphRole::Target => f.write_str("target"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum PuzzleError {
    /// The requested geometry cannot produce a usable grid.
    #[error("invalid layout: {0}")]
    InvalidLayout(String),
    /// A puzzle glyph is the empty string. Raised before layout.
    #[error("{0} glyph must not be empty")]
    EmptyGlyph(GlyphRole),
    #[error("invalid color {0:?}, expected #RRGGBB or #RRGGBBAA")]
    InvalidColor(String),
    /// Only the strict loader returns this; `Font::load_or_builtin` recovers.
    #[error("failed to load font {path}: {reason}")]
    FontLoad { path: PathBuf, reason: String },
    #[error("image encoding failed: {0}")]
    Encode(#[from] image::ImageError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl PuzzleError {
    /// Configuration errors that are rejected before any drawing happens.
    pub fn is_layout_error(&self) -> bool {
        matches!(
            self,
            PuzzleError::InvalidLayout(_) | PuzzleError::EmptyGlyph(_)
        )
    }
}

pub type Result<T, E = PuzzleError> = std::result::Result<T, E>;
