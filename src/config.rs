//! Puzzle configuration and the built-in problem sets.

use serde::{Deserialize, Serialize};

use crate::color::Rgba8;
use crate::error::{GlyphRole, PuzzleError, Result};
use crate::layout::{AspectRatio, HeaderSize, PuzzleLayout};

/// Which of the two images to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RenderMode {
    /// Unmarked image shown to the solver.
    Question,
    /// Target glyph in red with a ring around it.
    Answer,
}

impl RenderMode {
    pub fn is_answer(self) -> bool {
        self == RenderMode::Answer
    }
}

/// Everything a render needs apart from the target position and mode.
///
/// Missing fields deserialize to the defaults, so a JSON file may override
/// only what it cares about.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PuzzleConfig {
    pub wrong_glyph: String,
    pub target_glyph: String,
    pub header_text: String,
    pub aspect: AspectRatio,
    pub header: HeaderSize,
    pub header_background: Rgba8,
    pub header_text_color: Rgba8,
    pub header_font_size: u32,
    pub header_text_y_offset: i32,
    pub grid_rows: u32,
    pub grid_cols: u32,
    pub grid_font_size: u32,
    pub grid_text_color: Rgba8,
    pub background: Rgba8,
}

impl Default for PuzzleConfig {
    fn default() -> Self {
        ProblemSet::ALL[0].config()
    }
}

impl PuzzleConfig {
    /// Check glyphs and font sizes, then resolve the geometry.
    ///
    /// Empty glyphs are reported before any layout problem.
    pub fn validate(&self) -> Result<PuzzleLayout> {
        if self.wrong_glyph.is_empty() {
            return Err(PuzzleError::EmptyGlyph(GlyphRole::Wrong));
        }
        if self.target_glyph.is_empty() {
            return Err(PuzzleError::EmptyGlyph(GlyphRole::Target));
        }
        if self.header_font_size == 0 || self.grid_font_size == 0 {
            return Err(PuzzleError::InvalidLayout(format!(
                "font sizes must be positive (header {}, grid {})",
                self.header_font_size, self.grid_font_size
            )));
        }
        PuzzleLayout::resolve(self.aspect, self.header, self.grid_rows, self.grid_cols)
    }

    /// Radius of the answer ring around the target cell.
    pub fn ring_radius(&self) -> f64 {
        self.grid_font_size as f64 / 1.5
    }

    /// Glyph drawn in a cell, given whether it is the target.
    pub fn glyph_for(&self, is_target: bool) -> &str {
        if is_target {
            &self.target_glyph
        } else {
            &self.wrong_glyph
        }
    }
}

/// A recommended glyph pair with the label used in the header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProblemSet {
    pub name: &'static str,
    pub wrong: &'static str,
    pub target: &'static str,
    pub target_label: &'static str,
}

impl ProblemSet {
    pub const ALL: &'static [ProblemSet] = &[
        ProblemSet::new("나 vs 너 (한글)", "나", "너", "숫자 '너'"),
        ProblemSet::new("3 vs 8 (숫자)", "3", "8", "숫자 '8'"),
        ProblemSet::new("5 vs 2 (숫자)", "5", "2", "숫자 '2'"),
        ProblemSet::new("6 vs 9 (숫자)", "6", "9", "숫자 '9'"),
        ProblemSet::new("F vs E (알파벳)", "F", "E", "알파벳 'E'"),
        ProblemSet::new("O vs Q (알파벳)", "O", "Q", "알파벳 'Q'"),
        ProblemSet::new("R vs P (알파벳)", "R", "P", "알파벳 'P'"),
        ProblemSet::new("大 vs 太 (한자)", "大", "太", "한자 '클 태(太)'"),
        ProblemSet::new("왕 vs 욍 (한글)", "왕", "욍", "글자 '욍'"),
        ProblemSet::new("숲 vs 슾 (한글)", "숲", "슾", "글자 '슾'"),
    ];

    const fn new(
        name: &'static str,
        wrong: &'static str,
        target: &'static str,
        target_label: &'static str,
    ) -> Self {
        Self {
            name,
            wrong,
            target,
            target_label,
        }
    }

    /// Look a set up by its full name or by `wrong/target`, e.g. `"6/9"`.
    pub fn find(key: &str) -> Option<&'static ProblemSet> {
        Self::ALL.iter().find(|set| {
            set.name == key || key.split_once('/') == Some((set.wrong, set.target))
        })
    }

    pub fn default_header_text(&self) -> String {
        format!("3초 안에 {} 찾기", self.target_label)
    }

    /// Default configuration using this glyph pair.
    pub fn config(&self) -> PuzzleConfig {
        PuzzleConfig {
            wrong_glyph: self.wrong.to_owned(),
            target_glyph: self.target.to_owned(),
            header_text: self.default_header_text(),
            aspect: AspectRatio::Square,
            header: HeaderSize::Fixed(300),
            header_background: Rgba8::opaque(0x33, 0x44, 0x88),
            header_text_color: Rgba8::opaque(0xFF, 0xD7, 0x00),
            header_font_size: 90,
            header_text_y_offset: 0,
            grid_rows: 10,
            grid_cols: 10,
            grid_font_size: 80,
            grid_text_color: Rgba8::BLACK,
            background: Rgba8::WHITE,
        }
    }
}
