//! Text faces: measurement and drawing on top of the rasterizer.
//!
//! A face turns a string into a [`Path`] positioned on a baseline. Measuring
//! and drawing both go through that path, so the ink box used for centring
//! is exactly the ink that gets rasterized.

use std::path::Path as FsPath;

use log::warn;

use crate::builtin_font::BuiltinFace;
use crate::canvas::Canvas;
use crate::color::Rgba8;
use crate::config::PuzzleConfig;
use crate::error::Result;
#[cfg(feature = "font")]
use crate::outline_font::OutlineFace;
use crate::path::{bounding_rect, Bounds, ConvCurve, Path};
use crate::rasterizer::{render_scanlines_aa_solid, Rasterizer, ScanlineU8};

/// Metrics of a laid-out string, relative to a pen at (0, 0) on the
/// baseline with y growing downward.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextBounds {
    /// Horizontal pen advance.
    pub advance: f64,
    /// Tight box around the rendered ink; `None` for blank text.
    pub ink: Option<Bounds>,
}

impl TextBounds {
    /// Pen position that puts the ink centre on (cx, cy).
    pub fn centered_origin(&self, cx: f64, cy: f64) -> Option<(f64, f64)> {
        self.ink.map(|ink| {
            let (mx, my) = ink.center();
            (cx - mx, cy - my)
        })
    }
}

pub trait TextFace {
    /// Pixel size the face was built for.
    fn size(&self) -> f64;

    /// Outline of `text` with the pen starting at (x, y) on the baseline.
    fn text_path(&self, text: &str, x: f64, y: f64) -> Path;

    fn advance(&self, text: &str) -> f64;

    fn measure(&self, text: &str) -> TextBounds {
        let mut flat = ConvCurve::new(self.text_path(text, 0.0, 0.0));
        TextBounds {
            advance: self.advance(text),
            ink: bounding_rect(&mut flat, 0),
        }
    }

    /// Fill `text` into `canvas` with the pen at (x, y).
    fn draw(&self, canvas: &mut Canvas, text: &str, x: f64, y: f64, color: Rgba8) {
        let mut flat = ConvCurve::new(self.text_path(text, x, y));
        let mut ras = Rasterizer::new();
        let mut sl = ScanlineU8::new();
        ras.add_path(&mut flat, 0);
        render_scanlines_aa_solid(&mut ras, &mut sl, canvas, &color);
    }

    /// Draw `text` with its ink box centred on (cx, cy). Blank text draws
    /// nothing.
    fn draw_centered(&self, canvas: &mut Canvas, text: &str, cx: f64, cy: f64, color: Rgba8) {
        if let Some((x, y)) = self.measure(text).centered_origin(cx, cy) {
            self.draw(canvas, text, x, y, color);
        }
    }
}

/// A loaded face: a real outline font or the embedded fallback.
#[derive(Debug, Clone)]
pub enum Font {
    #[cfg(feature = "font")]
    Outline(OutlineFace),
    Builtin(BuiltinFace),
}

impl Font {
    pub fn builtin(size: f64) -> Self {
        Font::Builtin(BuiltinFace::new(size))
    }

    /// Load an outline font, failing with `FontLoad` if the file is
    /// missing or unparsable.
    pub fn from_file(path: &FsPath, size: f64) -> Result<Self> {
        #[cfg(feature = "font")]
        {
            OutlineFace::open(path, size).map(Font::Outline)
        }
        #[cfg(not(feature = "font"))]
        {
            let _ = size;
            Err(crate::error::PuzzleError::FontLoad {
                path: path.to_path_buf(),
                reason: "built without outline font support".into(),
            })
        }
    }

    /// Like [`Font::from_file`] but falls back to the built-in face.
    pub fn load_or_builtin(path: Option<&FsPath>, size: f64) -> Self {
        let Some(path) = path else {
            return Self::builtin(size);
        };
        match Self::from_file(path, size) {
            Ok(font) => font,
            Err(err) => {
                warn!("{err}; using the built-in face");
                Self::builtin(size)
            }
        }
    }

    /// Same face at another size. Font data is shared.
    pub fn with_size(&self, size: f64) -> Self {
        match self {
            #[cfg(feature = "font")]
            Font::Outline(face) => Font::Outline(face.with_size(size)),
            Font::Builtin(_) => Self::builtin(size),
        }
    }

    pub fn is_builtin(&self) -> bool {
        matches!(self, Font::Builtin(_))
    }
}

impl TextFace for Font {
    fn size(&self) -> f64 {
        match self {
            #[cfg(feature = "font")]
            Font::Outline(f) => f.size(),
            Font::Builtin(f) => f.size(),
        }
    }

    fn text_path(&self, text: &str, x: f64, y: f64) -> Path {
        match self {
            #[cfg(feature = "font")]
            Font::Outline(f) => f.text_path(text, x, y),
            Font::Builtin(f) => f.text_path(text, x, y),
        }
    }

    fn advance(&self, text: &str) -> f64 {
        match self {
            #[cfg(feature = "font")]
            Font::Outline(f) => f.advance(text),
            Font::Builtin(f) => f.advance(text),
        }
    }
}

/// The two faces a puzzle render needs, loaded once and reused for both
/// the question and the answer image.
#[derive(Debug, Clone)]
pub struct FontSet {
    pub header: Font,
    pub grid: Font,
}

impl FontSet {
    pub fn builtin(config: &PuzzleConfig) -> Self {
        Self {
            header: Font::builtin(config.header_font_size as f64),
            grid: Font::builtin(config.grid_font_size as f64),
        }
    }

    /// Load `path` at the header and grid sizes of `config`, reading the
    /// file once. Falls back to the built-in face on any load failure.
    pub fn load(path: Option<&FsPath>, config: &PuzzleConfig) -> Self {
        let header = Font::load_or_builtin(path, config.header_font_size as f64);
        let grid = header.with_size(config.grid_font_size as f64);
        Self { header, grid }
    }
}
