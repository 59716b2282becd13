//! # spot-glyph
//!
//! Deterministic "spot the difference" glyph puzzles. A puzzle is a header
//! band over a grid of identical glyphs with exactly one odd cell; every
//! puzzle yields a question image and an answer image with the odd cell
//! circled in red.
//!
//! ## Architecture
//!
//! Rendering runs on a small anti-aliased scanline pipeline:
//!
//! 1. **Vertex Source**: paths, ellipses and glyph outlines emit vertices
//! 2. **Curve Conversion**: `ConvCurve` flattens quadratic and cubic curves
//! 3. **Scanline Rasterizer**: accumulates cell coverage per scanline
//! 4. **Canvas**: blends coverage spans into an RGBA8 buffer
//!
//! On top of it sit the puzzle stages: configuration and validation,
//! layout, target selection (once per puzzle), and rendering of both modes.
//!
//! ```no_run
//! use spot_glyph::{FontSet, Puzzle, PuzzleConfig, ImageFormat};
//!
//! let config = PuzzleConfig::default();
//! let fonts = FontSet::load(Some("NanumGothic-ExtraBold.ttf".as_ref()), &config);
//! let mut rng = spot_glyph::puzzle_rng(Some(42));
//! let pair = Puzzle::generate(&config, &fonts, &mut rng)?;
//! let jpeg = spot_glyph::encode(&pair.question, ImageFormat::default())?;
//! # Ok::<(), spot_glyph::PuzzleError>(())
//! ```

// Foundation
pub mod basics;
pub mod color;
pub mod error;

// Geometry & rasterization
pub mod canvas;
pub mod cells;
pub mod curves;
pub mod ellipse;
pub mod path;
pub mod rasterizer;

// Text
pub mod builtin_font;
pub mod font;
#[cfg(feature = "font")]
pub mod outline_font;

// Puzzle
pub mod config;
pub mod encode;
pub mod layout;
pub mod puzzle;
pub mod render;
pub mod target;

pub use canvas::Canvas;
pub use color::Rgba8;
pub use config::{ProblemSet, PuzzleConfig, RenderMode};
pub use encode::{decode, encode, save, ImageFormat};
pub use error::{GlyphRole, PuzzleError, Result};
pub use font::{Font, FontSet, TextBounds, TextFace};
pub use layout::{AspectRatio, CanvasSize, HeaderSize, PuzzleLayout, GRID_MARGIN};
pub use puzzle::{Puzzle, PuzzlePair};
pub use render::{render_puzzle, ALERT_COLOR};
pub use target::{puzzle_rng, select_target, TargetPosition};
