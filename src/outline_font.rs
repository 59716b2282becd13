//! TrueType/OpenType faces via `ttf-parser`.
//!
//! Outlines are scaled from font units to pixels and flipped so y grows
//! downward. Characters the font does not map fall back to glyph 0
//! (`.notdef`); the pen advances by the horizontal metrics plus `kern`
//! table adjustments. There is no shaping, so clusters that need it
//! render as their individual code points.

use std::fmt;
use std::path::Path as FsPath;
use std::sync::Arc;

use ttf_parser::{Face, FaceParsingError, GlyphId, OutlineBuilder};

use crate::error::{PuzzleError, Result};
use crate::font::TextFace;
use crate::path::Path;

#[derive(Clone)]
pub struct OutlineFace {
    data: Arc<Vec<u8>>,
    face_index: u32,
    size: f64,
}

impl fmt::Debug for OutlineFace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OutlineFace")
            .field("bytes", &self.data.len())
            .field("face_index", &self.face_index)
            .field("size", &self.size)
            .finish()
    }
}

impl OutlineFace {
    /// Parse `data` once to validate it. `face_index` selects a face inside
    /// a collection; use 0 for plain font files.
    pub fn from_data(
        data: Vec<u8>,
        face_index: u32,
        size: f64,
    ) -> std::result::Result<Self, FaceParsingError> {
        Face::parse(&data, face_index)?;
        Ok(Self {
            data: Arc::new(data),
            face_index,
            size,
        })
    }

    pub fn open(path: &FsPath, size: f64) -> Result<Self> {
        let font_load = |reason: String| PuzzleError::FontLoad {
            path: path.to_path_buf(),
            reason,
        };
        let data = std::fs::read(path).map_err(|e| font_load(e.to_string()))?;
        Self::from_data(data, 0, size).map_err(|e| font_load(e.to_string()))
    }

    pub fn with_size(&self, size: f64) -> Self {
        Self {
            data: Arc::clone(&self.data),
            face_index: self.face_index,
            size,
        }
    }

    // The bytes were validated in `from_data`, so this only fails if the
    // parser itself is non-deterministic.
    fn face(&self) -> Option<Face<'_>> {
        Face::parse(&self.data, self.face_index).ok()
    }

    /// Walk the glyphs of `text`, calling `f(glyph, pen_x)` for each.
    /// Returns the final pen position relative to the start.
    fn layout(&self, face: &Face<'_>, text: &str, mut f: impl FnMut(GlyphId, f64)) -> f64 {
        let scale = self.size / face.units_per_em() as f64;
        let mut pen = 0.0;
        let mut prev: Option<GlyphId> = None;
        for ch in text.chars() {
            let glyph = face.glyph_index(ch).unwrap_or(GlyphId(0));
            if let Some(p) = prev {
                pen += kerning(face, p, glyph) * scale;
            }
            f(glyph, pen);
            pen += face.glyph_hor_advance(glyph).unwrap_or(0) as f64 * scale;
            prev = Some(glyph);
        }
        pen
    }
}

fn kerning(face: &Face<'_>, first: GlyphId, second: GlyphId) -> f64 {
    let Some(kern) = face.tables().kern else {
        return 0.0;
    };
    for subtable in kern.subtables {
        if subtable.horizontal && !subtable.has_cross_stream {
            if let Some(value) = subtable.glyphs_kerning(first, second) {
                return value as f64;
            }
        }
    }
    0.0
}

impl TextFace for OutlineFace {
    fn size(&self) -> f64 {
        self.size
    }

    fn text_path(&self, text: &str, x: f64, y: f64) -> Path {
        let mut path = Path::new();
        let Some(face) = self.face() else {
            return path;
        };
        let scale = self.size / face.units_per_em() as f64;
        self.layout(&face, text, |glyph, pen| {
            let mut collector = OutlineCollector {
                path: &mut path,
                scale,
                x0: x + pen,
                y0: y,
            };
            face.outline_glyph(glyph, &mut collector);
        });
        path
    }

    fn advance(&self, text: &str) -> f64 {
        match self.face() {
            Some(face) => self.layout(&face, text, |_, _| {}),
            None => 0.0,
        }
    }
}

/// Feeds `ttf-parser` outline callbacks into a [`Path`] in screen space.
struct OutlineCollector<'a> {
    path: &'a mut Path,
    scale: f64,
    x0: f64,
    y0: f64,
}

impl OutlineCollector<'_> {
    #[inline]
    fn sx(&self, v: f32) -> f64 {
        self.x0 + v as f64 * self.scale
    }

    #[inline]
    fn sy(&self, v: f32) -> f64 {
        self.y0 - v as f64 * self.scale
    }
}

impl OutlineBuilder for OutlineCollector<'_> {
    fn move_to(&mut self, x: f32, y: f32) {
        let (x, y) = (self.sx(x), self.sy(y));
        self.path.move_to(x, y);
    }

    fn line_to(&mut self, x: f32, y: f32) {
        let (x, y) = (self.sx(x), self.sy(y));
        self.path.line_to(x, y);
    }

    fn quad_to(&mut self, x1: f32, y1: f32, x: f32, y: f32) {
        let (cx, cy) = (self.sx(x1), self.sy(y1));
        let (x, y) = (self.sx(x), self.sy(y));
        self.path.quad_to(cx, cy, x, y);
    }

    fn curve_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x: f32, y: f32) {
        let (c1x, c1y) = (self.sx(x1), self.sy(y1));
        let (c2x, c2y) = (self.sx(x2), self.sy(y2));
        let (x, y) = (self.sx(x), self.sy(y));
        self.path.cubic_to(c1x, c1y, c2x, c2y, x, y);
    }

    fn close(&mut self) {
        self.path.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::basics::{PATH_CMD_CURVE3, PATH_CMD_CURVE4, PATH_CMD_LINE_TO, PATH_CMD_MOVE_TO};

    #[test]
    fn test_collector_scales_and_flips() {
        let mut path = Path::new();
        let mut c = OutlineCollector {
            path: &mut path,
            scale: 0.5,
            x0: 10.0,
            y0: 100.0,
        };
        c.move_to(0.0, 0.0);
        c.line_to(20.0, 40.0);
        c.quad_to(40.0, 40.0, 40.0, 0.0);
        c.curve_to(30.0, -10.0, 10.0, -10.0, 0.0, 0.0);
        c.close();
        let v = path.vertices();
        assert_eq!(v[0], (10.0, 100.0, PATH_CMD_MOVE_TO));
        assert_eq!(v[1], (20.0, 80.0, PATH_CMD_LINE_TO));
        assert_eq!(v[2], (30.0, 80.0, PATH_CMD_CURVE3));
        assert_eq!(v[4], (25.0, 105.0, PATH_CMD_CURVE4));
        assert_eq!(v.len(), 8);
    }

    #[test]
    fn test_garbage_bytes_are_rejected() {
        assert!(OutlineFace::from_data(vec![0u8; 64], 0, 12.0).is_err());
    }

    #[test]
    fn test_open_missing_file_reports_path() {
        let err = OutlineFace::open(FsPath::new("/no/such/font.ttf"), 12.0).unwrap_err();
        match err {
            PuzzleError::FontLoad { path, .. } => assert!(path.ends_with("font.ttf")),
            other => panic!("unexpected error {other:?}"),
        }
    }
}
