//! Embedded 5x7 raster face used when no font file can be loaded.
//!
//! Glyphs are stored column-major, five bytes per character, bit 0 at the
//! top row. Each lit bit becomes a square contour scaled to the requested
//! pixel size, so the face goes through the same anti-aliased pipeline as
//! outline fonts and can be centred at fractional positions.

use crate::font::TextFace;
use crate::path::Path;

const FIRST_CHAR: u32 = 0x20;
const LAST_CHAR: u32 = 0x7E;
const GLYPH_COLS: usize = 5;
const GLYPH_ROWS: u32 = 7;
/// Column pitch including one column of spacing.
const ADVANCE_COLS: f64 = 6.0;
/// Nominal em height in font units (seven rows plus one for descent).
const EM_ROWS: f64 = 8.0;

#[rustfmt::skip]
static GLYPHS: [[u8; GLYPH_COLS]; (LAST_CHAR - FIRST_CHAR + 1) as usize] = [
    [0x00, 0x00, 0x00, 0x00, 0x00], // ' '
    [0x00, 0x00, 0x5F, 0x00, 0x00], // !
    [0x00, 0x07, 0x00, 0x07, 0x00], // "
    [0x14, 0x7F, 0x14, 0x7F, 0x14], // #
    [0x24, 0x2A, 0x7F, 0x2A, 0x12], // $
    [0x23, 0x13, 0x08, 0x64, 0x62], // %
    [0x36, 0x49, 0x55, 0x22, 0x50], // &
    [0x00, 0x05, 0x03, 0x00, 0x00], // '
    [0x00, 0x1C, 0x22, 0x41, 0x00], // (
    [0x00, 0x41, 0x22, 0x1C, 0x00], // )
    [0x08, 0x2A, 0x1C, 0x2A, 0x08], // *
    [0x08, 0x08, 0x3E, 0x08, 0x08], // +
    [0x00, 0x50, 0x30, 0x00, 0x00], // ,
    [0x08, 0x08, 0x08, 0x08, 0x08], // -
    [0x00, 0x60, 0x60, 0x00, 0x00], // .
    [0x20, 0x10, 0x08, 0x04, 0x02], // /
    [0x3E, 0x51, 0x49, 0x45, 0x3E], // 0
    [0x00, 0x42, 0x7F, 0x40, 0x00], // 1
    [0x42, 0x61, 0x51, 0x49, 0x46], // 2
    [0x21, 0x41, 0x45, 0x4B, 0x31], // 3
    [0x18, 0x14, 0x12, 0x7F, 0x10], // 4
    [0x27, 0x45, 0x45, 0x45, 0x39], // 5
    [0x3C, 0x4A, 0x49, 0x49, 0x30], // 6
    [0x01, 0x71, 0x09, 0x05, 0x03], // 7
    [0x36, 0x49, 0x49, 0x49, 0x36], // 8
    [0x06, 0x49, 0x49, 0x29, 0x1E], // 9
    [0x00, 0x36, 0x36, 0x00, 0x00], // :
    [0x00, 0x56, 0x36, 0x00, 0x00], // ;
    [0x08, 0x14, 0x22, 0x41, 0x00], // <
    [0x14, 0x14, 0x14, 0x14, 0x14], // =
    [0x00, 0x41, 0x22, 0x14, 0x08], // >
    [0x02, 0x01, 0x51, 0x09, 0x06], // ?
    [0x32, 0x49, 0x79, 0x41, 0x3E], // @
    [0x7E, 0x11, 0x11, 0x11, 0x7E], // A
    [0x7F, 0x49, 0x49, 0x49, 0x36], // B
    [0x3E, 0x41, 0x41, 0x41, 0x22], // C
    [0x7F, 0x41, 0x41, 0x22, 0x1C], // D
    [0x7F, 0x49, 0x49, 0x49, 0x41], // E
    [0x7F, 0x09, 0x09, 0x01, 0x01], // F
    [0x3E, 0x41, 0x41, 0x51, 0x32], // G
    [0x7F, 0x08, 0x08, 0x08, 0x7F], // H
    [0x00, 0x41, 0x7F, 0x41, 0x00], // I
    [0x20, 0x40, 0x41, 0x3F, 0x01], // J
    [0x7F, 0x08, 0x14, 0x22, 0x41], // K
    [0x7F, 0x40, 0x40, 0x40, 0x40], // L
    [0x7F, 0x02, 0x04, 0x02, 0x7F], // M
    [0x7F, 0x04, 0x08, 0x10, 0x7F], // N
    [0x3E, 0x41, 0x41, 0x41, 0x3E], // O
    [0x7F, 0x09, 0x09, 0x09, 0x06], // P
    [0x3E, 0x41, 0x51, 0x21, 0x5E], // Q
    [0x7F, 0x09, 0x19, 0x29, 0x46], // R
    [0x46, 0x49, 0x49, 0x49, 0x31], // S
    [0x01, 0x01, 0x7F, 0x01, 0x01], // T
    [0x3F, 0x40, 0x40, 0x40, 0x3F], // U
    [0x1F, 0x20, 0x40, 0x20, 0x1F], // V
    [0x7F, 0x20, 0x18, 0x20, 0x7F], // W
    [0x63, 0x14, 0x08, 0x14, 0x63], // X
    [0x03, 0x04, 0x78, 0x04, 0x03], // Y
    [0x61, 0x51, 0x49, 0x45, 0x43], // Z
    [0x00, 0x7F, 0x41, 0x41, 0x00], // [
    [0x02, 0x04, 0x08, 0x10, 0x20], // \
    [0x00, 0x41, 0x41, 0x7F, 0x00], // ]
    [0x04, 0x02, 0x01, 0x02, 0x04], // ^
    [0x40, 0x40, 0x40, 0x40, 0x40], // _
    [0x00, 0x01, 0x02, 0x04, 0x00], // `
    [0x20, 0x54, 0x54, 0x54, 0x78], // a
    [0x7F, 0x48, 0x44, 0x44, 0x38], // b
    [0x38, 0x44, 0x44, 0x44, 0x20], // c
    [0x38, 0x44, 0x44, 0x48, 0x7F], // d
    [0x38, 0x54, 0x54, 0x54, 0x18], // e
    [0x08, 0x7E, 0x09, 0x01, 0x02], // f
    [0x08, 0x14, 0x54, 0x54, 0x3C], // g
    [0x7F, 0x08, 0x04, 0x04, 0x78], // h
    [0x00, 0x44, 0x7D, 0x40, 0x00], // i
    [0x20, 0x40, 0x44, 0x3D, 0x00], // j
    [0x00, 0x7F, 0x10, 0x28, 0x44], // k
    [0x00, 0x41, 0x7F, 0x40, 0x00], // l
    [0x7C, 0x04, 0x18, 0x04, 0x78], // m
    [0x7C, 0x08, 0x04, 0x04, 0x78], // n
    [0x38, 0x44, 0x44, 0x44, 0x38], // o
    [0x7C, 0x14, 0x14, 0x14, 0x08], // p
    [0x08, 0x14, 0x14, 0x18, 0x7C], // q
    [0x7C, 0x08, 0x04, 0x04, 0x08], // r
    [0x48, 0x54, 0x54, 0x54, 0x20], // s
    [0x04, 0x3F, 0x44, 0x40, 0x20], // t
    [0x3C, 0x40, 0x40, 0x20, 0x7C], // u
    [0x1C, 0x20, 0x40, 0x20, 0x1C], // v
    [0x3C, 0x40, 0x30, 0x40, 0x3C], // w
    [0x44, 0x28, 0x10, 0x28, 0x44], // x
    [0x0C, 0x50, 0x50, 0x50, 0x3C], // y
    [0x44, 0x64, 0x54, 0x4C, 0x44], // z
    [0x00, 0x08, 0x36, 0x41, 0x00], // {
    [0x00, 0x00, 0x7F, 0x00, 0x00], // |
    [0x00, 0x41, 0x36, 0x08, 0x00], // }
    [0x10, 0x08, 0x08, 0x10, 0x08], // ~
];

/// Column bitmap for `ch`, or `None` outside printable ASCII.
fn glyph_columns(ch: char) -> Option<&'static [u8; GLYPH_COLS]> {
    let code = ch as u32;
    if (FIRST_CHAR..=LAST_CHAR).contains(&code) {
        GLYPHS.get((code - FIRST_CHAR) as usize)
    } else {
        None
    }
}

/// The embedded face at a given pixel size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BuiltinFace {
    size: f64,
}

impl BuiltinFace {
    pub fn new(size: f64) -> Self {
        Self { size }
    }

    /// Size of one font pixel in output pixels.
    fn unit(&self) -> f64 {
        self.size / EM_ROWS
    }

    fn add_square(path: &mut Path, x: f64, y: f64, s: f64) {
        path.move_to(x, y);
        path.line_to(x + s, y);
        path.line_to(x + s, y + s);
        path.line_to(x, y + s);
        path.close();
    }

    /// Hollow box standing in for characters the table does not cover.
    fn add_missing_box(path: &mut Path, x: f64, top: f64, s: f64) {
        let (w, h) = (GLYPH_COLS as f64 * s, GLYPH_ROWS as f64 * s);
        path.move_to(x, top);
        path.line_to(x + w, top);
        path.line_to(x + w, top + h);
        path.line_to(x, top + h);
        path.close();
        // Reverse winding cuts the interior out.
        path.move_to(x + s, top + s);
        path.line_to(x + s, top + h - s);
        path.line_to(x + w - s, top + h - s);
        path.line_to(x + w - s, top + s);
        path.close();
    }
}

impl TextFace for BuiltinFace {
    fn size(&self) -> f64 {
        self.size
    }

    fn text_path(&self, text: &str, x: f64, y: f64) -> Path {
        let s = self.unit();
        let top = y - GLYPH_ROWS as f64 * s;
        let mut path = Path::new();
        let mut pen_x = x;

        for ch in text.chars() {
            match glyph_columns(ch) {
                Some(columns) => {
                    for (col, bits) in columns.iter().enumerate() {
                        for row in 0..GLYPH_ROWS {
                            if bits & (1 << row) != 0 {
                                let px = pen_x + col as f64 * s;
                                let py = top + row as f64 * s;
                                Self::add_square(&mut path, px, py, s);
                            }
                        }
                    }
                }
                None => Self::add_missing_box(&mut path, pen_x, top, s),
            }
            pen_x += ADVANCE_COLS * s;
        }
        path
    }

    fn advance(&self, text: &str) -> f64 {
        text.chars().count() as f64 * ADVANCE_COLS * self.unit()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::Canvas;
    use crate::color::Rgba8;

    #[test]
    fn test_table_covers_printable_ascii() {
        assert_eq!(GLYPHS.len(), 95);
        assert!(glyph_columns(' ').is_some());
        assert!(glyph_columns('~').is_some());
        assert!(glyph_columns('\n').is_none());
        assert!(glyph_columns('가').is_none());
    }

    #[test]
    fn test_six_and_nine_differ() {
        assert_ne!(glyph_columns('6'), glyph_columns('9'));
    }

    #[test]
    fn test_space_has_advance_but_no_ink() {
        let face = BuiltinFace::new(16.0);
        let m = face.measure(" ");
        assert!(m.ink.is_none());
        assert_eq!(m.advance, 12.0);
    }

    #[test]
    fn test_ink_sits_on_baseline() {
        let face = BuiltinFace::new(80.0);
        let ink = face.measure("H").ink.unwrap();
        // Ten pixels per font unit, seven rows tall, five columns wide.
        assert!((ink.y2 - 0.0).abs() < 1e-9);
        assert!((ink.y1 + 70.0).abs() < 1e-9);
        assert!((ink.width() - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_missing_char_draws_hollow_box() {
        let face = BuiltinFace::new(80.0);
        let mut canvas = Canvas::new(80, 100, Rgba8::WHITE);
        face.draw(&mut canvas, "가", 10.0, 80.0, Rgba8::BLACK);
        // Box spans x 10..60, y 10..80 with a 10px wall.
        assert_eq!(canvas.pixel(15, 40), Rgba8::BLACK);
        assert_eq!(canvas.pixel(35, 45), Rgba8::WHITE);
        assert_eq!(canvas.pixel(35, 75), Rgba8::BLACK);
    }
}
