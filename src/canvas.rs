//! Owned RGBA raster surface.
//!
//! `Canvas` stores non-premultiplied RGBA32 pixels row-major, top to bottom.
//! Every write is clipped to the surface, so callers may hand it geometry
//! that hangs over an edge.

use image::RgbaImage;

use crate::basics::CoverType;
use crate::color::Rgba8;

/// Pixel sink driven by the scanline renderer.
pub trait PixelFormat {
    type ColorType;

    fn width(&self) -> u32;
    fn height(&self) -> u32;

    /// Blend `len` pixels starting at (x, y) with per-pixel coverage.
    fn blend_solid_hspan(
        &mut self,
        x: i32,
        y: i32,
        len: u32,
        c: &Self::ColorType,
        covers: &[CoverType],
    );

    fn pixel(&self, x: i32, y: i32) -> Self::ColorType;
}

const BPP: usize = 4;

/// RGBA8 pixel buffer that owns its memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Canvas {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl Canvas {
    /// Allocate a canvas filled with `background`.
    pub fn new(width: u32, height: u32, background: Rgba8) -> Self {
        let mut canvas = Self {
            width,
            height,
            data: vec![0; width as usize * height as usize * BPP],
        };
        canvas.clear(background);
        canvas
    }

    pub fn clear(&mut self, c: Rgba8) {
        for px in self.data.chunks_exact_mut(BPP) {
            px.copy_from_slice(&[c.r, c.g, c.b, c.a]);
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Pixels outside the surface read as fully transparent.
    pub fn pixel(&self, x: i32, y: i32) -> Rgba8 {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return Rgba8::new(0, 0, 0, 0);
        }
        let off = (y as usize * self.width as usize + x as usize) * BPP;
        Rgba8::new(
            self.data[off],
            self.data[off + 1],
            self.data[off + 2],
            self.data[off + 3],
        )
    }

    /// Raw RGBA bytes, `width * height * 4` long.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn into_rgba_image(self) -> RgbaImage {
        // The buffer length always matches the dimensions.
        RgbaImage::from_raw(self.width, self.height, self.data)
            .unwrap_or_else(|| RgbaImage::new(0, 0))
    }

    pub fn to_rgba_image(&self) -> RgbaImage {
        self.clone().into_rgba_image()
    }

    /// Overwrite the rectangle `[x1, x2) x [y1, y2)` with `c`.
    pub fn fill_rect(&mut self, x1: i32, y1: i32, x2: i32, y2: i32, c: Rgba8) {
        let Some((x1, x2)) = self.clip_span(x1, x2) else {
            return;
        };
        let y1 = y1.max(0);
        let y2 = y2.min(self.height as i32);
        for y in y1..y2 {
            let row = self.row_mut(y);
            for px in row[x1 * BPP..x2 * BPP].chunks_exact_mut(BPP) {
                px.copy_from_slice(&[c.r, c.g, c.b, c.a]);
            }
        }
    }

    /// Clip `[x1, x2)` to the surface width, returning pixel indices.
    fn clip_span(&self, x1: i32, x2: i32) -> Option<(usize, usize)> {
        let x1 = x1.max(0);
        let x2 = x2.min(self.width as i32);
        (x1 < x2).then_some((x1 as usize, x2 as usize))
    }

    fn row_mut(&mut self, y: i32) -> &mut [u8] {
        let stride = self.width as usize * BPP;
        let start = y as usize * stride;
        &mut self.data[start..start + stride]
    }

    #[inline]
    fn blend_pix(p: &mut [u8], c: &Rgba8, alpha: u8) {
        if alpha == 255 {
            p.copy_from_slice(&[c.r, c.g, c.b, 255]);
        } else if alpha > 0 {
            p[0] = Rgba8::lerp(p[0], c.r, alpha);
            p[1] = Rgba8::lerp(p[1], c.g, alpha);
            p[2] = Rgba8::lerp(p[2], c.b, alpha);
            p[3] = Rgba8::lerp(p[3], 255, alpha);
        }
    }
}

impl PixelFormat for Canvas {
    type ColorType = Rgba8;

    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn blend_solid_hspan(&mut self, x: i32, y: i32, len: u32, c: &Rgba8, covers: &[CoverType]) {
        if y < 0 || y >= self.height as i32 {
            return;
        }
        let Some((start, end)) = self.clip_span(x, x + len as i32) else {
            return;
        };
        let skip = (start as i32 - x) as usize;
        let row = self.row_mut(y);
        let pixels = row[start * BPP..end * BPP].chunks_exact_mut(BPP);
        for (px, &cover) in pixels.zip(&covers[skip..]) {
            Self::blend_pix(px, c, Rgba8::mult_cover(c.a, cover));
        }
    }

    fn pixel(&self, x: i32, y: i32) -> Rgba8 {
        Canvas::pixel(self, x, y)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_fills_background() {
        let c = Canvas::new(3, 2, Rgba8::opaque(1, 2, 3));
        assert_eq!(c.as_bytes().len(), 3 * 2 * 4);
        assert_eq!(c.pixel(2, 1), Rgba8::opaque(1, 2, 3));
    }

    #[test]
    fn test_fill_rect_is_half_open_and_clipped() {
        let mut c = Canvas::new(10, 10, Rgba8::WHITE);
        c.fill_rect(-5, -5, 3, 2, Rgba8::BLACK);
        assert_eq!(c.pixel(0, 0), Rgba8::BLACK);
        assert_eq!(c.pixel(2, 1), Rgba8::BLACK);
        assert_eq!(c.pixel(3, 1), Rgba8::WHITE);
        assert_eq!(c.pixel(2, 2), Rgba8::WHITE);
    }

    #[test]
    fn test_blend_hspan_partial_cover() {
        let mut c = Canvas::new(4, 1, Rgba8::WHITE);
        c.blend_solid_hspan(0, 0, 3, &Rgba8::BLACK, &[255, 128, 0]);
        assert_eq!(c.pixel(0, 0), Rgba8::BLACK);
        let mid = c.pixel(1, 0);
        assert!((126..=129).contains(&mid.r), "{mid:?}");
        assert_eq!(c.pixel(2, 0), Rgba8::WHITE);
    }

    #[test]
    fn test_blend_hspan_clips_left_edge() {
        let mut c = Canvas::new(4, 1, Rgba8::WHITE);
        c.blend_solid_hspan(-2, 0, 4, &Rgba8::BLACK, &[0, 0, 255, 0]);
        assert_eq!(c.pixel(0, 0), Rgba8::BLACK);
        assert_eq!(c.pixel(1, 0), Rgba8::WHITE);
    }

    #[test]
    fn test_out_of_bounds_rows_ignored() {
        let mut c = Canvas::new(2, 2, Rgba8::WHITE);
        c.blend_solid_hspan(0, -1, 2, &Rgba8::BLACK, &[255, 255]);
        c.blend_solid_hspan(0, 2, 2, &Rgba8::BLACK, &[255, 255]);
        assert!(c.as_bytes().iter().all(|&b| b == 255));
        assert_eq!(c.pixel(5, 5).a, 0);
    }

    #[test]
    fn test_into_rgba_image_dimensions() {
        let img = Canvas::new(7, 3, Rgba8::RED).into_rgba_image();
        assert_eq!(img.dimensions(), (7, 3));
        assert_eq!(img.get_pixel(6, 2).0, [255, 0, 0, 255]);
    }
}
