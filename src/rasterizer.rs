//! Anti-aliased polygon rasterizer and the scanline pipeline that feeds a
//! canvas.
//!
//! Usage follows the classic three-stage shape:
//!
//! ```ignore
//! ras.reset();
//! ras.add_path(&mut shape, 0);
//! render_scanlines_aa_solid(&mut ras, &mut sl, &mut canvas, &color);
//! ```
//!
//! Coordinates are not clipped here; spans outside the target are dropped by
//! the pixel format.

use crate::basics::{
    is_close, is_move_to, is_stop, is_vertex, poly_coord, VertexSource,
    POLY_SUBPIXEL_SHIFT,
};
use crate::canvas::PixelFormat;
use crate::cells::CellRasterizer;

const AA_SHIFT: u32 = 8;
const AA_SCALE: u32 = 1 << AA_SHIFT;
const AA_MASK: u32 = AA_SCALE - 1;

// ============================================================================
// Scanline containers
// ============================================================================

/// Receives the coverage runs of one scanline during a sweep.
pub trait Scanline {
    fn reset_spans(&mut self);
    fn add_cell(&mut self, x: i32, cover: u32);
    fn add_span(&mut self, x: i32, len: u32, cover: u32);
    fn finalize(&mut self, y: i32);
    fn num_spans(&self) -> u32;
    fn y(&self) -> i32;
}

/// A horizontal run inside a `ScanlineU8`, indexing into its cover array.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScanlineSpan {
    pub x: i32,
    pub len: i32,
    pub cover_offset: usize,
}

/// Scanline storing one coverage byte per pixel.
pub struct ScanlineU8 {
    min_x: i32,
    last_x: i32,
    y_val: i32,
    covers: Vec<u8>,
    // Index 0 is a sentinel; live spans are 1..=cur_span.
    spans: Vec<ScanlineSpan>,
    cur_span: usize,
}

impl ScanlineU8 {
    pub fn new() -> Self {
        Self {
            min_x: 0,
            last_x: 0x7FFF_FFF0,
            y_val: 0,
            covers: Vec::new(),
            spans: Vec::new(),
            cur_span: 0,
        }
    }

    /// Size the buffers for cells in `min_x..=max_x`.
    pub fn reset(&mut self, min_x: i32, max_x: i32) {
        let max_len = (max_x - min_x + 2) as usize;
        if max_len > self.spans.len() {
            self.spans.resize(max_len, ScanlineSpan::default());
            self.covers.resize(max_len, 0);
        }
        self.last_x = 0x7FFF_FFF0;
        self.min_x = min_x;
        self.cur_span = 0;
    }

    pub fn spans(&self) -> &[ScanlineSpan] {
        &self.spans[1..=self.cur_span]
    }

    pub fn covers(&self) -> &[u8] {
        &self.covers
    }
}

impl Default for ScanlineU8 {
    fn default() -> Self {
        Self::new()
    }
}

impl Scanline for ScanlineU8 {
    fn reset_spans(&mut self) {
        self.last_x = 0x7FFF_FFF0;
        self.cur_span = 0;
    }

    fn add_cell(&mut self, x: i32, cover: u32) {
        let xi = (x - self.min_x) as usize;
        self.covers[xi] = cover as u8;
        if xi as i32 == self.last_x + 1 {
            self.spans[self.cur_span].len += 1;
        } else {
            self.cur_span += 1;
            self.spans[self.cur_span] = ScanlineSpan {
                x,
                len: 1,
                cover_offset: xi,
            };
        }
        self.last_x = xi as i32;
    }

    fn add_span(&mut self, x: i32, len: u32, cover: u32) {
        let xi = (x - self.min_x) as usize;
        self.covers[xi..xi + len as usize].fill(cover as u8);
        if xi as i32 == self.last_x + 1 {
            self.spans[self.cur_span].len += len as i32;
        } else {
            self.cur_span += 1;
            self.spans[self.cur_span] = ScanlineSpan {
                x,
                len: len as i32,
                cover_offset: xi,
            };
        }
        self.last_x = xi as i32 + len as i32 - 1;
    }

    fn finalize(&mut self, y: i32) {
        self.y_val = y;
    }

    fn num_spans(&self) -> u32 {
        self.cur_span as u32
    }

    fn y(&self) -> i32 {
        self.y_val
    }
}

// ============================================================================
// Rasterizer
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq)]
enum Status {
    Initial,
    MoveTo,
    LineTo,
    Closed,
}

/// Polygon rasterizer producing anti-aliased scanlines.
///
/// Contours are closed automatically on the next `move_to_d` and before the
/// sweep starts.
pub struct Rasterizer {
    outline: CellRasterizer,
    start_x: i32,
    start_y: i32,
    last_x: i32,
    last_y: i32,
    status: Status,
    scan_y: i32,
}

impl Rasterizer {
    pub fn new() -> Self {
        Self {
            outline: CellRasterizer::new(),
            start_x: 0,
            start_y: 0,
            last_x: 0,
            last_y: 0,
            status: Status::Initial,
            scan_y: 0,
        }
    }

    pub fn reset(&mut self) {
        self.outline.reset();
        self.status = Status::Initial;
    }

    fn edge_to(&mut self, x: i32, y: i32) {
        self.outline.line(self.last_x, self.last_y, x, y);
        self.last_x = x;
        self.last_y = y;
    }

    pub fn close_polygon(&mut self) {
        if self.status == Status::LineTo {
            self.edge_to(self.start_x, self.start_y);
            self.status = Status::Closed;
        }
    }

    pub fn move_to_d(&mut self, x: f64, y: f64) {
        if self.outline.sorted() {
            self.reset();
        }
        self.close_polygon();
        self.start_x = poly_coord(x);
        self.start_y = poly_coord(y);
        self.last_x = self.start_x;
        self.last_y = self.start_y;
        self.status = Status::MoveTo;
    }

    pub fn line_to_d(&mut self, x: f64, y: f64) {
        self.edge_to(poly_coord(x), poly_coord(y));
        self.status = Status::LineTo;
    }

    /// Dispatch one command from a vertex source.
    pub fn add_vertex(&mut self, x: f64, y: f64, cmd: u32) {
        if is_move_to(cmd) {
            self.move_to_d(x, y);
        } else if is_vertex(cmd) {
            self.line_to_d(x, y);
        } else if is_close(cmd) {
            self.close_polygon();
        }
    }

    /// Feed every vertex of `vs` (curves must already be flattened).
    pub fn add_path(&mut self, vs: &mut dyn VertexSource, path_id: u32) {
        let mut x = 0.0;
        let mut y = 0.0;

        vs.rewind(path_id);
        if self.outline.sorted() {
            self.reset();
        }
        loop {
            let cmd = vs.vertex(&mut x, &mut y);
            if is_stop(cmd) {
                break;
            }
            self.add_vertex(x, y, cmd);
        }
    }

    /// Axis-aligned rectangle contour, clockwise in screen space.
    pub fn add_rect(&mut self, x1: f64, y1: f64, x2: f64, y2: f64) {
        self.move_to_d(x1, y1);
        self.line_to_d(x2, y1);
        self.line_to_d(x2, y2);
        self.line_to_d(x1, y2);
        self.close_polygon();
    }

    pub fn min_x(&self) -> i32 {
        self.outline.min_x()
    }
    pub fn min_y(&self) -> i32 {
        self.outline.min_y()
    }
    pub fn max_x(&self) -> i32 {
        self.outline.max_x()
    }
    pub fn max_y(&self) -> i32 {
        self.outline.max_y()
    }

    /// Close, sort, and position at the first scanline. `false` when there
    /// is nothing to draw.
    pub fn rewind_scanlines(&mut self) -> bool {
        self.close_polygon();
        self.outline.sort_cells();
        if self.outline.total_cells() == 0 {
            return false;
        }
        self.scan_y = self.outline.min_y();
        true
    }

    /// Map accumulated area to a coverage value. Fill is always non-zero:
    /// glyph counters and the ring hole come from reversed contours.
    #[inline]
    pub fn calculate_alpha(&self, area: i32) -> u32 {
        let cover = (area >> (POLY_SUBPIXEL_SHIFT * 2 + 1 - AA_SHIFT)).abs();
        cover.min(AA_MASK as i32) as u32
    }

    /// Emit the next non-empty scanline into `sl`. `false` when exhausted.
    pub fn sweep_scanline<SL: Scanline>(&mut self, sl: &mut SL) -> bool {
        loop {
            if self.scan_y > self.outline.max_y() {
                return false;
            }
            sl.reset_spans();

            let mut cells = self.outline.scanline_cells(self.scan_y).peekable();
            let mut cover: i32 = 0;

            while let Some(cell) = cells.next() {
                let x = cell.x;
                let mut area = cell.area;
                cover += cell.cover;

                // Merge cells that landed on the same pixel.
                while let Some(next) = cells.next_if(|c| c.x == x) {
                    area += next.area;
                    cover += next.cover;
                }

                let mut span_start = x;
                if area != 0 {
                    let alpha = self.calculate_alpha((cover << (POLY_SUBPIXEL_SHIFT + 1)) - area);
                    if alpha != 0 {
                        sl.add_cell(x, alpha);
                    }
                    span_start = x + 1;
                }

                if let Some(next) = cells.peek() {
                    if next.x > span_start {
                        let alpha = self.calculate_alpha(cover << (POLY_SUBPIXEL_SHIFT + 1));
                        if alpha != 0 {
                            sl.add_span(span_start, (next.x - span_start) as u32, alpha);
                        }
                    }
                }
            }

            if sl.num_spans() > 0 {
                break;
            }
            self.scan_y += 1;
        }

        sl.finalize(self.scan_y);
        self.scan_y += 1;
        true
    }
}

impl Default for Rasterizer {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Rendering driver
// ============================================================================

/// Sweep `ras` and blend every span into `pf` with a single color.
pub fn render_scanlines_aa_solid<PF: PixelFormat>(
    ras: &mut Rasterizer,
    sl: &mut ScanlineU8,
    pf: &mut PF,
    color: &PF::ColorType,
) {
    if !ras.rewind_scanlines() {
        return;
    }

    sl.reset(ras.min_x(), ras.max_x());
    while ras.sweep_scanline(sl) {
        let y = sl.y();
        let covers = sl.covers();
        for span in sl.spans() {
            let start = span.cover_offset;
            let end = start + span.len as usize;
            pf.blend_solid_hspan(span.x, y, span.len as u32, color, &covers[start..end]);
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
