//! Edge-to-cell accumulator.
//!
//! Converts line segments in 24.8 fixed point into pixel cells carrying a
//! signed `cover` (sum of dy crossing the cell) and `area` (twice the signed
//! area of the edge fragments inside it). The polygon rasterizer sweeps the
//! sorted cells to derive per-pixel coverage.

use crate::basics::{POLY_SUBPIXEL_MASK, POLY_SUBPIXEL_SCALE, POLY_SUBPIXEL_SHIFT};

/// One pixel cell with accumulated coverage data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
    pub cover: i32,
    pub area: i32,
}

impl Cell {
    const SENTINEL: Cell = Cell {
        x: i32::MAX,
        y: i32::MAX,
        cover: 0,
        area: 0,
    };

    #[inline]
    fn is_at(&self, x: i32, y: i32) -> bool {
        self.x == x && self.y == y
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self::SENTINEL
    }
}

/// Start offset and count of one scanline's cells in the sorted index.
#[derive(Debug, Clone, Copy, Default)]
struct ScanlineRange {
    start: u32,
    num: u32,
}

/// Segments with a larger horizontal extent are split before stepping so the
/// fixed-point products stay within range.
const DX_LIMIT: i64 = 16384 << POLY_SUBPIXEL_SHIFT;

/// Floored quotient and non-negative remainder of `p / d`, `d > 0`.
#[inline]
fn floor_divmod(p: i64, d: i64) -> (i32, i64) {
    (p.div_euclid(d) as i32, p.rem_euclid(d))
}

/// Accumulates cells from edges and sorts them for scanline sweeping.
pub struct CellRasterizer {
    cells: Vec<Cell>,
    sorted_cells: Vec<u32>,
    sorted_y: Vec<ScanlineRange>,
    curr_cell: Cell,
    min_x: i32,
    min_y: i32,
    max_x: i32,
    max_y: i32,
    sorted: bool,
}

impl CellRasterizer {
    pub fn new() -> Self {
        Self {
            cells: Vec::new(),
            sorted_cells: Vec::new(),
            sorted_y: Vec::new(),
            curr_cell: Cell::SENTINEL,
            min_x: i32::MAX,
            min_y: i32::MAX,
            max_x: i32::MIN,
            max_y: i32::MIN,
            sorted: false,
        }
    }

    /// Discard all cells, keeping allocations.
    pub fn reset(&mut self) {
        self.cells.clear();
        self.sorted_cells.clear();
        self.sorted_y.clear();
        self.curr_cell = Cell::SENTINEL;
        self.min_x = i32::MAX;
        self.min_y = i32::MAX;
        self.max_x = i32::MIN;
        self.max_y = i32::MIN;
        self.sorted = false;
    }

    #[inline]
    pub fn min_x(&self) -> i32 {
        self.min_x
    }
    #[inline]
    pub fn min_y(&self) -> i32 {
        self.min_y
    }
    #[inline]
    pub fn max_x(&self) -> i32 {
        self.max_x
    }
    #[inline]
    pub fn max_y(&self) -> i32 {
        self.max_y
    }

    #[inline]
    pub fn total_cells(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn sorted(&self) -> bool {
        self.sorted
    }

    /// Cells of scanline `y`, ordered by x. Only valid after `sort_cells`.
    pub fn scanline_cells(&self, y: i32) -> impl Iterator<Item = &Cell> + '_ {
        let range = self.sorted_y[(y - self.min_y) as usize];
        self.sorted_cells[range.start as usize..(range.start + range.num) as usize]
            .iter()
            .map(move |&i| &self.cells[i as usize])
    }

    #[inline]
    fn add_curr_cell(&mut self) {
        if self.curr_cell.area | self.curr_cell.cover != 0 {
            self.cells.push(self.curr_cell);
        }
    }

    #[inline]
    fn set_curr_cell(&mut self, x: i32, y: i32) {
        if !self.curr_cell.is_at(x, y) {
            self.add_curr_cell();
            self.curr_cell = Cell {
                x,
                y,
                cover: 0,
                area: 0,
            };
        }
    }

    /// Step a segment across one pixel row `ey`. `x1`/`x2` are 24.8 fixed
    /// point, `y1`/`y2` the fractional y inside the row.
    fn render_hline(&mut self, ey: i32, x1: i32, y1: i32, x2: i32, y2: i32) {
        let ex1 = x1 >> POLY_SUBPIXEL_SHIFT;
        let ex2 = x2 >> POLY_SUBPIXEL_SHIFT;
        let fx1 = x1 & POLY_SUBPIXEL_MASK as i32;
        let fx2 = x2 & POLY_SUBPIXEL_MASK as i32;
        let scale = POLY_SUBPIXEL_SCALE as i32;

        // Flat within the row: nothing to accumulate, only move along.
        if y1 == y2 {
            self.set_curr_cell(ex2, ey);
            return;
        }

        // Starts and ends in the same pixel.
        if ex1 == ex2 {
            let delta = y2 - y1;
            self.curr_cell.cover += delta;
            self.curr_cell.area += (fx1 + fx2) * delta;
            return;
        }

        // Crosses several pixels: the first and last are partial, the ones
        // in between each take an equal share of dy, with the remainder
        // carried Bresenham-style.
        let (p, first, incr, dx) = if x2 >= x1 {
            ((scale - fx1) as i64 * (y2 - y1) as i64, scale, 1, x2 as i64 - x1 as i64)
        } else {
            (fx1 as i64 * (y2 - y1) as i64, 0, -1, x1 as i64 - x2 as i64)
        };

        let (mut delta, mut modulo) = floor_divmod(p, dx);
        self.curr_cell.cover += delta;
        self.curr_cell.area += (fx1 + first) * delta;

        let mut ex = ex1 + incr;
        self.set_curr_cell(ex, ey);
        let mut y = y1 + delta;

        if ex != ex2 {
            let (lift, rem) = floor_divmod(scale as i64 * (y2 - y + delta) as i64, dx);
            modulo -= dx;

            while ex != ex2 {
                delta = lift;
                modulo += rem;
                if modulo >= 0 {
                    modulo -= dx;
                    delta += 1;
                }
                self.curr_cell.cover += delta;
                self.curr_cell.area += scale * delta;
                y += delta;
                ex += incr;
                self.set_curr_cell(ex, ey);
            }
        }

        // Partial last pixel.
        delta = y2 - y;
        self.curr_cell.cover += delta;
        self.curr_cell.area += (fx2 + scale - first) * delta;
    }

    fn grow_bounds(&mut self, ex: i32, ey: i32) {
        self.min_x = self.min_x.min(ex);
        self.max_x = self.max_x.max(ex);
        self.min_y = self.min_y.min(ey);
        self.max_y = self.max_y.max(ey);
    }

    /// Add one edge in 24.8 fixed point.
    pub fn line(&mut self, x1: i32, y1: i32, x2: i32, y2: i32) {
        let dx = x2 as i64 - x1 as i64;
        if dx >= DX_LIMIT || dx <= -DX_LIMIT {
            let cx = ((x1 as i64 + x2 as i64) >> 1) as i32;
            let cy = ((y1 as i64 + y2 as i64) >> 1) as i32;
            self.line(x1, y1, cx, cy);
            self.line(cx, cy, x2, y2);
            return;
        }

        let dy = y2 as i64 - y1 as i64;
        let ex1 = x1 >> POLY_SUBPIXEL_SHIFT;
        let ex2 = x2 >> POLY_SUBPIXEL_SHIFT;
        let mut ey1 = y1 >> POLY_SUBPIXEL_SHIFT;
        let ey2 = y2 >> POLY_SUBPIXEL_SHIFT;
        let fy1 = y1 & POLY_SUBPIXEL_MASK as i32;
        let fy2 = y2 & POLY_SUBPIXEL_MASK as i32;
        let scale = POLY_SUBPIXEL_SCALE as i32;

        self.grow_bounds(ex1, ey1);
        self.grow_bounds(ex2, ey2);

        self.set_curr_cell(ex1, ey1);

        // Single row.
        if ey1 == ey2 {
            self.render_hline(ey1, x1, fy1, x2, fy2);
            return;
        }

        let mut incr = 1;

        // Vertical edge: one cell per row, no horizontal stepping.
        if dx == 0 {
            let two_fx = (x1 - (ex1 << POLY_SUBPIXEL_SHIFT)) << 1;
            let mut first = scale;
            if dy < 0 {
                first = 0;
                incr = -1;
            }

            let mut delta = first - fy1;
            self.curr_cell.cover += delta;
            self.curr_cell.area += two_fx * delta;

            ey1 += incr;
            self.set_curr_cell(ex1, ey1);

            delta = first + first - scale;
            let area = two_fx * delta;
            while ey1 != ey2 {
                self.curr_cell.cover = delta;
                self.curr_cell.area = area;
                ey1 += incr;
                self.set_curr_cell(ex1, ey1);
            }
            delta = fy2 - scale + first;
            self.curr_cell.cover += delta;
            self.curr_cell.area += two_fx * delta;
            return;
        }

        // General case: split the edge at every row boundary and hand each
        // piece to `render_hline`.
        let (p, first, dy_abs) = if dy >= 0 {
            ((scale - fy1) as i64 * dx, scale, dy)
        } else {
            incr = -1;
            (fy1 as i64 * dx, 0, -dy)
        };

        let (mut delta, mut modulo) = floor_divmod(p, dy_abs);
        let mut x_from = x1 + delta;
        self.render_hline(ey1, x1, fy1, x_from, first);

        ey1 += incr;
        self.set_curr_cell(x_from >> POLY_SUBPIXEL_SHIFT, ey1);

        if ey1 != ey2 {
            let (lift, rem) = floor_divmod(scale as i64 * dx, dy_abs);
            modulo -= dy_abs;

            while ey1 != ey2 {
                delta = lift;
                modulo += rem;
                if modulo >= 0 {
                    modulo -= dy_abs;
                    delta += 1;
                }
                let x_to = x_from + delta;
                self.render_hline(ey1, x_from, scale - first, x_to, first);
                x_from = x_to;

                ey1 += incr;
                self.set_curr_cell(x_from >> POLY_SUBPIXEL_SHIFT, ey1);
            }
        }
        self.render_hline(ey1, x_from, scale - first, x2, fy2);
    }

    /// Sort cells by y, then x. Idempotent until the next `reset`.
    pub fn sort_cells(&mut self) {
        if self.sorted {
            return;
        }

        self.add_curr_cell();
        self.curr_cell = Cell::SENTINEL;

        if self.cells.is_empty() {
            return;
        }

        self.sorted_cells.clear();
        self.sorted_cells.resize(self.cells.len(), 0);
        self.sorted_y.clear();
        self.sorted_y
            .resize((self.max_y - self.min_y + 1) as usize, ScanlineRange::default());

        // Counting sort on y: histogram, prefix sums, scatter.
        for cell in &self.cells {
            self.sorted_y[(cell.y - self.min_y) as usize].start += 1;
        }
        let mut start = 0u32;
        for range in &mut self.sorted_y {
            let count = range.start;
            range.start = start;
            start += count;
        }
        for (i, cell) in self.cells.iter().enumerate() {
            let range = &mut self.sorted_y[(cell.y - self.min_y) as usize];
            self.sorted_cells[(range.start + range.num) as usize] = i as u32;
            range.num += 1;
        }

        let cells = &self.cells;
        for range in &self.sorted_y {
            let row = &mut self.sorted_cells
                [range.start as usize..(range.start + range.num) as usize];
            row.sort_unstable_by_key(|&i| cells[i as usize].x);
        }

        self.sorted = true;
    }
}

impl Default for CellRasterizer {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Tests
// ============================================================================
