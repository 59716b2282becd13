//! Canvas, header and grid geometry.
//!
//! Everything is derived from the configuration with floating-point
//! division; cell edges may fall between pixels. Glyphs are centred per
//! cell, so no rounding is needed to keep the grid gap-free.

use serde::{Deserialize, Serialize};

use crate::error::{PuzzleError, Result};
use crate::path::Bounds;

/// Gap between canvas edges, the header and the grid, in pixels.
pub const GRID_MARGIN: u32 = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CanvasSize {
    pub width: u32,
    pub height: u32,
}

/// Canvas shape presets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AspectRatio {
    /// 1:1 feed/thumbnail, 1080x1080.
    #[default]
    Square,
    /// 9:16 shorts, 1080x1920.
    Tall,
    Custom { width: u32, height: u32 },
}

impl AspectRatio {
    pub fn canvas_size(&self) -> CanvasSize {
        match *self {
            AspectRatio::Square => CanvasSize {
                width: 1080,
                height: 1080,
            },
            AspectRatio::Tall => CanvasSize {
                width: 1080,
                height: 1920,
            },
            AspectRatio::Custom { width, height } => CanvasSize { width, height },
        }
    }
}

/// Height of the header band.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HeaderSize {
    /// Absolute height in pixels.
    Fixed(u32),
    /// Fraction of the canvas height, in (0, 1).
    Ratio(f64),
}

impl Default for HeaderSize {
    fn default() -> Self {
        HeaderSize::Fixed(300)
    }
}

impl HeaderSize {
    /// Resolve to pixels for a canvas of `canvas_height`.
    pub fn resolve(&self, canvas_height: u32) -> Result<u32> {
        match *self {
            HeaderSize::Fixed(0) => Err(PuzzleError::InvalidLayout(
                "header height must be positive".into(),
            )),
            HeaderSize::Fixed(h) => Ok(h),
            HeaderSize::Ratio(r) if r > 0.0 && r < 1.0 => {
                match (r * canvas_height as f64).round() as u32 {
                    0 => Err(PuzzleError::InvalidLayout(format!(
                        "header ratio {r} gives a zero-height header"
                    ))),
                    h => Ok(h),
                }
            }
            HeaderSize::Ratio(r) => Err(PuzzleError::InvalidLayout(format!(
                "header ratio {r} is outside (0, 1)"
            ))),
        }
    }
}

/// One grid cell's position and extent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellGeometry {
    pub row: u32,
    pub col: u32,
    pub center: (f64, f64),
    pub bounds: Bounds,
}

/// Resolved pixel geometry for one puzzle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PuzzleLayout {
    pub canvas: CanvasSize,
    pub header_height: u32,
    pub rows: u32,
    pub cols: u32,
    pub cell_width: f64,
    pub cell_height: f64,
}

impl PuzzleLayout {
    /// Compute the layout, rejecting any geometry that leaves no positive
    /// grid area. Nothing is clamped.
    pub fn resolve(
        aspect: AspectRatio,
        header: HeaderSize,
        rows: u32,
        cols: u32,
    ) -> Result<Self> {
        let canvas = aspect.canvas_size();
        if canvas.width == 0 || canvas.height == 0 {
            return Err(PuzzleError::InvalidLayout(format!(
                "canvas {}x{} has a zero dimension",
                canvas.width, canvas.height
            )));
        }
        if rows == 0 || cols == 0 {
            return Err(PuzzleError::InvalidLayout(format!(
                "grid {rows}x{cols} has no cells"
            )));
        }
        let header_height = header.resolve(canvas.height)?;

        let m = GRID_MARGIN as i64;
        let grid_w = canvas.width as i64 - 2 * m;
        let grid_h = canvas.height as i64 - header_height as i64 - 2 * m;
        if grid_w <= 0 || grid_h <= 0 {
            return Err(PuzzleError::InvalidLayout(format!(
                "header {header_height}px on a {}x{} canvas leaves a {grid_w}x{grid_h} grid",
                canvas.width, canvas.height
            )));
        }

        Ok(Self {
            canvas,
            header_height,
            rows,
            cols,
            cell_width: grid_w as f64 / cols as f64,
            cell_height: grid_h as f64 / rows as f64,
        })
    }

    /// Header band `(0, 0, W, header_height)`.
    pub fn header_rect(&self) -> Bounds {
        Bounds {
            x1: 0.0,
            y1: 0.0,
            x2: self.canvas.width as f64,
            y2: self.header_height as f64,
        }
    }

    /// Grid area inside the margins below the header.
    pub fn grid_area(&self) -> Bounds {
        let m = GRID_MARGIN as f64;
        Bounds {
            x1: m,
            y1: self.header_height as f64 + m,
            x2: self.canvas.width as f64 - m,
            y2: self.canvas.height as f64 - m,
        }
    }

    /// Anchor for the header text: canvas centre column, band middle plus
    /// the signed offset.
    pub fn header_text_anchor(&self, y_offset: i32) -> (f64, f64) {
        (
            self.canvas.width as f64 / 2.0,
            self.header_height as f64 / 2.0 + y_offset as f64,
        )
    }

    pub fn cell_bounds(&self, row: u32, col: u32) -> Bounds {
        let area = self.grid_area();
        let x1 = area.x1 + col as f64 * self.cell_width;
        let y1 = area.y1 + row as f64 * self.cell_height;
        Bounds {
            x1,
            y1,
            x2: x1 + self.cell_width,
            y2: y1 + self.cell_height,
        }
    }

    pub fn cell_center(&self, row: u32, col: u32) -> (f64, f64) {
        self.cell_bounds(row, col).center()
    }

    pub fn cell_count(&self) -> usize {
        self.rows as usize * self.cols as usize
    }

    /// All cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = CellGeometry> + '_ {
        (0..self.rows).flat_map(move |row| {
            (0..self.cols).map(move |col| {
                let bounds = self.cell_bounds(row, col);
                CellGeometry {
                    row,
                    col,
                    center: bounds.center(),
                    bounds,
                }
            })
        })
    }
}
