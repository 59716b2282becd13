//! Owned vertex storage and the curve-flattening adaptor.

use crate::basics::{
    is_stop, is_vertex, VertexSource, PATH_CMD_CURVE3, PATH_CMD_CURVE4, PATH_CMD_END_POLY,
    PATH_CMD_LINE_TO, PATH_CMD_MOVE_TO, PATH_CMD_STOP, PATH_FLAGS_CLOSE,
};
use crate::curves::{Curve3, Curve4};

/// Axis-aligned bounds in floating point, `x1 <= x2`, `y1 <= y2`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

impl Bounds {
    pub fn width(&self) -> f64 {
        self.x2 - self.x1
    }

    pub fn height(&self) -> f64 {
        self.y2 - self.y1
    }

    pub fn center(&self) -> (f64, f64) {
        ((self.x1 + self.x2) / 2.0, (self.y1 + self.y2) / 2.0)
    }

    pub fn union(&self, other: &Bounds) -> Bounds {
        Bounds {
            x1: self.x1.min(other.x1),
            y1: self.y1.min(other.y1),
            x2: self.x2.max(other.x2),
            y2: self.y2.max(other.y2),
        }
    }

    pub fn translate(&self, dx: f64, dy: f64) -> Bounds {
        Bounds {
            x1: self.x1 + dx,
            y1: self.y1 + dy,
            x2: self.x2 + dx,
            y2: self.y2 + dy,
        }
    }
}

/// A sequence of `(x, y, cmd)` vertices, curves stored as control points.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Path {
    vertices: Vec<(f64, f64, u32)>,
    iter: usize,
}

impl Path {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn vertices(&self) -> &[(f64, f64, u32)] {
        &self.vertices
    }

    pub fn move_to(&mut self, x: f64, y: f64) {
        self.vertices.push((x, y, PATH_CMD_MOVE_TO));
    }

    pub fn line_to(&mut self, x: f64, y: f64) {
        self.vertices.push((x, y, PATH_CMD_LINE_TO));
    }

    pub fn quad_to(&mut self, cx: f64, cy: f64, x: f64, y: f64) {
        self.vertices.push((cx, cy, PATH_CMD_CURVE3));
        self.vertices.push((x, y, PATH_CMD_CURVE3));
    }

    pub fn cubic_to(&mut self, c1x: f64, c1y: f64, c2x: f64, c2y: f64, x: f64, y: f64) {
        self.vertices.push((c1x, c1y, PATH_CMD_CURVE4));
        self.vertices.push((c2x, c2y, PATH_CMD_CURVE4));
        self.vertices.push((x, y, PATH_CMD_CURVE4));
    }

    pub fn close(&mut self) {
        self.vertices
            .push((0.0, 0.0, PATH_CMD_END_POLY | PATH_FLAGS_CLOSE));
    }
}

impl VertexSource for Path {
    fn rewind(&mut self, _path_id: u32) {
        self.iter = 0;
    }

    fn vertex(&mut self, x: &mut f64, y: &mut f64) -> u32 {
        match self.vertices.get(self.iter) {
            Some(&(vx, vy, cmd)) => {
                self.iter += 1;
                *x = vx;
                *y = vy;
                cmd
            }
            None => PATH_CMD_STOP,
        }
    }
}

/// Bounding box of every vertex `vs` emits for `path_id`. `None` when the
/// source produces no vertices.
pub fn bounding_rect(vs: &mut dyn VertexSource, path_id: u32) -> Option<Bounds> {
    let (mut x, mut y) = (0.0, 0.0);
    let mut bounds: Option<Bounds> = None;

    vs.rewind(path_id);
    loop {
        let cmd = vs.vertex(&mut x, &mut y);
        if is_stop(cmd) {
            break;
        }
        if !is_vertex(cmd) {
            continue;
        }
        let point = Bounds {
            x1: x,
            y1: y,
            x2: x,
            y2: y,
        };
        bounds = Some(match bounds {
            Some(b) => b.union(&point),
            None => point,
        });
    }
    bounds
}

// ============================================================================
// ConvCurve
// ============================================================================

/// Replaces curve commands of the wrapped source with `line_to` runs.
pub struct ConvCurve<VS: VertexSource> {
    source: VS,
    last_x: f64,
    last_y: f64,
    curve3: Curve3,
    curve4: Curve4,
}

impl<VS: VertexSource> ConvCurve<VS> {
    pub fn new(source: VS) -> Self {
        Self {
            source,
            last_x: 0.0,
            last_y: 0.0,
            curve3: Curve3::new(),
            curve4: Curve4::new(),
        }
    }
}

impl<VS: VertexSource> VertexSource for ConvCurve<VS> {
    fn rewind(&mut self, path_id: u32) {
        self.source.rewind(path_id);
        self.last_x = 0.0;
        self.last_y = 0.0;
        self.curve3.reset();
        self.curve4.reset();
    }

    fn vertex(&mut self, x: &mut f64, y: &mut f64) -> u32 {
        if !is_stop(self.curve3.vertex(x, y)) || !is_stop(self.curve4.vertex(x, y)) {
            self.last_x = *x;
            self.last_y = *y;
            return PATH_CMD_LINE_TO;
        }

        let mut cmd = self.source.vertex(x, y);
        match cmd {
            PATH_CMD_CURVE3 => {
                let (mut ex, mut ey) = (0.0, 0.0);
                self.source.vertex(&mut ex, &mut ey);
                self.curve3.init(self.last_x, self.last_y, *x, *y, ex, ey);
                // Drop the leading move_to; the pen is already there.
                self.curve3.vertex(x, y);
                self.curve3.vertex(x, y);
                cmd = PATH_CMD_LINE_TO;
            }
            PATH_CMD_CURVE4 => {
                let (mut c2x, mut c2y) = (0.0, 0.0);
                let (mut ex, mut ey) = (0.0, 0.0);
                self.source.vertex(&mut c2x, &mut c2y);
                self.source.vertex(&mut ex, &mut ey);
                self.curve4
                    .init(self.last_x, self.last_y, *x, *y, c2x, c2y, ex, ey);
                self.curve4.vertex(x, y);
                self.curve4.vertex(x, y);
                cmd = PATH_CMD_LINE_TO;
            }
            _ => {}
        }

        self.last_x = *x;
        self.last_y = *y;
        cmd
    }
}

// ============================================================================
// Tests
// ============================================================================
