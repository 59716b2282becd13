//! Ellipse vertex source and the ring outline built from two of them.

use std::f64::consts::PI;

use crate::basics::{
    uround, VertexSource, PATH_CMD_END_POLY, PATH_CMD_LINE_TO, PATH_CMD_MOVE_TO, PATH_CMD_STOP,
    PATH_FLAGS_CLOSE,
};
use crate::rasterizer::Rasterizer;

/// Closed polygon approximating an axis-aligned ellipse.
///
/// With `num_steps == 0` the vertex count is derived from the radii so the
/// chord error stays around 1/8 pixel.
#[derive(Debug, Clone)]
pub struct Ellipse {
    x: f64,
    y: f64,
    rx: f64,
    ry: f64,
    num: u32,
    step: u32,
    cw: bool,
}

impl Ellipse {
    pub fn new(x: f64, y: f64, rx: f64, ry: f64, num_steps: u32, cw: bool) -> Self {
        let num = if num_steps == 0 {
            Self::auto_steps(rx, ry)
        } else {
            num_steps
        };
        Self {
            x,
            y,
            rx,
            ry,
            num,
            step: 0,
            cw,
        }
    }

    pub fn circle(x: f64, y: f64, r: f64, cw: bool) -> Self {
        Self::new(x, y, r, r, 0, cw)
    }

    pub fn num_steps(&self) -> u32 {
        self.num
    }

    fn auto_steps(rx: f64, ry: f64) -> u32 {
        let ra = (rx.abs() + ry.abs()) / 2.0;
        if ra <= 0.0 {
            return 4;
        }
        let da = (ra / (ra + 0.125)).acos() * 2.0;
        uround(2.0 * PI / da).max(4)
    }
}

impl VertexSource for Ellipse {
    fn rewind(&mut self, _path_id: u32) {
        self.step = 0;
    }

    fn vertex(&mut self, x: &mut f64, y: &mut f64) -> u32 {
        if self.step == self.num {
            self.step += 1;
            return PATH_CMD_END_POLY | PATH_FLAGS_CLOSE;
        }
        if self.step > self.num {
            return PATH_CMD_STOP;
        }
        let mut angle = self.step as f64 / self.num as f64 * 2.0 * PI;
        if self.cw {
            angle = 2.0 * PI - angle;
        }
        *x = self.x + angle.cos() * self.rx;
        *y = self.y + angle.sin() * self.ry;
        self.step += 1;
        if self.step == 1 {
            PATH_CMD_MOVE_TO
        } else {
            PATH_CMD_LINE_TO
        }
    }
}

/// Add an unfilled circle outline to `ras`.
///
/// `radius` is the outer edge and the stroke grows inward by `width`, so the
/// ring never extends past the circle it outlines. The inner contour runs the
/// opposite way; under the non-zero rule the centre stays empty.
pub fn add_ring(ras: &mut Rasterizer, cx: f64, cy: f64, radius: f64, width: f64) {
    let mut outer = Ellipse::circle(cx, cy, radius, false);
    ras.add_path(&mut outer, 0);
    let inner_r = radius - width;
    if inner_r > 0.0 {
        let mut inner = Ellipse::circle(cx, cy, inner_r, true);
        ras.add_path(&mut inner, 0);
    }
}

// ============================================================================
// Tests
// ============================================================================
