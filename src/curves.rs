//! Bezier flatteners using forward differences.
//!
//! The step count is one segment per four pixels of control polygon
//! length, with a floor of four segments. Glyph outlines at
//! puzzle sizes stay well inside the accuracy this gives.

use crate::basics::{uround, VertexSource, PATH_CMD_LINE_TO, PATH_CMD_MOVE_TO, PATH_CMD_STOP};

const MIN_STEPS: i32 = 4;

fn step_count(control_len: f64) -> i32 {
    (uround(control_len * 0.25) as i32).max(MIN_STEPS)
}

#[inline]
fn dist(x1: f64, y1: f64, x2: f64, y2: f64) -> f64 {
    ((x2 - x1) * (x2 - x1) + (y2 - y1) * (y2 - y1)).sqrt()
}

// ============================================================================
// Curve3
// ============================================================================

/// Quadratic Bezier flattener.
///
/// Emits `move_to` at the start point, then `line_to` down to the end point.
#[derive(Debug, Clone)]
pub struct Curve3 {
    num_steps: i32,
    step: i32,
    start: (f64, f64),
    end: (f64, f64),
    f: (f64, f64),
    df: (f64, f64),
    ddf: (f64, f64),
}

impl Curve3 {
    pub fn new() -> Self {
        Self {
            num_steps: 0,
            step: -1,
            start: (0.0, 0.0),
            end: (0.0, 0.0),
            f: (0.0, 0.0),
            df: (0.0, 0.0),
            ddf: (0.0, 0.0),
        }
    }

    /// Drop any pending vertices.
    pub fn reset(&mut self) {
        self.num_steps = 0;
        self.step = -1;
    }

    pub fn init(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, x3: f64, y3: f64) {
        self.start = (x1, y1);
        self.end = (x3, y3);
        self.num_steps = step_count(dist(x1, y1, x2, y2) + dist(x2, y2, x3, y3));

        let s = 1.0 / self.num_steps as f64;
        let s2 = s * s;
        let tmpx = (x1 - x2 * 2.0 + x3) * s2;
        let tmpy = (y1 - y2 * 2.0 + y3) * s2;

        self.f = (x1, y1);
        self.df = (tmpx + (x2 - x1) * (2.0 * s), tmpy + (y2 - y1) * (2.0 * s));
        self.ddf = (tmpx * 2.0, tmpy * 2.0);
        self.step = self.num_steps;
    }
}

impl Default for Curve3 {
    fn default() -> Self {
        Self::new()
    }
}

impl VertexSource for Curve3 {
    // Forward differences are consumed as they are emitted; `init` replays.
    fn rewind(&mut self, _path_id: u32) {}

    fn vertex(&mut self, x: &mut f64, y: &mut f64) -> u32 {
        if self.step < 0 {
            return PATH_CMD_STOP;
        }
        if self.step == self.num_steps {
            (*x, *y) = self.start;
            self.step -= 1;
            return PATH_CMD_MOVE_TO;
        }
        if self.step == 0 {
            (*x, *y) = self.end;
            self.step -= 1;
            return PATH_CMD_LINE_TO;
        }
        self.f.0 += self.df.0;
        self.f.1 += self.df.1;
        self.df.0 += self.ddf.0;
        self.df.1 += self.ddf.1;
        (*x, *y) = self.f;
        self.step -= 1;
        PATH_CMD_LINE_TO
    }
}

// ============================================================================
// Curve4
// ============================================================================

/// Cubic Bezier flattener.
#[derive(Debug, Clone)]
pub struct Curve4 {
    num_steps: i32,
    step: i32,
    start: (f64, f64),
    end: (f64, f64),
    f: (f64, f64),
    df: (f64, f64),
    ddf: (f64, f64),
    dddf: (f64, f64),
}

impl Curve4 {
    pub fn new() -> Self {
        Self {
            num_steps: 0,
            step: -1,
            start: (0.0, 0.0),
            end: (0.0, 0.0),
            f: (0.0, 0.0),
            df: (0.0, 0.0),
            ddf: (0.0, 0.0),
            dddf: (0.0, 0.0),
        }
    }

    /// Drop any pending vertices.
    pub fn reset(&mut self) {
        self.num_steps = 0;
        self.step = -1;
    }

    #[allow(clippy::too_many_arguments)]
    pub fn init(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, x3: f64, y3: f64, x4: f64, y4: f64) {
        self.start = (x1, y1);
        self.end = (x4, y4);
        let len = dist(x1, y1, x2, y2) + dist(x2, y2, x3, y3) + dist(x3, y3, x4, y4);
        self.num_steps = step_count(len);

        let s = 1.0 / self.num_steps as f64;
        let s2 = s * s;
        let s3 = s2 * s;
        let pre1 = 3.0 * s;
        let pre2 = 3.0 * s2;
        let pre4 = 6.0 * s2;
        let pre5 = 6.0 * s3;

        let tmp1x = x1 - x2 * 2.0 + x3;
        let tmp1y = y1 - y2 * 2.0 + y3;
        let tmp2x = (x2 - x3) * 3.0 - x1 + x4;
        let tmp2y = (y2 - y3) * 3.0 - y1 + y4;

        self.f = (x1, y1);
        self.df = (
            (x2 - x1) * pre1 + tmp1x * pre2 + tmp2x * s3,
            (y2 - y1) * pre1 + tmp1y * pre2 + tmp2y * s3,
        );
        self.ddf = (tmp1x * pre4 + tmp2x * pre5, tmp1y * pre4 + tmp2y * pre5);
        self.dddf = (tmp2x * pre5, tmp2y * pre5);
        self.step = self.num_steps;
    }
}

impl Default for Curve4 {
    fn default() -> Self {
        Self::new()
    }
}

impl VertexSource for Curve4 {
    fn rewind(&mut self, _path_id: u32) {}

    fn vertex(&mut self, x: &mut f64, y: &mut f64) -> u32 {
        if self.step < 0 {
            return PATH_CMD_STOP;
        }
        if self.step == self.num_steps {
            (*x, *y) = self.start;
            self.step -= 1;
            return PATH_CMD_MOVE_TO;
        }
        if self.step == 0 {
            (*x, *y) = self.end;
            self.step -= 1;
            return PATH_CMD_LINE_TO;
        }
        self.f.0 += self.df.0;
        self.f.1 += self.df.1;
        self.df.0 += self.ddf.0;
        self.df.1 += self.ddf.1;
        self.ddf.0 += self.dddf.0;
        self.ddf.1 += self.dddf.1;
        (*x, *y) = self.f;
        self.step -= 1;
        PATH_CMD_LINE_TO
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::basics::is_stop;

    fn collect(vs: &mut dyn VertexSource) -> Vec<(f64, f64, u32)> {
        let mut out = Vec::new();
        let (mut x, mut y) = (0.0, 0.0);
        loop {
            let cmd = vs.vertex(&mut x, &mut y);
            if is_stop(cmd) {
                break;
            }
            out.push((x, y, cmd));
        }
        out
    }

    #[test]
    fn test_curve3_endpoints_and_min_steps() {
        let mut c = Curve3::new();
        c.init(0.0, 0.0, 1.0, 1.0, 2.0, 0.0);
        let pts = collect(&mut c);
        assert_eq!(pts.len(), MIN_STEPS as usize + 1);
        assert_eq!(pts[0], (0.0, 0.0, PATH_CMD_MOVE_TO));
        assert_eq!(pts.last().copied(), Some((2.0, 0.0, PATH_CMD_LINE_TO)));
    }

    #[test]
    fn test_curve3_midpoint_on_curve() {
        let mut c = Curve3::new();
        c.init(0.0, 0.0, 50.0, 100.0, 100.0, 0.0);
        let pts = collect(&mut c);
        // Even step count: the middle vertex is B(0.5) = (50, 50).
        let n = pts.len() - 1;
        assert_eq!(n % 2, 0);
        let (mx, my, _) = pts[n / 2];
        assert!((mx - 50.0).abs() < 1e-9 && (my - 50.0).abs() < 1e-9, "({mx}, {my})");
    }

    #[test]
    fn test_curve4_straight_line_stays_on_line() {
        let mut c = Curve4::new();
        c.init(0.0, 0.0, 10.0, 10.0, 20.0, 20.0, 30.0, 30.0);
        for (x, y, _) in collect(&mut c) {
            assert!((x - y).abs() < 1e-9);
        }
    }

    #[test]
    fn test_longer_curves_get_more_steps() {
        let mut short = Curve4::new();
        short.init(0.0, 0.0, 0.0, 4.0, 4.0, 4.0, 4.0, 0.0);
        let mut long = Curve4::new();
        long.init(0.0, 0.0, 0.0, 200.0, 200.0, 200.0, 200.0, 0.0);
        // 12 px of control polygon hits the floor; 600 px gives 150 steps.
        assert_eq!(collect(&mut short).len(), 1 + 4);
        assert_eq!(collect(&mut long).len(), 1 + 150);
    }

    #[test]
    fn test_uninitialized_curve_is_empty() {
        assert!(collect(&mut Curve3::new()).is_empty());
        assert!(collect(&mut Curve4::new()).is_empty());
    }
}
