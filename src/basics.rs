//! Fixed-point helpers, coverage constants and path commands shared by the
//! rasterizer, the path storage and the glyph faces.

// ============================================================================
// Rounding
// ============================================================================

/// Round half away from zero.
#[inline]
pub fn iround(v: f64) -> i32 {
    if v < 0.0 {
        (v - 0.5) as i32
    } else {
        (v + 0.5) as i32
    }
}

/// Round half up to an unsigned integer.
#[inline]
pub fn uround(v: f64) -> u32 {
    (v + 0.5) as u32
}

// ============================================================================
// Coverage
// ============================================================================

/// Anti-aliasing coverage of one pixel, 0 (empty) to 255 (full).
pub type CoverType = u8;

// ============================================================================
// Subpixel accuracy
// ============================================================================

/// Number of fractional bits in rasterizer coordinates (24.8 fixed point).
pub const POLY_SUBPIXEL_SHIFT: u32 = 8;
pub const POLY_SUBPIXEL_SCALE: u32 = 1 << POLY_SUBPIXEL_SHIFT;
pub const POLY_SUBPIXEL_MASK: u32 = POLY_SUBPIXEL_SCALE - 1;

/// Convert a floating-point coordinate to 24.8 fixed point.
#[inline]
pub fn poly_coord(v: f64) -> i32 {
    iround(v * POLY_SUBPIXEL_SCALE as f64)
}

// ============================================================================
// Path commands
// ============================================================================

pub const PATH_CMD_STOP: u32 = 0;
pub const PATH_CMD_MOVE_TO: u32 = 1;
pub const PATH_CMD_LINE_TO: u32 = 2;
/// Quadratic Bezier: control point then end point, both tagged CURVE3.
pub const PATH_CMD_CURVE3: u32 = 3;
/// Cubic Bezier: two control points then end point, all tagged CURVE4.
pub const PATH_CMD_CURVE4: u32 = 4;
pub const PATH_CMD_END_POLY: u32 = 0x0F;

pub const PATH_FLAGS_CLOSE: u32 = 0x40;

#[inline]
pub fn is_stop(c: u32) -> bool {
    c == PATH_CMD_STOP
}

#[inline]
pub fn is_move_to(c: u32) -> bool {
    c == PATH_CMD_MOVE_TO
}

/// Move-to, line-to and curve commands carry a coordinate.
#[inline]
pub fn is_vertex(c: u32) -> bool {
    (PATH_CMD_MOVE_TO..PATH_CMD_END_POLY).contains(&c)
}

#[inline]
pub fn is_close(c: u32) -> bool {
    (c & !PATH_FLAGS_CLOSE) == PATH_CMD_END_POLY && (c & PATH_FLAGS_CLOSE) != 0
}

// ============================================================================
// VertexSource
// ============================================================================

/// A rewindable producer of path vertices.
///
/// `vertex` writes the coordinate through the out-parameters and returns the
/// command; `PATH_CMD_STOP` ends the sequence.
pub trait VertexSource {
    fn rewind(&mut self, path_id: u32);
    fn vertex(&mut self, x: &mut f64, y: &mut f64) -> u32;
}

// ============================================================================
// Tests
// ============================================================================
