//! Puzzle rendering: header band, glyph grid and the answer highlight.
//!
//! A render is a pure function of the configuration, the fonts, the target
//! position and the mode. Question and answer share every step; the answer
//! only recolours the target glyph and draws a ring under it.

use log::debug;

use crate::canvas::Canvas;
use crate::color::Rgba8;
use crate::config::{PuzzleConfig, RenderMode};
use crate::ellipse::add_ring;
use crate::error::{PuzzleError, Result};
use crate::font::{Font, FontSet, TextFace};
use crate::layout::{CellGeometry, PuzzleLayout};
use crate::path::Bounds;
use crate::rasterizer::{render_scanlines_aa_solid, Rasterizer, ScanlineU8};
use crate::target::TargetPosition;

/// Colour of the target glyph and ring in the answer image.
pub const ALERT_COLOR: Rgba8 = Rgba8::RED;
/// Stroke width of the answer ring.
pub const RING_WIDTH: f64 = 10.0;

/// What goes into one cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellPlan<'a> {
    pub geometry: CellGeometry,
    pub glyph: &'a str,
    pub is_target: bool,
}

/// Row-major plan of every cell: the target cell gets the target glyph,
/// all others the wrong glyph.
pub fn plan_cells<'a>(
    config: &'a PuzzleConfig,
    layout: &PuzzleLayout,
    target: TargetPosition,
) -> Vec<CellPlan<'a>> {
    layout
        .cells()
        .map(|geometry| {
            let is_target = target.is(geometry.row, geometry.col);
            CellPlan {
                geometry,
                glyph: config.glyph_for(is_target),
                is_target,
            }
        })
        .collect()
}

/// Square enclosing the answer ring of `target`. Everything the answer
/// image changes lies inside it, one pixel of anti-aliasing aside.
pub fn highlight_bounds(config: &PuzzleConfig, layout: &PuzzleLayout, target: TargetPosition) -> Bounds {
    let (cx, cy) = layout.cell_center(target.row, target.col);
    let r = config.ring_radius();
    Bounds {
        x1: cx - r,
        y1: cy - r,
        x2: cx + r,
        y2: cy + r,
    }
}

/// Fill the header band and centre the header text in it.
pub fn render_header(canvas: &mut Canvas, layout: &PuzzleLayout, config: &PuzzleConfig, font: &Font) {
    let rect = layout.header_rect();
    canvas.fill_rect(
        rect.x1 as i32,
        rect.y1 as i32,
        rect.x2 as i32,
        rect.y2 as i32,
        config.header_background,
    );
    let (x, y) = layout.header_text_anchor(config.header_text_y_offset);
    font.draw_centered(canvas, &config.header_text, x, y, config.header_text_color);
}

/// Draw one cell. In answer mode the target gets its ring first so the
/// glyph stays on top.
pub fn render_cell(
    canvas: &mut Canvas,
    cell: &CellPlan<'_>,
    config: &PuzzleConfig,
    font: &Font,
    mode: RenderMode,
) {
    let (cx, cy) = cell.geometry.center;
    let highlight = mode.is_answer() && cell.is_target;
    if highlight {
        let mut ras = Rasterizer::new();
        let mut sl = ScanlineU8::new();
        add_ring(&mut ras, cx, cy, config.ring_radius(), RING_WIDTH);
        render_scanlines_aa_solid(&mut ras, &mut sl, canvas, &ALERT_COLOR);
    }
    let color = if highlight {
        ALERT_COLOR
    } else {
        config.grid_text_color
    };
    font.draw_centered(canvas, cell.glyph, cx, cy, color);
}

/// Render the full puzzle image.
///
/// The configuration and target are validated before the canvas is
/// allocated, so an error never leaves a half-drawn image behind.
pub fn render_puzzle(
    config: &PuzzleConfig,
    fonts: &FontSet,
    target: TargetPosition,
    mode: RenderMode,
) -> Result<Canvas> {
    let layout = config.validate()?;
    if !target.fits(layout.rows, layout.cols) {
        return Err(PuzzleError::InvalidLayout(format!(
            "target ({target}) is outside the {}x{} grid",
            layout.rows, layout.cols
        )));
    }
    debug!(
        "rendering {mode:?}: {}x{} canvas, header {}px, {}x{} cells of {:.2}x{:.2}, target {target}",
        layout.canvas.width,
        layout.canvas.height,
        layout.header_height,
        layout.rows,
        layout.cols,
        layout.cell_width,
        layout.cell_height,
    );

    let mut canvas = Canvas::new(layout.canvas.width, layout.canvas.height, config.background);
    render_header(&mut canvas, &layout, config, &fonts.header);
    for cell in plan_cells(config, &layout, target) {
        render_cell(&mut canvas, &cell, config, &fonts.grid, mode);
    }
    Ok(canvas)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{AspectRatio, HeaderSize};

    fn small_config() -> PuzzleConfig {
        PuzzleConfig {
            wrong_glyph: "6".into(),
            target_glyph: "9".into(),
            header_text: "FIND 9".into(),
            aspect: AspectRatio::Custom {
                width: 400,
                height: 400,
            },
            header: HeaderSize::Fixed(100),
            header_font_size: 40,
            grid_rows: 4,
            grid_cols: 4,
            grid_font_size: 32,
            ..PuzzleConfig::default()
        }
    }

    #[test]
    fn test_plan_has_exactly_one_target() {
        let config = small_config();
        let layout = config.validate().unwrap();
        let plan = plan_cells(&config, &layout, TargetPosition::new(2, 1));
        assert_eq!(plan.len(), 16);
        let targets: Vec<_> = plan.iter().filter(|c| c.glyph == "9").collect();
        assert_eq!(targets.len(), 1);
        assert!(targets[0].is_target);
        assert_eq!((targets[0].geometry.row, targets[0].geometry.col), (2, 1));
        assert_eq!(plan.iter().filter(|c| c.glyph == "6").count(), 15);
    }

    #[test]
    fn test_header_band_filled() {
        let config = small_config();
        let fonts = FontSet::builtin(&config);
        let canvas =
            render_puzzle(&config, &fonts, TargetPosition::new(0, 0), RenderMode::Question).unwrap();
        assert_eq!(canvas.pixel(1, 1), config.header_background);
        assert_eq!(canvas.pixel(399, 99), config.header_background);
        assert_eq!(canvas.pixel(1, 100), config.background);
    }

    #[test]
    fn test_target_outside_grid_rejected() {
        let config = small_config();
        let fonts = FontSet::builtin(&config);
        let err = render_puzzle(&config, &fonts, TargetPosition::new(4, 0), RenderMode::Answer)
            .unwrap_err();
        assert!(err.is_layout_error());
    }

    #[test]
    fn test_answer_marks_target_in_red() {
        let config = small_config();
        let fonts = FontSet::builtin(&config);
        let target = TargetPosition::new(1, 2);
        let question = render_puzzle(&config, &fonts, target, RenderMode::Question).unwrap();
        let answer = render_puzzle(&config, &fonts, target, RenderMode::Answer).unwrap();
        let has_red = |c: &Canvas| {
            (0..c.height() as i32)
                .any(|y| (0..c.width() as i32).any(|x| c.pixel(x, y) == ALERT_COLOR))
        };
        assert!(!has_red(&question));
        assert!(has_red(&answer));

        let layout = config.validate().unwrap();
        let (cx, cy) = layout.cell_center(1, 2);
        // A point midway through the ring band, straight above the centre.
        let band = config.ring_radius() - RING_WIDTH / 2.0;
        assert_eq!(answer.pixel(cx as i32, (cy - band) as i32), ALERT_COLOR);
    }
}
