//! End-to-end puzzle scenarios, rendered with the built-in face so no font
//! file is needed.

use spot_glyph::render::{highlight_bounds, plan_cells};
use spot_glyph::{
    decode, encode, puzzle_rng, render_puzzle, AspectRatio, Canvas, FontSet, HeaderSize,
    ImageFormat, ProblemSet, Puzzle, PuzzleConfig, PuzzleError, RenderMode, Rgba8,
    TargetPosition, ALERT_COLOR,
};

fn six_nine() -> PuzzleConfig {
    let mut config = ProblemSet::find("6/9").expect("6/9 preset").config();
    config.header_text = "FIND THE 9".into();
    config
}

fn pixels(canvas: &Canvas) -> impl Iterator<Item = (i32, i32, Rgba8)> + '_ {
    let w = canvas.width() as i32;
    canvas
        .as_bytes()
        .chunks_exact(4)
        .enumerate()
        .map(move |(i, p)| (i as i32 % w, i as i32 / w, Rgba8::new(p[0], p[1], p[2], p[3])))
}

fn crop(canvas: &Canvas, x: i32, y: i32, w: i32, h: i32) -> Vec<Rgba8> {
    (y..y + h)
        .flat_map(|py| (x..x + w).map(move |px| (px, py)))
        .map(|(px, py)| canvas.pixel(px, py))
        .collect()
}

#[test]
fn six_nine_scenario() {
    let config = six_nine();
    let fonts = FontSet::builtin(&config);
    let layout = config.validate().unwrap();
    assert_eq!((layout.canvas.width, layout.canvas.height), (1080, 1080));
    assert_eq!(layout.header_height, 300);

    let target = TargetPosition::new(4, 7);
    let plan = plan_cells(&config, &layout, target);
    assert_eq!(plan.iter().filter(|c| c.glyph == "6").count(), 99);
    assert_eq!(plan.iter().filter(|c| c.glyph == "9").count(), 1);

    let question = render_puzzle(&config, &fonts, target, RenderMode::Question).unwrap();
    let answer = render_puzzle(&config, &fonts, target, RenderMode::Answer).unwrap();
    assert!(pixels(&question).all(|(_, _, c)| c != ALERT_COLOR));

    let ring = highlight_bounds(&config, &layout, target);
    let red: Vec<_> = pixels(&answer).filter(|&(_, _, c)| c == ALERT_COLOR).collect();
    assert!(!red.is_empty());
    for (x, y, _) in red {
        assert!(
            x as f64 >= ring.x1 - 1.0
                && x as f64 <= ring.x2 + 1.0
                && y as f64 >= ring.y1 - 1.0
                && y as f64 <= ring.y2 + 1.0,
            "red pixel at ({x}, {y}) outside {ring:?}"
        );
    }
}

#[test]
fn exactly_one_cell_looks_different() {
    // Integer cell pitch (98x68) and a glyph that fits inside its cell make
    // every cell a pixel-exact translate of the others.
    let config = PuzzleConfig {
        grid_font_size: 48,
        ..six_nine()
    };
    let fonts = FontSet::builtin(&config);
    let layout = config.validate().unwrap();
    let target = TargetPosition::new(0, 0);
    let image = render_puzzle(&config, &fonts, target, RenderMode::Question).unwrap();

    let cells: Vec<_> = layout
        .cells()
        .map(|cell| {
            let b = cell.bounds;
            crop(&image, b.x1 as i32, b.y1 as i32, 98, 68)
        })
        .collect();
    let reference = &cells[1];
    let odd: Vec<_> = cells
        .iter()
        .enumerate()
        .filter(|(_, c)| *c != reference)
        .map(|(i, _)| i)
        .collect();
    assert_eq!(odd, vec![0]);
}

#[test]
fn rendering_is_deterministic() {
    let config = six_nine();
    let fonts = FontSet::builtin(&config);
    let target = TargetPosition::new(2, 3);
    for mode in [RenderMode::Question, RenderMode::Answer] {
        let a = render_puzzle(&config, &fonts, target, mode).unwrap();
        let b = render_puzzle(&config, &fonts, target, mode).unwrap();
        assert!(a == b, "{mode:?} renders differ");
    }
}

#[test]
fn question_and_answer_differ_only_around_target() {
    let config = six_nine();
    let fonts = FontSet::builtin(&config);
    let layout = config.validate().unwrap();
    let target = TargetPosition::new(9, 0);
    let pair = Puzzle::render_pair(&config, &fonts, target).unwrap();
    let ring = highlight_bounds(&config, &layout, target);

    let mut changed = 0;
    for ((x, y, q), (_, _, a)) in pixels(&pair.question).zip(pixels(&pair.answer)) {
        if q != a {
            changed += 1;
            assert!(
                x as f64 >= ring.x1 - 1.0
                    && x as f64 <= ring.x2 + 1.0
                    && y as f64 >= ring.y1 - 1.0
                    && y as f64 <= ring.y2 + 1.0,
                "pixel ({x}, {y}) changed outside {ring:?}"
            );
        }
    }
    assert!(changed > 0);
}

#[test]
fn generated_pair_shares_one_target() {
    let config = six_nine();
    let fonts = FontSet::builtin(&config);
    let layout = config.validate().unwrap();
    let pair = Puzzle::generate(&config, &fonts, &mut puzzle_rng(Some(99))).unwrap();
    assert!(pair.target.fits(10, 10));

    // The only red in the answer sits around the target the question used.
    let ring = highlight_bounds(&config, &layout, pair.target);
    let (cx, cy) = ring.center();
    let band = config.ring_radius() - 5.0;
    assert_eq!(pair.answer.pixel(cx as i32, (cy - band) as i32), ALERT_COLOR);
    assert_eq!(pair.question.pixel(cx as i32, (cy - band) as i32), config.background);
}

#[test]
fn single_cell_grid_targets_origin() {
    let config = PuzzleConfig {
        aspect: AspectRatio::Custom {
            width: 300,
            height: 400,
        },
        header: HeaderSize::Fixed(100),
        grid_rows: 1,
        grid_cols: 1,
        ..six_nine()
    };
    let fonts = FontSet::builtin(&config);
    let mut rng = puzzle_rng(None);
    for _ in 0..10 {
        let pair = Puzzle::generate(&config, &fonts, &mut rng).unwrap();
        assert_eq!(pair.target, TargetPosition::new(0, 0));
    }
}

#[test]
fn header_offset_moves_text_up_only() {
    let fonts_config = six_nine();
    let fonts = FontSet::builtin(&fonts_config);
    let target = TargetPosition::new(0, 0);

    let top_text_row = |offset: i32| {
        let config = PuzzleConfig {
            header_text_y_offset: offset,
            ..six_nine()
        };
        let image = render_puzzle(&config, &fonts, target, RenderMode::Question).unwrap();
        assert_eq!(image.pixel(2, 0), config.header_background);
        assert_eq!(image.pixel(2, 299), config.header_background);
        assert_eq!(image.pixel(2, 300), config.background);
        assert_eq!(image.pixel(1079, 299), config.header_background);
        // Bound first so the iterator is dropped before `image`.
        let row = pixels(&image)
            .find(|&(_, _, c)| c == config.header_text_color)
            .map(|(_, y, _)| y);
        row
    };

    let centred = top_text_row(0).expect("header text drawn");
    let raised = top_text_row(-150).expect("header text drawn");
    assert!(raised < centred, "{raised} >= {centred}");
    assert!(centred > 100);
}

#[test]
fn degenerate_header_is_invalid_layout() {
    let config = PuzzleConfig {
        header: HeaderSize::Fixed(1030),
        ..six_nine()
    };
    let fonts = FontSet::builtin(&config);
    let err = render_puzzle(&config, &fonts, TargetPosition::new(0, 0), RenderMode::Question)
        .unwrap_err();
    assert!(matches!(err, PuzzleError::InvalidLayout(_)), "{err}");
    assert!(Puzzle::generate(&config, &fonts, &mut puzzle_rng(Some(1))).is_err());
}

#[test]
fn empty_target_glyph_is_rejected() {
    let config = PuzzleConfig {
        target_glyph: String::new(),
        ..six_nine()
    };
    let fonts = FontSet::builtin(&config);
    let err = Puzzle::generate(&config, &fonts, &mut puzzle_rng(Some(1))).unwrap_err();
    assert!(err.is_layout_error());
    assert_eq!(err.to_string(), "target glyph must not be empty");
}

#[test]
fn encoded_images_keep_canvas_size() {
    let config = PuzzleConfig {
        aspect: AspectRatio::Tall,
        ..six_nine()
    };
    let fonts = FontSet::builtin(&config);
    let image = render_puzzle(&config, &fonts, TargetPosition::new(3, 3), RenderMode::Answer).unwrap();
    for format in [ImageFormat::default(), ImageFormat::Png] {
        let decoded = decode(&encode(&image, format).unwrap()).unwrap();
        assert_eq!(decoded.dimensions(), (1080, 1920), "{format:?}");
    }
}

#[test]
fn missing_font_file_still_renders() {
    let config = six_nine();
    let fonts = FontSet::load(Some("does/not/exist.ttf".as_ref()), &config);
    assert!(fonts.grid.is_builtin());
    assert!(render_puzzle(&config, &fonts, TargetPosition::new(0, 0), RenderMode::Question).is_ok());
}
