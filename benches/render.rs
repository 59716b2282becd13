//! Full-puzzle render timings with the built-in face.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use spot_glyph::{encode, render_puzzle, FontSet, ImageFormat, ProblemSet, RenderMode, TargetPosition};

fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("render_puzzle");
    group.sample_size(20);

    for n in [5u32, 10, 20] {
        let config = spot_glyph::PuzzleConfig {
            grid_rows: n,
            grid_cols: n,
            ..ProblemSet::find("6/9").map(|s| s.config()).unwrap_or_default()
        };
        let fonts = FontSet::builtin(&config);
        let target = TargetPosition::new(n / 2, n / 2);
        group.bench_with_input(BenchmarkId::new("answer", n), &n, |b, _| {
            b.iter(|| render_puzzle(black_box(&config), &fonts, target, RenderMode::Answer));
        });
    }

    group.finish();
}

fn bench_encode(c: &mut Criterion) {
    let config = spot_glyph::PuzzleConfig::default();
    let fonts = FontSet::builtin(&config);
    let Ok(canvas) = render_puzzle(&config, &fonts, TargetPosition::new(0, 0), RenderMode::Question)
    else {
        return;
    };

    let mut group = c.benchmark_group("encode");
    group.sample_size(20);
    group.bench_function("jpeg", |b| b.iter(|| encode(black_box(&canvas), ImageFormat::default())));
    group.bench_function("png", |b| b.iter(|| encode(black_box(&canvas), ImageFormat::Png)));
    group.finish();
}

criterion_group!(benches, bench_render, bench_encode);
criterion_main!(benches);
