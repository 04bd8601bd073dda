use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::hint::black_box;
use wordcloud_layout::placement::{CancelFlag, ObstacleGrid, Placer, boundary_correction};
use wordcloud_layout::{PlacementOptions, PlacementProblem, Point, Rect, TextRange};

fn cloud_problem(words: usize, canvas: Rect) -> PlacementProblem {
    let center = canvas.center();
    let mut anchors = Vec::with_capacity(words);
    let mut boxes = Vec::new();
    let mut texts = Vec::with_capacity(words);
    for w in 0..words {
        let t = w as f64;
        // larger words first, like a frequency-sorted cloud
        let height = 18.0 / (1.0 + t * 0.08) + 3.0;
        let glyphs = 3 + (w * 7) % 6;
        let glyph_w = height * 0.55;
        let total = glyph_w * glyphs as f64;
        anchors.push(center + Point::new((t * 0.9).sin() * 15.0, (t * 1.3).cos() * 9.0));
        let start = boxes.len();
        for g in 0..glyphs {
            let x1 = -total / 2.0 + g as f64 * glyph_w;
            boxes.push(Rect::new(x1, -height / 2.0, x1 + glyph_w, height / 2.0));
        }
        texts.push(TextRange::new(start, boxes.len()));
    }
    PlacementProblem::new(anchors, boxes, texts, canvas)
}

fn bench_place(c: &mut Criterion) {
    let mut group = c.benchmark_group("place");
    let placer = Placer::new(PlacementOptions::default()).expect("default options");
    for words in [25usize, 100, 250] {
        let problem = cloud_problem(words, Rect::new(0.0, 0.0, 400.0, 260.0));
        group.bench_with_input(BenchmarkId::from_parameter(words), &problem, |b, data| {
            b.iter(|| {
                let mut rng = StdRng::seed_from_u64(7);
                let outcome = placer
                    .place(black_box(data), &mut rng, &CancelFlag::new())
                    .expect("placement failed");
                black_box(outcome.unplaced());
            });
        });
    }
    group.finish();
}

fn bench_obstacle_grid(c: &mut Criterion) {
    let mut group = c.benchmark_group("obstacle_grid");
    for count in [100usize, 1000] {
        let mut grid = ObstacleGrid::new(12.0);
        for i in 0..count {
            let x = (i % 40) as f64 * 10.0;
            let y = (i / 40) as f64 * 8.0;
            grid.insert(Rect::new(x, y, x + 7.0, y + 5.0));
        }
        group.bench_with_input(BenchmarkId::from_parameter(count), &grid, |b, data| {
            b.iter(|| {
                let probe = Rect::new(101.0, 41.0, 108.0, 46.0);
                black_box(data.any_overlap(black_box(&probe)));
            });
        });
    }
    group.finish();
}

fn bench_boundary_correction(c: &mut Criterion) {
    let canvas = Rect::new(0.0, 0.0, 100.0, 100.0);
    let boxes: Vec<Rect> = (0..8)
        .map(|g| Rect::new(-12.0 + g as f64 * 4.0, 95.0, -8.0 + g as f64 * 4.0, 104.0))
        .collect();
    c.bench_function("boundary_correction", |b| {
        b.iter(|| black_box(boundary_correction(black_box(&boxes), &canvas)));
    });
}

criterion_group!(
    name = benches;
    config = Criterion::default();
    targets = bench_place, bench_obstacle_grid, bench_boundary_correction
);
criterion_main!(benches);
