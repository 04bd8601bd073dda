use std::path::Path;

use rand::SeedableRng;
use rand::rngs::StdRng;
use wordcloud_layout::placement::CancelFlag;
use wordcloud_layout::problem::ProblemFile;
use wordcloud_layout::{
    PlacementOptions, PlacementOutcome, PlacementProblem, Placer, Point, Rect, TextRange, overlaps,
};

fn load_fixture(rel: &str) -> PlacementProblem {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(rel);
    assert!(path.exists(), "fixture missing: {}", rel);
    let input = std::fs::read_to_string(&path).expect("fixture read failed");
    let file: ProblemFile = serde_json::from_str(&input).expect("fixture parse failed");
    file.into_problem().expect("fixture ranges invalid")
}

fn run(problem: &PlacementProblem, options: PlacementOptions, seed: u64) -> PlacementOutcome {
    let placer = Placer::new(options).expect("valid options");
    let mut rng = StdRng::seed_from_u64(seed);
    placer
        .place(problem, &mut rng, &CancelFlag::new())
        .expect("placement failed")
}

fn assert_placed_texts_disjoint(outcome: &PlacementOutcome, fixture: &str) {
    let n = outcome.texts().len();
    for i in 0..n {
        let Some(a) = outcome.boxes(i) else { continue };
        for j in (i + 1)..n {
            let Some(b) = outcome.boxes(j) else { continue };
            for ra in a {
                for rb in b {
                    assert!(
                        !overlaps(ra, rb),
                        "{fixture}: texts {i} and {j} overlap ({ra:?} vs {rb:?})"
                    );
                }
            }
        }
    }
}

/// Deterministic pseudo word cloud: many words, several glyph boxes each,
/// anchors clustered around the canvas center.
fn synthetic_cloud(words: usize, canvas: Rect) -> PlacementProblem {
    let center = canvas.center();
    let mut anchors = Vec::with_capacity(words);
    let mut boxes = Vec::new();
    let mut texts = Vec::with_capacity(words);
    for w in 0..words {
        let t = w as f64;
        anchors.push(center + Point::new((t * 1.7).sin() * 20.0, (t * 2.3).cos() * 12.0));
        let glyphs = 2 + w % 5;
        let height = 4.0 + (w % 3) as f64 * 2.0;
        let glyph_w = height * 0.6;
        let start = boxes.len();
        let total = glyph_w * glyphs as f64;
        for g in 0..glyphs {
            let x1 = -total / 2.0 + g as f64 * glyph_w;
            boxes.push(Rect::new(x1, -height / 2.0, x1 + glyph_w, height / 2.0));
        }
        texts.push(TextRange::new(start, boxes.len()));
    }
    PlacementProblem::new(anchors, boxes, texts, canvas)
}

#[test]
fn place_all_fixtures() {
    // Keep this list explicit so new fixtures must be added intentionally.
    let candidates = [
        "two_squares.json",
        "off_canvas.json",
        "glyph_words.json",
        "crowded.json",
    ];

    for rel in candidates {
        let problem = load_fixture(rel);
        for seed in 0..4 {
            let outcome = run(&problem, PlacementOptions::default(), seed);
            assert_eq!(outcome.texts().len(), problem.text_count(), "{rel}");
            assert_placed_texts_disjoint(&outcome, rel);
            for (i, text) in outcome.texts().iter().enumerate() {
                if let Some(rects) = outcome.boxes(i) {
                    assert!(text.placed);
                    for rect in rects {
                        assert!(
                            rect.contained_in(&problem.canvas),
                            "{rel}: text {i} left the canvas: {rect:?}"
                        );
                    }
                }
            }
        }
    }
}

#[test]
fn two_overlapping_squares_both_place() {
    let problem = load_fixture("two_squares.json");
    let outcome = run(&problem, PlacementOptions::default(), 17);
    let texts = outcome.texts();
    assert!(texts[0].placed && texts[1].placed);
    assert_eq!(texts[0].position, Point::new(0.0, 0.0));
    assert_ne!(texts[1].position, Point::new(5.0, 5.0));
    assert_eq!(outcome.unplaced(), 0);
}

#[test]
fn off_canvas_text_is_pulled_inside() {
    let problem = load_fixture("off_canvas.json");
    for seed in 0..4 {
        let text = run(&problem, PlacementOptions::default(), seed).texts()[0];
        assert!(text.placed);
        // the box at the anchor misses the canvas entirely and is not corrected
        assert!(text.attempts > 1, "seed {seed}: attempts = {}", text.attempts);
    }
    let outcome = run(&problem, PlacementOptions::default(), 4);
    assert!(outcome.texts()[0].placed);
    let rect = outcome.boxes(0).expect("placed text has boxes")[0];
    assert!(rect.contained_in(&Rect::new(0.0, 0.0, 10.0, 10.0)), "{rect:?}");
}

#[test]
fn glyph_words_move_as_rigid_units() {
    let problem = load_fixture("glyph_words.json");
    let outcome = run(&problem, PlacementOptions::default(), 8);
    for (i, text) in outcome.texts().iter().enumerate() {
        let Some(rects) = outcome.boxes(i) else { continue };
        let range = problem.texts[i];
        for (rect, offsets) in rects.iter().zip(&problem.boxes[range.indices()]) {
            let expected = *offsets + text.position;
            for (got, want) in [
                (rect.x1, expected.x1),
                (rect.y1, expected.y1),
                (rect.x2, expected.x2),
                (rect.y2, expected.y2),
            ] {
                assert!((got - want).abs() < 1e-9, "text {i}: {rect:?} vs {expected:?}");
            }
        }
    }
    // the word hanging off the top-right corner is corrected, not dropped
    assert!(outcome.texts()[3].placed);
}

#[test]
fn crowded_canvas_honours_remove_outside() {
    let problem = load_fixture("crowded.json");

    let kept = run(&problem, PlacementOptions::default(), 1);
    assert_eq!(kept.unplaced(), 2);
    for (text, pos) in kept.texts().iter().zip(kept.positions()) {
        assert_eq!(pos, Some(text.position));
        if !text.placed {
            assert_eq!(text.position, text.anchor);
        }
    }

    let removed = run(
        &problem,
        PlacementOptions {
            remove_outside: true,
            ..Default::default()
        },
        1,
    );
    for (text, pos) in removed.texts().iter().zip(removed.positions()) {
        assert_eq!(pos.is_none(), !text.placed);
    }
}

#[test]
fn synthetic_cloud_has_no_overlaps() {
    let problem = synthetic_cloud(40, Rect::new(0.0, 0.0, 200.0, 140.0));
    let outcome = run(&problem, PlacementOptions::default(), 2024);
    assert_placed_texts_disjoint(&outcome, "synthetic");
    assert!(
        outcome.unplaced() < problem.text_count() / 4,
        "too many unplaced: {}",
        outcome.unplaced()
    );
}

#[test]
fn seeded_runs_match() {
    let problem = synthetic_cloud(30, Rect::new(0.0, 0.0, 120.0, 80.0));
    let a = run(&problem, PlacementOptions::default(), 99);
    let b = run(&problem, PlacementOptions::default(), 99);
    assert_eq!(a.texts(), b.texts());
}
