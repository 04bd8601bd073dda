// Word-cloud label placement: each text walks an elliptical spiral around its
// anchor until its boxes fit on the canvas without touching any text placed
// before it.

mod correction;
mod error;
mod obstacles;
mod spiral;

pub use correction::{Correction, boundary_correction};
pub use error::PlacementError;
pub use obstacles::ObstacleGrid;
pub use spiral::{Spiral, radius_ceiling, search_ceiling};

use crate::geometry::{Point, Rect};
use crate::problem::{PlacementProblem, TextRange};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use std::f64::consts::TAU;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, trace, warn};

pub const DEFAULT_ECCENTRICITY: f64 = 0.65;
pub const DEFAULT_RADIUS_STEP: f64 = 0.1;
pub const DEFAULT_ANGLE_STEP: f64 = 0.05;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacementOptions {
    /// Vertical compression of the spiral relative to the horizontal axis.
    pub eccentricity: f64,
    /// Radius growth per step, as a fraction of the radius ceiling per turn.
    pub radius_step: f64,
    /// Angle increment per step, in turns.
    pub angle_step: f64,
    /// Report unplaced texts without a position instead of at their anchor.
    pub remove_outside: bool,
    pub seed: Option<u64>,
}

impl Default for PlacementOptions {
    fn default() -> Self {
        Self {
            eccentricity: DEFAULT_ECCENTRICITY,
            radius_step: DEFAULT_RADIUS_STEP,
            angle_step: DEFAULT_ANGLE_STEP,
            remove_outside: false,
            seed: None,
        }
    }
}

impl PlacementOptions {
    /// Replace NaN step sizes with their defaults.
    pub fn normalized(mut self) -> Self {
        if self.radius_step.is_nan() {
            self.radius_step = DEFAULT_RADIUS_STEP;
        }
        if self.angle_step.is_nan() {
            self.angle_step = DEFAULT_ANGLE_STEP;
        }
        self
    }

    pub fn validate(&self) -> Result<(), PlacementError> {
        let positive = [
            ("eccentricity", self.eccentricity),
            ("radius_step", self.radius_step),
            ("angle_step", self.angle_step),
        ];
        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(PlacementError::InvalidParameter {
                    name,
                    value,
                    reason: "must be finite and greater than zero",
                });
            }
        }
        Ok(())
    }
}

/// Cooperative cancellation, checked once per text before its search starts.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TextPlacement {
    pub anchor: Point,
    /// Accepted position; equals `anchor` when the text was not placed.
    pub position: Point,
    pub placed: bool,
    /// Spiral candidates evaluated for this text.
    pub attempts: usize,
}

#[derive(Debug, Clone)]
pub struct PlacementOutcome {
    texts: Vec<TextPlacement>,
    ranges: Vec<TextRange>,
    boxes: Vec<Rect>,
    remove_outside: bool,
}

impl PlacementOutcome {
    pub fn texts(&self) -> &[TextPlacement] {
        &self.texts
    }

    /// Emitted position per text. Unplaced texts yield `None` when
    /// `remove_outside` is set and their anchor otherwise.
    pub fn positions(&self) -> Vec<Option<Point>> {
        self.texts
            .iter()
            .map(|t| {
                if t.placed || !self.remove_outside {
                    Some(t.position)
                } else {
                    None
                }
            })
            .collect()
    }

    pub fn unplaced(&self) -> usize {
        self.texts.iter().filter(|t| !t.placed).count()
    }

    /// Final absolute boxes of a placed text.
    pub fn boxes(&self, text: usize) -> Option<&[Rect]> {
        let placement = self.texts.get(text)?;
        if !placement.placed {
            return None;
        }
        self.boxes.get(self.ranges[text].indices())
    }

    pub fn advisory(&self) -> Option<&'static str> {
        advisory_message(self.unplaced(), self.remove_outside)
    }
}

fn advisory_message(unplaced: usize, remove_outside: bool) -> Option<&'static str> {
    match (unplaced, remove_outside) {
        (0, _) => None,
        (1, true) => Some("One word could not fit on page. It has been removed."),
        (1, false) => {
            Some("One word could not fit on page. It has been placed at its original position.")
        }
        (_, true) => Some("Some words could not fit on page. They have been removed."),
        (_, false) => Some(
            "Some words could not fit on page. They have been placed at their original positions.",
        ),
    }
}

#[derive(Debug, Clone)]
pub struct Placer {
    options: PlacementOptions,
}

impl Placer {
    pub fn new(options: PlacementOptions) -> Result<Self, PlacementError> {
        let options = options.normalized();
        options.validate()?;
        Ok(Self { options })
    }

    pub fn options(&self) -> &PlacementOptions {
        &self.options
    }

    /// Place every text of `problem` in index order.
    ///
    /// Each text draws its starting angle from `rng`, so a seeded generator
    /// gives reproducible layouts. `cancel` is polled before each text.
    pub fn place<R: Rng>(
        &self,
        problem: &PlacementProblem,
        rng: &mut R,
        cancel: &CancelFlag,
    ) -> Result<PlacementOutcome, PlacementError> {
        problem.validate()?;
        let canvas = problem.canvas;
        let ceiling = search_ceiling(&canvas, self.options.eccentricity);
        let total = problem.text_count();

        // absolute boxes; a text's slots are meaningful only once it is placed
        let mut arena = vec![Rect::default(); problem.box_count()];
        let mut committed = ObstacleGrid::sized_for(&problem.boxes, &canvas);
        let mut texts = Vec::with_capacity(total);

        for (i, (&anchor, &range)) in problem.anchors.iter().zip(&problem.texts).enumerate() {
            if cancel.is_cancelled() {
                return Err(PlacementError::Cancelled {
                    completed: i,
                    total,
                });
            }
            let spiral = Spiral::new(
                rng.gen_range(0.0..TAU),
                ceiling,
                self.options.eccentricity,
                self.options.radius_step,
                self.options.angle_step,
            );
            let search = TextSearch {
                offsets: &problem.boxes[range.indices()],
                boxes: &mut arena[range.indices()],
                canvas: &canvas,
                committed: &committed,
            };
            let (found, attempts) = search.run(i, anchor, spiral);
            if found.is_some() {
                for rect in &arena[range.indices()] {
                    committed.insert(*rect);
                }
            }
            debug!(text = i, attempts, placed = found.is_some(), "text search finished");
            texts.push(TextPlacement {
                anchor,
                position: found.unwrap_or(anchor),
                placed: found.is_some(),
                attempts,
            });
        }

        debug!(obstacles = committed.len(), "placement finished");
        let outcome = PlacementOutcome {
            texts,
            ranges: problem.texts.clone(),
            boxes: arena,
            remove_outside: self.options.remove_outside,
        };
        if let Some(message) = outcome.advisory() {
            warn!(unplaced = outcome.unplaced(), "{message}");
        }
        Ok(outcome)
    }
}

/// Run a placement with a generator seeded from `options.seed`, or from
/// entropy when no seed is set.
pub fn place(
    problem: &PlacementProblem,
    options: PlacementOptions,
) -> Result<PlacementOutcome, PlacementError> {
    let mut rng = match options.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    Placer::new(options)?.place(problem, &mut rng, &CancelFlag::new())
}

/// Spiral search for a single text against the committed obstacles.
struct TextSearch<'a> {
    offsets: &'a [Rect],
    /// This text's slots in the working arena, rewritten per candidate.
    boxes: &'a mut [Rect],
    canvas: &'a Rect,
    committed: &'a ObstacleGrid,
}

impl TextSearch<'_> {
    fn run(mut self, text: usize, anchor: Point, mut spiral: Spiral) -> (Option<Point>, usize) {
        let mut attempts = 0;
        while !spiral.exhausted() {
            attempts += 1;
            if let Some(position) = self.try_candidate(text, anchor + spiral.displacement()) {
                return (Some(position), attempts);
            }
            spiral.advance();
        }
        (None, attempts)
    }

    /// Translate the boxes to `candidate`, correct them into the canvas and
    /// test them. Returns the corrected position when nothing collides.
    fn try_candidate(&mut self, text: usize, candidate: Point) -> Option<Point> {
        let mut on_canvas = false;
        for (slot, offsets) in self.boxes.iter_mut().zip(self.offsets) {
            *slot = Rect::from_offsets(candidate, offsets);
            on_canvas |= slot.overlaps(self.canvas);
        }
        if !on_canvas {
            return None;
        }

        let correction = boundary_correction(self.boxes, self.canvas);
        if correction.has_conflict() {
            trace!(
                text,
                conflict_x = correction.conflict_x,
                conflict_y = correction.conflict_y,
                "boxes overhang opposite canvas edges"
            );
        }
        for slot in self.boxes.iter_mut() {
            *slot += correction.shift;
        }

        let collides = !self.committed.is_empty()
            && self.boxes.iter().any(|b| self.committed.any_overlap(b));
        if collides {
            None
        } else {
            Some(candidate + correction.shift)
        }
    }
}
