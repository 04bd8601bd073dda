use crate::geometry::{Point, Rect};
use crate::placement::PlacementError;
use serde::{Deserialize, Serialize};
use std::ops::Range;

/// Half-open range of sub-box indices owned by one text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextRange {
    pub start: usize,
    pub end: usize,
}

impl TextRange {
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn indices(&self) -> Range<usize> {
        self.start..self.end
    }
}

/// Everything a placement run needs: one anchor and one box range per text,
/// the shared table of box offsets, and the canvas.
///
/// Box offsets are relative to the anchor of the owning text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacementProblem {
    pub anchors: Vec<Point>,
    pub boxes: Vec<Rect>,
    pub texts: Vec<TextRange>,
    pub canvas: Rect,
}

impl PlacementProblem {
    pub fn new(anchors: Vec<Point>, boxes: Vec<Rect>, texts: Vec<TextRange>, canvas: Rect) -> Self {
        Self {
            anchors,
            boxes,
            texts,
            canvas,
        }
    }

    /// Build the text ranges from a per-box owner vector. Each text's boxes
    /// must be contiguous; texts that own no box get an empty range.
    pub fn from_box_owners(
        anchors: Vec<Point>,
        boxes: Vec<Rect>,
        owners: &[usize],
        canvas: Rect,
    ) -> Result<Self, PlacementError> {
        if owners.len() != boxes.len() {
            return Err(PlacementError::LengthMismatch {
                what: "box owners",
                expected: boxes.len(),
                actual: owners.len(),
            });
        }
        let mut texts: Vec<Option<TextRange>> = vec![None; anchors.len()];
        let mut current: Option<usize> = None;
        for (index, &owner) in owners.iter().enumerate() {
            let Some(slot) = texts.get_mut(owner) else {
                return Err(PlacementError::UnknownOwner {
                    index,
                    owner,
                    texts: anchors.len(),
                });
            };
            match slot {
                Some(range) if current == Some(owner) => range.end = index + 1,
                Some(_) => return Err(PlacementError::UngroupedOwners { index, owner }),
                None => *slot = Some(TextRange::new(index, index + 1)),
            }
            current = Some(owner);
        }
        let texts = texts.into_iter().map(Option::unwrap_or_default).collect();
        Ok(Self::new(anchors, boxes, texts, canvas))
    }

    /// Canvas from `[xmin, xmax]` and `[ymin, ymax]` limits.
    pub fn canvas_from_limits(xlim: [f64; 2], ylim: [f64; 2]) -> Rect {
        Rect::new(xlim[0], ylim[0], xlim[1], ylim[1])
    }

    pub fn text_count(&self) -> usize {
        self.texts.len()
    }

    pub fn box_count(&self) -> usize {
        self.boxes.len()
    }

    /// Check the structural contract before any state is touched.
    pub fn validate(&self) -> Result<(), PlacementError> {
        if self.anchors.len() != self.texts.len() {
            return Err(PlacementError::LengthMismatch {
                what: "anchors",
                expected: self.texts.len(),
                actual: self.anchors.len(),
            });
        }
        if !self.canvas.is_finite() {
            return Err(PlacementError::NonFiniteCanvas);
        }
        if let Some(index) = self.anchors.iter().position(|p| !p.is_finite()) {
            return Err(PlacementError::NonFiniteGeometry {
                what: "anchor",
                index,
            });
        }
        if let Some(index) = self.boxes.iter().position(|r| !r.is_finite()) {
            return Err(PlacementError::NonFiniteGeometry { what: "box", index });
        }
        if let Some(index) = self.boxes.iter().position(|r| r.x1 > r.x2 || r.y1 > r.y2) {
            return Err(PlacementError::InvertedBox { index });
        }

        let n_boxes = self.boxes.len();
        for (text, range) in self.texts.iter().enumerate() {
            if range.start > range.end || range.end > n_boxes {
                return Err(PlacementError::RangeOutOfBounds {
                    text,
                    start: range.start,
                    end: range.end,
                    boxes: n_boxes,
                });
            }
        }

        let mut order: Vec<usize> = (0..self.texts.len())
            .filter(|&i| !self.texts[i].is_empty())
            .collect();
        order.sort_by_key(|&i| self.texts[i].start);
        for pair in order.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            if self.texts[b].start < self.texts[a].end {
                return Err(PlacementError::OverlappingRanges {
                    first: a.min(b),
                    second: a.max(b),
                });
            }
        }
        Ok(())
    }
}

/// On-disk problem layout. Text ranges are given either directly as `texts`
/// or derived from a per-box `owners` vector.
#[derive(Debug, Clone, Deserialize)]
pub struct ProblemFile {
    pub anchors: Vec<Point>,
    pub boxes: Vec<Rect>,
    #[serde(default)]
    pub texts: Option<Vec<TextRange>>,
    #[serde(default)]
    pub owners: Option<Vec<usize>>,
    pub canvas: Rect,
}

impl ProblemFile {
    pub fn into_problem(self) -> Result<PlacementProblem, PlacementError> {
        match (self.texts, self.owners) {
            (Some(texts), None) => Ok(PlacementProblem::new(
                self.anchors,
                self.boxes,
                texts,
                self.canvas,
            )),
            (None, Some(owners)) => {
                PlacementProblem::from_box_owners(self.anchors, self.boxes, &owners, self.canvas)
            }
            _ => Err(PlacementError::TextRangesUnspecified),
        }
    }
}
