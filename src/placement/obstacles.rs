use crate::geometry::Rect;
use std::collections::{HashMap, HashSet};

/// Rects spanning more cells than this on either axis skip the grid and are
/// checked linearly.
const MAX_CELLS_PER_AXIS: i64 = 64;
/// Lower bound on the cell size relative to the canvas extent.
const MIN_CELLS_ACROSS_CANVAS: f64 = 256.0;

/// Committed obstacles: the final boxes of every text placed so far.
///
/// Boxes are bucketed into a uniform grid so a candidate only tests the
/// obstacles sharing a cell with it. Cell coverage uses closed intervals, so
/// boxes that merely touch always share a cell and the exact overlap test
/// still sees them.
#[derive(Debug, Clone)]
pub struct ObstacleGrid {
    cell: f64,
    rects: Vec<Rect>,
    /// Maps grid cell (ix, iy) to indices into `rects`.
    cells: HashMap<(i64, i64), Vec<usize>>,
    oversized: Vec<usize>,
}

impl ObstacleGrid {
    pub fn new(cell: f64) -> Self {
        let cell = if cell.is_finite() && cell > 0.0 { cell } else { 1.0 };
        Self {
            cell,
            rects: Vec::new(),
            cells: HashMap::new(),
            oversized: Vec::new(),
        }
    }

    /// Pick a cell size from the largest box extent, so a typical box covers
    /// at most two cells per axis.
    pub fn sized_for(offsets: &[Rect], canvas: &Rect) -> Self {
        let largest = offsets
            .iter()
            .map(|r| r.width().abs().max(r.height().abs()))
            .filter(|v| v.is_finite())
            .fold(0.0_f64, f64::max);
        let extent = canvas.width().abs().max(canvas.height().abs());
        let floor = if extent.is_finite() {
            extent / MIN_CELLS_ACROSS_CANVAS
        } else {
            0.0
        };
        Self::new(largest.max(floor))
    }

    pub fn len(&self) -> usize {
        self.rects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rects.is_empty()
    }

    fn cell_span(&self, rect: &Rect) -> (i64, i64, i64, i64) {
        let x0 = (rect.x1 / self.cell).floor() as i64;
        let y0 = (rect.y1 / self.cell).floor() as i64;
        let x1 = (rect.x2 / self.cell).floor() as i64;
        let y1 = (rect.y2 / self.cell).floor() as i64;
        (x0, y0, x1, y1)
    }

    fn is_oversized(span: (i64, i64, i64, i64)) -> bool {
        let (x0, y0, x1, y1) = span;
        x1.saturating_sub(x0) > MAX_CELLS_PER_AXIS || y1.saturating_sub(y0) > MAX_CELLS_PER_AXIS
    }

    pub fn insert(&mut self, rect: Rect) {
        let idx = self.rects.len();
        self.rects.push(rect);
        let span = self.cell_span(&rect);
        if Self::is_oversized(span) {
            self.oversized.push(idx);
            return;
        }
        let (x0, y0, x1, y1) = span;
        for ix in x0..=x1 {
            for iy in y0..=y1 {
                self.cells.entry((ix, iy)).or_default().push(idx);
            }
        }
    }

    /// Return indices of obstacles that could overlap with `rect`.
    pub fn query(&self, rect: &Rect) -> impl Iterator<Item = usize> + '_ {
        let span = self.cell_span(rect);
        let scan_all = Self::is_oversized(span);
        // empty cell range; the linear scan below covers everything
        let (x0, y0, x1, y1) = if scan_all { (1, 1, 0, 0) } else { span };
        let mut seen = HashSet::new();
        let bucketed = (x0..=x1)
            .flat_map(move |ix| (y0..=y1).map(move |iy| (ix, iy)))
            .flat_map(move |key| {
                self.cells
                    .get(&key)
                    .map(|v| v.as_slice())
                    .unwrap_or(&[])
                    .iter()
                    .copied()
            });
        let everything = (0..self.rects.len()).filter(move |_| scan_all);
        bucketed
            .chain(self.oversized.iter().copied())
            .chain(everything)
            .filter(move |idx| seen.insert(*idx))
    }

    /// True when `rect` overlaps any committed obstacle.
    pub fn any_overlap(&self, rect: &Rect) -> bool {
        self.query(rect).any(|i| self.rects[i].overlaps(rect))
    }
}
