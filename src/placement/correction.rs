use crate::geometry::{Point, Rect};

/// Shift that pulls a rigid group of boxes back inside the canvas.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Correction {
    pub shift: Point,
    /// Some box hangs off the low x edge while another hangs off the high x edge.
    pub conflict_x: bool,
    pub conflict_y: bool,
}

impl Correction {
    pub fn has_conflict(&self) -> bool {
        self.conflict_x || self.conflict_y
    }

    pub fn is_noop(&self) -> bool {
        self.shift == Point::ZERO
    }
}

/// Compute one shift per axis that fixes the boundary violations of every box
/// in `boxes` at once.
///
/// Boxes are scanned in order. A low-edge violation raises the shift to at
/// least the overhang, a high-edge violation lowers it to at most the negative
/// overhang. When both kinds occur on the same axis the result depends on box
/// order and cannot satisfy both; the matching `conflict_*` flag is set.
pub fn boundary_correction(boxes: &[Rect], canvas: &Rect) -> Correction {
    let mut shift = Point::ZERO;
    let (mut low_x, mut high_x, mut low_y, mut high_y) = (false, false, false, false);
    for b in boxes {
        if b.x1 < canvas.x1 {
            shift.x = (canvas.x1 - b.x1).max(shift.x);
            low_x = true;
        }
        if b.x2 > canvas.x2 {
            shift.x = (canvas.x2 - b.x2).min(shift.x);
            high_x = true;
        }
        if b.y1 < canvas.y1 {
            shift.y = (canvas.y1 - b.y1).max(shift.y);
            low_y = true;
        }
        if b.y2 > canvas.y2 {
            shift.y = (canvas.y2 - b.y2).min(shift.y);
            high_y = true;
        }
    }
    Correction {
        shift,
        conflict_x: low_x && high_x,
        conflict_y: low_y && high_y,
    }
}
