use thiserror::Error;

/// Hard failures of a placement run. A text that cannot be placed is not an
/// error; it is reported through [`super::PlacementOutcome`].
#[derive(Debug, Error, Clone, PartialEq)]
pub enum PlacementError {
    #[error("placement cancelled after {completed} of {total} texts")]
    Cancelled { completed: usize, total: usize },

    #[error("invalid parameter `{name}`: {value} ({reason})")]
    InvalidParameter {
        name: &'static str,
        value: f64,
        reason: &'static str,
    },

    #[error("text {text} box range {start}..{end} is outside 0..{boxes}")]
    RangeOutOfBounds {
        text: usize,
        start: usize,
        end: usize,
        boxes: usize,
    },

    #[error("box ranges of texts {first} and {second} overlap")]
    OverlappingRanges { first: usize, second: usize },

    #[error("{what}: expected {expected} entries, got {actual}")]
    LengthMismatch {
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("canvas bounds must be finite")]
    NonFiniteCanvas,

    #[error("{what} {index} has a non-finite coordinate")]
    NonFiniteGeometry { what: &'static str, index: usize },

    #[error("box {index} has x1 > x2 or y1 > y2")]
    InvertedBox { index: usize },

    #[error("box {index} belongs to text {owner}, but that text's boxes were already closed")]
    UngroupedOwners { index: usize, owner: usize },

    #[error("text ranges must be given either as `texts` or as `owners`")]
    TextRangesUnspecified,

    #[error("box {index} references text {owner}, but only {texts} texts exist")]
    UnknownOwner {
        index: usize,
        owner: usize,
        texts: usize,
    },
}
