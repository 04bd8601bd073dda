#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod dump;
pub mod geometry;
pub mod placement;
pub mod problem;

#[cfg(feature = "cli")]
pub use cli::run;
pub use config::{Config, load_config};
pub use geometry::{Point, Rect, overlaps};
pub use placement::{
    CancelFlag, PlacementError, PlacementOptions, PlacementOutcome, Placer, TextPlacement, place,
};
pub use problem::{PlacementProblem, TextRange};
