pub mod consts;
pub mod errors;
pub mod shape;
pub mod tracker;
pub mod filter;

pub use errors::{IndexError, Result};
pub use shape::Shape;
pub use tracker::{ArrayTracker, BitmapTracker, IndexTracker, TrackerCost, TrackerKind};
pub use filter::{IndexConsumer, IndexFilter};
