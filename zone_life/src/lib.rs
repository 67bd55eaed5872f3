//! Zone-aware Game of Life.
//!
//! The grid is split into a header strip, two inner UI boxes and the body
//! around them. Each zone wraps as its own torus; the body additionally
//! tunnels through the inner boxes so they never bias neighbor counts.

pub mod cells;
pub mod config;
pub mod engine;
pub mod error;
pub mod font;
pub mod geometry;
pub mod grid;
pub mod image_seed;
pub mod patterns;
pub mod seed;
pub mod topology;

pub use cells::{LiveCellSet, Pos, Rgb};
pub use config::LifeConfig;
pub use engine::{LifeEngine, StepReport};
pub use error::{ConfigError, EngineError, ImageSeedError};
pub use geometry::{classify_zone, compute_geometry, Geometry, Rect, Zone};
pub use topology::neighbor_coord;
