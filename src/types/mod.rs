pub mod constants;
pub mod error;
pub mod geometry;
pub mod info;

pub use constants::*;
pub use error::MapError;
pub use geometry::{GridBounds, MapPoint, ProjectedPoint};
pub use info::MapInfo;
