pub mod line;

pub use line::{LineIterator, rasterize};
