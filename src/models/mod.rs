pub mod segment;
pub mod sentiment;

pub use segment::*;
pub use sentiment::*;
