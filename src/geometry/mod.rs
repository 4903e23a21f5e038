pub mod quadrant;
pub mod sampling;
pub mod types;

pub use quadrant::{placement_quadrant, Padding, Quadrant};
pub use sampling::resolve;
pub use types::{Point, Resolution, SampleWindowSize, SamplingRect};
