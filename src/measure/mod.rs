pub mod engine;
pub mod indicators;
pub mod scale;
pub mod session;

pub use engine::{measure, Length, MeasurementResult};
pub use scale::ScaleFactors;
pub use session::{MeasurementSession, Segment, SegmentReport};
