pub mod frame;
pub mod magnifier;
pub mod traits;

pub use frame::FrameSource;
pub use magnifier::{Magnifier, MagnifiedView, Placement};
pub use traits::PixelSource;
