pub mod gesture;
pub mod transform;

pub use gesture::{PinchSession, TapTracker};
pub use transform::ViewTransform;
