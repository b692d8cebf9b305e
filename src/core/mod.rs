pub mod mapper;
pub mod range;
pub mod spring;
pub mod types;

pub use range::{RangeThrottle, RangeTuning};
pub use spring::{Spring, SpringTuning};
pub use types::{CanvasSize, Series, Timeline, Viewport};
