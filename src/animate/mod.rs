//! Animation - tween driver and tweened text resize.
//!
//! - [`tween`] - frame sequence and interpolation helpers
//! - [`resize`] - text + width animation on a `LayoutText`

mod easing;
mod resize;
mod tween;

pub use easing::{ease_in_out_cubic, map};
pub use resize::{AnimationState, ResizeAnimation, ResizeFrames, RESIZE_DURATION};
pub use tween::{text_lerp, Tween, TweenValue, DEFAULT_FPS};
