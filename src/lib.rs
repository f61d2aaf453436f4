//! # layout-text
//!
//! Origin-aware layout geometry and tweened text resizing for a node in a 2D
//! scene graph.
//!
//! ## Architecture
//!
//! A [`LayoutText`] resolves its box size from measured content, padding and
//! an explicit minimum width, derives a pivot offset from a symbolic
//! [`Origin`], and tells its parent whenever that geometry changes:
//!
//! ```text
//! text / padd / margin / origin ──▶ resolve_size ──▶ resolve_origin_offset
//!                                                         │
//!                        parent.on_child_layout_invalidated ◀┘
//! ```
//!
//! Text measurement, parent containers and the frame scheduler are
//! collaborators behind traits and iterators, so the geometry stays a pure
//! function of the node's state.
//!
//! ## Modules
//!
//! - [`types`] - Vectors, sizes, rects, transforms, colors
//! - [`layout`] - Spacing, origins, text measurement, the Taffy-backed stack
//! - [`engine`] - Node identity, observer contract, `LayoutText`
//! - [`animate`] - Tween driver and the text resize animation
//! - [`error`] - Parse and layout errors

pub mod animate;
pub mod engine;
pub mod error;
pub mod layout;
pub mod types;

pub use types::*;

pub use engine::{
    ClientRectConfig, Group, LayoutChange, LayoutNode, LayoutObserver, LayoutQuery, LayoutText,
    LayoutTextConfig, NodeId,
};

pub use layout::{
    origin_delta, origin_offset, string_width, CellMeasure, Direction, LayoutStack, Origin,
    Spacing, StackAlign, StackConfig, StackDirection, TextMeasure,
};

pub use animate::{
    ease_in_out_cubic, text_lerp, AnimationState, ResizeAnimation, ResizeFrames, Tween,
    TweenValue, DEFAULT_FPS, RESIZE_DURATION,
};

pub use error::{LayoutError, ParseColorError, ParseOriginError};
