//! Layout Module
//!
//! Geometry building blocks for layout boxes.
//!
//! # Architecture
//!
//! 1. [`Spacing`] describes padding and margin insets
//! 2. [`Origin`] picks the pivot on a 3×3 grid, [`origin_offset`] turns it into a vector
//! 3. [`TextMeasure`] supplies content sizes
//! 4. [`LayoutStack`] is a managed container that positions children with
//!    Taffy flexbox

mod container;
mod origin;
mod spacing;
mod text_measure;

pub use container::{LayoutStack, StackAlign, StackConfig, StackDirection};
pub use origin::{origin_delta, origin_offset, Direction, Origin};
pub use spacing::Spacing;
pub use text_measure::{string_width, CellMeasure, TextMeasure};
