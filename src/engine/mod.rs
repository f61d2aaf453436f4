//! Engine - scene-graph nodes and the notification contract between them.
//!
//! - [`node`] - node identity and the `LayoutNode` contract containers use
//! - [`observer`] - the parent-side `LayoutObserver` contract
//! - [`layout_text`] - the origin-aware text box

mod layout_text;
mod node;
mod observer;

pub use layout_text::{ClientRectConfig, LayoutChange, LayoutQuery, LayoutText, LayoutTextConfig};
pub use node::{LayoutNode, NodeId};
pub use observer::{Group, LayoutObserver};
