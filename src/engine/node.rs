//! Node identity and the node-side layout contract.

use std::fmt;
use std::rc::Weak;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::layout::Spacing;
use crate::types::{Rect, Size, Vector2};

use super::observer::LayoutObserver;

/// Stable identity of a scene-graph node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u64);

impl NodeId {
    /// Allocate a fresh id. Ids are never reused within a process.
    pub fn next() -> Self {
        static NEXT_ID: AtomicU64 = AtomicU64::new(1);
        Self(NEXT_ID.fetch_add(1, Ordering::Relaxed))
    }

    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// What a managed container needs from a child to lay it out.
///
/// Everything here is in the child's parent space except `local_rect` and
/// `offset`, which live in the child's own frame: the child's box top-left
/// sits at `position + (local_rect.xy - offset)`.
pub trait LayoutNode {
    fn id(&self) -> NodeId;

    /// Resolved box size including padding and minimum width.
    fn layout_size(&self) -> Size;

    /// Outer inset the container reserves around the box.
    fn layout_margin(&self) -> Spacing;

    /// Current pivot offset.
    fn offset(&self) -> Vector2;

    /// Untransformed box rect in the node's own frame.
    fn local_rect(&self) -> Rect;

    fn position(&self) -> Vector2;

    fn set_position(&mut self, position: Vector2);

    /// Attach to (or detach from) the observer that receives invalidations.
    fn set_parent(&mut self, parent: Option<Weak<dyn LayoutObserver>>);

    /// Called by the parent after it changed this node's placement.
    fn handle_layout_change(&mut self);
}
