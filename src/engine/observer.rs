//! Parent-side layout contract.
//!
//! A node holds a weak back-reference to its parent as `Weak<dyn LayoutObserver>`
//! and calls [`LayoutObserver::on_child_layout_invalidated`] after every
//! size-affecting mutation. Observers bubble the call to their own parent, so
//! every ancestor hears about it.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use tracing::trace;

use super::node::NodeId;

/// Receives layout invalidations from direct children.
pub trait LayoutObserver {
    /// A direct child changed size, padding, margin or origin.
    fn on_child_layout_invalidated(&self, child: NodeId);

    /// Whether this parent repositions its children itself.
    ///
    /// Children of a managed container skip the compensating move on origin
    /// change, the container re-layout places them instead.
    fn is_layout_container(&self) -> bool {
        false
    }
}

/// Upgrade a parent back-reference, dropping it silently if the parent is gone.
pub(crate) fn upgrade(parent: &Option<Weak<dyn LayoutObserver>>) -> Option<Rc<dyn LayoutObserver>> {
    parent.as_ref().and_then(Weak::upgrade)
}

// =============================================================================
// GROUP
// =============================================================================

/// Plain, unmanaged parent.
///
/// Does not position its children. It only counts invalidations and bubbles
/// them upward with its own id.
pub struct Group {
    id: NodeId,
    this: Weak<Group>,
    parent: RefCell<Option<Weak<dyn LayoutObserver>>>,
    invalidations: Cell<usize>,
}

impl Group {
    pub fn new() -> Rc<Self> {
        Rc::new_cyclic(|this| Self {
            id: NodeId::next(),
            this: this.clone(),
            parent: RefCell::new(None),
            invalidations: Cell::new(0),
        })
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Back-reference to hand to children.
    pub fn as_parent(&self) -> Weak<dyn LayoutObserver> {
        self.this.clone()
    }

    pub fn set_parent(&self, parent: Option<Weak<dyn LayoutObserver>>) {
        *self.parent.borrow_mut() = parent;
    }

    /// Number of invalidations received from children so far.
    pub fn invalidations(&self) -> usize {
        self.invalidations.get()
    }
}

impl LayoutObserver for Group {
    fn on_child_layout_invalidated(&self, child: NodeId) {
        self.invalidations.set(self.invalidations.get() + 1);
        trace!(group = %self.id, %child, "bubbling layout change");

        let parent = upgrade(&self.parent.borrow());
        if let Some(parent) = parent {
            parent.on_child_layout_invalidated(self.id);
        }
    }
}
