//! LayoutStack - a managed container backed by Taffy.
//!
//! The stack owns the placement of its children. Children report
//! `is_layout_container() == true` through their parent back-reference, so
//! an origin change on a child does not self-compensate; the next
//! [`LayoutStack::layout`] call puts it back in its slot instead.
//!
//! Invalidations from children only mark the stack dirty and bubble upward.
//! The re-layout itself is explicit, because a child that is mid-mutation is
//! still borrowed when it notifies.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use taffy::{
    AlignItems as TaffyAlignItems, AvailableSpace, Dimension as TaffyDimension, Display,
    FlexDirection as TaffyFlexDirection, LengthPercentage, LengthPercentageAuto,
    Rect as TaffyRect, Size as TaffySize, Style, TaffyTree,
};
use tracing::debug;

use crate::engine::{LayoutNode, LayoutObserver, NodeId};
use crate::error::LayoutError;
use crate::types::{Size, Vector2};

use super::spacing::Spacing;

// =============================================================================
// CONFIG
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StackDirection {
    #[default]
    Row,
    Column,
}

/// Cross-axis alignment of children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StackAlign {
    #[default]
    Start,
    Center,
    End,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct StackConfig {
    pub direction: StackDirection,
    pub gap: f32,
    pub padding: Spacing,
    pub align: StackAlign,
}

fn to_taffy_direction(direction: StackDirection) -> TaffyFlexDirection {
    match direction {
        StackDirection::Row => TaffyFlexDirection::Row,
        StackDirection::Column => TaffyFlexDirection::Column,
    }
}

fn to_taffy_align(align: StackAlign) -> TaffyAlignItems {
    match align {
        StackAlign::Start => TaffyAlignItems::FlexStart,
        StackAlign::Center => TaffyAlignItems::Center,
        StackAlign::End => TaffyAlignItems::FlexEnd,
    }
}

/// Fixed-size leaf: children are never stretched or shrunk by the stack.
fn leaf_style(size: Size, margin: Spacing) -> Style {
    Style {
        display: Display::Flex,
        flex_shrink: 0.0,
        size: TaffySize {
            width: TaffyDimension::Length(size.width),
            height: TaffyDimension::Length(size.height),
        },
        margin: TaffyRect {
            top: LengthPercentageAuto::Length(margin.top),
            right: LengthPercentageAuto::Length(margin.right),
            bottom: LengthPercentageAuto::Length(margin.bottom),
            left: LengthPercentageAuto::Length(margin.left),
        },
        ..Style::default()
    }
}

// =============================================================================
// STACK
// =============================================================================

#[derive(Clone)]
struct StackChild {
    id: NodeId,
    node: Rc<RefCell<dyn LayoutNode>>,
}

pub struct LayoutStack {
    id: NodeId,
    this: Weak<LayoutStack>,
    config: StackConfig,
    children: RefCell<Vec<StackChild>>,
    parent: RefCell<Option<Weak<dyn LayoutObserver>>>,
    dirty: Cell<bool>,
    size: Cell<Size>,
}

impl LayoutStack {
    pub fn new(config: StackConfig) -> Rc<Self> {
        Rc::new_cyclic(|this| Self {
            id: NodeId::next(),
            this: this.clone(),
            config,
            children: RefCell::new(Vec::new()),
            parent: RefCell::new(None),
            dirty: Cell::new(false),
            size: Cell::new(Size::ZERO),
        })
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn config(&self) -> &StackConfig {
        &self.config
    }

    /// Back-reference to hand to children.
    pub fn as_parent(&self) -> Weak<dyn LayoutObserver> {
        self.this.clone()
    }

    pub fn set_parent(&self, parent: Option<Weak<dyn LayoutObserver>>) {
        *self.parent.borrow_mut() = parent;
    }

    /// Append a child and adopt it.
    pub fn add_child(&self, node: Rc<RefCell<dyn LayoutNode>>) {
        let id = {
            let mut child = node.borrow_mut();
            child.set_parent(Some(self.as_parent()));
            child.id()
        };
        self.children.borrow_mut().push(StackChild { id, node });
        self.invalidate();
    }

    /// Detach a child. Returns it if it was present.
    ///
    /// A child that is currently borrowed cannot be told it lost its parent,
    /// so it stays in the stack and the call fails.
    pub fn remove_child(
        &self,
        id: NodeId,
    ) -> Result<Option<Rc<RefCell<dyn LayoutNode>>>, LayoutError> {
        let removed = {
            let mut children = self.children.borrow_mut();
            let Some(index) = children.iter().position(|c| c.id == id) else {
                return Ok(None);
            };
            children[index]
                .node
                .try_borrow_mut()
                .map_err(|_| LayoutError::ChildBorrowed(id))?
                .set_parent(None);
            children.remove(index)
        };
        self.invalidate();
        Ok(Some(removed.node))
    }

    pub fn len(&self) -> usize {
        self.children.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.borrow().is_empty()
    }

    /// Whether a child changed since the last [`layout`](Self::layout).
    pub fn is_dirty(&self) -> bool {
        self.dirty.get()
    }

    /// Size computed by the last layout pass.
    pub fn size(&self) -> Size {
        self.size.get()
    }

    /// Lay the children out and move each one into its slot.
    ///
    /// A slot is the child's resolved box plus margin. The child is
    /// positioned so its box's top-left corner lands on the slot, whatever its
    /// origin, and then gets `handle_layout_change`.
    pub fn layout(&self) -> Result<Size, LayoutError> {
        // Hooks run below may add or remove children.
        let children = self.children.borrow().clone();

        let mut tree: TaffyTree<()> = TaffyTree::new();
        let mut leaves = Vec::with_capacity(children.len());
        for child in children.iter() {
            let node = child
                .node
                .try_borrow()
                .map_err(|_| LayoutError::ChildBorrowed(child.id))?;
            leaves.push(tree.new_leaf(leaf_style(node.layout_size(), node.layout_margin()))?);
        }

        let root = tree.new_with_children(self.root_style(), &leaves)?;
        let available = TaffySize {
            width: AvailableSpace::MaxContent,
            height: AvailableSpace::MaxContent,
        };
        tree.compute_layout(root, available)?;
        self.dirty.set(false);

        for (child, &leaf) in children.iter().zip(&leaves) {
            let location = tree.layout(leaf)?.location;
            let mut node = child
                .node
                .try_borrow_mut()
                .map_err(|_| LayoutError::ChildBorrowed(child.id))?;

            let rect = node.local_rect();
            let offset = node.offset();
            node.set_position(Vector2::new(
                location.x - (rect.x - offset.x),
                location.y - (rect.y - offset.y),
            ));
            node.handle_layout_change();
        }

        let root_size = tree.layout(root)?.size;
        let size = Size::new(root_size.width, root_size.height);
        self.size.set(size);
        debug!(stack = %self.id, children = children.len(), width = size.width, height = size.height, "stack laid out");
        Ok(size)
    }

    fn root_style(&self) -> Style {
        let StackConfig {
            direction,
            gap,
            padding,
            align,
        } = self.config;

        Style {
            display: Display::Flex,
            flex_direction: to_taffy_direction(direction),
            align_items: Some(to_taffy_align(align)),
            gap: TaffySize {
                width: LengthPercentage::Length(gap),
                height: LengthPercentage::Length(gap),
            },
            padding: TaffyRect {
                top: LengthPercentage::Length(padding.top),
                right: LengthPercentage::Length(padding.right),
                bottom: LengthPercentage::Length(padding.bottom),
                left: LengthPercentage::Length(padding.left),
            },
            ..Style::default()
        }
    }

    fn invalidate(&self) {
        self.dirty.set(true);
        let parent = self.parent.borrow().as_ref().and_then(Weak::upgrade);
        if let Some(parent) = parent {
            parent.on_child_layout_invalidated(self.id);
        }
    }
}

impl LayoutObserver for LayoutStack {
    fn on_child_layout_invalidated(&self, child: NodeId) {
        debug!(stack = %self.id, %child, "child layout invalidated");
        self.invalidate();
    }

    fn is_layout_container(&self) -> bool {
        true
    }
}
