//! Tweened text resize.
//!
//! [`ResizeAnimation`] morphs a node's text while its box width eases from
//! the old content width to the new one. The width is frozen at the start
//! value the moment the animation is created, so there is no one-frame snap
//! before the first step runs.
//!
//! # States
//!
//! ```text
//! Idle ──step──▶ Running ──last frame──▶ Completed
//!   │               │
//!   └────cancel─────┴──────────────────▶ Cancelled
//! ```
//!
//! Completion and cancellation both clear the override width and set the
//! text to exactly the target string.
//!
//! The animation does not borrow the node, so it can be driven through a
//! `RefCell` one frame at a time. [`ResizeFrames`] is the borrowing variant
//! returned by `LayoutText::animate_text`; it cancels itself when dropped
//! before the last frame.

use tracing::{debug, trace};

use crate::engine::{LayoutQuery, LayoutText, NodeId};
use crate::layout::TextMeasure;

use super::tween::{Tween, TweenValue, DEFAULT_FPS};

/// Duration of a text resize, in time units.
pub const RESIZE_DURATION: f32 = 3.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationState {
    /// Created, width frozen, no frame applied yet.
    Idle,
    Running,
    Completed,
    Cancelled,
}

#[derive(Debug, Clone)]
pub struct ResizeAnimation {
    node: NodeId,
    from_text: String,
    to_text: String,
    from_width: f32,
    to_width: f32,
    tween: Tween,
    state: AnimationState,
}

impl ResizeAnimation {
    /// Begin animating `node` towards `text` over [`RESIZE_DURATION`].
    pub fn start<M: TextMeasure>(node: &mut LayoutText<M>, text: impl Into<String>) -> Self {
        Self::with_tween(node, text, Tween::new(RESIZE_DURATION, DEFAULT_FPS))
    }

    pub fn with_tween<M: TextMeasure>(
        node: &mut LayoutText<M>,
        text: impl Into<String>,
        tween: Tween,
    ) -> Self {
        let to_text = text.into();
        let from_text = node.text().to_string();
        let from_width = node.resolve_size_with(&LayoutQuery::new().min_width(0.0)).width;
        let to_width = node
            .resolve_size_with(&LayoutQuery::new().text(&to_text).min_width(0.0))
            .width;

        node.set_override_width(Some(from_width));
        debug!(node = %node.id(), from = %from_text, to = %to_text, from_width, to_width, "resize animation started");

        Self {
            node: node.id(),
            from_text,
            to_text,
            from_width,
            to_width,
            tween,
            state: AnimationState::Idle,
        }
    }

    pub fn state(&self) -> AnimationState {
        self.state
    }

    pub fn is_finished(&self) -> bool {
        matches!(self.state, AnimationState::Completed | AnimationState::Cancelled)
    }

    pub fn target_text(&self) -> &str {
        &self.to_text
    }

    /// Start and end widths, measured without min width.
    pub fn widths(&self) -> (f32, f32) {
        (self.from_width, self.to_width)
    }

    /// Apply one interpolation value to the node.
    pub fn step<M: TextMeasure>(&mut self, node: &mut LayoutText<M>, value: &TweenValue) {
        debug_assert_eq!(node.id(), self.node, "resize animation driven on a different node");
        if self.is_finished() {
            return;
        }
        self.state = AnimationState::Running;

        let width = value.ease_in_out_cubic_between(self.from_width, self.to_width);
        node.set_override_width(Some(width));
        node.set_text(value.text(&self.from_text, &self.to_text, value.ease_in_out_cubic()));
        trace!(node = %self.node, progress = value.progress(), width, "resize frame");
    }

    /// Run the next frame. Returns `None` once the animation is over; the
    /// frame that reaches progress 1 also completes it.
    pub fn advance<M: TextMeasure>(&mut self, node: &mut LayoutText<M>) -> Option<TweenValue> {
        if self.is_finished() {
            return None;
        }

        let Some(value) = self.tween.next() else {
            self.finish(node);
            return None;
        };

        self.step(node, &value);
        if self.tween.is_finished() {
            self.finish(node);
        }
        Some(value)
    }

    /// Drive every remaining frame.
    pub fn run<M: TextMeasure>(&mut self, node: &mut LayoutText<M>) {
        while self.advance(node).is_some() {}
    }

    /// Stop early. Clears the override width and snaps to the target text.
    pub fn cancel<M: TextMeasure>(&mut self, node: &mut LayoutText<M>) {
        if self.is_finished() {
            return;
        }
        self.settle(node);
        self.state = AnimationState::Cancelled;
        debug!(node = %self.node, "resize animation cancelled");
    }

    fn finish<M: TextMeasure>(&mut self, node: &mut LayoutText<M>) {
        self.settle(node);
        self.state = AnimationState::Completed;
        debug!(node = %self.node, "resize animation completed");
    }

    fn settle<M: TextMeasure>(&mut self, node: &mut LayoutText<M>) {
        node.set_override_width(None);
        node.set_text(self.to_text.clone());
    }
}

// =============================================================================
// BORROWING DRIVER
// =============================================================================

/// Frame iterator over a resize animation that holds the node.
pub struct ResizeFrames<'a, M: TextMeasure> {
    node: &'a mut LayoutText<M>,
    animation: ResizeAnimation,
}

impl<'a, M: TextMeasure> ResizeFrames<'a, M> {
    pub(crate) fn new(node: &'a mut LayoutText<M>, animation: ResizeAnimation) -> Self {
        Self { node, animation }
    }

    /// The node as it looks between frames.
    pub fn node(&self) -> &LayoutText<M> {
        &*self.node
    }

    pub fn state(&self) -> AnimationState {
        self.animation.state()
    }

    /// Stop now instead of waiting for the drop.
    pub fn cancel(mut self) {
        self.animation.cancel(self.node);
    }
}

impl<M: TextMeasure> Iterator for ResizeFrames<'_, M> {
    type Item = TweenValue;

    fn next(&mut self) -> Option<TweenValue> {
        self.animation.advance(self.node)
    }
}

impl<M: TextMeasure> Drop for ResizeFrames<'_, M> {
    fn drop(&mut self) {
        self.animation.cancel(self.node);
    }
}
