//! LayoutText - a text node with origin-aware box geometry.
//!
//! The box width follows the measured text (plus padding, never below
//! `min_width`), the height is a fixed configured value plus padding. The
//! pivot offset is always derived from the current size and origin, and every
//! size-affecting mutation notifies the parent observer.
//!
//! # Example
//!
//! ```
//! use layout_text::{CellMeasure, LayoutText, LayoutTextConfig, Origin};
//!
//! let mut node = LayoutText::new(
//!     LayoutTextConfig {
//!         text: Some("Hello".into()),
//!         ..LayoutTextConfig::default()
//!     },
//!     CellMeasure::new(10.0, 20.0),
//! );
//!
//! node.set_origin(Origin::TopLeft);
//! assert_eq!(node.resolve_size().width, 50.0 + 60.0);
//! ```

use std::fmt;
use std::rc::{Rc, Weak};

use spark_signals::{signal, Signal};
use tracing::{debug, warn};

use crate::animate::{ResizeAnimation, ResizeFrames, Tween};
use crate::layout::{origin_offset, Origin, Spacing, TextMeasure};
use crate::types::{Affine, Rect, Rgba, Size, Vector2};

use super::node::{LayoutNode, NodeId};
use super::observer::{upgrade, LayoutObserver};

// =============================================================================
// CONFIG
// =============================================================================

/// Initial configuration of a [`LayoutText`].
///
/// Unset fields fall back to radius 0, zero spacing, color `#000`,
/// min width 0, origin Middle and box height 0.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutTextConfig {
    pub text: Option<String>,
    pub radius: Option<f32>,
    pub color: Option<Rgba>,
    pub margin: Option<Spacing>,
    pub padd: Option<Spacing>,
    pub min_width: Option<f32>,
    pub origin: Option<Origin>,
    /// Fixed content height before padding.
    pub height: Option<f32>,
    pub position: Option<Vector2>,
}

impl Default for LayoutTextConfig {
    /// The text box preset: sand color, radius 40, padding 30, height 20.
    fn default() -> Self {
        Self {
            radius: Some(40.0),
            color: Some(Rgba::SAND),
            padd: Some(Spacing::all(30.0)),
            height: Some(20.0),
            ..Self::unset()
        }
    }
}

impl LayoutTextConfig {
    /// Nothing configured; every getter reports its fallback.
    pub const fn unset() -> Self {
        Self {
            text: None,
            radius: None,
            color: None,
            margin: None,
            padd: None,
            min_width: None,
            origin: None,
            height: None,
            position: None,
        }
    }
}

// =============================================================================
// QUERIES
// =============================================================================

/// "What-if" overrides for size and offset queries. Never mutates the node.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LayoutQuery<'a> {
    pub text: Option<&'a str>,
    pub min_width: Option<f32>,
    pub origin: Option<Origin>,
}

impl<'a> LayoutQuery<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, text: &'a str) -> Self {
        self.text = Some(text);
        self
    }

    pub fn min_width(mut self, min_width: f32) -> Self {
        self.min_width = Some(min_width);
        self
    }

    pub fn origin(mut self, origin: Origin) -> Self {
        self.origin = Some(origin);
        self
    }
}

/// Options for [`LayoutText::get_client_rect`].
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ClientRectConfig {
    /// Return the rect in the node's own frame.
    pub skip_transform: bool,
    /// Absolute transform of an ancestor to express the rect relative to.
    pub relative_to: Option<Affine>,
}

/// Snapshot handed to the layout-change hook.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutChange {
    pub node: NodeId,
    pub size: Size,
    pub position: Vector2,
    pub offset: Vector2,
}

type LayoutHook = Box<dyn FnMut(&LayoutChange)>;

// =============================================================================
// LAYOUT TEXT
// =============================================================================

pub struct LayoutText<M: TextMeasure> {
    id: NodeId,
    measure: M,

    text: String,
    radius: f32,
    color: Rgba,
    margin: Spacing,
    padd: Spacing,
    min_width: f32,
    origin: Origin,
    height: f32,

    position: Vector2,
    scale: Vector2,
    offset: Vector2,
    parent_transform: Affine,

    /// Forced width, only set while a resize animation is in flight.
    override_width: Option<f32>,
    constructed: bool,

    parent: Option<Weak<dyn LayoutObserver>>,
    layout_hook: Option<LayoutHook>,
    revision: Signal<u64>,
}

impl<M: TextMeasure> LayoutText<M> {
    pub fn new(config: LayoutTextConfig, measure: M) -> Self {
        let mut node = Self {
            id: NodeId::next(),
            measure,
            text: config.text.unwrap_or_default(),
            radius: config.radius.unwrap_or(0.0),
            color: config.color.unwrap_or(Rgba::BLACK),
            margin: config.margin.unwrap_or_default(),
            padd: config.padd.unwrap_or_default(),
            min_width: config.min_width.unwrap_or(0.0),
            origin: config.origin.unwrap_or_default(),
            height: config.height.unwrap_or(0.0),
            position: config.position.unwrap_or_default(),
            scale: Vector2::ONE,
            offset: Vector2::ZERO,
            parent_transform: Affine::IDENTITY,
            override_width: None,
            constructed: false,
            parent: None,
            layout_hook: None,
            revision: signal(0),
        };

        node.constructed = true;
        node.handle_layout_change();
        node.offset = node.resolve_origin_offset();
        node
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn measure(&self) -> &M {
        &self.measure
    }

    // =========================================================================
    // SIZE RESOLUTION
    // =========================================================================

    /// Current box size.
    pub fn resolve_size(&self) -> Size {
        self.resolve_size_with(&LayoutQuery::default())
    }

    /// Box size with `query` substituted for the current text / min width.
    ///
    /// `width = max(min_width, override_width ?? measured + padd.x)`,
    /// `height = box height + padd.y` (box height counts as 0 until the node
    /// is fully constructed).
    pub fn resolve_size_with(&self, query: &LayoutQuery<'_>) -> Size {
        let measured = self.measure.measure(query.text.unwrap_or(&self.text));
        let min_width = query.min_width.unwrap_or(self.min_width);
        let content_width = self
            .override_width
            .unwrap_or(measured.width + self.padd.x());
        let box_height = if self.constructed { self.height } else { 0.0 };

        Size::new(min_width.max(content_width), box_height + self.padd.y())
    }

    // =========================================================================
    // ORIGIN / OFFSET
    // =========================================================================

    /// Pivot offset for the current origin.
    pub fn resolve_origin_offset(&self) -> Vector2 {
        self.resolve_origin_offset_with(&LayoutQuery::default())
    }

    /// Pivot offset, resolved on the real content box (min width 0 unless the
    /// query says otherwise) and shifted so the pivot lines up with the
    /// padded content rather than the full box.
    pub fn resolve_origin_offset_with(&self, query: &LayoutQuery<'_>) -> Vector2 {
        let query = LayoutQuery {
            min_width: Some(query.min_width.unwrap_or(0.0)),
            ..*query
        };
        let size = self.resolve_size_with(&query);
        let mut offset = origin_offset(size, query.origin.unwrap_or(self.origin));
        offset.x += size.width / 2.0 - self.padd.left;
        offset.y += size.height / 2.0 - self.padd.top;
        offset
    }

    /// Move that keeps the box in place when switching to `new_origin`.
    pub fn origin_delta(&self, new_origin: Origin) -> Vector2 {
        let to = self.resolve_origin_offset_with(&LayoutQuery::new().origin(new_origin));
        let from = self.resolve_origin_offset();
        to - from
    }

    pub fn origin(&self) -> Origin {
        self.origin
    }

    /// Change the anchor.
    ///
    /// Outside a managed container the node also moves by the pivot delta so
    /// the box stays where it was on screen.
    pub fn set_origin(&mut self, origin: Origin) -> &mut Self {
        if !self.is_inside_layout() {
            let delta = self.origin_delta(origin);
            if delta != Vector2::ZERO {
                debug!(node = %self.id, from = %self.origin, to = %origin, dx = delta.x, dy = delta.y, "compensating origin move");
            }
            self.move_by(delta);
        }
        self.origin = origin;
        self.invalidate_layout();
        self
    }

    /// Run `action` with `origin` temporarily in place, then restore the
    /// previous origin.
    pub fn with_origin<R>(&mut self, origin: Origin, action: impl FnOnce(&mut Self) -> R) -> R {
        let previous = self.origin;
        self.set_origin(origin);
        let result = action(self);
        self.set_origin(previous);
        result
    }

    /// Current pivot offset (kept in sync with size and origin).
    pub fn offset(&self) -> Vector2 {
        self.offset
    }

    // =========================================================================
    // PROPERTIES
    // =========================================================================

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: impl Into<String>) -> &mut Self {
        self.text = text.into();
        self.invalidate_layout();
        self
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn set_radius(&mut self, radius: f32) -> &mut Self {
        self.radius = radius;
        self
    }

    pub fn color(&self) -> Rgba {
        self.color
    }

    pub fn set_color(&mut self, color: Rgba) -> &mut Self {
        self.color = color;
        self
    }

    pub fn margin(&self) -> Spacing {
        self.margin
    }

    pub fn set_margin(&mut self, margin: impl Into<Spacing>) -> &mut Self {
        self.margin = margin.into();
        self.invalidate_layout();
        self
    }

    pub fn padd(&self) -> Spacing {
        self.padd
    }

    pub fn set_padd(&mut self, padd: impl Into<Spacing>) -> &mut Self {
        self.padd = padd.into();
        self.invalidate_layout();
        self
    }

    pub fn min_width(&self) -> f32 {
        self.min_width
    }

    pub fn set_min_width(&mut self, min_width: f32) -> &mut Self {
        self.min_width = min_width;
        self.invalidate_layout();
        self
    }

    /// Fixed content height before padding.
    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn override_width(&self) -> Option<f32> {
        self.override_width
    }

    pub(crate) fn set_override_width(&mut self, width: Option<f32>) {
        self.override_width = width;
    }

    // =========================================================================
    // TRANSFORM
    // =========================================================================

    pub fn position(&self) -> Vector2 {
        self.position
    }

    pub fn set_position(&mut self, position: Vector2) -> &mut Self {
        self.position = position;
        self
    }

    pub fn move_by(&mut self, delta: Vector2) -> &mut Self {
        self.position += delta;
        self
    }

    pub fn scale(&self) -> Vector2 {
        self.scale
    }

    pub fn set_scale(&mut self, scale: Vector2) -> &mut Self {
        self.scale = scale;
        self
    }

    /// Absolute transform of the parent, maintained by the host scene graph.
    pub fn set_parent_transform(&mut self, transform: Affine) -> &mut Self {
        self.parent_transform = transform;
        self
    }

    /// Node frame to parent frame: position, then scale, then pivot.
    pub fn local_transform(&self) -> Affine {
        Affine::translate(self.position)
            .then(&Affine::scale(self.scale))
            .then(&Affine::translate(-self.offset))
    }

    pub fn absolute_transform(&self) -> Affine {
        self.parent_transform.then(&self.local_transform())
    }

    /// Bounding rect of the box.
    ///
    /// The rect is centered on the real content: when `min_width` widens the
    /// box it grows equally on both sides.
    pub fn get_client_rect(&self, config: &ClientRectConfig) -> Rect {
        let real_size = self.resolve_size_with(&LayoutQuery::new().min_width(0.0));
        let size = self.resolve_size();
        let offset = self.resolve_origin_offset_with(&LayoutQuery::new().origin(Origin::TopLeft));

        let rect = Rect::new(
            offset.x + (real_size.width - size.width) / 2.0,
            offset.y,
            size.width,
            size.height,
        );

        if config.skip_transform {
            return rect;
        }

        let mut transform = self.absolute_transform();
        if let Some(ancestor) = config.relative_to {
            match ancestor.invert() {
                Some(inverse) => transform = inverse.then(&transform),
                None => warn!(node = %self.id, "relative_to transform is singular, using absolute"),
            }
        }
        transform.transform_rect(&rect)
    }

    // =========================================================================
    // CHANGE NOTIFICATION
    // =========================================================================

    pub fn set_parent(&mut self, parent: Option<Weak<dyn LayoutObserver>>) -> &mut Self {
        self.parent = parent;
        self
    }

    pub fn parent(&self) -> Option<Rc<dyn LayoutObserver>> {
        upgrade(&self.parent)
    }

    /// Whether a managed container owns this node's placement.
    pub fn is_inside_layout(&self) -> bool {
        self.parent().is_some_and(|p| p.is_layout_container())
    }

    /// Install the hook run when the parent reports it changed this node's layout.
    pub fn on_layout_change(&mut self, hook: impl FnMut(&LayoutChange) + 'static) -> &mut Self {
        self.layout_hook = Some(Box::new(hook));
        self
    }

    /// Reactive layout revision, bumped on every layout-change emission.
    pub fn layout_revision(&self) -> Signal<u64> {
        self.revision.clone()
    }

    pub fn handle_layout_change(&mut self) {
        let change = LayoutChange {
            node: self.id,
            size: self.resolve_size(),
            position: self.position,
            offset: self.offset,
        };
        if let Some(hook) = self.layout_hook.as_mut() {
            hook(&change);
        }
    }

    /// Recompute the pivot, then tell the parent.
    fn invalidate_layout(&mut self) {
        self.offset = self.resolve_origin_offset();
        self.fire_layout_change();
    }

    fn fire_layout_change(&mut self) {
        self.revision.set(self.revision.get() + 1);

        let Some(parent) = self.parent() else {
            return;
        };
        debug!(node = %self.id, "layout change");
        parent.on_child_layout_invalidated(self.id);
    }

    // =========================================================================
    // ANIMATION
    // =========================================================================

    /// Animate to `text`, interpolating both the string and the box width.
    ///
    /// Each item of the returned iterator is one frame. Dropping it early
    /// cancels the animation and snaps to `text`.
    pub fn animate_text(&mut self, text: impl Into<String>) -> ResizeFrames<'_, M> {
        let animation = ResizeAnimation::start(self, text);
        ResizeFrames::new(self, animation)
    }

    pub fn animate_text_with(&mut self, text: impl Into<String>, tween: Tween) -> ResizeFrames<'_, M> {
        let animation = ResizeAnimation::with_tween(self, text, tween);
        ResizeFrames::new(self, animation)
    }
}

impl<M: TextMeasure> fmt::Debug for LayoutText<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LayoutText")
            .field("id", &self.id)
            .field("text", &self.text)
            .field("origin", &self.origin)
            .field("padd", &self.padd)
            .field("min_width", &self.min_width)
            .field("position", &self.position)
            .field("offset", &self.offset)
            .field("override_width", &self.override_width)
            .finish_non_exhaustive()
    }
}

impl<M: TextMeasure> LayoutNode for LayoutText<M> {
    fn id(&self) -> NodeId {
        self.id
    }

    fn layout_size(&self) -> Size {
        self.resolve_size()
    }

    fn layout_margin(&self) -> Spacing {
        self.margin
    }

    fn offset(&self) -> Vector2 {
        self.offset
    }

    fn local_rect(&self) -> Rect {
        self.get_client_rect(&ClientRectConfig {
            skip_transform: true,
            ..ClientRectConfig::default()
        })
    }

    fn position(&self) -> Vector2 {
        self.position
    }

    fn set_position(&mut self, position: Vector2) {
        self.position = position;
    }

    fn set_parent(&mut self, parent: Option<Weak<dyn LayoutObserver>>) {
        self.parent = parent;
    }

    fn handle_layout_change(&mut self) {
        LayoutText::handle_layout_change(self);
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Group;
    use std::cell::{Cell, RefCell};

    /// 20 units per byte, 20 tall.
    fn mono(text: &str) -> Size {
        Size::new(text.len() as f32 * 20.0, 20.0)
    }

    fn node(text: &str) -> LayoutText<fn(&str) -> Size> {
        LayoutText::new(
            LayoutTextConfig {
                text: Some(text.to_string()),
                ..LayoutTextConfig::unset()
            },
            mono as fn(&str) -> Size,
        )
    }

    struct Managed {
        hits: Cell<usize>,
    }

    impl LayoutObserver for Managed {
        fn on_child_layout_invalidated(&self, _child: NodeId) {
            self.hits.set(self.hits.get() + 1);
        }

        fn is_layout_container(&self) -> bool {
            true
        }
    }

    #[test]
    fn test_unset_fallbacks() {
        let n = node("");
        assert_eq!(n.radius(), 0.0);
        assert_eq!(n.color(), Rgba::BLACK);
        assert_eq!(n.margin(), Spacing::ZERO);
        assert_eq!(n.padd(), Spacing::ZERO);
        assert_eq!(n.min_width(), 0.0);
        assert_eq!(n.origin(), Origin::Middle);
        assert_eq!(n.override_width(), None);
    }

    #[test]
    fn test_preset_defaults() {
        let n = LayoutText::new(LayoutTextConfig::default(), mono as fn(&str) -> Size);
        assert_eq!(n.radius(), 40.0);
        assert_eq!(n.color(), Rgba::SAND);
        assert_eq!(n.padd(), Spacing::all(30.0));
        assert_eq!(n.resolve_size(), Size::new(60.0, 80.0));
    }

    #[test]
    fn test_size_with_padding() {
        let mut n = node("Hi");
        n.set_padd(10.0);
        assert_eq!(n.resolve_size(), Size::new(60.0, 20.0));
    }

    #[test]
    fn test_min_width_wins_when_larger() {
        let mut n = node("Hi");
        n.set_padd(Spacing::symmetric(0.0, 20.0));
        assert_eq!(n.resolve_size().width, 80.0);
        n.set_min_width(200.0);
        assert_eq!(n.resolve_size().width, 200.0);
    }

    #[test]
    fn test_override_width_never_beats_min_width() {
        let mut n = node("Hello");
        n.set_min_width(150.0);
        n.set_override_width(Some(40.0));
        assert_eq!(n.resolve_size().width, 150.0);
        n.set_override_width(Some(400.0));
        assert_eq!(n.resolve_size().width, 400.0);
    }

    #[test]
    fn test_query_does_not_mutate() {
        let n = node("Hi");
        let what_if = n.resolve_size_with(&LayoutQuery::new().text("Hello"));
        assert_eq!(what_if.width, 100.0);
        assert_eq!(n.text(), "Hi");
        assert_eq!(n.resolve_size().width, 40.0);
    }

    #[test]
    fn test_height_is_zero_before_construction() {
        let mut n = LayoutText::new(LayoutTextConfig::default(), mono as fn(&str) -> Size);
        n.constructed = false;
        assert_eq!(n.resolve_size().height, 60.0);
        n.constructed = true;
        assert_eq!(n.resolve_size().height, 80.0);
    }

    #[test]
    fn test_offset_ignores_min_width() {
        let mut n = node("Hi");
        let before = n.resolve_origin_offset();
        n.set_min_width(500.0);
        assert_eq!(n.resolve_origin_offset(), before);
        assert_eq!(n.offset(), before);
    }

    #[test]
    fn test_offset_padding_correction() {
        let mut n = node("Hi");
        n.set_padd(Spacing::new(5.0, 10.0, 15.0, 20.0));
        n.set_origin(Origin::TopLeft);
        assert_eq!(n.offset(), Vector2::new(-20.0, -5.0));
    }

    #[test]
    fn test_offset_is_idempotent() {
        let mut n = node("Hello");
        n.set_padd(Spacing::new(3.0, 7.0, 11.0, 13.0));
        let a = n.resolve_origin_offset();
        let b = n.resolve_origin_offset();
        assert_eq!(a, b);
    }

    #[test]
    fn test_set_origin_compensates_outside_layout() {
        let mut n = node("Hello");
        n.set_padd(10.0);
        n.set_position(Vector2::new(100.0, 100.0));
        let before = n.get_client_rect(&ClientRectConfig::default());

        n.set_origin(Origin::TopLeft);
        assert_eq!(n.get_client_rect(&ClientRectConfig::default()), before);

        n.set_origin(Origin::BottomRight);
        assert_eq!(n.get_client_rect(&ClientRectConfig::default()), before);
    }

    #[test]
    fn test_set_origin_skips_move_inside_container() {
        let container: Rc<dyn LayoutObserver> = Rc::new(Managed { hits: Cell::new(0) });
        let mut n = node("Hello");
        n.set_parent(Some(Rc::downgrade(&container)));
        n.set_position(Vector2::new(10.0, 10.0));

        n.set_origin(Origin::TopLeft);
        assert_eq!(n.position(), Vector2::new(10.0, 10.0));
        assert!(n.is_inside_layout());
    }

    #[test]
    fn test_with_origin_restores() {
        let mut n = node("Hello");
        n.set_origin(Origin::Right);
        let position = n.position();

        let seen = n.with_origin(Origin::TopLeft, |n| n.origin());

        assert_eq!(seen, Origin::TopLeft);
        assert_eq!(n.origin(), Origin::Right);
        assert_eq!(n.position(), position);
    }

    #[test]
    fn test_mutations_notify_parent() {
        let group = Group::new();
        let mut n = node("a");
        n.set_parent(Some(group.as_parent()));

        n.set_text("ab");
        n.set_origin(Origin::Top);
        n.set_padd(2.0);
        n.set_margin(4.0);
        n.set_min_width(120.0);
        assert_eq!(group.invalidations(), 5);

        n.set_color(Rgba::SAND);
        n.set_radius(3.0);
        n.set_position(Vector2::new(1.0, 1.0));
        assert_eq!(group.invalidations(), 5);
    }

    #[test]
    fn test_revision_signal_tracks_changes() {
        let mut n = node("a");
        let revision = n.layout_revision();
        let start = revision.get();
        n.set_text("b");
        n.set_margin(1.0);
        assert_eq!(revision.get(), start + 2);
    }

    #[test]
    fn test_hook_runs_on_handle_layout_change() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let seen_clone = seen.clone();
        let mut n = node("Hi");
        n.on_layout_change(move |change| seen_clone.borrow_mut().push(change.size));

        n.handle_layout_change();
        n.set_text("Hey");
        assert_eq!(*seen.borrow(), vec![Size::new(40.0, 0.0)]);
    }

    #[test]
    fn test_client_rect_centers_min_width() {
        let mut n = node("Hi");
        n.set_min_width(100.0);
        let rect = n.get_client_rect(&ClientRectConfig {
            skip_transform: true,
            ..Default::default()
        });
        assert_eq!(rect, Rect::new(-30.0, 0.0, 100.0, 0.0));
    }

    #[test]
    fn test_client_rect_relative_to_ancestor() {
        let parent = Affine::translate(Vector2::new(50.0, 50.0));
        let mut n = node("Hi");
        n.set_origin(Origin::TopLeft);
        n.set_position(Vector2::new(5.0, 5.0));
        n.set_parent_transform(parent);

        let absolute = n.get_client_rect(&ClientRectConfig::default());
        assert_eq!(absolute, Rect::new(55.0, 55.0, 40.0, 0.0));

        let relative = n.get_client_rect(&ClientRectConfig {
            relative_to: Some(parent),
            ..Default::default()
        });
        assert_eq!(relative, Rect::new(5.0, 5.0, 40.0, 0.0));
    }
}
