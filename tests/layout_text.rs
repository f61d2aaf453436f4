//! End-to-end checks of the layout contract through the public API.

use std::cell::RefCell;
use std::rc::Rc;

use layout_text::{
    AnimationState, CellMeasure, ClientRectConfig, Group, LayoutQuery, LayoutStack, LayoutText,
    LayoutTextConfig, Origin, ResizeAnimation, Size, Spacing, StackConfig, Tween, Vector2,
};

fn fixed(text: &str) -> Size {
    // "Hi" measures 40×20
    Size::new(text.chars().count() as f32 * 20.0, 20.0)
}

fn node(text: &str) -> LayoutText<fn(&str) -> Size> {
    LayoutText::new(
        LayoutTextConfig {
            text: Some(text.to_string()),
            ..LayoutTextConfig::unset()
        },
        fixed as fn(&str) -> Size,
    )
}

#[test]
fn width_is_max_of_min_width_and_padded_content() {
    let paddings = [
        Spacing::ZERO,
        Spacing::all(10.0),
        Spacing::new(1.0, 2.0, 3.0, 4.0),
        Spacing::symmetric(0.0, 35.0),
    ];
    for text in ["", "Hi", "Hello world", "日本語"] {
        for padd in paddings {
            for min_width in [0.0, 50.0, 200.0] {
                let mut n = node(text);
                n.set_padd(padd).set_min_width(min_width);
                let expected = min_width.max(fixed(text).width + padd.x());
                assert_eq!(n.resolve_size().width, expected, "{text:?} {padd:?} {min_width}");
            }
        }
    }
}

#[test]
fn padded_hi_scenario() {
    let mut n = LayoutText::new(
        LayoutTextConfig {
            text: Some("Hi".into()),
            height: Some(20.0),
            padd: Some(Spacing::all(10.0)),
            ..LayoutTextConfig::unset()
        },
        fixed as fn(&str) -> Size,
    );
    assert_eq!(n.resolve_size(), Size::new(60.0, 40.0));

    n.set_min_width(200.0);
    assert_eq!(n.resolve_size().width, 200.0);
}

#[test]
fn origin_switches_keep_box_on_screen() {
    for from in Origin::ALL {
        for to in Origin::ALL {
            let mut n = node("Hello");
            n.set_padd(Spacing::new(4.0, 8.0, 12.0, 16.0));
            n.set_position(Vector2::new(300.0, 200.0));
            n.set_origin(from);
            let before = n.get_client_rect(&ClientRectConfig::default());

            n.set_origin(to);

            let after = n.get_client_rect(&ClientRectConfig::default());
            assert_eq!(after, before, "{from} -> {to}");
        }
    }
}

#[test]
fn top_left_to_middle_delta() {
    let mut n = LayoutText::new(
        LayoutTextConfig {
            text: Some("Hello".into()),
            height: Some(50.0),
            origin: Some(Origin::TopLeft),
            ..LayoutTextConfig::unset()
        },
        fixed as fn(&str) -> Size,
    );
    assert_eq!(n.resolve_size(), Size::new(100.0, 50.0));
    assert_eq!(n.origin_delta(Origin::Middle), Vector2::new(50.0, 25.0));

    let position = n.position();
    n.set_origin(Origin::Middle);
    assert_eq!(n.position(), position + Vector2::new(50.0, 25.0));
}

#[test]
fn with_origin_leaves_origin_unchanged() {
    for origin in Origin::ALL {
        let mut n = node("abc");
        n.set_origin(Origin::BottomLeft);
        n.with_origin(origin, |_| {});
        assert_eq!(n.origin(), Origin::BottomLeft);
    }
}

#[test]
fn offset_query_is_pure() {
    let mut n = node("Hello");
    n.set_padd(Spacing::new(2.0, 4.0, 6.0, 8.0)).set_origin(Origin::Right);
    let q = LayoutQuery::new().origin(Origin::Bottom).text("x");
    assert_eq!(n.resolve_origin_offset_with(&q), n.resolve_origin_offset_with(&q));
    assert_eq!(n.resolve_origin_offset(), n.offset());
}

#[test]
fn animate_text_ends_on_target() {
    let mut n = node("X");
    let mut anim = ResizeAnimation::start(&mut n, "Y");
    anim.run(&mut n);

    assert_eq!(anim.state(), AnimationState::Completed);
    assert_eq!(n.text(), "Y");
    assert_eq!(n.override_width(), None);
}

#[test]
fn animation_driven_through_shared_node() {
    let group = Group::new();
    let n = Rc::new(RefCell::new(node("one")));
    n.borrow_mut().set_parent(Some(group.as_parent()));

    let mut anim = ResizeAnimation::with_tween(&mut *n.borrow_mut(), "three", Tween::new(1.0, 4.0));
    let mut widths = Vec::new();
    while anim.advance(&mut *n.borrow_mut()).is_some() {
        widths.push(n.borrow().resolve_size().width);
    }

    assert_eq!(widths.first(), Some(&60.0));
    assert_eq!(widths.last(), Some(&100.0));
    assert!(widths.windows(2).all(|w| w[0] <= w[1]));
    assert!(group.invalidations() >= widths.len());
}

#[test]
fn stack_places_text_boxes_with_cell_measure() {
    let stack = LayoutStack::new(StackConfig {
        gap: 1.0,
        ..StackConfig::default()
    });

    let labels: Vec<_> = ["ab", "cde"]
        .into_iter()
        .map(|text| {
            Rc::new(RefCell::new(LayoutText::new(
                LayoutTextConfig {
                    text: Some(text.into()),
                    height: Some(1.0),
                    padd: Some(Spacing::symmetric(0.0, 1.0)),
                    origin: Some(Origin::TopLeft),
                    ..LayoutTextConfig::unset()
                },
                CellMeasure::default(),
            )))
        })
        .collect();
    for label in &labels {
        stack.add_child(label.clone());
    }

    let size = stack.layout().unwrap();
    assert_eq!(size, Size::new(4.0 + 1.0 + 5.0, 1.0));

    let rects: Vec<_> = labels
        .iter()
        .map(|l| l.borrow().get_client_rect(&ClientRectConfig::default()))
        .collect();
    assert_eq!((rects[0].x, rects[0].width), (0.0, 4.0));
    assert_eq!((rects[1].x, rects[1].width), (5.0, 5.0));
}
