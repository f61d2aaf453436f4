//! Origin - symbolic anchor on a 3×3 grid.
//!
//! An origin decides which point of a box lines up with the box's logical
//! position. Each origin decomposes into [`Direction`] bits; `Middle` has
//! none, `TopLeft` has `TOP | LEFT`, and so on. Axis resolution only looks at
//! the bits, so the offset math never enumerates all nine cases.

use std::fmt;
use std::str::FromStr;

use bitflags::bitflags;

use crate::error::ParseOriginError;
use crate::types::{Size, Vector2};

bitflags! {
    /// Edges an origin is pinned to.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
    pub struct Direction: u8 {
        const TOP    = 0b0001;
        const BOTTOM = 0b0010;
        const LEFT   = 0b0100;
        const RIGHT  = 0b1000;
    }
}

/// Anchor position of a box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum Origin {
    TopLeft,
    Top,
    TopRight,
    Left,
    #[default]
    Middle,
    Right,
    BottomLeft,
    Bottom,
    BottomRight,
}

impl Origin {
    pub const ALL: [Origin; 9] = [
        Origin::TopLeft,
        Origin::Top,
        Origin::TopRight,
        Origin::Left,
        Origin::Middle,
        Origin::Right,
        Origin::BottomLeft,
        Origin::Bottom,
        Origin::BottomRight,
    ];

    pub const fn directions(self) -> Direction {
        match self {
            Origin::TopLeft => Direction::TOP.union(Direction::LEFT),
            Origin::Top => Direction::TOP,
            Origin::TopRight => Direction::TOP.union(Direction::RIGHT),
            Origin::Left => Direction::LEFT,
            Origin::Middle => Direction::empty(),
            Origin::Right => Direction::RIGHT,
            Origin::BottomLeft => Direction::BOTTOM.union(Direction::LEFT),
            Origin::Bottom => Direction::BOTTOM,
            Origin::BottomRight => Direction::BOTTOM.union(Direction::RIGHT),
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Origin::TopLeft => "top-left",
            Origin::Top => "top",
            Origin::TopRight => "top-right",
            Origin::Left => "left",
            Origin::Middle => "middle",
            Origin::Right => "right",
            Origin::BottomLeft => "bottom-left",
            Origin::Bottom => "bottom",
            Origin::BottomRight => "bottom-right",
        }
    }
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Origin {
    type Err = ParseOriginError;

    /// Accepts kebab, snake or camel case (`top-left`, `top_left`, `TopLeft`).
    /// `center` is an alias for `middle`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .trim()
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' '))
            .flat_map(char::to_lowercase)
            .collect();

        let origin = match key.as_str() {
            "topleft" => Origin::TopLeft,
            "top" => Origin::Top,
            "topright" => Origin::TopRight,
            "left" => Origin::Left,
            "middle" | "center" => Origin::Middle,
            "right" => Origin::Right,
            "bottomleft" => Origin::BottomLeft,
            "bottom" => Origin::Bottom,
            "bottomright" => Origin::BottomRight,
            _ => return Err(ParseOriginError(s.to_string())),
        };
        Ok(origin)
    }
}

// =============================================================================
// OFFSET MATH
// =============================================================================

/// Pivot of `origin` relative to the center of a box of `size`.
///
/// Each axis resolves to `-size/2`, `0` or `+size/2` for start, middle and end.
pub fn origin_offset(size: Size, origin: Origin) -> Vector2 {
    let dirs = origin.directions();
    let mut offset = Vector2::ZERO;

    if dirs.contains(Direction::LEFT) {
        offset.x = -size.width / 2.0;
    } else if dirs.contains(Direction::RIGHT) {
        offset.x = size.width / 2.0;
    }

    if dirs.contains(Direction::TOP) {
        offset.y = -size.height / 2.0;
    } else if dirs.contains(Direction::BOTTOM) {
        offset.y = size.height / 2.0;
    }

    offset
}

/// How far the pivot moves when switching from `from` to `to` on one box.
pub fn origin_delta(size: Size, from: Origin, to: Origin) -> Vector2 {
    origin_offset(size, to) - origin_offset(size, from)
}
