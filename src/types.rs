//! Core types for layout-text.
//!
//! Plain value types shared by every module: 2D vectors, sizes, rects, the
//! affine transform used for client rect queries, and the RGBA color.

use std::fmt;
use std::ops::{Add, AddAssign, Mul, Neg, Sub};
use std::str::FromStr;

use crate::error::ParseColorError;

// =============================================================================
// Vector2
// =============================================================================

/// A 2D point or displacement.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vector2 {
    pub x: f32,
    pub y: f32,
}

impl Vector2 {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };
    pub const ONE: Self = Self { x: 1.0, y: 1.0 };

    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl Add for Vector2 {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Vector2 {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Vector2 {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Neg for Vector2 {
    type Output = Self;
    #[inline]
    fn neg(self) -> Self {
        Self::new(-self.x, -self.y)
    }
}

impl Mul<f32> for Vector2 {
    type Output = Self;
    #[inline]
    fn mul(self, rhs: f32) -> Self {
        Self::new(self.x * rhs, self.y * rhs)
    }
}

// =============================================================================
// Size
// =============================================================================

/// Width and height of a box. Always derived, never cached by a node.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const ZERO: Self = Self { width: 0.0, height: 0.0 };

    #[inline]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

// =============================================================================
// Rect
// =============================================================================

/// Axis-aligned rectangle: top-left corner plus size.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    #[inline]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    /// The four corners, clockwise from top-left.
    pub fn corners(&self) -> [Vector2; 4] {
        [
            Vector2::new(self.x, self.y),
            Vector2::new(self.x + self.width, self.y),
            Vector2::new(self.x + self.width, self.y + self.height),
            Vector2::new(self.x, self.y + self.height),
        ]
    }

    /// Smallest rect containing every point. Empty input yields the default rect.
    pub fn bounding(points: &[Vector2]) -> Self {
        let Some(first) = points.first() else {
            return Self::default();
        };

        let (mut min_x, mut min_y, mut max_x, mut max_y) = (first.x, first.y, first.x, first.y);
        for p in &points[1..] {
            min_x = min_x.min(p.x);
            min_y = min_y.min(p.y);
            max_x = max_x.max(p.x);
            max_y = max_y.max(p.y);
        }

        Self::new(min_x, min_y, max_x - min_x, max_y - min_y)
    }
}

// =============================================================================
// Affine
// =============================================================================

/// 2D affine transform in column-major `[a, b, c, d, e, f]` form:
///
/// ```text
/// | a c e |
/// | b d f |
/// | 0 0 1 |
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Affine {
    pub m: [f32; 6],
}

impl Default for Affine {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Affine {
    pub const IDENTITY: Self = Self {
        m: [1.0, 0.0, 0.0, 1.0, 0.0, 0.0],
    };

    pub const fn translate(v: Vector2) -> Self {
        Self {
            m: [1.0, 0.0, 0.0, 1.0, v.x, v.y],
        }
    }

    pub const fn scale(v: Vector2) -> Self {
        Self {
            m: [v.x, 0.0, 0.0, v.y, 0.0, 0.0],
        }
    }

    /// `self * other`: applies `other` first, then `self`.
    pub fn then(&self, other: &Affine) -> Affine {
        let [a1, b1, c1, d1, e1, f1] = self.m;
        let [a2, b2, c2, d2, e2, f2] = other.m;
        Affine {
            m: [
                a1 * a2 + c1 * b2,
                b1 * a2 + d1 * b2,
                a1 * c2 + c1 * d2,
                b1 * c2 + d1 * d2,
                a1 * e2 + c1 * f2 + e1,
                b1 * e2 + d1 * f2 + f1,
            ],
        }
    }

    /// Inverse transform, or `None` when the matrix is singular.
    pub fn invert(&self) -> Option<Affine> {
        let [a, b, c, d, e, f] = self.m;
        let det = a * d - b * c;
        if det.abs() <= f32::EPSILON {
            return None;
        }
        let inv = 1.0 / det;
        Some(Affine {
            m: [
                d * inv,
                -b * inv,
                -c * inv,
                a * inv,
                (c * f - d * e) * inv,
                (b * e - a * f) * inv,
            ],
        })
    }

    #[inline]
    pub fn apply(&self, p: Vector2) -> Vector2 {
        let [a, b, c, d, e, f] = self.m;
        Vector2::new(a * p.x + c * p.y + e, b * p.x + d * p.y + f)
    }

    /// Axis-aligned bounds of the transformed rect.
    pub fn transform_rect(&self, rect: &Rect) -> Rect {
        let corners = rect.corners().map(|p| self.apply(p));
        Rect::bounding(&corners)
    }
}

// =============================================================================
// Color
// =============================================================================

/// RGBA color with 8-bit channels (0-255).
///
/// Alpha 255 = fully opaque, 0 = fully transparent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Create an opaque RGB color.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    /// Fallback when no color was configured (`#000`).
    pub const BLACK: Self = Self::rgb(0, 0, 0);

    /// Construction preset for layout text boxes (`#c0b3a3`).
    pub const SAND: Self = Self::rgb(0xc0, 0xb3, 0xa3);

    /// Parse hex color string.
    ///
    /// Supports `#RGB`, `#RRGGBB` and `#RRGGBBAA`, with or without the `#`.
    ///
    /// ```
    /// use layout_text::types::Rgba;
    ///
    /// assert_eq!(Rgba::from_hex("#000"), Some(Rgba::BLACK));
    /// assert_eq!(Rgba::from_hex("c0b3a3"), Some(Rgba::SAND));
    /// assert!(Rgba::from_hex("#gg0000").is_none());
    /// ```
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim().trim_start_matches('#');

        fn hex_digit(c: u8) -> Option<u8> {
            match c {
                b'0'..=b'9' => Some(c - b'0'),
                b'a'..=b'f' => Some(c - b'a' + 10),
                b'A'..=b'F' => Some(c - b'A' + 10),
                _ => None,
            }
        }

        fn hex_byte(s: &[u8], i: usize) -> Option<u8> {
            let high = hex_digit(s[i])?;
            let low = hex_digit(s[i + 1])?;
            Some((high << 4) | low)
        }

        let bytes = hex.as_bytes();
        match bytes.len() {
            3 => {
                let r = hex_digit(bytes[0])?;
                let g = hex_digit(bytes[1])?;
                let b = hex_digit(bytes[2])?;
                Some(Self::rgb((r << 4) | r, (g << 4) | g, (b << 4) | b))
            }
            6 => Some(Self::rgb(
                hex_byte(bytes, 0)?,
                hex_byte(bytes, 2)?,
                hex_byte(bytes, 4)?,
            )),
            8 => Some(Self::new(
                hex_byte(bytes, 0)?,
                hex_byte(bytes, 2)?,
                hex_byte(bytes, 4)?,
                hex_byte(bytes, 6)?,
            )),
            _ => None,
        }
    }
}

impl FromStr for Rgba {
    type Err = ParseColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s).ok_or_else(|| ParseColorError(s.to_string()))
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)?;
        if self.a != 255 {
            write!(f, "{:02x}", self.a)?;
        }
        Ok(())
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgba_parse_and_display() {
        let c: Rgba = "#c0b3a3".parse().unwrap();
        assert_eq!(c, Rgba::SAND);
        assert_eq!(c.to_string(), "#c0b3a3");

        let semi = Rgba::from_hex("#ff000080").unwrap();
        assert_eq!(semi.to_string(), "#ff000080");

        assert!("nope".parse::<Rgba>().is_err());
    }

    #[test]
    fn test_affine_translate_then_scale() {
        let t = Affine::translate(Vector2::new(10.0, 5.0)).then(&Affine::scale(Vector2::new(2.0, 3.0)));
        assert_eq!(t.apply(Vector2::new(1.0, 1.0)), Vector2::new(12.0, 8.0));
    }

    #[test]
    fn test_affine_invert_roundtrip_point() {
        let t = Affine::translate(Vector2::new(-4.0, 7.0)).then(&Affine::scale(Vector2::new(2.0, 2.0)));
        let inv = t.invert().unwrap();
        let p = Vector2::new(3.0, -2.0);
        assert_eq!(inv.apply(t.apply(p)), p);
    }

    #[test]
    fn test_singular_affine_has_no_inverse() {
        assert!(Affine::scale(Vector2::new(0.0, 1.0)).invert().is_none());
    }

    #[test]
    fn test_transform_rect_bounds() {
        let rect = Rect::new(0.0, 0.0, 10.0, 4.0);
        let t = Affine::scale(Vector2::new(-1.0, 1.0));
        assert_eq!(t.transform_rect(&rect), Rect::new(-10.0, 0.0, 10.0, 4.0));
    }
}
