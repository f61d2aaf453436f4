//! Tween driver.
//!
//! A [`Tween`] is a lazy sequence of frames. Each call to `next()` is one
//! suspension point: the scheduler resumes it once per animation tick and
//! gets back the frame's [`TweenValue`]. Progress runs `0, 1/n, ..., 1` with
//! `n = ceil(duration * fps)`, so the last frame always lands exactly on 1.

use unicode_segmentation::UnicodeSegmentation;

use super::easing::{ease_in_out_cubic, map};

/// Frames per time unit when nothing else is specified.
pub const DEFAULT_FPS: f32 = 60.0;

/// Fixed-duration frame sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct Tween {
    duration: f32,
    frames: u32,
    frame: u32,
}

impl Tween {
    /// Tween lasting `duration` time units at `fps` frames per unit.
    ///
    /// Degenerate input (zero, negative, infinite or NaN) still produces the
    /// start and end frames.
    pub fn new(duration: f32, fps: f32) -> Self {
        let steps = (duration * fps).ceil();
        let frames = if steps.is_finite() {
            (steps.max(1.0) as u32).min(u32::MAX - 1)
        } else {
            1
        };
        Self {
            duration,
            frames,
            frame: 0,
        }
    }

    pub fn duration(&self) -> f32 {
        self.duration
    }

    /// Number of steps between start and end (total frames yielded is `frames + 1`).
    pub fn frames(&self) -> u32 {
        self.frames
    }

    pub fn is_finished(&self) -> bool {
        self.frame > self.frames
    }
}

impl Iterator for Tween {
    type Item = TweenValue;

    fn next(&mut self) -> Option<TweenValue> {
        if self.is_finished() {
            return None;
        }
        let progress = self.frame as f32 / self.frames as f32;
        self.frame += 1;
        Some(TweenValue::new(progress))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.frames.saturating_add(1).saturating_sub(self.frame) as usize;
        (left, Some(left))
    }
}

impl ExactSizeIterator for Tween {}

// =============================================================================
// TWEEN VALUE
// =============================================================================

/// Interpolation helpers for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TweenValue {
    progress: f32,
}

impl TweenValue {
    pub fn new(progress: f32) -> Self {
        Self {
            progress: progress.clamp(0.0, 1.0),
        }
    }

    /// Raw linear progress in `0..=1`.
    pub fn progress(&self) -> f32 {
        self.progress
    }

    /// Eased progress.
    pub fn ease_in_out_cubic(&self) -> f32 {
        ease_in_out_cubic(self.progress)
    }

    /// `from` to `to` along the eased curve.
    pub fn ease_in_out_cubic_between(&self, from: f32, to: f32) -> f32 {
        map(from, to, self.ease_in_out_cubic())
    }

    /// Character-wise morph from one string to another, see [`text_lerp`].
    pub fn text(&self, from: &str, to: &str, value: f32) -> String {
        text_lerp(from, to, value)
    }
}

/// Morph `from` into `to`.
///
/// The length (in grapheme clusters) moves from `from`'s to `to`'s, and
/// characters flip to their `to` counterpart left to right as `value` grows.
/// `value <= 0` returns `from`, `value >= 1` returns `to`.
pub fn text_lerp(from: &str, to: &str, value: f32) -> String {
    if value.is_nan() || value <= 0.0 {
        return from.to_string();
    }
    if value >= 1.0 {
        return to.to_string();
    }

    let from: Vec<&str> = from.graphemes(true).collect();
    let to: Vec<&str> = to.graphemes(true).collect();

    let length = map(from.len() as f32, to.len() as f32, value).round() as usize;
    let switched = (length as f32 * value).floor() as usize;

    (0..length)
        .filter_map(|i| {
            let (primary, fallback) = if i < switched { (&to, &from) } else { (&from, &to) };
            primary.get(i).or_else(|| fallback.get(i)).copied()
        })
        .collect()
}
