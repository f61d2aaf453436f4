//! Text Measurement
//!
//! The layout core never shapes text itself. It asks a [`TextMeasure`]
//! collaborator for the natural size of a string and treats the answer as a
//! pure function of the content.
//!
//! [`CellMeasure`] is the built-in monospace implementation: every column is
//! `cell_width` wide (CJK and emoji take two columns, zero-width characters
//! none) and every line is `line_height` tall.

use unicode_width::UnicodeWidthStr;

use crate::types::Size;

/// Measures the natural size of a string.
pub trait TextMeasure {
    fn measure(&self, text: &str) -> Size;
}

impl<F> TextMeasure for F
where
    F: Fn(&str) -> Size,
{
    fn measure(&self, text: &str) -> Size {
        self(text)
    }
}

/// Monospace grid measurement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellMeasure {
    pub cell_width: f32,
    pub line_height: f32,
}

impl Default for CellMeasure {
    fn default() -> Self {
        Self {
            cell_width: 1.0,
            line_height: 1.0,
        }
    }
}

impl CellMeasure {
    pub const fn new(cell_width: f32, line_height: f32) -> Self {
        Self {
            cell_width,
            line_height,
        }
    }
}

impl TextMeasure for CellMeasure {
    fn measure(&self, text: &str) -> Size {
        if text.is_empty() {
            return Size::ZERO;
        }

        let mut lines = 0usize;
        let mut widest = 0usize;
        for line in text.split('\n') {
            lines += 1;
            widest = widest.max(string_width(line));
        }

        Size::new(
            widest as f32 * self.cell_width,
            lines as f32 * self.line_height,
        )
    }
}

/// Display width of a single line in columns.
pub fn string_width(s: &str) -> usize {
    UnicodeWidthStr::width(s)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_is_zero() {
        assert_eq!(CellMeasure::default().measure(""), Size::ZERO);
    }

    #[test]
    fn test_ascii() {
        let m = CellMeasure::new(10.0, 20.0);
        assert_eq!(m.measure("Hello"), Size::new(50.0, 20.0));
    }

    #[test]
    fn test_wide_characters() {
        assert_eq!(string_width("日本"), 4);
        assert_eq!(CellMeasure::default().measure("日本").width, 4.0);
    }

    #[test]
    fn test_multiline_takes_widest_line() {
        let m = CellMeasure::default();
        assert_eq!(m.measure("ab\nabcd\nc"), Size::new(4.0, 3.0));
    }

    #[test]
    fn test_closure_measure() {
        let m = |text: &str| Size::new(text.len() as f32 * 20.0, 20.0);
        assert_eq!(m.measure("Hi"), Size::new(40.0, 20.0));
    }
}
