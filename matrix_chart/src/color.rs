// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Cell color mapping.
//!
//! Callers choose one of two interchangeable styles: a function from value to
//! color, or a lookup table of `value -> color` pairs.

extern crate alloc;

use alloc::sync::Arc;
use alloc::vec::Vec;
use core::fmt;

use peniko::Color;

use crate::data::CellValue;

/// Color used for values a [`ColorScale`] does not list.
pub const UNMAPPED_COLOR: Color = Color::from_rgb8(0xee, 0xee, 0xee);

/// A lookup table from cell values to colors.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ColorScale {
    entries: Vec<(CellValue, Color)>,
    fallback: Option<Color>,
}

impl ColorScale {
    /// Creates an empty scale.
    pub fn new() -> Self {
        Self::default()
    }

    /// Maps `value` to `color`, replacing any existing entry.
    pub fn with(mut self, value: impl Into<CellValue>, color: Color) -> Self {
        let value = value.into();
        match self.entries.iter_mut().find(|(v, _)| *v == value) {
            Some(entry) => entry.1 = color,
            None => self.entries.push((value, color)),
        }
        self
    }

    /// Sets the color for values without an entry (default [`UNMAPPED_COLOR`]).
    pub fn with_fallback(mut self, color: Color) -> Self {
        self.fallback = Some(color);
        self
    }

    /// Looks up the color for `value`.
    pub fn color(&self, value: &CellValue) -> Color {
        self.entries
            .iter()
            .find(|(v, _)| v == value)
            .map_or(self.fallback.unwrap_or(UNMAPPED_COLOR), |(_, c)| *c)
    }
}

/// How cell values become fill colors.
#[derive(Clone)]
pub enum ColorMapping {
    /// A caller-supplied function.
    Function(Arc<dyn Fn(&CellValue) -> Color>),
    /// A value lookup table.
    Scale(ColorScale),
}

impl ColorMapping {
    /// Wraps a color function.
    pub fn function(f: impl Fn(&CellValue) -> Color + 'static) -> Self {
        Self::Function(Arc::new(f))
    }

    /// Color for a cell value.
    pub fn color(&self, value: &CellValue) -> Color {
        match self {
            Self::Function(f) => f(value),
            Self::Scale(scale) => scale.color(value),
        }
    }
}

impl From<ColorScale> for ColorMapping {
    fn from(scale: ColorScale) -> Self {
        Self::Scale(scale)
    }
}

impl fmt::Debug for ColorMapping {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Function(_) => f.write_str("ColorMapping::Function(..)"),
            Self::Scale(scale) => f.debug_tuple("ColorMapping::Scale").field(scale).finish(),
        }
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use peniko::color::palette::css;

    use super::*;

    #[test]
    fn scale_looks_up_values_with_fallback() {
        let scale = ColorScale::new()
            .with(1, css::ORANGE)
            .with("done", css::GREEN);
        assert_eq!(scale.color(&CellValue::from(1)), css::ORANGE);
        assert_eq!(scale.color(&CellValue::from("done")), css::GREEN);
        assert_eq!(scale.color(&CellValue::from(7)), UNMAPPED_COLOR);

        let scale = scale.with_fallback(css::BLACK).with(1, css::RED);
        assert_eq!(scale.color(&CellValue::from(7)), css::BLACK);
        assert_eq!(scale.color(&CellValue::from(1)), css::RED);
    }

    #[test]
    fn function_mapping_dispatches_to_the_closure() {
        let mapping = ColorMapping::function(|v| match v.as_f64() {
            Some(x) if x > 2.0 => css::GREEN,
            Some(_) => css::ORANGE,
            None => UNMAPPED_COLOR,
        });
        assert_eq!(mapping.color(&3.into()), css::GREEN);
        assert_eq!(mapping.color(&1.into()), css::ORANGE);
        assert_eq!(mapping.color(&"x".into()), UNMAPPED_COLOR);
    }
}
