// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Parley-backed text measurement adapter.
//!
//! This crate implements [`matrix_text::TextMeasurer`] using Parley, giving
//! native hosts shaping-aware widths for matrix row labels and column headings.

#![no_std]

extern crate alloc;

use alloc::borrow::Cow;
use core::cell::RefCell;

use matrix_text::{
    FontFamily, FontStyle, MeasurementUnavailable, TextMeasurer, TextMetrics, TextStyle,
};
use parley::style::{FontFamily as ParleyFontFamily, FontStack, GenericFamily, StyleProperty};
use parley::{Alignment, AlignmentOptions, FontContext, FontStyle as ParleyFontStyle, FontWeight};

/// A [`TextMeasurer`] backed by Parley.
///
/// Font and layout contexts are reused across calls, so measuring every label
/// of a large matrix does not rebuild font caches.
pub struct ParleyTextMeasurer {
    font_cx: RefCell<FontContext>,
    layout_cx: RefCell<parley::LayoutContext<()>>,
    display_scale: f32,
}

impl core::fmt::Debug for ParleyTextMeasurer {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ParleyTextMeasurer")
            .field("display_scale", &self.display_scale)
            .finish_non_exhaustive()
    }
}

impl ParleyTextMeasurer {
    /// Creates a measurer using Parley's system font configuration.
    #[must_use]
    pub fn new() -> Self {
        Self {
            font_cx: RefCell::new(FontContext::new()),
            layout_cx: RefCell::new(parley::LayoutContext::new()),
            display_scale: 1.0,
        }
    }

    /// Sets the display scale (device pixel ratio) passed to Parley.
    ///
    /// Widths are always reported in logical pixels.
    #[must_use]
    pub fn with_display_scale(mut self, display_scale: f32) -> Self {
        self.display_scale = display_scale.max(1.0e-6);
        self
    }

    fn font_stack(family: &FontFamily) -> FontStack<'_> {
        FontStack::from(match family {
            FontFamily::Serif => ParleyFontFamily::Generic(GenericFamily::Serif),
            FontFamily::SansSerif => ParleyFontFamily::Generic(GenericFamily::SansSerif),
            FontFamily::Monospace => ParleyFontFamily::Generic(GenericFamily::Monospace),
            FontFamily::Named(name) => ParleyFontFamily::Named(Cow::Borrowed(name.as_ref())),
        })
    }

    fn font_style(style: FontStyle) -> ParleyFontStyle {
        match style {
            FontStyle::Normal => ParleyFontStyle::Normal,
            FontStyle::Italic => ParleyFontStyle::Italic,
            FontStyle::Oblique => ParleyFontStyle::Oblique(None),
        }
    }

    #[allow(
        clippy::cast_possible_truncation,
        reason = "bounded by f32::MAX before the cast"
    )]
    fn font_size(style: &TextStyle) -> Option<f32> {
        let size = style.font_size;
        if !size.is_finite() || size <= 0.0 || size >= f64::from(f32::MAX) {
            return None;
        }
        Some(size as f32)
    }

    fn line_metrics(&self, text: &str, size: f32, style: &TextStyle) -> Option<TextMetrics> {
        let mut font_cx = self.font_cx.borrow_mut();
        let mut layout_cx = self.layout_cx.borrow_mut();

        let mut builder = layout_cx.ranged_builder(&mut font_cx, text, self.display_scale, true);
        builder.push_default(StyleProperty::FontSize(size));
        builder.push_default(StyleProperty::FontStack(Self::font_stack(
            &style.font_family,
        )));
        builder.push_default(StyleProperty::FontStyle(Self::font_style(
            style.font_style,
        )));
        builder.push_default(StyleProperty::FontWeight(FontWeight::new(f32::from(
            style.font_weight.0,
        ))));

        let mut layout: parley::Layout<()> = builder.build(text);
        layout.break_all_lines(None);
        layout.align(None, Alignment::Start, AlignmentOptions::default());

        let line = layout.lines().next()?;
        let m = line.metrics();
        let scale = f64::from(self.display_scale);
        Some(TextMetrics {
            advance_width: f64::from(m.advance) / scale,
            ascent: f64::from(m.ascent) / scale,
            descent: f64::from(m.descent) / scale,
            leading: f64::from(m.leading) / scale,
        })
    }
}

impl Default for ParleyTextMeasurer {
    fn default() -> Self {
        Self::new()
    }
}

impl TextMeasurer for ParleyTextMeasurer {
    fn measure(
        &self,
        text: &str,
        style: &TextStyle,
    ) -> Result<TextMetrics, MeasurementUnavailable> {
        let text = text.split('\n').next().unwrap_or("");
        if text.is_empty() {
            return Ok(TextMetrics::default());
        }
        let size = Self::font_size(style).ok_or(MeasurementUnavailable::new("invalid font size"))?;
        self.line_metrics(text, size, style)
            .ok_or(MeasurementUnavailable::new("parley produced no line"))
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    #[test]
    fn longer_labels_measure_wider() {
        let m = ParleyTextMeasurer::new();
        let style = TextStyle::new(16.0);
        let short = m.measure("Row 1", &style).unwrap();
        let long = m.measure("Row 1 with a much longer title", &style).unwrap();
        assert!(short.advance_width > 0.0);
        assert!(long.advance_width > short.advance_width);
    }

    #[test]
    fn empty_label_is_zero_width() {
        let m = ParleyTextMeasurer::new();
        let metrics = m.measure("", &TextStyle::default()).unwrap();
        assert_eq!(metrics, TextMetrics::default());
    }

    #[test]
    fn invalid_size_is_unavailable() {
        let m = ParleyTextMeasurer::new();
        assert!(m.measure("x", &TextStyle::new(f64::NAN)).is_err());
    }
}
