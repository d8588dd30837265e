// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Text measurement hooks for matrix label layout.
//!
//! A matrix chart reserves space on its left for row labels and on its top for
//! rotated column headings. How much space depends on rendered text widths, which
//! only the host's text stack can answer, so chart code depends on a tiny text
//! measurement interface instead of a font engine.
//!
//! This crate is intentionally:
//! - small and dependency-light,
//! - `no_std`-friendly (it uses `alloc` for owned font family names), and
//! - renderer-agnostic (native shaping engines and web canvas measurement can
//!   both implement the same trait).
//!
//! Measurement can fail: a web host without a canvas context, or a shaping
//! backend that has no usable font, reports [`MeasurementUnavailable`] and the
//! caller decides on a fallback.

#![no_std]

extern crate alloc;

use alloc::boxed::Box;
use alloc::format;
use alloc::string::String;
use alloc::sync::Arc;

/// The measurement backend could not produce metrics.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("text measurement unavailable: {reason}")]
pub struct MeasurementUnavailable {
    /// Short description of what was missing.
    pub reason: &'static str,
}

impl MeasurementUnavailable {
    /// Creates an error with the given reason.
    #[must_use]
    pub const fn new(reason: &'static str) -> Self {
        Self { reason }
    }
}

/// A minimal text measurement interface used for label layout.
///
/// Implementations can be:
/// - heuristic (fast, but inaccurate),
/// - backed by a shaping engine (e.g. Parley), or
/// - backed by web platform text measurement (e.g. HTML canvas).
pub trait TextMeasurer {
    /// Measure a single line of text.
    ///
    /// `text` is treated as a single line; callers should split on `\n` if they
    /// want multi-line layout.
    fn measure(&self, text: &str, style: &TextStyle)
    -> Result<TextMetrics, MeasurementUnavailable>;
}

impl<M: TextMeasurer + ?Sized> TextMeasurer for &M {
    fn measure(
        &self,
        text: &str,
        style: &TextStyle,
    ) -> Result<TextMetrics, MeasurementUnavailable> {
        (**self).measure(text, style)
    }
}

impl<M: TextMeasurer + ?Sized> TextMeasurer for Box<M> {
    fn measure(
        &self,
        text: &str,
        style: &TextStyle,
    ) -> Result<TextMetrics, MeasurementUnavailable> {
        (**self).measure(text, style)
    }
}

/// Returns the widest advance among `texts`, or `0.0` when there are none.
///
/// The first failing measurement aborts the scan.
pub fn measure_max<'a, M, I>(
    measurer: &M,
    style: &TextStyle,
    texts: I,
) -> Result<f64, MeasurementUnavailable>
where
    M: TextMeasurer + ?Sized,
    I: IntoIterator<Item = &'a str>,
{
    let mut widest = 0.0_f64;
    for text in texts {
        let metrics = measurer.measure(text, style)?;
        widest = widest.max(metrics.advance_width);
    }
    Ok(widest)
}

/// Text styling inputs relevant to measurement.
///
/// This is intentionally minimal: it's just enough to make label layout
/// consistent between the chart and whatever draws it.
#[derive(Clone, Debug, PartialEq)]
pub struct TextStyle {
    /// Font size in the chart's coordinate system (pixels).
    pub font_size: f64,
    /// The preferred font family.
    pub font_family: FontFamily,
    /// Font weight (e.g. `400` for normal, `700` for bold).
    pub font_weight: FontWeight,
    /// Font style (normal/italic/oblique).
    pub font_style: FontStyle,
}

impl TextStyle {
    /// Creates a sans-serif `TextStyle` with the given `font_size`.
    #[must_use]
    pub fn new(font_size: f64) -> Self {
        Self {
            font_size,
            font_family: FontFamily::SansSerif,
            font_weight: FontWeight::NORMAL,
            font_style: FontStyle::Normal,
        }
    }

    /// Sets the font family.
    #[must_use]
    pub fn with_family(mut self, family: FontFamily) -> Self {
        self.font_family = family;
        self
    }

    /// Sets the font weight.
    #[must_use]
    pub fn with_weight(mut self, weight: FontWeight) -> Self {
        self.font_weight = weight;
        self
    }

    /// Parses a CSS `font` shorthand such as `"16px sans-serif"`,
    /// `"bold 12pt 'Helvetica Neue', arial"` or `"italic 14px/1.2 serif"`.
    ///
    /// Point sizes are converted to pixels (`1pt = 4/3 px`). Only the first
    /// family of a fallback list is kept; a missing family means sans-serif.
    /// Returns `None` if no valid size is present.
    #[must_use]
    pub fn parse_css(descriptor: &str) -> Option<Self> {
        let mut style = FontStyle::Normal;
        let mut weight = FontWeight::NORMAL;
        let mut rest = descriptor.trim();

        let font_size = loop {
            let (token, tail) = match rest.find(char::is_whitespace) {
                Some(i) => (&rest[..i], rest[i..].trim_start()),
                None => (rest, ""),
            };
            if token.is_empty() {
                return None;
            }
            rest = tail;
            if let Some(size) = parse_css_size(token) {
                break size;
            }
            match token {
                "normal" => {}
                "italic" => style = FontStyle::Italic,
                "oblique" => style = FontStyle::Oblique,
                "bold" => weight = FontWeight::BOLD,
                _ => weight = FontWeight(token.parse().ok()?),
            }
        };

        let family = rest
            .split(',')
            .next()
            .map(|f| f.trim().trim_matches(|c| c == '"' || c == '\''))
            .filter(|f| !f.is_empty())
            .map_or(FontFamily::SansSerif, FontFamily::from_css_family);

        Some(Self {
            font_size,
            font_family: family,
            font_weight: weight,
            font_style: style,
        })
    }

    /// Returns a CSS `font` shorthand for this style, suitable for canvas contexts.
    #[must_use]
    pub fn to_css(&self) -> String {
        let font_style = match self.font_style {
            FontStyle::Normal => "normal",
            FontStyle::Italic => "italic",
            FontStyle::Oblique => "oblique",
        };
        let family = match &self.font_family {
            FontFamily::Named(name) if name.contains(' ') => format!("\"{name}\""),
            family => String::from(family.as_css_family()),
        };
        format!(
            "{font_style} {} {}px {family}",
            self.font_weight.0, self.font_size
        )
    }
}

impl Default for TextStyle {
    fn default() -> Self {
        Self::new(16.0)
    }
}

fn parse_css_size(token: &str) -> Option<f64> {
    // `14px/1.2`: the line height is irrelevant for single-line measurement.
    let token = token.split('/').next()?;
    let (number, scale) = if let Some(n) = token.strip_suffix("px") {
        (n, 1.0)
    } else if let Some(n) = token.strip_suffix("pt") {
        (n, 4.0 / 3.0)
    } else {
        return None;
    };
    let size: f64 = number.parse().ok()?;
    (size.is_finite() && size > 0.0).then_some(size * scale)
}

/// Font family selection for measurement.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum FontFamily {
    /// A generic serif family (CSS `serif`).
    Serif,
    /// A generic sans-serif family (CSS `sans-serif`).
    SansSerif,
    /// A generic monospace family (CSS `monospace`).
    Monospace,
    /// A named family (e.g. `"Inter"`, `"Helvetica Neue"`).
    Named(Arc<str>),
}

impl FontFamily {
    /// Returns the font family string for CSS-style font declarations.
    #[must_use]
    pub fn as_css_family(&self) -> &str {
        match self {
            Self::Serif => "serif",
            Self::SansSerif => "sans-serif",
            Self::Monospace => "monospace",
            Self::Named(name) => name,
        }
    }

    /// Maps a CSS family name onto a generic family where one matches.
    #[must_use]
    pub fn from_css_family(name: &str) -> Self {
        match name {
            "serif" => Self::Serif,
            "sans-serif" => Self::SansSerif,
            "monospace" => Self::Monospace,
            _ => Self::Named(Arc::from(name)),
        }
    }
}

/// CSS-style font weights.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FontWeight(pub u16);

impl FontWeight {
    /// Normal weight (`400`).
    pub const NORMAL: Self = Self(400);
    /// Bold weight (`700`).
    pub const BOLD: Self = Self(700);
}

/// CSS-style font styles.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FontStyle {
    /// Normal style.
    Normal,
    /// Italic style.
    Italic,
    /// Oblique style.
    Oblique,
}

/// Measured metrics for a single line of text.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TextMetrics {
    /// The advance width (useful for horizontal layout).
    pub advance_width: f64,
    /// Distance from baseline to the top of typical glyphs.
    pub ascent: f64,
    /// Distance from baseline to the bottom of typical glyphs.
    pub descent: f64,
    /// Additional line spacing beyond ascent+descent.
    pub leading: f64,
}

impl TextMetrics {
    /// Returns `ascent + descent + leading`.
    #[must_use]
    pub fn line_height(&self) -> f64 {
        self.ascent + self.descent + self.leading
    }
}

/// A tiny heuristic text measurer suitable for demos, tests and headless layout.
///
/// It assumes an average glyph width of ~0.6em and a baseline at ~0.8em, and
/// never fails.
#[derive(Clone, Copy, Debug, Default)]
pub struct HeuristicTextMeasurer;

impl TextMeasurer for HeuristicTextMeasurer {
    fn measure(
        &self,
        text: &str,
        style: &TextStyle,
    ) -> Result<TextMetrics, MeasurementUnavailable> {
        Ok(TextMetrics {
            advance_width: 0.6 * style.font_size * text.chars().count() as f64,
            ascent: 0.8 * style.font_size,
            descent: 0.2 * style.font_size,
            leading: 0.0,
        })
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::vec;
    use alloc::vec::Vec;

    use super::*;

    struct Unavailable;

    impl TextMeasurer for Unavailable {
        fn measure(
            &self,
            _text: &str,
            _style: &TextStyle,
        ) -> Result<TextMetrics, MeasurementUnavailable> {
            Err(MeasurementUnavailable::new("no backend"))
        }
    }

    #[test]
    fn measure_max_of_nothing_is_zero() {
        let empty: Vec<&str> = Vec::new();
        let w = measure_max(&HeuristicTextMeasurer, &TextStyle::new(10.0), empty).unwrap();
        assert_eq!(w, 0.0);

        // An unavailable backend is never consulted for an empty list.
        let w = measure_max(&Unavailable, &TextStyle::new(10.0), []).unwrap();
        assert_eq!(w, 0.0);
    }

    #[test]
    fn measure_max_picks_the_widest_label() {
        let labels = vec!["a", "abcd", "ab"];
        let w = measure_max(&HeuristicTextMeasurer, &TextStyle::new(10.0), labels).unwrap();
        assert!((w - 24.0).abs() < 1e-9, "got {w}");
    }

    #[test]
    fn measure_max_propagates_unavailable() {
        let err = measure_max(&Unavailable, &TextStyle::default(), ["x"]).unwrap_err();
        assert_eq!(err.reason, "no backend");
    }

    #[test]
    fn parses_pixel_and_point_descriptors() {
        let s = TextStyle::parse_css("16px sans-serif").unwrap();
        assert_eq!(s, TextStyle::new(16.0));

        let s = TextStyle::parse_css("12pt arial").unwrap();
        assert!((s.font_size - 16.0).abs() < 1e-9);
        assert_eq!(s.font_family, FontFamily::Named(Arc::from("arial")));
    }

    #[test]
    fn parses_style_weight_and_family_list() {
        let s = TextStyle::parse_css("italic bold 14px/1.2 'Helvetica Neue', arial").unwrap();
        assert_eq!(s.font_style, FontStyle::Italic);
        assert_eq!(s.font_weight, FontWeight::BOLD);
        assert_eq!(s.font_size, 14.0);
        assert_eq!(s.font_family, FontFamily::Named(Arc::from("Helvetica Neue")));

        let s = TextStyle::parse_css("300 10px").unwrap();
        assert_eq!(s.font_weight, FontWeight(300));
        assert_eq!(s.font_family, FontFamily::SansSerif);
    }

    #[test]
    fn rejects_descriptors_without_size() {
        assert!(TextStyle::parse_css("").is_none());
        assert!(TextStyle::parse_css("bold sans-serif").is_none());
        assert!(TextStyle::parse_css("-3px serif").is_none());
    }

    #[test]
    fn css_round_trips_through_parse() {
        let s = TextStyle::new(13.0)
            .with_family(FontFamily::Named(Arc::from("Fira Sans")))
            .with_weight(FontWeight::BOLD);
        assert_eq!(s.to_css(), "normal 700 13px \"Fira Sans\"");
        assert_eq!(TextStyle::parse_css(&s.to_css()), Some(s));
    }
}
