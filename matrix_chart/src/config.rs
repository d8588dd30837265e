// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Matrix chart configuration.

extern crate alloc;

use alloc::string::String;
use alloc::sync::Arc;
use core::fmt;

use matrix_text::TextStyle;
use peniko::Color;
use peniko::color::palette::css;

use crate::color::{ColorMapping, ColorScale};
use crate::data::CellValue;
use crate::error::ConfigError;
use crate::heading::{DefaultHeadingFormat, HeadingFormat};
use crate::interaction::HighlightPolicy;
use crate::layout::FALLBACK_LABEL_WIDTH;
use crate::order::{Axis, OrderTable};

/// Default minimum cell edge length.
pub const DEFAULT_MIN_RECT_SIZE: f64 = 20.0;
/// Default gap between labels and cells.
pub const DEFAULT_TEXT_OFFSET: f64 = 5.0;
/// Default transition duration, passed through to the renderer untouched.
pub const DEFAULT_TRANSITION_DURATION: &str = "1s";

/// Everything a matrix chart needs besides its headings and data.
#[derive(Clone)]
pub struct MatrixSpec {
    /// How cell values become colors. Required.
    pub color: Option<ColorMapping>,
    /// Body height beyond which the cells scroll.
    pub content_max_height: Option<f64>,
    /// Minimum cell edge length; also the row height.
    pub min_rect_size: f64,
    /// Gap between labels and cells.
    pub text_offset: f64,
    /// Label font.
    pub font: TextStyle,
    /// Column heading font, if different from [`MatrixSpec::font`].
    pub column_font: Option<TextStyle>,
    /// Gridline color.
    pub grid_lines_color: Color,
    /// Label text color.
    pub label_color: Color,
    /// Opacity of emphasized elements.
    pub normal_opacity: f32,
    /// Opacity of the rest.
    pub not_highlighted_opacity: f32,
    /// Emphasize everything while nothing is hovered.
    pub default_highlight_when_idle: bool,
    /// Transition duration hint for the renderer (e.g. `"1s"`).
    pub transition_duration: String,
    /// Row label formatter.
    pub format_row_heading: Arc<dyn HeadingFormat>,
    /// Column heading formatter.
    pub format_column_heading: Arc<dyn HeadingFormat>,
    /// Label extent used when text cannot be measured.
    pub fallback_label_width: f64,
    /// Available orderings.
    pub order: Option<OrderTable>,
    /// Active row sort key; `None` keeps heading order.
    pub row_order_key: Option<String>,
    /// Active column sort key; `None` keeps heading order.
    pub column_order_key: Option<String>,
}

impl Default for MatrixSpec {
    fn default() -> Self {
        let policy = HighlightPolicy::default();
        Self {
            color: None,
            content_max_height: None,
            min_rect_size: DEFAULT_MIN_RECT_SIZE,
            text_offset: DEFAULT_TEXT_OFFSET,
            font: TextStyle::default(),
            column_font: None,
            grid_lines_color: css::GRAY,
            label_color: css::BLACK,
            normal_opacity: policy.normal_opacity,
            not_highlighted_opacity: policy.not_highlighted_opacity,
            default_highlight_when_idle: policy.default_highlight_when_idle,
            transition_duration: String::from(DEFAULT_TRANSITION_DURATION),
            format_row_heading: Arc::new(DefaultHeadingFormat),
            format_column_heading: Arc::new(DefaultHeadingFormat),
            fallback_label_width: FALLBACK_LABEL_WIDTH,
            order: None,
            row_order_key: None,
            column_order_key: None,
        }
    }
}

impl fmt::Debug for MatrixSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MatrixSpec")
            .field("color", &self.color)
            .field("content_max_height", &self.content_max_height)
            .field("min_rect_size", &self.min_rect_size)
            .field("text_offset", &self.text_offset)
            .field("font", &self.font)
            .field("column_font", &self.column_font)
            .field("grid_lines_color", &self.grid_lines_color)
            .field("label_color", &self.label_color)
            .field("normal_opacity", &self.normal_opacity)
            .field("not_highlighted_opacity", &self.not_highlighted_opacity)
            .field(
                "default_highlight_when_idle",
                &self.default_highlight_when_idle,
            )
            .field("transition_duration", &self.transition_duration)
            .field("fallback_label_width", &self.fallback_label_width)
            .field("order", &self.order)
            .field("row_order_key", &self.row_order_key)
            .field("column_order_key", &self.column_order_key)
            .finish_non_exhaustive()
    }
}

impl MatrixSpec {
    /// A spec with all defaults and the given color mapping.
    pub fn new(color: impl Into<ColorMapping>) -> Self {
        Self {
            color: Some(color.into()),
            ..Self::default()
        }
    }

    /// Colors cells with a function.
    pub fn with_color_function(mut self, f: impl Fn(&CellValue) -> Color + 'static) -> Self {
        self.color = Some(ColorMapping::function(f));
        self
    }

    /// Colors cells with a lookup table.
    pub fn with_color_scale(mut self, scale: ColorScale) -> Self {
        self.color = Some(ColorMapping::Scale(scale));
        self
    }

    /// Lets the body scroll once it is taller than `height`.
    pub fn with_content_max_height(mut self, height: f64) -> Self {
        self.content_max_height = Some(height);
        self
    }

    /// Sets the minimum cell size.
    pub fn with_min_rect_size(mut self, size: f64) -> Self {
        self.min_rect_size = size;
        self
    }

    /// Sets the gap between labels and cells.
    pub fn with_text_offset(mut self, offset: f64) -> Self {
        self.text_offset = offset;
        self
    }

    /// Sets the label font.
    pub fn with_font(mut self, font: TextStyle) -> Self {
        self.font = font;
        self
    }

    /// Sets the label font from a CSS descriptor such as `"16pt arial"`.
    pub fn with_font_css(mut self, descriptor: &str) -> Result<Self, ConfigError> {
        self.font = TextStyle::parse_css(descriptor)
            .ok_or_else(|| ConfigError::InvalidFont(String::from(descriptor)))?;
        Ok(self)
    }

    /// Uses a different font for column headings.
    pub fn with_column_font(mut self, font: TextStyle) -> Self {
        self.column_font = Some(font);
        self
    }

    /// Sets the gridline color.
    pub fn with_grid_lines_color(mut self, color: Color) -> Self {
        self.grid_lines_color = color;
        self
    }

    /// Sets the label color.
    pub fn with_label_color(mut self, color: Color) -> Self {
        self.label_color = color;
        self
    }

    /// Sets the emphasized and dimmed opacities.
    pub fn with_opacities(mut self, normal: f32, not_highlighted: f32) -> Self {
        self.normal_opacity = normal;
        self.not_highlighted_opacity = not_highlighted;
        self
    }

    /// Sets whether everything is emphasized while nothing is hovered.
    pub fn with_default_highlight_when_idle(mut self, enabled: bool) -> Self {
        self.default_highlight_when_idle = enabled;
        self
    }

    /// Sets the transition duration hint.
    pub fn with_transition_duration(mut self, duration: impl Into<String>) -> Self {
        self.transition_duration = duration.into();
        self
    }

    /// Sets the row label formatter.
    pub fn with_row_heading_format(mut self, format: impl HeadingFormat + 'static) -> Self {
        self.format_row_heading = Arc::new(format);
        self
    }

    /// Sets the column heading formatter.
    pub fn with_column_heading_format(mut self, format: impl HeadingFormat + 'static) -> Self {
        self.format_column_heading = Arc::new(format);
        self
    }

    /// Sets the label extent used when text cannot be measured.
    pub fn with_fallback_label_width(mut self, width: f64) -> Self {
        self.fallback_label_width = width;
        self
    }

    /// Sets the available orderings.
    pub fn with_order(mut self, order: OrderTable) -> Self {
        self.order = Some(order);
        self
    }

    /// Selects the sort key for `axis`.
    pub fn with_order_key(mut self, axis: Axis, key: impl Into<String>) -> Self {
        *self.order_key_mut(axis) = Some(key.into());
        self
    }

    /// Active sort key for `axis`.
    pub fn order_key(&self, axis: Axis) -> Option<&str> {
        match axis {
            Axis::Rows => self.row_order_key.as_deref(),
            Axis::Columns => self.column_order_key.as_deref(),
        }
    }

    pub(crate) fn order_key_mut(&mut self, axis: Axis) -> &mut Option<String> {
        match axis {
            Axis::Rows => &mut self.row_order_key,
            Axis::Columns => &mut self.column_order_key,
        }
    }

    /// Font used for column headings.
    pub fn column_font(&self) -> &TextStyle {
        self.column_font.as_ref().unwrap_or(&self.font)
    }

    /// Opacity settings as a [`HighlightPolicy`].
    pub fn highlight_policy(&self) -> HighlightPolicy {
        HighlightPolicy {
            default_highlight_when_idle: self.default_highlight_when_idle,
            normal_opacity: self.normal_opacity,
            not_highlighted_opacity: self.not_highlighted_opacity,
        }
    }

    /// The color mapping, or [`ConfigError::MissingColorMapping`].
    pub fn color_mapping(&self) -> Result<&ColorMapping, ConfigError> {
        self.color.as_ref().ok_or(ConfigError::MissingColorMapping)
    }

    /// Checks the settings that do not depend on the data.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.color_mapping()?;
        if !self.min_rect_size.is_finite() || self.min_rect_size <= 0.0 {
            return Err(ConfigError::InvalidCellSize(self.min_rect_size));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::format;

    use matrix_text::FontFamily;

    use super::*;

    #[test]
    fn defaults_match_the_documented_table() {
        let spec = MatrixSpec::default();
        assert_eq!(spec.min_rect_size, 20.0);
        assert_eq!(spec.text_offset, 5.0);
        assert_eq!(spec.font.font_size, 16.0);
        assert_eq!(spec.font.font_family, FontFamily::SansSerif);
        assert_eq!(spec.grid_lines_color, css::GRAY);
        assert_eq!(spec.normal_opacity, 1.0);
        assert_eq!(spec.not_highlighted_opacity, 0.5);
        assert!(spec.default_highlight_when_idle);
        assert_eq!(spec.transition_duration, "1s");
        assert_eq!(spec.fallback_label_width, 100.0);
        assert_eq!(spec.format_row_heading.format("a", Some(0)), "a (0)");
        assert_eq!(spec.column_font(), &spec.font);
    }

    #[test]
    fn missing_color_mapping_is_a_config_error() {
        assert_eq!(
            MatrixSpec::default().validate(),
            Err(ConfigError::MissingColorMapping)
        );
        let spec = MatrixSpec::default().with_color_function(|_| css::RED);
        assert!(spec.validate().is_ok());
    }

    #[test]
    fn cell_size_must_be_positive() {
        let spec = MatrixSpec::new(ColorScale::new()).with_min_rect_size(0.0);
        assert_eq!(spec.validate(), Err(ConfigError::InvalidCellSize(0.0)));
        let spec = spec.with_min_rect_size(f64::INFINITY);
        assert!(matches!(spec.validate(), Err(ConfigError::InvalidCellSize(_))));
    }

    #[test]
    fn css_fonts_are_parsed_or_rejected() {
        let spec = MatrixSpec::default().with_font_css("12px monospace").unwrap();
        assert_eq!(spec.font.font_size, 12.0);
        assert_eq!(spec.font.font_family, FontFamily::Monospace);

        let err = MatrixSpec::default().with_font_css("large").unwrap_err();
        assert_eq!(err, ConfigError::InvalidFont("large".into()));
    }

    #[test]
    fn order_keys_are_per_axis() {
        let spec = MatrixSpec::default().with_order_key(Axis::Rows, "count");
        assert_eq!(spec.order_key(Axis::Rows), Some("count"));
        assert_eq!(spec.order_key(Axis::Columns), None);
        assert!(format!("{spec:?}").contains("count"));
    }
}
