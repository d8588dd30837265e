// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Web/WASM text measurement adapter.
//!
//! This crate provides a [`matrix_text::TextMeasurer`] implementation for
//! `wasm32-*` targets using HTML Canvas `measureText`, the same capability a
//! browser-hosted matrix would use to size its row and column labels.
//!
//! Notes:
//! - This uses `web-sys`/`wasm-bindgen` only on `wasm32` targets.
//! - Non-`wasm32` builds have no canvas: every measurement reports
//!   [`MeasurementUnavailable`], and chart layout falls back to its fixed label width.

#![no_std]

extern crate alloc;

use matrix_text::{MeasurementUnavailable, TextMeasurer, TextMetrics, TextStyle};

/// A `wasm32` measurer backed by HTML Canvas 2D text metrics.
#[derive(Clone, Debug)]
pub struct WebTextMeasurer {
    #[cfg(target_arch = "wasm32")]
    ctx: web_sys::CanvasRenderingContext2d,
}

#[cfg(not(target_arch = "wasm32"))]
impl Default for WebTextMeasurer {
    fn default() -> Self {
        Self::new()
    }
}

impl WebTextMeasurer {
    /// Creates a web measurer using a detached canvas element.
    ///
    /// This requires a browser-like environment with `window` and `document`.
    #[cfg(target_arch = "wasm32")]
    pub fn new() -> Result<Self, MeasurementUnavailable> {
        use wasm_bindgen::JsCast as _;

        let window = web_sys::window().ok_or(MeasurementUnavailable::new("missing window"))?;
        let document = window
            .document()
            .ok_or(MeasurementUnavailable::new("missing document"))?;
        let canvas = document
            .create_element("canvas")
            .ok()
            .and_then(|el| el.dyn_into::<web_sys::HtmlCanvasElement>().ok())
            .ok_or(MeasurementUnavailable::new("cannot create canvas"))?;
        let ctx = canvas
            .get_context("2d")
            .ok()
            .flatten()
            .and_then(|ctx| ctx.dyn_into::<web_sys::CanvasRenderingContext2d>().ok())
            .ok_or(MeasurementUnavailable::new("missing 2d context"))?;
        Ok(Self { ctx })
    }

    /// Creates a web measurer that uses an existing canvas 2D context.
    ///
    /// Embedders that already own a canvas can reuse it instead of having this
    /// crate create DOM nodes.
    #[cfg(target_arch = "wasm32")]
    #[must_use]
    pub fn from_canvas_context(ctx: web_sys::CanvasRenderingContext2d) -> Self {
        Self { ctx }
    }

    /// Creates a measurer for a target without a canvas; it never succeeds.
    #[cfg(not(target_arch = "wasm32"))]
    #[must_use]
    pub fn new() -> Self {
        Self {}
    }
}

impl TextMeasurer for WebTextMeasurer {
    fn measure(
        &self,
        text: &str,
        style: &TextStyle,
    ) -> Result<TextMetrics, MeasurementUnavailable> {
        #[cfg(target_arch = "wasm32")]
        {
            self.ctx.set_font(&style.to_css());
            let metrics = self
                .ctx
                .measure_text(text)
                .map_err(|_| MeasurementUnavailable::new("measureText failed"))?;

            let width = metrics.width();
            if !width.is_finite() {
                return Err(MeasurementUnavailable::new("measureText returned no width"));
            }

            // Bounding box fields are 0 in older engines; treat zeros as unknown.
            let ascent = metrics.actual_bounding_box_ascent();
            let descent = metrics.actual_bounding_box_descent();
            Ok(TextMetrics {
                advance_width: width,
                ascent: if ascent > 0.0 {
                    ascent
                } else {
                    0.8 * style.font_size
                },
                descent: if descent > 0.0 {
                    descent
                } else {
                    0.2 * style.font_size
                },
                leading: 0.0,
            })
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = (text, style);
            Err(MeasurementUnavailable::new(
                "canvas text measurement requires wasm32",
            ))
        }
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    extern crate std;

    use super::*;

    #[test]
    fn native_targets_report_unavailable() {
        let m = WebTextMeasurer::new();
        let err = m.measure("Row 1", &TextStyle::default()).unwrap_err();
        assert!(err.reason.contains("wasm32"), "unexpected reason {err}");
    }
}
