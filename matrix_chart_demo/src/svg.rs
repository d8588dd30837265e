// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Minimal SVG output for `matrix_chart_demo`.

use kurbo::Rect;
use matrix_chart::{Mark, MatrixFrame, TextAnchor, TextBaseline};
use peniko::Brush;

/// Renders a frame as a standalone SVG document.
///
/// The body is clipped to the frame's viewport height, the way a host with a
/// scrolling body container would show it before any scrolling.
pub(crate) fn frame_to_svg(frame: &MatrixFrame) -> String {
    let g = &frame.geometry;
    let view = Rect::new(0.0, 0.0, g.total_width, g.label_height + frame.viewport_height);
    let mut out = String::new();

    out.push_str(r#"<svg xmlns="http://www.w3.org/2000/svg" "#);
    out.push_str(&format!(
        r#"viewBox="{} {} {} {}" width="{}" height="{}" font-family="sans-serif">"#,
        view.x0,
        view.y0,
        view.width(),
        view.height(),
        view.width(),
        view.height()
    ));
    out.push('\n');
    out.push_str(&format!(
        r#"<clipPath id="body"><rect x="0" y="{}" width="{}" height="{}"/></clipPath>"#,
        g.label_height, g.total_width, frame.viewport_height
    ));
    out.push('\n');

    for mark in frame.marks() {
        match &mark {
            Mark::Rect(r) => {
                out.push_str(&format!(
                    r#"<rect x="{}" y="{}" width="{}" height="{}" clip-path="url(#body)""#,
                    r.rect.x0,
                    r.rect.y0,
                    r.rect.width(),
                    r.rect.height(),
                ));
                write_paint_attr(&mut out, "fill", &r.fill);
                write_opacity(&mut out, r.opacity);
                out.push_str("/>\n");
            }
            Mark::Rule(l) => {
                out.push_str(&format!(
                    r#"<line x1="{}" y1="{}" x2="{}" y2="{}" clip-path="url(#body)""#,
                    l.p0.x, l.p0.y, l.p1.x, l.p1.y
                ));
                write_paint_attr(&mut out, "stroke", &l.stroke);
                out.push_str(&format!(r#" stroke-width="{}""#, l.stroke_width));
                out.push_str("/>\n");
            }
            Mark::Text(t) => {
                let baseline = match t.baseline {
                    TextBaseline::Middle => "middle",
                    TextBaseline::Alphabetic => "alphabetic",
                    TextBaseline::Hanging => "hanging",
                    TextBaseline::Ideographic => "ideographic",
                };
                out.push_str(&format!(
                    r#"<text x="{}" y="{}" font-size="{}" dominant-baseline="{}""#,
                    t.pos.x, t.pos.y, t.font.font_size, baseline
                ));
                if t.angle != 0.0 {
                    out.push_str(&format!(
                        r#" transform="rotate({} {} {})""#,
                        t.angle, t.pos.x, t.pos.y
                    ));
                }
                out.push_str(match t.anchor {
                    TextAnchor::Start => r#" text-anchor="start""#,
                    TextAnchor::Middle => r#" text-anchor="middle""#,
                    TextAnchor::End => r#" text-anchor="end""#,
                });
                write_paint_attr(&mut out, "fill", &t.fill);
                write_opacity(&mut out, t.opacity);
                out.push('>');
                out.push_str(&escape_xml(&t.text));
                out.push_str("</text>\n");
            }
        }
    }

    out.push_str("</svg>\n");
    out
}

fn svg_paint(brush: &Brush) -> (String, Option<f64>) {
    match brush {
        Brush::Solid(color) => {
            let rgba = color.to_rgba8();
            let fill = format!("#{:02x}{:02x}{:02x}", rgba.r, rgba.g, rgba.b);
            let fill_opacity = (rgba.a != 255).then(|| f64::from(rgba.a) / 255.0);
            (fill, fill_opacity)
        }
        _ => ("none".to_string(), None),
    }
}

fn write_paint_attr(out: &mut String, name: &str, brush: &Brush) {
    let (value, opacity) = svg_paint(brush);
    out.push_str(&format!(r#" {name}="{value}""#));
    if let Some(o) = opacity {
        out.push_str(&format!(r#" {name}-opacity="{o}""#));
    }
}

fn write_opacity(out: &mut String, opacity: f32) {
    if opacity < 1.0 {
        out.push_str(&format!(r#" opacity="{opacity}""#));
    }
}

pub(crate) fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use matrix_chart::{AxisHeading, MatrixChart, MatrixData, MatrixSpec};
    use matrix_text::HeuristicTextMeasurer;
    use peniko::color::palette::css;

    use super::*;

    #[test]
    fn frames_render_every_mark() {
        let mut chart = MatrixChart::new(
            MatrixSpec::default().with_color_function(|_| css::ORANGE),
            vec![AxisHeading::new("a & b")],
            vec![AxisHeading::new("c")],
            MatrixData::from_dense(vec![vec![1]]),
            HeuristicTextMeasurer,
        )
        .unwrap();
        chart.resize(200.0);
        let svg = frame_to_svg(&chart.frame());

        assert_eq!(svg.matches("<rect").count(), 2, "clip rect + one cell");
        assert_eq!(svg.matches("<line").count(), 4);
        assert_eq!(svg.matches("<text").count(), 2);
        assert!(svg.contains("a &amp; b"));
        assert!(svg.contains("#ffa500"));
        assert!(svg.contains("rotate(-90"));
    }
}
