// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A single-page HTML report wrapping the demo SVGs.

use crate::svg::escape_xml;

/// One demo: a title, a short description, and one or more SVG snapshots.
#[derive(Debug)]
pub(crate) struct HtmlSection {
    pub(crate) title: String,
    pub(crate) description: String,
    pub(crate) figures: Vec<(String, String)>,
}

impl HtmlSection {
    pub(crate) fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            figures: Vec::new(),
        }
    }

    /// Adds a captioned SVG.
    pub(crate) fn with_figure(mut self, caption: impl Into<String>, svg: String) -> Self {
        self.figures.push((caption.into(), svg));
        self
    }
}

pub(crate) fn render_report(title: &str, sections: &[HtmlSection]) -> String {
    let mut out = String::new();
    out.push_str("<!doctype html>\n<html><head><meta charset=\"utf-8\">");
    out.push_str(&format!("<title>{}</title>", escape_xml(title)));
    out.push_str(
        "<style>body{font-family:sans-serif;margin:2em}figure{display:inline-block;\
         margin:0 2em 2em 0;vertical-align:top}figcaption{color:#555;font-size:0.9em}</style>",
    );
    out.push_str("</head><body>\n");
    out.push_str(&format!("<h1>{}</h1>\n", escape_xml(title)));
    for section in sections {
        out.push_str(&format!("<section><h2>{}</h2>\n", escape_xml(&section.title)));
        out.push_str(&format!("<p>{}</p>\n", escape_xml(&section.description)));
        for (caption, svg) in &section.figures {
            out.push_str("<figure>\n");
            out.push_str(svg);
            out.push_str(&format!("<figcaption>{}</figcaption>\n", escape_xml(caption)));
            out.push_str("</figure>\n");
        }
        out.push_str("</section>\n");
    }
    out.push_str("</body></html>\n");
    out
}
