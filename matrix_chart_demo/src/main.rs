// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Matrix chart demos.
//!
//! Writes `matrix_chart_demo.html`, an HTML report of SVG snapshots. Set
//! `RUST_LOG=matrix_chart=debug` to see layout decisions.

mod html;
mod svg;

use kurbo::Point;
use matrix_chart::{
    Axis, AxisHeading, CellEntry, CellValue, ColorScale, ConfigError, HoverTarget, MatrixChart,
    MatrixData, MatrixEvents, MatrixSpec, OrderTable, RowRecord, ViewportListeners,
};
use matrix_text::TextMeasurer;
use peniko::Color;
use peniko::color::palette::css;
use tracing_subscriber::EnvFilter;

use crate::html::HtmlSection;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let sections = vec![
        records_demo()?,
        ordering_demo()?,
        scrolling_demo()?,
        resize_demo()?,
        sparse_demo()?,
    ];

    let html = html::render_report("Matrix chart demo", &sections);
    std::fs::write("matrix_chart_demo.html", html)?;
    tracing::info!(sections = sections.len(), "wrote matrix_chart_demo.html");
    Ok(())
}

fn demo_measurer() -> Box<dyn TextMeasurer> {
    #[cfg(feature = "parley")]
    {
        Box::new(matrix_text_parley::ParleyTextMeasurer::new())
    }

    #[cfg(not(feature = "parley"))]
    {
        Box::new(matrix_text::HeuristicTextMeasurer)
    }
}

/// Logs every callback, the way a host would forward them.
#[derive(Debug, Default)]
struct TracingEvents {
    count: usize,
}

impl MatrixEvents for TracingEvents {
    fn on_hover(&mut self, row: Option<usize>, col: Option<usize>) {
        self.count += 1;
        tracing::info!(?row, ?col, "hover");
    }

    fn on_leave(&mut self) {
        self.count += 1;
        tracing::info!("leave");
    }

    fn on_click(&mut self, row: Option<usize>, col: Option<usize>) {
        self.count += 1;
        tracing::info!(?row, ?col, "click");
    }
}

fn status_color(value: &CellValue) -> Color {
    match value.as_f64() {
        Some(v) if v == 1.0 => css::ORANGE,
        Some(v) if v == 2.0 => Color::from_rgb8(0x34, 0x98, 0xdb),
        Some(v) if v == 3.0 => Color::from_rgb8(0x2e, 0xcc, 0x71),
        _ => matrix_chart::UNMAPPED_COLOR,
    }
}

fn records_demo() -> Result<HtmlSection, ConfigError> {
    let records = vec![
        RowRecord {
            title: "Row 1".into(),
            count: None,
            values: vec![1.into(), 3.into(), 3.into()],
        },
        RowRecord {
            title: "Row asdad2".into(),
            count: Some(2),
            values: vec![3.into(), 2.into(), 1.into()],
        },
        RowRecord {
            title: "Row 3".into(),
            count: Some(3),
            values: vec![1.into(), 3.into(), 2.into()],
        },
    ];
    let (rows, data) = MatrixData::from_records(records);
    let columns = ["column A", "column B", "column C"]
        .into_iter()
        .map(AxisHeading::new)
        .collect();

    let spec = MatrixSpec::default()
        .with_color_function(status_color)
        .with_content_max_height(1000.0);
    let mut chart = MatrixChart::new(spec, rows, columns, data, demo_measurer())?;
    let mut events = TracingEvents::default();
    chart.resize(420.0);

    let idle = svg::frame_to_svg(&chart.frame());
    chart.pointer_over(HoverTarget::Cell { row: 1, col: 2 }, &mut events);
    let cell = svg::frame_to_svg(&chart.frame());
    chart.pointer_over(HoverTarget::ColumnLabel(0), &mut events);
    let column = svg::frame_to_svg(&chart.frame());
    chart.pointer_leave(&mut events);

    Ok(HtmlSection::new(
        "Record input",
        "Rows given as {title, count, values} records, colored by a function.",
    )
    .with_figure("idle", idle)
    .with_figure("hover cell (1, 2)", cell)
    .with_figure("hover column A", column))
}

fn ordering_demo() -> Result<HtmlSection, ConfigError> {
    let rows = vec![
        AxisHeading::with_count("Parsing", 9),
        AxisHeading::with_count("Layout", 17),
        AxisHeading::with_count("Rendering", 4),
        AxisHeading::with_count("Input", 12),
    ];
    let columns = vec![
        AxisHeading::with_count("linux", 3),
        AxisHeading::with_count("macos", 8),
        AxisHeading::with_count("windows", 5),
    ];
    let data = MatrixData::from_dense(vec![
        vec![1, 2, 3],
        vec![3, 3, 2],
        vec![1, 1, 2],
        vec![2, 3, 1],
    ]);

    // Sorting is the caller's job; the chart only selects a permutation.
    let mut order = OrderTable::new();
    for (axis, headings) in [(Axis::Rows, &rows), (Axis::Columns, &columns)] {
        let mut by_name: Vec<usize> = (0..headings.len()).collect();
        by_name.sort_by(|&a, &b| headings[a].name.cmp(&headings[b].name));
        let mut by_count: Vec<usize> = (0..headings.len()).collect();
        by_count.sort_by(|&a, &b| headings[b].count.cmp(&headings[a].count));
        order.insert(axis, "name", by_name)?;
        order.insert(axis, "count", by_count)?;
    }

    let spec = MatrixSpec::default()
        .with_color_function(status_color)
        .with_order(order)
        .with_order_key(Axis::Rows, "name")
        .with_order_key(Axis::Columns, "name");
    let mut chart = MatrixChart::new(spec, rows, columns, data, demo_measurer())?;
    chart.resize(360.0);
    let by_name = svg::frame_to_svg(&chart.frame());

    chart.set_order(Axis::Rows, Some("count"))?;
    chart.set_order(Axis::Columns, Some("count"))?;
    let by_count = svg::frame_to_svg(&chart.frame());

    chart.pointer_over(HoverTarget::RowLabel(1), &mut ());
    let hovered = svg::frame_to_svg(&chart.frame());

    Ok(HtmlSection::new(
        "Ordering",
        "Both axes switch between caller-computed name and count orderings.",
    )
    .with_figure("by name", by_name)
    .with_figure("by count (descending)", by_count)
    .with_figure("by count, hovering \"Layout\"", hovered))
}

fn scrolling_demo() -> Result<HtmlSection, ConfigError> {
    let rows: Vec<AxisHeading> = (0..30)
        .map(|i| AxisHeading::new(format!("item {i:02}")))
        .collect();
    let columns: Vec<AxisHeading> = ["todo", "doing", "done", "blocked"]
        .into_iter()
        .map(AxisHeading::new)
        .collect();
    let states = ["todo", "doing", "done", "blocked"];
    let data = MatrixData::from_dense(
        (0..rows.len())
            .map(|r| {
                (0..columns.len())
                    .map(|c| states[(r * 7 + c * 3) % states.len()])
                    .collect::<Vec<_>>()
            })
            .collect(),
    );
    let scale = ColorScale::new()
        .with("todo", css::LIGHT_GRAY)
        .with("doing", css::GOLD)
        .with("done", css::MEDIUM_SEA_GREEN)
        .with("blocked", css::TOMATO);

    let spec = MatrixSpec::default()
        .with_color_scale(scale)
        .with_content_max_height(200.0)
        .with_font_css("12px sans-serif")?
        .with_opacities(1.0, 0.25);
    let mut chart = MatrixChart::new(spec, rows, columns, data, demo_measurer())?;
    let g = chart.resize(300.0).clone();
    tracing::info!(
        scrollbar = g.scrollbar_reserved,
        viewport = g.viewport_height,
        content = g.total_height,
        "scrolling body"
    );

    let mut events = TracingEvents::default();
    let point = Point::new(
        g.label_width + g.col_band.band_width() * 2.5,
        g.label_height + 10.0,
    );
    chart.pointer_move(point, 60.0, &mut events);
    let hovered = svg::frame_to_svg(&chart.frame());

    Ok(HtmlSection::new(
        "Scrolling body",
        "30 rows capped at 200px: a scrollbar's width is reserved and the body is clipped. \
         The pointer is hit-tested with the body scrolled by 60px.",
    )
    .with_figure("hovering through the scrolled body", hovered))
}

fn resize_demo() -> Result<HtmlSection, ConfigError> {
    let rows = ["alpha", "beta", "gamma"].into_iter().map(AxisHeading::new).collect();
    let columns = ["x", "y", "z", "w"].into_iter().map(AxisHeading::new).collect();
    let data = MatrixData::from_dense(vec![vec![1, 2, 3, 1], vec![2, 3, 1, 2], vec![3, 1, 2, 3]]);
    let mut chart = MatrixChart::new(
        MatrixSpec::default().with_color_function(status_color),
        rows,
        columns,
        data,
        demo_measurer(),
    )?;

    let mut viewport = ViewportListeners::new();
    chart.mount(&mut viewport, 500.0);
    let mut section = HtmlSection::new(
        "Resizing",
        "The chart fills its container but never shrinks below labels plus 20px cells.",
    );
    for width in [500.0, 260.0, 40.0] {
        let g = chart.resize(width);
        let caption = format!(
            "container {width}px: chart {}px (min {}px)",
            g.total_width, g.min_total_width
        );
        section = section.with_figure(caption, svg::frame_to_svg(&chart.frame()));
    }
    chart.unmount(&mut viewport);
    debug_assert!(viewport.is_empty(), "unmount drops the subscription");
    Ok(section)
}

fn sparse_demo() -> Result<HtmlSection, ConfigError> {
    let rows = ["r0", "r1", "r2"].into_iter().map(AxisHeading::new).collect();
    let columns = ["c0", "c1", "c2"].into_iter().map(AxisHeading::new).collect();
    // Only the diagonal and one off-diagonal cell are present.
    let data = MatrixData::from_sparse(vec![
        vec![CellEntry::new(0, 0, 1), CellEntry::new(2, 0, 3)],
        vec![CellEntry::new(1, 1, 2)],
        vec![CellEntry::new(2, 2, 3)],
    ]);
    let spec = MatrixSpec::default()
        .with_color_function(status_color)
        .with_grid_lines_color(css::LIGHT_GRAY)
        .with_row_heading_format(|name: &str, _count: Option<u64>| name.to_uppercase());
    let mut chart = MatrixChart::new(spec, rows, columns, data, demo_measurer())?;
    chart.resize(240.0);
    let mut events = TracingEvents::default();
    let target = chart.hit_test(Point::new(5.0, chart.geometry().label_height + 30.0), 0.0);
    chart.click(target, &mut events);
    tracing::info!(callbacks = events.count, "sparse demo events");

    Ok(HtmlSection::new(
        "Sparse cells",
        "Explicit (r, c, z) cells address headings directly; missing cells stay empty.",
    )
    .with_figure("sparse", svg::frame_to_svg(&chart.frame())))
}
