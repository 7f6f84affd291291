use approx::assert_relative_eq;
use chart_svg::api::{Chart, ChartConfig};
use chart_svg::core::{
    AreaOptions, BarOptions, Color, LineOptions, Margins, ScatterOptions, Series, SeriesStyle,
    Value, WaterfallOptions,
};
use chart_svg::render::{
    CanvasLayerKind, GroupPrimitive, LineStrokeStyle, PathCommand, Primitive, RenderFrame,
};

fn chart() -> Chart {
    Chart::new(ChartConfig::new(600, 300).with_margins(Margins::uniform(0.0)))
        .with_collection("labels", vec!["a", "b", "c"])
        .with_collection("counts", vec![1.0, 2.0, 3.0])
        .with_collection("x", vec![0.0, 10.0, 20.0])
        .with_collection("y", vec![5.0, 15.0, 25.0])
}

fn series_groups(frame: &RenderFrame) -> Vec<GroupPrimitive> {
    frame
        .layer(CanvasLayerKind::Series)
        .iter()
        .filter_map(|primitive| match primitive {
            Primitive::Group(group) => Some(group.clone()),
            _ => None,
        })
        .collect()
}

fn rects(group: &GroupPrimitive) -> Vec<chart_svg::render::RectPrimitive> {
    group
        .children
        .iter()
        .filter_map(|primitive| match primitive {
            Primitive::Rect(rect) => Some(*rect),
            _ => None,
        })
        .collect()
}

fn paths(group: &GroupPrimitive) -> Vec<chart_svg::render::PathPrimitive> {
    group
        .children
        .iter()
        .filter_map(|primitive| match primitive {
            Primitive::Path(path) => Some(path.clone()),
            _ => None,
        })
        .collect()
}

fn end_point(command: &PathCommand) -> Option<(f64, f64)> {
    match *command {
        PathCommand::MoveTo { x, y }
        | PathCommand::LineTo { x, y }
        | PathCommand::CubicTo { x, y, .. }
        | PathCommand::ArcTo { x, y, .. } => Some((x, y)),
        PathCommand::Close => None,
    }
}

#[test]
fn bars_stand_on_the_zero_baseline() {
    let frame = chart()
        .with_series(Series::new("bars", "labels", "counts", SeriesStyle::Bar(BarOptions::default())))
        .build_render_frame()
        .expect("frame");

    let groups = series_groups(&frame);
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].class, "series series-bar");

    let bars = rects(&groups[0]);
    assert_eq!(bars.len(), 3);
    assert_relative_eq!(bars[0].x, 20.0, epsilon = 1e-9);
    assert_relative_eq!(bars[0].width, 160.0, epsilon = 1e-9);
    assert_relative_eq!(bars[0].y, 200.0, epsilon = 1e-9);
    assert_relative_eq!(bars[0].height, 100.0, epsilon = 1e-9);
    assert_relative_eq!(bars[2].y, 0.0, epsilon = 1e-9);
    assert_relative_eq!(bars[2].height, 300.0, epsilon = 1e-9);
    assert_eq!(bars[0].fill, Some(Color::rgb(0x1f, 0x77, 0xb4)));
}

#[test]
fn grouped_bars_split_each_band() {
    let frame = chart()
        .with_collection("more", vec![3.0, 2.0, 1.0])
        .with_series(Series::new("first", "labels", "counts", SeriesStyle::Bar(BarOptions::default())))
        .with_series(Series::new("second", "labels", "more", SeriesStyle::Bar(BarOptions::default())))
        .build_render_frame()
        .expect("frame");

    let groups = series_groups(&frame);
    assert_eq!(groups.len(), 2);
    let first = rects(&groups[0]);
    let second = rects(&groups[1]);
    assert_relative_eq!(first[0].x, 20.0, epsilon = 1e-9);
    assert_relative_eq!(first[0].width, 80.0, epsilon = 1e-9);
    assert_relative_eq!(second[0].x, 100.0, epsilon = 1e-9);
    assert_eq!(second[0].fill, Some(Color::rgb(0xff, 0x7f, 0x0e)));
}

#[test]
fn horizontal_bars_grow_from_the_left_edge() {
    let options = BarOptions {
        horizontal: true,
        ..BarOptions::default()
    };
    let frame = chart()
        .with_series(Series::new("bars", "labels", "counts", SeriesStyle::Bar(options)))
        .build_render_frame()
        .expect("frame");

    let bars = rects(&series_groups(&frame)[0]);
    assert_eq!(bars.len(), 3);
    assert_relative_eq!(bars[2].x, 0.0, epsilon = 1e-9);
    assert_relative_eq!(bars[2].width, 600.0, epsilon = 1e-9);
    assert_relative_eq!(bars[0].width, 200.0, epsilon = 1e-9);
    assert_relative_eq!(bars[0].height, 80.0, epsilon = 1e-9);
}

#[test]
fn line_runs_become_polylines() {
    let frame = chart()
        .with_series(Series::new("line", "x", "y", SeriesStyle::Line(LineOptions::default())))
        .build_render_frame()
        .expect("frame");

    let groups = series_groups(&frame);
    assert_eq!(groups[0].class, "series series-line");
    let lines = paths(&groups[0]);
    assert_eq!(lines.len(), 1);
    assert_eq!(
        lines[0].commands,
        vec![
            PathCommand::MoveTo { x: 0.0, y: 300.0 },
            PathCommand::LineTo { x: 300.0, y: 150.0 },
            PathCommand::LineTo { x: 600.0, y: 0.0 },
        ]
    );
    assert_eq!(lines[0].fill, None);
    assert_eq!(lines[0].stroke_width, 2.0);
}

#[test]
fn gaps_split_lines_and_markers_follow_vertices() {
    let options = LineOptions {
        show_markers: true,
        ..LineOptions::default()
    };
    let frame = chart()
        .with_collection("x4", vec![0.0, 10.0, 20.0, 30.0])
        .with_collection("y4", vec![Value::from(5.0), Value::Null, Value::from(15.0), Value::from(25.0)])
        .with_series(Series::new("line", "x4", "y4", SeriesStyle::Line(options)))
        .build_render_frame()
        .expect("frame");

    let group = &series_groups(&frame)[0];
    assert_eq!(paths(group).len(), 1);
    let markers = group
        .children
        .iter()
        .filter(|primitive| matches!(primitive, Primitive::Circle(_)))
        .count();
    assert_eq!(markers, 3);
}

#[test]
fn splines_use_cubic_segments_through_every_vertex() {
    let frame = chart()
        .with_series(Series::new("smooth", "x", "y", SeriesStyle::Spline(LineOptions::default())))
        .build_render_frame()
        .expect("frame");

    let groups = series_groups(&frame);
    assert_eq!(groups[0].class, "series series-spline");
    let curve = &paths(&groups[0])[0];
    assert!(matches!(curve.commands[0], PathCommand::MoveTo { .. }));
    let cubic = curve
        .commands
        .iter()
        .filter(|command| matches!(command, PathCommand::CubicTo { .. }))
        .count();
    assert_eq!(cubic, 2);
    let (x, y) = end_point(curve.commands.last().expect("last")).expect("end point");
    assert_relative_eq!(x, 600.0, epsilon = 1e-9);
    assert_relative_eq!(y, 0.0, epsilon = 1e-9);
}

#[test]
fn zero_smoothing_puts_controls_on_the_endpoints() {
    let options = LineOptions {
        smoothing: 0.0,
        ..LineOptions::default()
    };
    let frame = chart()
        .with_series(Series::new("smooth", "x", "y", SeriesStyle::Spline(options)))
        .build_render_frame()
        .expect("frame");

    let curve = &paths(&series_groups(&frame)[0])[0];
    let PathCommand::CubicTo { c1x, c1y, c2x, c2y, x, y } = curve.commands[1] else {
        panic!("expected cubic segment");
    };
    assert_relative_eq!(c1x, 0.0, epsilon = 1e-9);
    assert_relative_eq!(c1y, 300.0, epsilon = 1e-9);
    assert_relative_eq!(c2x, x, epsilon = 1e-9);
    assert_relative_eq!(c2y, y, epsilon = 1e-9);
}

#[test]
fn area_fills_down_to_zero() {
    let frame = chart()
        .with_series(Series::new("area", "x", "y", SeriesStyle::Area(AreaOptions::default())))
        .build_render_frame()
        .expect("frame");

    let group = &series_groups(&frame)[0];
    let shapes = paths(group);
    assert_eq!(shapes.len(), 2);

    let fill = &shapes[0];
    assert_eq!(fill.commands.len(), 7);
    assert!(matches!(fill.commands[0], PathCommand::MoveTo { .. }));
    let expected = [(0.0, 300.0), (0.0, 240.0), (300.0, 120.0), (600.0, 0.0), (600.0, 300.0), (0.0, 300.0)];
    for (command, (ex, ey)) in fill.commands.iter().zip(expected) {
        let (x, y) = end_point(command).expect("vertex");
        assert_relative_eq!(x, ex, epsilon = 1e-9);
        assert_relative_eq!(y, ey, epsilon = 1e-9);
    }
    assert_eq!(fill.commands[6], PathCommand::Close);
    let fill_color = fill.fill.expect("area fill");
    assert_relative_eq!(fill_color.alpha, 0.35, epsilon = 1e-9);

    let outline = &shapes[1];
    assert_eq!(outline.commands.len(), 3);
    assert_eq!(outline.fill, None);
}

#[test]
fn scatter_skips_gaps() {
    let frame = chart()
        .with_collection("sparse", vec![Value::from(5.0), Value::Null, Value::from(25.0)])
        .with_series(Series::new("dots", "x", "sparse", SeriesStyle::Scatter(ScatterOptions::default())))
        .build_render_frame()
        .expect("frame");

    let group = &series_groups(&frame)[0];
    let circles: Vec<_> = group
        .children
        .iter()
        .filter_map(|primitive| match primitive {
            Primitive::Circle(circle) => Some(*circle),
            _ => None,
        })
        .collect();
    assert_eq!(circles.len(), 2);
    assert_relative_eq!(circles[0].cx, 0.0, epsilon = 1e-9);
    assert_relative_eq!(circles[0].cy, 300.0, epsilon = 1e-9);
    assert_relative_eq!(circles[1].cx, 600.0, epsilon = 1e-9);
    assert_relative_eq!(circles[1].cy, 0.0, epsilon = 1e-9);
    assert_relative_eq!(circles[0].radius, 3.5, epsilon = 1e-9);
}

#[test]
fn waterfall_floats_bars_between_running_totals() {
    let options = WaterfallOptions::default();
    let frame = chart()
        .with_collection("deltas", vec![10.0, -4.0, 6.0])
        .with_series(Series::new("steps", "labels", "deltas", SeriesStyle::Waterfall(options.clone())))
        .build_render_frame()
        .expect("frame");

    let group = &series_groups(&frame)[0];
    let bars = rects(group);
    assert_eq!(bars.len(), 4);

    assert_relative_eq!(bars[0].x, 22.5, epsilon = 1e-9);
    assert_relative_eq!(bars[0].width, 105.0, epsilon = 1e-9);
    assert_relative_eq!(bars[0].y, 100.0, epsilon = 1e-9);
    assert_relative_eq!(bars[0].height, 200.0, epsilon = 1e-9);
    assert_eq!(bars[0].fill, Some(options.positive_color));

    assert_relative_eq!(bars[1].y, 100.0, epsilon = 1e-9);
    assert_relative_eq!(bars[1].height, 80.0, epsilon = 1e-9);
    assert_eq!(bars[1].fill, Some(options.negative_color));

    assert_relative_eq!(bars[3].y, 60.0, epsilon = 1e-9);
    assert_relative_eq!(bars[3].height, 240.0, epsilon = 1e-9);
    assert_eq!(bars[3].fill, Some(options.total_color));

    let connectors: Vec<_> = group
        .children
        .iter()
        .filter_map(|primitive| match primitive {
            Primitive::Line(line) => Some(*line),
            _ => None,
        })
        .collect();
    assert_eq!(connectors.len(), 3);
    assert!(connectors.iter().all(|line| line.stroke_style == LineStrokeStyle::Dashed));
    assert_relative_eq!(connectors[0].y1, 100.0, epsilon = 1e-9);
    assert_relative_eq!(connectors[0].x1, bars[0].x + bars[0].width, epsilon = 1e-9);
    assert_relative_eq!(connectors[0].x2, bars[1].x, epsilon = 1e-9);
}

#[test]
fn waterfall_without_total_or_connectors() {
    let options = WaterfallOptions {
        show_total: false,
        show_connectors: false,
        ..WaterfallOptions::default()
    };
    let frame = chart()
        .with_collection("deltas", vec![10.0, -4.0, 6.0])
        .with_series(Series::new("steps", "labels", "deltas", SeriesStyle::Waterfall(options)))
        .build_render_frame()
        .expect("frame");

    let group = &series_groups(&frame)[0];
    assert_eq!(rects(group).len(), 3);
    assert!(group.children.iter().all(|primitive| matches!(primitive, Primitive::Rect(_))));
}

#[test]
fn short_series_are_dropped_without_failing_the_chart() {
    let frame = chart()
        .with_collection("one_x", vec![5.0])
        .with_collection("one_y", vec![10.0])
        .with_series(Series::new("line", "x", "y", SeriesStyle::Line(LineOptions::default())))
        .with_series(Series::new("lonely", "one_x", "one_y", SeriesStyle::Line(LineOptions::default())))
        .build_render_frame()
        .expect("frame");

    assert_eq!(series_groups(&frame).len(), 1);
}
