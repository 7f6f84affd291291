use approx::assert_relative_eq;
use chart_svg::api::{Chart, ChartConfig};
use chart_svg::core::{
    BooleanOptions, Color, LabelSide, Margins, Orientation, PieOptions, PolarOptions, Series,
    SeriesStyle, TimelineLabelOptions, Value,
};
use chart_svg::render::{
    CanvasLayerKind, GroupPrimitive, PathCommand, Primitive, RectPrimitive, RenderFrame,
    TextHAlign, TextPrimitive,
};

fn base() -> Chart {
    Chart::new(ChartConfig::new(600, 300).with_margins(Margins::uniform(0.0)))
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

fn texts(group: &GroupPrimitive) -> Vec<TextPrimitive> {
    group
        .children
        .iter()
        .filter_map(|primitive| match primitive {
            Primitive::Text(text) => Some(text.clone()),
            _ => None,
        })
        .collect()
}

fn rects(group: &GroupPrimitive) -> Vec<RectPrimitive> {
    group
        .children
        .iter()
        .filter_map(|primitive| match primitive {
            Primitive::Rect(rect) => Some(*rect),
            _ => None,
        })
        .collect()
}

fn count_paths(group: &GroupPrimitive) -> usize {
    group
        .children
        .iter()
        .filter(|primitive| matches!(primitive, Primitive::Path(_)))
        .count()
}

fn pie_chart(values: Vec<Value>, options: PieOptions) -> Chart {
    let labels: Vec<Value> = (0..values.len())
        .map(|index| Value::from(format!("slice {index}")))
        .collect();
    base()
        .with_collection("labels", labels)
        .with_collection("values", values)
        .with_series(Series::new("share", "labels", "values", SeriesStyle::Pie(options)))
}

#[test]
fn pie_slices_follow_value_shares() {
    let values = vec![50.0, 30.0, 18.0, 2.0].into_iter().map(Value::from).collect();
    let frame = pie_chart(values, PieOptions::default())
        .build_render_frame()
        .expect("frame");

    let groups = series_groups(&frame);
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].class, "series series-pie");
    assert_eq!(count_paths(&groups[0]), 4);

    let labels: Vec<String> = texts(&groups[0]).into_iter().map(|text| text.text).collect();
    assert_eq!(labels, vec!["50.0%", "30.0%", "18.0%"]);

    let Some(Primitive::Path(first)) = groups[0].children.first() else {
        panic!("expected slice path");
    };
    assert_eq!(first.commands[0], PathCommand::MoveTo { x: 300.0, y: 150.0 });
    let PathCommand::LineTo { x, y } = first.commands[1] else {
        panic!("expected edge to outer radius");
    };
    assert_relative_eq!(x, 300.0, epsilon = 1e-9);
    assert_relative_eq!(y, 150.0 - 135.0, epsilon = 1e-9);
    assert_eq!(first.fill, Some(Color::rgb(0x1f, 0x77, 0xb4)));
}

#[test]
fn single_slice_pie_is_a_circle() {
    let frame = pie_chart(vec![Value::from(5.0)], PieOptions::default())
        .build_render_frame()
        .expect("frame");

    let group = &series_groups(&frame)[0];
    let Some(Primitive::Circle(circle)) = group.children.first() else {
        panic!("expected full circle");
    };
    assert_relative_eq!(circle.cx, 300.0, epsilon = 1e-9);
    assert_relative_eq!(circle.radius, 135.0, epsilon = 1e-9);
    assert_eq!(texts(group)[0].text, "100.0%");
}

#[test]
fn single_slice_donut_keeps_its_hole() {
    let options = PieOptions {
        inner_radius_ratio: 0.5,
        ..PieOptions::default()
    };
    let frame = pie_chart(vec![Value::from(5.0)], options)
        .build_render_frame()
        .expect("frame");

    let group = &series_groups(&frame)[0];
    let Some(Primitive::Path(ring)) = group.children.first() else {
        panic!("expected ring path");
    };
    let closes = ring
        .commands
        .iter()
        .filter(|command| matches!(command, PathCommand::Close))
        .count();
    assert_eq!(closes, 2);
}

#[test]
fn explicit_slice_colours_cycle() {
    let options = PieOptions {
        colors: vec![Color::BLACK, Color::WHITE],
        show_labels: false,
        ..PieOptions::default()
    };
    let values = vec![1.0, 1.0, 1.0].into_iter().map(Value::from).collect();
    let frame = pie_chart(values, options).build_render_frame().expect("frame");

    let fills: Vec<Option<Color>> = series_groups(&frame)[0]
        .children
        .iter()
        .filter_map(|primitive| match primitive {
            Primitive::Path(path) => Some(path.fill),
            _ => None,
        })
        .collect();
    assert_eq!(fills, vec![Some(Color::BLACK), Some(Color::WHITE), Some(Color::BLACK)]);
}

#[test]
fn pie_without_positive_values_is_dropped() {
    let values = vec![Value::from(0.0), Value::from(-3.0), Value::Null];
    let frame = pie_chart(values, PieOptions::default())
        .build_render_frame()
        .expect("frame");

    assert!(series_groups(&frame).is_empty());
}

#[test]
fn several_pies_share_the_width() {
    let frame = base()
        .with_collection("labels", vec!["a", "b"])
        .with_collection("left", vec![1.0, 2.0])
        .with_collection("right", vec![2.0, 1.0])
        .with_series(Series::new("left", "labels", "left", SeriesStyle::Pie(PieOptions::default())))
        .with_series(Series::new("right", "labels", "right", SeriesStyle::Pie(PieOptions::default())))
        .build_render_frame()
        .expect("frame");

    let groups = series_groups(&frame);
    assert_eq!(groups.len(), 2);
    for (group, center_x) in groups.iter().zip([150.0, 450.0]) {
        let Some(Primitive::Path(slice)) = group.children.first() else {
            panic!("expected slice path");
        };
        let PathCommand::MoveTo { x, .. } = slice.commands[0] else {
            panic!("expected move to centre");
        };
        assert_relative_eq!(x, center_x, epsilon = 1e-9);
    }
}

fn polar_chart() -> Chart {
    base()
        .with_collection("axes", vec!["speed", "power", "range", "cost", "comfort"])
        .with_collection("first", vec![1.0, 2.0, 3.0, 4.0, 5.0])
        .with_collection("second", vec![5.0, 4.0, 3.0, 2.0, 1.0])
        .with_series(Series::new("first", "axes", "first", SeriesStyle::Polar(PolarOptions::default())))
        .with_series(Series::new("second", "axes", "second", SeriesStyle::Polar(PolarOptions::default())))
}

#[test]
fn polar_series_share_one_web() {
    let frame = polar_chart().build_render_frame().expect("frame");
    let layer = frame.layer(CanvasLayerKind::Series);

    let Some(Primitive::Group(web)) = layer.first() else {
        panic!("expected polar web group");
    };
    assert_eq!(web.class, "polar-web");
    assert_eq!(count_paths(web), 5);
    let spokes = web
        .children
        .iter()
        .filter(|primitive| matches!(primitive, Primitive::Line(_)))
        .count();
    assert_eq!(spokes, 5);
    let labels = texts(web);
    assert_eq!(labels.len(), 5);
    assert_eq!(labels[0].text, "speed");
    assert_eq!(labels[0].h_align, TextHAlign::Center);

    let series: Vec<&GroupPrimitive> = layer
        .iter()
        .filter_map(|primitive| match primitive {
            Primitive::Group(group) if group.class == "series series-polar" => Some(group),
            _ => None,
        })
        .collect();
    assert_eq!(series.len(), 2);
}

#[test]
fn polar_polygon_reaches_the_outer_ring_at_the_maximum() {
    let frame = polar_chart().build_render_frame().expect("frame");
    let groups = series_groups(&frame);
    let first = groups
        .iter()
        .find(|group| group.class == "series series-polar")
        .expect("series group");

    let Some(Primitive::Path(polygon)) = first.children.first() else {
        panic!("expected polygon");
    };
    // Spoke 4 holds the first series' maximum (5) and points up-left.
    let PathCommand::LineTo { x, y } = polygon.commands[4] else {
        panic!("expected vertex");
    };
    let angle = -std::f64::consts::FRAC_PI_2 + std::f64::consts::TAU * 4.0 / 5.0;
    assert_relative_eq!(x, 300.0 + 120.0 * angle.cos(), epsilon = 1e-9);
    assert_relative_eq!(y, 150.0 + 120.0 * angle.sin(), epsilon = 1e-9);
    assert_eq!(polygon.commands.last(), Some(&PathCommand::Close));
}

#[test]
fn polar_spoke_labels_cover_the_widest_series() {
    let frame = base()
        .with_collection("short_axes", vec!["speed", "power", "range"])
        .with_collection("short", vec![1.0, 2.0, 3.0])
        .with_collection("axes", vec!["speed", "power", "range", "cost", "comfort"])
        .with_collection("full", vec![5.0, 4.0, 3.0, 2.0, 1.0])
        .with_series(Series::new("short", "short_axes", "short", SeriesStyle::Polar(PolarOptions::default())))
        .with_series(Series::new("full", "axes", "full", SeriesStyle::Polar(PolarOptions::default())))
        .build_render_frame()
        .expect("frame");

    let Some(Primitive::Group(web)) = frame.layer(CanvasLayerKind::Series).first() else {
        panic!("expected polar web group");
    };
    let labels: Vec<String> = texts(web).iter().map(|text| text.text.clone()).collect();
    assert_eq!(labels, vec!["speed", "power", "range", "cost", "comfort"]);
}

#[test]
fn polar_series_with_too_few_values_is_dropped() {
    let frame = polar_chart()
        .with_collection("sparse", vec![Value::from(1.0), Value::Null, Value::Null, Value::Null, Value::from(2.0)])
        .with_series(Series::new("sparse", "axes", "sparse", SeriesStyle::Polar(PolarOptions::default())))
        .build_render_frame()
        .expect("frame");

    let series = series_groups(&frame)
        .into_iter()
        .filter(|group| group.class == "series series-polar")
        .count();
    assert_eq!(series, 2);
}

fn timeline_chart(options: BooleanOptions) -> Chart {
    base()
        .with_collection("t", vec![0.0, 1.0, 2.0, 3.0, 4.0])
        .with_collection("state", vec![true, true, false, false, true])
        .with_series(Series::new("pump", "t", "state", SeriesStyle::Boolean(options)))
}

#[test]
fn boolean_timeline_draws_one_rect_per_run() {
    let options = BooleanOptions::default();
    let frame = timeline_chart(options.clone())
        .build_render_frame()
        .expect("frame");

    let groups = series_groups(&frame);
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].class, "series series-boolean");
    let runs = rects(&groups[0]);
    assert_eq!(runs.len(), 3);
    assert_eq!(runs[0].fill, Some(options.true_color));
    assert_eq!(runs[1].fill, Some(options.false_color));
    assert_relative_eq!(runs[0].x + runs[0].width, runs[1].x, epsilon = 1e-9);
    assert_relative_eq!(runs[1].x + runs[1].width, runs[2].x, epsilon = 1e-9);
    assert_relative_eq!(runs[2].width, 0.0, epsilon = 1e-9);
}

#[test]
fn boolean_lanes_split_the_area() {
    let frame = timeline_chart(BooleanOptions::default())
        .with_collection("other", vec![false, false, false, true, true])
        .with_series(Series::new("valve", "t", "other", SeriesStyle::Boolean(BooleanOptions::default())))
        .build_render_frame()
        .expect("frame");

    let groups = series_groups(&frame);
    assert_eq!(groups.len(), 2);
    let first = rects(&groups[0]);
    let second = rects(&groups[1]);
    assert_relative_eq!(first[0].y, 0.0, epsilon = 1e-9);
    assert_relative_eq!(first[0].height, 150.0, epsilon = 1e-9);
    assert_relative_eq!(second[0].y, 150.0, epsilon = 1e-9);
}

#[test]
fn boolean_label_sits_beside_the_lane() {
    let options = BooleanOptions {
        orientation: Orientation::Horizontal,
        label: TimelineLabelOptions {
            show: true,
            side: LabelSide::Left,
            ..TimelineLabelOptions::default()
        },
        ..BooleanOptions::default()
    };
    let frame = timeline_chart(options).build_render_frame().expect("frame");

    let labels = texts(&series_groups(&frame)[0]);
    assert_eq!(labels.len(), 1);
    assert_eq!(labels[0].text, "pump");
    assert_eq!(labels[0].h_align, TextHAlign::Right);
    assert_relative_eq!(labels[0].x, -6.0, epsilon = 1e-9);
    assert_relative_eq!(labels[0].y, 150.0, epsilon = 1e-9);
}

#[test]
fn boolean_series_without_time_span_is_dropped() {
    let frame = base()
        .with_collection("t", vec![5.0, 5.0, 5.0])
        .with_collection("state", vec![true, false, true])
        .with_collection("t1", vec![5.0])
        .with_collection("s1", vec![true])
        .with_series(Series::new("flat", "t", "state", SeriesStyle::Boolean(BooleanOptions::default())))
        .with_series(Series::new("single", "t1", "s1", SeriesStyle::Boolean(BooleanOptions::default())))
        .build_render_frame()
        .expect("frame");

    assert!(series_groups(&frame).is_empty());
}

#[test]
fn self_scaled_charts_draw_no_axes() {
    let frame = timeline_chart(BooleanOptions::default())
        .build_render_frame()
        .expect("frame");

    assert!(frame.layer(CanvasLayerKind::Axis).is_empty());
    assert!(frame.layer(CanvasLayerKind::Grid).is_empty());
}
