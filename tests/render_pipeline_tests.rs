use chart_svg::ChartError;
use chart_svg::api::{
    Chart, ChartConfig, LegendOptions, LegendPosition, RenderPipeline, RenderStage, group_series,
    render_svg_batch,
};
use chart_svg::core::{
    AreaOptions, BarOptions, BooleanOptions, ChartType, Color, LineOptions, PieOptions, Series,
    SeriesStyle,
};
use chart_svg::render::{CanvasLayerKind, NullRenderer, Primitive};

fn sales_chart() -> Chart {
    Chart::new(ChartConfig::new(640, 360))
        .with_collection("month", vec!["Jan", "Feb", "Mar", "Apr"])
        .with_collection("revenue", vec![120.0, 135.5, 98.25, 160.0])
        .with_collection("cost", vec![80.0, 90.0, 85.0, 100.0])
        .with_series(
            Series::new("revenue", "month", "revenue", SeriesStyle::Bar(BarOptions::default()))
                .with_label("Revenue"),
        )
        .with_series(
            Series::new("cost", "month", "cost", SeriesStyle::Line(LineOptions::default()))
                .with_label("Cost"),
        )
}

#[test]
fn frame_layers_follow_canonical_order() {
    let frame = sales_chart().build_render_frame().expect("frame");

    let kinds: Vec<CanvasLayerKind> = frame.layers().iter().map(|layer| layer.kind).collect();
    assert_eq!(kinds, CanvasLayerKind::CANONICAL_ORDER.to_vec());
    for kind in CanvasLayerKind::CANONICAL_ORDER {
        assert!(!frame.layer(kind).is_empty(), "{kind:?} layer should not be empty");
    }
}

#[test]
fn svg_document_paints_layers_in_order() {
    let svg = sales_chart().render_svg().expect("svg");

    assert!(svg.starts_with("<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"640\" height=\"360\""));
    assert!(svg.trim_end().ends_with("</svg>"));

    let positions: Vec<usize> = ["background", "grid", "series", "axes", "legend"]
        .iter()
        .map(|class| {
            svg.find(&format!("<g class=\"layer-{class}\">"))
                .unwrap_or_else(|| panic!("missing layer {class}"))
        })
        .collect();
    assert!(positions.windows(2).all(|pair| pair[0] < pair[1]));
    assert!(svg.contains("<g class=\"series series-bar\">"));
    assert!(svg.contains("<g class=\"series series-line\">"));
    assert!(svg.contains(">Revenue</text>"));
    assert!(svg.contains(">Jan</text>"));
}

#[test]
fn repeated_renders_are_byte_identical() {
    let chart = sales_chart();
    let first = chart.render_svg().expect("first render");
    let second = chart.render_svg().expect("second render");
    assert_eq!(first, second);
}

#[test]
fn series_with_data_gap_are_skipped() {
    let chart = sales_chart()
        .with_collection("short_x", vec![1.0])
        .with_collection("short_y", vec![2.0])
        .with_series(Series::new("dot", "month", "short_y", SeriesStyle::Line(LineOptions::default())));

    let frame = chart.build_render_frame().expect("frame");
    let groups = frame
        .layer(CanvasLayerKind::Series)
        .iter()
        .filter(|primitive| matches!(primitive, Primitive::Group(_)))
        .count();
    assert_eq!(groups, 2);
}

#[test]
fn missing_collection_aborts_the_render() {
    let chart = sales_chart().with_series(Series::new(
        "ghost",
        "month",
        "nowhere",
        SeriesStyle::Bar(BarOptions::default()),
    ));

    let err = chart.build_render_frame().expect_err("must fail");
    assert!(matches!(err, ChartError::Configuration(_)));
    assert!(chart.render_svg().is_err());
}

#[test]
fn zero_viewport_is_rejected() {
    let chart = Chart::new(ChartConfig::new(0, 300));
    let err = chart.build_render_frame().expect_err("must fail");
    assert!(matches!(err, ChartError::InvalidViewport { width: 0, height: 300 }));
}

#[test]
fn margins_larger_than_canvas_are_rejected() {
    let config = ChartConfig::new(100, 100)
        .with_margins(chart_svg::core::Margins::new(60.0, 10.0, 60.0, 10.0));
    let err = Chart::new(config).build_render_frame().expect_err("must fail");
    assert!(matches!(err, ChartError::Configuration(_)));
}

#[test]
fn empty_chart_still_paints_background() {
    let frame = Chart::new(ChartConfig::new(200, 100))
        .build_render_frame()
        .expect("frame");

    assert_eq!(frame.layer(CanvasLayerKind::Background).len(), 1);
    assert!(frame.layer(CanvasLayerKind::Series).is_empty());
    assert!(frame.layer(CanvasLayerKind::Axis).is_empty());
    assert!(frame.layer(CanvasLayerKind::Legend).is_empty());
}

#[test]
fn plot_background_adds_a_second_rect() {
    let config = ChartConfig::new(200, 100).with_plot_background(Color::rgb(0xf5, 0xf5, 0xf5));
    let frame = Chart::new(config).build_render_frame().expect("frame");
    assert_eq!(frame.layer(CanvasLayerKind::Background).len(), 2);
}

#[test]
fn hidden_legend_leaves_layer_empty() {
    let legend = LegendOptions {
        show: false,
        ..LegendOptions::default()
    };
    let chart = sales_chart().with_config(ChartConfig::new(640, 360).with_legend(legend));
    let frame = chart.build_render_frame().expect("frame");
    assert!(frame.layer(CanvasLayerKind::Legend).is_empty());
}

#[test]
fn legend_lists_series_and_pie_slices() {
    let legend = LegendOptions {
        position: LegendPosition::Right,
        ..LegendOptions::default()
    };
    let chart = sales_chart()
        .with_config(ChartConfig::new(640, 360).with_legend(legend))
        .with_series(Series::new("share", "month", "cost", SeriesStyle::Pie(PieOptions::default())));
    let frame = chart.build_render_frame().expect("frame");

    let Some(Primitive::Group(items)) = frame.layer(CanvasLayerKind::Legend).first() else {
        panic!("expected legend group");
    };
    assert_eq!(items.class, "legend-items");
    let labels: Vec<&str> = items
        .children
        .iter()
        .filter_map(|primitive| match primitive {
            Primitive::Text(text) => Some(text.text.as_str()),
            _ => None,
        })
        .collect();
    assert_eq!(labels, vec!["Revenue", "Cost", "Jan", "Feb", "Mar", "Apr"]);
}

#[test]
fn null_renderer_counts_frame_primitives() {
    let chart = sales_chart();
    let mut renderer = NullRenderer::default();
    chart.render(&mut renderer).expect("render");

    let counts = chart.build_render_frame().expect("frame").counts();
    assert_eq!(renderer.frames_rendered, 1);
    assert_eq!(renderer.last_counts, counts);
    assert_eq!(counts.rects, 1 + 4 + 2);
    assert_eq!(counts.paths, 1);
    assert!(counts.texts >= 4 + 2);
}

#[test]
fn render_stages_advance_in_fixed_order() {
    let mut stage = RenderStage::Init;
    let mut visited = vec![stage];
    while let Some(next) = stage.next() {
        visited.push(next);
        stage = next;
    }
    assert_eq!(
        visited,
        vec![
            RenderStage::Init,
            RenderStage::ChartArea,
            RenderStage::DefaultAxes,
            RenderStage::PreparedAxes,
            RenderStage::Background,
            RenderStage::Series,
            RenderStage::Axes,
            RenderStage::Legend,
            RenderStage::Finalized,
        ]
    );

    let chart = sales_chart();
    let pipeline = RenderPipeline::new(&chart);
    assert_eq!(pipeline.stage(), RenderStage::Init);
    assert!(pipeline.run().is_ok());
}

#[test]
fn series_group_by_first_seen_type() {
    let series = vec![
        Series::new("a", "x", "y", SeriesStyle::Line(LineOptions::default())),
        Series::new("b", "x", "y", SeriesStyle::Bar(BarOptions::default())),
        Series::new("c", "x", "y", SeriesStyle::Line(LineOptions::default())),
        Series::new("d", "x", "y", SeriesStyle::Boolean(BooleanOptions::default())),
    ];
    let groups = group_series(&series);

    let summary: Vec<(ChartType, Vec<&str>)> = groups
        .iter()
        .map(|group| {
            (
                group.chart_type,
                group.series.iter().map(|item| item.name.as_str()).collect(),
            )
        })
        .collect();
    assert_eq!(
        summary,
        vec![
            (ChartType::Line, vec!["a", "c"]),
            (ChartType::Bar, vec!["b"]),
            (ChartType::Boolean, vec!["d"]),
        ]
    );
}

#[test]
fn batch_renders_each_chart_independently() {
    let charts = vec![sales_chart(), Chart::new(ChartConfig::new(0, 0)), sales_chart()];
    let results = render_svg_batch(&charts);

    assert_eq!(results.len(), 3);
    assert!(results[0].is_ok());
    assert!(matches!(results[1], Err(ChartError::InvalidViewport { .. })));
    assert_eq!(
        results[0].as_ref().expect("first"),
        results[2].as_ref().expect("third")
    );
}

#[test]
fn svg_escapes_text_and_splits_translucent_fills() {
    let chart = Chart::new(ChartConfig::new(400, 200))
        .with_collection("x", vec![0.0, 1.0, 2.0])
        .with_collection("y", vec![3.0, 5.0, 4.0])
        .with_series(
            Series::new("rd", "x", "y", SeriesStyle::Area(AreaOptions::default()))
                .with_label("R&D <core>"),
        );
    let svg = chart.render_svg().expect("svg");

    assert!(svg.contains(">R&amp;D &lt;core&gt;</text>"));
    assert!(!svg.contains("R&D <core>"));
    assert!(svg.contains("fill=\"#1f77b4\" fill-opacity=\"0.35\""));
}
