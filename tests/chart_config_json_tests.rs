use chart_svg::ChartError;
use chart_svg::api::{
    CHART_JSON_SCHEMA_V1, Chart, ChartConfig, ChartConfigPatch, LegendOptionsPatch, LegendPosition,
};
use chart_svg::core::{
    AxisKind, AxisOptions, BarOptions, Color, LineOptions, Margins, Series, SeriesStyle, Viewport,
};

fn sample_chart() -> Chart {
    Chart::new(ChartConfig::new(480, 240))
        .with_collection("quarter", vec!["Q1", "Q2", "Q3"])
        .with_collection("units", vec![12.0, 18.5, 9.0])
        .with_axis(
            AxisKind::Y,
            AxisOptions {
                title: Some("units".to_owned()),
                ..AxisOptions::default()
            },
        )
        .with_series(
            Series::new("units", "quarter", "units", SeriesStyle::Bar(BarOptions::default()))
                .with_label("Units"),
        )
}

#[test]
fn config_defaults_match_documented_values() {
    let config = ChartConfig::new(640, 320);

    assert_eq!(config.viewport, Viewport::new(640, 320));
    assert_eq!(config.margins, Margins::new(20.0, 20.0, 40.0, 50.0));
    assert_eq!(config.background, Color::WHITE);
    assert!(config.grid.show_y);
    assert!(!config.grid.show_x);
    assert!(config.legend.show);
    assert_eq!(config.legend.position, LegendPosition::Bottom);
    assert_eq!(config.palette_color(0).to_hex(), "#1f77b4");
    assert_eq!(config.palette_color(1).to_hex(), "#ff7f0e");
    assert_eq!(config.palette_color(config.palette.len()), config.palette_color(0));
    assert!(config.validate().is_ok());
}

#[test]
fn patch_overrides_only_given_fields() {
    let base = ChartConfig::new(640, 320).with_plot_background(Color::rgb(250, 250, 250));
    let patched = base.clone().apply(ChartConfigPatch {
        viewport: Some(Viewport::new(800, 600)),
        legend: Some(LegendOptionsPatch {
            position: Some(LegendPosition::Right),
            ..LegendOptionsPatch::default()
        }),
        ..ChartConfigPatch::default()
    });

    assert_eq!(patched.viewport, Viewport::new(800, 600));
    assert_eq!(patched.legend.position, LegendPosition::Right);
    assert_eq!(patched.legend.font_size, base.legend.font_size);
    assert_eq!(patched.legend.show, base.legend.show);
    assert_eq!(patched.margins, base.margins);
    assert_eq!(patched.plot_background, base.plot_background);
    assert_eq!(patched.palette, base.palette);
}

#[test]
fn empty_patch_is_identity() {
    let base = ChartConfig::new(300, 200);
    assert_eq!(base.clone().apply(ChartConfigPatch::default()), base);
}

#[test]
fn chart_applies_config_patch() {
    let chart = sample_chart().with_config_patch(ChartConfigPatch {
        background: Some(Color::BLACK),
        ..ChartConfigPatch::default()
    });
    assert_eq!(chart.config.background, Color::BLACK);
    assert_eq!(chart.config.viewport, Viewport::new(480, 240));
}

#[test]
fn validate_rejects_unusable_configs() {
    let zero = ChartConfig::new(0, 200);
    assert!(matches!(
        zero.validate(),
        Err(ChartError::InvalidViewport { width: 0, height: 200 })
    ));

    let no_palette = ChartConfig::new(300, 200).with_palette(Vec::new());
    assert!(matches!(no_palette.validate(), Err(ChartError::Configuration(_))));

    let mut thin_grid = ChartConfig::new(300, 200);
    thin_grid.grid.stroke_width = 0.0;
    assert!(matches!(thin_grid.validate(), Err(ChartError::Configuration(_))));

    let mut tiny_legend = ChartConfig::new(300, 200);
    tiny_legend.legend.font_size = -1.0;
    assert!(matches!(tiny_legend.validate(), Err(ChartError::Configuration(_))));
}

#[test]
fn partial_json_config_fills_defaults() {
    let config: ChartConfig = serde_json::from_str(
        r##"{"viewport": {"width": 320, "height": 160}, "legend": {"position": "top"}, "background": "#101010"}"##,
    )
    .expect("config json");

    assert_eq!(config.viewport, Viewport::new(320, 160));
    assert_eq!(config.legend.position, LegendPosition::Top);
    assert!(config.legend.show);
    assert_eq!(config.background, Color::rgb(0x10, 0x10, 0x10));
    assert_eq!(config.margins, Margins::default());
}

#[test]
fn contract_round_trips_through_json() {
    let chart = sample_chart();
    let json = chart.to_json_contract_v1_pretty().expect("serialize");

    assert!(json.contains(&format!("\"schema_version\": {CHART_JSON_SCHEMA_V1}")));
    let restored = Chart::from_json_str(&json).expect("parse");
    assert_eq!(restored, chart);
    assert_eq!(
        restored.render_svg().expect("restored svg"),
        chart.render_svg().expect("original svg")
    );
}

#[test]
fn bare_chart_json_is_accepted() {
    let chart = Chart::from_json_str(
        r#"{
            "config": {"viewport": {"width": 200, "height": 100}},
            "data": {"x": [1, 2, 3], "y": [4, null, "6"]},
            "series": [{"name": "s", "x": "x", "y": "y", "style": {"type": "line"}}]
        }"#,
    )
    .expect("bare chart");

    assert_eq!(chart.config.viewport, Viewport::new(200, 100));
    assert_eq!(chart.series().len(), 1);
    assert_eq!(chart.series()[0].style, SeriesStyle::Line(LineOptions::default()));
    assert!(chart.render_svg().is_ok());
}

#[test]
fn unsupported_schema_version_is_rejected() {
    let err = Chart::from_json_str(r#"{"schema_version": 2, "chart": {}}"#).expect_err("v2");
    assert!(matches!(err, ChartError::InvalidData(message) if message.contains('2')));
}

#[test]
fn malformed_json_is_invalid_data() {
    let err = Chart::from_json_str("{not json").expect_err("malformed");
    assert!(matches!(err, ChartError::InvalidData(_)));
}

#[test]
fn duplicate_series_names_keep_last_definition() {
    let chart = Chart::from_json_str(
        r#"{
            "schema_version": 1,
            "chart": {
                "data": {"x": [0, 1], "y": [1, 2]},
                "series": [
                    {"name": "dup", "x": "x", "y": "y", "style": {"type": "bar"}},
                    {"name": "other", "x": "x", "y": "y", "style": {"type": "line"}},
                    {"name": "dup", "x": "x", "y": "y", "style": {"type": "scatter"}}
                ]
            }
        }"#,
    )
    .expect("contract");

    let names: Vec<&str> = chart.series().iter().map(|series| series.name.as_str()).collect();
    assert_eq!(names, vec!["dup", "other"]);
    assert_eq!(chart.series()[0].style.chart_type().as_str(), "scatter");
}

#[test]
fn add_series_replaces_in_place() {
    let mut chart = sample_chart().with_series(Series::new(
        "trend",
        "quarter",
        "units",
        SeriesStyle::Line(LineOptions::default()),
    ));
    chart.add_series(Series::new(
        "units",
        "quarter",
        "units",
        SeriesStyle::Line(LineOptions::default()),
    ));

    assert_eq!(chart.series().len(), 2);
    assert_eq!(chart.series()[0].name, "units");
    assert_eq!(chart.series()[0].style, SeriesStyle::Line(LineOptions::default()));
    assert_eq!(chart.series()[1].name, "trend");
}

#[test]
fn invalid_axis_timestamp_pattern_fails_the_render() {
    let chart = Chart::from_json_str(
        r#"{
            "data": {"t": [0, 60, 120], "v": [1, 2, 3]},
            "series": [{"name": "v", "x": "t", "y": "v", "style": {"type": "line"}}],
            "x_axes": [{"label_format": {"kind": "timestamp", "pattern": "%H:%Q"}}]
        }"#,
    )
    .expect("chart json");

    let err = chart.render_svg().expect_err("bad pattern");
    assert!(matches!(err, ChartError::Configuration(_)));
}
