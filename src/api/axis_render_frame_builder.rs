use crate::core::{Axis, AxisKind, AxisManager, AxisPosition, ChartArea};
use crate::error::ChartResult;
use crate::render::{
    FontStyle, LinePrimitive, Primitive, TextHAlign, TextPrimitive, TextVAlign,
};

use super::layout_helpers::{estimate_label_text_width_px, label_extent};
use super::{ChartConfig, GridOptions};

/// Outward shift applied per extra axis stacked on the same side.
const X_AXIS_STACK_OFFSET_PX: f64 = 32.0;
const Y_AXIS_STACK_OFFSET_PX: f64 = 48.0;
const LABEL_GAP_PX: f64 = 3.0;
const TITLE_GAP_PX: f64 = 8.0;
/// Minimum free space between neighbouring X tick labels.
const MIN_LABEL_SPACING_PX: f64 = 4.0;

/// Grid lines at the ticks of X axis 0 and Y axis 0.
pub(super) fn build_grid_primitives(
    axes: &AxisManager,
    area: ChartArea,
    grid: &GridOptions,
) -> ChartResult<Vec<Primitive>> {
    let mut lines = Vec::new();
    let first_prepared = |kind: AxisKind| {
        axes.axes(kind)
            .first()
            .filter(|axis| axis.prepared().is_some())
    };

    if grid.show_x {
        if let Some(axis) = first_prepared(AxisKind::X) {
            for (x, _) in axis.tick_positions()? {
                lines.push(grid_line(x, area.y, x, area.bottom(), grid));
            }
        }
    }
    if grid.show_y {
        if let Some(axis) = first_prepared(AxisKind::Y) {
            for (y, _) in axis.tick_positions()? {
                lines.push(grid_line(area.x, y, area.right(), y, grid));
            }
        }
    }
    Ok(lines)
}

fn grid_line(x1: f64, y1: f64, x2: f64, y2: f64, grid: &GridOptions) -> Primitive {
    LinePrimitive::new(x1, y1, x2, y2, grid.stroke_width, grid.color)
        .with_stroke_style(grid.stroke_style)
        .into()
}

/// Axis line, ticks, labels and title for every visible prepared axis.
///
/// Axis 0 defaults to the start side (bottom/left) and later axes to the end
/// side; each additional axis on a side moves further out.
pub(super) fn build_axis_primitives(
    axes: &AxisManager,
    area: ChartArea,
    config: &ChartConfig,
) -> ChartResult<Vec<Primitive>> {
    let mut output = Vec::new();
    for kind in [AxisKind::X, AxisKind::Y] {
        let mut stacked = [0_usize; 2];
        for axis in axes.axes(kind) {
            if !axis.options().show || axis.prepared().is_none() {
                continue;
            }
            let position = axis.options().position.unwrap_or(if axis.id() == 0 {
                AxisPosition::Start
            } else {
                AxisPosition::End
            });
            let side = match position {
                AxisPosition::Start => 0,
                AxisPosition::End => 1,
            };
            let stack_index = stacked[side];
            stacked[side] += 1;

            let children = match kind {
                AxisKind::X => x_axis_primitives(axis, area, position, stack_index, config)?,
                AxisKind::Y => y_axis_primitives(axis, area, position, stack_index, config)?,
            };
            output.push(Primitive::group(
                format!("axis axis-{}", kind.as_str()),
                children,
            ));
        }
    }
    Ok(output)
}

fn x_axis_primitives(
    axis: &Axis,
    area: ChartArea,
    position: AxisPosition,
    stack_index: usize,
    config: &ChartConfig,
) -> ChartResult<Vec<Primitive>> {
    let options = axis.options();
    let offset = stack_index as f64 * X_AXIS_STACK_OFFSET_PX;
    // Ticks and labels point away from the chart area.
    let (line_y, direction, label_v_align) = match position {
        AxisPosition::Start => (area.bottom() + offset, 1.0, TextVAlign::Top),
        AxisPosition::End => (area.y - offset, -1.0, TextVAlign::Baseline),
    };
    let font = FontStyle::new(config.font_family.clone(), options.font_size);

    let mut primitives: Vec<Primitive> = vec![
        LinePrimitive::new(area.x, line_y, area.right(), line_y, 1.0, options.color).into(),
    ];
    let label_y = line_y + direction * (options.tick_length + LABEL_GAP_PX);
    let mut last_label_right = f64::NEG_INFINITY;
    for (x, label) in axis.tick_positions()? {
        primitives.push(
            LinePrimitive::new(
                x,
                line_y,
                x,
                line_y + direction * options.tick_length,
                1.0,
                options.color,
            )
            .into(),
        );
        if label.is_empty() {
            continue;
        }
        let width = estimate_label_text_width_px(&label, options.font_size);
        let (left, right) = label_extent(x, width, TextHAlign::Center);
        if left < last_label_right + MIN_LABEL_SPACING_PX {
            continue;
        }
        last_label_right = right;
        primitives.push(
            TextPrimitive::new(label, x, label_y, font.clone(), options.color, TextHAlign::Center)
                .with_v_align(label_v_align)
                .into(),
        );
    }

    if let Some(title) = options.title.as_deref().filter(|title| !title.is_empty()) {
        let title_y = label_y + direction * (options.font_size + TITLE_GAP_PX);
        primitives.push(
            TextPrimitive::new(
                title,
                area.x + area.width * 0.5,
                title_y,
                font.with_weight("bold"),
                options.color,
                TextHAlign::Center,
            )
            .with_v_align(label_v_align)
            .into(),
        );
    }
    Ok(primitives)
}

fn y_axis_primitives(
    axis: &Axis,
    area: ChartArea,
    position: AxisPosition,
    stack_index: usize,
    config: &ChartConfig,
) -> ChartResult<Vec<Primitive>> {
    let options = axis.options();
    let offset = stack_index as f64 * Y_AXIS_STACK_OFFSET_PX;
    let (line_x, direction, label_align) = match position {
        AxisPosition::Start => (area.x - offset, -1.0, TextHAlign::Right),
        AxisPosition::End => (area.right() + offset, 1.0, TextHAlign::Left),
    };
    let font = FontStyle::new(config.font_family.clone(), options.font_size);

    let mut primitives: Vec<Primitive> = vec![
        LinePrimitive::new(line_x, area.y, line_x, area.bottom(), 1.0, options.color).into(),
    ];
    let label_x = line_x + direction * (options.tick_length + LABEL_GAP_PX);
    for (y, label) in axis.tick_positions()? {
        primitives.push(
            LinePrimitive::new(
                line_x,
                y,
                line_x + direction * options.tick_length,
                y,
                1.0,
                options.color,
            )
            .into(),
        );
        if label.is_empty() {
            continue;
        }
        primitives.push(
            TextPrimitive::new(label, label_x, y, font.clone(), options.color, label_align)
                .with_v_align(TextVAlign::Middle)
                .into(),
        );
    }

    if let Some(title) = options.title.as_deref().filter(|title| !title.is_empty()) {
        primitives.push(
            TextPrimitive::new(
                title,
                line_x,
                area.y - TITLE_GAP_PX,
                font.with_weight("bold"),
                options.color,
                TextHAlign::Center,
            )
            .into(),
        );
    }
    Ok(primitives)
}
