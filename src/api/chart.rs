use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::{AxisKind, AxisOptions, DataSet, Series, ValueCollection};
use crate::error::{ChartError, ChartResult};
use crate::render::{RenderFrame, Renderer, SvgRenderer};

use super::render_pipeline::RenderPipeline;
use super::{ChartConfig, ChartConfigPatch};

pub const CHART_JSON_SCHEMA_V1: u32 = 1;

/// Complete chart definition: configuration, named data and series.
///
/// A chart is an immutable snapshot once rendering starts; every render call
/// runs a fresh pipeline over it, so repeated renders are byte-identical.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Chart {
    pub config: ChartConfig,
    pub data: DataSet,
    series: Vec<Series>,
    pub x_axes: Vec<AxisOptions>,
    pub y_axes: Vec<AxisOptions>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartJsonContractV1 {
    pub schema_version: u32,
    pub chart: Chart,
}

#[derive(Deserialize)]
struct SchemaProbe {
    #[serde(default)]
    schema_version: Option<u32>,
}

impl Chart {
    #[must_use]
    pub fn new(config: ChartConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_config(mut self, config: ChartConfig) -> Self {
        self.config = config;
        self
    }

    /// Applies a partial configuration on top of the current one.
    #[must_use]
    pub fn with_config_patch(mut self, patch: ChartConfigPatch) -> Self {
        self.config = self.config.apply(patch);
        self
    }

    #[must_use]
    pub fn with_collection(
        mut self,
        name: impl Into<String>,
        values: impl Into<ValueCollection>,
    ) -> Self {
        self.data.insert(name, values);
        self
    }

    #[must_use]
    pub fn with_series(mut self, series: Series) -> Self {
        self.add_series(series);
        self
    }

    /// Adds an axis definition; ids follow insertion order per kind.
    #[must_use]
    pub fn with_axis(mut self, kind: AxisKind, options: AxisOptions) -> Self {
        match kind {
            AxisKind::X => self.x_axes.push(options),
            AxisKind::Y => self.y_axes.push(options),
        }
        self
    }

    /// Adds a series, replacing any earlier series of the same name in place.
    pub fn add_series(&mut self, series: Series) {
        if let Some(existing) = self.series.iter_mut().find(|item| item.name == series.name) {
            debug!(series = %series.name, "replacing series definition");
            *existing = series;
        } else {
            self.series.push(series);
        }
    }

    #[must_use]
    pub fn series(&self) -> &[Series] {
        &self.series
    }

    /// Runs one render pass and returns the layered frame.
    pub fn build_render_frame(&self) -> ChartResult<RenderFrame> {
        RenderPipeline::new(self).run()
    }

    pub fn render<R: Renderer>(&self, renderer: &mut R) -> ChartResult<()> {
        let frame = self.build_render_frame()?;
        renderer.render(&frame)
    }

    pub fn render_svg(&self) -> ChartResult<String> {
        let mut renderer = SvgRenderer::new();
        self.render(&mut renderer)?;
        Ok(renderer.into_document())
    }

    /// Parses a chart definition, either bare or wrapped in the versioned
    /// contract. Duplicate series names keep the last definition.
    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        let probe: SchemaProbe = serde_json::from_str(input).map_err(|e| {
            ChartError::InvalidData(format!("failed to parse chart json payload: {e}"))
        })?;
        let chart = match probe.schema_version {
            Some(CHART_JSON_SCHEMA_V1) => {
                let payload: ChartJsonContractV1 = serde_json::from_str(input).map_err(|e| {
                    ChartError::InvalidData(format!("failed to parse chart contract v1: {e}"))
                })?;
                payload.chart
            }
            Some(version) => {
                return Err(ChartError::InvalidData(format!(
                    "unsupported chart schema version: {version}"
                )));
            }
            None => serde_json::from_str::<Chart>(input).map_err(|e| {
                ChartError::InvalidData(format!("failed to parse chart json payload: {e}"))
            })?,
        };
        Ok(chart.with_unique_series())
    }

    pub fn to_json_contract_v1_pretty(&self) -> ChartResult<String> {
        let payload = ChartJsonContractV1 {
            schema_version: CHART_JSON_SCHEMA_V1,
            chart: self.clone(),
        };
        serde_json::to_string_pretty(&payload).map_err(|e| {
            ChartError::InvalidData(format!("failed to serialize chart contract v1: {e}"))
        })
    }

    fn with_unique_series(mut self) -> Self {
        let series = std::mem::take(&mut self.series);
        for item in series {
            self.add_series(item);
        }
        self
    }
}
