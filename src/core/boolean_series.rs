use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::scale::LinearScale;
use crate::core::{ChartArea, Orientation, ValueCollection};
use crate::error::ChartResult;

/// Fewest samples that can anchor a state interval.
pub const MIN_STATE_SAMPLES: usize = 2;

/// One timestamped state reading.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StateSample {
    pub time: f64,
    pub state: bool,
}

/// Contiguous interval holding one state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StateRun {
    pub start: f64,
    pub end: f64,
    pub state: bool,
}

/// Pixel rectangle for one state run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StateRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub state: bool,
}

/// Pairs timestamps with coerced states and sorts them by time.
///
/// Entries past the shorter collection are dropped and samples whose
/// timestamp is not numeric are skipped. The sort is stable, so samples
/// sharing a timestamp keep their input order.
#[must_use]
pub fn collect_state_samples(times: &ValueCollection, states: &ValueCollection) -> Vec<StateSample> {
    let mut samples: Vec<StateSample> = times
        .iter()
        .zip(states.iter())
        .filter_map(|(time, state)| {
            let Some(time) = time.as_number() else {
                trace!(?time, "skipping non-numeric timestamp");
                return None;
            };
            Some(StateSample {
                time,
                state: state.as_bool(),
            })
        })
        .collect();
    samples.sort_by_key(|sample| OrderedFloat(sample.time));
    samples
}

/// Collapses sorted samples into the minimal run sequence.
///
/// A run closes only when the state flips, so equal neighbours never split.
/// The run still open after the walk is extended to the last timestamp;
/// when the final sample flipped the state that closing run has zero length.
/// Fewer than [`MIN_STATE_SAMPLES`] samples produce no runs.
#[must_use]
pub fn compress_state_runs(samples: &[StateSample]) -> Vec<StateRun> {
    let (Some(first), Some(last)) = (samples.first(), samples.last()) else {
        return Vec::new();
    };
    if samples.len() < MIN_STATE_SAMPLES {
        return Vec::new();
    }

    let mut runs = Vec::new();
    let mut run_start = first.time;
    let mut run_state = first.state;
    for sample in &samples[1..] {
        if sample.state != run_state {
            runs.push(StateRun {
                start: run_start,
                end: sample.time,
                state: run_state,
            });
            run_start = sample.time;
            run_state = sample.state;
        }
    }
    runs.push(StateRun {
        start: run_start,
        end: last.time,
        state: run_state,
    });
    runs
}

/// Lane of the chart area a timeline occupies across its time direction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimelineLane {
    pub index: usize,
    pub count: usize,
}

impl TimelineLane {
    #[must_use]
    pub fn single() -> Self {
        Self { index: 0, count: 1 }
    }

    /// `(start, length)` of this lane across a span of `total` pixels.
    #[must_use]
    pub fn span(self, start: f64, total: f64) -> (f64, f64) {
        let count = self.count.max(1) as f64;
        let length = total / count;
        (start + length * self.index as f64, length)
    }
}

/// Scales runs against the total time span onto the chart area.
///
/// Horizontal timelines map time to x (left to right); vertical timelines map
/// time to y measured bottom-up.
pub fn project_state_runs(
    runs: &[StateRun],
    time_span: (f64, f64),
    area: ChartArea,
    orientation: Orientation,
    lane: TimelineLane,
) -> ChartResult<Vec<StateRect>> {
    let (time_start, time_end) = time_span;
    let rects = match orientation {
        Orientation::Horizontal => {
            let scale = LinearScale::new(time_start, time_end, area.x, area.right())?;
            let (lane_y, lane_height) = lane.span(area.y, area.height);
            runs.iter()
                .map(|run| {
                    let left = scale.domain_to_pixel(run.start)?;
                    let right = scale.domain_to_pixel(run.end)?;
                    Ok(StateRect {
                        x: left,
                        y: lane_y,
                        width: right - left,
                        height: lane_height,
                        state: run.state,
                    })
                })
                .collect::<ChartResult<Vec<_>>>()?
        }
        Orientation::Vertical => {
            let scale = LinearScale::new(time_start, time_end, area.bottom(), area.y)?;
            let (lane_x, lane_width) = lane.span(area.x, area.width);
            runs.iter()
                .map(|run| {
                    let bottom = scale.domain_to_pixel(run.start)?;
                    let top = scale.domain_to_pixel(run.end)?;
                    Ok(StateRect {
                        x: lane_x,
                        y: top,
                        width: lane_width,
                        height: bottom - top,
                        state: run.state,
                    })
                })
                .collect::<ChartResult<Vec<_>>>()?
        }
    };
    Ok(rects)
}
