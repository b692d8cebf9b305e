//! Engine construction input, deserializable from host-provided JSON.

use serde::{Deserialize, Serialize};

use crate::core::{CanvasSize, RangeTuning, SpringTuning, Viewport};
use crate::error::{ChartError, ChartResult};
use crate::render::Color;

/// One series' static description; animation state is engine-owned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesSpec {
    pub id: String,
    pub name: String,
    pub values: Vec<f64>,
    pub color: Color,
}

/// Everything needed to construct a [`ChartEngine`](super::ChartEngine).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartConfig {
    /// Unix-millisecond timestamps shared by every series, strictly
    /// increasing.
    pub timeline: Vec<i64>,
    pub series: Vec<SeriesSpec>,
    #[serde(default = "default_viewport")]
    pub viewport: Viewport,
    /// Main chart canvas, including the label strip at the bottom.
    pub canvas: CanvasSize,
    /// Overview map canvas below the chart.
    pub map_canvas: CanvasSize,
    #[serde(default)]
    pub springs: SpringTuning,
    #[serde(default)]
    pub range: RangeTuning,
}

fn default_viewport() -> Viewport {
    Viewport {
        start: 0.7,
        end: 1.0,
    }
}

impl ChartConfig {
    pub fn validate(&self) -> ChartResult<()> {
        self.viewport.validate()?;
        self.canvas.validate()?;
        self.map_canvas.validate()?;
        self.springs.validate()?;
        self.range.validate()?;

        if self.series.is_empty() {
            return Err(ChartError::InvalidData(
                "config must declare at least one series".to_owned(),
            ));
        }
        for series in &self.series {
            if series.values.len() != self.timeline.len() {
                return Err(ChartError::InvalidData(format!(
                    "series `{}` has {} values for {} timestamps",
                    series.id,
                    series.values.len(),
                    self.timeline.len()
                )));
            }
            if series.values.iter().any(|value| !value.is_finite()) {
                return Err(ChartError::InvalidData(format!(
                    "series `{}` contains a non-finite value",
                    series.id
                )));
            }
            series.color.validate()?;
        }
        Ok(())
    }
}
