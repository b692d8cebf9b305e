use serde::{Deserialize, Serialize};

use crate::core::spring::{Spring, round2};
use crate::error::{ChartError, ChartResult};
use crate::render::Color;

/// Visible fraction of the full timeline, in `[0, 1]`.
///
/// Owned exclusively by the chart; mutated only through published
/// viewport-change events or external API calls.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub start: f64,
    pub end: f64,
}

impl Viewport {
    pub fn new(start: f64, end: f64) -> ChartResult<Self> {
        let viewport = Self { start, end };
        viewport.validate()?;
        Ok(viewport)
    }

    pub fn validate(self) -> ChartResult<()> {
        if !self.start.is_finite()
            || !self.end.is_finite()
            || self.start < 0.0
            || self.end > 1.0
            || self.start >= self.end
        {
            return Err(ChartError::InvalidViewport {
                start: self.start,
                end: self.end,
            });
        }
        Ok(())
    }

    /// Visible fraction width, always strictly positive for a valid viewport.
    #[must_use]
    pub fn span(self) -> f64 {
        self.end - self.start
    }
}

/// Physical canvas dimensions in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CanvasSize {
    pub width: f64,
    pub height: f64,
}

impl CanvasSize {
    #[must_use]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }

    pub fn validate(self) -> ChartResult<()> {
        if !self.is_valid() {
            return Err(ChartError::InvalidCanvas {
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }
}

/// Shared timeline of unix-millisecond timestamps, strictly increasing.
///
/// All series index into this timeline; there is no per-series time axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Timeline {
    stamps: Vec<i64>,
}

impl Timeline {
    pub fn new(stamps: Vec<i64>) -> ChartResult<Self> {
        if stamps.is_empty() {
            return Err(ChartError::InvalidData(
                "timeline must not be empty".to_owned(),
            ));
        }
        if stamps.windows(2).any(|pair| pair[0] >= pair[1]) {
            return Err(ChartError::InvalidData(
                "timeline must be strictly increasing".to_owned(),
            ));
        }
        Ok(Self { stamps })
    }

    #[must_use]
    pub fn first(&self) -> i64 {
        self.stamps[0]
    }

    #[must_use]
    pub fn last(&self) -> i64 {
        self.stamps[self.stamps.len() - 1]
    }

    /// Full covered time span in milliseconds; zero for a single-sample timeline.
    #[must_use]
    pub fn span_ms(&self) -> f64 {
        (self.last() - self.first()) as f64
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.stamps.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stamps.is_empty()
    }

    #[must_use]
    pub fn stamps(&self) -> &[i64] {
        &self.stamps
    }
}

/// One plotted line with its animated opacity.
///
/// `opacity.target` is set only by legend-toggle handling; `opacity.value`
/// is mutated only by the spring scheduler.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub id: String,
    pub name: String,
    pub values: Vec<f64>,
    pub color: Color,
    pub opacity: Spring,
}

impl Series {
    /// Active series participate in vertical range computation.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.opacity.target == 1.0
    }

    /// Visible series are drawn; opacity rounded to 2 decimals is the working
    /// definition of "effectively zero".
    #[must_use]
    pub fn is_visible(&self) -> bool {
        round2(self.opacity.value) > 0.0
    }
}
