//! Tooltip data resolution: nearest-timestamp lookup plus the per-series
//! values at that index.
//!
//! The tooltip widget itself is a host concern; the engine only supplies the
//! point data and a pixel anchor for placement.

use crate::render::Color;

/// One visible series' contribution to the tooltip.
#[derive(Debug, Clone, PartialEq)]
pub struct TooltipEntry {
    pub series_id: String,
    pub name: String,
    pub color: Color,
    pub value: f64,
}

/// Point data handed to the tooltip widget.
#[derive(Debug, Clone, PartialEq)]
pub struct TooltipData {
    pub timestamp: i64,
    /// Pixel anchor for placement, in physical canvas coordinates.
    pub anchor_x: f64,
    /// Ordered like the chart's series list, visible series only.
    pub entries: Vec<TooltipEntry>,
}

/// Nearest timeline index for a virtual-canvas X coordinate.
///
/// Hit-testing never goes beyond this lookup.
#[must_use]
pub(crate) fn nearest_index(virtual_x: f64, timeline_len: usize, virtual_width: f64) -> usize {
    if timeline_len <= 1 {
        return 0;
    }
    let raw = (virtual_x * (timeline_len - 1) as f64 / virtual_width).round();
    (raw.max(0.0) as usize).min(timeline_len - 1)
}
