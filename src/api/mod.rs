//! Host-facing API: engine construction, the frame loop, events, labels and
//! the overview map.

mod axis_labels_x;
mod axis_labels_y;
mod engine;
mod engine_config;
mod events;
mod frame_loop;
mod map_view;
mod tooltip;

pub use axis_labels_x::{XAxisLabel, XLabelSet, format_stamp};
pub use axis_labels_y::{GRID_VISIBLE_STROKE, LABEL_VISIBLE_OPACITY, YAxisLabel, YLabelSet};
pub use engine::ChartEngine;
pub use engine_config::{ChartConfig, SeriesSpec};
pub use events::{Publisher, Subscription};
pub use frame_loop::{FrameClock, FrameReport, MAX_FRAME_DELTA_MS, RedrawFlags};
pub use map_view::{MAP_FRAME_DELTA_CAP_MS, MapView};
pub use tooltip::{TooltipData, TooltipEntry};
