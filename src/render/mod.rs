mod frame;
mod null_renderer;
mod primitives;
mod theme;

pub use frame::RenderFrame;
pub use null_renderer::NullRenderer;
pub use primitives::{
    CirclePrimitive, Color, LinePrimitive, PolylinePrimitive, TextAnchor, TextPrimitive,
};
pub use theme::{Palette, Theme};

use crate::error::ChartResult;
use serde::{Deserialize, Serialize};

/// Logical drawing surface addressed by one draw pass.
///
/// The series and label surfaces are independent so the frame loop can skip
/// one without clearing the other; the map surface belongs to the overview
/// mini-chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Surface {
    Series,
    Labels,
    Map,
}

/// Contract implemented by any rendering backend.
///
/// Backends receive a fully materialized, deterministic `RenderFrame` so
/// drawing code remains isolated from chart domain and interaction logic.
pub trait Renderer {
    fn render(&mut self, surface: Surface, frame: &RenderFrame) -> ChartResult<()>;
}
