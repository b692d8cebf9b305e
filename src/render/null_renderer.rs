use crate::error::ChartResult;
use crate::render::{RenderFrame, Renderer, Surface};

/// No-op renderer used by tests and headless engine usage.
///
/// It still validates frame content so tests can catch invalid geometry before
/// a real backend is introduced, and counts draw passes per surface so tests
/// can assert which surfaces a frame actually touched.
#[derive(Debug, Default)]
pub struct NullRenderer {
    pub series_passes: usize,
    pub labels_passes: usize,
    pub map_passes: usize,
    pub last_polyline_count: usize,
    pub last_line_count: usize,
    pub last_text_count: usize,
    pub last_circle_count: usize,
}

impl Renderer for NullRenderer {
    fn render(&mut self, surface: Surface, frame: &RenderFrame) -> ChartResult<()> {
        frame.validate()?;
        match surface {
            Surface::Series => self.series_passes += 1,
            Surface::Labels => self.labels_passes += 1,
            Surface::Map => self.map_passes += 1,
        }
        self.last_polyline_count = frame.polylines.len();
        self.last_line_count = frame.lines.len();
        self.last_text_count = frame.texts.len();
        self.last_circle_count = frame.circles.len();
        Ok(())
    }
}
