//! Animated time-series line chart engine with a zooming viewport and an
//! overview map.
//!
//! The crate is renderer-agnostic: the engine materializes deterministic
//! [`render::RenderFrame`] scenes per surface and hands them to a
//! [`render::Renderer`] backend. All transitions are driven by exponential
//! easing springs advanced from a host-supplied clock, so the whole engine is
//! testable without a display or a real-time loop.
//!
//! ```
//! use timechart::api::{ChartConfig, ChartEngine, SeriesSpec};
//! use timechart::core::{CanvasSize, Viewport};
//! use timechart::render::{Color, NullRenderer};
//!
//! let config = ChartConfig {
//!     timeline: vec![0, 3_600_000, 7_200_000],
//!     series: vec![SeriesSpec {
//!         id: "y0".to_owned(),
//!         name: "Joined".to_owned(),
//!         values: vec![10.0, 50.0, 30.0],
//!         color: Color::rgb(0.2, 0.6, 0.3),
//!     }],
//!     viewport: Viewport::new(0.0, 1.0)?,
//!     canvas: CanvasSize::new(800.0, 400.0),
//!     map_canvas: CanvasSize::new(800.0, 50.0),
//!     springs: Default::default(),
//!     range: Default::default(),
//! };
//!
//! let mut engine = ChartEngine::new(NullRenderer::default(), config)?;
//! let mut now_ms = 0.0;
//! while engine.is_frame_pending() {
//!     engine.tick(now_ms)?;
//!     now_ms += 16.0;
//! }
//! # Ok::<(), timechart::ChartError>(())
//! ```

pub mod api;
pub mod core;
pub mod error;
pub mod interaction;
pub mod render;
pub mod telemetry;

pub use api::{ChartConfig, ChartEngine};
pub use error::{ChartError, ChartResult};
