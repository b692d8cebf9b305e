use serde::{Deserialize, Serialize};

use crate::render::Color;

/// Night-mode plot background, also used as the selection-ring fill.
const NIGHT_BACKGROUND: Color = Color::rgb(0.141, 0.184, 0.243);
/// Night-mode label/grid base tint.
const NIGHT_INK: Color = Color::rgb(0.729, 0.804, 0.878);
const DAY_INK: Color = Color::rgb(0.0, 0.0, 0.0);

/// Active color scheme.
///
/// Switching themes swaps stroke/fill constants and forces a redraw; it never
/// restarts any animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Theme {
    #[default]
    Day,
    Night,
}

impl Theme {
    #[must_use]
    pub const fn palette(self) -> Palette {
        match self {
            Self::Day => Palette {
                label_ink: DAY_INK,
                grid_ink: DAY_INK,
                selection_guide: DAY_INK,
                selection_fill: Color::rgb(1.0, 1.0, 1.0),
            },
            Self::Night => Palette {
                label_ink: NIGHT_INK,
                grid_ink: NIGHT_INK,
                selection_guide: NIGHT_INK,
                selection_fill: NIGHT_BACKGROUND,
            },
        }
    }
}

/// Base colors for one theme; per-label alpha is applied at draw time from
/// the label's eased opacity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    pub label_ink: Color,
    pub grid_ink: Color,
    pub selection_guide: Color,
    pub selection_fill: Color,
}
