//! Floating widgets: one controller per on-screen widget.
//!
//! A [`WidgetController`] composes the phase engine and the drag engine,
//! owns the widget's one-second ticker slot, and renders a [`ViewState`]
//! for the host.

mod controller;
mod view;

pub use controller::{PointerTarget, TickerSlot, WidgetController};
pub use view::{format_mmss, TimerView, ViewState};

use serde::{Deserialize, Serialize};

use crate::drag::{Point, Size};
use crate::timer::SessionConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WidgetKind {
    Timer,
    MusicPlayer,
}

impl WidgetKind {
    /// Size assumed for clamping until layout reports the real one.
    pub fn fallback_size(self) -> Size {
        match self {
            WidgetKind::Timer => Size::new(220.0, 220.0),
            WidgetKind::MusicPlayer => Size::new(400.0, 225.0),
        }
    }
}

/// Everything the host hands a widget at construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WidgetConfig {
    pub study_minutes: u32,
    pub break_minutes: u32,
    pub rounds: u32,
    #[serde(default)]
    pub skip_final_break: bool,
    #[serde(default)]
    pub muted: bool,
    #[serde(default = "default_true")]
    pub draggable: bool,
    #[serde(default)]
    pub initial_position: Point,
    /// Size to clamp with before the first measurement.
    #[serde(default)]
    pub fallback_size: Option<Size>,
}

fn default_true() -> bool {
    true
}

impl Default for WidgetConfig {
    fn default() -> Self {
        let session = SessionConfig::default();
        Self {
            study_minutes: session.study_minutes,
            break_minutes: session.break_minutes,
            rounds: session.total_rounds,
            skip_final_break: session.skip_final_break,
            muted: false,
            draggable: true,
            initial_position: Point::new(20.0, 20.0),
            fallback_size: None,
        }
    }
}

impl WidgetConfig {
    pub fn session(&self) -> SessionConfig {
        SessionConfig::new(self.study_minutes, self.break_minutes, self.rounds)
            .with_skip_final_break(self.skip_final_break)
    }
}
