use serde::Serialize;

use super::WidgetKind;
use crate::drag::Point;
use crate::timer::Phase;

/// What the renderer draws. Derived, never stored.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewState {
    pub kind: WidgetKind,
    pub visible: bool,
    /// Timer counting down, or music playing.
    pub running: bool,
    pub position: Point,
    pub dragging: bool,
    #[serde(flatten)]
    pub timer: Option<TimerView>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimerView {
    pub phase: Phase,
    pub round: u32,
    pub total_rounds: u32,
    pub remaining_seconds_formatted: String,
    pub progress_fraction: f64,
    pub complete: bool,
}

/// `MM:SS`; minutes keep counting past 99.
pub fn format_mmss(secs: u32) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}
