use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::drag::Point;
use crate::timer::Phase;
use crate::widget::WidgetKind;

/// Every state change in a widget produces an Event.
/// Hosts drain them after each tick or pointer event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    TimerStarted {
        phase: Phase,
        round: u32,
        remaining_secs: u32,
        at: DateTime<Utc>,
    },
    TimerPaused {
        phase: Phase,
        round: u32,
        remaining_secs: u32,
        at: DateTime<Utc>,
    },
    TimerReset {
        at: DateTime<Utc>,
    },
    PhaseChanged {
        from: Phase,
        to: Phase,
        round: u32,
        duration_secs: u32,
        at: DateTime<Utc>,
    },
    /// Last phase of the last round elapsed; the timer stopped.
    SessionCompleted {
        total_rounds: u32,
        at: DateTime<Utc>,
    },
    PlaybackToggled {
        playing: bool,
        at: DateTime<Utc>,
    },
    DragStarted {
        widget: WidgetKind,
        position: Point,
        at: DateTime<Utc>,
    },
    DragEnded {
        widget: WidgetKind,
        position: Point,
        at: DateTime<Utc>,
    },
    WidgetClosed {
        widget: WidgetKind,
        at: DateTime<Utc>,
    },
    WidgetOpened {
        widget: WidgetKind,
        at: DateTime<Utc>,
    },
    WidgetExpanded {
        widget: WidgetKind,
        at: DateTime<Utc>,
    },
}

impl Event {
    pub fn at(&self) -> DateTime<Utc> {
        match self {
            Event::TimerStarted { at, .. }
            | Event::TimerPaused { at, .. }
            | Event::TimerReset { at }
            | Event::PhaseChanged { at, .. }
            | Event::SessionCompleted { at, .. }
            | Event::PlaybackToggled { at, .. }
            | Event::DragStarted { at, .. }
            | Event::DragEnded { at, .. }
            | Event::WidgetClosed { at, .. }
            | Event::WidgetOpened { at, .. }
            | Event::WidgetExpanded { at, .. } => *at,
        }
    }
}
