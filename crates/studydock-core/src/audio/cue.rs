use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Which cue to play. Purely a selector into [`AudioCueKind::tones`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AudioCueKind {
    /// Last-minute warning, once per second.
    Tick,
    StudyEnd,
    BreakEnd,
    /// Final break (or final study, when the final break is skipped) elapsed.
    Complete,
}

/// One sine tone, relative to the moment the cue is played.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ToneDescriptor {
    pub frequency_hz: f32,
    pub duration: Duration,
    pub start_delay: Duration,
    /// Linear gain, 0.0 .. 1.0.
    pub volume: f32,
}

const fn tone(frequency_hz: f32, duration_ms: u64, start_delay_ms: u64, volume: f32) -> ToneDescriptor {
    ToneDescriptor {
        frequency_hz,
        duration: Duration::from_millis(duration_ms),
        start_delay: Duration::from_millis(start_delay_ms),
        volume,
    }
}

const TICK: [ToneDescriptor; 1] = [tone(880.0, 80, 0, 0.12)];

// C5 E5 G5
const STUDY_END: [ToneDescriptor; 3] = [
    tone(523.25, 200, 0, 0.3),
    tone(659.25, 200, 200, 0.3),
    tone(783.99, 300, 400, 0.3),
];

// G4 B4 D5
const BREAK_END: [ToneDescriptor; 3] = [
    tone(392.00, 200, 0, 0.3),
    tone(493.88, 200, 200, 0.3),
    tone(587.33, 300, 400, 0.3),
];

// C5 E5 G5 C6
const COMPLETE: [ToneDescriptor; 4] = [
    tone(523.25, 150, 0, 0.3),
    tone(659.25, 150, 150, 0.3),
    tone(783.99, 150, 300, 0.3),
    tone(1046.50, 500, 450, 0.35),
];

impl AudioCueKind {
    pub const ALL: [AudioCueKind; 4] = [
        AudioCueKind::Tick,
        AudioCueKind::StudyEnd,
        AudioCueKind::BreakEnd,
        AudioCueKind::Complete,
    ];

    pub fn tones(self) -> &'static [ToneDescriptor] {
        match self {
            AudioCueKind::Tick => &TICK,
            AudioCueKind::StudyEnd => &STUDY_END,
            AudioCueKind::BreakEnd => &BREAK_END,
            AudioCueKind::Complete => &COMPLETE,
        }
    }

    /// Time from play until the last tone stops.
    pub fn total_duration(self) -> Duration {
        self.tones()
            .iter()
            .map(|t| t.start_delay + t.duration)
            .max()
            .unwrap_or_default()
    }
}
