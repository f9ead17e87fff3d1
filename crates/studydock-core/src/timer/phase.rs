//! Pure phase state machine.
//!
//! Every operation here is a function from `(state, input)` to a new state;
//! nothing plays sound or reads a clock. [`super::PhaseEngine`] wraps it with
//! cues and events.
//!
//! ```text
//! Study(r) --study elapsed--> Break(r) --break elapsed, r < N--> Study(r+1)
//!                                      --break elapsed, r = N--> Complete
//! ```

use serde::{Deserialize, Serialize};

use crate::audio::AudioCueKind;

/// Seconds left at which every tick also plays the warning cue.
pub const WARNING_WINDOW_SECS: u32 = 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Study,
    Break,
}

/// Study/break lengths and round count for one session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    pub study_minutes: u32,
    pub break_minutes: u32,
    pub total_rounds: u32,
    /// End the session as soon as the last study phase elapses.
    #[serde(default)]
    pub skip_final_break: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            study_minutes: 25,
            break_minutes: 5,
            total_rounds: 4,
            skip_final_break: false,
        }
    }
}

impl SessionConfig {
    /// Build a config, clamping every value to at least 1.
    pub fn new(study_minutes: u32, break_minutes: u32, total_rounds: u32) -> Self {
        Self {
            study_minutes,
            break_minutes,
            total_rounds,
            skip_final_break: false,
        }
        .sanitized()
    }

    pub fn with_skip_final_break(mut self, skip: bool) -> Self {
        self.skip_final_break = skip;
        self
    }

    /// Zero values are a caller bug; clamp them instead of failing.
    pub fn sanitized(self) -> Self {
        let clamped = Self {
            study_minutes: self.study_minutes.max(1),
            break_minutes: self.break_minutes.max(1),
            total_rounds: self.total_rounds.max(1),
            skip_final_break: self.skip_final_break,
        };
        if clamped != self {
            tracing::warn!(
                study_minutes = self.study_minutes,
                break_minutes = self.break_minutes,
                total_rounds = self.total_rounds,
                "non-positive session config clamped to 1"
            );
        }
        clamped
    }

    pub fn duration_secs(&self, phase: Phase) -> u32 {
        let minutes = match phase {
            Phase::Study => self.study_minutes,
            Phase::Break => self.break_minutes,
        };
        minutes.max(1).saturating_mul(60)
    }
}

/// Where a session is, as the host sees it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    StudyRunning,
    StudyPaused,
    BreakRunning,
    BreakPaused,
    Complete,
}

/// Phase boundary crossed by a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Transition {
    StudyEnded,
    BreakEnded { next_round: u32 },
    Completed,
}

impl Transition {
    pub fn cue(self) -> AudioCueKind {
        match self {
            Transition::StudyEnded => AudioCueKind::StudyEnd,
            Transition::BreakEnded { .. } => AudioCueKind::BreakEnd,
            Transition::Completed => AudioCueKind::Complete,
        }
    }
}

/// Result of one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickOutcome {
    pub state: PhaseState,
    /// Tick landed inside the final minute of a phase.
    pub warning: bool,
    pub transition: Option<Transition>,
}

impl TickOutcome {
    fn idle(state: PhaseState) -> Self {
        Self {
            state,
            warning: false,
            transition: None,
        }
    }

    /// Cues to play for this tick, in order.
    pub fn cues(&self) -> impl Iterator<Item = AudioCueKind> {
        self.warning
            .then_some(AudioCueKind::Tick)
            .into_iter()
            .chain(self.transition.map(Transition::cue))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseState {
    pub phase: Phase,
    /// 1-indexed.
    pub round: u32,
    pub remaining_secs: u32,
    pub running: bool,
    pub complete: bool,
}

impl PhaseState {
    /// Fresh, paused study phase of round 1.
    pub fn create(config: &SessionConfig) -> Self {
        Self {
            phase: Phase::Study,
            round: 1,
            remaining_secs: config.duration_secs(Phase::Study),
            running: false,
            complete: false,
        }
    }

    /// Same as [`PhaseState::create`]; progress is discarded.
    pub fn reset(config: &SessionConfig) -> Self {
        Self::create(config)
    }

    /// Advance by one second. No effect unless running.
    pub fn tick(self, config: &SessionConfig) -> TickOutcome {
        if !self.running || self.complete {
            return TickOutcome::idle(self);
        }

        let mut next = self;
        next.remaining_secs = self.remaining_secs.saturating_sub(1);
        if next.remaining_secs > 0 {
            return TickOutcome {
                state: next,
                warning: next.remaining_secs <= WARNING_WINDOW_SECS,
                transition: None,
            };
        }

        let total_rounds = config.total_rounds.max(1);
        let transition = match self.phase {
            Phase::Study if config.skip_final_break && self.round >= total_rounds => {
                next.finish();
                Transition::Completed
            }
            Phase::Study => {
                next.phase = Phase::Break;
                next.remaining_secs = config.duration_secs(Phase::Break);
                Transition::StudyEnded
            }
            Phase::Break if self.round < total_rounds => {
                next.round = self.round + 1;
                next.phase = Phase::Study;
                next.remaining_secs = config.duration_secs(Phase::Study);
                Transition::BreakEnded {
                    next_round: next.round,
                }
            }
            Phase::Break => {
                next.finish();
                Transition::Completed
            }
        };

        TickOutcome {
            state: next,
            warning: false,
            transition: Some(transition),
        }
    }

    /// Flip running. The terminal state stays put; reset first.
    pub fn toggle_running(self) -> Self {
        if self.complete {
            return self;
        }
        Self {
            running: !self.running,
            ..self
        }
    }

    pub fn status(&self) -> SessionStatus {
        match (self.complete, self.phase, self.running) {
            (true, _, _) => SessionStatus::Complete,
            (false, Phase::Study, true) => SessionStatus::StudyRunning,
            (false, Phase::Study, false) => SessionStatus::StudyPaused,
            (false, Phase::Break, true) => SessionStatus::BreakRunning,
            (false, Phase::Break, false) => SessionStatus::BreakPaused,
        }
    }

    /// Elapsed share of the current phase, for rendering only.
    ///
    /// In `[0, 1)` while a phase is in progress; `1.0` once complete.
    pub fn progress(&self, config: &SessionConfig) -> f64 {
        if self.complete {
            return 1.0;
        }
        let total = config.duration_secs(self.phase) as f64;
        let remaining = (self.remaining_secs as f64).min(total);
        (total - remaining) / total
    }

    fn finish(&mut self) {
        self.remaining_secs = 0;
        self.running = false;
        self.complete = true;
    }
}
