//! Phase engine.
//!
//! A tick-driven state machine. It does not own a clock or a thread; the
//! caller invokes `tick()` once per second while the timer is running
//! (see [`crate::runtime`]).
//!
//! ## States
//!
//! ```text
//! Study-paused <-> Study-running -> Break-running <-> Break-paused
//!                        ^                |
//!                        `---- round+1 ---+---- last round ----> Complete
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! let mut engine = PhaseEngine::new(SessionConfig::new(25, 5, 4), false);
//! engine.toggle_running();
//! // once per second:
//! engine.tick(); // Some(Event) at phase boundaries
//! ```

use chrono::Utc;

use super::phase::{Phase, PhaseState, SessionConfig, SessionStatus, Transition};
use crate::audio::ToneScheduler;
use crate::events::Event;

#[derive(Debug, Clone)]
pub struct PhaseEngine {
    config: SessionConfig,
    state: PhaseState,
    muted: bool,
    tones: ToneScheduler,
}

impl PhaseEngine {
    /// Create an engine in the Study-paused state.
    pub fn new(config: SessionConfig, muted: bool) -> Self {
        Self::with_tones(config, muted, ToneScheduler::new())
    }

    pub fn with_tones(config: SessionConfig, muted: bool, tones: ToneScheduler) -> Self {
        let config = config.sanitized();
        Self {
            state: PhaseState::create(&config),
            config,
            muted,
            tones,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn state(&self) -> PhaseState {
        self.state
    }

    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    pub fn round(&self) -> u32 {
        self.state.round
    }

    pub fn total_rounds(&self) -> u32 {
        self.config.total_rounds
    }

    pub fn remaining_secs(&self) -> u32 {
        self.state.remaining_secs
    }

    pub fn is_running(&self) -> bool {
        self.state.running
    }

    pub fn is_complete(&self) -> bool {
        self.state.complete
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    pub fn status(&self) -> SessionStatus {
        self.state.status()
    }

    /// 0.0 .. 1.0 progress within the current phase.
    pub fn progress(&self) -> f64 {
        self.state.progress(&self.config)
    }

    /// Fresh and paused, exactly as created.
    pub fn is_at_rest(&self) -> bool {
        self.state == PhaseState::create(&self.config)
    }

    // ── Commands ─────────────────────────────────────────────────────

    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    pub fn toggle_running(&mut self) -> Option<Event> {
        if self.state.complete {
            tracing::debug!("toggle ignored, session complete");
            return None;
        }
        self.state = self.state.toggle_running();
        let PhaseState {
            phase,
            round,
            remaining_secs,
            running,
            ..
        } = self.state;
        let at = Utc::now();
        Some(if running {
            Event::TimerStarted {
                phase,
                round,
                remaining_secs,
                at,
            }
        } else {
            Event::TimerPaused {
                phase,
                round,
                remaining_secs,
                at,
            }
        })
    }

    /// Back to Study round 1, paused. Silent.
    pub fn reset(&mut self) -> Option<Event> {
        self.state = PhaseState::reset(&self.config);
        Some(Event::TimerReset { at: Utc::now() })
    }

    /// Call once per second. Returns an event when a phase boundary is crossed.
    pub fn tick(&mut self) -> Option<Event> {
        let before = self.state;
        let outcome = before.tick(&self.config);
        self.state = outcome.state;
        for cue in outcome.cues() {
            self.tones.play(cue, self.muted);
        }

        let transition = outcome.transition?;
        tracing::info!(
            ?transition,
            round = self.state.round,
            total_rounds = self.config.total_rounds,
            "phase boundary"
        );
        let at = Utc::now();
        Some(match transition {
            Transition::Completed => Event::SessionCompleted {
                total_rounds: self.config.total_rounds,
                at,
            },
            Transition::StudyEnded | Transition::BreakEnded { .. } => Event::PhaseChanged {
                from: before.phase,
                to: self.state.phase,
                round: self.state.round,
                duration_secs: self.config.duration_secs(self.state.phase),
                at,
            },
        })
    }
}
