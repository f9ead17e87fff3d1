mod engine;
mod phase;

pub use engine::PhaseEngine;
pub use phase::{
    Phase, PhaseState, SessionConfig, SessionStatus, TickOutcome, Transition, WARNING_WINDOW_SECS,
};
