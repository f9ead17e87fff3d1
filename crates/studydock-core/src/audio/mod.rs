//! Tone scheduler: short synthesized cues at phase boundaries.
//!
//! Cues are looked up in a fixed table ([`cue`]), then scheduled on a single
//! shared output ([`output`]) that is created lazily the first time any
//! widget needs it. Sound is cosmetic: every failure is logged and dropped.

pub mod cue;
pub mod output;
mod scheduler;

pub use cue::{AudioCueKind, ToneDescriptor};
pub use output::{install_output, shared_output, AudioOutput, LogOutput, RecordingOutput};
pub use scheduler::ToneScheduler;

#[cfg(feature = "rodio")]
pub use output::RodioOutput;
