//! # Studydock Core Library
//!
//! The floating-widget runtime behind timed study sessions: a study/break
//! countdown that plays short cues at phase boundaries, and a drag engine
//! that keeps widgets fully on-screen. Hosts (the CLI, a GUI shell) feed it
//! ticks and pointer events and render the [`ViewState`] it returns.
//!
//! ## Architecture
//!
//! - **Phase Engine**: a tick-driven state machine; the caller invokes
//!   `tick()` once per second while the timer runs
//! - **Tone Scheduler**: fixed table of synthesized cues on one lazily
//!   created, shared audio output
//! - **Drag-Constraint Engine**: pure pointer/resize transitions with
//!   per-axis viewport clamping
//! - **Widget Controller**: composes the engines per widget and exposes the
//!   host-facing commands
//!
//! ## Key Components
//!
//! - [`PhaseEngine`]: countdown state machine
//! - [`ToneScheduler`]: cue playback
//! - [`DragState`]: widget positioning
//! - [`WidgetController`]: one on-screen widget
//! - [`TickDriver`]: tokio interval that feeds a widget its ticks
//! - [`Config`]: application configuration management

pub mod audio;
pub mod drag;
pub mod error;
pub mod events;
pub mod runtime;
pub mod storage;
pub mod timer;
pub mod widget;

pub use audio::{AudioCueKind, AudioOutput, ToneScheduler};
pub use drag::{DragState, Point, Size};
pub use error::{AudioError, ConfigError, CoreError};
pub use events::Event;
pub use runtime::TickDriver;
pub use storage::Config;
pub use timer::{Phase, PhaseEngine, PhaseState, SessionConfig, SessionStatus};
pub use widget::{PointerTarget, ViewState, WidgetConfig, WidgetController, WidgetKind};
