//! The shared audio output.
//!
//! All widgets on the event-loop thread share one output, created on first
//! use by [`shared_output`]. Real device handles (cpal/rodio streams) are not
//! `Send` on every platform, so the slot is thread-local to the event loop
//! rather than a global behind a lock.
//!
//! ## Lifecycle
//!
//! ```text
//! Empty --shared_output()--> Ready
//!   \                          ^
//!    `--open fails--> Failed --unlock()--> Empty
//! ```
//!
//! A cached failure is not retried on every cue, only after an explicit
//! unlock (a user gesture), which is when platforms lift autoplay blocks.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use super::cue::ToneDescriptor;
use crate::error::AudioError;

/// Somewhere tones can be scheduled.
pub trait AudioOutput {
    /// True when the platform has paused the output (autoplay policy, sleep).
    fn is_suspended(&self) -> bool {
        false
    }

    fn resume(&self) -> Result<(), AudioError> {
        Ok(())
    }

    /// Schedule one tone relative to now. Must not block.
    fn schedule(&self, tone: &ToneDescriptor) -> Result<(), AudioError>;
}

enum Slot {
    Empty,
    Ready(Rc<dyn AudioOutput>),
    Failed(AudioError),
}

thread_local! {
    static SHARED: RefCell<Slot> = const { RefCell::new(Slot::Empty) };
}

/// Get-or-create accessor for the shared output.
pub fn shared_output() -> Result<Rc<dyn AudioOutput>, AudioError> {
    SHARED.with(|slot| {
        let mut slot = slot.borrow_mut();
        match &*slot {
            Slot::Ready(output) => return Ok(Rc::clone(output)),
            Slot::Failed(err) => return Err(err.clone()),
            Slot::Empty => {}
        }
        match open_default() {
            Ok(output) => {
                tracing::debug!("audio output acquired");
                *slot = Slot::Ready(Rc::clone(&output));
                Ok(output)
            }
            Err(err) => {
                tracing::warn!(error = %err, "audio output unavailable, cues disabled until unlock");
                *slot = Slot::Failed(err.clone());
                Err(err)
            }
        }
    })
}

/// Replace the shared output, e.g. with a host-provided backend.
pub fn install_output(output: Rc<dyn AudioOutput>) {
    SHARED.with(|slot| *slot.borrow_mut() = Slot::Ready(output));
}

/// Drop a cached acquisition failure so the next access retries.
pub(crate) fn forget_failure() {
    SHARED.with(|slot| {
        let mut slot = slot.borrow_mut();
        if matches!(*slot, Slot::Failed(_)) {
            *slot = Slot::Empty;
        }
    });
}

#[cfg(test)]
pub(crate) fn clear_shared() {
    SHARED.with(|slot| *slot.borrow_mut() = Slot::Empty);
}

#[cfg(test)]
pub(crate) fn fail_shared(err: AudioError) {
    SHARED.with(|slot| *slot.borrow_mut() = Slot::Failed(err));
}

#[cfg(feature = "rodio")]
fn open_default() -> Result<Rc<dyn AudioOutput>, AudioError> {
    Ok(Rc::new(RodioOutput::open()?))
}

#[cfg(not(feature = "rodio"))]
fn open_default() -> Result<Rc<dyn AudioOutput>, AudioError> {
    Ok(Rc::new(LogOutput))
}

/// Backend used when no sound device is compiled in: tones go to the log.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogOutput;

impl AudioOutput for LogOutput {
    fn schedule(&self, tone: &ToneDescriptor) -> Result<(), AudioError> {
        tracing::debug!(
            frequency_hz = tone.frequency_hz,
            duration_ms = tone.duration.as_millis() as u64,
            delay_ms = tone.start_delay.as_millis() as u64,
            volume = tone.volume,
            "tone"
        );
        Ok(())
    }
}

/// Keeps every scheduled tone in memory. For headless hosts and tests.
#[derive(Debug, Default)]
pub struct RecordingOutput {
    tones: RefCell<Vec<ToneDescriptor>>,
    suspended: Cell<bool>,
    resumes: Cell<usize>,
    refuse_resume: Cell<bool>,
}

impl RecordingOutput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start out suspended, as a browser-style autoplay policy would.
    pub fn suspended() -> Self {
        let out = Self::default();
        out.suspended.set(true);
        out
    }

    /// Make every resume attempt fail with [`AudioError::Suspended`].
    pub fn refusing_resume(self) -> Self {
        self.refuse_resume.set(true);
        self
    }

    pub fn tones(&self) -> Vec<ToneDescriptor> {
        self.tones.borrow().clone()
    }

    pub fn resume_count(&self) -> usize {
        self.resumes.get()
    }

    pub fn clear(&self) {
        self.tones.borrow_mut().clear();
    }
}

impl AudioOutput for RecordingOutput {
    fn is_suspended(&self) -> bool {
        self.suspended.get()
    }

    fn resume(&self) -> Result<(), AudioError> {
        self.resumes.set(self.resumes.get() + 1);
        if self.refuse_resume.get() {
            return Err(AudioError::Suspended);
        }
        self.suspended.set(false);
        Ok(())
    }

    fn schedule(&self, tone: &ToneDescriptor) -> Result<(), AudioError> {
        if self.suspended.get() {
            return Err(AudioError::Suspended);
        }
        self.tones.borrow_mut().push(*tone);
        Ok(())
    }
}

/// Sine tones on the default output device.
#[cfg(feature = "rodio")]
pub struct RodioOutput {
    // Dropping the stream stops all sound.
    _stream: rodio::OutputStream,
    handle: rodio::OutputStreamHandle,
}

#[cfg(feature = "rodio")]
impl RodioOutput {
    pub fn open() -> Result<Self, AudioError> {
        let (stream, handle) = rodio::OutputStream::try_default()
            .map_err(|e| AudioError::DeviceUnavailable(e.to_string()))?;
        Ok(Self {
            _stream: stream,
            handle,
        })
    }
}

#[cfg(feature = "rodio")]
impl AudioOutput for RodioOutput {
    fn schedule(&self, tone: &ToneDescriptor) -> Result<(), AudioError> {
        use rodio::Source;

        let source = rodio::source::SineWave::new(tone.frequency_hz)
            .take_duration(tone.duration)
            .amplify(tone.volume)
            .delay(tone.start_delay);
        self.handle
            .play_raw(source)
            .map_err(|e| AudioError::Playback(e.to_string()))
    }
}
