use std::fmt;
use std::rc::Rc;

use super::cue::AudioCueKind;
use super::output::{self, AudioOutput};
use crate::error::AudioError;

/// Plays cues, fire-and-forget.
///
/// By default every scheduler resolves the process-wide shared output at
/// play time; [`ToneScheduler::with_output`] pins a specific backend.
#[derive(Clone, Default)]
pub struct ToneScheduler {
    output: Option<Rc<dyn AudioOutput>>,
}

impl fmt::Debug for ToneScheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToneScheduler")
            .field("pinned_output", &self.output.is_some())
            .finish()
    }
}

impl ToneScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_output(output: Rc<dyn AudioOutput>) -> Self {
        Self {
            output: Some(output),
        }
    }

    /// Schedule every tone of `cue`. No-op when muted; never fails.
    pub fn play(&self, cue: AudioCueKind, muted: bool) {
        if muted {
            tracing::trace!(?cue, "muted, cue skipped");
            return;
        }
        if let Err(err) = self.try_play(cue) {
            tracing::warn!(?cue, error = %err, "cue skipped");
        }
    }

    /// Acquire and resume the output ahead of the first cue.
    ///
    /// Hosts call this from a user gesture. Returns whether the output is
    /// usable afterwards.
    pub fn unlock(&self) -> bool {
        let output = match &self.output {
            Some(output) => Rc::clone(output),
            None => {
                output::forget_failure();
                match output::shared_output() {
                    Ok(output) => output,
                    Err(_) => return false,
                }
            }
        };
        match resume_if_suspended(output.as_ref()) {
            Ok(()) => true,
            Err(err) => {
                tracing::warn!(error = %err, "audio unlock failed");
                false
            }
        }
    }

    fn try_play(&self, cue: AudioCueKind) -> Result<(), AudioError> {
        let output = match &self.output {
            Some(output) => Rc::clone(output),
            None => output::shared_output()?,
        };
        resume_if_suspended(output.as_ref())?;
        for tone in cue.tones() {
            output.schedule(tone)?;
        }
        tracing::trace!(?cue, "cue scheduled");
        Ok(())
    }
}

fn resume_if_suspended(output: &dyn AudioOutput) -> Result<(), AudioError> {
    if output.is_suspended() {
        output.resume()?;
    }
    Ok(())
}
