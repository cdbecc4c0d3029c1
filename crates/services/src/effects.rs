use std::sync::{Arc, Mutex, PoisonError};

use crate::error::EffectError;

/// Sound and animation hooks triggered when an answer is locked in.
///
/// Calls are fire-and-forget: the session logs a returned error and carries on,
/// so an implementation can never affect quiz state.
pub trait FeedbackEffects {
    /// Play the sound for a correct or incorrect answer.
    ///
    /// # Errors
    ///
    /// Returns `EffectError` if the sound could not be played.
    fn play_feedback_sound(&self, correct: bool) -> Result<(), EffectError>;

    /// Celebrate a correct answer (confetti).
    ///
    /// # Errors
    ///
    /// Returns `EffectError` if the animation could not be shown.
    fn celebrate(&self) -> Result<(), EffectError>;
}

/// Effects that do nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopEffects;

impl FeedbackEffects for NoopEffects {
    fn play_feedback_sound(&self, _correct: bool) -> Result<(), EffectError> {
        Ok(())
    }

    fn celebrate(&self) -> Result<(), EffectError> {
        Ok(())
    }
}

/// One recorded effect call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    Sound { correct: bool },
    Celebrate,
}

/// Effects that record every call, for tests and headless front ends.
///
/// Clones share the same log.
#[derive(Debug, Clone, Default)]
pub struct RecordingEffects {
    calls: Arc<Mutex<Vec<Effect>>>,
    fail: bool,
}

impl RecordingEffects {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record calls but report every one of them as failed.
    #[must_use]
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn calls(&self) -> Vec<Effect> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn record(&self, effect: Effect, name: &'static str) -> Result<(), EffectError> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(effect);
        if self.fail {
            return Err(EffectError::Unavailable {
                effect: name,
                reason: "recording effects configured to fail".into(),
            });
        }
        Ok(())
    }
}

impl FeedbackEffects for RecordingEffects {
    fn play_feedback_sound(&self, correct: bool) -> Result<(), EffectError> {
        self.record(Effect::Sound { correct }, "sound")
    }

    fn celebrate(&self) -> Result<(), EffectError> {
        self.record(Effect::Celebrate, "celebrate")
    }
}
