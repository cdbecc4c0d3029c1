use thiserror::Error;

use crate::model::ids::CategoryId;
use crate::model::question::Question;

/// Seconds allowed for each question.
pub const QUESTION_SECONDS: u32 = 15;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum TransitionError {
    #[error("no category is active")]
    NoActiveCategory,

    #[error("the current question was already answered")]
    AlreadyAnswered,

    #[error("the current question has not been answered yet")]
    NotAnswered,

    #[error("the active category has no questions")]
    EmptyCategory,
}

/// Screen the session is on, derived from [`SessionState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    SelectingCategory,
    AwaitingAnswer,
    ShowingFeedback,
}

/// The option locked in for the current question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Answer {
    option: String,
    correct: bool,
}

impl Answer {
    #[must_use]
    pub fn option(&self) -> &str {
        &self.option
    }

    #[must_use]
    pub fn is_correct(&self) -> bool {
        self.correct
    }
}

/// Result of one countdown tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    /// The question is still open with this many seconds left.
    Counting(u32),
    /// The countdown reached zero with no answer.
    Expired,
    /// Nothing is counting down (no category, or already answered).
    Idle,
}

/// Mutable state of one quiz run.
///
/// The selected option and its correctness are stored together, so one is
/// never present without the other.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionState {
    active_category: Option<CategoryId>,
    question_index: usize,
    answer: Option<Answer>,
    streak: u32,
    remaining_seconds: u32,
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionState {
    /// Fresh state on the category picker.
    #[must_use]
    pub fn new() -> Self {
        Self {
            active_category: None,
            question_index: 0,
            answer: None,
            streak: 0,
            remaining_seconds: QUESTION_SECONDS,
        }
    }

    // Accessors
    #[must_use]
    pub fn active_category(&self) -> Option<&CategoryId> {
        self.active_category.as_ref()
    }

    #[must_use]
    pub fn question_index(&self) -> usize {
        self.question_index
    }

    #[must_use]
    pub fn answer(&self) -> Option<&Answer> {
        self.answer.as_ref()
    }

    #[must_use]
    pub fn selected_option(&self) -> Option<&str> {
        self.answer.as_ref().map(Answer::option)
    }

    #[must_use]
    pub fn is_answer_correct(&self) -> Option<bool> {
        self.answer.as_ref().map(Answer::is_correct)
    }

    #[must_use]
    pub fn streak(&self) -> u32 {
        self.streak
    }

    #[must_use]
    pub fn remaining_seconds(&self) -> u32 {
        self.remaining_seconds
    }

    #[must_use]
    pub fn phase(&self) -> SessionPhase {
        match (&self.active_category, &self.answer) {
            (None, _) => SessionPhase::SelectingCategory,
            (Some(_), None) => SessionPhase::AwaitingAnswer,
            (Some(_), Some(_)) => SessionPhase::ShowingFeedback,
        }
    }

    /// Reinitialize the whole state for `category`.
    pub fn start(&mut self, category: CategoryId) {
        *self = Self {
            active_category: Some(category),
            ..Self::new()
        };
    }

    /// Back to the category picker.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Lock in `option` for `question` and update the streak.
    ///
    /// Returns whether the option was correct.
    ///
    /// # Errors
    ///
    /// Returns `TransitionError::NoActiveCategory` on the picker and
    /// `TransitionError::AlreadyAnswered` once an answer is locked in. The state
    /// is unchanged on error.
    pub fn record_answer(
        &mut self,
        question: &Question,
        option: impl Into<String>,
    ) -> Result<bool, TransitionError> {
        match self.phase() {
            SessionPhase::SelectingCategory => return Err(TransitionError::NoActiveCategory),
            SessionPhase::ShowingFeedback => return Err(TransitionError::AlreadyAnswered),
            SessionPhase::AwaitingAnswer => {}
        }

        let option = option.into();
        let correct = question.is_correct(&option);
        self.streak = if correct {
            self.streak.saturating_add(1)
        } else {
            0
        };
        self.answer = Some(Answer { option, correct });
        Ok(correct)
    }

    /// Move to the next question of a category holding `len` questions.
    ///
    /// # Errors
    ///
    /// Returns `TransitionError::NoActiveCategory`, `TransitionError::NotAnswered`
    /// or `TransitionError::EmptyCategory`. The state is unchanged on error.
    pub fn advance(&mut self, len: usize) -> Result<(), TransitionError> {
        match self.phase() {
            SessionPhase::SelectingCategory => return Err(TransitionError::NoActiveCategory),
            SessionPhase::AwaitingAnswer => return Err(TransitionError::NotAnswered),
            SessionPhase::ShowingFeedback => {}
        }
        if len == 0 {
            return Err(TransitionError::EmptyCategory);
        }

        self.question_index = (self.question_index + 1) % len;
        self.answer = None;
        self.remaining_seconds = QUESTION_SECONDS;
        Ok(())
    }

    /// Count one second off the current question.
    ///
    /// Never decrements once an answer is locked in.
    pub fn tick(&mut self) -> Tick {
        if self.phase() != SessionPhase::AwaitingAnswer {
            return Tick::Idle;
        }
        self.remaining_seconds = self.remaining_seconds.saturating_sub(1);
        if self.remaining_seconds == 0 {
            Tick::Expired
        } else {
            Tick::Counting(self.remaining_seconds)
        }
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
