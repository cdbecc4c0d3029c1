use std::fmt;
use std::sync::Arc;

use quiz_core::model::{
    Catalog, Category, CategoryId, FeedbackPool, SessionState, Tick, TransitionError,
};
use tracing::{debug, info, warn};

use super::view::{QuizView, build_view};
use crate::effects::{FeedbackEffects, NoopEffects};
use crate::error::SessionError;
use crate::random::{RandomSource, ThreadRandom, pick_phrase};
use crate::timer::{TickScheduler, TimerId, TimerTick};

/// What a delivered tick did to the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// One second elapsed; this many remain.
    Counting(u32),
    /// The countdown ran out and the question was scored as unanswered.
    TimedOut,
    /// The tick belonged to a cancelled timer and was ignored.
    Stale,
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// One quiz run: category picker, countdown-limited questions and feedback.
///
/// Owns the [`SessionState`] and the single countdown timer. Every operation
/// either applies a full transition or returns a [`SessionError`] and leaves
/// the state untouched.
pub struct QuizSession {
    catalog: Arc<Catalog>,
    feedback: Arc<FeedbackPool>,
    state: SessionState,
    feedback_phrase: Option<String>,
    effects: Box<dyn FeedbackEffects + Send>,
    random: Box<dyn RandomSource + Send>,
    timer: Box<dyn TickScheduler + Send>,
    armed: Option<TimerId>,
    next_timer: u64,
}

impl QuizSession {
    /// Create a session on the category picker.
    ///
    /// Effects default to [`NoopEffects`] and phrases to [`ThreadRandom`].
    #[must_use]
    pub fn new(
        catalog: Arc<Catalog>,
        feedback: Arc<FeedbackPool>,
        timer: impl TickScheduler + Send + 'static,
    ) -> Self {
        Self {
            catalog,
            feedback,
            state: SessionState::new(),
            feedback_phrase: None,
            effects: Box::new(NoopEffects),
            random: Box::new(ThreadRandom),
            timer: Box::new(timer),
            armed: None,
            next_timer: 1,
        }
    }

    #[must_use]
    pub fn with_effects(mut self, effects: impl FeedbackEffects + Send + 'static) -> Self {
        self.effects = Box::new(effects);
        self
    }

    #[must_use]
    pub fn with_random(mut self, random: impl RandomSource + Send + 'static) -> Self {
        self.random = Box::new(random);
        self
    }

    // Accessors
    #[must_use]
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Phrase picked when the current answer was locked in.
    #[must_use]
    pub fn feedback_phrase(&self) -> Option<&str> {
        self.feedback_phrase.as_deref()
    }

    /// The countdown currently armed, if any.
    #[must_use]
    pub fn armed_timer(&self) -> Option<TimerId> {
        self.armed
    }

    #[must_use]
    pub fn current_category(&self) -> Option<&Category> {
        self.state
            .active_category()
            .and_then(|id| self.catalog.get(id.as_str()))
    }

    /// Read-only snapshot for the presentation layer.
    #[must_use]
    pub fn view(&self) -> QuizView {
        build_view(&self.catalog, &self.state, self.feedback_phrase.as_deref())
    }

    /// Start `id` from its first question with a fresh streak and countdown.
    ///
    /// A category without questions is entered but no countdown is armed and
    /// answering stays a no-op.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::UnknownCategory` if `id` is not in the catalog.
    pub fn start_category(&mut self, id: &str) -> Result<(), SessionError> {
        let Some(category) = self.catalog.get(id) else {
            debug!(category = id, "ignoring unknown category");
            return Err(SessionError::UnknownCategory(CategoryId::new(id)));
        };
        let id = category.id().clone();
        let is_empty = category.is_empty();

        self.disarm();
        self.feedback_phrase = None;
        self.state.start(id.clone());

        if is_empty {
            warn!(category = %id, "category has no questions");
        } else {
            self.arm();
        }
        info!(category = %id, "category started");
        Ok(())
    }

    /// Switch to another category from any screen. Same effect as
    /// [`start_category`](Self::start_category).
    ///
    /// # Errors
    ///
    /// Returns `SessionError::UnknownCategory` if `id` is not in the catalog.
    pub fn choose_new_category(&mut self, id: &str) -> Result<(), SessionError> {
        self.start_category(id)
    }

    /// Leave the current category and go back to the picker.
    pub fn return_to_categories(&mut self) {
        self.disarm();
        self.feedback_phrase = None;
        self.state.reset();
        debug!("returned to category picker");
    }

    /// Lock in `option` for the current question. The first answer wins.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::DuplicateAnswer` if already answered,
    /// `SessionError::NoActiveCategory` on the picker and
    /// `SessionError::EmptyCategory` when there is no question to answer.
    pub fn submit_answer(&mut self, option: &str) -> Result<(), SessionError> {
        let catalog = Arc::clone(&self.catalog);
        let category = self
            .state
            .active_category()
            .and_then(|id| catalog.get(id.as_str()));

        let question = match category {
            Some(category) => category.question(self.state.question_index()),
            None => None,
        };
        let Some(question) = question else {
            return Err(match category {
                Some(category) if self.state.answer().is_none() => {
                    SessionError::EmptyCategory(category.id().clone())
                }
                _ => self.rejected(TransitionError::NoActiveCategory),
            });
        };

        let correct = self
            .state
            .record_answer(question, option)
            .map_err(|err| self.rejected(err))?;

        self.disarm();
        self.play_feedback(correct);
        self.feedback_phrase =
            pick_phrase(self.feedback.phrases(correct), self.random.as_mut()).map(str::to_owned);

        info!(
            correct,
            streak = self.state.streak(),
            question = self.state.question_index(),
            "answer locked in"
        );
        Ok(())
    }

    /// Move to the next question, wrapping after the last one.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NotAnswered` while the question is still open and
    /// `SessionError::NoActiveCategory` on the picker.
    pub fn advance_card(&mut self) -> Result<(), SessionError> {
        let len = self.current_category().map_or(0, Category::len);
        self.state.advance(len).map_err(|err| self.rejected(err))?;

        self.feedback_phrase = None;
        self.arm();
        debug!(question = self.state.question_index(), "advanced to next card");
        Ok(())
    }

    /// Apply one elapsed second from the countdown `tick.id`.
    ///
    /// Ticks from any timer other than the armed one are ignored. Reaching zero
    /// scores the question exactly like `submit_answer("")`.
    pub fn on_tick(&mut self, tick: TimerTick) -> TickOutcome {
        if self.armed != Some(tick.id) {
            debug!(timer = tick.id.value(), "ignoring stale tick");
            return TickOutcome::Stale;
        }

        match self.state.tick() {
            Tick::Counting(remaining) => TickOutcome::Counting(remaining),
            Tick::Expired => {
                info!("time is up");
                if let Err(err) = self.submit_answer("") {
                    warn!(?err, "timeout could not be scored");
                }
                TickOutcome::TimedOut
            }
            Tick::Idle => {
                self.disarm();
                TickOutcome::Stale
            }
        }
    }

    fn arm(&mut self) {
        self.disarm();
        let id = TimerId::new(self.next_timer);
        self.next_timer += 1;
        self.timer.arm(id);
        self.armed = Some(id);
    }

    fn disarm(&mut self) {
        if let Some(id) = self.armed.take() {
            self.timer.cancel(id);
        }
    }

    fn play_feedback(&self, correct: bool) {
        if let Err(err) = self.effects.play_feedback_sound(correct) {
            warn!(?err, "feedback sound failed");
        }
        if correct && let Err(err) = self.effects.celebrate() {
            warn!(?err, "celebration failed");
        }
    }

    fn rejected(&self, err: TransitionError) -> SessionError {
        let mapped = match err {
            TransitionError::AlreadyAnswered => SessionError::DuplicateAnswer,
            TransitionError::NotAnswered => SessionError::NotAnswered,
            TransitionError::EmptyCategory => match self.state.active_category() {
                Some(id) => SessionError::EmptyCategory(id.clone()),
                None => SessionError::NoActiveCategory,
            },
            _ => SessionError::NoActiveCategory,
        };
        debug!(%mapped, "ignoring transition");
        mapped
    }
}

impl Drop for QuizSession {
    fn drop(&mut self) {
        self.disarm();
    }
}

impl fmt::Debug for QuizSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuizSession")
            .field("state", &self.state)
            .field("feedback_phrase", &self.feedback_phrase)
            .field("armed", &self.armed)
            .field("categories", &self.catalog.categories().len())
            .finish_non_exhaustive()
    }
}
