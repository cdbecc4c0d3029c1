#![forbid(unsafe_code)]

pub mod content;
pub mod effects;
pub mod error;
pub mod random;
pub mod session;
pub mod timer;

pub use content::QuizContent;
pub use effects::{Effect, FeedbackEffects, NoopEffects, RecordingEffects};
pub use error::{ContentError, EffectError, SessionError, TimerError};
pub use random::{RandomSource, SeededRandom, ThreadRandom};
pub use timer::{ManualTickScheduler, TickScheduler, TimerId, TimerTick, TokioTickScheduler};

pub use session::{
    CardView, CategoryEntry, FeedbackView, OptionMark, OptionView, QuizSession, QuizView,
    TickOutcome,
};
