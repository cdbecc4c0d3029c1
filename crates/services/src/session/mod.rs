mod service;
mod view;

// Public API of the session subsystem.
pub use crate::error::SessionError;
pub use service::{QuizSession, TickOutcome};
pub use view::{CardView, CategoryEntry, FeedbackView, OptionMark, OptionView, QuizView};
