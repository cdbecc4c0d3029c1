mod category;
mod feedback;
mod ids;
mod question;
mod session;

pub use ids::CategoryId;

pub use category::{Catalog, CatalogError, Category};
pub use feedback::{FeedbackError, FeedbackPool};
pub use question::{OPTION_COUNT, Question, QuestionError};
pub use session::{
    Answer, QUESTION_SECONDS, SessionPhase, SessionState, Tick, TransitionError,
};
