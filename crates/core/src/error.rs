use thiserror::Error;

use crate::model::{CatalogError, FeedbackError, QuestionError};

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Question(#[from] QuestionError),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error(transparent)]
    Feedback(#[from] FeedbackError),
}
