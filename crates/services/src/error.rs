//! Shared error types for the services crate.

use std::path::PathBuf;

use thiserror::Error;

use quiz_core::model::CategoryId;

/// Conditions under which a session operation is ignored.
///
/// The session state is unchanged whenever one of these is returned, so callers
/// are free to drop it.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SessionError {
    #[error("unknown category: {0}")]
    UnknownCategory(CategoryId),
    #[error("question already answered")]
    DuplicateAnswer,
    #[error("category {0} has no questions")]
    EmptyCategory(CategoryId),
    #[error("no category selected")]
    NoActiveCategory,
    #[error("question not answered yet")]
    NotAnswered,
}

/// Errors reported by a `FeedbackEffects` implementation.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum EffectError {
    #[error("{effect} unavailable: {reason}")]
    Unavailable { effect: &'static str, reason: String },
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Errors emitted while setting up a countdown timer.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum TimerError {
    #[error("no tokio runtime available to drive the countdown")]
    NoRuntime,
}

/// Errors emitted while loading quiz content.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ContentError {
    #[error("failed to read content file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid content JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Content(#[from] quiz_core::Error),
}

impl From<quiz_core::model::QuestionError> for ContentError {
    fn from(err: quiz_core::model::QuestionError) -> Self {
        Self::Content(err.into())
    }
}

impl From<quiz_core::model::CatalogError> for ContentError {
    fn from(err: quiz_core::model::CatalogError) -> Self {
        Self::Content(err.into())
    }
}

impl From<quiz_core::model::FeedbackError> for ContentError {
    fn from(err: quiz_core::model::FeedbackError) -> Self {
        Self::Content(err.into())
    }
}
