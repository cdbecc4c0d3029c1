use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum FeedbackError {
    #[error("feedback pool for correct answers is empty")]
    EmptyCorrectPool,

    #[error("feedback pool for wrong answers is empty")]
    EmptyWrongPool,
}

/// Cosmetic phrases shown after answering, keyed by correctness.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedbackPool {
    correct: Vec<String>,
    wrong: Vec<String>,
}

impl FeedbackPool {
    /// # Errors
    ///
    /// Returns `FeedbackError` if either pool has no non-blank phrase.
    pub fn new(correct: Vec<String>, wrong: Vec<String>) -> Result<Self, FeedbackError> {
        let correct = non_blank(correct);
        if correct.is_empty() {
            return Err(FeedbackError::EmptyCorrectPool);
        }
        let wrong = non_blank(wrong);
        if wrong.is_empty() {
            return Err(FeedbackError::EmptyWrongPool);
        }
        Ok(Self { correct, wrong })
    }

    /// Phrases matching the given correctness. Never empty.
    #[must_use]
    pub fn phrases(&self, correct: bool) -> &[String] {
        if correct { &self.correct } else { &self.wrong }
    }
}

fn non_blank(phrases: Vec<String>) -> Vec<String> {
    phrases
        .into_iter()
        .map(|p| p.trim().to_owned())
        .filter(|p| !p.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pool_selects_by_correctness() {
        let pool = FeedbackPool::new(vec!["yes".into()], vec!["no".into(), "nope".into()]).unwrap();
        assert_eq!(pool.phrases(true), ["yes"]);
        assert_eq!(pool.phrases(false), ["no", "nope"]);
    }

    #[test]
    fn pool_rejects_blank_only_lists() {
        let err = FeedbackPool::new(vec!["  ".into()], vec!["no".into()]).unwrap_err();
        assert_eq!(err, FeedbackError::EmptyCorrectPool);

        let err = FeedbackPool::new(vec!["yes".into()], vec![]).unwrap_err();
        assert_eq!(err, FeedbackError::EmptyWrongPool);
    }
}
