use thiserror::Error;

/// Every question offers exactly this many options.
pub const OPTION_COUNT: usize = 4;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("question prompt cannot be empty")]
    EmptyPrompt,

    #[error("question must have exactly 4 options, got {len}")]
    WrongOptionCount { len: usize },

    #[error("question options cannot be empty")]
    EmptyOption,

    #[error("duplicate option: {0}")]
    DuplicateOption(String),

    #[error("correct option {0:?} is not one of the options")]
    CorrectOptionMissing(String),
}

//
// ─── QUESTION ──────────────────────────────────────────────────────────────────
//

/// A multiple-choice question with one correct option.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    prompt: String,
    options: Vec<String>,
    correct_option: String,
    explanation: String,
}

impl Question {
    /// Creates a new Question.
    ///
    /// Prompt and options are trimmed; the explanation may be empty.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError` if the prompt is blank, the option count is not
    /// [`OPTION_COUNT`], an option is blank or repeated, or `correct_option`
    /// does not match any option.
    pub fn new(
        prompt: impl Into<String>,
        options: Vec<String>,
        correct_option: impl Into<String>,
        explanation: impl Into<String>,
    ) -> Result<Self, QuestionError> {
        let prompt = prompt.into().trim().to_owned();
        if prompt.is_empty() {
            return Err(QuestionError::EmptyPrompt);
        }

        if options.len() != OPTION_COUNT {
            return Err(QuestionError::WrongOptionCount { len: options.len() });
        }

        let mut normalized: Vec<String> = Vec::with_capacity(OPTION_COUNT);
        for option in options {
            let option = option.trim().to_owned();
            if option.is_empty() {
                return Err(QuestionError::EmptyOption);
            }
            if normalized.contains(&option) {
                return Err(QuestionError::DuplicateOption(option));
            }
            normalized.push(option);
        }

        let correct_option = correct_option.into().trim().to_owned();
        if !normalized.contains(&correct_option) {
            return Err(QuestionError::CorrectOptionMissing(correct_option));
        }

        Ok(Self {
            prompt,
            options: normalized,
            correct_option,
            explanation: explanation.into().trim().to_owned(),
        })
    }

    // Accessors
    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    #[must_use]
    pub fn options(&self) -> &[String] {
        &self.options
    }

    #[must_use]
    pub fn correct_option(&self) -> &str {
        &self.correct_option
    }

    #[must_use]
    pub fn explanation(&self) -> &str {
        &self.explanation
    }

    /// Exact, case-sensitive comparison against the correct option.
    ///
    /// Options are never empty, so `""` is always wrong.
    #[must_use]
    pub fn is_correct(&self, option: &str) -> bool {
        self.correct_option == option
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
