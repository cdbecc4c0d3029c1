//! Loading and startup validation of quiz content.

use std::path::Path;

use serde::Deserialize;
use tracing::info;

use quiz_core::content::{reference_catalog, reference_feedback};
use quiz_core::model::{Catalog, Category, CategoryId, FeedbackPool, Question};

use crate::error::ContentError;

/// Validated categories and feedback phrases for a quiz.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizContent {
    pub catalog: Catalog,
    pub feedback: FeedbackPool,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ContentFile {
    categories: Vec<CategoryFile>,
    #[serde(default)]
    feedback: Option<FeedbackFile>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct CategoryFile {
    id: CategoryId,
    label: String,
    questions: Vec<QuestionFile>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct QuestionFile {
    prompt: String,
    options: Vec<String>,
    answer: String,
    #[serde(default)]
    explanation: String,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct FeedbackFile {
    correct: Vec<String>,
    wrong: Vec<String>,
}

impl QuizContent {
    /// The built-in UAT sections and phrases.
    ///
    /// # Errors
    ///
    /// Returns `ContentError::Content` if the built-in content fails validation.
    pub fn reference() -> Result<Self, ContentError> {
        let content = Self {
            catalog: reference_catalog()?,
            feedback: reference_feedback()?,
        };
        content.catalog.require_questions()?;
        Ok(content)
    }

    /// Parse content from JSON.
    ///
    /// Feedback phrases fall back to the built-in pools when omitted.
    ///
    /// # Errors
    ///
    /// Returns `ContentError::Json` for malformed input and
    /// `ContentError::Content` for questions, categories or phrases that fail
    /// validation, including categories without questions.
    pub fn from_json_str(raw: &str) -> Result<Self, ContentError> {
        let file: ContentFile = serde_json::from_str(raw)?;

        let mut categories = Vec::with_capacity(file.categories.len());
        for category in file.categories {
            let mut questions = Vec::with_capacity(category.questions.len());
            for q in category.questions {
                questions.push(Question::new(q.prompt, q.options, q.answer, q.explanation)?);
            }
            categories.push(Category::new(
                category.id,
                category.label,
                questions,
            )?);
        }
        let catalog = Catalog::new(categories)?;
        catalog.require_questions()?;

        let feedback = match file.feedback {
            Some(pools) => FeedbackPool::new(pools.correct, pools.wrong)?,
            None => reference_feedback()?,
        };

        Ok(Self { catalog, feedback })
    }

    /// Read and parse a JSON content file.
    ///
    /// # Errors
    ///
    /// Returns `ContentError::Read` if the file cannot be read, otherwise as
    /// [`from_json_str`](Self::from_json_str).
    pub fn load(path: &Path) -> Result<Self, ContentError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ContentError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let content = Self::from_json_str(&raw)?;
        info!(
            path = %path.display(),
            categories = content.catalog.categories().len(),
            "content loaded"
        );
        Ok(content)
    }
}
