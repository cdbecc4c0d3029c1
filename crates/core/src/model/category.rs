use thiserror::Error;

use crate::model::ids::CategoryId;
use crate::model::question::Question;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CatalogError {
    #[error("category id cannot be empty")]
    EmptyId,

    #[error("category label cannot be empty")]
    EmptyLabel,

    #[error("duplicate category id: {0}")]
    DuplicateCategory(CategoryId),

    #[error("category {0} has no questions")]
    EmptyCategory(CategoryId),
}

//
// ─── CATEGORY ──────────────────────────────────────────────────────────────────
//

/// A themed, ordered group of questions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    id: CategoryId,
    label: String,
    questions: Vec<Question>,
}

impl Category {
    /// Creates a new Category.
    ///
    /// An empty question list is accepted here; content loading rejects it with
    /// [`Catalog::require_questions`].
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::EmptyId` or `CatalogError::EmptyLabel` for blank text.
    pub fn new(
        id: CategoryId,
        label: impl Into<String>,
        questions: Vec<Question>,
    ) -> Result<Self, CatalogError> {
        if id.is_blank() {
            return Err(CatalogError::EmptyId);
        }
        let label = label.into();
        if label.trim().is_empty() {
            return Err(CatalogError::EmptyLabel);
        }

        Ok(Self {
            id,
            label: label.trim().to_owned(),
            questions,
        })
    }

    #[must_use]
    pub fn id(&self) -> &CategoryId {
        &self.id
    }

    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    #[must_use]
    pub fn question(&self, index: usize) -> Option<&Question> {
        self.questions.get(index)
    }
}

//
// ─── CATALOG ───────────────────────────────────────────────────────────────────
//

/// The read-only set of categories available to a quiz, in picker order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    categories: Vec<Category>,
}

impl Catalog {
    /// Creates a catalog from categories in display order.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::DuplicateCategory` if two categories share an id.
    pub fn new(categories: Vec<Category>) -> Result<Self, CatalogError> {
        for (i, category) in categories.iter().enumerate() {
            if categories[..i].iter().any(|c| c.id == category.id) {
                return Err(CatalogError::DuplicateCategory(category.id.clone()));
            }
        }
        Ok(Self { categories })
    }

    /// Startup check that every category has at least one question.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::EmptyCategory` for the first empty category.
    pub fn require_questions(&self) -> Result<(), CatalogError> {
        match self.categories.iter().find(|c| c.is_empty()) {
            Some(empty) => Err(CatalogError::EmptyCategory(empty.id.clone())),
            None => Ok(()),
        }
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.id.as_str() == id)
    }

    #[must_use]
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
