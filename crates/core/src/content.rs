//! Built-in quiz content used when no content file is supplied.

use crate::error::Error;
use crate::model::{Catalog, Category, CategoryId, FeedbackPool, Question};

struct QuestionSeed {
    prompt: &'static str,
    options: [&'static str; 4],
    answer: &'static str,
    explanation: &'static str,
}

struct CategorySeed {
    id: &'static str,
    label: &'static str,
    questions: &'static [QuestionSeed],
}

const CATEGORIES: &[CategorySeed] = &[
    CategorySeed {
        id: "verbal",
        label: "Verbal Reasoning",
        questions: &[QuestionSeed {
            prompt: "Which word is closest in meaning to \"abundant\"?",
            options: ["Rare", "Scattered", "Plentiful", "Little"],
            answer: "Plentiful",
            explanation: "\"Abundant\" means \"a lot\" or \"plentiful\".",
        }],
    },
    CategorySeed {
        id: "quantitative",
        label: "Quantitative Reasoning",
        questions: &[QuestionSeed {
            prompt: "If 3x = 12, what is x?",
            options: ["4", "3", "6", "12"],
            answer: "4",
            explanation: "Divide both sides by 3: x = 12 / 3 = 4.",
        }],
    },
    CategorySeed {
        id: "analytical",
        label: "Analytical Reasoning",
        questions: &[QuestionSeed {
            prompt: "If all roses are flowers, and some flowers fade quickly, can we say some roses fade quickly?",
            options: ["Yes", "No", "Maybe", "Not enough info"],
            answer: "Not enough info",
            explanation: "We can’t be sure if those flowers include roses.",
        }],
    },
];

const CORRECT_PHRASES: [&str; 3] = [
    "🔥 Brilliant! You're Addis Ababa University material!",
    "🌟 Perfect! The UAT exam has nothing on you!",
    "💡 Genius move! You’re streaking to success!",
];

const WRONG_PHRASES: [&str; 3] = [
    "😅 Oops! Don’t let the UAT win this round.",
    "💥 Missed it! But Addis doesn’t give up.",
    "🌀 Not quite. Let’s crush the next one.",
];

/// The three one-question UAT sections.
///
/// # Errors
///
/// Returns `Error` only if the built-in content fails validation.
pub fn reference_catalog() -> Result<Catalog, Error> {
    let mut categories = Vec::with_capacity(CATEGORIES.len());
    for seed in CATEGORIES {
        let mut questions = Vec::with_capacity(seed.questions.len());
        for q in seed.questions {
            questions.push(Question::new(
                q.prompt,
                q.options.iter().map(|o| (*o).to_owned()).collect(),
                q.answer,
                q.explanation,
            )?);
        }
        categories.push(Category::new(CategoryId::new(seed.id), seed.label, questions)?);
    }
    Ok(Catalog::new(categories)?)
}

/// Three phrases per outcome.
///
/// # Errors
///
/// Returns `Error` only if the built-in phrases fail validation.
pub fn reference_feedback() -> Result<FeedbackPool, Error> {
    Ok(FeedbackPool::new(
        CORRECT_PHRASES.iter().map(|p| (*p).to_owned()).collect(),
        WRONG_PHRASES.iter().map(|p| (*p).to_owned()).collect(),
    )?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_catalog_has_three_sections() {
        let catalog = reference_catalog().unwrap();
        let ids: Vec<_> = catalog.categories().iter().map(|c| c.id().as_str()).collect();
        assert_eq!(ids, ["verbal", "quantitative", "analytical"]);
        assert!(catalog.require_questions().is_ok());

        let quant = catalog.get("quantitative").unwrap();
        assert_eq!(quant.len(), 1);
        assert_eq!(quant.questions()[0].correct_option(), "4");
    }

    #[test]
    fn reference_feedback_has_three_phrases_each() {
        let pool = reference_feedback().unwrap();
        assert_eq!(pool.phrases(true).len(), 3);
        assert_eq!(pool.phrases(false).len(), 3);
    }

    #[test]
    fn reference_text_keeps_typographic_apostrophes() {
        let pool = reference_feedback().unwrap();
        assert!(pool.phrases(false).contains(&"😅 Oops! Don’t let the UAT win this round.".to_owned()));
        assert!(pool.phrases(false).contains(&"🌀 Not quite. Let’s crush the next one.".to_owned()));
        assert!(pool.phrases(true).contains(&"💡 Genius move! You’re streaking to success!".to_owned()));

        let catalog = reference_catalog().unwrap();
        let analytical = catalog.get("analytical").unwrap();
        assert_eq!(
            analytical.questions()[0].explanation(),
            "We can’t be sure if those flowers include roses."
        );
    }
}
