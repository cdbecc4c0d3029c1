use quiz_core::model::{Catalog, CategoryId, SessionPhase, SessionState};

/// Presentation-agnostic snapshot of a quiz session.
///
/// Holds plain data only; formatting and styling are left to the front end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizView {
    pub phase: SessionPhase,
    /// Picker entries in catalog order, available on every screen.
    pub categories: Vec<CategoryEntry>,
    pub streak: u32,
    pub remaining_seconds: u32,
    /// Present once a non-empty category is active.
    pub card: Option<CardView>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryEntry {
    pub id: CategoryId,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardView {
    pub category: CategoryId,
    pub category_label: String,
    /// 1-based position of the question within its category.
    pub position: usize,
    pub total: usize,
    pub progress_percent: u8,
    pub prompt: String,
    pub options: Vec<OptionView>,
    /// True once an answer is locked in; options no longer accept input.
    pub locked: bool,
    pub feedback: Option<FeedbackView>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionView {
    pub text: String,
    pub mark: OptionMark,
}

/// Highlight of an option after answering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionMark {
    Neutral,
    /// The correct option.
    Correct,
    /// The option the user picked, when it was wrong.
    Wrong,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedbackView {
    pub correct: bool,
    pub phrase: String,
    pub explanation: String,
}

pub(crate) fn build_view(
    catalog: &Catalog,
    state: &SessionState,
    feedback_phrase: Option<&str>,
) -> QuizView {
    let categories = catalog
        .categories()
        .iter()
        .map(|c| CategoryEntry {
            id: c.id().clone(),
            label: c.label().to_owned(),
        })
        .collect();

    let card = state
        .active_category()
        .and_then(|id| catalog.get(id.as_str()))
        .and_then(|category| {
            let index = state.question_index();
            let question = category.question(index)?;
            let answer = state.answer();

            let options = question
                .options()
                .iter()
                .map(|option| {
                    let mark = match answer {
                        Some(_) if question.is_correct(option) => OptionMark::Correct,
                        Some(a) if a.option() == option => OptionMark::Wrong,
                        _ => OptionMark::Neutral,
                    };
                    OptionView {
                        text: option.clone(),
                        mark,
                    }
                })
                .collect();

            let feedback = answer.map(|a| FeedbackView {
                correct: a.is_correct(),
                phrase: feedback_phrase.unwrap_or_default().to_owned(),
                explanation: question.explanation().to_owned(),
            });

            Some(CardView {
                category: category.id().clone(),
                category_label: category.label().to_owned(),
                position: index + 1,
                total: category.len(),
                progress_percent: progress_percent(index, category.len()),
                prompt: question.prompt().to_owned(),
                options,
                locked: answer.is_some(),
                feedback,
            })
        });

    QuizView {
        phase: state.phase(),
        categories,
        streak: state.streak(),
        remaining_seconds: state.remaining_seconds(),
        card,
    }
}

fn progress_percent(index: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    let percent = ((index + 1) * 100 / total).min(100);
    u8::try_from(percent).unwrap_or(100)
}
