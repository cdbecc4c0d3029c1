//! Line-oriented terminal front end: effects, screen rendering and input parsing.

use std::fmt::Write as _;
use std::io::{self, Write};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use quiz_core::model::{CategoryId, SessionPhase};
use services::{CardView, EffectError, FeedbackEffects, OptionMark, QuizView};

const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";
const SAVE_CURSOR: &str = "\x1b7";
const RESTORE_CURSOR: &str = "\x1b8";
const STATUS_ROW: &str = "\x1b[1;1H\x1b[2K";
const BELL: &str = "\x07";
const CONFETTI: &str = "🎉 ✨ 🎊 ✨ 🎉 ✨ 🎊 ✨ 🎉";

/// Bell for sounds, a confetti line for celebrations.
///
/// Confetti is not written directly: the next frame is drawn after a clear, so
/// the celebration is held until [`take_celebration`](Self::take_celebration)
/// hands it to [`draw`]. Clones share the pending flag.
#[derive(Debug, Clone)]
pub struct TerminalEffects {
    bell: bool,
    celebration: Arc<AtomicBool>,
}

impl TerminalEffects {
    #[must_use]
    pub fn new(bell: bool) -> Self {
        Self {
            bell,
            celebration: Arc::default(),
        }
    }

    /// Whether a celebration is waiting to be drawn. Clears the flag.
    pub fn take_celebration(&self) -> bool {
        self.celebration.swap(false, Ordering::Relaxed)
    }
}

impl FeedbackEffects for TerminalEffects {
    fn play_feedback_sound(&self, correct: bool) -> Result<(), EffectError> {
        if !self.bell {
            return Ok(());
        }
        let mut out = io::stdout().lock();
        // Two bells for a miss.
        let bells = if correct { BELL } else { "\x07\x07" };
        out.write_all(bells.as_bytes())?;
        out.flush()?;
        Ok(())
    }

    fn celebrate(&self) -> Result<(), EffectError> {
        self.celebration.store(true, Ordering::Relaxed);
        Ok(())
    }
}

/// One line of user input, interpreted against the current screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Quit,
    Pick(CategoryId),
    Answer(String),
    Next,
    Categories,
    Unknown,
}

pub fn parse_input(line: &str, view: &QuizView) -> Input {
    let line = line.trim();
    if matches!(line, "q" | "quit") {
        return Input::Quit;
    }

    match view.phase {
        SessionPhase::SelectingCategory => pick_category(line, view),
        SessionPhase::AwaitingAnswer => match line {
            "" => Input::Unknown,
            "c" => Input::Categories,
            _ => pick_option(line, view.card.as_ref()),
        },
        SessionPhase::ShowingFeedback => match line {
            "" | "n" | "next" => Input::Next,
            "c" => Input::Categories,
            _ => match category_by_number(line, view) {
                Some(input) => input,
                None if view.categories.iter().any(|c| c.id.as_str() == line) => {
                    Input::Pick(CategoryId::new(line))
                }
                None => Input::Unknown,
            },
        },
    }
}

fn pick_category(line: &str, view: &QuizView) -> Input {
    if line.is_empty() {
        return Input::Unknown;
    }
    category_by_number(line, view).unwrap_or_else(|| Input::Pick(CategoryId::new(line)))
}

/// `Some` when `line` is a number, `Pick` if it names a listed category.
fn category_by_number(line: &str, view: &QuizView) -> Option<Input> {
    let n = line.parse::<usize>().ok()?;
    Some(
        n.checked_sub(1)
            .and_then(|i| view.categories.get(i))
            .map_or(Input::Unknown, |c| Input::Pick(c.id.clone())),
    )
}

fn pick_option(line: &str, card: Option<&CardView>) -> Input {
    let Some(card) = card else {
        return Input::Unknown;
    };
    if let Ok(n) = line.parse::<usize>() {
        if let Some(option) = n.checked_sub(1).and_then(|i| card.options.get(i)) {
            return Input::Answer(option.text.clone());
        }
    }
    match card.options.iter().find(|o| o.text == line) {
        Some(option) => Input::Answer(option.text.clone()),
        None => Input::Unknown,
    }
}

pub fn render(view: &QuizView, celebrate: bool) -> String {
    let mut out = String::new();

    let Some(card) = view.card.as_ref() else {
        if view.phase == SessionPhase::SelectingCategory {
            let _ = writeln!(out, "Choose a UAT Section");
            let _ = writeln!(out);
        } else {
            let _ = writeln!(out, "This section has no questions yet. Pick another one:");
        }
        for (i, category) in view.categories.iter().enumerate() {
            let _ = writeln!(out, "  {}. {}  ({})", i + 1, category.label, category.id);
        }
        let _ = writeln!(out);
        let _ = write!(out, "Section number or id (q to quit): ");
        return out;
    };

    let _ = writeln!(out, "{}", status_line(view, card));
    let _ = writeln!(
        out,
        "{} {}/{}",
        progress_bar(card.progress_percent),
        card.position,
        card.total
    );
    let _ = writeln!(out);
    let _ = writeln!(out, "{}", card.prompt);
    let _ = writeln!(out);
    for (i, option) in card.options.iter().enumerate() {
        let marker = match option.mark {
            OptionMark::Neutral => ' ',
            OptionMark::Correct => '✔',
            OptionMark::Wrong => '✘',
        };
        let _ = writeln!(out, " {marker} {}. {}", i + 1, option.text);
    }
    let _ = writeln!(out);

    match &card.feedback {
        Some(feedback) => {
            let icon = if feedback.correct { '✔' } else { '✘' };
            let _ = writeln!(out, "{icon} {} {}", feedback.phrase, feedback.explanation);
            if celebrate {
                let _ = writeln!(out, "{CONFETTI}");
            }
            let _ = writeln!(out);
            let sections: Vec<String> = view
                .categories
                .iter()
                .enumerate()
                .map(|(i, c)| format!("{}. {}", i + 1, c.label))
                .collect();
            let _ = writeln!(out, "Switch section: {}", sections.join("  "));
            let _ = write!(out, "[Enter] next card  [number/id] switch  [c] sections  [q] quit: ");
        }
        None => {
            let _ = write!(out, "Answer number or text ([c] sections, [q] quit): ");
        }
    }
    out
}

fn status_line(view: &QuizView, card: &CardView) -> String {
    format!(
        "🔥 Streak: {:<4}  ⏱ {}s   {}",
        view.streak, view.remaining_seconds, card.category_label
    )
}

fn progress_bar(percent: u8) -> String {
    const WIDTH: usize = 20;
    let filled = usize::from(percent.min(100)) * WIDTH / 100;
    format!("[{}{}]", "█".repeat(filled), "░".repeat(WIDTH - filled))
}

/// Clear the terminal and draw `view`, with confetti under the feedback when
/// `celebrate` is set.
///
/// # Errors
///
/// Returns the underlying I/O error if stdout cannot be written.
pub fn draw(out: &mut impl Write, view: &QuizView, celebrate: bool) -> io::Result<()> {
    out.write_all(CLEAR_SCREEN.as_bytes())?;
    out.write_all(render(view, celebrate).as_bytes())?;
    out.flush()
}

/// Rewrite only the streak and timer line, leaving the cursor and any
/// partly typed input where they are.
///
/// # Errors
///
/// Returns the underlying I/O error if stdout cannot be written.
pub fn redraw_status(out: &mut impl Write, view: &QuizView) -> io::Result<()> {
    let Some(card) = view.card.as_ref() else {
        return Ok(());
    };
    write!(out, "{SAVE_CURSOR}{STATUS_ROW}{}{RESTORE_CURSOR}", status_line(view, card))?;
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;

    use services::{ManualTickScheduler, QuizContent, QuizSession, RandomSource};

    struct First;

    impl RandomSource for First {
        fn pick_index(&mut self, _len: usize) -> usize {
            0
        }
    }

    fn session() -> QuizSession {
        let content = QuizContent::reference().unwrap();
        QuizSession::new(
            Arc::new(content.catalog),
            Arc::new(content.feedback),
            ManualTickScheduler::new(),
        )
        .with_random(First)
    }

    #[test]
    fn picker_accepts_numbers_and_ids() {
        let session = session();
        let view = session.view();
        assert_eq!(
            parse_input("2", &view),
            Input::Pick(CategoryId::new("quantitative"))
        );
        assert_eq!(parse_input(" verbal ", &view), Input::Pick(CategoryId::new("verbal")));
        assert_eq!(parse_input("9", &view), Input::Unknown);
        assert_eq!(parse_input("", &view), Input::Unknown);
        assert_eq!(parse_input("q", &view), Input::Quit);
    }

    #[test]
    fn question_screen_maps_numbers_to_options() {
        let mut session = session();
        session.start_category("quantitative").unwrap();
        let view = session.view();
        assert_eq!(parse_input("3", &view), Input::Answer("6".into()));
        assert_eq!(parse_input("12", &view), Input::Answer("12".into()));
        assert_eq!(parse_input("5", &view), Input::Unknown);
        assert_eq!(parse_input("c", &view), Input::Categories);
        assert_eq!(parse_input("", &view), Input::Unknown);
    }

    #[test]
    fn feedback_screen_defaults_to_next() {
        let mut session = session();
        session.start_category("quantitative").unwrap();
        session.submit_answer("4").unwrap();
        let view = session.view();
        assert_eq!(parse_input("", &view), Input::Next);
        assert_eq!(parse_input("n", &view), Input::Next);
        assert_eq!(parse_input("analytical", &view), Input::Pick(CategoryId::new("analytical")));
    }

    #[test]
    fn feedback_screen_numbers_switch_category() {
        let mut session = session();
        session.start_category("quantitative").unwrap();
        session.submit_answer("4").unwrap();
        let view = session.view();
        assert_eq!(parse_input("3", &view), Input::Pick(CategoryId::new("analytical")));
        assert_eq!(parse_input("1", &view), Input::Pick(CategoryId::new("verbal")));
        assert_eq!(parse_input("7", &view), Input::Unknown);
        assert_eq!(parse_input("6", &view), Input::Unknown);
        assert_eq!(parse_input("history", &view), Input::Unknown);

        let Input::Pick(id) = parse_input("3", &view) else {
            panic!("expected a category pick");
        };
        session.choose_new_category(id.as_str()).unwrap();
        assert_eq!(
            session.state().active_category().map(CategoryId::as_str),
            Some("analytical")
        );
    }

    #[test]
    fn render_picker_lists_sections() {
        let screen = render(&session().view(), false);
        assert!(screen.contains("Choose a UAT Section"));
        assert!(screen.contains("1. Verbal Reasoning  (verbal)"));
        assert!(screen.contains("3. Analytical Reasoning  (analytical)"));
    }

    #[test]
    fn render_feedback_marks_options() {
        let mut session = session();
        session.start_category("quantitative").unwrap();
        session.submit_answer("6").unwrap();
        let screen = render(&session.view(), false);

        assert!(screen.contains("If 3x = 12, what is x?"));
        assert!(screen.contains(" ✔ 1. 4"));
        assert!(screen.contains(" ✘ 3. 6"));
        assert!(screen.contains("Divide both sides by 3"));
        assert!(screen.contains(session.feedback_phrase().unwrap()));
        assert!(screen.contains("Streak: 0"));
        assert!(screen.contains("Switch section: 1. Verbal Reasoning"));
        assert!(!screen.contains(CONFETTI));
    }

    #[test]
    fn celebration_survives_the_redraw() {
        let effects = TerminalEffects::new(false);
        let content = QuizContent::reference().unwrap();
        let mut session = QuizSession::new(
            Arc::new(content.catalog),
            Arc::new(content.feedback),
            ManualTickScheduler::new(),
        )
        .with_effects(effects.clone())
        .with_random(First);

        session.start_category("quantitative").unwrap();
        assert!(!effects.take_celebration());
        session.submit_answer("4").unwrap();

        let mut buf = Vec::new();
        draw(&mut buf, &session.view(), effects.take_celebration()).unwrap();
        let frame = String::from_utf8(buf).unwrap();
        let after_clear = frame.rsplit(CLEAR_SCREEN).next().unwrap();
        assert!(after_clear.contains(CONFETTI));

        assert!(!effects.take_celebration());
    }

    #[test]
    fn wrong_answer_does_not_celebrate() {
        let effects = TerminalEffects::new(false);
        let content = QuizContent::reference().unwrap();
        let mut session = QuizSession::new(
            Arc::new(content.catalog),
            Arc::new(content.feedback),
            ManualTickScheduler::new(),
        )
        .with_effects(effects.clone());

        session.start_category("quantitative").unwrap();
        session.submit_answer("6").unwrap();
        assert!(!effects.take_celebration());
    }

    #[test]
    fn status_redraw_touches_only_the_timer_line() {
        let mut session = session();
        session.start_category("verbal").unwrap();

        let mut buf = Vec::new();
        redraw_status(&mut buf, &session.view()).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.starts_with(SAVE_CURSOR));
        assert!(text.ends_with(RESTORE_CURSOR));
        assert!(text.contains("⏱ 15s"));
        assert!(!text.contains(CLEAR_SCREEN));
        assert!(!text.contains("Which word"));

        session.return_to_categories();
        let mut buf = Vec::new();
        redraw_status(&mut buf, &session.view()).unwrap();
        assert!(buf.is_empty());
    }

    #[test]
    fn progress_bar_fills_proportionally() {
        assert_eq!(progress_bar(0), format!("[{}]", "░".repeat(20)));
        assert_eq!(progress_bar(50), format!("[{}{}]", "█".repeat(10), "░".repeat(10)));
        assert_eq!(progress_bar(100), format!("[{}]", "█".repeat(20)));
    }

    #[test]
    fn draw_clears_before_rendering() {
        let mut buf = Vec::new();
        draw(&mut buf, &session().view(), false).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.starts_with(CLEAR_SCREEN));
    }
}
