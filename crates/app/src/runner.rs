//! Single-task event loop feeding user input and countdown ticks to the session.

use std::io;
use std::sync::Arc;

use services::{
    QuizContent, QuizSession, SeededRandom, SessionError, TickOutcome, TokioTickScheduler,
};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::terminal::{Input, TerminalEffects, draw, parse_input, redraw_status};

#[derive(Debug, Clone, Copy)]
pub struct RunOptions {
    pub seed: Option<u64>,
    pub bell: bool,
}

/// Run the quiz until the user quits or stdin closes.
///
/// # Errors
///
/// Returns an error if the countdown cannot be set up or the terminal cannot
/// be read or written.
pub async fn run(content: QuizContent, options: RunOptions) -> Result<(), Box<dyn std::error::Error>> {
    let (tick_tx, mut ticks) = mpsc::unbounded_channel();
    let timer = TokioTickScheduler::new(tick_tx)?;

    let effects = TerminalEffects::new(options.bell);
    let session = QuizSession::new(Arc::new(content.catalog), Arc::new(content.feedback), timer)
        .with_effects(effects.clone());
    let mut session = match options.seed {
        Some(seed) => session.with_random(SeededRandom::new(seed)),
        None => session,
    };

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut out = io::stdout();
    draw(&mut out, &session.view(), false)?;

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    debug!("stdin closed");
                    break;
                };
                let input = parse_input(&line, &session.view());
                if input == Input::Quit {
                    break;
                }
                apply(&mut session, input);
                draw(&mut out, &session.view(), effects.take_celebration())?;
            }
            Some(tick) = ticks.recv() => {
                match session.on_tick(tick) {
                    TickOutcome::Counting(_) => redraw_status(&mut out, &session.view())?,
                    TickOutcome::TimedOut => draw(&mut out, &session.view(), false)?,
                    TickOutcome::Stale => {}
                }
            }
        }
    }

    info!(streak = session.state().streak(), "quiz finished");
    Ok(())
}

fn apply(session: &mut QuizSession, input: Input) {
    let result: Result<(), SessionError> = match input {
        Input::Pick(id) => session.choose_new_category(id.as_str()),
        Input::Answer(option) => session.submit_answer(&option),
        Input::Next => session.advance_card(),
        Input::Categories => {
            session.return_to_categories();
            Ok(())
        }
        Input::Quit | Input::Unknown => Ok(()),
    };
    if let Err(err) = result {
        debug!(%err, "input ignored");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::model::SessionPhase;
    use services::ManualTickScheduler;

    fn session() -> QuizSession {
        let content = QuizContent::reference().unwrap();
        QuizSession::new(
            Arc::new(content.catalog),
            Arc::new(content.feedback),
            ManualTickScheduler::new(),
        )
    }

    #[test]
    fn apply_walks_through_a_card() {
        let mut session = session();
        apply(&mut session, Input::Pick("analytical".into()));
        assert_eq!(session.state().phase(), SessionPhase::AwaitingAnswer);

        apply(&mut session, Input::Answer("Not enough info".into()));
        assert_eq!(session.state().streak(), 1);

        apply(&mut session, Input::Answer("Yes".into()));
        assert_eq!(session.state().streak(), 1);

        apply(&mut session, Input::Next);
        assert_eq!(session.state().phase(), SessionPhase::AwaitingAnswer);

        apply(&mut session, Input::Categories);
        assert_eq!(session.state().phase(), SessionPhase::SelectingCategory);
    }

    #[test]
    fn apply_ignores_unknown_category() {
        let mut session = session();
        apply(&mut session, Input::Pick("history".into()));
        assert_eq!(session.state().phase(), SessionPhase::SelectingCategory);
    }
}
