use std::sync::Arc;
use std::time::Duration;

use quiz_core::model::{QUESTION_SECONDS, SessionPhase};
use services::{QuizContent, QuizSession, SeededRandom, TickOutcome, TokioTickScheduler};
use tokio::sync::mpsc;
use tokio::time::Instant;

fn session(ticks: mpsc::UnboundedSender<services::TimerTick>) -> QuizSession {
    let content = QuizContent::reference().unwrap();
    let timer = TokioTickScheduler::new(ticks).unwrap();
    QuizSession::new(Arc::new(content.catalog), Arc::new(content.feedback), timer)
        .with_random(SeededRandom::new(42))
}

#[tokio::test(start_paused = true)]
async fn unanswered_question_times_out_after_fifteen_seconds() {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut session = session(tx);
    let start = Instant::now();

    session.start_category("verbal").unwrap();
    let outcome = loop {
        let tick = rx.recv().await.unwrap();
        match session.on_tick(tick) {
            TickOutcome::Counting(_) => {}
            other => break other,
        }
    };

    assert_eq!(outcome, TickOutcome::TimedOut);
    assert_eq!(start.elapsed(), Duration::from_secs(u64::from(QUESTION_SECONDS)));
    assert_eq!(session.state().phase(), SessionPhase::ShowingFeedback);
    assert_eq!(session.state().is_answer_correct(), Some(false));
    assert!(session.feedback_phrase().is_some());
}

#[tokio::test(start_paused = true)]
async fn answering_stops_the_countdown_task() {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut session = session(tx);

    session.start_category("verbal").unwrap();
    let tick = rx.recv().await.unwrap();
    assert_eq!(session.on_tick(tick), TickOutcome::Counting(QUESTION_SECONDS - 1));

    session.submit_answer("Plentiful").unwrap();
    tokio::time::sleep(Duration::from_secs(30)).await;
    assert!(rx.try_recv().is_err());
    assert_eq!(session.state().remaining_seconds(), QUESTION_SECONDS - 1);
}

#[tokio::test(start_paused = true)]
async fn next_card_gets_a_full_countdown() {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut session = session(tx);

    session.start_category("analytical").unwrap();
    for _ in 0..5 {
        let tick = rx.recv().await.unwrap();
        session.on_tick(tick);
    }
    session.submit_answer("Maybe").unwrap();
    session.advance_card().unwrap();
    assert_eq!(session.state().remaining_seconds(), QUESTION_SECONDS);

    let tick = rx.recv().await.unwrap();
    assert_eq!(session.armed_timer(), Some(tick.id));
    assert_eq!(session.on_tick(tick), TickOutcome::Counting(QUESTION_SECONDS - 1));
}
