use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tokio::task::AbortHandle;
use tokio::time::{Instant, MissedTickBehavior, interval_at};
use tracing::debug;

use crate::error::TimerError;

/// Identifies one armed countdown. Every arm gets a fresh id.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

impl TimerId {
    #[must_use]
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    #[must_use]
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Debug for TimerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TimerId({})", self.0)
    }
}

/// One elapsed second of the countdown identified by `id`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerTick {
    pub id: TimerId,
}

/// Arms and cancels the one-second countdown of a session.
///
/// The session cancels its previous timer before arming a new one; a
/// scheduler must deliver ticks for `id` until `cancel(id)` is called.
pub trait TickScheduler {
    fn arm(&mut self, id: TimerId);
    fn cancel(&mut self, id: TimerId);
}

//
// ─── TOKIO ─────────────────────────────────────────────────────────────────────
//

const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Countdown backed by a spawned `tokio::time::interval` task.
///
/// Ticks are delivered on the channel given to [`TokioTickScheduler::new`].
pub struct TokioTickScheduler {
    handle: Handle,
    ticks: mpsc::UnboundedSender<TimerTick>,
    active: Option<(TimerId, AbortHandle)>,
}

impl TokioTickScheduler {
    /// # Errors
    ///
    /// Returns `TimerError::NoRuntime` when called outside a tokio runtime.
    pub fn new(ticks: mpsc::UnboundedSender<TimerTick>) -> Result<Self, TimerError> {
        let handle = Handle::try_current().map_err(|_| TimerError::NoRuntime)?;
        Ok(Self {
            handle,
            ticks,
            active: None,
        })
    }

    #[must_use]
    pub fn active(&self) -> Option<TimerId> {
        self.active.as_ref().map(|(id, _)| *id)
    }

    fn abort_active(&mut self) {
        if let Some((id, task)) = self.active.take() {
            task.abort();
            debug!(timer = id.value(), "countdown task aborted");
        }
    }
}

impl TickScheduler for TokioTickScheduler {
    fn arm(&mut self, id: TimerId) {
        self.abort_active();

        let ticks = self.ticks.clone();
        let period = TICK_PERIOD;
        let task = self.handle.spawn(async move {
            let mut interval = interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                if ticks.send(TimerTick { id }).is_err() {
                    break;
                }
            }
        });
        self.active = Some((id, task.abort_handle()));
        debug!(timer = id.value(), "countdown task armed");
    }

    fn cancel(&mut self, id: TimerId) {
        if self.active() == Some(id) {
            self.abort_active();
        }
    }
}

impl Drop for TokioTickScheduler {
    fn drop(&mut self) {
        self.abort_active();
    }
}

impl fmt::Debug for TokioTickScheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokioTickScheduler")
            .field("active", &self.active())
            .finish_non_exhaustive()
    }
}

//
// ─── MANUAL ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Default)]
struct ManualLog {
    active: Option<TimerId>,
    armed: Vec<TimerId>,
    cancelled: Vec<TimerId>,
}

/// Scheduler that only records arm/cancel calls. The caller delivers ticks.
///
/// Clones share the same log, so a test can keep one clone while the session
/// owns the other.
#[derive(Debug, Clone, Default)]
pub struct ManualTickScheduler {
    log: Arc<Mutex<ManualLog>>,
}

impl ManualTickScheduler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The currently armed timer, if any.
    #[must_use]
    pub fn active(&self) -> Option<TimerId> {
        self.with_log(|log| log.active)
    }

    /// A tick for the currently armed timer.
    #[must_use]
    pub fn tick(&self) -> Option<TimerTick> {
        self.active().map(|id| TimerTick { id })
    }

    #[must_use]
    pub fn armed(&self) -> Vec<TimerId> {
        self.with_log(|log| log.armed.clone())
    }

    #[must_use]
    pub fn cancelled(&self) -> Vec<TimerId> {
        self.with_log(|log| log.cancelled.clone())
    }

    fn with_log<T>(&self, f: impl FnOnce(&mut ManualLog) -> T) -> T {
        let mut log = self.log.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut log)
    }
}

impl TickScheduler for ManualTickScheduler {
    fn arm(&mut self, id: TimerId) {
        self.with_log(|log| {
            log.active = Some(id);
            log.armed.push(id);
        });
    }

    fn cancel(&mut self, id: TimerId) {
        self.with_log(|log| {
            if log.active == Some(id) {
                log.active = None;
            }
            log.cancelled.push(id);
        });
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
