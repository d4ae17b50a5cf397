//! Bounded, cancellable polling shared by the focus waiter and the dialog bridge.

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;

/// Spacing and budget for a polling loop.
///
/// Serialized as `{ "pollIntervalMs": .., "timeoutMs": .. }`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PollOptions {
    poll_interval_ms: u64,
    timeout_ms: u64,
}

impl PollOptions {
    /// A zero interval is raised to 1ms so the loop always sleeps.
    pub fn new(poll_interval_ms: u64, timeout_ms: u64) -> Self {
        Self {
            poll_interval_ms: poll_interval_ms.max(1),
            timeout_ms,
        }
    }

    pub fn poll_interval_ms(&self) -> u64 {
        self.poll_interval_ms.max(1)
    }

    pub fn timeout_ms(&self) -> u64 {
        self.timeout_ms
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Number of checks that fit in the budget: `ceil(timeout / interval)`, at least one.
    pub fn max_checks(&self) -> u32 {
        let checks = self.timeout_ms.div_ceil(self.poll_interval_ms()).max(1);
        u32::try_from(checks).unwrap_or(u32::MAX)
    }
}

/// How a polling loop ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollOutcome<T> {
    /// The check produced a value after `checks` attempts
    Ready { value: T, checks: u32 },
    /// Every check in the budget came back empty
    Exhausted { checks: u32 },
    /// The token was cancelled before the next check
    Cancelled { checks: u32 },
}

/// Run `check` until it yields a value, the budget runs out, or `cancel` fires.
///
/// Performs at most [`PollOptions::max_checks`] checks and sleeps one interval
/// after each empty check, so an exhausted loop has spent at least the full
/// timeout. Cancellation is observed before every check. Errors from `check`
/// end the loop immediately.
pub fn poll_until<T, E, F>(
    options: &PollOptions,
    cancel: &CancellationToken,
    mut check: F,
) -> Result<PollOutcome<T>, E>
where
    F: FnMut() -> Result<Option<T>, E>,
{
    let max_checks = options.max_checks();
    let interval = options.poll_interval();

    for attempt in 1..=max_checks {
        if cancel.is_cancelled() {
            return Ok(PollOutcome::Cancelled {
                checks: attempt - 1,
            });
        }

        if let Some(value) = check()? {
            return Ok(PollOutcome::Ready {
                value,
                checks: attempt,
            });
        }

        std::thread::sleep(interval);
    }

    Ok(PollOutcome::Exhausted { checks: max_checks })
}

/// Run `check` until it yields a value, the timeout elapses, or `cancel` fires.
///
/// Unlike [`poll_until`] the budget is wall-clock time: time spent inside
/// `check` counts against it, and the sleep after an empty check never
/// reaches past the deadline. The loop ends no later than one slow check
/// after the timeout.
pub fn poll_until_deadline<T, E, F>(
    options: &PollOptions,
    cancel: &CancellationToken,
    mut check: F,
) -> Result<PollOutcome<T>, E>
where
    F: FnMut() -> Result<Option<T>, E>,
{
    let started = Instant::now();
    let timeout = options.timeout();
    let interval = options.poll_interval();
    let mut checks: u32 = 0;

    loop {
        if cancel.is_cancelled() {
            return Ok(PollOutcome::Cancelled { checks });
        }

        checks = checks.saturating_add(1);
        if let Some(value) = check()? {
            return Ok(PollOutcome::Ready { value, checks });
        }

        let elapsed = started.elapsed();
        if elapsed >= timeout {
            return Ok(PollOutcome::Exhausted { checks });
        }
        std::thread::sleep(interval.min(timeout - elapsed));
        if started.elapsed() >= timeout {
            return Ok(PollOutcome::Exhausted { checks });
        }
    }
}
