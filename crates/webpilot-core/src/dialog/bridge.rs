use std::sync::Arc;
use std::sync::mpsc::{Receiver, RecvTimeoutError, sync_channel};
use std::time::{Duration, Instant};

use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use super::errors::{DialogDriverError, DialogError};
use super::gate::DialogGate;
use super::locator::{DialogDriver, NativeSurfaceLocator, select_dialog};
use super::types::{DialogOutcome, DialogWaitContext, NativeWindow};
use crate::polling::{PollOutcome, poll_until_deadline};

const WORKER_THREAD_NAME: &str = "webpilot-dialog";

/// Spawns dialog workers and hands back a handle to wait on them.
#[derive(Clone)]
pub struct DialogBridge {
    locator: Arc<dyn NativeSurfaceLocator>,
    driver: Arc<dyn DialogDriver>,
    gate: Arc<DialogGate>,
}

impl DialogBridge {
    pub fn new(
        locator: Arc<dyn NativeSurfaceLocator>,
        driver: Arc<dyn DialogDriver>,
        gate: Arc<DialogGate>,
    ) -> Self {
        Self {
            locator,
            driver,
            gate,
        }
    }

    pub fn gate(&self) -> &Arc<DialogGate> {
        &self.gate
    }

    /// Claim the gate for the context's top-level window and start a worker.
    ///
    /// The worker owns `ctx` and the gate ticket; the slot is released when
    /// the worker exits, whether or not anyone is still waiting for it.
    ///
    /// # Errors
    ///
    /// `DialogError::Busy` if a wait for the same window is still alive,
    /// `DialogError::WorkerSpawnFailed` if the OS refused the thread.
    pub fn spawn(&self, ctx: DialogWaitContext) -> Result<PendingDialog, DialogError> {
        let ticket = self.gate.acquire(ctx.top_level(), ctx.generation())?;

        let generation = ctx.generation();
        let options = *ctx.options();
        let revoked = CancellationToken::new();
        let (sender, receiver) = sync_channel(1);

        let locator = Arc::clone(&self.locator);
        let driver = Arc::clone(&self.driver);
        let worker_revoked = revoked.clone();

        info!(
            event = "core.dialog.worker_spawn_started",
            generation = %generation,
            top_level = %ctx.top_level(),
            timeout_ms = options.timeout_ms()
        );

        std::thread::Builder::new()
            .name(WORKER_THREAD_NAME.to_string())
            .spawn(move || {
                let mut ctx = ctx;
                let result =
                    run_dialog_wait(&mut ctx, locator.as_ref(), driver.as_ref(), &worker_revoked);
                drop(ticket);
                // The command thread may have given up already.
                if sender.send(result).is_err() {
                    debug!(event = "core.dialog.worker_result_discarded", generation = %generation);
                }
            })
            .map_err(|e| {
                error!(event = "core.dialog.worker_spawn_failed", generation = %generation, error = %e);
                DialogError::WorkerSpawnFailed {
                    reason: e.to_string(),
                }
            })?;

        Ok(PendingDialog {
            receiver,
            revoked,
            generation,
            started: Instant::now(),
            budget_ms: options.timeout_ms(),
            deadline: options.timeout() + options.poll_interval(),
            slice: options.poll_interval(),
        })
    }
}

/// The command thread's side of a running dialog worker.
///
/// Dropping it revokes the worker.
#[derive(Debug)]
pub struct PendingDialog {
    receiver: Receiver<Result<DialogOutcome, DialogError>>,
    revoked: CancellationToken,
    generation: Uuid,
    started: Instant,
    budget_ms: u64,
    deadline: Duration,
    slice: Duration,
}

impl PendingDialog {
    pub fn generation(&self) -> Uuid {
        self.generation
    }

    /// Hard limit measured from spawn
    pub fn deadline(&self) -> Duration {
        self.deadline
    }

    /// Tell the worker to stop without touching the dialog again
    pub fn revoke(&self) {
        self.revoked.cancel();
    }

    /// Block until the worker reports, the hard deadline passes, or `cancel` fires.
    ///
    /// Waits in slices of one poll interval. On deadline or cancellation the
    /// worker is revoked and left to exit on its own; its late result is dropped.
    pub fn wait(self, cancel: &CancellationToken) -> Result<DialogOutcome, DialogError> {
        loop {
            if cancel.is_cancelled() {
                info!(event = "core.dialog.wait_cancelled", generation = %self.generation);
                self.revoke();
                return Err(DialogError::Cancelled);
            }

            let elapsed = self.started.elapsed();
            if elapsed >= self.deadline {
                warn!(
                    event = "core.dialog.wait_timeout",
                    generation = %self.generation,
                    timeout_ms = self.budget_ms,
                    deadline_ms = self.deadline.as_millis() as u64,
                    elapsed_ms = elapsed.as_millis() as u64
                );
                self.revoke();
                return Err(DialogError::Timeout {
                    timeout_ms: self.budget_ms,
                });
            }

            let slice = self.slice.min(self.deadline - elapsed);
            match self.receiver.recv_timeout(slice) {
                Ok(result) => return result,
                Err(RecvTimeoutError::Timeout) => continue,
                Err(RecvTimeoutError::Disconnected) => {
                    error!(event = "core.dialog.worker_lost", generation = %self.generation);
                    return Err(DialogError::WorkerLost);
                }
            }
        }
    }
}

impl Drop for PendingDialog {
    fn drop(&mut self) {
        self.revoked.cancel();
    }
}

/// Body of the dialog worker: find the dialog, enter the text, confirm.
///
/// The search runs against the wall clock, so a slow locator still reports
/// `NotFound` before the waiting side's deadline. Revocation is honored before every poll, before text entry and before
/// confirmation. A revoked worker returns `DialogError::Cancelled`.
pub fn run_dialog_wait(
    ctx: &mut DialogWaitContext,
    locator: &dyn NativeSurfaceLocator,
    driver: &dyn DialogDriver,
    revoked: &CancellationToken,
) -> Result<DialogOutcome, DialogError> {
    let started = Instant::now();
    let options = *ctx.options();

    let outcome = poll_until_deadline(&options, revoked, || -> Result<Option<NativeWindow>, DialogError> {
        let windows = locator
            .windows_for_process(ctx.process_id())
            .map_err(|e| DialogError::DetectionFailed { reason: e.reason })?;
        Ok(select_dialog(&windows, ctx.top_level(), ctx.pattern()).cloned())
    });

    let (dialog, checks) = match outcome {
        Ok(PollOutcome::Ready { value, checks }) => (value, checks),
        Ok(PollOutcome::Exhausted { checks }) => {
            info!(
                event = "core.dialog.search_exhausted",
                generation = %ctx.generation(),
                checks = checks
            );
            return Err(DialogError::NotFound {
                timeout_ms: options.timeout_ms(),
                checks,
            });
        }
        Ok(PollOutcome::Cancelled { checks }) => {
            debug!(event = "core.dialog.search_revoked", generation = %ctx.generation(), checks = checks);
            return Err(DialogError::Cancelled);
        }
        Err(e) => {
            error!(event = "core.dialog.search_failed", generation = %ctx.generation(), error = %e);
            return Err(e);
        }
    };

    ctx.resolve_dialog(dialog.handle);
    info!(
        event = "core.dialog.search_completed",
        generation = %ctx.generation(),
        dialog = %dialog.handle,
        checks = checks
    );

    ensure_not_revoked(ctx, revoked, "enter_text")?;
    enter_text_with_retry(ctx, driver, &dialog, revoked)?;

    ensure_not_revoked(ctx, revoked, "confirm")?;
    driver
        .confirm(&dialog)
        .map_err(|e| injection_failed(&dialog, e))?;

    let elapsed = started.elapsed();
    info!(
        event = "core.dialog.interaction_completed",
        generation = %ctx.generation(),
        dialog = %dialog.handle,
        elapsed_ms = elapsed.as_millis() as u64
    );

    Ok(DialogOutcome {
        dialog: dialog.handle,
        checks,
        elapsed,
    })
}

fn enter_text_with_retry(
    ctx: &DialogWaitContext,
    driver: &dyn DialogDriver,
    dialog: &NativeWindow,
    revoked: &CancellationToken,
) -> Result<(), DialogError> {
    match driver.enter_text(dialog, ctx.text()) {
        Ok(()) => Ok(()),
        Err(DialogDriverError::TextRejected) => {
            warn!(
                event = "core.dialog.text_rejected",
                generation = %ctx.generation(),
                dialog = %dialog.handle
            );
            driver
                .focus_text_field(dialog)
                .map_err(|e| injection_failed(dialog, e))?;
            ensure_not_revoked(ctx, revoked, "enter_text")?;
            driver
                .enter_text(dialog, ctx.text())
                .map_err(|e| injection_failed(dialog, e))
        }
        Err(e) => Err(injection_failed(dialog, e)),
    }
}

fn ensure_not_revoked(
    ctx: &DialogWaitContext,
    revoked: &CancellationToken,
    step: &'static str,
) -> Result<(), DialogError> {
    if revoked.is_cancelled() {
        warn!(
            event = "core.dialog.worker_revoked",
            generation = %ctx.generation(),
            step = step
        );
        return Err(DialogError::Cancelled);
    }
    Ok(())
}

fn injection_failed(dialog: &NativeWindow, error: DialogDriverError) -> DialogError {
    DialogError::InjectionFailed {
        dialog: dialog.handle,
        reason: error.to_string(),
    }
}
