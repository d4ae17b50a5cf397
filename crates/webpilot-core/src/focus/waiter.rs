use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use super::errors::FocusError;
use crate::element::ElementHandle;
use crate::polling::{PollOptions, PollOutcome, poll_until};

/// Poll the element's focus predicate until it reports `true`.
///
/// Performs at most `ceil(timeout / interval)` checks, sleeping one interval
/// between them, and returns the number of checks it took.
///
/// # Errors
///
/// `FocusError::Timeout` when the budget is exhausted, `FocusError::Cancelled`
/// when `cancel` fires between checks, `FocusError::Element` when the focus
/// query itself fails (e.g. the element went stale).
pub fn wait_until_element_focused(
    element: &dyn ElementHandle,
    options: &PollOptions,
    cancel: &CancellationToken,
) -> Result<u32, FocusError> {
    debug!(
        event = "core.focus.wait_started",
        element = element.id(),
        poll_interval_ms = options.poll_interval_ms(),
        timeout_ms = options.timeout_ms()
    );

    let outcome = poll_until(options, cancel, || {
        element
            .is_focused()
            .map(|focused| focused.then_some(()))
    })?;

    match outcome {
        PollOutcome::Ready { checks, .. } => {
            debug!(
                event = "core.focus.wait_completed",
                element = element.id(),
                checks = checks
            );
            Ok(checks)
        }
        PollOutcome::Exhausted { checks } => {
            warn!(
                event = "core.focus.wait_timeout",
                element = element.id(),
                checks = checks,
                timeout_ms = options.timeout_ms()
            );
            Err(FocusError::Timeout {
                timeout_ms: options.timeout_ms(),
                checks,
            })
        }
        PollOutcome::Cancelled { checks } => {
            info!(
                event = "core.focus.wait_cancelled",
                element = element.id(),
                checks = checks
            );
            Err(FocusError::Cancelled { checks })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::ElementError;
    use crate::testing::FakeElement;

    #[test]
    fn test_focus_on_first_check() {
        let element = FakeElement::text_field("q").focused_after(1);
        let checks = wait_until_element_focused(
            &element,
            &PollOptions::new(10, 100),
            &CancellationToken::new(),
        )
        .unwrap();
        assert_eq!(checks, 1);
    }

    #[test]
    fn test_focus_after_several_checks() {
        let element = FakeElement::text_field("q").focused_after(4);
        let checks = wait_until_element_focused(
            &element,
            &PollOptions::new(5, 100),
            &CancellationToken::new(),
        )
        .unwrap();
        assert_eq!(checks, 4);
        assert_eq!(element.focus_checks(), 4);
    }

    #[test]
    fn test_timeout_counts_exact_checks() {
        let element = FakeElement::text_field("q").never_focused();
        let err = wait_until_element_focused(
            &element,
            &PollOptions::new(5, 50),
            &CancellationToken::new(),
        )
        .unwrap_err();
        match err {
            FocusError::Timeout { timeout_ms, checks } => {
                assert_eq!(timeout_ms, 50);
                assert_eq!(checks, 10);
            }
            other => panic!("Expected Timeout, got {:?}", other),
        }
        assert_eq!(element.focus_checks(), 10);
    }

    #[test]
    fn test_cancelled_before_first_check() {
        let element = FakeElement::text_field("q").never_focused();
        let cancel = CancellationToken::new();
        cancel.cancel();
        let err = wait_until_element_focused(&element, &PollOptions::new(5, 50), &cancel)
            .unwrap_err();
        assert!(matches!(err, FocusError::Cancelled { checks: 0 }));
        assert_eq!(element.focus_checks(), 0);
    }

    #[test]
    fn test_stale_element_propagates() {
        let element = FakeElement::text_field("q").stale();
        let err = wait_until_element_focused(
            &element,
            &PollOptions::new(5, 50),
            &CancellationToken::new(),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            FocusError::Element {
                source: ElementError::Stale
            }
        ));
    }
}
