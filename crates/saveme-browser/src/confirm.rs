//! Confirmation gate for destructive actions.

/// Asks the user to approve a destructive action.
pub trait ConfirmationPrompt: Send + Sync {
    /// Return `true` to proceed.
    fn confirm(&self, message: &str) -> bool;
}

/// Approves everything; for non-interactive callers that already confirmed.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysConfirm;

impl ConfirmationPrompt for AlwaysConfirm {
    fn confirm(&self, _message: &str) -> bool {
        true
    }
}

impl<F> ConfirmationPrompt for F
where
    F: Fn(&str) -> bool + Send + Sync,
{
    fn confirm(&self, message: &str) -> bool {
        self(message)
    }
}
