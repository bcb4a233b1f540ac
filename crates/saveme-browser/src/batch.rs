//! Per-item results of fan-out batch operations.

use saveme_core::error::AppError;
use saveme_core::result::AppResult;

/// The settled result of one item in a batch.
#[derive(Debug)]
pub struct BatchItem<K, T> {
    /// What the item targeted (a resource key, a file name).
    pub target: K,
    /// How the request ended.
    pub result: AppResult<T>,
}

/// All settled items of a batch, in completion order.
#[derive(Debug)]
pub struct BatchReport<K, T> {
    /// Settled items.
    pub items: Vec<BatchItem<K, T>>,
}

impl<K, T> BatchReport<K, T> {
    /// Number of requests dispatched.
    pub fn dispatched(&self) -> usize {
        self.items.len()
    }

    /// Number of items that succeeded.
    pub fn succeeded(&self) -> usize {
        self.items.iter().filter(|i| i.result.is_ok()).count()
    }

    /// Number of items that failed.
    pub fn failed(&self) -> usize {
        self.dispatched() - self.succeeded()
    }

    /// Successful values with their targets.
    pub fn successes(&self) -> impl Iterator<Item = (&K, &T)> {
        self.items
            .iter()
            .filter_map(|i| i.result.as_ref().ok().map(|v| (&i.target, v)))
    }

    /// Failures with their targets.
    pub fn failures(&self) -> impl Iterator<Item = (&K, &AppError)> {
        self.items
            .iter()
            .filter_map(|i| i.result.as_ref().err().map(|e| (&i.target, e)))
    }
}

/// What a batch request turned into.
#[derive(Debug)]
pub enum BatchOutcome<K, T> {
    /// There was nothing to act on; no request and no prompt.
    NothingToDo,
    /// The user declined the confirmation.
    Declined,
    /// Every dispatched request settled.
    Completed(BatchReport<K, T>),
}

impl<K, T> BatchOutcome<K, T> {
    /// The report, if the batch ran.
    pub fn report(&self) -> Option<&BatchReport<K, T>> {
        match self {
            Self::Completed(report) => Some(report),
            _ => None,
        }
    }
}
