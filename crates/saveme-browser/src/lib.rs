//! # saveme-browser
//!
//! The browsing workflow of the SaveMe drive client:
//!
//! - [`breadcrumb::BreadcrumbResolver`] rebuilds the ancestor chain of a
//!   folder with bounded, cycle-safe traversal.
//! - [`selection::SelectionSet`] tracks selected files and folders.
//! - [`controller::BrowserController`] ties navigation, folder creation,
//!   batch delete and batch upload together.

pub mod batch;
pub mod breadcrumb;
pub mod confirm;
pub mod controller;
pub mod selection;

#[cfg(test)]
pub(crate) mod fake;

pub use batch::{BatchItem, BatchOutcome, BatchReport};
pub use breadcrumb::BreadcrumbResolver;
pub use confirm::{AlwaysConfirm, ConfirmationPrompt};
pub use controller::{BrowserController, BrowserSnapshot, LoadState, Navigation};
pub use selection::{SelectionEntry, SelectionSet};
