//! Test doubles for the patch crate.

use core::cell::RefCell;

use reinhardt_vdom_core::ComponentRef;

use crate::error::{ErrorReporter, PatchError};

/// An error received by [`RecordingReporter::report`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
	pub message: String,
	pub info: String,
	pub component: Option<String>,
}

/// Reporter that stores everything it receives.
///
/// # Examples
///
/// ```
/// use reinhardt_vdom_patch::error::{ErrorReporter, PatchError};
/// use reinhardt_vdom_patch::testing::RecordingReporter;
///
/// let reporter = RecordingReporter::new();
/// reporter.warn(&PatchError::InvalidHandler { event: "click".into() }, None);
///
/// assert_eq!(reporter.warnings().len(), 1);
/// assert!(reporter.reports().is_empty());
/// ```
#[derive(Debug, Default)]
pub struct RecordingReporter {
	reports: RefCell<Vec<Report>>,
	warnings: RefCell<Vec<String>>,
}

impl RecordingReporter {
	pub fn new() -> Self {
		Self::default()
	}

	/// Errors reported so far.
	pub fn reports(&self) -> Vec<Report> {
		self.reports.borrow().clone()
	}

	/// Warning messages so far.
	pub fn warnings(&self) -> Vec<String> {
		self.warnings.borrow().clone()
	}

	/// Drops everything recorded so far.
	pub fn clear(&self) {
		self.reports.borrow_mut().clear();
		self.warnings.borrow_mut().clear();
	}
}

impl ErrorReporter for RecordingReporter {
	fn report(&self, error: &PatchError, owner: Option<&ComponentRef>, info: &str) {
		self.reports.borrow_mut().push(Report {
			message: error.to_string(),
			info: info.to_string(),
			component: owner.and_then(|c| c.name.clone()),
		});
	}

	fn warn(&self, warning: &PatchError, _owner: Option<&ComponentRef>) {
		self.warnings.borrow_mut().push(warning.to_string());
	}
}
