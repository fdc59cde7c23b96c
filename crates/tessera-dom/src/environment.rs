//! DOM capability probe.

use crate::error::DomError;

/// Whether the current process can mutate a DOM.
///
/// Probe once at startup with [`Environment::detect`] and hand the result to
/// the reconciler. The reconciler stays constructible either way; DOM
/// operations fail with [`DomError::Unavailable`] when the capability is
/// missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Environment {
	can_use_dom: bool,
}

impl Environment {
	/// Probes the running environment.
	///
	/// On the browser target this checks for a `window` with a `document`;
	/// native targets never have a DOM.
	#[cfg(client)]
	pub fn detect() -> Self {
		let can_use_dom = web_sys::window()
			.and_then(|window| window.document())
			.is_some();
		tracing::debug!(can_use_dom, "probed DOM environment");
		Self { can_use_dom }
	}

	/// Probes the running environment.
	///
	/// On the browser target this checks for a `window` with a `document`;
	/// native targets never have a DOM.
	#[cfg(server)]
	pub fn detect() -> Self {
		Self::headless()
	}

	/// An environment with a DOM, e.g. when rendering into
	/// [`MemoryNode`](crate::MemoryNode)s.
	pub const fn with_dom() -> Self {
		Self { can_use_dom: true }
	}

	/// An environment without a DOM.
	pub const fn headless() -> Self {
		Self { can_use_dom: false }
	}

	pub const fn can_use_dom(&self) -> bool {
		self.can_use_dom
	}

	/// Fails with [`DomError::Unavailable`] when there is no DOM.
	pub fn ensure_dom(&self) -> Result<(), DomError> {
		if self.can_use_dom {
			Ok(())
		} else {
			Err(DomError::Unavailable)
		}
	}
}
