//! # Tessera
//!
//! Building blocks for the Tessera rendering framework.
//!
//! ## Feature Flags
//!
//! - `dom` - DOM property/attribute reconciliation ([`dom`])
//! - `full` (default) - everything above
//!
//! ## Example
//!
//! ```
//! # #[cfg(feature = "dom")]
//! # {
//! use tessera::dom::{Environment, MemoryNode, PropValue, PropertyReconciler, PropertyTable};
//!
//! let reconciler = PropertyReconciler::new(PropertyTable::html(), Environment::with_dom());
//! let link = MemoryNode::new("a");
//! reconciler.set_property(&link, "href", &PropValue::from("/home")).unwrap();
//!
//! assert_eq!(link.attribute("href").as_deref(), Some("/home"));
//! # }
//! ```

/// DOM property reconciliation.
#[cfg(feature = "dom")]
pub mod dom {
	pub use tessera_dom::*;
}

#[cfg(feature = "dom")]
pub use tessera_dom::{PropValue, PropertyReconciler, PropertyTable};
