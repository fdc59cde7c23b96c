//! Tessera DOM - property and attribute reconciliation
//!
//! Turns a logical `(name, value)` pair from the rendering layer into the
//! right imperative DOM mutation: a node field write, a (namespaced)
//! attribute write or removal, or a call into the `<select>` and inline
//! style setters.
//!
//! ## Architecture
//!
//! - [`value`]: [`PropValue`], the dynamic value type and its JavaScript coercions
//! - [`properties`]: [`PropertyTable`] classifying every logical name
//! - [`reconciler`]: [`PropertyReconciler`] with `set_property`/`remove_property`
//! - [`node`]: [`DomNode`], the DOM primitives the reconciler consumes
//! - [`memory`]: [`MemoryNode`], an in-memory [`DomNode`]
//! - `web`: [`DomNode`] for `web_sys::Element` (wasm32 only)
//! - [`environment`]: the DOM capability probe
//! - [`select`] / [`style`]: the specialized setters
//!
//! The reconciler decides *how* to write one property, never *when*: there
//! is no batching, diffing or scheduling here.
//!
//! ## Example
//!
//! ```
//! use tessera_dom::{Environment, MemoryNode, PropValue, PropertyReconciler, PropertyTable};
//!
//! let reconciler = PropertyReconciler::new(PropertyTable::html(), Environment::with_dom());
//! let input = MemoryNode::new("input");
//!
//! reconciler.set_property(&input, "checked", &PropValue::Bool(true)).unwrap();
//! reconciler.set_property(&input, "style", &PropValue::style([("color", "red")])).unwrap();
//!
//! assert_eq!(input.style_property("color").as_deref(), Some("red"));
//! ```
//!
//! ## Logging
//!
//! Dispatch decisions are emitted as [`tracing`] events at `trace` level;
//! install a subscriber (e.g. `tracing-wasm` in the browser) to see them.

pub mod environment;
pub mod error;
pub mod memory;
pub mod node;
pub mod properties;
pub mod reconciler;
pub mod select;
pub mod style;
pub mod value;

#[cfg(client)]
pub mod web;

pub use environment::Environment;
pub use error::{DomError, TableError};
pub use memory::{Attribute, MemoryNode, Mutation, NodeSnapshot};
pub use node::DomNode;
pub use properties::{
	DescriptorConfig, PropertyConfig, PropertyDescriptor, PropertyKind, PropertyTable,
	PropertyTableBuilder, XLINK_NAMESPACE, XML_NAMESPACE,
};
pub use reconciler::PropertyReconciler;
pub use value::{PropValue, StyleMap};
