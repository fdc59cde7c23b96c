//! DOM node abstraction.
//!
//! [`DomNode`] is the narrow set of DOM primitives the reconciler and its
//! collaborators need. The browser implementation lives in [`crate::web`]
//! (wasm32 only); [`MemoryNode`](crate::MemoryNode) implements it in memory
//! for native targets.
//!
//! All methods take `&self`: DOM handles are shared references into a
//! document owned by the browser, and mutation goes through them.

use crate::error::DomError;
use crate::value::PropValue;

/// The DOM primitives consumed by the reconciler.
pub trait DomNode {
	/// The element's tag name (`"SELECT"`, `"INPUT"`, ...).
	fn tag_name(&self) -> String;

	/// Reads the JavaScript-visible field `name`.
	fn field(&self, name: &str) -> Result<PropValue, DomError>;

	/// Writes the JavaScript-visible field `name`.
	fn set_field(&self, name: &str, value: &PropValue) -> Result<(), DomError>;

	/// `Element.setAttribute`.
	fn set_attribute(&self, name: &str, value: &str) -> Result<(), DomError>;

	/// `Element.setAttributeNS`.
	fn set_attribute_ns(&self, namespace: &str, name: &str, value: &str) -> Result<(), DomError>;

	/// `Element.removeAttribute`.
	fn remove_attribute(&self, name: &str) -> Result<(), DomError>;

	/// `CSSStyleDeclaration.setProperty` on the inline style.
	fn set_style_property(&self, name: &str, value: &str) -> Result<(), DomError>;

	/// `CSSStyleDeclaration.removeProperty` on the inline style.
	fn remove_style_property(&self, name: &str) -> Result<(), DomError>;

	/// Values of the element's `<option>` children, in document order.
	///
	/// Empty for elements without options.
	fn option_values(&self) -> Vec<String>;

	/// Sets `selected` on the option at `index`.
	fn set_option_selected(&self, index: usize, selected: bool) -> Result<(), DomError>;

	/// Whether this element is an HTML `<select>`.
	///
	/// Compares the tag name exactly: HTML elements report `SELECT`, while
	/// a `select` element outside the HTML namespace keeps its lowercase
	/// name and is treated as an ordinary element.
	fn is_select(&self) -> bool {
		self.tag_name() == "SELECT"
	}
}
