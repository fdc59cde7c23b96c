//! Property reconciler.
//!
//! Translates a logical `(name, value)` pair into one DOM mutation: a node
//! field write, an attribute write or removal, or a call into the select and
//! style setters. The reconciler keeps no state between calls; it only
//! reads its [`PropertyTable`].
//!
//! ## Example
//!
//! ```
//! use tessera_dom::{Environment, MemoryNode, PropValue, PropertyReconciler, PropertyTable};
//!
//! let reconciler = PropertyReconciler::new(PropertyTable::html(), Environment::with_dom());
//! let node = MemoryNode::new("label");
//!
//! reconciler.set_property(&node, "htmlFor", &PropValue::from("email")).unwrap();
//! assert_eq!(node.attribute("for").as_deref(), Some("email"));
//!
//! reconciler.remove_property(&node, "htmlFor").unwrap();
//! assert_eq!(node.attribute("for"), None);
//! ```

use crate::environment::Environment;
use crate::error::DomError;
use crate::node::DomNode;
use crate::properties::{PropertyDescriptor, PropertyKind, PropertyTable};
use crate::select::{remove_select_value, set_select_value};
use crate::style::set_value_for_styles;
use crate::value::PropValue;

/// Applies logical properties to DOM nodes.
#[derive(Debug, Clone, Copy)]
pub struct PropertyReconciler<'t> {
	table: &'t PropertyTable,
	environment: Environment,
}

impl<'t> PropertyReconciler<'t> {
	pub fn new(table: &'t PropertyTable, environment: Environment) -> Self {
		Self { table, environment }
	}

	pub fn table(&self) -> &'t PropertyTable {
		self.table
	}

	pub fn environment(&self) -> Environment {
		self.environment
	}

	/// Sets `name` to `value` on `node`.
	///
	/// Values that mean "absent" for the property (null, a falsy value for
	/// a boolean property, a non-number for a numeric one, less than 1 for a
	/// positive numeric one) remove it instead. Unknown names longer than
	/// one UTF-16 code unit are written as literal attributes; shorter
	/// unknown names are ignored.
	pub fn set_property<N>(&self, node: &N, name: &str, value: &PropValue) -> Result<(), DomError>
	where
		N: DomNode + ?Sized,
	{
		self.environment.ensure_dom()?;

		let Some(descriptor) = self.table.get(name) else {
			// Length in UTF-16 code units, as the DOM measures names
			if name.encode_utf16().nth(1).is_none() {
				tracing::debug!(name, "ignoring single-character custom attribute");
				return Ok(());
			}
			tracing::trace!(name, strategy = "custom-attribute", "set property");
			return node.set_attribute(name, &value.to_js_string());
		};

		if is_absent(descriptor, value) {
			return self.remove_known(node, name, descriptor);
		}

		match descriptor.kind() {
			PropertyKind::StyleObject => {
				tracing::trace!(name, strategy = "style", "set property");
				set_value_for_styles(node, value)
			}
			PropertyKind::Value if node.is_select() => {
				tracing::trace!(name, strategy = "select", "set property");
				set_select_value(node, value)
			}
			PropertyKind::Value | PropertyKind::Property => {
				let field = field_name(descriptor)?;
				if node.field(field)?.to_js_string() == value.to_js_string() {
					tracing::trace!(name, strategy = "field", "field already up to date");
					return Ok(());
				}
				tracing::trace!(name, strategy = "field", "set property");
				node.set_field(field, value)
			}
			PropertyKind::Attribute => {
				let attribute = attribute_name(descriptor)?;
				let text = value.to_js_string();
				let namespace = descriptor
					.attribute_namespace()
					.filter(|namespace| !namespace.is_empty());
				match namespace {
					Some(namespace) => {
						tracing::trace!(name, namespace, strategy = "attribute-ns", "set property");
						node.set_attribute_ns(namespace, attribute, &text)
					}
					None => {
						tracing::trace!(name, strategy = "attribute", "set property");
						node.set_attribute(attribute, &text)
					}
				}
			}
		}
	}

	/// Clears `name` on `node`.
	///
	/// Unknown names are removed as literal attributes, whatever their
	/// length.
	pub fn remove_property<N>(&self, node: &N, name: &str) -> Result<(), DomError>
	where
		N: DomNode + ?Sized,
	{
		self.environment.ensure_dom()?;

		match self.table.get(name) {
			Some(descriptor) => self.remove_known(node, name, descriptor),
			None => {
				tracing::trace!(name, strategy = "custom-attribute", "remove property");
				node.remove_attribute(name)
			}
		}
	}

	fn remove_known<N>(&self, node: &N, name: &str, descriptor: &PropertyDescriptor) -> Result<(), DomError>
	where
		N: DomNode + ?Sized,
	{
		if !descriptor.must_use_property() {
			tracing::trace!(name, strategy = "attribute", "remove property");
			return node.remove_attribute(attribute_name(descriptor)?);
		}

		let field = field_name(descriptor)?;
		if descriptor.has_boolean_value() {
			tracing::trace!(name, strategy = "field", "remove property");
			node.set_field(field, &PropValue::Bool(false))
		} else if descriptor.must_use_object() {
			// Object fields such as `style` are cleared through their attribute
			tracing::trace!(name, strategy = "object-attribute", "remove property");
			node.remove_attribute(field)
		} else if descriptor.kind() == PropertyKind::Value && node.is_select() {
			tracing::trace!(name, strategy = "select", "remove property");
			remove_select_value(node)
		} else if node.field(field)?.to_js_string().is_empty() {
			tracing::trace!(name, strategy = "field", "field already empty");
			Ok(())
		} else {
			tracing::trace!(name, strategy = "field", "remove property");
			node.set_field(field, &PropValue::Text(String::new()))
		}
	}
}

fn is_absent(descriptor: &PropertyDescriptor, value: &PropValue) -> bool {
	value.is_null()
		|| (descriptor.has_boolean_value() && !value.is_truthy())
		|| (descriptor.has_numeric_value() && value.to_number().is_nan())
		|| (descriptor.has_positive_numeric_value() && value.to_number() < 1.0)
}

// Validated tables always carry the name a descriptor's kind needs.
fn field_name(descriptor: &PropertyDescriptor) -> Result<&str, DomError> {
	descriptor
		.property_name()
		.ok_or_else(|| DomError::Exception("descriptor has no property name".to_string()))
}

fn attribute_name(descriptor: &PropertyDescriptor) -> Result<&str, DomError> {
	descriptor
		.attribute_name()
		.ok_or_else(|| DomError::Exception("descriptor has no attribute name".to_string()))
}
