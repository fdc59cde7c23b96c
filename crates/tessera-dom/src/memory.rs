//! In-memory DOM element.
//!
//! [`MemoryNode`] implements [`DomNode`] without a browser. It keeps just
//! enough DOM behavior to make reconciliation observable on native targets:
//!
//! - attributes, namespace aware, with DOM name validation
//! - JavaScript fields with IDL-like defaults (`false` for boolean fields,
//!   `""` otherwise)
//! - an inline style declaration block kept in sync with the `style`
//!   attribute
//! - `<option>` children for `<select>` elements
//! - a log of every write issued against the node
//!
//! ## Example
//!
//! ```
//! use tessera_dom::{DomNode, MemoryNode};
//!
//! let node = MemoryNode::new("div");
//! node.set_attribute("style", "color: red").unwrap();
//!
//! assert_eq!(node.style_property("color").as_deref(), Some("red"));
//! assert_eq!(node.mutations().len(), 1);
//! ```

use crate::error::DomError;
use crate::node::DomNode;
use crate::properties::XML_NAMESPACE;
use crate::value::PropValue;
use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap};

const XMLNS_NAMESPACE: &str = "http://www.w3.org/2000/xmlns/";

const STYLE_ATTRIBUTE: &str = "style";

/// Fields whose IDL type is `boolean`.
const BOOLEAN_FIELDS: &[&str] = &[
	"checked",
	"defaultChecked",
	"disabled",
	"hidden",
	"indeterminate",
	"multiple",
	"muted",
	"readOnly",
	"required",
	"selected",
];

/// A DOM attribute.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Attribute {
	/// Namespace URI, `None` for plain attributes.
	pub namespace: Option<String>,
	/// Qualified name (`xlink:href`, `id`).
	pub name: String,
	pub value: String,
}

impl Attribute {
	fn local_name(&self) -> &str {
		self.name
			.split_once(':')
			.map_or(self.name.as_str(), |(_, local)| local)
	}
}

/// One write issued against a [`MemoryNode`].
#[derive(Debug, Clone, PartialEq)]
pub enum Mutation {
	SetField {
		name: String,
		value: PropValue,
	},
	SetAttribute {
		namespace: Option<String>,
		name: String,
		value: String,
	},
	RemoveAttribute {
		name: String,
	},
	SetStyle {
		name: String,
		value: String,
	},
	RemoveStyle {
		name: String,
	},
	SelectOption {
		index: usize,
		selected: bool,
	},
}

/// Observable state of a [`MemoryNode`], ignoring the mutation log.
///
/// Fields still holding their default value are omitted, so a node whose
/// field was written and then cleared compares equal to a fresh one.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeSnapshot {
	/// Attributes sorted by namespace and name. Includes `style`.
	pub attributes: Vec<Attribute>,
	pub fields: BTreeMap<String, PropValue>,
	pub selected_options: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct OptionElement {
	value: String,
	selected: bool,
}

#[derive(Debug, Default)]
struct NodeState {
	attributes: Vec<Attribute>,
	fields: HashMap<String, PropValue>,
	style: Vec<(String, String)>,
	options: Vec<OptionElement>,
	mutations: Vec<Mutation>,
}

impl NodeState {
	fn style_text(&self) -> Option<String> {
		if self.style.is_empty() {
			return None;
		}
		Some(
			self.style
				.iter()
				.map(|(name, value)| format!("{name}: {value};"))
				.collect::<Vec<_>>()
				.join(" "),
		)
	}
}

/// An element held entirely in memory.
#[derive(Debug)]
pub struct MemoryNode {
	tag_name: String,
	state: RefCell<NodeState>,
}

impl MemoryNode {
	/// Creates an element. The tag name is stored uppercased, as HTML
	/// documents report it.
	pub fn new(tag_name: &str) -> Self {
		Self {
			tag_name: tag_name.to_ascii_uppercase(),
			state: RefCell::new(NodeState::default()),
		}
	}

	/// Creates an element outside the HTML namespace (SVG, XHTML). The tag
	/// name keeps its case.
	pub fn foreign(tag_name: &str) -> Self {
		Self {
			tag_name: tag_name.to_string(),
			state: RefCell::new(NodeState::default()),
		}
	}

	/// Creates a single-choice `<select>` with one option per value.
	pub fn select<I, S>(values: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		let node = Self::new("select");
		node.state.borrow_mut().options = values
			.into_iter()
			.map(|value| OptionElement {
				value: value.into(),
				selected: false,
			})
			.collect();
		node
	}

	/// Creates a `<select multiple>` with one option per value.
	pub fn select_multiple<I, S>(values: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		let node = Self::select(values);
		node.state
			.borrow_mut()
			.fields
			.insert("multiple".to_string(), PropValue::Bool(true));
		node
	}

	/// `Element.getAttribute`.
	pub fn attribute(&self, name: &str) -> Option<String> {
		let state = self.state.borrow();
		if name == STYLE_ATTRIBUTE {
			return state.style_text();
		}
		state
			.attributes
			.iter()
			.find(|attr| attr.name == name)
			.map(|attr| attr.value.clone())
	}

	/// `Element.getAttributeNS`.
	pub fn attribute_ns(&self, namespace: &str, local_name: &str) -> Option<String> {
		self.state
			.borrow()
			.attributes
			.iter()
			.find(|attr| attr.namespace.as_deref() == Some(namespace) && attr.local_name() == local_name)
			.map(|attr| attr.value.clone())
	}

	pub fn has_attribute(&self, name: &str) -> bool {
		self.attribute(name).is_some()
	}

	/// Value of one inline style declaration.
	pub fn style_property(&self, name: &str) -> Option<String> {
		self.state
			.borrow()
			.style
			.iter()
			.find(|(declared, _)| declared == name)
			.map(|(_, value)| value.clone())
	}

	/// Values of the currently selected options.
	pub fn selected_values(&self) -> Vec<String> {
		self.state
			.borrow()
			.options
			.iter()
			.filter(|option| option.selected)
			.map(|option| option.value.clone())
			.collect()
	}

	/// Every write issued against this node, oldest first.
	pub fn mutations(&self) -> Vec<Mutation> {
		self.state.borrow().mutations.clone()
	}

	/// Drains the mutation log.
	pub fn take_mutations(&self) -> Vec<Mutation> {
		std::mem::take(&mut self.state.borrow_mut().mutations)
	}

	/// Captures the observable state of the node.
	pub fn snapshot(&self) -> NodeSnapshot {
		let state = self.state.borrow();
		let mut attributes = state.attributes.clone();
		if let Some(style) = state.style_text() {
			attributes.push(Attribute {
				namespace: None,
				name: STYLE_ATTRIBUTE.to_string(),
				value: style,
			});
		}
		attributes.sort();

		let fields = state
			.fields
			.iter()
			.filter(|(name, value)| **value != field_default(name))
			.map(|(name, value)| (name.clone(), value.clone()))
			.collect();

		NodeSnapshot {
			attributes,
			fields,
			selected_options: state
				.options
				.iter()
				.filter(|option| option.selected)
				.map(|option| option.value.clone())
				.collect(),
		}
	}

	fn record(&self, mutation: Mutation) {
		self.state.borrow_mut().mutations.push(mutation);
	}
}

fn field_default(name: &str) -> PropValue {
	if BOOLEAN_FIELDS.contains(&name) {
		PropValue::Bool(false)
	} else {
		PropValue::Text(String::new())
	}
}

fn is_name_start_char(c: char) -> bool {
	c.is_alphabetic() || c == '_' || c == ':'
}

fn is_name_char(c: char) -> bool {
	is_name_start_char(c) || c.is_alphanumeric() || c == '-' || c == '.'
}

/// Checks `name` against the XML `Name` production.
fn validate_name(name: &str) -> Result<(), DomError> {
	let mut chars = name.chars();
	let valid = chars
		.next()
		.is_some_and(|first| is_name_start_char(first) && chars.all(is_name_char));
	if valid {
		Ok(())
	} else {
		Err(DomError::InvalidCharacter {
			name: name.to_string(),
		})
	}
}

/// Validates a qualified name against its namespace the way
/// `setAttributeNS` does.
fn validate_qualified_name(namespace: Option<&str>, name: &str) -> Result<(), DomError> {
	validate_name(name)?;
	let prefix = match name.split_once(':') {
		Some((prefix, local)) => {
			if prefix.is_empty() || local.is_empty() || local.contains(':') {
				return Err(DomError::InvalidCharacter {
					name: name.to_string(),
				});
			}
			Some(prefix)
		}
		None => None,
	};

	let namespace_error = || DomError::Namespace {
		namespace: namespace.unwrap_or_default().to_string(),
		name: name.to_string(),
	};
	if prefix.is_some() && namespace.is_none() {
		return Err(namespace_error());
	}
	if prefix == Some("xml") && namespace != Some(XML_NAMESPACE) {
		return Err(namespace_error());
	}
	let is_xmlns = name == "xmlns" || prefix == Some("xmlns");
	if is_xmlns != (namespace == Some(XMLNS_NAMESPACE)) {
		return Err(namespace_error());
	}
	Ok(())
}

fn parse_style(text: &str) -> Vec<(String, String)> {
	text.split(';')
		.filter_map(|declaration| declaration.split_once(':'))
		.map(|(name, value)| (name.trim().to_string(), value.trim().to_string()))
		.filter(|(name, value)| !name.is_empty() && !value.is_empty())
		.collect()
}

impl DomNode for MemoryNode {
	fn tag_name(&self) -> String {
		self.tag_name.clone()
	}

	fn field(&self, name: &str) -> Result<PropValue, DomError> {
		let state = self.state.borrow();
		if let Some(value) = state.fields.get(name) {
			return Ok(value.clone());
		}
		if name == "value" && self.is_select() {
			let selected = state
				.options
				.iter()
				.find(|option| option.selected)
				.map(|option| option.value.clone())
				.unwrap_or_default();
			return Ok(PropValue::Text(selected));
		}
		Ok(field_default(name))
	}

	fn set_field(&self, name: &str, value: &PropValue) -> Result<(), DomError> {
		self.state
			.borrow_mut()
			.fields
			.insert(name.to_string(), value.clone());
		self.record(Mutation::SetField {
			name: name.to_string(),
			value: value.clone(),
		});
		Ok(())
	}

	fn set_attribute(&self, name: &str, value: &str) -> Result<(), DomError> {
		validate_name(name)?;
		{
			let mut state = self.state.borrow_mut();
			if name == STYLE_ATTRIBUTE {
				state.style = parse_style(value);
			} else if let Some(attr) = state.attributes.iter_mut().find(|attr| attr.name == name) {
				attr.value = value.to_string();
			} else {
				state.attributes.push(Attribute {
					namespace: None,
					name: name.to_string(),
					value: value.to_string(),
				});
			}
		}
		self.record(Mutation::SetAttribute {
			namespace: None,
			name: name.to_string(),
			value: value.to_string(),
		});
		Ok(())
	}

	fn set_attribute_ns(&self, namespace: &str, name: &str, value: &str) -> Result<(), DomError> {
		let namespace = (!namespace.is_empty()).then_some(namespace);
		validate_qualified_name(namespace, name)?;
		let local_name = name.split_once(':').map_or(name, |(_, local)| local);
		{
			let mut state = self.state.borrow_mut();
			let existing = state.attributes.iter_mut().find(|attr| {
				attr.namespace.as_deref() == namespace && attr.local_name() == local_name
			});
			match existing {
				Some(attr) => attr.value = value.to_string(),
				None => state.attributes.push(Attribute {
					namespace: namespace.map(str::to_string),
					name: name.to_string(),
					value: value.to_string(),
				}),
			}
		}
		self.record(Mutation::SetAttribute {
			namespace: namespace.map(str::to_string),
			name: name.to_string(),
			value: value.to_string(),
		});
		Ok(())
	}

	fn remove_attribute(&self, name: &str) -> Result<(), DomError> {
		{
			let mut state = self.state.borrow_mut();
			if name == STYLE_ATTRIBUTE {
				state.style.clear();
			} else if let Some(index) = state.attributes.iter().position(|attr| attr.name == name) {
				state.attributes.remove(index);
			}
		}
		self.record(Mutation::RemoveAttribute {
			name: name.to_string(),
		});
		Ok(())
	}

	fn set_style_property(&self, name: &str, value: &str) -> Result<(), DomError> {
		if value.is_empty() {
			return self.remove_style_property(name);
		}
		{
			let mut state = self.state.borrow_mut();
			match state.style.iter_mut().find(|(declared, _)| declared == name) {
				Some((_, declared_value)) => *declared_value = value.to_string(),
				None => state.style.push((name.to_string(), value.to_string())),
			}
		}
		self.record(Mutation::SetStyle {
			name: name.to_string(),
			value: value.to_string(),
		});
		Ok(())
	}

	fn remove_style_property(&self, name: &str) -> Result<(), DomError> {
		self.state
			.borrow_mut()
			.style
			.retain(|(declared, _)| declared != name);
		self.record(Mutation::RemoveStyle {
			name: name.to_string(),
		});
		Ok(())
	}

	fn option_values(&self) -> Vec<String> {
		self.state
			.borrow()
			.options
			.iter()
			.map(|option| option.value.clone())
			.collect()
	}

	fn set_option_selected(&self, index: usize, selected: bool) -> Result<(), DomError> {
		{
			let mut state = self.state.borrow_mut();
			let option = state.options.get_mut(index).ok_or_else(|| {
				DomError::Exception(format!("IndexSizeError: no option at index {index}"))
			})?;
			option.selected = selected;
		}
		self.record(Mutation::SelectOption { index, selected });
		Ok(())
	}
}
