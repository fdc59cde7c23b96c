//! Property classification table.
//!
//! Every logical property name the rendering layer uses is classified by a
//! [`PropertyDescriptor`]: whether it is reflected through a node field or a
//! DOM attribute, which attribute (and namespace) backs it, and which values
//! mean "absent". Descriptors are collected into an immutable
//! [`PropertyTable`] that is built once and shared read-only.
//!
//! ## Example
//!
//! ```
//! use tessera_dom::{PropertyDescriptor, PropertyKind, PropertyTable};
//!
//! let table = PropertyTable::builder()
//!     .insert("checked", PropertyDescriptor::property("checked").boolean())
//!     .insert("className", PropertyDescriptor::attribute("className").with_attribute_name("class"))
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(table.get("className").unwrap().attribute_name(), Some("class"));
//! assert_eq!(table.get("checked").unwrap().kind(), PropertyKind::Property);
//! ```

use crate::error::TableError;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// XLink namespace used by `xlink:*` attributes.
pub const XLINK_NAMESPACE: &str = "http://www.w3.org/1999/xlink";

/// XML namespace used by `xml:*` attributes.
pub const XML_NAMESPACE: &str = "http://www.w3.org/XML/1998/namespace";

/// Property name of the inline style object.
const STYLE_PROPERTY: &str = "style";

/// Property name whose writes are redirected on `<select>` elements.
const VALUE_PROPERTY: &str = "value";

/// Mutation strategy of a descriptor, resolved once at table construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PropertyKind {
	/// The inline style object; written through the style setter.
	StyleObject,
	/// The `value` field; routed through the select setter on `<select>` nodes.
	Value,
	/// Any other node field.
	Property,
	/// A DOM attribute, optionally namespaced.
	Attribute,
}

/// Static classification of one logical property name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyDescriptor {
	property_name: Option<String>,
	attribute_name: Option<String>,
	attribute_namespace: Option<String>,
	has_boolean_value: bool,
	has_numeric_value: bool,
	has_positive_numeric_value: bool,
	must_use_property: bool,
	must_use_object: bool,
	kind: PropertyKind,
}

impl PropertyDescriptor {
	/// A descriptor reflected through the node field `property_name`.
	pub fn property(property_name: impl Into<String>) -> Self {
		Self {
			property_name: Some(property_name.into()),
			must_use_property: true,
			..Self::empty()
		}
		.resolved()
	}

	/// A descriptor reflected through a DOM attribute.
	///
	/// The attribute name defaults to the lowercased logical name
	/// (`accessKey` becomes `accesskey`); use
	/// [`with_attribute_name`](Self::with_attribute_name) for anything else.
	pub fn attribute(name: &str) -> Self {
		Self {
			attribute_name: Some(name.to_ascii_lowercase()),
			..Self::empty()
		}
		.resolved()
	}

	fn empty() -> Self {
		Self {
			property_name: None,
			attribute_name: None,
			attribute_namespace: None,
			has_boolean_value: false,
			has_numeric_value: false,
			has_positive_numeric_value: false,
			must_use_property: false,
			must_use_object: false,
			kind: PropertyKind::Attribute,
		}
	}

	/// Overrides the DOM attribute name.
	pub fn with_attribute_name(mut self, attribute_name: impl Into<String>) -> Self {
		self.attribute_name = Some(attribute_name.into());
		self
	}

	/// Writes the attribute in `namespace`.
	pub fn namespace(mut self, namespace: impl Into<String>) -> Self {
		self.attribute_namespace = Some(namespace.into());
		self
	}

	/// Falsy values remove the property.
	pub fn boolean(mut self) -> Self {
		self.has_boolean_value = true;
		self
	}

	/// Values that are not numbers remove the property.
	pub fn numeric(mut self) -> Self {
		self.has_numeric_value = true;
		self
	}

	/// Values below 1 remove the property.
	pub fn positive_numeric(mut self) -> Self {
		self.has_positive_numeric_value = true;
		self
	}

	/// The field holds an object that needs a specialized setter.
	pub fn object(mut self) -> Self {
		self.must_use_object = true;
		self.resolved()
	}

	fn resolved(mut self) -> Self {
		self.kind = if !self.must_use_property {
			PropertyKind::Attribute
		} else {
			match self.property_name.as_deref() {
				Some(STYLE_PROPERTY) if self.must_use_object => PropertyKind::StyleObject,
				Some(VALUE_PROPERTY) => PropertyKind::Value,
				_ => PropertyKind::Property,
			}
		};
		self
	}

	fn validate(&self, name: &str) -> Result<(), TableError> {
		if name.is_empty() {
			return Err(TableError::EmptyName);
		}
		if self.must_use_property {
			if self.property_name.as_deref().is_none_or(str::is_empty) {
				return Err(TableError::MissingPropertyName {
					name: name.to_string(),
				});
			}
		} else if self.attribute_name.as_deref().is_none_or(str::is_empty) {
			return Err(TableError::MissingAttributeName {
				name: name.to_string(),
			});
		}
		Ok(())
	}

	/// Node field name, for field-backed descriptors.
	pub fn property_name(&self) -> Option<&str> {
		self.property_name.as_deref()
	}

	/// DOM attribute name, for attribute-backed descriptors.
	pub fn attribute_name(&self) -> Option<&str> {
		self.attribute_name.as_deref()
	}

	/// Namespace URI the attribute is written in.
	pub fn attribute_namespace(&self) -> Option<&str> {
		self.attribute_namespace.as_deref()
	}

	pub fn has_boolean_value(&self) -> bool {
		self.has_boolean_value
	}

	pub fn has_numeric_value(&self) -> bool {
		self.has_numeric_value
	}

	pub fn has_positive_numeric_value(&self) -> bool {
		self.has_positive_numeric_value
	}

	pub fn must_use_property(&self) -> bool {
		self.must_use_property
	}

	pub fn must_use_object(&self) -> bool {
		self.must_use_object
	}

	/// The mutation strategy for this descriptor.
	pub fn kind(&self) -> PropertyKind {
		self.kind
	}
}

/// Immutable mapping from logical property name to descriptor.
#[derive(Debug, Clone, Default)]
pub struct PropertyTable {
	descriptors: HashMap<String, PropertyDescriptor>,
}

static HTML_PROPERTIES: Lazy<PropertyTable> = Lazy::new(|| {
	PropertyTable::html_builder()
		.build()
		.expect("built-in HTML property descriptors are valid")
});

impl PropertyTable {
	/// Starts an empty table.
	pub fn builder() -> PropertyTableBuilder {
		PropertyTableBuilder::default()
	}

	/// The shared default HTML table.
	pub fn html() -> &'static PropertyTable {
		&HTML_PROPERTIES
	}

	/// The default HTML table extended (or overridden) by `config`.
	pub fn html_with(config: &PropertyConfig) -> Result<PropertyTable, TableError> {
		let mut builder = Self::html_builder();
		for (name, descriptor) in &config.properties {
			builder = builder.replace(name.clone(), descriptor.to_descriptor());
		}
		builder.build()
	}

	/// A table holding only the descriptors in `config`.
	pub fn from_config(config: &PropertyConfig) -> Result<PropertyTable, TableError> {
		config
			.properties
			.iter()
			.fold(Self::builder(), |builder, (name, descriptor)| {
				builder.insert(name.clone(), descriptor.to_descriptor())
			})
			.build()
	}

	/// Looks up the descriptor for a logical name.
	pub fn get(&self, name: &str) -> Option<&PropertyDescriptor> {
		self.descriptors.get(name)
	}

	pub fn contains(&self, name: &str) -> bool {
		self.descriptors.contains_key(name)
	}

	pub fn len(&self) -> usize {
		self.descriptors.len()
	}

	pub fn is_empty(&self) -> bool {
		self.descriptors.is_empty()
	}

	/// Iterates `(logical name, descriptor)` pairs in no particular order.
	pub fn iter(&self) -> impl Iterator<Item = (&str, &PropertyDescriptor)> {
		self.descriptors
			.iter()
			.map(|(name, descriptor)| (name.as_str(), descriptor))
	}

	fn html_builder() -> PropertyTableBuilder {
		let mut builder = Self::builder()
			// Field-backed properties
			.insert("checked", PropertyDescriptor::property("checked").boolean())
			.insert(
				"indeterminate",
				PropertyDescriptor::property("indeterminate").boolean(),
			)
			.insert("multiple", PropertyDescriptor::property("multiple").boolean())
			.insert("muted", PropertyDescriptor::property("muted").boolean())
			.insert("selected", PropertyDescriptor::property("selected").boolean())
			.insert("value", PropertyDescriptor::property("value"))
			.insert("defaultValue", PropertyDescriptor::property("defaultValue"))
			.insert("style", PropertyDescriptor::property("style").object())
			// Numeric attributes
			.insert("rowSpan", PropertyDescriptor::attribute("rowSpan").numeric())
			.insert("start", PropertyDescriptor::attribute("start").numeric())
			// Renamed attributes
			.insert(
				"className",
				PropertyDescriptor::attribute("className").with_attribute_name("class"),
			)
			.insert(
				"htmlFor",
				PropertyDescriptor::attribute("htmlFor").with_attribute_name("for"),
			)
			.insert(
				"acceptCharset",
				PropertyDescriptor::attribute("acceptCharset").with_attribute_name("accept-charset"),
			)
			.insert(
				"httpEquiv",
				PropertyDescriptor::attribute("httpEquiv").with_attribute_name("http-equiv"),
			);

		for name in [
			"allowFullScreen",
			"async",
			"autoFocus",
			"autoPlay",
			"controls",
			"default",
			"defer",
			"disabled",
			"formNoValidate",
			"hidden",
			"itemScope",
			"loop",
			"noValidate",
			"open",
			"readOnly",
			"required",
			"reversed",
			"scoped",
			"seamless",
		] {
			builder = builder.insert(name, PropertyDescriptor::attribute(name).boolean());
		}

		for name in ["cols", "rows", "size", "span"] {
			builder = builder.insert(name, PropertyDescriptor::attribute(name).positive_numeric());
		}

		for name in [
			"accept",
			"accessKey",
			"action",
			"alt",
			"autoComplete",
			"cellPadding",
			"cellSpacing",
			"charSet",
			"colSpan",
			"contentEditable",
			"dateTime",
			"dir",
			"download",
			"draggable",
			"encType",
			"form",
			"height",
			"href",
			"id",
			"label",
			"lang",
			"list",
			"max",
			"maxLength",
			"method",
			"min",
			"minLength",
			"name",
			"pattern",
			"placeholder",
			"rel",
			"role",
			"sizes",
			"src",
			"srcSet",
			"step",
			"tabIndex",
			"target",
			"title",
			"type",
			"width",
			"wrap",
		] {
			builder = builder.insert(name, PropertyDescriptor::attribute(name));
		}

		for (name, attribute) in [
			("xlinkActuate", "xlink:actuate"),
			("xlinkArcrole", "xlink:arcrole"),
			("xlinkHref", "xlink:href"),
			("xlinkRole", "xlink:role"),
			("xlinkShow", "xlink:show"),
			("xlinkTitle", "xlink:title"),
			("xlinkType", "xlink:type"),
		] {
			builder = builder.insert(
				name,
				PropertyDescriptor::attribute(name)
					.with_attribute_name(attribute)
					.namespace(XLINK_NAMESPACE),
			);
		}

		for (name, attribute) in [
			("xmlBase", "xml:base"),
			("xmlLang", "xml:lang"),
			("xmlSpace", "xml:space"),
		] {
			builder = builder.insert(
				name,
				PropertyDescriptor::attribute(name)
					.with_attribute_name(attribute)
					.namespace(XML_NAMESPACE),
			);
		}

		builder
	}
}

/// Collects descriptors and validates them into a [`PropertyTable`].
#[derive(Debug, Default)]
pub struct PropertyTableBuilder {
	descriptors: HashMap<String, PropertyDescriptor>,
	duplicates: Vec<String>,
}

impl PropertyTableBuilder {
	/// Registers `name`. Registering a name twice fails at [`build`](Self::build).
	pub fn insert(mut self, name: impl Into<String>, descriptor: PropertyDescriptor) -> Self {
		let name = name.into();
		if self.descriptors.contains_key(&name) {
			self.duplicates.push(name);
		} else {
			self.descriptors.insert(name, descriptor);
		}
		self
	}

	/// Registers `name`, replacing any earlier descriptor.
	pub fn replace(mut self, name: impl Into<String>, descriptor: PropertyDescriptor) -> Self {
		self.descriptors.insert(name.into(), descriptor);
		self
	}

	/// Validates every descriptor and freezes the table.
	pub fn build(self) -> Result<PropertyTable, TableError> {
		if let Some(name) = self.duplicates.into_iter().next() {
			return Err(TableError::Duplicate { name });
		}
		for (name, descriptor) in &self.descriptors {
			descriptor.validate(name)?;
		}
		tracing::debug!(count = self.descriptors.len(), "property table built");
		Ok(PropertyTable {
			descriptors: self.descriptors,
		})
	}
}

/// Serializable property table extension.
///
/// ```
/// use tessera_dom::{PropertyConfig, PropertyTable};
///
/// let config = PropertyConfig::from_json(
///     r#"{ "properties": { "ariaLabel": { "attributeName": "aria-label" } } }"#,
/// )
/// .unwrap();
/// let table = PropertyTable::html_with(&config).unwrap();
///
/// assert_eq!(table.get("ariaLabel").unwrap().attribute_name(), Some("aria-label"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PropertyConfig {
	/// Descriptors keyed by logical property name.
	pub properties: BTreeMap<String, DescriptorConfig>,
}

impl PropertyConfig {
	/// Parses a JSON configuration document.
	pub fn from_json(json: &str) -> Result<Self, TableError> {
		Ok(serde_json::from_str(json)?)
	}
}

/// One descriptor as written in a [`PropertyConfig`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct DescriptorConfig {
	pub property_name: Option<String>,
	pub attribute_name: Option<String>,
	pub attribute_namespace: Option<String>,
	pub has_boolean_value: bool,
	pub has_numeric_value: bool,
	pub has_positive_numeric_value: bool,
	pub must_use_property: bool,
	pub must_use_object: bool,
}

impl DescriptorConfig {
	fn to_descriptor(&self) -> PropertyDescriptor {
		PropertyDescriptor {
			property_name: self.property_name.clone(),
			attribute_name: self.attribute_name.clone(),
			attribute_namespace: self.attribute_namespace.clone(),
			has_boolean_value: self.has_boolean_value,
			has_numeric_value: self.has_numeric_value,
			has_positive_numeric_value: self.has_positive_numeric_value,
			must_use_property: self.must_use_property,
			must_use_object: self.must_use_object,
			..PropertyDescriptor::empty()
		}
		.resolved()
	}
}
