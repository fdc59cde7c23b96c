//! Inline style object setter.
//!
//! Applies a [`PropValue::Style`] map onto a node's inline style, one
//! declaration at a time. Property names may be written in camelCase
//! (`backgroundColor`) or as CSS (`background-color`); numbers get a `px`
//! unit unless the property is unitless.

use crate::error::DomError;
use crate::node::DomNode;
use crate::value::PropValue;

/// Properties that take plain numbers, in CSS spelling.
const UNITLESS_PROPERTIES: &[&str] = &[
	"animation-iteration-count",
	"aspect-ratio",
	"border-image-outset",
	"border-image-slice",
	"border-image-width",
	"box-flex",
	"box-flex-group",
	"box-ordinal-group",
	"column-count",
	"columns",
	"fill-opacity",
	"flex",
	"flex-grow",
	"flex-negative",
	"flex-order",
	"flex-positive",
	"flex-shrink",
	"flood-opacity",
	"font-weight",
	"grid-area",
	"grid-column",
	"grid-column-end",
	"grid-column-span",
	"grid-column-start",
	"grid-row",
	"grid-row-end",
	"grid-row-span",
	"grid-row-start",
	"line-clamp",
	"line-height",
	"opacity",
	"order",
	"orphans",
	"stop-opacity",
	"stroke-dasharray",
	"stroke-dashoffset",
	"stroke-miterlimit",
	"stroke-opacity",
	"stroke-width",
	"tab-size",
	"widows",
	"z-index",
	"zoom",
];

const VENDOR_PREFIXES: &[&str] = &["-webkit-", "-moz-", "-ms-", "-o-"];

/// Writes a style object onto `node`'s inline style.
///
/// Null, boolean and empty-string values remove their declaration. Values
/// that are not style objects are written verbatim as the `style`
/// attribute.
pub fn set_value_for_styles<N>(node: &N, value: &PropValue) -> Result<(), DomError>
where
	N: DomNode + ?Sized,
{
	let PropValue::Style(declarations) = value else {
		return node.set_attribute("style", &value.to_js_string());
	};

	for (name, declared) in declarations {
		let property = css_property_name(name);
		match css_value(&property, declared) {
			Some(css) => node.set_style_property(&property, &css)?,
			None => node.remove_style_property(&property)?,
		}
	}
	Ok(())
}

/// `backgroundColor` → `background-color`, `WebkitTransition` →
/// `-webkit-transition`, `msTransition` → `-ms-transition`.
pub(crate) fn css_property_name(name: &str) -> String {
	if name.starts_with("--") {
		return name.to_string();
	}
	let mut property = String::with_capacity(name.len() + 4);
	for c in name.chars() {
		if c.is_ascii_uppercase() {
			property.push('-');
			property.push(c.to_ascii_lowercase());
		} else {
			property.push(c);
		}
	}
	if property.starts_with("ms-") {
		property.insert(0, '-');
	}
	property
}

fn is_unitless(property: &str) -> bool {
	if property.starts_with("--") {
		return true;
	}
	let unprefixed = VENDOR_PREFIXES
		.iter()
		.find_map(|prefix| property.strip_prefix(prefix))
		.unwrap_or(property);
	UNITLESS_PROPERTIES.contains(&unprefixed)
}

fn css_value(property: &str, value: &PropValue) -> Option<String> {
	match value {
		PropValue::Null | PropValue::Bool(_) => None,
		PropValue::Number(n) if *n != 0.0 && !is_unitless(property) => {
			Some(format!("{}px", value.to_js_string()))
		}
		PropValue::Text(text) => {
			let trimmed = text.trim();
			(!trimmed.is_empty()).then(|| trimmed.to_string())
		}
		other => Some(other.to_js_string()),
	}
}
