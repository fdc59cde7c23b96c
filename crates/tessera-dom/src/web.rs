//! Browser [`DomNode`] implementation over `web_sys::Element`.
//!
//! Fields are read and written with `Reflect`, so any JavaScript-visible
//! property works, not only the ones web-sys binds.

use crate::error::DomError;
use crate::node::DomNode;
use crate::value::PropValue;
use js_sys::{Array, Object, Reflect};
use std::collections::BTreeMap;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CssStyleDeclaration, Element, HtmlElement, HtmlOptionElement, HtmlSelectElement};

impl DomNode for Element {
	fn tag_name(&self) -> String {
		Element::tag_name(self)
	}

	fn field(&self, name: &str) -> Result<PropValue, DomError> {
		let value = Reflect::get(self, &JsValue::from_str(name)).map_err(dom_exception)?;
		Ok(from_js(&value))
	}

	fn set_field(&self, name: &str, value: &PropValue) -> Result<(), DomError> {
		// Strict-mode assignment throws on read-only fields; Reflect reports `false`
		let assigned =
			Reflect::set(self, &JsValue::from_str(name), &to_js(value)?).map_err(dom_exception)?;
		if assigned {
			Ok(())
		} else {
			Err(DomError::Exception(format!("cannot assign to field '{name}'")))
		}
	}

	fn set_attribute(&self, name: &str, value: &str) -> Result<(), DomError> {
		Element::set_attribute(self, name, value).map_err(dom_exception)
	}

	fn set_attribute_ns(&self, namespace: &str, name: &str, value: &str) -> Result<(), DomError> {
		let namespace = (!namespace.is_empty()).then_some(namespace);
		Element::set_attribute_ns(self, namespace, name, value).map_err(dom_exception)
	}

	fn remove_attribute(&self, name: &str) -> Result<(), DomError> {
		Element::remove_attribute(self, name).map_err(dom_exception)
	}

	fn set_style_property(&self, name: &str, value: &str) -> Result<(), DomError> {
		inline_style(self)?
			.set_property(name, value)
			.map_err(dom_exception)
	}

	fn remove_style_property(&self, name: &str) -> Result<(), DomError> {
		inline_style(self)?
			.remove_property(name)
			.map(|_| ())
			.map_err(dom_exception)
	}

	fn option_values(&self) -> Vec<String> {
		options(self).iter().map(HtmlOptionElement::value).collect()
	}

	fn set_option_selected(&self, index: usize, selected: bool) -> Result<(), DomError> {
		let option = options(self).into_iter().nth(index).ok_or_else(|| {
			DomError::Exception(format!("IndexSizeError: no option at index {index}"))
		})?;
		option.set_selected(selected);
		Ok(())
	}
}

fn inline_style(element: &Element) -> Result<CssStyleDeclaration, DomError> {
	element
		.dyn_ref::<HtmlElement>()
		.map(HtmlElement::style)
		.ok_or_else(|| DomError::Exception(format!("<{}> has no inline style", element.tag_name())))
}

fn options(element: &Element) -> Vec<HtmlOptionElement> {
	let Some(select) = element.dyn_ref::<HtmlSelectElement>() else {
		return Vec::new();
	};
	let options = select.options();
	(0..options.length())
		.filter_map(|index| options.item(index))
		.filter_map(|option| option.dyn_into::<HtmlOptionElement>().ok())
		.collect()
}

fn dom_exception(error: JsValue) -> DomError {
	let message = error
		.dyn_ref::<js_sys::Error>()
		.map(|error| String::from(error.message()))
		.or_else(|| error.as_string())
		.unwrap_or_else(|| format!("{error:?}"));
	DomError::Exception(message)
}

fn from_js(value: &JsValue) -> PropValue {
	if value.is_null() || value.is_undefined() {
		PropValue::Null
	} else if let Some(b) = value.as_bool() {
		PropValue::Bool(b)
	} else if let Some(n) = value.as_f64() {
		PropValue::Number(n)
	} else if let Some(s) = value.as_string() {
		PropValue::Text(s)
	} else if Array::is_array(value) {
		PropValue::List(
			Array::from(value)
				.iter()
				.map(|item| from_js(&item).to_js_string())
				.collect(),
		)
	} else {
		// Host objects (CSSStyleDeclaration, DOMStringMap, ...) compare by
		// their `toString()` form
		PropValue::Text(String::from(value.unchecked_ref::<Object>().to_string()))
	}
}

fn to_js(value: &PropValue) -> Result<JsValue, DomError> {
	Ok(match value {
		PropValue::Null => JsValue::NULL,
		PropValue::Bool(b) => JsValue::from_bool(*b),
		PropValue::Number(n) => JsValue::from_f64(*n),
		PropValue::Text(s) => JsValue::from_str(s),
		PropValue::List(items) => items
			.iter()
			.map(|item| JsValue::from_str(item))
			.collect::<Array>()
			.into(),
		PropValue::Style(declarations) => style_object(declarations)?.into(),
	})
}

fn style_object(declarations: &BTreeMap<String, PropValue>) -> Result<Object, DomError> {
	let object = Object::new();
	for (name, value) in declarations {
		Reflect::set(&object, &JsValue::from_str(name), &to_js(value)?).map_err(dom_exception)?;
	}
	Ok(object)
}
