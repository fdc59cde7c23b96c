//! Browser tests for the `web_sys::Element` node implementation
//!
//! Run with `wasm-pack test --headless --chrome crates/tessera-dom`.

#![cfg(target_arch = "wasm32")]

use tessera_dom::{
	DomError, DomNode, Environment, PropValue, PropertyDescriptor, PropertyReconciler, PropertyTable,
};
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;
use web_sys::{Document, Element, HtmlOptionElement};

wasm_bindgen_test_configure!(run_in_browser);

fn document() -> Document {
	web_sys::window()
		.and_then(|window| window.document())
		.expect("test runs in a browser")
}

fn element(tag: &str) -> Element {
	document().create_element(tag).unwrap()
}

fn select(values: &[&str], multiple: bool) -> Element {
	let select = element("select");
	if multiple {
		select.set_attribute("multiple", "").unwrap();
	}
	for value in values {
		let option = element("option").unchecked_into::<HtmlOptionElement>();
		option.set_value(value);
		select.append_child(&option).unwrap();
	}
	select
}

fn reconciler() -> PropertyReconciler<'static> {
	PropertyReconciler::new(PropertyTable::html(), Environment::detect())
}

#[wasm_bindgen_test]
fn test_environment_detects_browser() {
	assert!(Environment::detect().can_use_dom());
}

#[wasm_bindgen_test]
fn test_attribute_set_and_remove() {
	let node = element("a");

	reconciler().set_property(&node, "href", &PropValue::from("/home")).unwrap();
	assert_eq!(node.get_attribute("href").as_deref(), Some("/home"));

	reconciler().remove_property(&node, "href").unwrap();
	assert!(!node.has_attribute("href"));
}

#[wasm_bindgen_test]
fn test_class_name_maps_to_class_attribute() {
	let node = element("div");

	reconciler().set_property(&node, "className", &PropValue::from("card")).unwrap();

	assert_eq!(node.get_attribute("class").as_deref(), Some("card"));
}

#[wasm_bindgen_test]
fn test_checked_is_written_as_field() {
	let node = element("input");

	reconciler().set_property(&node, "checked", &PropValue::Bool(true)).unwrap();
	assert_eq!(DomNode::field(&node, "checked"), Ok(PropValue::Bool(true)));
	assert!(!node.has_attribute("checked"));

	reconciler().remove_property(&node, "checked").unwrap();
	assert_eq!(DomNode::field(&node, "checked"), Ok(PropValue::Bool(false)));
}

#[wasm_bindgen_test]
fn test_value_field_round_trip() {
	let node = element("input");

	reconciler().set_property(&node, "value", &PropValue::from("hello")).unwrap();
	assert_eq!(DomNode::field(&node, "value"), Ok(PropValue::from("hello")));

	reconciler().remove_property(&node, "value").unwrap();
	assert_eq!(DomNode::field(&node, "value"), Ok(PropValue::from("")));
}

#[wasm_bindgen_test]
fn test_namespaced_attribute() {
	let node = document()
		.create_element_ns(Some("http://www.w3.org/2000/svg"), "use")
		.unwrap();

	reconciler().set_property(&node, "xlinkHref", &PropValue::from("#logo")).unwrap();

	assert_eq!(
		node.get_attribute_ns(Some(tessera_dom::XLINK_NAMESPACE), "href").as_deref(),
		Some("#logo")
	);
}

#[wasm_bindgen_test]
fn test_style_object() {
	let node = element("div");
	let style = PropValue::style([
		("backgroundColor", PropValue::from("red")),
		("width", PropValue::from(10)),
	]);

	reconciler().set_property(&node, "style", &style).unwrap();
	let inline = node.unchecked_ref::<web_sys::HtmlElement>().style();
	assert_eq!(inline.get_property_value("background-color").unwrap(), "red");
	assert_eq!(inline.get_property_value("width").unwrap(), "10px");

	reconciler().remove_property(&node, "style").unwrap();
	assert!(!node.has_attribute("style"));
}

#[wasm_bindgen_test]
fn test_select_value() {
	let node = select(&["a", "b", "c"], false);

	reconciler().set_property(&node, "value", &PropValue::from("c")).unwrap();

	assert_eq!(node.option_values(), vec!["a", "b", "c"]);
	assert_eq!(DomNode::field(&node, "value"), Ok(PropValue::from("c")));
}

#[wasm_bindgen_test]
fn test_multi_select_value() {
	let node = select(&["a", "b", "c"], true);
	let value = PropValue::List(vec!["a".to_string(), "c".to_string()]);

	reconciler().set_property(&node, "value", &value).unwrap();

	let selected: Vec<bool> = node
		.unchecked_ref::<web_sys::HtmlSelectElement>()
		.options()
		.item(1)
		.map(|option| option.unchecked_into::<HtmlOptionElement>().selected())
		.into_iter()
		.collect();
	assert_eq!(selected, vec![false]);
	assert_eq!(DomNode::field(&node, "value"), Ok(PropValue::from("a")));
}

#[wasm_bindgen_test]
fn test_invalid_attribute_name_is_reported() {
	let node = element("div");

	let result = reconciler().set_property(&node, "on click", &PropValue::from("f()"));

	assert!(matches!(result, Err(DomError::Exception(_))), "{result:?}");
}

#[wasm_bindgen_test]
fn test_read_only_field_write_is_reported() {
	// Arrange
	let table = PropertyTable::builder()
		.insert("tagName", PropertyDescriptor::property("tagName"))
		.build()
		.unwrap();
	let reconciler = PropertyReconciler::new(&table, Environment::detect());
	let node = element("div");

	// Act
	let result = reconciler.set_property(&node, "tagName", &PropValue::from("X"));

	// Assert
	assert_eq!(
		result,
		Err(DomError::Exception("cannot assign to field 'tagName'".to_string()))
	);
	assert_eq!(node.tag_name(), "DIV");
}
