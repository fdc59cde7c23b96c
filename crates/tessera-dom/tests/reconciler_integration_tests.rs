//! Integration tests for the property reconciler
//!
//! These tests verify observable DOM state after reconciliation against
//! in-memory nodes:
//! 1. "Absent" values behave exactly like removal
//! 2. Field writes are skipped when nothing changes
//! 3. Set followed by remove restores a fresh node, for every HTML property
//! 4. Custom attributes, `<select>` values and style objects
//! 5. DOM failures propagate to the caller

use rstest::{fixture, rstest};
use std::sync::{Arc, Mutex};
use tessera_dom::{
	DomError, DomNode, Environment, MemoryNode, Mutation, PropValue, PropertyConfig,
	PropertyDescriptor, PropertyKind, PropertyReconciler, PropertyTable, XLINK_NAMESPACE,
};

#[fixture]
fn reconciler() -> PropertyReconciler<'static> {
	PropertyReconciler::new(PropertyTable::html(), Environment::with_dom())
}

/// A value that is written (not removed) for `descriptor`.
fn present_value(descriptor: &PropertyDescriptor) -> PropValue {
	match descriptor.kind() {
		PropertyKind::StyleObject => PropValue::style([("color", "red")]),
		_ if descriptor.has_boolean_value() => PropValue::Bool(true),
		_ if descriptor.has_numeric_value() || descriptor.has_positive_numeric_value() => {
			PropValue::Number(2.0)
		}
		_ => PropValue::from("v"),
	}
}

/// Names of every boolean-valued property in the default table.
fn boolean_properties() -> Vec<&'static str> {
	PropertyTable::html()
		.iter()
		.filter(|(_, descriptor)| descriptor.has_boolean_value())
		.map(|(name, _)| name)
		.collect()
}

#[rstest]
#[case(PropValue::Bool(false))]
#[case(PropValue::Null)]
fn test_absent_boolean_equals_removal(reconciler: PropertyReconciler<'static>, #[case] absent: PropValue) {
	for name in boolean_properties() {
		// Arrange
		let set_node = MemoryNode::new("input");
		let removed_node = MemoryNode::new("input");
		let value = present_value(PropertyTable::html().get(name).unwrap());
		reconciler.set_property(&set_node, name, &value).unwrap();
		reconciler.set_property(&removed_node, name, &value).unwrap();

		// Act
		reconciler.set_property(&set_node, name, &absent).unwrap();
		reconciler.remove_property(&removed_node, name).unwrap();

		// Assert
		assert_eq!(set_node.snapshot(), removed_node.snapshot(), "property {name}");
		assert_eq!(set_node.snapshot(), MemoryNode::new("input").snapshot(), "property {name}");
	}
}

#[rstest]
#[case("rowSpan")]
#[case("start")]
fn test_nan_numeric_equals_removal(reconciler: PropertyReconciler<'static>, #[case] name: &str) {
	// Arrange
	let set_node = MemoryNode::new("td");
	let removed_node = MemoryNode::new("td");
	reconciler.set_property(&set_node, name, &PropValue::Number(3.0)).unwrap();
	reconciler.set_property(&removed_node, name, &PropValue::Number(3.0)).unwrap();

	// Act
	reconciler.set_property(&set_node, name, &PropValue::from("three")).unwrap();
	reconciler.remove_property(&removed_node, name).unwrap();

	// Assert
	assert_eq!(set_node.snapshot(), removed_node.snapshot());
	assert!(!set_node.has_attribute(&name.to_ascii_lowercase()));
}

#[rstest]
#[case("cols")]
#[case("rows")]
#[case("size")]
#[case("span")]
fn test_positive_numeric_boundary(reconciler: PropertyReconciler<'static>, #[case] name: &str) {
	// Arrange
	let zero_node = MemoryNode::new("textarea");
	let removed_node = MemoryNode::new("textarea");
	let one_node = MemoryNode::new("textarea");

	// Act
	reconciler.set_property(&zero_node, name, &PropValue::Number(0.0)).unwrap();
	reconciler.remove_property(&removed_node, name).unwrap();
	reconciler.set_property(&one_node, name, &PropValue::Number(1.0)).unwrap();

	// Assert
	assert_eq!(zero_node.snapshot(), removed_node.snapshot());
	assert_eq!(one_node.attribute(name).as_deref(), Some("1"));
}

#[rstest]
#[case("value", PropValue::from("hello"))]
#[case("defaultValue", PropValue::Number(5.0))]
#[case("checked", PropValue::Bool(true))]
fn test_field_write_is_idempotent(
	reconciler: PropertyReconciler<'static>,
	#[case] name: &str,
	#[case] value: PropValue,
) {
	// Arrange
	let node = MemoryNode::new("input");

	// Act
	reconciler.set_property(&node, name, &value).unwrap();
	reconciler.set_property(&node, name, &value).unwrap();

	// Assert
	let writes = node
		.mutations()
		.into_iter()
		.filter(|mutation| matches!(mutation, Mutation::SetField { .. }))
		.count();
	assert_eq!(writes, 1);
}

#[rstest]
fn test_round_trip_restores_fresh_node(reconciler: PropertyReconciler<'static>) {
	for (name, descriptor) in PropertyTable::html().iter() {
		// Arrange
		let node = MemoryNode::new("div");
		let value = present_value(descriptor);

		// Act
		reconciler.set_property(&node, name, &value).unwrap();
		assert!(!node.mutations().is_empty(), "property {name} was not written");
		reconciler.remove_property(&node, name).unwrap();

		// Assert
		assert_eq!(node.snapshot(), MemoryNode::new("div").snapshot(), "property {name}");
	}
}

#[rstest]
fn test_single_character_custom_attribute_is_ignored(reconciler: PropertyReconciler<'static>) {
	let node = MemoryNode::new("div");

	reconciler.set_property(&node, "x", &PropValue::from("v")).unwrap();

	assert!(node.mutations().is_empty());
	assert_eq!(node.attribute("x"), None);
}

#[rstest]
fn test_custom_attribute_is_set_literally(reconciler: PropertyReconciler<'static>) {
	let node = MemoryNode::new("div");

	reconciler.set_property(&node, "id2", &PropValue::from("v")).unwrap();

	assert_eq!(node.attribute("id2").as_deref(), Some("v"));
	assert_eq!(node.mutations().len(), 1);
}

// Removal has no length guard, unlike set: a single-character attribute
// that got onto the node some other way can still be cleared.
#[rstest]
fn test_single_character_removal_is_not_guarded(reconciler: PropertyReconciler<'static>) {
	// Arrange
	let node = MemoryNode::new("div");
	node.set_attribute("x", "v").unwrap();

	// Act
	reconciler.remove_property(&node, "x").unwrap();

	// Assert
	assert_eq!(node.attribute("x"), None);
}

#[rstest]
fn test_select_value_selects_option(reconciler: PropertyReconciler<'static>) {
	// Arrange
	let node = MemoryNode::select(["a", "b", "c"]);

	// Act
	reconciler.set_property(&node, "value", &PropValue::from("b")).unwrap();

	// Assert
	assert_eq!(node.selected_values(), vec!["b"]);
	assert_eq!(node.snapshot().fields.get("value"), None);
}

#[rstest]
fn test_multi_select_value(reconciler: PropertyReconciler<'static>) {
	let node = MemoryNode::select_multiple(["a", "b", "c"]);
	let value = PropValue::List(vec!["a".to_string(), "c".to_string()]);

	reconciler.set_property(&node, "value", &value).unwrap();

	assert_eq!(node.selected_values(), vec!["a", "c"]);
}

#[rstest]
fn test_style_object_and_removal(reconciler: PropertyReconciler<'static>) {
	// Arrange
	let node = MemoryNode::new("div");
	let style = PropValue::style([
		("color", PropValue::from("red")),
		("paddingLeft", PropValue::from(4)),
	]);

	// Act
	reconciler.set_property(&node, "style", &style).unwrap();

	// Assert
	assert_eq!(node.style_property("color").as_deref(), Some("red"));
	assert_eq!(
		node.attribute("style").as_deref(),
		Some("color: red; padding-left: 4px;")
	);

	reconciler.remove_property(&node, "style").unwrap();
	assert_eq!(node.attribute("style"), None);
	assert_eq!(
		node.mutations().last(),
		Some(&Mutation::RemoveAttribute {
			name: "style".to_string()
		})
	);
}

#[rstest]
fn test_namespaced_attribute_round_trip(reconciler: PropertyReconciler<'static>) {
	let node = MemoryNode::new("use");

	reconciler.set_property(&node, "xlinkHref", &PropValue::from("#logo")).unwrap();
	assert_eq!(node.attribute_ns(XLINK_NAMESPACE, "href").as_deref(), Some("#logo"));

	reconciler.remove_property(&node, "xlinkHref").unwrap();
	assert_eq!(node.attribute_ns(XLINK_NAMESPACE, "href"), None);
}

#[rstest]
fn test_invalid_custom_attribute_propagates(reconciler: PropertyReconciler<'static>) {
	let node = MemoryNode::new("div");

	let result = reconciler.set_property(&node, "on click", &PropValue::from("f()"));

	assert_eq!(
		result,
		Err(DomError::InvalidCharacter {
			name: "on click".to_string()
		})
	);
}

#[rstest]
fn test_namespace_mismatch_propagates() {
	// Arrange
	let config = PropertyConfig::from_json(
		r#"{ "properties": { "xmlLang": { "attributeName": "xml:lang", "attributeNamespace": "http://www.w3.org/1999/xlink" } } }"#,
	)
	.unwrap();
	let table = PropertyTable::html_with(&config).unwrap();
	let reconciler = PropertyReconciler::new(&table, Environment::with_dom());
	let node = MemoryNode::new("svg");

	// Act
	let result = reconciler.set_property(&node, "xmlLang", &PropValue::from("en"));

	// Assert
	assert!(matches!(result, Err(DomError::Namespace { .. })), "{result:?}");
}

#[rstest]
fn test_headless_environment_is_unavailable() {
	let reconciler = PropertyReconciler::new(PropertyTable::html(), Environment::headless());
	let node = MemoryNode::new("div");

	assert_eq!(
		reconciler.set_property(&node, "title", &PropValue::from("t")),
		Err(DomError::Unavailable)
	);
	assert_eq!(reconciler.remove_property(&node, "title"), Err(DomError::Unavailable));
	assert!(node.mutations().is_empty());
}

#[rstest]
fn test_configured_property_is_reconciled() {
	// Arrange
	let config = PropertyConfig::from_json(
		r#"{ "properties": { "volume": { "propertyName": "volume", "mustUseProperty": true, "hasNumericValue": true } } }"#,
	)
	.unwrap();
	let table = PropertyTable::html_with(&config).unwrap();
	let reconciler = PropertyReconciler::new(&table, Environment::with_dom());
	let node = MemoryNode::new("audio");

	// Act
	reconciler.set_property(&node, "volume", &PropValue::Number(0.5)).unwrap();

	// Assert
	assert_eq!(node.field("volume").unwrap(), PropValue::Number(0.5));
}

#[rstest]
fn test_ignored_custom_attribute_is_logged(reconciler: PropertyReconciler<'static>) {
	use tracing_subscriber::layer::SubscriberExt as _;
	use tracing_subscriber::util::SubscriberInitExt as _;

	// Arrange
	/// A tracing layer that captures event messages
	struct LogCapture {
		logs: Arc<Mutex<Vec<String>>>,
	}

	impl<S: tracing::Subscriber> tracing_subscriber::Layer<S> for LogCapture {
		fn on_event(&self, event: &tracing::Event<'_>, _ctx: tracing_subscriber::layer::Context<'_, S>) {
			struct MessageVisitor {
				message: String,
			}

			impl tracing::field::Visit for MessageVisitor {
				fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
					if field.name() == "message" {
						self.message = format!("{:?}", value);
					}
				}
			}

			let mut visitor = MessageVisitor {
				message: String::new(),
			};
			event.record(&mut visitor);
			self.logs
				.lock()
				.unwrap()
				.push(format!("[{}] {}", event.metadata().level(), visitor.message));
		}
	}

	let logs = Arc::new(Mutex::new(Vec::new()));
	let capture = LogCapture { logs: logs.clone() };
	let _guard = tracing_subscriber::registry().with(capture).set_default();
	let node = MemoryNode::new("div");

	// Act
	reconciler.set_property(&node, "x", &PropValue::from("v")).unwrap();

	// Assert
	let captured = logs.lock().unwrap();
	assert!(
		captured
			.iter()
			.any(|log| log.contains("DEBUG") && log.contains("single-character")),
		"Expected debug log for ignored attribute, but got: {:?}",
		*captured
	);
}
