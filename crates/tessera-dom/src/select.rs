//! `<select>` value setter and remover.
//!
//! A select's value is not a plain field: it is the selection state of its
//! `<option>` children. These functions reflect a value onto that state.

use crate::error::DomError;
use crate::node::DomNode;
use crate::value::PropValue;

/// Selects the options matching `value`.
///
/// Multi-selects select every option whose value is in `value` (a list, or
/// a single scalar). Single selects select the first option whose value
/// equals the string form of `value`. All other options are deselected.
pub fn set_select_value<N>(node: &N, value: &PropValue) -> Result<(), DomError>
where
	N: DomNode + ?Sized,
{
	let options = node.option_values();

	if node.field("multiple")?.is_truthy() {
		let wanted = match value {
			PropValue::List(values) => values.clone(),
			scalar => vec![scalar.to_js_string()],
		};
		for (index, option) in options.iter().enumerate() {
			node.set_option_selected(index, wanted.contains(option))?;
		}
	} else {
		let wanted = value.to_js_string();
		let chosen = options.iter().position(|option| *option == wanted);
		for index in 0..options.len() {
			node.set_option_selected(index, chosen == Some(index))?;
		}
	}
	Ok(())
}

/// Deselects every option.
pub fn remove_select_value<N>(node: &N) -> Result<(), DomError>
where
	N: DomNode + ?Sized,
{
	for index in 0..node.option_values().len() {
		node.set_option_selected(index, false)?;
	}
	Ok(())
}
