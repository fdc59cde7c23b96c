//! Dynamic values crossing the reconciler boundary.
//!
//! The rendering layer hands the reconciler values of any shape: strings,
//! numbers, booleans, style objects or nothing at all. [`PropValue`] models
//! that set and implements the JavaScript coercions (`ToNumber`, `ToString`,
//! truthiness) that decide between writing and removing a property.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// CSS property name to value mapping used for style objects.
pub type StyleMap = BTreeMap<String, PropValue>;

/// A dynamically typed property value.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropValue {
	/// `null` or `undefined`.
	#[default]
	Null,
	/// A boolean.
	Bool(bool),
	/// A number. `NaN` and the infinities are allowed.
	Number(f64),
	/// A string.
	Text(String),
	/// A list of strings, e.g. the values of a multi-select.
	List(Vec<String>),
	/// A style object.
	Style(StyleMap),
}

impl PropValue {
	/// Builds a style object from `(css property, value)` pairs.
	///
	/// ```
	/// use tessera_dom::PropValue;
	///
	/// let style = PropValue::style([("color", "red"), ("fontSize", "12px")]);
	/// assert!(style.is_truthy());
	/// ```
	pub fn style<K, V, I>(declarations: I) -> Self
	where
		K: Into<String>,
		V: Into<PropValue>,
		I: IntoIterator<Item = (K, V)>,
	{
		Self::Style(
			declarations
				.into_iter()
				.map(|(k, v)| (k.into(), v.into()))
				.collect(),
		)
	}

	/// Returns `true` for `null`/`undefined`.
	pub fn is_null(&self) -> bool {
		matches!(self, Self::Null)
	}

	/// JavaScript truthiness.
	///
	/// `false`, `0`, `NaN`, `""` and `null` are falsy; everything else,
	/// including empty lists and style objects, is truthy.
	pub fn is_truthy(&self) -> bool {
		match self {
			Self::Null => false,
			Self::Bool(b) => *b,
			Self::Number(n) => *n != 0.0 && !n.is_nan(),
			Self::Text(s) => !s.is_empty(),
			Self::List(_) | Self::Style(_) => true,
		}
	}

	/// JavaScript `ToNumber`.
	pub fn to_number(&self) -> f64 {
		match self {
			Self::Null => 0.0,
			Self::Bool(b) => {
				if *b {
					1.0
				} else {
					0.0
				}
			}
			Self::Number(n) => *n,
			Self::Text(s) => parse_number(s),
			// Arrays go through their string form: [] -> "" -> 0, ["5"] -> "5" -> 5
			Self::List(items) => match items.as_slice() {
				[] => 0.0,
				[single] => parse_number(single),
				_ => f64::NAN,
			},
			Self::Style(_) => f64::NAN,
		}
	}

	/// JavaScript string concatenation form (`'' + value`).
	pub fn to_js_string(&self) -> String {
		match self {
			Self::Null => "null".to_string(),
			Self::Bool(b) => b.to_string(),
			Self::Number(n) => number_to_string(*n),
			Self::Text(s) => s.clone(),
			Self::List(items) => items.join(","),
			Self::Style(_) => "[object Object]".to_string(),
		}
	}
}

impl fmt::Display for PropValue {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.to_js_string())
	}
}

/// `ToNumber` applied to a string.
fn parse_number(raw: &str) -> f64 {
	let trimmed = raw.trim();
	if trimmed.is_empty() {
		return 0.0;
	}
	match trimmed {
		"Infinity" | "+Infinity" => return f64::INFINITY,
		"-Infinity" => return f64::NEG_INFINITY,
		_ => {}
	}
	for (prefix, radix) in [("0x", 16), ("0X", 16), ("0o", 8), ("0O", 8), ("0b", 2), ("0B", 2)] {
		if let Some(digits) = trimmed.strip_prefix(prefix) {
			return u64::from_str_radix(digits, radix)
				.map(|n| n as f64)
				.unwrap_or(f64::NAN);
		}
	}
	// Rust accepts "inf" and "nan" spellings that JavaScript rejects
	if trimmed
		.chars()
		.any(|c| c.is_ascii_alphabetic() && c != 'e' && c != 'E')
	{
		return f64::NAN;
	}
	trimmed.parse::<f64>().unwrap_or(f64::NAN)
}

/// `Number.prototype.toString()` for the common cases.
fn number_to_string(n: f64) -> String {
	if n.is_nan() {
		"NaN".to_string()
	} else if n.is_infinite() {
		let sign = if n > 0.0 { "" } else { "-" };
		format!("{sign}Infinity")
	} else if n == 0.0 {
		// Covers -0 as well
		"0".to_string()
	} else if n.abs() >= 1e21 || n.abs() < 1e-6 {
		exponential(n)
	} else if n.fract() == 0.0 {
		format!("{:.0}", n)
	} else {
		n.to_string()
	}
}

/// Exponent form with an explicit exponent sign: `1e+21`, `1.5e-7`.
fn exponential(n: f64) -> String {
	let formatted = format!("{n:e}");
	match formatted.split_once('e') {
		Some((mantissa, exponent)) if !exponent.starts_with('-') => {
			format!("{mantissa}e+{exponent}")
		}
		_ => formatted,
	}
}

impl From<&str> for PropValue {
	fn from(value: &str) -> Self {
		Self::Text(value.to_string())
	}
}

impl From<String> for PropValue {
	fn from(value: String) -> Self {
		Self::Text(value)
	}
}

impl From<&String> for PropValue {
	fn from(value: &String) -> Self {
		Self::Text(value.clone())
	}
}

impl From<bool> for PropValue {
	fn from(value: bool) -> Self {
		Self::Bool(value)
	}
}

macro_rules! impl_from_number {
	($($ty:ty),*) => {
		$(
			impl From<$ty> for PropValue {
				fn from(value: $ty) -> Self {
					Self::Number(value as f64)
				}
			}
		)*
	};
}

impl_from_number!(f64, f32, i8, i16, i32, i64, u8, u16, u32, u64, usize, isize);

impl From<Vec<String>> for PropValue {
	fn from(value: Vec<String>) -> Self {
		Self::List(value)
	}
}

impl From<StyleMap> for PropValue {
	fn from(value: StyleMap) -> Self {
		Self::Style(value)
	}
}

impl<T: Into<PropValue>> From<Option<T>> for PropValue {
	fn from(value: Option<T>) -> Self {
		value.map_or(Self::Null, Into::into)
	}
}
