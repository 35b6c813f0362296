//! Style property values.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A flat mapping from style property name to value, e.g. `color` to `"#6750A4"`.
pub type PropertyMap = BTreeMap<String, PropertyValue>;

/// A single style property value.
///
/// Values are deliberately loose: the rendering layer decides how to
/// interpret them. Numbers cover lengths, opacities and weights; text covers
/// colors, keywords and anything else.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropertyValue {
    /// An explicitly unset property. Merging `Null` on top of a value keeps
    /// the key but clears its value.
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
}

impl PropertyValue {
    /// Returns the text content, if this is a text value.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            PropertyValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the numeric content, if this is a number.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            PropertyValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns true if the value is `Null`.
    pub fn is_null(&self) -> bool {
        matches!(self, PropertyValue::Null)
    }
}

impl fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyValue::Null => f.write_str("null"),
            PropertyValue::Bool(b) => write!(f, "{}", b),
            PropertyValue::Number(n) => write!(f, "{}", n),
            PropertyValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<bool> for PropertyValue {
    fn from(value: bool) -> Self {
        PropertyValue::Bool(value)
    }
}

impl From<f64> for PropertyValue {
    fn from(value: f64) -> Self {
        PropertyValue::Number(value)
    }
}

impl From<f32> for PropertyValue {
    fn from(value: f32) -> Self {
        PropertyValue::Number(f64::from(value))
    }
}

impl From<i32> for PropertyValue {
    fn from(value: i32) -> Self {
        PropertyValue::Number(f64::from(value))
    }
}

impl From<u32> for PropertyValue {
    fn from(value: u32) -> Self {
        PropertyValue::Number(f64::from(value))
    }
}

impl From<&str> for PropertyValue {
    fn from(value: &str) -> Self {
        PropertyValue::Text(value.to_string())
    }
}

impl From<String> for PropertyValue {
    fn from(value: String) -> Self {
        PropertyValue::Text(value)
    }
}

impl<T: Into<PropertyValue>> From<Option<T>> for PropertyValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(PropertyValue::Null, Into::into)
    }
}

/// Builds a [`PropertyMap`] from key/value pairs.
///
/// # Example
///
/// ```rust
/// use molecules::style::{properties, PropertyValue};
///
/// let props = properties([("opacity", PropertyValue::from(0.5)), ("color", "red".into())]);
/// assert_eq!(props["color"], PropertyValue::from("red"));
/// ```
pub fn properties<I, K, V>(pairs: I) -> PropertyMap
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<PropertyValue>,
{
    pairs
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_untagged_json_values() {
        let props: PropertyMap =
            serde_json::from_str(r#"{"a": null, "b": true, "c": 4, "d": 0.5, "e": "red"}"#)
                .unwrap();

        assert_eq!(props["a"], PropertyValue::Null);
        assert_eq!(props["b"], PropertyValue::Bool(true));
        assert_eq!(props["c"], PropertyValue::Number(4.0));
        assert_eq!(props["d"], PropertyValue::Number(0.5));
        assert_eq!(props["e"], PropertyValue::Text("red".into()));
    }

    #[test]
    fn test_yaml_integers_become_numbers() {
        let props: PropertyMap = serde_yaml::from_str("padding: 16\nlabel: on").unwrap();
        assert_eq!(props["padding"].as_number(), Some(16.0));
        assert_eq!(props["label"].as_text(), Some("on"));
    }

    #[test]
    fn test_display() {
        assert_eq!(PropertyValue::from("red").to_string(), "red");
        assert_eq!(PropertyValue::from(12).to_string(), "12");
        assert_eq!(PropertyValue::Null.to_string(), "null");
    }

    #[test]
    fn test_option_conversion() {
        assert!(PropertyValue::from(None::<f64>).is_null());
        assert_eq!(PropertyValue::from(Some(2.0)), PropertyValue::Number(2.0));
    }
}
