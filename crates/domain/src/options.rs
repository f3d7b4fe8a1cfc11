//! Declarative option schema for converters.
//!
//! Every converter publishes an ordered list of [`OptionSpec`]s. Host tooling
//! renders configuration UIs from that list, and the sanitizer in the
//! application layer reconciles user input against it into
//! [`ResolvedOptions`].

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};

/// Untyped options object as supplied by a caller.
pub type RawOptions = Map<String, Value>;

/// Well-known option identifiers shared by the converters.
pub mod ids {
    /// Number of indent characters per code level.
    pub const INDENT_COUNT: &str = "indentCount";
    /// Indent character, `Tab` or `Space`.
    pub const INDENT_TYPE: &str = "indentType";
    /// Request timeout; `0` means no timeout.
    pub const REQUEST_TIMEOUT: &str = "requestTimeout";
    /// Whether redirects are followed.
    pub const FOLLOW_REDIRECT: &str = "followRedirect";
    /// Whether body keys and values are trimmed.
    pub const TRIM_REQUEST_BODY: &str = "trimRequestBody";
    /// Whether imports and scaffolding are emitted.
    pub const INCLUDE_BOILERPLATE: &str = "includeBoilerplate";
}

/// Largest accepted `indentCount`.
pub const MAX_INDENT_COUNT: u64 = 16;

/// Value type of an option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum OptionType {
    /// Integer greater than or equal to zero
    PositiveInteger,
    /// `true` or `false`
    Boolean,
    /// One of a fixed list of strings
    Enum,
    /// Free text
    String,
}

/// A typed option value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OptionValue {
    /// Boolean value
    Boolean(bool),
    /// Non-negative integer value
    Integer(u64),
    /// String or enum value
    Text(String),
}

impl OptionValue {
    /// Returns the boolean, if this is one.
    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the integer, if this is one.
    #[must_use]
    pub const fn as_u64(&self) -> Option<u64> {
        match self {
            Self::Integer(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the text, if this is one.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Converts to a JSON value.
    #[must_use]
    pub fn to_json(&self) -> Value {
        match self {
            Self::Boolean(b) => Value::Bool(*b),
            Self::Integer(n) => Value::from(*n),
            Self::Text(s) => Value::String(s.clone()),
        }
    }
}

impl From<bool> for OptionValue {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

impl From<u64> for OptionValue {
    fn from(value: u64) -> Self {
        Self::Integer(value)
    }
}

impl From<&str> for OptionValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

/// Declarative description of one conversion option.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionSpec {
    /// Human-readable label
    pub name: String,
    /// Key of the option in the options object
    pub id: String,
    /// Value type
    #[serde(rename = "type")]
    pub option_type: OptionType,
    /// Value used when input is missing or invalid
    pub default: OptionValue,
    /// Allowed values for [`OptionType::Enum`]
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub available_options: Vec<String>,
    /// Upper bound for [`OptionType::PositiveInteger`]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maximum: Option<u64>,
    /// Help text
    pub description: String,
}

impl OptionSpec {
    /// Creates a non-negative integer option.
    #[must_use]
    pub fn positive_integer(
        id: impl Into<String>,
        name: impl Into<String>,
        default: u64,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            id: id.into(),
            option_type: OptionType::PositiveInteger,
            default: OptionValue::Integer(default),
            available_options: Vec::new(),
            maximum: None,
            description: description.into(),
        }
    }

    /// Creates the `indentCount` option, bounded by [`MAX_INDENT_COUNT`].
    #[must_use]
    pub fn indent_count(default: u64) -> Self {
        Self::positive_integer(
            ids::INDENT_COUNT,
            "Set indentation count",
            default,
            "Set the number of indentation characters to add per code level",
        )
        .with_maximum(MAX_INDENT_COUNT)
    }

    /// Sets the largest value a positive integer option accepts.
    #[must_use]
    pub const fn with_maximum(mut self, maximum: u64) -> Self {
        self.maximum = Some(maximum);
        self
    }

    /// Creates a boolean option.
    #[must_use]
    pub fn boolean(
        id: impl Into<String>,
        name: impl Into<String>,
        default: bool,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            id: id.into(),
            option_type: OptionType::Boolean,
            default: OptionValue::Boolean(default),
            available_options: Vec::new(),
            maximum: None,
            description: description.into(),
        }
    }

    /// Creates an enum option. `default` should be one of `choices`.
    #[must_use]
    pub fn enumeration(
        id: impl Into<String>,
        name: impl Into<String>,
        choices: &[&str],
        default: &str,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            id: id.into(),
            option_type: OptionType::Enum,
            default: OptionValue::from(default),
            available_options: choices.iter().map(ToString::to_string).collect(),
            maximum: None,
            description: description.into(),
        }
    }

    /// Creates a free-text option.
    #[must_use]
    pub fn string(
        id: impl Into<String>,
        name: impl Into<String>,
        default: &str,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            id: id.into(),
            option_type: OptionType::String,
            default: OptionValue::from(default),
            available_options: Vec::new(),
            maximum: None,
            description: description.into(),
        }
    }

    /// Checks a raw value against this spec.
    ///
    /// Returns the typed value when `raw` has the right JSON type and, for
    /// enums, is one of the available options (case-sensitive). Negative,
    /// fractional and out-of-range numbers are rejected for positive integers.
    #[must_use]
    pub fn accept(&self, raw: &Value) -> Option<OptionValue> {
        match (self.option_type, raw) {
            (OptionType::Boolean, Value::Bool(b)) => Some(OptionValue::Boolean(*b)),
            (OptionType::PositiveInteger, Value::Number(n)) => n
                .as_u64()
                .filter(|n| self.maximum.is_none_or(|max| *n <= max))
                .map(OptionValue::Integer),
            (OptionType::Enum, Value::String(s)) if self.available_options.contains(s) => {
                Some(OptionValue::Text(s.clone()))
            }
            (OptionType::String, Value::String(s)) => Some(OptionValue::Text(s.clone())),
            _ => None,
        }
    }
}

/// Options after reconciliation with a schema.
///
/// Holds exactly one value per declared option id, in schema order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedOptions {
    entries: Vec<(String, OptionValue)>,
}

impl ResolvedOptions {
    /// Creates an empty set of options.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Resolves every spec to its default.
    #[must_use]
    pub fn defaults(specs: &[OptionSpec]) -> Self {
        specs
            .iter()
            .map(|spec| (spec.id.clone(), spec.default.clone()))
            .collect()
    }

    /// Sets a value, replacing any previous value for the id.
    pub fn insert(&mut self, id: impl Into<String>, value: OptionValue) {
        let id = id.into();
        match self.entries.iter_mut().find(|(k, _)| *k == id) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((id, value)),
        }
    }

    /// Returns the value for an id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&OptionValue> {
        self.entries.iter().find(|(k, _)| k == id).map(|(_, v)| v)
    }

    /// Returns a boolean option, `false` when absent.
    #[must_use]
    pub fn flag(&self, id: &str) -> bool {
        self.get(id).and_then(OptionValue::as_bool).unwrap_or(false)
    }

    /// Returns an integer option, `0` when absent.
    #[must_use]
    pub fn number(&self, id: &str) -> u64 {
        self.get(id).and_then(OptionValue::as_u64).unwrap_or(0)
    }

    /// Returns a text option, empty when absent.
    #[must_use]
    pub fn choice(&self, id: &str) -> &str {
        self.get(id).and_then(OptionValue::as_str).unwrap_or("")
    }

    /// Returns one indentation level built from `indentType` and `indentCount`.
    #[must_use]
    pub fn indent_unit(&self) -> String {
        let ch = if self.choice(ids::INDENT_TYPE).eq_ignore_ascii_case("tab") {
            "\t"
        } else {
            " "
        };
        let count = self.number(ids::INDENT_COUNT).min(MAX_INDENT_COUNT);
        ch.repeat(usize::try_from(count).unwrap_or(0))
    }

    /// Iterates over `(id, value)` pairs in schema order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &OptionValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Returns the option ids in schema order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    /// Returns the number of options.
    #[must_use]
    #[allow(clippy::missing_const_for_fn)] // Vec::len is not const in stable
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if there are no options.
    #[must_use]
    #[allow(clippy::missing_const_for_fn)] // Vec::is_empty is not const in stable
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Converts back to an untyped options object.
    #[must_use]
    pub fn to_raw(&self) -> RawOptions {
        self.entries
            .iter()
            .map(|(k, v)| (k.clone(), v.to_json()))
            .collect()
    }
}

impl FromIterator<(String, OptionValue)> for ResolvedOptions {
    fn from_iter<T: IntoIterator<Item = (String, OptionValue)>>(iter: T) -> Self {
        let mut resolved = Self::new();
        for (id, value) in iter {
            resolved.insert(id, value);
        }
        resolved
    }
}

impl Serialize for ResolvedOptions {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (id, value) in &self.entries {
            map.serialize_entry(id, value)?;
        }
        map.end()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn indent_type() -> OptionSpec {
        OptionSpec::enumeration(
            ids::INDENT_TYPE,
            "Set indentation type",
            &["Tab", "Space"],
            "Space",
            "Select the character used to indent lines of code",
        )
    }

    #[test]
    fn test_spec_serializes_with_schema_field_names() {
        let value = serde_json::to_value(indent_type()).unwrap();
        assert_eq!(
            value,
            json!({
                "name": "Set indentation type",
                "id": "indentType",
                "type": "enum",
                "default": "Space",
                "availableOptions": ["Tab", "Space"],
                "description": "Select the character used to indent lines of code"
            })
        );

        let count = OptionSpec::positive_integer(ids::INDENT_COUNT, "Count", 2, "d");
        let value = serde_json::to_value(count).unwrap();
        assert_eq!(value["type"], "positiveInteger");
        assert!(value.get("availableOptions").is_none());
        assert!(value.get("maximum").is_none());
        assert_eq!(serde_json::to_value(OptionSpec::indent_count(2)).unwrap()["maximum"], 16);
    }

    #[test]
    fn test_accept_checks_type_and_choices() {
        let spec = indent_type();
        assert_eq!(spec.accept(&json!("Tab")), Some(OptionValue::from("Tab")));
        assert_eq!(spec.accept(&json!("tab")), None);
        assert_eq!(spec.accept(&json!(1)), None);

        let count = OptionSpec::positive_integer(ids::INDENT_COUNT, "Count", 2, "d");
        assert_eq!(count.accept(&json!(3)), Some(OptionValue::Integer(3)));
        assert_eq!(count.accept(&json!(-1)), None);
        assert_eq!(count.accept(&json!(2.5)), None);
        assert_eq!(count.accept(&json!("5")), None);

        let bounded = OptionSpec::indent_count(2);
        assert_eq!(bounded.accept(&json!(MAX_INDENT_COUNT)), Some(OptionValue::Integer(MAX_INDENT_COUNT)));
        assert_eq!(bounded.accept(&json!(MAX_INDENT_COUNT + 1)), None);
        assert_eq!(bounded.accept(&json!(u64::MAX)), None);

        let flag = OptionSpec::boolean(ids::FOLLOW_REDIRECT, "Follow", true, "d");
        assert_eq!(flag.accept(&json!(false)), Some(OptionValue::Boolean(false)));
        assert_eq!(flag.accept(&json!("true")), None);
    }

    #[test]
    fn test_indent_unit() {
        let mut options = ResolvedOptions::new();
        options.insert(ids::INDENT_TYPE, OptionValue::from("Tab"));
        options.insert(ids::INDENT_COUNT, OptionValue::Integer(2));
        assert_eq!(options.indent_unit(), "\t\t");

        options.insert(ids::INDENT_TYPE, OptionValue::from("space"));
        assert_eq!(options.indent_unit(), "  ");
        assert_eq!(options.len(), 2);

        options.insert(ids::INDENT_COUNT, OptionValue::Integer(u64::MAX));
        assert_eq!(options.indent_unit().len(), 16);
    }

    #[test]
    fn test_accessors_fall_back_when_absent() {
        let options = ResolvedOptions::new();
        assert!(!options.flag(ids::FOLLOW_REDIRECT));
        assert_eq!(options.number(ids::REQUEST_TIMEOUT), 0);
        assert_eq!(options.choice(ids::INDENT_TYPE), "");
        assert_eq!(options.indent_unit(), "");
    }

    #[test]
    fn test_resolved_serializes_in_order() {
        let options: ResolvedOptions = [
            ("b".to_string(), OptionValue::Boolean(true)),
            ("a".to_string(), OptionValue::Integer(1)),
        ]
        .into_iter()
        .collect();
        assert_eq!(
            serde_json::to_string(&options).unwrap(),
            r#"{"b":true,"a":1}"#
        );
        assert_eq!(options.to_raw().get("a"), Some(&json!(1)));
    }
}
