// Command arguments - Specs, typed values and parsing
//
// An ArgumentSpec describes one positional argument of a leaf command. The raw
// word typed by the user is parsed into an ArgValue according to its ArgKind.

use std::fmt;

/// Semantic type of an argument
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArgKind {
    Int,
    Unsigned,
    Float,
    Bool,
    Text,
    /// One of a fixed set of identifiers (matched case-sensitively)
    Enum(Vec<String>),
}

impl ArgKind {
    /// Build an enum kind from a list of options
    pub fn one_of(options: &[&str]) -> Self {
        ArgKind::Enum(options.iter().map(|s| s.to_string()).collect())
    }

    /// Human-readable type name used in the command reference
    pub fn type_name(&self) -> &'static str {
        match self {
            ArgKind::Int => "Int",
            ArgKind::Unsigned => "Unsigned",
            ArgKind::Float => "Float",
            ArgKind::Bool => "Bool",
            ArgKind::Text => "String",
            ArgKind::Enum(_) => "Enum",
        }
    }

    /// Parse a raw word into a value of this kind
    pub fn parse(&self, raw: &str) -> Option<ArgValue> {
        match self {
            ArgKind::Int => raw.parse::<i64>().ok().map(ArgValue::Int),
            ArgKind::Unsigned => {
                // `u64::from_str` accepts a leading '+', reject signs entirely
                if raw.starts_with(['+', '-']) {
                    return None;
                }
                raw.parse::<u64>().ok().map(ArgValue::Unsigned)
            }
            ArgKind::Float => raw
                .parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .map(ArgValue::Float),
            ArgKind::Bool => parse_bool(raw).map(ArgValue::Bool),
            ArgKind::Text => Some(ArgValue::Text(raw.to_string())),
            ArgKind::Enum(options) => options
                .iter()
                .find(|option| option.as_str() == raw)
                .map(|option| ArgValue::Enum(option.clone())),
        }
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.to_ascii_lowercase().as_str() {
        "true" | "on" | "yes" | "1" => Some(true),
        "false" | "off" | "no" | "0" => Some(false),
        _ => None,
    }
}

/// Description of one positional argument
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArgumentSpec {
    pub name: String,
    pub kind: ArgKind,
    /// Raw default, parsed with `kind` when the argument is omitted
    pub default: Option<String>,
}

impl ArgumentSpec {
    /// A required argument
    pub fn new(name: impl Into<String>, kind: ArgKind) -> Self {
        Self {
            name: name.into(),
            kind,
            default: None,
        }
    }

    /// Give the argument a default value, making it optional
    pub fn with_default(mut self, default: impl Into<String>) -> Self {
        self.default = Some(default.into());
        self
    }

    pub fn is_optional(&self) -> bool {
        self.default.is_some()
    }

    /// Guide-text display: `[name]` or `[name=default]`
    pub fn display(&self) -> String {
        match &self.default {
            Some(default) => format!("[{}={}]", self.name, default),
            None => format!("[{}]", self.name),
        }
    }

    /// Reference display including the type: `[Float: bpm=120]`
    pub fn signature(&self) -> String {
        match &self.default {
            Some(default) => format!("[{}: {}={}]", self.kind.type_name(), self.name, default),
            None => format!("[{}: {}]", self.kind.type_name(), self.name),
        }
    }
}

/// A parsed argument value
#[derive(Debug, Clone, PartialEq)]
pub enum ArgValue {
    Int(i64),
    Unsigned(u64),
    Float(f64),
    Bool(bool),
    Text(String),
    Enum(String),
}

impl ArgValue {
    pub fn as_int(&self) -> Option<i64> {
        match self {
            ArgValue::Int(v) => Some(*v),
            ArgValue::Unsigned(v) => i64::try_from(*v).ok(),
            _ => None,
        }
    }

    pub fn as_unsigned(&self) -> Option<u64> {
        match self {
            ArgValue::Unsigned(v) => Some(*v),
            _ => None,
        }
    }

    /// Numeric view of Int, Unsigned and Float values
    pub fn as_float(&self) -> Option<f64> {
        match self {
            ArgValue::Float(v) => Some(*v),
            ArgValue::Int(v) => Some(*v as f64),
            ArgValue::Unsigned(v) => Some(*v as f64),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ArgValue::Bool(v) => Some(*v),
            _ => None,
        }
    }

    /// Text view of Text and Enum values
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ArgValue::Text(s) | ArgValue::Enum(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for ArgValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgValue::Int(v) => write!(f, "{}", v),
            ArgValue::Unsigned(v) => write!(f, "{}", v),
            ArgValue::Float(v) => write!(f, "{}", v),
            ArgValue::Bool(v) => write!(f, "{}", v),
            ArgValue::Text(s) | ArgValue::Enum(s) => write!(f, "{}", s),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_numeric_kinds() {
        assert_eq!(ArgKind::Int.parse("-3"), Some(ArgValue::Int(-3)));
        assert_eq!(ArgKind::Int.parse("3.5"), None);
        assert_eq!(ArgKind::Unsigned.parse("42"), Some(ArgValue::Unsigned(42)));
        assert_eq!(ArgKind::Unsigned.parse("-1"), None);
        assert_eq!(ArgKind::Unsigned.parse("+1"), None);
        assert_eq!(ArgKind::Float.parse("120.5"), Some(ArgValue::Float(120.5)));
        assert_eq!(ArgKind::Float.parse("nan"), None);
        assert_eq!(ArgKind::Float.parse("12bpm"), None);
    }

    #[test]
    fn test_parse_bool_spellings() {
        for raw in ["true", "ON", "yes", "1"] {
            assert_eq!(ArgKind::Bool.parse(raw), Some(ArgValue::Bool(true)), "{}", raw);
        }
        for raw in ["false", "Off", "no", "0"] {
            assert_eq!(ArgKind::Bool.parse(raw), Some(ArgValue::Bool(false)), "{}", raw);
        }
        assert_eq!(ArgKind::Bool.parse("maybe"), None);
    }

    #[test]
    fn test_parse_enum_is_case_sensitive() {
        let kind = ArgKind::one_of(&["up", "down"]);
        assert_eq!(kind.parse("up"), Some(ArgValue::Enum("up".into())));
        assert_eq!(kind.parse("Up"), None);
    }

    #[test]
    fn test_display_and_signature() {
        let bpm = ArgumentSpec::new("bpm", ArgKind::Float);
        let level = ArgumentSpec::new("level", ArgKind::Float).with_default("0.8");

        assert_eq!(bpm.display(), "[bpm]");
        assert_eq!(level.display(), "[level=0.8]");
        assert_eq!(level.signature(), "[Float: level=0.8]");
        assert!(level.is_optional());
        assert!(!bpm.is_optional());
    }

    #[test]
    fn test_value_accessors() {
        assert_eq!(ArgValue::Unsigned(4).as_float(), Some(4.0));
        assert_eq!(ArgValue::Unsigned(4).as_int(), Some(4));
        assert_eq!(ArgValue::Enum("on".into()).as_str(), Some("on"));
        assert_eq!(ArgValue::Bool(true).as_float(), None);
    }
}
