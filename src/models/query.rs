use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Comparison operator of a search filter.
///
/// Operators the registry documents get their own variant; anything else is
/// carried through untouched and left for the registry to reject.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Operator {
    Equal,
    NotEqual,
    Like,
    NotLike,
    Greater,
    Lesser,
    GreaterEqual,
    LesserEqual,
    In,
    NotIn,
    Other(String),
}

impl Operator {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Equal => "EQUAL",
            Self::NotEqual => "NOT_EQUAL",
            Self::Like => "LIKE",
            Self::NotLike => "NOT_LIKE",
            Self::Greater => "GREATER",
            Self::Lesser => "LESSER",
            Self::GreaterEqual => "GREATER_EQUAL",
            Self::LesserEqual => "LESSER_EQUAL",
            Self::In => "IN",
            Self::NotIn => "NOT_IN",
            Self::Other(raw) => raw,
        }
    }
}

impl From<String> for Operator {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "EQUAL" => Self::Equal,
            "NOT_EQUAL" => Self::NotEqual,
            "LIKE" => Self::Like,
            "NOT_LIKE" => Self::NotLike,
            "GREATER" => Self::Greater,
            "LESSER" => Self::Lesser,
            "GREATER_EQUAL" => Self::GreaterEqual,
            "LESSER_EQUAL" => Self::LesserEqual,
            "IN" => Self::In,
            "NOT_IN" => Self::NotIn,
            _ => Self::Other(raw),
        }
    }
}

impl From<Operator> for String {
    fn from(operator: Operator) -> Self {
        match operator {
            Operator::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a filter combines with its siblings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Link {
    And,
    Or,
}

/// One `{key, value, operator}` filter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterDescriptor {
    pub key: String,
    #[serde(deserialize_with = "string_or_scalar")]
    pub value: String,
    pub operator: Operator,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<Link>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub filters: Vec<FilterDescriptor>,
}

impl FilterDescriptor {
    pub fn new(key: impl Into<String>, value: impl Into<String>, operator: Operator) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            operator,
            link: None,
            filters: Vec::new(),
        }
    }
}

/// Pagination and expansion options of a search
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryView {
    pub children: bool,
    pub limit: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset: Option<u32>,
}

/// The query object sent to every `_search` call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuerySpec {
    pub filters: Vec<FilterDescriptor>,
    pub view: QueryView,
}

/// Caller overrides for the default view
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ViewOverrides {
    pub children: Option<bool>,
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

/// Body of every `POST .../_search` route
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SearchRequest {
    #[serde(default)]
    pub filters: Vec<FilterDescriptor>,
    #[serde(default)]
    pub view: Option<ViewOverrides>,
}

/// Filter values are strings on the wire, but clients send numbers too
fn string_or_scalar<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => Ok(s),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        serde_json::Value::Bool(b) => Ok(b.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "filter value must be a string or number, got {}",
            other
        ))),
    }
}
