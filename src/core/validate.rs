//! Structural conformance checks
//!
//! Checks a JSON value against the field table of a record kind and
//! reports every problem at once, instead of stopping at the first one
//! like typed deserialization does.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::core::error::{ContractError, Result};
use crate::core::model::{Record, SearchResult, UrlFaviconPair};
use crate::core::schema::{KindSelector, RecordKind};

/// What is wrong with a record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ViolationCode {
    NotAnObject,
    MissingField,
    WrongType,
    UnknownField,
    DuplicateField,
    InvalidJson,
}

impl ViolationCode {
    pub fn as_str(self) -> &'static str {
        match self {
            ViolationCode::NotAnObject => "NOT_AN_OBJECT",
            ViolationCode::MissingField => "MISSING_FIELD",
            ViolationCode::WrongType => "WRONG_TYPE",
            ViolationCode::UnknownField => "UNKNOWN_FIELD",
            ViolationCode::DuplicateField => "DUPLICATE_FIELD",
            ViolationCode::InvalidJson => "INVALID_JSON",
        }
    }
}

/// One conformance problem
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    pub code: ViolationCode,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,

    pub message: String,
}

impl Violation {
    pub fn new(code: ViolationCode, field: Option<&str>, message: impl Into<String>) -> Self {
        Self {
            code,
            field: field.map(str::to_string),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.field {
            Some(field) => write!(f, "{} `{}`: {}", self.code.as_str(), field, self.message),
            None => write!(f, "{}: {}", self.code.as_str(), self.message),
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ValidateOptions {
    /// Ignore keys the kind does not declare
    pub allow_unknown: bool,
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Check `value` against the fields of `kind`
pub fn validate(kind: RecordKind, value: &Value, options: ValidateOptions) -> Vec<Violation> {
    let Some(object) = value.as_object() else {
        return vec![Violation::new(
            ViolationCode::NotAnObject,
            None,
            format!("expected a JSON object, found {}", json_type_name(value)),
        )];
    };

    let mut violations = Vec::new();

    for spec in kind.fields() {
        let present: Vec<(&str, &Value)> = std::iter::once(spec.name)
            .chain(spec.aliases.iter().copied())
            .filter_map(|key| object.get(key).map(|v| (key, v)))
            .collect();

        match present.as_slice() {
            [] => violations.push(Violation::new(
                ViolationCode::MissingField,
                Some(spec.name),
                "required field is absent",
            )),
            [(key, found)] => {
                let (key, found) = (*key, *found);
                if !spec.ty.accepts(found) {
                    violations.push(Violation::new(
                        ViolationCode::WrongType,
                        Some(key),
                        format!(
                            "expected {}, found {}",
                            spec.ty.as_str(),
                            json_type_name(found)
                        ),
                    ));
                }
            }
            many => {
                let keys: Vec<&str> = many.iter().map(|(k, _)| *k).collect();
                violations.push(Violation::new(
                    ViolationCode::DuplicateField,
                    Some(spec.name),
                    format!("given more than once as {}", keys.join(", ")),
                ));
            }
        }
    }

    if !options.allow_unknown {
        for key in object.keys() {
            if kind.field(key).is_none() {
                violations.push(Violation::new(
                    ViolationCode::UnknownField,
                    Some(key.as_str()),
                    format!("not a field of {}", kind),
                ));
            }
        }
    }

    violations
}

/// Kind to check a value against; non-objects fall back to a search result
pub fn resolve_kind(selector: KindSelector, value: &Value) -> RecordKind {
    match value.as_object() {
        Some(object) => selector.resolve(object),
        None => match selector {
            KindSelector::Fixed(kind) => kind,
            KindSelector::Auto => RecordKind::SearchResult,
        },
    }
}

fn strip_unknown(kind: RecordKind, object: &mut Map<String, Value>) {
    object.retain(|key, _| kind.field(key).is_some());
}

/// Validate then decode `value` into a typed record
pub fn decode(kind: RecordKind, mut value: Value, options: ValidateOptions) -> Result<Record> {
    let violations = validate(kind, &value, options);
    if !violations.is_empty() {
        return Err(ContractError::Invalid { kind, violations });
    }

    if options.allow_unknown {
        if let Some(object) = value.as_object_mut() {
            strip_unknown(kind, object);
        }
    }

    let record = match kind {
        RecordKind::SearchResult => {
            Record::SearchResult(serde_json::from_value::<SearchResult>(value)?)
        }
        RecordKind::UrlFaviconPair => {
            Record::UrlFaviconPair(serde_json::from_value::<UrlFaviconPair>(value)?)
        }
    };

    Ok(record)
}
