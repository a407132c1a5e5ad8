//! Key naming at the output boundary
//!
//! Records are encoded with camelCase keys. Consumers that still expect
//! the snake_case spelling can ask for it here; input accepts both.

use serde_json::{Map, Value};

use crate::core::schema::RecordKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FieldNaming {
    #[default]
    Camel,
    Snake,
}

impl std::str::FromStr for FieldNaming {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "camel" | "camelcase" => Ok(FieldNaming::Camel),
            "snake" | "snake_case" => Ok(FieldNaming::Snake),
            _ => Err(format!("Unknown naming: {}", s)),
        }
    }
}

/// Rewrite the keys of an encoded record of `kind` to `naming`.
///
/// Keys the kind does not declare are left alone.
pub fn apply(naming: FieldNaming, kind: RecordKind, value: Value) -> Value {
    let object = match value {
        Value::Object(object) => object,
        other => return other,
    };

    let renamed: Map<String, Value> = object
        .into_iter()
        .map(|(key, v)| match kind.field(&key) {
            Some(spec) => {
                let name = match naming {
                    FieldNaming::Camel => spec.name,
                    FieldNaming::Snake => spec.snake,
                };
                (name.to_string(), v)
            }
            None => (key, v),
        })
        .collect();

    Value::Object(renamed)
}
