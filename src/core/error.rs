use crate::core::schema::RecordKind;
use crate::core::validate::Violation;

#[derive(thiserror::Error, Debug)]
pub enum ContractError {
    #[error("{kind} does not conform: {}", summarize(.violations))]
    Invalid {
        kind: RecordKind,
        violations: Vec<Violation>,
    },

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

fn summarize(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

pub type Result<T> = std::result::Result<T, ContractError>;
