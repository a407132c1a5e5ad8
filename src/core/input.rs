//! Document reader
//!
//! A document is a JSON array of records, a single JSON record, or JSON
//! Lines. Each element keeps its position so diagnostics can point at it.

use serde::Serialize;
use serde_json::Value;
use std::io::Read;
use std::path::{Path, PathBuf};

use crate::core::error::Result;

/// Where a document is read from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    Stdin,
    File(PathBuf),
}

impl Source {
    /// `-` means stdin
    pub fn from_arg(path: &Path) -> Self {
        if path.as_os_str() == "-" {
            Source::Stdin
        } else {
            Source::File(path.to_path_buf())
        }
    }
}

impl std::fmt::Display for Source {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Source::Stdin => f.write_str("<stdin>"),
            Source::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Position of an element inside its document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Position {
    /// 0-based element index
    pub index: usize,

    /// 1-based line number, for JSON Lines input
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<usize>,
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.line {
            Some(line) => write!(f, "line {}", line),
            None => write!(f, "element {}", self.index),
        }
    }
}

/// One element of a document; `value` is the JSON parse error text when
/// the element could not be parsed
#[derive(Debug, Clone)]
pub struct Element {
    pub position: Position,
    pub value: std::result::Result<Value, String>,
}

/// Split document text into elements.
///
/// Text that does not parse as one JSON value is read as JSON Lines only
/// when its first non-blank line is a JSON value by itself. Anything else
/// is a single malformed document, reported with the parser's location.
pub fn parse_document(text: &str) -> Vec<Element> {
    let mut non_blank = text
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty());
    let Some((first_no, first_line)) = non_blank.next() else {
        return Vec::new();
    };
    let single_line = non_blank.next().is_none();

    match serde_json::from_str::<Value>(text) {
        Ok(Value::Array(items)) => items
            .into_iter()
            .enumerate()
            .map(|(index, value)| Element {
                position: Position { index, line: None },
                value: Ok(value),
            })
            .collect(),
        Ok(value) => vec![Element {
            position: Position {
                index: 0,
                line: single_line.then_some(first_no + 1),
            },
            value: Ok(value),
        }],
        Err(_) if serde_json::from_str::<Value>(first_line).is_ok() => parse_json_lines(text),
        Err(e) => vec![Element {
            position: Position {
                index: 0,
                line: Some(e.line()),
            },
            value: Err(e.to_string()),
        }],
    }
}

fn parse_json_lines(text: &str) -> Vec<Element> {
    text.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .enumerate()
        .map(|(index, (line_no, line))| Element {
            position: Position {
                index,
                line: Some(line_no + 1),
            },
            value: serde_json::from_str::<Value>(line).map_err(|e| e.to_string()),
        })
        .collect()
}

/// Read and split a whole document
pub fn read_source(source: &Source) -> Result<Vec<Element>> {
    let text = match source {
        Source::Stdin => {
            let mut buffer = String::new();
            std::io::stdin().read_to_string(&mut buffer)?;
            buffer
        }
        Source::File(path) => std::fs::read_to_string(path)?,
    };

    let elements = parse_document(&text);
    log::debug!("read {} element(s) from {}", elements.len(), source);
    Ok(elements)
}
