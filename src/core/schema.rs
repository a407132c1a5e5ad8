//! Field tables for the record kinds
//!
//! The tables are the single description of the contract: validation,
//! key mapping and the `schema` command all read from them.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Wire type of a field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Text,
    Numeric,
}

impl FieldType {
    /// Whether a JSON value has this wire type
    pub fn accepts(self, value: &Value) -> bool {
        match self {
            FieldType::Text => value.is_string(),
            FieldType::Numeric => value.is_number(),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            FieldType::Text => "text",
            FieldType::Numeric => "numeric",
        }
    }
}

/// One declared field of a record kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    /// Canonical (camelCase) key
    pub name: &'static str,
    /// Other spellings accepted on input
    pub aliases: &'static [&'static str],
    /// snake_case spelling used when emitting with snake naming
    pub snake: &'static str,
    pub ty: FieldType,
}

impl FieldSpec {
    const fn new(
        name: &'static str,
        aliases: &'static [&'static str],
        snake: &'static str,
        ty: FieldType,
    ) -> Self {
        Self {
            name,
            aliases,
            snake,
            ty,
        }
    }

    /// Whether `key` names this field under any accepted spelling
    pub fn matches(&self, key: &str) -> bool {
        self.name == key || self.aliases.contains(&key)
    }
}

pub const SEARCH_RESULT_FIELDS: &[FieldSpec] = &[
    FieldSpec::new("title", &[], "title", FieldType::Text),
    FieldSpec::new("siteName", &["site_name"], "site_name", FieldType::Text),
    FieldSpec::new("url", &[], "url", FieldType::Text),
    FieldSpec::new("snippet", &[], "snippet", FieldType::Text),
    FieldSpec::new("score", &[], "score", FieldType::Numeric),
    FieldSpec::new(
        "faviconLocation",
        &["favicon_location"],
        "favicon_location",
        FieldType::Text,
    ),
    FieldSpec::new("published", &[], "published", FieldType::Text),
];

pub const URL_FAVICON_PAIR_FIELDS: &[FieldSpec] = &[
    FieldSpec::new("url", &[], "url", FieldType::Text),
    FieldSpec::new(
        "faviconLocation",
        &["favicon_location"],
        "favicon_location",
        FieldType::Text,
    ),
];

/// The kind of record a JSON object is checked against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordKind {
    SearchResult,
    UrlFaviconPair,
}

impl RecordKind {
    pub const ALL: [RecordKind; 2] = [RecordKind::SearchResult, RecordKind::UrlFaviconPair];

    /// Declared fields, in declaration order
    pub fn fields(self) -> &'static [FieldSpec] {
        match self {
            RecordKind::SearchResult => SEARCH_RESULT_FIELDS,
            RecordKind::UrlFaviconPair => URL_FAVICON_PAIR_FIELDS,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RecordKind::SearchResult => "search_result",
            RecordKind::UrlFaviconPair => "url_favicon_pair",
        }
    }

    /// Guess the kind of an object from its keys.
    ///
    /// Any key that only a search result declares makes it a search result;
    /// everything else is treated as a url/favicon pair.
    pub fn detect(object: &Map<String, Value>) -> RecordKind {
        let pair_fields = RecordKind::UrlFaviconPair.fields();
        let has_result_only_key = object.keys().any(|key| {
            SEARCH_RESULT_FIELDS.iter().any(|f| f.matches(key))
                && !pair_fields.iter().any(|f| f.matches(key))
        });

        if has_result_only_key {
            RecordKind::SearchResult
        } else {
            RecordKind::UrlFaviconPair
        }
    }

    /// Field declared under `key` (canonical or alias)
    pub fn field(self, key: &str) -> Option<&'static FieldSpec> {
        self.fields().iter().find(|f| f.matches(key))
    }
}

impl std::fmt::Display for RecordKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind selection from the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KindSelector {
    #[default]
    Auto,
    Fixed(RecordKind),
}

impl KindSelector {
    pub fn resolve(self, object: &Map<String, Value>) -> RecordKind {
        match self {
            KindSelector::Auto => RecordKind::detect(object),
            KindSelector::Fixed(kind) => kind,
        }
    }
}

impl std::str::FromStr for KindSelector {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "auto" => Ok(KindSelector::Auto),
            "result" | "search_result" => Ok(KindSelector::Fixed(RecordKind::SearchResult)),
            "pair" | "url_favicon_pair" => Ok(KindSelector::Fixed(RecordKind::UrlFaviconPair)),
            _ => Err(format!("Unknown record kind: {}", s)),
        }
    }
}

/// Canonical name for `key` under `kind`, if the kind declares it
pub fn canonical_key(kind: RecordKind, key: &str) -> Option<&'static str> {
    kind.field(key).map(|f| f.name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    #[test]
    fn test_search_result_field_order() {
        let names: Vec<_> = RecordKind::SearchResult
            .fields()
            .iter()
            .map(|f| f.name)
            .collect();
        assert_eq!(
            names,
            vec![
                "title",
                "siteName",
                "url",
                "snippet",
                "score",
                "faviconLocation",
                "published"
            ]
        );
    }

    #[test]
    fn test_search_result_field_types() {
        let types: Vec<_> = RecordKind::SearchResult
            .fields()
            .iter()
            .map(|f| f.ty)
            .collect();
        assert_eq!(
            types,
            vec![
                FieldType::Text,
                FieldType::Text,
                FieldType::Text,
                FieldType::Text,
                FieldType::Numeric,
                FieldType::Text,
                FieldType::Text
            ]
        );
    }

    #[test]
    fn test_pair_fields() {
        let fields = RecordKind::UrlFaviconPair.fields();
        assert_eq!(fields.len(), 2);
        assert!(fields.iter().all(|f| f.ty == FieldType::Text));
    }

    #[test]
    fn test_canonical_key_alias() {
        assert_eq!(
            canonical_key(RecordKind::SearchResult, "favicon_location"),
            Some("faviconLocation")
        );
        assert_eq!(
            canonical_key(RecordKind::UrlFaviconPair, "faviconLocation"),
            Some("faviconLocation")
        );
        assert_eq!(canonical_key(RecordKind::UrlFaviconPair, "title"), None);
    }

    #[test]
    fn test_detect_search_result() {
        let obj = object(json!({"title": "x", "url": "u"}));
        assert_eq!(RecordKind::detect(&obj), RecordKind::SearchResult);
    }

    #[test]
    fn test_detect_pair() {
        let obj = object(json!({"url": "u", "favicon_location": "f"}));
        assert_eq!(RecordKind::detect(&obj), RecordKind::UrlFaviconPair);
    }

    #[test]
    fn test_detect_empty_object_is_pair() {
        let obj = Map::new();
        assert_eq!(RecordKind::detect(&obj), RecordKind::UrlFaviconPair);
    }

    #[test]
    fn test_field_type_accepts() {
        assert!(FieldType::Text.accepts(&json!("a")));
        assert!(!FieldType::Text.accepts(&json!(1)));
        assert!(FieldType::Numeric.accepts(&json!(1)));
        assert!(FieldType::Numeric.accepts(&json!(0.5)));
        assert!(!FieldType::Numeric.accepts(&json!("0.5")));
    }

    #[test]
    fn test_kind_selector_parse() {
        assert_eq!("auto".parse::<KindSelector>().unwrap(), KindSelector::Auto);
        assert_eq!(
            "result".parse::<KindSelector>().unwrap(),
            KindSelector::Fixed(RecordKind::SearchResult)
        );
        assert_eq!(
            "PAIR".parse::<KindSelector>().unwrap(),
            KindSelector::Fixed(RecordKind::UrlFaviconPair)
        );
        assert!("bogus".parse::<KindSelector>().is_err());
    }

    #[test]
    fn test_kind_serialization() {
        let json = serde_json::to_string(&RecordKind::UrlFaviconPair).unwrap();
        assert_eq!(json, "\"url_favicon_pair\"");
    }
}
