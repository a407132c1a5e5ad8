//! Check - Structural conformance report per record

use anyhow::{bail, Context, Result};
use serde::Serialize;
use serde_json::Value;

use crate::core::input::{read_source, Element, Position, Source};
use crate::core::naming::FieldNaming;
use crate::core::render::{RenderConfig, Renderable, Renderer};
use crate::core::schema::{KindSelector, RecordKind};
use crate::core::validate::{resolve_kind, validate, ValidateOptions, Violation, ViolationCode};

/// Outcome of checking one element
#[derive(Debug, Clone, Serialize)]
pub struct CheckReport {
    pub position: Position,

    /// Kind the element was checked against; absent when it is not JSON
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<RecordKind>,

    pub valid: bool,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub violations: Vec<Violation>,
}

/// Check a single element
pub fn check_element(
    element: &Element,
    selector: KindSelector,
    options: ValidateOptions,
) -> CheckReport {
    match &element.value {
        Ok(value) => {
            let kind = resolve_kind(selector, value);
            let violations = validate(kind, value, options);
            CheckReport {
                position: element.position,
                kind: Some(kind),
                valid: violations.is_empty(),
                violations,
            }
        }
        Err(message) => CheckReport {
            position: element.position,
            kind: None,
            valid: false,
            violations: vec![Violation::new(
                ViolationCode::InvalidJson,
                None,
                message.clone(),
            )],
        },
    }
}

pub fn check_elements(
    elements: &[Element],
    selector: KindSelector,
    options: ValidateOptions,
) -> Vec<CheckReport> {
    elements
        .iter()
        .map(|element| check_element(element, selector, options))
        .collect()
}

impl Renderable for CheckReport {
    fn to_json(&self, _naming: FieldNaming) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }

    fn section(&self) -> &'static str {
        "Check"
    }

    fn markdown(&self, output: &mut String) {
        let mark = if self.valid { "✓" } else { "✗" };
        output.push_str(&format!("- {} {}", mark, self.position));
        if let Some(kind) = self.kind {
            output.push_str(&format!(" ({})", kind));
        }
        output.push('\n');

        for violation in &self.violations {
            output.push_str(&format!("  - {}\n", violation));
        }
    }

    fn raw(&self) -> Option<String> {
        if self.valid {
            return None;
        }
        let details = self
            .violations
            .iter()
            .map(|v| v.to_string())
            .collect::<Vec<_>>()
            .join("; ");
        Some(format!("{}: {}", self.position, details))
    }
}

/// Run the check command
pub fn run_check(
    source: &Source,
    selector: KindSelector,
    options: ValidateOptions,
    config: RenderConfig,
) -> Result<()> {
    let elements = read_source(source).with_context(|| format!("Failed to read {}", source))?;
    let reports = check_elements(&elements, selector, options);

    let renderer = Renderer::with_config(config);
    renderer.render_to(&reports, std::io::stdout().lock())?;

    let failed = reports.iter().filter(|r| !r.valid).count();
    log::info!(
        "checked {} record(s) from {}, {} failed",
        reports.len(),
        source,
        failed
    );

    if failed > 0 {
        bail!(
            "{} of {} record(s) in {} failed validation",
            failed,
            reports.len(),
            source
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::input::parse_document;
    use crate::core::render::OutputFormat;

    const DOCUMENT: &str = r#"{"title":"Example","siteName":"example.com","url":"https://example.com","snippet":"An example site","score":0.87,"faviconLocation":"https://example.com/favicon.ico","published":"2023-01-01"}
{"url":"https://example.com","favicon_location":"https://example.com/favicon.ico"}
{"title":"Broken","url":"https://broken.example"}
oops
"#;

    #[test]
    fn test_check_elements() {
        let elements = parse_document(DOCUMENT);
        let reports = check_elements(&elements, KindSelector::Auto, Default::default());

        assert_eq!(reports.len(), 4);
        assert!(reports[0].valid);
        assert_eq!(reports[0].kind, Some(RecordKind::SearchResult));
        assert!(reports[1].valid);
        assert_eq!(reports[1].kind, Some(RecordKind::UrlFaviconPair));

        assert!(!reports[2].valid);
        assert_eq!(reports[2].violations.len(), 5);
        assert!(reports[2]
            .violations
            .iter()
            .all(|v| v.code == ViolationCode::MissingField));

        assert!(!reports[3].valid);
        assert_eq!(reports[3].kind, None);
        assert_eq!(reports[3].violations[0].code, ViolationCode::InvalidJson);
        assert_eq!(reports[3].position.line, Some(4));
    }

    #[test]
    fn test_check_fixed_kind() {
        let elements = parse_document(r#"{"url":"u","faviconLocation":"f"}"#);
        let reports = check_elements(
            &elements,
            KindSelector::Fixed(RecordKind::SearchResult),
            Default::default(),
        );
        assert!(!reports[0].valid);
        assert_eq!(reports[0].kind, Some(RecordKind::SearchResult));
    }

    #[test]
    fn test_report_serialization() {
        let elements = parse_document(r#"[{"url":"u","faviconLocation":"f"}]"#);
        let reports = check_elements(&elements, KindSelector::Auto, Default::default());
        let json = serde_json::to_string(&reports[0]).unwrap();
        assert_eq!(
            json,
            r#"{"position":{"index":0},"kind":"url_favicon_pair","valid":true}"#
        );
    }

    #[test]
    fn test_report_markdown_and_raw() {
        let elements = parse_document(DOCUMENT);
        let reports = check_elements(&elements, KindSelector::Auto, Default::default());

        let md = Renderer::new(OutputFormat::Markdown).render(&reports);
        assert!(md.contains("## Check"));
        assert!(md.contains("- ✓ line 1 (search_result)"));
        assert!(md.contains("- ✗ line 3 (search_result)"));
        assert!(md.contains("  - MISSING_FIELD `siteName`"));

        let raw = Renderer::new(OutputFormat::Raw).render(&reports);
        assert_eq!(raw.lines().count(), 2);
        assert!(raw.starts_with("line 3: MISSING_FIELD"));
        assert!(raw.contains("line 4: INVALID_JSON"));
    }
}
