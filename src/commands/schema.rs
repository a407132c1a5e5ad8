//! Schema - Print the field tables

use anyhow::Result;
use serde::Serialize;
use serde_json::Value;

use crate::core::naming::FieldNaming;
use crate::core::render::{RenderConfig, Renderable, Renderer};
use crate::core::schema::{FieldSpec, FieldType, KindSelector, RecordKind};

/// One row of the schema listing
#[derive(Debug, Clone, Serialize)]
pub struct FieldRow {
    pub kind: RecordKind,
    pub name: &'static str,
    #[serde(skip_serializing_if = "has_no_aliases")]
    pub aliases: &'static [&'static str],
    #[serde(rename = "type")]
    pub ty: FieldType,
    pub required: bool,
}

fn has_no_aliases(aliases: &&[&str]) -> bool {
    aliases.is_empty()
}

impl FieldRow {
    fn new(kind: RecordKind, spec: &FieldSpec) -> Self {
        Self {
            kind,
            name: spec.name,
            aliases: spec.aliases,
            ty: spec.ty,
            required: true,
        }
    }
}

/// Rows for the selected kinds, in declaration order
pub fn field_rows(selector: KindSelector) -> Vec<FieldRow> {
    let kinds: Vec<RecordKind> = match selector {
        KindSelector::Auto => RecordKind::ALL.to_vec(),
        KindSelector::Fixed(kind) => vec![kind],
    };

    kinds
        .into_iter()
        .flat_map(|kind| kind.fields().iter().map(move |spec| FieldRow::new(kind, spec)))
        .collect()
}

impl Renderable for FieldRow {
    fn to_json(&self, _naming: FieldNaming) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }

    fn section(&self) -> &'static str {
        match self.kind {
            RecordKind::SearchResult => "SearchResult",
            RecordKind::UrlFaviconPair => "UrlFaviconPair",
        }
    }

    fn markdown(&self, output: &mut String) {
        output.push_str(&format!("- `{}`: {}", self.name, self.ty.as_str()));
        if !self.aliases.is_empty() {
            let aliases: Vec<String> = self.aliases.iter().map(|a| format!("`{}`", a)).collect();
            output.push_str(&format!(" (also accepted: {})", aliases.join(", ")));
        }
        output.push('\n');
    }

    fn raw(&self) -> Option<String> {
        Some(format!("{}.{}\t{}", self.kind, self.name, self.ty.as_str()))
    }
}

/// Run the schema command
pub fn run_schema(selector: KindSelector, config: RenderConfig) -> Result<()> {
    let rows = field_rows(selector);
    let renderer = Renderer::with_config(config);
    renderer.render_to(&rows, std::io::stdout().lock())?;
    Ok(())
}
