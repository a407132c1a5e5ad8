//! Renderer module
//!
//! Renders lists of records and reports to different output formats: jsonl, json, md, raw

use serde_json::Value;
use std::io::Write;

use crate::core::model::{Record, SearchResult, UrlFaviconPair};
use crate::core::naming::{self, FieldNaming};
use crate::core::schema::RecordKind;

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Jsonl,
    Json,
    Markdown,
    Raw,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "jsonl" => Ok(OutputFormat::Jsonl),
            "json" => Ok(OutputFormat::Json),
            "md" | "markdown" => Ok(OutputFormat::Markdown),
            "raw" => Ok(OutputFormat::Raw),
            _ => Err(format!("Unknown format: {}", s)),
        }
    }
}

/// Render configuration combining format and options
#[derive(Debug, Clone, Copy, Default)]
pub struct RenderConfig {
    pub format: OutputFormat,
    pub pretty: bool,
    pub naming: FieldNaming,
}

impl RenderConfig {
    pub fn new(format: OutputFormat) -> Self {
        Self {
            format,
            ..Default::default()
        }
    }

    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    pub fn with_naming(mut self, naming: FieldNaming) -> Self {
        self.naming = naming;
        self
    }
}

/// Anything the renderer can emit
pub trait Renderable {
    /// JSON form, with record keys spelled per `naming`
    fn to_json(&self, naming: FieldNaming) -> Value;

    /// Markdown section heading the item is grouped under
    fn section(&self) -> &'static str;

    /// Append the markdown form of the item
    fn markdown(&self, output: &mut String);

    /// One-line plain form, if the item has one
    fn raw(&self) -> Option<String>;
}

/// Renderer for item lists
pub struct Renderer {
    config: RenderConfig,
}

impl Renderer {
    pub fn new(format: OutputFormat) -> Self {
        Self {
            config: RenderConfig::new(format),
        }
    }

    /// Create a new renderer with render config
    pub fn with_config(config: RenderConfig) -> Self {
        Self { config }
    }

    /// Render items to a string
    pub fn render<T: Renderable>(&self, items: &[T]) -> String {
        match self.config.format {
            OutputFormat::Jsonl => self.render_jsonl(items),
            OutputFormat::Json => self.render_json(items),
            OutputFormat::Markdown => self.render_markdown(items),
            OutputFormat::Raw => self.render_raw(items),
        }
    }

    /// Render to a writer
    pub fn render_to<T: Renderable, W: Write>(
        &self,
        items: &[T],
        mut writer: W,
    ) -> std::io::Result<()> {
        let output = self.render(items);
        if output.is_empty() {
            return Ok(());
        }
        writeln!(writer, "{}", output)
    }

    fn encode(&self, value: &Value) -> Option<String> {
        if self.config.pretty {
            serde_json::to_string_pretty(value).ok()
        } else {
            serde_json::to_string(value).ok()
        }
    }

    /// Render as JSON Lines (one JSON object per line)
    fn render_jsonl<T: Renderable>(&self, items: &[T]) -> String {
        items
            .iter()
            .filter_map(|item| self.encode(&item.to_json(self.config.naming)))
            .collect::<Vec<_>>()
            .join(if self.config.pretty { "\n\n" } else { "\n" })
    }

    /// Render as a single JSON array
    fn render_json<T: Renderable>(&self, items: &[T]) -> String {
        let array = Value::Array(
            items
                .iter()
                .map(|item| item.to_json(self.config.naming))
                .collect(),
        );
        self.encode(&array).unwrap_or_else(|| "[]".to_string())
    }

    /// Render as Markdown, grouped by section in first-seen order
    fn render_markdown<T: Renderable>(&self, items: &[T]) -> String {
        let mut sections: Vec<(&'static str, Vec<&T>)> = Vec::new();
        for item in items {
            let section = item.section();
            match sections.iter_mut().find(|(name, _)| *name == section) {
                Some((_, group)) => group.push(item),
                None => sections.push((section, vec![item])),
            }
        }

        let mut output = String::new();
        for (name, group) in sections {
            output.push_str(&format!("## {}\n\n", name));
            for item in group {
                item.markdown(&mut output);
            }
            output.push('\n');
        }

        output
    }

    /// Render as raw output, one line per item
    fn render_raw<T: Renderable>(&self, items: &[T]) -> String {
        items
            .iter()
            .filter_map(Renderable::raw)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

fn search_result_markdown(result: &SearchResult, output: &mut String) {
    output.push_str(&format!("### [{}]({})\n\n", result.title, result.url));

    let published = result
        .published_at()
        .map(|dt| dt.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| result.published.clone());
    output.push_str(&format!(
        "{} · score {} · published {} · favicon `{}`\n",
        result.site_name, result.score, published, result.favicon_location
    ));

    if !result.snippet.is_empty() {
        output.push_str(&format!("\n> {}\n", result.snippet));
    }
    output.push('\n');
}

fn pair_markdown(pair: &UrlFaviconPair, output: &mut String) {
    output.push_str(&format!("- `{}` -> `{}`\n", pair.url, pair.favicon_location));
}

impl Renderable for Record {
    fn to_json(&self, naming: FieldNaming) -> Value {
        let value = serde_json::to_value(self).unwrap_or(Value::Null);
        naming::apply(naming, self.kind(), value)
    }

    fn section(&self) -> &'static str {
        match self {
            Record::SearchResult(_) => "Search Results",
            Record::UrlFaviconPair(_) => "Favicons",
        }
    }

    fn markdown(&self, output: &mut String) {
        match self {
            Record::SearchResult(result) => search_result_markdown(result, output),
            Record::UrlFaviconPair(pair) => pair_markdown(pair, output),
        }
    }

    fn raw(&self) -> Option<String> {
        Some(self.url().to_string())
    }
}

impl Renderable for UrlFaviconPair {
    fn to_json(&self, naming: FieldNaming) -> Value {
        let value = serde_json::to_value(self).unwrap_or(Value::Null);
        naming::apply(naming, RecordKind::UrlFaviconPair, value)
    }

    fn section(&self) -> &'static str {
        "Favicons"
    }

    fn markdown(&self, output: &mut String) {
        pair_markdown(self, output);
    }

    fn raw(&self) -> Option<String> {
        Some(format!("{}\t{}", self.url, self.favicon_location))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result() -> Record {
        Record::from(SearchResult::new(
            "Example",
            "example.com",
            "https://example.com",
            "An example site",
            0.87,
            "https://example.com/favicon.ico",
            "2023-01-01",
        ))
    }

    fn pair() -> Record {
        Record::from(UrlFaviconPair::new("https://a.org", "https://a.org/icon.png"))
    }

    #[test]
    fn test_render_jsonl() {
        let renderer = Renderer::new(OutputFormat::Jsonl);
        let output = renderer.render(&[result(), pair()]);

        assert_eq!(output.lines().count(), 2);
        assert!(output.contains("\"siteName\":\"example.com\""));
        assert!(output.contains("\"faviconLocation\":\"https://a.org/icon.png\""));
    }

    #[test]
    fn test_render_json() {
        let renderer = Renderer::new(OutputFormat::Json);
        let output = renderer.render(&[pair()]);

        assert!(output.starts_with('['));
        assert!(output.ends_with(']'));
    }

    #[test]
    fn test_render_json_empty() {
        let renderer = Renderer::new(OutputFormat::Json);
        let items: Vec<Record> = Vec::new();
        assert_eq!(renderer.render(&items), "[]");
    }

    #[test]
    fn test_render_snake_naming() {
        let config = RenderConfig::new(OutputFormat::Jsonl).with_naming(FieldNaming::Snake);
        let output = Renderer::with_config(config).render(&[result()]);

        assert!(output.contains("\"site_name\""));
        assert!(output.contains("\"favicon_location\""));
        assert!(!output.contains("faviconLocation"));
    }

    #[test]
    fn test_output_format_parse() {
        assert_eq!("jsonl".parse::<OutputFormat>().unwrap(), OutputFormat::Jsonl);
        assert_eq!("json".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert_eq!("md".parse::<OutputFormat>().unwrap(), OutputFormat::Markdown);
        assert_eq!("MARKDOWN".parse::<OutputFormat>().unwrap(), OutputFormat::Markdown);
        assert_eq!("raw".parse::<OutputFormat>().unwrap(), OutputFormat::Raw);
    }

    #[test]
    fn test_output_format_parse_invalid() {
        let result = "yaml".parse::<OutputFormat>();
        assert!(result.unwrap_err().contains("Unknown format"));
    }

    #[test]
    fn test_render_config_default() {
        let config = RenderConfig::default();
        assert_eq!(config.format, OutputFormat::Jsonl);
        assert!(!config.pretty);
        assert_eq!(config.naming, FieldNaming::Camel);
    }

    #[test]
    fn test_render_jsonl_pretty() {
        let config = RenderConfig::new(OutputFormat::Jsonl).with_pretty(true);
        let output = Renderer::with_config(config).render(&[pair(), pair()]);

        assert!(output.contains("\n  \"url\""));
        assert!(output.contains("}\n\n{"));
    }

    #[test]
    fn test_render_markdown_groups_sections() {
        let renderer = Renderer::new(OutputFormat::Markdown);
        let output = renderer.render(&[result(), pair(), result()]);

        assert_eq!(output.matches("## Search Results").count(), 1);
        assert_eq!(output.matches("## Favicons").count(), 1);
        assert!(output.find("## Search Results").unwrap() < output.find("## Favicons").unwrap());
        assert!(output.contains("### [Example](https://example.com)"));
        assert!(output.contains("example.com · score 0.87 · published 2023-01-01"));
        assert!(output.contains("> An example site"));
        assert!(output.contains("- `https://a.org` -> `https://a.org/icon.png`"));
    }

    #[test]
    fn test_render_markdown_empty() {
        let items: Vec<Record> = Vec::new();
        assert!(Renderer::new(OutputFormat::Markdown).render(&items).is_empty());
    }

    #[test]
    fn test_render_raw() {
        let output = Renderer::new(OutputFormat::Raw).render(&[result(), pair()]);
        assert_eq!(output, "https://example.com\nhttps://a.org");

        let pairs = vec![UrlFaviconPair::new("u", "f")];
        assert_eq!(Renderer::new(OutputFormat::Raw).render(&pairs), "u\tf");
    }

    #[test]
    fn test_render_to_writer() {
        let mut buffer = Vec::new();
        Renderer::new(OutputFormat::Raw)
            .render_to(&[pair()], &mut buffer)
            .unwrap();
        assert_eq!(String::from_utf8(buffer).unwrap(), "https://a.org\n");
    }
}
