//! Favicons - Project records onto url/favicon pairs

use anyhow::{Context, Result};
use std::collections::HashSet;

use crate::commands::normalize::decode_elements;
use crate::core::input::{read_source, Source};
use crate::core::model::{RecordSet, UrlFaviconPair};
use crate::core::render::{RenderConfig, Renderer};
use crate::core::schema::KindSelector;
use crate::core::validate::ValidateOptions;

/// Url/favicon pair of every record, in input order.
///
/// With `unique`, only the first pair seen for each URL is kept.
pub fn project(records: &RecordSet, unique: bool) -> Vec<UrlFaviconPair> {
    let mut seen = HashSet::new();

    records
        .iter()
        .map(|record| record.favicon_pair())
        .filter(|pair| !unique || seen.insert(pair.url.clone()))
        .collect()
}

/// Run the favicons command
pub fn run_favicons(
    source: &Source,
    selector: KindSelector,
    options: ValidateOptions,
    unique: bool,
    config: RenderConfig,
) -> Result<()> {
    let elements = read_source(source).with_context(|| format!("Failed to read {}", source))?;
    let records = decode_elements(elements, selector, options)
        .with_context(|| format!("Failed to decode {}", source))?;

    let pairs = project(&records, unique);
    log::debug!(
        "projected {} record(s) onto {} favicon pair(s)",
        records.len(),
        pairs.len()
    );

    let renderer = Renderer::with_config(config);
    renderer.render_to(&pairs, std::io::stdout().lock())?;

    Ok(())
}
