//! Normalize - Re-emit records with canonical keys

use anyhow::{anyhow, Context, Result};

use crate::core::input::{read_source, Element, Source};
use crate::core::model::RecordSet;
use crate::core::render::{RenderConfig, Renderer};
use crate::core::schema::KindSelector;
use crate::core::validate::{decode, resolve_kind, ValidateOptions};

/// Decode every element into a typed record, stopping at the first failure
pub fn decode_elements(
    elements: Vec<Element>,
    selector: KindSelector,
    options: ValidateOptions,
) -> Result<RecordSet> {
    let mut records = RecordSet::new();

    for element in elements {
        let position = element.position;
        let value = element
            .value
            .map_err(|message| anyhow!("{}: invalid JSON: {}", position, message))?;

        let kind = resolve_kind(selector, &value);
        let record = decode(kind, value, options)
            .with_context(|| format!("{}: record does not conform", position))?;
        records.push(record);
    }

    Ok(records)
}

/// Run the normalize command
pub fn run_normalize(
    source: &Source,
    selector: KindSelector,
    options: ValidateOptions,
    config: RenderConfig,
) -> Result<()> {
    let elements = read_source(source).with_context(|| format!("Failed to read {}", source))?;
    let records = decode_elements(elements, selector, options)
        .with_context(|| format!("Failed to normalize {}", source))?;

    log::debug!("normalized {} record(s) with {:?} naming", records.len(), config.naming);

    let renderer = Renderer::with_config(config);
    renderer.render_to(&records.items, std::io::stdout().lock())?;

    Ok(())
}
