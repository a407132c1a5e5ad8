//! CLI module - Command-line interface definitions and handlers

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use openengine_records::commands;
use openengine_records::core::input::Source;
use openengine_records::core::naming::FieldNaming;
use openengine_records::core::render::{OutputFormat, RenderConfig};
use openengine_records::core::schema::KindSelector;
use openengine_records::core::validate::ValidateOptions;

/// oerec - check, normalize and project OpenEngine search records.
#[derive(Parser, Debug)]
#[command(name = "oerec")]
#[command(
    author,
    version,
    about,
    long_about = r#"oerec works on documents of OpenEngine records: search results and
url/favicon pairs.

A document is a JSON array, a single JSON object, or JSON Lines. Records
use camelCase keys; the legacy snake_case spelling (favicon_location,
site_name) is accepted on input.

Output formats:
- jsonl: one JSON object per line (default)
- json: a single JSON array
- md: human-friendly Markdown
- raw: one plain line per item

Examples:
    oerec check results.jsonl
    oerec normalize legacy.json --naming snake
    oerec favicons results.json --unique
    oerec schema --kind result --format md
"#
)]
pub struct Cli {
    /// Output format (jsonl/json/md/raw).
    #[arg(
        long,
        global = true,
        default_value = "jsonl",
        env = "OEREC_FORMAT",
        value_name = "FORMAT",
        long_help = "Select the output format.\n\n\
Supported values:\n\
- jsonl (default)\n\
- json\n\
- md (markdown)\n\
- raw"
    )]
    pub format: String,

    /// Key spelling for emitted records (camel/snake).
    #[arg(
        long,
        global = true,
        default_value = "camel",
        env = "OEREC_NAMING",
        value_name = "NAMING",
        long_help = "Key spelling for emitted records.\n\n\
- camel (default): siteName, faviconLocation\n\
- snake: site_name, favicon_location\n\n\
Input always accepts both spellings."
    )]
    pub naming: String,

    /// Pretty-print JSON/JSONL output with indentation.
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Quiet mode (errors only on stderr).
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Verbose mode (more diagnostics on stderr).
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Check that every record conforms to its shape.
    #[command(
        long_about = "Check every element of a document against the record shape and emit one\n\
report per element with its violations.\n\n\
Exits with a non-zero status when any element fails.\n\n\
Examples:\n\
  oerec check results.jsonl\n\
  oerec check pairs.json --kind pair\n\
  cat results.json | oerec check --format md\n"
    )]
    Check {
        /// Document to read (`-` for stdin).
        #[arg(value_name = "FILE", default_value = "-")]
        file: PathBuf,

        /// Record kind to check against (auto/result/pair).
        #[arg(long, default_value = "auto", value_name = "KIND")]
        kind: String,

        /// Do not report keys the record kind does not declare.
        #[arg(long)]
        allow_unknown: bool,
    },

    /// Re-emit records with canonical keys.
    #[command(
        long_about = "Decode every record and emit it again with canonical keys (or snake_case\n\
keys with --naming snake). Fails on the first record that does not conform.\n\n\
Examples:\n\
  oerec normalize legacy.jsonl\n\
  oerec normalize results.json --naming snake --format json\n"
    )]
    Normalize {
        /// Document to read (`-` for stdin).
        #[arg(value_name = "FILE", default_value = "-")]
        file: PathBuf,

        /// Record kind of the elements (auto/result/pair).
        #[arg(long, default_value = "auto", value_name = "KIND")]
        kind: String,

        /// Drop keys the record kind does not declare instead of failing.
        #[arg(long)]
        allow_unknown: bool,
    },

    /// Project records onto url/favicon pairs.
    #[command(
        long_about = "Decode every record and emit its url/favicon pair, in input order.\n\n\
Examples:\n\
  oerec favicons results.jsonl\n\
  oerec favicons results.json --unique --format raw\n"
    )]
    Favicons {
        /// Document to read (`-` for stdin).
        #[arg(value_name = "FILE", default_value = "-")]
        file: PathBuf,

        /// Record kind of the elements (auto/result/pair).
        #[arg(long, default_value = "auto", value_name = "KIND")]
        kind: String,

        /// Drop keys the record kind does not declare instead of failing.
        #[arg(long)]
        allow_unknown: bool,

        /// Keep only the first pair for each URL.
        #[arg(long)]
        unique: bool,
    },

    /// Print the declared fields of each record kind.
    Schema {
        /// Record kind to describe (auto for all).
        #[arg(long, default_value = "auto", value_name = "KIND")]
        kind: String,
    },
}

fn parse_kind(kind: &str) -> Result<KindSelector> {
    kind.parse::<KindSelector>()
        .map_err(anyhow::Error::msg)
        .context("Invalid --kind")
}

/// Run the CLI with parsed arguments
pub fn run(cli: Cli) -> Result<()> {
    let format: OutputFormat = cli
        .format
        .parse()
        .map_err(anyhow::Error::msg)
        .context("Invalid --format")?;
    let naming: FieldNaming = cli
        .naming
        .parse()
        .map_err(anyhow::Error::msg)
        .context("Invalid --naming")?;
    let render_config = RenderConfig::new(format)
        .with_pretty(cli.pretty)
        .with_naming(naming);

    match cli.command {
        Commands::Check {
            file,
            kind,
            allow_unknown,
        } => commands::check::run_check(
            &Source::from_arg(&file),
            parse_kind(&kind)?,
            ValidateOptions { allow_unknown },
            render_config,
        ),

        Commands::Normalize {
            file,
            kind,
            allow_unknown,
        } => commands::normalize::run_normalize(
            &Source::from_arg(&file),
            parse_kind(&kind)?,
            ValidateOptions { allow_unknown },
            render_config,
        ),

        Commands::Favicons {
            file,
            kind,
            allow_unknown,
            unique,
        } => commands::favicons::run_favicons(
            &Source::from_arg(&file),
            parse_kind(&kind)?,
            ValidateOptions { allow_unknown },
            unique,
            render_config,
        ),

        Commands::Schema { kind } => {
            commands::schema::run_schema(parse_kind(&kind)?, render_config)
        }
    }
}
