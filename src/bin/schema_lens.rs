//! schema-lens: Render JSON-LD structured data as a collapsible tree
//!
//! Usage:
//!   # A JSON array of blobs (strings or objects), or a single JSON document
//!   schema-lens markup.json
//!
//!   # One blob per line, all sections open
//!   schema-lens --ndjson --all-sections blobs.jsonl
//!
//!   # Scan a saved page and expand a nested node of the second record
//!   curl -s https://example.com | schema-lens --html --section 2 --expand 2:offers/0/seller
//!
//!   # Machine-readable line model
//!   schema-lens --json markup.json

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use log::{debug, warn};
use mimalloc::MiMalloc;
use schema_lens::extract::{script_blobs, RawBlob};
use schema_lens::tree::{write_text, ExpandPolicy, RecordNodePath, RenderConfig};
use schema_lens::view::{Rendered, SchemaView, SectionMode, ViewConfig};
use serde_json::Value;
use std::fs::File;
use std::io::{stdin, stdout, BufReader, Read, Write};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum PolicyArg {
    /// Top-level branches expanded, deeper ones collapsed
    RootExpanded,
    /// Every branch collapsed
    Collapsed,
    /// Every branch expanded
    Expanded,
}

impl From<PolicyArg> for ExpandPolicy {
    fn from(arg: PolicyArg) -> Self {
        match arg {
            PolicyArg::RootExpanded => ExpandPolicy::RootExpanded,
            PolicyArg::Collapsed => ExpandPolicy::AllCollapsed,
            PolicyArg::Expanded => ExpandPolicy::AllExpanded,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "schema-lens")]
#[command(about = "Render JSON-LD structured data as a collapsible tree", long_about = None)]
struct Args {
    /// Input file (use stdin if omitted)
    #[arg(value_name = "FILE")]
    input: Option<String>,

    /// Treat each non-empty line as one blob
    #[arg(long, conflicts_with = "html")]
    ndjson: bool,

    /// Scan HTML for <script type="application/ld+json"> tags
    #[arg(long)]
    html: bool,

    /// Initial expand state of branches
    #[arg(long, value_enum, default_value_t = PolicyArg::RootExpanded)]
    policy: PolicyArg,

    /// Toggle a branch node, e.g. 1:offers/0/seller (repeatable)
    #[arg(long = "expand", value_name = "RECORD:PATH")]
    toggles: Vec<RecordNodePath>,

    /// Open section N (1-based) instead of the first
    #[arg(long, value_name = "N", conflicts_with = "all_sections")]
    section: Option<usize>,

    /// Open every section
    #[arg(long)]
    all_sections: bool,

    /// Print the rendered line model as JSON
    #[arg(long)]
    json: bool,

    /// Compact JSON output (no pretty-printing)
    #[arg(long, requires = "json")]
    compact: bool,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .format_timestamp(None)
        .init();

    let args = Args::parse();

    let content = read_input(args.input.as_deref())?;
    let blobs = collect_blobs(&content, args.ndjson, args.html)?;
    if blobs.is_empty() {
        warn!("No structured data found in input");
    }

    let config = ViewConfig {
        render: RenderConfig {
            expand_policy: args.policy.into(),
            ..RenderConfig::default()
        },
        ..ViewConfig::default()
    };
    let mut view = SchemaView::load(blobs, config);

    if let Some(err) = view.error() {
        debug!("{}", err);
    } else {
        apply_sections(&mut view, args.section, args.all_sections)?;

        for toggle in &args.toggles {
            if view.toggle_node(toggle.record, &toggle.path).is_none() {
                warn!("{}:{} is not a branch node", toggle.record + 1, toggle.path);
            }
        }
    }

    let rendered = view.render();
    let mut out = stdout().lock();

    if args.json {
        let output = if args.compact {
            serde_json::to_string(&rendered)?
        } else {
            serde_json::to_string_pretty(&rendered)?
        };
        writeln!(out, "{}", output)?;
    } else if let Rendered::Sections(lines) = &rendered {
        write_text(lines, &mut out).context("Failed to write output")?;
    }
    out.flush()?;

    if let Rendered::Error(message) = rendered {
        eprintln!("{}", message);
        std::process::exit(1);
    }

    Ok(())
}

fn read_input(path: Option<&str>) -> Result<Vec<u8>> {
    let mut reader: Box<dyn Read> = if let Some(file_path) = path {
        Box::new(BufReader::new(
            File::open(file_path).with_context(|| format!("Failed to open file: {}", file_path))?,
        ))
    } else {
        Box::new(BufReader::new(stdin()))
    };

    let mut content = Vec::new();
    reader.read_to_end(&mut content).context("Failed to read input")?;
    Ok(content)
}

/// Split raw input into blobs according to the input mode
fn collect_blobs(content: &[u8], ndjson: bool, html: bool) -> Result<Vec<RawBlob>> {
    let text = String::from_utf8_lossy(content);

    if html {
        return Ok(script_blobs(&text));
    }

    if ndjson {
        // Lines stay unparsed so a bad line rejects the whole batch
        return Ok(text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(RawBlob::from)
            .collect());
    }

    if text.trim().is_empty() {
        return Ok(Vec::new());
    }

    // Try SIMD parsing first, falling back to serde_json
    let mut buf = content.to_vec();
    let parsed = match simd_json::serde::from_slice::<Value>(&mut buf) {
        Ok(value) => Some(value),
        Err(_) => serde_json::from_slice::<Value>(content).ok(),
    };

    let blobs = match parsed {
        Some(Value::Array(items)) => items
            .into_iter()
            .map(serde_json::from_value::<RawBlob>)
            .collect::<Result<Vec<_>, _>>()?,
        Some(value) => vec![serde_json::from_value::<RawBlob>(value)?],
        // Hand the text to the extractor so it is rejected like any other bad blob
        None => vec![RawBlob::from(text.into_owned())],
    };

    Ok(blobs)
}

fn apply_sections(view: &mut SchemaView, section: Option<usize>, all_sections: bool) -> Result<()> {
    if all_sections {
        view.set_section_mode(SectionMode::AllOpen);
        return Ok(());
    }

    if let Some(n) = section {
        let count = view.records().len();
        if n == 0 || n > count {
            bail!("section {} out of range (found {} records)", n, count);
        }
        if view.open_section() != Some(n - 1) {
            view.toggle_section(n - 1);
        }
    }

    Ok(())
}
