use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use compatx_core::{CompatibilityEdge, ScoringConfig, SpecValue};
use compatx_scoring::{CompatibilityEngine, NewPartQuery, DEFAULT_TOP_K};
use compatx_store::{ingest_catalog, parse_catalog, HashEmbedder, MemoryGraph};

/// Explainable part-compatibility scoring over catalog graphs
#[derive(Parser, Debug)]
#[command(name = "compatx")]
#[command(about = "Explainable part-compatibility scoring", long_about = None)]
struct Args {
    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compute the symmetric compatibility relation for a product
    Compute {
        /// Path to a JSON catalog file
        #[arg(short, long)]
        catalog: PathBuf,

        /// Product to compute; defaults to the catalog file's product
        #[arg(short, long)]
        product: Option<String>,

        /// Write the computed edges as JSON to this path
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Rank a new part described in free text against a product's parts
    Rank {
        /// Path to a JSON catalog file
        #[arg(short, long)]
        catalog: PathBuf,

        /// Free-text description of the new part
        #[arg(short, long)]
        description: String,

        /// Category of the new part
        #[arg(long)]
        category: Option<String>,

        /// Assembly the new part is expected to belong to
        #[arg(long)]
        assembly_hint: Option<String>,

        /// Structured spec, repeatable: key=value or key=value:unit
        #[arg(long = "spec", value_name = "KEY=VALUE[:UNIT]")]
        specs: Vec<String>,

        /// Number of results to return
        #[arg(long, default_value_t = DEFAULT_TOP_K)]
        top_k: usize,
    },
}

#[derive(Serialize)]
struct EdgeDump<'a> {
    from: &'a str,
    to: &'a str,
    #[serde(flatten)]
    edge: &'a CompatibilityEdge,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let log_level = match args.log_level.as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match args.command {
        Command::Compute {
            catalog,
            product,
            out,
        } => run_compute(&catalog, product.as_deref(), out.as_deref()),
        Command::Rank {
            catalog,
            description,
            category,
            assembly_hint,
            specs,
            top_k,
        } => run_rank(&catalog, description, category, assembly_hint, &specs, top_k),
    }
}

fn load_engine(
    catalog_path: &std::path::Path,
) -> anyhow::Result<(Arc<MemoryGraph>, CompatibilityEngine, String)> {
    let catalog = parse_catalog(catalog_path)
        .with_context(|| format!("failed to load catalog {:?}", catalog_path))?;
    let product = catalog.product.name.clone();

    let store = Arc::new(MemoryGraph::new());
    let embedder = Arc::new(HashEmbedder::default());
    let config = ScoringConfig::default();

    ingest_catalog(&store, embedder.as_ref(), &config.assembly_map, &catalog)?;

    let engine = CompatibilityEngine::with_config(store.clone(), embedder, config)?;
    Ok((store, engine, product))
}

fn run_compute(
    catalog_path: &std::path::Path,
    product: Option<&str>,
    out: Option<&std::path::Path>,
) -> anyhow::Result<()> {
    let (store, engine, catalog_product) = load_engine(catalog_path)?;
    let product = product.unwrap_or(&catalog_product);

    let report = engine.compute_compatibility_for_product(product)?;
    info!(
        "Product '{}': {} parts, {} pairs computed",
        product, report.parts, report.pairs
    );

    if let Some(path) = out {
        let edges = store.edges();
        let dump: Vec<EdgeDump<'_>> = edges
            .iter()
            .map(|(from, to, edge)| EdgeDump { from, to, edge })
            .collect();
        let file = std::fs::File::create(path)
            .with_context(|| format!("failed to create {:?}", path))?;
        serde_json::to_writer_pretty(file, &dump)?;
        info!("Wrote {} directed edges to {:?}", dump.len(), path);
    }

    Ok(())
}

fn run_rank(
    catalog_path: &std::path::Path,
    description: String,
    category: Option<String>,
    assembly_hint: Option<String>,
    specs: &[String],
    top_k: usize,
) -> anyhow::Result<()> {
    let (_store, engine, product) = load_engine(catalog_path)?;

    let mut query = NewPartQuery::new(description);
    query.category = category;
    query.assembly_hint = assembly_hint;
    for raw in specs {
        let (key, value) = parse_spec(raw)?;
        query.specs.insert(key, value);
    }

    let results = engine.compute_compatibility_for_new_part(&product, &query, top_k)?;
    println!("{}", serde_json::to_string_pretty(&results)?);
    Ok(())
}

/// Parse a `key=value` or `key=value:unit` spec argument. Values that parse
/// as numbers are compared numerically by the engine.
fn parse_spec(raw: &str) -> anyhow::Result<(String, SpecValue)> {
    let (key, rest) = raw
        .split_once('=')
        .with_context(|| format!("spec '{}' is not of the form key=value[:unit]", raw))?;
    anyhow::ensure!(!key.is_empty(), "spec '{}' has an empty key", raw);

    let (value_text, unit) = match rest.split_once(':') {
        Some((value, unit)) => (value, unit),
        None => (rest, ""),
    };

    let value = match value_text.parse::<f64>() {
        Ok(number) => serde_json::Number::from_f64(number)
            .map(serde_json::Value::Number)
            .unwrap_or_else(|| serde_json::Value::String(value_text.to_string())),
        Err(_) => serde_json::Value::String(value_text.to_string()),
    };

    Ok((key.to_string(), SpecValue::new(value, unit)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_spec_numeric_with_unit() {
        let (key, spec) = parse_spec("diameter=16:mm").unwrap();
        assert_eq!(key, "diameter");
        assert_eq!(spec.as_number(), Some(16.0));
        assert_eq!(spec.unit, "mm");
    }

    #[test]
    fn test_parse_spec_categorical_without_unit() {
        let (key, spec) = parse_spec("material=steel").unwrap();
        assert_eq!(key, "material");
        assert_eq!(spec.as_number(), None);
        assert_eq!(spec.unit, "");
    }

    #[test]
    fn test_parse_spec_rejects_bad_input() {
        assert!(parse_spec("no-equals-sign").is_err());
        assert!(parse_spec("=16").is_err());
    }
}
