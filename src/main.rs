use anyhow::{bail, Context};
use clap::Parser;
use patternomatic::annotation::{Annotator, SimpleAnnotator};
use patternomatic::config::{AppConfig, ConfigManager};
use patternomatic::engines::generation::PatternFinder;
use patternomatic::types::Sample;
use std::path::PathBuf;

/// Evolve token-matching patterns that describe a small corpus
#[derive(Parser, Debug)]
#[command(name = "patternomatic")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Sentence to learn from, annotated with the built-in tokenizer (repeatable)
    #[arg(short, long = "sample")]
    samples: Vec<String>,

    /// JSON file holding pre-annotated samples
    #[arg(long)]
    corpus: Option<PathBuf>,

    /// TOML or JSON configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Write the effective configuration to this file
    #[arg(long)]
    save_config: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config = AppConfig::load(args.config.as_deref()).context("loading configuration")?;
    let manager = ConfigManager::new();
    manager.update(|current| *current = config)?;
    if let Some(path) = &args.save_config {
        manager
            .save_to_file(path)
            .with_context(|| format!("saving configuration to {}", path.display()))?;
    }

    let mut samples: Vec<Sample> = match &args.corpus {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("reading corpus {}", path.display()))?;
            serde_json::from_str(&raw).context("parsing corpus JSON")?
        }
        None => Vec::new(),
    };
    samples.extend(SimpleAnnotator::new().annotate_all(&args.samples));

    if samples.is_empty() {
        bail!("no samples given, pass --sample or --corpus");
    }

    let elites = PatternFinder::new(manager.get()).find(&samples)?;

    log::info!("Best individuals for this execution:");
    println!("{}", serde_json::to_string_pretty(&elites)?);
    Ok(())
}
