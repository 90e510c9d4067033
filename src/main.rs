//! GemForge - gem recipe evaluator
//!
//! Reads recipe strings from the command line (or the settings file), builds
//! each fusion tree, and prints its derived attributes as JSON lines.

mod settings;

use anyhow::{Context, Result};
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use gemforge_combine::{GemPool, LeafCode};
use settings::GemforgeSettings;

const USAGE: &str = "\
Usage: gemforge [OPTIONS] [RECIPE...]

Evaluates each recipe, e.g. '(2y+y)' or '8o', and prints one JSON summary per line.
Without recipes, the recipes listed in the settings file are evaluated.

Options:
  --codes          List the base gem letter codes
  --write-config   Save the current settings to the settings file
  --help           Show this message";

fn init_logging(level: &str) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber).context("Failed to set subscriber")
}

/// Build one recipe in a fresh pool and render its summary.
fn evaluate(recipe: &str, pretty: bool) -> Result<String> {
    let mut pool = GemPool::new();
    let id = pool
        .parse_recipe(recipe)
        .with_context(|| format!("invalid recipe '{recipe}'"))?;
    debug!("built '{}' from {} gems", recipe, pool.len());

    let summary = pool.summary(id)?;
    let json = if pretty {
        serde_json::to_string_pretty(&summary)?
    } else {
        serde_json::to_string(&summary)?
    };
    Ok(json)
}

fn main() -> Result<()> {
    let loaded = GemforgeSettings::read();
    let level = match &loaded {
        Ok(Some(settings)) => settings.logging.level.as_str(),
        _ => "info",
    };
    init_logging(level)?;
    let settings = GemforgeSettings::or_defaults(loaded);

    let mut recipes = Vec::new();
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--help" | "-h" => {
                println!("{USAGE}");
                return Ok(());
            }
            "--codes" => {
                for code in LeafCode::all() {
                    println!("{}\t{}", code, code.color());
                }
                return Ok(());
            }
            "--write-config" => {
                let path = settings.save()?;
                println!("{}", path.display());
                return Ok(());
            }
            other if other.starts_with("--") => {
                anyhow::bail!("Unknown option: {other}\n\n{USAGE}");
            }
            other => recipes.push(other.to_string()),
        }
    }

    if recipes.is_empty() {
        recipes = settings.evaluation.recipes.clone();
    }
    if recipes.is_empty() {
        info!("No recipes given");
        println!("{USAGE}");
        return Ok(());
    }

    for recipe in &recipes {
        println!("{}", evaluate(recipe, settings.evaluation.pretty)?);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn evaluate_prints_canonical_recipe() {
        let json = evaluate("(y+2y)", false).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["recipe"], "(2y+y)");
        assert_eq!(value["cost"], 3);
        assert_eq!(value["spec"], false);
    }

    #[test]
    fn evaluate_reports_bad_recipes() {
        let err = evaluate("(y+", false).unwrap_err();
        assert!(err.to_string().contains("invalid recipe"));
    }
}
