pub mod interactive;
pub mod render;

use crate::commands::scoring::{get_alternatives, load_catalog};
use crate::commands::settings::{
    load_effective_settings, save_settings, EffectiveSettings, OutputFormat, DEFAULT_SETTINGS_FILE,
};
use clap::{Parser, Subcommand};
use serde_json::Value;
use std::io::{BufRead, Write};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "ecolens", version, about = "Score products by their material footprint")]
pub struct Cli {
    /// Settings file (JSON)
    #[arg(long, global = true, default_value = DEFAULT_SETTINGS_FILE)]
    pub settings: PathBuf,

    /// Product table, overriding the settings file
    #[arg(long, global = true)]
    pub products: Option<PathBuf>,

    /// Material table, overriding the settings file
    #[arg(long, global = true)]
    pub materials: Option<PathBuf>,

    /// Emit JSON instead of text
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show the eco score and impact breakdown of one product
    Score { name: String },
    /// Rank greener products in the same category
    Alternatives {
        name: String,
        #[arg(long)]
        limit: Option<usize>,
    },
    /// List scored products, optionally for one category
    List {
        #[arg(long)]
        category: Option<String>,
    },
    /// Interactive session with an impact ledger
    Session,
    /// Show settings, or update them with key=value pairs
    Settings {
        #[arg(long = "set", value_name = "KEY=VALUE")]
        set: Vec<String>,
    },
}

impl Cli {
    fn effective_settings(&self) -> Result<EffectiveSettings, String> {
        let mut settings = load_effective_settings(&self.settings)?;
        if let Some(products) = &self.products {
            settings.product_table = products.clone();
        }
        if let Some(materials) = &self.materials {
            settings.material_table = materials.clone();
        }
        if self.json {
            settings.output_format = OutputFormat::Json;
        }
        Ok(settings)
    }
}

/// Run one CLI invocation against the given input and output streams.
pub fn execute<R: BufRead, W: Write>(cli: &Cli, input: R, out: &mut W) -> Result<(), String> {
    if let Command::Settings { set } = &cli.command {
        return run_settings(cli, set, out);
    }

    let settings = cli.effective_settings()?;
    let catalog = load_catalog(&settings)?;
    if catalog.unmatched_count > 0 {
        log::warn!(
            "{} products matched no known material and score as zero footprint",
            catalog.unmatched_count
        );
    }
    let json = settings.output_format == OutputFormat::Json;

    match &cli.command {
        Command::Score { name } => {
            let product = catalog
                .get(name)
                .ok_or_else(|| format!("Product not found: {name}"))?;
            if json {
                render::write_json(out, product)
            } else {
                render::write_product(out, product)
            }
        }
        Command::Alternatives { name, limit } => {
            let limit = limit.unwrap_or(settings.alternatives_limit);
            let alternatives = get_alternatives(&catalog, name, Some(limit))
                .ok_or_else(|| format!("Product not found: {name}"))?;
            if json {
                render::write_json(out, &alternatives)
            } else {
                let category = catalog.get(name).map(|p| p.category.as_str()).unwrap_or_default();
                render::write_alternatives(out, name, category, &alternatives)
            }
        }
        Command::List { category } => {
            let products: Vec<_> = match category {
                Some(category) => catalog.in_category(category).collect(),
                None => catalog.products.iter().collect(),
            };
            if json {
                render::write_json(out, &products)
            } else {
                render::write_product_list(out, &catalog, &products)
            }
        }
        Command::Session => interactive::run_session(&catalog, &settings, input, out),
        Command::Settings { .. } => Ok(()),
    }
}

fn run_settings<W: Write>(cli: &Cli, pairs: &[String], out: &mut W) -> Result<(), String> {
    let current = if pairs.is_empty() {
        crate::commands::settings::get_settings(&cli.settings)?
    } else {
        let mut update = serde_json::Map::new();
        for pair in pairs {
            let (key, raw) = pair
                .split_once('=')
                .ok_or_else(|| format!("Expected KEY=VALUE, got '{pair}'"))?;
            let value = serde_json::from_str::<Value>(raw).unwrap_or_else(|_| Value::String(raw.to_string()));
            update.insert(key.trim().to_string(), value);
        }
        save_settings(&cli.settings, Value::Object(update))?
    };
    render::write_json(out, &current)
}
