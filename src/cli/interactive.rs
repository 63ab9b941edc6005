use crate::cli::render;
use crate::commands::scoring::get_alternatives;
use crate::commands::session::Session;
use crate::commands::settings::{EffectiveSettings, OutputFormat};
use crate::models::eco_score::Catalog;
use crate::models::history::{HistoryEntry, LogOutcome};
use std::io::{BufRead, Write};

const HELP: &str = "\
commands:
  score <product>          show a product's eco score
  log <product>            add a product to your impact history
  alts <product>           greener products in the same category
  history                  your impact summary, most recent first
  compare <a> | <b> [...]  compare logged products side by side
  clear                    empty your impact history
  help                     this text
  quit                     leave the session";

/// Line-oriented session loop; one `Session` lives for the duration of the loop.
pub fn run_session<R: BufRead, W: Write>(
    catalog: &Catalog,
    settings: &EffectiveSettings,
    input: R,
    out: &mut W,
) -> Result<(), String> {
    let mut session = Session::new();
    let json = settings.output_format == OutputFormat::Json;
    log::info!("session {} started with {} products", session.id, catalog.product_count);

    if !json {
        writeln!(out, "EcoLens session. Type 'help' for commands.").map_err(io_err)?;
    }

    for line in input.lines() {
        let line = line.map_err(|e| format!("Failed to read input: {e}"))?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let (command, argument) = match line.split_once(char::is_whitespace) {
            Some((command, rest)) => (command, rest.trim()),
            None => (line, ""),
        };

        match command {
            "quit" | "exit" => break,
            "help" => writeln!(out, "{HELP}").map_err(io_err)?,
            "score" => score(catalog, argument, json, out)?,
            "log" => log_product(&mut session, catalog, argument, out)?,
            "alts" => alternatives(catalog, settings, argument, json, out)?,
            "history" => history(&session, json, out)?,
            "compare" => compare(&session, argument, json, out)?,
            "clear" => {
                session.ledger.clear();
                writeln!(out, "Impact history cleared.").map_err(io_err)?;
            }
            other => writeln!(out, "Unknown command '{other}'. Type 'help'.").map_err(io_err)?,
        }
    }

    log::info!("session {} closed with {} logged products", session.id, session.ledger.len());
    Ok(())
}

fn io_err(e: std::io::Error) -> String {
    format!("Failed to write output: {e}")
}

fn not_found<W: Write>(out: &mut W, name: &str) -> Result<(), String> {
    writeln!(out, "Product not found: {name}").map_err(io_err)
}

fn score<W: Write>(catalog: &Catalog, name: &str, json: bool, out: &mut W) -> Result<(), String> {
    let Some(product) = catalog.get(name) else {
        return not_found(out, name);
    };
    if json {
        render::write_json(out, product)
    } else {
        render::write_product(out, product)
    }
}

fn log_product<W: Write>(
    session: &mut Session,
    catalog: &Catalog,
    name: &str,
    out: &mut W,
) -> Result<(), String> {
    let message = match session.log_product(catalog, name) {
        Some(LogOutcome::Added) => "Added to your impact journey.",
        Some(LogOutcome::AlreadyCounted) => "Already counted; this choice is remembered.",
        None => return not_found(out, name),
    };
    writeln!(out, "{message}").map_err(io_err)
}

fn alternatives<W: Write>(
    catalog: &Catalog,
    settings: &EffectiveSettings,
    name: &str,
    json: bool,
    out: &mut W,
) -> Result<(), String> {
    let Some(alternatives) = get_alternatives(catalog, name, Some(settings.alternatives_limit)) else {
        return not_found(out, name);
    };
    if json {
        return render::write_json(out, &alternatives);
    }
    let category = catalog.get(name).map(|p| p.category.as_str()).unwrap_or_default();
    render::write_alternatives(out, name, category, &alternatives)
}

fn history<W: Write>(session: &Session, json: bool, out: &mut W) -> Result<(), String> {
    let summary = session.ledger.summary();
    let trend = session.ledger.trend();
    let entries: Vec<&HistoryEntry> = session.ledger.entries_recent_first().collect();

    if json {
        return render::write_json(
            out,
            &serde_json::json!({
                "summary": summary,
                "trend": trend,
                "entries": entries,
            }),
        );
    }
    render::write_history(out, summary.as_ref(), trend.as_ref(), &entries)
}

fn compare<W: Write>(session: &Session, argument: &str, json: bool, out: &mut W) -> Result<(), String> {
    let names: Vec<&str> = argument
        .split('|')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .collect();

    let Some(rows) = session.ledger.compare(&names) else {
        return writeln!(out, "Select at least two logged products, separated by '|'.").map_err(io_err);
    };
    if json {
        render::write_json(out, &rows)
    } else {
        render::write_comparison(out, &rows)
    }
}
