use crate::analysis::curated::curated_suggestions;
use crate::analysis::insight::{translate_impact, LedgerStatus, ScoreVerdict, HIGH_ECO_THRESHOLD};
use crate::models::alternative::Alternative;
use crate::models::eco_score::{Catalog, ProductImpact};
use crate::models::history::{ComparisonRow, HistoryEntry, LedgerSummary, Trend, TrendDirection};
use serde::Serialize;
use std::io::Write;

fn io_err(e: std::io::Error) -> String {
    format!("Failed to write output: {e}")
}

pub fn write_json<W: Write, T: Serialize + ?Sized>(out: &mut W, value: &T) -> Result<(), String> {
    let raw = serde_json::to_string_pretty(value).map_err(|e| format!("Failed to serialize output: {e}"))?;
    writeln!(out, "{raw}").map_err(io_err)
}

pub fn write_product<W: Write>(
    out: &mut W,
    product: &ProductImpact,
) -> Result<(), String> {
    let totals = &product.totals;
    writeln!(out, "{} [{}]", product.name, product.category).map_err(io_err)?;
    writeln!(out, "Eco score: {:.1} / 100", product.eco_score).map_err(io_err)?;
    writeln!(
        out,
        "Carbon {:.2} kg | Water {:.0} L | Energy {:.1} MJ | Waste {:.1}",
        totals.total_carbon_kg, totals.total_water_l, totals.total_energy_mj, totals.total_waste_score
    )
    .map_err(io_err)?;

    for (axis, component) in product.components.iter() {
        writeln!(
            out,
            "  {:<7} norm {:.2} x {:.2} -> {:5.1} pts",
            axis, component.normalized, component.weight, component.contribution
        )
        .map_err(io_err)?;
    }

    let flags = product.flags.labels();
    if !flags.is_empty() {
        writeln!(out, "Contains: {}", flags.join(", ")).map_err(io_err)?;
    }
    if totals.matched_materials == 0 {
        writeln!(out, "Warning: no known material data; the score assumes zero footprint").map_err(io_err)?;
    }
    writeln!(out, "{}", ScoreVerdict::for_score(product.eco_score).message()).map_err(io_err)
}

pub fn write_product_list<W: Write>(
    out: &mut W,
    catalog: &Catalog,
    products: &[&ProductImpact],
) -> Result<(), String> {
    if products.is_empty() {
        writeln!(out, "No products.").map_err(io_err)?;
    }
    for product in products {
        writeln!(
            out,
            "{:5.1}  {}  [{}]",
            product.eco_score, product.name, product.category
        )
        .map_err(io_err)?;
    }

    writeln!(
        out,
        "Catalog: {} products | mean eco score {:.1} | {} at {:.0}+ | {} without known materials",
        catalog.product_count,
        catalog.mean_score,
        catalog.high_eco_count,
        HIGH_ECO_THRESHOLD,
        catalog.unmatched_count
    )
    .map_err(io_err)?;
    writeln!(out, "Categories: {}", catalog.categories().join(", ")).map_err(io_err)
}

pub fn write_alternatives<W: Write>(
    out: &mut W,
    reference: &str,
    category: &str,
    alternatives: &[Alternative],
) -> Result<(), String> {
    if alternatives.is_empty() {
        writeln!(out, "{reference} is already the greenest {category} in the catalog.").map_err(io_err)?;
    }
    for (rank, alternative) in alternatives.iter().enumerate() {
        writeln!(
            out,
            "{}. {} ({:.1}, +{:.1}): {}",
            rank + 1,
            alternative.name,
            alternative.eco_score,
            alternative.score_diff,
            alternative.improvement
        )
        .map_err(io_err)?;
    }

    let curated = curated_suggestions(category);
    if !curated.is_empty() {
        writeln!(out, "Also worth a look:").map_err(io_err)?;
        for suggestion in curated {
            writeln!(out, "  - {}: {}", suggestion.name, suggestion.reason).map_err(io_err)?;
        }
    }
    Ok(())
}

pub fn write_history<W: Write>(
    out: &mut W,
    summary: Option<&LedgerSummary>,
    trend: Option<&Trend>,
    entries: &[&HistoryEntry],
) -> Result<(), String> {
    let Some(summary) = summary else {
        return writeln!(out, "No products logged yet.").map_err(io_err);
    };

    writeln!(
        out,
        "Average eco score {:.1} / 100 | Products logged {} | High-eco choices {} | Total {}",
        summary.mean_eco_score, summary.count, summary.high_eco_count, summary.total_eco_score as i64
    )
    .map_err(io_err)?;

    let human = translate_impact(summary);
    writeln!(
        out,
        "Per product: {:.2} kg CO2 (~{} phone charges), {:.1} L water (~{} quick showers), {:.1} MJ energy",
        human.carbon_kg, human.phone_charges, human.water_l, human.quick_showers, human.energy_mj
    )
    .map_err(io_err)?;

    if let Some(trend) = trend {
        let label = match trend.direction {
            TrendDirection::Improving => "getting greener",
            TrendDirection::Declining => "impact increasing",
            TrendDirection::Steady => "steady",
        };
        writeln!(out, "Trend: {label} ({:+.1})", trend.delta).map_err(io_err)?;
    }
    writeln!(out, "Status: {}", LedgerStatus::for_mean(summary.mean_eco_score).label()).map_err(io_err)?;

    for entry in entries {
        writeln!(out, "  {:5.1}  {}  [{}]", entry.eco_score, entry.product, entry.category).map_err(io_err)?;
    }
    Ok(())
}

pub fn write_comparison<W: Write>(out: &mut W, rows: &[ComparisonRow]) -> Result<(), String> {
    writeln!(out, "{:<32} carbon  water energy  waste", "product").map_err(io_err)?;
    for row in rows {
        writeln!(
            out,
            "{:<32} {:6.2} {:6.2} {:6.2} {:6.2}",
            row.product, row.carbon, row.water, row.energy, row.waste
        )
        .map_err(io_err)?;
    }
    Ok(())
}
