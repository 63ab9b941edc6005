use crate::models::eco_score::{Catalog, ProductImpact};
use crate::models::history::LedgerSummary;
use serde::{Deserialize, Serialize};

/// Language-assistant backend. Implementations own transport and credentials.
pub trait Assistant {
    fn ask(&self, context: &str, question: &str) -> Result<String, String>;
}

/// Image-to-product-name backend (OCR, barcode lookup, ...).
pub trait ProductRecognizer {
    fn recognize(&self, image: &[u8]) -> Result<Recognition, String>;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recognition {
    pub name: String,
    pub confidence: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Identification<'a> {
    Matched(&'a ProductImpact),
    LowConfidence(Recognition),
    NotInCatalog(Recognition),
}

/// Run the recognizer and resolve its answer against the catalog.
pub fn identify_product<'a>(
    recognizer: &dyn ProductRecognizer,
    catalog: &'a Catalog,
    image: &[u8],
    min_confidence: f64,
) -> Result<Identification<'a>, String> {
    let recognition = recognizer
        .recognize(image)
        .map_err(|e| format!("Product recognition failed: {e}"))?;

    if recognition.confidence < min_confidence {
        log::info!(
            "recognized '{}' at {:.2}, below the {:.2} minimum",
            recognition.name,
            recognition.confidence,
            min_confidence
        );
        return Ok(Identification::LowConfidence(recognition));
    }

    match catalog.get(recognition.name.trim()) {
        Some(product) => Ok(Identification::Matched(product)),
        None => Ok(Identification::NotInCatalog(recognition)),
    }
}

/// Plain-text grounding passed to the assistant alongside the question.
pub fn build_assistant_context(
    product: Option<&ProductImpact>,
    history: Option<&LedgerSummary>,
) -> String {
    let mut lines = vec![
        "You help shoppers judge the environmental impact of personal-care products.".to_string(),
        "Eco scores run 0-100; higher is better.".to_string(),
    ];

    if let Some(p) = product {
        lines.push(format!(
            "Product: {} ({}), eco score {:.1}. Carbon {:.2} kg, water {:.1} L, energy {:.1} MJ, waste {:.1}/5.",
            p.name,
            p.category,
            p.eco_score,
            p.totals.total_carbon_kg,
            p.totals.total_water_l,
            p.totals.total_energy_mj,
            p.totals.total_waste_score
        ));
        let flags = p.flags.labels();
        if !flags.is_empty() {
            lines.push(format!("Contains: {}.", flags.join(", ")));
        }
    }

    if let Some(h) = history {
        lines.push(format!(
            "The user has logged {} products with a mean eco score of {:.1}.",
            h.count, h.mean_eco_score
        ));
    }

    lines.join("\n")
}
