use crate::analysis::insight::{classify_trend, HIGH_ECO_THRESHOLD};
use crate::models::eco_score::ProductImpact;
use crate::models::history::*;
use std::collections::HashSet;

/// Dedup key: product name plus the exact score bits, with `-0.0` folded into `0.0`.
type LogKey = (String, u64);

fn log_key(product_name: &str, eco_score: f64) -> LogKey {
    let score = if eco_score == 0.0 { 0.0 } else { eco_score };
    (product_name.to_string(), score.to_bits())
}

/// Session-scoped log of products the user chose to count.
///
/// Entries are only ever appended, except by [`ImpactLedger::clear`], which
/// resets the entries and the dedup keys together.
#[derive(Debug, Default, Clone)]
pub struct ImpactLedger {
    entries: Vec<HistoryEntry>,
    seen: HashSet<LogKey>,
}

impl ImpactLedger {
    pub fn new() -> Self {
        Self::default()
    }

    #[allow(clippy::too_many_arguments)]
    pub fn log(
        &mut self,
        product_name: &str,
        category: &str,
        eco_score: f64,
        carbon_kg: f64,
        water_l: f64,
        energy_mj: f64,
        waste_score: f64,
    ) -> LogOutcome {
        if !self.seen.insert(log_key(product_name, eco_score)) {
            log::debug!("{product_name} at {eco_score:.1} already counted");
            return LogOutcome::AlreadyCounted;
        }

        self.entries.push(HistoryEntry {
            product: product_name.to_string(),
            category: category.to_string(),
            eco_score,
            carbon_kg,
            water_l,
            energy_mj,
            waste_score,
            logged_at: chrono::Utc::now().timestamp(),
        });
        LogOutcome::Added
    }

    pub fn log_product(&mut self, product: &ProductImpact) -> LogOutcome {
        self.log(
            &product.name,
            &product.category,
            product.eco_score,
            product.totals.total_carbon_kg,
            product.totals.total_water_l,
            product.totals.total_energy_mj,
            product.totals.total_waste_score,
        )
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.seen.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries_recent_first(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter().rev()
    }

    /// Aggregate metrics, or `None` when nothing has been logged.
    pub fn summary(&self) -> Option<LedgerSummary> {
        if self.entries.is_empty() {
            return None;
        }

        let count = self.entries.len();
        let n = count as f64;
        let total_eco_score: f64 = self.entries.iter().map(|e| e.eco_score).sum();
        let mean = |column: fn(&HistoryEntry) -> f64| self.entries.iter().map(column).sum::<f64>() / n;

        Some(LedgerSummary {
            count,
            mean_eco_score: total_eco_score / n,
            total_eco_score,
            high_eco_count: self
                .entries
                .iter()
                .filter(|e| e.eco_score >= HIGH_ECO_THRESHOLD)
                .count(),
            mean_carbon_kg: mean(|e| e.carbon_kg),
            mean_water_l: mean(|e| e.water_l),
            mean_energy_mj: mean(|e| e.energy_mj),
            mean_waste_score: mean(|e| e.waste_score),
        })
    }

    /// First-to-last score movement; needs at least two entries.
    pub fn trend(&self) -> Option<Trend> {
        let (first, last) = match self.entries.as_slice() {
            [first, .., last] => (first, last),
            _ => return None,
        };

        let delta = last.eco_score - first.eco_score;
        Some(Trend {
            first_score: first.eco_score,
            last_score: last.eco_score,
            delta,
            direction: classify_trend(delta),
        })
    }

    /// Side-by-side rows for the selected products, each impact column scaled by
    /// its max across the selection. Needs at least two distinct logged products.
    pub fn compare(&self, products: &[&str]) -> Option<Vec<ComparisonRow>> {
        let selected: Vec<&HistoryEntry> = self
            .entries
            .iter()
            .filter(|e| products.contains(&e.product.as_str()))
            .collect();

        let distinct: HashSet<&str> = selected.iter().map(|e| e.product.as_str()).collect();
        if distinct.len() < 2 {
            return None;
        }

        let max_of = |column: fn(&HistoryEntry) -> f64| {
            selected.iter().map(|&e| column(e)).fold(0.0_f64, f64::max)
        };
        let scale = |value: f64, max: f64| if max > 0.0 { value / max } else { 0.0 };

        let max_carbon = max_of(|e| e.carbon_kg);
        let max_water = max_of(|e| e.water_l);
        let max_energy = max_of(|e| e.energy_mj);
        let max_waste = max_of(|e| e.waste_score);

        Some(
            selected
                .into_iter()
                .map(|e| ComparisonRow {
                    product: e.product.clone(),
                    carbon: scale(e.carbon_kg, max_carbon),
                    water: scale(e.water_l, max_water),
                    energy: scale(e.energy_mj, max_energy),
                    waste: scale(e.waste_score, max_waste),
                })
                .collect(),
        )
    }
}
