use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub product: String,
    pub category: String,
    pub eco_score: f64,
    pub carbon_kg: f64,
    pub water_l: f64,
    pub energy_mj: f64,
    pub waste_score: f64,
    pub logged_at: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogOutcome {
    Added,
    AlreadyCounted,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerSummary {
    pub count: usize,
    pub mean_eco_score: f64,
    pub total_eco_score: f64,
    pub high_eco_count: usize,
    pub mean_carbon_kg: f64,
    pub mean_water_l: f64,
    pub mean_energy_mj: f64,
    pub mean_waste_score: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendDirection {
    Improving,
    Declining,
    Steady,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Trend {
    pub first_score: f64,
    pub last_score: f64,
    pub delta: f64,
    pub direction: TrendDirection,
}

/// One row of the side-by-side comparison, each column scaled by its max across the selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonRow {
    pub product: String,
    pub carbon: f64,
    pub water: f64,
    pub energy: f64,
    pub waste: f64,
}
