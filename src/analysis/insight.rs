use crate::models::history::{LedgerSummary, TrendDirection};
use serde::Serialize;

/// Scores at or above this count as a high-eco choice.
pub const HIGH_ECO_THRESHOLD: f64 = 80.0;
const SOLID_THRESHOLD: f64 = 65.0;
const MODERATE_THRESHOLD: f64 = 50.0;

/// Score swing between first and last logged product that counts as a trend.
pub const TREND_THRESHOLD: f64 = 5.0;

const PHONE_CHARGES_PER_KG_CO2: f64 = 120.0;
const LITRES_PER_QUICK_SHOWER: f64 = 50.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreVerdict {
    Excellent,
    Solid,
    Moderate,
    Heavy,
}

impl ScoreVerdict {
    pub fn for_score(eco_score: f64) -> Self {
        if eco_score >= HIGH_ECO_THRESHOLD {
            ScoreVerdict::Excellent
        } else if eco_score >= SOLID_THRESHOLD {
            ScoreVerdict::Solid
        } else if eco_score >= MODERATE_THRESHOLD {
            ScoreVerdict::Moderate
        } else {
            ScoreVerdict::Heavy
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            ScoreVerdict::Excellent => "Excellent choice, nature approves",
            ScoreVerdict::Solid => "Solid pick, better than average",
            ScoreVerdict::Moderate => "Moderate impact, greener alternatives exist",
            ScoreVerdict::Heavy => "Heavy footprint, consider switching",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LedgerStatus {
    EcoHero,
    ConsciousConsumer,
    Improving,
    HighImpact,
}

impl LedgerStatus {
    pub fn for_mean(mean_eco_score: f64) -> Self {
        match ScoreVerdict::for_score(mean_eco_score) {
            ScoreVerdict::Excellent => LedgerStatus::EcoHero,
            ScoreVerdict::Solid => LedgerStatus::ConsciousConsumer,
            ScoreVerdict::Moderate => LedgerStatus::Improving,
            ScoreVerdict::Heavy => LedgerStatus::HighImpact,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            LedgerStatus::EcoHero => "Eco Hero",
            LedgerStatus::ConsciousConsumer => "Conscious Consumer",
            LedgerStatus::Improving => "Improving",
            LedgerStatus::HighImpact => "High Impact",
        }
    }
}

pub fn classify_trend(delta: f64) -> TrendDirection {
    if delta > TREND_THRESHOLD {
        TrendDirection::Improving
    } else if delta < -TREND_THRESHOLD {
        TrendDirection::Declining
    } else {
        TrendDirection::Steady
    }
}

/// Mean per-product footprint restated in everyday units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HumanImpact {
    pub carbon_kg: f64,
    pub phone_charges: u64,
    pub water_l: f64,
    pub quick_showers: u64,
    pub energy_mj: f64,
}

pub fn translate_impact(summary: &LedgerSummary) -> HumanImpact {
    HumanImpact {
        carbon_kg: summary.mean_carbon_kg,
        phone_charges: (summary.mean_carbon_kg * PHONE_CHARGES_PER_KG_CO2).max(0.0) as u64,
        water_l: summary.mean_water_l,
        quick_showers: (summary.mean_water_l / LITRES_PER_QUICK_SHOWER).max(0.0) as u64,
        energy_mj: summary.mean_energy_mj,
    }
}
