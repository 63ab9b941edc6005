use crate::models::eco_score::{ComponentScore, ScoreComponents};
use crate::models::product::ImpactTotals;

/// Raw-value ceilings; anything at or above a cap takes the full penalty.
pub const CARBON_CAP: f64 = 0.5; // kg CO2e
pub const WATER_CAP: f64 = 10.0; // litres
pub const ENERGY_CAP: f64 = 20.0; // MJ
pub const WASTE_CAP: f64 = 5.0; // max material waste score

pub const CARBON_WEIGHT: f64 = 0.35;
pub const WATER_WEIGHT: f64 = 0.25;
pub const ENERGY_WEIGHT: f64 = 0.25;
pub const WASTE_WEIGHT: f64 = 0.15;

/// Scale a raw total by its cap into [0, 1].
pub fn normalize(raw: f64, cap: f64) -> f64 {
    if cap <= 0.0 || raw.is_nan() {
        return 1.0;
    }
    (raw / cap).clamp(0.0, 1.0)
}

fn component(raw_value: f64, cap: f64, weight: f64) -> ComponentScore {
    let normalized = normalize(raw_value, cap);
    ComponentScore {
        raw_value,
        cap,
        normalized,
        weight,
        contribution: (1.0 - normalized) * weight * 100.0, // display only
    }
}

pub fn score_components(totals: &ImpactTotals) -> ScoreComponents {
    ScoreComponents {
        carbon: component(totals.total_carbon_kg, CARBON_CAP, CARBON_WEIGHT),
        water: component(totals.total_water_l, WATER_CAP, WATER_WEIGHT),
        energy: component(totals.total_energy_mj, ENERGY_CAP, ENERGY_WEIGHT),
        waste: component(totals.total_waste_score, WASTE_CAP, WASTE_WEIGHT),
    }
}

/// Composite 0–100 score, rounded to one decimal place.
///
/// The weighted terms are summed first, then scaled by 100.
pub fn eco_score(components: &ScoreComponents) -> f64 {
    let weighted = (1.0 - components.carbon.normalized) * CARBON_WEIGHT
        + (1.0 - components.water.normalized) * WATER_WEIGHT
        + (1.0 - components.energy.normalized) * ENERGY_WEIGHT
        + (1.0 - components.waste.normalized) * WASTE_WEIGHT;
    round_to_tenth((100.0 * weighted).clamp(0.0, 100.0))
}

/// Round half to even at one decimal.
pub fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round_ties_even() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn totals(carbon: f64, water: f64, energy: f64, waste: f64) -> ImpactTotals {
        ImpactTotals {
            total_carbon_kg: carbon,
            total_water_l: water,
            total_energy_mj: energy,
            total_waste_score: waste,
            matched_materials: 1,
        }
    }

    #[test]
    fn weights_sum_to_one() {
        let sum = CARBON_WEIGHT + WATER_WEIGHT + ENERGY_WEIGHT + WASTE_WEIGHT;
        assert!((sum - 1.0).abs() < 1e-12);
    }

    #[test]
    fn zero_impact_scores_exactly_hundred() {
        let components = score_components(&ImpactTotals::default());
        assert_eq!(eco_score(&components), 100.0);
    }

    #[test]
    fn impacts_beyond_every_cap_score_zero() {
        let components = score_components(&totals(3.0, 80.0, 150.0, 5.0));
        assert_eq!(components.carbon.normalized, 1.0);
        assert_eq!(components.waste.normalized, 1.0);
        assert_eq!(eco_score(&components), 0.0);
    }

    #[test]
    fn single_material_example_scores_seventy_one() {
        let components = score_components(&totals(0.25, 0.5, 1.0, 3.0));

        assert!((components.carbon.normalized - 0.5).abs() < 1e-9);
        assert!((components.water.normalized - 0.05).abs() < 1e-9);
        assert!((components.energy.normalized - 0.05).abs() < 1e-9);
        assert!((components.waste.normalized - 0.6).abs() < 1e-9);
        assert_eq!(eco_score(&components), 71.0);
    }

    #[test]
    fn score_decreases_as_any_axis_worsens() {
        let base = eco_score(&score_components(&totals(0.1, 2.0, 4.0, 2.0)));
        let worse_carbon = eco_score(&score_components(&totals(0.3, 2.0, 4.0, 2.0)));
        let worse_water = eco_score(&score_components(&totals(0.1, 6.0, 4.0, 2.0)));
        let worse_energy = eco_score(&score_components(&totals(0.1, 2.0, 12.0, 2.0)));
        let worse_waste = eco_score(&score_components(&totals(0.1, 2.0, 4.0, 4.0)));

        assert!(worse_carbon < base);
        assert!(worse_water < base);
        assert!(worse_energy < base);
        assert!(worse_waste < base);
    }

    #[test]
    fn score_stays_bounded_over_a_sweep_of_weights() {
        for step in 0..=40 {
            let grams = step as f64 * 50.0;
            let kg = grams / 1000.0;
            let components = score_components(&totals(kg * 2.2, kg * 17.0, kg * 70.0, 5.0));
            let score = eco_score(&components);
            assert!((0.0..=100.0).contains(&score), "score out of range: {score}");
        }
    }

    #[test]
    fn tie_values_round_from_the_summed_weighted_terms() {
        let kg = 167.0 / 1000.0;
        let components = score_components(&totals(kg * 3.0, kg * 30.0, kg * 60.0, 0.0));
        assert_eq!(eco_score(&components), 39.9);
    }

    #[test]
    fn rounds_to_a_single_decimal() {
        assert_eq!(round_to_tenth(71.04), 71.0);
        assert_eq!(round_to_tenth(71.06), 71.1);
    }
}
