use crate::models::material::MaterialTable;
use crate::models::product::{ImpactTotals, ProductRecord, MAX_MATERIAL_SLOTS};

/// Sum the weighted material contributions of one product.
///
/// Slots with a missing material, a missing weight, or a material absent from
/// the table contribute nothing. Waste is a material-type penalty, so it is
/// averaged over matched slots instead of being scaled by mass.
pub fn aggregate_product(record: &ProductRecord, materials: &MaterialTable) -> ImpactTotals {
    let mut totals = ImpactTotals::default();
    let mut waste_scores = Vec::with_capacity(MAX_MATERIAL_SLOTS);

    for (index, slot) in record.slots.iter().take(MAX_MATERIAL_SLOTS).enumerate() {
        let (Some(material), Some(weight_g)) = (slot.material.as_deref(), slot.weight_g) else {
            log::debug!("{}: slot {} is incomplete, skipping", record.name, index + 1);
            continue;
        };

        let Some(impact) = materials.get(material) else {
            log::debug!("{}: unknown material '{material}', skipping", record.name);
            continue;
        };

        let weight_kg = weight_g / 1000.0;
        totals.total_carbon_kg += weight_kg * impact.carbon_kg_per_kg;
        totals.total_water_l += weight_kg * impact.water_l_per_kg;
        totals.total_energy_mj += weight_kg * impact.energy_mj_per_kg;
        waste_scores.push(impact.waste_score);
    }

    totals.matched_materials = waste_scores.len();
    totals.total_waste_score = if waste_scores.is_empty() {
        log::warn!(
            "{}: no material matched the reference table; scoring as zero footprint",
            record.name
        );
        0.0
    } else {
        waste_scores.iter().sum::<f64>() / waste_scores.len() as f64
    };

    totals
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::material::MaterialImpact;
    use crate::models::product::{IngredientFlags, MaterialSlot};

    fn table() -> MaterialTable {
        let mut materials = MaterialTable::new();
        materials.insert(
            "M".to_string(),
            MaterialImpact {
                carbon_kg_per_kg: 1.0,
                water_l_per_kg: 2.0,
                energy_mj_per_kg: 4.0,
                waste_score: 3.0,
            },
        );
        materials.insert(
            "PET".to_string(),
            MaterialImpact {
                carbon_kg_per_kg: 2.2,
                water_l_per_kg: 17.0,
                energy_mj_per_kg: 70.0,
                waste_score: 5.0,
            },
        );
        materials
    }

    fn slot(material: Option<&str>, weight_g: Option<f64>) -> MaterialSlot {
        MaterialSlot {
            material: material.map(str::to_string),
            weight_g,
        }
    }

    fn product(slots: Vec<MaterialSlot>) -> ProductRecord {
        ProductRecord {
            name: "Test Cream".to_string(),
            category: "Cream".to_string(),
            slots,
            flags: IngredientFlags::default(),
        }
    }

    #[test]
    fn converts_grams_to_kilograms() {
        let totals = aggregate_product(&product(vec![slot(Some("M"), Some(250.0))]), &table());

        assert!((totals.total_carbon_kg - 0.25).abs() < 1e-9);
        assert!((totals.total_water_l - 0.5).abs() < 1e-9);
        assert!((totals.total_energy_mj - 1.0).abs() < 1e-9);
        assert_eq!(totals.total_waste_score, 3.0);
        assert_eq!(totals.matched_materials, 1);
    }

    #[test]
    fn waste_is_an_unweighted_mean_of_matched_materials() {
        let totals = aggregate_product(
            &product(vec![slot(Some("M"), Some(990.0)), slot(Some("PET"), Some(10.0))]),
            &table(),
        );

        assert_eq!(totals.total_waste_score, 4.0);
        assert_eq!(totals.matched_materials, 2);
    }

    #[test]
    fn skips_unknown_materials_and_incomplete_slots() {
        let totals = aggregate_product(
            &product(vec![
                slot(Some("M"), Some(100.0)),
                slot(Some("Unobtainium"), Some(500.0)),
                slot(None, Some(40.0)),
            ]),
            &table(),
        );

        assert!((totals.total_carbon_kg - 0.1).abs() < 1e-9);
        assert_eq!(totals.total_waste_score, 3.0);
        assert_eq!(totals.matched_materials, 1);

        let missing_weight = aggregate_product(&product(vec![slot(Some("PET"), None)]), &table());
        assert_eq!(missing_weight.matched_materials, 0);
    }

    #[test]
    fn fully_unknown_product_has_zero_totals() {
        let totals = aggregate_product(&product(vec![slot(Some("Mystery"), Some(80.0))]), &table());
        assert_eq!(totals, ImpactTotals::default());
    }
}
