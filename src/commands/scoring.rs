use crate::analysis::aggregate::aggregate_product;
use crate::analysis::insight::HIGH_ECO_THRESHOLD;
use crate::analysis::normalize::{eco_score, score_components};
use crate::commands::settings::EffectiveSettings;
use crate::models::alternative::Alternative;
use crate::models::eco_score::*;
use crate::models::material::MaterialTable;
use crate::models::product::ProductRecord;

/// Load both tables named by the settings and score every product.
pub fn load_catalog(settings: &EffectiveSettings) -> Result<Catalog, String> {
    let start = std::time::Instant::now();
    let materials = crate::commands::tables::load_material_table(&settings.material_table)?;
    let records = crate::commands::tables::load_product_table(&settings.product_table)?;

    let catalog = score_records(&records, &materials);
    log::info!(
        "scored {} products in {} ms ({} without any known material)",
        catalog.product_count,
        start.elapsed().as_millis(),
        catalog.unmatched_count
    );
    Ok(catalog)
}

pub fn score_records(records: &[ProductRecord], materials: &MaterialTable) -> Catalog {
    let products = records
        .iter()
        .map(|record| score_product(record, materials))
        .collect();
    build_catalog(products)
}

pub fn score_product(record: &ProductRecord, materials: &MaterialTable) -> ProductImpact {
    let totals = aggregate_product(record, materials);
    let components = score_components(&totals);

    ProductImpact {
        name: record.name.clone(),
        category: record.category.clone(),
        flags: record.flags,
        totals,
        components,
        eco_score: eco_score(&components),
    }
}

pub fn get_alternatives(
    catalog: &Catalog,
    name: &str,
    limit: Option<usize>,
) -> Option<Vec<Alternative>> {
    crate::analysis::recommend::find_alternatives(catalog, name, limit)
}

fn build_catalog(products: Vec<ProductImpact>) -> Catalog {
    let product_count = products.len();
    let total_score: f64 = products.iter().map(|p| p.eco_score).sum();
    let high_eco_count = products
        .iter()
        .filter(|p| p.eco_score >= HIGH_ECO_THRESHOLD)
        .count();
    let unmatched_count = products
        .iter()
        .filter(|p| p.totals.matched_materials == 0)
        .count();

    Catalog {
        mean_score: if product_count == 0 {
            0.0
        } else {
            total_score / product_count as f64
        },
        product_count,
        high_eco_count,
        unmatched_count,
        products,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::material::MaterialImpact;
    use crate::models::product::{IngredientFlags, MaterialSlot};

    fn materials() -> MaterialTable {
        let mut table = MaterialTable::new();
        table.insert(
            "M".to_string(),
            MaterialImpact {
                carbon_kg_per_kg: 1.0,
                water_l_per_kg: 2.0,
                energy_mj_per_kg: 4.0,
                waste_score: 3.0,
            },
        );
        table
    }

    fn record(name: &str, material: &str, weight_g: f64) -> ProductRecord {
        ProductRecord {
            name: name.to_string(),
            category: "Cream".to_string(),
            slots: vec![MaterialSlot {
                material: Some(material.to_string()),
                weight_g: Some(weight_g),
            }],
            flags: IngredientFlags::default(),
        }
    }

    #[test]
    fn scores_the_reference_example() {
        let product = score_product(&record("Example", "M", 250.0), &materials());
        assert_eq!(product.eco_score, 71.0);
        assert_eq!(product.totals.total_waste_score, 3.0);
    }

    #[test]
    fn zero_weight_scores_hundred() {
        let product = score_product(&record("Weightless", "M", 0.0), &materials());
        assert_eq!(product.eco_score, 100.0);
    }

    #[test]
    fn build_catalog_counts_high_eco_and_unmatched_products() {
        let catalog = score_records(
            &[
                record("Light", "M", 10.0),
                record("Example", "M", 250.0),
                record("Unknown", "Mystery", 250.0),
            ],
            &materials(),
        );

        assert_eq!(catalog.product_count, 3);
        assert_eq!(catalog.high_eco_count, 2);
        assert_eq!(catalog.unmatched_count, 1);
        assert_eq!(catalog.get("Unknown").map(|p| p.eco_score), Some(100.0));
    }

    #[test]
    fn empty_catalog_has_zero_mean() {
        let catalog = score_records(&[], &materials());
        assert_eq!(catalog.product_count, 0);
        assert_eq!(catalog.mean_score, 0.0);
    }

    #[test]
    fn components_list_four_axes_in_fixed_order() {
        let product = score_product(&record("Example", "M", 250.0), &materials());

        let names: Vec<&str> = product.components.iter().map(|(axis, _)| axis).collect();
        assert_eq!(names, vec!["carbon", "water", "energy", "waste"]);
        let weights: f64 = product.components.iter().map(|(_, c)| c.weight).sum();
        assert!((weights - 1.0).abs() < 1e-12);
    }

    #[test]
    fn categories_keep_first_seen_order() {
        let mut wash = record("Wash", "M", 40.0);
        wash.category = "Body Wash".to_string();
        let catalog = score_records(
            &[record("A", "M", 10.0), wash, record("B", "M", 20.0)],
            &materials(),
        );

        assert_eq!(catalog.categories(), vec!["Cream", "Body Wash"]);
    }
}
