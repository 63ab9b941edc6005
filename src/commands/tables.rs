use crate::models::material::{MaterialImpact, MaterialTable};
use crate::models::product::{IngredientFlags, MaterialSlot, ProductRecord};
use serde::Deserialize;
use std::collections::HashSet;
use std::fs::File;
use std::io::Read;
use std::path::Path;

#[derive(Debug, Deserialize)]
struct MaterialRow {
    material: String,
    carbon_kg_per_kg: f64,
    #[serde(rename = "water_L_per_kg")]
    water_l_per_kg: f64,
    #[serde(rename = "energy_MJ_per_kg")]
    energy_mj_per_kg: f64,
    waste_score: f64,
}

#[derive(Debug, Deserialize)]
struct ProductRow {
    name: String,
    category: String,
    material_1: Option<String>,
    material_2: Option<String>,
    material_3: Option<String>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    weight_1_g: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    weight_2_g: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    weight_3_g: Option<f64>,
    microplastics: Option<String>,
    silicones: Option<String>,
    petroleum: Option<String>,
}

impl ProductRow {
    fn into_record(self) -> ProductRecord {
        let slots = [
            (self.material_1, self.weight_1_g),
            (self.material_2, self.weight_2_g),
            (self.material_3, self.weight_3_g),
        ]
        .into_iter()
        .map(|(material, weight_g)| MaterialSlot {
            material: material.filter(|m| !m.is_empty()),
            weight_g: weight_g.filter(|w| w.is_finite()),
        })
        .collect();

        ProductRecord {
            name: self.name,
            category: self.category,
            slots,
            flags: IngredientFlags {
                microplastics: parse_flag(self.microplastics.as_deref()),
                silicones: parse_flag(self.silicones.as_deref()),
                petroleum: parse_flag(self.petroleum.as_deref()),
            },
        }
    }
}

pub fn load_material_table(path: &Path) -> Result<MaterialTable, String> {
    let file = File::open(path)
        .map_err(|e| format!("Failed to open material table {}: {e}", path.display()))?;
    read_material_table(file).map_err(|e| format!("{}: {e}", path.display()))
}

pub fn read_material_table<R: Read>(reader: R) -> Result<MaterialTable, String> {
    let mut rdr = csv_reader(reader);
    let mut table = MaterialTable::new();

    for (index, row) in rdr.deserialize::<MaterialRow>().enumerate() {
        let row = row.map_err(|e| format!("Invalid material row {}: {e}", index + 1))?;
        let impact = MaterialImpact {
            carbon_kg_per_kg: row.carbon_kg_per_kg,
            water_l_per_kg: row.water_l_per_kg,
            energy_mj_per_kg: row.energy_mj_per_kg,
            waste_score: row.waste_score,
        };
        if table.insert(row.material.clone(), impact).is_some() {
            log::warn!("material '{}' listed more than once; keeping the last row", row.material);
        }
    }

    log::info!("loaded {} materials", table.len());
    Ok(table)
}

pub fn load_product_table(path: &Path) -> Result<Vec<ProductRecord>, String> {
    let file = File::open(path)
        .map_err(|e| format!("Failed to open product table {}: {e}", path.display()))?;
    read_product_table(file).map_err(|e| format!("{}: {e}", path.display()))
}

pub fn read_product_table<R: Read>(reader: R) -> Result<Vec<ProductRecord>, String> {
    let mut rdr = csv_reader(reader);
    let mut seen = HashSet::new();
    let mut records = Vec::new();

    for (index, row) in rdr.deserialize::<ProductRow>().enumerate() {
        let row = row.map_err(|e| format!("Invalid product row {}: {e}", index + 1))?;
        if !seen.insert(row.name.clone()) {
            log::warn!("product '{}' listed more than once; keeping the first row", row.name);
            continue;
        }
        records.push(row.into_record());
    }

    log::info!("loaded {} products", records.len());
    Ok(records)
}

fn csv_reader<R: Read>(reader: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader)
}

fn parse_flag(cell: Option<&str>) -> bool {
    match cell.map(|c| c.trim().to_ascii_lowercase()) {
        Some(value) => matches!(value.as_str(), "1" | "1.0" | "true" | "yes" | "y"),
        None => false,
    }
}
