use serde::{Deserialize, Serialize};

/// Maximum number of material slots a product row can carry.
pub const MAX_MATERIAL_SLOTS: usize = 3;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MaterialSlot {
    pub material: Option<String>,
    pub weight_g: Option<f64>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngredientFlags {
    pub microplastics: bool,
    pub silicones: bool,
    pub petroleum: bool,
}

impl IngredientFlags {
    /// Human-readable labels of the flags that are set.
    pub fn labels(&self) -> Vec<&'static str> {
        let mut labels = Vec::new();
        if self.microplastics {
            labels.push("microplastics");
        }
        if self.silicones {
            labels.push("silicones");
        }
        if self.petroleum {
            labels.push("petroleum-derived ingredients");
        }
        labels
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRecord {
    pub name: String,
    pub category: String,
    pub slots: Vec<MaterialSlot>,
    pub flags: IngredientFlags,
}

/// Raw footprint totals for one product, before normalization.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ImpactTotals {
    pub total_carbon_kg: f64,
    pub total_water_l: f64,
    pub total_energy_mj: f64,
    pub total_waste_score: f64,
    pub matched_materials: usize,
}
