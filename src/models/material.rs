use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Per-kilogram environmental coefficients for one material.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MaterialImpact {
    pub carbon_kg_per_kg: f64,
    pub water_l_per_kg: f64,
    pub energy_mj_per_kg: f64,
    pub waste_score: f64, // 1–5, higher = worse
}

/// Material table: material identifier → coefficients
pub type MaterialTable = HashMap<String, MaterialImpact>;
