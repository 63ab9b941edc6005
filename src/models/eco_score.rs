use crate::models::product::{ImpactTotals, IngredientFlags};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ComponentScore {
    pub raw_value: f64,
    pub cap: f64,
    pub normalized: f64,
    pub weight: f64,
    pub contribution: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreComponents {
    pub carbon: ComponentScore,
    pub water: ComponentScore,
    pub energy: ComponentScore,
    pub waste: ComponentScore,
}

impl ScoreComponents {
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &ComponentScore)> {
        [
            ("carbon", &self.carbon),
            ("water", &self.water),
            ("energy", &self.energy),
            ("waste", &self.waste),
        ]
        .into_iter()
    }
}

/// Scored view of one product: what the presentation layer shows on the score page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductImpact {
    pub name: String,
    pub category: String,
    pub flags: IngredientFlags,
    pub totals: ImpactTotals,
    pub components: ScoreComponents,
    pub eco_score: f64,
}

/// The full scored product set, built once per loaded table pair.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Catalog {
    pub mean_score: f64,
    pub product_count: usize,
    pub high_eco_count: usize,
    pub unmatched_count: usize,
    pub products: Vec<ProductImpact>,
}

impl Catalog {
    pub fn get(&self, name: &str) -> Option<&ProductImpact> {
        self.products.iter().find(|p| p.name == name)
    }

    pub fn categories(&self) -> Vec<&str> {
        let mut seen = Vec::new();
        for product in &self.products {
            if !seen.contains(&product.category.as_str()) {
                seen.push(product.category.as_str());
            }
        }
        seen
    }

    pub fn in_category<'a>(&'a self, category: &'a str) -> impl Iterator<Item = &'a ProductImpact> + 'a {
        self.products.iter().filter(move |p| p.category == category)
    }
}
