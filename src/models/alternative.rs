use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Alternative {
    pub name: String,
    pub eco_score: f64,
    pub score_diff: f64,
    pub improvement: String,
}

/// Hand-picked greener product for a category, outside the scored catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CuratedSuggestion {
    pub name: &'static str,
    pub reason: &'static str,
}
