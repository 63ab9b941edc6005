pub mod alternative;
pub mod eco_score;
pub mod history;
pub mod material;
pub mod product;
