pub mod aggregate;
pub mod curated;
pub mod insight;
pub mod normalize;
pub mod recommend;
