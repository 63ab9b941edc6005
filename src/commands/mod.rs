pub mod capabilities;
pub mod ledger;
pub mod scoring;
pub mod session;
pub mod settings;
pub mod tables;
