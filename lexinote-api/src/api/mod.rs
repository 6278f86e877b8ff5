pub mod enrich;
pub mod notes;
pub mod save;
