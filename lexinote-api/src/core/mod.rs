pub mod config;
pub mod enrich;
pub mod notion;
pub mod pipeline;
