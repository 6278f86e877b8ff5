pub mod error;
pub mod vocab;
