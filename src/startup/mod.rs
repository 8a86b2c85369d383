pub mod engine;
pub mod prepare;
