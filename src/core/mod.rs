pub mod advisory;
pub mod engine;
pub mod stress;
