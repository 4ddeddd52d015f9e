// src/lib.rs
//! Position sizing for discretionary traders: how much to sell to lock a
//! break-even or profit goal, how much may be added without risking it, and
//! what a crash would cost.

pub mod config;
pub mod core;
pub mod error;
pub mod logging;
pub mod render;
pub mod tui;
pub mod types;
pub mod utils;

pub use crate::core::advisory::{advise, Advisory};
pub use crate::core::engine::compute;
pub use crate::error::InputError;
pub use crate::types::{AddOnBasis, AddOnCapPolicy, Side, SizingInput, SizingReport};
