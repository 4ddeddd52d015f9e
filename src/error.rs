// src/error.rs
use rust_decimal::Decimal;
use thiserror::Error;

/// Rejections raised while turning raw form or CLI text into a `SizingInput`.
/// The engine itself never fails.
#[derive(Debug, Error, PartialEq)]
pub enum InputError {
    #[error("{field}: '{raw}' is not a number")]
    InvalidNumber { field: &'static str, raw: String },

    #[error("{field}: '{raw}' is not a whole unit count")]
    InvalidQuantity { field: &'static str, raw: String },

    #[error("{0} must be greater than zero")]
    NonPositive(&'static str),

    #[error("{0} must not be negative")]
    Negative(&'static str),

    #[error("{field} = {value} is outside {range}")]
    OutOfRange {
        field: &'static str,
        value: Decimal,
        range: &'static str,
    },
}
