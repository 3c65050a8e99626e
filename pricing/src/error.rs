use thiserror::Error;

use crate::MaterialType;

/// Rejections raised while pricing a single line item.
///
/// Aggregation itself never fails; bad numbers are caught here, when a line
/// is built.
#[derive(Debug, Error, PartialEq)]
pub enum PricingError {
    #[error("quantity must not be negative, got {0}")]
    NegativeQuantity(f64),
    #[error("area must not be negative, got {0} sqm")]
    NegativeArea(f64),
    #[error("depth/spray rate must not be negative, got {0}")]
    NegativeDepth(f64),
    #[error("sell price must not be negative, got {0}")]
    NegativePrice(f64),
    #[error("formula constant for {material} must not be negative, got {value}")]
    InvalidFormulaConstant { material: MaterialType, value: f64 },
    #[error("{field} must be greater than zero when pricing {material}")]
    ZeroDivisor {
        material: MaterialType,
        field: &'static str,
    },
}
