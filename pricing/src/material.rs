use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::PricingError;

/// Catalog material categories. The category decides which unit conversion
/// formula turns an area into a physical quantity, and which unit that
/// quantity is expressed in.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
pub enum MaterialType {
    Bitumen,
    Asphalt,
    Roadbase,
    Stone,
}

impl MaterialType {
    /// Unit the computed quantity is expressed in.
    pub fn unit(&self) -> &'static str {
        match self {
            MaterialType::Bitumen => "litres",
            _ => "tonnes",
        }
    }

    /// What the `depth` parameter means for this material. Bitumen and stone
    /// are sprayed, so the second parameter is a spray rate rather than a
    /// layer depth.
    pub fn depth_label(&self) -> &'static str {
        match self {
            MaterialType::Bitumen | MaterialType::Stone => "spray rate",
            MaterialType::Asphalt | MaterialType::Roadbase => "depth",
        }
    }

    /// Convert an area in square metres plus a depth-like parameter into a
    /// physical quantity (litres for bitumen, tonnes otherwise).
    ///
    /// `formula_constant` is the per-material catalog constant; catalogs that
    /// omit it price with a constant of 1. Divisor fields must be greater
    /// than zero; the quantity is never negative.
    pub fn quantity(
        &self,
        sqm: f64,
        depth: f64,
        formula_constant: f64,
    ) -> Result<f64, PricingError> {
        if sqm < 0.0 {
            return Err(PricingError::NegativeArea(sqm));
        }
        if depth < 0.0 {
            return Err(PricingError::NegativeDepth(depth));
        }

        match self {
            MaterialType::Bitumen => {
                if formula_constant == 0.0 {
                    return Err(PricingError::ZeroDivisor {
                        material: *self,
                        field: "formula constant",
                    });
                }
                if formula_constant < 0.0 {
                    return Err(PricingError::InvalidFormulaConstant {
                        material: *self,
                        value: formula_constant,
                    });
                }
                Ok((sqm * depth) / formula_constant)
            }
            MaterialType::Asphalt | MaterialType::Roadbase => {
                if formula_constant < 0.0 {
                    return Err(PricingError::InvalidFormulaConstant {
                        material: *self,
                        value: formula_constant,
                    });
                }
                Ok(sqm * depth * formula_constant)
            }
            MaterialType::Stone => {
                if depth == 0.0 {
                    return Err(PricingError::ZeroDivisor {
                        material: *self,
                        field: "spray rate",
                    });
                }
                if formula_constant < 0.0 {
                    return Err(PricingError::InvalidFormulaConstant {
                        material: *self,
                        value: formula_constant,
                    });
                }
                Ok((sqm / depth) * formula_constant)
            }
        }
    }
}

impl TryFrom<String> for MaterialType {
    type Error = strum::ParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bitumen_divides_by_the_formula_constant() {
        // 50 sqm at a 1.5 spray rate with constant 1 -> 75 litres
        let quantity = MaterialType::Bitumen.quantity(50.0, 1.5, 1.0).unwrap();
        assert_eq!(quantity, 75.0);
    }

    #[test]
    fn asphalt_and_roadbase_multiply_through() {
        // 100 sqm at 0.05 depth with constant 2.4 -> 12 tonnes
        let asphalt = MaterialType::Asphalt.quantity(100.0, 0.05, 2.4).unwrap();
        assert_eq!(asphalt, 12.0);

        let roadbase = MaterialType::Roadbase.quantity(100.0, 0.05, 2.4).unwrap();
        assert_eq!(roadbase, 12.0);
    }

    #[test]
    fn stone_divides_by_spray_rate_then_scales() {
        // 200 sqm at a spray rate of 4 with constant 3 -> 150 tonnes
        let quantity = MaterialType::Stone.quantity(200.0, 4.0, 3.0).unwrap();
        assert_eq!(quantity, 150.0);
    }

    #[test]
    fn zero_area_prices_to_zero() {
        assert_eq!(MaterialType::Asphalt.quantity(0.0, 0.05, 2.4).unwrap(), 0.0);
    }

    #[test]
    fn bitumen_rejects_a_zero_formula_constant() {
        assert_eq!(
            MaterialType::Bitumen.quantity(50.0, 1.5, 0.0).unwrap_err(),
            PricingError::ZeroDivisor {
                material: MaterialType::Bitumen,
                field: "formula constant",
            }
        );
    }

    #[test]
    fn stone_rejects_a_zero_spray_rate() {
        assert_eq!(
            MaterialType::Stone.quantity(200.0, 0.0, 3.0).unwrap_err(),
            PricingError::ZeroDivisor {
                material: MaterialType::Stone,
                field: "spray rate",
            }
        );
    }

    #[test]
    fn negative_area_is_rejected() {
        assert_eq!(
            MaterialType::Roadbase.quantity(-1.0, 0.05, 2.4).unwrap_err(),
            PricingError::NegativeArea(-1.0)
        );
    }

    #[test]
    fn units_follow_the_material() {
        assert_eq!(MaterialType::Bitumen.unit(), "litres");
        assert_eq!(MaterialType::Asphalt.unit(), "tonnes");
        assert_eq!(MaterialType::Roadbase.unit(), "tonnes");
        assert_eq!(MaterialType::Stone.unit(), "tonnes");
    }

    #[test]
    fn depth_label_follows_the_material() {
        assert_eq!(MaterialType::Bitumen.depth_label(), "spray rate");
        assert_eq!(MaterialType::Stone.depth_label(), "spray rate");
        assert_eq!(MaterialType::Asphalt.depth_label(), "depth");
        assert_eq!(MaterialType::Roadbase.depth_label(), "depth");
    }

    #[test]
    fn unknown_material_string_is_rejected() {
        assert!("Gravel".parse::<MaterialType>().is_err());
    }
}
