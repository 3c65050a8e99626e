use serde::{Deserialize, Serialize};

use crate::{MaterialType, Phase, PricingError};

/// Day/night rate pair taken from a catalog resource when a line is added.
/// The line keeps this snapshot; later catalog changes do not touch it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RateCard {
    pub day_rate: f64,
    pub night_rate: f64,
}

impl RateCard {
    pub fn new(day_rate: f64, night_rate: f64) -> Self {
        Self {
            day_rate,
            night_rate,
        }
    }

    pub fn rate_for(&self, is_night: bool) -> f64 {
        if is_night {
            self.night_rate
        } else {
            self.day_rate
        }
    }
}

/// A priced labour or equipment allocation. The two kinds are structurally
/// identical; which catalog `resource_id` points into is up to the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceLine {
    pub resource_id: String,
    pub quantity: f64,
    pub charge_rate: f64,
    pub total: f64,
    pub required_for: Phase,
    pub is_night: bool,
}

impl ResourceLine {
    /// Price a resource allocation, snapshotting the day or night rate.
    ///
    /// Zero quantity is accepted (the row just totals to nothing); negative
    /// quantity is rejected because it would silently shrink the quote.
    pub fn price(
        resource_id: impl Into<String>,
        rates: RateCard,
        quantity: f64,
        required_for: Phase,
        is_night: bool,
    ) -> Result<Self, PricingError> {
        if quantity < 0.0 {
            return Err(PricingError::NegativeQuantity(quantity));
        }

        let charge_rate = rates.rate_for(is_night);
        Ok(Self {
            resource_id: resource_id.into(),
            quantity,
            charge_rate,
            total: quantity * charge_rate,
            required_for,
            is_night,
        })
    }
}

/// A priced material allocation. `quantity` is derived from the area and the
/// material's conversion formula, never supplied directly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaterialLine {
    pub material_id: String,
    pub material_type: MaterialType,
    pub sqm: f64,
    pub depth: f64,
    pub quantity: f64,
    pub sell_price: f64,
    pub charge: f64,
}

impl MaterialLine {
    /// Price a material allocation. `formula_constant` comes from the
    /// catalog; materials without one price with a constant of 1.
    pub fn price(
        material_id: impl Into<String>,
        material_type: MaterialType,
        sqm: f64,
        depth: f64,
        sell_price: f64,
        formula_constant: Option<f64>,
    ) -> Result<Self, PricingError> {
        if sell_price < 0.0 {
            return Err(PricingError::NegativePrice(sell_price));
        }

        let quantity = material_type.quantity(sqm, depth, formula_constant.unwrap_or(1.0))?;
        Ok(Self {
            material_id: material_id.into(),
            material_type,
            sqm,
            depth,
            quantity,
            sell_price,
            charge: quantity * sell_price,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn day_rate_is_snapshotted_by_default() {
        let line = ResourceLine::price(
            "labour-1",
            RateCard::new(40.0, 60.0),
            8.0,
            Phase::Preparation,
            false,
        )
        .unwrap();

        assert_eq!(line.charge_rate, 40.0);
        assert_eq!(line.total, 320.0);
        assert!(!line.is_night);
    }

    #[test]
    fn night_flag_selects_the_night_rate() {
        let line = ResourceLine::price(
            "equip-7",
            RateCard::new(100.0, 150.0),
            2.0,
            Phase::Seal,
            true,
        )
        .unwrap();

        assert_eq!(line.charge_rate, 150.0);
        assert_eq!(line.total, 300.0);
    }

    #[test]
    fn zero_quantity_is_accepted() {
        let line = ResourceLine::price(
            "labour-1",
            RateCard::new(40.0, 60.0),
            0.0,
            Phase::Asphalt,
            false,
        )
        .unwrap();

        assert_eq!(line.total, 0.0);
    }

    #[test]
    fn negative_quantity_is_rejected() {
        let err = ResourceLine::price(
            "labour-1",
            RateCard::new(40.0, 60.0),
            -1.0,
            Phase::Asphalt,
            false,
        )
        .unwrap_err();

        assert_eq!(err, PricingError::NegativeQuantity(-1.0));
    }

    #[test]
    fn material_charge_is_quantity_times_sell_price() {
        let line = MaterialLine::price(
            "mat-3",
            MaterialType::Asphalt,
            100.0,
            0.05,
            120.0,
            Some(2.4),
        )
        .unwrap();

        assert_eq!(line.quantity, 12.0);
        assert_eq!(line.charge, 1440.0);
    }

    #[test]
    fn missing_formula_constant_defaults_to_one() {
        let line =
            MaterialLine::price("mat-1", MaterialType::Bitumen, 50.0, 1.5, 2.0, None).unwrap();

        assert_eq!(line.quantity, 75.0);
        assert_eq!(line.charge, 150.0);
    }

    #[test]
    fn negative_sell_price_is_rejected() {
        let err = MaterialLine::price("mat-1", MaterialType::Stone, 200.0, 4.0, -5.0, Some(3.0))
            .unwrap_err();

        assert_eq!(err, PricingError::NegativePrice(-5.0));
    }

    #[test]
    fn lines_serialize_with_the_wire_field_names() {
        let line = ResourceLine::price(
            "labour-1",
            RateCard::new(40.0, 60.0),
            8.0,
            Phase::Preparation,
            false,
        )
        .unwrap();

        let json = serde_json::to_value(&line).unwrap();
        assert_eq!(json["resourceId"], "labour-1");
        assert_eq!(json["requiredFor"], "Preparation");
        assert_eq!(json["isNight"], false);
        assert_eq!(json["chargeRate"], 40.0);
    }
}
