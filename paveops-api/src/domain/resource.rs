use pricing::{MaterialType, RateCard};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use strum::{Display, EnumString};

/// Labour catalog entry. `charge_out_rate` is the day rate quoted to
/// clients; `cost_rate` is the internal cost and never reaches a quote line.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct LabourResource {
    pub id: i32,
    pub name: String,
    pub role: String,
    pub cost_rate: f64,
    pub charge_out_rate: f64,
    pub night_rate: f64,
    pub notes: String,
}

impl LabourResource {
    /// Rate pair snapshotted onto a quote line.
    pub fn rate_card(&self) -> RateCard {
        RateCard::new(self.charge_out_rate, self.night_rate)
    }
}

/// Whether a piece of equipment is company owned or hired in.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString,
)]
pub enum Ownership {
    Owned,
    Hired,
}

impl TryFrom<String> for Ownership {
    type Error = strum::ParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Equipment catalog entry.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct EquipmentResource {
    pub id: i32,
    pub name: String,
    pub category: String,
    pub charge_out_rate: f64,
    pub night_rate: f64,
    #[sqlx(try_from = "String")]
    pub owned_or_hired: Ownership,
    pub supplier: String,
    pub notes: String,
}

impl EquipmentResource {
    pub fn rate_card(&self) -> RateCard {
        RateCard::new(self.charge_out_rate, self.night_rate)
    }
}

/// Material catalog entry. `formula_constant` feeds the quantity formula;
/// materials without one price with a constant of 1.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct MaterialResource {
    pub id: i32,
    pub name: String,
    pub purchase_price: f64,
    #[serde(rename = "type")]
    #[sqlx(try_from = "String")]
    pub material_type: MaterialType,
    pub measurement_unit: String,
    pub formula_constant: Option<f64>,
    pub supplier: String,
    pub notes: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rate_card_carries_day_and_night_rates() {
        let labour = LabourResource {
            id: 1,
            name: "Paver operator".into(),
            role: "Operator".into(),
            cost_rate: 35.0,
            charge_out_rate: 40.0,
            night_rate: 60.0,
            notes: String::new(),
        };

        let rates = labour.rate_card();
        assert_eq!(rates.rate_for(false), 40.0);
        assert_eq!(rates.rate_for(true), 60.0);
    }

    #[test]
    fn ownership_parses_both_variants() {
        assert_eq!("Owned".parse::<Ownership>().unwrap(), Ownership::Owned);
        assert_eq!("Hired".parse::<Ownership>().unwrap(), Ownership::Hired);
        assert!("Leased".parse::<Ownership>().is_err());
    }
}
