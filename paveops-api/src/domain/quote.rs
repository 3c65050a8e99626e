use pricing::{MaterialType, Phase};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use strum::{Display, EnumString};
use time::OffsetDateTime;

/// Lifecycle state of a quote. Transitions are unrestricted.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString,
)]
pub enum QuoteStatus {
    Draft,
    Ready,
    Sent,
    Accepted,
    Rejected,
}

impl TryFrom<String> for QuoteStatus {
    type Error = strum::ParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Persisted quote header. The financial fields are written once, at
/// creation, from the calculator's summary.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    pub id: i32,
    pub client_id: i32,
    pub title: String,
    pub summary: String,
    pub job_site_address: String,
    #[sqlx(try_from = "String")]
    pub status: QuoteStatus,
    #[serde(with = "time::serde::rfc3339")]
    pub date_created: OffsetDateTime,
    pub total_area: f64,
    pub notes: String,
    pub quote_number: String,
    pub markup: f64,
    pub gst: f64,
    pub total: f64,
    pub cost_base: f64,
    pub profit: f64,
    pub margin: f64,
}

/// Persisted labour or equipment line under a quote header. Lines are
/// immutable once the quote is saved.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct QuoteResourceLine {
    pub id: i32,
    pub quote_id: i32,
    pub resource_id: i32,
    pub quantity: f64,
    pub charge_rate: f64,
    pub total: f64,
    #[sqlx(try_from = "String")]
    pub required_for: Phase,
    pub is_night: bool,
}

/// Persisted material line under a quote header.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct QuoteMaterialLine {
    pub id: i32,
    pub quote_id: i32,
    pub material_id: i32,
    #[sqlx(try_from = "String")]
    pub material_type: MaterialType,
    pub sqm: f64,
    pub depth: f64,
    pub quantity: f64,
    pub sell_price: f64,
    pub charge: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_round_trips_through_strings() {
        for status in [
            QuoteStatus::Draft,
            QuoteStatus::Ready,
            QuoteStatus::Sent,
            QuoteStatus::Accepted,
            QuoteStatus::Rejected,
        ] {
            assert_eq!(status.to_string().parse::<QuoteStatus>().unwrap(), status);
        }
    }

    #[test]
    fn unknown_status_is_rejected() {
        assert!(QuoteStatus::try_from("Archived".to_string()).is_err());
    }
}
