use serde::{Deserialize, Serialize};

use crate::{MaterialLine, ResourceLine};

/// GST applied to quote subtotals unless configuration says otherwise (10%).
pub const DEFAULT_GST_RATE: f64 = 0.10;

/// Markup percentage applied on top of the cost base.
///
/// Mirrors the forgiveness of the quote form's markup field: input that does
/// not parse as a finite number prices as 0%.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Markup(f64);

impl Markup {
    pub fn percent(value: f64) -> Self {
        if value.is_finite() {
            Self(value)
        } else {
            Self(0.0)
        }
    }

    /// Parse user input; anything non-numeric degrades to 0%.
    pub fn parse(input: &str) -> Self {
        input
            .trim()
            .parse::<f64>()
            .map(Self::percent)
            .unwrap_or_default()
    }

    pub fn as_percent(&self) -> f64 {
        self.0
    }

    fn as_fraction(&self) -> f64 {
        self.0 / 100.0
    }
}

impl From<f64> for Markup {
    fn from(value: f64) -> Self {
        Self::percent(value)
    }
}

/// Financial breakdown of a quote.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteSummary {
    pub labour_total: f64,
    pub equipment_total: f64,
    pub material_total: f64,
    pub cost_base: f64,
    pub markup_rate: f64,
    pub markup_amount: f64,
    pub subtotal: f64,
    pub gst: f64,
    pub grand_total: f64,
    pub profit: f64,
    pub margin: f64,
}

/// Folds priced line items and a markup percentage into a [`QuoteSummary`].
#[derive(Debug, Clone, Copy)]
pub struct QuoteCalculator {
    gst_rate: f64,
}

impl Default for QuoteCalculator {
    fn default() -> Self {
        Self {
            gst_rate: DEFAULT_GST_RATE,
        }
    }
}

impl QuoteCalculator {
    pub fn new(gst_rate: f64) -> Self {
        Self { gst_rate }
    }

    pub fn gst_rate(&self) -> f64 {
        self.gst_rate
    }

    /// Aggregate lines into the quote's financial summary.
    ///
    /// Pure and order-independent over the three sequences. Totals carried by
    /// partially-entered rows can be NaN; those count as zero rather than
    /// poisoning the whole quote.
    pub fn summarize(
        &self,
        labour: &[ResourceLine],
        equipment: &[ResourceLine],
        materials: &[MaterialLine],
        markup: Markup,
    ) -> QuoteSummary {
        let labour_total: f64 = labour.iter().map(|line| nan_as_zero(line.total)).sum();
        let equipment_total: f64 = equipment.iter().map(|line| nan_as_zero(line.total)).sum();
        let material_total: f64 = materials.iter().map(|line| nan_as_zero(line.charge)).sum();

        let cost_base = labour_total + equipment_total + material_total;
        let markup_amount = cost_base * markup.as_fraction();
        let subtotal = cost_base + markup_amount;
        let gst = subtotal * self.gst_rate;
        let grand_total = subtotal + gst;
        let profit = markup_amount;
        let margin = if subtotal > 0.0 {
            profit / subtotal * 100.0
        } else {
            0.0
        };

        QuoteSummary {
            labour_total,
            equipment_total,
            material_total,
            cost_base,
            markup_rate: markup.as_percent(),
            markup_amount,
            subtotal,
            gst,
            grand_total,
            profit,
            margin,
        }
    }
}

fn nan_as_zero(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{MaterialType, Phase, RateCard};

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    fn labour_line(quantity: f64, rate: f64) -> ResourceLine {
        ResourceLine::price(
            "labour",
            RateCard::new(rate, rate),
            quantity,
            Phase::Preparation,
            false,
        )
        .unwrap()
    }

    #[test]
    fn worked_example_matches_the_quote_form() {
        // 8 hrs of labour at $40 day rate
        let labour = vec![ResourceLine::price(
            "labour-1",
            RateCard::new(40.0, 60.0),
            8.0,
            Phase::Preparation,
            false,
        )
        .unwrap()];
        // 2 units of equipment at $150 night rate
        let equipment = vec![ResourceLine::price(
            "equip-1",
            RateCard::new(100.0, 150.0),
            2.0,
            Phase::Seal,
            true,
        )
        .unwrap()];
        // 100 sqm of asphalt at 0.05 depth, constant 2.4, $120/tonne
        let materials = vec![MaterialLine::price(
            "mat-1",
            MaterialType::Asphalt,
            100.0,
            0.05,
            120.0,
            Some(2.4),
        )
        .unwrap()];

        let summary = QuoteCalculator::default().summarize(
            &labour,
            &equipment,
            &materials,
            Markup::percent(20.0),
        );

        assert_eq!(summary.labour_total, 320.0);
        assert_eq!(summary.equipment_total, 300.0);
        assert_eq!(summary.material_total, 1440.0);
        assert_eq!(summary.cost_base, 2060.0);
        assert_close(summary.markup_amount, 412.0);
        assert_close(summary.subtotal, 2472.0);
        assert_close(summary.gst, 247.2);
        assert_close(summary.grand_total, 2719.2);
        assert_close(summary.profit, 412.0);
        assert_close(summary.margin, 412.0 / 2472.0 * 100.0);
    }

    #[test]
    fn zero_markup_keeps_subtotal_at_cost() {
        let labour = vec![labour_line(8.0, 40.0)];
        let summary =
            QuoteCalculator::default().summarize(&labour, &[], &[], Markup::default());

        assert_eq!(summary.subtotal, summary.cost_base);
        assert_eq!(summary.profit, 0.0);
        assert_eq!(summary.margin, 0.0);
    }

    #[test]
    fn gst_is_a_fixed_share_of_the_subtotal() {
        let labour = vec![labour_line(10.0, 95.0)];
        let summary =
            QuoteCalculator::default().summarize(&labour, &[], &[], Markup::percent(15.0));

        assert_eq!(summary.gst, summary.subtotal * DEFAULT_GST_RATE);
        assert_eq!(summary.grand_total, summary.subtotal + summary.gst);
    }

    #[test]
    fn gst_rate_is_configurable() {
        let labour = vec![labour_line(10.0, 100.0)];
        let summary = QuoteCalculator::new(0.15).summarize(&labour, &[], &[], Markup::default());

        assert_eq!(summary.gst, 150.0);
        assert_eq!(summary.grand_total, 1150.0);
    }

    #[test]
    fn aggregation_is_order_independent() {
        // Totals here are exactly representable, so reordering must not move
        // a single bit.
        let mut labour = vec![
            labour_line(8.0, 40.0),
            labour_line(4.0, 55.0),
            labour_line(12.0, 62.5),
        ];

        let forward = QuoteCalculator::default().summarize(&labour, &[], &[], Markup::percent(20.0));
        labour.reverse();
        let backward =
            QuoteCalculator::default().summarize(&labour, &[], &[], Markup::percent(20.0));

        assert_eq!(forward, backward);
    }

    #[test]
    fn empty_quote_prices_to_zero_with_zero_margin() {
        let summary = QuoteCalculator::default().summarize(&[], &[], &[], Markup::percent(20.0));

        assert_eq!(summary.cost_base, 0.0);
        assert_eq!(summary.grand_total, 0.0);
        assert_eq!(summary.margin, 0.0);
    }

    #[test]
    fn nan_totals_count_as_zero() {
        let mut broken = labour_line(8.0, 40.0);
        broken.total = f64::NAN;
        let labour = vec![broken, labour_line(2.0, 50.0)];

        let summary = QuoteCalculator::default().summarize(&labour, &[], &[], Markup::default());

        assert_eq!(summary.labour_total, 100.0);
    }

    #[test]
    fn markup_parses_leniently() {
        assert_eq!(Markup::parse("20").as_percent(), 20.0);
        assert_eq!(Markup::parse(" 12.5 ").as_percent(), 12.5);
        assert_eq!(Markup::parse("").as_percent(), 0.0);
        assert_eq!(Markup::parse("abc").as_percent(), 0.0);
        assert_eq!(Markup::parse("NaN").as_percent(), 0.0);
        assert_eq!(Markup::percent(f64::INFINITY).as_percent(), 0.0);
    }

    #[test]
    fn summary_serializes_with_the_wire_field_names() {
        let summary = QuoteCalculator::default().summarize(&[], &[], &[], Markup::default());
        let json = serde_json::to_value(summary).unwrap();

        assert!(json.get("costBase").is_some());
        assert!(json.get("grandTotal").is_some());
        assert!(json.get("markupAmount").is_some());
    }
}
