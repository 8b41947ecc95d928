//! Allocation & costing engine
//!
//! Turns global settings and an ordered list of products into a fully
//! annotated pricing table:
//!
//! 1. the monthly fixed cost is allocated across products in proportion to
//!    their share of total sales volume;
//! 2. the allocation is spread over each product's units to get a fully
//!    loaded unit cost;
//! 3. the unit cost is inverted through the target gross margin into a
//!    suggested price;
//! 4. profit is reported at the current price.
//!
//! Every division is guarded and resolves to `0` instead of NaN or infinity,
//! so a half-filled worksheet still yields a readable table. The engine is a
//! pure function: it validates nothing and keeps no state between calls.

use serde::{Deserialize, Serialize};

use crate::entities::{GlobalSettings, ProductInput};

/// Derived figures for one product, in the same order as the input
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductResult {
    /// The input row these figures were derived from
    #[serde(flatten)]
    pub product: ProductInput,

    /// Fraction of total volume (0 when total volume is 0)
    pub volume_share: f64,

    /// Part of the fixed cost carried by this product
    pub allocated_fixed_cost: f64,

    /// Allocated fixed cost per unit sold (0 when volume is 0)
    pub fixed_cost_per_unit: f64,

    /// Variable cost plus fixed cost per unit
    pub fully_loaded_cost_per_unit: f64,

    /// Price that achieves the target gross margin (0 when margin >= 100%)
    pub suggested_price: f64,

    /// Current price minus fully loaded cost; not suppressed for unset prices
    pub profit_per_unit: f64,

    /// Profit per unit times monthly volume
    pub total_monthly_profit: f64,
}

/// Aggregate figures over all products
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    /// Sum of monthly volumes
    pub total_volume: f64,

    /// Sum of monthly profit at current prices
    pub total_profit: f64,

    /// Sum of allocated fixed cost (equals the fixed cost when volume > 0)
    pub total_allocated_fixed_cost: f64,

    /// Products still at the "price not set" sentinel
    pub unpriced_products: usize,
}

/// Complete engine output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingReport {
    pub settings: GlobalSettings,
    pub results: Vec<ProductResult>,
    pub summary: Summary,
}

impl PricingReport {
    /// Whether any row still needs its price taken from the suggestion
    pub fn has_unpriced(&self) -> bool {
        self.summary.unpriced_products > 0
    }
}

/// Compute the pricing table for `products` under `settings`
///
/// Runs in a single pass over the products plus one reduction. An empty
/// product list yields an empty table and an all-zero summary.
pub fn compute(settings: &GlobalSettings, products: &[ProductInput]) -> PricingReport {
    let total_volume = products.iter().fold(0.0, |acc, p| acc + p.volume);

    let results: Vec<ProductResult> = products
        .iter()
        .map(|product| price_product(settings, product, total_volume))
        .collect();

    let summary = Summary {
        total_volume,
        total_profit: results.iter().fold(0.0, |acc, r| acc + r.total_monthly_profit),
        total_allocated_fixed_cost: results.iter().fold(0.0, |acc, r| acc + r.allocated_fixed_cost),
        unpriced_products: products.iter().filter(|p| !p.has_price()).count(),
    };

    PricingReport {
        settings: *settings,
        results,
        summary,
    }
}

fn price_product(settings: &GlobalSettings, product: &ProductInput, total_volume: f64) -> ProductResult {
    let volume_share = if total_volume > 0.0 {
        product.volume / total_volume
    } else {
        0.0
    };

    let allocated_fixed_cost = volume_share * settings.fixed_cost;

    let fixed_cost_per_unit = if product.volume > 0.0 {
        allocated_fixed_cost / product.volume
    } else {
        0.0
    };

    let fully_loaded_cost_per_unit = product.variable_cost_per_unit + fixed_cost_per_unit;
    let suggested_price = suggested_price(fully_loaded_cost_per_unit, settings.target_margin);
    let profit_per_unit = product.current_price_per_unit - fully_loaded_cost_per_unit;

    ProductResult {
        product: product.clone(),
        volume_share,
        allocated_fixed_cost,
        fixed_cost_per_unit,
        fully_loaded_cost_per_unit,
        suggested_price,
        profit_per_unit,
        total_monthly_profit: profit_per_unit * product.volume,
    }
}

/// Invert a unit cost through a gross margin: `cost / (1 - margin)`
///
/// Returns 0 when `1 - margin` is not positive.
pub fn suggested_price(unit_cost: f64, target_margin: f64) -> f64 {
    let denominator = 1.0 - target_margin;
    if denominator > 0.0 {
        unit_cost / denominator
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < EPS * expected.abs().max(1.0),
            "expected {expected}, got {actual}"
        );
    }

    fn product(name: &str, volume: f64, variable_cost: f64, price: f64) -> ProductInput {
        ProductInput::new(name, volume, variable_cost, price)
    }

    #[test]
    fn test_single_product_carries_all_fixed_cost() {
        let settings = GlobalSettings::new(100_000.0, 0.40);
        let report = compute(&settings, &[product("Widget", 1000.0, 50.0, 0.0)]);
        let row = &report.results[0];

        assert_close(row.volume_share, 1.0);
        assert_close(row.allocated_fixed_cost, 100_000.0);
        assert_close(row.fixed_cost_per_unit, 100.0);
        assert_close(row.fully_loaded_cost_per_unit, 150.0);
        assert_close(row.suggested_price, 250.0);
        assert_close(row.profit_per_unit, -150.0);
        assert_close(row.total_monthly_profit, -150_000.0);
        assert_close(report.summary.total_profit, -150_000.0);
        assert_close(report.summary.total_volume, 1000.0);
    }

    #[test]
    fn test_two_products_split_by_volume() {
        let settings = GlobalSettings::new(100_000.0, 0.40);
        let report = compute(
            &settings,
            &[product("A", 700.0, 10.0, 0.0), product("B", 300.0, 10.0, 0.0)],
        );

        assert_close(report.results[0].volume_share, 0.7);
        assert_close(report.results[1].volume_share, 0.3);
        assert_close(report.results[0].allocated_fixed_cost, 70_000.0);
        assert_close(report.results[1].allocated_fixed_cost, 30_000.0);
        // Proportional allocation gives every unit the same fixed cost
        assert_close(report.results[0].fixed_cost_per_unit, 100.0);
        assert_close(report.results[1].fixed_cost_per_unit, 100.0);
    }

    #[test]
    fn test_shares_sum_to_one_and_fixed_cost_is_conserved() {
        let settings = GlobalSettings::new(12_345.67, 0.25);
        let products = [
            product("a", 3.0, 1.0, 2.0),
            product("b", 17.0, 0.5, 0.0),
            product("c", 0.0, 4.0, 9.0),
            product("d", 1234.0, 2.25, 3.0),
            product("e", 0.5, 0.0, 0.0),
        ];
        let report = compute(&settings, &products);

        let share_sum: f64 = report.results.iter().map(|r| r.volume_share).sum();
        let allocated_sum: f64 = report.results.iter().map(|r| r.allocated_fixed_cost).sum();

        assert_close(share_sum, 1.0);
        assert_close(allocated_sum, settings.fixed_cost);
        assert_close(report.summary.total_allocated_fixed_cost, settings.fixed_cost);
    }

    #[test]
    fn test_zero_total_volume_allocates_nothing() {
        let settings = GlobalSettings::new(50_000.0, 0.40);
        let report = compute(
            &settings,
            &[product("A", 0.0, 10.0, 20.0), product("B", 0.0, 5.0, 0.0)],
        );

        for row in &report.results {
            assert_eq!(row.volume_share, 0.0);
            assert_eq!(row.allocated_fixed_cost, 0.0);
            assert_eq!(row.fixed_cost_per_unit, 0.0);
            assert_eq!(row.total_monthly_profit, 0.0);
        }
        assert_eq!(report.summary.total_allocated_fixed_cost, 0.0);
        assert_close(report.results[0].suggested_price, 10.0 / 0.6);
    }

    #[test]
    fn test_zero_volume_product_has_no_fixed_cost_per_unit() {
        let settings = GlobalSettings::new(10_000.0, 0.0);
        let report = compute(
            &settings,
            &[product("Seller", 100.0, 1.0, 0.0), product("Idle", 0.0, 7.0, 0.0)],
        );
        let idle = &report.results[1];

        assert_eq!(idle.fixed_cost_per_unit, 0.0);
        assert_close(idle.fully_loaded_cost_per_unit, 7.0);
        assert!(idle.suggested_price.is_finite());
    }

    #[test]
    fn test_suggested_price_hits_target_margin() {
        for margin in [0.0, 0.05, 0.25, 0.4, 0.65, 0.9] {
            let settings = GlobalSettings::new(9_000.0, margin);
            let report = compute(&settings, &[product("A", 120.0, 33.0, 0.0)]);
            let row = &report.results[0];

            let realised =
                (row.suggested_price - row.fully_loaded_cost_per_unit) / row.suggested_price;
            assert_close(realised, margin);
        }
    }

    #[test]
    fn test_full_margin_suggests_zero_price() {
        let settings = GlobalSettings::new(1_000.0, 1.0);
        let report = compute(
            &settings,
            &[product("A", 10.0, 5.0, 0.0), product("B", 20.0, 1.0, 3.0)],
        );

        for row in &report.results {
            assert_eq!(row.suggested_price, 0.0);
        }
    }

    #[test]
    fn test_margin_above_one_also_suggests_zero() {
        assert_eq!(suggested_price(100.0, 1.5), 0.0);
        assert_close(suggested_price(100.0, 0.5), 200.0);
    }

    #[test]
    fn test_empty_input_yields_empty_report() {
        let report = compute(&GlobalSettings::default(), &[]);
        assert!(report.results.is_empty());
        assert_eq!(report.summary.total_profit, 0.0);
        assert_eq!(report.summary.total_volume, 0.0);
        assert_eq!(report.summary.unpriced_products, 0);
    }

    #[test]
    fn test_unset_price_yields_negated_cost_as_profit() {
        let settings = GlobalSettings::new(0.0, 0.3);
        let report = compute(&settings, &[product("A", 4.0, 25.0, 0.0)]);
        let row = &report.results[0];

        assert_close(row.profit_per_unit, -25.0);
        assert_close(row.total_monthly_profit, -100.0);
        assert_eq!(report.summary.unpriced_products, 1);
        assert!(report.has_unpriced());
    }

    #[test]
    fn test_profit_at_current_price() {
        let settings = GlobalSettings::new(1_000.0, 0.4);
        let report = compute(
            &settings,
            &[product("A", 100.0, 20.0, 40.0), product("B", 100.0, 20.0, 25.0)],
        );

        // fixed cost per unit is 5 for both
        assert_close(report.results[0].profit_per_unit, 15.0);
        assert_close(report.results[1].profit_per_unit, 0.0);
        assert_close(report.summary.total_profit, 1_500.0);
        assert!(!report.has_unpriced());
    }

    #[test]
    fn test_results_keep_input_order_and_duplicates() {
        let settings = GlobalSettings::default();
        let products = [
            product("Zeta", 5.0, 1.0, 0.0),
            product("Alpha", 50.0, 1.0, 0.0),
            product("Zeta", 1.0, 1.0, 0.0),
        ];
        let report = compute(&settings, &products);
        let names: Vec<&str> = report.results.iter().map(|r| r.product.name.as_str()).collect();

        assert_eq!(names, ["Zeta", "Alpha", "Zeta"]);
        assert_eq!(report.results[2].product, products[2]);
    }

    #[test]
    fn test_compute_is_repeatable() {
        let settings = GlobalSettings::new(777.0, 0.35);
        let products = [product("A", 3.0, 2.0, 1.0), product("B", 9.0, 0.0, 4.0)];
        assert_eq!(compute(&settings, &products), compute(&settings, &products));
    }

    #[test]
    fn test_report_serializes_flat_rows() {
        let report = compute(&GlobalSettings::new(100.0, 0.5), &[product("A", 10.0, 1.0, 0.0)]);
        let json = serde_json::to_value(&report).unwrap();
        let row = &json["results"][0];

        assert_eq!(row["name"], "A");
        assert_eq!(row["volume"], 10.0);
        assert_eq!(row["suggested_price"], 22.0);
        assert_eq!(json["settings"]["target_margin"], 0.5);
    }
}
