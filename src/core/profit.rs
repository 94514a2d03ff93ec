//! Per-sale profit and margin calculation

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Retained revenue fraction used when a sale carries no parseable tax rate (УСН 3%)
pub const DEFAULT_TAX_RATE: Decimal = dec!(0.97);

/// Numeric inputs of a single sale, all monetary values per unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaleInputs {
    pub purchase_price: Decimal,
    pub selling_price: Decimal,
    pub commission: Decimal,
    pub logistics: Decimal,
    pub delivery_to_mv: Decimal,
    /// Advertising + acquiring as a fraction of revenue
    pub advertising: Decimal,
    /// Fraction of revenue retained after tax
    pub tax_rate: Decimal,
    pub quantity: u32,
}

impl Default for SaleInputs {
    fn default() -> Self {
        SaleInputs {
            purchase_price: Decimal::ZERO,
            selling_price: Decimal::ZERO,
            commission: Decimal::ZERO,
            logistics: Decimal::ZERO,
            delivery_to_mv: Decimal::ZERO,
            advertising: Decimal::ZERO,
            tax_rate: DEFAULT_TAX_RATE,
            quantity: 1,
        }
    }
}

/// Amounts saturate at `Decimal::MAX` / `Decimal::MIN` instead of overflowing.
impl SaleInputs {
    pub fn revenue(&self) -> Decimal {
        self.selling_price.saturating_mul(Decimal::from(self.quantity))
    }

    /// Purchase price plus the flat per-unit fees, times quantity
    pub fn unit_cost(&self) -> Decimal {
        self.purchase_price
            .saturating_add(self.commission)
            .saturating_add(self.logistics)
            .saturating_add(self.delivery_to_mv)
            .saturating_mul(Decimal::from(self.quantity))
    }

    pub fn advertising_cost(&self) -> Decimal {
        self.advertising.saturating_mul(self.revenue())
    }

    pub fn tax_cost(&self) -> Decimal {
        Decimal::ONE
            .saturating_sub(self.tax_rate)
            .saturating_mul(self.revenue())
    }
}

/// Result of running the calculator over a sale
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ProfitBreakdown {
    pub revenue: Decimal,
    pub unit_cost: Decimal,
    pub advertising_cost: Decimal,
    pub tax_cost: Decimal,
    pub profit: Decimal,
    /// Whole percent of revenue, 0 when there is no revenue
    pub margin: i64,
}

impl ProfitBreakdown {
    /// Everything deducted from revenue
    pub fn expenses(&self) -> Decimal {
        self.unit_cost
            .saturating_add(self.advertising_cost)
            .saturating_add(self.tax_cost)
    }
}

pub fn calculate(inputs: &SaleInputs) -> ProfitBreakdown {
    let revenue = inputs.revenue();
    let unit_cost = inputs.unit_cost();
    let advertising_cost = inputs.advertising_cost();
    let tax_cost = inputs.tax_cost();
    let profit = revenue
        .saturating_sub(unit_cost)
        .saturating_sub(advertising_cost)
        .saturating_sub(tax_cost);

    ProfitBreakdown {
        revenue,
        unit_cost,
        advertising_cost,
        tax_cost,
        profit,
        margin: percent_of(profit, revenue),
    }
}

/// `round(part / whole * 100)`, half away from zero. Returns 0 for a zero `whole`.
pub fn percent_of(part: Decimal, whole: Decimal) -> i64 {
    if whole.is_zero() {
        return 0;
    }
    part.checked_div(whole)
        .and_then(|ratio| ratio.checked_mul(dec!(100)))
        .map(|pct| pct.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero))
        .and_then(|pct| pct.to_i64())
        .unwrap_or_default()
}
