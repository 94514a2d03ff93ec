//! Summary statistics and breakdowns over sales.
//!
//! Every function here is a full recomputation over the records it is given.
//! Callers decide whether to pass the filtered set or the whole ledger: the summary
//! and P&L report honour the active filters, while the marketplace breakdown, top-N
//! ranking and monthly table are computed over every recorded sale.

use super::marketplace::Marketplace;
use super::profit::percent_of;
use super::sale::Sale;
use chrono::Datelike;
use rust_decimal::Decimal;
use serde::Serialize;

/// Number of entries in the most-profitable ranking
pub const TOP_PROFITABLE: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Summary {
    pub sales_count: usize,
    pub revenue: Decimal,
    /// Purchase price and per-unit fees
    pub direct_cost: Decimal,
    pub advertising: Decimal,
    pub tax: Decimal,
    /// Sum of the profit stored on each sale
    pub profit: Decimal,
    /// Whole percent, 0 for no sales or no revenue
    pub average_margin: i64,
}

impl Summary {
    pub fn from_sales<'a, I>(sales: I) -> Self
    where
        I: IntoIterator<Item = &'a Sale>,
    {
        let mut summary = sales.into_iter().fold(Summary::default(), |acc, sale| Summary {
            sales_count: acc.sales_count + 1,
            revenue: acc.revenue.saturating_add(sale.revenue()),
            direct_cost: acc.direct_cost.saturating_add(sale.unit_cost()),
            advertising: acc.advertising.saturating_add(sale.advertising_cost()),
            tax: acc.tax.saturating_add(sale.tax_cost()),
            profit: acc.profit.saturating_add(sale.profit),
            average_margin: 0,
        });
        if summary.sales_count > 0 {
            summary.average_margin = percent_of(summary.profit, summary.revenue);
        }
        summary
    }

    /// Direct cost, advertising and tax together
    pub fn expenses(&self) -> Decimal {
        self.direct_cost
            .saturating_add(self.advertising)
            .saturating_add(self.tax)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MarketplaceShare {
    pub marketplace: Marketplace,
    pub sales_count: usize,
    pub revenue: Decimal,
    pub profit: Decimal,
    /// Percent of the reference revenue total
    pub share: i64,
}

/// Revenue and profit per known marketplace over `sales`, with each marketplace's share
/// of `total_revenue`.
pub fn marketplace_breakdown(sales: &[Sale], total_revenue: Decimal) -> Vec<MarketplaceShare> {
    Marketplace::all()
        .iter()
        .map(|mp| {
            let summary = Summary::from_sales(sales.iter().filter(|s| s.marketplace == *mp));
            MarketplaceShare {
                marketplace: *mp,
                sales_count: summary.sales_count,
                revenue: summary.revenue,
                profit: summary.profit,
                share: percent_of(summary.revenue, total_revenue),
            }
        })
        .collect()
}

/// The `n` most profitable sales by stored profit, highest first. Ties keep ledger order.
pub fn top_profitable(sales: &[Sale], n: usize) -> Vec<&Sale> {
    let mut ranked: Vec<&Sale> = sales.iter().collect();
    ranked.sort_by(|a, b| b.profit.cmp(&a.profit));
    ranked.truncate(n);
    ranked
}

/// A named column of the monthly table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportMonth {
    pub label: String,
    /// Calendar month, 1-12
    pub month: u32,
}

impl ReportMonth {
    pub fn new(label: impl Into<String>, month: u32) -> Self {
        ReportMonth {
            label: label.into(),
            month,
        }
    }
}

/// April through July 2025
pub fn default_months() -> Vec<ReportMonth> {
    vec![
        ReportMonth::new("April 2025", 4),
        ReportMonth::new("May 2025", 5),
        ReportMonth::new("June 2025", 6),
        ReportMonth::new("July 2025", 7),
    ]
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthlyRow {
    pub label: String,
    pub month: u32,
    #[serde(flatten)]
    pub summary: Summary,
}

/// Totals per month. Sales are matched on month of year only, so the same month of
/// different years lands in one row.
pub fn monthly_breakdown(sales: &[Sale], months: &[ReportMonth]) -> Vec<MonthlyRow> {
    months
        .iter()
        .map(|m| MonthlyRow {
            label: m.label.clone(),
            month: m.month,
            summary: Summary::from_sales(sales.iter().filter(|s| s.date.month() == m.month)),
        })
        .collect()
}

/// Colour band of a sale's margin on the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MarginGrade {
    High,
    Medium,
    Low,
}

impl MarginGrade {
    pub fn of(margin: i64) -> Self {
        if margin > 50 {
            MarginGrade::High
        } else if margin > 20 {
            MarginGrade::Medium
        } else {
            MarginGrade::Low
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PnlLine {
    pub label: &'static str,
    pub amount: Decimal,
    /// Percent of revenue
    pub percent: i64,
    /// 0 for section totals, 1 for their components
    pub level: u8,
}

/// Profit and loss statement
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProfitAndLoss {
    pub lines: Vec<PnlLine>,
}

impl ProfitAndLoss {
    pub fn from_summary(summary: &Summary) -> Self {
        let revenue = summary.revenue;
        let line = |label: &'static str, amount: Decimal, level: u8| PnlLine {
            label,
            amount,
            percent: percent_of(amount, revenue),
            level,
        };
        let lines = vec![
            PnlLine {
                label: "Revenue",
                amount: revenue,
                percent: 100,
                level: 0,
            },
            line("Direct expenses", summary.expenses(), 0),
            line("Purchase & fees", summary.direct_cost, 1),
            line("Advertising & acquiring", summary.advertising, 1),
            line("Taxes", summary.tax, 1),
            PnlLine {
                label: "Net profit",
                amount: summary.profit,
                percent: summary.average_margin,
                level: 0,
            },
        ];
        ProfitAndLoss { lines }
    }

    pub fn line(&self, label: &str) -> Option<&PnlLine> {
        self.lines.iter().find(|l| l.label == label)
    }
}
