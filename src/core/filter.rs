//! Period, marketplace and category filters over the ledger

use super::marketplace::Marketplace;
use super::sale::Sale;
use chrono::{Datelike, NaiveDate};
use serde::Serialize;

/// Reporting period, always ending "now"
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum Period {
    #[default]
    All,
    /// From the 1st of the current month
    Month,
    /// From the 1st of the current calendar quarter
    Quarter,
}

impl Period {
    /// First day included in the period, `None` when unbounded
    pub fn window_start(&self, today: NaiveDate) -> Option<NaiveDate> {
        match self {
            Period::All => None,
            Period::Month => NaiveDate::from_ymd_opt(today.year(), today.month(), 1),
            Period::Quarter => {
                let quarter_start_month = today.month0() / 3 * 3 + 1;
                NaiveDate::from_ymd_opt(today.year(), quarter_start_month, 1)
            }
        }
    }

    pub fn display(&self) -> &'static str {
        match self {
            Period::All => "All Time",
            Period::Month => "Current Month",
            Period::Quarter => "Current Quarter",
        }
    }
}

/// Product category selector. Sales carry no category, so this never narrows results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum Category {
    #[default]
    All,
    Garden,
    Building,
    Household,
}

impl Category {
    pub fn display(&self) -> &'static str {
        match self {
            Category::All => "All Categories",
            Category::Garden => "Garden",
            Category::Building => "Building",
            Category::Household => "Household",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Filters {
    pub period: Period,
    /// `None` matches every marketplace
    pub marketplace: Option<Marketplace>,
    pub category: Category,
}

impl Filters {
    pub fn matches(&self, sale: &Sale, today: NaiveDate) -> bool {
        if self.marketplace.is_some_and(|mp| sale.marketplace != mp) {
            return false;
        }
        self.period
            .window_start(today)
            .is_none_or(|start| sale.date >= start)
    }

    pub fn apply<'a>(&self, sales: &'a [Sale], today: NaiveDate) -> Vec<&'a Sale> {
        if self.category != Category::All {
            log::debug!(
                "Category filter '{}' has no effect: sales are not categorised",
                self.category.display()
            );
        }
        sales.iter().filter(|s| self.matches(s, today)).collect()
    }

    /// Short human description, e.g. "Current Month, Озон"
    pub fn describe(&self) -> String {
        let marketplace = self
            .marketplace
            .map_or("All Marketplaces".to_string(), |mp| mp.to_string());
        format!("{}, {}", self.period.display(), marketplace)
    }
}
