pub mod aggregate;
pub mod demo;
pub mod filter;
pub mod ledger;
pub mod marketplace;
pub mod profit;
pub mod sale;
pub mod tax;

// Flat public surface for domain types and functions.
pub use aggregate::{
    default_months, marketplace_breakdown, monthly_breakdown, top_profitable, MarginGrade,
    MarketplaceShare, MonthlyRow, ProfitAndLoss, ReportMonth, Summary, TOP_PROFITABLE,
};
pub use demo::demo_sales;
pub use filter::{Category, Filters, Period};
pub use ledger::Ledger;
pub use marketplace::{Marketplace, UnknownMarketplace};
pub use profit::ProfitBreakdown;
pub use sale::{DraftField, Sale, SaleDraft, SaleError};
pub use tax::TaxSystem;
