//! Session state: the ledger, the active filters and the sale being entered

use crate::core::{
    default_months, marketplace_breakdown, monthly_breakdown, top_profitable, Category,
    DraftField, Filters, Ledger, MarginGrade, Marketplace, MarketplaceShare, MonthlyRow, Period,
    ProfitAndLoss, ProfitBreakdown, ReportMonth, Sale, SaleDraft, SaleError, Summary, TaxSystem,
    UnknownMarketplace, TOP_PROFITABLE,
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

/// Number of sales listed on the dashboard
pub const RECENT_SALES: usize = 10;

#[derive(Debug, Clone, Serialize)]
pub struct RecentSale {
    #[serde(flatten)]
    pub sale: Sale,
    pub revenue: Decimal,
    pub grade: MarginGrade,
}

#[derive(Debug, Clone, Serialize)]
pub struct DashboardView {
    pub filters: Filters,
    pub summary: Summary,
    pub recent: Vec<RecentSale>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AnalyticsView {
    pub filters: Filters,
    pub marketplaces: Vec<MarketplaceShare>,
    pub top_profitable: Vec<Sale>,
    pub monthly: Vec<MonthlyRow>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReportView {
    pub filters: Filters,
    pub summary: Summary,
    pub profit_and_loss: ProfitAndLoss,
}

/// Outcome of loading a batch of drafts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportStats {
    pub added: usize,
    pub rejected: usize,
}

/// Everything one user session works with. Views are recomputed from the current
/// state on every call.
#[derive(Debug, Clone)]
pub struct Session {
    ledger: Ledger,
    filters: Filters,
    draft: SaleDraft,
    today: NaiveDate,
    tax_system: Option<TaxSystem>,
    months: Vec<ReportMonth>,
}

impl Session {
    pub fn new(today: NaiveDate) -> Self {
        Session {
            ledger: Ledger::new(),
            filters: Filters::default(),
            draft: SaleDraft::new(today),
            today,
            tax_system: None,
            months: default_months(),
        }
    }

    /// Start from pre-built sales, e.g. the demo data
    pub fn with_sales(today: NaiveDate, sales: Vec<Sale>) -> Self {
        Session {
            ledger: Ledger::with_records(sales),
            ..Session::new(today)
        }
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn filters(&self) -> &Filters {
        &self.filters
    }

    pub fn draft(&self) -> &SaleDraft {
        &self.draft
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    pub fn tax_system(&self) -> Option<TaxSystem> {
        self.tax_system
    }

    pub fn set_draft_field(&mut self, field: DraftField, value: &str) -> Result<(), UnknownMarketplace> {
        self.draft.set(field, value)
    }

    /// Discard the draft, keeping the chosen tax system's rate
    pub fn reset_draft(&mut self) {
        self.draft = with_tax_system(SaleDraft::new(self.today), self.tax_system);
    }

    /// Select a tax preset for this and subsequent drafts
    pub fn apply_tax_system(&mut self, system: TaxSystem) {
        log::debug!("Tax system set to {}", system.label());
        self.tax_system = Some(system);
        self.draft.tax_rate = system.retained_fraction().to_string();
    }

    pub fn preview(&self) -> ProfitBreakdown {
        self.draft.preview()
    }

    /// Record the current draft. Once the sale is stored the draft is replaced by a
    /// follow-up draft; on failure it is kept as is so it can be corrected.
    pub fn submit(&mut self) -> Result<&Sale, SaleError> {
        let sale = self
            .ledger
            .add_sale(&self.draft, self.today)
            .inspect_err(|err| log::debug!("Draft rejected: {}", err))?;
        self.draft = with_tax_system(SaleDraft::follow_up(self.today), self.tax_system);
        Ok(sale)
    }

    /// Add each draft through the normal submission path. Invalid drafts are skipped.
    pub fn import(&mut self, drafts: Vec<SaleDraft>) -> ImportStats {
        let mut stats = ImportStats::default();
        for (row, draft) in drafts.iter().enumerate() {
            match self.ledger.add_sale(draft, self.today) {
                Ok(_) => stats.added += 1,
                Err(err) => {
                    log::warn!("Skipping sale #{}: {}", row + 1, err);
                    stats.rejected += 1;
                }
            }
        }
        log::info!("Loaded {} sale(s), rejected {}", stats.added, stats.rejected);
        stats
    }

    pub fn set_filters(&mut self, filters: Filters) {
        self.filters = filters;
    }

    pub fn set_period(&mut self, period: Period) {
        self.filters.period = period;
    }

    pub fn set_marketplace_filter(&mut self, marketplace: Option<Marketplace>) {
        self.filters.marketplace = marketplace;
    }

    pub fn set_category(&mut self, category: Category) {
        self.filters.category = category;
    }

    fn filtered(&self) -> Vec<&Sale> {
        self.filters.apply(self.ledger.list_all(), self.today)
    }

    pub fn summary(&self) -> Summary {
        Summary::from_sales(self.filtered())
    }

    pub fn dashboard(&self) -> DashboardView {
        let filtered = self.filtered();
        let recent = filtered
            .iter()
            .take(RECENT_SALES)
            .map(|sale| RecentSale {
                sale: (*sale).clone(),
                revenue: sale.revenue(),
                grade: MarginGrade::of(sale.margin),
            })
            .collect();
        DashboardView {
            filters: self.filters,
            summary: Summary::from_sales(filtered),
            recent,
        }
    }

    /// Marketplace shares are taken against the filtered revenue total, while the
    /// breakdowns themselves cover every recorded sale.
    pub fn analytics(&self) -> AnalyticsView {
        let all = self.ledger.list_all();
        let summary = self.summary();
        AnalyticsView {
            filters: self.filters,
            marketplaces: marketplace_breakdown(all, summary.revenue),
            top_profitable: top_profitable(all, TOP_PROFITABLE)
                .into_iter()
                .cloned()
                .collect(),
            monthly: monthly_breakdown(all, &self.months),
        }
    }

    pub fn report(&self) -> ReportView {
        let summary = self.summary();
        ReportView {
            filters: self.filters,
            summary,
            profit_and_loss: ProfitAndLoss::from_summary(&summary),
        }
    }
}

fn with_tax_system(mut draft: SaleDraft, tax_system: Option<TaxSystem>) -> SaleDraft {
    if let Some(system) = tax_system {
        draft.tax_rate = system.retained_fraction().to_string();
    }
    draft
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::demo_sales;
    use rust_decimal_macros::dec;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 8, 15).unwrap()
    }

    fn fill(session: &mut Session, name: &str, marketplace: &str, selling_price: &str, date: &str) {
        session.set_draft_field(DraftField::Name, name).unwrap();
        session.set_draft_field(DraftField::Article, &format!("sku-{}", name)).unwrap();
        session.set_draft_field(DraftField::Marketplace, marketplace).unwrap();
        session.set_draft_field(DraftField::PurchasePrice, "100").unwrap();
        session.set_draft_field(DraftField::SellingPrice, selling_price).unwrap();
        session.set_draft_field(DraftField::Date, date).unwrap();
    }

    #[test]
    fn submit_prepends_and_resets_draft() {
        let mut session = Session::new(today());
        fill(&mut session, "lamp", "Озон", "400", "2025-08-10");

        let sale = session.submit().unwrap();
        assert_eq!(sale.name, "lamp");
        assert_eq!(sale.profit, dec!(288)); // 400 - 100 - 12

        assert_eq!(session.ledger().len(), 1);
        assert_eq!(session.draft(), &SaleDraft::follow_up(today()));
        assert_eq!(session.draft().advertising, "0.98");
    }

    #[test]
    fn explicit_reset_clears_advertising() {
        let mut session = Session::new(today());
        fill(&mut session, "lamp", "Озон", "400", "2025-08-10");
        session.submit().unwrap();

        session.reset_draft();
        assert_eq!(session.draft(), &SaleDraft::new(today()));
    }

    #[test]
    fn out_of_range_quantity_is_stored_as_one() {
        let mut session = Session::new(today());
        for quantity in ["-5", "0", "99999999999999", "lots"] {
            fill(&mut session, "lamp", "Озон", "400", "2025-08-10");
            session.set_draft_field(DraftField::Quantity, quantity).unwrap();
            let sale = session.submit().unwrap();
            assert_eq!(sale.inputs.quantity, 1, "quantity {:?}", quantity);
            assert_eq!(sale.revenue(), dec!(400));
        }
        assert_eq!(session.ledger().len(), 4);
    }

    #[test]
    fn huge_amounts_do_not_crash_preview_or_views() {
        let mut session = Session::new(today());
        session
            .set_draft_field(DraftField::SellingPrice, "79228162514264337593543950335")
            .unwrap();
        session.set_draft_field(DraftField::Quantity, "2").unwrap();
        assert_eq!(session.preview().revenue, Decimal::MAX);

        for name in ["a", "b"] {
            fill(&mut session, name, "Яндекс", "50000000000000000000000000000", "2025-08-10");
            session.set_draft_field(DraftField::PurchasePrice, "0").unwrap();
            session.submit().unwrap();
        }

        let dashboard = session.dashboard();
        assert_eq!(dashboard.summary.sales_count, 2);
        assert_eq!(dashboard.summary.revenue, Decimal::MAX);

        let analytics = session.analytics();
        assert_eq!(analytics.marketplaces[0].revenue, Decimal::MAX);
        assert_eq!(analytics.marketplaces[0].share, 100);

        let report = session.report();
        assert_eq!(report.profit_and_loss.line("Revenue").unwrap().amount, Decimal::MAX);
    }

    #[test]
    fn failed_submit_keeps_draft_and_ledger() {
        let mut session = Session::new(today());
        fill(&mut session, "lamp", "Озон", "", "2025-08-10");
        let before = session.draft().clone();

        let err = session.submit().unwrap_err();
        assert_eq!(err, SaleError::MissingFields(vec![DraftField::SellingPrice]));
        assert!(session.ledger().is_empty());
        assert_eq!(session.draft(), &before);
    }

    #[test]
    fn tax_system_prefills_rate_across_resets() {
        let mut session = Session::new(today());
        session.apply_tax_system(TaxSystem::Usn7);
        assert_eq!(session.draft().tax_rate, "0.93");

        fill(&mut session, "lamp", "Яндекс", "1000", "2025-08-10");
        let sale = session.submit().unwrap();
        assert_eq!(sale.inputs.tax_rate, dec!(0.93));
        assert_eq!(session.draft().tax_rate, "0.93");
    }

    #[test]
    fn preview_uses_fallbacks() {
        let mut session = Session::new(today());
        session.set_draft_field(DraftField::SellingPrice, "250").unwrap();
        session.set_draft_field(DraftField::Quantity, "zero").unwrap();
        let preview = session.preview();
        assert_eq!(preview.revenue, dec!(250));
        assert_eq!(preview.profit, dec!(242.5));
        assert_eq!(preview.margin, 97);
    }

    #[test]
    fn import_skips_invalid_drafts() {
        let mut session = Session::new(today());
        let mut valid = SaleDraft::new(today());
        valid.name = "ok".to_string();
        valid.article = "a1".to_string();
        valid.purchase_price = "1".to_string();
        valid.selling_price = "2".to_string();
        let invalid = SaleDraft::new(today());

        let stats = session.import(vec![valid, invalid]);
        assert_eq!(stats, ImportStats { added: 1, rejected: 1 });
        assert_eq!(session.ledger().len(), 1);
    }

    #[test]
    fn dashboard_honours_filters() {
        let mut session = Session::new(today());
        fill(&mut session, "old", "Озон", "300", "2025-07-20");
        session.submit().unwrap();
        fill(&mut session, "new", "Яндекс", "500", "2025-08-02");
        session.submit().unwrap();
        fill(&mut session, "newer", "Озон", "200", "2025-08-12");
        session.submit().unwrap();

        session.set_period(Period::Month);
        let dashboard = session.dashboard();
        assert_eq!(dashboard.summary.sales_count, 2);
        assert_eq!(dashboard.summary.revenue, dec!(700));
        assert_eq!(dashboard.recent[0].sale.name, "newer");

        session.set_marketplace_filter(Some(Marketplace::Ozon));
        let dashboard = session.dashboard();
        assert_eq!(dashboard.summary.sales_count, 1);
        assert_eq!(dashboard.recent[0].sale.name, "newer");
    }

    #[test]
    fn empty_filter_result_has_zero_average_margin() {
        let mut session = Session::with_sales(today(), demo_sales().unwrap());
        session.set_period(Period::Month);
        let report = session.report();
        assert_eq!(report.summary.sales_count, 0);
        assert_eq!(report.summary.average_margin, 0);
    }

    #[test]
    fn analytics_ignores_filters_except_for_share_total() {
        let mut session = Session::new(today());
        fill(&mut session, "a", "Озон", "300", "2025-07-20");
        session.submit().unwrap();
        fill(&mut session, "b", "Яндекс", "100", "2025-08-02");
        session.submit().unwrap();

        session.set_marketplace_filter(Some(Marketplace::YandexMarket));
        let analytics = session.analytics();

        assert_eq!(analytics.top_profitable.len(), 2);
        assert_eq!(analytics.top_profitable[0].name, "a");

        let ozon = analytics
            .marketplaces
            .iter()
            .find(|m| m.marketplace == Marketplace::Ozon)
            .unwrap();
        assert_eq!(ozon.revenue, dec!(300));
        // 300 against the filtered total of 100
        assert_eq!(ozon.share, 300);

        let july = analytics.monthly.iter().find(|m| m.month == 7).unwrap();
        assert_eq!(july.summary.sales_count, 1);
    }

    #[test]
    fn report_lines_follow_summary() {
        let session = Session::with_sales(today(), demo_sales().unwrap());
        let report = session.report();
        let profit = report.profit_and_loss.line("Net profit").unwrap();
        assert_eq!(profit.amount, dec!(-1565.80));
        assert_eq!(report.summary.revenue, dec!(2380));
    }
}
