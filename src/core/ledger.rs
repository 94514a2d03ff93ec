//! In-memory record store of completed sales

use super::sale::{Sale, SaleDraft, SaleError, SaleId};
use chrono::NaiveDate;

/// Ordered list of sales, newest first. Sales are only ever added.
#[derive(Debug, Clone)]
pub struct Ledger {
    sales: Vec<Sale>,
    next_id: SaleId,
}

impl Ledger {
    pub fn new() -> Self {
        Ledger {
            sales: Vec::new(),
            next_id: 1,
        }
    }

    /// Build a ledger from existing records, kept in the given order.
    /// New ids continue after the largest existing one.
    pub fn with_records(sales: Vec<Sale>) -> Self {
        let next_id = sales.iter().map(|s| s.id).max().unwrap_or(0) + 1;
        Ledger { sales, next_id }
    }

    /// Validate the draft and prepend the resulting sale.
    /// On validation failure the ledger is left untouched.
    pub fn add_sale(&mut self, draft: &SaleDraft, today: NaiveDate) -> Result<&Sale, SaleError> {
        let sale = Sale::from_draft(self.next_id, draft, today)?;
        log::debug!(
            "Added sale #{} '{}' ({}): profit {}",
            sale.id,
            sale.name,
            sale.marketplace,
            sale.profit
        );
        self.next_id = sale.id + 1;
        self.sales.insert(0, sale);
        Ok(&self.sales[0])
    }

    pub fn list_all(&self) -> &[Sale] {
        &self.sales
    }

    pub fn len(&self) -> usize {
        self.sales.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sales.is_empty()
    }
}

impl Default for Ledger {
    fn default() -> Self {
        Ledger::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 7, 30).unwrap()
    }

    fn draft(name: &str, selling_price: &str) -> SaleDraft {
        let mut draft = SaleDraft::new(today());
        draft.name = name.to_string();
        draft.article = format!("sku-{}", name);
        draft.purchase_price = "100".to_string();
        draft.selling_price = selling_price.to_string();
        draft
    }

    #[test]
    fn valid_draft_is_prepended() {
        let mut ledger = Ledger::new();
        ledger.add_sale(&draft("first", "200"), today()).unwrap();
        ledger.add_sale(&draft("second", "300"), today()).unwrap();

        assert_eq!(ledger.len(), 2);
        assert_eq!(ledger.list_all()[0].name, "second");
        assert_eq!(ledger.list_all()[1].name, "first");
    }

    #[test]
    fn ids_are_unique_and_increasing() {
        let mut ledger = Ledger::new();
        let a = ledger.add_sale(&draft("a", "200"), today()).unwrap().id;
        let b = ledger.add_sale(&draft("b", "200"), today()).unwrap().id;
        let c = ledger.add_sale(&draft("c", "200"), today()).unwrap().id;
        assert!(a < b && b < c);
    }

    #[test]
    fn invalid_draft_leaves_ledger_unchanged() {
        let mut ledger = Ledger::new();
        ledger.add_sale(&draft("kept", "200"), today()).unwrap();

        for field in ["name", "article", "purchase_price", "selling_price"] {
            let mut incomplete = draft("broken", "250");
            incomplete.set(field.parse().unwrap(), "").unwrap();
            let result = ledger.add_sale(&incomplete, today());
            assert!(matches!(result, Err(SaleError::MissingFields(_))));
        }

        assert_eq!(ledger.len(), 1);
        assert_eq!(ledger.list_all()[0].name, "kept");
    }

    #[test]
    fn with_records_continues_id_sequence() {
        let seeded = Sale::from_draft(41, &draft("seed", "500"), today()).unwrap();
        let mut ledger = Ledger::with_records(vec![seeded]);
        let sale = ledger.add_sale(&draft("next", "200"), today()).unwrap();
        assert_eq!(sale.id, 42);
        assert_eq!(sale.profit, dec!(94)); // 200 - 100 - 6
    }
}
