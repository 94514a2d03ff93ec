//! Sale records, the editable draft they are built from, and draft validation

use super::marketplace::{Marketplace, UnknownMarketplace};
use super::profit::{self, ProfitBreakdown, SaleInputs, DEFAULT_TAX_RATE};
use chrono::NaiveDate;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

pub type SaleId = u64;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Advertising share prefilled on the draft offered after a sale is recorded
pub const FOLLOW_UP_ADVERTISING: &str = "0.98";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SaleError {
    #[error("required fields are empty: {}", join_fields(.0))]
    MissingFields(Vec<DraftField>),
}

fn join_fields(fields: &[DraftField]) -> String {
    fields
        .iter()
        .map(|f| f.name())
        .collect::<Vec<_>>()
        .join(", ")
}

/// A completed sale. Derived `profit` and `margin` are fixed at creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Sale {
    pub id: SaleId,
    pub name: String,
    /// Seller's SKU / product code
    pub article: String,
    pub marketplace: Marketplace,
    #[serde(flatten)]
    pub inputs: SaleInputs,
    pub date: NaiveDate,
    pub profit: Decimal,
    pub margin: i64,
}

impl Sale {
    /// Validate a draft and build a sale from it, running the profit calculator once.
    pub fn from_draft(id: SaleId, draft: &SaleDraft, today: NaiveDate) -> Result<Sale, SaleError> {
        draft.validate()?;
        let inputs = draft.inputs();
        let ProfitBreakdown { profit, margin, .. } = profit::calculate(&inputs);
        Ok(Sale {
            id,
            name: draft.name.trim().to_string(),
            article: draft.article.trim().to_string(),
            marketplace: draft.marketplace,
            inputs,
            date: draft.sale_date(today),
            profit,
            margin,
        })
    }

    pub fn revenue(&self) -> Decimal {
        self.inputs.revenue()
    }

    pub fn unit_cost(&self) -> Decimal {
        self.inputs.unit_cost()
    }

    pub fn advertising_cost(&self) -> Decimal {
        self.inputs.advertising_cost()
    }

    pub fn tax_cost(&self) -> Decimal {
        self.inputs.tax_cost()
    }
}

/// Editable fields of a sale draft
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftField {
    Name,
    Article,
    Marketplace,
    PurchasePrice,
    SellingPrice,
    Commission,
    Logistics,
    DeliveryToMv,
    Advertising,
    TaxRate,
    Quantity,
    Date,
}

impl DraftField {
    pub const ALL: [DraftField; 12] = [
        DraftField::Name,
        DraftField::Article,
        DraftField::Marketplace,
        DraftField::PurchasePrice,
        DraftField::SellingPrice,
        DraftField::Commission,
        DraftField::Logistics,
        DraftField::DeliveryToMv,
        DraftField::Advertising,
        DraftField::TaxRate,
        DraftField::Quantity,
        DraftField::Date,
    ];

    pub const REQUIRED: [DraftField; 4] = [
        DraftField::Name,
        DraftField::Article,
        DraftField::PurchasePrice,
        DraftField::SellingPrice,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            DraftField::Name => "name",
            DraftField::Article => "article",
            DraftField::Marketplace => "marketplace",
            DraftField::PurchasePrice => "purchase_price",
            DraftField::SellingPrice => "selling_price",
            DraftField::Commission => "commission",
            DraftField::Logistics => "logistics",
            DraftField::DeliveryToMv => "delivery_to_mv",
            DraftField::Advertising => "advertising",
            DraftField::TaxRate => "tax_rate",
            DraftField::Quantity => "quantity",
            DraftField::Date => "date",
        }
    }
}

impl fmt::Display for DraftField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown field: {0}")]
pub struct UnknownField(pub String);

impl FromStr for DraftField {
    type Err = UnknownField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_lowercase().replace('-', "_");
        DraftField::ALL
            .iter()
            .find(|f| f.name() == needle)
            .copied()
            .ok_or_else(|| UnknownField(s.trim().to_string()))
    }
}

/// In-progress sale as entered by the user. Numeric fields hold raw text and are only
/// interpreted when previewed or submitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SaleDraft {
    pub name: String,
    pub article: String,
    pub marketplace: Marketplace,
    pub purchase_price: String,
    pub selling_price: String,
    pub commission: String,
    pub logistics: String,
    pub delivery_to_mv: String,
    pub advertising: String,
    pub tax_rate: String,
    pub quantity: String,
    pub date: String,
}

impl SaleDraft {
    /// Empty draft dated `today`
    pub fn new(today: NaiveDate) -> Self {
        SaleDraft {
            name: String::new(),
            article: String::new(),
            marketplace: Marketplace::default(),
            purchase_price: String::new(),
            selling_price: String::new(),
            commission: String::new(),
            logistics: String::new(),
            delivery_to_mv: String::new(),
            advertising: String::new(),
            tax_rate: DEFAULT_TAX_RATE.to_string(),
            quantity: "1".to_string(),
            date: today.format(DATE_FORMAT).to_string(),
        }
    }

    /// Draft offered once a sale has been recorded. Unlike a new draft it comes with
    /// the advertising share prefilled.
    pub fn follow_up(today: NaiveDate) -> Self {
        SaleDraft {
            advertising: FOLLOW_UP_ADVERTISING.to_string(),
            ..SaleDraft::new(today)
        }
    }

    pub fn set(&mut self, field: DraftField, value: &str) -> Result<(), UnknownMarketplace> {
        let value = value.to_string();
        match field {
            DraftField::Name => self.name = value,
            DraftField::Article => self.article = value,
            DraftField::Marketplace => self.marketplace = value.parse()?,
            DraftField::PurchasePrice => self.purchase_price = value,
            DraftField::SellingPrice => self.selling_price = value,
            DraftField::Commission => self.commission = value,
            DraftField::Logistics => self.logistics = value,
            DraftField::DeliveryToMv => self.delivery_to_mv = value,
            DraftField::Advertising => self.advertising = value,
            DraftField::TaxRate => self.tax_rate = value,
            DraftField::Quantity => self.quantity = value,
            DraftField::Date => self.date = value,
        }
        Ok(())
    }

    pub fn get(&self, field: DraftField) -> String {
        match field {
            DraftField::Name => self.name.clone(),
            DraftField::Article => self.article.clone(),
            DraftField::Marketplace => self.marketplace.to_string(),
            DraftField::PurchasePrice => self.purchase_price.clone(),
            DraftField::SellingPrice => self.selling_price.clone(),
            DraftField::Commission => self.commission.clone(),
            DraftField::Logistics => self.logistics.clone(),
            DraftField::DeliveryToMv => self.delivery_to_mv.clone(),
            DraftField::Advertising => self.advertising.clone(),
            DraftField::TaxRate => self.tax_rate.clone(),
            DraftField::Quantity => self.quantity.clone(),
            DraftField::Date => self.date.clone(),
        }
    }

    /// Check that every required field has a non-blank value
    pub fn validate(&self) -> Result<(), SaleError> {
        let missing: Vec<DraftField> = DraftField::REQUIRED
            .iter()
            .filter(|f| self.get(**f).trim().is_empty())
            .copied()
            .collect();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(SaleError::MissingFields(missing))
        }
    }

    /// Numeric inputs with lenient parsing: blank or malformed values become 0,
    /// quantity falls back to 1 and tax rate to 0.97.
    pub fn inputs(&self) -> SaleInputs {
        SaleInputs {
            purchase_price: parse_amount(&self.purchase_price).unwrap_or_default(),
            selling_price: parse_amount(&self.selling_price).unwrap_or_default(),
            commission: parse_amount(&self.commission).unwrap_or_default(),
            logistics: parse_amount(&self.logistics).unwrap_or_default(),
            delivery_to_mv: parse_amount(&self.delivery_to_mv).unwrap_or_default(),
            advertising: parse_amount(&self.advertising).unwrap_or_default(),
            tax_rate: parse_amount(&self.tax_rate).unwrap_or(DEFAULT_TAX_RATE),
            quantity: parse_quantity(&self.quantity),
        }
    }

    /// Live profit preview of the draft, no validation
    pub fn preview(&self) -> ProfitBreakdown {
        profit::calculate(&self.inputs())
    }

    pub fn sale_date(&self, today: NaiveDate) -> NaiveDate {
        match NaiveDate::parse_from_str(self.date.trim(), DATE_FORMAT) {
            Ok(date) => date,
            Err(_) => {
                if !self.date.trim().is_empty() {
                    log::warn!("Invalid sale date '{}', using {}", self.date, today);
                }
                today
            }
        }
    }
}

/// Parse a user-entered amount. Accepts a comma as decimal separator.
fn parse_amount(raw: &str) -> Option<Decimal> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    Decimal::from_str(&trimmed.replace(',', ".")).ok()
}

fn parse_quantity(raw: &str) -> u32 {
    parse_amount(raw)
        .and_then(|q| q.trunc().to_u32())
        .filter(|q| *q >= 1)
        .unwrap_or(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 7, 30).unwrap()
    }

    fn filled_draft() -> SaleDraft {
        let mut draft = SaleDraft::new(today());
        draft.name = "аэратор для смесителя".to_string();
        draft.article = "maximum12358223".to_string();
        draft.purchase_price = "33".to_string();
        draft.selling_price = "588".to_string();
        draft.commission = "326".to_string();
        draft
    }

    #[test]
    fn new_draft_has_defaults() {
        let draft = SaleDraft::new(today());
        assert_eq!(draft.tax_rate, "0.97");
        assert_eq!(draft.quantity, "1");
        assert_eq!(draft.marketplace, Marketplace::YandexMarket);
        assert_eq!(draft.date, "2025-07-30");
    }

    #[test]
    fn validate_reports_every_missing_required_field() {
        let draft = SaleDraft::new(today());
        assert_eq!(
            draft.validate(),
            Err(SaleError::MissingFields(DraftField::REQUIRED.to_vec()))
        );

        let mut draft = filled_draft();
        draft.article = "   ".to_string();
        assert_eq!(
            draft.validate(),
            Err(SaleError::MissingFields(vec![DraftField::Article]))
        );
    }

    #[test]
    fn missing_fields_error_message_lists_names() {
        let err = SaleError::MissingFields(vec![DraftField::Name, DraftField::SellingPrice]);
        assert_eq!(err.to_string(), "required fields are empty: name, selling_price");
    }

    #[test]
    fn zero_price_counts_as_present() {
        let mut draft = filled_draft();
        draft.purchase_price = "0".to_string();
        assert!(draft.validate().is_ok());
    }

    #[test]
    fn malformed_numbers_fall_back_to_defaults() {
        let mut draft = filled_draft();
        draft.commission = "abc".to_string();
        draft.tax_rate = "n/a".to_string();
        draft.quantity = "0".to_string();
        draft.advertising = String::new();

        let inputs = draft.inputs();
        assert_eq!(inputs.commission, Decimal::ZERO);
        assert_eq!(inputs.tax_rate, dec!(0.97));
        assert_eq!(inputs.quantity, 1);
        assert_eq!(inputs.advertising, Decimal::ZERO);
    }

    #[test]
    fn quantity_parsing_truncates_and_rejects_negatives() {
        assert_eq!(parse_quantity("3"), 3);
        assert_eq!(parse_quantity("2.7"), 2);
        assert_eq!(parse_quantity("-4"), 1);
        assert_eq!(parse_quantity(""), 1);
    }

    #[test]
    fn comma_decimal_separator_is_accepted() {
        assert_eq!(parse_amount("0,98"), Some(dec!(0.98)));
        assert_eq!(parse_amount(" 12.5 "), Some(dec!(12.5)));
        assert_eq!(parse_amount("12abc"), None);
    }

    #[test]
    fn from_draft_stores_calculated_profit() {
        let mut draft = filled_draft();
        draft.advertising = "0.98".to_string();
        let sale = Sale::from_draft(7, &draft, today()).unwrap();

        assert_eq!(sale.id, 7);
        assert_eq!(sale.revenue(), dec!(588));
        assert_eq!(sale.profit, dec!(-364.88));
        assert_eq!(sale.margin, -62);
        assert_eq!(sale.date, today());
    }

    #[test]
    fn from_draft_rejects_incomplete_draft() {
        let mut draft = filled_draft();
        draft.selling_price.clear();
        assert_eq!(
            Sale::from_draft(1, &draft, today()),
            Err(SaleError::MissingFields(vec![DraftField::SellingPrice]))
        );
    }

    #[test]
    fn invalid_date_falls_back_to_today() {
        let mut draft = filled_draft();
        draft.date = "29.07.2025".to_string();
        assert_eq!(draft.sale_date(today()), today());

        draft.date = "2025-07-01".to_string();
        assert_eq!(
            draft.sale_date(today()),
            NaiveDate::from_ymd_opt(2025, 7, 1).unwrap()
        );
    }

    #[test]
    fn set_parses_marketplace_and_field_names() {
        let mut draft = SaleDraft::new(today());
        let field: DraftField = "delivery-to-mv".parse().unwrap();
        draft.set(field, "40").unwrap();
        assert_eq!(draft.delivery_to_mv, "40");

        draft.set(DraftField::Marketplace, "Озон").unwrap();
        assert_eq!(draft.marketplace, Marketplace::Ozon);
        assert!(draft.set(DraftField::Marketplace, "Avito").is_err());
        assert_eq!(
            "colour".parse::<DraftField>(),
            Err(UnknownField("colour".to_string()))
        );
    }

    #[test]
    fn unknown_field_error_message() {
        let err = " Colour ".parse::<DraftField>().unwrap_err();
        assert_eq!(err.to_string(), "unknown field: Colour");
    }

    #[test]
    fn follow_up_draft_prefills_advertising() {
        let draft = SaleDraft::follow_up(today());
        assert_eq!(draft.advertising, "0.98");
        assert_eq!(draft.name, "");
        assert_eq!(draft.tax_rate, "0.97");
        assert_eq!(draft.quantity, "1");
        assert_eq!(SaleDraft::new(today()).advertising, "");
    }

    #[test]
    fn huge_quantity_falls_back_to_one() {
        assert_eq!(parse_quantity("99999999999999"), 1);
        assert_eq!(parse_quantity("-0.5"), 1);
    }
}
