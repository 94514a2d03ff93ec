//! Reading sale drafts from JSON or CSV input

use crate::core::{Marketplace, SaleDraft};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::io::Read;

/// JSON input root
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SalesInput {
    pub sales: Vec<DraftRecord>,
}

/// A field value that may have been written as text or as a bare number
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    Text(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
}

impl RawValue {
    fn into_text(self) -> String {
        match self {
            RawValue::Text(s) => s,
            RawValue::Integer(i) => i.to_string(),
            RawValue::Float(f) => f.to_string(),
            RawValue::Bool(b) => b.to_string(),
        }
    }
}

/// One sale as it appears in an input file. Every field is optional so that
/// incomplete rows reach validation instead of failing to decode.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DraftRecord {
    #[serde(default)]
    pub name: Option<RawValue>,
    #[serde(default)]
    pub article: Option<RawValue>,
    #[serde(default)]
    pub marketplace: Option<String>,
    #[serde(default)]
    pub purchase_price: Option<RawValue>,
    #[serde(default)]
    pub selling_price: Option<RawValue>,
    #[serde(default)]
    pub commission: Option<RawValue>,
    #[serde(default)]
    pub logistics: Option<RawValue>,
    #[serde(default)]
    pub delivery_to_mv: Option<RawValue>,
    #[serde(default)]
    pub advertising: Option<RawValue>,
    #[serde(default)]
    pub tax_rate: Option<RawValue>,
    #[serde(default)]
    pub quantity: Option<RawValue>,
    #[serde(default)]
    pub date: Option<String>,
}

impl DraftRecord {
    /// Convert into a draft. Missing values keep the draft defaults; an unknown
    /// marketplace falls back to the default one.
    pub fn into_draft(self, today: NaiveDate) -> SaleDraft {
        let mut draft = SaleDraft::new(today);
        let text = |value: Option<RawValue>, default: &str| {
            value.map_or(default.to_string(), RawValue::into_text)
        };

        draft.name = text(self.name, "");
        draft.article = text(self.article, "");
        draft.purchase_price = text(self.purchase_price, "");
        draft.selling_price = text(self.selling_price, "");
        draft.commission = text(self.commission, "");
        draft.logistics = text(self.logistics, "");
        draft.delivery_to_mv = text(self.delivery_to_mv, "");
        draft.advertising = text(self.advertising, "");
        draft.tax_rate = text(self.tax_rate, &draft.tax_rate);
        draft.quantity = text(self.quantity, &draft.quantity);
        if let Some(date) = self.date.filter(|d| !d.trim().is_empty()) {
            draft.date = date;
        }
        if let Some(name) = self.marketplace.filter(|m| !m.trim().is_empty()) {
            draft.marketplace = name.parse().unwrap_or_else(|err| {
                log::warn!("{}, using {}", err, Marketplace::default());
                Marketplace::default()
            });
        }
        draft
    }
}

/// Read drafts from JSON (`{"sales": [...]}`)
pub fn read_json<R: Read>(reader: R, today: NaiveDate) -> anyhow::Result<Vec<SaleDraft>> {
    let input: SalesInput = serde_json::from_reader(reader)?;
    Ok(input
        .sales
        .into_iter()
        .map(|record| record.into_draft(today))
        .collect())
}

/// Read drafts from CSV with a header row of draft field names
pub fn read_csv<R: Read>(reader: R, today: NaiveDate) -> anyhow::Result<Vec<SaleDraft>> {
    let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let mut drafts = Vec::new();
    for result in rdr.deserialize() {
        let record: DraftRecord = result?;
        drafts.push(record.into_draft(today));
    }
    Ok(drafts)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 8, 15).unwrap()
    }

    #[test]
    fn json_accepts_numbers_and_text() {
        let json = r#"{
            "sales": [
                {
                    "name": "мыло",
                    "article": "maximum11310004",
                    "marketplace": "Озон",
                    "purchase_price": 209,
                    "selling_price": "894",
                    "advertising": 0.98,
                    "quantity": 2,
                    "date": "2025-07-29"
                }
            ]
        }"#;
        let drafts = read_json(json.as_bytes(), today()).unwrap();
        assert_eq!(drafts.len(), 1);

        let draft = &drafts[0];
        assert_eq!(draft.marketplace, Marketplace::Ozon);
        assert_eq!(draft.purchase_price, "209");
        assert_eq!(draft.selling_price, "894");
        assert_eq!(draft.advertising, "0.98");
        assert_eq!(draft.quantity, "2");
        assert_eq!(draft.tax_rate, "0.97");
        assert_eq!(draft.commission, "");
        assert_eq!(draft.date, "2025-07-29");
    }

    #[test]
    fn json_missing_fields_keep_defaults() {
        let json = r#"{ "sales": [ { "name": "x" } ] }"#;
        let drafts = read_json(json.as_bytes(), today()).unwrap();
        let draft = &drafts[0];
        assert_eq!(draft.article, "");
        assert_eq!(draft.quantity, "1");
        assert_eq!(draft.date, "2025-08-15");
        assert!(draft.validate().is_err());
    }

    #[test]
    fn unknown_marketplace_falls_back_to_default() {
        let json = r#"{ "sales": [ { "name": "x", "marketplace": "Avito" } ] }"#;
        let drafts = read_json(json.as_bytes(), today()).unwrap();
        assert_eq!(drafts[0].marketplace, Marketplace::YandexMarket);
    }

    #[test]
    fn csv_rows_become_drafts() {
        let csv = "\
name,article,marketplace,purchase_price,selling_price,commission,advertising,tax_rate,quantity,date
бумага,maximum9366048,Яндекс,114,898,426,0.98,0.97,1,2025-07-29
аэратор,maximum12358223,Озон,33,588,,,,,
";
        let drafts = read_csv(csv.as_bytes(), today()).unwrap();
        assert_eq!(drafts.len(), 2);

        assert_eq!(drafts[0].name, "бумага");
        assert_eq!(drafts[0].commission, "426");
        assert_eq!(drafts[0].date, "2025-07-29");

        assert_eq!(drafts[1].marketplace, Marketplace::Ozon);
        assert_eq!(drafts[1].commission, "");
        assert_eq!(drafts[1].quantity, "1");
        assert_eq!(drafts[1].date, "2025-08-15");
    }
}
