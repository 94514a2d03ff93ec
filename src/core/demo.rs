//! Sample sales for trying the tool without any input

use super::marketplace::Marketplace;
use super::sale::{Sale, SaleDraft, SaleError};
use chrono::NaiveDate;

struct DemoSale {
    id: u64,
    name: &'static str,
    article: &'static str,
    purchase_price: &'static str,
    selling_price: &'static str,
    commission: &'static str,
}

const DEMO_SALES: [DemoSale; 3] = [
    DemoSale {
        id: 1,
        name: "мыло DALAN Traditional Морская свежесть",
        article: "maximum11310004",
        purchase_price: "209",
        selling_price: "894",
        commission: "434",
    },
    DemoSale {
        id: 2,
        name: "аэратор для смесителя РЫЖИЙ КОТ",
        article: "maximum12358223",
        purchase_price: "33",
        selling_price: "588",
        commission: "326",
    },
    DemoSale {
        id: 3,
        name: "бумага шлифовальная Mirox",
        article: "maximum9366048",
        purchase_price: "114",
        selling_price: "898",
        commission: "426",
    },
];

/// Three Yandex Market sales from 29 July 2025, with profit and margin computed by the
/// calculator.
pub fn demo_sales() -> Result<Vec<Sale>, SaleError> {
    let date = NaiveDate::from_ymd_opt(2025, 7, 29).unwrap_or_default();
    DEMO_SALES
        .iter()
        .map(|demo| {
            let mut draft = SaleDraft::new(date);
            draft.name = demo.name.to_string();
            draft.article = demo.article.to_string();
            draft.marketplace = Marketplace::YandexMarket;
            draft.purchase_price = demo.purchase_price.to_string();
            draft.selling_price = demo.selling_price.to_string();
            draft.commission = demo.commission.to_string();
            draft.logistics = "0".to_string();
            draft.delivery_to_mv = "0".to_string();
            draft.advertising = "0.98".to_string();
            draft.tax_rate = "0.97".to_string();
            Sale::from_draft(demo.id, &draft, date)
        })
        .collect()
}
