//! List command - every recorded sale, newest first

use crate::cmd::{format_pct, format_rub, print_json, truncate, SessionArgs};
use crate::core::Sale;
use clap::Args;
use tabled::{
    settings::{object::Rows, Alignment, Modify, Style},
    Table, Tabled,
};

#[derive(Args, Debug)]
pub struct ListCommand {
    /// Output as JSON instead of formatted table
    #[arg(long)]
    json: bool,
}

impl ListCommand {
    pub fn exec(&self, args: &SessionArgs) -> anyhow::Result<()> {
        let session = args.build_session()?;
        let sales = session.ledger().list_all();

        if self.json {
            print_json(&sales)
        } else {
            print_sales(sales);
            Ok(())
        }
    }
}

pub(crate) fn print_sales(sales: &[Sale]) {
    if sales.is_empty() {
        println!("No sales recorded");
        return;
    }

    println!();
    println!("SALES ({})", sales.len());
    println!();

    let rows: Vec<SaleRow> = sales
        .iter()
        .map(|s| SaleRow {
            id: s.id.to_string(),
            date: s.date.format("%Y-%m-%d").to_string(),
            name: truncate(&s.name, 40),
            article: s.article.clone(),
            marketplace: s.marketplace.to_string(),
            quantity: s.inputs.quantity.to_string(),
            selling_price: format_rub(s.inputs.selling_price),
            profit: format_rub(s.profit),
            margin: format_pct(s.margin),
        })
        .collect();

    let table = Table::new(rows)
        .with(Style::rounded())
        .with(Modify::new(Rows::new(1..)).with(Alignment::right()))
        .to_string();
    println!("{}", table);
    println!();
}

#[derive(Debug, Clone, Tabled)]
struct SaleRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Product")]
    name: String,
    #[tabled(rename = "Article")]
    article: String,
    #[tabled(rename = "Marketplace")]
    marketplace: String,
    #[tabled(rename = "Qty")]
    quantity: String,
    #[tabled(rename = "Price")]
    selling_price: String,
    #[tabled(rename = "Profit")]
    profit: String,
    #[tabled(rename = "Margin")]
    margin: String,
}
