//! Analytics command - marketplace breakdown, top sales and monthly totals

use crate::app::AnalyticsView;
use crate::cmd::{format_pct, format_rub, print_json, truncate, FilterArgs, SessionArgs};
use clap::Args;
use tabled::{
    settings::{object::Rows, Alignment, Modify, Style},
    Table, Tabled,
};

#[derive(Args, Debug)]
pub struct AnalyticsCommand {
    #[command(flatten)]
    filters: FilterArgs,

    /// Output as JSON instead of formatted tables
    #[arg(long)]
    json: bool,
}

impl AnalyticsCommand {
    pub fn exec(&self, args: &SessionArgs) -> anyhow::Result<()> {
        let mut session = args.build_session()?;
        session.set_filters(self.filters.filters());
        let view = session.analytics();

        if self.json {
            print_json(&view)
        } else {
            print_analytics(&view);
            Ok(())
        }
    }
}

pub(crate) fn print_analytics(view: &AnalyticsView) {
    println!();
    println!("ANALYTICS ({})", view.filters.describe());
    println!();

    println!("BY MARKETPLACE");
    let rows: Vec<MarketplaceRow> = view
        .marketplaces
        .iter()
        .map(|m| MarketplaceRow {
            marketplace: m.marketplace.to_string(),
            sales: m.sales_count.to_string(),
            revenue: format_rub(m.revenue),
            profit: format_rub(m.profit),
            share: format_pct(m.share),
        })
        .collect();
    print_table(rows);

    println!("TOP PROFITABLE");
    if view.top_profitable.is_empty() {
        println!("  (no sales)");
        println!();
    } else {
        let rows: Vec<TopRow> = view
            .top_profitable
            .iter()
            .enumerate()
            .map(|(i, s)| TopRow {
                rank: (i + 1).to_string(),
                name: truncate(&s.name, 40),
                marketplace: s.marketplace.to_string(),
                profit: format_rub(s.profit),
                margin: format_pct(s.margin),
            })
            .collect();
        print_table(rows);
    }

    println!("BY MONTH");
    let rows: Vec<MonthRow> = view
        .monthly
        .iter()
        .map(|m| MonthRow {
            month: m.label.clone(),
            sales: m.summary.sales_count.to_string(),
            revenue: format_rub(m.summary.revenue),
            expenses: format_rub(m.summary.expenses()),
            profit: format_rub(m.summary.profit),
            margin: format_pct(m.summary.average_margin),
        })
        .collect();
    print_table(rows);
}

fn print_table<T: Tabled>(rows: Vec<T>) {
    let table = Table::new(rows)
        .with(Style::rounded())
        .with(Modify::new(Rows::new(1..)).with(Alignment::right()))
        .to_string();
    println!("{}", table);
    println!();
}

#[derive(Debug, Clone, Tabled)]
struct MarketplaceRow {
    #[tabled(rename = "Marketplace")]
    marketplace: String,
    #[tabled(rename = "Sales")]
    sales: String,
    #[tabled(rename = "Revenue")]
    revenue: String,
    #[tabled(rename = "Profit")]
    profit: String,
    #[tabled(rename = "Share")]
    share: String,
}

#[derive(Debug, Clone, Tabled)]
struct TopRow {
    #[tabled(rename = "#")]
    rank: String,
    #[tabled(rename = "Product")]
    name: String,
    #[tabled(rename = "Marketplace")]
    marketplace: String,
    #[tabled(rename = "Profit")]
    profit: String,
    #[tabled(rename = "Margin")]
    margin: String,
}

#[derive(Debug, Clone, Tabled)]
struct MonthRow {
    #[tabled(rename = "Month")]
    month: String,
    #[tabled(rename = "Sales")]
    sales: String,
    #[tabled(rename = "Revenue")]
    revenue: String,
    #[tabled(rename = "Expenses")]
    expenses: String,
    #[tabled(rename = "Profit")]
    profit: String,
    #[tabled(rename = "Margin")]
    margin: String,
}
