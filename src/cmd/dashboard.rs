//! Dashboard command - period totals and the most recent sales

use crate::app::DashboardView;
use crate::cmd::{format_pct, format_rub, print_json, truncate, FilterArgs, SessionArgs};
use crate::core::MarginGrade;
use clap::Args;
use tabled::{
    settings::{object::Rows, Alignment, Modify, Style},
    Table, Tabled,
};

#[derive(Args, Debug)]
pub struct DashboardCommand {
    #[command(flatten)]
    filters: FilterArgs,

    /// Output as JSON instead of formatted text
    #[arg(long)]
    json: bool,
}

impl DashboardCommand {
    pub fn exec(&self, args: &SessionArgs) -> anyhow::Result<()> {
        let mut session = args.build_session()?;
        session.set_filters(self.filters.filters());
        let view = session.dashboard();

        if self.json {
            print_json(&view)
        } else {
            print_dashboard(&view);
            Ok(())
        }
    }
}

pub(crate) fn print_dashboard(view: &DashboardView) {
    let summary = &view.summary;

    println!();
    println!("DASHBOARD ({})", view.filters.describe());
    println!();
    println!("  Sales: {}", summary.sales_count);
    println!(
        "  Revenue: {} | Expenses: {}",
        format_rub(summary.revenue),
        format_rub(summary.expenses())
    );
    println!(
        "  Profit: {} | Average margin: {}",
        format_rub(summary.profit),
        format_pct(summary.average_margin)
    );
    println!();

    if view.recent.is_empty() {
        println!("No sales found matching filters");
        return;
    }

    println!("RECENT SALES");
    let rows: Vec<RecentRow> = view
        .recent
        .iter()
        .map(|r| RecentRow {
            date: r.sale.date.format("%Y-%m-%d").to_string(),
            name: truncate(&r.sale.name, 40),
            article: r.sale.article.clone(),
            marketplace: r.sale.marketplace.to_string(),
            revenue: format_rub(r.revenue),
            profit: format_rub(r.sale.profit),
            margin: format_pct(r.sale.margin),
            grade: grade_name(r.grade).to_string(),
        })
        .collect();

    let table = Table::new(rows)
        .with(Style::rounded())
        .with(Modify::new(Rows::new(1..)).with(Alignment::right()))
        .to_string();
    println!("{}", table);
    println!();
}

fn grade_name(grade: MarginGrade) -> &'static str {
    match grade {
        MarginGrade::High => "high",
        MarginGrade::Medium => "medium",
        MarginGrade::Low => "low",
    }
}

#[derive(Debug, Clone, Tabled)]
struct RecentRow {
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Product")]
    name: String,
    #[tabled(rename = "Article")]
    article: String,
    #[tabled(rename = "Marketplace")]
    marketplace: String,
    #[tabled(rename = "Revenue")]
    revenue: String,
    #[tabled(rename = "Profit")]
    profit: String,
    #[tabled(rename = "Margin")]
    margin: String,
    #[tabled(rename = "Grade")]
    grade: String,
}
