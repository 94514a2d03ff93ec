//! Report command - profit and loss statement

use crate::app::ReportView;
use crate::cmd::{format_pct, format_rub, print_json, FilterArgs, SessionArgs};
use clap::Args;
use tabled::{
    settings::{object::Columns, Alignment, Modify, Style},
    Table, Tabled,
};

#[derive(Args, Debug)]
pub struct ReportCommand {
    #[command(flatten)]
    filters: FilterArgs,

    /// Output as JSON instead of formatted table
    #[arg(long)]
    json: bool,
}

impl ReportCommand {
    pub fn exec(&self, args: &SessionArgs) -> anyhow::Result<()> {
        let mut session = args.build_session()?;
        session.set_filters(self.filters.filters());
        let view = session.report();

        if self.json {
            print_json(&view)
        } else {
            print_report(&view);
            Ok(())
        }
    }
}

pub(crate) fn print_report(view: &ReportView) {
    println!();
    println!("PROFIT AND LOSS ({})", view.filters.describe());
    println!("  Sales: {}", view.summary.sales_count);
    if let Some(net) = view.profit_and_loss.line("Net profit") {
        println!("  Net profit: {} ({})", format_rub(net.amount), format_pct(net.percent));
    }
    println!();

    let rows: Vec<PnlRow> = view
        .profit_and_loss
        .lines
        .iter()
        .map(|line| PnlRow {
            item: format!("{}{}", "  ".repeat(line.level as usize), line.label),
            amount: format_rub(line.amount),
            percent: format_pct(line.percent),
        })
        .collect();

    let table = Table::new(rows)
        .with(Style::rounded())
        .with(Modify::new(Columns::new(1..)).with(Alignment::right()))
        .to_string();
    println!("{}", table);
    println!();
}

#[derive(Debug, Clone, Tabled)]
struct PnlRow {
    #[tabled(rename = "Item")]
    item: String,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "% of revenue")]
    percent: String,
}
