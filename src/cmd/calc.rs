//! Calc command - profit preview of a single sale without recording it

use crate::cmd::{format_pct, format_rub, print_json, SessionArgs};
use crate::core::{DraftField, ProfitBreakdown};
use clap::Args;

#[derive(Args, Debug)]
pub struct CalcCommand {
    /// Selling price per unit
    #[arg(short, long)]
    selling_price: String,

    /// Purchase price per unit
    #[arg(short, long)]
    purchase_price: Option<String>,

    /// Marketplace commission per unit
    #[arg(short, long)]
    commission: Option<String>,

    /// Logistics cost per unit
    #[arg(short, long)]
    logistics: Option<String>,

    /// Delivery to the marketplace warehouse per unit
    #[arg(short, long)]
    delivery_to_mv: Option<String>,

    /// Advertising as a fraction of revenue (e.g. 0.1)
    #[arg(short, long)]
    advertising: Option<String>,

    /// Fraction of revenue kept after tax (e.g. 0.97)
    #[arg(short, long)]
    tax_rate: Option<String>,

    /// Units sold
    #[arg(short, long)]
    quantity: Option<String>,

    /// Output as JSON instead of formatted text
    #[arg(long)]
    json: bool,
}

impl CalcCommand {
    pub fn exec(&self, args: &SessionArgs) -> anyhow::Result<()> {
        let mut session = args.build_session()?;

        let fields = [
            (DraftField::SellingPrice, Some(&self.selling_price)),
            (DraftField::PurchasePrice, self.purchase_price.as_ref()),
            (DraftField::Commission, self.commission.as_ref()),
            (DraftField::Logistics, self.logistics.as_ref()),
            (DraftField::DeliveryToMv, self.delivery_to_mv.as_ref()),
            (DraftField::Advertising, self.advertising.as_ref()),
            (DraftField::TaxRate, self.tax_rate.as_ref()),
            (DraftField::Quantity, self.quantity.as_ref()),
        ];
        for (field, value) in fields {
            if let Some(value) = value {
                session.set_draft_field(field, value)?;
            }
        }

        let preview = session.preview();
        if self.json {
            print_json(&preview)
        } else {
            print_preview(&preview);
            Ok(())
        }
    }
}

pub(crate) fn print_preview(preview: &ProfitBreakdown) {
    println!();
    println!("PROFIT PREVIEW");
    println!(
        "  Revenue: {} | Expenses: {}",
        format_rub(preview.revenue),
        format_rub(preview.expenses())
    );
    println!(
        "  Costs: {} | Advertising: {} | Tax: {}",
        format_rub(preview.unit_cost),
        format_rub(preview.advertising_cost),
        format_rub(preview.tax_cost)
    );
    println!(
        "  Profit: {} | Margin: {}",
        format_rub(preview.profit),
        format_pct(preview.margin)
    );
    println!();
}
