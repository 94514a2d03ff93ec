pub mod analytics;
pub mod calc;
pub mod dashboard;
pub mod list;
pub mod report;
pub mod shell;

use crate::app::Session;
use crate::core::{demo_sales, Category, Filters, Marketplace, Period, SaleDraft, TaxSystem};
use crate::input;
use anyhow::Context;
use chrono::NaiveDate;
use clap::{Args, ValueEnum};
use rust_decimal::Decimal;
use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::{Path, PathBuf};

/// Global options describing where the session's sales come from
#[derive(Args, Debug)]
pub struct SessionArgs {
    /// JSON or CSV file with sales to load ("-" for stdin)
    #[arg(short, long, global = true)]
    file: Option<PathBuf>,

    /// Start with the sample sales
    #[arg(long, global = true)]
    demo: bool,

    /// Treat this date as today (YYYY-MM-DD)
    #[arg(long, global = true)]
    today: Option<NaiveDate>,

    /// Tax system used to prefill new sales
    #[arg(long, value_enum, global = true)]
    tax_system: Option<TaxSystemArg>,
}

impl SessionArgs {
    pub fn build_session(&self) -> anyhow::Result<Session> {
        let today = self
            .today
            .unwrap_or_else(|| chrono::Local::now().date_naive());

        let mut session = if self.demo {
            Session::with_sales(today, demo_sales()?)
        } else {
            Session::new(today)
        };

        if let Some(system) = self.tax_system {
            session.apply_tax_system(system.into());
        }

        if let Some(ref path) = self.file {
            let drafts = read_drafts(path, today)?;
            let stats = session.import(drafts);
            if stats.rejected > 0 {
                log::warn!("{} sale(s) in {} failed validation", stats.rejected, path.display());
            }
        }

        if session.ledger().is_empty() {
            log::debug!("Starting with an empty ledger");
        } else {
            log::debug!("Starting with {} sale(s)", session.ledger().len());
        }
        Ok(session)
    }
}

/// Read drafts from a JSON or CSV file, or from stdin with "-"
pub fn read_drafts(path: &Path, today: NaiveDate) -> anyhow::Result<Vec<SaleDraft>> {
    if path.as_os_str() == "-" {
        return read_from_stdin(today);
    }
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    let reader = BufReader::new(file);

    match path.extension().and_then(|s| s.to_str()) {
        Some("json") => input::read_json(reader, today),
        // Default to CSV for .csv files and any other extension
        _ => input::read_csv(reader, today),
    }
}

fn read_from_stdin(today: NaiveDate) -> anyhow::Result<Vec<SaleDraft>> {
    let mut buffer = String::new();
    io::stdin().lock().read_to_string(&mut buffer)?;

    if buffer.trim().is_empty() {
        anyhow::bail!("No input received. Provide a file or pipe data to stdin.");
    }

    if buffer.trim_start().starts_with('{') {
        input::read_json(buffer.as_bytes(), today)
    } else {
        input::read_csv(buffer.as_bytes(), today)
    }
}

/// Filter options for the view commands
#[derive(Args, Debug)]
pub struct FilterArgs {
    /// Reporting period
    #[arg(short, long, value_enum, default_value_t = PeriodArg::All)]
    period: PeriodArg,

    /// Only include one marketplace
    #[arg(short, long, value_enum)]
    marketplace: Option<MarketplaceArg>,

    /// Product category (sales carry no category, accepted for completeness)
    #[arg(short, long, value_enum, default_value_t = CategoryArg::All)]
    category: CategoryArg,
}

impl FilterArgs {
    pub fn filters(&self) -> Filters {
        Filters {
            period: self.period.into(),
            marketplace: self.marketplace.map(Into::into),
            category: self.category.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum PeriodArg {
    #[default]
    All,
    Month,
    Quarter,
}

impl From<PeriodArg> for Period {
    fn from(arg: PeriodArg) -> Self {
        match arg {
            PeriodArg::All => Period::All,
            PeriodArg::Month => Period::Month,
            PeriodArg::Quarter => Period::Quarter,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum MarketplaceArg {
    #[value(alias = "Яндекс")]
    Yandex,
    #[value(alias = "Озон")]
    Ozon,
}

impl From<MarketplaceArg> for Marketplace {
    fn from(arg: MarketplaceArg) -> Self {
        match arg {
            MarketplaceArg::Yandex => Marketplace::YandexMarket,
            MarketplaceArg::Ozon => Marketplace::Ozon,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum CategoryArg {
    #[default]
    All,
    Garden,
    Building,
    Household,
}

impl From<CategoryArg> for Category {
    fn from(arg: CategoryArg) -> Self {
        match arg {
            CategoryArg::All => Category::All,
            CategoryArg::Garden => Category::Garden,
            CategoryArg::Building => Category::Building,
            CategoryArg::Household => Category::Household,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum TaxSystemArg {
    /// УСН Доходы 1%
    Usn1,
    /// УСН Доходы 7%
    Usn7,
    /// УСН Доходы-Расходы 15%
    Usn15,
}

impl From<TaxSystemArg> for TaxSystem {
    fn from(arg: TaxSystemArg) -> Self {
        match arg {
            TaxSystemArg::Usn1 => TaxSystem::Usn1,
            TaxSystemArg::Usn7 => TaxSystem::Usn7,
            TaxSystemArg::Usn15 => TaxSystem::Usn15,
        }
    }
}

pub(crate) fn format_rub(amount: Decimal) -> String {
    if amount < Decimal::ZERO {
        format!("-{:.2} ₽", amount.abs())
    } else {
        format!("{:.2} ₽", amount)
    }
}

pub(crate) fn format_pct(pct: i64) -> String {
    format!("{}%", pct)
}

pub(crate) fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let mut out: String = s.chars().take(max_chars.saturating_sub(1)).collect();
        out.push('…');
        out
    }
}

pub(crate) fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
