//! Shell command - interactive session over stdin

use crate::app::Session;
use crate::cmd::analytics::print_analytics;
use crate::cmd::calc::print_preview;
use crate::cmd::dashboard::print_dashboard;
use crate::cmd::list::print_sales;
use crate::cmd::report::print_report;
use crate::cmd::{format_rub, CategoryArg, PeriodArg, SessionArgs};
use crate::core::{DraftField, Marketplace, TaxSystem};
use clap::{Args, ValueEnum};
use std::io::{self, BufRead, Write};
use tabled::{settings::Style, Table, Tabled};

const HELP: &str = "\
Commands:
  set <field> <value>     Set a draft field (empty value clears it)
  draft                   Show the current draft
  preview                 Profit preview of the draft
  submit                  Record the draft as a sale
  reset                   Discard the draft
  tax <usn1|usn7|usn15>   Apply a tax preset to the draft
  filter period <all|month|quarter>
  filter marketplace <all|Яндекс|Озон>
  filter category <all|garden|building|household>
  dashboard | analytics | report | list
  help | quit";

#[derive(Args, Debug)]
pub struct ShellCommand {
    /// Do not print a prompt before each command
    #[arg(long)]
    no_prompt: bool,
}

impl ShellCommand {
    pub fn exec(&self, args: &SessionArgs) -> anyhow::Result<()> {
        let mut session = args.build_session()?;
        let stdin = io::stdin();
        let mut stdout = io::stdout();

        println!("{}", HELP);
        loop {
            if !self.no_prompt {
                print!("> ");
                stdout.flush()?;
            }
            let mut line = String::new();
            if stdin.lock().read_line(&mut line)? == 0 {
                break;
            }
            if line.trim().is_empty() {
                continue;
            }
            match parse_line(&line) {
                Ok(Command::Quit) => break,
                Ok(command) => run(&mut session, command),
                Err(usage) => println!("{}", usage),
            }
        }
        Ok(())
    }
}

/// A parsed shell line
#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    Set(DraftField, String),
    Draft,
    Preview,
    Submit,
    Reset,
    Tax(TaxSystem),
    Filter(FilterChange),
    Dashboard,
    Analytics,
    Report,
    List,
    Help,
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FilterChange {
    Period(PeriodArg),
    Marketplace(Option<Marketplace>),
    Category(CategoryArg),
}

fn parse_line(line: &str) -> Result<Command, String> {
    let line = line.trim();
    let (word, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
    let rest = rest.trim();

    match word.to_lowercase().as_str() {
        "set" => {
            let (field, value) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
            if field.is_empty() {
                return Err("usage: set <field> <value>".to_string());
            }
            let field = field.parse::<DraftField>().map_err(|err| err.to_string())?;
            Ok(Command::Set(field, value.trim().to_string()))
        }
        "draft" => Ok(Command::Draft),
        "preview" => Ok(Command::Preview),
        "submit" => Ok(Command::Submit),
        "reset" => Ok(Command::Reset),
        "tax" => TaxSystem::parse(rest)
            .map(Command::Tax)
            .ok_or_else(|| "usage: tax <usn1|usn7|usn15>".to_string()),
        "filter" => parse_filter(rest).map(Command::Filter),
        "dashboard" => Ok(Command::Dashboard),
        "analytics" => Ok(Command::Analytics),
        "report" => Ok(Command::Report),
        "list" => Ok(Command::List),
        "help" | "?" => Ok(Command::Help),
        "quit" | "exit" => Ok(Command::Quit),
        other => Err(format!("unknown command: {} (try 'help')", other)),
    }
}

fn parse_filter(args: &str) -> Result<FilterChange, String> {
    let (kind, value) = args.split_once(char::is_whitespace).unwrap_or((args, ""));
    let value = value.trim();
    match kind {
        "period" => PeriodArg::from_str(value, true)
            .map(FilterChange::Period)
            .map_err(|_| "usage: filter period <all|month|quarter>".to_string()),
        "marketplace" => {
            if value.eq_ignore_ascii_case("all") {
                Ok(FilterChange::Marketplace(None))
            } else {
                value
                    .parse::<Marketplace>()
                    .map(|mp| FilterChange::Marketplace(Some(mp)))
                    .map_err(|err| err.to_string())
            }
        }
        "category" => CategoryArg::from_str(value, true)
            .map(FilterChange::Category)
            .map_err(|_| "usage: filter category <all|garden|building|household>".to_string()),
        _ => Err("usage: filter <period|marketplace|category> <value>".to_string()),
    }
}

fn run(session: &mut Session, command: Command) {
    match command {
        Command::Set(field, value) => match session.set_draft_field(field, &value) {
            Ok(()) => println!("{} = {}", field, session.draft().get(field)),
            Err(err) => println!("{}", err),
        },
        Command::Draft => print_draft(session),
        Command::Preview => print_preview(&session.preview()),
        Command::Submit => match session.submit() {
            Ok(sale) => println!(
                "Recorded sale #{}: {} ({}, profit {})",
                sale.id,
                sale.name,
                sale.marketplace,
                format_rub(sale.profit)
            ),
            Err(err) => println!("Cannot submit: {}", err),
        },
        Command::Reset => {
            session.reset_draft();
            println!("Draft cleared");
        }
        Command::Tax(system) => {
            session.apply_tax_system(system);
            println!("Tax system: {} (tax_rate = {})", system.label(), session.draft().tax_rate);
        }
        Command::Filter(change) => {
            match change {
                FilterChange::Period(period) => session.set_period(period.into()),
                FilterChange::Marketplace(marketplace) => session.set_marketplace_filter(marketplace),
                FilterChange::Category(category) => session.set_category(category.into()),
            }
            println!("Filters: {}", session.filters().describe());
        }
        Command::Dashboard => print_dashboard(&session.dashboard()),
        Command::Analytics => print_analytics(&session.analytics()),
        Command::Report => print_report(&session.report()),
        Command::List => print_sales(session.ledger().list_all()),
        Command::Help => println!("{}", HELP),
        Command::Quit => {}
    }
}

fn print_draft(session: &Session) {
    let draft = session.draft();
    let tax = session
        .tax_system()
        .map_or("custom tax rate".to_string(), |system| system.label().to_string());
    println!("DRAFT ({}, {})", session.today(), tax);

    let rows: Vec<DraftRow> = DraftField::ALL
        .iter()
        .map(|field| DraftRow {
            field: if DraftField::REQUIRED.contains(field) {
                format!("{} *", field)
            } else {
                field.to_string()
            },
            value: draft.get(*field),
        })
        .collect();

    let table = Table::new(rows).with(Style::rounded()).to_string();
    println!("{}", table);
}

#[derive(Debug, Clone, Tabled)]
struct DraftRow {
    #[tabled(rename = "Field")]
    field: String,
    #[tabled(rename = "Value")]
    value: String,
}
