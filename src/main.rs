use clap::{Parser, Subcommand};

mod app;
mod cmd;
mod core;
mod input;

/// Sales and profit ledger for marketplace sellers
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(flatten)]
    session: cmd::SessionArgs,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Period totals and the most recent sales
    Dashboard(cmd::dashboard::DashboardCommand),
    /// Marketplace breakdown, most profitable sales and monthly totals
    Analytics(cmd::analytics::AnalyticsCommand),
    /// Profit and loss statement
    Report(cmd::report::ReportCommand),
    /// Every recorded sale, newest first
    List(cmd::list::ListCommand),
    /// Profit preview of a single sale
    Calc(cmd::calc::CalcCommand),
    /// Interactive session reading commands from stdin
    Shell(cmd::shell::ShellCommand),
}

fn main() -> anyhow::Result<()> {
    pretty_env_logger::init();

    let cli = Cli::parse();
    match &cli.command {
        Command::Dashboard(command) => command.exec(&cli.session),
        Command::Analytics(command) => command.exec(&cli.session),
        Command::Report(command) => command.exec(&cli.session),
        Command::List(command) => command.exec(&cli.session),
        Command::Calc(command) => command.exec(&cli.session),
        Command::Shell(command) => command.exec(&cli.session),
    }
}
