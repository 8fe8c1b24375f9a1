use clap::{Parser, Subcommand};

mod cmd;
mod money;
mod table;
mod tax;

/// Compare Brazilian net pay under CLT employment and PJ contracting
#[derive(Parser, Debug)]
#[command(name = "cltpj", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Net pay for one gross value under both regimes
    Compare(cmd::CompareCommand),
    /// Generate the comparison table over a gross range
    Sweep(cmd::SweepCommand),
    /// Show the comparison table filtered to a gross range
    Chart(cmd::ChartCommand),
}

fn main() -> anyhow::Result<()> {
    pretty_env_logger::init();

    let cli = Cli::parse();
    match cli.command {
        Command::Compare(compare) => compare.exec(),
        Command::Sweep(sweep) => sweep.exec(),
        Command::Chart(chart) => chart.exec(),
    }
}
