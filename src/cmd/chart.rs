//! Chart command - browse the precomputed comparison table over a gross range

use crate::money::{format_brl, format_brl_signed};
use crate::table::{self, TableError, DEFAULT_TABLE_PATH};
use crate::tax::{break_even, ComparisonRow, SweepRange};
use clap::Args;
use rust_decimal::Decimal;
use std::io;
use std::path::{Path, PathBuf};
use tabled::{
    settings::{object::Rows, Alignment, Modify, Style},
    Table, Tabled,
};

/// Lowest gross the range filter accepts.
pub const RANGE_FLOOR: Decimal = SweepRange::DEFAULT_START;

#[derive(Args, Debug)]
pub struct ChartCommand {
    #[command(flatten)]
    chart: ChartArgs,

    /// Output the filtered rows as CSV instead of a table
    #[arg(long)]
    csv: bool,
}

#[derive(Args, Debug, Clone)]
pub struct ChartArgs {
    /// Comparison table produced by the sweep command
    #[arg(long, default_value = DEFAULT_TABLE_PATH)]
    table: PathBuf,

    /// Minimum gross to show (clamped to the range floor)
    #[arg(long, default_value_t = SweepRange::DEFAULT_START)]
    min: Decimal,

    /// Maximum gross to show (never below --min)
    #[arg(long, default_value_t = SweepRange::DEFAULT_STOP)]
    max: Decimal,

    /// Show every Nth row of the filtered range (the last row is always shown)
    #[arg(long, default_value_t = 10, value_parser = clap::value_parser!(u64).range(1..))]
    every: u64,
}

impl ChartArgs {
    fn filter(&self) -> RangeFilter {
        RangeFilter::new(self.min, self.max)
    }
}

/// Inclusive gross range. `min` never drops below [`RANGE_FLOOR`] and
/// `max` never drops below `min`, so the range is never empty or inverted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RangeFilter {
    min: Decimal,
    max: Decimal,
}

impl RangeFilter {
    pub fn new(min: Decimal, max: Decimal) -> Self {
        let min = min.max(RANGE_FLOOR);
        let max = max.max(min);
        RangeFilter { min, max }
    }

    pub fn contains(&self, gross: Decimal) -> bool {
        self.min <= gross && gross <= self.max
    }
}

/// What the chart panel can show
#[derive(Debug, PartialEq, Eq)]
pub enum Panel {
    Rows(Vec<ComparisonRow>),
    /// Table has not been generated yet
    Missing(PathBuf),
    /// Any other failure, carrying the error message
    Failed(String),
}

pub fn load_panel(path: &Path, filter: RangeFilter) -> Panel {
    match table::load(path) {
        Ok(rows) => Panel::Rows(
            rows.into_iter()
                .filter(|row| filter.contains(row.gross))
                .collect(),
        ),
        Err(TableError::Missing(path)) => Panel::Missing(path),
        Err(e) => Panel::Failed(e.to_string()),
    }
}

#[derive(Debug, Clone, Tabled)]
struct ChartRow {
    #[tabled(rename = "Gross")]
    gross: String,

    #[tabled(rename = "CLT net")]
    clt_net: String,

    #[tabled(rename = "PJ net")]
    pj_net: String,

    #[tabled(rename = "PJ - CLT")]
    difference: String,
}

impl From<&ComparisonRow> for ChartRow {
    fn from(row: &ComparisonRow) -> Self {
        ChartRow {
            gross: format_brl(row.gross),
            clt_net: format_brl(row.clt_net),
            pj_net: format_brl(row.pj_net),
            difference: format_brl_signed(row.pj_net - row.clt_net),
        }
    }
}

impl ChartCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        if !self.csv {
            show_panel(&self.chart);
            return Ok(());
        }

        match load_panel(&self.chart.table, self.chart.filter()) {
            Panel::Rows(rows) => {
                table::write_csv(&rows, io::stdout())?;
            }
            panel => print_notice(&panel),
        }
        Ok(())
    }
}

/// Load and print the panel. Failures are reported, never propagated.
pub fn show_panel(args: &ChartArgs) {
    let filter = args.filter();
    let panel = load_panel(&args.table, filter);

    println!(
        "NET PAY COMPARISON ({} - {})",
        format_brl(filter.min),
        format_brl(filter.max)
    );
    println!();

    match &panel {
        Panel::Rows(rows) if rows.is_empty() => {
            println!("No rows found in the selected range");
        }
        Panel::Rows(rows) => {
            let sampled: Vec<ChartRow> = sample(rows, args.every as usize)
                .map(ChartRow::from)
                .collect();
            let table = Table::new(sampled)
                .with(Style::rounded())
                .with(Modify::new(Rows::new(1..)).with(Alignment::right()))
                .to_string();
            println!("{}", table);
            println!();
            match break_even(rows) {
                Some(row) => println!(
                    "Break-even: PJ net exceeds CLT net from gross {}",
                    format_brl(row.gross)
                ),
                None => println!("PJ net does not exceed CLT net in this range"),
            }
        }
        _ => print_notice(&panel),
    }
    println!();
}

fn print_notice(panel: &Panel) {
    match panel {
        Panel::Missing(path) => {
            log::warn!("comparison table missing: {}", path.display());
            println!(
                "Comparison table not found at {}. Run `cltpj sweep` to generate it.",
                path.display()
            );
        }
        Panel::Failed(message) => {
            println!("Error loading comparison table: {}", message);
        }
        Panel::Rows(_) => {}
    }
}

/// Every `every`th row plus the last one.
fn sample(rows: &[ComparisonRow], every: usize) -> impl Iterator<Item = &ComparisonRow> {
    let last = rows.len().saturating_sub(1);
    let every = every.max(1);
    rows.iter()
        .enumerate()
        .filter(move |(i, _)| i % every == 0 || *i == last)
        .map(|(_, row)| row)
}
