//! Sweep command - generate the comparison table consumed by the chart panel

use crate::table::{self, DEFAULT_TABLE_PATH};
use crate::tax::{sweep, RateConfig, SweepRange};
use clap::Args;
use rust_decimal::Decimal;
use std::fs::File;
use std::io::{self, BufWriter};
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct SweepCommand {
    /// First gross value
    #[arg(long, default_value_t = SweepRange::DEFAULT_START)]
    start: Decimal,

    /// Last gross value (inclusive)
    #[arg(long, default_value_t = SweepRange::DEFAULT_STOP)]
    stop: Decimal,

    /// Increment between gross values
    #[arg(long, default_value_t = SweepRange::DEFAULT_STEP)]
    step: Decimal,

    /// Output CSV file, or "-" for stdout
    #[arg(short, long, default_value = DEFAULT_TABLE_PATH)]
    output: PathBuf,
}

impl SweepCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        let range = SweepRange::new(self.start, self.stop, self.step)?;
        // The table always uses the reference rates, not the editable ones.
        let rows = sweep(&range, &RateConfig::REFERENCE);

        if self.output.as_os_str() == "-" {
            table::write_csv(&rows, io::stdout())?;
        } else {
            let file = File::create(&self.output)?;
            let count = table::write_csv(&rows, BufWriter::new(file))?;
            log::info!("Wrote {} csv records", count);
            println!(
                "Comparison table written to: {} ({} rows)",
                self.output.display(),
                count
            );
        }
        Ok(())
    }
}
