//! Compare command - net pay for one gross value under CLT and PJ

use crate::cmd::chart::{self, ChartArgs};
use crate::money::{format_brl, format_brl_signed, format_pct};
use crate::tax::brackets::format_rate;
use crate::tax::{Comparison, RateConfig, RegimeResult};
use clap::Args;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;

#[derive(Args, Debug)]
pub struct CompareCommand {
    /// Gross monthly amount (R$)
    #[arg(value_parser = parse_non_negative, default_value = "5000")]
    gross: Decimal,

    #[command(flatten)]
    rates: RateArgs,

    /// Output as JSON instead of formatted text
    #[arg(long)]
    json: bool,

    /// Show the comparison table panel below the results
    #[arg(long)]
    chart: bool,

    #[command(flatten)]
    chart_args: ChartArgs,
}

/// Editable rate parameters. Percentages are entered as percent (9 = 9%).
#[derive(Args, Debug, Clone)]
pub struct RateArgs {
    /// Simples Nacional rate (%)
    #[arg(long, value_parser = parse_non_negative,
          default_value_t = RateConfig::REFERENCE.simples_nacional_rate * dec!(100))]
    simples_nacional: Decimal,

    /// Share of PJ revenue declared as pro-labore (%)
    #[arg(long, value_parser = parse_non_negative,
          default_value_t = RateConfig::REFERENCE.pro_labore_rate * dec!(100))]
    pro_labore: Decimal,

    /// INSS rate on the pro-labore (%)
    #[arg(long, value_parser = parse_non_negative,
          default_value_t = RateConfig::REFERENCE.inss_pro_labore_rate * dec!(100))]
    inss_pro_labore: Decimal,

    /// Monthly accountant fee (R$)
    #[arg(long, value_parser = parse_non_negative,
          default_value_t = RateConfig::REFERENCE.accountant_fee)]
    accountant: Decimal,

    /// CLT commute benefit discount (%)
    #[arg(long, value_parser = parse_non_negative,
          default_value_t = RateConfig::REFERENCE.commute_rate * dec!(100))]
    commute: Decimal,
}

impl From<&RateArgs> for RateConfig {
    fn from(args: &RateArgs) -> Self {
        RateConfig {
            simples_nacional_rate: args.simples_nacional / dec!(100),
            pro_labore_rate: args.pro_labore / dec!(100),
            inss_pro_labore_rate: args.inss_pro_labore / dec!(100),
            accountant_fee: args.accountant,
            commute_rate: args.commute / dec!(100),
        }
    }
}

pub fn parse_non_negative(s: &str) -> Result<Decimal, String> {
    let value: Decimal = s.trim().parse().map_err(|e: rust_decimal::Error| e.to_string())?;
    if value < Decimal::ZERO {
        return Err(format!("must not be negative: {}", value));
    }
    Ok(value)
}

const NOTES: &[&str] = &[
    "Figures are approximate and may vary with specific situations",
    "For PJ, set aside reserves for vacation, 13th salary and benefits",
    "Consult an accountant for a precise analysis",
    "Values do not include benefits such as health plan, meal vouchers, etc.",
];

/// Compare data for JSON output
#[derive(Debug, Serialize)]
struct CompareData {
    gross: String,
    rates: RateConfig,
    clt: RegimeData,
    pj: RegimeData,
    difference: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    difference_pct: Option<String>,
}

#[derive(Debug, Serialize)]
struct RegimeData {
    deductions: Vec<DeductionData>,
    total_deductions: String,
    net: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    net_pct: Option<String>,
}

#[derive(Debug, Serialize)]
struct DeductionData {
    label: String,
    amount: String,
}

impl From<&RegimeResult> for RegimeData {
    fn from(result: &RegimeResult) -> Self {
        RegimeData {
            deductions: result
                .deductions
                .iter()
                .map(|d| DeductionData {
                    label: d.label.clone(),
                    amount: format!("{:.2}", d.amount.round_dp(2)),
                })
                .collect(),
            total_deductions: format!("{:.2}", result.total_deductions().round_dp(2)),
            net: format!("{:.2}", result.net().round_dp(2)),
            net_pct: result.net_share().map(|p| format!("{:.1}", p.round_dp(1))),
        }
    }
}

impl CompareCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        let rates = RateConfig::from(&self.rates);
        let comparison = Comparison::new(self.gross, &rates);

        if self.json {
            self.print_json(&comparison, &rates)?;
        } else {
            self.print_text(&comparison, &rates);
        }

        if self.chart {
            chart::show_panel(&self.chart_args);
        }
        Ok(())
    }

    fn print_text(&self, comparison: &Comparison, rates: &RateConfig) {
        println!();
        println!("CLT x PJ SIMULATOR - gross {}", format_brl(self.gross));
        println!();

        print_regime(&comparison.clt);
        print_regime(&comparison.pj);

        println!("COMPARISON");
        println!(
            "  Absolute difference (PJ - CLT): {}",
            format_brl_signed(comparison.difference())
        );
        println!(
            "  Percentage difference: {}",
            format_pct(comparison.difference_pct())
        );
        println!();

        println!(
            "PARAMETERS: Simples Nacional {} | Pro-labore {} | INSS on pro-labore {} | Accountant {} | Commute {}",
            format_rate(rates.simples_nacional_rate),
            format_rate(rates.pro_labore_rate),
            format_rate(rates.inss_pro_labore_rate),
            format_brl(rates.accountant_fee),
            format_rate(rates.commute_rate)
        );
        println!();

        println!("NOTES");
        for note in NOTES {
            println!("  - {}", note);
        }
        println!();
    }

    fn print_json(&self, comparison: &Comparison, rates: &RateConfig) -> anyhow::Result<()> {
        let data = CompareData {
            gross: format!("{:.2}", self.gross.round_dp(2)),
            rates: *rates,
            clt: RegimeData::from(&comparison.clt),
            pj: RegimeData::from(&comparison.pj),
            difference: format!("{:.2}", comparison.difference().round_dp(2)),
            difference_pct: comparison
                .difference_pct()
                .map(|p| format!("{:.1}", p.round_dp(1))),
        };

        println!("{}", serde_json::to_string_pretty(&data)?);
        Ok(())
    }
}

fn print_regime(result: &RegimeResult) {
    println!("{}", result.regime);
    println!("  Deductions:");
    for deduction in &result.deductions {
        println!("    {}: {}", deduction.label, format_brl(deduction.amount));
    }
    println!("  Total deductions: {}", format_brl(result.total_deductions()));
    println!("  Net: {}", format_brl(result.net()));
    println!("  Net share: {}", format_pct(result.net_share()));
    println!();
}
