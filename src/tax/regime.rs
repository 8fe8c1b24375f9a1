//! Net pay models for the CLT and PJ regimes

use super::brackets::{income_tax, social_security, BracketResult};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Deduction rates used by the regime models.
///
/// Rates are fractions (0.09 = 9%); `accountant_fee` is a flat monthly amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateConfig {
    /// Simples Nacional rate applied to PJ gross revenue
    pub simples_nacional_rate: Decimal,
    /// Share of PJ revenue declared as pro-labore
    pub pro_labore_rate: Decimal,
    /// INSS rate on the pro-labore
    pub inss_pro_labore_rate: Decimal,
    /// Monthly accountant fee paid by the PJ
    pub accountant_fee: Decimal,
    /// CLT commute benefit (vale-transporte) discount rate
    pub commute_rate: Decimal,
}

impl RateConfig {
    /// The fixed rates used to generate the comparison table.
    pub const REFERENCE: RateConfig = RateConfig {
        simples_nacional_rate: dec!(0.09),
        pro_labore_rate: dec!(0.28),
        inss_pro_labore_rate: dec!(0.11),
        accountant_fee: dec!(300.0),
        commute_rate: dec!(0.06),
    };
}

impl Default for RateConfig {
    fn default() -> Self {
        Self::REFERENCE
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Regime {
    #[serde(rename = "CLT")]
    Clt,
    #[serde(rename = "PJ")]
    Pj,
}

impl fmt::Display for Regime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Regime::Clt => write!(f, "CLT"),
            Regime::Pj => write!(f, "PJ"),
        }
    }
}

/// A single labeled deduction
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Deduction {
    pub label: String,
    pub amount: Decimal,
}

impl Deduction {
    fn new(label: impl Into<String>, amount: Decimal) -> Self {
        Deduction {
            label: label.into(),
            amount,
        }
    }

    fn bracketed(name: &str, result: &BracketResult) -> Self {
        Deduction::new(
            format!(
                "{} (rate: {} | effective: {:.1}%)",
                name,
                result.label,
                result.effective_rate.round_dp(1)
            ),
            result.amount,
        )
    }
}

/// Deduction breakdown and net pay for one regime
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegimeResult {
    pub regime: Regime,
    pub gross: Decimal,
    /// Deductions in display order
    pub deductions: Vec<Deduction>,
}

impl RegimeResult {
    pub fn total_deductions(&self) -> Decimal {
        self.deductions.iter().map(|d| d.amount).sum()
    }

    pub fn net(&self) -> Decimal {
        self.gross - self.total_deductions()
    }

    /// Net as a percentage of gross, `None` when gross is zero
    pub fn net_share(&self) -> Option<Decimal> {
        if self.gross.is_zero() {
            None
        } else {
            Some(self.net() / self.gross * dec!(100))
        }
    }
}

/// CLT: INSS on gross, IRRF on gross minus INSS, commute discount on gross.
pub fn clt(gross: Decimal, rates: &RateConfig) -> RegimeResult {
    let inss = social_security(gross);
    let irrf = income_tax(gross - inss.amount);
    let commute = gross * rates.commute_rate;

    log::debug!(
        "CLT gross {}: inss {} ({}), irrf {} ({}), commute {}",
        gross,
        inss.amount,
        inss.label,
        irrf.amount,
        irrf.label,
        commute
    );

    RegimeResult {
        regime: Regime::Clt,
        gross,
        deductions: vec![
            Deduction::bracketed("INSS", &inss),
            Deduction::bracketed("IRRF", &irrf),
            Deduction::new(
                format!("Commute benefit ({:.1}%)", (rates.commute_rate * dec!(100)).round_dp(1)),
                commute,
            ),
        ],
    }
}

/// PJ: Simples Nacional on gross, INSS and IRRF on the pro-labore, accountant fee.
pub fn pj(gross: Decimal, rates: &RateConfig) -> RegimeResult {
    let simples_nacional = gross * rates.simples_nacional_rate;
    let pro_labore = gross * rates.pro_labore_rate;
    let inss_pro_labore = pro_labore * rates.inss_pro_labore_rate;
    let irrf = income_tax(pro_labore - inss_pro_labore);

    log::debug!(
        "PJ gross {}: simples {}, pro-labore {}, inss {}, irrf {} ({})",
        gross,
        simples_nacional,
        pro_labore,
        inss_pro_labore,
        irrf.amount,
        irrf.label
    );

    RegimeResult {
        regime: Regime::Pj,
        gross,
        deductions: vec![
            Deduction::new(
                format!(
                    "Simples Nacional ({:.1}%)",
                    (rates.simples_nacional_rate * dec!(100)).round_dp(1)
                ),
                simples_nacional,
            ),
            Deduction::new(
                format!(
                    "INSS on pro-labore ({:.1}% of {:.1}%)",
                    (rates.inss_pro_labore_rate * dec!(100)).round_dp(1),
                    (rates.pro_labore_rate * dec!(100)).round_dp(1)
                ),
                inss_pro_labore,
            ),
            Deduction::bracketed("IRRF on pro-labore", &irrf),
            Deduction::new("Accountant", rates.accountant_fee),
        ],
    }
}

/// Side-by-side evaluation of both regimes for one gross value
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Comparison {
    pub clt: RegimeResult,
    pub pj: RegimeResult,
}

impl Comparison {
    pub fn new(gross: Decimal, rates: &RateConfig) -> Self {
        Comparison {
            clt: clt(gross, rates),
            pj: pj(gross, rates),
        }
    }

    /// PJ net minus CLT net
    pub fn difference(&self) -> Decimal {
        self.pj.net() - self.clt.net()
    }

    /// Difference relative to CLT net, `None` when CLT net is zero
    pub fn difference_pct(&self) -> Option<Decimal> {
        let clt_net = self.clt.net();
        if clt_net.is_zero() {
            None
        } else {
            Some(self.difference() / clt_net * dec!(100))
        }
    }
}
