//! Progressive bracket evaluators for INSS (social security) and IRRF
//! (income-tax withholding).

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::fmt;

/// A cumulative-style step: the marginal rate applies to the slice of the
/// base between the previous step's upper bound and this one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step {
    pub upper: Decimal,
    pub rate: Decimal,
}

/// A deduction-formula bracket: `base * rate - deduction`.
/// `upper` is `None` for the open-ended top bracket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormulaBracket {
    pub upper: Option<Decimal>,
    pub rate: Decimal,
    pub deduction: Decimal,
}

/// INSS contribution steps. Above the last bound the contribution is capped.
pub const INSS_STEPS: [Step; 4] = [
    Step { upper: dec!(1412.00), rate: dec!(0.075) },
    Step { upper: dec!(2666.68), rate: dec!(0.09) },
    Step { upper: dec!(4000.03), rate: dec!(0.12) },
    Step { upper: dec!(7786.02), rate: dec!(0.14) },
];

/// INSS ceiling: contribution is frozen at the value computed here.
pub const INSS_CEILING: Decimal = dec!(7786.02);

/// Bases up to and including this value are exempt from IRRF.
pub const IRRF_EXEMPTION_LIMIT: Decimal = dec!(2259.20);

pub const IRRF_BRACKETS: [FormulaBracket; 4] = [
    FormulaBracket { upper: Some(dec!(2826.65)), rate: dec!(0.075), deduction: dec!(169.44) },
    FormulaBracket { upper: Some(dec!(3751.05)), rate: dec!(0.15), deduction: dec!(381.44) },
    FormulaBracket { upper: Some(dec!(4664.68)), rate: dec!(0.225), deduction: dec!(662.77) },
    FormulaBracket { upper: None, rate: dec!(0.275), deduction: dec!(896.00) },
];

/// Which bracket a base fell into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BracketLabel {
    /// Marginal rate as a fraction (0.075 = 7.5%)
    Rate(Decimal),
    /// Above the INSS ceiling
    Ceiling,
    /// Below the IRRF exemption limit
    Exempt,
}

impl fmt::Display for BracketLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BracketLabel::Rate(rate) => write!(f, "{}", format_rate(*rate)),
            BracketLabel::Ceiling => write!(f, "ceiling"),
            BracketLabel::Exempt => write!(f, "exempt"),
        }
    }
}

/// Result of evaluating a bracket table against a base
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BracketResult {
    pub amount: Decimal,
    pub label: BracketLabel,
    /// Percentage (amount / base * 100), zero for a zero base
    pub effective_rate: Decimal,
}

impl BracketResult {
    fn new(amount: Decimal, label: BracketLabel, base: Decimal) -> Self {
        BracketResult {
            amount,
            label,
            effective_rate: effective_rate(amount, base),
        }
    }
}

/// INSS contribution on gross pay.
pub fn social_security(gross: Decimal) -> BracketResult {
    let gross = gross.max(Decimal::ZERO);
    let mut floor = Decimal::ZERO;
    let mut amount = Decimal::ZERO;

    for step in INSS_STEPS {
        if gross <= step.upper {
            amount += (gross - floor) * step.rate;
            return BracketResult::new(amount, BracketLabel::Rate(step.rate), gross);
        }
        amount += (step.upper - floor) * step.rate;
        floor = step.upper;
    }

    BracketResult::new(amount, BracketLabel::Ceiling, gross)
}

/// IRRF withholding on a taxable base.
pub fn income_tax(base: Decimal) -> BracketResult {
    if base <= IRRF_EXEMPTION_LIMIT {
        return BracketResult {
            amount: Decimal::ZERO,
            label: BracketLabel::Exempt,
            effective_rate: Decimal::ZERO,
        };
    }

    let mut selected = IRRF_BRACKETS[IRRF_BRACKETS.len() - 1];
    for bracket in IRRF_BRACKETS {
        if bracket.upper.is_none_or(|upper| base <= upper) {
            selected = bracket;
            break;
        }
    }

    let amount = base * selected.rate - selected.deduction;
    BracketResult::new(amount, BracketLabel::Rate(selected.rate), base)
}

fn effective_rate(amount: Decimal, base: Decimal) -> Decimal {
    if base > Decimal::ZERO {
        amount / base * dec!(100)
    } else {
        Decimal::ZERO
    }
}

/// Format a fractional rate as a percentage, e.g. 0.075 -> "7.5%"
pub fn format_rate(rate: Decimal) -> String {
    format!("{}%", (rate * dec!(100)).normalize())
}
