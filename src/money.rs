use rust_decimal::Decimal;

pub fn format_brl(amount: Decimal) -> String {
    format!("R$ {:.2}", amount.round_dp(2))
}

pub fn format_brl_signed(amount: Decimal) -> String {
    if amount < Decimal::ZERO {
        format!("-R$ {:.2}", amount.abs().round_dp(2))
    } else {
        format!("R$ {:.2}", amount.round_dp(2))
    }
}

/// One-decimal percentage, or "-" when there is nothing to divide by
pub fn format_pct(pct: Option<Decimal>) -> String {
    pct.map_or("-".to_string(), |p| format!("{:.1}%", p.round_dp(1)))
}
