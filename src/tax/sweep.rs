use super::regime::{clt, pj, RateConfig};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SweepError {
    #[error("step must be positive, got {0}")]
    NonPositiveStep(Decimal),
    #[error("start must not be negative, got {0}")]
    NegativeStart(Decimal),
    #[error("stop ({stop}) is below start ({start})")]
    InvertedRange { start: Decimal, stop: Decimal },
}

/// Evenly spaced gross values, `stop` inclusive when it lands on a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SweepRange {
    start: Decimal,
    stop: Decimal,
    step: Decimal,
}

impl SweepRange {
    pub const DEFAULT_START: Decimal = dec!(1000);
    pub const DEFAULT_STOP: Decimal = dec!(100000);
    pub const DEFAULT_STEP: Decimal = dec!(100);

    pub fn new(start: Decimal, stop: Decimal, step: Decimal) -> Result<Self, SweepError> {
        if step <= Decimal::ZERO {
            return Err(SweepError::NonPositiveStep(step));
        }
        if start < Decimal::ZERO {
            return Err(SweepError::NegativeStart(start));
        }
        if stop < start {
            return Err(SweepError::InvertedRange { start, stop });
        }
        Ok(SweepRange { start, stop, step })
    }

    pub fn values(&self) -> impl Iterator<Item = Decimal> + '_ {
        std::iter::successors(Some(self.start), move |v| Some(*v + self.step))
            .take_while(move |v| *v <= self.stop)
    }
}

impl Default for SweepRange {
    fn default() -> Self {
        SweepRange {
            start: Self::DEFAULT_START,
            stop: Self::DEFAULT_STOP,
            step: Self::DEFAULT_STEP,
        }
    }
}

/// One row of the persisted comparison table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparisonRow {
    #[serde(rename = "bruto")]
    pub gross: Decimal,
    #[serde(rename = "clt")]
    pub clt_net: Decimal,
    #[serde(rename = "pj")]
    pub pj_net: Decimal,
}

impl ComparisonRow {
    pub fn evaluate(gross: Decimal, rates: &RateConfig) -> Self {
        ComparisonRow {
            gross,
            clt_net: clt(gross, rates).net().normalize(),
            pj_net: pj(gross, rates).net().normalize(),
        }
    }
}

/// Evaluate both regimes across the range.
pub fn sweep(range: &SweepRange, rates: &RateConfig) -> Vec<ComparisonRow> {
    let rows: Vec<_> = range
        .values()
        .map(|gross| ComparisonRow::evaluate(gross, rates))
        .collect();
    log::info!("Swept {} gross values", rows.len());
    rows
}

/// First row where PJ net exceeds CLT net.
pub fn break_even(rows: &[ComparisonRow]) -> Option<&ComparisonRow> {
    rows.iter().find(|row| row.pj_net > row.clt_net)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_range_has_991_rows() {
        let rows = sweep(&SweepRange::default(), &RateConfig::REFERENCE);
        assert_eq!(rows.len(), 991);
        assert_eq!(rows[0].gross, dec!(1000));
        assert_eq!(rows[990].gross, dec!(100000));
        assert!(rows.windows(2).all(|w| w[0].gross < w[1].gross));
    }

    #[test]
    fn rows_reproduce_regime_models() {
        let rows = sweep(&SweepRange::default(), &RateConfig::REFERENCE);
        for row in &rows {
            assert_eq!(row.clt_net, clt(row.gross, &RateConfig::REFERENCE).net());
            assert_eq!(row.pj_net, pj(row.gross, &RateConfig::REFERENCE).net());
        }
        let at_5000 = rows.iter().find(|r| r.gross == dec!(5000)).unwrap();
        assert_eq!(at_5000.pj_net, dec!(4096));
        assert_eq!(at_5000.clt_net, dec!(3835.685275));
    }

    #[test]
    fn stop_not_on_step_is_excluded() {
        let range = SweepRange::new(dec!(1000), dec!(1250), dec!(100)).unwrap();
        let values: Vec<_> = range.values().collect();
        assert_eq!(values, vec![dec!(1000), dec!(1100), dec!(1200)]);
    }

    #[test]
    fn single_value_range() {
        let range = SweepRange::new(dec!(5000), dec!(5000), dec!(100)).unwrap();
        assert_eq!(range.values().count(), 1);
    }

    #[test]
    fn invalid_ranges_rejected() {
        assert_eq!(
            SweepRange::new(dec!(1000), dec!(2000), Decimal::ZERO),
            Err(SweepError::NonPositiveStep(Decimal::ZERO))
        );
        assert_eq!(
            SweepRange::new(dec!(-1), dec!(2000), dec!(100)),
            Err(SweepError::NegativeStart(dec!(-1)))
        );
        assert_eq!(
            SweepRange::new(dec!(2000), dec!(1000), dec!(100)),
            Err(SweepError::InvertedRange {
                start: dec!(2000),
                stop: dec!(1000)
            })
        );
    }

    #[test]
    fn break_even_found_in_default_sweep() {
        let rows = sweep(&SweepRange::default(), &RateConfig::REFERENCE);
        let row = break_even(&rows).unwrap();
        assert!(row.pj_net > row.clt_net);
        assert!(rows
            .iter()
            .take_while(|r| r.gross < row.gross)
            .all(|r| r.pj_net <= r.clt_net));
    }

    #[test]
    fn break_even_none_when_clt_always_ahead() {
        let rows = sweep(
            &SweepRange::new(dec!(1000), dec!(1500), dec!(100)).unwrap(),
            &RateConfig::REFERENCE,
        );
        assert!(break_even(&rows).is_none());
    }
}
