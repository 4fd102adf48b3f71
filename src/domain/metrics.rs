//! Summary statistics over a finished simulation.

use crate::domain::backtest::{HoldingPeriod, PortfolioPoint};
use crate::domain::symbol_data::SymbolData;
use chrono::NaiveDate;

const TRADING_DAYS_PER_YEAR: f64 = 252.0;

/// The six summary metrics. All fractions except `sharpe_ratio`, which is
/// annualized by sqrt(252).
#[derive(Debug, Clone, PartialEq)]
pub struct BacktestMetrics {
    pub total_return: f64,
    pub benchmark_return: f64,
    pub excess_return: f64,
    pub win_rate: f64,
    pub max_drawdown: f64,
    pub sharpe_ratio: f64,
}

impl BacktestMetrics {
    pub fn zeroed() -> Self {
        Self {
            total_return: 0.0,
            benchmark_return: 0.0,
            excess_return: 0.0,
            win_rate: 0.0,
            max_drawdown: 0.0,
            sharpe_ratio: 0.0,
        }
    }

    pub fn compute(
        values: &[PortfolioPoint],
        holding_periods: &[HoldingPeriod],
        initial_capital: f64,
        benchmark_return: f64,
    ) -> Self {
        let total_return = match values.last() {
            Some(point) if initial_capital > 0.0 => point.value / initial_capital - 1.0,
            _ => 0.0,
        };

        let wins = holding_periods
            .iter()
            .filter(|p| p.return_pct > 0.0)
            .count();
        let win_rate = if holding_periods.is_empty() {
            0.0
        } else {
            wins as f64 / holding_periods.len() as f64
        };

        Self {
            total_return,
            benchmark_return,
            excess_return: total_return - benchmark_return,
            win_rate,
            max_drawdown: compute_drawdown(values),
            sharpe_ratio: compute_sharpe(values),
        }
    }
}

/// Mean buy-and-hold return across candidates with at least two bars inside
/// `[start, end]`; 0 when none qualify.
pub fn buy_and_hold_benchmark(symbols: &[SymbolData], start: NaiveDate, end: NaiveDate) -> f64 {
    let mut returns = Vec::new();
    for sd in symbols {
        let mut window = sd
            .bars
            .iter()
            .filter(|bar| bar.date >= start && bar.date <= end);

        let first = match window.next() {
            Some(bar) => bar,
            None => continue,
        };
        let last = match window.last() {
            Some(bar) => bar,
            None => continue,
        };
        if first.close <= 0.0 {
            continue;
        }

        returns.push(last.close / first.close - 1.0);
    }

    if returns.is_empty() {
        return 0.0;
    }
    returns.iter().sum::<f64>() / returns.len() as f64
}

/// Largest peak-to-trough fraction across the value sequence.
fn compute_drawdown(values: &[PortfolioPoint]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }

    let mut peak = values[0].value;
    let mut max_dd = 0.0_f64;
    for point in values {
        if point.value > peak {
            peak = point.value;
        } else if peak > 0.0 {
            let dd = (peak - point.value) / peak;
            if dd > max_dd {
                max_dd = dd;
            }
        }
    }

    max_dd
}

/// Mean period return over its population standard deviation, annualized.
/// Zero when there are fewer than two values or the deviation is zero.
fn compute_sharpe(values: &[PortfolioPoint]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }

    let returns: Vec<f64> = values
        .windows(2)
        .map(|w| {
            if w[0].value > 0.0 {
                (w[1].value - w[0].value) / w[0].value
            } else {
                0.0
            }
        })
        .collect();

    let n = returns.len() as f64;
    let mean = returns.iter().sum::<f64>() / n;
    let variance = returns.iter().map(|r| (r - mean).powi(2)).sum::<f64>() / n;
    let stddev = variance.sqrt();

    if stddev > 0.0 {
        mean / stddev * TRADING_DAYS_PER_YEAR.sqrt()
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::price::PriceBar;
    use chrono::Duration;

    fn make_values(values: &[f64]) -> Vec<PortfolioPoint> {
        values
            .iter()
            .enumerate()
            .map(|(i, &value)| PortfolioPoint {
                date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap() + Duration::days(i as i64),
                value,
            })
            .collect()
    }

    fn make_period(symbol: &str, return_pct: f64) -> HoldingPeriod {
        HoldingPeriod {
            symbol: symbol.to_string(),
            days: 5,
            return_pct,
        }
    }

    fn make_symbol(symbol: &str, closes: &[f64]) -> SymbolData {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let bars = closes
            .iter()
            .enumerate()
            .map(|(i, &close)| PriceBar {
                symbol: symbol.to_string(),
                date: start + Duration::days(i as i64),
                open: close,
                high: close + 1.0,
                low: close - 1.0,
                close,
                volume: 1000,
            })
            .collect();
        SymbolData::new(symbol.to_string(), bars)
    }

    #[test]
    fn zeroed_metrics() {
        let metrics = BacktestMetrics::zeroed();
        assert!((metrics.total_return - 0.0).abs() < f64::EPSILON);
        assert!((metrics.benchmark_return - 0.0).abs() < f64::EPSILON);
        assert!((metrics.excess_return - 0.0).abs() < f64::EPSILON);
        assert!((metrics.win_rate - 0.0).abs() < f64::EPSILON);
        assert!((metrics.max_drawdown - 0.0).abs() < f64::EPSILON);
        assert!((metrics.sharpe_ratio - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn total_return_from_final_value() {
        let values = make_values(&[100_000.0, 105_000.0, 110_000.0]);
        let metrics = BacktestMetrics::compute(&values, &[], 100_000.0, 0.0);
        assert!((metrics.total_return - 0.10).abs() < 1e-9);

        let values = make_values(&[100_000.0, 90_000.0]);
        let metrics = BacktestMetrics::compute(&values, &[], 100_000.0, 0.0);
        assert!((metrics.total_return - (-0.10)).abs() < 1e-9);
    }

    #[test]
    fn total_return_empty_values_is_zero() {
        let metrics = BacktestMetrics::compute(&[], &[], 100_000.0, 0.0);
        assert!((metrics.total_return - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn excess_return_subtracts_benchmark() {
        let values = make_values(&[100_000.0, 110_000.0]);
        let metrics = BacktestMetrics::compute(&values, &[], 100_000.0, 0.04);
        assert!((metrics.benchmark_return - 0.04).abs() < f64::EPSILON);
        assert!((metrics.excess_return - 0.06).abs() < 1e-9);
    }

    #[test]
    fn win_rate_counts_positive_periods() {
        let periods = vec![
            make_period("AAA", 5.0),
            make_period("BBB", -2.0),
            make_period("CCC", 0.0),
            make_period("DDD", 1.0),
        ];
        let metrics = BacktestMetrics::compute(&[], &periods, 100_000.0, 0.0);
        assert!((metrics.win_rate - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn win_rate_no_periods_is_zero() {
        let metrics = BacktestMetrics::compute(&[], &[], 100_000.0, 0.0);
        assert!((metrics.win_rate - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn max_drawdown_peak_to_trough() {
        let values = make_values(&[100.0, 110.0, 90.0, 95.0, 80.0, 100.0]);
        let metrics = BacktestMetrics::compute(&values, &[], 100.0, 0.0);
        assert!((metrics.max_drawdown - (110.0 - 80.0) / 110.0).abs() < 1e-9);
    }

    #[test]
    fn max_drawdown_monotonic_rise_is_zero() {
        let values = make_values(&[100.0, 105.0, 110.0, 120.0]);
        let metrics = BacktestMetrics::compute(&values, &[], 100.0, 0.0);
        assert!((metrics.max_drawdown - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn sharpe_zero_for_flat_curve() {
        let values = make_values(&[100.0, 100.0, 100.0, 100.0]);
        let metrics = BacktestMetrics::compute(&values, &[], 100.0, 0.0);
        assert!((metrics.sharpe_ratio - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn sharpe_zero_for_single_value() {
        let values = make_values(&[100.0]);
        let metrics = BacktestMetrics::compute(&values, &[], 100.0, 0.0);
        assert!((metrics.sharpe_ratio - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn sharpe_matches_hand_computation() {
        use approx::assert_relative_eq;

        // Period returns 10% then 0%: mean 0.05, population stddev 0.05,
        // so the ratio collapses to the annualization factor.
        let values = make_values(&[100.0, 110.0, 110.0]);
        let metrics = BacktestMetrics::compute(&values, &[], 100.0, 0.0);
        assert_relative_eq!(metrics.sharpe_ratio, 252.0_f64.sqrt(), epsilon = 1e-9);
    }

    #[test]
    fn sharpe_positive_for_steady_gains() {
        let values: Vec<f64> = (0..30).map(|i| 100.0 * 1.01_f64.powi(i)).collect();
        let metrics = BacktestMetrics::compute(&make_values(&values), &[], 100.0, 0.0);
        assert!(metrics.sharpe_ratio > 0.0);
    }

    #[test]
    fn sharpe_negative_for_steady_losses() {
        let values: Vec<f64> = (0..30).map(|i| 100.0 * 0.99_f64.powi(i)).collect();
        let metrics = BacktestMetrics::compute(&make_values(&values), &[], 100.0, 0.0);
        assert!(metrics.sharpe_ratio < 0.0);
    }

    #[test]
    fn benchmark_mean_of_buy_and_hold() {
        // AAA gains 10%, BBB loses 10% over the window.
        let aaa = make_symbol("AAA", &[100.0, 105.0, 110.0]);
        let bbb = make_symbol("BBB", &[200.0, 190.0, 180.0]);

        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2024, 1, 3).unwrap();
        let benchmark = buy_and_hold_benchmark(&[aaa, bbb], start, end);

        assert!((benchmark - 0.0).abs() < 1e-9);
    }

    #[test]
    fn benchmark_respects_window() {
        let aaa = make_symbol("AAA", &[100.0, 110.0, 120.0, 130.0]);

        // Window covers only the middle two bars: 120/110 - 1.
        let start = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        let end = NaiveDate::from_ymd_opt(2024, 1, 3).unwrap();
        let benchmark = buy_and_hold_benchmark(&[aaa], start, end);

        assert!((benchmark - (120.0 / 110.0 - 1.0)).abs() < 1e-9);
    }

    #[test]
    fn benchmark_skips_thin_candidates() {
        // One bar inside the window is not enough to measure a return.
        let aaa = make_symbol("AAA", &[100.0]);
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2024, 1, 31).unwrap();

        let benchmark = buy_and_hold_benchmark(&[aaa], start, end);
        assert!((benchmark - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn benchmark_empty_universe_is_zero() {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2024, 1, 31).unwrap();
        assert!((buy_and_hold_benchmark(&[], start, end) - 0.0).abs() < f64::EPSILON);
    }
}
