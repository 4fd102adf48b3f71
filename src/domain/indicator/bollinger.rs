//! Bollinger Bands indicator.
//!
//! Bollinger Bands consist of:
//! - Middle: Simple Moving Average (SMA) over n periods
//! - Upper: Middle + (multiplier × StdDev)
//! - Lower: Middle - (multiplier × StdDev)
//! - Band width %: (Upper - Lower) / Middle × 100 (0 when Middle is 0)
//! - %B: (Close - Lower) / (Upper - Lower), 0.5 when the bands collapse
//!
//! Where StdDev is population standard deviation (divides by N, not N-1).
//!
//! Default parameters: period=20, multiplier=2.0
//! Warmup: first (period-1) bars are invalid.

use crate::domain::indicator::{IndicatorPoint, IndicatorSeries, IndicatorType, IndicatorValue};
use crate::domain::price::PriceBar;

pub const DEFAULT_BOLLINGER_PERIOD: usize = 20;
pub const DEFAULT_BOLLINGER_MULT_X100: u32 = 200;

pub fn calculate_bollinger(
    bars: &[PriceBar],
    period: usize,
    stddev_mult_x100: u32,
) -> IndicatorSeries {
    if period == 0 || bars.is_empty() {
        return IndicatorSeries {
            indicator_type: IndicatorType::Bollinger {
                period,
                stddev_mult_x100,
            },
            values: Vec::new(),
        };
    }

    let mut values = Vec::with_capacity(bars.len());
    let warmup = period - 1;
    let mult = stddev_mult_x100 as f64 / 100.0;

    for i in 0..bars.len() {
        let date = bars[i].date;
        let valid = i >= warmup;

        let (upper, middle, lower, width_pct, percent_b) = if valid {
            let start = i + 1 - period;
            let window = &bars[start..=i];

            let middle_val: f64 = window.iter().map(|b| b.close).sum::<f64>() / period as f64;

            let variance: f64 = window
                .iter()
                .map(|b| {
                    let diff = b.close - middle_val;
                    diff * diff
                })
                .sum::<f64>()
                / period as f64;

            let stddev = variance.sqrt();
            let upper = middle_val + mult * stddev;
            let lower = middle_val - mult * stddev;

            let width_pct = if middle_val == 0.0 {
                0.0
            } else {
                (upper - lower) / middle_val * 100.0
            };
            let percent_b = if upper == lower {
                0.5
            } else {
                (bars[i].close - lower) / (upper - lower)
            };

            (upper, middle_val, lower, width_pct, percent_b)
        } else {
            (0.0, 0.0, 0.0, 0.0, 0.0)
        };

        values.push(IndicatorPoint {
            date,
            valid,
            value: IndicatorValue::Bollinger {
                upper,
                middle,
                lower,
                width_pct,
                percent_b,
            },
        });
    }

    IndicatorSeries {
        indicator_type: IndicatorType::Bollinger {
            period,
            stddev_mult_x100,
        },
        values,
    }
}
