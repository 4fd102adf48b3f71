//! Stochastic oscillator (%K / %D).
//!
//! %K = (close - window_low) / (window_high - window_low) * 100 over the
//! trailing k_period bars, with 50 when the window has no range.
//! %D = SMA(d_period) over the defined %K values.
//!
//! Default parameters: k_period=14, d_period=3
//! Warmup: k_period - 1 + d_period - 1 bars.

use crate::domain::indicator::{IndicatorPoint, IndicatorSeries, IndicatorType, IndicatorValue};
use crate::domain::price::PriceBar;

pub const DEFAULT_K_PERIOD: usize = 14;
pub const DEFAULT_D_PERIOD: usize = 3;

pub fn calculate_stochastic(bars: &[PriceBar], k_period: usize, d_period: usize) -> IndicatorSeries {
    if bars.is_empty() || k_period == 0 || d_period == 0 {
        return IndicatorSeries {
            indicator_type: IndicatorType::Stochastic { k_period, d_period },
            values: Vec::new(),
        };
    }

    // Raw %K, defined from index k_period - 1. Warmup slots stay 0.0 and are
    // never read because %D only looks back over the defined region.
    let mut k_values: Vec<f64> = vec![0.0; bars.len()];
    for i in (k_period - 1)..bars.len() {
        let window = &bars[i + 1 - k_period..=i];
        let window_high = window.iter().map(|b| b.high).fold(f64::MIN, f64::max);
        let window_low = window.iter().map(|b| b.low).fold(f64::MAX, f64::min);

        k_values[i] = if window_high == window_low {
            50.0
        } else {
            (bars[i].close - window_low) / (window_high - window_low) * 100.0
        };
    }

    let warmup = k_period - 1 + d_period - 1;

    let mut values = Vec::with_capacity(bars.len());
    for (i, bar) in bars.iter().enumerate() {
        if i < warmup {
            values.push(IndicatorPoint {
                date: bar.date,
                valid: false,
                value: IndicatorValue::Stochastic { k: 0.0, d: 0.0 },
            });
        } else {
            let d = k_values[i + 1 - d_period..=i].iter().sum::<f64>() / d_period as f64;
            values.push(IndicatorPoint {
                date: bar.date,
                valid: true,
                value: IndicatorValue::Stochastic { k: k_values[i], d },
            });
        }
    }

    IndicatorSeries {
        indicator_type: IndicatorType::Stochastic { k_period, d_period },
        values,
    }
}
