//! RSI (Relative Strength Index) indicator.
//!
//! Uses Wilder's smoothing for average gain/loss calculation:
//! - First average: simple mean of gains/losses over the first n changes
//! - Subsequent: avg = (prev_avg * (n-1) + current) / n
//!
//! RSI = 100 - (100 / (1 + avg_gain / avg_loss)); 100 when avg_loss == 0.
//! Warmup: first n bars are invalid (n price changes feed the first average).

use crate::domain::indicator::{IndicatorPoint, IndicatorSeries, IndicatorType, IndicatorValue};
use crate::domain::price::PriceBar;

pub const DEFAULT_RSI_PERIOD: usize = 14;

pub fn calculate_rsi(bars: &[PriceBar], period: usize) -> IndicatorSeries {
    if period == 0 || bars.len() < 2 {
        let values: Vec<IndicatorPoint> = bars
            .iter()
            .map(|b| IndicatorPoint {
                date: b.date,
                valid: false,
                value: IndicatorValue::Simple(0.0),
            })
            .collect();

        return IndicatorSeries {
            indicator_type: IndicatorType::Rsi(period),
            values,
        };
    }

    let mut values = Vec::with_capacity(bars.len());
    values.push(IndicatorPoint {
        date: bars[0].date,
        valid: false,
        value: IndicatorValue::Simple(0.0),
    });

    let mut gains: Vec<f64> = Vec::new();
    let mut losses: Vec<f64> = Vec::new();

    for i in 1..bars.len() {
        let change = bars[i].close - bars[i - 1].close;
        gains.push(if change > 0.0 { change } else { 0.0 });
        losses.push(if change < 0.0 { -change } else { 0.0 });
    }

    let mut avg_gain = 0.0;
    let mut avg_loss = 0.0;

    for (i, bar) in bars.iter().enumerate().skip(1) {
        let change_idx = i - 1;

        if change_idx < period - 1 {
            values.push(IndicatorPoint {
                date: bar.date,
                valid: false,
                value: IndicatorValue::Simple(0.0),
            });
        } else if change_idx == period - 1 {
            avg_gain = gains[..period].iter().sum::<f64>() / period as f64;
            avg_loss = losses[..period].iter().sum::<f64>() / period as f64;
            values.push(IndicatorPoint {
                date: bar.date,
                valid: true,
                value: IndicatorValue::Simple(rsi_from_averages(avg_gain, avg_loss)),
            });
        } else {
            avg_gain = (avg_gain * (period - 1) as f64 + gains[change_idx]) / period as f64;
            avg_loss = (avg_loss * (period - 1) as f64 + losses[change_idx]) / period as f64;
            values.push(IndicatorPoint {
                date: bar.date,
                valid: true,
                value: IndicatorValue::Simple(rsi_from_averages(avg_gain, avg_loss)),
            });
        }
    }

    IndicatorSeries {
        indicator_type: IndicatorType::Rsi(period),
        values,
    }
}

fn rsi_from_averages(avg_gain: f64, avg_loss: f64) -> f64 {
    if avg_loss == 0.0 {
        100.0
    } else {
        100.0 - (100.0 / (1.0 + avg_gain / avg_loss))
    }
}
