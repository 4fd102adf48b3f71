//! ADX (Average Directional Index) with +DI / -DI.
//!
//! Per bar from index 1: True Range and Wilder directional movement
//! (+DM = up-move when it exceeds the down-move and is positive, -DM the
//! mirror). TR/+DM/-DM are smoothed with EMA(period) seeded by the SMA of the
//! first `period` samples. +DI/-DI = smoothed DM / smoothed TR * 100 (0 when
//! smoothed TR is 0). DX = |+DI - -DI| / (+DI + -DI) * 100 (0 when both DI
//! are 0). ADX is the same EMA smoothing applied over the defined DX values.
//!
//! Default parameter: period=14
//! Warmup: 2 * period - 1 bars.

use crate::domain::indicator::{IndicatorPoint, IndicatorSeries, IndicatorType, IndicatorValue};
use crate::domain::price::PriceBar;

pub const DEFAULT_ADX_PERIOD: usize = 14;

pub fn calculate_adx(bars: &[PriceBar], period: usize) -> IndicatorSeries {
    if bars.is_empty() || period == 0 {
        return IndicatorSeries {
            indicator_type: IndicatorType::Adx(period),
            values: Vec::new(),
        };
    }

    let n = bars.len();

    // Raw TR / +DM / -DM, defined from index 1.
    let mut tr = vec![0.0; n];
    let mut plus_dm = vec![0.0; n];
    let mut minus_dm = vec![0.0; n];
    for i in 1..n {
        tr[i] = bars[i].true_range(bars[i - 1].close);

        let up_move = bars[i].high - bars[i - 1].high;
        let down_move = bars[i - 1].low - bars[i].low;
        if up_move > down_move && up_move > 0.0 {
            plus_dm[i] = up_move;
        }
        if down_move > up_move && down_move > 0.0 {
            minus_dm[i] = down_move;
        }
    }

    // Raw samples start at index 1, so the smoothing seed lands at bar
    // index `period` and DI/DX are defined from there.
    let smoothed_tr = smooth_from(&tr, 1, period);
    let smoothed_plus = smooth_from(&plus_dm, 1, period);
    let smoothed_minus = smooth_from(&minus_dm, 1, period);

    let di_start = period;
    let mut plus_di = vec![0.0; n];
    let mut minus_di = vec![0.0; n];
    let mut dx = vec![0.0; n];
    for i in di_start..n {
        if smoothed_tr[i] != 0.0 {
            plus_di[i] = smoothed_plus[i] / smoothed_tr[i] * 100.0;
            minus_di[i] = smoothed_minus[i] / smoothed_tr[i] * 100.0;
        }

        let di_sum = plus_di[i] + minus_di[i];
        if di_sum != 0.0 {
            dx[i] = (plus_di[i] - minus_di[i]).abs() / di_sum * 100.0;
        }
    }

    let adx = smooth_from(&dx, di_start, period);
    let adx_start = di_start + period - 1;

    let mut values = Vec::with_capacity(n);
    for (i, bar) in bars.iter().enumerate() {
        values.push(IndicatorPoint {
            date: bar.date,
            valid: i >= adx_start,
            value: IndicatorValue::Adx {
                adx: adx[i],
                plus_di: plus_di[i],
                minus_di: minus_di[i],
            },
        });
    }

    IndicatorSeries {
        indicator_type: IndicatorType::Adx(period),
        values,
    }
}

/// EMA(period) with SMA seed over `values[start..]`, re-expanded to input
/// indices. Entries before the seed stay 0.0.
fn smooth_from(values: &[f64], start: usize, period: usize) -> Vec<f64> {
    let mut out = vec![0.0; values.len()];
    let seed_index = start + period - 1;
    if seed_index >= values.len() {
        return out;
    }

    let k = 2.0 / (period as f64 + 1.0);
    let mut ema = values[start..=seed_index].iter().sum::<f64>() / period as f64;
    out[seed_index] = ema;
    for i in (seed_index + 1)..values.len() {
        ema = values[i] * k + ema * (1.0 - k);
        out[i] = ema;
    }

    out
}
