//! Aggregate indicator snapshot at the most recent bar.
//!
//! Collects every "current" indicator value into one struct of `Option<f64>`
//! fields, None where the underlying indicator is still in warmup. Histories
//! shorter than `MIN_SNAPSHOT_BARS` produce an all-None snapshot: values
//! computed from an under-filled window would be misleading rather than
//! merely imprecise.
//!
//! `calculate_snapshot_unchecked` skips the bar-count guard for callers that
//! apply their own gate.

use crate::domain::indicator::adx::DEFAULT_ADX_PERIOD;
use crate::domain::indicator::bollinger::{DEFAULT_BOLLINGER_MULT_X100, DEFAULT_BOLLINGER_PERIOD};
use crate::domain::indicator::divergence::DEFAULT_DIVERGENCE_LOOKBACK;
use crate::domain::indicator::rsi::DEFAULT_RSI_PERIOD;
use crate::domain::indicator::stochastic::{DEFAULT_D_PERIOD, DEFAULT_K_PERIOD};
use crate::domain::indicator::{
    calculate_adx, calculate_bollinger, calculate_macd_default, calculate_rsi, calculate_sma,
    calculate_stochastic, detect_divergence, Divergence, IndicatorSeries, IndicatorValue,
};
use crate::domain::price::PriceBar;

pub const MIN_SNAPSHOT_BARS: usize = 30;

#[derive(Debug, Clone, Default)]
pub struct IndicatorSnapshot {
    pub close: Option<f64>,
    pub ma5: Option<f64>,
    pub ma20: Option<f64>,
    pub ma60: Option<f64>,
    pub ma120: Option<f64>,
    pub rsi: Option<f64>,
    pub macd_line: Option<f64>,
    pub macd_signal: Option<f64>,
    pub macd_histogram: Option<f64>,
    pub prev_macd_histogram: Option<f64>,
    pub bollinger_upper: Option<f64>,
    pub bollinger_middle: Option<f64>,
    pub bollinger_lower: Option<f64>,
    pub bollinger_width: Option<f64>,
    pub percent_b: Option<f64>,
    pub stochastic_k: Option<f64>,
    pub stochastic_d: Option<f64>,
    pub adx: Option<f64>,
    pub plus_di: Option<f64>,
    pub minus_di: Option<f64>,
    pub price_change_5: Option<f64>,
    pub volume_change: Option<f64>,
    pub rsi_divergence: Divergence,
    pub macd_divergence: Divergence,
}

pub fn calculate_snapshot(bars: &[PriceBar]) -> IndicatorSnapshot {
    if bars.len() < MIN_SNAPSHOT_BARS {
        return IndicatorSnapshot::default();
    }
    calculate_snapshot_unchecked(bars)
}

pub fn calculate_snapshot_unchecked(bars: &[PriceBar]) -> IndicatorSnapshot {
    let mut snapshot = IndicatorSnapshot::default();
    let last_bar = match bars.last() {
        Some(bar) => bar,
        None => return snapshot,
    };

    snapshot.close = Some(last_bar.close);
    snapshot.ma5 = last_simple(&calculate_sma(bars, 5));
    snapshot.ma20 = last_simple(&calculate_sma(bars, 20));
    snapshot.ma60 = last_simple(&calculate_sma(bars, 60));
    snapshot.ma120 = last_simple(&calculate_sma(bars, 120));

    let rsi_series = calculate_rsi(bars, DEFAULT_RSI_PERIOD);
    snapshot.rsi = last_simple(&rsi_series);

    let macd_series = calculate_macd_default(bars);
    if let Some(point) = macd_series.values.last() {
        if point.valid {
            if let IndicatorValue::Macd {
                line,
                signal,
                histogram,
            } = point.value
            {
                snapshot.macd_line = Some(line);
                snapshot.macd_signal = Some(signal);
                snapshot.macd_histogram = Some(histogram);
            }
        }
    }
    if macd_series.values.len() >= 2 {
        let prev = &macd_series.values[macd_series.values.len() - 2];
        if prev.valid {
            if let IndicatorValue::Macd { histogram, .. } = prev.value {
                snapshot.prev_macd_histogram = Some(histogram);
            }
        }
    }

    let bollinger_series =
        calculate_bollinger(bars, DEFAULT_BOLLINGER_PERIOD, DEFAULT_BOLLINGER_MULT_X100);
    if let Some(point) = bollinger_series.values.last() {
        if point.valid {
            if let IndicatorValue::Bollinger {
                upper,
                middle,
                lower,
                width_pct,
                percent_b,
            } = point.value
            {
                snapshot.bollinger_upper = Some(upper);
                snapshot.bollinger_middle = Some(middle);
                snapshot.bollinger_lower = Some(lower);
                snapshot.bollinger_width = Some(width_pct);
                snapshot.percent_b = Some(percent_b);
            }
        }
    }

    let stochastic_series = calculate_stochastic(bars, DEFAULT_K_PERIOD, DEFAULT_D_PERIOD);
    if let Some(point) = stochastic_series.values.last() {
        if point.valid {
            if let IndicatorValue::Stochastic { k, d } = point.value {
                snapshot.stochastic_k = Some(k);
                snapshot.stochastic_d = Some(d);
            }
        }
    }

    let adx_series = calculate_adx(bars, DEFAULT_ADX_PERIOD);
    if let Some(point) = adx_series.values.last() {
        if point.valid {
            if let IndicatorValue::Adx {
                adx,
                plus_di,
                minus_di,
            } = point.value
            {
                snapshot.adx = Some(adx);
                snapshot.plus_di = Some(plus_di);
                snapshot.minus_di = Some(minus_di);
            }
        }
    }

    // 5-bar lookback change and current volume vs the previous 5-bar average.
    if bars.len() > 5 {
        let reference_close = bars[bars.len() - 6].close;
        if reference_close != 0.0 {
            snapshot.price_change_5 =
                Some((last_bar.close - reference_close) / reference_close * 100.0);
        }

        let volume_window = &bars[bars.len() - 6..bars.len() - 1];
        let avg_volume =
            volume_window.iter().map(|b| b.volume as f64).sum::<f64>() / volume_window.len() as f64;
        if avg_volume > 0.0 {
            snapshot.volume_change = Some((last_bar.volume as f64 - avg_volume) / avg_volume * 100.0);
        }
    }

    let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();
    snapshot.rsi_divergence = detect_divergence(
        &closes,
        &rsi_series.simple_values(),
        DEFAULT_DIVERGENCE_LOOKBACK,
    );
    snapshot.macd_divergence = detect_divergence(
        &closes,
        &macd_series.histogram_values(),
        DEFAULT_DIVERGENCE_LOOKBACK,
    );

    snapshot
}

fn last_simple(series: &IndicatorSeries) -> Option<f64> {
    series.values.last().and_then(|p| match p.value {
        IndicatorValue::Simple(v) if p.valid => Some(v),
        _ => None,
    })
}
