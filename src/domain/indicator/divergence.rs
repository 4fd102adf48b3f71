//! Price/oscillator divergence detection.
//!
//! Compares the most recent `lookback` window against the prior `lookback`
//! window. Bullish: price makes a lower low while the oscillator low rises.
//! Bearish: price makes a higher high while the oscillator high falls.
//! Bullish is checked first.
//!
//! Inputs are parallel raw slices where NaN marks undefined entries (the
//! oscillator warmup region). A window whose oscillator values are all NaN
//! yields `None`, as does input shorter than 2 * lookback.

pub const DEFAULT_DIVERGENCE_LOOKBACK: usize = 14;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Divergence {
    #[default]
    None,
    Bullish,
    Bearish,
}

pub fn detect_divergence(prices: &[f64], oscillator: &[f64], lookback: usize) -> Divergence {
    if lookback == 0 || prices.len() != oscillator.len() || prices.len() < 2 * lookback {
        return Divergence::None;
    }

    let n = prices.len();
    let recent = (n - lookback)..n;
    let prior = (n - 2 * lookback)..(n - lookback);

    let prior_price_low = window_min(&prices[prior.clone()]);
    let recent_price_low = window_min(&prices[recent.clone()]);
    let prior_osc_low = window_min(&oscillator[prior.clone()]);
    let recent_osc_low = window_min(&oscillator[recent.clone()]);

    if let (Some(pp), Some(rp), Some(po), Some(ro)) =
        (prior_price_low, recent_price_low, prior_osc_low, recent_osc_low)
    {
        if rp < pp && ro > po {
            return Divergence::Bullish;
        }
    }

    let prior_price_high = window_max(&prices[prior.clone()]);
    let recent_price_high = window_max(&prices[recent.clone()]);
    let prior_osc_high = window_max(&oscillator[prior]);
    let recent_osc_high = window_max(&oscillator[recent]);

    if let (Some(pp), Some(rp), Some(po), Some(ro)) = (
        prior_price_high,
        recent_price_high,
        prior_osc_high,
        recent_osc_high,
    ) {
        if rp > pp && ro < po {
            return Divergence::Bearish;
        }
    }

    Divergence::None
}

/// Minimum of the defined (non-NaN) entries, None when all are NaN.
fn window_min(values: &[f64]) -> Option<f64> {
    let mut min: Option<f64> = None;
    for &v in values {
        if v.is_nan() {
            continue;
        }
        min = Some(match min {
            Some(m) if m <= v => m,
            _ => v,
        });
    }
    min
}

/// Maximum of the defined (non-NaN) entries, None when all are NaN.
fn window_max(values: &[f64]) -> Option<f64> {
    let mut max: Option<f64> = None;
    for &v in values {
        if v.is_nan() {
            continue;
        }
        max = Some(match max {
            Some(m) if m >= v => m,
            _ => v,
        });
    }
    max
}
