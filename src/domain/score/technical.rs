//! Technical scorers over the indicator snapshot.
//!
//! Every scorer degrades to a neutral 5 when its inputs are undefined, so a
//! short history lowers confidence instead of erroring.

use crate::domain::indicator::{Divergence, IndicatorSnapshot};
use crate::domain::score::{clamp_score, round1, weighted_average, TechnicalScores, TechnicalWeights};

pub fn compute_technical_scores(
    snapshot: &IndicatorSnapshot,
    weights: &TechnicalWeights,
) -> TechnicalScores {
    let ma_alignment = ma_alignment_score(
        snapshot.close,
        snapshot.ma5,
        snapshot.ma20,
        snapshot.ma60,
        snapshot.ma120,
    );
    let rsi = rsi_score(snapshot.rsi);
    let volume_trend = volume_trend_score(snapshot.price_change_5, snapshot.volume_change);
    let macd = macd_score(
        snapshot.macd_line,
        snapshot.macd_signal,
        snapshot.macd_histogram,
        snapshot.prev_macd_histogram,
    );
    let bollinger = bollinger_score(snapshot.percent_b);
    let stochastic = stochastic_score(snapshot.stochastic_k, snapshot.stochastic_d);
    let adx = adx_score(snapshot.adx, snapshot.plus_di, snapshot.minus_di);
    let divergence = divergence_score(snapshot.rsi_divergence, snapshot.macd_divergence);

    let average = round1(weighted_average(&[
        (ma_alignment, weights.ma_alignment),
        (rsi, weights.rsi),
        (volume_trend, weights.volume_trend),
        (macd, weights.macd),
        (bollinger, weights.bollinger),
        (stochastic, weights.stochastic),
        (adx, weights.adx),
        (divergence, weights.divergence),
    ]));

    TechnicalScores {
        ma_alignment,
        rsi,
        volume_trend,
        macd,
        bollinger,
        stochastic,
        adx,
        divergence,
        average,
    }
}

/// Moving-average alignment. +0.5/-0.5 for close above/below each defined MA
/// and for each ascending/descending adjacent MA pair, with an extra
/// +1.5/-1.5 when at least four comparisons all agree. The extremes land
/// exactly on 10 (perfect bull stack) and 1 (perfect bear stack).
pub fn ma_alignment_score(
    close: Option<f64>,
    ma5: Option<f64>,
    ma20: Option<f64>,
    ma60: Option<f64>,
    ma120: Option<f64>,
) -> f64 {
    let mut score = 5.0;
    let mut comparisons = 0;
    let mut bullish = 0;
    let mut bearish = 0;

    let mut compare = |left: Option<f64>, right: Option<f64>| {
        if let (Some(a), Some(b)) = (left, right) {
            comparisons += 1;
            if a > b {
                bullish += 1;
            } else if a < b {
                bearish += 1;
            }
        }
    };

    compare(close, ma5);
    compare(close, ma20);
    compare(close, ma60);
    compare(close, ma120);
    compare(ma5, ma20);
    compare(ma20, ma60);
    compare(ma60, ma120);

    if comparisons == 0 {
        return 5.0;
    }

    score += 0.5 * bullish as f64;
    score -= 0.5 * bearish as f64;

    if comparisons >= 4 && bullish == comparisons {
        score += 1.5;
    } else if comparisons >= 4 && bearish == comparisons {
        score -= 1.5;
    }

    clamp_score(score.round())
}

/// RSI banding: oversold scores high, overbought low.
pub fn rsi_score(rsi: Option<f64>) -> f64 {
    let rsi = match rsi {
        Some(v) => v,
        None => return 5.0,
    };

    if rsi <= 20.0 {
        10.0
    } else if rsi <= 30.0 {
        8.0
    } else if rsi <= 40.0 {
        7.0
    } else if rsi <= 60.0 {
        5.0
    } else if rsi <= 70.0 {
        4.0
    } else if rsi <= 80.0 {
        2.0
    } else {
        1.0
    }
}

/// Price direction crossed with volume-change magnitude. Rising price on a
/// volume surge confirms the move; falling price on a surge is distribution.
pub fn volume_trend_score(price_change_pct: Option<f64>, volume_change_pct: Option<f64>) -> f64 {
    let (price, volume) = match (price_change_pct, volume_change_pct) {
        (Some(p), Some(v)) => (p, v),
        _ => return 5.0,
    };

    if price > 1.0 {
        if volume >= 50.0 {
            9.0
        } else if volume > 0.0 {
            7.0
        } else {
            6.0
        }
    } else if price < -1.0 {
        if volume >= 50.0 {
            1.0
        } else if volume > 0.0 {
            3.0
        } else {
            4.0
        }
    } else {
        5.0
    }
}

/// MACD line-vs-signal combined with histogram sign and slope. Fresh
/// crossovers dominate the banding.
pub fn macd_score(
    line: Option<f64>,
    signal: Option<f64>,
    histogram: Option<f64>,
    prev_histogram: Option<f64>,
) -> f64 {
    let (line, signal, hist, prev) = match (line, signal, histogram, prev_histogram) {
        (Some(l), Some(s), Some(h), Some(p)) => (l, s, h, p),
        _ => return 5.0,
    };

    if hist > 0.0 && prev <= 0.0 {
        return 10.0;
    }
    if hist < 0.0 && prev >= 0.0 {
        return 1.0;
    }

    if line > signal {
        if hist > prev {
            9.0
        } else if hist < prev {
            7.0
        } else {
            6.0
        }
    } else if hist > prev {
        // Below the signal but the gap is narrowing: crossover may be near.
        4.0
    } else {
        2.0
    }
}

/// Bollinger %B banding: near or below the lower band scores high.
pub fn bollinger_score(percent_b: Option<f64>) -> f64 {
    let percent_b = match percent_b {
        Some(v) => v,
        None => return 5.0,
    };

    if percent_b < 0.0 {
        10.0
    } else if percent_b < 0.2 {
        9.0
    } else if percent_b < 0.4 {
        7.0
    } else if percent_b < 0.6 {
        5.0
    } else if percent_b < 0.8 {
        4.0
    } else if percent_b <= 1.0 {
        2.0
    } else {
        1.0
    }
}

/// Stochastic %K banding with a +/-1 adjustment for the K-vs-D cross.
pub fn stochastic_score(k: Option<f64>, d: Option<f64>) -> f64 {
    let k = match k {
        Some(v) => v,
        None => return 5.0,
    };

    let mut score = if k < 20.0 {
        8.0
    } else if k < 30.0 {
        7.0
    } else if k < 50.0 {
        6.0
    } else if k < 70.0 {
        5.0
    } else if k < 80.0 {
        4.0
    } else {
        2.0
    };

    if let Some(d) = d {
        if k > d {
            score += 1.0;
        } else if k < d {
            score -= 1.0;
        }
    }

    clamp_score(score)
}

/// ADX trend strength signed by the DI direction.
pub fn adx_score(adx: Option<f64>, plus_di: Option<f64>, minus_di: Option<f64>) -> f64 {
    let (adx, plus_di, minus_di) = match (adx, plus_di, minus_di) {
        (Some(a), Some(p), Some(m)) => (a, p, m),
        _ => return 5.0,
    };

    if plus_di >= minus_di {
        if adx >= 40.0 {
            10.0
        } else if adx >= 25.0 {
            8.0
        } else if adx >= 20.0 {
            6.0
        } else {
            5.0
        }
    } else if adx >= 40.0 {
        1.0
    } else if adx >= 25.0 {
        2.0
    } else if adx >= 20.0 {
        4.0
    } else {
        5.0
    }
}

/// RSI and MACD-histogram divergence mapped to a discrete score. Opposing
/// signals cancel to neutral.
pub fn divergence_score(rsi_divergence: Divergence, macd_divergence: Divergence) -> f64 {
    match (rsi_divergence, macd_divergence) {
        (Divergence::Bullish, Divergence::Bullish) => 10.0,
        (Divergence::Bullish, Divergence::None) | (Divergence::None, Divergence::Bullish) => 7.0,
        (Divergence::None, Divergence::None) => 5.0,
        (Divergence::Bearish, Divergence::None) | (Divergence::None, Divergence::Bearish) => 3.0,
        (Divergence::Bearish, Divergence::Bearish) => 1.0,
        (Divergence::Bullish, Divergence::Bearish) | (Divergence::Bearish, Divergence::Bullish) => {
            5.0
        }
    }
}
