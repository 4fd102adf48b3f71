//! Technical indicator implementations.
//!
//! This module provides types for representing indicator values and series:
//! - `IndicatorPoint`: A single point in an indicator time series
//! - `IndicatorValue`: Enum for different indicator output shapes
//! - `IndicatorType`: Enum for indicator identity + parameters (serves as HashMap key)
//! - `IndicatorSeries`: A time series of indicator values
//!
//! Every calculator returns a series of the same length as its input, with
//! `valid == false` marking warm-up positions. Short input never errors.

pub mod sma;
pub mod ema;
pub mod rsi;
pub mod bollinger;
pub mod macd;
pub mod stochastic;
pub mod adx;
pub mod divergence;
pub mod snapshot;

pub use adx::calculate_adx;
pub use bollinger::calculate_bollinger;
pub use divergence::{detect_divergence, Divergence};
pub use ema::calculate_ema;
pub use macd::{calculate_macd, calculate_macd_default};
pub use rsi::calculate_rsi;
pub use sma::calculate_sma;
pub use snapshot::{
    calculate_snapshot, calculate_snapshot_unchecked, IndicatorSnapshot, MIN_SNAPSHOT_BARS,
};
pub use stochastic::calculate_stochastic;

use chrono::NaiveDate;
use std::fmt;

#[derive(Debug, Clone)]
pub struct IndicatorPoint {
    pub date: NaiveDate,
    pub valid: bool,
    pub value: IndicatorValue,
}

#[derive(Debug, Clone)]
pub enum IndicatorValue {
    Simple(f64),
    Macd {
        line: f64,
        signal: f64,
        histogram: f64,
    },
    Stochastic {
        k: f64,
        d: f64,
    },
    Bollinger {
        upper: f64,
        middle: f64,
        lower: f64,
        width_pct: f64,
        percent_b: f64,
    },
    Adx {
        adx: f64,
        plus_di: f64,
        minus_di: f64,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum IndicatorType {
    Sma(usize),
    Ema(usize),
    Rsi(usize),
    Macd {
        fast: usize,
        slow: usize,
        signal: usize,
    },
    Stochastic {
        k_period: usize,
        d_period: usize,
    },
    Bollinger {
        period: usize,
        stddev_mult_x100: u32,
    },
    Adx(usize),
}

#[derive(Debug, Clone)]
pub struct IndicatorSeries {
    pub indicator_type: IndicatorType,
    pub values: Vec<IndicatorPoint>,
}

impl IndicatorSeries {
    /// Extract `Simple` values as raw f64s, NaN for invalid or non-simple points.
    pub fn simple_values(&self) -> Vec<f64> {
        self.values
            .iter()
            .map(|p| match p.value {
                IndicatorValue::Simple(v) if p.valid => v,
                _ => f64::NAN,
            })
            .collect()
    }

    /// Extract MACD histogram values as raw f64s, NaN for invalid or non-MACD points.
    pub fn histogram_values(&self) -> Vec<f64> {
        self.values
            .iter()
            .map(|p| match p.value {
                IndicatorValue::Macd { histogram, .. } if p.valid => histogram,
                _ => f64::NAN,
            })
            .collect()
    }
}

impl fmt::Display for IndicatorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndicatorType::Sma(period) => write!(f, "SMA({})", period),
            IndicatorType::Ema(period) => write!(f, "EMA({})", period),
            IndicatorType::Rsi(period) => write!(f, "RSI({})", period),
            IndicatorType::Macd { fast, slow, signal } => {
                write!(f, "MACD({},{},{})", fast, slow, signal)
            }
            IndicatorType::Stochastic { k_period, d_period } => {
                write!(f, "STOCHASTIC({},{})", k_period, d_period)
            }
            IndicatorType::Bollinger {
                period,
                stddev_mult_x100,
            } => {
                let mult = *stddev_mult_x100 as f64 / 100.0;
                write!(f, "BOLLINGER({},{})", period, mult)
            }
            IndicatorType::Adx(period) => write!(f, "ADX({})", period),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indicator_type_display_sma() {
        assert_eq!(IndicatorType::Sma(20).to_string(), "SMA(20)");
    }

    #[test]
    fn indicator_type_display_macd() {
        let macd = IndicatorType::Macd {
            fast: 12,
            slow: 26,
            signal: 9,
        };
        assert_eq!(macd.to_string(), "MACD(12,26,9)");
    }

    #[test]
    fn indicator_type_display_bollinger() {
        let boll = IndicatorType::Bollinger {
            period: 20,
            stddev_mult_x100: 200,
        };
        assert_eq!(boll.to_string(), "BOLLINGER(20,2)");
    }

    #[test]
    fn indicator_type_display_adx() {
        assert_eq!(IndicatorType::Adx(14).to_string(), "ADX(14)");
    }

    #[test]
    fn indicator_type_hash_eq() {
        use std::collections::HashMap;

        let mut map = HashMap::new();
        let sma20 = IndicatorType::Sma(20);
        let adx14 = IndicatorType::Adx(14);

        map.insert(sma20.clone(), "sma20_series".to_string());
        map.insert(adx14.clone(), "adx14_series".to_string());

        assert_eq!(map.get(&sma20), Some(&"sma20_series".to_string()));
        assert_eq!(map.get(&adx14), Some(&"adx14_series".to_string()));
        assert_eq!(
            map.get(&IndicatorType::Sma(20)),
            Some(&"sma20_series".to_string())
        );
    }

    #[test]
    fn simple_values_nan_for_invalid() {
        let series = IndicatorSeries {
            indicator_type: IndicatorType::Sma(2),
            values: vec![
                IndicatorPoint {
                    date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
                    valid: false,
                    value: IndicatorValue::Simple(0.0),
                },
                IndicatorPoint {
                    date: NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
                    valid: true,
                    value: IndicatorValue::Simple(15.0),
                },
            ],
        };

        let raw = series.simple_values();
        assert!(raw[0].is_nan());
        assert!((raw[1] - 15.0).abs() < f64::EPSILON);
    }

    #[test]
    fn histogram_values_nan_for_non_macd() {
        let series = IndicatorSeries {
            indicator_type: IndicatorType::Sma(2),
            values: vec![IndicatorPoint {
                date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
                valid: true,
                value: IndicatorValue::Simple(15.0),
            }],
        };

        assert!(series.histogram_values()[0].is_nan());
    }
}
