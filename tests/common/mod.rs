#![allow(dead_code)]

use chrono::NaiveDate;
use std::collections::HashMap;
use stockrank::domain::backtest::BacktestConfig;
use stockrank::domain::error::StockrankError;
pub use stockrank::domain::price::PriceBar;
use stockrank::domain::score::{ScoreContext, TechnicalWeights};
use stockrank::domain::symbol_data::SymbolData;
use stockrank::ports::data_port::DataPort;

pub struct MockDataPort {
    pub data: HashMap<String, Vec<PriceBar>>,
    pub errors: HashMap<String, String>,
}

impl MockDataPort {
    pub fn new() -> Self {
        Self {
            data: HashMap::new(),
            errors: HashMap::new(),
        }
    }

    pub fn with_bars(mut self, symbol: &str, bars: Vec<PriceBar>) -> Self {
        self.data.insert(symbol.to_string(), bars);
        self
    }

    pub fn with_error(mut self, symbol: &str, reason: &str) -> Self {
        self.errors.insert(symbol.to_string(), reason.to_string());
        self
    }
}

impl DataPort for MockDataPort {
    fn fetch_prices(
        &self,
        symbol: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Vec<PriceBar>, StockrankError> {
        if let Some(reason) = self.errors.get(symbol) {
            return Err(StockrankError::Data {
                reason: reason.clone(),
            });
        }
        Ok(self
            .data
            .get(symbol)
            .map(|bars| {
                bars.iter()
                    .filter(|b| b.date >= start_date && b.date <= end_date)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }

    fn list_symbols(&self) -> Result<Vec<String>, StockrankError> {
        let mut symbols: Vec<String> = self.data.keys().cloned().collect();
        symbols.sort();
        Ok(symbols)
    }

    fn get_data_range(
        &self,
        symbol: &str,
    ) -> Result<Option<(NaiveDate, NaiveDate, usize)>, StockrankError> {
        if let Some(reason) = self.errors.get(symbol) {
            return Err(StockrankError::Data {
                reason: reason.clone(),
            });
        }
        match self.data.get(symbol) {
            Some(bars) if !bars.is_empty() => {
                let min = bars.iter().map(|b| b.date).min().unwrap();
                let max = bars.iter().map(|b| b.date).max().unwrap();
                Ok(Some((min, max, bars.len())))
            }
            _ => Ok(None),
        }
    }
}

pub fn make_bar(symbol: &str, date: &str, close: f64) -> PriceBar {
    PriceBar {
        symbol: symbol.to_string(),
        date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
        open: close - 1.0,
        high: close + 1.0,
        low: close - 2.0,
        close,
        volume: 1000,
    }
}

pub fn make_symbol_data(symbol: &str, bars: Vec<PriceBar>) -> SymbolData {
    SymbolData::new(symbol.to_string(), bars)
}

/// Context whose ranking composite reduces to the RSI sub-score, so trades
/// track recent price direction and nothing else.
pub fn rsi_only_context() -> ScoreContext {
    let mut context = ScoreContext::default();
    context.weights.technical = TechnicalWeights {
        ma_alignment: 0.0,
        rsi: 1.0,
        volume_trend: 0.0,
        macd: 0.0,
        bollinger: 0.0,
        stochastic: 0.0,
        adx: 0.0,
        divergence: 0.0,
    };
    context
}

pub fn sample_config() -> BacktestConfig {
    BacktestConfig {
        initial_capital: 100_000.0,
        eval_bars: 30,
        rebalance_cycle: 5,
        top_n: 1,
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn generate_bars(
    symbol: &str,
    start_date: &str,
    count: usize,
    start_price: f64,
) -> Vec<PriceBar> {
    let start = NaiveDate::parse_from_str(start_date, "%Y-%m-%d").unwrap();
    (0..count)
        .map(|i| PriceBar {
            symbol: symbol.to_string(),
            date: start + chrono::Duration::days(i as i64),
            open: start_price + i as f64,
            high: start_price + i as f64 + 1.0,
            low: start_price + i as f64 - 1.0,
            close: start_price + i as f64,
            volume: 1000 + (i as i64) * 10,
        })
        .collect()
}

/// Bars whose closes ramp up for `up` steps then down for `down` steps.
pub fn hill_bars(symbol: &str, start_date: &str, base: f64, up: usize, down: usize) -> Vec<PriceBar> {
    let start = NaiveDate::parse_from_str(start_date, "%Y-%m-%d").unwrap();
    let peak = base + up as f64 - 1.0;
    (0..up + down)
        .map(|i| {
            let close = if i < up {
                base + i as f64
            } else {
                peak - (i - up + 1) as f64
            };
            PriceBar {
                symbol: symbol.to_string(),
                date: start + chrono::Duration::days(i as i64),
                open: close,
                high: close + 1.0,
                low: close - 1.0,
                close,
                volume: 10_000,
            }
        })
        .collect()
}

/// Mirror of [`hill_bars`]: down for `down` steps, then up for `up` steps.
pub fn valley_bars(
    symbol: &str,
    start_date: &str,
    base: f64,
    down: usize,
    up: usize,
) -> Vec<PriceBar> {
    let start = NaiveDate::parse_from_str(start_date, "%Y-%m-%d").unwrap();
    let trough = base - down as f64 + 1.0;
    (0..down + up)
        .map(|i| {
            let close = if i < down {
                base - i as f64
            } else {
                trough + (i - down + 1) as f64
            };
            PriceBar {
                symbol: symbol.to_string(),
                date: start + chrono::Duration::days(i as i64),
                open: close,
                high: close + 1.0,
                low: close - 1.0,
                close,
                volume: 10_000,
            }
        })
        .collect()
}
