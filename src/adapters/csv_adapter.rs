//! CSV price-data adapter.
//!
//! Reads one `{SYMBOL}.csv` per symbol from a base directory, columns
//! `date,open,high,low,close,volume` with `%Y-%m-%d` dates.

use crate::domain::error::StockrankError;
use crate::domain::price::PriceBar;
use crate::ports::data_port::DataPort;
use chrono::NaiveDate;
use std::fs;
use std::path::PathBuf;

pub struct CsvAdapter {
    base_path: PathBuf,
}

impl CsvAdapter {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    fn csv_path(&self, symbol: &str) -> PathBuf {
        self.base_path.join(format!("{}.csv", symbol))
    }

    fn parse_field<T: std::str::FromStr>(
        record: &csv::StringRecord,
        index: usize,
        name: &str,
    ) -> Result<T, StockrankError>
    where
        T::Err: std::fmt::Display,
    {
        record
            .get(index)
            .ok_or_else(|| StockrankError::Data {
                reason: format!("missing {} column", name),
            })?
            .parse()
            .map_err(|e| StockrankError::Data {
                reason: format!("invalid {} value: {}", name, e),
            })
    }
}

impl DataPort for CsvAdapter {
    fn fetch_prices(
        &self,
        symbol: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Vec<PriceBar>, StockrankError> {
        let path = self.csv_path(symbol);
        let content = fs::read_to_string(&path).map_err(|e| StockrankError::Data {
            reason: format!("failed to read {}: {}", path.display(), e),
        })?;

        let mut rdr = csv::Reader::from_reader(content.as_bytes());
        let mut bars = Vec::new();

        for result in rdr.records() {
            let record = result.map_err(|e| StockrankError::Data {
                reason: format!("CSV parse error: {}", e),
            })?;

            let date_str = record.get(0).ok_or_else(|| StockrankError::Data {
                reason: "missing date column".into(),
            })?;
            let date =
                NaiveDate::parse_from_str(date_str, "%Y-%m-%d").map_err(|e| StockrankError::Data {
                    reason: format!("invalid date format: {}", e),
                })?;

            if date < start_date || date > end_date {
                continue;
            }

            let open: f64 = Self::parse_field(&record, 1, "open")?;
            let high: f64 = Self::parse_field(&record, 2, "high")?;
            let low: f64 = Self::parse_field(&record, 3, "low")?;
            let close: f64 = Self::parse_field(&record, 4, "close")?;
            let volume: i64 = Self::parse_field(&record, 5, "volume")?;

            bars.push(PriceBar {
                symbol: symbol.to_string(),
                date,
                open,
                high,
                low,
                close,
                volume,
            });
        }

        bars.sort_by_key(|b| b.date);
        Ok(bars)
    }

    fn list_symbols(&self) -> Result<Vec<String>, StockrankError> {
        let entries = fs::read_dir(&self.base_path).map_err(|e| StockrankError::Data {
            reason: format!(
                "failed to read directory {}: {}",
                self.base_path.display(),
                e
            ),
        })?;

        let mut symbols = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| StockrankError::Data {
                reason: format!("directory entry error: {}", e),
            })?;

            let name = entry.file_name();
            let name_str = name.to_string_lossy();

            if let Some(stem) = name_str.strip_suffix(".csv") {
                symbols.push(stem.to_string());
            }
        }

        symbols.sort();
        Ok(symbols)
    }

    fn get_data_range(
        &self,
        symbol: &str,
    ) -> Result<Option<(NaiveDate, NaiveDate, usize)>, StockrankError> {
        if !self.csv_path(symbol).exists() {
            return Ok(None);
        }

        let bars = self.fetch_prices(symbol, NaiveDate::MIN, NaiveDate::MAX)?;
        match (bars.first(), bars.last()) {
            (Some(first), Some(last)) => Ok(Some((first.date, last.date, bars.len()))),
            _ => Ok(None),
        }
    }
}
