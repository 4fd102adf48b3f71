//! Price-data access port.

use crate::domain::error::StockrankError;
use crate::domain::price::PriceBar;
use chrono::NaiveDate;

pub trait DataPort {
    /// Bars for `symbol` inside `[start_date, end_date]`, sorted by date.
    fn fetch_prices(
        &self,
        symbol: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Vec<PriceBar>, StockrankError>;

    fn list_symbols(&self) -> Result<Vec<String>, StockrankError>;

    /// (first date, last date, bar count) for `symbol`, None when the symbol
    /// has no data at all.
    fn get_data_range(
        &self,
        symbol: &str,
    ) -> Result<Option<(NaiveDate, NaiveDate, usize)>, StockrankError>;
}
