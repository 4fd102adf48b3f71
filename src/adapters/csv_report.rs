//! CSV report writer for the backtest ledgers.

use crate::domain::backtest::BacktestResult;
use crate::domain::error::StockrankError;
use std::path::Path;

pub fn write_trades<P: AsRef<Path>>(
    path: P,
    result: &BacktestResult,
) -> Result<(), StockrankError> {
    let mut writer = csv::Writer::from_path(path).map_err(csv_error)?;

    writer
        .write_record(["date", "action", "symbol", "price", "score", "portfolio_value"])
        .map_err(csv_error)?;

    for trade in &result.trades {
        writer
            .write_record([
                trade.date.format("%Y-%m-%d").to_string(),
                trade.action.as_str().to_string(),
                trade.symbol.clone(),
                format!("{:.2}", trade.price),
                format!("{:.2}", trade.score),
                format!("{:.2}", trade.portfolio_value),
            ])
            .map_err(csv_error)?;
    }

    writer.flush()?;
    Ok(())
}

pub fn write_holding_periods<P: AsRef<Path>>(
    path: P,
    result: &BacktestResult,
) -> Result<(), StockrankError> {
    let mut writer = csv::Writer::from_path(path).map_err(csv_error)?;

    writer
        .write_record(["symbol", "days", "return_pct"])
        .map_err(csv_error)?;

    for period in &result.holding_periods {
        writer
            .write_record([
                period.symbol.clone(),
                period.days.to_string(),
                format!("{:.2}", period.return_pct),
            ])
            .map_err(csv_error)?;
    }

    writer.flush()?;
    Ok(())
}

fn csv_error(e: csv::Error) -> StockrankError {
    StockrankError::Data {
        reason: format!("CSV write error: {}", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::backtest::{HoldingPeriod, Trade, TradeAction};
    use chrono::NaiveDate;
    use std::fs;
    use tempfile::TempDir;

    fn sample_result() -> BacktestResult {
        let mut result = BacktestResult::zeroed();
        result.trades.push(Trade {
            date: NaiveDate::from_ymd_opt(2024, 3, 4).unwrap(),
            action: TradeAction::Buy,
            symbol: "AAPL".to_string(),
            price: 182.5,
            score: 7.25,
            portfolio_value: 100_000.0,
        });
        result.trades.push(Trade {
            date: NaiveDate::from_ymd_opt(2024, 3, 11).unwrap(),
            action: TradeAction::Sell,
            symbol: "AAPL".to_string(),
            price: 190.0,
            score: 4.0,
            portfolio_value: 104_109.59,
        });
        result.holding_periods.push(HoldingPeriod {
            symbol: "AAPL".to_string(),
            days: 5,
            return_pct: 4.11,
        });
        result
    }

    #[test]
    fn write_trades_produces_ledger_rows() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("trades.csv");

        write_trades(&path, &sample_result()).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "date,action,symbol,price,score,portfolio_value");
        assert_eq!(lines[1], "2024-03-04,BUY,AAPL,182.50,7.25,100000.00");
        assert_eq!(lines[2], "2024-03-11,SELL,AAPL,190.00,4.00,104109.59");
    }

    #[test]
    fn write_holding_periods_produces_rows() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("periods.csv");

        write_holding_periods(&path, &sample_result()).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], "symbol,days,return_pct");
        assert_eq!(lines[1], "AAPL,5,4.11");
    }

    #[test]
    fn empty_result_writes_header_only() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("trades.csv");

        write_trades(&path, &BacktestResult::zeroed()).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content.lines().count(), 1);
    }
}
