//! Pre-run validation of backtest and weight configuration.
//!
//! Optional keys fall back to their defaults and pass; configured values are
//! checked for range and format before anything touches price data.

use crate::domain::error::StockrankError;
use crate::ports::config_port::ConfigPort;
use chrono::NaiveDate;

pub fn validate_backtest_config(config: &dyn ConfigPort) -> Result<(), StockrankError> {
    validate_data_dir(config)?;
    validate_initial_capital(config)?;
    validate_eval_bars(config)?;
    validate_rebalance_cycle(config)?;
    validate_top_n(config)?;
    validate_dates(config)?;
    Ok(())
}

/// Every configured weight must be a non-negative number. Unconfigured keys
/// keep their defaults and are always valid.
pub fn validate_weight_config(config: &dyn ConfigPort) -> Result<(), StockrankError> {
    for key in ["fundamental", "technical", "news", "flow"] {
        validate_weight(config, "category_weights", key)?;
    }
    for key in [
        "per",
        "pbr",
        "roe",
        "operating_margin",
        "debt_ratio",
        "current_ratio",
        "eps_growth",
        "revenue_growth",
    ] {
        validate_weight(config, "fundamental_weights", key)?;
    }
    for key in [
        "ma_alignment",
        "rsi",
        "volume_trend",
        "macd",
        "bollinger",
        "stochastic",
        "adx",
        "divergence",
    ] {
        validate_weight(config, "technical_weights", key)?;
    }
    for key in ["sentiment", "frequency", "disclosure", "recency"] {
        validate_weight(config, "news_weights", key)?;
    }
    for key in ["foreign", "institution"] {
        validate_weight(config, "flow_weights", key)?;
    }
    Ok(())
}

fn validate_weight(
    config: &dyn ConfigPort,
    section: &str,
    key: &str,
) -> Result<(), StockrankError> {
    if config.get_string(section, key).is_none() {
        return Ok(());
    }

    // A configured but unparseable value falls through to the sentinel.
    let value = config.get_double(section, key, -1.0);
    if value < 0.0 {
        return Err(StockrankError::ConfigInvalid {
            section: section.to_string(),
            key: key.to_string(),
            reason: "weights must be non-negative numbers".to_string(),
        });
    }
    Ok(())
}

fn validate_data_dir(config: &dyn ConfigPort) -> Result<(), StockrankError> {
    match config.get_string("data", "dir") {
        Some(s) if !s.trim().is_empty() => Ok(()),
        _ => Err(StockrankError::ConfigMissing {
            section: "data".to_string(),
            key: "dir".to_string(),
        }),
    }
}

fn validate_initial_capital(config: &dyn ConfigPort) -> Result<(), StockrankError> {
    let value = config.get_double("backtest", "initial_capital", 100_000.0);
    if value <= 0.0 {
        return Err(StockrankError::ConfigInvalid {
            section: "backtest".to_string(),
            key: "initial_capital".to_string(),
            reason: "initial_capital must be positive".to_string(),
        });
    }
    Ok(())
}

fn validate_eval_bars(config: &dyn ConfigPort) -> Result<(), StockrankError> {
    let value = config.get_int("backtest", "eval_bars", 60);
    if value < 1 {
        return Err(StockrankError::ConfigInvalid {
            section: "backtest".to_string(),
            key: "eval_bars".to_string(),
            reason: "eval_bars must be at least 1".to_string(),
        });
    }
    Ok(())
}

fn validate_rebalance_cycle(config: &dyn ConfigPort) -> Result<(), StockrankError> {
    let value = config.get_int("backtest", "rebalance_cycle", 5);
    if value < 1 {
        return Err(StockrankError::ConfigInvalid {
            section: "backtest".to_string(),
            key: "rebalance_cycle".to_string(),
            reason: "rebalance_cycle must be at least 1".to_string(),
        });
    }
    Ok(())
}

fn validate_top_n(config: &dyn ConfigPort) -> Result<(), StockrankError> {
    let value = config.get_int("backtest", "top_n", 1);
    if value < 1 {
        return Err(StockrankError::ConfigInvalid {
            section: "backtest".to_string(),
            key: "top_n".to_string(),
            reason: "top_n must be at least 1".to_string(),
        });
    }
    Ok(())
}

fn validate_dates(config: &dyn ConfigPort) -> Result<(), StockrankError> {
    let start_str = config.get_string("backtest", "start_date");
    let end_str = config.get_string("backtest", "end_date");

    let start_date = parse_date(start_str.as_deref(), "start_date")?;
    let end_date = parse_date(end_str.as_deref(), "end_date")?;

    if start_date >= end_date {
        return Err(StockrankError::ConfigInvalid {
            section: "backtest".to_string(),
            key: "start_date".to_string(),
            reason: "start_date must be before end_date".to_string(),
        });
    }
    Ok(())
}

fn parse_date(value: Option<&str>, field: &str) -> Result<NaiveDate, StockrankError> {
    match value {
        None => Err(StockrankError::ConfigMissing {
            section: "backtest".to_string(),
            key: field.to_string(),
        }),
        Some(s) => {
            NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| StockrankError::ConfigInvalid {
                section: "backtest".to_string(),
                key: field.to_string(),
                reason: format!("invalid {} format, expected YYYY-MM-DD", field),
            })
        }
    }
}
