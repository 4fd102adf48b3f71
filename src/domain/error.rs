//! Domain error types.
//!
//! The scoring and simulation core never errors on sparse data (indicators
//! degrade to invalid points, scorers to neutral defaults, the simulator to a
//! zeroed result). These variants cover the adapter and CLI boundary.

/// Top-level error type for stockrank.
#[derive(Debug, thiserror::Error)]
pub enum StockrankError {
    #[error("data error: {reason}")]
    Data { reason: String },

    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("missing config key [{section}] {key}")]
    ConfigMissing { section: String, key: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("no data for {symbol}")]
    NoData { symbol: String },

    #[error("insufficient data for {symbol}: have {bars} bars, need {minimum}")]
    InsufficientData {
        symbol: String,
        bars: usize,
        minimum: usize,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<&StockrankError> for std::process::ExitCode {
    fn from(err: &StockrankError) -> Self {
        let code: u8 = match err {
            StockrankError::Io(_) => 1,
            StockrankError::ConfigParse { .. }
            | StockrankError::ConfigMissing { .. }
            | StockrankError::ConfigInvalid { .. } => 2,
            StockrankError::Data { .. } => 3,
            StockrankError::NoData { .. } | StockrankError::InsufficientData { .. } => 4,
        };
        std::process::ExitCode::from(code)
    }
}
