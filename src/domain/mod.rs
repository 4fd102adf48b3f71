//! Core domain types and logic.

pub mod price;
pub mod symbol_data;
pub mod sector;
pub mod indicator;
pub mod score;
pub mod backtest;
pub mod metrics;
pub mod universe;
pub mod config_validation;
pub mod error;
