//! Per-symbol price history bundle and the unified timeline.

use crate::domain::price::PriceBar;
use crate::domain::score::flow::SupplyDemandData;
use chrono::NaiveDate;
use std::collections::{BTreeSet, HashMap};

#[derive(Debug, Clone)]
pub struct SymbolData {
    pub symbol: String,
    pub bars: Vec<PriceBar>,
    pub date_index: HashMap<NaiveDate, usize>,
    pub flow: Option<SupplyDemandData>,
}

impl SymbolData {
    pub fn new(symbol: String, bars: Vec<PriceBar>) -> Self {
        let date_index = bars
            .iter()
            .enumerate()
            .map(|(i, bar)| (bar.date, i))
            .collect();
        Self {
            symbol,
            bars,
            date_index,
            flow: None,
        }
    }

    pub fn with_flow(mut self, flow: SupplyDemandData) -> Self {
        self.flow = Some(flow);
        self
    }

    pub fn bar_count(&self) -> usize {
        self.bars.len()
    }

    pub fn get_bar(&self, date: NaiveDate) -> Option<&PriceBar> {
        self.date_index.get(&date).map(|&i| &self.bars[i])
    }

    pub fn get_bar_index(&self, date: NaiveDate) -> Option<usize> {
        self.date_index.get(&date).copied()
    }

    /// Prefix of bars ending at the exact `date`, None when the symbol did
    /// not trade that day. Scoring goes through this accessor, so it can
    /// never see past the evaluation date.
    pub fn bars_through(&self, date: NaiveDate) -> Option<&[PriceBar]> {
        self.get_bar_index(date).map(|i| &self.bars[..=i])
    }

    /// Most recent bar at or before `date`. Bars are date-ordered, so this
    /// is a binary search.
    pub fn latest_bar_at(&self, date: NaiveDate) -> Option<&PriceBar> {
        let idx = self.bars.partition_point(|bar| bar.date <= date);
        if idx == 0 {
            None
        } else {
            Some(&self.bars[idx - 1])
        }
    }
}

pub fn build_unified_timeline(symbols: &[SymbolData]) -> Vec<NaiveDate> {
    let unique_dates: BTreeSet<NaiveDate> = symbols
        .iter()
        .flat_map(|sd| sd.bars.iter().map(|bar| bar.date))
        .collect();
    unique_dates.into_iter().collect()
}
