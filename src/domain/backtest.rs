//! Rotation backtest: single-position walk-forward simulation.
//!
//! The simulator walks the unified timeline, re-ranks the universe by the
//! technical composite every `rebalance_cycle` bars, and always holds either
//! cash or one symbol. Sparse history is never an error: a candidate without
//! enough bars sits out individual dates, and a universe without enough
//! aligned history yields a zeroed result.

use crate::domain::metrics::{buy_and_hold_benchmark, BacktestMetrics};
use crate::domain::score::ScoreContext;
use crate::domain::symbol_data::{build_unified_timeline, SymbolData};
use chrono::NaiveDate;

/// Timeline dates shared by every candidate needed before a simulation runs.
pub const MIN_ALIGNED_BARS: usize = 20;

/// Bars of history a candidate needs on a date before it is scored.
pub const MIN_CANDIDATE_BARS: usize = 10;

#[derive(Debug, Clone)]
pub struct BacktestConfig {
    pub initial_capital: f64,
    /// Timeline bars in the evaluation window; the walk covers the last
    /// `eval_bars` dates.
    pub eval_bars: usize,
    /// Bars between rebalance decisions.
    pub rebalance_cycle: usize,
    /// Size of the ranked shortlist. The simulator still holds at most one
    /// position; a larger shortlist only widens what gets ranked.
    pub top_n: usize,
}

impl Default for BacktestConfig {
    fn default() -> Self {
        Self {
            initial_capital: 100_000.0,
            eval_bars: 60,
            rebalance_cycle: 5,
            top_n: 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TradeAction {
    Buy,
    Sell,
    Hold,
}

impl TradeAction {
    pub fn as_str(self) -> &'static str {
        match self {
            TradeAction::Buy => "BUY",
            TradeAction::Sell => "SELL",
            TradeAction::Hold => "HOLD",
        }
    }
}

/// Ledger entry. Appended once per simulated event, never edited.
#[derive(Debug, Clone)]
pub struct Trade {
    pub date: NaiveDate,
    pub action: TradeAction,
    pub symbol: String,
    pub price: f64,
    pub score: f64,
    pub portfolio_value: f64,
}

/// Open position. Exists only between a BUY and the close that follows.
#[derive(Debug, Clone)]
pub struct Holding {
    pub symbol: String,
    pub shares: f64,
    pub buy_price: f64,
    pub buy_date: NaiveDate,
    /// Timeline index of the buy, for holding-period length.
    pub buy_index: usize,
}

/// Closed-position record. `days` is the timeline-index distance between
/// buy and close.
#[derive(Debug, Clone)]
pub struct HoldingPeriod {
    pub symbol: String,
    pub days: usize,
    pub return_pct: f64,
}

#[derive(Debug, Clone)]
pub struct PortfolioPoint {
    pub date: NaiveDate,
    pub value: f64,
}

#[derive(Debug, Clone)]
pub struct BacktestResult {
    pub trades: Vec<Trade>,
    pub holding_periods: Vec<HoldingPeriod>,
    pub values: Vec<PortfolioPoint>,
    pub metrics: BacktestMetrics,
}

impl BacktestResult {
    /// Normal return value for a universe without enough aligned history,
    /// not an error.
    pub fn zeroed() -> Self {
        Self {
            trades: Vec::new(),
            holding_periods: Vec::new(),
            values: Vec::new(),
            metrics: BacktestMetrics::zeroed(),
        }
    }
}

struct RankedCandidate {
    index: usize,
    score: f64,
    price: f64,
}

pub fn run_backtest(
    symbols: &[SymbolData],
    context: &ScoreContext,
    config: &BacktestConfig,
) -> BacktestResult {
    let timeline = build_unified_timeline(symbols);

    if symbols.is_empty() || aligned_bar_count(symbols, &timeline) < MIN_ALIGNED_BARS {
        return BacktestResult::zeroed();
    }

    let last_index = timeline.len() - 1;
    let start = timeline.len().saturating_sub(config.eval_bars.max(1));

    let mut cash = config.initial_capital;
    let mut position: Option<Holding> = None;
    let mut trades: Vec<Trade> = Vec::new();
    let mut holding_periods: Vec<HoldingPeriod> = Vec::new();
    let mut values: Vec<PortfolioPoint> = Vec::new();

    let mut index = start;
    let mut last_walked = start;
    while index <= last_index {
        let date = timeline[index];
        last_walked = index;

        let ranked = rank_candidates(symbols, date, context);
        let shortlist = &ranked[..ranked.len().min(config.top_n.max(1))];

        if let Some(top) = shortlist.first() {
            let top_symbol = symbols[top.index].symbol.as_str();

            match position.take() {
                None => {
                    if top.price > 0.0 {
                        position =
                            Some(open_position(top, top_symbol, date, index, &mut cash, &mut trades));
                    }
                }
                Some(holding) if holding.symbol == top_symbol => {
                    trades.push(Trade {
                        date,
                        action: TradeAction::Hold,
                        symbol: holding.symbol.clone(),
                        price: top.price,
                        score: top.score,
                        portfolio_value: cash + holding.shares * top.price,
                    });
                    position = Some(holding);
                }
                Some(holding) => {
                    let sell_price = mark_price(symbols, &holding, date);
                    // Score of the outgoing symbol if it ranked today, 0 when
                    // it sat the date out.
                    let sold_score = ranked
                        .iter()
                        .find(|c| symbols[c.index].symbol == holding.symbol)
                        .map(|c| c.score)
                        .unwrap_or(0.0);

                    cash += holding.shares * sell_price;
                    holding_periods.push(close_holding(&holding, sell_price, index));
                    trades.push(Trade {
                        date,
                        action: TradeAction::Sell,
                        symbol: holding.symbol.clone(),
                        price: sell_price,
                        score: sold_score,
                        portfolio_value: cash,
                    });

                    if top.price > 0.0 {
                        position =
                            Some(open_position(top, top_symbol, date, index, &mut cash, &mut trades));
                    }
                }
            }
        }

        values.push(PortfolioPoint {
            date,
            value: cash + position_value(position.as_ref(), symbols, date),
        });

        // A cycle of zero would never advance.
        index += config.rebalance_cycle.max(1);
    }

    if last_walked != last_index {
        let date = timeline[last_index];
        values.push(PortfolioPoint {
            date,
            value: cash + position_value(position.as_ref(), symbols, date),
        });
    }

    // Terminal mark-to-market: the holding-period ledger reflects every
    // opened position, with no SELL trade recorded for the last one.
    if let Some(holding) = position {
        let price = mark_price(symbols, &holding, timeline[last_index]);
        holding_periods.push(close_holding(&holding, price, last_index));
    }

    let benchmark = buy_and_hold_benchmark(symbols, timeline[start], timeline[last_index]);
    let metrics =
        BacktestMetrics::compute(&values, &holding_periods, config.initial_capital, benchmark);

    BacktestResult {
        trades,
        holding_periods,
        values,
        metrics,
    }
}

/// Timeline dates on which every candidate has a bar.
fn aligned_bar_count(symbols: &[SymbolData], timeline: &[NaiveDate]) -> usize {
    timeline
        .iter()
        .filter(|&&date| symbols.iter().all(|sd| sd.get_bar(date).is_some()))
        .count()
}

/// Candidates with enough history on `date`, scored over bars up to the date
/// and stable-sorted by score descending. Ties keep universe order.
fn rank_candidates(
    symbols: &[SymbolData],
    date: NaiveDate,
    context: &ScoreContext,
) -> Vec<RankedCandidate> {
    let mut ranked = Vec::new();
    for (index, sd) in symbols.iter().enumerate() {
        let bars = match sd.bars_through(date) {
            Some(bars) if bars.len() >= MIN_CANDIDATE_BARS => bars,
            _ => continue,
        };

        ranked.push(RankedCandidate {
            index,
            score: context.technical_composite(bars, sd.flow.as_ref()),
            price: bars[bars.len() - 1].close,
        });
    }

    ranked.sort_by(|a, b| b.score.total_cmp(&a.score));
    ranked
}

fn open_position(
    top: &RankedCandidate,
    symbol: &str,
    date: NaiveDate,
    index: usize,
    cash: &mut f64,
    trades: &mut Vec<Trade>,
) -> Holding {
    let shares = *cash / top.price;
    *cash = 0.0;

    trades.push(Trade {
        date,
        action: TradeAction::Buy,
        symbol: symbol.to_string(),
        price: top.price,
        score: top.score,
        portfolio_value: shares * top.price,
    });

    Holding {
        symbol: symbol.to_string(),
        shares,
        buy_price: top.price,
        buy_date: date,
        buy_index: index,
    }
}

fn close_holding(holding: &Holding, close_price: f64, index: usize) -> HoldingPeriod {
    let return_pct = if holding.buy_price > 0.0 {
        (close_price - holding.buy_price) / holding.buy_price * 100.0
    } else {
        0.0
    };

    HoldingPeriod {
        symbol: holding.symbol.clone(),
        days: index - holding.buy_index,
        return_pct,
    }
}

/// Most recent price for the held symbol at or before `date`, falling back
/// to the entry price when no bar is available.
fn mark_price(symbols: &[SymbolData], holding: &Holding, date: NaiveDate) -> f64 {
    symbols
        .iter()
        .find(|sd| sd.symbol == holding.symbol)
        .and_then(|sd| sd.latest_bar_at(date))
        .map(|bar| bar.close)
        .unwrap_or(holding.buy_price)
}

fn position_value(position: Option<&Holding>, symbols: &[SymbolData], date: NaiveDate) -> f64 {
    match position {
        Some(holding) => holding.shares * mark_price(symbols, holding, date),
        None => 0.0,
    }
}
