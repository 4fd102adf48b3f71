//! CLI definition and dispatch.

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

use crate::adapters::csv_adapter::CsvAdapter;
use crate::adapters::csv_report;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::domain::backtest::{self as backtest_engine, BacktestConfig, BacktestResult};
use crate::domain::config_validation::{validate_backtest_config, validate_weight_config};
use crate::domain::error::StockrankError;
use crate::domain::indicator::{calculate_snapshot, IndicatorSnapshot, MIN_SNAPSHOT_BARS};
use crate::domain::score::flow::SupplyDemandData;
use crate::domain::score::{FundamentalData, ScoreContext, StockScores, WeightConfig};
use crate::domain::sector::SectorAverages;
use crate::domain::symbol_data::SymbolData;
use crate::domain::universe::{parse_symbols, validate_universe};
use crate::ports::config_port::ConfigPort;
use crate::ports::data_port::DataPort;

#[derive(Parser, Debug)]
#[command(name = "stockrank", about = "Multi-factor stock ranking and rotation backtester")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run a rotation backtest over the configured universe
    Backtest {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(short, long)]
        symbols: Option<String>,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Print the indicator snapshot and score breakdown for one symbol
    Score {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(short, long)]
        symbol: String,
        #[arg(long)]
        date: Option<String>,
    },
    /// List symbols available in the data directory
    ListSymbols {
        #[arg(short, long)]
        config: PathBuf,
    },
    /// Show data range for symbol(s)
    Info {
        #[arg(long)]
        symbol: Option<String>,
        #[arg(short, long)]
        config: PathBuf,
    },
    /// Validate a config file
    Validate {
        #[arg(short, long)]
        config: PathBuf,
    },
}

pub fn run(cli: Cli) -> ExitCode {
    match cli.command {
        Command::Backtest {
            config,
            symbols,
            output,
        } => run_backtest(&config, symbols.as_deref(), output.as_ref()),
        Command::Score {
            config,
            symbol,
            date,
        } => run_score(&config, &symbol, date.as_deref()),
        Command::ListSymbols { config } => run_list_symbols(&config),
        Command::Info { symbol, config } => run_info(symbol.as_deref(), &config),
        Command::Validate { config } => run_validate(&config),
    }
}

pub fn load_config(path: &PathBuf) -> Result<FileConfigAdapter, ExitCode> {
    FileConfigAdapter::from_file(path).map_err(|e| {
        let err = StockrankError::ConfigParse {
            file: path.display().to_string(),
            reason: e.to_string(),
        };
        eprintln!("error: {err}");
        ExitCode::from(&err)
    })
}

fn run_backtest(
    config_path: &PathBuf,
    symbols_override: Option<&str>,
    output_path: Option<&PathBuf>,
) -> ExitCode {
    // Stage 1: Load config
    eprintln!("Loading config from {}", config_path.display());
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };

    // Stage 2: Validate backtest and weight config
    if let Err(e) = validate_backtest_config(&adapter) {
        eprintln!("error: {e}");
        return (&e).into();
    }
    if let Err(e) = validate_weight_config(&adapter) {
        eprintln!("error: {e}");
        return (&e).into();
    }

    // Stage 3: Build the scoring context and backtest config
    let context = build_score_context(&adapter);
    let bt_config = build_backtest_config(&adapter);

    let (start_date, end_date) = match read_date_window(&adapter) {
        Ok(w) => w,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    // Stage 4: Resolve the symbol universe
    let symbols = match resolve_symbols(symbols_override, &adapter) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    // Stage 5: Validate the universe against available data
    let data_port = match build_data_port(&adapter) {
        Ok(d) => d,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    let validation = match validate_universe(&data_port, symbols, start_date, end_date) {
        Ok(v) => v,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    // Stage 6: Fetch price bars and attach flow records
    let mut universe: Vec<SymbolData> = Vec::with_capacity(validation.universe.count());
    for symbol in &validation.universe.symbols {
        let bars = match data_port.fetch_prices(symbol, start_date, end_date) {
            Ok(b) => b,
            Err(e) => {
                eprintln!("warning: skipping {} ({})", symbol, e);
                continue;
            }
        };

        let mut sd = SymbolData::new(symbol.clone(), bars);
        if let Some(flow) = read_flow(&adapter, symbol) {
            sd = sd.with_flow(flow);
        }
        universe.push(sd);
    }

    if universe.is_empty() {
        eprintln!("error: no symbols with data to rank");
        return ExitCode::from(4);
    }

    // Stage 7: Run the simulation
    eprintln!(
        "Running backtest: {} symbols, {} to {}",
        universe.len(),
        start_date,
        end_date,
    );

    let result = backtest_engine::run_backtest(&universe, &context, &bt_config);

    // Stage 8: Print console summary to stderr
    print_backtest_summary(&result);

    // Stage 9: Optionally write the trade ledger
    if let Some(path) = output_path {
        match csv_report::write_trades(path, &result) {
            Ok(()) => eprintln!("\nTrade ledger written to: {}", path.display()),
            Err(e) => {
                eprintln!("error: {e}");
                return (&e).into();
            }
        }
    }

    ExitCode::SUCCESS
}

fn print_backtest_summary(result: &BacktestResult) {
    let metrics = &result.metrics;

    eprintln!("\n=== Backtest Results ===");
    eprintln!("Total Return:     {:.2}%", metrics.total_return * 100.0);
    eprintln!("Benchmark:        {:.2}%", metrics.benchmark_return * 100.0);
    eprintln!("Excess Return:    {:.2}%", metrics.excess_return * 100.0);
    eprintln!("Win Rate:         {:.1}%", metrics.win_rate * 100.0);
    eprintln!("Max Drawdown:     -{:.1}%", metrics.max_drawdown * 100.0);
    eprintln!("Sharpe Ratio:     {:.2}", metrics.sharpe_ratio);
    eprintln!("Total Trades:     {}", result.trades.len());

    if !result.holding_periods.is_empty() {
        let total_days: usize = result.holding_periods.iter().map(|p| p.days).sum();
        let avg_days = total_days as f64 / result.holding_periods.len() as f64;
        eprintln!("Positions Held:   {}", result.holding_periods.len());
        eprintln!("Avg Holding:      {:.1} days", avg_days);
    }
}

fn run_score(config_path: &PathBuf, symbol: &str, date_str: Option<&str>) -> ExitCode {
    // Stage 1: Load config and validate weights
    eprintln!("Loading config from {}", config_path.display());
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };

    if let Err(e) = validate_weight_config(&adapter) {
        eprintln!("error: {e}");
        return (&e).into();
    }

    let data_port = match build_data_port(&adapter) {
        Ok(d) => d,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    // Stage 2: Fetch the full history and cut it at the evaluation date
    let symbol = symbol.trim().to_uppercase();
    let mut bars = match data_port.fetch_prices(&symbol, NaiveDate::MIN, NaiveDate::MAX) {
        Ok(b) => b,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    if let Some(raw) = date_str {
        let eval_date = match NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
            Ok(d) => d,
            Err(_) => {
                eprintln!("error: invalid --date {} (expected YYYY-MM-DD)", raw);
                return ExitCode::from(2);
            }
        };
        bars.retain(|bar| bar.date <= eval_date);
    }

    let eval_date = match bars.last() {
        Some(bar) => bar.date,
        None => {
            let err = StockrankError::NoData {
                symbol: symbol.clone(),
            };
            eprintln!("error: {err}");
            return (&err).into();
        }
    };

    if bars.len() < MIN_SNAPSHOT_BARS {
        eprintln!(
            "warning: {} has {} bars through {}; need {} for a full snapshot",
            symbol,
            bars.len(),
            eval_date,
            MIN_SNAPSHOT_BARS,
        );
    }

    // Stage 3: Build the scoring context from the config records
    let mut context = build_score_context(&adapter);
    let fundamentals = read_fundamentals(&adapter, &symbol);
    let flow = read_flow(&adapter, &symbol);

    if let Some(sector) = fundamentals.as_ref().and_then(|f| f.sector.as_deref()) {
        if let Some(averages) = read_sector_averages(&adapter, sector) {
            context.sectors.insert(sector.to_string(), averages);
        }
    }

    // Stage 4: Score and print
    let snapshot = calculate_snapshot(&bars);
    let scores = context.score(&snapshot, fundamentals.as_ref(), None, flow.as_ref(), eval_date);

    print_score_breakdown(&symbol, eval_date, &snapshot, &scores);
    ExitCode::SUCCESS
}

fn print_score_breakdown(
    symbol: &str,
    eval_date: NaiveDate,
    snapshot: &IndicatorSnapshot,
    scores: &StockScores,
) {
    println!("=== Score: {} @ {} ===", symbol, eval_date);
    println!("Total:        {:.1}", scores.total);
    println!();

    let f = &scores.fundamental;
    println!("Fundamental:  {:.1}", f.average);
    println!(
        "  per {:.0}  pbr {:.0}  roe {:.0}  op_margin {:.0}",
        f.per, f.pbr, f.roe, f.operating_margin,
    );
    println!(
        "  debt {:.0}  current {:.0}  eps_growth {:.0}  rev_growth {:.0}",
        f.debt_ratio, f.current_ratio, f.eps_growth, f.revenue_growth,
    );

    let t = &scores.technical;
    println!("Technical:    {:.1}", t.average);
    println!(
        "  ma {:.0}  rsi {:.0}  volume {:.0}  macd {:.0}",
        t.ma_alignment, t.rsi, t.volume_trend, t.macd,
    );
    println!(
        "  bollinger {:.0}  stochastic {:.0}  adx {:.0}  divergence {:.0}",
        t.bollinger, t.stochastic, t.adx, t.divergence,
    );

    let n = &scores.news;
    println!("News:         {:.1}", n.average);
    println!(
        "  sentiment {:.0}  frequency {:.0}  disclosure {:.0}  recency {:.0}",
        n.sentiment, n.frequency, n.disclosure, n.recency,
    );

    let fl = &scores.flow;
    println!("Flow:         {:.1}", fl.average);
    println!("  foreign {:.0}  institution {:.0}", fl.foreign, fl.institution);

    println!();
    println!("Indicators:");
    println!(
        "  close {}  ma5 {}  ma20 {}  ma60 {}  ma120 {}",
        fmt_opt(snapshot.close),
        fmt_opt(snapshot.ma5),
        fmt_opt(snapshot.ma20),
        fmt_opt(snapshot.ma60),
        fmt_opt(snapshot.ma120),
    );
    println!(
        "  rsi {}  macd {}  signal {}  histogram {}",
        fmt_opt(snapshot.rsi),
        fmt_opt(snapshot.macd_line),
        fmt_opt(snapshot.macd_signal),
        fmt_opt(snapshot.macd_histogram),
    );
    println!(
        "  %b {}  band_width {}  stoch_k {}  stoch_d {}  adx {}",
        fmt_opt(snapshot.percent_b),
        fmt_opt(snapshot.bollinger_width),
        fmt_opt(snapshot.stochastic_k),
        fmt_opt(snapshot.stochastic_d),
        fmt_opt(snapshot.adx),
    );
}

fn fmt_opt(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{:.2}", v),
        None => "-".to_string(),
    }
}

fn run_list_symbols(config_path: &PathBuf) -> ExitCode {
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };

    let data_port = match build_data_port(&adapter) {
        Ok(d) => d,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    let symbols = match data_port.list_symbols() {
        Ok(s) => s,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    if symbols.is_empty() {
        eprintln!("No symbol data found");
    } else {
        for symbol in &symbols {
            println!("{}", symbol);
        }
        eprintln!("{} symbols found", symbols.len());
    }
    ExitCode::SUCCESS
}

fn run_info(symbol: Option<&str>, config_path: &PathBuf) -> ExitCode {
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };

    let data_port = match build_data_port(&adapter) {
        Ok(d) => d,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    // --symbol narrows to one; otherwise the configured universe, falling
    // back to everything in the data directory.
    let symbols = match symbol {
        Some(s) => vec![s.trim().to_uppercase()],
        None => match adapter.get_string("backtest", "symbols") {
            Some(raw) => match parse_symbols(&raw) {
                Ok(s) => s,
                Err(e) => {
                    eprintln!("error: {e}");
                    return ExitCode::from(2);
                }
            },
            None => match data_port.list_symbols() {
                Ok(s) => s,
                Err(e) => {
                    eprintln!("error: {e}");
                    return (&e).into();
                }
            },
        },
    };

    for symbol in &symbols {
        match data_port.get_data_range(symbol) {
            Ok(Some((min_date, max_date, count))) => {
                println!("{}: {} bars, {} to {}", symbol, count, min_date, max_date);
            }
            Ok(None) => {
                eprintln!("{}: no data found", symbol);
            }
            Err(e) => {
                eprintln!("error querying {}: {}", symbol, e);
            }
        }
    }
    ExitCode::SUCCESS
}

fn run_validate(config_path: &PathBuf) -> ExitCode {
    eprintln!("Validating config: {}", config_path.display());
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };

    if let Err(e) = validate_backtest_config(&adapter) {
        eprintln!("error: {e}");
        return (&e).into();
    }
    if let Err(e) = validate_weight_config(&adapter) {
        eprintln!("error: {e}");
        return (&e).into();
    }

    let bt_config = build_backtest_config(&adapter);
    let weights = build_weight_config(&adapter);

    eprintln!("\nBacktest settings:");
    eprintln!("  initial_capital:  {}", bt_config.initial_capital);
    eprintln!("  eval_bars:        {}", bt_config.eval_bars);
    eprintln!("  rebalance_cycle:  {}", bt_config.rebalance_cycle);
    eprintln!("  top_n:            {}", bt_config.top_n);

    match adapter.get_string("backtest", "symbols") {
        Some(raw) => match parse_symbols(&raw) {
            Ok(symbols) => eprintln!("  symbols:          {}", symbols.join(", ")),
            Err(e) => {
                eprintln!("error: {e}");
                return ExitCode::from(2);
            }
        },
        None => eprintln!("  symbols:          (none; pass --symbols to backtest)"),
    }

    eprintln!("\nCategory weights:");
    eprintln!(
        "  fundamental {} / technical {} / news {} / flow {}",
        weights.category.fundamental,
        weights.category.technical,
        weights.category.news,
        weights.category.flow,
    );

    eprintln!("\nConfiguration is valid.");
    ExitCode::SUCCESS
}

pub fn build_data_port(adapter: &dyn ConfigPort) -> Result<CsvAdapter, StockrankError> {
    let dir = adapter
        .get_string("data", "dir")
        .ok_or_else(|| StockrankError::ConfigMissing {
            section: "data".into(),
            key: "dir".into(),
        })?;
    Ok(CsvAdapter::new(PathBuf::from(dir)))
}

pub fn build_backtest_config(adapter: &dyn ConfigPort) -> BacktestConfig {
    BacktestConfig {
        initial_capital: adapter.get_double("backtest", "initial_capital", 100_000.0),
        eval_bars: adapter.get_int("backtest", "eval_bars", 60) as usize,
        rebalance_cycle: adapter.get_int("backtest", "rebalance_cycle", 5) as usize,
        top_n: adapter.get_int("backtest", "top_n", 1) as usize,
    }
}

pub fn read_date_window(adapter: &dyn ConfigPort) -> Result<(NaiveDate, NaiveDate), StockrankError> {
    let start = parse_config_date(adapter, "start_date")?;
    let end = parse_config_date(adapter, "end_date")?;
    Ok((start, end))
}

fn parse_config_date(adapter: &dyn ConfigPort, key: &str) -> Result<NaiveDate, StockrankError> {
    let raw = adapter
        .get_string("backtest", key)
        .ok_or_else(|| StockrankError::ConfigMissing {
            section: "backtest".into(),
            key: key.into(),
        })?;
    NaiveDate::parse_from_str(&raw, "%Y-%m-%d").map_err(|_| StockrankError::ConfigInvalid {
        section: "backtest".into(),
        key: key.into(),
        reason: "invalid date format (expected YYYY-MM-DD)".into(),
    })
}

/// `--symbols` overrides the config list; with neither the backtest cannot run.
pub fn resolve_symbols(
    symbols_override: Option<&str>,
    config: &dyn ConfigPort,
) -> Result<Vec<String>, StockrankError> {
    let raw = match symbols_override {
        Some(s) => s.to_string(),
        None => config.get_string("backtest", "symbols").ok_or_else(|| {
            StockrankError::ConfigMissing {
                section: "backtest".into(),
                key: "symbols".into(),
            }
        })?,
    };

    parse_symbols(&raw).map_err(|e| StockrankError::ConfigInvalid {
        section: "backtest".into(),
        key: "symbols".into(),
        reason: e.to_string(),
    })
}

pub fn build_score_context(adapter: &dyn ConfigPort) -> ScoreContext {
    ScoreContext {
        weights: build_weight_config(adapter),
        ..ScoreContext::default()
    }
}

pub fn build_weight_config(adapter: &dyn ConfigPort) -> WeightConfig {
    let mut w = WeightConfig::default();

    w.category.fundamental =
        adapter.get_double("category_weights", "fundamental", w.category.fundamental);
    w.category.technical =
        adapter.get_double("category_weights", "technical", w.category.technical);
    w.category.news = adapter.get_double("category_weights", "news", w.category.news);
    w.category.flow = adapter.get_double("category_weights", "flow", w.category.flow);

    w.fundamental.per = adapter.get_double("fundamental_weights", "per", w.fundamental.per);
    w.fundamental.pbr = adapter.get_double("fundamental_weights", "pbr", w.fundamental.pbr);
    w.fundamental.roe = adapter.get_double("fundamental_weights", "roe", w.fundamental.roe);
    w.fundamental.operating_margin = adapter.get_double(
        "fundamental_weights",
        "operating_margin",
        w.fundamental.operating_margin,
    );
    w.fundamental.debt_ratio =
        adapter.get_double("fundamental_weights", "debt_ratio", w.fundamental.debt_ratio);
    w.fundamental.current_ratio = adapter.get_double(
        "fundamental_weights",
        "current_ratio",
        w.fundamental.current_ratio,
    );
    w.fundamental.eps_growth =
        adapter.get_double("fundamental_weights", "eps_growth", w.fundamental.eps_growth);
    w.fundamental.revenue_growth = adapter.get_double(
        "fundamental_weights",
        "revenue_growth",
        w.fundamental.revenue_growth,
    );

    w.technical.ma_alignment =
        adapter.get_double("technical_weights", "ma_alignment", w.technical.ma_alignment);
    w.technical.rsi = adapter.get_double("technical_weights", "rsi", w.technical.rsi);
    w.technical.volume_trend =
        adapter.get_double("technical_weights", "volume_trend", w.technical.volume_trend);
    w.technical.macd = adapter.get_double("technical_weights", "macd", w.technical.macd);
    w.technical.bollinger =
        adapter.get_double("technical_weights", "bollinger", w.technical.bollinger);
    w.technical.stochastic =
        adapter.get_double("technical_weights", "stochastic", w.technical.stochastic);
    w.technical.adx = adapter.get_double("technical_weights", "adx", w.technical.adx);
    w.technical.divergence =
        adapter.get_double("technical_weights", "divergence", w.technical.divergence);

    w.news.sentiment = adapter.get_double("news_weights", "sentiment", w.news.sentiment);
    w.news.frequency = adapter.get_double("news_weights", "frequency", w.news.frequency);
    w.news.disclosure = adapter.get_double("news_weights", "disclosure", w.news.disclosure);
    w.news.recency = adapter.get_double("news_weights", "recency", w.news.recency);

    w.flow.foreign = adapter.get_double("flow_weights", "foreign", w.flow.foreign);
    w.flow.institution = adapter.get_double("flow_weights", "institution", w.flow.institution);

    w
}

/// Per-symbol fundamentals from the `[fundamentals]` section, keyed
/// `SYMBOL.metric`. None when the section carries nothing for the symbol.
pub fn read_fundamentals(config: &dyn ConfigPort, symbol: &str) -> Option<FundamentalData> {
    let metric = |name: &str| parse_opt_double(config, "fundamentals", &key_for(symbol, name));

    let data = FundamentalData {
        per: metric("per"),
        pbr: metric("pbr"),
        roe: metric("roe"),
        operating_margin: metric("operating_margin"),
        debt_ratio: metric("debt_ratio"),
        current_ratio: metric("current_ratio"),
        eps_growth: metric("eps_growth"),
        revenue_growth: metric("revenue_growth"),
        sector: config.get_string("fundamentals", &key_for(symbol, "sector")),
    };

    let has_any = data.per.is_some()
        || data.pbr.is_some()
        || data.roe.is_some()
        || data.operating_margin.is_some()
        || data.debt_ratio.is_some()
        || data.current_ratio.is_some()
        || data.eps_growth.is_some()
        || data.revenue_growth.is_some()
        || data.sector.is_some();

    has_any.then_some(data)
}

/// Per-symbol supply/demand record from the `[flow]` section.
pub fn read_flow(config: &dyn ConfigPort, symbol: &str) -> Option<SupplyDemandData> {
    const FLOW_KEYS: [&str; 5] = [
        "foreign_net_buy",
        "institution_net_buy",
        "foreign_streak",
        "institution_streak",
        "foreign_ownership_pct",
    ];

    let has_record = FLOW_KEYS
        .iter()
        .any(|name| config.get_string("flow", &key_for(symbol, name)).is_some());
    if !has_record {
        return None;
    }

    Some(SupplyDemandData {
        foreign_net_buy: config.get_double("flow", &key_for(symbol, "foreign_net_buy"), 0.0),
        institution_net_buy: config.get_double(
            "flow",
            &key_for(symbol, "institution_net_buy"),
            0.0,
        ),
        foreign_streak: config.get_int("flow", &key_for(symbol, "foreign_streak"), 0) as i32,
        institution_streak: config.get_int("flow", &key_for(symbol, "institution_streak"), 0)
            as i32,
        foreign_ownership_pct: parse_opt_double(
            config,
            "flow",
            &key_for(symbol, "foreign_ownership_pct"),
        ),
    })
}

/// Sector averages from the `[sector]` section, keyed `sector.metric`.
/// Metrics absent from the section fall back to the market-wide defaults.
pub fn read_sector_averages(config: &dyn ConfigPort, sector: &str) -> Option<SectorAverages> {
    let has_record = ["per", "pbr", "operating_margin"]
        .iter()
        .any(|name| config.get_string("sector", &key_for(sector, name)).is_some());
    if !has_record {
        return None;
    }

    let defaults = SectorAverages::default();
    Some(SectorAverages {
        per: config.get_double("sector", &key_for(sector, "per"), defaults.per),
        pbr: config.get_double("sector", &key_for(sector, "pbr"), defaults.pbr),
        operating_margin: config.get_double(
            "sector",
            &key_for(sector, "operating_margin"),
            defaults.operating_margin,
        ),
    })
}

fn key_for(prefix: &str, name: &str) -> String {
    format!("{}.{}", prefix, name)
}

fn parse_opt_double(config: &dyn ConfigPort, section: &str, key: &str) -> Option<f64> {
    config
        .get_string(section, key)
        .and_then(|s| s.trim().parse::<f64>().ok())
}
