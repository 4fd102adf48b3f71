//! Multi-factor scoring: weights, aggregation, and the per-stock score bundle.
//!
//! Sub-scores are whole numbers 1..=10 carried as `f64`; category and total
//! averages are weighted means rounded to one decimal. Weights are
//! caller-supplied and need not sum to anything: `weighted_average` divides
//! by the sum of the weights actually used, and a zero weight excludes its
//! sub-score entirely. A total weight of 0 yields 0.0, a documented
//! degenerate case rather than an error.

pub mod flow;
pub mod fundamental;
pub mod news;
pub mod technical;

pub use flow::SupplyDemandData;
pub use fundamental::FundamentalData;
pub use news::{DisclosureImpactTable, NewsData, NewsItem};

use crate::domain::indicator::{calculate_snapshot_unchecked, IndicatorSnapshot};
use crate::domain::price::PriceBar;
use crate::domain::sector::SectorTable;
use chrono::NaiveDate;

#[derive(Debug, Clone)]
pub struct CategoryWeights {
    pub fundamental: f64,
    pub technical: f64,
    pub news: f64,
    pub flow: f64,
}

impl Default for CategoryWeights {
    fn default() -> Self {
        Self {
            fundamental: 30.0,
            technical: 30.0,
            news: 20.0,
            flow: 20.0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct FundamentalWeights {
    pub per: f64,
    pub pbr: f64,
    pub roe: f64,
    pub operating_margin: f64,
    pub debt_ratio: f64,
    pub current_ratio: f64,
    pub eps_growth: f64,
    pub revenue_growth: f64,
}

impl Default for FundamentalWeights {
    fn default() -> Self {
        Self {
            per: 1.0,
            pbr: 1.0,
            roe: 1.0,
            operating_margin: 1.0,
            debt_ratio: 1.0,
            current_ratio: 1.0,
            eps_growth: 1.0,
            revenue_growth: 1.0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct TechnicalWeights {
    pub ma_alignment: f64,
    pub rsi: f64,
    pub volume_trend: f64,
    pub macd: f64,
    pub bollinger: f64,
    pub stochastic: f64,
    pub adx: f64,
    pub divergence: f64,
}

impl Default for TechnicalWeights {
    fn default() -> Self {
        Self {
            ma_alignment: 1.0,
            rsi: 1.0,
            volume_trend: 1.0,
            macd: 1.0,
            bollinger: 1.0,
            stochastic: 1.0,
            adx: 1.0,
            divergence: 1.0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct NewsWeights {
    pub sentiment: f64,
    pub frequency: f64,
    pub disclosure: f64,
    pub recency: f64,
}

impl Default for NewsWeights {
    fn default() -> Self {
        Self {
            sentiment: 1.0,
            frequency: 1.0,
            disclosure: 1.0,
            recency: 1.0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct FlowWeights {
    pub foreign: f64,
    pub institution: f64,
}

impl Default for FlowWeights {
    fn default() -> Self {
        Self {
            foreign: 1.0,
            institution: 1.0,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct WeightConfig {
    pub category: CategoryWeights,
    pub fundamental: FundamentalWeights,
    pub technical: TechnicalWeights,
    pub news: NewsWeights,
    pub flow: FlowWeights,
}

#[derive(Debug, Clone)]
pub struct FundamentalScores {
    pub per: f64,
    pub pbr: f64,
    pub roe: f64,
    pub operating_margin: f64,
    pub debt_ratio: f64,
    pub current_ratio: f64,
    pub eps_growth: f64,
    pub revenue_growth: f64,
    pub average: f64,
}

#[derive(Debug, Clone)]
pub struct TechnicalScores {
    pub ma_alignment: f64,
    pub rsi: f64,
    pub volume_trend: f64,
    pub macd: f64,
    pub bollinger: f64,
    pub stochastic: f64,
    pub adx: f64,
    pub divergence: f64,
    pub average: f64,
}

#[derive(Debug, Clone)]
pub struct NewsScores {
    pub sentiment: f64,
    pub frequency: f64,
    pub disclosure: f64,
    pub recency: f64,
    pub average: f64,
}

#[derive(Debug, Clone)]
pub struct FlowScores {
    pub foreign: f64,
    pub institution: f64,
    pub average: f64,
}

#[derive(Debug, Clone)]
pub struct StockScores {
    pub total: f64,
    pub fundamental: FundamentalScores,
    pub technical: TechnicalScores,
    pub news: NewsScores,
    pub flow: FlowScores,
}

/// Weighted mean of (score, weight) pairs. Pairs with weight 0 are excluded;
/// a total weight of 0 yields 0.0.
pub fn weighted_average(pairs: &[(f64, f64)]) -> f64 {
    let mut weighted_sum = 0.0;
    let mut weight_total = 0.0;
    for &(score, weight) in pairs {
        if weight > 0.0 {
            weighted_sum += score * weight;
            weight_total += weight;
        }
    }

    if weight_total == 0.0 {
        return 0.0;
    }
    weighted_sum / weight_total
}

pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

pub(crate) fn clamp_score(value: f64) -> f64 {
    value.clamp(1.0, 10.0)
}

/// Caller-owned scoring state: sector averages, disclosure impact table, and
/// the weight configuration. Injectable so tests and alternate markets can
/// swap the lookup tables without touching the scorers.
#[derive(Debug, Clone, Default)]
pub struct ScoreContext {
    pub sectors: SectorTable,
    pub disclosure_impacts: DisclosureImpactTable,
    pub weights: WeightConfig,
}

impl ScoreContext {
    /// Full four-category score for one stock at `eval_date`. Missing records
    /// degrade to the per-metric defaults, never error.
    pub fn score(
        &self,
        snapshot: &IndicatorSnapshot,
        fundamentals: Option<&FundamentalData>,
        news: Option<&NewsData>,
        flow: Option<&SupplyDemandData>,
        eval_date: NaiveDate,
    ) -> StockScores {
        let fundamental = fundamental::compute_fundamental_scores(
            fundamentals,
            &self.sectors,
            &self.weights.fundamental,
        );
        let technical = technical::compute_technical_scores(snapshot, &self.weights.technical);
        let news = news::compute_news_scores(
            news,
            eval_date,
            &self.disclosure_impacts,
            &self.weights.news,
        );
        let flow = flow::compute_flow_scores(flow, &self.weights.flow);

        let total = round1(weighted_average(&[
            (fundamental.average, self.weights.category.fundamental),
            (technical.average, self.weights.category.technical),
            (news.average, self.weights.category.news),
            (flow.average, self.weights.category.flow),
        ]));

        StockScores {
            total,
            fundamental,
            technical,
            news,
            flow,
        }
    }

    /// Ranking score for the simulator: weighted mean over the technical
    /// sub-scores, plus the flow scores under their own weights when supply/
    /// demand data is present. Unrounded so close candidates stay ordered.
    pub fn technical_composite(&self, bars: &[PriceBar], flow: Option<&SupplyDemandData>) -> f64 {
        let snapshot = calculate_snapshot_unchecked(bars);
        let technical = technical::compute_technical_scores(&snapshot, &self.weights.technical);

        let w = &self.weights.technical;
        let mut pairs = vec![
            (technical.ma_alignment, w.ma_alignment),
            (technical.rsi, w.rsi),
            (technical.volume_trend, w.volume_trend),
            (technical.macd, w.macd),
            (technical.bollinger, w.bollinger),
            (technical.stochastic, w.stochastic),
            (technical.adx, w.adx),
            (technical.divergence, w.divergence),
        ];

        if let Some(flow_data) = flow {
            pairs.push((
                flow::foreign_flow_score(flow_data),
                self.weights.flow.foreign,
            ));
            pairs.push((
                flow::institution_flow_score(flow_data),
                self.weights.flow.institution,
            ));
        }

        weighted_average(&pairs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use proptest::prelude::*;

    #[test]
    fn weighted_average_basic() {
        let avg = weighted_average(&[(10.0, 1.0), (5.0, 1.0)]);
        assert!((avg - 7.5).abs() < f64::EPSILON);
    }

    #[test]
    fn weighted_average_respects_weights() {
        let avg = weighted_average(&[(10.0, 3.0), (5.0, 1.0)]);
        assert!((avg - 8.75).abs() < f64::EPSILON);
    }

    #[test]
    fn weighted_average_zero_weight_excludes_pair() {
        let avg = weighted_average(&[(10.0, 0.0), (5.0, 2.0)]);
        assert!((avg - 5.0).abs() < f64::EPSILON);
    }

    #[test]
    fn weighted_average_total_weight_zero_is_zero() {
        let avg = weighted_average(&[(10.0, 0.0), (5.0, 0.0)]);
        assert!((avg - 0.0).abs() < f64::EPSILON);

        let avg = weighted_average(&[]);
        assert!((avg - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn weighted_average_all_fives_is_five() {
        let avg = weighted_average(&[(5.0, 2.0), (5.0, 7.0), (5.0, 0.5)]);
        assert!((avg - 5.0).abs() < f64::EPSILON);
    }

    #[test]
    fn round1_rounds_to_one_decimal() {
        assert!((round1(7.25) - 7.3).abs() < f64::EPSILON);
        assert!((round1(7.24) - 7.2).abs() < f64::EPSILON);
        assert!((round1(5.0) - 5.0).abs() < f64::EPSILON);
    }

    #[test]
    fn score_context_neutral_inputs_total_five() {
        // No fundamentals is NOT neutral (missing PER/PBR score 1), so feed
        // nothing but neutral-scoring categories by zeroing the others.
        let mut context = ScoreContext::default();
        context.weights.category.fundamental = 0.0;

        let snapshot = IndicatorSnapshot::default();
        let scores = context.score(
            &snapshot,
            None,
            None,
            None,
            NaiveDate::from_ymd_opt(2024, 6, 3).unwrap(),
        );

        assert!((scores.technical.average - 5.0).abs() < f64::EPSILON);
        assert!((scores.news.average - 5.0).abs() < f64::EPSILON);
        assert!((scores.flow.average - 5.0).abs() < f64::EPSILON);
        assert!((scores.total - 5.0).abs() < f64::EPSILON);
    }

    #[test]
    fn score_context_zero_category_weights_total_zero() {
        let mut context = ScoreContext::default();
        context.weights.category = CategoryWeights {
            fundamental: 0.0,
            technical: 0.0,
            news: 0.0,
            flow: 0.0,
        };

        let snapshot = IndicatorSnapshot::default();
        let scores = context.score(
            &snapshot,
            None,
            None,
            None,
            NaiveDate::from_ymd_opt(2024, 6, 3).unwrap(),
        );

        assert!((scores.total - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn technical_composite_neutral_without_history() {
        // An empty history produces an all-None snapshot: every technical
        // sub-score defaults to 5, so the composite is exactly 5.
        let context = ScoreContext::default();
        let composite = context.technical_composite(&[], None);
        assert!((composite - 5.0).abs() < f64::EPSILON);
    }

    #[test]
    fn technical_composite_includes_flow_when_present() {
        let context = ScoreContext::default();

        let strong_flow = SupplyDemandData {
            foreign_net_buy: 600_000.0,
            institution_net_buy: 600_000.0,
            foreign_streak: 8,
            institution_streak: 8,
            foreign_ownership_pct: Some(35.0),
        };

        let without = context.technical_composite(&[], None);
        let with = context.technical_composite(&[], Some(&strong_flow));
        assert!(with > without);
    }

    proptest! {
        #[test]
        fn weighted_average_within_score_bounds(
            scores in proptest::collection::vec((1.0f64..=10.0, 0.0f64..=100.0), 1..20)
        ) {
            let avg = weighted_average(&scores);
            let total_weight: f64 = scores.iter().map(|&(_, w)| w).sum();
            if total_weight > 0.0 {
                prop_assert!(avg >= 1.0 - 1e-9);
                prop_assert!(avg <= 10.0 + 1e-9);
            } else {
                prop_assert!((avg - 0.0).abs() < f64::EPSILON);
            }
        }
    }
}
