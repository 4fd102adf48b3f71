//! Supply and demand scorers over foreign and institutional net flows.

use crate::domain::score::{clamp_score, round1, weighted_average, FlowScores, FlowWeights};

/// Net buy/sell activity for the two tracked investor groups. Net-buy values
/// are share counts (positive = accumulation), streaks are consecutive
/// net-buy days (negative = consecutive net-sell days).
#[derive(Debug, Clone, Default)]
pub struct SupplyDemandData {
    pub foreign_net_buy: f64,
    pub institution_net_buy: f64,
    pub foreign_streak: i32,
    pub institution_streak: i32,
    pub foreign_ownership_pct: Option<f64>,
}

pub fn compute_flow_scores(flow: Option<&SupplyDemandData>, weights: &FlowWeights) -> FlowScores {
    let (foreign, institution) = match flow {
        Some(data) => (foreign_flow_score(data), institution_flow_score(data)),
        None => (5.0, 5.0),
    };

    let average = round1(weighted_average(&[
        (foreign, weights.foreign),
        (institution, weights.institution),
    ]));

    FlowScores {
        foreign,
        institution,
        average,
    }
}

/// Foreign flow: neutral 5 adjusted by net-buy magnitude and streak length,
/// plus a small bonus when ownership is at an extreme (>= 30% or < 5%) and
/// foreigners are still buying.
pub fn foreign_flow_score(flow: &SupplyDemandData) -> f64 {
    let mut score = 5.0;
    score += magnitude_adjustment(flow.foreign_net_buy);
    score += streak_adjustment(flow.foreign_streak);

    if let Some(ownership) = flow.foreign_ownership_pct {
        if (ownership >= 30.0 || ownership < 5.0) && flow.foreign_net_buy > 0.0 {
            score += 0.5;
        }
    }

    clamp_score(score.round())
}

/// Institution flow: same magnitude and streak bands, no ownership bonus.
pub fn institution_flow_score(flow: &SupplyDemandData) -> f64 {
    let score =
        5.0 + magnitude_adjustment(flow.institution_net_buy) + streak_adjustment(flow.institution_streak);
    clamp_score(score.round())
}

fn magnitude_adjustment(net_buy: f64) -> f64 {
    if net_buy >= 500_000.0 {
        2.0
    } else if net_buy >= 100_000.0 {
        1.0
    } else if net_buy >= 10_000.0 {
        0.5
    } else if net_buy <= -500_000.0 {
        -2.0
    } else if net_buy <= -100_000.0 {
        -1.0
    } else if net_buy <= -10_000.0 {
        -0.5
    } else {
        0.0
    }
}

fn streak_adjustment(streak: i32) -> f64 {
    if streak >= 7 {
        2.0
    } else if streak >= 3 {
        1.0
    } else if streak <= -7 {
        -2.0
    } else if streak <= -3 {
        -1.0
    } else {
        0.0
    }
}
