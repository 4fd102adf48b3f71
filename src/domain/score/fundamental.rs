//! Fundamental scorers: valuation, profitability, solvency, and growth.
//!
//! Every scorer is a pure, total function from a nullable raw metric to a
//! whole-number score 1..=10. Missing profitability/growth metrics default
//! to a neutral 5; missing or non-positive valuation ratios score 1, since
//! an undefined PER/PBR usually marks a loss-making or data-poor stock.

use crate::domain::score::{round1, weighted_average, FundamentalScores, FundamentalWeights};
use crate::domain::sector::SectorTable;

#[derive(Debug, Clone, Default)]
pub struct FundamentalData {
    pub per: Option<f64>,
    pub pbr: Option<f64>,
    pub roe: Option<f64>,
    pub operating_margin: Option<f64>,
    pub debt_ratio: Option<f64>,
    pub current_ratio: Option<f64>,
    pub eps_growth: Option<f64>,
    pub revenue_growth: Option<f64>,
    pub sector: Option<String>,
}

pub fn compute_fundamental_scores(
    fundamentals: Option<&FundamentalData>,
    sectors: &SectorTable,
    weights: &FundamentalWeights,
) -> FundamentalScores {
    let empty = FundamentalData::default();
    let data = fundamentals.unwrap_or(&empty);
    let sector_avg = sectors.lookup(data.sector.as_deref());

    let per = per_score(data.per, sector_avg.per);
    let pbr = pbr_score(data.pbr, sector_avg.pbr);
    let roe = roe_score(data.roe);
    let operating_margin = operating_margin_score(data.operating_margin, sector_avg.operating_margin);
    let debt_ratio = debt_ratio_score(data.debt_ratio);
    let current_ratio = current_ratio_score(data.current_ratio);
    let eps_growth = eps_growth_score(data.eps_growth);
    let revenue_growth = revenue_growth_score(data.revenue_growth);

    let average = round1(weighted_average(&[
        (per, weights.per),
        (pbr, weights.pbr),
        (roe, weights.roe),
        (operating_margin, weights.operating_margin),
        (debt_ratio, weights.debt_ratio),
        (current_ratio, weights.current_ratio),
        (eps_growth, weights.eps_growth),
        (revenue_growth, weights.revenue_growth),
    ]));

    FundamentalScores {
        per,
        pbr,
        roe,
        operating_margin,
        debt_ratio,
        current_ratio,
        eps_growth,
        revenue_growth,
        average,
    }
}

/// PER relative to the sector average; lower ratio scores higher.
pub fn per_score(per: Option<f64>, sector_average: f64) -> f64 {
    valuation_ratio_score(per, sector_average)
}

/// PBR relative to the sector average; lower ratio scores higher.
pub fn pbr_score(pbr: Option<f64>, sector_average: f64) -> f64 {
    valuation_ratio_score(pbr, sector_average)
}

fn valuation_ratio_score(value: Option<f64>, sector_average: f64) -> f64 {
    let value = match value {
        Some(v) if v > 0.0 => v,
        _ => return 1.0,
    };
    if sector_average <= 0.0 {
        return 1.0;
    }

    let ratio = value / sector_average;
    if ratio <= 0.4 {
        10.0
    } else if ratio <= 0.6 {
        9.0
    } else if ratio <= 0.8 {
        8.0
    } else if ratio <= 0.9 {
        7.0
    } else if ratio <= 1.0 {
        6.0
    } else if ratio <= 1.1 {
        5.0
    } else if ratio <= 1.3 {
        4.0
    } else if ratio <= 1.5 {
        3.0
    } else if ratio <= 2.0 {
        2.0
    } else {
        1.0
    }
}

/// ROE in percent, absolute banding.
pub fn roe_score(roe: Option<f64>) -> f64 {
    let roe = match roe {
        Some(v) => v,
        None => return 5.0,
    };
    if roe < 0.0 {
        return 1.0;
    }

    if roe >= 20.0 {
        10.0
    } else if roe >= 15.0 {
        9.0
    } else if roe >= 12.0 {
        8.0
    } else if roe >= 10.0 {
        7.0
    } else if roe >= 8.0 {
        6.0
    } else if roe >= 6.0 {
        5.0
    } else if roe >= 4.0 {
        4.0
    } else if roe >= 2.0 {
        3.0
    } else {
        2.0
    }
}

/// Operating margin relative to the sector average margin.
pub fn operating_margin_score(margin: Option<f64>, sector_average: f64) -> f64 {
    let margin = match margin {
        Some(v) => v,
        None => return 5.0,
    };
    if margin < 0.0 {
        return 1.0;
    }
    if sector_average <= 0.0 {
        return 5.0;
    }

    let ratio = margin / sector_average;
    if ratio >= 2.0 {
        10.0
    } else if ratio >= 1.5 {
        9.0
    } else if ratio >= 1.2 {
        8.0
    } else if ratio >= 1.0 {
        7.0
    } else if ratio >= 0.8 {
        6.0
    } else if ratio >= 0.6 {
        5.0
    } else if ratio >= 0.4 {
        4.0
    } else if ratio >= 0.2 {
        3.0
    } else {
        2.0
    }
}

/// Debt ratio in percent; lower is better.
pub fn debt_ratio_score(debt_ratio: Option<f64>) -> f64 {
    let debt_ratio = match debt_ratio {
        Some(v) => v,
        None => return 5.0,
    };
    if debt_ratio < 0.0 {
        return 1.0;
    }

    if debt_ratio < 30.0 {
        10.0
    } else if debt_ratio < 50.0 {
        9.0
    } else if debt_ratio < 70.0 {
        8.0
    } else if debt_ratio < 100.0 {
        7.0
    } else if debt_ratio < 130.0 {
        6.0
    } else if debt_ratio < 160.0 {
        5.0
    } else if debt_ratio < 200.0 {
        4.0
    } else if debt_ratio < 250.0 {
        3.0
    } else if debt_ratio < 300.0 {
        2.0
    } else {
        1.0
    }
}

/// Current ratio in percent. NOT monotonic: excessive liquidity (cash piling
/// up uninvested) is penalized, so the band peaks around 200.
pub fn current_ratio_score(current_ratio: Option<f64>) -> f64 {
    let current_ratio = match current_ratio {
        Some(v) => v,
        None => return 5.0,
    };
    if current_ratio < 0.0 {
        return 1.0;
    }

    if current_ratio < 50.0 {
        1.0
    } else if current_ratio < 80.0 {
        3.0
    } else if current_ratio < 100.0 {
        5.0
    } else if current_ratio < 130.0 {
        7.0
    } else if current_ratio < 150.0 {
        8.0
    } else if current_ratio < 250.0 {
        10.0
    } else if current_ratio < 300.0 {
        8.0
    } else if current_ratio < 400.0 {
        6.0
    } else {
        4.0
    }
}

/// EPS growth in percent, monotonic banding.
pub fn eps_growth_score(eps_growth: Option<f64>) -> f64 {
    let growth = match eps_growth {
        Some(v) => v,
        None => return 5.0,
    };

    if growth >= 50.0 {
        10.0
    } else if growth >= 30.0 {
        9.0
    } else if growth >= 20.0 {
        8.0
    } else if growth >= 10.0 {
        7.0
    } else if growth >= 5.0 {
        6.0
    } else if growth >= 0.0 {
        5.0
    } else if growth >= -5.0 {
        4.0
    } else if growth >= -15.0 {
        3.0
    } else if growth >= -30.0 {
        2.0
    } else {
        1.0
    }
}

/// Revenue growth in percent, monotonic banding.
pub fn revenue_growth_score(revenue_growth: Option<f64>) -> f64 {
    let growth = match revenue_growth {
        Some(v) => v,
        None => return 5.0,
    };

    if growth >= 30.0 {
        10.0
    } else if growth >= 20.0 {
        9.0
    } else if growth >= 15.0 {
        8.0
    } else if growth >= 10.0 {
        7.0
    } else if growth >= 5.0 {
        6.0
    } else if growth >= 0.0 {
        5.0
    } else if growth >= -5.0 {
        4.0
    } else if growth >= -10.0 {
        3.0
    } else if growth >= -20.0 {
        2.0
    } else {
        1.0
    }
}
