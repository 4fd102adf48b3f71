//! News and disclosure scorers.
//!
//! The evaluation date is always passed in explicitly; nothing here reads a
//! clock, so every score is reproducible.

use crate::domain::score::{clamp_score, round1, weighted_average, NewsScores, NewsWeights};
use chrono::NaiveDate;

#[derive(Debug, Clone)]
pub struct NewsItem {
    pub date: NaiveDate,
    pub kind: String,
}

#[derive(Debug, Clone, Default)]
pub struct NewsData {
    pub sentiment: Option<f64>,
    pub items: Vec<NewsItem>,
    pub window_days: u32,
}

/// Keyword -> impact lookup for disclosure types. Entries are matched by
/// substring against the item kind, first match wins (insertion order), so
/// the table is a deterministic Vec rather than a HashMap.
#[derive(Debug, Clone)]
pub struct DisclosureImpactTable {
    impacts: Vec<(String, f64)>,
}

impl DisclosureImpactTable {
    pub fn new(impacts: Vec<(String, f64)>) -> Self {
        let impacts = impacts
            .into_iter()
            .map(|(keyword, impact)| (keyword.to_lowercase(), impact))
            .collect();
        Self { impacts }
    }

    pub fn insert(&mut self, keyword: String, impact: f64) {
        let keyword = keyword.to_lowercase();
        if let Some(entry) = self.impacts.iter_mut().find(|(k, _)| *k == keyword) {
            entry.1 = impact;
        } else {
            self.impacts.push((keyword, impact));
        }
    }

    /// Impact for a disclosure kind, neutral 5 when no keyword matches.
    pub fn impact(&self, kind: &str) -> f64 {
        let kind = kind.to_lowercase();
        for (keyword, impact) in &self.impacts {
            if kind.contains(keyword.as_str()) {
                return *impact;
            }
        }
        5.0
    }
}

impl Default for DisclosureImpactTable {
    fn default() -> Self {
        Self::new(vec![
            ("buyback".to_string(), 9.0),
            ("dividend".to_string(), 8.0),
            ("contract".to_string(), 8.0),
            ("patent".to_string(), 8.0),
            ("delisting".to_string(), 1.0),
            ("lawsuit".to_string(), 2.0),
            ("offering".to_string(), 3.0),
            ("impairment".to_string(), 3.0),
        ])
    }
}

pub fn compute_news_scores(
    news: Option<&NewsData>,
    eval_date: NaiveDate,
    impacts: &DisclosureImpactTable,
    weights: &NewsWeights,
) -> NewsScores {
    let empty = NewsData::default();
    let data = news.unwrap_or(&empty);

    let sentiment = sentiment_score(data.sentiment);
    let frequency = frequency_score(data.items.len(), data.window_days);
    let disclosure = disclosure_score(&data.items, eval_date, impacts);
    let recency = recency_score(&data.items, eval_date);

    let average = round1(weighted_average(&[
        (sentiment, weights.sentiment),
        (frequency, weights.frequency),
        (disclosure, weights.disclosure),
        (recency, weights.recency),
    ]));

    NewsScores {
        sentiment,
        frequency,
        disclosure,
        recency,
        average,
    }
}

/// Sentiment on either a [0,1] or a (1,10] scale; [0,1] is rescaled to 1..=10.
pub fn sentiment_score(sentiment: Option<f64>) -> f64 {
    let value = match sentiment {
        Some(v) => v,
        None => return 5.0,
    };

    let scaled = if value <= 1.0 { 1.0 + 9.0 * value } else { value };
    clamp_score(scaled.round())
}

/// Daily-average news count banding with a sweet spot around 0.5-2 items/day.
/// Too quiet means no interest, too noisy usually means trouble.
pub fn frequency_score(count: usize, window_days: u32) -> f64 {
    if window_days == 0 {
        return 5.0;
    }

    let per_day = count as f64 / window_days as f64;
    if per_day == 0.0 {
        5.0
    } else if per_day < 0.5 {
        6.0
    } else if per_day <= 2.0 {
        8.0
    } else if per_day <= 4.0 {
        6.0
    } else if per_day <= 8.0 {
        4.0
    } else {
        2.0
    }
}

/// Recency-weighted average of per-item disclosure impacts. Items dated
/// after `eval_date` are ignored.
pub fn disclosure_score(
    items: &[NewsItem],
    eval_date: NaiveDate,
    impacts: &DisclosureImpactTable,
) -> f64 {
    if items.is_empty() {
        return 5.0;
    }

    let mut weighted_sum = 0.0;
    let mut weight_total = 0.0;
    for item in items {
        let age_days = (eval_date - item.date).num_days();
        if age_days < 0 {
            continue;
        }

        let weight = if age_days <= 3 {
            1.0
        } else if age_days <= 7 {
            0.7
        } else if age_days <= 30 {
            0.4
        } else {
            0.2
        };

        weighted_sum += impacts.impact(&item.kind) * weight;
        weight_total += weight;
    }

    if weight_total == 0.0 {
        return 5.0;
    }
    clamp_score((weighted_sum / weight_total).round())
}

/// How fresh the news flow is: counts items in the 3-day and 7-day windows
/// ending at `eval_date`.
pub fn recency_score(items: &[NewsItem], eval_date: NaiveDate) -> f64 {
    if items.is_empty() {
        return 5.0;
    }

    let mut within_3 = 0;
    let mut within_7 = 0;
    for item in items {
        let age_days = (eval_date - item.date).num_days();
        if age_days < 0 {
            continue;
        }
        if age_days <= 3 {
            within_3 += 1;
        }
        if age_days <= 7 {
            within_7 += 1;
        }
    }

    if within_3 >= 3 {
        10.0
    } else if within_3 >= 2 {
        9.0
    } else if within_3 >= 1 {
        8.0
    } else if within_7 >= 2 {
        7.0
    } else if within_7 >= 1 {
        6.0
    } else {
        3.0
    }
}
