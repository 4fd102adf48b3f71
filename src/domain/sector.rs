//! Sector-average lookup for relative valuation scoring.
//!
//! PER/PBR and operating-margin scores compare a stock against its sector
//! average. The table is caller-owned and injectable; unknown (or missing)
//! sectors fall back to a market-wide default bucket.

use std::collections::HashMap;

#[derive(Debug, Clone, Copy)]
pub struct SectorAverages {
    pub per: f64,
    pub pbr: f64,
    pub operating_margin: f64,
}

impl Default for SectorAverages {
    fn default() -> Self {
        Self {
            per: 12.0,
            pbr: 1.2,
            operating_margin: 8.0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SectorTable {
    averages: HashMap<String, SectorAverages>,
    default_bucket: SectorAverages,
}

impl SectorTable {
    pub fn new(averages: HashMap<String, SectorAverages>, default_bucket: SectorAverages) -> Self {
        let averages = averages
            .into_iter()
            .map(|(name, avg)| (name.to_lowercase(), avg))
            .collect();
        Self {
            averages,
            default_bucket,
        }
    }

    /// Sector names are matched case-insensitively (config files and data
    /// feeds disagree on casing).
    pub fn insert(&mut self, sector: String, averages: SectorAverages) {
        self.averages.insert(sector.to_lowercase(), averages);
    }

    pub fn lookup(&self, sector: Option<&str>) -> SectorAverages {
        sector
            .and_then(|name| self.averages.get(&name.to_lowercase()))
            .copied()
            .unwrap_or(self.default_bucket)
    }
}

impl Default for SectorTable {
    fn default() -> Self {
        let mut averages = HashMap::new();
        averages.insert(
            "technology".to_string(),
            SectorAverages {
                per: 20.0,
                pbr: 2.5,
                operating_margin: 12.0,
            },
        );
        averages.insert(
            "financials".to_string(),
            SectorAverages {
                per: 8.0,
                pbr: 0.8,
                operating_margin: 20.0,
            },
        );
        averages.insert(
            "healthcare".to_string(),
            SectorAverages {
                per: 25.0,
                pbr: 3.0,
                operating_margin: 10.0,
            },
        );
        averages.insert(
            "industrials".to_string(),
            SectorAverages {
                per: 12.0,
                pbr: 1.3,
                operating_margin: 7.0,
            },
        );
        averages.insert(
            "consumer".to_string(),
            SectorAverages {
                per: 15.0,
                pbr: 1.8,
                operating_margin: 6.0,
            },
        );
        averages.insert(
            "energy".to_string(),
            SectorAverages {
                per: 9.0,
                pbr: 1.0,
                operating_margin: 9.0,
            },
        );
        averages.insert(
            "materials".to_string(),
            SectorAverages {
                per: 10.0,
                pbr: 1.1,
                operating_margin: 8.0,
            },
        );
        averages.insert(
            "utilities".to_string(),
            SectorAverages {
                per: 11.0,
                pbr: 0.9,
                operating_margin: 10.0,
            },
        );

        Self {
            averages,
            default_bucket: SectorAverages::default(),
        }
    }
}
