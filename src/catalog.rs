//! The fixed catalog of engagement criteria.
//!
//! Every quote is scored against the same ten weighted criteria. The catalog
//! is compile-time data shared by the engine, the TUI and the CLI output;
//! nothing mutates it after process start.

/// One scored dimension of a valuation engagement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Criterion {
    /// Stable identifier, used as the key in rating sets and saved state.
    pub key: &'static str,
    /// Human-readable name shown in the table and CLI output.
    pub label: &'static str,
    /// Relative importance. The catalog's weights sum to exactly 100.
    pub weight: f64,
    /// Descriptions for ratings 1 through 5, in order.
    pub levels: [&'static str; 5],
}

impl Criterion {
    /// Level description for a rating in [1,5].
    pub fn level_for(&self, rating: u8) -> &'static str {
        let idx = (rating.clamp(crate::scoring::MIN_RATING, crate::scoring::MAX_RATING) - 1) as usize;
        self.levels[idx]
    }
}

/// Expected sum of all catalog weights. The fee formula's anchor points are
/// derived from this, so the engine rejects catalogs that violate it.
pub const WEIGHT_TOTAL: f64 = 100.0;

static CATALOG: [Criterion; 10] = [
    Criterion {
        key: "sector",
        label: "Sector of Operation",
        weight: 2.5,
        levels: [
            "1 - Highly comparable sector with rich data",
            "2 - Moderately comparable with some adjustments",
            "3 - Limited comparables requiring broader benchmarking",
            "4 - Niche sector with scarce data",
            "5 - Emerging/unique sector with no comparables",
        ],
    },
    Criterion {
        key: "size",
        label: "Firm Size (No. of Employees)",
        weight: 2.5,
        levels: [
            "1 - <50 employees, simple ops",
            "2 - 51-200 employees",
            "3 - 201-500, moderate structure",
            "4 - 501-1000, large and segmented",
            "5 - >1000, multinational complexity",
        ],
    },
    Criterion {
        key: "purpose",
        label: "Purpose of Valuation",
        weight: 10.0,
        levels: [
            "1 - Internal decision-making",
            "2 - Tax or impairment reporting",
            "3 - Strategic planning",
            "4 - M&A (Buy/Sell side)",
            "5 - IPO or regulatory use",
        ],
    },
    Criterion {
        key: "methodology",
        label: "Valuation Methodology Used",
        weight: 25.0,
        levels: [
            "1 - Multiples only",
            "2 - Simple DCF",
            "3 - DCF with adjustments",
            "4 - DCF + complex multiples",
            "5 - DCF + NAV + full suite",
        ],
    },
    Criterion {
        key: "data",
        label: "Data Availability & Quality",
        weight: 10.0,
        levels: [
            "1 - Very poor, missing data",
            "2 - Sparse, high effort",
            "3 - Partially usable, moderate fixes",
            "4 - Mostly complete",
            "5 - Excellent, clean and organized",
        ],
    },
    Criterion {
        key: "cooperation",
        label: "Management Cooperation",
        weight: 15.0,
        levels: [
            "1 - Unresponsive",
            "2 - Poor communication",
            "3 - Some delays",
            "4 - Generally responsive",
            "5 - Proactive and helpful",
        ],
    },
    Criterion {
        key: "structure",
        label: "Complexity of Financial Structure",
        weight: 10.0,
        levels: [
            "1 - No subsidiaries, clean",
            "2 - Simple subsidiaries",
            "3 - Multiple levels",
            "4 - Complex cross-holdings",
            "5 - Highly intricate structure",
        ],
    },
    Criterion {
        key: "volatility",
        label: "Industry Volatility",
        weight: 2.5,
        levels: [
            "1 - Highly stable (e.g., utilities)",
            "2 - Predictable (e.g., staples)",
            "3 - Neutral cyclicality",
            "4 - Cyclical/volatile",
            "5 - Highly volatile/disruptive",
        ],
    },
    Criterion {
        key: "plan",
        label: "Availability of a Business Plan",
        weight: 20.0,
        levels: [
            "1 - No plan, build from scratch",
            "2 - High-level targets only",
            "3 - Some assumptions, weak logic",
            "4 - Detailed plan with backup",
            "5 - Full plan + sensitivities",
        ],
    },
    Criterion {
        key: "sensitivity",
        label: "Level of Scenario Analysis",
        weight: 2.5,
        levels: [
            "1 - None",
            "2 - Basic 1-2 variables",
            "3 - Few scenarios",
            "4 - Many inputs and paths",
            "5 - Advanced simulations",
        ],
    },
];

/// The full ordered catalog.
pub fn catalog() -> &'static [Criterion] {
    &CATALOG
}

/// Look up a criterion by key.
pub fn find(key: &str) -> Option<&'static Criterion> {
    CATALOG.iter().find(|c| c.key == key)
}
