//! Scoring rubric configuration
//!
//! An explicit immutable struct passed into the scorer rather than
//! global state, so test suites can substitute fixture rubrics. The
//! default carries the production keyword tables from `scout-core`.

use scout_core::keywords;

/// Keyword-to-points tables, category caps and bonus knobs
#[derive(Debug, Clone)]
pub struct ScoreConfig {
    /// Keyword tables per category
    pub shipping_keywords: Vec<(String, f64)>,
    pub tooling_keywords: Vec<(String, f64)>,
    pub founder_keywords: Vec<(String, f64)>,
    pub fintech_keywords: Vec<(String, f64)>,

    /// Category caps; they sum to 100 so the raw total is 0-100
    pub shipping_cap: f64,
    pub tooling_cap: f64,
    pub founder_cap: f64,
    pub fintech_cap: f64,
    pub communication_cap: f64,

    /// Demo-URL bonus: `min(per_url * count, max)`
    pub demo_bonus_per_url: f64,
    pub demo_bonus_max: f64,

    /// Recency bonuses for last public activity
    pub recent_days: i64,
    pub recent_bonus: f64,
    pub somewhat_recent_days: i64,
    pub somewhat_recent_bonus: f64,

    /// Star bonuses
    pub stars_high_threshold: u32,
    pub stars_high_bonus: f64,
    pub stars_low_threshold: u32,
    pub stars_low_bonus: f64,

    /// Multi-source presence bonus: `min(per_source * count, max)` when
    /// found on at least two sources
    pub presence_bonus_per_source: f64,
    pub presence_bonus_max: f64,
    /// Personal website bonus inside founder_fit
    pub website_bonus: f64,

    /// Communication signals
    pub min_bio_len: usize,
}

impl Default for ScoreConfig {
    fn default() -> Self {
        Self {
            shipping_keywords: owned(keywords::SHIPPING_KEYWORDS),
            tooling_keywords: owned(keywords::TOOLING_KEYWORDS),
            founder_keywords: owned(keywords::FOUNDER_KEYWORDS),
            fintech_keywords: owned(keywords::FINTECH_KEYWORDS),

            shipping_cap: 30.0,
            tooling_cap: 20.0,
            founder_cap: 25.0,
            fintech_cap: 15.0,
            communication_cap: 10.0,

            demo_bonus_per_url: 2.0,
            demo_bonus_max: 6.0,

            recent_days: 30,
            recent_bonus: 4.0,
            somewhat_recent_days: 90,
            somewhat_recent_bonus: 2.0,

            stars_high_threshold: 100,
            stars_high_bonus: 3.0,
            stars_low_threshold: 10,
            stars_low_bonus: 1.0,

            presence_bonus_per_source: 2.0,
            presence_bonus_max: 6.0,
            website_bonus: 3.0,

            min_bio_len: 20,
        }
    }
}

fn owned(table: &[(&str, f64)]) -> Vec<(String, f64)> {
    table.iter().map(|&(kw, pts)| (kw.to_string(), pts)).collect()
}

impl ScoreConfig {
    /// Caps always sum to 100 with the default rubric; custom rubrics
    /// should hold the same invariant or total_score loses its meaning.
    pub fn cap_sum(&self) -> f64 {
        self.shipping_cap
            + self.tooling_cap
            + self.founder_cap
            + self.fintech_cap
            + self.communication_cap
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_caps_sum_to_100() {
        assert_eq!(ScoreConfig::default().cap_sum(), 100.0);
    }

    #[test]
    fn test_default_tables_populated() {
        let config = ScoreConfig::default();
        assert!(!config.shipping_keywords.is_empty());
        assert!(!config.tooling_keywords.is_empty());
        assert!(!config.founder_keywords.is_empty());
        assert!(!config.fintech_keywords.is_empty());
    }
}
