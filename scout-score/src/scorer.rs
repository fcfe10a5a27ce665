//! Scoring Engine
//!
//! Five independent, non-negative subscores from disjoint signal
//! categories, each clamped to its cap so keyword stuffing cannot
//! dominate. Raw total times the location multiplier, capped at 100.

use chrono::{DateTime, Utc};
use tracing::debug;

use scout_core::text::TextCorpus;
use scout_core::{LocationBucket, MergedCandidate, ScoreBreakdown, Source};

use crate::config::ScoreConfig;
use crate::pitch::template_pitch;

/// Scores merged candidates against a fixed rubric.
///
/// Holds the evaluation timestamp so recency bonuses are deterministic
/// within a run and in tests.
pub struct Scorer {
    config: ScoreConfig,
    now: DateTime<Utc>,
}

impl Scorer {
    pub fn new(config: ScoreConfig) -> Self {
        Self {
            config,
            now: Utc::now(),
        }
    }

    /// Fix the evaluation instant (tests, replays)
    pub fn with_now(mut self, now: DateTime<Utc>) -> Self {
        self.now = now;
        self
    }

    pub fn config(&self) -> &ScoreConfig {
        &self.config
    }

    /// Compute subscores, total and pitch for one candidate in place
    pub fn score(&self, candidate: &mut MergedCandidate) {
        let corpus = TextCorpus::new(&collect_text(candidate));
        let mut breakdown = ScoreBreakdown::default();

        let (shipping, shipping_notes) = self.score_shipping(&corpus, candidate);
        let (tooling, tooling_notes) = self.score_keywords(&corpus, &self.config.tooling_keywords, self.config.tooling_cap, "uses");
        let (founder, founder_notes) = self.score_founder(&corpus, candidate);
        let (fintech, fintech_notes) = self.score_keywords(&corpus, &self.config.fintech_keywords, self.config.fintech_cap, "mentions");
        let (communication, communication_notes) = self.score_communication(candidate);

        breakdown.shipping_velocity = shipping;
        breakdown.tooling_signals = tooling;
        breakdown.founder_fit = founder;
        breakdown.fintech_relevance = fintech;
        breakdown.communication = communication;
        breakdown.explanations.insert("shipping".into(), shipping_notes);
        breakdown.explanations.insert("tooling".into(), tooling_notes);
        breakdown.explanations.insert("founder".into(), founder_notes);
        breakdown.explanations.insert("fintech".into(), fintech_notes);
        breakdown.explanations.insert("communication".into(), communication_notes);

        breakdown.raw_total = round1(shipping + tooling + founder + fintech + communication);
        breakdown.location_multiplier = candidate.location_bucket.multiplier();

        let total = (breakdown.raw_total * breakdown.location_multiplier).min(100.0);
        candidate.total_score = round1(total);
        candidate.excluded = candidate.location_bucket.is_excluded();
        candidate.recruiter_pitch = Some(template_pitch(candidate, &breakdown));
        candidate.scores = Some(breakdown);

        debug!(
            id = %candidate.id(),
            total = candidate.total_score,
            bucket = %candidate.location_bucket,
            "scored candidate"
        );
    }

    fn score_shipping(&self, corpus: &TextCorpus, candidate: &MergedCandidate) -> (f64, Vec<String>) {
        let (mut points, mut notes) =
            keyword_points(corpus, &self.config.shipping_keywords, "found");

        if !candidate.demo_urls.is_empty() {
            let bonus = (self.config.demo_bonus_per_url * candidate.demo_urls.len() as f64)
                .min(self.config.demo_bonus_max);
            points += bonus;
            notes.push(format!("+{bonus}: has {} demo URL(s)", candidate.demo_urls.len()));
        }

        if let Some(last) = candidate.last_activity {
            let days = (self.now - last).num_days();
            if days < self.config.recent_days {
                points += self.config.recent_bonus;
                notes.push(format!(
                    "+{}: active in last {} days",
                    self.config.recent_bonus, self.config.recent_days
                ));
            } else if days < self.config.somewhat_recent_days {
                points += self.config.somewhat_recent_bonus;
                notes.push(format!(
                    "+{}: active in last {} days",
                    self.config.somewhat_recent_bonus, self.config.somewhat_recent_days
                ));
            }
        }

        if candidate.stars_total >= self.config.stars_high_threshold {
            points += self.config.stars_high_bonus;
            notes.push(format!(
                "+{}: {}+ stars on GitHub",
                self.config.stars_high_bonus, candidate.stars_total
            ));
        } else if candidate.stars_total >= self.config.stars_low_threshold {
            points += self.config.stars_low_bonus;
            notes.push(format!(
                "+{}: {}+ stars on GitHub",
                self.config.stars_low_bonus, candidate.stars_total
            ));
        }

        (points.min(self.config.shipping_cap), notes)
    }

    fn score_keywords(
        &self,
        corpus: &TextCorpus,
        table: &[(String, f64)],
        cap: f64,
        verb: &str,
    ) -> (f64, Vec<String>) {
        let (points, notes) = keyword_points(corpus, table, verb);
        (points.min(cap), notes)
    }

    fn score_founder(&self, corpus: &TextCorpus, candidate: &MergedCandidate) -> (f64, Vec<String>) {
        let (mut points, mut notes) =
            keyword_points(corpus, &self.config.founder_keywords, "found");

        let source_count = candidate.source_count();
        if source_count >= 2 {
            let bonus = (self.config.presence_bonus_per_source * source_count as f64)
                .min(self.config.presence_bonus_max);
            points += bonus;
            notes.push(format!("+{bonus}: found on {source_count} sources"));
        }

        if candidate.website.is_some() {
            points += self.config.website_bonus;
            notes.push(format!("+{}: has personal website", self.config.website_bonus));
        }

        (points.min(self.config.founder_cap), notes)
    }

    fn score_communication(&self, candidate: &MergedCandidate) -> (f64, Vec<String>) {
        let mut points: f64 = 0.0;
        let mut notes = Vec::new();

        if candidate
            .bio
            .as_deref()
            .is_some_and(|b| b.chars().count() > self.config.min_bio_len)
        {
            points += 3.0;
            notes.push("+3: has bio".to_string());
        }
        if candidate.name.is_some() {
            points += 2.0;
            notes.push("+2: name available".to_string());
        }
        match candidate.evidence.len() {
            0 => {}
            1..=2 => {
                points += 1.0;
                notes.push("+1: has evidence".to_string());
            }
            _ => {
                points += 3.0;
                notes.push("+3: multiple evidence snippets".to_string());
            }
        }
        if candidate.handle(Source::Github).is_some() || candidate.website.is_some() {
            points += 2.0;
            notes.push("+2: contactable".to_string());
        }

        (points.min(self.config.communication_cap), notes)
    }
}

fn keyword_points(corpus: &TextCorpus, table: &[(String, f64)], verb: &str) -> (f64, Vec<String>) {
    let mut points = 0.0;
    let mut notes = Vec::new();
    if corpus.is_empty() {
        return (points, notes);
    }
    for (keyword, weight) in table {
        if corpus.contains(keyword) {
            points += weight;
            notes.push(format!("+{weight}: {verb} '{keyword}'"));
        }
    }
    (points, notes)
}

/// All merged text relevant for keyword scoring
fn collect_text(candidate: &MergedCandidate) -> String {
    let mut parts: Vec<&str> = Vec::new();
    if let Some(bio) = &candidate.bio {
        parts.push(bio);
    }
    for evidence in &candidate.evidence {
        parts.push(&evidence.snippet.text);
    }
    parts.join(" ")
}

/// Round to one decimal place; scores are human-facing
pub(crate) fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use scout_core::{TaggedEvidence, TaggedUrl};

    fn scorer() -> Scorer {
        Scorer::new(ScoreConfig::default())
    }

    fn evidence(text: &str) -> TaggedEvidence {
        TaggedEvidence {
            record: 0,
            snippet: scout_core::EvidenceSnippet::new(Source::HackerNews, text),
        }
    }

    #[test]
    fn test_empty_candidate_scores_zero() {
        let mut candidate = MergedCandidate::default();
        scorer().score(&mut candidate);
        let scores = candidate.scores.unwrap();
        assert_eq!(scores.raw_total, 0.0);
        assert_eq!(candidate.total_score, 0.0);
    }

    #[test]
    fn test_subscores_respect_caps() {
        let mut candidate = MergedCandidate::default();
        // Stuff every keyword from every table into the evidence.
        let everything: String = scout_core::keywords::all_signal_keywords()
            .collect::<Vec<_>>()
            .join(" ");
        candidate.evidence.push(evidence(&everything));
        candidate.bio = Some("a long enough bio to clear the threshold".to_string());
        candidate.name = Some("Keyword Stuffer".to_string());
        candidate.stars_total = 500;
        candidate.last_activity = Some(Utc::now());
        for i in 0..5 {
            candidate.demo_urls.push(TaggedUrl {
                url: format!("https://demo{i}.example.dev"),
                source: Source::HackerNews,
                record: 0,
            });
        }

        scorer().score(&mut candidate);
        let scores = candidate.scores.as_ref().unwrap();
        assert_eq!(scores.shipping_velocity, 30.0);
        assert_eq!(scores.tooling_signals, 20.0);
        assert!(scores.founder_fit <= 25.0);
        assert_eq!(scores.fintech_relevance, 15.0);
        assert!(scores.communication <= 10.0);
        assert!(scores.raw_total <= 100.0);
        assert!(candidate.total_score <= 100.0);
    }

    #[test]
    fn test_recency_bonus_is_deterministic() {
        let now = Utc::now();
        let mut candidate = MergedCandidate::default();
        candidate.last_activity = Some(now - Duration::days(10));

        let fixed = Scorer::new(ScoreConfig::default()).with_now(now);
        fixed.score(&mut candidate);
        let scores = candidate.scores.unwrap();
        assert_eq!(scores.shipping_velocity, 4.0);
        assert!(scores.explanations["shipping"]
            .iter()
            .any(|n| n.contains("active in last 30 days")));
    }

    #[test]
    fn test_location_multiplier_applied() {
        let mut candidate = MergedCandidate::default();
        candidate.bio = Some("shipped an mvp prototype, launched a hackathon demo".to_string());
        candidate.location_bucket = LocationBucket::Unknown;
        scorer().score(&mut candidate);

        let scores = candidate.scores.as_ref().unwrap();
        assert_eq!(scores.location_multiplier, 0.80);
        assert_eq!(candidate.total_score, round1(scores.raw_total * 0.80));
    }

    #[test]
    fn test_non_us_scored_but_flagged() {
        let mut candidate = MergedCandidate::default();
        candidate.bio = Some("shipped payments prototype".to_string());
        candidate.location_bucket = LocationBucket::NonUs;
        scorer().score(&mut candidate);

        assert!(candidate.excluded);
        let scores = candidate.scores.unwrap();
        assert_eq!(scores.location_multiplier, 1.0);
        assert!(scores.raw_total > 0.0);
    }

    #[test]
    fn test_explanations_cover_awarded_points() {
        let mut candidate = MergedCandidate::default();
        candidate.evidence.push(evidence("shipped a langchain demo at a hackathon"));
        scorer().score(&mut candidate);

        let scores = candidate.scores.unwrap();
        assert!(scores.explanations["shipping"].iter().any(|n| n.contains("'shipped'")));
        assert!(scores.explanations["tooling"].iter().any(|n| n.contains("'langchain'")));
    }
}
