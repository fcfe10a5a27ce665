//! Template recruiter pitch
//!
//! Two sentences built from the score breakdown: who they are, then the
//! strongest evidence. An optional LLM collaborator may rewrite this
//! later; the template keeps the output useful without one.

use scout_core::{LocationBucket, MergedCandidate, ScoreBreakdown};

pub fn template_pitch(candidate: &MergedCandidate, breakdown: &ScoreBreakdown) -> String {
    let name = candidate.display_name();

    let mut first = if breakdown.founder_fit >= 15.0 {
        format!("{name} shows strong founder/PM signals")
    } else if breakdown.tooling_signals >= 12.0 {
        format!("{name} is proficient with modern AI tooling")
    } else if breakdown.shipping_velocity >= 20.0 {
        format!("{name} demonstrates strong shipping velocity")
    } else {
        format!("{name} shows vibe coding signals")
    };

    match candidate.location_bucket {
        LocationBucket::SfBayArea => first.push_str(" and is based in the SF Bay Area"),
        LocationBucket::OtherUs => first.push_str(" and is US-based"),
        _ => {}
    }
    first.push('.');

    let mut signals: Vec<String> = Vec::new();
    if breakdown.fintech_relevance >= 8.0 {
        signals.push("fintech experience".to_string());
    }
    if breakdown
        .explanations
        .get("founder")
        .is_some_and(|notes| notes.iter().any(|n| n.to_lowercase().contains("yc")))
    {
        signals.push("YC background".to_string());
    }
    if breakdown.shipping_velocity >= 15.0 {
        signals.push("proven shipping track record".to_string());
    }
    if breakdown.tooling_signals >= 10.0 {
        let tools: Vec<&str> = breakdown
            .explanations
            .get("tooling")
            .map(|notes| {
                notes
                    .iter()
                    .filter_map(|n| {
                        if n.contains("'cursor'") {
                            Some("Cursor")
                        } else if n.contains("'v0'") || n.contains("'v0.dev'") {
                            Some("v0")
                        } else if n.contains("'langchain'") {
                            Some("LangChain")
                        } else {
                            None
                        }
                    })
                    .take(2)
                    .collect()
            })
            .unwrap_or_default();
        if !tools.is_empty() {
            signals.push(format!("uses {}", tools.join("/")));
        }
    }

    let second = if signals.is_empty() {
        "Worth exploring for incubation lab potential.".to_string()
    } else {
        signals.truncate(3);
        format!("Key signals: {}.", signals.join(", "))
    };

    format!("{first} {second}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pitch_mentions_bay_area_and_founder_signals() {
        let mut candidate = MergedCandidate::default();
        candidate.name = Some("Ada Lovelace".to_string());
        candidate.location_bucket = LocationBucket::SfBayArea;

        let mut breakdown = ScoreBreakdown::default();
        breakdown.founder_fit = 18.0;
        breakdown.fintech_relevance = 9.0;

        let pitch = template_pitch(&candidate, &breakdown);
        assert!(pitch.starts_with("Ada Lovelace shows strong founder/PM signals"));
        assert!(pitch.contains("SF Bay Area"));
        assert!(pitch.contains("fintech experience"));
    }

    #[test]
    fn test_pitch_without_signals_stays_generic() {
        let candidate = MergedCandidate::default();
        let breakdown = ScoreBreakdown::default();
        let pitch = template_pitch(&candidate, &breakdown);
        assert!(pitch.contains("vibe coding signals"));
        assert!(pitch.contains("Worth exploring"));
    }

    #[test]
    fn test_pitch_names_detected_tools() {
        let mut candidate = MergedCandidate::default();
        candidate.name = Some("Sam".to_string());

        let mut breakdown = ScoreBreakdown::default();
        breakdown.tooling_signals = 12.0;
        breakdown.explanations.insert(
            "tooling".to_string(),
            vec!["+4: uses 'cursor'".to_string(), "+3: uses 'langchain'".to_string()],
        );

        let pitch = template_pitch(&candidate, &breakdown);
        assert!(pitch.contains("uses Cursor/LangChain"));
    }
}
