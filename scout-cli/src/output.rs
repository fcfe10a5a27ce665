//! Ranked-candidate output - pretty JSON and a flat CSV for recruiters

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use scout_core::{MergedCandidate, Source};

const CSV_COLUMNS: &[&str] = &[
    "rank",
    "total_score",
    "id",
    "name",
    "email",
    "linkedin_slug",
    "github_username",
    "hn_username",
    "devto_username",
    "location_raw",
    "location_bucket",
    "website",
    "demo_urls",
    "sources",
    "shipping_velocity",
    "tooling_signals",
    "founder_fit",
    "fintech_relevance",
    "communication",
    "location_multiplier",
    "recruiter_pitch",
    "evidence",
];

/// Write candidates as pretty-printed JSON
pub fn save_json(candidates: &[MergedCandidate], path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(candidates)?;
    fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}

/// Read candidates back from a JSON file
pub fn load_json(path: &Path) -> Result<Vec<MergedCandidate>> {
    let raw = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("parsing {}", path.display()))
}

/// Write candidates as a flat CSV, one row per candidate
pub fn save_csv(candidates: &[MergedCandidate], path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let mut out = String::new();
    out.push_str(&CSV_COLUMNS.join(","));
    out.push('\n');
    for candidate in candidates {
        out.push_str(&csv_row(candidate));
        out.push('\n');
    }

    fs::write(path, out).with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}

fn csv_row(c: &MergedCandidate) -> String {
    let scores = c.scores.clone().unwrap_or_default();
    let demo_urls: Vec<&str> = c.demo_urls.iter().take(3).map(|u| u.url.as_str()).collect();
    let sources: Vec<String> = c.sources.iter().map(|s| s.to_string()).collect();
    let evidence: Vec<String> = c
        .evidence
        .iter()
        .take(5)
        .map(|e| scout_core::text::truncate_text(&e.snippet.text, 100))
        .collect();

    let fields = [
        c.rank.map(|r| r.to_string()).unwrap_or_default(),
        format!("{:.1}", c.total_score),
        c.id(),
        c.name.clone().unwrap_or_default(),
        c.email.clone().unwrap_or_default(),
        c.linkedin_slug.clone().unwrap_or_default(),
        c.handle(Source::Github).unwrap_or_default().to_string(),
        c.handle(Source::HackerNews).unwrap_or_default().to_string(),
        c.handle(Source::DevTo).unwrap_or_default().to_string(),
        c.location_raw.clone().unwrap_or_default(),
        c.location_bucket.to_string(),
        c.website.clone().unwrap_or_default(),
        demo_urls.join("; "),
        sources.join(", "),
        format!("{}", scores.shipping_velocity),
        format!("{}", scores.tooling_signals),
        format!("{}", scores.founder_fit),
        format!("{}", scores.fintech_relevance),
        format!("{}", scores.communication),
        format!("{}", scores.location_multiplier),
        c.recruiter_pitch.clone().unwrap_or_default(),
        evidence.join(" | "),
    ];

    fields
        .iter()
        .map(|f| csv_escape(f))
        .collect::<Vec<_>>()
        .join(",")
}

/// Quote a field when it contains a delimiter, quote or newline
fn csv_escape(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scout_core::LocationBucket;

    fn candidate() -> MergedCandidate {
        let mut c = MergedCandidate::default();
        c.rank = Some(1);
        c.total_score = 87.5;
        c.name = Some("Ada, the Builder".to_string());
        c.handles.insert(Source::Github, "ada".to_string());
        c.location_raw = Some("San Francisco, CA".to_string());
        c.location_bucket = LocationBucket::SfBayArea;
        c.sources.insert(Source::Github);
        c.sources.insert(Source::HackerNews);
        c.recruiter_pitch = Some("Ships \"daily\"".to_string());
        c
    }

    #[test]
    fn test_csv_escape() {
        assert_eq!(csv_escape("plain"), "plain");
        assert_eq!(csv_escape("a,b"), "\"a,b\"");
        assert_eq!(csv_escape("say \"hi\""), "\"say \"\"hi\"\"\"");
        assert_eq!(csv_escape("two\nlines"), "\"two\nlines\"");
    }

    #[test]
    fn test_csv_row_quotes_embedded_delimiters() {
        let row = csv_row(&candidate());
        assert!(row.starts_with("1,87.5,gh:ada,"));
        assert!(row.contains("\"Ada, the Builder\""));
        assert!(row.contains("\"San Francisco, CA\""));
        assert!(row.contains("\"Ships \"\"daily\"\"\""));
        // One field per column
        let mut in_quotes = false;
        let commas = row
            .chars()
            .filter(|&ch| {
                if ch == '"' {
                    in_quotes = !in_quotes;
                }
                ch == ',' && !in_quotes
            })
            .count();
        assert_eq!(commas, CSV_COLUMNS.len() - 1);
    }

    #[test]
    fn test_json_round_trip() {
        let dir = std::env::temp_dir().join("vibescout-output-test");
        let path = dir.join("scored.json");
        let candidates = vec![candidate()];

        save_json(&candidates, &path).unwrap();
        let loaded = load_json(&path).unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].name.as_deref(), Some("Ada, the Builder"));
        assert_eq!(loaded[0].total_score, 87.5);

        fs::remove_dir_all(&dir).ok();
    }
}
