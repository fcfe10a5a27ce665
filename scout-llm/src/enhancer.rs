//! LLM recruiter-pitch enhancement
//!
//! Runs after scoring and ranking. For each of the top candidates the
//! enhancer prompts the backend with the merged profile and the rubric
//! breakdown, then applies the returned pitch and an optional score
//! adjustment clamped to +/-10 points. Candidates are re-ranked afterwards
//! so adjustments can reorder the list. Any per-candidate failure keeps the
//! template pitch.

use serde::Deserialize;
use tracing::{debug, info, warn};

use scout_core::MergedCandidate;
use scout_score::rank_candidates;

use crate::backend::SharedBackend;

/// Configuration for the pitch enhancer
#[derive(Debug, Clone)]
pub struct EnhancerConfig {
    /// Only the top N candidates get an LLM call
    pub max_candidates: usize,
    /// Largest score adjustment accepted, in points
    pub max_score_delta: f64,
    /// Evidence snippets included in the prompt
    pub max_evidence: usize,
}

impl Default for EnhancerConfig {
    fn default() -> Self {
        Self {
            max_candidates: 50,
            max_score_delta: 10.0,
            max_evidence: 8,
        }
    }
}

/// What the model is asked to return
#[derive(Debug, Deserialize)]
struct PitchResponse {
    #[serde(default)]
    pitch: String,
    #[serde(default)]
    key_signals: Vec<String>,
    #[serde(default)]
    concerns: Vec<String>,
    adjusted_score: Option<f64>,
}

/// Rewrites recruiter pitches through an LLM backend
pub struct PitchEnhancer {
    backend: SharedBackend,
    config: EnhancerConfig,
}

impl PitchEnhancer {
    pub fn new(backend: SharedBackend, config: EnhancerConfig) -> Self {
        Self { backend, config }
    }

    /// Enhance the top candidates in place and re-rank
    pub async fn enhance(&self, candidates: Vec<MergedCandidate>) -> Vec<MergedCandidate> {
        let mut candidates = candidates;
        let top = self.config.max_candidates.min(candidates.len());
        info!(
            model = self.backend.model_name(),
            candidates = top,
            "enhancing pitches"
        );

        let mut enhanced = 0usize;
        for candidate in candidates.iter_mut().take(top) {
            let prompt = self.build_prompt(candidate);
            let content = match self.backend.generate(&prompt).await {
                Ok(c) => c,
                Err(e) => {
                    warn!(candidate = %candidate.id(), error = %e, "pitch generation failed");
                    continue;
                }
            };

            let Some(response) = parse_response(&content) else {
                debug!(candidate = %candidate.id(), "unparseable pitch response");
                continue;
            };
            if response.pitch.is_empty() {
                continue;
            }

            candidate.recruiter_pitch = Some(response.pitch);
            if let Some(scores) = &mut candidate.scores {
                let mut notes = Vec::new();
                notes.extend(response.key_signals.iter().map(|s| format!("signal: {s}")));
                notes.extend(response.concerns.iter().map(|c| format!("concern: {c}")));
                if !notes.is_empty() {
                    scores.explanations.insert("llm".to_string(), notes);
                }
            }

            if let Some(adjusted) = response.adjusted_score {
                let delta = (adjusted - candidate.total_score)
                    .clamp(-self.config.max_score_delta, self.config.max_score_delta);
                if delta != 0.0 {
                    let new_total = ((candidate.total_score + delta) * 10.0).round() / 10.0;
                    debug!(
                        candidate = %candidate.id(),
                        from = candidate.total_score,
                        to = new_total,
                        "llm score adjustment"
                    );
                    candidate.total_score = new_total.clamp(0.0, 100.0);
                }
            }

            enhanced += 1;
        }

        info!(enhanced, "pitch enhancement complete");
        // Adjustments may have reordered the list
        rank_candidates(candidates)
    }

    fn build_prompt(&self, candidate: &MergedCandidate) -> String {
        let mut evidence = String::new();
        for (i, item) in candidate
            .evidence
            .iter()
            .take(self.config.max_evidence)
            .enumerate()
        {
            let text = scout_core::text::truncate_text(&item.snippet.text, 200);
            evidence.push_str(&format!("{}. [{}] {}\n", i + 1, item.snippet.source, text));
        }
        if evidence.is_empty() {
            evidence.push_str("No evidence snippets\n");
        }

        let handles: Vec<String> = candidate
            .handles
            .iter()
            .map(|(source, handle)| format!("{source}:{handle}"))
            .collect();
        let demo_urls: Vec<&str> = candidate
            .demo_urls
            .iter()
            .take(3)
            .map(|u| u.url.as_str())
            .collect();
        let sources: Vec<String> = candidate.sources.iter().map(|s| s.to_string()).collect();
        let bio = candidate
            .bio
            .as_deref()
            .map(|b| scout_core::text::truncate_text(b, 500))
            .unwrap_or_else(|| "N/A".to_string());
        let scores = candidate.scores.clone().unwrap_or_default();

        format!(
            r#"You are a technical recruiter at a fintech startup looking for "vibe coders" - people who rapidly ship prototypes using modern AI tooling like Cursor, v0, Replit, LangChain, etc.

Analyze this candidate and write a 2-3 sentence recruiter pitch. Focus on:
1. Their shipping velocity and builder mentality
2. Their use of modern AI/LLM tools
3. Any founder/PM/startup experience
4. Fintech or relevant domain experience

Candidate Profile:
- Name: {name}
- Handles: {handles}
- Location: {location} ({bucket})
- Bio: {bio}
- Website: {website}
- Demo URLs: {demos}
- Sources found on: {sources}
- Evidence snippets:
{evidence}
Current scores:
- Shipping Velocity: {shipping}/30
- Tooling Signals: {tooling}/20
- Founder Fit: {founder}/25
- Fintech Relevance: {fintech}/15
- Communication: {communication}/10
- Total: {total}/100

Write a compelling, specific pitch that highlights what makes this person stand out. Be concise and factual - only mention things you can see in the evidence. If there's limited evidence, acknowledge that.

Output JSON format:
{{
    "pitch": "2-3 sentence pitch",
    "key_signals": ["signal1", "signal2", "signal3"],
    "concerns": ["concern1"] or [],
    "adjusted_score": null or number (only if evidence strongly suggests score should be different)
}}"#,
            name = candidate.display_name(),
            handles = if handles.is_empty() {
                "N/A".to_string()
            } else {
                handles.join(", ")
            },
            location = candidate.location_raw.as_deref().unwrap_or("Unknown"),
            bucket = candidate.location_bucket,
            bio = bio,
            website = candidate.website.as_deref().unwrap_or("N/A"),
            demos = if demo_urls.is_empty() {
                "N/A".to_string()
            } else {
                demo_urls.join(", ")
            },
            sources = sources.join(", "),
            evidence = evidence,
            shipping = scores.shipping_velocity,
            tooling = scores.tooling_signals,
            founder = scores.founder_fit,
            fintech = scores.fintech_relevance,
            communication = scores.communication,
            total = candidate.total_score,
        )
    }
}

/// Parse the model output, tolerating markdown code fences
fn parse_response(content: &str) -> Option<PitchResponse> {
    let stripped = strip_code_fence(content);
    if let Ok(response) = serde_json::from_str::<PitchResponse>(stripped.trim()) {
        return Some(response);
    }

    // Fall back to the raw content as a pitch
    let trimmed = content.trim();
    if trimmed.len() > 20 {
        return Some(PitchResponse {
            pitch: scout_core::text::truncate_text(trimmed, 300),
            key_signals: Vec::new(),
            concerns: Vec::new(),
            adjusted_score: None,
        });
    }
    None
}

fn strip_code_fence(content: &str) -> &str {
    if let Some(rest) = content.split("```json").nth(1) {
        return rest.split("```").next().unwrap_or(rest);
    }
    if let Some(inner) = content.split("```").nth(1) {
        return inner;
    }
    content
}
