//! VibeScout LLM - optional pitch enhancement
//!
//! Downstream of scoring: a backend abstraction over Anthropic and
//! OpenAI-compatible chat APIs, and a `PitchEnhancer` that rewrites the
//! template recruiter pitch and may nudge the total score within bounds.
//! The pipeline is complete without this crate; everything here degrades
//! to the template pitch on failure.

pub mod backend;
pub mod enhancer;

pub use backend::{AnthropicBackend, LlmBackend, LlmError, OpenAiBackend, SharedBackend};
pub use enhancer::{EnhancerConfig, PitchEnhancer};
