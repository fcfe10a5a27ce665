//! Signal keyword tables
//!
//! Shared by two consumers: the resolver uses keyword overlap as a weak
//! corroborating signal, and the scoring rubric builds its default
//! keyword-to-points tables from the same lists.

/// Shipping-velocity signals and their default point values
pub const SHIPPING_KEYWORDS: &[(&str, f64)] = &[
    ("shipped in a weekend", 3.0),
    ("built in a weekend", 3.0),
    ("weekend project", 3.0),
    ("launched", 3.0),
    ("shipped", 3.0),
    ("24 hours", 3.0),
    ("48 hours", 3.0),
    ("hackathon", 2.0),
    ("demo", 2.0),
    ("prototype", 2.0),
    ("mvp", 2.0),
    ("side project", 1.0),
    ("hack", 1.0),
];

/// AI-assisted tooling signals and their default point values
pub const TOOLING_KEYWORDS: &[(&str, f64)] = &[
    ("cursor", 4.0),
    ("v0", 4.0),
    ("v0.dev", 4.0),
    ("ai agent", 4.0),
    ("prompt-to-app", 4.0),
    ("replit", 3.0),
    ("langchain", 3.0),
    ("langgraph", 3.0),
    ("llamaindex", 3.0),
    ("llm app", 3.0),
    ("copilot", 2.0),
    ("openai", 2.0),
    ("anthropic", 2.0),
    ("claude", 2.0),
    ("gpt-4", 2.0),
    ("gpt4", 2.0),
    ("supabase", 2.0),
    ("streamlit", 2.0),
    ("gradio", 2.0),
    ("agent", 2.0),
    ("next.js", 1.0),
    ("nextjs", 1.0),
    ("vercel", 1.0),
];

/// Founder / accelerator / PM signals and their default point values
pub const FOUNDER_KEYWORDS: &[(&str, f64)] = &[
    ("co-founder", 5.0),
    ("cofounder", 5.0),
    ("y combinator", 5.0),
    ("ycombinator", 5.0),
    ("founder", 4.0),
    ("yc", 4.0),
    ("antler", 4.0),
    ("entrepreneur first", 4.0),
    ("head of product", 4.0),
    ("ceo", 3.0),
    ("cto", 3.0),
    ("techstars", 3.0),
    ("500 startups", 3.0),
    ("on deck", 3.0),
    ("bootstrapped", 3.0),
    ("seed round", 3.0),
    ("product manager", 3.0),
    ("product lead", 3.0),
    ("startup", 2.0),
    ("series a", 2.0),
    ("ef", 2.0),
    ("pm", 1.0),
];

/// Fintech-domain signals and their default point values
pub const FINTECH_KEYWORDS: &[(&str, f64)] = &[
    ("fintech", 4.0),
    ("neobank", 4.0),
    ("payments", 3.0),
    ("banking", 3.0),
    ("plaid", 3.0),
    ("sofi", 3.0),
    ("insurtech", 3.0),
    ("trading", 2.0),
    ("investing", 2.0),
    ("crypto", 2.0),
    ("defi", 2.0),
    ("stripe", 2.0),
    ("financial", 2.0),
    ("finance", 2.0),
    ("credit", 2.0),
    ("lending", 2.0),
    ("insurance", 2.0),
    ("web3", 1.0),
];

/// Iterator over every signal keyword, category-agnostic
pub fn all_signal_keywords() -> impl Iterator<Item = &'static str> {
    SHIPPING_KEYWORDS
        .iter()
        .chain(TOOLING_KEYWORDS)
        .chain(FOUNDER_KEYWORDS)
        .chain(FINTECH_KEYWORDS)
        .map(|(kw, _)| *kw)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tables_are_nonempty_and_positive() {
        for table in [
            SHIPPING_KEYWORDS,
            TOOLING_KEYWORDS,
            FOUNDER_KEYWORDS,
            FINTECH_KEYWORDS,
        ] {
            assert!(!table.is_empty());
            assert!(table.iter().all(|(kw, pts)| !kw.is_empty() && *pts > 0.0));
        }
    }

    #[test]
    fn test_all_keywords_covers_every_table() {
        let count = all_signal_keywords().count();
        assert_eq!(
            count,
            SHIPPING_KEYWORDS.len()
                + TOOLING_KEYWORDS.len()
                + FOUNDER_KEYWORDS.len()
                + FINTECH_KEYWORDS.len()
        );
    }
}
