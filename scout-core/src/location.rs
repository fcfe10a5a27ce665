//! Location bucket classification
//!
//! Coarse geography used only to scale the final score or exclude a
//! candidate. Classification is regex-over-raw-string; anything
//! unresolvable defaults to `Unknown` and never blocks scoring.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

/// Coarse location classification for a merged candidate
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LocationBucket {
    SfBayArea,
    OtherUs,
    #[default]
    Unknown,
    NonUs,
}

const SF_BAY_AREA_PATTERNS: &[&str] = &[
    r"\bsan\s*francisco\b",
    r"\bsf\b",
    r"\bbay\s*area\b",
    r"\bsilicon\s*valley\b",
    r"\boakland\b",
    r"\bberkeley\b",
    r"\bsan\s*jose\b",
    r"\bpalo\s*alto\b",
    r"\bmountain\s*view\b",
    r"\bsunnyvale\b",
    r"\bmenlo\s*park\b",
    r"\bredwood\s*city\b",
    r"\bsanta\s*clara\b",
    r"\bfremont\b",
    r"\bsan\s*mateo\b",
    r"\bcupertino\b",
    r"\blos\s*altos\b",
    r"\bsoma\b",
    r"\bmission\s*district\b",
];

const NON_US_PATTERNS: &[&str] = &[
    r"\bcanada\b",
    r"\btoronto\b",
    r"\bvancouver\b",
    r"\bmontreal\b",
    r"\bunited\s*kingdom\b",
    r"\buk\b",
    r"\blondon\b",
    r"\bengland\b",
    r"\bgermany\b",
    r"\bberlin\b",
    r"\bmunich\b",
    r"\bfrance\b",
    r"\bparis\b",
    r"\bindia\b",
    r"\bbangalore\b",
    r"\bmumbai\b",
    r"\bdelhi\b",
    r"\bhyderabad\b",
    r"\bchina\b",
    r"\bbeijing\b",
    r"\bshanghai\b",
    r"\bjapan\b",
    r"\btokyo\b",
    r"\baustralia\b",
    r"\bsydney\b",
    r"\bmelbourne\b",
    r"\bsingapore\b",
    r"\bnetherlands\b",
    r"\bamsterdam\b",
    r"\bsweden\b",
    r"\bstockholm\b",
    r"\bisrael\b",
    r"\btel\s*aviv\b",
    r"\bbrazil\b",
    r"\bsao\s*paulo\b",
    r"\bspain\b",
    r"\bmadrid\b",
    r"\bbarcelona\b",
    r"\bitaly\b",
    r"\bmilan\b",
    r"\bireland\b",
    r"\bdublin\b",
    r"\bpoland\b",
    r"\bwarsaw\b",
    r"\bukraine\b",
    r"\bkyiv\b",
    r"\bportugal\b",
    r"\blisbon\b",
    r"\bmexico\b",
    r"\bargentina\b",
    r"\bbuenos\s*aires\b",
    r"\bseoul\b",
    r"\bjakarta\b",
    r"\bvietnam\b",
    r"\bbangkok\b",
    r"\bphilippines\b",
    r"\bmanila\b",
    r"\bpakistan\b",
    r"\bnigeria\b",
    r"\blagos\b",
    r"\bnairobi\b",
    r"\bsouth\s*africa\b",
    r"\bcape\s*town\b",
    r"\bcairo\b",
    r"\bprague\b",
    r"\bbudapest\b",
    r"\bvienna\b",
    r"\bswitzerland\b",
    r"\bzurich\b",
    r"\bbrussels\b",
    r"\bcopenhagen\b",
    r"\boslo\b",
    r"\bhelsinki\b",
    r"\bnew\s*zealand\b",
    r"\bauckland\b",
    r"\bmoscow\b",
    r"\bturkey\b",
    r"\bistanbul\b",
    r"\buae\b",
    r"\bdubai\b",
];

const OTHER_US_PATTERNS: &[&str] = &[
    r"\bcalifornia\b",
    r",\s*ca\b",
    r"\bnew\s*york\b",
    r"\bnyc\b",
    r",\s*ny\b",
    r"\btexas\b",
    r",\s*tx\b",
    r"\bseattle\b",
    r",\s*wa\b",
    r"\bcolorado\b",
    r"\bdenver\b",
    r"\bboulder\b",
    r",\s*co\b",
    r"\bmassachusetts\b",
    r"\bboston\b",
    r"\bcambridge\b",
    r",\s*ma\b",
    r"\bflorida\b",
    r"\bmiami\b",
    r",\s*fl\b",
    r"\bchicago\b",
    r",\s*il\b",
    r"\batlanta\b",
    r",\s*ga\b",
    r"\bportland\b",
    r",\s*or\b",
    r"\bphoenix\b",
    r",\s*az\b",
    r"\bsalt\s*lake\b",
    r",\s*ut\b",
    r"\braleigh\b",
    r"\bdurham\b",
    r"\bcharlotte\b",
    r",\s*nc\b",
    r"\bvirginia\b",
    r",\s*va\b",
    r"\bphiladelphia\b",
    r"\bpittsburgh\b",
    r",\s*pa\b",
    r"\bmichigan\b",
    r"\bdetroit\b",
    r"\bann\s*arbor\b",
    r"\bcolumbus\b",
    r",\s*oh\b",
    r"\bbaltimore\b",
    r",\s*md\b",
    r"\bwashington\s*d\.?c\.?\b",
    r"\baustin\b",
    r"\bhouston\b",
    r"\bdallas\b",
    r"\blos\s*angeles\b",
    r"\bsan\s*diego\b",
    r"\bunited\s*states\b",
    r"\busa\b",
    r"\bu\.s\.a?\.?\b",
];

static SF_REGEXES: LazyLock<Vec<Regex>> = LazyLock::new(|| compile(SF_BAY_AREA_PATTERNS));
static NON_US_REGEXES: LazyLock<Vec<Regex>> = LazyLock::new(|| compile(NON_US_PATTERNS));
static OTHER_US_REGEXES: LazyLock<Vec<Regex>> = LazyLock::new(|| compile(OTHER_US_PATTERNS));

fn compile(patterns: &[&str]) -> Vec<Regex> {
    patterns
        .iter()
        .map(|p| Regex::new(p).expect("static location pattern"))
        .collect()
}

impl LocationBucket {
    /// Classify a raw location string. Check order matters: Bay Area
    /// first, then non-US before the generic US patterns so that
    /// "London, UK" never matches a bare state abbreviation.
    pub fn classify(raw: &str) -> Self {
        let text = raw.trim().to_lowercase();
        if text.is_empty() {
            return LocationBucket::Unknown;
        }
        if SF_REGEXES.iter().any(|r| r.is_match(&text)) {
            return LocationBucket::SfBayArea;
        }
        if NON_US_REGEXES.iter().any(|r| r.is_match(&text)) {
            return LocationBucket::NonUs;
        }
        if OTHER_US_REGEXES.iter().any(|r| r.is_match(&text)) {
            return LocationBucket::OtherUs;
        }
        LocationBucket::Unknown
    }

    /// Score multiplier for this bucket. Non-US candidates keep their raw
    /// score (they are flagged for exclusion instead of being scaled).
    pub fn multiplier(&self) -> f64 {
        match self {
            LocationBucket::SfBayArea => 1.10,
            LocationBucket::OtherUs => 1.00,
            LocationBucket::Unknown => 0.80,
            LocationBucket::NonUs => 1.00,
        }
    }

    /// Whether the ranker drops this candidate from the output
    pub fn is_excluded(&self) -> bool {
        matches!(self, LocationBucket::NonUs)
    }
}

impl std::fmt::Display for LocationBucket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            LocationBucket::SfBayArea => "SF_BAY_AREA",
            LocationBucket::OtherUs => "OTHER_US",
            LocationBucket::Unknown => "UNKNOWN",
            LocationBucket::NonUs => "NON_US",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bay_area() {
        assert_eq!(LocationBucket::classify("San Francisco, CA"), LocationBucket::SfBayArea);
        assert_eq!(LocationBucket::classify("Palo Alto"), LocationBucket::SfBayArea);
        assert_eq!(LocationBucket::classify("SF"), LocationBucket::SfBayArea);
    }

    #[test]
    fn test_other_us() {
        assert_eq!(LocationBucket::classify("Brooklyn, NY"), LocationBucket::OtherUs);
        assert_eq!(LocationBucket::classify("Austin"), LocationBucket::OtherUs);
    }

    #[test]
    fn test_non_us_wins_over_us_abbreviations() {
        assert_eq!(LocationBucket::classify("London, UK"), LocationBucket::NonUs);
        assert_eq!(LocationBucket::classify("Toronto, Canada"), LocationBucket::NonUs);
        assert_eq!(LocationBucket::classify("Bangalore, India"), LocationBucket::NonUs);
    }

    #[test]
    fn test_unknown_default() {
        assert_eq!(LocationBucket::classify(""), LocationBucket::Unknown);
        assert_eq!(LocationBucket::classify("Earth"), LocationBucket::Unknown);
        assert_eq!(LocationBucket::default(), LocationBucket::Unknown);
    }

    #[test]
    fn test_multipliers() {
        assert_eq!(LocationBucket::SfBayArea.multiplier(), 1.10);
        assert_eq!(LocationBucket::OtherUs.multiplier(), 1.00);
        assert_eq!(LocationBucket::Unknown.multiplier(), 0.80);
        assert_eq!(LocationBucket::NonUs.multiplier(), 1.00);
        assert!(LocationBucket::NonUs.is_excluded());
        assert!(!LocationBucket::SfBayArea.is_excluded());
    }

    #[test]
    fn test_serde_names() {
        let json = serde_json::to_string(&LocationBucket::SfBayArea).unwrap();
        assert_eq!(json, "\"SF_BAY_AREA\"");
    }
}
