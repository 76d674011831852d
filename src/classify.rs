use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

// The single source of truth for every fact derived from an analysis
// response. Both the interactive result view and the printable report go
// through these functions, so the two renderings cannot disagree.

static LEVEL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"Level\s*(\d+)").unwrap());
static STEP_PREFIX_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*\d+\.\s*").unwrap());

/// Assumed when the tier string carries no recognizable "Level N".
const DEFAULT_SEVERITY_LEVEL: u32 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Critical,
    High,
    Moderate,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Critical => "critical",
            Severity::High => "high",
            Severity::Moderate => "moderate",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Severity::Critical => "CRITICAL",
            Severity::High => "HIGH",
            Severity::Moderate => "MODERATE",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
    High,
    Immediate,
    Medium,
}

/// Parse the numeric level out of a tier string like "CRITICAL (Level 9/10)".
pub fn severity_level(tier: &str) -> u32 {
    LEVEL_RE
        .captures(tier)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse::<u32>().ok())
        .unwrap_or(DEFAULT_SEVERITY_LEVEL)
}

pub fn severity(tier: &str) -> Severity {
    match severity_level(tier) {
        n if n >= 8 => Severity::Critical,
        n if n >= 6 => Severity::High,
        _ => Severity::Moderate,
    }
}

/// Order matters: a string containing both "high" and "immediate" is High.
pub fn urgency(text: &str) -> Urgency {
    let lowered = text.to_lowercase();
    if lowered.contains("high") {
        Urgency::High
    } else if lowered.contains("immediate") {
        Urgency::Immediate
    } else {
        Urgency::Medium
    }
}

/// Strip a leading "N. " numeral prefix from a next-step instruction.
/// Anything else (bullets, plain text) is passed through untouched.
pub fn strip_step_prefix(step: &str) -> &str {
    match STEP_PREFIX_RE.find(step) {
        Some(m) => &step[m.end()..],
        None => step,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_tiers() {
        assert_eq!(severity("CRITICAL (Level 9/10)"), Severity::Critical);
        assert_eq!(severity("Level 8"), Severity::Critical);
        assert_eq!(severity("HIGH (Level 7/10)"), Severity::High);
        assert_eq!(severity("Level 6"), Severity::High);
        assert_eq!(severity("MODERATE (Level 5/10)"), Severity::Moderate);
        assert_eq!(severity("Level 3"), Severity::Moderate);
    }

    #[test]
    fn test_unparsable_tier_defaults_to_level_five() {
        assert_eq!(severity_level("Very serious"), 5);
        assert_eq!(severity("Very serious"), Severity::Moderate);
        assert_eq!(severity(""), Severity::Moderate);
        assert_eq!(severity("Level ten"), Severity::Moderate);
    }

    #[test]
    fn test_severity_level_parses_first_match() {
        assert_eq!(severity_level("Level 9/10"), 9);
        assert_eq!(severity_level("warning: Level  7 escalating to Level 9"), 7);
    }

    #[test]
    fn test_urgency_high_wins_over_immediate() {
        assert_eq!(urgency("High priority, immediate"), Urgency::High);
        assert_eq!(urgency("Immediate action"), Urgency::Immediate);
        assert_eq!(urgency("Medium term"), Urgency::Medium);
        assert_eq!(urgency("HIGH - proves ownership"), Urgency::High);
        assert_eq!(urgency(""), Urgency::Medium);
    }

    #[test]
    fn test_step_prefix_stripping() {
        assert_eq!(strip_step_prefix("1. File a complaint"), "File a complaint");
        assert_eq!(strip_step_prefix("12.  Consult a lawyer"), "Consult a lawyer");
        assert_eq!(strip_step_prefix("Talk to a lawyer"), "Talk to a lawyer");
        // Non-numeral prefixes are deliberately left alone.
        assert_eq!(strip_step_prefix("- File a complaint"), "- File a complaint");
        assert_eq!(strip_step_prefix("1) File"), "1) File");
    }
}
