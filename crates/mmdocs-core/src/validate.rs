//! Parser-free structural validation of diagram code.
//!
//! The checks here are a fast heuristic layer, deliberately weaker than a
//! full grammar parser: they catch the common failure modes (no diagram
//! type, unbalanced delimiters, unterminated label quotes) without any
//! grammar knowledge, and accept some invalid documents by design. When a
//! [`RenderOracle`] is configured it gets the last word on anything the
//! heuristics accept.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::catalog::recognized_keywords;
use crate::oracle::{OracleVerdict, RenderOracle};

/// Number of recognized keywords listed in the missing-type error message.
const KEYWORD_SAMPLE: usize = 10;

static LABEL_RE: Lazy<Regex> = Lazy::new(|| {
    #[allow(clippy::unwrap_used)] // pattern is a compile-time constant
    Regex::new(r"\[[^\]]*\]").unwrap()
});

/// Result of validating a diagram.
///
/// Validation failures are first-class results, never errors: an invalid
/// diagram carries exactly one error message and no warnings, while a valid
/// diagram may carry warnings that do not affect the verdict.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationOutcome {
    /// Whether the diagram passed all hard checks.
    pub valid: bool,
    /// The first hard failure encountered, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Soft findings on an otherwise-valid diagram.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

impl ValidationOutcome {
    /// A failed validation with a single error message.
    #[must_use]
    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            valid: false,
            error: Some(error.into()),
            warnings: Vec::new(),
        }
    }

    /// A passing validation, optionally with warnings.
    #[must_use]
    pub fn success(warnings: Vec<String>) -> Self {
        Self {
            valid: true,
            error: None,
            warnings,
        }
    }
}

/// Count occurrences of a character.
fn count_char(text: &str, needle: char) -> usize {
    text.chars().filter(|&c| c == needle).count()
}

/// Check that each delimiter pair is balanced, in fixed order: brackets,
/// then parentheses, then braces. The first imbalance found is reported
/// with its exact counts.
fn check_balanced_delimiters(text: &str) -> Option<String> {
    let pairs = [
        ('[', ']', "brackets"),
        ('(', ')', "parentheses"),
        ('{', '}', "braces"),
    ];

    for (open, close, label) in pairs {
        let opens = count_char(text, open);
        let closes = count_char(text, close);
        if opens != closes {
            return Some(format!(
                "Unmatched {label}: {opens} '{open}' vs {closes} '{close}'"
            ));
        }
    }

    None
}

/// Collect soft warnings that never fail validation.
fn collect_warnings(text: &str) -> Vec<String> {
    let mut warnings = Vec::new();

    let lowered = text.to_lowercase();
    if lowered.contains("\nend\n") || lowered.ends_with("\nend") {
        warnings.push(
            "Using 'end' as a node name may cause issues. Consider using 'End' or '[end]' instead."
                .to_string(),
        );
    }

    for label in LABEL_RE.find_iter(text) {
        let quote_count = count_char(label.as_str(), '"');
        if quote_count % 2 != 0 {
            warnings.push(format!(
                "Possible unclosed quote in label: {}",
                label.as_str()
            ));
        }
    }

    warnings
}

/// Run the structural checks over raw diagram code.
///
/// Pipeline order is fixed and short-circuits on the first hard failure:
/// non-empty input, recognized leading diagram keyword, balanced
/// brackets/parentheses/braces, then soft warnings.
#[must_use]
pub fn validate_structure(code: &str) -> ValidationOutcome {
    let trimmed = code.trim();
    if trimmed.is_empty() {
        return ValidationOutcome::failure("Empty diagram code");
    }

    let has_known_type = recognized_keywords()
        .any(|keyword| trimmed.starts_with(keyword) || trimmed.contains(&format!("\n{keyword}")));
    if !has_known_type {
        let sample: Vec<&str> = recognized_keywords().take(KEYWORD_SAMPLE).collect();
        return ValidationOutcome::failure(format!(
            "No valid diagram type found. Must start with one of: {}, etc.",
            sample.join(", ")
        ));
    }

    if let Some(error) = check_balanced_delimiters(trimmed) {
        return ValidationOutcome::failure(error);
    }

    ValidationOutcome::success(collect_warnings(trimmed))
}

/// Validate structurally, then consult the oracle when one is configured.
///
/// A structural failure is final and the oracle is never invoked. When the
/// structural checks pass, an oracle rejection overrides them; an oracle
/// that is unavailable for environment-only reasons (no browser, no
/// display) is non-signal and the structural verdict stands.
pub async fn validate_with_oracle(
    code: &str,
    oracle: Option<&dyn RenderOracle>,
) -> ValidationOutcome {
    let outcome = validate_structure(code);
    if !outcome.valid {
        return outcome;
    }

    let Some(oracle) = oracle else {
        return outcome;
    };

    match oracle.check(code).await {
        Ok(OracleVerdict::Accepted) => outcome,
        Ok(OracleVerdict::Rejected { reason }) => {
            debug!(oracle = oracle.name(), "oracle rejected diagram");
            ValidationOutcome::failure(reason)
        },
        Ok(OracleVerdict::Unavailable { reason }) => {
            warn!(oracle = oracle.name(), reason = %reason, "oracle unavailable, keeping structural verdict");
            outcome
        },
        Err(e) => ValidationOutcome::failure(format!("Validation error: {e}")),
    }
}
