//! Checks generated markup for the market's mandatory sections.
//!
//! A judge model is preferred. Any judge failure (transport, timeout, unparseable reply)
//! degrades to a deterministic keyword check, so validation always yields a result.

use std::{sync::Arc, time::Duration};

use domain::models::{
    market::Market,
    validation::{ValidationResult, ValidationSource},
};
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, warn};
use utils::text::truncate_chars;

use super::llm_api::{CompletionRequest, LlmApiError, ModelEndpoint, extract_json};

/// Sampling and limits for the judge model
#[derive(Debug, Clone)]
pub struct JudgeSettings {
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    /// Only this many characters of markup are sent to the judge.
    pub markup_char_cap: usize,
    pub timeout: Duration,
}

impl Default for JudgeSettings {
    fn default() -> Self {
        Self {
            model: "gpt-4o-mini".to_string(),
            temperature: 0.1,
            max_tokens: 500,
            markup_char_cap: 15_000,
            timeout: Duration::from_secs(30),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FallbackReason {
    JudgeDisabled,
    JudgeFailed(String),
}

/// A validation result tagged with the strategy that produced it
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationOutcome {
    Judged(ValidationResult),
    Fallback {
        result: ValidationResult,
        reason: FallbackReason,
    },
}

impl ValidationOutcome {
    pub fn result(&self) -> &ValidationResult {
        match self {
            ValidationOutcome::Judged(result) => result,
            ValidationOutcome::Fallback { result, .. } => result,
        }
    }

    pub fn into_result(self) -> ValidationResult {
        match self {
            ValidationOutcome::Judged(result) => result,
            ValidationOutcome::Fallback { result, .. } => result,
        }
    }

    pub fn source(&self) -> ValidationSource {
        match self {
            ValidationOutcome::Judged(_) => ValidationSource::Judge,
            ValidationOutcome::Fallback { .. } => ValidationSource::Keyword,
        }
    }
}

#[derive(Debug, Error)]
enum JudgeError {
    #[error("judge call failed: {0}")]
    Model(#[from] LlmApiError),
    #[error("judge call timed out after {0:?}")]
    Timeout(Duration),
    #[error("judge reply is not a verdict: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Verdict shape the judge is asked to return
#[derive(Debug, Deserialize)]
struct JudgeVerdict {
    #[serde(default)]
    valid: bool,
    #[serde(default)]
    missing_sections: Vec<String>,
    #[serde(default)]
    found_sections: Vec<String>,
    #[serde(default)]
    suggestions: String,
}

#[derive(Clone)]
struct Judge {
    endpoint: Arc<dyn ModelEndpoint>,
    settings: JudgeSettings,
}

impl Judge {
    async fn judge(&self, markup: &str, market: Market) -> Result<ValidationResult, JudgeError> {
        let request = CompletionRequest {
            model: self.settings.model.clone(),
            system: None,
            user: build_judge_prompt(markup, market, self.settings.markup_char_cap),
            temperature: self.settings.temperature,
            max_tokens: self.settings.max_tokens,
        };

        let reply = tokio::time::timeout(self.settings.timeout, self.endpoint.complete(request))
            .await
            .map_err(|_| JudgeError::Timeout(self.settings.timeout))??;

        let verdict: JudgeVerdict = serde_json::from_str(extract_json(&reply))?;
        Ok(normalize_verdict(verdict, market))
    }
}

#[derive(Clone, Default)]
pub struct SectionValidator {
    judge: Option<Judge>,
}

impl SectionValidator {
    /// Validator that only ever uses the keyword check
    pub fn keyword_only() -> Self {
        Self { judge: None }
    }

    pub fn with_judge(endpoint: Arc<dyn ModelEndpoint>, settings: JudgeSettings) -> Self {
        Self {
            judge: Some(Judge { endpoint, settings }),
        }
    }

    pub fn has_judge(&self) -> bool {
        self.judge.is_some()
    }

    /// Never fails: judge problems are absorbed into a `Fallback` outcome.
    pub async fn validate(&self, markup: &str, market: Market) -> ValidationOutcome {
        let Some(judge) = &self.judge else {
            return ValidationOutcome::Fallback {
                result: keyword_validation(markup, market),
                reason: FallbackReason::JudgeDisabled,
            };
        };

        match judge.judge(markup, market).await {
            Ok(result) => {
                debug!(
                    market = %market,
                    valid = result.valid,
                    missing = ?result.missing_sections,
                    "Judge validation finished"
                );
                ValidationOutcome::Judged(result)
            }
            Err(e) => {
                warn!(
                    market = %market,
                    error = %e,
                    "Judge validation failed, falling back to keyword check"
                );
                ValidationOutcome::Fallback {
                    result: keyword_validation(markup, market),
                    reason: FallbackReason::JudgeFailed(e.to_string()),
                }
            }
        }
    }
}

/// Deterministic check: a section is found when any of its keywords occurs in the
/// lowercased markup.
pub fn keyword_validation(markup: &str, market: Market) -> ValidationResult {
    let lower = markup.to_lowercase();
    ValidationResult::classify(market, |section| {
        section_keywords(section)
            .iter()
            .any(|keyword| lower.contains(keyword))
    })
}

/// Lowercase keywords that signal `section`. Unmapped names use their first word.
pub fn section_keywords(section: &str) -> Vec<&str> {
    let keywords: &[&str] = match section {
        "sticky navbar" => &["nav", "navbar", "header"],
        "hero section" => &["hero", "min-h-screen", "above-the-fold"],
        "authority hero section" => &["hero", "min-h-screen"],
        "services section" => &["services", "what we offer", "our services"],
        "offer/services section" => &["services", "offer", "how i can help"],
        "about/trust section" => &["about", "trust", "who we are"],
        "about/credibility section" => &["about", "credibility", "who i am"],
        "social proof/testimonials" => &["testimonial", "review", "client", "social proof"],
        "location/contact section" => &["contact", "location", "address", "map"],
        "business hours" => &["hours", "timing", "open", "schedule"],
        "sticky mobile footer" => &["fixed", "bottom", "mobile", "sticky"],
        "booking/cta section" => &["book", "schedule", "calendly", "apply"],
        "footer" => &["footer", "</footer>"],
        _ => return section.split_whitespace().next().into_iter().collect(),
    };
    keywords.to_vec()
}

fn build_judge_prompt(markup: &str, market: Market, char_cap: usize) -> String {
    let mandatory_list = market
        .mandatory_sections()
        .iter()
        .map(|s| format!("- {s}"))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        r#"You are a website validation assistant.
Analyze this HTML code and check if ALL of these mandatory sections are present:

{mandatory_list}

HTML CODE:
```html
{markup}
```

Respond with ONLY a JSON object (no markdown, no explanation):
{{
  "valid": true/false,
  "missing_sections": ["section1", "section2"],
  "found_sections": ["section1", "section2", ...],
  "suggestions": "Brief suggestion for what's missing or 'All sections present'"
}}
"#,
        markup = truncate_chars(markup, char_cap),
    )
}

/// Fold a judge verdict onto the market checklist so found/missing partition it.
///
/// Listed as missing wins over listed as found; unlisted sections follow the judge's
/// overall `valid` flag. Names outside the checklist are dropped.
fn normalize_verdict(verdict: JudgeVerdict, market: Market) -> ValidationResult {
    let unknown: Vec<&str> = verdict
        .missing_sections
        .iter()
        .chain(&verdict.found_sections)
        .map(String::as_str)
        .filter(|name| market.canonical_section(name).is_none())
        .collect();
    if !unknown.is_empty() {
        debug!(market = %market, unknown = ?unknown, "Judge named sections outside the checklist");
    }

    let listed = |names: &[String], section: &str| {
        names
            .iter()
            .any(|name| name.trim().eq_ignore_ascii_case(section))
    };

    let mut result = ValidationResult::classify(market, |section| {
        if listed(&verdict.missing_sections, section) {
            false
        } else if listed(&verdict.found_sections, section) {
            true
        } else {
            verdict.valid
        }
    });

    result.valid = verdict.valid && result.missing_sections.is_empty();
    if !verdict.suggestions.trim().is_empty() {
        result.suggestions = verdict.suggestions;
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::test_support::{COMPLETE_PAGE, Reply, ScriptedEndpoint};

    fn assert_partition(result: &ValidationResult, market: Market) {
        let sections = market.mandatory_sections();
        for section in sections {
            let found = result.found_sections.iter().any(|s| s == section);
            let missing = result.missing_sections.iter().any(|s| s == section);
            assert!(found ^ missing, "{section} must be exactly one of found/missing");
        }
        assert_eq!(
            result.found_sections.len() + result.missing_sections.len(),
            sections.len()
        );
    }

    fn judge_validator(replies: Vec<Reply>) -> (SectionValidator, Arc<ScriptedEndpoint>) {
        let endpoint = ScriptedEndpoint::new(replies);
        let validator = SectionValidator::with_judge(endpoint.clone(), JudgeSettings::default());
        (validator, endpoint)
    }

    #[test]
    fn test_domestic_missing_navbar_and_hours() {
        let markup = r#"<html><body>
            <section class="hero">Fresh bread in Pune</section>
            <section>Our services</section>
            <section>About us</section>
            <section>Testimonial from a happy client</section>
            <section>Contact: 12 MG Road address</section>
            <div class="fixed bottom-0">Call</div>
            <footer>© Bakery</footer>
        </body></html>"#;

        let result = keyword_validation(markup, Market::Domestic);
        assert!(!result.valid);
        assert_eq!(
            result.missing_sections,
            vec!["sticky navbar".to_string(), "business hours".to_string()]
        );
        assert_eq!(result.suggestions, "Missing: sticky navbar, business hours");
        assert_partition(&result, Market::Domestic);
    }

    #[test]
    fn test_keyword_matching_is_case_insensitive() {
        let result = keyword_validation(COMPLETE_PAGE.to_uppercase().as_str(), Market::Global);
        assert!(result.valid);
        assert!(result.missing_sections.is_empty());
    }

    #[test]
    fn test_compound_names_match_on_any_keyword() {
        let result = keyword_validation("<p>credibility</p>", Market::Global);
        assert!(result.found_sections.contains(&"about/credibility section".to_string()));
    }

    #[test]
    fn test_unmapped_section_uses_first_word() {
        assert_eq!(section_keywords("gallery grid"), vec!["gallery"]);
        assert!(section_keywords("").is_empty());
        assert_eq!(section_keywords("footer"), vec!["footer", "</footer>"]);
    }

    #[test]
    fn test_fallback_handles_degenerate_inputs() {
        let huge = "lorem ipsum ".repeat(400_000);
        for markup in ["", "not html at all", huge.as_str()] {
            for market in [Market::Domestic, Market::Global] {
                let result = keyword_validation(markup, market);
                assert_partition(&result, market);
            }
        }
        let empty = keyword_validation("", Market::Domestic);
        assert!(!empty.valid);
        assert_eq!(empty.missing_sections.len(), Market::Domestic.mandatory_sections().len());
    }

    #[tokio::test]
    async fn test_keyword_only_reports_disabled_judge() {
        let outcome = SectionValidator::keyword_only()
            .validate(COMPLETE_PAGE, Market::Domestic)
            .await;
        assert_eq!(outcome.source(), ValidationSource::Keyword);
        assert!(matches!(
            outcome,
            ValidationOutcome::Fallback { reason: FallbackReason::JudgeDisabled, .. }
        ));
        assert!(outcome.result().valid);
    }

    #[tokio::test]
    async fn test_judge_verdict_is_used_and_prompt_is_capped() {
        let reply = r#"```json
{"valid": false, "missing_sections": ["Footer"], "found_sections": ["sticky navbar"], "suggestions": "Add a footer"}
```"#;
        let (validator, endpoint) = judge_validator(vec![Reply::text(reply)]);
        let markup = format!("<html>{}</html>", "x".repeat(20_000));

        let outcome = validator.validate(&markup, Market::Global).await;
        let ValidationOutcome::Judged(result) = outcome else {
            panic!("expected a judged outcome");
        };
        assert!(!result.valid);
        assert_eq!(result.suggestions, "Add a footer");
        assert!(result.missing_sections.contains(&"footer".to_string()));
        // Unlisted sections follow valid=false
        assert!(result.missing_sections.contains(&"booking/cta section".to_string()));
        assert_eq!(result.found_sections, vec!["sticky navbar".to_string()]);
        assert_partition(&result, Market::Global);

        let requests = endpoint.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].model, "gpt-4o-mini");
        assert_eq!(requests[0].max_tokens, 500);
        assert!(requests[0].user.contains("- booking/cta section"));
        assert!(!requests[0].user.contains(&"x".repeat(15_001)));
        assert!(requests[0].user.contains(&"x".repeat(14_000)));
    }

    #[tokio::test]
    async fn test_inconsistent_judge_output_still_partitions() {
        let reply = r#"{"valid": true,
            "missing_sections": ["business hours", "pricing table"],
            "found_sections": ["business hours", "footer", "footer"]}"#;
        let (validator, _) = judge_validator(vec![Reply::text(reply)]);

        let outcome = validator.validate("<html></html>", Market::Domestic).await;
        let result = outcome.result();
        assert_eq!(outcome.source(), ValidationSource::Judge);
        assert_eq!(result.missing_sections, vec!["business hours".to_string()]);
        assert!(!result.valid);
        assert_partition(result, Market::Domestic);
    }

    #[tokio::test]
    async fn test_judge_valid_with_empty_lists_marks_everything_found() {
        let (validator, _) = judge_validator(vec![Reply::text(r#"{"valid": true}"#)]);
        let outcome = validator.validate("<html></html>", Market::Global).await;
        assert!(outcome.result().valid);
        assert_eq!(
            outcome.result().found_sections.len(),
            Market::Global.mandatory_sections().len()
        );
    }

    #[tokio::test]
    async fn test_malformed_judge_reply_falls_back() {
        let (validator, _) = judge_validator(vec![Reply::text("Looks great to me!")]);
        let outcome = validator.validate(COMPLETE_PAGE, Market::Domestic).await;
        match &outcome {
            ValidationOutcome::Fallback {
                reason: FallbackReason::JudgeFailed(msg),
                result,
            } => {
                assert!(msg.contains("not a verdict"));
                assert!(result.valid);
            }
            other => panic!("expected fallback, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_judge_error_falls_back() {
        let (validator, _) = judge_validator(vec![Reply::Error(LlmApiError::Http {
            status: 503,
            body: "unavailable".to_string(),
        })]);
        let outcome = validator.validate("", Market::Global).await;
        assert_eq!(outcome.source(), ValidationSource::Keyword);
        assert_partition(outcome.result(), Market::Global);
    }

    #[tokio::test(start_paused = true)]
    async fn test_judge_timeout_falls_back() {
        let (validator, _) = judge_validator(vec![Reply::Stall]);
        let outcome = validator.validate(COMPLETE_PAGE, Market::Global).await;
        match outcome {
            ValidationOutcome::Fallback {
                reason: FallbackReason::JudgeFailed(msg),
                result,
            } => {
                assert!(msg.contains("timed out"));
                assert!(result.valid);
            }
            other => panic!("expected fallback, got {other:?}"),
        }
    }
}
