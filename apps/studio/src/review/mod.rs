//! AI review: turns the free text returned by the review endpoint into a scored report.
//!
//! The model answers in several shapes (wrapped, flat, partial, or plain prose),
//! so parsing walks a ladder and never fails: prose still yields a score when it
//! mentions one, and the raw text is kept as feedback.

use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{debug, warn};

/// Overall score used when a wrapped review carries no usable score.
const WRAPPED_DEFAULT_SCORE: u32 = 45;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ScoreCategory {
    Excellent,
    Good,
    NeedsWork,
    Critical,
}

impl ScoreCategory {
    pub fn from_score(score: u32) -> Self {
        match score {
            80.. => ScoreCategory::Excellent,
            60..=79 => ScoreCategory::Good,
            40..=59 => ScoreCategory::NeedsWork,
            _ => ScoreCategory::Critical,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewSource {
    /// A JSON document was found and understood.
    Structured,
    /// Nothing parsed; the score, if any, came from the prose.
    RawText,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SectionReview {
    pub score: u32,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    pub infos: Vec<String>,
}

impl SectionReview {
    fn from_value(value: Option<&Value>) -> Self {
        let Some(Value::Object(object)) = value else {
            return Self::default();
        };
        let messages = |key: &str| -> Vec<String> {
            object
                .get(key)
                .and_then(Value::as_array)
                .map(|items| {
                    items
                        .iter()
                        .filter_map(Value::as_str)
                        .map(str::to_string)
                        .collect()
                })
                .unwrap_or_default()
        };
        Self {
            score: score_of(object.get("score")).unwrap_or(0),
            errors: messages("errors"),
            warnings: messages("warnings"),
            infos: messages("infos"),
        }
    }

    pub fn category(&self) -> ScoreCategory {
        ScoreCategory::from_score(self.score)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewReport {
    pub overall_score: u32,
    pub category: ScoreCategory,
    pub source: ReviewSource,
    pub profile: SectionReview,
    pub work_experience: SectionReview,
    pub projects: SectionReview,
    pub skills: SectionReview,
    pub education: SectionReview,
    pub certifications: SectionReview,
    pub languages: SectionReview,
    pub grammar_and_style: SectionReview,
    pub xyz_pattern: SectionReview,
    pub ats_compliance: SectionReview,
    /// Free-form feedback by topic. Holds `raw` when the text could not be parsed.
    pub feedback: Map<String, Value>,
}

impl ReviewReport {
    pub fn category(&self) -> ScoreCategory {
        self.category
    }

    /// Builds a report from a flat object of section reviews.
    fn from_sections(data: &Map<String, Value>, overall_score: u32, feedback: Option<&Value>) -> Self {
        let section = |key: &str| SectionReview::from_value(data.get(key));
        let grammar = data
            .get("grammarAndStyle")
            .filter(|value| value.is_object())
            .or_else(|| data.get("grammarStyle"));

        Self {
            overall_score,
            category: ScoreCategory::from_score(overall_score),
            source: ReviewSource::Structured,
            profile: section("profile"),
            work_experience: section("workExperience"),
            projects: section("projects"),
            skills: section("skills"),
            education: section("education"),
            certifications: section("certifications"),
            languages: section("languages"),
            grammar_and_style: SectionReview::from_value(grammar),
            xyz_pattern: section("xyzPattern"),
            ats_compliance: section("atsCompliance"),
            feedback: feedback
                .and_then(Value::as_object)
                .cloned()
                .unwrap_or_default(),
        }
    }

    fn from_raw_text(text: &str) -> Self {
        let overall_score = extract_text_score(text).unwrap_or(0);
        let mut feedback = Map::new();
        feedback.insert("raw".to_string(), Value::String(text.to_string()));
        Self {
            overall_score,
            category: ScoreCategory::from_score(overall_score),
            source: ReviewSource::RawText,
            profile: SectionReview::default(),
            work_experience: SectionReview::default(),
            projects: SectionReview::default(),
            skills: SectionReview::default(),
            education: SectionReview::default(),
            certifications: SectionReview::default(),
            languages: SectionReview::default(),
            grammar_and_style: SectionReview::default(),
            xyz_pattern: SectionReview::default(),
            ats_compliance: SectionReview::default(),
            feedback,
        }
    }
}

/// Parses the review endpoint's text. Never fails.
pub fn parse_review(text: &str) -> ReviewReport {
    match serde_json::from_str::<Value>(extract_json_object(text)) {
        Ok(Value::Object(parsed)) => {
            if let Some(report) = from_parsed(&parsed) {
                return report;
            }
            debug!("Review JSON has no recognised shape, falling back to text");
        }
        Ok(_) => debug!("Review JSON is not an object, falling back to text"),
        Err(e) => warn!("Review is not valid JSON ({e}), falling back to text"),
    }
    ReviewReport::from_raw_text(text)
}

fn from_parsed(parsed: &Map<String, Value>) -> Option<ReviewReport> {
    let ats_score = |data: &Map<String, Value>| {
        data.get("atsCompliance")
            .and_then(|ats| score_of(ats.get("score")))
    };

    // { "overallScore": .., "review": { sections.. }, "feedbackSummary": .. }
    if let Some(Value::Object(review)) = parsed.get("review") {
        let overall = score_of(parsed.get("overallScore"))
            .or_else(|| ats_score(review))
            .unwrap_or(WRAPPED_DEFAULT_SCORE);
        let feedback = parsed
            .get("feedbackSummary")
            .filter(|value| truthy(value))
            .or_else(|| review.get("feedback"));
        return Some(ReviewReport::from_sections(review, overall, feedback));
    }

    let has_sections = ["profile", "workExperience"]
        .iter()
        .any(|key| parsed.get(*key).is_some_and(truthy));
    let is_flat = parsed.get("overallScore").is_some_and(Value::is_number)
        && (has_sections || parsed.get("feedback").is_some_and(truthy));

    if is_flat || has_sections {
        let overall = score_of(parsed.get("overallScore"))
            .or_else(|| ats_score(parsed))
            .unwrap_or(0);
        return Some(ReviewReport::from_sections(
            parsed,
            overall,
            parsed.get("feedback"),
        ));
    }
    None
}

/// Strips code fences and cuts the text down to its outermost `{...}`.
fn extract_json_object(text: &str) -> &str {
    let text = text.trim();
    let text = text
        .strip_prefix("```json")
        .or_else(|| text.strip_prefix("```"))
        .unwrap_or(text);
    let text = match text.find("```") {
        Some(end) => &text[..end],
        None => text,
    };
    match (text.find('{'), text.rfind('}')) {
        (Some(start), Some(end)) if end > start => &text[start..=end],
        _ => text.trim(),
    }
}

/// A positive numeric score, rounded. Zero counts as missing.
fn score_of(value: Option<&Value>) -> Option<u32> {
    let score = value?.as_f64()?;
    (score > 0.0).then(|| score.round().min(u32::MAX as f64) as u32)
}

fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0),
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn extract_text_score(text: &str) -> Option<u32> {
    static SCORE: OnceLock<Option<Regex>> = OnceLock::new();
    let pattern = SCORE
        .get_or_init(|| Regex::new(r"(?i)Overall ATS Score\s*(\d+)/100").ok())
        .as_ref()?;
    pattern.captures(text)?.get(1)?.as_str().parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrapped_review_with_fences() {
        let text = r#"```json
{
  "overallScore": 0,
  "review": {
    "profile": { "score": 70, "errors": ["No photo"], "warnings": [], "infos": [] },
    "grammarStyle": { "score": 90 },
    "atsCompliance": { "score": 64 }
  },
  "feedbackSummary": { "profile": "Add a headline" }
}
```
Thanks"#;
        let report = parse_review(text);
        assert_eq!(report.source, ReviewSource::Structured);
        assert_eq!(report.overall_score, 64);
        assert_eq!(report.category(), ScoreCategory::Good);
        assert_eq!(report.profile.errors, vec!["No photo"]);
        assert_eq!(report.grammar_and_style.score, 90);
        assert_eq!(report.skills, SectionReview::default());
        assert_eq!(report.feedback["profile"], "Add a headline");
    }

    #[test]
    fn test_wrapped_review_without_scores_defaults_to_45() {
        let report = parse_review(r#"{ "review": { "profile": {} } }"#);
        assert_eq!(report.overall_score, 45);
        assert_eq!(report.category(), ScoreCategory::NeedsWork);
    }

    #[test]
    fn test_flat_review_is_taken_as_is() {
        let report = parse_review(
            r#"{ "overallScore": 83, "workExperience": { "score": 80, "infos": ["Strong verbs"] }, "feedback": { "skills": "Group them" } }"#,
        );
        assert_eq!(report.overall_score, 83);
        assert_eq!(report.category(), ScoreCategory::Excellent);
        assert_eq!(report.work_experience.infos, vec!["Strong verbs"]);
        assert_eq!(report.feedback["skills"], "Group them");
    }

    #[test]
    fn test_section_data_falls_back_to_ats_score() {
        let report = parse_review(r#"{ "profile": { "score": 20 }, "atsCompliance": { "score": 35 } }"#);
        assert_eq!(report.overall_score, 35);
        assert_eq!(report.category(), ScoreCategory::Critical);
        assert_eq!(report.profile.category(), ScoreCategory::Critical);
    }

    #[test]
    fn test_prose_falls_back_to_regex_score() {
        let text = "Summary\noverall ats score 58/100\nMostly fine.";
        let report = parse_review(text);
        assert_eq!(report.source, ReviewSource::RawText);
        assert_eq!(report.overall_score, 58);
        assert_eq!(report.feedback["raw"], text);
    }

    #[test]
    fn test_unrecognised_json_and_no_score_is_zero() {
        let report = parse_review(r#"{ "hello": "world" }"#);
        assert_eq!(report.source, ReviewSource::RawText);
        assert_eq!(report.overall_score, 0);
    }

    #[test]
    fn test_score_categories_boundaries() {
        assert_eq!(ScoreCategory::from_score(80), ScoreCategory::Excellent);
        assert_eq!(ScoreCategory::from_score(79), ScoreCategory::Good);
        assert_eq!(ScoreCategory::from_score(60), ScoreCategory::Good);
        assert_eq!(ScoreCategory::from_score(40), ScoreCategory::NeedsWork);
        assert_eq!(ScoreCategory::from_score(39), ScoreCategory::Critical);
    }

    #[test]
    fn test_extract_json_object_cuts_to_braces() {
        assert_eq!(extract_json_object("```\n{\"a\": {\"b\": 1}}\n```"), "{\"a\": {\"b\": 1}}");
        assert_eq!(extract_json_object("noise {\"a\": 1} tail"), "{\"a\": 1}");
        assert_eq!(extract_json_object("no json here"), "no json here");
    }
}
