use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

use super::language_tag::LanguageTag;
use super::verdict::{Tone, Verdict};

pub const MANDARIN_PASS_THRESHOLD: f64 = 0.80;
pub const DEFAULT_PASS_THRESHOLD: f64 = 0.78;
const WEAK_SUBSCORE: f64 = 70.0;

const ACCURACY_POINTERS: &[&str] = &[
    "/NBest/0/PronunciationAssessment/AccuracyScore",
    "/NBest/0/AccuracyScore",
    "/PronunciationAssessment/AccuracyScore",
    "/AccuracyScore",
];
const OVERALL_POINTERS: &[&str] = &[
    "/NBest/0/PronunciationAssessment/PronScore",
    "/NBest/0/PronScore",
    "/PronunciationAssessment/PronScore",
    "/PronScore",
];
const FLUENCY_POINTERS: &[&str] = &[
    "/NBest/0/PronunciationAssessment/FluencyScore",
    "/NBest/0/FluencyScore",
    "/PronunciationAssessment/FluencyScore",
    "/FluencyScore",
];
const COMPLETENESS_POINTERS: &[&str] = &[
    "/NBest/0/PronunciationAssessment/CompletenessScore",
    "/NBest/0/CompletenessScore",
    "/PronunciationAssessment/CompletenessScore",
    "/CompletenessScore",
];

static ISOLATED_TONE_DIGIT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:^|[^0-9])([1-5])(?:[^0-9]|$)").unwrap());

pub const EN_HINT_ACCURACY: &str = "Try slower and enunciate the vowel sound";
pub const EN_HINT_FLUENCY: &str = "Try a steadier pace, less hesitation";
pub const EN_HINT_COMPLETENESS: &str = "Say the whole word clearly";
pub const EN_HINT_DEFAULT: &str = "Try a bit clearer and slower";
pub const ZH_HINT_ACCURACY: &str = "放慢一点，注意声母与韵母的发音";
pub const ZH_HINT_DEFAULT: &str = "注意声调变化，再试一次";

/// Percentage-scale sub-scores pulled out of an assessment document.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AssessmentScores {
    pub accuracy: Option<f64>,
    pub fluency: Option<f64>,
    pub completeness: Option<f64>,
}

impl AssessmentScores {
    pub fn extract(document: &Value) -> Self {
        Self {
            accuracy: first_number(document, ACCURACY_POINTERS)
                .or_else(|| first_number(document, OVERALL_POINTERS)),
            fluency: first_number(document, FLUENCY_POINTERS),
            completeness: first_number(document, COMPLETENESS_POINTERS),
        }
    }

    /// Accuracy on the [0, 1] scale, rounded to four decimals.
    pub fn unit_score(&self) -> f64 {
        let percent = self.accuracy.unwrap_or(0.0);
        ((percent / 100.0) * 10_000.0).round() / 10_000.0
    }
}

pub fn pass_threshold(language: &LanguageTag) -> f64 {
    if language.is_mandarin() {
        MANDARIN_PASS_THRESHOLD
    } else {
        DEFAULT_PASS_THRESHOLD
    }
}

/// Normalizes a structured assessment document. `expected_tone` comes from
/// the caller's own reading lookup; the heard tone is a heuristic scan.
pub fn assessment_verdict(
    document: &Value,
    language: &LanguageTag,
    expected_tone: Option<String>,
) -> Verdict {
    let scores = AssessmentScores::extract(document);
    let score = scores.unit_score();
    let pass = score >= pass_threshold(language);

    let tone = language
        .is_mandarin()
        .then(|| Tone::derived(expected_tone, heard_tone(document)));

    let hint = (!pass).then(|| fallback_hint(language, &scores).to_string());

    Verdict::new(pass, score, tone, hint)
}

pub fn fallback_hint(language: &LanguageTag, scores: &AssessmentScores) -> &'static str {
    let weak = |s: Option<f64>| s.is_some_and(|v| v < WEAK_SUBSCORE);
    let accuracy = Some(scores.accuracy.unwrap_or(0.0));

    if language.is_mandarin() {
        return if weak(accuracy) {
            ZH_HINT_ACCURACY
        } else {
            ZH_HINT_DEFAULT
        };
    }

    if weak(accuracy) {
        EN_HINT_ACCURACY
    } else if weak(scores.fluency) {
        EN_HINT_FLUENCY
    } else if weak(scores.completeness) {
        EN_HINT_COMPLETENESS
    } else {
        EN_HINT_DEFAULT
    }
}

/// Best-effort: first isolated tone digit in the syllable/phoneme breakdown.
pub fn heard_tone(document: &Value) -> Option<String> {
    let words = document.pointer("/NBest/0/Words")?.as_array()?;
    words.iter().find_map(|word| {
        ["Syllables", "Phonemes"]
            .iter()
            .filter_map(|list| word.get(*list).and_then(Value::as_array))
            .flatten()
            .filter_map(|unit| {
                unit.get("Syllable")
                    .or_else(|| unit.get("Phoneme"))
                    .and_then(Value::as_str)
            })
            .find_map(tone_digit)
    })
}

fn tone_digit(label: &str) -> Option<String> {
    ISOLATED_TONE_DIGIT
        .captures(label)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
}

fn first_number(document: &Value, pointers: &[&str]) -> Option<f64> {
    pointers.iter().find_map(|pointer| {
        let value = document.pointer(pointer)?;
        value
            .as_f64()
            .or_else(|| value.as_str().and_then(|s| s.trim().parse().ok()))
            .filter(|n: &f64| n.is_finite())
    })
}
