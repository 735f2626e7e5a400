use serde::Serialize;
use serde_json::Value;

pub const MAX_HINT_CHARS: usize = 120;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Tone {
    pub expected: Option<String>,
    pub heard: Option<String>,
    #[serde(rename = "match")]
    pub matches: Option<bool>,
}

impl Tone {
    /// Builds a tone whose match is derived from the two markers: known only
    /// when both sides are present.
    pub fn derived(expected: Option<String>, heard: Option<String>) -> Self {
        let matches = match (&expected, &heard) {
            (Some(e), Some(h)) => Some(e == h),
            _ => None,
        };
        Self {
            expected,
            heard,
            matches,
        }
    }

    pub fn from_value(value: &Value) -> Option<Self> {
        let object = value.as_object()?;
        let expected = object.get("expected").and_then(stringify);
        let heard = object.get("heard").and_then(stringify);
        match object.get("match") {
            Some(Value::Bool(explicit)) => Some(Self {
                expected,
                heard,
                matches: Some(*explicit),
            }),
            _ => Some(Self::derived(expected, heard)),
        }
    }
}

/// Canonical grading result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Verdict {
    pub pass: bool,
    pub score: f64,
    pub tone: Option<Tone>,
    pub hint: Option<String>,
}

impl Default for Verdict {
    fn default() -> Self {
        Self {
            pass: false,
            score: 0.0,
            tone: None,
            hint: None,
        }
    }
}

impl Verdict {
    pub fn new(pass: bool, score: f64, tone: Option<Tone>, hint: Option<String>) -> Self {
        Self {
            pass,
            score: clamp_score(score),
            tone,
            hint: hint.map(|h| truncate_hint(&h)),
        }
    }

    /// Coerces an arbitrarily shaped judge document into a verdict. Absent or
    /// mistyped fields fall back to the conservative defaults.
    pub fn from_judge_value(value: &Value) -> Self {
        let field = |name: &str| value.get(name).unwrap_or(&Value::Null);
        Self {
            pass: is_truthy(field("pass")),
            score: clamp_score(coerce_number(field("score"))),
            tone: Tone::from_value(field("tone")),
            hint: field("hint").as_str().map(truncate_hint),
        }
    }

    /// Parses raw judge output. Unparseable text yields the default verdict.
    pub fn from_judge_text(raw: &str) -> Self {
        match serde_json::from_str::<Value>(strip_code_fence(raw)) {
            Ok(value) => Self::from_judge_value(&value),
            Err(e) => {
                tracing::warn!(error = %e, "Judge output is not valid JSON, using default verdict");
                Self::default()
            }
        }
    }
}

/// Maps any input to a finite score in [0, 1]; non-finite becomes 0.
pub fn clamp_score(score: f64) -> f64 {
    if score.is_finite() {
        score.clamp(0.0, 1.0)
    } else {
        0.0
    }
}

pub fn truncate_hint(hint: &str) -> String {
    hint.chars().take(MAX_HINT_CHARS).collect()
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn coerce_number(value: &Value) -> f64 {
    match value {
        Value::Number(n) => n.as_f64().unwrap_or(f64::NAN),
        Value::String(s) if s.trim().is_empty() => 0.0,
        Value::String(s) => s.trim().parse().unwrap_or(f64::NAN),
        Value::Bool(b) => f64::from(u8::from(*b)),
        _ => f64::NAN,
    }
}

fn stringify(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(
            n.as_i64()
                .map(|i| i.to_string())
                .unwrap_or_else(|| n.to_string()),
        ),
        other => Some(other.to_string()),
    }
}

fn strip_code_fence(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let body = rest.trim_start_matches(|c: char| c.is_ascii_alphabetic());
    body.strip_suffix("```").unwrap_or(body).trim()
}
