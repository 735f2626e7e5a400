use std::fmt;

pub const DEFAULT_LANGUAGE: &str = "en-US";

const ISO_639_1_OVERRIDES: &[(&str, &str)] = &[
    ("zh-cn", "zh"),
    ("zh-tw", "zh"),
    ("zh-hk", "zh"),
    ("cmn", "zh"),
    ("yue", "zh"),
    ("yue-hk", "zh"),
    ("fil", "tl"),
    ("nb", "no"),
    ("nn", "no"),
    ("iw", "he"),
    ("in", "id"),
];

/// A BCP-47 language tag as sent by the client, e.g. `zh-CN` or `en-US`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageTag(String);

impl LanguageTag {
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.map(str::trim).filter(|s| !s.is_empty()) {
            Some(tag) => Self(tag.replace('_', "-")),
            None => Self(DEFAULT_LANGUAGE.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Lowercased portion before the first hyphen.
    pub fn primary(&self) -> String {
        self.0
            .split('-')
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase()
    }

    pub fn is_mandarin(&self) -> bool {
        self.primary() == "zh"
    }

    pub fn is_english(&self) -> bool {
        self.primary() == "en"
    }

    pub fn is_cjk(&self) -> bool {
        matches!(self.primary().as_str(), "zh" | "ja" | "ko")
    }

    /// Two-letter code passed to transcription backends as a language hint.
    pub fn iso639_1(&self) -> String {
        let lowered = self.0.to_ascii_lowercase();
        ISO_639_1_OVERRIDES
            .iter()
            .find(|(tag, _)| *tag == lowered)
            .map(|(_, code)| code.to_string())
            .unwrap_or_else(|| self.primary())
    }
}

impl Default for LanguageTag {
    fn default() -> Self {
        Self(DEFAULT_LANGUAGE.to_string())
    }
}

impl fmt::Display for LanguageTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
