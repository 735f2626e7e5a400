use super::language_tag::LanguageTag;
use super::script::{
    contains_cjk_script, contains_latin_letter, is_single_token, strip_trailing_punctuation,
};

/// Recognition candidates, best first, after normalization.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CandidateList(Vec<String>);

impl CandidateList {
    /// Trims each raw transcript, strips trailing sentence punctuation from
    /// single-token utterances and drops what ends up empty.
    pub fn normalize<I, S>(raw: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let candidates = raw
            .into_iter()
            .filter_map(|candidate| {
                let trimmed = candidate.as_ref().trim();
                let cleaned = if is_single_token(trimmed) {
                    strip_trailing_punctuation(trimmed)
                } else {
                    trimmed
                };
                (!cleaned.is_empty()).then(|| cleaned.to_string())
            })
            .collect();
        Self(candidates)
    }

    /// For zh/ja/ko drops candidates that carry Latin letters but no
    /// Han/Kana/Hangul. Never falls back to the unfiltered list.
    pub fn filter_for_language(self, language: &LanguageTag) -> Self {
        if !language.is_cjk() {
            return self;
        }
        let kept = self
            .0
            .into_iter()
            .filter(|candidate| {
                !(contains_latin_letter(candidate) && !contains_cjk_script(candidate))
            })
            .collect();
        Self(kept)
    }

    pub fn top(&self) -> Option<&str> {
        self.0.first().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn into_vec(self) -> Vec<String> {
        self.0
    }
}

impl From<Vec<String>> for CandidateList {
    fn from(candidates: Vec<String>) -> Self {
        Self(candidates)
    }
}
