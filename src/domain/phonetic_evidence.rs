use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use unicode_normalization::UnicodeNormalization;

pub const MAX_EN_HOMOPHONES: usize = 30;

static PINYIN_SYLLABLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([a-z]{1,6})([1-5])?$").unwrap());

/// One known pronunciation of a Han character, e.g. `ma` + `3`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reading {
    pub sound: String,
    pub tone: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EvidenceMode {
    #[serde(rename = "singleChar")]
    SingleChar,
    #[serde(rename = "singlePinyin")]
    SinglePinyin,
}

/// Mandarin sound-alike evidence for the top candidate.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ZhEvidence {
    pub mode: EvidenceMode,
    pub input: String,
    pub bases: Vec<String>,
    pub homophones: Vec<String>,
    pub tone_label: Option<String>,
}

/// English sound-alike evidence for a single-word candidate.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnEvidence {
    pub input: String,
    pub homophones: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub word_form: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub digit_form: Option<String>,
}

/// A romanized syllable split into its toneless base and optional tone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PinyinSyllable {
    pub base: String,
    pub tone: Option<String>,
}

impl PinyinSyllable {
    /// Accepts `ma3`, `ma`, or diacritic forms like `mǎ`; anything else is `None`.
    pub fn parse(token: &str) -> Option<Self> {
        let ascii = to_tone_digit_form(&token.trim().to_lowercase());
        let captures = PINYIN_SYLLABLE.captures(&ascii)?;
        Some(Self {
            base: captures.get(1)?.as_str().to_string(),
            tone: captures.get(2).map(|m| m.as_str().to_string()),
        })
    }
}

/// `mǎ` → `ma3`, `lǜ` → `lv4`. Input without tone marks is returned as is.
pub fn to_tone_digit_form(syllable: &str) -> String {
    let mut letters = String::with_capacity(syllable.len());
    let mut tone = None;

    for c in syllable.nfd() {
        match c {
            '\u{0304}' => tone = Some('1'),
            '\u{0301}' => tone = Some('2'),
            '\u{030C}' => tone = Some('3'),
            '\u{0300}' => tone = Some('4'),
            '\u{0308}' => {
                if letters.ends_with('u') {
                    letters.pop();
                    letters.push('v');
                }
            }
            other => letters.push(other),
        }
    }

    if let Some(t) = tone {
        letters.push(t);
    }
    letters
}

/// Tone label for a set of distinct tones: `3`, or `2/4` when ambiguous.
pub fn tone_label(tones: &[String]) -> Option<String> {
    if tones.is_empty() {
        None
    } else {
        Some(tones.join("/"))
    }
}
