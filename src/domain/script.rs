use std::sync::LazyLock;

use regex::Regex;

static HAN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\p{Han}").unwrap());
static CJK_SCRIPT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\p{Han}\p{Hiragana}\p{Katakana}\p{Hangul}]").unwrap());
static LATIN_LETTER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\p{Latin}").unwrap());

const TERMINAL_PUNCTUATION: &[char] = &[
    '.', '!', '?', ',', ';', ':', '…', '。', '！', '？', '，', '、', '；', '：', '．',
];

pub fn is_terminal_punctuation(c: char) -> bool {
    TERMINAL_PUNCTUATION.contains(&c)
}

pub fn strip_trailing_punctuation(text: &str) -> &str {
    text.trim_end_matches(is_terminal_punctuation)
}

pub fn is_single_token(text: &str) -> bool {
    !text.chars().any(char::is_whitespace)
}

pub fn contains_han(text: &str) -> bool {
    HAN.is_match(text)
}

pub fn contains_cjk_script(text: &str) -> bool {
    CJK_SCRIPT.is_match(text)
}

pub fn contains_latin_letter(text: &str) -> bool {
    LATIN_LETTER.is_match(text)
}

/// Keeps only the Han characters of `text`, in order.
pub fn han_only(text: &str) -> String {
    HAN.find_iter(text).map(|m| m.as_str()).collect()
}
