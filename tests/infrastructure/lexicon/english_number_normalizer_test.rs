use pronunciation_relay::application::ports::{NumberForms, NumberNormalizer};
use pronunciation_relay::infrastructure::lexicon::EnglishNumberNormalizer;

fn forms(digit: &str, word: &str) -> NumberForms {
    NumberForms {
        digit_form: Some(digit.to_string()),
        word_form: Some(word.to_string()),
    }
}

#[tokio::test]
async fn given_digit_token_when_normalizing_then_both_forms_are_returned() {
    let normalizer = EnglishNumberNormalizer;

    assert_eq!(normalizer.forms("7").await.unwrap(), forms("7", "seven"));
    assert_eq!(normalizer.forms("42").await.unwrap(), forms("42", "forty-two"));
    assert_eq!(normalizer.forms("90").await.unwrap(), forms("90", "ninety"));
}

#[tokio::test]
async fn given_word_token_when_normalizing_then_both_forms_are_returned() {
    let normalizer = EnglishNumberNormalizer;

    assert_eq!(normalizer.forms("Seven").await.unwrap(), forms("7", "seven"));
    assert_eq!(
        normalizer.forms("twenty one").await.unwrap(),
        forms("21", "twenty-one")
    );
    assert_eq!(normalizer.forms("zero").await.unwrap(), forms("0", "zero"));
}

#[tokio::test]
async fn given_non_number_token_when_normalizing_then_forms_are_empty() {
    let normalizer = EnglishNumberNormalizer;

    assert_eq!(normalizer.forms("bear").await.unwrap(), NumberForms::default());
    assert_eq!(normalizer.forms("100").await.unwrap(), NumberForms::default());
    assert_eq!(normalizer.forms("").await.unwrap(), NumberForms::default());
}

#[test]
fn given_invalid_compounds_when_parsing_words_then_none_is_returned() {
    assert_eq!(EnglishNumberNormalizer::from_words("twenty-zero"), None);
    assert_eq!(EnglishNumberNormalizer::from_words("seven-twenty"), None);
    assert_eq!(EnglishNumberNormalizer::from_words("one two three"), None);
    assert_eq!(EnglishNumberNormalizer::from_words("thirteen"), Some(13));
}

#[test]
fn given_boundaries_when_spelling_then_range_is_respected() {
    assert_eq!(EnglishNumberNormalizer::to_words(19).as_deref(), Some("nineteen"));
    assert_eq!(EnglishNumberNormalizer::to_words(99).as_deref(), Some("ninety-nine"));
    assert_eq!(EnglishNumberNormalizer::to_words(100), None);
}
