use async_trait::async_trait;

use crate::application::ports::{NumberForms, NumberNormalizer, NumberNormalizerError};

const ONES: [&str; 20] = [
    "zero",
    "one",
    "two",
    "three",
    "four",
    "five",
    "six",
    "seven",
    "eight",
    "nine",
    "ten",
    "eleven",
    "twelve",
    "thirteen",
    "fourteen",
    "fifteen",
    "sixteen",
    "seventeen",
    "eighteen",
    "nineteen",
];

const TENS: [&str; 10] = [
    "", "", "twenty", "thirty", "forty", "fifty", "sixty", "seventy", "eighty", "ninety",
];

/// Converts 0..=99 between digits and English words, e.g. `21` ↔ `twenty-one`.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnglishNumberNormalizer;

impl EnglishNumberNormalizer {
    pub fn to_words(n: u32) -> Option<String> {
        match n {
            0..=19 => Some(ONES[n as usize].to_string()),
            20..=99 => {
                let tens = TENS[(n / 10) as usize];
                match n % 10 {
                    0 => Some(tens.to_string()),
                    unit => Some(format!("{}-{}", tens, ONES[unit as usize])),
                }
            }
            _ => None,
        }
    }

    pub fn from_words(words: &str) -> Option<u32> {
        let lowered = words.trim().to_lowercase();
        let mut parts = lowered.split(['-', ' ']).filter(|p| !p.is_empty());
        let first = parts.next()?;
        let second = parts.next();
        if parts.next().is_some() {
            return None;
        }

        let ones = |w: &str| ONES.iter().position(|o| *o == w).map(|i| i as u32);
        let tens = |w: &str| {
            TENS.iter()
                .position(|t| !t.is_empty() && *t == w)
                .map(|i| i as u32 * 10)
        };

        match second {
            None => ones(first).or_else(|| tens(first)),
            Some(unit) => {
                let unit = ones(unit).filter(|u| (1..=9).contains(u))?;
                Some(tens(first)? + unit)
            }
        }
    }

    fn normalize(token: &str) -> NumberForms {
        let trimmed = token.trim();
        let value = if !trimmed.is_empty() && trimmed.chars().all(|c| c.is_ascii_digit()) {
            trimmed.parse::<u32>().ok()
        } else {
            Self::from_words(trimmed)
        };

        match value.and_then(|n| Self::to_words(n).map(|w| (n, w))) {
            Some((n, words)) => NumberForms {
                digit_form: Some(n.to_string()),
                word_form: Some(words),
            },
            None => NumberForms::default(),
        }
    }
}

#[async_trait]
impl NumberNormalizer for EnglishNumberNormalizer {
    async fn forms(&self, token: &str) -> Result<NumberForms, NumberNormalizerError> {
        Ok(Self::normalize(token))
    }
}
