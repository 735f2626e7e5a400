use std::collections::{BTreeSet, HashSet};
use std::sync::Arc;

use crate::application::ports::{
    HomophoneLookup, LookupCache, NumberForms, NumberNormalizer, PhoneticDataSource, ReadingMap,
};
use crate::domain::script::{contains_han, han_only, is_single_token, strip_trailing_punctuation};
use crate::domain::{
    EnEvidence, EvidenceMode, LanguageTag, MAX_EN_HOMOPHONES, PinyinSyllable, Reading,
    ZhEvidence, tone_label,
};

const READINGS_CACHE_KEY: &str = "readings";

/// Builds the sound-alike word sets handed to the judge. Every failure in
/// here degrades to less evidence; nothing is propagated.
pub struct PhoneticEvidenceService {
    phonetic_data: Arc<dyn PhoneticDataSource>,
    reading_cache: Arc<dyn LookupCache<Arc<ReadingMap>>>,
    shard_cache: Arc<dyn LookupCache<Arc<Vec<String>>>>,
    numbers: Arc<dyn NumberNormalizer>,
    homophones: Arc<dyn HomophoneLookup>,
}

impl PhoneticEvidenceService {
    pub fn new(
        phonetic_data: Arc<dyn PhoneticDataSource>,
        reading_cache: Arc<dyn LookupCache<Arc<ReadingMap>>>,
        shard_cache: Arc<dyn LookupCache<Arc<Vec<String>>>>,
        numbers: Arc<dyn NumberNormalizer>,
        homophones: Arc<dyn HomophoneLookup>,
    ) -> Self {
        Self {
            phonetic_data,
            reading_cache,
            shard_cache,
            numbers,
            homophones,
        }
    }

    pub async fn build_zh_evidence(
        &self,
        top_candidate: Option<&str>,
        language: &LanguageTag,
    ) -> Option<ZhEvidence> {
        if !language.is_mandarin() {
            return None;
        }
        let top = top_candidate?.trim();

        if contains_han(top) {
            let han = han_only(top);
            if han.chars().count() != 1 {
                return None;
            }
            return Some(self.single_char_evidence(han).await);
        }

        let syllable = PinyinSyllable::parse(top)?;
        Some(self.single_pinyin_evidence(top, syllable).await)
    }

    pub async fn build_en_evidence(
        &self,
        top_candidate: Option<&str>,
        language: &LanguageTag,
    ) -> Option<EnEvidence> {
        if !language.is_english() {
            return None;
        }
        let top = top_candidate?.trim();
        if !is_single_token(top) {
            return None;
        }
        let token = strip_trailing_punctuation(top);
        if token.is_empty() {
            return None;
        }

        let forms = match self.numbers.forms(token).await {
            Ok(forms) => forms,
            Err(e) => {
                tracing::warn!(error = %e, "Number normalization unavailable");
                NumberForms::default()
            }
        };

        let query = forms
            .word_form
            .clone()
            .or_else(|| token.chars().all(char::is_alphabetic).then(|| token.to_string()));

        let looked_up = match query.as_deref() {
            Some(word) => match self.homophones.homophones(word, MAX_EN_HOMOPHONES).await {
                Ok(words) => words,
                Err(e) => {
                    tracing::warn!(word = %word, error = %e, "Homophone lookup unavailable");
                    Vec::new()
                }
            },
            None => Vec::new(),
        };

        let homophones = merge_en_homophones(token, query.as_deref(), looked_up, &forms);

        Some(EnEvidence {
            input: token.to_string(),
            homophones,
            word_form: forms.word_form,
            digit_form: forms.digit_form,
        })
    }

    /// Readings for a single Han character, empty when unknown or unavailable.
    pub async fn readings_for(&self, character: &str) -> Vec<Reading> {
        match self.reading_map().await {
            Some(map) => map.get(character).cloned().unwrap_or_default(),
            None => Vec::new(),
        }
    }

    /// The tone of a single-character target, when it has exactly one.
    pub async fn expected_tone(&self, expected: &str) -> Option<String> {
        let han = han_only(expected);
        if han.chars().count() != 1 {
            return None;
        }
        let tones = distinct(self.readings_for(&han).await.into_iter().map(|r| r.tone));
        match tones.as_slice() {
            [only] => Some(only.clone()),
            _ => None,
        }
    }

    async fn single_char_evidence(&self, character: String) -> ZhEvidence {
        let readings = self.readings_for(&character).await;
        let bases = distinct(readings.iter().map(|r| r.sound.clone()));
        let tones = distinct(readings.iter().map(|r| r.tone.clone()));

        let mut homophones = BTreeSet::new();
        for base in &bases {
            if let Some(shard) = self.homophone_shard(base).await {
                homophones.extend(shard.iter().cloned());
            }
        }

        ZhEvidence {
            mode: EvidenceMode::SingleChar,
            input: character,
            bases,
            homophones: homophones.into_iter().collect(),
            tone_label: tone_label(&tones),
        }
    }

    async fn single_pinyin_evidence(&self, input: &str, syllable: PinyinSyllable) -> ZhEvidence {
        let homophones: BTreeSet<String> = self
            .homophone_shard(&syllable.base)
            .await
            .map(|shard| shard.iter().cloned().collect())
            .unwrap_or_default();

        ZhEvidence {
            mode: EvidenceMode::SinglePinyin,
            input: input.to_string(),
            bases: vec![syllable.base],
            homophones: homophones.into_iter().collect(),
            tone_label: syllable.tone,
        }
    }

    async fn reading_map(&self) -> Option<Arc<ReadingMap>> {
        if let Some(map) = self.reading_cache.get(READINGS_CACHE_KEY) {
            return Some(map);
        }
        let source = Arc::clone(&self.phonetic_data);
        let populate = Box::pin(async move { source.load_readings().await.map(Arc::new) });
        match self
            .reading_cache
            .get_or_populate(READINGS_CACHE_KEY, populate)
            .await
        {
            Ok(map) => Some(map),
            Err(e) => {
                tracing::warn!(error = %e, "Reading map unavailable");
                None
            }
        }
    }

    async fn homophone_shard(&self, base: &str) -> Option<Arc<Vec<String>>> {
        if let Some(shard) = self.shard_cache.get(base) {
            return Some(shard);
        }
        let source = Arc::clone(&self.phonetic_data);
        let key = base.to_string();
        let populate =
            Box::pin(async move { source.fetch_homophone_shard(&key).await.map(Arc::new) });
        match self.shard_cache.get_or_populate(base, populate).await {
            Ok(shard) => Some(shard),
            Err(e) => {
                tracing::warn!(base = %base, error = %e, "Homophone shard unavailable");
                None
            }
        }
    }
}

/// Lookup results first, then the word and digit spellings. Neither the
/// input nor the word it was looked up under ever appears. Case-insensitive, capped.
fn merge_en_homophones(
    input: &str,
    query: Option<&str>,
    looked_up: Vec<String>,
    forms: &NumberForms,
) -> Vec<String> {
    let mut seen = HashSet::new();
    seen.insert(input.to_lowercase());
    if let Some(word) = query {
        seen.insert(word.trim().to_lowercase());
    }

    looked_up
        .into_iter()
        .chain(forms.word_form.clone())
        .chain(forms.digit_form.clone())
        .map(|word| word.trim().to_string())
        .filter(|word| !word.is_empty() && seen.insert(word.to_lowercase()))
        .take(MAX_EN_HOMOPHONES)
        .collect()
}

fn distinct(values: impl Iterator<Item = String>) -> Vec<String> {
    let mut seen = HashSet::new();
    values
        .filter(|v| !v.is_empty() && seen.insert(v.clone()))
        .collect()
}
