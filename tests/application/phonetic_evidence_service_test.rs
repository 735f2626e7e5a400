use std::sync::Arc;
use std::sync::atomic::Ordering;

use pronunciation_relay::application::services::PhoneticEvidenceService;
use pronunciation_relay::domain::{EvidenceMode, LanguageTag, Reading};
use pronunciation_relay::infrastructure::phonetics::InMemoryLookupCache;

use crate::helpers::mocks::{
    FailingNumberNormalizer, FakePhoneticData, StubHomophoneLookup, evidence_service,
};

fn zh() -> LanguageTag {
    LanguageTag::parse(Some("zh-CN"))
}

fn en() -> LanguageTag {
    LanguageTag::parse(Some("en-US"))
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[tokio::test]
async fn given_single_han_character_when_building_zh_evidence_then_shard_is_unioned() {
    let service = evidence_service(
        Arc::new(FakePhoneticData::ma()),
        Arc::new(StubHomophoneLookup::returning(&[])),
    );

    let evidence = service.build_zh_evidence(Some("马"), &zh()).await.unwrap();

    assert_eq!(evidence.mode, EvidenceMode::SingleChar);
    assert_eq!(evidence.input, "马");
    assert_eq!(evidence.bases, strings(&["ma"]));
    assert_eq!(evidence.tone_label.as_deref(), Some("3"));
    let mut expected = strings(&["马", "吗", "妈", "码"]);
    expected.sort();
    assert_eq!(evidence.homophones, expected);
}

#[tokio::test]
async fn given_han_with_noise_when_building_zh_evidence_then_noise_is_stripped() {
    let service = evidence_service(
        Arc::new(FakePhoneticData::ma()),
        Arc::new(StubHomophoneLookup::returning(&[])),
    );

    let evidence = service.build_zh_evidence(Some(" 马。"), &zh()).await.unwrap();

    assert_eq!(evidence.input, "马");
}

#[tokio::test]
async fn given_polyphonic_character_when_building_zh_evidence_then_all_bases_are_used() {
    let service = evidence_service(
        Arc::new(FakePhoneticData::ma()),
        Arc::new(StubHomophoneLookup::returning(&[])),
    );

    let evidence = service.build_zh_evidence(Some("行"), &zh()).await.unwrap();

    assert_eq!(evidence.bases, strings(&["xing", "hang"]));
    assert_eq!(evidence.tone_label.as_deref(), Some("2"));
    let mut expected = strings(&["行", "星", "航"]);
    expected.sort();
    assert_eq!(evidence.homophones, expected);
}

#[tokio::test]
async fn given_phrase_when_building_zh_evidence_then_none_is_returned() {
    let service = evidence_service(
        Arc::new(FakePhoneticData::ma()),
        Arc::new(StubHomophoneLookup::returning(&[])),
    );

    assert_eq!(service.build_zh_evidence(Some("你好"), &zh()).await, None);
    assert_eq!(service.build_zh_evidence(Some("马"), &en()).await, None);
    assert_eq!(service.build_zh_evidence(None, &zh()).await, None);
}

#[tokio::test]
async fn given_romanized_syllable_when_building_zh_evidence_then_single_pinyin_is_used() {
    let service = evidence_service(
        Arc::new(FakePhoneticData::ma()),
        Arc::new(StubHomophoneLookup::returning(&[])),
    );

    let evidence = service.build_zh_evidence(Some("mǎ"), &zh()).await.unwrap();

    assert_eq!(evidence.mode, EvidenceMode::SinglePinyin);
    assert_eq!(evidence.bases, strings(&["ma"]));
    assert_eq!(evidence.tone_label.as_deref(), Some("3"));
    assert_eq!(evidence.homophones.len(), 4);
}

#[tokio::test]
async fn given_unreachable_phonetic_data_when_building_zh_evidence_then_evidence_is_empty() {
    let service = evidence_service(
        Arc::new(FakePhoneticData::unavailable()),
        Arc::new(StubHomophoneLookup::returning(&[])),
    );

    let evidence = service.build_zh_evidence(Some("马"), &zh()).await.unwrap();

    assert!(evidence.bases.is_empty());
    assert!(evidence.homophones.is_empty());
    assert_eq!(evidence.tone_label, None);
}

#[tokio::test]
async fn given_repeated_lookups_when_building_zh_evidence_then_sources_are_fetched_once() {
    let data = Arc::new(FakePhoneticData::ma());
    let service = evidence_service(data.clone(), Arc::new(StubHomophoneLookup::returning(&[])));

    for _ in 0..3 {
        service.build_zh_evidence(Some("马"), &zh()).await.unwrap();
    }

    assert_eq!(data.reading_loads.load(Ordering::SeqCst), 1);
    assert_eq!(data.shard_fetches.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn given_failed_reading_load_when_retrying_then_source_is_asked_again() {
    let data = Arc::new(FakePhoneticData::unavailable());
    let service = evidence_service(data.clone(), Arc::new(StubHomophoneLookup::returning(&[])));

    service.readings_for("马").await;
    service.readings_for("马").await;

    assert_eq!(data.reading_loads.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn given_digit_candidate_when_building_en_evidence_then_spelled_target_is_not_a_homophone() {
    let homophones = Arc::new(StubHomophoneLookup::returning(&[]));
    let service = evidence_service(Arc::new(FakePhoneticData::ma()), homophones.clone());

    let evidence = service.build_en_evidence(Some("7"), &en()).await.unwrap();

    assert_eq!(evidence.input, "7");
    assert_eq!(evidence.word_form.as_deref(), Some("seven"));
    assert_eq!(evidence.digit_form.as_deref(), Some("7"));
    assert!(evidence.homophones.is_empty());
    assert_eq!(homophones.queries(), strings(&["seven"]));
}

#[tokio::test]
async fn given_digit_candidate_with_lookup_echoing_word_when_building_en_evidence_then_word_is_dropped() {
    let homophones = Arc::new(StubHomophoneLookup::returning(&["Seven", "sevin"]));
    let service = evidence_service(Arc::new(FakePhoneticData::ma()), homophones);

    let evidence = service.build_en_evidence(Some("7"), &en()).await.unwrap();

    assert!(!evidence.homophones.iter().any(|h| h.eq_ignore_ascii_case("seven")));
    assert_eq!(evidence.homophones, strings(&["sevin"]));
}

#[tokio::test]
async fn given_word_candidate_when_building_en_evidence_then_input_is_excluded() {
    let homophones = Arc::new(StubHomophoneLookup::returning(&["Seven", "sevin"]));
    let service = evidence_service(Arc::new(FakePhoneticData::ma()), homophones);

    let evidence = service.build_en_evidence(Some("seven."), &en()).await.unwrap();

    assert_eq!(evidence.input, "seven");
    assert_eq!(evidence.homophones, strings(&["sevin", "7"]));
}

#[tokio::test]
async fn given_plain_word_when_building_en_evidence_then_lookup_results_are_kept_in_order() {
    let homophones = Arc::new(StubHomophoneLookup::returning(&["bare", "bair", "bare"]));
    let service = evidence_service(Arc::new(FakePhoneticData::ma()), homophones);

    let evidence = service.build_en_evidence(Some("bear"), &en()).await.unwrap();

    assert_eq!(evidence.homophones, strings(&["bare", "bair"]));
    assert_eq!(evidence.word_form, None);
    assert_eq!(evidence.digit_form, None);
}

#[tokio::test]
async fn given_many_lookup_results_when_building_en_evidence_then_list_is_capped() {
    let homophones = Arc::new(StubHomophoneLookup {
        words: Some((0..40).map(|i| format!("word{i}")).collect()),
        queries: Default::default(),
    });
    let service = evidence_service(Arc::new(FakePhoneticData::ma()), homophones);

    let evidence = service.build_en_evidence(Some("bear"), &en()).await.unwrap();

    assert_eq!(evidence.homophones.len(), 30);
}

#[tokio::test]
async fn given_both_collaborators_failing_when_building_en_evidence_then_evidence_is_empty() {
    let service = PhoneticEvidenceService::new(
        Arc::new(FakePhoneticData::ma()),
        Arc::new(InMemoryLookupCache::new()),
        Arc::new(InMemoryLookupCache::new()),
        Arc::new(FailingNumberNormalizer),
        Arc::new(StubHomophoneLookup::failing()),
    );

    let evidence = service.build_en_evidence(Some("7"), &en()).await.unwrap();

    assert_eq!(evidence.input, "7");
    assert!(evidence.homophones.is_empty());
    assert_eq!(evidence.word_form, None);
}

#[tokio::test]
async fn given_multi_word_candidate_when_building_en_evidence_then_none_is_returned() {
    let homophones = Arc::new(StubHomophoneLookup::returning(&["x"]));
    let service = evidence_service(Arc::new(FakePhoneticData::ma()), homophones.clone());

    assert_eq!(service.build_en_evidence(Some("two words"), &en()).await, None);
    assert_eq!(service.build_en_evidence(Some("hi"), &zh()).await, None);
    assert!(homophones.queries().is_empty());
}

#[tokio::test]
async fn given_single_reading_character_when_asking_expected_tone_then_tone_is_returned() {
    let service = evidence_service(
        Arc::new(FakePhoneticData::ma()),
        Arc::new(StubHomophoneLookup::returning(&[])),
    );

    assert_eq!(service.expected_tone("马").await.as_deref(), Some("3"));
    assert_eq!(service.expected_tone("马马").await, None);
    assert_eq!(
        service.readings_for("行").await,
        vec![
            Reading {
                sound: "xing".into(),
                tone: "2".into()
            },
            Reading {
                sound: "hang".into(),
                tone: "2".into()
            },
        ]
    );
}
