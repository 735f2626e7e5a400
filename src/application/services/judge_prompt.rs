use base64::{Engine as _, engine::general_purpose};
use serde_json::json;

use crate::application::ports::{InputAudio, JudgePrompt};
use crate::domain::{AudioClip, CandidateList, EnEvidence, LanguageTag, ZhEvidence};

const VERDICT_SCHEMA_INSTRUCTIONS: &str = r#"You grade a language learner's pronunciation of a target word or phrase.
Reply with a single JSON object and nothing else:
{"pass": boolean, "score": number between 0 and 1, "tone": {"expected": "1"-"5" or null, "heard": "1"-"5" or null, "match": boolean or null} or null, "hint": string or null}
Rules:
- "tone" is only for tonal languages; use null otherwise.
- "hint" is one short corrective tip of at most 80 characters, null when the attempt passes.
- Treat homophones and sound-alike spellings of the target as correct pronunciations."#;

/// Prompt for grading from recognition output plus phonetic evidence.
pub fn build_evidence_prompt(
    expected: &str,
    language: &LanguageTag,
    candidates: &CandidateList,
    zh_evidence: Option<&ZhEvidence>,
    en_evidence: Option<&EnEvidence>,
) -> JudgePrompt {
    let evidence = json!({
        "target": expected,
        "language": language.as_str(),
        "transcriptTop": candidates.top().unwrap_or_default(),
        "candidates": candidates.as_slice(),
        "zhAugment": zh_evidence,
        "enHomophones": en_evidence,
    });

    let user = format!(
        "Target: \"{}\" ({}).\nThe speech recognizer heard the candidates below, best first, \
         with sound-alike evidence for the top one.\n{}",
        expected,
        language,
        serde_json::to_string_pretty(&evidence).unwrap_or_else(|_| evidence.to_string()),
    );

    JudgePrompt {
        system: VERDICT_SCHEMA_INSTRUCTIONS.to_string(),
        user,
        audio: None,
    }
}

/// Prompt for grading directly from the recording. `None` when the clip's
/// format cannot be attached as input audio.
pub fn build_audio_prompt(
    expected: &str,
    language: &LanguageTag,
    clip: &AudioClip,
) -> Option<JudgePrompt> {
    let format = clip.input_audio_format()?;
    let user = format!(
        "Target: \"{}\" ({}). Listen to the attached recording and grade how the learner said the target.",
        expected, language,
    );

    Some(JudgePrompt {
        system: VERDICT_SCHEMA_INSTRUCTIONS.to_string(),
        user,
        audio: Some(InputAudio {
            base64_data: general_purpose::STANDARD.encode(&clip.bytes),
            format,
        }),
    })
}
