use std::fmt;

use super::candidate_list::CandidateList;

/// Which recognition backend handles a request. Unknown names select `Primary`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RecognitionProvider {
    #[default]
    Primary,
    Secondary,
}

impl RecognitionProvider {
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.map(|s| s.trim().to_lowercase()).as_deref() {
            Some("azure" | "azure-speech" | "secondary" | "speech") => Self::Secondary,
            _ => Self::Primary,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Primary => "openai",
            Self::Secondary => "azure",
        }
    }
}

impl fmt::Display for RecognitionProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Recognition modes of the speech REST API, tried in this order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecognitionMode {
    Conversation,
    Interactive,
    Dictation,
}

impl RecognitionMode {
    pub const FALLBACK_ORDER: [RecognitionMode; 3] =
        [Self::Conversation, Self::Interactive, Self::Dictation];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Conversation => "conversation",
            Self::Interactive => "interactive",
            Self::Dictation => "dictation",
        }
    }
}

impl fmt::Display for RecognitionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Recognition {
    pub candidates: CandidateList,
    pub provider_used: RecognitionProvider,
}

impl Recognition {
    pub fn no_speech(provider_used: RecognitionProvider) -> Self {
        Self {
            candidates: CandidateList::default(),
            provider_used,
        }
    }
}
