mod openai_judge_client;

pub use openai_judge_client::{DEFAULT_AUDIO_JUDGE_MODEL, DEFAULT_JUDGE_MODEL, OpenAiJudgeClient};
