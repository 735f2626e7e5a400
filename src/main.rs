use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;

use pronunciation_relay::application::ports::ReadingMap;
use pronunciation_relay::application::services::{
    GradingService, PhoneticEvidenceService, RecognitionService,
};
use pronunciation_relay::infrastructure::audio::{
    AzurePronunciationAssessor, AzureSpeechEndpoint, AzureSpeechEngine, OpenAiWhisperEngine,
};
use pronunciation_relay::infrastructure::lexicon::{DatamuseClient, EnglishNumberNormalizer};
use pronunciation_relay::infrastructure::llm::OpenAiJudgeClient;
use pronunciation_relay::infrastructure::observability::{TracingConfig, init_tracing};
use pronunciation_relay::infrastructure::phonetics::{
    HttpPhoneticDataSource, InMemoryLookupCache,
};
use pronunciation_relay::presentation::{AppState, Settings, create_router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::load().context("failed to load settings")?;
    let environment = settings
        .environment()
        .map_err(anyhow::Error::msg)
        .context("invalid environment")?;

    let tracing_config = TracingConfig::from_logging(
        environment.as_str(),
        &settings.logging.level,
        settings.logging.enable_json || environment.prefers_json_logs(),
    );
    init_tracing(&tracing_config, settings.server.port);

    if settings.openai.api_key.is_empty() {
        tracing::warn!("OPENAI_API_KEY is not set; primary recognition and judging will fail");
    }
    if settings.azure_speech.key.is_empty() {
        tracing::warn!("AZURE_SPEECH_KEY is not set; secondary recognition and assessment will fail");
    }

    let timeouts = &settings.timeouts;
    let speech_endpoint = match &settings.azure_speech.endpoint {
        Some(url) if !url.is_empty() => AzureSpeechEndpoint::new(url),
        _ => AzureSpeechEndpoint::for_region(&settings.azure_speech.region),
    };

    let recognition = Arc::new(RecognitionService::new(
        Arc::new(OpenAiWhisperEngine::new(
            settings.openai.api_key.clone(),
            Some(settings.openai.base_url.clone()),
            Some(settings.openai.transcription_model.clone()),
            timeouts.recognition(),
        )),
        Arc::new(AzureSpeechEngine::new(
            speech_endpoint.clone(),
            &settings.azure_speech.key,
            timeouts.recognition(),
        )),
    ));

    let evidence = Arc::new(PhoneticEvidenceService::new(
        Arc::new(HttpPhoneticDataSource::new(
            &settings.phonetics.readings_url,
            &settings.phonetics.shards_base_url,
            timeouts.lookup(),
        )),
        Arc::new(InMemoryLookupCache::<Arc<ReadingMap>>::new()),
        Arc::new(InMemoryLookupCache::<Arc<Vec<String>>>::new()),
        Arc::new(EnglishNumberNormalizer),
        Arc::new(DatamuseClient::new(
            &settings.homophones.datamuse_url,
            timeouts.lookup(),
        )),
    ));

    let judge = Arc::new(OpenAiJudgeClient::new(
        settings.openai.api_key.clone(),
        &settings.openai.base_url,
        settings.openai.judge_model.clone(),
        timeouts.judge(),
    ));
    let audio_judge = Arc::new(OpenAiJudgeClient::new(
        settings.openai.api_key.clone(),
        &settings.openai.base_url,
        settings.openai.audio_judge_model.clone(),
        timeouts.judge(),
    ));
    let assessor = Arc::new(AzurePronunciationAssessor::new(
        speech_endpoint,
        &settings.azure_speech.key,
        timeouts.judge(),
    ));

    let grading_service = Arc::new(GradingService::new(
        recognition,
        evidence,
        judge,
        audio_judge,
        assessor,
    ));

    let state = AppState::new(grading_service, settings.server.max_upload_bytes);
    let router = create_router(state);

    let addr: SocketAddr = format!("{}:{}", settings.server.host, settings.server.port)
        .parse()
        .context("invalid server address")?;
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
