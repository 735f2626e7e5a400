mod environment;
mod settings;

pub use environment::Environment;
pub use settings::{
    AzureSpeechSettings, HomophoneSettings, LoggingSettings, OpenAiSettings, PhoneticsSettings,
    ServerSettings, Settings, TimeoutSettings,
};
