mod environment;
mod settings;

pub use environment::{ENVIRONMENT_VAR, Environment};
pub use settings::{
    ExtractionSettings, GenerationSettings, LlmProvider, LlmSettings, LoggingSettings,
    ServerSettings, Settings, StorageSettings, WorkerSettings,
};
