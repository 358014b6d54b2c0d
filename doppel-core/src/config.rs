use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    pub chat: ChatDefaults,
    pub speech: SpeechDefaults,

    // Secrets are stored outside this struct at rest.
    #[serde(skip)]
    pub api_key_present: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatDefaults {
    pub base_url: String,
    pub model: String,
}

impl Default for ChatDefaults {
    fn default() -> Self {
        Self {
            base_url: "https://api.openai.com/v1".into(),
            model: "gpt-4o".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpeechDefaults {
    /// Speaking replies is opt-in; transcription is always available.
    pub enabled: bool,
    pub voice: String,
    pub synthesis_model: String,
    pub transcription_model: String,
}

impl Default for SpeechDefaults {
    fn default() -> Self {
        Self {
            enabled: false,
            voice: "alloy".into(),
            synthesis_model: "tts-1".into(),
            transcription_model: "whisper-1".into(),
        }
    }
}
