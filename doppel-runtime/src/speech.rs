use doppel_engine::traits::{RecordedAudio, SpeechSynthesizer, SynthesizedSpeech, Transcriber};
use doppel_providers::openai::{
    AudioUpload, SpeechEndpointConfig, TranscriptionEndpointConfig, build_speech_request,
    build_transcription_request,
};
use doppel_providers::parse::parse_transcription;
use doppel_providers::runtime::execute;

/// Speech synthesis backed by an OpenAI-style `/audio/speech` endpoint.
#[derive(Clone)]
pub struct OpenAiSpeechSynthesizer {
    cfg: SpeechEndpointConfig,
}

impl std::fmt::Debug for OpenAiSpeechSynthesizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiSpeechSynthesizer")
            .field("base_url", &self.cfg.base_url)
            .field("model", &self.cfg.model)
            .field("voice", &self.cfg.voice)
            .field("api_key", &"[REDACTED]")
            .finish()
    }
}

impl OpenAiSpeechSynthesizer {
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        model: impl Into<String>,
        voice: impl Into<String>,
    ) -> Self {
        Self {
            cfg: SpeechEndpointConfig {
                base_url: base_url.into(),
                api_key: api_key.into(),
                model: model.into(),
                voice: voice.into(),
            },
        }
    }
}

#[async_trait::async_trait]
impl SpeechSynthesizer for OpenAiSpeechSynthesizer {
    async fn synthesize(&self, text: &str) -> anyhow::Result<SynthesizedSpeech> {
        if self.cfg.api_key.trim().is_empty() {
            return Err(anyhow::anyhow!("missing OpenAI API key"));
        }

        let req = build_speech_request(&self.cfg, text);
        let resp = execute(&req).await?;
        if !resp.is_success() {
            return Err(anyhow::anyhow!(
                "speech synthesis failed: {}",
                resp.error_excerpt()
            ));
        }

        // A 200 carrying JSON is an error shape, not audio.
        let mime_type = resp
            .content_type
            .clone()
            .unwrap_or_else(|| "audio/mpeg".to_string());
        if mime_type.starts_with("application/json") {
            return Err(anyhow::anyhow!(
                "speech endpoint returned JSON instead of audio: {}",
                resp.error_excerpt()
            ));
        }

        Ok(SynthesizedSpeech {
            mime_type,
            bytes: resp.body,
        })
    }
}

/// Transcription backed by an OpenAI-style `/audio/transcriptions` endpoint.
#[derive(Clone)]
pub struct OpenAiTranscriber {
    cfg: TranscriptionEndpointConfig,
}

impl std::fmt::Debug for OpenAiTranscriber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiTranscriber")
            .field("base_url", &self.cfg.base_url)
            .field("model", &self.cfg.model)
            .field("api_key", &"[REDACTED]")
            .finish()
    }
}

impl OpenAiTranscriber {
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            cfg: TranscriptionEndpointConfig {
                base_url: base_url.into(),
                api_key: api_key.into(),
                model: model.into(),
            },
        }
    }
}

#[async_trait::async_trait]
impl Transcriber for OpenAiTranscriber {
    async fn transcribe(&self, audio: &RecordedAudio) -> anyhow::Result<String> {
        if self.cfg.api_key.trim().is_empty() {
            return Err(anyhow::anyhow!("missing OpenAI API key"));
        }

        let upload = AudioUpload {
            filename: audio.filename.clone(),
            mime_type: audio.mime_type.clone(),
            bytes: audio.bytes.clone(),
        };

        let req = build_transcription_request(&self.cfg, &upload);
        let resp = execute(&req).await?;
        if !resp.is_success() {
            return Err(anyhow::anyhow!(
                "transcription failed: {}",
                resp.error_excerpt()
            ));
        }

        parse_transcription(&resp.body)
    }
}

/// Fixed-output synthesizer for tests and offline runs.
#[derive(Debug, Clone)]
pub struct MockSynthesizer {
    pub bytes: Vec<u8>,
}

#[async_trait::async_trait]
impl SpeechSynthesizer for MockSynthesizer {
    async fn synthesize(&self, _text: &str) -> anyhow::Result<SynthesizedSpeech> {
        Ok(SynthesizedSpeech {
            mime_type: "audio/mpeg".into(),
            bytes: self.bytes.clone(),
        })
    }
}

/// Fixed-output transcriber for tests and offline runs.
#[derive(Debug, Clone)]
pub struct MockTranscriber {
    pub text: String,
}

#[async_trait::async_trait]
impl Transcriber for MockTranscriber {
    async fn transcribe(&self, _audio: &RecordedAudio) -> anyhow::Result<String> {
        Ok(self.text.clone())
    }
}
