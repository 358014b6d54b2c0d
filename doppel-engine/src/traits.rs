use async_trait::async_trait;
use doppel_core::{AudioRef, Message, Profile, SessionId, WireMessage};
use std::sync::Arc;

/// Recorded user audio on its way to the transcription provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedAudio {
    pub filename: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

/// Binary speech returned by the synthesis provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SynthesizedSpeech {
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

/// The text-generation provider. Stateless: every call carries the full
/// flattened history.
#[async_trait]
pub trait ChatProvider: Send + Sync {
    async fn complete(&self, messages: &[WireMessage]) -> anyhow::Result<String>;

    /// Completion constrained to a parseable JSON object response.
    async fn complete_json(&self, messages: &[WireMessage]) -> anyhow::Result<String>;
}

#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    async fn synthesize(&self, text: &str) -> anyhow::Result<SynthesizedSpeech>;
}

#[async_trait]
pub trait Transcriber: Send + Sync {
    async fn transcribe(&self, audio: &RecordedAudio) -> anyhow::Result<String>;
}

/// Where synthesized replies end up. Implementations turn bytes into the
/// stable reference a transcript can carry.
pub trait SpeechSink: Send + Sync {
    fn keep(
        &self,
        session: &SessionId,
        turn_index: usize,
        speech: &SynthesizedSpeech,
    ) -> anyhow::Result<AudioRef>;
}

/// Synthesis plus delivery, wired together when spoken replies are wanted.
#[derive(Clone)]
pub struct SpeechOutput {
    pub synthesizer: Arc<dyn SpeechSynthesizer>,
    pub sink: Arc<dyn SpeechSink>,
}

impl SpeechOutput {
    pub async fn speak(
        &self,
        session: &SessionId,
        turn_index: usize,
        text: &str,
    ) -> anyhow::Result<AudioRef> {
        let speech = self.synthesizer.synthesize(text).await?;
        self.sink.keep(session, turn_index, &speech)
    }
}

/// Persisted session state: exactly two named entries (the non-instruction
/// transcript and the derived profile), written wholesale and cleared
/// together.
pub trait SessionStore: Send + Sync {
    fn load_profile(&self) -> anyhow::Result<Option<Profile>>;
    fn save_profile(&self, profile: &Profile) -> anyhow::Result<()>;
    fn load_transcript(&self) -> anyhow::Result<Option<Vec<Message>>>;
    fn save_transcript(&self, turns: &[Message]) -> anyhow::Result<()>;
    fn clear(&self) -> anyhow::Result<()>;
}
