use std::path::Path;
use std::sync::Arc;

use doppel_core::config::AppConfig;
use doppel_engine::engine::DoppelEngine;
use doppel_engine::traits::{
    ChatProvider, SessionStore, SpeechOutput, SpeechSink, SpeechSynthesizer, Transcriber,
};

use crate::audio_store::FsSpeechSink;
use crate::chat::OpenAiChatProvider;
use crate::defaults::audio_dir;
use crate::secrets::{API_KEY_ENV, resolve_api_key};
use crate::session_store::FsSessionStore;
use crate::speech::{OpenAiSpeechSynthesizer, OpenAiTranscriber};

/// Builds a runnable engine from config + data directory.
///
/// This keeps the command layer thin. `speak` forces spoken replies on even
/// when the config leaves them off.
pub fn build_engine_from_config(
    cfg: &AppConfig,
    data_dir: &Path,
    speak: bool,
) -> anyhow::Result<DoppelEngine> {
    let api_key = resolve_api_key()?.unwrap_or_default();
    if api_key.trim().is_empty() {
        anyhow::bail!("no API key configured: set {API_KEY_ENV} or store one in the keyring");
    }

    let chat: Arc<dyn ChatProvider> = Arc::new(OpenAiChatProvider::new(
        cfg.chat.base_url.clone(),
        api_key.clone(),
        cfg.chat.model.clone(),
    ));

    let speech = if speak || cfg.speech.enabled {
        let synthesizer: Arc<dyn SpeechSynthesizer> = Arc::new(OpenAiSpeechSynthesizer::new(
            cfg.chat.base_url.clone(),
            api_key.clone(),
            cfg.speech.synthesis_model.clone(),
            cfg.speech.voice.clone(),
        ));
        let sink: Arc<dyn SpeechSink> = Arc::new(FsSpeechSink::at_dir(audio_dir(data_dir)));
        Some(SpeechOutput { synthesizer, sink })
    } else {
        None
    };

    let transcriber: Arc<dyn Transcriber> = Arc::new(OpenAiTranscriber::new(
        cfg.chat.base_url.clone(),
        api_key,
        cfg.speech.transcription_model.clone(),
    ));

    let store: Arc<dyn SessionStore> = Arc::new(FsSessionStore::at_dir(data_dir));

    Ok(DoppelEngine::new(chat, speech, transcriber, store))
}
