use crate::clone_chat::CloneSession;
use crate::interview::InterviewSession;
use crate::phase::SessionError;
use crate::summarize::summarize_transcript;
use crate::traits::{ChatProvider, RecordedAudio, SessionStore, SpeechOutput, Transcriber};
use doppel_core::{InterviewScript, Message, Profile};
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("no conversation data found; complete an interview first")]
    NoProfile,
    #[error("{0}")]
    Session(#[from] SessionError),
    #[error("provider call failed: {0:#}")]
    Provider(anyhow::Error),
    #[error("malformed profile: {0:#}")]
    MalformedProfile(anyhow::Error),
    #[error("session store failed: {0:#}")]
    Store(anyhow::Error),
}

/// Facade over the three phases and the speech bridge. Sessions borrow the
/// engine's providers; persistence goes through the injected store.
pub struct DoppelEngine {
    chat: Arc<dyn ChatProvider>,
    speech: Option<SpeechOutput>,
    transcriber: Arc<dyn Transcriber>,
    store: Arc<dyn SessionStore>,
}

impl DoppelEngine {
    pub fn new(
        chat: Arc<dyn ChatProvider>,
        speech: Option<SpeechOutput>,
        transcriber: Arc<dyn Transcriber>,
        store: Arc<dyn SessionStore>,
    ) -> Self {
        Self {
            chat,
            speech,
            transcriber,
            store,
        }
    }

    pub fn begin_interview(&self, script: &InterviewScript) -> InterviewSession {
        InterviewSession::new(script, self.chat.clone(), self.speech.clone())
    }

    /// Ends the interview, summarizes it, and persists the profile together
    /// with the raw conversational transcript. The interview transcript is
    /// abandoned afterwards.
    pub async fn complete_interview(
        &self,
        session: InterviewSession,
    ) -> Result<Profile, EngineError> {
        let transcript = session.finish();
        let profile = summarize_transcript(self.chat.as_ref(), &transcript).await?;

        let turns: Vec<Message> = transcript.turns().cloned().collect();
        self.store
            .save_transcript(&turns)
            .map_err(EngineError::Store)?;
        self.store.save_profile(&profile).map_err(EngineError::Store)?;
        log::info!("interview complete; profile and {} turns persisted", turns.len());
        Ok(profile)
    }

    /// Starts a clone chat over the stored profile. Refused when no profile
    /// has been persisted; collaborators render that as "no data found".
    pub fn begin_clone_chat(&self) -> Result<CloneSession, EngineError> {
        let profile = self
            .store
            .load_profile()
            .map_err(EngineError::Store)?
            .ok_or(EngineError::NoProfile)?;
        CloneSession::new(profile, self.chat.clone(), self.speech.clone())
    }

    /// The speech-to-text half of the speech bridge: one blocking call, no
    /// retry, no chunking.
    pub async fn transcribe(&self, audio: &RecordedAudio) -> Result<String, EngineError> {
        self.transcriber
            .transcribe(audio)
            .await
            .map_err(EngineError::Provider)
    }

    /// Removes both persisted entries in one action.
    pub fn clear_session(&self) -> Result<(), EngineError> {
        self.store.clear().map_err(EngineError::Store)?;
        log::info!("stored profile and transcript cleared");
        Ok(())
    }
}
