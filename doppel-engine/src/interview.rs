use crate::engine::EngineError;
use crate::phase::{Phase, SessionError};
use crate::traits::{ChatProvider, SpeechOutput};
use crate::turn::{AssistantReply, UserInput, reply_turn};
use doppel_core::{InterviewScript, SessionId, Transcript, prompts};
use std::sync::Arc;

/// Drives one scripted interview. The transcript is seeded with the
/// interviewer instruction embedding the script; everything after that is
/// conversation. Script adherence is trusted to the provider.
pub struct InterviewSession {
    id: SessionId,
    phase: Phase,
    transcript: Transcript,
    chat: Arc<dyn ChatProvider>,
    speech: Option<SpeechOutput>,
}

impl InterviewSession {
    pub(crate) fn new(
        script: &InterviewScript,
        chat: Arc<dyn ChatProvider>,
        speech: Option<SpeechOutput>,
    ) -> Self {
        let mut transcript = Transcript::new();
        transcript
            .push_instruction(prompts::interviewer_instruction(script))
            .expect("fresh transcript accepts instructions");

        Self {
            id: SessionId::new(),
            phase: Phase::NotStarted,
            transcript,
            chat,
            speech,
        }
    }

    pub fn id(&self) -> &SessionId {
        &self.id
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    /// Issues the opening provider call and appends the single returned
    /// assistant turn, the first question.
    pub async fn start(&mut self) -> Result<AssistantReply, EngineError> {
        match self.phase {
            Phase::NotStarted => {}
            Phase::AwaitingReply => return Err(SessionError::Busy.into()),
            Phase::Idle => return Err(SessionError::AlreadyStarted.into()),
            Phase::Ended => return Err(SessionError::Ended.into()),
        }

        let wire = self.transcript.wire_messages();

        self.phase = Phase::AwaitingReply;
        match reply_turn(
            self.chat.as_ref(),
            self.speech.as_ref(),
            &self.id,
            wire.len(),
            &wire,
        )
        .await
        {
            Ok((message, reply)) => {
                self.transcript.push_assistant(message);
                self.phase = Phase::Idle;
                log::debug!("interview {} started", self.id);
                Ok(reply)
            }
            Err(e) => {
                self.phase = Phase::NotStarted;
                Err(e)
            }
        }
    }

    /// Sends the whole accumulated transcript plus the candidate user turn.
    /// On success exactly that turn and the reply are appended; on failure
    /// the transcript is untouched and the turn may simply be resubmitted.
    pub async fn submit(&mut self, input: UserInput) -> Result<AssistantReply, EngineError> {
        match self.phase {
            Phase::Idle => {}
            Phase::NotStarted => return Err(SessionError::NotStarted.into()),
            Phase::AwaitingReply => return Err(SessionError::Busy.into()),
            Phase::Ended => return Err(SessionError::Ended.into()),
        }

        let user = input.into_message();
        let mut wire = self.transcript.wire_messages();
        wire.push(user.to_wire());

        self.phase = Phase::AwaitingReply;
        match reply_turn(
            self.chat.as_ref(),
            self.speech.as_ref(),
            &self.id,
            wire.len(),
            &wire,
        )
        .await
        {
            Ok((message, reply)) => {
                self.transcript.push_exchange(user, message);
                self.phase = Phase::Idle;
                Ok(reply)
            }
            Err(e) => {
                self.phase = Phase::Idle;
                Err(e)
            }
        }
    }

    /// Ends the session and yields the transcript for summarization.
    pub fn finish(self) -> Transcript {
        log::debug!(
            "interview {} finished after {} exchanges",
            self.id,
            self.transcript.exchange_count()
        );
        self.transcript
    }
}
