use crate::engine::EngineError;
use crate::phase::{Phase, SessionError};
use crate::traits::{ChatProvider, SpeechOutput};
use crate::turn::{AssistantReply, UserInput, reply_turn};
use doppel_core::{Profile, SessionId, Transcript, WireMessage, prompts};
use std::sync::Arc;

/// Role-plays the stored profile. Every provider call builds a fresh
/// instruction embedding the serialized profile; the instruction is never
/// part of the session transcript, which therefore holds conversation only
/// and is discarded when the session ends.
pub struct CloneSession {
    id: SessionId,
    phase: Phase,
    profile: Profile,
    profile_json: String,
    transcript: Transcript,
    chat: Arc<dyn ChatProvider>,
    speech: Option<SpeechOutput>,
}

impl std::fmt::Debug for CloneSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CloneSession")
            .field("id", &self.id)
            .field("phase", &self.phase)
            .field("profile", &self.profile)
            .field("transcript", &self.transcript)
            .finish_non_exhaustive()
    }
}

impl CloneSession {
    pub(crate) fn new(
        profile: Profile,
        chat: Arc<dyn ChatProvider>,
        speech: Option<SpeechOutput>,
    ) -> Result<Self, EngineError> {
        // Serialized once: the profile is immutable for the session's
        // lifetime, and each call re-embeds this form verbatim.
        let profile_json = serde_json::to_string_pretty(&profile)
            .map_err(|e| EngineError::MalformedProfile(e.into()))?;

        Ok(Self {
            id: SessionId::new(),
            phase: Phase::NotStarted,
            profile,
            profile_json,
            transcript: Transcript::new(),
            chat,
            speech,
        })
    }

    pub fn id(&self) -> &SessionId {
        &self.id
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    /// Opening turn: the provider sees only the introduction directive,
    /// never any prior conversation. Any existing transcript is dropped, so
    /// repeated introductions are equivalent.
    pub async fn introduce(&mut self) -> Result<AssistantReply, EngineError> {
        match self.phase {
            Phase::NotStarted | Phase::Idle => {}
            Phase::AwaitingReply => return Err(SessionError::Busy.into()),
            Phase::Ended => return Err(SessionError::Ended.into()),
        }

        let wire = vec![WireMessage::new(
            doppel_core::ROLE_INSTRUCTION,
            prompts::introduction_instruction(&self.profile_json),
        )];

        let restore = self.phase;
        self.phase = Phase::AwaitingReply;
        match reply_turn(self.chat.as_ref(), self.speech.as_ref(), &self.id, 0, &wire).await {
            Ok((message, reply)) => {
                self.transcript = Transcript::new();
                self.transcript.push_assistant(message);
                self.phase = Phase::Idle;
                log::debug!("clone session {} introduced", self.id);
                Ok(reply)
            }
            Err(e) => {
                self.phase = restore;
                Err(e)
            }
        }
    }

    /// One chat turn: fresh persona instruction, the running conversation,
    /// then the candidate user turn. Appended only when the whole turn
    /// succeeds.
    pub async fn respond(&mut self, input: UserInput) -> Result<AssistantReply, EngineError> {
        match self.phase {
            Phase::Idle => {}
            Phase::NotStarted => return Err(SessionError::NotStarted.into()),
            Phase::AwaitingReply => return Err(SessionError::Busy.into()),
            Phase::Ended => return Err(SessionError::Ended.into()),
        }

        let user = input.into_message();
        let mut wire = vec![WireMessage::new(
            doppel_core::ROLE_INSTRUCTION,
            prompts::clone_instruction(&self.profile_json),
        )];
        wire.extend(self.transcript.wire_messages());
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

    /// Ends the session. The clone transcript lives only for the session;
    /// callers drop the returned value unless they want a parting look.
    pub fn finish(self) -> Transcript {
        self.transcript
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use doppel_core::PersonalInfo;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    struct ScriptedChat {
        replies: Mutex<VecDeque<Result<String, String>>>,
        seen: Mutex<Vec<Vec<WireMessage>>>,
    }

    impl ScriptedChat {
        fn new(replies: Vec<Result<&str, &str>>) -> Arc<Self> {
            Arc::new(Self {
                replies: Mutex::new(
                    replies
                        .into_iter()
                        .map(|r| r.map(String::from).map_err(String::from))
                        .collect(),
                ),
                seen: Mutex::new(vec![]),
            })
        }

        fn requests(&self) -> Vec<Vec<WireMessage>> {
            self.seen.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ChatProvider for ScriptedChat {
        async fn complete(&self, messages: &[WireMessage]) -> anyhow::Result<String> {
            self.seen.lock().unwrap().push(messages.to_vec());
            match self.replies.lock().unwrap().pop_front() {
                Some(Ok(text)) => Ok(text),
                Some(Err(e)) => Err(anyhow::anyhow!(e)),
                None => Ok("ok".into()),
            }
        }

        async fn complete_json(&self, messages: &[WireMessage]) -> anyhow::Result<String> {
            self.complete(messages).await
        }
    }

    fn alex() -> Profile {
        Profile {
            personal_info: Some(PersonalInfo {
                name: Some("Alex".into()),
                ..Default::default()
            }),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn introduce_sends_only_the_introduction_directive() {
        let chat = ScriptedChat::new(vec![Ok("Hi, I'm Alex!")]);
        let mut session = CloneSession::new(alex(), chat.clone(), None).unwrap();

        let reply = session.introduce().await.unwrap();
        assert_eq!(reply.text, "Hi, I'm Alex!");

        let requests = chat.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].len(), 1);
        assert_eq!(requests[0][0].role, "developer");
        assert!(requests[0][0].content.contains("\"name\": \"Alex\""));
        assert!(requests[0][0].content.contains("introduction"));
    }

    #[tokio::test]
    async fn introduce_resets_any_prior_conversation() {
        let chat = ScriptedChat::new(vec![Ok("Hi!"), Ok("Sure."), Ok("Hi again!")]);
        let mut session = CloneSession::new(alex(), chat.clone(), None).unwrap();

        session.introduce().await.unwrap();
        session.respond(UserInput::text("Tell me more")).await.unwrap();
        assert_eq!(session.transcript().len(), 3);

        session.introduce().await.unwrap();
        assert_eq!(session.transcript().len(), 1);

        // The repeated introduction still saw no conversation.
        let last = chat.requests().pop().unwrap();
        assert_eq!(last.len(), 1);
    }

    #[tokio::test]
    async fn respond_embeds_a_fresh_persona_instruction_every_call() {
        let chat = ScriptedChat::new(vec![Ok("Hi!"), Ok("I cook."), Ok("Pasta.")]);
        let mut session = CloneSession::new(alex(), chat.clone(), None).unwrap();
        session.introduce().await.unwrap();
        session.respond(UserInput::text("What do you do?")).await.unwrap();
        session.respond(UserInput::text("Favourite dish?")).await.unwrap();

        let requests = chat.requests();
        for call in &requests[1..] {
            assert_eq!(call[0].role, "developer");
            assert!(call[0].content.contains("digital clone"));
        }
        // Second respond resends the whole conversation after the directive.
        assert_eq!(requests[2].len(), 1 + 3 + 1);
    }

    #[tokio::test]
    async fn instructions_never_enter_the_clone_transcript() {
        let chat = ScriptedChat::new(vec![Ok("Hi!"), Ok("Sure.")]);
        let mut session = CloneSession::new(alex(), chat, None).unwrap();
        session.introduce().await.unwrap();
        session.respond(UserInput::text("hello")).await.unwrap();

        assert_eq!(session.transcript().leading_instructions(), 0);
        assert!(session.transcript().turns().count() == session.transcript().len());
    }

    #[tokio::test]
    async fn respond_before_introduce_is_a_caller_error() {
        let chat = ScriptedChat::new(vec![]);
        let mut session = CloneSession::new(alex(), chat, None).unwrap();
        let err = session.respond(UserInput::text("hi")).await.unwrap_err();
        assert!(matches!(err, EngineError::Session(SessionError::NotStarted)));
    }

    #[tokio::test]
    async fn failed_respond_keeps_the_conversation_intact() {
        let chat = ScriptedChat::new(vec![Ok("Hi!"), Err("down"), Ok("Better now.")]);
        let mut session = CloneSession::new(alex(), chat, None).unwrap();
        session.introduce().await.unwrap();

        let snapshot = session.transcript().clone();
        session.respond(UserInput::text("you ok?")).await.unwrap_err();
        assert_eq!(session.transcript(), &snapshot);

        session.respond(UserInput::text("you ok?")).await.unwrap();
        assert_eq!(session.transcript().len(), snapshot.len() + 2);
    }
}
