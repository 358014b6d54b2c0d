use crate::engine::EngineError;
use crate::traits::ChatProvider;
use anyhow::Context;
use doppel_core::{Message, Profile, Transcript, WireMessage, prompts, text::strip_code_fence};

/// Distills a finished interview into the structured profile.
///
/// One JSON-constrained call: the summary directive followed by the
/// conversational turns (instructions excluded). A malformed response
/// propagates as an error and nothing is synthesized in its place. An empty
/// transcript still goes to the provider; the null-or-empty result is the
/// provider's side of the contract.
pub async fn summarize_transcript(
    chat: &dyn ChatProvider,
    transcript: &Transcript,
) -> Result<Profile, EngineError> {
    let mut wire = vec![WireMessage::new(
        doppel_core::ROLE_INSTRUCTION,
        prompts::summary_instruction(),
    )];
    wire.extend(transcript.turns().map(Message::to_wire));

    let raw = chat
        .complete_json(&wire)
        .await
        .map_err(EngineError::Provider)?;

    let cleaned = strip_code_fence(&raw);
    let profile: Profile = serde_json::from_str(&cleaned)
        .context("provider reply does not match the profile shape")
        .map_err(EngineError::MalformedProfile)?;

    log::debug!(
        "summarized {} turns into a profile (populated: {})",
        transcript.turns().count(),
        !profile.is_unpopulated()
    );
    Ok(profile)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct CannedJson {
        body: String,
        seen: Mutex<Vec<Vec<WireMessage>>>,
    }

    impl CannedJson {
        fn new(body: &str) -> Self {
            Self {
                body: body.into(),
                seen: Mutex::new(vec![]),
            }
        }
    }

    #[async_trait]
    impl ChatProvider for CannedJson {
        async fn complete(&self, _messages: &[WireMessage]) -> anyhow::Result<String> {
            anyhow::bail!("summarizer must use the JSON-constrained variant")
        }

        async fn complete_json(&self, messages: &[WireMessage]) -> anyhow::Result<String> {
            self.seen.lock().unwrap().push(messages.to_vec());
            Ok(self.body.clone())
        }
    }

    fn interview_with_one_answer() -> Transcript {
        let mut t = Transcript::new();
        t.push_instruction("interviewer directive").unwrap();
        t.push_assistant(Message::assistant("What is your name?"));
        t.push_exchange(
            Message::user("Alex"),
            Message::assistant("Thanks, that's all."),
        );
        t
    }

    #[tokio::test]
    async fn parses_the_structured_reply() {
        let chat = CannedJson::new(r#"{"personalInfo":{"name":"Alex"}}"#);
        let profile = summarize_transcript(&chat, &interview_with_one_answer())
            .await
            .unwrap();
        assert_eq!(profile.display_name(), Some("Alex"));
    }

    #[tokio::test]
    async fn fenced_replies_still_parse() {
        let chat = CannedJson::new("```json\n{\"personalInfo\":{\"name\":\"Alex\"}}\n```");
        let profile = summarize_transcript(&chat, &interview_with_one_answer())
            .await
            .unwrap();
        assert_eq!(profile.display_name(), Some("Alex"));
    }

    #[tokio::test]
    async fn interview_instructions_are_not_forwarded() {
        let chat = CannedJson::new("{}");
        summarize_transcript(&chat, &interview_with_one_answer())
            .await
            .unwrap();

        let seen = chat.seen.lock().unwrap();
        // The summary directive plus the three conversational turns.
        assert_eq!(seen[0].len(), 4);
        assert!(seen[0][0].content.contains("Summarize the interviewee"));
        assert!(!seen[0].iter().any(|m| m.content.contains("interviewer directive")));
    }

    #[tokio::test]
    async fn empty_transcript_still_calls_the_provider() {
        let chat = CannedJson::new("{}");
        let profile = summarize_transcript(&chat, &Transcript::new()).await.unwrap();
        assert!(profile.is_unpopulated());

        let seen = chat.seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].len(), 1);
    }

    #[tokio::test]
    async fn malformed_reply_is_an_error_not_a_fallback() {
        let chat = CannedJson::new("Sorry, I cannot do that.");
        let err = summarize_transcript(&chat, &interview_with_one_answer())
            .await
            .unwrap_err();
        assert!(matches!(err, EngineError::MalformedProfile(_)));
    }
}
