use crate::engine::EngineError;
use crate::traits::{ChatProvider, SpeechOutput};
use doppel_core::{AudioRef, Message, SessionId, WireMessage, text::filter_reply};
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

/// One submitted user turn. `audio` points at the recording the text was
/// transcribed from, when there was one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserInput {
    pub text: String,
    pub audio: Option<AudioRef>,
}

impl UserInput {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            audio: None,
        }
    }

    pub fn spoken(text: impl Into<String>, audio: AudioRef) -> Self {
        Self {
            text: text.into(),
            audio: Some(audio),
        }
    }

    pub(crate) fn into_message(self) -> Message {
        match self.audio {
            Some(audio) => Message::user_with_audio(self.text, audio),
            None => Message::user(self.text),
        }
    }
}

/// A successful provider reply, ready for rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssistantReply {
    pub text: String,
    pub audio: Option<AudioRef>,
    pub timings: TurnTimings,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct TurnTimings {
    pub generation_ms: Option<u64>,
    pub synthesis_ms: Option<u64>,
}

pub fn ms(d: Duration) -> u64 {
    d.as_millis().try_into().unwrap_or(u64::MAX)
}

/// Runs one provider turn: completion, reply filtering, then optional
/// speech. Any failure along the way aborts the whole turn; the caller
/// appends to its transcript only on `Ok`.
pub(crate) async fn reply_turn(
    chat: &dyn ChatProvider,
    speech: Option<&SpeechOutput>,
    session: &SessionId,
    turn_index: usize,
    wire: &[WireMessage],
) -> Result<(Message, AssistantReply), EngineError> {
    let t0 = Instant::now();
    let raw = chat.complete(wire).await.map_err(EngineError::Provider)?;
    let generation_ms = ms(t0.elapsed());

    let text = filter_reply(&raw);

    let mut timings = TurnTimings {
        generation_ms: Some(generation_ms),
        synthesis_ms: None,
    };

    let audio = match speech {
        Some(out) => {
            let s0 = Instant::now();
            let kept = out
                .speak(session, turn_index, &text)
                .await
                .map_err(EngineError::Provider)?;
            timings.synthesis_ms = Some(ms(s0.elapsed()));
            Some(kept)
        }
        None => None,
    };

    let message = match &audio {
        Some(a) => Message::assistant_with_audio(text.clone(), a.clone()),
        None => Message::assistant(text.clone()),
    };
    let reply = AssistantReply {
        text,
        audio,
        timings,
    };
    Ok((message, reply))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ms_saturates_instead_of_overflowing() {
        assert_eq!(ms(Duration::from_millis(1500)), 1500);
        assert_eq!(ms(Duration::MAX), u64::MAX);
    }

    #[test]
    fn spoken_input_becomes_a_user_turn_with_audio() {
        let input = UserInput::spoken("hello", AudioRef::new("rec.mp3"));
        let msg = input.into_message();
        assert!(msg.is_user());
        assert_eq!(msg.audio().map(AudioRef::as_str), Some("rec.mp3"));
    }
}
