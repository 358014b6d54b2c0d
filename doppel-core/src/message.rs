use serde::{Deserialize, Serialize};

/// Reference to an audio file saved on disk.
///
/// Synthesized replies and recorded user audio travel through provider code
/// as raw bytes; everything the user or the persisted transcript sees is one
/// of these.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AudioRef(pub String);

impl AudioRef {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Role strings understood by chat-completions style endpoints.
pub const ROLE_INSTRUCTION: &str = "developer";
pub const ROLE_USER: &str = "user";
pub const ROLE_ASSISTANT: &str = "assistant";

/// One entry of a conversation.
///
/// Instructions carry behavioral directives for the provider and are never
/// rendered to the user. User and assistant turns are the conversation
/// proper; their text is an ordered sequence of segments, flattened with a
/// single space on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Message {
    Instruction {
        text: String,
    },
    UserTurn {
        segments: Vec<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        audio: Option<AudioRef>,
    },
    AssistantTurn {
        segments: Vec<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        audio: Option<AudioRef>,
    },
}

impl Message {
    pub fn instruction(text: impl Into<String>) -> Self {
        Self::Instruction { text: text.into() }
    }

    pub fn user(text: impl Into<String>) -> Self {
        Self::UserTurn {
            segments: vec![text.into()],
            audio: None,
        }
    }

    pub fn user_with_audio(text: impl Into<String>, audio: AudioRef) -> Self {
        Self::UserTurn {
            segments: vec![text.into()],
            audio: Some(audio),
        }
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self::AssistantTurn {
            segments: vec![text.into()],
            audio: None,
        }
    }

    pub fn assistant_with_audio(text: impl Into<String>, audio: AudioRef) -> Self {
        Self::AssistantTurn {
            segments: vec![text.into()],
            audio: Some(audio),
        }
    }

    pub fn is_instruction(&self) -> bool {
        matches!(self, Message::Instruction { .. })
    }

    pub fn is_user(&self) -> bool {
        matches!(self, Message::UserTurn { .. })
    }

    pub fn is_assistant(&self) -> bool {
        matches!(self, Message::AssistantTurn { .. })
    }

    /// Flattened text: segments joined by a single space.
    pub fn text(&self) -> String {
        match self {
            Message::Instruction { text } => text.clone(),
            Message::UserTurn { segments, .. } | Message::AssistantTurn { segments, .. } => {
                segments.join(" ")
            }
        }
    }

    pub fn audio(&self) -> Option<&AudioRef> {
        match self {
            Message::Instruction { .. } => None,
            Message::UserTurn { audio, .. } | Message::AssistantTurn { audio, .. } => {
                audio.as_ref()
            }
        }
    }

    pub fn wire_role(&self) -> &'static str {
        match self {
            Message::Instruction { .. } => ROLE_INSTRUCTION,
            Message::UserTurn { .. } => ROLE_USER,
            Message::AssistantTurn { .. } => ROLE_ASSISTANT,
        }
    }

    pub fn to_wire(&self) -> WireMessage {
        WireMessage {
            role: self.wire_role().to_string(),
            content: self.text(),
        }
    }
}

/// Flattened `{role, content}` pair sent to the generation provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireMessage {
    pub role: String,
    pub content: String,
}

impl WireMessage {
    pub fn new(role: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            content: content.into(),
        }
    }
}
