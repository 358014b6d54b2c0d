use crate::message::{Message, WireMessage};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TranscriptError {
    #[error("instruction messages must precede all conversational turns")]
    InstructionAfterTurn,
}

/// Append-only message history for one session phase.
///
/// Instructions form a leading prefix; the conversational suffix grows by one
/// user entry per submitted turn and one assistant entry per provider reply.
/// The mutators that append conversation take the already-successful reply,
/// so a failed provider call cannot leave a partial exchange behind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Transcript {
    messages: Vec<Message>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds a transcript from persisted conversational turns, trusting
    /// their order. Persisted turns carry no instructions.
    pub fn from_turns(turns: Vec<Message>) -> Self {
        Self { messages: turns }
    }

    /// Appends a behavioral directive. Only valid while the conversation has
    /// not started.
    pub fn push_instruction(&mut self, text: impl Into<String>) -> Result<(), TranscriptError> {
        if self.messages.len() != self.leading_instructions() {
            return Err(TranscriptError::InstructionAfterTurn);
        }
        self.messages.push(Message::instruction(text));
        Ok(())
    }

    /// Appends a provider reply. Call only once the provider call has fully
    /// succeeded.
    pub fn push_assistant(&mut self, reply: Message) {
        self.messages.push(reply);
    }

    /// Appends a completed exchange: the user turn and the reply it produced.
    pub fn push_exchange(&mut self, user: Message, assistant: Message) {
        self.messages.push(user);
        self.messages.push(assistant);
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Number of instruction messages at the head of the transcript.
    pub fn leading_instructions(&self) -> usize {
        self.messages
            .iter()
            .take_while(|m| m.is_instruction())
            .count()
    }

    /// Conversational view: every message except instructions. This is the
    /// only view ever rendered to a user or persisted.
    pub fn turns(&self) -> impl Iterator<Item = &Message> {
        self.messages.iter().filter(|m| !m.is_instruction())
    }

    /// Number of user turns submitted so far.
    pub fn exchange_count(&self) -> usize {
        self.messages.iter().filter(|m| m.is_user()).count()
    }

    pub fn last_turn(&self) -> Option<&Message> {
        self.messages.iter().rev().find(|m| !m.is_instruction())
    }

    /// The full history in provider wire form, instructions included.
    pub fn wire_messages(&self) -> Vec<WireMessage> {
        self.messages.iter().map(Message::to_wire).collect()
    }
}
