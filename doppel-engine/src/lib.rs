pub mod clone_chat;
pub mod engine;
pub mod interview;
pub mod phase;
pub mod summarize;
pub mod traits;
pub mod turn;
