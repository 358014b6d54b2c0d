pub mod config;
pub mod message;
pub mod profile;
pub mod prompts;
pub mod script;
pub mod text;
pub mod transcript;
pub mod types;

// Keep the public surface small and intentional.
pub use config::*;
pub use message::*;
pub use profile::*;
pub use prompts::*;
pub use script::*;
pub use text::*;
pub use transcript::*;
pub use types::*;
