pub mod audio_store;
pub mod builder;
pub mod chat;
pub mod config_store;
pub mod defaults;
pub mod files;
pub mod script;
pub mod secrets;
pub mod session_store;
pub mod speech;
