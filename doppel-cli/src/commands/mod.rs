use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use colored::Colorize;
use doppel_core::config::AppConfig;
use doppel_engine::traits::RecordedAudio;
use doppel_engine::turn::AssistantReply;
use doppel_runtime::config_store::ConfigStore;
use doppel_runtime::defaults::{config_path, data_dir};

pub mod auth;
pub mod chat;
pub mod clear;
pub mod interview;
pub mod profile;

/// The data directory plus the config loaded from it.
pub(crate) fn load_context() -> Result<(AppConfig, PathBuf)> {
    let dir = data_dir()?;
    let cfg = ConfigStore::at_path(config_path(&dir)).load_or_default()?;
    Ok((cfg, dir))
}

pub(crate) fn print_reply(reply: &AssistantReply) {
    for line in reply.text.lines() {
        println!("{}", line.bright_blue());
    }
    if let Some(audio) = &reply.audio {
        println!(
            "{}",
            format!("[audio saved: {}]", audio.as_str()).bright_black()
        );
    }
}

/// Reads a local recording for `/say <path>`.
pub(crate) fn read_recording(path: &Path) -> Result<RecordedAudio> {
    let bytes =
        std::fs::read(path).with_context(|| format!("read audio: {}", path.display()))?;
    let filename = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("audio.mp3")
        .to_string();

    Ok(RecordedAudio {
        filename,
        mime_type: mime_for(path).to_string(),
        bytes,
    })
}

fn mime_for(path: &Path) -> &'static str {
    match path.extension().and_then(|e| e.to_str()) {
        Some("wav") => "audio/wav",
        Some("ogg") => "audio/ogg",
        Some("m4a") => "audio/mp4",
        _ => "audio/mpeg",
    }
}
