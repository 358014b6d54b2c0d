use std::path::{Path, PathBuf};

use anyhow::Context;
use doppel_core::{AudioRef, SessionId};
use doppel_engine::traits::{SpeechSink, SynthesizedSpeech};

use crate::files::ensure_dir;

/// Keeps synthesized replies as files under one directory, named by session
/// and turn so later turns never overwrite earlier ones.
#[derive(Debug, Clone)]
pub struct FsSpeechSink {
    dir: PathBuf,
}

impl FsSpeechSink {
    pub fn at_dir(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl SpeechSink for FsSpeechSink {
    fn keep(
        &self,
        session: &SessionId,
        turn_index: usize,
        speech: &SynthesizedSpeech,
    ) -> anyhow::Result<AudioRef> {
        ensure_dir(&self.dir)?;

        let ext = extension_for(&speech.mime_type);
        let path = self.dir.join(format!("{session}-turn-{turn_index}.{ext}"));
        std::fs::write(&path, &speech.bytes)
            .with_context(|| format!("failed to write audio: {}", path.display()))?;

        Ok(AudioRef::new(path.to_string_lossy()))
    }
}

fn extension_for(mime_type: &str) -> &'static str {
    match mime_type.split(';').next().unwrap_or("").trim() {
        "audio/mpeg" | "audio/mp3" => "mp3",
        "audio/wav" | "audio/x-wav" => "wav",
        "audio/ogg" => "ogg",
        _ => "bin",
    }
}
