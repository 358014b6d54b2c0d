use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::Context;
use doppel_core::{Message, Profile};
use doppel_engine::traits::SessionStore;

use crate::files::write_atomic;

/// Filesystem-backed session state: `profile.json` and `transcript.json`
/// side by side under the data directory. Both entries are written wholesale
/// and removed together by `clear`.
#[derive(Debug, Clone)]
pub struct FsSessionStore {
    profile_path: PathBuf,
    transcript_path: PathBuf,
}

impl FsSessionStore {
    pub fn at_dir(dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        Self {
            profile_path: dir.join("profile.json"),
            transcript_path: dir.join("transcript.json"),
        }
    }

    pub fn profile_path(&self) -> &Path {
        &self.profile_path
    }

    pub fn transcript_path(&self) -> &Path {
        &self.transcript_path
    }

    fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> anyhow::Result<Option<T>> {
        if !path.exists() {
            return Ok(None);
        }

        let raw = std::fs::read(path).with_context(|| format!("read {}", path.display()))?;
        let value = serde_json::from_slice(&raw)
            .with_context(|| format!("parse {}", path.display()))?;
        Ok(Some(value))
    }

    fn remove_if_present(path: &Path) -> anyhow::Result<()> {
        if path.exists() {
            std::fs::remove_file(path).with_context(|| format!("remove {}", path.display()))?;
        }
        Ok(())
    }
}

impl SessionStore for FsSessionStore {
    fn load_profile(&self) -> anyhow::Result<Option<Profile>> {
        Self::read_json(&self.profile_path)
    }

    fn save_profile(&self, profile: &Profile) -> anyhow::Result<()> {
        let json = serde_json::to_vec_pretty(profile).context("encode profile JSON")?;
        write_atomic(&self.profile_path, &json)
    }

    fn load_transcript(&self) -> anyhow::Result<Option<Vec<Message>>> {
        Self::read_json(&self.transcript_path)
    }

    fn save_transcript(&self, turns: &[Message]) -> anyhow::Result<()> {
        let json = serde_json::to_vec_pretty(turns).context("encode transcript JSON")?;
        write_atomic(&self.transcript_path, &json)
    }

    fn clear(&self) -> anyhow::Result<()> {
        Self::remove_if_present(&self.profile_path)?;
        Self::remove_if_present(&self.transcript_path)
    }
}

/// In-memory store for tests and throwaway sessions.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    profile: Mutex<Option<Profile>>,
    transcript: Mutex<Option<Vec<Message>>>,
}

impl SessionStore for MemorySessionStore {
    fn load_profile(&self) -> anyhow::Result<Option<Profile>> {
        Ok(self.profile.lock().expect("store lock poisoned").clone())
    }

    fn save_profile(&self, profile: &Profile) -> anyhow::Result<()> {
        *self.profile.lock().expect("store lock poisoned") = Some(profile.clone());
        Ok(())
    }

    fn load_transcript(&self) -> anyhow::Result<Option<Vec<Message>>> {
        Ok(self.transcript.lock().expect("store lock poisoned").clone())
    }

    fn save_transcript(&self, turns: &[Message]) -> anyhow::Result<()> {
        *self.transcript.lock().expect("store lock poisoned") = Some(turns.to_vec());
        Ok(())
    }

    fn clear(&self) -> anyhow::Result<()> {
        *self.profile.lock().expect("store lock poisoned") = None;
        *self.transcript.lock().expect("store lock poisoned") = None;
        Ok(())
    }
}
