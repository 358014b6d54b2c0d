use std::path::{Path, PathBuf};

use anyhow::Context;

/// Environment override for the data directory. Points the whole app
/// (config, profile, transcript, audio) somewhere else.
pub const DATA_DIR_ENV: &str = "DOPPEL_DATA_DIR";

const APP_DIR_NAME: &str = "doppel";

/// Resolves the application data directory: `$DOPPEL_DATA_DIR` when set and
/// non-empty, otherwise the platform-local data dir.
pub fn data_dir() -> anyhow::Result<PathBuf> {
    if let Ok(dir) = std::env::var(DATA_DIR_ENV) {
        if !dir.trim().is_empty() {
            return Ok(PathBuf::from(dir));
        }
    }

    let base = directories::BaseDirs::new().context("no home directory found")?;
    Ok(base.data_local_dir().join(APP_DIR_NAME))
}

pub fn config_path(data_dir: &Path) -> PathBuf {
    data_dir.join("config.json")
}

pub fn script_path(data_dir: &Path) -> PathBuf {
    data_dir.join("script.json")
}

pub fn audio_dir(data_dir: &Path) -> PathBuf {
    data_dir.join("audio")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn well_known_paths_hang_off_the_data_dir() {
        let dir = Path::new("/tmp/doppel-data");
        assert_eq!(config_path(dir), Path::new("/tmp/doppel-data/config.json"));
        assert_eq!(script_path(dir), Path::new("/tmp/doppel-data/script.json"));
        assert_eq!(audio_dir(dir), Path::new("/tmp/doppel-data/audio"));
    }
}
