use std::path::Path;

use anyhow::Context;
use doppel_core::InterviewScript;

/// Loads the interview script: the `script.json` override when present,
/// otherwise the built-in one.
pub fn load_script(path: &Path) -> anyhow::Result<InterviewScript> {
    if !path.exists() {
        return Ok(InterviewScript::builtin());
    }
    load_script_file(path)
}

/// Loads a script from an explicitly named file. Unlike `load_script`, a
/// missing file is an error here.
pub fn load_script_file(path: &Path) -> anyhow::Result<InterviewScript> {
    let raw = std::fs::read(path).with_context(|| format!("read script: {}", path.display()))?;
    let script: InterviewScript =
        serde_json::from_slice(&raw).with_context(|| format!("parse script: {}", path.display()))?;

    if script.is_empty() {
        anyhow::bail!("script has no questions: {}", path.display());
    }
    Ok(script)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_falls_back_to_builtin() {
        let dir = tempfile::tempdir().unwrap();
        let script = load_script(&dir.path().join("script.json")).unwrap();
        assert_eq!(script, InterviewScript::builtin());
    }

    #[test]
    fn file_overrides_the_builtin_script() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("script.json");
        std::fs::write(&path, r#"{"questions": ["What is your name?"]}"#).unwrap();

        let script = load_script(&path).unwrap();
        assert_eq!(script.len(), 1);
    }

    #[test]
    fn empty_scripts_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("script.json");
        std::fs::write(&path, r#"{"questions": []}"#).unwrap();

        assert!(load_script(&path).is_err());
    }

    #[test]
    fn explicitly_named_scripts_must_exist() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_script_file(&dir.path().join("custom.json")).unwrap_err();
        assert!(err.to_string().contains("read script"));
    }
}
