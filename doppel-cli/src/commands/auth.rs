use anyhow::Result;
use colored::Colorize;
use doppel_runtime::secrets::{SecretKey, delete_secret, set_secret};
use rustyline::DefaultEditor;

pub fn set(key: Option<String>) -> Result<()> {
    let key = match key {
        Some(key) => key,
        None => DefaultEditor::new()?.readline("API key: ")?,
    };

    let key = key.trim();
    if key.is_empty() {
        anyhow::bail!("no key given");
    }

    set_secret(SecretKey::OpenAiApiKey, key)?;
    println!("{}", "API key stored in the OS keyring.".bright_green());
    Ok(())
}

pub fn clear() -> Result<()> {
    delete_secret(SecretKey::OpenAiApiKey)?;
    println!("{}", "Stored API key removed.".bright_green());
    Ok(())
}
