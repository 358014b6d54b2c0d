use anyhow::Result;
use colored::Colorize;
use doppel_core::Transcript;
use doppel_engine::traits::SessionStore;
use doppel_runtime::secrets::{API_KEY_ENV, resolve_api_key};
use doppel_runtime::session_store::FsSessionStore;

use super::load_context;

/// Shows the stored profile and whether the app is ready to make provider
/// calls. Reads the store directly so no API key is needed to look at it.
pub fn run() -> Result<()> {
    let (mut cfg, dir) = load_context()?;
    cfg.api_key_present = resolve_api_key()?.is_some();
    let store = FsSessionStore::at_dir(&dir);

    match store.load_profile()? {
        Some(profile) => {
            if let Some(name) = profile.display_name() {
                println!("{}", name.bright_magenta().bold());
            }
            println!("{}", serde_json::to_string_pretty(&profile)?);
            if let Some(turns) = store.load_transcript()? {
                let transcript = Transcript::from_turns(turns);
                println!(
                    "{}",
                    format!("Built from {} interview answers.", transcript.exchange_count())
                        .bright_black()
                );
            }
        }
        None => println!(
            "{}",
            "No profile yet. Run 'doppel interview' first.".yellow()
        ),
    }

    if !cfg.api_key_present {
        println!(
            "{}",
            format!("No API key configured; set {API_KEY_ENV} or run 'doppel auth set'.").yellow()
        );
    }
    Ok(())
}
