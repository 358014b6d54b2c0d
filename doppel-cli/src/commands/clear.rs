use anyhow::Result;
use colored::Colorize;
use doppel_engine::traits::SessionStore;
use doppel_runtime::session_store::FsSessionStore;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;

use super::load_context;

pub fn run(yes: bool) -> Result<()> {
    let (_, dir) = load_context()?;
    let store = FsSessionStore::at_dir(&dir);

    if store.load_profile()?.is_none() && store.load_transcript()?.is_none() {
        println!("{}", "Nothing to clear.".bright_black());
        return Ok(());
    }

    if !yes && !confirmed()? {
        println!("{}", "Cancelled.".yellow());
        return Ok(());
    }

    store.clear()?;
    println!("{}", "Profile and transcript deleted.".bright_green());
    Ok(())
}

fn confirmed() -> Result<bool> {
    let mut rl = DefaultEditor::new()?;
    let answer = match rl.readline("Delete the stored profile and transcript? [y/N] ") {
        Ok(line) => line,
        Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => String::new(),
        Err(e) => return Err(e.into()),
    };

    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}
