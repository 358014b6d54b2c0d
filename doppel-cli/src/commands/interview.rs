use std::path::{Path, PathBuf};

use anyhow::Result;
use colored::Colorize;
use doppel_core::AudioRef;
use doppel_engine::engine::DoppelEngine;
use doppel_engine::interview::InterviewSession;
use doppel_engine::turn::UserInput;
use doppel_runtime::builder::build_engine_from_config;
use doppel_runtime::defaults::script_path;
use doppel_runtime::script::{load_script, load_script_file};
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;

use super::{load_context, print_reply, read_recording};

pub async fn run(speak: bool, script_file: Option<PathBuf>) -> Result<()> {
    let (cfg, dir) = load_context()?;
    let engine = build_engine_from_config(&cfg, &dir, speak)?;
    let script = match script_file {
        Some(path) => load_script_file(&path)?,
        None => load_script(&script_path(&dir))?,
    };

    println!("{}", "=== Interview ===".bright_magenta().bold());
    println!(
        "{}",
        "Answer in your own words. '/done' finishes, '/say <path>' submits a recording, '/quit' leaves without saving."
            .bright_black()
    );
    println!();

    let mut session = engine.begin_interview(&script);
    match session.start().await {
        Ok(reply) => print_reply(&reply),
        Err(e) => {
            eprintln!("{}", format!("Error: {e}").red());
            return Ok(());
        }
    }

    let mut rl = DefaultEditor::new()?;

    loop {
        match rl.readline(">> ") {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(&line);

                match trimmed {
                    "/quit" => {
                        println!("{}", "Interview abandoned; nothing was saved.".yellow());
                        return Ok(());
                    }
                    "/done" => break,
                    _ => {}
                }

                let input = if let Some(path) = trimmed.strip_prefix("/say ") {
                    match spoken_input(&engine, path.trim()).await {
                        Ok(input) => input,
                        Err(e) => {
                            eprintln!("{}", format!("Error: {e:#}").red());
                            continue;
                        }
                    }
                } else {
                    UserInput::text(trimmed)
                };

                submit(&mut session, input).await;
            }
            Err(ReadlineError::Interrupted) => {
                println!(
                    "{}",
                    "CTRL-C. '/quit' leaves without saving, '/done' finishes.".yellow()
                );
            }
            Err(ReadlineError::Eof) => {
                println!("{}", "Interview abandoned; nothing was saved.".yellow());
                return Ok(());
            }
            Err(e) => {
                eprintln!("{}", format!("Error: {e:?}").red());
                return Ok(());
            }
        }
    }

    println!("{}", "Summarizing the interview...".bright_black());
    let profile = engine.complete_interview(session).await?;
    match profile.display_name() {
        Some(name) => println!("{}", format!("Profile saved for {name}.").bright_green()),
        None => println!("{}", "Profile saved.".bright_green()),
    }
    println!("{}", "Run 'doppel chat' to talk to the clone.".bright_black());
    Ok(())
}

async fn spoken_input(engine: &DoppelEngine, path: &str) -> Result<UserInput> {
    let path = Path::new(path);
    let recording = read_recording(path)?;
    let text = engine.transcribe(&recording).await?;

    println!("{}", format!("(you said) {text}").green());
    Ok(UserInput::spoken(
        text,
        AudioRef::new(path.to_string_lossy()),
    ))
}

async fn submit(session: &mut InterviewSession, input: UserInput) {
    match session.submit(input).await {
        Ok(reply) => print_reply(&reply),
        // The turn was rolled back; answering again retries it.
        Err(e) => eprintln!("{}", format!("Error: {e}").red()),
    }
}
