use std::path::Path;

use anyhow::Result;
use colored::Colorize;
use doppel_core::AudioRef;
use doppel_engine::engine::{DoppelEngine, EngineError};
use doppel_engine::turn::UserInput;
use doppel_runtime::builder::build_engine_from_config;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;

use super::{load_context, print_reply, read_recording};

pub async fn run(speak: bool) -> Result<()> {
    let (cfg, dir) = load_context()?;
    let engine = build_engine_from_config(&cfg, &dir, speak)?;

    let mut session = match engine.begin_clone_chat() {
        Ok(session) => session,
        Err(EngineError::NoProfile) => {
            println!(
                "{}",
                "No conversation data found. Please complete an interview first.".yellow()
            );
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    println!("{}", "=== Clone Chat ===".bright_magenta().bold());
    println!(
        "{}",
        "'/say <path>' submits a recording, '/quit' ends the chat.".bright_black()
    );
    println!();

    match session.introduce().await {
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

                if trimmed == "/quit" {
                    break;
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

                match session.respond(input).await {
                    Ok(reply) => print_reply(&reply),
                    Err(e) => eprintln!("{}", format!("Error: {e}").red()),
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("{}", "CTRL-C. Type '/quit' to end the chat.".yellow());
            }
            Err(ReadlineError::Eof) => break,
            Err(e) => {
                eprintln!("{}", format!("Error: {e:?}").red());
                break;
            }
        }
    }

    println!("{}", "Chat ended.".bright_green());
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
