use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "doppel")]
#[command(about = "Interview yourself, then chat with the digital clone", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the scripted interview and build a profile from it
    Interview {
        /// Speak assistant replies out loud, keeping the audio files
        #[arg(long)]
        speak: bool,
        /// Interview script file to use instead of the stored one
        #[arg(long, value_name = "PATH")]
        script: Option<std::path::PathBuf>,
    },
    /// Chat with the clone built from the stored profile
    Chat {
        /// Speak clone replies out loud, keeping the audio files
        #[arg(long)]
        speak: bool,
    },
    /// Show the stored profile
    Profile,
    /// Delete the stored profile and transcript
    Clear {
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
    /// Manage the API key in the OS keyring
    Auth {
        #[command(subcommand)]
        action: AuthAction,
    },
}

#[derive(Subcommand)]
enum AuthAction {
    /// Store an API key
    Set {
        /// The key; prompted for when omitted
        key: Option<String>,
    },
    /// Remove the stored API key
    Clear,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Interview { speak, script } => commands::interview::run(speak, script).await?,
        Commands::Chat { speak } => commands::chat::run(speak).await?,
        Commands::Profile => commands::profile::run()?,
        Commands::Clear { yes } => commands::clear::run(yes)?,
        Commands::Auth { action } => match action {
            AuthAction::Set { key } => commands::auth::set(key)?,
            AuthAction::Clear => commands::auth::clear()?,
        },
    }

    Ok(())
}
