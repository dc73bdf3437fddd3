//! Command-line surface and dispatch.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use oaisample_client::OpenAiApi;
use tokio_util::sync::CancellationToken;

use crate::commands::{self, Outcome};
use crate::config::Config;
use crate::console::Console;
use crate::conversation::run_conversation;

pub const DEFAULT_SYSTEM_PROMPT: &str = "You are an excellent assistant.";
pub const DEFAULT_QUESTION: &str = "In what year were the most recent Olympic Games held?";

#[derive(Debug, Parser)]
#[command(name = "oaisample", version, about = "Exercise the OpenAI HTTP API from a console")]
pub struct Cli {
    /// Path to the YAML config file.
    #[arg(long, default_value = "oaisample.yaml")]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List or look up models.
    Models {
        #[command(subcommand)]
        command: ModelsCommand,
    },
    /// Start an interactive conversation.
    Chat(ChatArgs),
    /// Generate, vary or edit images.
    Image {
        #[command(subcommand)]
        command: ImageCommand,
    },
    /// Transcribe or translate a recording.
    Audio {
        #[command(subcommand)]
        command: AudioCommand,
    },
    /// Classify text against the moderation policy.
    Moderate {
        #[arg(required = true)]
        inputs: Vec<String>,
    },
}

#[derive(Debug, Subcommand)]
pub enum ModelsCommand {
    List,
    Get { id: String },
}

#[derive(Debug, Args)]
pub struct ChatArgs {
    #[arg(long, default_value = DEFAULT_SYSTEM_PROMPT)]
    pub system: String,

    #[arg(long, default_value = DEFAULT_QUESTION)]
    pub question: String,
}

#[derive(Debug, Subcommand)]
pub enum ImageCommand {
    Create {
        prompt: String,
        #[arg(short, default_value_t = 2)]
        n: u32,
    },
    Variation {
        path: PathBuf,
        /// Upload name; defaults to the file name.
        #[arg(long)]
        name: Option<String>,
        #[arg(short, default_value_t = 2)]
        n: u32,
    },
    Edit {
        prompt: String,
        path: PathBuf,
        #[arg(long)]
        name: Option<String>,
        #[arg(short, default_value_t = 1)]
        n: u32,
    },
}

#[derive(Debug, Subcommand)]
pub enum AudioCommand {
    Transcribe(AudioArgs),
    Translate(AudioArgs),
}

#[derive(Debug, Args)]
pub struct AudioArgs {
    pub path: PathBuf,
    #[arg(long)]
    pub name: Option<String>,
}

/// Run `command` to completion.
pub async fn dispatch<C: Console>(
    command: Command,
    api: &dyn OpenAiApi,
    config: &Config,
    console: &mut C,
    cancel: &CancellationToken,
) -> Outcome {
    match command {
        Command::Models { command } => match command {
            ModelsCommand::List => commands::models::list(api, console, cancel).await,
            ModelsCommand::Get { id } => {
                commands::models::retrieve(api, console, &id, cancel).await
            }
        },
        Command::Chat(args) => {
            run_conversation(
                api,
                console,
                &config.chat,
                &args.system,
                &args.question,
                None,
                cancel,
            )
            .await
            .exit
            .outcome()
        }
        Command::Image { command } => match command {
            ImageCommand::Create { prompt, n } => {
                commands::images::create(api, console, &config.image, &prompt, n, cancel).await
            }
            ImageCommand::Variation { path, name, n } => {
                commands::images::variation(
                    api,
                    console,
                    &config.image,
                    &path,
                    name.as_deref(),
                    n,
                    cancel,
                )
                .await
            }
            ImageCommand::Edit {
                prompt,
                path,
                name,
                n,
            } => {
                commands::images::edit(
                    api,
                    console,
                    &config.image,
                    &prompt,
                    &path,
                    name.as_deref(),
                    n,
                    cancel,
                )
                .await
            }
        },
        Command::Audio { command } => match command {
            AudioCommand::Transcribe(args) => {
                commands::audio::transcribe(
                    api,
                    console,
                    &config.audio,
                    &args.path,
                    args.name.as_deref(),
                    cancel,
                )
                .await
            }
            AudioCommand::Translate(args) => {
                commands::audio::translate(
                    api,
                    console,
                    &config.audio,
                    &args.path,
                    args.name.as_deref(),
                    cancel,
                )
                .await
            }
        },
        Command::Moderate { inputs } => {
            commands::moderation::moderate(api, console, &config.moderation, inputs, cancel).await
        }
    }
}
