//! Speech-to-text: transcription in the spoken language, translation into English.

use std::path::Path;

use oaisample_client::OpenAiApi;
use oaisample_client::types::{AudioRequest, AudioResponse};
use tokio_util::sync::CancellationToken;

use super::{Outcome, print_json, report_failure};
use crate::cancel::cancellable;
use crate::config::AudioConfig;
use crate::console::Console;
use crate::payload::{default_file_name, read_payload};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Task {
    Transcribe,
    Translate,
}

/// Transcribe the recording at `path`.
pub async fn transcribe<C: Console>(
    api: &dyn OpenAiApi,
    console: &mut C,
    config: &AudioConfig,
    path: &Path,
    file_name: Option<&str>,
    cancel: &CancellationToken,
) -> Outcome {
    run(api, console, config, path, file_name, Task::Transcribe, cancel).await
}

/// Translate the recording at `path` into English text.
pub async fn translate<C: Console>(
    api: &dyn OpenAiApi,
    console: &mut C,
    config: &AudioConfig,
    path: &Path,
    file_name: Option<&str>,
    cancel: &CancellationToken,
) -> Outcome {
    run(api, console, config, path, file_name, Task::Translate, cancel).await
}

async fn run<C: Console>(
    api: &dyn OpenAiApi,
    console: &mut C,
    config: &AudioConfig,
    path: &Path,
    file_name: Option<&str>,
    task: Task,
    cancel: &CancellationToken,
) -> Outcome {
    let file = match read_payload(path).await {
        Ok(bytes) => bytes,
        Err(e) => return report_failure(console, &e),
    };
    let request = AudioRequest {
        file,
        file_name: file_name.map_or_else(|| default_file_name(path), str::to_string),
        model: config.model.clone(),
        language: config.language.clone(),
        response_format: config.response_format.clone(),
    };

    let result = match task {
        Task::Transcribe => cancellable(cancel, api.create_transcription(request)).await,
        Task::Translate => cancellable(cancel, api.create_translation(request)).await,
    };
    match result {
        Ok(AudioResponse::Json(transcript)) => print_json(console, &transcript),
        Ok(AudioResponse::Text(text)) => {
            console.print(&text);
            Outcome::Succeeded
        }
        Err(e) => report_failure(console, &e),
    }
}
