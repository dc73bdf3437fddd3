//! Content moderation.

use oaisample_client::OpenAiApi;
use oaisample_client::types::ModerationRequest;
use tokio_util::sync::CancellationToken;

use super::{Outcome, print_json, report_failure};
use crate::cancel::cancellable;
use crate::config::ModerationConfig;
use crate::console::Console;

/// Classify `inputs` and print the verdicts as JSON, one result per input.
pub async fn moderate<C: Console>(
    api: &dyn OpenAiApi,
    console: &mut C,
    config: &ModerationConfig,
    inputs: Vec<String>,
    cancel: &CancellationToken,
) -> Outcome {
    let request = ModerationRequest {
        input: inputs,
        model: config.model.clone(),
    };

    match cancellable(cancel, api.create_moderation(&request)).await {
        Ok(response) => print_json(console, &response),
        Err(e) => report_failure(console, &e),
    }
}
