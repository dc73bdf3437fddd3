//! Model listing and lookup.

use oaisample_client::OpenAiApi;
use tokio_util::sync::CancellationToken;

use super::{Outcome, print_json, report_failure};
use crate::cancel::cancellable;
use crate::console::Console;

/// Print every model id, sorted, one per line.
pub async fn list<C: Console>(
    api: &dyn OpenAiApi,
    console: &mut C,
    cancel: &CancellationToken,
) -> Outcome {
    match cancellable(cancel, api.list_models()).await {
        Ok(models) => {
            console.print(&models.sorted_ids().join("\n"));
            Outcome::Succeeded
        }
        Err(e) => report_failure(console, &e),
    }
}

/// Print one model's metadata as JSON.
pub async fn retrieve<C: Console>(
    api: &dyn OpenAiApi,
    console: &mut C,
    id: &str,
    cancel: &CancellationToken,
) -> Outcome {
    match cancellable(cancel, api.retrieve_model(id)).await {
        Ok(model) => print_json(console, &model),
        Err(e) => report_failure(console, &e),
    }
}
