//! Cancellation of in-flight provider calls.

use std::future::Future;

use oaisample_client::ApiError;
use tokio_util::sync::CancellationToken;

/// Run `call` unless `token` fires first, in which case the call is dropped
/// (aborting its HTTP request) and `ApiError::Cancelled` is returned.
pub async fn cancellable<T, F>(token: &CancellationToken, call: F) -> Result<T, ApiError>
where
    F: Future<Output = Result<T, ApiError>>,
{
    tokio::select! {
        biased;
        () = token.cancelled() => Err(ApiError::Cancelled),
        result = call => result,
    }
}
