//! Image generation, variation and edit.

use std::path::Path;

use oaisample_client::OpenAiApi;
use oaisample_client::types::{
    ImageCreateRequest, ImageEditRequest, ImageResponse, ImageVariationRequest,
};
use tokio_util::sync::CancellationToken;
use ulid::Ulid;

use super::{Outcome, report_failure};
use crate::cancel::cancellable;
use crate::config::ImageConfig;
use crate::console::Console;
use crate::payload::{default_file_name, read_payload};

const BASE64_FORMAT: &str = "b64_json";

/// Generate `n` images from `prompt`.
pub async fn create<C: Console>(
    api: &dyn OpenAiApi,
    console: &mut C,
    config: &ImageConfig,
    prompt: &str,
    n: u32,
    cancel: &CancellationToken,
) -> Outcome {
    let request = ImageCreateRequest {
        prompt: prompt.to_string(),
        n,
        size: config.size.clone(),
        response_format: config.response_format.clone(),
        user: Some(Ulid::new().to_string()),
    };

    match cancellable(cancel, api.create_image(&request)).await {
        Ok(response) => print_images(console, config, &response),
        Err(e) => report_failure(console, &e),
    }
}

/// Generate `n` variations of the image at `path`.
pub async fn variation<C: Console>(
    api: &dyn OpenAiApi,
    console: &mut C,
    config: &ImageConfig,
    path: &Path,
    image_name: Option<&str>,
    n: u32,
    cancel: &CancellationToken,
) -> Outcome {
    let image = match read_payload(path).await {
        Ok(bytes) => bytes,
        Err(e) => return report_failure(console, &e),
    };
    let request = ImageVariationRequest {
        image,
        image_name: image_name.map_or_else(|| default_file_name(path), str::to_string),
        n,
        size: config.size.clone(),
        response_format: config.response_format.clone(),
        user: Some(Ulid::new().to_string()),
    };

    match cancellable(cancel, api.create_image_variation(request)).await {
        Ok(response) => print_images(console, config, &response),
        Err(e) => report_failure(console, &e),
    }
}

/// Edit the image at `path` following `prompt`.
#[allow(clippy::too_many_arguments)]
pub async fn edit<C: Console>(
    api: &dyn OpenAiApi,
    console: &mut C,
    config: &ImageConfig,
    prompt: &str,
    path: &Path,
    image_name: Option<&str>,
    n: u32,
    cancel: &CancellationToken,
) -> Outcome {
    let image = match read_payload(path).await {
        Ok(bytes) => bytes,
        Err(e) => return report_failure(console, &e),
    };
    let request = ImageEditRequest {
        prompt: prompt.to_string(),
        image,
        image_name: image_name.map_or_else(|| default_file_name(path), str::to_string),
        n,
        size: config.size.clone(),
        response_format: config.response_format.clone(),
        user: Some(Ulid::new().to_string()),
    };

    match cancellable(cancel, api.create_image_edit(request)).await {
        Ok(response) => print_images(console, config, &response),
        Err(e) => report_failure(console, &e),
    }
}

/// URLs (or base64 payloads) separated by a blank line.
fn print_images<C: Console>(
    console: &mut C,
    config: &ImageConfig,
    response: &ImageResponse,
) -> Outcome {
    let images = if config.response_format == BASE64_FORMAT {
        response.base64_images()
    } else {
        response.urls()
    };
    console.print(&images.join("\n\n"));
    Outcome::Succeeded
}
