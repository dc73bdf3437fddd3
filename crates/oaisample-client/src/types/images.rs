//! Image generation, edit and variation types.

use serde::{Deserialize, Serialize};

/// Request body for `POST /images/generations`.
#[derive(Debug, Clone, Serialize)]
pub struct ImageCreateRequest {
    pub prompt: String,
    pub n: u32,
    pub size: String,
    pub response_format: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
}

/// Multipart request for `POST /images/variations`.
#[derive(Debug, Clone)]
pub struct ImageVariationRequest {
    pub image: Vec<u8>,
    pub image_name: String,
    pub n: u32,
    pub size: String,
    pub response_format: String,
    pub user: Option<String>,
}

/// Multipart request for `POST /images/edits`.
#[derive(Debug, Clone)]
pub struct ImageEditRequest {
    pub prompt: String,
    pub image: Vec<u8>,
    pub image_name: String,
    pub n: u32,
    pub size: String,
    pub response_format: String,
    pub user: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageResponse {
    #[serde(default)]
    pub created: u64,
    pub data: Vec<ImageData>,
}

/// One generated image, as a URL or inline base64 depending on the response format.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub b64_json: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revised_prompt: Option<String>,
}

impl ImageResponse {
    /// One entry per image, in order; `""` where an image has no URL.
    pub fn urls(&self) -> Vec<&str> {
        self.data
            .iter()
            .map(|d| d.url.as_deref().unwrap_or_default())
            .collect()
    }

    /// One entry per image, in order; `""` where an image has no payload.
    pub fn base64_images(&self) -> Vec<&str> {
        self.data
            .iter()
            .map(|d| d.b64_json.as_deref().unwrap_or_default())
            .collect()
    }
}
