//! HTTP implementation of [`OpenAiApi`] against the OpenAI REST API.
//!
//! Also works with OpenAI-compatible gateways when `base_url` points there.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Method, RequestBuilder};
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::error::{ApiError, check_response};
use crate::provider::OpenAiApi;
use crate::types::{
    AudioRequest, AudioResponse, ChatCompletionRequest, ChatCompletionResponse,
    ImageCreateRequest, ImageEditRequest, ImageResponse, ImageVariationRequest, Model, ModelList,
    ModerationRequest, ModerationResponse,
};

/// Connection settings for [`OpenAiClient`].
#[derive(Clone)]
pub struct ClientConfig {
    pub base_url: String,
    pub api_key: String,
    pub organization: Option<String>,
    pub request_timeout: Duration,
}

impl ClientConfig {
    pub const DEFAULT_BASE_URL: &'static str = "https://api.openai.com/v1";

    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            base_url: Self::DEFAULT_BASE_URL.to_string(),
            api_key: api_key.into(),
            organization: None,
            request_timeout: Duration::from_secs(120),
        }
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .field("organization", &self.organization)
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}

/// OpenAI REST client.
pub struct OpenAiClient {
    client: Client,
    base_url: Url,
    api_key: String,
    organization: Option<String>,
}

impl OpenAiClient {
    pub fn new(config: ClientConfig) -> Result<Self, ApiError> {
        let base_url = Url::parse(&config.base_url)?;
        if base_url.cannot_be_a_base() {
            return Err(url::ParseError::RelativeUrlWithCannotBeABaseBase.into());
        }
        let client = Client::builder()
            .user_agent(concat!("oaisample/", env!("CARGO_PKG_VERSION")))
            .timeout(config.request_timeout)
            .build()?;
        Ok(Self {
            client,
            base_url,
            api_key: config.api_key,
            organization: config.organization,
        })
    }

    /// `base_url` extended by `segments`, each percent-encoded as one path segment.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    fn request(&self, method: Method, segments: &[&str]) -> RequestBuilder {
        let url = self.endpoint(segments);
        debug!(%method, %url, "Sending provider request");

        let mut builder = self.client.request(method, url).bearer_auth(&self.api_key);
        if let Some(ref org) = self.organization {
            builder = builder.header("OpenAI-Organization", org);
        }
        builder
    }

    async fn send<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T, ApiError> {
        let response = builder.send().await?;
        let response = check_response(response).await.inspect_err(|e| {
            debug!(error = %e, "Provider returned an error");
        })?;
        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }

    async fn send_audio(
        &self,
        segments: &[&str],
        request: AudioRequest) -> Result<AudioResponse, ApiError> {
        let expects_json = request.expects_json();

        let mut form = Form::new()
            .part("file", file_part(request.file, request.file_name))
            .text("model", request.model)
            .text("response_format", request.response_format);
        if let Some(language) = request.language {
            form = form.text("language", language);
        }

        let response = self.request(Method::POST, segments).multipart(form).send().await?;
        let body = check_response(response).await?.text().await?;

        if expects_json {
            Ok(AudioResponse::Json(serde_json::from_str(&body)?))
        } else {
            Ok(AudioResponse::Text(body))
        }
    }
}

fn file_part(bytes: Vec<u8>, file_name: String) -> Part {
    Part::bytes(bytes).file_name(file_name)
}

/// Form fields shared by the image edit and variation endpoints.
fn image_form(
    form: Form,
    n: u32,
    size: String,
    response_format: String,
    user: Option<String>,
) -> Form {
    let form = form
        .text("n", n.to_string())
        .text("size", size)
        .text("response_format", response_format);
    match user {
        Some(user) => form.text("user", user),
        None => form,
    }
}

#[async_trait]
impl OpenAiApi for OpenAiClient {
    async fn list_models(&self) -> Result<ModelList, ApiError> {
        self.send(self.request(Method::GET, &["models"])).await
    }

    async fn retrieve_model(&self, id: &str) -> Result<Model, ApiError> {
        self.send(self.request(Method::GET, &["models", id]))
            .await
    }

    async fn create_chat_completion(
        &self,
        request: &ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse, ApiError> {
        debug!(
            model = %request.model,
            messages_count = request.messages.len(),
            max_tokens = ?request.max_tokens,
            "Creating chat completion"
        );
        self.send(self.request(Method::POST, &["chat", "completions"]).json(request))
            .await
    }

    async fn create_image(&self, request: &ImageCreateRequest) -> Result<ImageResponse, ApiError> {
        self.send(self.request(Method::POST, &["images", "generations"]).json(request))
            .await
    }

    async fn create_image_variation(
        &self,
        request: ImageVariationRequest,
    ) -> Result<ImageResponse, ApiError> {
        let form = Form::new().part("image", file_part(request.image, request.image_name));
        let form = image_form(
            form,
            request.n,
            request.size,
            request.response_format,
            request.user,
        );
        self.send(self.request(Method::POST, &["images", "variations"]).multipart(form))
            .await
    }

    async fn create_image_edit(
        &self,
        request: ImageEditRequest,
    ) -> Result<ImageResponse, ApiError> {
        let form = Form::new()
            .part("image", file_part(request.image, request.image_name))
            .text("prompt", request.prompt);
        let form = image_form(
            form,
            request.n,
            request.size,
            request.response_format,
            request.user,
        );
        self.send(self.request(Method::POST, &["images", "edits"]).multipart(form))
            .await
    }

    async fn create_transcription(
        &self,
        request: AudioRequest,
    ) -> Result<AudioResponse, ApiError> {
        self.send_audio(&["audio", "transcriptions"], request).await
    }

    async fn create_translation(&self, request: AudioRequest) -> Result<AudioResponse, ApiError> {
        self.send_audio(&["audio", "translations"], request).await
    }

    async fn create_moderation(
        &self,
        request: &ModerationRequest,
    ) -> Result<ModerationResponse, ApiError> {
        self.send(self.request(Method::POST, &["moderations"]).json(request))
            .await
    }
}
