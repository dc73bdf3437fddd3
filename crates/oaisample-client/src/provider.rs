//! Provider API trait.

use async_trait::async_trait;

use crate::error::ApiError;
use crate::types::{
    AudioRequest, AudioResponse, ChatCompletionRequest, ChatCompletionResponse,
    ImageCreateRequest, ImageEditRequest, ImageResponse, ImageVariationRequest, Model, ModelList,
    ModerationRequest, ModerationResponse,
};

/// The capability surface the console exercises.
///
/// Every method performs exactly one remote call and never retries.
#[async_trait]
pub trait OpenAiApi: Send + Sync {
    async fn list_models(&self) -> Result<ModelList, ApiError>;

    async fn retrieve_model(&self, id: &str) -> Result<Model, ApiError>;

    async fn create_chat_completion(
        &self,
        request: &ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse, ApiError>;

    async fn create_image(&self, request: &ImageCreateRequest) -> Result<ImageResponse, ApiError>;

    async fn create_image_variation(
        &self,
        request: ImageVariationRequest,
    ) -> Result<ImageResponse, ApiError>;

    async fn create_image_edit(&self, request: ImageEditRequest)
    -> Result<ImageResponse, ApiError>;

    async fn create_transcription(&self, request: AudioRequest)
    -> Result<AudioResponse, ApiError>;

    async fn create_translation(&self, request: AudioRequest) -> Result<AudioResponse, ApiError>;

    async fn create_moderation(
        &self,
        request: &ModerationRequest,
    ) -> Result<ModerationResponse, ApiError>;
}
