//! Request and response types for the provider API.

mod audio;
mod chat;
mod images;
mod models;
mod moderation;

pub use audio::{AudioRequest, AudioResponse, AudioSegment, AudioTranscript};
pub use chat::{
    ChatCompletionRequest, ChatCompletionResponse, ChatMessage, Choice, NATURAL_STOP,
    ResponseMessage, Role, Transcript, Usage,
};
pub use images::{
    ImageCreateRequest, ImageData, ImageEditRequest, ImageResponse, ImageVariationRequest,
};
pub use models::{Model, ModelList};
pub use moderation::{ModerationRequest, ModerationResponse, ModerationResult};
