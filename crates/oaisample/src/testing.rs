//! Test doubles for the provider API and the console.

use std::collections::{HashMap, VecDeque};
use std::io;
use std::sync::Mutex;

use async_trait::async_trait;
use oaisample_client::types::{
    AudioRequest, AudioResponse, AudioTranscript, ChatCompletionRequest, ChatCompletionResponse,
    Choice, ImageCreateRequest, ImageEditRequest, ImageResponse, ImageVariationRequest, Model,
    ModelList, ModerationRequest, ModerationResponse, ResponseMessage, Role,
};
use oaisample_client::{ApiError, OpenAiApi};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::console::Console;

// ============================================================================
// ScriptedApi
// ============================================================================

/// A recorded call to the API double.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    pub operation: &'static str,
    /// Upload name and size for multipart operations.
    pub upload: Option<(String, usize)>,
}

/// `OpenAiApi` double.
///
/// Chat completions are served from a queue; an exhausted queue is a test bug
/// and panics. Other operations return the JSON registered with
/// [`ScriptedApi::respond`] or the error registered with [`ScriptedApi::fail`].
#[derive(Default)]
pub struct ScriptedApi {
    chat: Mutex<VecDeque<Result<ChatCompletionResponse, ApiError>>>,
    chat_requests: Mutex<Vec<ChatCompletionRequest>>,
    canned: Mutex<HashMap<&'static str, Value>>,
    failures: Mutex<HashMap<&'static str, ApiError>>,
    calls: Mutex<Vec<RecordedCall>>,
    audio_requests: Mutex<Vec<AudioRequest>>,
}

impl ScriptedApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_reply(&self, content: &str, finish_reason: &str) -> &Self {
        self.chat.lock().unwrap().push_back(Ok(reply(content, finish_reason)));
        self
    }

    pub fn push_chat_error(&self, error: ApiError) -> &Self {
        self.chat.lock().unwrap().push_back(Err(error));
        self
    }

    pub fn push_chat_response(&self, response: ChatCompletionResponse) -> &Self {
        self.chat.lock().unwrap().push_back(Ok(response));
        self
    }

    pub fn respond(&self, operation: &'static str, value: Value) -> &Self {
        self.canned.lock().unwrap().insert(operation, value);
        self
    }

    pub fn fail(&self, operation: &'static str, error: ApiError) -> &Self {
        self.failures.lock().unwrap().insert(operation, error);
        self
    }

    pub fn chat_requests(&self) -> Vec<ChatCompletionRequest> {
        self.chat_requests.lock().unwrap().clone()
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn audio_requests(&self) -> Vec<AudioRequest> {
        self.audio_requests.lock().unwrap().clone()
    }

    fn record(&self, operation: &'static str, upload: Option<(String, usize)>) {
        self.calls
            .lock()
            .unwrap()
            .push(RecordedCall { operation, upload });
    }

    fn canned<T: DeserializeOwned>(&self, operation: &'static str) -> Result<T, ApiError> {
        if let Some(error) = self.failures.lock().unwrap().remove(operation) {
            return Err(error);
        }
        let value = self
            .canned
            .lock()
            .unwrap()
            .get(operation)
            .cloned()
            .unwrap_or_else(|| panic!("no canned response for {operation}"));
        Ok(serde_json::from_value(value)?)
    }
}

/// A single-candidate completion response.
pub fn reply(content: &str, finish_reason: &str) -> ChatCompletionResponse {
    ChatCompletionResponse {
        id: "chatcmpl-test".to_string(),
        object: "chat.completion".to_string(),
        created: 0,
        model: "gpt-3.5-turbo".to_string(),
        choices: vec![Choice {
            index: 0,
            message: ResponseMessage {
                role: Role::Assistant,
                content: Some(content.to_string()),
            },
            finish_reason: Some(finish_reason.to_string()),
        }],
        usage: None,
    }
}

#[async_trait]
impl OpenAiApi for ScriptedApi {
    async fn list_models(&self) -> Result<ModelList, ApiError> {
        self.record("list_models", None);
        self.canned("list_models")
    }

    async fn retrieve_model(&self, _id: &str) -> Result<Model, ApiError> {
        self.record("retrieve_model", None);
        self.canned("retrieve_model")
    }

    async fn create_chat_completion(
        &self,
        request: &ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse, ApiError> {
        self.record("create_chat_completion", None);
        self.chat_requests.lock().unwrap().push(request.clone());
        self.chat
            .lock()
            .unwrap()
            .pop_front()
            .expect("unexpected chat completion call")
    }

    async fn create_image(&self, _request: &ImageCreateRequest) -> Result<ImageResponse, ApiError> {
        self.record("create_image", None);
        self.canned("create_image")
    }

    async fn create_image_variation(
        &self,
        request: ImageVariationRequest,
    ) -> Result<ImageResponse, ApiError> {
        self.record(
            "create_image_variation",
            Some((request.image_name, request.image.len())),
        );
        self.canned("create_image_variation")
    }

    async fn create_image_edit(
        &self,
        request: ImageEditRequest,
    ) -> Result<ImageResponse, ApiError> {
        self.record(
            "create_image_edit",
            Some((request.image_name, request.image.len())),
        );
        self.canned("create_image_edit")
    }

    async fn create_transcription(
        &self,
        request: AudioRequest,
    ) -> Result<AudioResponse, ApiError> {
        self.record(
            "create_transcription",
            Some((request.file_name.clone(), request.file.len())),
        );
        self.audio_requests.lock().unwrap().push(request);
        self.canned::<AudioTranscript>("create_transcription")
            .map(AudioResponse::Json)
    }

    async fn create_translation(&self, request: AudioRequest) -> Result<AudioResponse, ApiError> {
        self.record(
            "create_translation",
            Some((request.file_name.clone(), request.file.len())),
        );
        self.audio_requests.lock().unwrap().push(request);
        self.canned::<String>("create_translation")
            .map(AudioResponse::Text)
    }

    async fn create_moderation(
        &self,
        _request: &ModerationRequest,
    ) -> Result<ModerationResponse, ApiError> {
        self.record("create_moderation", None);
        self.canned("create_moderation")
    }
}

// ============================================================================
// ScriptedConsole
// ============================================================================

/// Console double: serves queued input lines and captures printed output.
///
/// A queued `None` is a read that never completes.
#[derive(Default)]
pub struct ScriptedConsole {
    inputs: VecDeque<Option<io::Result<Option<String>>>>,
    pub output: Vec<String>,
    pub reads: usize,
}

impl ScriptedConsole {
    pub fn with_inputs<'a>(inputs: impl IntoIterator<Item = &'a str>) -> Self {
        Self {
            inputs: inputs
                .into_iter()
                .map(|line| Some(Ok(Some(line.to_string()))))
                .collect(),
            ..Self::default()
        }
    }

    pub fn push_eof(&mut self) {
        self.inputs.push_back(Some(Ok(None)));
    }

    pub fn push_pending_read(&mut self) {
        self.inputs.push_back(None);
    }

    pub fn push_read_error(&mut self, error: io::Error) {
        self.inputs.push_back(Some(Err(error)));
    }

    pub fn printed(&self) -> String {
        self.output.join("\n")
    }
}

#[async_trait]
impl Console for ScriptedConsole {
    fn print(&mut self, text: &str) {
        self.output.push(text.to_string());
    }

    async fn read_line(&mut self) -> io::Result<Option<String>> {
        self.reads += 1;
        match self.inputs.pop_front() {
            Some(Some(result)) => result,
            Some(None) => std::future::pending().await,
            None => Ok(None),
        }
    }
}
