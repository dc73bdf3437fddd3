//! Chat completion types.

use serde::{Deserialize, Serialize};

/// Finish reason reported when the model ended generation on its own.
pub const NATURAL_STOP: &str = "stop";

/// The role of a message sender.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// A message in a chat conversation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// Ordered conversation history, replayed verbatim on every request.
///
/// Starts as `[system, user]` and only ever grows at the end. [`Transcript::new`]
/// is the only constructor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transcript {
    messages: Vec<ChatMessage>,
}

impl Transcript {
    pub fn new(system_prompt: impl Into<String>, first_question: impl Into<String>) -> Self {
        Self {
            messages: vec![
                ChatMessage::system(system_prompt),
                ChatMessage::user(first_question),
            ],
        }
    }

    pub fn push_assistant(&mut self, content: impl Into<String>) {
        self.messages.push(ChatMessage::assistant(content));
    }

    pub fn push_user(&mut self, content: impl Into<String>) {
        self.messages.push(ChatMessage::user(content));
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Always false: the opening system and user turns are never removed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn last(&self) -> Option<&ChatMessage> {
        self.messages.last()
    }
}

/// A chat completion request.
#[derive(Debug, Clone, Serialize)]
pub struct ChatCompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub n: Option<u32>,
    /// Caller identifier forwarded to the provider for abuse monitoring.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
}

/// A chat completion response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatCompletionResponse {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub object: String,
    #[serde(default)]
    pub created: u64,
    #[serde(default)]
    pub model: String,
    pub choices: Vec<Choice>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage: Option<Usage>,
}

/// A single completion candidate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Choice {
    #[serde(default)]
    pub index: u32,
    pub message: ResponseMessage,
    pub finish_reason: Option<String>,
}

impl Choice {
    /// Whether generation ended naturally rather than by truncation or filtering.
    pub fn is_natural_stop(&self) -> bool {
        self.finish_reason.as_deref() == Some(NATURAL_STOP)
    }

    /// The reply text; a missing content is read as empty.
    pub fn content(&self) -> &str {
        self.message.content.as_deref().unwrap_or_default()
    }
}

/// Message as returned by the provider (content may be `null`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResponseMessage {
    pub role: Role,
    pub content: Option<String>,
}

/// Token usage statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Usage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transcript_starts_with_system_and_user() {
        let transcript = Transcript::new("You are an assistant.", "What year?");
        assert_eq!(transcript.len(), 2);
        assert_eq!(transcript.messages()[0], ChatMessage::system("You are an assistant."));
        assert_eq!(transcript.messages()[1], ChatMessage::user("What year?"));
    }

    #[test]
    fn transcript_from_blank_prompts_still_opens_with_system() {
        let transcript = Transcript::new("", "");
        assert!(!transcript.is_empty());
        assert_eq!(transcript.messages()[0].role, Role::System);
        assert_eq!(transcript.messages()[1].role, Role::User);
    }

    #[test]
    fn transcript_appends_keep_prefix() {
        let mut transcript = Transcript::new("sys", "q");
        let before = transcript.messages().to_vec();

        transcript.push_assistant("a");
        transcript.push_user("more");

        assert_eq!(&transcript.messages()[..2], before.as_slice());
        assert_eq!(transcript.last(), Some(&ChatMessage::user("more")));
        assert_eq!(transcript.messages()[2].role, Role::Assistant);
    }

    #[test]
    fn request_omits_unset_fields() {
        let request = ChatCompletionRequest {
            model: "gpt-3.5-turbo".to_string(),
            messages: vec![ChatMessage::user("Hi")],
            max_tokens: None,
            n: None,
            user: None,
        };

        let json = serde_json::to_string(&request).unwrap();
        assert!(json.contains("\"model\":\"gpt-3.5-turbo\""));
        assert!(json.contains("\"role\":\"user\""));
        assert!(!json.contains("max_tokens"));
        assert!(!json.contains("\"n\""));
        assert!(!json.contains("\"user\":"));
    }

    #[test]
    fn request_carries_limits_and_caller() {
        let request = ChatCompletionRequest {
            model: "gpt-3.5-turbo".to_string(),
            messages: vec![ChatMessage::system("sys")],
            max_tokens: Some(30),
            n: Some(1),
            user: Some("01HZX".to_string()),
        };

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["max_tokens"], 30);
        assert_eq!(json["n"], 1);
        assert_eq!(json["user"], "01HZX");
        assert_eq!(json["messages"][0]["role"], "system");
    }

    #[test]
    fn response_deserialization() {
        let json = r#"{
            "id": "chatcmpl-123",
            "object": "chat.completion",
            "created": 1677652288,
            "model": "gpt-3.5-turbo-0613",
            "choices": [
                {
                    "index": 0,
                    "message": {"role": "assistant", "content": "It was 2021."},
                    "finish_reason": "stop"
                }
            ],
            "usage": {"prompt_tokens": 9, "completion_tokens": 5, "total_tokens": 14}
        }"#;

        let response: ChatCompletionResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.id, "chatcmpl-123");
        assert_eq!(response.choices.len(), 1);
        assert!(response.choices[0].is_natural_stop());
        assert_eq!(response.choices[0].content(), "It was 2021.");
        assert_eq!(response.usage.unwrap().total_tokens, 14);
    }

    #[test]
    fn truncated_choice_is_not_natural_stop() {
        let json = r#"{
            "choices": [
                {"index": 0, "message": {"role": "assistant", "content": null}, "finish_reason": "length"}
            ]
        }"#;

        let response: ChatCompletionResponse = serde_json::from_str(json).unwrap();
        let choice = &response.choices[0];
        assert!(!choice.is_natural_stop());
        assert_eq!(choice.content(), "");
        assert!(response.usage.is_none());
    }

    #[test]
    fn missing_finish_reason_is_not_natural_stop() {
        let choice = Choice {
            index: 0,
            message: ResponseMessage {
                role: Role::Assistant,
                content: Some("x".to_string()),
            },
            finish_reason: None,
        };
        assert!(!choice.is_natural_stop());
    }

    #[test]
    fn roles_serialize_lowercase() {
        assert_eq!(serde_json::to_string(&Role::System).unwrap(), "\"system\"");
        assert_eq!(serde_json::to_string(&Role::User).unwrap(), "\"user\"");
        assert_eq!(
            serde_json::from_str::<Role>("\"assistant\"").unwrap(),
            Role::Assistant
        );
    }
}
