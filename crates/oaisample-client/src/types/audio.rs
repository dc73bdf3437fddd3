//! Audio transcription and translation types.

use serde::{Deserialize, Serialize};

/// Multipart request shared by `/audio/transcriptions` and `/audio/translations`.
#[derive(Debug, Clone)]
pub struct AudioRequest {
    pub file: Vec<u8>,
    pub file_name: String,
    pub model: String,
    pub language: Option<String>,
    pub response_format: String,
}

impl AudioRequest {
    /// Whether the chosen response format yields a JSON body.
    pub fn expects_json(&self) -> bool {
        matches!(self.response_format.as_str(), "json" | "verbose_json")
    }
}

/// Audio endpoint result: structured for JSON formats, raw for `text`, `srt` and `vtt`.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum AudioResponse {
    Json(AudioTranscript),
    Text(String),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AudioTranscript {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    /// Duration of the input audio in seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub segments: Option<Vec<AudioSegment>>,
}

/// One timed segment of a `verbose_json` result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AudioSegment {
    pub id: u32,
    #[serde(default)]
    pub seek: u32,
    pub start: f64,
    pub end: f64,
    pub text: String,
    #[serde(default)]
    pub tokens: Vec<u32>,
    #[serde(default)]
    pub temperature: f64,
    #[serde(default)]
    pub avg_logprob: f64,
    #[serde(default)]
    pub compression_ratio: f64,
    #[serde(default)]
    pub no_speech_prob: f64,
}
