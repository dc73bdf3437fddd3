//! Client for the OpenAI HTTP API.
//!
//! [`OpenAiApi`] is the seam the console programs against; [`OpenAiClient`]
//! is its `reqwest` implementation.

mod error;
mod openai;
mod provider;
pub mod types;

pub use error::ApiError;
pub use openai::{ClientConfig, OpenAiClient};
pub use provider::OpenAiApi;
