//! oaisample - a console for exercising the OpenAI HTTP API.
//!
//! One invocation runs one operation: a model lookup, an image or audio
//! request, a moderation check, or an interactive conversation.

pub mod cancel;
pub mod cli;
pub mod commands;
pub mod config;
pub mod console;
pub mod conversation;
pub mod payload;
pub mod render;

#[cfg(test)]
mod testing;
