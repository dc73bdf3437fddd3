//! One-shot endpoint commands.
//!
//! Every command builds one request, performs one call and prints either
//! `Error: <message>` or the formatted result. None of them retry.

pub mod audio;
pub mod images;
pub mod models;
pub mod moderation;

use std::fmt::Display;

use serde::Serialize;
use tracing::debug;

use crate::console::Console;
use crate::render::to_pretty_json;

/// Result of a command, as seen by the entry point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Succeeded,
    Failed,
}

/// Print a failure the same way for every error source.
pub fn report_failure<C: Console + ?Sized>(console: &mut C, error: &dyn Display) -> Outcome {
    debug!(error = %error, "Command failed");
    console.print(&format!("Error: {error}"));
    Outcome::Failed
}

/// Print `value` as pretty JSON.
pub(crate) fn print_json<C, T>(console: &mut C, value: &T) -> Outcome
where
    C: Console + ?Sized,
    T: Serialize + ?Sized,
{
    match to_pretty_json(value) {
        Ok(json) => {
            console.print(&json);
            Outcome::Succeeded
        }
        Err(e) => report_failure(console, &e),
    }
}
