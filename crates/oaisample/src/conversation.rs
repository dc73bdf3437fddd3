//! Interactive multi-turn chat.
//!
//! Each round:
//! 1. Send the whole transcript to the completion endpoint
//! 2. Append the first candidate's reply as an assistant turn and print it
//! 3. If the reply ended naturally, read one line from the user; empty or
//!    absent input ends the conversation, anything else becomes a user turn
//! 4. If the reply was cut short (e.g. by the token cap), send the transcript
//!    again without new user input
//!
//! The loop ends only on an endpoint failure, on empty/absent input after a
//! natural stop, or on cancellation.

use oaisample_client::types::{ChatCompletionRequest, Transcript};
use oaisample_client::{ApiError, OpenAiApi};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};
use ulid::Ulid;

use crate::cancel::cancellable;
use crate::commands::{Outcome, report_failure};
use crate::config::ChatConfig;
use crate::console::Console;

/// Printed before waiting for the next user line.
pub const INPUT_PROMPT: &str = "input waiting...";

/// How a conversation ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConversationExit {
    /// The user supplied no further input after a natural stop.
    InputExhausted,
    /// The endpoint or the console reported an error.
    Failed,
    /// The cancellation token fired.
    Cancelled,
}

impl ConversationExit {
    pub fn outcome(self) -> Outcome {
        match self {
            ConversationExit::InputExhausted => Outcome::Succeeded,
            ConversationExit::Failed | ConversationExit::Cancelled => Outcome::Failed,
        }
    }
}

/// Final state of a conversation.
#[derive(Debug)]
pub struct ConversationOutcome {
    pub transcript: Transcript,
    /// Completion requests that ran to a response or an error; cancelled
    /// calls are not counted.
    pub requests: u32,
    pub exit: ConversationExit,
}

/// Fresh caller identifier for a single completion request.
///
/// Regenerated for every request, so the provider sees a new caller each turn.
fn caller_id() -> String {
    Ulid::new().to_string()
}

/// Run a conversation until the user stops answering.
///
/// With `transcript == None` a new one is started from `system_prompt` and
/// `first_question`; otherwise both are ignored and the given transcript is
/// continued.
pub async fn run_conversation<C: Console>(
    api: &dyn OpenAiApi,
    console: &mut C,
    chat: &ChatConfig,
    system_prompt: &str,
    first_question: &str,
    transcript: Option<Transcript>,
    cancel: &CancellationToken,
) -> ConversationOutcome {
    let mut transcript =
        transcript.unwrap_or_else(|| Transcript::new(system_prompt, first_question));
    let mut requests = 0u32;

    let exit = loop {
        let request = ChatCompletionRequest {
            model: chat.model.clone(),
            messages: transcript.messages().to_vec(),
            max_tokens: Some(chat.max_tokens),
            n: Some(chat.candidates),
            user: Some(caller_id()),
        };

        debug!(
            round = requests + 1,
            messages_count = transcript.len(),
            "Requesting chat completion"
        );

        let result = cancellable(cancel, api.create_chat_completion(&request)).await;
        if !matches!(result, Err(ApiError::Cancelled)) {
            requests += 1;
        }
        let result =
            result.and_then(|r| r.choices.into_iter().next().ok_or(ApiError::EmptyResponse));
        let choice = match result {
            Ok(choice) => choice,
            Err(e) => {
                report_failure(console, &e);
                break match e {
                    ApiError::Cancelled => ConversationExit::Cancelled,
                    _ => ConversationExit::Failed,
                };
            }
        };

        let content = choice.content().to_string();
        transcript.push_assistant(content.as_str());
        console.print(&content);

        if choice.is_natural_stop() {
            console.print(INPUT_PROMPT);

            let line = tokio::select! {
                biased;
                () = cancel.cancelled() => {
                    report_failure(console, &ApiError::Cancelled);
                    break ConversationExit::Cancelled;
                }
                line = console.read_line() => line,
            };

            match line {
                Ok(Some(input)) if !input.is_empty() => transcript.push_user(input),
                Ok(_) => break ConversationExit::InputExhausted,
                Err(e) => {
                    report_failure(console, &format!("failed to read input: {e}"));
                    break ConversationExit::Failed;
                }
            }
        } else {
            warn!(
                finish_reason = choice.finish_reason.as_deref().unwrap_or("none"),
                "Reply did not end naturally; resending transcript without new input"
            );
        }
    };

    debug!(?exit, requests, messages_count = transcript.len(), "Conversation ended");
    ConversationOutcome {
        transcript,
        requests,
        exit,
    }
}
