//! Line Router - route newline-delimited JSON from stdin.
//!
//! This example demonstrates:
//! - Building an async dispatcher with the builder pattern
//! - Handlers for several message shapes arriving on one channel
//! - Reporting each dispatch outcome
//!
//! # Running
//!
//! ```sh
//! printf '%s\n' '{"user":"ada","text":"hi"}' '{"user":"ada"}' '{"ping":1}' \
//!     | RUST_LOG=debug cargo run --example line_router
//! ```

use decodable_dispatch::{AsyncDispatcher, BoxError, DispatchOutcome};
use serde::Deserialize;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

/// A chat message.
#[derive(Deserialize, Clone, Debug)]
struct Chat {
    user: String,
    text: String,
}

/// A presence update.
#[derive(Deserialize, Clone, Debug)]
struct Presence {
    user: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let dispatcher = AsyncDispatcher::builder()
        .handle(|chat: Chat| async move {
            if chat.text.trim().is_empty() {
                return Err(BoxError::from("empty chat message"));
            }
            println!("<{}> {}", chat.user, chat.text);
            Ok(())
        })
        .handle(|presence: Presence| async move {
            println!("* {} is here", presence.user);
            Ok(())
        })
        .build();

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }

        match dispatcher.dispatch(line.as_bytes()).await {
            DispatchOutcome::Handled { handler, .. } => {
                tracing::info!("Handled by #{}", handler.index());
            }
            DispatchOutcome::HandlerFailed { message, failures } => {
                for failure in &failures {
                    tracing::warn!(
                        "Handler #{} failed for {}: {}",
                        failure.handler.index(),
                        message.type_name(),
                        failure.error
                    );
                }
            }
            DispatchOutcome::Unsupported => {
                tracing::warn!("Unsupported message: {}", line);
            }
        }
    }

    Ok(())
}
