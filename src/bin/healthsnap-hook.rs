//! Placeholder hook for the automation tool: drains stdin and always succeeds.
use std::io::{self, Read};

use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "HEALTHSNAP_HOOK_LOG";

#[derive(Debug, PartialEq)]
enum Payload {
    Empty,
    Json,
    Opaque,
}

/// Parsing only keeps the caller from warning about unread input; the result is unused.
fn classify(input: &[u8]) -> Payload {
    if input.trim_ascii().is_empty() {
        return Payload::Empty;
    }
    match serde_json::from_slice::<serde_json::Value>(input) {
        Ok(_) => Payload::Json,
        Err(_) => Payload::Opaque,
    }
}

fn main() {
    // Ignores RUST_LOG so the calling tool's environment cannot make the hook talk.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("off")))
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();

    let mut input = Vec::new();
    if let Err(e) = io::stdin().lock().read_to_end(&mut input) {
        tracing::debug!(error = %e, "stdin unreadable, ignoring");
    }

    let payload = classify(&input);
    tracing::debug!(bytes = input.len(), ?payload, "hook input discarded");
}
