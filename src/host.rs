//! Newline-delimited JSON host for the web search node.
//!
//! Reads one [`GraphState`] per line, runs [`web_search_node`], and writes
//! one [`StateUpdate`] line per input. A line that cannot be decoded gets
//! an `{"error": "..."}` line back so the caller stays in lock-step.
//!
//! Stdout is exclusively reserved for the JSON protocol; all diagnostic
//! output (tracing, logs) must be routed to stderr.

use law_search::SearchConfig;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

use crate::error::Result;
use crate::node::web_search_node;
use crate::state::GraphState;

/// Serve node requests from `reader` until EOF, writing replies to `writer`.
///
/// # Errors
///
/// Returns [`crate::AppError::Io`] if reading or writing fails.
pub async fn run_node_host<R, W>(config: &SearchConfig, reader: R, mut writer: W) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = reader.lines();
    let mut handled = 0u64;

    while let Some(line) = lines.next_line().await? {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        let reply = handle_line(config, trimmed).await;
        writer.write_all(reply.as_bytes()).await?;
        writer.write_all(b"\n").await?;
        writer.flush().await?;
        handled += 1;
    }

    tracing::info!(handled, "input closed (EOF); shutting down node host");
    Ok(())
}

/// Decode one state line, run the node, and encode the reply.
async fn handle_line(config: &SearchConfig, line: &str) -> String {
    let state: GraphState = match serde_json::from_str(line) {
        Ok(state) => state,
        Err(e) => {
            tracing::error!(error = %e, "failed to decode workflow state; skipping");
            return error_line(&format!("invalid state: {e}"));
        }
    };

    let update = web_search_node(&state, config).await;
    match serde_json::to_string(&update) {
        Ok(json) => json,
        Err(e) => {
            tracing::error!(error = %e, "failed to serialize state update");
            error_line(&format!("failed to serialize update: {e}"))
        }
    }
}

fn error_line(message: &str) -> String {
    serde_json::json!({ "error": message }).to_string()
}
