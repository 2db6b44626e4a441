//! # precedent-retrieval
//!
//! Web search node for a legal question-answering workflow.
//!
//! When local precedent retrieval comes up short, the workflow extracts
//! search keywords and visits this node. It runs one retrieval pass
//! against the national law information Open API through [`law_search`]
//! and hands back the precedents plus an updated attempt counter.
//!
//! - [`state`]: the slice of workflow state this node reads and writes
//! - [`node`]: the node entry point
//! - [`config`]: TOML tunables merged with environment credentials
//! - [`host`]: newline-delimited JSON host used by the `precedent-node` binary

pub mod config;
pub mod error;
pub mod host;
pub mod node;
pub mod state;

pub use config::{AppConfig, WebSearchConfig};
pub use error::{AppError, Result};
pub use host::run_node_host;
pub use node::web_search_node;
pub use state::{GraphState, StateUpdate};
