//! Engine error types

use thiserror::Error;

/// Fatal configuration problems.
///
/// These surface at the boundary (parsing a level tag from the UI, wiring a
/// game up) before a session is running. The engine never tries to recover
/// from them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("unknown difficulty level {0:?}")]
    UnknownLevel(String),
}
