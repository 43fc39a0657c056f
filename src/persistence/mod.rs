//! Result-record persistence edge
//!
//! The engine produces one [`ResultRecord`] per finished session and hands it
//! to a [`ResultSink`] supplied by the host (the HTTP layer is not part of
//! this crate). Delivery is fire-and-forget: failures are logged and never
//! retried, and they never affect the session outcome the player sees.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Final tallies for one finished session; serialized as the POST body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultRecord {
    pub level: String,
    pub score: i32,
    /// Seconds; session clock or accumulated answer time, per game.
    pub time: f64,
    pub rounds: u32,
    /// Mean successful-answer time, 2-decimal; tapping memory only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avg_time: Option<f64>,
}

/// Endpoint a game's results are posted to.
pub fn endpoint_path(game_name: &str) -> String {
    format!("/game/{game_name}/save_result")
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PersistError {
    #[error("transport failure: {0}")]
    Transport(String),
    #[error("server rejected result: status {0}")]
    Rejected(u16),
}

/// Posts one result record. Implemented by the host's network layer; tests
/// use in-memory recorders.
pub trait ResultSink {
    fn submit(&mut self, path: &str, record: &ResultRecord) -> Result<(), PersistError>;
}

/// Deliver a record to the sink. Errors are logged, never retried.
pub fn persist(sink: &mut dyn ResultSink, game_name: &str, record: &ResultRecord) {
    let path = endpoint_path(game_name);
    match sink.submit(&path, record) {
        Ok(()) => log::info!("result saved for {game_name}: score {}", record.score),
        Err(err) => log::error!("failed to save result for {game_name}: {err}"),
    }
}
