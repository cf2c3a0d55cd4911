//! Error types for environment operations.

use thiserror::Error;

/// Errors surfaced to the controller driving the environment.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EnvError {
    /// Action index outside the discrete action space.
    #[error("invalid action {action}: expected 0 (left), 1 (right), 2 (up) or 3 (down)")]
    InvalidAction { action: usize },

    /// Construction-time configuration rejected by validation.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Externally supplied snake or game state breaks the grid invariants.
    #[error("invalid state: {0}")]
    InvalidState(String),
}
