use thiserror::Error;

/// Failure of a single address lookup.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeocodeError {
    #[error("Address not found")]
    NotFound,
    #[error("{0}")]
    Network(String),
}

/// Failure of a single route computation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteError {
    /// The backend answered with a non-success status.
    #[error("{0}")]
    Service(String),
    /// The request never produced a decodable answer.
    #[error("{0}")]
    Transport(String),
}

impl RouteError {
    pub fn message(&self) -> &str {
        match self {
            Self::Service(message) | Self::Transport(message) => message,
        }
    }
}
