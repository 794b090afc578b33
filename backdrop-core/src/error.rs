use thiserror::Error;

/// Reasons the backdrop could not start.
///
/// None of these are meant to reach the user: the host logs them and
/// carries on without a backdrop.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BackdropError {
    #[error("drawing surface unavailable: {0}")]
    SurfaceUnavailable(String),

    #[error("failed to register input listeners: {0}")]
    ListenerRegistration(String),

    #[error("frame loop is already running")]
    AlreadyRunning,

    #[error("frame loop has been stopped and cannot be restarted")]
    Stopped,
}

pub type Result<T> = std::result::Result<T, BackdropError>;
