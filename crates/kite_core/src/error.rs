//! Engine fault taxonomy.
//!
//! Faults travel on the `Result` channel. Control signals (game over, close)
//! are not faults and never appear here, except for a signal kind the frame
//! loop does not recognize, which surfaces as [`EngineError::UnhandledSignal`].

use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    /// A required subsystem (window, graphics, text, image) failed to start.
    #[error("initialization failed: {0}")]
    Initialization(String),

    #[error("\"{0}\" doesn't exist!")]
    ImageNotFound(String),

    #[error("\"{0}\" doesn't exist!")]
    FontNotFound(String),

    #[error("Key {0} not exist!")]
    UnknownKey(String),

    /// Wraps whatever went wrong while delivering a notification.
    #[error("error in notify: {0}")]
    NotifyDispatch(String),

    #[error("unhandled signal '{kind}': {message}")]
    UnhandledSignal { kind: String, message: String },

    #[error("engine is not initialized")]
    NotInitialized,

    #[error("invalid engine state: expected {expected}, got {actual}")]
    InvalidState {
        expected: &'static str,
        actual: &'static str,
    },

    #[error("render error: {0}")]
    Render(String),

    #[error("config error: {0}")]
    Config(String),

    /// Raised by component code for its own failures.
    #[error("component error: {0}")]
    Component(String),
}

pub type Result<T> = std::result::Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn asset_errors_quote_the_path() {
        let err = EngineError::ImageNotFound("textures/missing.png".to_string());
        assert_eq!(err.to_string(), "\"textures/missing.png\" doesn't exist!");
    }

    #[test]
    fn unknown_key_names_the_key() {
        let err = EngineError::UnknownKey("hyper".to_string());
        assert!(err.to_string().contains("hyper"));
    }
}
