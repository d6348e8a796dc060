//! Control signals raised by game code and absorbed by the frame loop.
//!
//! | Kind | Effect on `run()` |
//! |------|-------------------|
//! | `GameOver` | broadcast `"gameOver"`, set status, keep looping |
//! | `Close` | stop after the current frame, tear down, return `Ok` |
//! | `Fault` | returned to the caller as `EngineError::UnhandledSignal` |

use crate::error::EngineError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignalKind {
    GameOver,
    Close,
    /// Any kind the loop does not know how to absorb.
    Fault(String),
}

impl SignalKind {
    /// Parses the names a host layer uses; unknown names become `Fault`.
    pub fn from_name(name: &str) -> Self {
        match name.to_ascii_lowercase().as_str() {
            "gameover" | "game_over" => Self::GameOver,
            "close" => Self::Close,
            _ => Self::Fault(name.to_string()),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::GameOver => "GameOver",
            Self::Close => "Close",
            Self::Fault(name) => name,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signal {
    pub kind: SignalKind,
    pub message: String,
}

impl Signal {
    pub fn new(kind: SignalKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn game_over(message: impl Into<String>) -> Self {
        Self::new(SignalKind::GameOver, message)
    }

    pub fn close(message: impl Into<String>) -> Self {
        Self::new(SignalKind::Close, message)
    }

    pub fn into_fault(self) -> EngineError {
        EngineError::UnhandledSignal {
            kind: self.kind.name().to_string(),
            message: self.message,
        }
    }
}

/// Holds at most one pending signal. A newer signal replaces the older one.
#[derive(Debug, Default)]
pub struct SignalSlot {
    pending: Option<Signal>,
}

impl SignalSlot {
    pub fn raise(&mut self, signal: Signal) {
        if let Some(previous) = &self.pending {
            log::debug!(
                "Signal {} ({}) replaced by {} ({})",
                previous.kind.name(),
                previous.message,
                signal.kind.name(),
                signal.message
            );
        }
        self.pending = Some(signal);
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn peek(&self) -> Option<&Signal> {
        self.pending.as_ref()
    }

    pub fn take(&mut self) -> Option<Signal> {
        self.pending.take()
    }
}
