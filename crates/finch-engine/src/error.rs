use std::fmt;

use thiserror::Error;

use crate::resources::ResourceError;

/// Lifecycle hook identifier carried by [`EngineError::Hook`].
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Hook {
    Startup,
    Shutdown,
}

impl fmt::Display for Hook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Hook::Startup => f.write_str("startup"),
            Hook::Shutdown => f.write_str("shutdown"),
        }
    }
}

/// Update phase identifier carried by [`EngineError::Phase`].
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Phase {
    Early,
    Fixed,
    Late,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Early => f.write_str("early update"),
            Phase::Fixed => f.write_str("fixed update"),
            Phase::Late => f.write_str("late update"),
        }
    }
}

/// Fatal engine error.
///
/// Every variant is terminal for the current run: the host runtime stops its
/// loop and `Runtime::run` hands the error back to the caller. Nothing is
/// retried.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Invalid configuration detected before the run loop starts.
    #[error("invalid configuration: {0}")]
    Configuration(String),

    #[error("{hook} hook failed")]
    Hook {
        hook: Hook,
        #[source]
        source: anyhow::Error,
    },

    #[error("{phase} phase failed")]
    Phase {
        phase: Phase,
        #[source]
        source: anyhow::Error,
    },

    #[error("render phase failed")]
    Render(#[source] anyhow::Error),

    /// Driver entry points called out of lifecycle order.
    #[error("lifecycle violation: {0}")]
    Lifecycle(String),

    #[error(transparent)]
    Resource(#[from] ResourceError),

    /// Event loop, window or GPU failure inside the host runtime.
    #[error("host runtime failure")]
    Host(#[source] anyhow::Error),
}

impl EngineError {
    pub(crate) fn config(msg: impl Into<String>) -> Self {
        EngineError::Configuration(msg.into())
    }

    /// Returns the update phase that failed, if this is a phase error.
    pub fn phase(&self) -> Option<Phase> {
        match self {
            EngineError::Phase { phase, .. } => Some(*phase),
            _ => None,
        }
    }
}
