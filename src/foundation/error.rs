/// Convenience result type used across goldenframe.
pub type HarnessResult<T> = Result<T, HarnessError>;

/// Top-level error taxonomy used by the harness APIs.
///
/// Runners fold per-file errors into PASS/FAIL outcomes. Only [`HarnessError::Alloc`]
/// is fatal to a run.
#[derive(thiserror::Error, Debug)]
pub enum HarnessError {
    /// A source document could not be read, parsed or validated.
    #[error("load error: {0}")]
    Load(String),

    /// The engine failed to produce pixels for a frame.
    #[error("render error: {0}")]
    Render(String),

    /// A baseline image could not be written, read or decoded.
    #[error("baseline error: {0}")]
    Baseline(String),

    /// A render target could not be allocated.
    #[error("allocation error: {0}")]
    Alloc(String),

    /// Invalid harness configuration.
    #[error("config error: {0}")]
    Config(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl HarnessError {
    /// Build a [`HarnessError::Load`] value.
    pub fn load(msg: impl Into<String>) -> Self {
        Self::Load(msg.into())
    }

    /// Build a [`HarnessError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`HarnessError::Baseline`] value.
    pub fn baseline(msg: impl Into<String>) -> Self {
        Self::Baseline(msg.into())
    }

    /// Build a [`HarnessError::Alloc`] value.
    pub fn alloc(msg: impl Into<String>) -> Self {
        Self::Alloc(msg.into())
    }

    /// Whether the process should exit non-zero on this error.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Alloc(_))
    }

    /// Build a [`HarnessError::Config`] value.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
