/// Convenience result type used across quadblit.
pub type QuadblitResult<T> = Result<T, QuadblitError>;

/// Top-level error taxonomy used at the crate boundary.
///
/// The numeric core (blend, composite, transforms, sampling, scan loops) never fails; these
/// errors only come out of constructors that accept caller buffers and out of script loading.
#[derive(thiserror::Error, Debug)]
pub enum QuadblitError {
    /// Invalid user-provided buffers, dimensions or arguments.
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors when serializing or deserializing scripts.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl QuadblitError {
    /// Build a [`QuadblitError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`QuadblitError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

impl From<serde_json::Error> for QuadblitError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serde(err.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
