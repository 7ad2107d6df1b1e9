/// Convenience result type used across Framefit.
pub type FramefitResult<T> = Result<T, FramefitError>;

/// Top-level error taxonomy used by engine APIs.
#[derive(thiserror::Error, Debug)]
pub enum FramefitError {
    /// Template geometry or background is missing or malformed.
    #[error("invalid template manifest: {0}")]
    ManifestInvalid(String),

    /// Artwork bytes are not a decodable image.
    #[error("invalid artwork: {0}")]
    ArtworkInvalid(String),

    /// Corner geometry collapses or the homography solve is singular.
    #[error("degenerate geometry: {0}")]
    DegenerateGeometry(String),

    /// Final image serialization failed.
    #[error("encoding error: {0}")]
    Encoding(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl FramefitError {
    /// Build a [`FramefitError::ManifestInvalid`] value.
    pub fn manifest_invalid(msg: impl Into<String>) -> Self {
        Self::ManifestInvalid(msg.into())
    }

    /// Build a [`FramefitError::ArtworkInvalid`] value.
    pub fn artwork_invalid(msg: impl Into<String>) -> Self {
        Self::ArtworkInvalid(msg.into())
    }

    /// Build a [`FramefitError::DegenerateGeometry`] value.
    pub fn degenerate_geometry(msg: impl Into<String>) -> Self {
        Self::DegenerateGeometry(msg.into())
    }

    /// Build a [`FramefitError::Encoding`] value.
    pub fn encoding(msg: impl Into<String>) -> Self {
        Self::Encoding(msg.into())
    }

    /// Stable machine-readable code for callers that serialize failures.
    pub fn code(&self) -> &'static str {
        match self {
            Self::ManifestInvalid(_) => "manifest_invalid",
            Self::ArtworkInvalid(_) => "artwork_invalid",
            Self::DegenerateGeometry(_) => "degenerate_geometry",
            Self::Encoding(_) => "encoding_error",
            Self::Other(_) => "internal",
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
