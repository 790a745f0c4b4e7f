//! Error types for resource ownership.
//!
//! Only [`ResourceError::Conversion`] is ever returned to a caller. The other
//! variants describe contract violations; they are built so the failure can
//! be logged right before the process aborts.

use thiserror::Error;

/// Result type for fallible resource construction.
pub type Result<T> = std::result::Result<T, ResourceError>;

/// Errors raised while binding or releasing a resource.
#[derive(Debug, Error)]
pub enum ResourceError {
    /// The initial value could not be converted into the resource type.
    ///
    /// No releaser was armed, so nothing needs cleaning up.
    #[error("cannot convert initial value into `{target}`: {source}")]
    Conversion {
        /// Name of the resource type being constructed.
        target: &'static str,
        /// The conversion failure.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// A wrapper was constructed without a releaser.
    #[error("no releaser supplied for resource `{resource}`")]
    MissingReleaser {
        /// Name of the resource type.
        resource: &'static str,
    },

    /// A releaser returned an error or panicked during release.
    #[error("releaser for resource `{resource}` failed: {reason}")]
    ReleaseFailed {
        /// Name of the resource type.
        resource: &'static str,
        /// What went wrong.
        reason: String,
    },
}

impl ResourceError {
    /// Creates a conversion error for the resource type `T`.
    pub fn conversion<T, E>(source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Conversion {
            target: std::any::type_name::<T>(),
            source: Box::new(source),
        }
    }

    /// Creates a missing-releaser error for the resource type `T`.
    #[must_use]
    pub fn missing_releaser<T>() -> Self {
        Self::MissingReleaser {
            resource: std::any::type_name::<T>(),
        }
    }

    /// Creates a release failure for the resource type `T`.
    pub fn release_failed<T>(reason: impl Into<String>) -> Self {
        Self::ReleaseFailed {
            resource: std::any::type_name::<T>(),
            reason: reason.into(),
        }
    }

    /// Returns true if this error leaves the program in a state that cannot
    /// continue.
    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        !matches!(self, Self::Conversion { .. })
    }
}
