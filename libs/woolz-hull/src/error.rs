//! # Error Types
//!
//! Error types for convex hull construction. Parameter and allocation errors
//! abort a computation; degenerate input is not an error and is reported
//! through [`crate::HullStatus`] alongside a usable domain.

use config::constants::ConfigError;
use thiserror::Error;

use crate::point::VertexType;

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Errors that can occur while computing a convex hull.
///
/// ## Example
///
/// ```rust
/// use woolz_hull::{convex_hull_3d, HullError, VertexType};
///
/// match convex_hull_3d(VertexType::D3, 3, None) {
///     Err(HullError::ParamData { message }) => assert!(message.contains("at least 4")),
///     other => panic!("unexpected: {other:?}"),
/// }
/// ```
#[derive(Error, Debug)]
pub enum HullError {
    /// No vertex array was given.
    #[error("Null parameter: no vertices given")]
    ParamNull,

    /// Too few points, or the hull topology became inconsistent.
    ///
    /// Topology failures signal a bug or accumulated floating point error,
    /// never an expected outcome for valid input.
    #[error("Invalid parameter data: {message}")]
    ParamData {
        /// Description of what was wrong
        message: String,
    },

    /// The vertex representation is not a 3D integer or double vertex.
    #[error("Unsupported vertex type: {found:?}")]
    ParamType {
        /// The vertex type that was given
        found: VertexType,
    },

    /// A pool or buffer could not grow.
    #[error("Memory allocation failed: {what}")]
    MemAlloc {
        /// The structure being grown
        what: &'static str,
    },

    /// The supplied configuration was rejected.
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),
}

impl HullError {
    /// Creates a parameter data error.
    pub fn param_data(message: impl Into<String>) -> Self {
        Self::ParamData {
            message: message.into(),
        }
    }

    /// Creates a memory allocation error.
    pub fn mem_alloc(what: &'static str) -> Self {
        Self::MemAlloc { what }
    }
}

// =============================================================================
// RESULT TYPE ALIAS
// =============================================================================

/// Result type alias for hull operations.
pub type HullResult<T> = Result<T, HullError>;

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    /// Test error display messages.
    #[test]
    fn test_error_display() {
        let err = HullError::param_data("horizon is not a single cycle");
        assert!(err.to_string().contains("horizon"));

        let err = HullError::ParamType {
            found: VertexType::D2,
        };
        assert!(err.to_string().contains("D2"));

        let err = HullError::mem_alloc("arc pool");
        assert!(err.to_string().contains("arc pool"));
    }

    #[test]
    fn test_config_error_converts() {
        let err: HullError = ConfigError::InvalidBlockSize(0).into();
        assert!(matches!(err, HullError::Config(_)));
    }

    /// Test error types are Send + Sync so batch results can cross threads.
    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<HullError>();
    }
}
