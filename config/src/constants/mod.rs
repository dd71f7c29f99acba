//! Centralized configuration values shared across the Woolz hull crates.
//!
//! Each public item in this module documents its purpose and provides a minimal
//! usage example so that downstream crates can remain declarative and avoid
//! scattering literals.

use std::fmt;

// =============================================================================
// PRECISION CONSTANTS
// =============================================================================

/// Absolute tolerance used by the convex hull kernels.
///
/// Applied to plane distances, squared edge lengths, squared triangle areas
/// and squared tetrahedron volumes. The value is absolute and does not scale
/// with the magnitude of the input coordinates.
///
/// # Examples
/// ```
/// use config::constants::HULL_EPSILON;
///
/// let signed_distance = 5.0e-7;
/// let behind = signed_distance < HULL_EPSILON;
/// assert!(behind);
/// ```
pub const HULL_EPSILON: f64 = 1.0e-6;

// =============================================================================
// ALLOCATION CONSTANTS
// =============================================================================

/// Number of elements added to an object pool each time its free list runs dry.
///
/// # Examples
/// ```
/// use config::constants::POOL_BLOCK_SIZE;
///
/// let requested = 5000;
/// let blocks = (requested / POOL_BLOCK_SIZE) + 1;
/// assert_eq!(blocks * POOL_BLOCK_SIZE, 8192);
/// ```
pub const POOL_BLOCK_SIZE: usize = 4096;

// =============================================================================
// ALGORITHM CONSTANTS
// =============================================================================

/// Seed used for the insertion-order shuffle when the caller gives none.
///
/// A fixed seed makes hull construction reproducible: the same input always
/// yields the same vertex and face ordering.
///
/// # Examples
/// ```
/// use config::constants::{DEFAULT_SHUFFLE_SEED, HullConfig};
/// assert_eq!(HullConfig::default().shuffle_seed, DEFAULT_SHUFFLE_SEED);
/// ```
pub const DEFAULT_SHUFFLE_SEED: u64 = 0;

/// Minimum number of input points accepted by the 3D hull.
///
/// # Examples
/// ```
/// use config::constants::MIN_HULL_POINTS;
/// assert_eq!(MIN_HULL_POINTS, 4);
/// ```
pub const MIN_HULL_POINTS: usize = 4;

// =============================================================================
// HULL CONFIGURATION
// =============================================================================

/// Tunable parameters for a single convex hull computation.
///
/// # Examples
/// ```
/// use config::constants::HullConfig;
/// let config = HullConfig::default();
/// assert!(config.tolerance > 0.0);
/// assert!(!config.verify_topology);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HullConfig {
    /// Absolute tolerance for the behind-face and degeneracy tests.
    pub tolerance: f64,
    /// Seed of the insertion-order shuffle.
    pub shuffle_seed: u64,
    /// Number of elements added to a pool when it grows.
    pub pool_block_size: usize,
    /// Check the full face adjacency after every insertion step.
    ///
    /// Expensive, intended for tests and debugging.
    pub verify_topology: bool,
}

impl HullConfig {
    /// Builds a configuration, rejecting values the hull kernel cannot use.
    ///
    /// # Examples
    /// ```
    /// use config::constants::HullConfig;
    /// let cfg = HullConfig::new(1.0e-9, 7, 256).expect("valid config");
    /// assert_eq!(cfg.shuffle_seed, 7);
    /// assert!(HullConfig::new(-1.0, 7, 256).is_err());
    /// ```
    pub fn new(
        tolerance: f64,
        shuffle_seed: u64,
        pool_block_size: usize,
    ) -> Result<Self, ConfigError> {
        if !tolerance.is_finite() || tolerance <= 0.0 {
            return Err(ConfigError::InvalidTolerance(tolerance));
        }
        if pool_block_size == 0 {
            return Err(ConfigError::InvalidBlockSize(pool_block_size));
        }
        Ok(Self {
            tolerance,
            shuffle_seed,
            pool_block_size,
            verify_topology: false,
        })
    }

    /// Returns a copy using the given shuffle seed.
    ///
    /// # Examples
    /// ```
    /// use config::constants::HullConfig;
    /// assert_eq!(HullConfig::default().with_seed(42).shuffle_seed, 42);
    /// ```
    pub fn with_seed(mut self, shuffle_seed: u64) -> Self {
        self.shuffle_seed = shuffle_seed;
        self
    }

    /// Returns a copy with topology verification switched on or off.
    pub fn with_topology_checks(mut self, enabled: bool) -> Self {
        self.verify_topology = enabled;
        self
    }
}

impl Default for HullConfig {
    fn default() -> Self {
        Self {
            tolerance: HULL_EPSILON,
            shuffle_seed: DEFAULT_SHUFFLE_SEED,
            pool_block_size: POOL_BLOCK_SIZE,
            verify_topology: false,
        }
    }
}

/// Error returned when invalid configuration values are provided.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Raised when the tolerance is zero, negative or not finite.
    InvalidTolerance(f64),
    /// Raised when the pool block size is zero.
    InvalidBlockSize(usize),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidTolerance(value) => {
                write!(f, "tolerance must be positive and finite: {value}")
            }
            ConfigError::InvalidBlockSize(value) => {
                write!(f, "pool_block_size must be >= 1: {value}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}
