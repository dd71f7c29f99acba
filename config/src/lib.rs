//! # Config Crate
//!
//! Centralized configuration constants for the Woolz convex hull crates.
//! All tolerances and tunable parameters are defined here to ensure
//! consistency across crates and easy configuration management.
//!
//! ## Usage
//!
//! ```rust
//! use config::constants::{HullConfig, HULL_EPSILON};
//!
//! // Absolute tolerance for plane tests
//! let distance: f64 = 1e-7;
//! assert!(distance < HULL_EPSILON);
//!
//! // Per-call configuration with an explicit shuffle seed
//! let config = HullConfig::default().with_seed(17);
//! assert_eq!(config.shuffle_seed, 17);
//! ```
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: All constants defined once, used everywhere
//! - **Reproducible**: The default shuffle seed is fixed
//! - **Dependency Free**: Plain Rust, no external crates

pub mod constants;

#[cfg(test)]
mod tests;
