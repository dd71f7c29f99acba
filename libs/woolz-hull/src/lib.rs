//! # Woolz Hull
//!
//! 3D convex hull domains for Woolz spatial objects.
//! Computes the convex hull of a set of integer or double 3D vertices as a
//! triangle surface with a centroid.
//!
//! ## Architecture
//!
//! ```text
//! Vertices (I3 / D3) → Workspace (pools, conflict graph) → HullDomain
//!                                   ↘ degenerate fallback ↗
//! ```
//!
//! ## Algorithms
//!
//! - **Hull**: randomized incremental insertion with a conflict graph
//! - **Storage**: block-grown object pools with intrusive circular lists
//! - **Degenerate input**: point, segment or planar fan cover
//! - **Planar hull**: Andrew's monotone chain
//!
//! ## Usage
//!
//! ```rust
//! use glam::DVec3;
//! use woolz_hull::{hull_of_points, HullStatus};
//!
//! let points = [
//!     DVec3::new(0.0, 0.0, 0.0),
//!     DVec3::new(1.0, 0.0, 0.0),
//!     DVec3::new(0.0, 1.0, 0.0),
//!     DVec3::new(0.0, 0.0, 1.0),
//!     DVec3::new(0.1, 0.1, 0.1),
//! ];
//! let outcome = hull_of_points(&points)?;
//! assert_eq!(outcome.status, HullStatus::Ok);
//! assert_eq!(outcome.domain.vertex_count(), 4);
//! # Ok::<(), woolz_hull::HullError>(())
//! ```

pub mod batch;
pub mod domain;
pub mod error;
pub mod hull;
pub mod planar;
pub mod point;

mod pool;
mod ring;

pub use batch::convex_hull_3d_batch;
pub use domain::{HullDomain, HullPoint3, HullVertices};
pub use error::{HullError, HullResult};
pub use hull::{
    convex_hull_3d, convex_hull_3d_with_config, hull_of_int_points, hull_of_points, Degeneracy,
    HullOutcome, HullStatus,
};
pub use planar::{convex_hull_2d, PlanarHull};
pub use point::{HullPoint, VertexType, Vertices};
