//! # 3D Convex Hull
//!
//! Randomized incremental convex hull with a conflict graph.
//!
//! ## Algorithm
//!
//! 1. Deduplicate the input points
//! 2. Pick an initial tetrahedron from extreme points
//! 3. Insert the remaining points in seeded random order, each one replacing
//!    the faces it can see with a cone stitched onto the horizon
//! 4. Compact the hull into a [`HullDomain`]
//!
//! Input that does not span 3D is diverted to a point, segment or planar fan
//! cover, returned with [`HullStatus::Degenerate`].
//!
//! ## Example
//!
//! ```rust
//! use glam::IVec3;
//! use woolz_hull::{convex_hull_3d, HullStatus, Vertices, VertexType};
//!
//! let cube: Vec<IVec3> = (0..8)
//!     .map(|i| IVec3::new(i & 1, (i >> 1) & 1, (i >> 2) & 1))
//!     .collect();
//! let outcome = convex_hull_3d(VertexType::I3, cube.len(), Some(Vertices::I3(&cube))).unwrap();
//! assert_eq!(outcome.status, HullStatus::Ok);
//! assert_eq!(outcome.domain.vertex_count(), 8);
//! assert_eq!(outcome.domain.face_count(), 12);
//! ```

mod conflict;
mod degenerate;
mod extract;
mod horizon;
mod insertion;
mod simplex;
mod workspace;


use config::constants::{HullConfig, MIN_HULL_POINTS};
use glam::{DVec3, IVec3};
use serde::{Deserialize, Serialize};

use crate::domain::HullDomain;
use crate::error::{HullError, HullResult};
use crate::point::{HullPoint, VertexType, Vertices};

use workspace::Workspace;

// =============================================================================
// OUTCOME
// =============================================================================

/// Way in which the input fails to span 3D.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Degeneracy {
    /// All points are the same point.
    Coincident,
    /// All points lie on a line.
    Colinear,
    /// All points lie in a plane.
    Coplanar,
}

/// Whether a hull is a proper 3D polyhedron.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HullStatus {
    /// A closed 3D hull.
    Ok,
    /// A lower-dimensional cover of degenerate input. Advisory, the domain
    /// is still usable.
    Degenerate(Degeneracy),
}

impl HullStatus {
    /// Returns true for a lower-dimensional result.
    pub fn is_degenerate(&self) -> bool {
        matches!(self, HullStatus::Degenerate(_))
    }
}

/// Result of a successful hull computation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HullOutcome {
    /// The hull.
    pub domain: HullDomain,
    /// Whether the hull is degenerate.
    pub status: HullStatus,
}

// =============================================================================
// PUBLIC API
// =============================================================================

/// Computes the convex hull of the first `count` points using the default
/// configuration.
///
/// ## Errors
///
/// - [`HullError::ParamData`] if `count < 4` or `count` exceeds the array
/// - [`HullError::ParamNull`] if `points` is `None`
/// - [`HullError::ParamType`] if the type is not `I3`/`D3` or does not match
///   the array
/// - [`HullError::MemAlloc`] if the workspace cannot grow
pub fn convex_hull_3d(
    vertex_type: VertexType,
    count: usize,
    points: Option<Vertices<'_>>,
) -> HullResult<HullOutcome> {
    convex_hull_3d_with_config(vertex_type, count, points, &HullConfig::default())
}

/// Computes the convex hull of the first `count` points with an explicit
/// configuration.
pub fn convex_hull_3d_with_config(
    vertex_type: VertexType,
    count: usize,
    points: Option<Vertices<'_>>,
    config: &HullConfig,
) -> HullResult<HullOutcome> {
    if count < MIN_HULL_POINTS {
        return Err(HullError::param_data(format!(
            "at least {} points are needed, got {}",
            MIN_HULL_POINTS, count
        )));
    }
    let points = points.ok_or(HullError::ParamNull)?;
    let config = HullConfig::new(config.tolerance, config.shuffle_seed, config.pool_block_size)?
        .with_topology_checks(config.verify_topology);

    match (vertex_type, points) {
        (VertexType::I3, Vertices::I3(p)) => compute(prefix(p, count)?, &config),
        (VertexType::D3, Vertices::D3(p)) => compute(prefix(p, count)?, &config),
        (VertexType::I3 | VertexType::D3, other) => Err(HullError::ParamType {
            found: other.vertex_type(),
        }),
        (found, _) => Err(HullError::ParamType { found }),
    }
}

/// Convex hull of double points with the default configuration.
pub fn hull_of_points(points: &[DVec3]) -> HullResult<HullOutcome> {
    convex_hull_3d(VertexType::D3, points.len(), Some(Vertices::D3(points)))
}

/// Convex hull of integer points with the default configuration.
pub fn hull_of_int_points(points: &[IVec3]) -> HullResult<HullOutcome> {
    convex_hull_3d(VertexType::I3, points.len(), Some(Vertices::I3(points)))
}

fn prefix<P>(points: &[P], count: usize) -> HullResult<&[P]> {
    points.get(..count).ok_or_else(|| {
        HullError::param_data(format!(
            "{} points requested but only {} given",
            count,
            points.len()
        ))
    })
}

// =============================================================================
// DRIVER
// =============================================================================

/// Stages of one hull computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
    Init,
    BuildTetra,
    Insert,
    Extract,
    Degenerate(Option<Degeneracy>),
}

fn compute<P: HullPoint>(points: &[P], config: &HullConfig) -> HullResult<HullOutcome> {
    let mut ws = Workspace::new(points, *config)?;
    let mut stage = Stage::Init;
    let mut inserted = 0usize;
    loop {
        stage = match stage {
            Stage::Init => {
                let distinct = ws.dedup();
                log::debug!(
                    "{:?} hull of {} points, {} distinct",
                    P::VERTEX_TYPE,
                    points.len(),
                    distinct
                );
                if distinct < MIN_HULL_POINTS {
                    Stage::Degenerate(None)
                } else {
                    match ws.select_simplex() {
                        Ok(()) => Stage::BuildTetra,
                        Err(kind) => Stage::Degenerate(Some(kind)),
                    }
                }
            }
            Stage::BuildTetra => {
                ws.build_tetrahedron()?;
                Stage::Insert
            }
            Stage::Insert => {
                if ws.insert_next()? {
                    inserted += 1;
                    Stage::Insert
                } else {
                    Stage::Extract
                }
            }
            Stage::Extract => {
                let domain = ws.extract()?;
                log::debug!(
                    "hull done after {} insertions: {} vertices, {} faces",
                    inserted,
                    domain.vertex_count(),
                    domain.face_count()
                );
                return Ok(HullOutcome {
                    domain,
                    status: HullStatus::Ok,
                });
            }
            Stage::Degenerate(hint) => {
                let mut order = ws.perm.clone();
                order.sort_unstable();
                let distinct: Vec<P> = order.iter().map(|&i| points[i]).collect();
                drop(ws);
                let (domain, kind) = degenerate::degenerate_hull(&distinct, config.tolerance)?;
                log::warn!(
                    "degenerate input ({:?}, simplex selection reported {:?}): {} vertices, {} faces",
                    kind,
                    hint,
                    domain.vertex_count(),
                    domain.face_count()
                );
                return Ok(HullOutcome {
                    domain,
                    status: HullStatus::Degenerate(kind),
                });
            }
        };
    }
}
