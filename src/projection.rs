//! # Zenith-centred stereographic projection
//!
//! Projects the sky seen by an [`ObserverFrame`](crate::observers::ObserverFrame) onto the
//! plane tangent to the celestial sphere at its zenith.
//!
//! ## Planar convention
//!
//! For a projection centre `c` (unit vector) the tangent-plane basis is
//!
//! ```text
//! east  = (ẑ × c) / |ẑ × c|       north = c × east
//! ```
//!
//! and a unit direction `u` maps to
//!
//! ```text
//! x = −(u · east) / (1 + u · c)      y = (u · north) / (1 + u · c)
//! ```
//!
//! The chart is the sky as seen looking up: zenith at the origin, +y towards the north
//! celestial pole, +x towards the west, the horizon on the unit circle. Points below the
//! horizon fall outside the unit disk and diverge at the nadir. Nothing is clipped.
//!
//! When the centre is a celestial pole, `ẑ × c` vanishes and `east` is taken along +Y.

use itertools::Itertools;
use log::debug;
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::catalog::{ConstellationEdge, StarCatalog, StarRecord};
use crate::constants::{Radian, StarId};
use crate::ephemeris::{Ephemeris, EphemerisExt};
use crate::observers::ObserverFrame;
use crate::ref_system::cartesian_to_radec;
use crate::skychart_errors::SkyChartError;

/// Stereographic projection of the unit sphere from the point opposite to its centre.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StereographicProjection {
    center: Vector3<f64>,
    east: Vector3<f64>,
    north: Vector3<f64>,
}

impl StereographicProjection {
    /// Projection tangent to the sphere at `center` (any non-zero vector).
    pub fn from_center(center: &Vector3<f64>) -> Self {
        const POLE_EPS: f64 = 1e-12;

        let center = center.normalize();
        let rho = center.x.hypot(center.y);
        let east = if rho < POLE_EPS {
            Vector3::y()
        } else {
            Vector3::new(-center.y / rho, center.x / rho, 0.0)
        };
        let north = center.cross(&east);

        StereographicProjection {
            center,
            east,
            north,
        }
    }

    pub fn center(&self) -> &Vector3<f64> {
        &self.center
    }

    /// Planar coordinates of a direction (any non-zero vector).
    pub fn project(&self, direction: &Vector3<f64>) -> (f64, f64) {
        let u = direction.normalize();
        let denom = 1.0 + u.dot(&self.center);
        (-u.dot(&self.east) / denom, u.dot(&self.north) / denom)
    }
}

/// A catalog star placed on the chart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectedStar {
    pub id: StarId,
    pub magnitude: f64,
    pub x: f64,
    pub y: f64,
}

impl ProjectedStar {
    /// Distance to the chart centre; `1.0` on the horizon.
    pub fn radius(&self) -> f64 {
        self.x.hypot(self.y)
    }
}

/// A constellation edge with both endpoints placed on the chart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectedEdge {
    pub star1: StarId,
    pub star2: StarId,
    pub start: (f64, f64),
    pub end: (f64, f64),
}

/// Projector output for one request.
#[derive(Debug, Clone, PartialEq)]
pub struct SkyProjection {
    /// Observed direction of the zenith (projection centre), radians.
    pub center_ra: Radian,
    pub center_dec: Radian,
    /// One entry per catalog star, in catalog order.
    pub stars: Vec<ProjectedStar>,
    /// One entry per input edge, in input order.
    pub edges: Vec<ProjectedEdge>,
}

/// Check that every edge endpoint exists in the catalog.
///
/// Errors
/// ------
/// * [`SkyChartError::CatalogIntegrityError`] carrying the first unknown id.
pub fn validate_edges(
    catalog: &StarCatalog,
    edges: &[ConstellationEdge],
) -> Result<(), SkyChartError> {
    edges
        .iter()
        .flat_map(|edge| [edge.star1, edge.star2])
        .find(|id| !catalog.contains(*id))
        .map_or(Ok(()), |id| Err(SkyChartError::CatalogIntegrityError(id)))
}

/// Project the whole catalog and the constellation edges for an observer.
///
/// 1. Earth's barycentric state at the frame instant is read from `ephemeris`.
/// 2. The zenith direction is observed from Earth as a fixed star, giving the projection
///    centre.
/// 3. Every star is observed from Earth (space motion, parallax, light time) and projected.
/// 4. Every edge is turned into a segment between its two projected endpoints.
///
/// Arguments
/// ---------
/// * `frame`: observer position and instant.
/// * `ephemeris`: provider of the Earth state.
/// * `catalog`: stars to project.
/// * `edges`: constellation outline segments; every id must be in `catalog`.
///
/// Errors
/// ------
/// * [`SkyChartError::CatalogIntegrityError`] if an edge references an unknown star.
/// * [`SkyChartError::EphemerisError`] if the Earth state is unavailable.
pub fn project<E: Ephemeris + ?Sized>(
    frame: &ObserverFrame,
    ephemeris: &E,
    catalog: &StarCatalog,
    edges: &[ConstellationEdge],
) -> Result<SkyProjection, SkyChartError> {
    validate_edges(catalog, edges)?;

    let earth = ephemeris.body("earth")?.at(&frame.instant())?;

    let (zenith_ra, zenith_dec) = frame.zenith_radec();
    let center = earth
        .observe(&StarRecord::fixed_direction(zenith_ra, zenith_dec))
        .position;
    let (center_ra, center_dec, _) = cartesian_to_radec(&center);
    let projection = StereographicProjection::from_center(&center);

    let stars = catalog
        .iter()
        .map(|star| {
            let (x, y) = projection.project(&earth.observe(star).position);
            ProjectedStar {
                id: star.id,
                magnitude: star.magnitude,
                x,
                y,
            }
        })
        .collect_vec();

    let projected_position = |id: StarId| -> Result<(f64, f64), SkyChartError> {
        catalog
            .position(id)
            .map(|pos| (stars[pos].x, stars[pos].y))
            .ok_or(SkyChartError::CatalogIntegrityError(id))
    };

    let edges = edges
        .iter()
        .map(|edge| {
            Ok(ProjectedEdge {
                star1: edge.star1,
                star2: edge.star2,
                start: projected_position(edge.star1)?,
                end: projected_position(edge.star2)?,
            })
        })
        .collect::<Result<Vec<_>, SkyChartError>>()?;

    debug!(
        "projected {} stars and {} edges around RA {:.4} rad, Dec {:.4} rad",
        stars.len(),
        edges.len(),
        center_ra,
        center_dec
    );

    Ok(SkyProjection {
        center_ra,
        center_dec,
        stars,
        edges,
    })
}
