//! # Star and constellation catalogs
//!
//! Fixed-shape value types for the two catalog inputs of the projection pipeline:
//!
//! - [`StarRecord`](crate::catalog::StarRecord): one catalog star with its astrometry
//!   (position, proper motion, parallax, radial velocity) at a catalog epoch, and its
//!   apparent magnitude.
//! - [`StarCatalog`](crate::catalog::StarCatalog): an ordered, id-indexed table of stars,
//!   validated once at load time (no duplicate ids).
//! - [`ConstellationEdge`](crate::catalog::ConstellationEdge) and
//!   [`Constellation`](crate::catalog::Constellation): outline segments between two stars.
//!
//! Loaders for the Hipparcos main catalog ([`hipparcos`]) and the Stellarium
//! `constellationship.fab` outlines ([`constellations`]) build these types from text.
//!
//! ## Astrometry model
//!
//! [`StarRecord::barycentric_state`](crate::catalog::StarRecord::barycentric_state) turns the
//! catalog astrometry into a barycentric position (AU) and a space velocity (AU/day) at the
//! catalog epoch. Stars without a positive parallax are placed at one gigaparsec
//! ([`MIN_PARALLAX_MAS`]), so that their direction is unaffected by the observer's position.

pub mod constellations;
pub mod hipparcos;

use std::collections::HashMap;

use ahash::RandomState;
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::constants::{
    Degree, Radian, StarId, AU, DAYS_PER_JULIAN_YEAR, MIN_PARALLAX_MAS, MJD, RADH, RADMAS,
    SECONDS_PER_DAY, T2000, VLIGHT,
};
use crate::skychart_errors::SkyChartError;

/// One star of a catalog.
///
/// Units
/// -----
/// * `ra`, `dec`: degrees, ICRS, at `epoch`.
/// * `pm_ra_mas_per_year`: proper motion in right ascension, μα·cosδ, in mas/yr.
/// * `pm_dec_mas_per_year`: proper motion in declination, in mas/yr.
/// * `parallax_mas`: milliarcseconds (`0.0` when unknown).
/// * `radial_km_per_s`: km/s, positive receding.
/// * `epoch`: catalog reference epoch, MJD in the TT scale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StarRecord {
    pub id: StarId,
    pub ra: Degree,
    pub dec: Degree,
    pub magnitude: f64,
    #[serde(default)]
    pub parallax_mas: f64,
    #[serde(default)]
    pub pm_ra_mas_per_year: f64,
    #[serde(default)]
    pub pm_dec_mas_per_year: f64,
    #[serde(default)]
    pub radial_km_per_s: f64,
    #[serde(default = "j2000")]
    pub epoch: MJD,
}

fn j2000() -> MJD {
    T2000
}

impl StarRecord {
    /// A motionless star at (`ra`, `dec`) degrees, epoch J2000.
    pub fn new(id: StarId, ra: Degree, dec: Degree, magnitude: f64) -> Self {
        StarRecord {
            id,
            ra,
            dec,
            magnitude,
            parallax_mas: 0.0,
            pm_ra_mas_per_year: 0.0,
            pm_dec_mas_per_year: 0.0,
            radial_km_per_s: 0.0,
            epoch: T2000,
        }
    }

    /// A motionless, infinitely distant direction given in radians.
    ///
    /// Used to observe a bare direction of the sky (e.g. the zenith) with the same
    /// machinery as catalog stars.
    pub fn fixed_direction(ra: Radian, dec: Radian) -> Self {
        StarRecord::new(0, ra.to_degrees(), dec.to_degrees(), 0.0)
    }

    pub fn with_proper_motion(mut self, pm_ra_mas_per_year: f64, pm_dec_mas_per_year: f64) -> Self {
        self.pm_ra_mas_per_year = pm_ra_mas_per_year;
        self.pm_dec_mas_per_year = pm_dec_mas_per_year;
        self
    }

    pub fn with_parallax(mut self, parallax_mas: f64) -> Self {
        self.parallax_mas = parallax_mas;
        self
    }

    pub fn with_radial_velocity(mut self, radial_km_per_s: f64) -> Self {
        self.radial_km_per_s = radial_km_per_s;
        self
    }

    pub fn with_epoch(mut self, epoch: MJD) -> Self {
        self.epoch = epoch;
        self
    }

    /// Right ascension in hours.
    pub fn ra_hours(&self) -> f64 {
        self.ra.to_radians() / RADH
    }

    /// Barycentric position (AU) and space velocity (AU/day) at the catalog epoch,
    /// in the ICRS equatorial frame.
    ///
    /// The velocity combines the proper motion and the radial velocity, scaled by the
    /// Doppler factor `k = 1 / (1 − v_r / c)` that accounts for the changing light
    /// travel time to the star.
    pub fn barycentric_state(&self) -> (Vector3<f64>, Vector3<f64>) {
        let parallax = if self.parallax_mas > 0.0 {
            self.parallax_mas
        } else {
            MIN_PARALLAX_MAS
        };
        let dist = 1.0 / (parallax * RADMAS).sin();

        let (sra, cra) = self.ra.to_radians().sin_cos();
        let (sdc, cdc) = self.dec.to_radians().sin_cos();

        let position = Vector3::new(dist * cdc * cra, dist * cdc * sra, dist * sdc);

        let k = 1.0 / (1.0 - self.radial_km_per_s / VLIGHT);
        let pmr = self.pm_ra_mas_per_year / (parallax * DAYS_PER_JULIAN_YEAR) * k;
        let pmd = self.pm_dec_mas_per_year / (parallax * DAYS_PER_JULIAN_YEAR) * k;
        let rvl = self.radial_km_per_s * SECONDS_PER_DAY / AU * k;

        let velocity = Vector3::new(
            -pmr * sra - pmd * sdc * cra + rvl * cdc * cra,
            pmr * cra - pmd * sdc * sra + rvl * cdc * sra,
            pmd * cdc + rvl * sdc,
        );

        (position, velocity)
    }
}

/// An ordered star table indexed by star id.
///
/// The insertion order is preserved: projected outputs are emitted in the same order as
/// [`StarCatalog::stars`].
#[derive(Debug, Clone, Default)]
pub struct StarCatalog {
    stars: Vec<StarRecord>,
    index: HashMap<StarId, usize, RandomState>,
}

impl StarCatalog {
    /// Build a catalog from records.
    ///
    /// Errors
    /// ------
    /// * [`SkyChartError::CatalogFormatError`] if two records share the same id.
    pub fn new(stars: Vec<StarRecord>) -> Result<Self, SkyChartError> {
        let mut index = HashMap::with_capacity_and_hasher(stars.len(), RandomState::new());
        for (pos, star) in stars.iter().enumerate() {
            if index.insert(star.id, pos).is_some() {
                return Err(SkyChartError::CatalogFormatError(format!(
                    "duplicate star id {}",
                    star.id
                )));
            }
        }
        Ok(StarCatalog { stars, index })
    }

    pub fn stars(&self) -> &[StarRecord] {
        &self.stars
    }

    pub fn len(&self) -> usize {
        self.stars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stars.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, StarRecord> {
        self.stars.iter()
    }

    /// Position of the star `id` in [`StarCatalog::stars`].
    pub fn position(&self, id: StarId) -> Option<usize> {
        self.index.get(&id).copied()
    }

    pub fn get(&self, id: StarId) -> Option<&StarRecord> {
        self.position(id).map(|pos| &self.stars[pos])
    }

    pub fn contains(&self, id: StarId) -> bool {
        self.index.contains_key(&id)
    }
}

impl<'a> IntoIterator for &'a StarCatalog {
    type Item = &'a StarRecord;
    type IntoIter = std::slice::Iter<'a, StarRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.stars.iter()
    }
}

/// A constellation outline segment between two catalog stars. Directionless.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConstellationEdge {
    pub star1: StarId,
    pub star2: StarId,
}

impl ConstellationEdge {
    pub fn new(star1: StarId, star2: StarId) -> Self {
        ConstellationEdge { star1, star2 }
    }
}

impl From<(StarId, StarId)> for ConstellationEdge {
    fn from((star1, star2): (StarId, StarId)) -> Self {
        ConstellationEdge { star1, star2 }
    }
}

/// A named constellation and its outline edges.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Constellation {
    pub name: String,
    pub edges: Vec<ConstellationEdge>,
}

/// Flatten the outlines of several constellations into a single edge sequence,
/// keeping the file order.
pub fn flatten_edges(constellations: &[Constellation]) -> Vec<ConstellationEdge> {
    constellations
        .iter()
        .flat_map(|c| c.edges.iter().copied())
        .collect()
}
