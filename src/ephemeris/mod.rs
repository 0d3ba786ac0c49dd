//! # Ephemeris providers
//!
//! Barycentric states of the few solar-system bodies needed to observe stars from Earth.
//!
//! All providers return positions in AU and velocities in AU/day, in the equatorial mean
//! J2000 frame (ICRS-aligned), relative to the solar system barycentre.
//!
//! Two providers ship with the crate:
//!
//! - [`KeplerEphemeris`](crate::ephemeris::kepler_ephem::KeplerEphemeris): analytic
//!   Earth–Moon barycentre orbit from mean elements, good to a few tens of arcseconds over
//!   1800–2050.
//! - [`SnapshotEphemeris`](crate::ephemeris::snapshot::SnapshotEphemeris): states computed
//!   elsewhere and injected as-is.
//!
//! ## Query chain
//!
//! ```rust
//! use hifitime::Epoch;
//! use skychart::catalog::StarRecord;
//! use skychart::ephemeris::{kepler_ephem::KeplerEphemeris, EphemerisExt};
//!
//! let ephem = KeplerEphemeris::new();
//! let epoch = Epoch::from_gregorian_utc_hms(2024, 6, 21, 4, 0, 0);
//! let polaris = StarRecord::new(11767, 37.946, 89.264, 1.97);
//!
//! let astrometric = ephem.body("earth")?.at(&epoch)?.observe(&polaris);
//! let (ra, dec, _) = astrometric.radec();
//! # Ok::<(), skychart::skychart_errors::SkyChartError>(())
//! ```

pub mod kepler_ephem;
pub mod snapshot;

use std::fmt;
use std::str::FromStr;

use hifitime::Epoch;
use nalgebra::Vector3;

use crate::catalog::StarRecord;
use crate::constants::{Radian, VLIGHT_AU};
use crate::ref_system::cartesian_to_radec;
use crate::skychart_errors::SkyChartError;

/// Bodies an ephemeris can be queried for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Body {
    SolarSystemBarycenter,
    Sun,
    Earth,
}

impl FromStr for Body {
    type Err = SkyChartError;

    /// Body names are case-insensitive: `"earth"`, `"sun"`, `"ssb"` or
    /// `"solar system barycenter"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "earth" => Ok(Body::Earth),
            "sun" => Ok(Body::Sun),
            "ssb" | "solar system barycenter" => Ok(Body::SolarSystemBarycenter),
            _ => Err(SkyChartError::EphemerisError(format!("unknown body {s:?}"))),
        }
    }
}

impl fmt::Display for Body {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Body::SolarSystemBarycenter => "solar system barycenter",
            Body::Sun => "sun",
            Body::Earth => "earth",
        };
        write!(f, "{name}")
    }
}

/// Position (AU) and velocity (AU/day) of a body.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyState {
    pub position: Vector3<f64>,
    pub velocity: Vector3<f64>,
}

impl BodyState {
    pub fn new(position: Vector3<f64>, velocity: Vector3<f64>) -> Self {
        BodyState { position, velocity }
    }

    pub fn zeros() -> Self {
        BodyState::new(Vector3::zeros(), Vector3::zeros())
    }
}

/// A source of barycentric body states.
pub trait Ephemeris: Send + Sync {
    /// Barycentric state of `body` at `epoch`, equatorial mean J2000.
    ///
    /// Errors
    /// ------
    /// * [`SkyChartError::EphemerisError`] if the body is not covered by the provider or the
    ///   epoch is outside its validity range.
    fn barycentric_state(&self, body: Body, epoch: &Epoch) -> Result<BodyState, SkyChartError>;
}

/// Name-based access to an [`Ephemeris`], for sized providers and trait objects alike.
pub trait EphemerisExt {
    /// Resolve a body by name.
    fn body(&self, name: &str) -> Result<BodyHandle<'_, Self>, SkyChartError>;
}

impl<E: Ephemeris + ?Sized> EphemerisExt for E {
    fn body(&self, name: &str) -> Result<BodyHandle<'_, Self>, SkyChartError> {
        Ok(BodyHandle {
            ephemeris: self,
            body: name.parse()?,
        })
    }
}

/// A body resolved in a given ephemeris, not yet bound to an instant.
#[derive(Debug)]
pub struct BodyHandle<'a, E: ?Sized> {
    ephemeris: &'a E,
    body: Body,
}

impl<E: Ephemeris + ?Sized> BodyHandle<'_, E> {
    pub fn body(&self) -> Body {
        self.body
    }

    /// Barycentric state of the body at `epoch`.
    pub fn at(&self, epoch: &Epoch) -> Result<Barycentric, SkyChartError> {
        let state = self.ephemeris.barycentric_state(self.body, epoch)?;
        Ok(Barycentric {
            body: self.body,
            epoch: *epoch,
            state,
        })
    }
}

/// Barycentric state of an observing body at a given instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Barycentric {
    pub body: Body,
    pub epoch: Epoch,
    pub state: BodyState,
}

impl Barycentric {
    /// Astrometric position of a catalog star seen from this body.
    ///
    /// The star is propagated along its space motion from the catalog epoch to the instant
    /// its light left it: the observation epoch corrected for the light travel time
    /// difference between the barycentre and the observer. Parallax follows from
    /// subtracting the observer position. No aberration nor light deflection.
    pub fn observe(&self, star: &StarRecord) -> Astrometric {
        let (position, velocity) = star.barycentric_state();
        let observer = self.state.position;

        let light_time_difference = position.normalize().dot(&observer) / VLIGHT_AU;
        let elapsed = self.epoch.to_mjd_tt_days() + light_time_difference - star.epoch;

        let vector = position + velocity * elapsed - observer;
        let light_time = vector.norm() / VLIGHT_AU;

        Astrometric {
            position: vector,
            light_time,
        }
    }
}

/// Observer-centred position of a star, equatorial mean J2000.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Astrometric {
    /// Observer-to-star vector in AU.
    pub position: Vector3<f64>,
    /// Light travel time in days.
    pub light_time: f64,
}

impl Astrometric {
    pub fn direction(&self) -> Vector3<f64> {
        self.position.normalize()
    }

    /// Right ascension and declination (radians) and distance (AU).
    pub fn radec(&self) -> (Radian, Radian, f64) {
        cartesian_to_radec(&self.position)
    }
}
