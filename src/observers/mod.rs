//! # Observer frame
//!
//! A fixed observer on the Earth's surface at a fixed instant, and the direction of its
//! zenith in the celestial reference frame.
//!
//! ## Frames & conventions
//!
//! ```text
//! Body-fixed  --R₃(−GAST)-->  True equator of date  --Nᵀ, Pᵀ-->  Equatorial mean J2000 (ICRS)
//! ```
//!
//! - Latitudes are **geodetic**, longitudes **east positive**, both in degrees.
//! - The zenith is the normal to the reference ellipsoid at the site. Polar motion and
//!   UT1 − UTC are neglected: the Earth rotation angle is evaluated on the UTC time scale.
//!
//! ## Quick start
//!
//! ```rust
//! use skychart::observers::ObserverFrame;
//!
//! let frame = ObserverFrame::resolve(40.7128, -74.0060, "2024-06-21 00:00", "America/New_York")?;
//! let (ra, dec) = frame.zenith_radec();
//! # Ok::<(), skychart::skychart_errors::SkyChartError>(())
//! ```

use hifitime::Epoch;
use log::debug;
use nalgebra::Vector3;
use ordered_float::NotNan;

use crate::constants::{Degree, Radian, RADEG};
use crate::earth_orientation::equequ;
use crate::ref_system::{
    cartesian_to_radec, radec_to_unit_vector, rotmt, rotpn, RefEpoch, RefSystem,
};
use crate::skychart_errors::SkyChartError;
use crate::time::{gmst, local_to_epoch};

/// An observer at a geodetic position and a UTC instant. Immutable.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObserverFrame {
    latitude: NotNan<f64>,
    longitude: NotNan<f64>,
    instant: Epoch,
}

impl ObserverFrame {
    /// Build a frame from geodetic coordinates and an absolute instant.
    ///
    /// Arguments
    /// ---------
    /// * `latitude`: geodetic latitude in degrees, in [-90, 90].
    /// * `longitude`: longitude in degrees, east positive, in [-180, 180].
    /// * `instant`: instant of observation; converted to the UTC time scale.
    ///
    /// Errors
    /// ------
    /// * [`SkyChartError::RangeError`] if a coordinate is NaN or out of bounds.
    pub fn new(latitude: Degree, longitude: Degree, instant: Epoch) -> Result<Self, SkyChartError> {
        let latitude = NotNan::new(latitude)?;
        let longitude = NotNan::new(longitude)?;

        if !(-90.0..=90.0).contains(&latitude.into_inner()) {
            return Err(SkyChartError::RangeError(format!(
                "latitude {latitude} is outside [-90, 90]"
            )));
        }
        if !(-180.0..=180.0).contains(&longitude.into_inner()) {
            return Err(SkyChartError::RangeError(format!(
                "longitude {longitude} is outside [-180, 180]"
            )));
        }

        Ok(ObserverFrame {
            latitude,
            longitude,
            instant: instant.to_time_scale(hifitime::TimeScale::UTC),
        })
    }

    /// Build a frame from a local wall-clock time in an IANA timezone.
    ///
    /// Arguments
    /// ---------
    /// * `latitude`, `longitude`: degrees, see [`ObserverFrame::new`].
    /// * `local_datetime`: naive local time, `YYYY-MM-DD HH:MM`.
    /// * `timezone_name`: IANA timezone name, e.g. `"Europe/Paris"`.
    ///
    /// Errors
    /// ------
    /// * [`SkyChartError::ParseError`] for a malformed date-time.
    /// * [`SkyChartError::TimezoneError`] for an unknown timezone or a local time in a
    ///   daylight-saving gap or overlap.
    /// * [`SkyChartError::RangeError`] for out-of-range coordinates.
    pub fn resolve(
        latitude: Degree,
        longitude: Degree,
        local_datetime: &str,
        timezone_name: &str,
    ) -> Result<Self, SkyChartError> {
        let instant = local_to_epoch(local_datetime, timezone_name)?;
        let frame = ObserverFrame::new(latitude, longitude, instant)?;
        debug!(
            "resolved {local_datetime} {timezone_name} at ({latitude}, {longitude}) to {}",
            frame.instant
        );
        Ok(frame)
    }

    pub fn latitude(&self) -> Degree {
        self.latitude.into_inner()
    }

    pub fn longitude(&self) -> Degree {
        self.longitude.into_inner()
    }

    /// Instant of observation, UTC time scale.
    pub fn instant(&self) -> Epoch {
        self.instant
    }

    /// Local vertical (unit normal to the ellipsoid) in the Earth-fixed frame.
    pub fn body_fixed_vertical(&self) -> Vector3<f64> {
        radec_to_unit_vector(self.longitude() * RADEG, self.latitude() * RADEG)
    }

    /// Greenwich apparent sidereal time (GMST + equation of the equinoxes), radians.
    pub fn apparent_sidereal_time(&self) -> Radian {
        gmst(self.instant.to_mjd_utc_days()) + equequ(self.instant.to_mjd_tt_days())
    }

    /// Unit vector of the zenith, equatorial mean J2000.
    pub fn zenith_direction(&self) -> Vector3<f64> {
        let tt = self.instant.to_mjd_tt_days();

        let earth_rotation = rotmt(-self.apparent_sidereal_time(), 2);
        let true_of_date_to_j2000 = rotpn(
            &RefSystem::Equt(RefEpoch::Epoch(tt)),
            &RefSystem::Equm(RefEpoch::J2000),
        );

        true_of_date_to_j2000 * earth_rotation * self.body_fixed_vertical()
    }

    /// Right ascension and declination of the zenith, radians, equatorial mean J2000.
    pub fn zenith_radec(&self) -> (Radian, Radian) {
        let (ra, dec, _) = cartesian_to_radec(&self.zenith_direction());
        debug!(
            "zenith at {}: RA {:.5} h, Dec {:.5} deg",
            self.instant,
            ra.to_degrees() / 15.0,
            dec.to_degrees()
        );
        (ra, dec)
    }
}
