//! Analytic ephemeris of the Earth–Moon barycentre.
//!
//! Mean Keplerian elements and their secular rates from Standish, *Keplerian Elements for
//! Approximate Positions of the Major Planets* (JPL, table 1, valid 1800–2050), referred to
//! the mean ecliptic and equinox of J2000. The Sun is placed at the barycentre.

use hifitime::Epoch;
use nalgebra::{Matrix3, Vector3};

use super::{Body, BodyState, Ephemeris};
use crate::constants::{RADEG, T2000};
use crate::kepler::{principal_angle, solve_kepler_equation};
use crate::ref_system::{rotmt, rotpn, RefEpoch, RefSystem};
use crate::skychart_errors::SkyChartError;

/// Mean element `value₀ + rate·T`, `T` in Julian centuries from J2000.
#[derive(Debug, Clone, Copy)]
struct SecularElement {
    value: f64,
    rate: f64,
}

impl SecularElement {
    const fn new(value: f64, rate: f64) -> Self {
        SecularElement { value, rate }
    }

    fn at(&self, t: f64) -> f64 {
        self.value + self.rate * t
    }
}

// Earth–Moon barycentre, AU and degrees
const SEMI_MAJOR_AXIS: SecularElement = SecularElement::new(1.000_002_61, 0.000_005_62);
const ECCENTRICITY: SecularElement = SecularElement::new(0.016_711_23, -0.000_043_92);
const INCLINATION: SecularElement = SecularElement::new(-0.000_015_31, -0.012_946_68);
const MEAN_LONGITUDE: SecularElement = SecularElement::new(100.464_571_66, 35_999.372_449_81);
const PERIHELION_LONGITUDE: SecularElement = SecularElement::new(102.937_681_93, 0.323_273_64);
const ASCENDING_NODE: SecularElement = SecularElement::new(0.0, 0.0);

/// Validity range of the elements, in Julian centuries from J2000 (1800–2050).
const VALIDITY: std::ops::RangeInclusive<f64> = -2.0..=0.5;

/// Analytic ephemeris: Earth–Moon barycentre on a precessing Keplerian orbit, Sun at the
/// solar system barycentre.
#[derive(Debug, Clone)]
pub struct KeplerEphemeris {
    rot_eclmj2000_to_equmj2000: Matrix3<f64>,
}

impl Default for KeplerEphemeris {
    fn default() -> Self {
        KeplerEphemeris::new()
    }
}

impl KeplerEphemeris {
    pub fn new() -> Self {
        KeplerEphemeris {
            rot_eclmj2000_to_equmj2000: rotpn(
                &RefSystem::Eclm(RefEpoch::J2000),
                &RefSystem::Equm(RefEpoch::J2000),
            ),
        }
    }

    /// Heliocentric state of the Earth–Moon barycentre, ecliptic mean J2000.
    ///
    /// Arguments
    /// ---------
    /// * `tjm`: Modified Julian Date in the TT scale.
    ///
    /// Return
    /// ------
    /// * Position (AU) and velocity (AU/day). Only the mean motion contributes to the
    ///   velocity; the secular drift of the other elements is neglected.
    pub fn earth_moon_ecliptic(&self, tjm: f64) -> Result<BodyState, SkyChartError> {
        let t = (tjm - T2000) / 36525.0;
        if !VALIDITY.contains(&t) {
            return Err(SkyChartError::EphemerisError(format!(
                "MJD {tjm} is outside the 1800-2050 range of the analytic ephemeris"
            )));
        }

        let a = SEMI_MAJOR_AXIS.at(t);
        let e = ECCENTRICITY.at(t);
        let incl = INCLINATION.at(t) * RADEG;
        let node = ASCENDING_NODE.at(t) * RADEG;
        let peri = PERIHELION_LONGITUDE.at(t) * RADEG;

        let argument_of_perihelion = peri - node;
        let mean_anomaly = principal_angle(MEAN_LONGITUDE.at(t) * RADEG - peri);

        let ecc_anomaly = solve_kepler_equation(mean_anomaly, e).ok_or_else(|| {
            SkyChartError::EphemerisError(format!("Kepler equation did not converge at MJD {tjm}"))
        })?;

        // mean motion, rad/day
        let n = (MEAN_LONGITUDE.rate - PERIHELION_LONGITUDE.rate) * RADEG / 36525.0;
        let ecc_anomaly_rate = n / (1.0 - e * ecc_anomaly.cos());

        let (sin_e, cos_e) = ecc_anomaly.sin_cos();
        let b = a * (1.0 - e * e).sqrt();
        let orbital_position = Vector3::new(a * (cos_e - e), b * sin_e, 0.0);
        let orbital_velocity =
            Vector3::new(-a * sin_e * ecc_anomaly_rate, b * cos_e * ecc_anomaly_rate, 0.0);

        // orbital plane to ecliptic: R3(−Ω) R1(−i) R3(−ω)
        let orbit_to_ecliptic =
            rotmt(-node, 2) * rotmt(-incl, 0) * rotmt(-argument_of_perihelion, 2);

        Ok(BodyState::new(
            orbit_to_ecliptic * orbital_position,
            orbit_to_ecliptic * orbital_velocity,
        ))
    }
}

impl Ephemeris for KeplerEphemeris {
    fn barycentric_state(&self, body: Body, epoch: &Epoch) -> Result<BodyState, SkyChartError> {
        match body {
            Body::SolarSystemBarycenter | Body::Sun => Ok(BodyState::zeros()),
            Body::Earth => {
                let ecliptic = self.earth_moon_ecliptic(epoch.to_mjd_tt_days())?;
                Ok(BodyState::new(
                    self.rot_eclmj2000_to_equmj2000 * ecliptic.position,
                    self.rot_eclmj2000_to_equmj2000 * ecliptic.velocity,
                ))
            }
        }
    }
}

#[cfg(test)]
mod kepler_ephem_test {
    use super::*;
    use crate::ref_system::cartesian_to_radec;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_june_solstice_2024() {
        let ephem = KeplerEphemeris::new();
        let epoch = Epoch::from_gregorian_utc_hms(2024, 6, 20, 20, 51, 0);
        let earth = ephem.barycentric_state(Body::Earth, &epoch).unwrap();

        // ecliptic of date: the Sun is at 90°, so the Earth is at 270°
        let tt = epoch.to_mjd_tt_days();
        let to_ecliptic_of_date = rotpn(
            &RefSystem::Equm(RefEpoch::J2000),
            &RefSystem::Eclm(RefEpoch::Epoch(tt)),
        );
        let (lon, lat, dist) = cartesian_to_radec(&(to_ecliptic_of_date * earth.position));

        assert_abs_diff_eq!(lon.to_degrees(), 270.0, epsilon = 0.05);
        assert_abs_diff_eq!(lat.to_degrees(), 0.0, epsilon = 0.01);
        assert_abs_diff_eq!(dist, 1.0163, epsilon = 1e-3);

        // close to aphelion: ~29.3 km/s
        let speed = earth.velocity.norm();
        assert!(speed > 0.0165 && speed < 0.0175, "speed = {speed}");

        // prograde motion
        let velocity_of_date = to_ecliptic_of_date * earth.velocity;
        let position_of_date = to_ecliptic_of_date * earth.position;
        assert!(position_of_date.cross(&velocity_of_date).z > 0.0);
    }

    #[test]
    fn test_velocity_matches_finite_difference() {
        let ephem = KeplerEphemeris::new();
        let tjm = 60_000.0;
        let h = 1e-3;
        let before = ephem.earth_moon_ecliptic(tjm - h).unwrap();
        let now = ephem.earth_moon_ecliptic(tjm).unwrap();
        let after = ephem.earth_moon_ecliptic(tjm + h).unwrap();

        // the perihelion drift (~1.5e-7 AU/day) is not part of the analytic velocity
        let numerical = (after.position - before.position) / (2.0 * h);
        assert_abs_diff_eq!(numerical, now.velocity, epsilon = 1e-6);
    }

    #[test]
    fn test_sun_and_barycentre_at_origin() {
        let ephem = KeplerEphemeris::new();
        let epoch = Epoch::from_gregorian_utc_hms(2024, 1, 1, 0, 0, 0);
        assert_eq!(
            ephem.barycentric_state(Body::Sun, &epoch).unwrap(),
            BodyState::zeros()
        );
        assert_eq!(
            ephem
                .barycentric_state(Body::SolarSystemBarycenter, &epoch)
                .unwrap(),
            BodyState::zeros()
        );
    }

    #[test]
    fn test_out_of_range_epoch() {
        let ephem = KeplerEphemeris::new();
        let epoch = Epoch::from_gregorian_utc_hms(2100, 1, 1, 0, 0, 0);
        assert!(matches!(
            ephem.barycentric_state(Body::Earth, &epoch),
            Err(SkyChartError::EphemerisError(_))
        ));
    }
}
