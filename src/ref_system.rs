use nalgebra::{Matrix3, Vector3};

use crate::constants::{Radian, DPI, T2000};
use crate::earth_orientation::{obleq, prec, rnut80};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RefEpoch {
    J2000,
    Epoch(f64),
}

impl RefEpoch {
    pub fn date(&self) -> f64 {
        match *self {
            RefEpoch::J2000 => T2000,
            RefEpoch::Epoch(d) => d,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RefSystem {
    // Equatorial mean: mean equator and equinox at the epoch (precession only)
    Equm(RefEpoch),
    // Equatorial true: true equator and equinox at the epoch (precession + nutation)
    Equt(RefEpoch),
    // Ecliptic mean: mean ecliptic and equinox at the epoch
    Eclm(RefEpoch),
}

impl RefSystem {
    pub fn epoch(&self) -> RefEpoch {
        match *self {
            RefSystem::Equm(e) => e,
            RefSystem::Equt(e) => e,
            RefSystem::Eclm(e) => e,
        }
    }

    /// Rotation from this system to the equatorial mean J2000 frame (ICRS-aligned).
    fn to_equm_j2000(self) -> Matrix3<f64> {
        let date = self.epoch().date();
        let precession = prec(date).transpose();
        match self {
            RefSystem::Equm(_) => precession,
            RefSystem::Equt(_) => precession * rnut80(date).transpose(),
            RefSystem::Eclm(_) => precession * rotmt(-obleq(date), 0),
        }
    }
}

/// Compute the rotation matrix between two celestial reference systems and epochs.
///
/// The returned matrix `rot` satisfies `x₂ = rot · x₁`, where `x₁` is a vector expressed in
/// `ref_sys1` and `x₂` the same vector expressed in `ref_sys2`. Every conversion goes through
/// the equatorial mean J2000 frame:
///
/// ```text
/// Eclm(t) --R₁(−ε(t))--> Equm(t) --Pᵀ(t)--> Equm(J2000) --P(t')--> Equm(t') --N(t')--> Equt(t')
/// Equt(t) --Nᵀ(t)------> Equm(t)
/// ```
///
/// Precession follows IAU 1976 ([`prec`]), nutation IAU 1980 ([`rnut80`]) and the
/// obliquity IAU 1976 ([`obleq`]).
pub fn rotpn(ref_sys1: &RefSystem, ref_sys2: &RefSystem) -> Matrix3<f64> {
    if ref_sys1 == ref_sys2 {
        return Matrix3::identity();
    }
    ref_sys2.to_equm_j2000().transpose() * ref_sys1.to_equm_j2000()
}

/// Frame rotation of angle `alpha` around one of the principal axes.
///
/// This is the passive (change of basis) rotation: it gives the coordinates of a fixed
/// vector in a frame rotated by `alpha` around the axis `k` (0 → X, 1 → Y, 2 → Z).
///
/// ```text
/// R₃(α) = |  cos α   sin α   0 |
///         | −sin α   cos α   0 |
///         |    0       0     1 |
/// ```
///
/// # Panics
///
/// Panics if `k > 2`.
pub fn rotmt(alpha: f64, k: usize) -> Matrix3<f64> {
    let (s, c) = alpha.sin_cos();
    match k {
        0 => Matrix3::new(1.0, 0.0, 0.0, 0.0, c, s, 0.0, -s, c),
        1 => Matrix3::new(c, 0.0, -s, 0.0, 1.0, 0.0, s, 0.0, c),
        2 => Matrix3::new(c, s, 0.0, -s, c, 0.0, 0.0, 0.0, 1.0),
        _ => panic!("rotation axis index must be 0, 1 or 2, got {k}"),
    }
}

/// Unit vector of the direction (α, δ), both in radians.
pub fn radec_to_unit_vector(ra: Radian, dec: Radian) -> Vector3<f64> {
    let (sin_ra, cos_ra) = ra.sin_cos();
    let (sin_dec, cos_dec) = dec.sin_cos();
    Vector3::new(cos_dec * cos_ra, cos_dec * sin_ra, sin_dec)
}

/// Spherical coordinates of a Cartesian vector.
///
/// Return
/// ------
/// * `(α, δ, ρ)`: right ascension in [0, 2π), declination in [−π/2, π/2] (radians) and
///   the norm of the vector. A zero vector gives `(0.0, 0.0, 0.0)`, a vector along the
///   Z axis has `α = 0`.
pub fn cartesian_to_radec(v: &Vector3<f64>) -> (Radian, Radian, f64) {
    let norm = v.norm();
    if norm == 0.0 {
        return (0.0, 0.0, 0.0);
    }

    let dec = (v.z / norm).clamp(-1.0, 1.0).asin();
    let ra = if v.x == 0.0 && v.y == 0.0 {
        0.0
    } else {
        v.y.atan2(v.x).rem_euclid(DPI)
    };
    (ra, dec, norm)
}
