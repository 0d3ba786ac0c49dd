use nalgebra::Matrix3;

use crate::{
    constants::{ArcSec, Radian, RADEG, RADSEC, T2000},
    ref_system::rotmt,
};

/// Compute the mean obliquity of the ecliptic at a given epoch (IAU 1976 model).
///
/// Arguments
/// ---------
/// * `tjm`: Modified Julian Date (TT scale).
///
/// Returns
/// --------
/// * Mean obliquity of the ecliptic in radians.
///
/// Formula
/// -------
/// ```text
/// ε(t) = ε₀ + ε₁·T + ε₂·T² + ε₃·T³,   T = (tjm - T2000) / 36525
/// ```
/// with the coefficients in arcseconds, evaluated with Horner's method.
pub fn obleq(tjm: f64) -> Radian {
    let ob0 = ((23.0 * 3600.0 + 26.0 * 60.0) + 21.448) * RADSEC;
    let ob1 = -46.815 * RADSEC;
    let ob2 = -0.0006 * RADSEC;
    let ob3 = 0.00181 * RADSEC;

    let t = (tjm - T2000) / 36525.0;

    ((ob3 * t + ob2) * t + ob1) * t + ob0
}

/// One periodic term of the IAU 1980 nutation series.
///
/// `args` are the multipliers of (D, M, M', F, Ω); the amplitudes are in units of
/// 0.0001 arcsecond, with their secular rate per Julian century.
struct NutationTerm {
    args: [f64; 5],
    psi: (f64, f64),
    eps: (f64, f64),
}

const fn term(args: [f64; 5], psi: (f64, f64), eps: (f64, f64)) -> NutationTerm {
    NutationTerm { args, psi, eps }
}

/// Largest terms of the IAU 1980 series (accuracy ≈ 0.05″, plenty for a sky chart).
const NUTATION_TERMS: [NutationTerm; 13] = [
    term([0., 0., 0., 0., 1.], (-171996.0, -174.2), (92025.0, 8.9)),
    term([-2., 0., 0., 2., 2.], (-13187.0, -1.6), (5736.0, -3.1)),
    term([0., 0., 0., 2., 2.], (-2274.0, -0.2), (977.0, -0.5)),
    term([0., 0., 0., 0., 2.], (2062.0, 0.2), (-895.0, 0.5)),
    term([0., 1., 0., 0., 0.], (1426.0, -3.4), (54.0, -0.1)),
    term([0., 0., 1., 0., 0.], (712.0, 0.1), (-7.0, 0.0)),
    term([-2., 1., 0., 2., 2.], (-517.0, 1.2), (224.0, -0.6)),
    term([0., 0., 0., 2., 1.], (-386.0, -0.4), (200.0, 0.0)),
    term([0., 0., 1., 2., 2.], (-301.0, 0.0), (129.0, -0.1)),
    term([-2., -1., 0., 2., 2.], (217.0, -0.5), (-95.0, 0.3)),
    term([-2., 0., 1., 0., 0.], (-158.0, 0.0), (0.0, 0.0)),
    term([-2., 0., 0., 2., 1.], (129.0, 0.1), (-70.0, 0.0)),
    term([0., 0., -1., 2., 2.], (123.0, 0.0), (-53.0, 0.0)),
];

/// Fundamental lunar and solar arguments (D, M, M', F, Ω) in radians.
fn fundamental_arguments(t: f64) -> [f64; 5] {
    let t2 = t * t;
    let t3 = t2 * t;

    let d = 297.85036 + 445267.111480 * t - 0.0019142 * t2 + t3 / 189474.0;
    let m = 357.52772 + 35999.050340 * t - 0.0001603 * t2 - t3 / 300000.0;
    let mp = 134.96298 + 477198.867398 * t + 0.0086972 * t2 + t3 / 56250.0;
    let f = 93.27191 + 483202.017538 * t - 0.0036825 * t2 + t3 / 327270.0;
    let om = 125.04452 - 1934.136261 * t + 0.0020708 * t2 + t3 / 450000.0;

    [d, m, mp, f, om].map(|x| (x % 360.0) * RADEG)
}

/// Compute the nutation angles in longitude and obliquity (IAU 1980 model, truncated).
///
/// Arguments
/// ---------
/// * `tjm`: Modified Julian Date (TT scale).
///
/// Returns
/// --------
/// * `(Δψ, Δε)`: nutation in longitude and in obliquity, in **arcseconds**.
pub fn nutn80(tjm: f64) -> (ArcSec, ArcSec) {
    let t = (tjm - T2000) / 36525.0;
    let fundamental = fundamental_arguments(t);

    let (dpsi, deps) = NUTATION_TERMS.iter().fold((0.0, 0.0), |(dpsi, deps), term| {
        let arg: f64 = term
            .args
            .iter()
            .zip(fundamental.iter())
            .map(|(k, a)| k * a)
            .sum();
        (
            dpsi + (term.psi.0 + term.psi.1 * t) * arg.sin(),
            deps + (term.eps.0 + term.eps.1 * t) * arg.cos(),
        )
    });

    (dpsi * 1e-4, deps * 1e-4)
}

/// Nutation matrix: mean equator and equinox of date → true equator and equinox of date.
///
/// ```text
/// N = R₁(−ε − Δε) · R₃(−Δψ) · R₁(ε)
/// ```
pub fn rnut80(tjm: f64) -> Matrix3<f64> {
    let epsm = obleq(tjm);
    let (dpsi, deps) = nutn80(tjm);
    let epst = epsm + deps * RADSEC;

    rotmt(-epst, 0) * rotmt(-dpsi * RADSEC, 2) * rotmt(epsm, 0)
}

/// Equation of the equinoxes (GAST − GMST) in radians.
///
/// ```text
/// Eq_eq = Δψ · cos ε
/// ```
pub fn equequ(tjm: f64) -> f64 {
    let oblm = obleq(tjm);
    let (dpsi, _deps) = nutn80(tjm);

    RADSEC * dpsi * oblm.cos()
}

/// Precession matrix (IAU 1976): mean equator J2000 → mean equator of date.
///
/// ```text
/// P = R₃(−z) · R₂(θ) · R₃(−ζ)
/// ```
pub fn prec(tjm: f64) -> Matrix3<f64> {
    // arcseconds per century, century², century³
    let zeta_c = (2306.2181, 0.30188, 0.017998);
    let z_c = (2306.2181, 1.09468, 0.018203);
    let theta_c = (2004.3109, -0.42665, -0.041833);

    let t = (tjm - T2000) / 36525.0;
    let poly = |(c1, c2, c3): (f64, f64, f64)| ((c3 * t + c2) * t + c1) * t * RADSEC;

    let zeta = poly(zeta_c);
    let z = poly(z_c);
    let theta = poly(theta_c);

    rotmt(-z, 2) * rotmt(theta, 1) * rotmt(-zeta, 2)
}
