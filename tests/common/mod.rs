#![allow(dead_code)]

use skychart::catalog::{StarCatalog, StarRecord};

pub const NYC_LATITUDE: f64 = 40.7128;
pub const NYC_LONGITUDE: f64 = -74.0060;
pub const NYC_TIMEZONE: &str = "America/New_York";

/// 2024-06-21T04:00Z
pub const NYC_LOCAL_DATETIME: &str = "2024-06-21 00:00";

pub const POLARIS: u32 = 11767;

/// Ten bright stars, Hipparcos astrometry at J1991.25.
pub fn bright_star_catalog() -> StarCatalog {
    let hip_epoch = skychart::constants::julian_year_to_mjd(1991.25);
    let star = |id, ra, dec, mag, plx, pm_ra, pm_dec| {
        StarRecord::new(id, ra, dec, mag)
            .with_parallax(plx)
            .with_proper_motion(pm_ra, pm_dec)
            .with_epoch(hip_epoch)
    };

    StarCatalog::new(vec![
        star(POLARIS, 37.94614689, 89.26413805, 1.97, 7.56, 44.22, -11.74),
        star(32349, 101.28715539, -16.71611582, -1.44, 379.21, -546.01, -1223.08),
        star(91262, 279.23410832, 38.78299311, 0.03, 128.93, 201.02, 287.46),
        star(69673, 213.91811403, 19.18726997, -0.05, 88.85, -1093.45, -1999.40),
        star(24608, 79.17206517, 45.99902927, 0.08, 77.29, 75.52, -427.13),
        star(24436, 78.63446353, -8.20163919, 0.18, 4.22, 1.87, -0.56),
        star(37279, 114.82724194, 5.22750767, 0.40, 285.93, -716.57, -1034.58),
        star(97649, 297.69582730, 8.86738491, 0.76, 194.44, 536.82, 385.54),
        star(102098, 310.35797975, 45.28033423, 1.25, 1.01, 1.56, 1.55),
        star(85822, 263.05406251, 86.58646037, 4.35, 18.69, 26.46, 5.29),
    ])
    .expect("the test catalog has unique ids")
}
