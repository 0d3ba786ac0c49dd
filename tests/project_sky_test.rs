mod common;

use approx::assert_abs_diff_eq;
use hifitime::Epoch;

use common::{
    bright_star_catalog, NYC_LATITUDE, NYC_LOCAL_DATETIME, NYC_LONGITUDE, NYC_TIMEZONE, POLARIS,
};
use skychart::catalog::{ConstellationEdge, StarCatalog, StarRecord};
use skychart::ephemeris::kepler_ephem::KeplerEphemeris;
use skychart::ephemeris::{Body, BodyState, Ephemeris};
use skychart::observers::ObserverFrame;
use skychart::projection::project;
use skychart::ref_system::radec_to_unit_vector;
use skychart::skychart_errors::SkyChartError;

fn nyc_frame() -> ObserverFrame {
    ObserverFrame::resolve(
        NYC_LATITUDE,
        NYC_LONGITUDE,
        NYC_LOCAL_DATETIME,
        NYC_TIMEZONE,
    )
    .unwrap()
}

#[test]
fn test_polaris_over_new_york() {
    let frame = nyc_frame();
    assert_eq!(
        frame.instant(),
        Epoch::from_gregorian_utc_hms(2024, 6, 21, 4, 0, 0)
    );

    let catalog = bright_star_catalog();
    let sky = project(&frame, &KeplerEphemeris::new(), &catalog, &[]).unwrap();

    let polaris = sky.stars.iter().find(|s| s.id == POLARIS).unwrap();
    // zenith distance ≈ 49.8°, r = tan(z/2) ≈ 0.465, straight up the chart
    assert!(polaris.radius() > 0.44 && polaris.radius() < 0.49);
    assert!(polaris.y > 0.44);
    assert!(polaris.x.abs() < 0.02);
}

#[test]
fn test_cardinality_and_determinism() {
    let frame = nyc_frame();
    let ephem = KeplerEphemeris::new();
    let catalog = bright_star_catalog();
    let edges = vec![
        ConstellationEdge::new(POLARIS, 85822),
        ConstellationEdge::new(91262, 97649),
        ConstellationEdge::new(97649, 102098),
        ConstellationEdge::new(102098, 91262),
        ConstellationEdge::new(91262, 97649),
    ];

    let first = project(&frame, &ephem, &catalog, &edges).unwrap();
    let second = project(&frame, &ephem, &catalog, &edges).unwrap();

    assert_eq!(first.stars.len(), catalog.len());
    assert_eq!(first.edges.len(), edges.len());
    assert_eq!(first, second);

    // every point is reported, including stars below the horizon (Sirius at night)
    let sirius = first.stars.iter().find(|s| s.id == 32349).unwrap();
    assert!(sirius.radius() > 1.0);
}

#[test]
fn test_zenith_projects_to_origin() {
    let frame = nyc_frame();
    let (ra, dec) = frame.zenith_radec();
    let catalog =
        StarCatalog::new(vec![StarRecord::new(1, ra.to_degrees(), dec.to_degrees(), 3.0)])
            .unwrap();

    let sky = project(&frame, &KeplerEphemeris::new(), &catalog, &[]).unwrap();
    assert_abs_diff_eq!(sky.stars[0].x, 0.0, epsilon = 1e-9);
    assert_abs_diff_eq!(sky.stars[0].y, 0.0, epsilon = 1e-9);
}

#[test]
fn test_horizon_maps_to_unit_circle() {
    let frame = nyc_frame();
    let zenith = frame.zenith_direction();
    let side = zenith.cross(&nalgebra::Vector3::z()).normalize();
    let up = side.cross(&zenith);

    // distant stars on the horizon, all around it
    let stars = (0..12)
        .map(|k| {
            let azimuth = k as f64 * 30f64.to_radians();
            let u = side * azimuth.cos() + up * azimuth.sin();
            let (ra, dec, _) = skychart::ref_system::cartesian_to_radec(&u);
            StarRecord::new(k + 1, ra.to_degrees(), dec.to_degrees(), 5.0)
        })
        .collect();
    let catalog = StarCatalog::new(stars).unwrap();

    let sky = project(&frame, &KeplerEphemeris::new(), &catalog, &[]).unwrap();
    for star in &sky.stars {
        assert_abs_diff_eq!(star.radius(), 1.0, epsilon = 1e-9);
    }

    // just below the horizon is outside the disk
    let below = zenith * (-0.01) + side;
    let (ra, dec, _) = skychart::ref_system::cartesian_to_radec(&below);
    let catalog =
        StarCatalog::new(vec![StarRecord::new(99, ra.to_degrees(), dec.to_degrees(), 5.0)])
            .unwrap();
    let sky = project(&frame, &KeplerEphemeris::new(), &catalog, &[]).unwrap();
    assert!(sky.stars[0].radius() > 1.0);
}

#[test]
fn test_unknown_edge_endpoint() {
    let catalog = bright_star_catalog();
    assert_eq!(catalog.len(), 10);

    let edges = vec![
        ConstellationEdge::new(POLARIS, 85822),
        ConstellationEdge::new(999_999, 1),
    ];
    let err = project(&nyc_frame(), &KeplerEphemeris::new(), &catalog, &edges).unwrap_err();
    assert_eq!(err, SkyChartError::CatalogIntegrityError(999_999));
}

#[test]
fn test_malformed_datetime() {
    let err = ObserverFrame::resolve(NYC_LATITUDE, NYC_LONGITUDE, "2024-13-40 99:99", NYC_TIMEZONE)
        .unwrap_err();
    assert_eq!(
        err,
        SkyChartError::ParseError("2024-13-40 99:99".to_string())
    );
}

/// Earth state frozen at the barycentre: the projection no longer depends on the ephemeris.
struct EarthAtBarycentre;

impl Ephemeris for EarthAtBarycentre {
    fn barycentric_state(&self, body: Body, _epoch: &Epoch) -> Result<BodyState, SkyChartError> {
        match body {
            Body::Earth | Body::SolarSystemBarycenter | Body::Sun => Ok(BodyState::zeros()),
        }
    }
}

#[test]
fn test_custom_ephemeris_and_trait_object() {
    let frame = nyc_frame();
    let catalog = bright_star_catalog();

    let ephem: Box<dyn Ephemeris> = Box::new(EarthAtBarycentre);
    let from_barycentre = project(&frame, ephem.as_ref(), &catalog, &[]).unwrap();
    let from_earth = project(&frame, &KeplerEphemeris::new(), &catalog, &[]).unwrap();

    // the largest parallax here (Sirius, 0.38″) is negligible at chart scale
    for (a, b) in from_barycentre.stars.iter().zip(&from_earth.stars) {
        assert_abs_diff_eq!(a.x, b.x, epsilon = 1e-4);
        assert_abs_diff_eq!(a.y, b.y, epsilon = 1e-4);
    }
}

#[test]
fn test_missing_earth_is_fatal() {
    let frame = nyc_frame();
    let snapshot = skychart::ephemeris::snapshot::SnapshotEphemeris::new(frame.instant())
        .with_state(Body::Sun, BodyState::zeros());

    let err = project(&frame, &snapshot, &bright_star_catalog(), &[]).unwrap_err();
    assert!(matches!(err, SkyChartError::EphemerisError(_)));
}

#[test]
fn test_polaris_direction_is_close_to_catalog() {
    // proper motion over 33 years and parallax move Polaris by less than 2″
    let frame = nyc_frame();
    let catalog = bright_star_catalog();
    let earth = KeplerEphemeris::new()
        .barycentric_state(Body::Earth, &frame.instant())
        .unwrap();
    let barycentric = skychart::ephemeris::Barycentric {
        body: Body::Earth,
        epoch: frame.instant(),
        state: earth,
    };

    let polaris = catalog.get(POLARIS).unwrap();
    let observed = barycentric.observe(polaris).direction();
    let catalog_direction =
        radec_to_unit_vector(polaris.ra.to_radians(), polaris.dec.to_radians());
    let separation = observed.angle(&catalog_direction).to_degrees() * 3600.0;
    assert!(separation < 2.0, "separation = {separation}″");
}
