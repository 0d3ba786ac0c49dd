use std::collections::HashMap;

use ahash::RandomState;
use hifitime::Epoch;

use super::{Body, BodyState, Ephemeris};
use crate::skychart_errors::SkyChartError;

/// Body states computed elsewhere (e.g. read from a JPL kernel upstream) at one reference
/// epoch.
///
/// Queries at another epoch propagate the snapshot linearly along the stored velocity,
/// which is only meaningful over a few hours.
#[derive(Debug, Clone)]
pub struct SnapshotEphemeris {
    epoch: Epoch,
    states: HashMap<Body, BodyState, RandomState>,
}

impl SnapshotEphemeris {
    pub fn new(epoch: Epoch) -> Self {
        SnapshotEphemeris {
            epoch,
            states: HashMap::default(),
        }
    }

    pub fn with_state(mut self, body: Body, state: BodyState) -> Self {
        self.states.insert(body, state);
        self
    }

    pub fn epoch(&self) -> Epoch {
        self.epoch
    }
}

impl Ephemeris for SnapshotEphemeris {
    fn barycentric_state(&self, body: Body, epoch: &Epoch) -> Result<BodyState, SkyChartError> {
        let state = self.states.get(&body).ok_or_else(|| {
            SkyChartError::EphemerisError(format!("{body} is not in the ephemeris snapshot"))
        })?;

        let dt = (*epoch - self.epoch).to_unit(hifitime::Unit::Day);
        Ok(BodyState::new(
            state.position + state.velocity * dt,
            state.velocity,
        ))
    }
}

#[cfg(test)]
mod snapshot_test {
    use super::*;
    use approx::assert_relative_eq;
    use hifitime::Unit;
    use nalgebra::Vector3;

    #[test]
    fn test_missing_body() {
        let epoch = Epoch::from_gregorian_utc_hms(2024, 6, 21, 4, 0, 0);
        let ephem = SnapshotEphemeris::new(epoch).with_state(Body::Sun, BodyState::zeros());

        assert_eq!(
            ephem.barycentric_state(Body::Earth, &epoch),
            Err(SkyChartError::EphemerisError(
                "earth is not in the ephemeris snapshot".to_string()
            ))
        );
        assert!(ephem.barycentric_state(Body::Sun, &epoch).is_ok());
    }

    #[test]
    fn test_linear_propagation() {
        let epoch = Epoch::from_gregorian_utc_hms(2024, 6, 21, 4, 0, 0);
        let state = BodyState::new(Vector3::new(1.0, 0.0, 0.0), Vector3::new(0.0, 0.0172, 0.0));
        let ephem = SnapshotEphemeris::new(epoch).with_state(Body::Earth, state);

        let later = epoch + Unit::Hour * 12;
        let propagated = ephem.barycentric_state(Body::Earth, &later).unwrap();
        assert_relative_eq!(propagated.position, Vector3::new(1.0, 0.0086, 0.0), epsilon = 1e-12);
        assert_eq!(propagated.velocity, state.velocity);
    }
}
