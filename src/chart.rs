//! # Chart layout
//!
//! Render-ready description of a star chart: what to draw and where, in the unit-disk
//! coordinates of [`SkyProjection`]. Rasterization is left to the caller.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::constants::StarId;
use crate::projection::{ProjectedEdge, SkyProjection};
use crate::time::LOCAL_DATETIME_FORMAT;

/// Chart parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    /// Figure side, in inches.
    pub chart_size: u32,
    /// Marker size of a magnitude 0 star.
    pub max_star_size: f64,
    /// Faintest magnitude drawn.
    pub limiting_magnitude: f64,
    /// Output resolution, dots per inch.
    pub dpi: u32,
}

impl Default for ChartConfig {
    fn default() -> Self {
        ChartConfig {
            chart_size: 12,
            max_star_size: 200.0,
            limiting_magnitude: 10.0,
            dpi: 1200,
        }
    }
}

impl ChartConfig {
    /// Marker size of a star, `max_star_size · 10^(−m / 2.5)`.
    pub fn marker_size(&self, magnitude: f64) -> f64 {
        self.max_star_size * 10f64.powf(magnitude / -2.5)
    }
}

/// One star to draw.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StarMarker {
    pub id: StarId,
    pub x: f64,
    pub y: f64,
    pub magnitude: f64,
    pub size: f64,
}

impl StarMarker {
    pub fn is_above_horizon(&self) -> bool {
        self.x.hypot(self.y) <= 1.0
    }
}

/// Everything a renderer needs to draw one chart.
///
/// Markers and segments are not clipped: the renderer clips them to the horizon circle of
/// radius [`ChartLayout::horizon_radius`] centred on the origin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartLayout {
    pub title: String,
    pub file_name: String,
    pub chart_size: u32,
    pub dpi: u32,
    pub horizon_radius: f64,
    pub markers: Vec<StarMarker>,
    pub segments: Vec<ProjectedEdge>,
}

impl ChartLayout {
    /// Lay out a projected sky.
    ///
    /// Arguments
    /// ---------
    /// * `location`: place name, used in the title and the file name.
    /// * `local_datetime`: local wall-clock time of the observation.
    /// * `sky`: projector output.
    /// * `config`: marker scaling and magnitude cut.
    ///
    /// Return
    /// ------
    /// * Markers for the stars no fainter than `config.limiting_magnitude`, in catalog
    ///   order, and one segment per constellation edge.
    pub fn compose(
        location: &str,
        local_datetime: &NaiveDateTime,
        sky: &SkyProjection,
        config: &ChartConfig,
    ) -> Self {
        let markers = sky
            .stars
            .iter()
            .filter(|star| star.magnitude <= config.limiting_magnitude)
            .map(|star| StarMarker {
                id: star.id,
                x: star.x,
                y: star.y,
                magnitude: star.magnitude,
                size: config.marker_size(star.magnitude),
            })
            .collect();

        ChartLayout {
            title: format!(
                "Observation Location: {location}, Time: {}",
                local_datetime.format(LOCAL_DATETIME_FORMAT)
            ),
            file_name: format!("{location}_{}.png", local_datetime.format("%Y%m%d_%H%M")),
            chart_size: config.chart_size,
            dpi: config.dpi,
            horizon_radius: 1.0,
            markers,
            segments: sky.edges.clone(),
        }
    }
}

#[cfg(test)]
mod chart_test {
    use super::*;
    use crate::projection::ProjectedStar;
    use crate::time::parse_local_datetime;
    use approx::assert_relative_eq;

    fn sky() -> SkyProjection {
        let star = |id, magnitude, x, y| ProjectedStar {
            id,
            magnitude,
            x,
            y,
        };
        SkyProjection {
            center_ra: 0.0,
            center_dec: 0.0,
            stars: vec![
                star(1, -1.44, 0.1, 0.2),
                star(2, 10.0, -0.5, 0.5),
                star(3, 10.5, 0.0, 0.0),
                star(4, 0.0, 1.5, 0.0),
            ],
            edges: vec![ProjectedEdge {
                star1: 1,
                star2: 4,
                start: (0.1, 0.2),
                end: (1.5, 0.0),
            }],
        }
    }

    #[test]
    fn test_default_config() {
        let config = ChartConfig::default();
        assert_eq!(config.chart_size, 12);
        assert_eq!(config.max_star_size, 200.0);
        assert_eq!(config.limiting_magnitude, 10.0);
        assert_eq!(config.dpi, 1200);
    }

    #[test]
    fn test_marker_size() {
        let config = ChartConfig::default();
        assert_relative_eq!(config.marker_size(0.0), 200.0);
        // 5 magnitudes is a factor 100
        assert_relative_eq!(config.marker_size(5.0), 2.0, max_relative = 1e-12);
        assert!(config.marker_size(-1.0) > 200.0);
    }

    #[test]
    fn test_compose() {
        let local = parse_local_datetime("2024-06-21 00:00").unwrap();
        let layout = ChartLayout::compose("New York", &local, &sky(), &ChartConfig::default());

        assert_eq!(
            layout.title,
            "Observation Location: New York, Time: 2024-06-21 00:00"
        );
        assert_eq!(layout.file_name, "New York_20240621_0000.png");
        assert_eq!(layout.horizon_radius, 1.0);
        assert_eq!(layout.chart_size, 12);

        // magnitude 10.5 is cut, magnitude 10.0 kept
        assert_eq!(
            layout.markers.iter().map(|m| m.id).collect::<Vec<_>>(),
            vec![1, 2, 4]
        );
        assert!(layout.markers[0].is_above_horizon());
        assert!(!layout.markers[2].is_above_horizon());

        assert_eq!(layout.segments.len(), 1);
        assert_eq!(layout.segments[0].end, (1.5, 0.0));
    }

    #[test]
    fn test_config_partial_deserialization() {
        // missing fields fall back to defaults
        let config: ChartConfig = serde::de::Deserialize::deserialize(
            serde::de::value::MapDeserializer::<_, serde::de::value::Error>::new(
                vec![("max_star_size", 50.0_f64)].into_iter(),
            ),
        )
        .unwrap();
        assert_eq!(config.max_star_size, 50.0);
        assert_eq!(config.chart_size, 12);
    }
}
