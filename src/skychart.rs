//! # SkyChart: shared datasets and per-request chart building
//!
//! [`SkyChart`](crate::skychart::SkyChart) is the façade that wires together:
//!
//! 1. an **ephemeris provider** ([`Ephemeris`]) giving the Earth state,
//! 2. the **star catalog** ([`StarCatalog`]),
//! 3. the flattened **constellation edges** ([`ConstellationEdge`]),
//! 4. the **chart configuration** ([`ChartConfig`]).
//!
//! Datasets are loaded once, validated together at construction and then shared read-only
//! behind [`Arc`]s: cloning a `SkyChart` is cheap and clones can serve requests from several
//! threads at once. Each request is a pure function of its inputs.
//!
//! ## Typical usage
//!
//! ```rust
//! use std::sync::Arc;
//! use skychart::catalog::{StarCatalog, StarRecord};
//! use skychart::chart::ChartConfig;
//! use skychart::ephemeris::kepler_ephem::KeplerEphemeris;
//! use skychart::skychart::SkyChart;
//!
//! let catalog = StarCatalog::new(vec![
//!     StarRecord::new(11767, 37.946, 89.264, 1.97),
//!     StarRecord::new(85822, 263.054, 86.586, 4.35),
//! ])?;
//! let sky_chart = SkyChart::new(
//!     Arc::new(KeplerEphemeris::new()),
//!     Arc::new(catalog),
//!     vec![(11767, 85822).into()],
//!     ChartConfig::default(),
//! )?;
//!
//! let layout = sky_chart.chart("New York", 40.7128, -74.0060, "2024-06-21 00:00", "America/New_York")?;
//! assert_eq!(layout.file_name, "New York_20240621_0000.png");
//! # Ok::<(), skychart::skychart_errors::SkyChartError>(())
//! ```

use std::fmt;
use std::sync::Arc;

use log::debug;

use crate::catalog::{flatten_edges, Constellation, ConstellationEdge, StarCatalog};
use crate::chart::{ChartConfig, ChartLayout};
use crate::constants::Degree;
use crate::ephemeris::Ephemeris;
use crate::observers::ObserverFrame;
use crate::projection::{project, validate_edges, SkyProjection};
use crate::skychart_errors::SkyChartError;
use crate::time::{localize, parse_local_datetime, parse_timezone, utc_to_epoch};

#[derive(Clone)]
pub struct SkyChart {
    ephemeris: Arc<dyn Ephemeris>,
    catalog: Arc<StarCatalog>,
    edges: Arc<[ConstellationEdge]>,
    config: Arc<ChartConfig>,
}

impl SkyChart {
    /// Assemble a chart context from loaded datasets.
    ///
    /// Errors
    /// ------
    /// * [`SkyChartError::CatalogIntegrityError`] if an edge references a star that is not in
    ///   the catalog.
    pub fn new(
        ephemeris: Arc<dyn Ephemeris>,
        catalog: Arc<StarCatalog>,
        edges: Vec<ConstellationEdge>,
        config: ChartConfig,
    ) -> Result<Self, SkyChartError> {
        validate_edges(&catalog, &edges)?;
        debug!(
            "sky chart context with {} stars and {} constellation edges",
            catalog.len(),
            edges.len()
        );

        Ok(SkyChart {
            ephemeris,
            catalog,
            edges: edges.into(),
            config: Arc::new(config),
        })
    }

    /// Same as [`SkyChart::new`], with the edges of named constellations.
    pub fn with_constellations(
        ephemeris: Arc<dyn Ephemeris>,
        catalog: Arc<StarCatalog>,
        constellations: &[Constellation],
        config: ChartConfig,
    ) -> Result<Self, SkyChartError> {
        SkyChart::new(ephemeris, catalog, flatten_edges(constellations), config)
    }

    pub fn ephemeris(&self) -> &dyn Ephemeris {
        self.ephemeris.as_ref()
    }

    pub fn catalog(&self) -> &StarCatalog {
        &self.catalog
    }

    pub fn edges(&self) -> &[ConstellationEdge] {
        &self.edges
    }

    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    /// Project the shared catalog and edges for `frame`.
    pub fn project(&self, frame: &ObserverFrame) -> Result<SkyProjection, SkyChartError> {
        project(frame, self.ephemeris.as_ref(), &self.catalog, &self.edges)
    }

    /// Build the chart layout of one request.
    ///
    /// Arguments
    /// ---------
    /// * `location`: place name, only used for the title and the file name.
    /// * `latitude`, `longitude`: geodetic coordinates of the place, degrees.
    /// * `local_datetime`: local wall-clock time, `YYYY-MM-DD HH:MM`.
    /// * `timezone_name`: IANA timezone of the place.
    ///
    /// Errors
    /// ------
    /// * Any error of [`ObserverFrame::resolve`] or [`project`]; no partial chart is returned.
    pub fn chart(
        &self,
        location: &str,
        latitude: Degree,
        longitude: Degree,
        local_datetime: &str,
        timezone_name: &str,
    ) -> Result<ChartLayout, SkyChartError> {
        let local = parse_local_datetime(local_datetime)?;
        let utc = localize(&local, &parse_timezone(timezone_name)?)?;
        let frame = ObserverFrame::new(latitude, longitude, utc_to_epoch(&utc))?;

        let sky = self.project(&frame)?;
        let layout = ChartLayout::compose(location, &local, &sky, &self.config);
        debug!(
            "chart {} with {} markers and {} segments",
            layout.file_name,
            layout.markers.len(),
            layout.segments.len()
        );
        Ok(layout)
    }
}

impl fmt::Debug for SkyChart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SkyChart")
            .field("stars", &self.catalog.len())
            .field("edges", &self.edges.len())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
