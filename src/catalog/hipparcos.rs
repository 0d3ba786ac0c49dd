//! Loader for the Hipparcos main catalog (`hip_main.dat`, ESA 1997, CDS I/239).
//!
//! The file is pipe-delimited without header. Only the astrometric and photometric
//! columns needed by the chart are read:
//!
//! | field | content                                 |
//! |-------|-----------------------------------------|
//! | 1     | HIP number                              |
//! | 5     | V magnitude                             |
//! | 8, 9  | RA / Dec in degrees (ICRS, J1991.25)    |
//! | 11    | trigonometric parallax (mas)            |
//! | 12,13 | proper motion μα·cosδ, μδ (mas/yr)      |
//!
//! A few hundred entries have no astrometric solution (blank RA/Dec): they are skipped.
//! Any other malformed field fails the whole load.

use std::io::Read;
use std::str::FromStr;

use camino::Utf8Path;
use csv::{ReaderBuilder, StringRecord, Trim};
use log::{debug, warn};

use super::{StarCatalog, StarRecord};
use crate::constants::{julian_year_to_mjd, HIPPARCOS_EPOCH_YEAR};
use crate::skychart_errors::SkyChartError;

const HIP: usize = 1;
const VMAG: usize = 5;
const RA_DEG: usize = 8;
const DEC_DEG: usize = 9;
const PLX: usize = 11;
const PM_RA: usize = 12;
const PM_DEC: usize = 13;

fn field<'r>(record: &'r StringRecord, idx: usize) -> Result<&'r str, SkyChartError> {
    record.get(idx).ok_or_else(|| {
        SkyChartError::CatalogFormatError(format!(
            "Hipparcos row has {} fields, field {idx} is missing: {record:?}",
            record.len()
        ))
    })
}

fn parse_field<T: FromStr>(record: &StringRecord, idx: usize) -> Result<T, SkyChartError> {
    let raw = field(record, idx)?;
    raw.parse().map_err(|_| {
        SkyChartError::CatalogFormatError(format!("invalid value {raw:?} in field {idx}"))
    })
}

/// Blank fields are read as zero (no parallax / no proper motion).
fn parse_optional(record: &StringRecord, idx: usize) -> Result<f64, SkyChartError> {
    if field(record, idx)?.is_empty() {
        Ok(0.0)
    } else {
        parse_field(record, idx)
    }
}

/// Convert one Hipparcos row into a [`StarRecord`].
///
/// Return
/// ------
/// * `Ok(None)` for entries without astrometry (blank RA or Dec).
pub(crate) fn parse_hipparcos_record(
    record: &StringRecord,
) -> Result<Option<StarRecord>, SkyChartError> {
    if field(record, RA_DEG)?.is_empty() || field(record, DEC_DEG)?.is_empty() {
        return Ok(None);
    }

    let star = StarRecord::new(
        parse_field(record, HIP)?,
        parse_field(record, RA_DEG)?,
        parse_field(record, DEC_DEG)?,
        parse_field(record, VMAG)?,
    )
    .with_parallax(parse_optional(record, PLX)?)
    .with_proper_motion(parse_optional(record, PM_RA)?, parse_optional(record, PM_DEC)?)
    .with_epoch(julian_year_to_mjd(HIPPARCOS_EPOCH_YEAR));

    Ok(Some(star))
}

impl StarCatalog {
    /// Read a Hipparcos main catalog from any reader.
    ///
    /// Errors
    /// ------
    /// * [`SkyChartError::CsvError`] if the stream cannot be read.
    /// * [`SkyChartError::CatalogFormatError`] for a malformed row or a duplicate HIP number.
    pub fn from_hipparcos_reader<R: Read>(reader: R) -> Result<Self, SkyChartError> {
        let mut rdr = ReaderBuilder::new()
            .delimiter(b'|')
            .has_headers(false)
            .flexible(true)
            .trim(Trim::All)
            .from_reader(reader);

        let mut stars = Vec::new();
        let mut skipped = 0usize;
        for record in rdr.records() {
            match parse_hipparcos_record(&record?)? {
                Some(star) => stars.push(star),
                None => skipped += 1,
            }
        }

        if skipped > 0 {
            warn!("{skipped} Hipparcos entries without astrometry were skipped");
        }
        debug!("loaded {} Hipparcos stars", stars.len());

        StarCatalog::new(stars)
    }

    /// Read a Hipparcos main catalog from a file on disk.
    pub fn from_hipparcos_path(path: &Utf8Path) -> Result<Self, SkyChartError> {
        let file = std::fs::File::open(path)?;
        StarCatalog::from_hipparcos_reader(std::io::BufReader::new(file))
    }
}
