use thiserror::Error;

use crate::constants::StarId;

#[derive(Error, Debug)]
pub enum SkyChartError {
    #[error("Coordinate out of range: {0}")]
    RangeError(String),

    #[error("Invalid date-time {0:?}, expected format YYYY-MM-DD HH:MM")]
    ParseError(String),

    #[error("Timezone error: {0}")]
    TimezoneError(String),

    #[error("Constellation edge references star {0} which is not in the star catalog")]
    CatalogIntegrityError(StarId),

    #[error("Ephemeris error: {0}")]
    EphemerisError(String),

    #[error("Malformed catalog row: {0}")]
    CatalogFormatError(String),

    #[error("Error during the nom parsing: {0}")]
    NomParsingError(String),

    #[error("CSV reader error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Unable to perform file operation: {0}")]
    IoError(#[from] std::io::Error),
}

impl From<ordered_float::FloatIsNan> for SkyChartError {
    fn from(_: ordered_float::FloatIsNan) -> Self {
        SkyChartError::RangeError("NaN is not a valid coordinate".to_string())
    }
}

impl PartialEq for SkyChartError {
    fn eq(&self, other: &Self) -> bool {
        use SkyChartError::*;
        match (self, other) {
            (RangeError(a), RangeError(b)) => a == b,
            (ParseError(a), ParseError(b)) => a == b,
            (TimezoneError(a), TimezoneError(b)) => a == b,
            (CatalogIntegrityError(a), CatalogIntegrityError(b)) => a == b,
            (EphemerisError(a), EphemerisError(b)) => a == b,
            (CatalogFormatError(a), CatalogFormatError(b)) => a == b,
            (NomParsingError(a), NomParsingError(b)) => a == b,

            // sources are not comparable: same variant is enough
            (CsvError(_), CsvError(_)) => true,
            (IoError(_), IoError(_)) => true,

            _ => false,
        }
    }
}
