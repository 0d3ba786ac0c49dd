//! # Civil time handling and sidereal time
//!
//! Conversion of a naive local wall-clock string into an absolute [`hifitime::Epoch`]
//! in UTC, and the Greenwich Mean Sidereal Time used to orient the Earth.
//!
//! Local times are interpreted in an IANA timezone (via `chrono-tz`). A wall-clock time
//! that does not exist (spring-forward gap) or exists twice (fall-back overlap) is
//! rejected with [`SkyChartError::TimezoneError`]; the caller has to supply an
//! unambiguous time instead.

use std::str::FromStr;

use chrono::{DateTime, Datelike, LocalResult, NaiveDateTime, TimeZone, Timelike, Utc};
use chrono_tz::Tz;
use hifitime::Epoch;

use crate::constants::{DPI, T2000};
use crate::skychart_errors::SkyChartError;

/// Wall-clock format accepted for chart requests, e.g. `2024-06-21 00:00`.
pub const LOCAL_DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Parse a naive local date-time in the [`LOCAL_DATETIME_FORMAT`] format.
///
/// Errors
/// ------
/// * [`SkyChartError::ParseError`] if the string does not match the format or names an
///   impossible calendar date/time (e.g. `"2024-13-40 99:99"`).
pub fn parse_local_datetime(local_datetime: &str) -> Result<NaiveDateTime, SkyChartError> {
    NaiveDateTime::parse_from_str(local_datetime, LOCAL_DATETIME_FORMAT)
        .map_err(|_| SkyChartError::ParseError(local_datetime.to_string()))
}

/// Look up an IANA timezone by name (e.g. `"America/New_York"`).
pub fn parse_timezone(timezone_name: &str) -> Result<Tz, SkyChartError> {
    Tz::from_str(timezone_name)
        .map_err(|_| SkyChartError::TimezoneError(format!("unknown timezone {timezone_name:?}")))
}

/// Localize a naive wall-clock time in `timezone` and return the corresponding UTC instant.
///
/// Arguments
/// ---------
/// * `local`: naive local date-time.
/// * `timezone`: IANA timezone the wall-clock time is expressed in.
///
/// Return
/// ------
/// * The instant as a `chrono` UTC date-time.
///
/// Errors
/// ------
/// * [`SkyChartError::TimezoneError`] if the local time falls in a daylight-saving gap or
///   overlap.
pub fn localize(local: &NaiveDateTime, timezone: &Tz) -> Result<DateTime<Utc>, SkyChartError> {
    match timezone.from_local_datetime(local) {
        LocalResult::Single(dt) => Ok(dt.with_timezone(&Utc)),
        LocalResult::Ambiguous(first, second) => Err(SkyChartError::TimezoneError(format!(
            "local time {local} is ambiguous in {timezone} ({} or {})",
            first.with_timezone(&Utc),
            second.with_timezone(&Utc)
        ))),
        LocalResult::None => Err(SkyChartError::TimezoneError(format!(
            "local time {local} does not exist in {timezone}"
        ))),
    }
}

/// Convert a `chrono` UTC date-time into a `hifitime` epoch in the UTC time scale.
pub fn utc_to_epoch(utc: &DateTime<Utc>) -> Epoch {
    Epoch::from_gregorian_utc(
        utc.year(),
        utc.month() as u8,
        utc.day() as u8,
        utc.hour() as u8,
        utc.minute() as u8,
        utc.second() as u8,
        utc.nanosecond(),
    )
}

/// Full conversion from a local wall-clock string and a timezone name to a UTC epoch.
///
/// Errors
/// ------
/// * [`SkyChartError::ParseError`] for a malformed date-time string.
/// * [`SkyChartError::TimezoneError`] for an unknown timezone or an ambiguous/non-existent
///   local time.
pub fn local_to_epoch(local_datetime: &str, timezone_name: &str) -> Result<Epoch, SkyChartError> {
    let naive = parse_local_datetime(local_datetime)?;
    let tz = parse_timezone(timezone_name)?;
    let utc = localize(&naive, &tz)?;
    Ok(utc_to_epoch(&utc))
}

/// Greenwich Mean Sidereal Time, IAU 1982.
///
/// The sidereal time at the preceding 0h is given by the IAU polynomial in Julian
/// centuries; the elapsed part of the day is scaled by the sidereal/solar day ratio.
///
/// Arguments
/// ---------
/// * `tjm`: Modified Julian Date. UT1 in principle; UTC is used throughout the crate.
///
/// Return
/// ------
/// * GMST in radians, in [0, 2π).
pub fn gmst(tjm: f64) -> f64 {
    // GMST at 0h, seconds
    const C0: f64 = 24110.54841;
    const C1: f64 = 8640184.812866;
    const C2: f64 = 9.3104e-2;
    const C3: f64 = -6.2e-6;

    // sidereal / solar day
    const RAP: f64 = 1.00273790934;

    let itjm = tjm.floor();
    let t = (itjm - T2000) / 36525.0;

    // GMST at 0h UT1, seconds → radians
    let gmst0 = (((C3 * t + C2) * t + C1) * t + C0) * DPI / 86400.0;

    // Earth rotation during the elapsed fraction of the day
    let h = (tjm - itjm) * DPI;

    (gmst0 + h * RAP).rem_euclid(DPI)
}

#[cfg(test)]
mod time_test {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_parse_local_datetime() {
        let dt = parse_local_datetime("2024-06-21 00:00").unwrap();
        assert_eq!(dt.to_string(), "2024-06-21 00:00:00");

        assert_eq!(
            parse_local_datetime("2024-13-40 99:99"),
            Err(SkyChartError::ParseError("2024-13-40 99:99".to_string()))
        );
        assert!(parse_local_datetime("21/06/2024 00:00").is_err());
        assert!(parse_local_datetime("").is_err());
    }

    #[test]
    fn test_unknown_timezone() {
        let err = local_to_epoch("2024-06-21 00:00", "Mars/Olympus_Mons").unwrap_err();
        assert!(matches!(err, SkyChartError::TimezoneError(_)));
    }

    #[test]
    fn test_local_to_epoch() {
        // EDT is UTC-4 in June
        let epoch = local_to_epoch("2024-06-21 00:00", "America/New_York").unwrap();
        assert_eq!(epoch, Epoch::from_gregorian_utc_hms(2024, 6, 21, 4, 0, 0));

        let epoch = local_to_epoch("2024-01-15 12:30", "Europe/Paris").unwrap();
        assert_eq!(epoch, Epoch::from_gregorian_utc_hms(2024, 1, 15, 11, 30, 0));
    }

    #[test]
    fn test_daylight_saving_overlap_is_rejected() {
        // 2024-11-03 01:30 happens twice in New York
        let err = local_to_epoch("2024-11-03 01:30", "America/New_York").unwrap_err();
        assert!(matches!(err, SkyChartError::TimezoneError(_)));
    }

    #[test]
    fn test_daylight_saving_gap_is_rejected() {
        // 2024-03-10 02:30 is skipped in New York
        let err = local_to_epoch("2024-03-10 02:30", "America/New_York").unwrap_err();
        assert!(matches!(err, SkyChartError::TimezoneError(_)));
    }

    #[test]
    fn test_gmst() {
        let tut = 57028.478514610404;
        assert_relative_eq!(gmst(tut), 4.851925725092499, epsilon = 1e-12);

        assert_relative_eq!(gmst(T2000), 4.894961212789145, epsilon = 1e-12);
    }
}
