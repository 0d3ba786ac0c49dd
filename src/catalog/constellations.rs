//! Parser for Stellarium constellation outlines (`constellationship.fab`).
//!
//! Each non-comment line describes one constellation:
//!
//! ```text
//! UMi 7 11767 85822 85822 82080 82080 77055 77055 79822 79822 75097 75097 72607 72607 77055
//! ```
//!
//! i.e. the abbreviated name, the number of outline segments, then the segments as pairs of
//! Hipparcos numbers. Lines starting with `#` and blank lines are ignored.

use camino::Utf8Path;
use itertools::Itertools;
use log::debug;
use nom::{
    bytes::complete::take_while1,
    character::complete::{space0, space1, u32 as star_id},
    combinator::eof,
    multi::many0,
    sequence::{preceded, terminated},
    IResult, Parser,
};

use super::{Constellation, ConstellationEdge};
use crate::constants::StarId;
use crate::skychart_errors::SkyChartError;

type RawConstellation<'a> = (&'a str, u32, Vec<StarId>);

fn parse_name(input: &str) -> IResult<&str, &str> {
    preceded(space0, take_while1(|c: char| !c.is_whitespace())).parse(input)
}

fn parse_line(input: &str) -> IResult<&str, RawConstellation<'_>> {
    terminated(
        (
            parse_name,
            preceded(space1, star_id),
            many0(preceded(space1, star_id)),
        ),
        (space0, eof),
    )
    .parse(input)
}

fn constellation_from_line(line: &str) -> Result<Constellation, SkyChartError> {
    let (_, (name, declared, ids)) =
        parse_line(line).map_err(|_| SkyChartError::NomParsingError(line.to_string()))?;

    if ids.len() % 2 != 0 || ids.len() / 2 != declared as usize {
        return Err(SkyChartError::CatalogFormatError(format!(
            "{name}: {declared} edges declared but {} star ids listed",
            ids.len()
        )));
    }

    let edges = ids
        .into_iter()
        .tuples()
        .map(|(star1, star2)| ConstellationEdge::new(star1, star2))
        .collect();

    Ok(Constellation {
        name: name.to_string(),
        edges,
    })
}

/// Parse the content of a `constellationship.fab` file.
///
/// Errors
/// ------
/// * [`SkyChartError::NomParsingError`] for a line that is not `name count id id …`.
/// * [`SkyChartError::CatalogFormatError`] when the declared edge count does not match the
///   listed ids.
pub fn parse_constellations(content: &str) -> Result<Vec<Constellation>, SkyChartError> {
    let constellations = content
        .lines()
        .filter(|line| !line.trim().is_empty() && !line.trim_start().starts_with('#'))
        .map(constellation_from_line)
        .collect::<Result<Vec<_>, SkyChartError>>()?;

    debug!("parsed {} constellation outlines", constellations.len());
    Ok(constellations)
}

/// Read and parse a `constellationship.fab` file from disk.
pub fn read_constellations(path: &Utf8Path) -> Result<Vec<Constellation>, SkyChartError> {
    let content = std::fs::read_to_string(path)?;
    parse_constellations(&content)
}
