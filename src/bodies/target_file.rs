//! # Target list reader
//!
//! The target list is a UTF-8 text file with **one entry per line**:
//!
//! ```text
//! # comment lines and blank lines are skipped
//! M31
//! Betelgeuse
//! Polaris | 37.954561 | 89.264109
//! ```
//!
//! A bare name is handed to a [`NameResolver`] to obtain its coordinates. A line of the
//! form `name | ra_deg | dec_deg` carries its own J2000 coordinates and is never sent
//! to the resolver, which keeps offline runs possible.
//!
//! Names that fail to resolve are logged and skipped. The run fails only when the file
//! is missing, a line is malformed, or no body at all could be built.
use camino::Utf8Path;
use nom::{
    bytes::complete::take_till1,
    character::complete::{char, space0},
    combinator::{all_consuming, opt},
    number::complete::double,
    sequence::{delimited, preceded},
    IResult, Parser,
};
use tracing::{debug, warn};

use crate::bodies::name_resolver::NameResolver;
use crate::bodies::{BodyCatalog, CelestialBody};
use crate::celestsp_errors::CelestspError;
use crate::constants::Degree;

/// One parsed line of the target list.
#[derive(Debug, Clone, PartialEq)]
pub enum TargetEntry {
    /// Name only; coordinates must be looked up.
    Name(String),
    /// Name with inline `(ra, dec)` in degrees.
    WithCoordinates(String, Degree, Degree),
}

impl TargetEntry {
    pub fn name(&self) -> &str {
        match self {
            TargetEntry::Name(name) | TargetEntry::WithCoordinates(name, _, _) => name,
        }
    }
}

fn parse_separator_value(input: &str) -> IResult<&str, f64> {
    preceded(delimited(space0, char('|'), space0), double).parse(input)
}

fn parse_entry(input: &str) -> IResult<&str, TargetEntry> {
    let (input, name) = take_till1(|c: char| c == '|').parse(input)?;
    let (input, coords) = all_consuming(delimited(
        space0,
        opt((parse_separator_value, parse_separator_value)),
        space0,
    ))
    .parse(input)?;

    let name = name.trim().to_string();
    let entry = match coords {
        Some((ra, dec)) => TargetEntry::WithCoordinates(name, ra, dec),
        None => TargetEntry::Name(name),
    };
    Ok((input, entry))
}

/// Parse the content of a target list.
///
/// Return
/// ----------
/// * The entries in file order, comments and blank lines removed.
///
/// Errors
/// ----------
/// * [`CelestspError::ParsingError`] naming the first malformed line (1-based).
pub fn parse_target_list(content: &str) -> Result<Vec<TargetEntry>, CelestspError> {
    content
        .lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty() && !line.starts_with('#'))
        .map(|(line_no, line)| {
            parse_entry(line)
                .map(|(_, entry)| entry)
                .map_err(|_| CelestspError::ParsingError(format!("line {line_no}: {line}")))
        })
        .collect()
}

/// Turn parsed entries into a [`BodyCatalog`], resolving bare names with `resolver`.
///
/// Entries whose name cannot be resolved, or whose coordinates are invalid, are
/// skipped with a warning.
///
/// Errors
/// ----------
/// * [`CelestspError::InvalidInput`] if no body survives, or if two entries share a name.
pub fn build_catalog<R>(entries: Vec<TargetEntry>, resolver: &R) -> Result<BodyCatalog, CelestspError>
where
    R: NameResolver + ?Sized,
{
    let mut bodies = Vec::with_capacity(entries.len());

    for entry in entries {
        let coordinates = match &entry {
            TargetEntry::WithCoordinates(_, ra, dec) => Ok((*ra, *dec)),
            TargetEntry::Name(name) => resolver.resolve(name),
        };

        match coordinates.and_then(|(ra, dec)| CelestialBody::new(entry.name(), ra, dec)) {
            Ok(body) => {
                debug!(
                    name = body.name(),
                    ra = body.ra(),
                    dec = body.dec(),
                    "Resolved celestial body"
                );
                bodies.push(body);
            }
            Err(err) => warn!("Error looking up {}: {err}", entry.name()),
        }
    }

    if bodies.is_empty() {
        return Err(CelestspError::InvalidInput(
            "input file is empty or contains no valid celestial names".into(),
        ));
    }

    BodyCatalog::new(bodies)
}

/// Read the target list at `path` and build the run's catalog.
///
/// Errors
/// ----------
/// * [`CelestspError::IoError`] if the file cannot be read.
/// * Any error of [`parse_target_list`] or [`build_catalog`].
pub fn read_target_file<R>(path: &Utf8Path, resolver: &R) -> Result<BodyCatalog, CelestspError>
where
    R: NameResolver + ?Sized,
{
    let content = std::fs::read_to_string(path)?;
    let entries = parse_target_list(&content)?;
    build_catalog(entries, resolver)
}
