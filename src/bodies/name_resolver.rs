//! # Name resolution
//!
//! A [`NameResolver`] turns an object name (`"M31"`, `"Betelgeuse"`, `"NGC 7000"`) into
//! J2000 equatorial coordinates. The network-backed implementation,
//! [`SesameResolver`], queries the CDS **Sesame** name resolver, which aggregates
//! SIMBAD, NED and VizieR.
//!
//! Sesame is asked for its plain-text output (`-oI`); the coordinates are read from
//! the first `%J` line:
//!
//! ```text
//! # M31	#Q22979442
//! #=Sc=Simbad (via url):    1
//! %J 010.684708 +41.268750 = 00:42:44.33 +41:16:07.5
//! ```
use nom::{
    bytes::complete::tag,
    character::complete::{space0, space1},
    number::complete::double,
    sequence::preceded,
    IResult, Parser,
};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::celestsp_errors::CelestspError;
use crate::constants::Degree;
use crate::env_state::CelestspEnv;

/// Base URL of the CDS Sesame resolver, text output, all databases.
pub const SESAME_URL: &str = "https://cds.unistra.fr/cgi-bin/nph-sesame/-oI/A";

/// Source of J2000 coordinates for named objects.
pub trait NameResolver {
    /// Return `(right ascension, declination)` in degrees for `name`.
    fn resolve(&self, name: &str) -> Result<(Degree, Degree), CelestspError>;
}

/// [`NameResolver`] backed by the CDS Sesame web service.
#[derive(Debug, Clone)]
pub struct SesameResolver<'a> {
    env: &'a CelestspEnv,
}

impl<'a> SesameResolver<'a> {
    pub fn new(env: &'a CelestspEnv) -> Self {
        SesameResolver { env }
    }
}

impl NameResolver for SesameResolver<'_> {
    fn resolve(&self, name: &str) -> Result<(Degree, Degree), CelestspError> {
        let url = format!("{SESAME_URL}?{}", encode_query(name));
        let body = self.env.get_from_url(url.as_str())?;
        parse_sesame_response(&body)
            .ok_or_else(|| CelestspError::NameResolution(name.to_string()))
    }
}

/// Characters escaped in a query: everything but the RFC 3986 unreserved set.
const QUERY_ESCAPE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Percent-encode the characters of an object name that cannot appear raw in a query.
fn encode_query(name: &str) -> String {
    utf8_percent_encode(name.trim(), QUERY_ESCAPE).to_string()
}

fn parse_j2000_line(input: &str) -> IResult<&str, (f64, f64)> {
    (
        preceded((tag("%J"), space1), double),
        preceded(space0, double),
    )
        .parse(input)
}

/// Extract the J2000 `(ra, dec)` pair, in degrees, from a Sesame `-oI` answer.
///
/// Return
/// ----------
/// * `None` when no `%J` line is present (unknown object).
pub fn parse_sesame_response(body: &str) -> Option<(Degree, Degree)> {
    body.lines()
        .map(str::trim_start)
        .filter(|line| line.starts_with("%J "))
        .find_map(|line| parse_j2000_line(line).ok().map(|(_, coords)| coords))
}
