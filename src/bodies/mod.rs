//! # Celestial bodies and the per-run catalog
//!
//! - [`CelestialBody`](crate::bodies::CelestialBody) – a named target with J2000 equatorial coordinates (degrees).
//! - [`BodyCatalog`](crate::bodies::BodyCatalog) – the ordered, non-empty, duplicate-free list of bodies a plan is
//!   computed over. The position of a body in the catalog is its **node index** in the
//!   distance graph and in the tour.
//! - [`target_file`] – reading the target list from disk.
//! - [`name_resolver`] – turning a bare name into coordinates (CDS Sesame).
//!
//! Bodies are immutable once built; the catalog is created once per run and read-only
//! afterwards.
pub mod name_resolver;
pub mod target_file;

use std::collections::HashMap;

use ordered_float::NotNan;

use crate::celestsp_errors::CelestspError;
use crate::constants::Degree;

/// A named celestial target with catalog coordinates.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CelestialBody {
    name: String,
    ra: NotNan<f64>,
    dec: NotNan<f64>,
}

impl CelestialBody {
    /// Build a body from its name and J2000 coordinates.
    ///
    /// Arguments
    /// -----------------
    /// * `name`: Identifier, unique within a run.
    /// * `ra`: Right ascension in **degrees**.
    /// * `dec`: Declination in **degrees**, in [-90, 90].
    ///
    /// Errors
    /// ----------
    /// * [`CelestspError::NanCoordinate`] for NaN coordinates.
    /// * [`CelestspError::InvalidInput`] for an empty name, a non-finite right ascension
    ///   or a declination outside [-90, 90].
    pub fn new(name: impl Into<String>, ra: Degree, dec: Degree) -> Result<Self, CelestspError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(CelestspError::InvalidInput(
                "celestial body name is empty".into(),
            ));
        }

        let ra = NotNan::new(ra)?;
        let dec = NotNan::new(dec)?;
        if !ra.into_inner().is_finite() || dec.into_inner().abs() > 90.0 {
            return Err(CelestspError::InvalidInput(format!(
                "invalid coordinates for {name}: RA {ra}, Dec {dec}"
            )));
        }

        Ok(CelestialBody { name, ra, dec })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Right ascension (J2000) in degrees.
    pub fn ra(&self) -> Degree {
        self.ra.into_inner()
    }

    /// Declination (J2000) in degrees.
    pub fn dec(&self) -> Degree {
        self.dec.into_inner()
    }
}

/// Ordered list of the bodies planned in one run.
///
/// Invariants
/// -----------------
/// * At least one body.
/// * Names are unique (exact string comparison).
#[derive(Debug, Clone, PartialEq)]
pub struct BodyCatalog {
    bodies: Vec<CelestialBody>,
    index_by_name: HashMap<String, usize>,
}

impl BodyCatalog {
    /// Build the catalog, keeping the input order.
    ///
    /// Errors
    /// ----------
    /// * [`CelestspError::InvalidInput`] if `bodies` is empty or contains a duplicated name.
    pub fn new(bodies: Vec<CelestialBody>) -> Result<Self, CelestspError> {
        if bodies.is_empty() {
            return Err(CelestspError::InvalidInput(
                "no celestial body to plan".into(),
            ));
        }

        let mut index_by_name = HashMap::with_capacity(bodies.len());
        for (i, body) in bodies.iter().enumerate() {
            if index_by_name.insert(body.name.clone(), i).is_some() {
                return Err(CelestspError::InvalidInput(format!(
                    "duplicated celestial body name: {}",
                    body.name
                )));
            }
        }

        Ok(BodyCatalog {
            bodies,
            index_by_name,
        })
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    /// Always `false`: a catalog holds at least one body.
    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&CelestialBody> {
        self.bodies.get(index)
    }

    pub fn bodies(&self) -> &[CelestialBody] {
        &self.bodies
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CelestialBody> {
        self.bodies.iter()
    }

    /// Index of the body called exactly `name`, if any.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.index_by_name.get(name).copied()
    }
}

impl<'a> IntoIterator for &'a BodyCatalog {
    type Item = &'a CelestialBody;
    type IntoIter = std::slice::Iter<'a, CelestialBody>;

    fn into_iter(self) -> Self::IntoIter {
        self.bodies.iter()
    }
}
