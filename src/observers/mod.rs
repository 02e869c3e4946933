//! # Observer site & observation context
//!
//! This module holds the two values that describe *where* and *when* a plan is
//! computed:
//!
//! - [`ObserverSite`](crate::observers::ObserverSite) – geodetic latitude, east longitude and height of the
//!   observer, stored as NaN-free floats.
//! - [`ObservationContext`](crate::observers::ObservationContext) – a site paired with an absolute instant
//!   ([`hifitime::Epoch`]).
//!
//! Both are passed **explicitly** to every planning call; nothing in the crate keeps a
//! process-wide "current observer".
//!
//! ## Units
//!
//! - Latitude: **degrees**, north positive, in [-90, 90].
//! - Longitude: **degrees**, east positive.
//! - Height: **meters** above the reference ellipsoid.
//!
//! ## Errors
//!
//! - [`ObserverSite::new`](crate::observers::ObserverSite::new) returns [`CelestspError`](crate::celestsp_errors::CelestspError) when a coordinate is NaN or the
//!   latitude is out of range.
use std::fmt;

use hifitime::Epoch;
use ordered_float::NotNan;

use crate::celestsp_errors::CelestspError;
use crate::constants::{Degree, Meter};

/// Geodetic position of the observer.
///
/// Fields
/// -----------------
/// * `latitude`: degrees, north positive.
/// * `longitude`: degrees, east positive.
/// * `height`: meters.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub struct ObserverSite {
    latitude: NotNan<f64>,
    longitude: NotNan<f64>,
    height: NotNan<f64>,
}

impl ObserverSite {
    /// Create a new observer site from geodetic coordinates.
    ///
    /// Arguments
    /// -----------------
    /// * `latitude`: Geodetic latitude in **degrees**.
    /// * `longitude`: Longitude in **degrees** (east positive).
    /// * `height`: Height in **meters**.
    ///
    /// Errors
    /// ----------
    /// * [`CelestspError::NanCoordinate`] if any input is NaN.
    /// * [`CelestspError::InvalidInput`] if `|latitude| > 90`.
    pub fn new(latitude: Degree, longitude: Degree, height: Meter) -> Result<Self, CelestspError> {
        let latitude = NotNan::new(latitude)?;
        if latitude.into_inner().abs() > 90.0 {
            return Err(CelestspError::InvalidInput(format!(
                "latitude {latitude} is outside [-90, 90]"
            )));
        }

        Ok(ObserverSite {
            latitude,
            longitude: NotNan::new(longitude)?,
            height: NotNan::new(height)?,
        })
    }

    pub fn latitude(&self) -> Degree {
        self.latitude.into_inner()
    }

    pub fn longitude(&self) -> Degree {
        self.longitude.into_inner()
    }

    pub fn height(&self) -> Meter {
        self.height.into_inner()
    }
}

impl fmt::Display for ObserverSite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Lat: {}, Lon: {}, Height: {}m",
            self.latitude, self.longitude, self.height
        )
    }
}

/// Observer site together with the absolute instant of the observation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObservationContext {
    pub site: ObserverSite,
    pub epoch: Epoch,
}

impl ObservationContext {
    pub fn new(site: ObserverSite, epoch: Epoch) -> Self {
        ObservationContext { site, epoch }
    }
}
