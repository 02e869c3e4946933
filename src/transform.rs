//! # Equatorial → horizontal coordinate transform
//!
//! The planner only needs one capability from astronomy: *given a body, an observer
//! site and an instant, where is the body in the local sky?* That capability is the
//! [`HorizontalTransform`] trait. The core is generic over it, so tests can inject
//! scripted skies and callers can plug in a more precise model.
//!
//! The crate ships [`MeanHorizontal`], a mean-place model:
//!
//! 1. J2000 unit vector from (α, δ),
//! 2. IAU 1976 precession to the mean equator of date ([`precession_matrix`]),
//! 3. local mean sidereal time → hour angle `H = LMST − α_date`,
//! 4. rotation to the horizon:
//!
//! ```text
//! sin(alt) = sinφ·sinδ + cosφ·cosδ·cosH
//! az       = atan2(−cosδ·sinH, sinδ·cosφ − cosδ·sinφ·cosH)
//! ```
//!
//! ## Conventions
//!
//! - Altitude in **degrees**, positive above the geometric horizon (no refraction).
//! - Azimuth in **degrees**, in [0, 360), measured from **north through east**.
//! - Nutation, aberration and proper motion are ignored; the resulting error is at the
//!   arcminute level.
use hifitime::Epoch;
use nalgebra::Vector3;

use crate::bodies::CelestialBody;
use crate::constants::{Degree, RADEG};
use crate::earth_orientation::{local_sidereal_time, precession_matrix};
use crate::observers::ObserverSite;

/// Local horizontal coordinates of a body.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AltAz {
    /// Altitude above the horizon, degrees.
    pub altitude: Degree,
    /// Azimuth from north through east, degrees in [0, 360).
    pub azimuth: Degree,
}

impl AltAz {
    pub fn new(altitude: Degree, azimuth: Degree) -> Self {
        AltAz { altitude, azimuth }
    }

    /// `true` when the altitude is strictly above `min_altitude` degrees.
    pub fn is_above(&self, min_altitude: Degree) -> bool {
        self.altitude > min_altitude
    }
}

/// Equatorial → horizontal transform.
///
/// Implementations must be deterministic and free of side effects: the same inputs
/// always give the same output.
pub trait HorizontalTransform {
    /// Horizontal coordinates of `body` seen from `site` at `epoch`.
    fn horizontal(&self, body: &CelestialBody, site: &ObserverSite, epoch: &Epoch) -> AltAz;

    /// Batch version of [`horizontal`](HorizontalTransform::horizontal).
    ///
    /// The output is aligned with `epochs`.
    fn horizontal_batch(
        &self,
        body: &CelestialBody,
        site: &ObserverSite,
        epochs: &[Epoch],
    ) -> Vec<AltAz> {
        epochs
            .iter()
            .map(|epoch| self.horizontal(body, site, epoch))
            .collect()
    }
}

impl<T: HorizontalTransform + ?Sized> HorizontalTransform for &T {
    fn horizontal(&self, body: &CelestialBody, site: &ObserverSite, epoch: &Epoch) -> AltAz {
        (**self).horizontal(body, site, epoch)
    }

    fn horizontal_batch(
        &self,
        body: &CelestialBody,
        site: &ObserverSite,
        epochs: &[Epoch],
    ) -> Vec<AltAz> {
        (**self).horizontal_batch(body, site, epochs)
    }
}

/// Mean-place horizontal transform (IAU 1976 precession + GMST).
#[derive(Debug, Clone, Copy, Default)]
pub struct MeanHorizontal;

impl MeanHorizontal {
    /// Right ascension and declination of date, in radians.
    fn mean_place_of_date(body: &CelestialBody, epoch: &Epoch) -> (f64, f64) {
        let ra = body.ra() * RADEG;
        let dec = body.dec() * RADEG;

        let j2000 = Vector3::new(dec.cos() * ra.cos(), dec.cos() * ra.sin(), dec.sin());
        let of_date = precession_matrix(epoch.to_mjd_tt_days()) * j2000;

        let dec_date = of_date.z.clamp(-1.0, 1.0).asin();
        let ra_date = of_date.y.atan2(of_date.x);
        (ra_date, dec_date)
    }
}

impl HorizontalTransform for MeanHorizontal {
    fn horizontal(&self, body: &CelestialBody, site: &ObserverSite, epoch: &Epoch) -> AltAz {
        let (ra, dec) = Self::mean_place_of_date(body, epoch);
        let lat = site.latitude() * RADEG;

        let hour_angle = local_sidereal_time(epoch, site.longitude()) - ra;

        let (sin_lat, cos_lat) = lat.sin_cos();
        let (sin_dec, cos_dec) = dec.sin_cos();
        let (sin_h, cos_h) = hour_angle.sin_cos();

        let sin_alt = (sin_lat * sin_dec + cos_lat * cos_dec * cos_h).clamp(-1.0, 1.0);
        let altitude = sin_alt.asin();

        let azimuth = (-cos_dec * sin_h)
            .atan2(sin_dec * cos_lat - cos_dec * sin_lat * cos_h)
            .rem_euclid(std::f64::consts::TAU);

        AltAz::new(altitude / RADEG, azimuth / RADEG)
    }
}
