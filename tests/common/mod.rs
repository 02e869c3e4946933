#![allow(dead_code)]

use std::collections::HashMap;

use celestsp::bodies::{BodyCatalog, CelestialBody};
use celestsp::observers::{ObservationContext, ObserverSite};
use celestsp::time::hours_between;
use celestsp::transform::{AltAz, HorizontalTransform};
use hifitime::{Epoch, TimeScale};

/// Observation instant shared by the integration tests (2024-01-01 12:00 UTC).
pub fn reference_epoch() -> Epoch {
    Epoch::from_mjd_in_time_scale(60310.5, TimeScale::UTC)
}

pub fn tokyo_context() -> ObservationContext {
    ObservationContext::new(
        ObserverSite::new(35.68, 139.69, 40.0).unwrap(),
        reference_epoch(),
    )
}

/// Transform replaying straight altitude tracks `alt0 + rate · hours` at fixed azimuth.
pub struct LinearSky {
    t0: Epoch,
    tracks: HashMap<String, (f64, f64, f64)>,
}

impl LinearSky {
    pub fn new(t0: Epoch) -> Self {
        LinearSky {
            t0,
            tracks: HashMap::new(),
        }
    }

    pub fn track(mut self, name: &str, alt0: f64, rate: f64, azimuth: f64) -> Self {
        self.tracks.insert(name.to_string(), (alt0, rate, azimuth));
        self
    }

    /// Catalog of the scripted bodies, in the given order.
    pub fn catalog(&self, names: &[&str]) -> BodyCatalog {
        BodyCatalog::new(
            names
                .iter()
                .map(|name| CelestialBody::new(*name, 0.0, 0.0).unwrap())
                .collect(),
        )
        .unwrap()
    }
}

impl HorizontalTransform for LinearSky {
    fn horizontal(&self, body: &CelestialBody, _site: &ObserverSite, epoch: &Epoch) -> AltAz {
        let (alt0, rate, azimuth) = self.tracks[body.name()];
        AltAz::new(alt0 + rate * hours_between(&self.t0, epoch), azimuth)
    }
}

/// Bright stars with J2000 coordinates, in degrees.
pub fn bright_stars() -> Vec<CelestialBody> {
    [
        ("Sirius", 101.287155, -16.716116),
        ("Betelgeuse", 88.792939, 7.407064),
        ("Rigel", 78.634467, -8.201638),
        ("Capella", 79.172328, 45.997991),
        ("Aldebaran", 68.980163, 16.509302),
        ("Procyon", 114.825498, 5.224988),
        ("Pollux", 116.328958, 28.026199),
        ("Vega", 279.234735, 38.783689),
        ("Deneb", 310.357980, 45.280339),
        ("Altair", 297.695827, 8.868321),
        ("Polaris", 37.954561, 89.264109),
        ("Arcturus", 213.915300, 19.182410),
    ]
    .into_iter()
    .map(|(name, ra, dec)| CelestialBody::new(name, ra, dec).unwrap())
    .collect()
}
