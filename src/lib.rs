pub mod bodies;
pub mod celestsp_errors;
pub mod constants;
pub mod earth_orientation;
pub mod env_state;
pub mod observers;
pub mod planner;
pub mod report;
pub mod time;
pub mod transform;

#[cfg(test)]
pub(crate) mod unit_test_global {
    use std::collections::HashMap;

    use hifitime::Epoch;

    use crate::{
        bodies::CelestialBody,
        constants::{Degree, Hour},
        observers::ObserverSite,
        time::hours_between,
        transform::{AltAz, HorizontalTransform},
    };

    /// Altitude varying linearly with time, at a fixed azimuth.
    #[derive(Debug, Clone, Copy)]
    pub(crate) struct Track {
        pub(crate) altitude: Degree,
        pub(crate) rate: Degree,
        pub(crate) azimuth: Degree,
    }

    impl Track {
        /// `altitude(t) = altitude + rate · hours since t0`.
        pub(crate) fn linear(altitude: Degree, rate: Degree, azimuth: Degree) -> Self {
            Track {
                altitude,
                rate,
                azimuth,
            }
        }

        fn at(&self, hours: Hour) -> AltAz {
            AltAz::new(self.altitude + self.rate * hours, self.azimuth)
        }
    }

    /// Transform replaying scripted tracks, keyed by body name.
    ///
    /// Unknown bodies sit at the nadir.
    #[derive(Debug, Clone)]
    pub(crate) struct ScriptedSky {
        t0: Epoch,
        tracks: HashMap<String, Track>,
    }

    impl ScriptedSky {
        pub(crate) fn new(t0: Epoch) -> Self {
            ScriptedSky {
                t0,
                tracks: HashMap::new(),
            }
        }

        pub(crate) fn with(mut self, name: &str, track: Track) -> Self {
            self.tracks.insert(name.to_string(), track);
            self
        }

        /// A body carrying `name`; its coordinates are irrelevant to this sky.
        pub(crate) fn body(&self, name: &str) -> CelestialBody {
            CelestialBody::new(name, 0.0, 0.0).unwrap()
        }
    }

    impl HorizontalTransform for ScriptedSky {
        fn horizontal(&self, body: &CelestialBody, _site: &ObserverSite, epoch: &Epoch) -> AltAz {
            match self.tracks.get(body.name()) {
                Some(track) => track.at(hours_between(&self.t0, epoch)),
                None => AltAz::new(-90.0, 0.0),
            }
        }
    }
}
