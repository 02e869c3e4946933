//! # celestsp environment state
//!
//! This module defines [`crate::env_state::CelestspEnv`], the **shared environment object** used
//! whenever the crate talks to the network. It provides:
//!
//! - A persistent **HTTP client** ([`ureq::Agent`]) with a 10 s global timeout.
//! - Simple GET helpers returning the body as a string.
//! - The **IP geolocation** lookup used to default the observer's latitude/longitude.
//!
//! ## Structure
//!
//! ```text
//! CelestspEnv
//! └── http_client  (ureq::Agent)
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use celestsp::env_state::CelestspEnv;
//!
//! let env = CelestspEnv::new();
//! if let Some((lat, lon)) = env.locate_by_ip() {
//!     println!("Observer near {lat}, {lon}");
//! }
//! ```
//!
//! ## Notes
//!
//! - The object is cheap to clone; the agent shares its connection pool between clones.
//! - The planner core never touches this module: it only receives coordinates.
use std::convert::TryFrom;
use std::time::Duration;

use serde::Deserialize;
use tracing::{debug, warn};
use ureq::{
    http::{self, Uri},
    Agent,
};

use crate::celestsp_errors::CelestspError;
use crate::constants::Degree;

/// Endpoint of the IP geolocation service.
pub const IP_API_URL: &str = "http://ip-api.com/json/";

/// Shared HTTP environment.
///
/// # Fields
///
/// * `http_client` - A ureq agent used to make HTTP requests
#[derive(Debug, Clone)]
pub struct CelestspEnv {
    pub http_client: Agent,
}

impl Default for CelestspEnv {
    fn default() -> Self {
        Self::new()
    }
}

/// Subset of the ip-api.com JSON answer used by the crate.
#[derive(Debug, Deserialize)]
struct IpApiResponse {
    status: String,
    lat: Option<f64>,
    lon: Option<f64>,
}

impl CelestspEnv {
    /// Create a new environment with a 10 s global request timeout.
    pub fn new() -> Self {
        let config = Agent::config_builder()
            .timeout_global(Some(Duration::from_secs(10)))
            .build();
        let agent: Agent = config.into();

        CelestspEnv { http_client: agent }
    }

    /// Perform a GET request and return the response body.
    ///
    /// Errors
    /// ----------
    /// * [`CelestspError::UreqHttpError`] on transport failure, non-2xx status or an
    ///   unreadable body.
    pub fn get_from_url<U>(&self, url: U) -> Result<String, CelestspError>
    where
        Uri: TryFrom<U>,
        <Uri as TryFrom<U>>::Error: Into<http::Error>,
    {
        let body = self
            .http_client
            .get(url)
            .call()?
            .body_mut()
            .read_to_string()?;
        Ok(body)
    }

    /// Approximate the observer position from the public IP address.
    ///
    /// Return
    /// ----------
    /// * `Some((latitude, longitude))` in degrees when the service answers with
    ///   `"status": "success"`, `None` otherwise. Failures are logged, never raised.
    pub fn locate_by_ip(&self) -> Option<(Degree, Degree)> {
        let body = match self.get_from_url(IP_API_URL) {
            Ok(body) => body,
            Err(err) => {
                warn!("Unable to get location data: {err}");
                return None;
            }
        };

        match parse_ip_api_response(&body) {
            Ok(Some(location)) => {
                debug!(lat = location.0, lon = location.1, "Location from IP");
                Some(location)
            }
            Ok(None) => {
                warn!("Unable to get location data: service did not report success");
                None
            }
            Err(err) => {
                warn!("Unable to get location data: {err}");
                None
            }
        }
    }
}

/// Decode an ip-api.com answer into `(latitude, longitude)`.
///
/// Return
/// ----------
/// * `Ok(Some(..))` for a successful lookup carrying both coordinates,
///   `Ok(None)` for any other well-formed answer.
///
/// Errors
/// ----------
/// * [`CelestspError::JsonError`] if `body` is not valid JSON for this schema.
pub fn parse_ip_api_response(body: &str) -> Result<Option<(Degree, Degree)>, CelestspError> {
    let response: IpApiResponse = serde_json::from_str(body)?;
    if response.status != "success" {
        return Ok(None);
    }
    Ok(response.lat.zip(response.lon))
}
