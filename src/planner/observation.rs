//! Per-body observation state and the observation phase of a run.
//!
//! The observation phase is the only step of the pipeline that calls the coordinate
//! transform. It maps every body of the catalog, in input order, to an immutable
//! [`ObservationState`]; every later step (start selection, distance graph, tour,
//! report) reads these values and never recomputes them.
use std::fmt;

use tracing::debug;

use crate::bodies::BodyCatalog;
use crate::constants::{Degree, Hour};
use crate::observers::ObservationContext;
use crate::planner::horizon::estimate_time_to_set;
use crate::planner::PlannerParams;
use crate::transform::{AltAz, HorizontalTransform};

/// Time left before a body crosses below the horizon.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TimeToSet {
    /// A crossing was sampled this many hours after the observation instant.
    Hours(Hour),
    /// Already below the horizon, or no crossing inside the look-ahead window.
    Infinite,
}

impl TimeToSet {
    /// Finite value in hours, if any.
    pub fn hours(&self) -> Option<Hour> {
        match self {
            TimeToSet::Hours(h) => Some(*h),
            TimeToSet::Infinite => None,
        }
    }

    pub fn is_finite(&self) -> bool {
        matches!(self, TimeToSet::Hours(_))
    }
}

impl fmt::Display for TimeToSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimeToSet::Hours(h) => match f.precision() {
                Some(p) => write!(f, "{h:.p$}"),
                None => write!(f, "{h}"),
            },
            TimeToSet::Infinite => f.write_str("inf"),
        }
    }
}

/// Current sky state of one body.
///
/// Invariants
/// -----------------
/// * `observable() == (altitude() > 0)`.
/// * `time_to_set()` is finite only when the body is observable.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObservationState {
    altaz: AltAz,
    time_to_set: TimeToSet,
}

impl ObservationState {
    /// Build a state from the current position and the estimated time-to-set.
    ///
    /// A finite time-to-set given for a body at or below the horizon is discarded: a
    /// body that is already down is never "about to set".
    pub fn new(altaz: AltAz, time_to_set: TimeToSet) -> Self {
        let time_to_set = if altaz.is_above(0.0) {
            time_to_set
        } else {
            TimeToSet::Infinite
        };
        ObservationState { altaz, time_to_set }
    }

    pub fn altaz(&self) -> AltAz {
        self.altaz
    }

    pub fn altitude(&self) -> Degree {
        self.altaz.altitude
    }

    pub fn azimuth(&self) -> Degree {
        self.altaz.azimuth
    }

    /// `true` when the body is strictly above the horizon.
    pub fn observable(&self) -> bool {
        self.altaz.is_above(0.0)
    }

    pub fn time_to_set(&self) -> TimeToSet {
        self.time_to_set
    }
}

/// Compute the [`ObservationState`] of every body of `catalog`, in catalog order.
///
/// Each body is independent; the result depends only on the inputs.
pub fn observe_catalog<T>(
    transform: &T,
    catalog: &BodyCatalog,
    context: &ObservationContext,
    params: &PlannerParams,
) -> Vec<ObservationState>
where
    T: HorizontalTransform + ?Sized,
{
    catalog
        .iter()
        .map(|body| {
            let state = estimate_time_to_set(transform, body, context, params);
            debug!(
                name = body.name(),
                altitude = state.altitude(),
                azimuth = state.azimuth(),
                observable = state.observable(),
                time_to_set = %state.time_to_set(),
                "Observed body"
            );
            state
        })
        .collect()
}
