//! Start selection: which body opens the tour.
//!
//! Selection runs on the completed, input-ordered vector of [`ObservationState`]s,
//! so the order in which states were computed can never change the outcome. Every
//! strategy scans in catalog order and replaces its candidate only on a **strictly**
//! better score, which makes the earliest body win ties.
use std::fmt;

use tracing::info;

use crate::bodies::BodyCatalog;
use crate::celestsp_errors::CelestspError;
use crate::constants::{Degree, Hour, WEST_POINT};
use crate::planner::observation::ObservationState;

/// How the first body of the tour is chosen.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum StartStrategy {
    /// Body with the smallest finite time-to-set.
    #[default]
    SoonestSetting,
    /// Body closest to (altitude 0°, azimuth 270°) in the altitude/azimuth plane.
    Westernmost,
    /// Body with exactly this name, whatever the others' time-to-set.
    Override(String),
}

/// Why a body was selected.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StartReason {
    SoonestSetting { time_to_set: Hour },
    Westernmost { distance: Degree },
    Override,
}

/// Outcome of the start selection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StartSelection {
    /// Catalog index of the first body.
    pub index: usize,
    pub reason: StartReason,
}

impl fmt::Display for StartReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StartReason::SoonestSetting { time_to_set } => {
                write!(f, "sets first, in {time_to_set:.2} h")
            }
            StartReason::Westernmost { distance } => {
                write!(f, "closest to the west point ({distance:.2} deg)")
            }
            StartReason::Override => f.write_str("requested start"),
        }
    }
}

/// Strict-minimum scan: keeps the first index on ties, skips `None` scores.
///
/// NaN scores rank as `+∞`.
fn first_strict_minimum<I>(scores: I) -> Option<(usize, f64)>
where
    I: IntoIterator<Item = Option<f64>>,
{
    let mut best: Option<(usize, f64)> = None;
    for (i, score) in scores.into_iter().enumerate() {
        let Some(score) = score else { continue };
        let score = if score.is_nan() { f64::INFINITY } else { score };
        match best {
            Some((_, best_score)) if !(score < best_score) => {}
            _ => best = Some((i, score)),
        }
    }
    best
}

/// Choose the first body of the tour.
///
/// Arguments
/// -----------------
/// * `states`: Observation states aligned with `catalog`.
/// * `catalog`: The run's bodies.
/// * `strategy`: Selection rule.
///
/// Return
/// ----------
/// * The selected catalog index and the reason it was picked.
///
/// Errors
/// ----------
/// * [`CelestspError::InvalidInput`] if `states` is not aligned with `catalog`.
/// * [`CelestspError::NotFound`] if the override name matches no body.
/// * [`CelestspError::NoStartFound`] if no body has a finite time-to-set under
///   [`StartStrategy::SoonestSetting`].
pub fn select_start(
    states: &[ObservationState],
    catalog: &BodyCatalog,
    strategy: &StartStrategy,
) -> Result<StartSelection, CelestspError> {
    if states.len() != catalog.len() {
        return Err(CelestspError::InvalidInput(format!(
            "{} observation states for {} bodies",
            states.len(),
            catalog.len()
        )));
    }

    let selection = match strategy {
        StartStrategy::Override(name) => {
            let index = catalog
                .index_of(name)
                .ok_or_else(|| CelestspError::NotFound(name.clone()))?;
            StartSelection {
                index,
                reason: StartReason::Override,
            }
        }
        StartStrategy::SoonestSetting => {
            let (index, time_to_set) =
                first_strict_minimum(states.iter().map(|s| s.time_to_set().hours()))
                    .ok_or(CelestspError::NoStartFound)?;
            StartSelection {
                index,
                reason: StartReason::SoonestSetting { time_to_set },
            }
        }
        StartStrategy::Westernmost => {
            let (west_alt, west_az) = WEST_POINT;
            let (index, distance) = first_strict_minimum(states.iter().map(|s| {
                Some((s.altitude() - west_alt).hypot(s.azimuth() - west_az))
            }))
            .ok_or(CelestspError::NoStartFound)?;
            StartSelection {
                index,
                reason: StartReason::Westernmost { distance },
            }
        }
    };

    if let Some(body) = catalog.get(selection.index) {
        info!(start = body.name(), reason = %selection.reason, "Selected first body");
    }
    Ok(selection)
}
