//! Horizon-crossing estimator.
//!
//! For a body above the horizon, the time left before it sets is found by **sampling**
//! its future altitude on a fixed grid, not by root finding:
//!
//! ```text
//! t_k = now + k · window / (samples − 1),   k = 0 … samples − 1
//! ```
//!
//! The first sample with altitude ≤ 0 gives the reported time-to-set, i.e. the elapsed
//! hours from `now` to `t_k`. The answer is therefore late by at most one grid step
//! (`24 h / 999 ≈ 86.5 s` with the defaults) and is never interpolated. The start
//! selector compares these sampled values directly, so switching to interpolation
//! would change which body starts the tour.
use hifitime::Epoch;

use crate::bodies::CelestialBody;
use crate::observers::ObservationContext;
use crate::planner::observation::{ObservationState, TimeToSet};
use crate::planner::PlannerParams;
use crate::time::{hours_between, offset_by_hours, sample_offsets};
use crate::transform::HorizontalTransform;

/// Estimate the current sky state and time-to-set of one body.
///
/// Arguments
/// -----------------
/// * `transform`: Equatorial → horizontal transform.
/// * `body`: Body to estimate.
/// * `context`: Observer site and instant (`now`).
/// * `params`: Sampling grid (`samples`, `window_hours`).
///
/// Return
/// ----------
/// * The body's [`ObservationState`]:
///   - altitude ≤ 0 now → not observable, [`TimeToSet::Infinite`], no sampling done;
///   - a sample at or below the horizon → [`TimeToSet::Hours`] of the first one;
///   - otherwise → [`TimeToSet::Infinite`].
pub fn estimate_time_to_set<T>(
    transform: &T,
    body: &CelestialBody,
    context: &ObservationContext,
    params: &PlannerParams,
) -> ObservationState
where
    T: HorizontalTransform + ?Sized,
{
    let now = transform.horizontal(body, &context.site, &context.epoch);
    if !now.is_above(0.0) {
        return ObservationState::new(now, TimeToSet::Infinite);
    }

    let epochs: Vec<Epoch> = sample_offsets(params.samples, params.window_hours)
        .map(|hours| offset_by_hours(&context.epoch, hours))
        .collect();
    let future = transform.horizontal_batch(body, &context.site, &epochs);

    let time_to_set = future
        .iter()
        .zip(&epochs)
        .find(|(altaz, _)| altaz.altitude <= 0.0)
        .map_or(TimeToSet::Infinite, |(_, epoch)| {
            TimeToSet::Hours(hours_between(&context.epoch, epoch))
        });

    ObservationState::new(now, time_to_set)
}
