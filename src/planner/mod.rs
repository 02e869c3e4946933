//! # Observation planning
//!
//! One run of the planner goes through four pure phases:
//!
//! 1. [`observation`] – current altitude/azimuth and sampled time-to-set of every body
//!    (the only phase that calls the [`HorizontalTransform`]),
//! 2. [`start`] – choice of the first body,
//! 3. [`graph`] – distance graph over the bodies' current positions,
//! 4. [`tour`] – greedy nearest-neighbour visit order from the first body.
//!
//! [`ObservationPlanner`] chains them and returns an immutable [`ObservationPlan`].
//!
//! ## Example
//!
//! ```rust,no_run
//! use celestsp::bodies::{BodyCatalog, CelestialBody};
//! use celestsp::observers::{ObservationContext, ObserverSite};
//! use celestsp::planner::{start::StartStrategy, ObservationPlanner, PlannerParams};
//! use celestsp::transform::MeanHorizontal;
//! use hifitime::Epoch;
//!
//! let catalog = BodyCatalog::new(vec![
//!     CelestialBody::new("Vega", 279.234735, 38.783689)?,
//!     CelestialBody::new("Deneb", 310.357980, 45.280339)?,
//!     CelestialBody::new("Altair", 297.695827, 8.868321)?,
//! ])?;
//! let context = ObservationContext::new(
//!     ObserverSite::new(35.68, 139.69, 40.0)?,
//!     Epoch::from_gregorian_utc_hms(2024, 8, 1, 12, 0, 0),
//! );
//!
//! let planner = ObservationPlanner::new(MeanHorizontal, PlannerParams::default());
//! let plan = planner.plan(&catalog, &context, &StartStrategy::SoonestSetting)?;
//! for body in plan.bodies_in_tour_order() {
//!     println!("{}", body.name());
//! }
//! # Ok::<(), celestsp::celestsp_errors::CelestspError>(())
//! ```
pub mod graph;
pub mod horizon;
pub mod observation;
pub mod start;
pub mod tour;

use std::fmt;

use tracing::info;

use crate::bodies::{BodyCatalog, CelestialBody};
use crate::celestsp_errors::CelestspError;
use crate::constants::{Hour, HORIZON_SAMPLES, HORIZON_WINDOW_HOURS};
use crate::observers::ObservationContext;
use crate::transform::HorizontalTransform;

use self::graph::DistanceGraph;
use self::observation::{observe_catalog, ObservationState};
use self::start::{select_start, StartSelection, StartStrategy};
use self::tour::{plan_tour, Tour};

/// Sampling grid of the horizon-crossing estimator.
///
/// Fields
/// -----------------
/// * `samples`: Number of instants, both window ends included (≥ 2).
/// * `window_hours`: Look-ahead window after the observation instant (> 0).
///
/// The defaults (1000 samples over 24 h) are the production values; tests shrink the
/// grid through [`PlannerParams::builder`].
///
/// The fields are public, so a struct literal bypasses validation: only
/// [`PlannerParamsBuilder::build`] checks the bounds above.
#[derive(Debug, Clone, PartialEq)]
pub struct PlannerParams {
    pub samples: usize,
    pub window_hours: Hour,
}

impl PlannerParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a validating builder from the defaults.
    ///
    /// ```rust
    /// use celestsp::planner::PlannerParams;
    ///
    /// let params = PlannerParams::builder()
    ///     .samples(241)
    ///     .window_hours(12.0)
    ///     .build()
    ///     .unwrap();
    /// assert_eq!(params.samples, 241);
    /// ```
    pub fn builder() -> PlannerParamsBuilder {
        PlannerParamsBuilder::new()
    }

    /// Hours between two consecutive samples.
    pub fn step_hours(&self) -> Hour {
        self.window_hours / (self.samples.max(2) - 1) as f64
    }
}

impl Default for PlannerParams {
    fn default() -> Self {
        PlannerParams {
            samples: HORIZON_SAMPLES,
            window_hours: HORIZON_WINDOW_HOURS,
        }
    }
}

impl fmt::Display for PlannerParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} samples over {} h (step {:.4} h)",
            self.samples,
            self.window_hours,
            self.step_hours()
        )
    }
}

/// Builder for [`PlannerParams`], with validation.
#[derive(Debug, Clone)]
pub struct PlannerParamsBuilder {
    params: PlannerParams,
}

impl Default for PlannerParamsBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl PlannerParamsBuilder {
    pub fn new() -> Self {
        Self {
            params: PlannerParams::default(),
        }
    }

    pub fn samples(mut self, v: usize) -> Self {
        self.params.samples = v;
        self
    }

    pub fn window_hours(mut self, v: Hour) -> Self {
        self.params.window_hours = v;
        self
    }

    /// Validate and return the parameters.
    ///
    /// Errors
    /// ----------
    /// * [`CelestspError::InvalidPlannerParameter`] if `samples < 2`, or if
    ///   `window_hours` is not finite and strictly positive.
    pub fn build(self) -> Result<PlannerParams, CelestspError> {
        let p = &self.params;

        if p.samples < 2 {
            return Err(CelestspError::InvalidPlannerParameter(
                "samples must be >= 2".into(),
            ));
        }
        if !(p.window_hours.is_finite() && p.window_hours > 0.0) {
            return Err(CelestspError::InvalidPlannerParameter(
                "window_hours must be finite and > 0".into(),
            ));
        }

        Ok(self.params)
    }
}

/// Immutable outcome of one planning run.
#[derive(Debug, Clone, PartialEq)]
pub struct ObservationPlan {
    catalog: BodyCatalog,
    states: Vec<ObservationState>,
    selection: StartSelection,
    tour: Tour,
}

impl ObservationPlan {
    pub fn catalog(&self) -> &BodyCatalog {
        &self.catalog
    }

    /// Observation states, aligned with the catalog.
    pub fn states(&self) -> &[ObservationState] {
        &self.states
    }

    pub fn selection(&self) -> &StartSelection {
        &self.selection
    }

    pub fn tour(&self) -> &Tour {
        &self.tour
    }

    pub fn start_body(&self) -> Option<&CelestialBody> {
        self.catalog.get(self.selection.index)
    }

    /// `(body, state)` pairs in visit order.
    pub fn visits(&self) -> impl Iterator<Item = (&CelestialBody, &ObservationState)> + '_ {
        self.tour
            .iter()
            .filter_map(|&i| Some((self.catalog.get(i)?, self.states.get(i)?)))
    }

    pub fn bodies_in_tour_order(&self) -> impl Iterator<Item = &CelestialBody> + '_ {
        self.visits().map(|(body, _)| body)
    }

    /// `true` when every body is currently above the horizon.
    pub fn all_observable(&self) -> bool {
        self.states.iter().all(ObservationState::observable)
    }

    /// Number of bodies currently above the horizon.
    pub fn observable_count(&self) -> usize {
        self.states.iter().filter(|s| s.observable()).count()
    }
}

/// Runs the planning pipeline with a given transform and sampling grid.
#[derive(Debug, Clone)]
pub struct ObservationPlanner<T: HorizontalTransform> {
    transform: T,
    params: PlannerParams,
}

impl<T: HorizontalTransform> ObservationPlanner<T> {
    pub fn new(transform: T, params: PlannerParams) -> Self {
        ObservationPlanner { transform, params }
    }

    pub fn params(&self) -> &PlannerParams {
        &self.params
    }

    /// Observation phase only: one state per body, in catalog order.
    pub fn observe(
        &self,
        catalog: &BodyCatalog,
        context: &ObservationContext,
    ) -> Vec<ObservationState> {
        observe_catalog(&self.transform, catalog, context, &self.params)
    }

    /// Run the full pipeline: observe, select the start, build the graph, plan the tour.
    ///
    /// Arguments
    /// -----------------
    /// * `catalog`: Bodies to visit.
    /// * `context`: Observer site and instant.
    /// * `strategy`: How the first body is chosen.
    ///
    /// Return
    /// ----------
    /// * The [`ObservationPlan`] of the run.
    ///
    /// Errors
    /// ----------
    /// * [`CelestspError::NotFound`] or [`CelestspError::NoStartFound`] from the start
    ///   selection.
    /// * [`CelestspError::InvalidInput`] from the graph or the tour.
    pub fn plan(
        &self,
        catalog: &BodyCatalog,
        context: &ObservationContext,
        strategy: &StartStrategy,
    ) -> Result<ObservationPlan, CelestspError> {
        let states = self.observe(catalog, context);
        plan_observed(catalog, states, strategy)
    }
}

/// Plan from already computed observation states.
///
/// Errors
/// ----------
/// * See [`ObservationPlanner::plan`].
pub fn plan_observed(
    catalog: &BodyCatalog,
    states: Vec<ObservationState>,
    strategy: &StartStrategy,
) -> Result<ObservationPlan, CelestspError> {
    let selection = select_start(&states, catalog, strategy)?;
    let graph = DistanceGraph::build(&states)?;
    let tour = plan_tour(&graph, selection.index)?;

    info!(
        bodies = catalog.len(),
        start = selection.index,
        length = tour.length(&graph),
        "Planned observation tour {tour}"
    );

    Ok(ObservationPlan {
        catalog: catalog.clone(),
        states,
        selection,
        tour,
    })
}
