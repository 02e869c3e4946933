mod common;

use approx::assert_abs_diff_eq;
use celestsp::celestsp_errors::CelestspError;
use celestsp::planner::graph::DistanceGraph;
use celestsp::planner::observation::TimeToSet;
use celestsp::planner::start::{select_start, StartReason, StartStrategy};
use celestsp::planner::tour::plan_tour;
use celestsp::planner::{plan_observed, ObservationPlanner, PlannerParams};
use common::{reference_epoch, tokyo_context, LinearSky};

fn evening_sky() -> LinearSky {
    LinearSky::new(reference_epoch())
        .track("M31", 50.0, -4.0, 300.0)
        .track("M42", 12.0, -3.0, 240.0)
        .track("M45", 35.0, -2.0, 270.0)
        .track("M13", -10.0, 5.0, 60.0)
        .track("M57", 30.0, -6.0, 280.0)
}

const NAMES: [&str; 5] = ["M31", "M42", "M45", "M13", "M57"];

#[test]
fn test_soonest_setting_body_opens_the_tour() {
    let sky = evening_sky();
    let catalog = sky.catalog(&NAMES);
    let planner = ObservationPlanner::new(&sky, PlannerParams::default());
    let plan = planner
        .plan(&catalog, &tokyo_context(), &StartStrategy::SoonestSetting)
        .unwrap();

    // M42 sets after 4 h, M57 after 5 h, M31 after 12.5 h, M45 after 17.5 h
    assert_eq!(plan.start_body().unwrap().name(), "M42");
    let StartReason::SoonestSetting { time_to_set } = plan.selection().reason else {
        panic!("unexpected reason {:?}", plan.selection().reason);
    };
    let step = plan_step();
    assert!(time_to_set >= 4.0 && time_to_set < 4.0 + step);

    // From M42 (12, 240): M45 (35, 270), then M57 (30, 280), M31 (50, 300), M13 (-10, 60)
    let names: Vec<&str> = plan.bodies_in_tour_order().map(|b| b.name()).collect();
    assert_eq!(names, ["M42", "M45", "M57", "M31", "M13"]);
    assert!(!plan.all_observable());
    assert_eq!(plan.states()[3].time_to_set(), TimeToSet::Infinite);
}

fn plan_step() -> f64 {
    PlannerParams::default().step_hours()
}

#[test]
fn test_override_takes_precedence() {
    let sky = evening_sky();
    let catalog = sky.catalog(&NAMES);
    let planner = ObservationPlanner::new(&sky, PlannerParams::default());

    for (i, name) in NAMES.iter().enumerate() {
        let plan = planner
            .plan(&catalog, &tokyo_context(), &StartStrategy::Override(name.to_string()))
            .unwrap();
        assert_eq!(plan.tour().start(), i);
        assert_eq!(plan.selection().reason, StartReason::Override);
        assert_eq!(plan.tour().len(), NAMES.len());
    }
}

#[test]
fn test_unresolved_override_plans_nothing() {
    let sky = evening_sky();
    let catalog = sky.catalog(&NAMES);
    let planner = ObservationPlanner::new(&sky, PlannerParams::default());
    assert_eq!(
        planner.plan(&catalog, &tokyo_context(), &StartStrategy::Override("M1".into())),
        Err(CelestspError::NotFound("M1".into()))
    );
}

#[test]
fn test_no_candidate_without_override() {
    let sky = LinearSky::new(reference_epoch())
        .track("Down", -20.0, 0.5, 10.0)
        .track("Circumpolar", 40.0, 0.0, 0.0);
    let catalog = sky.catalog(&["Down", "Circumpolar"]);
    let planner = ObservationPlanner::new(&sky, PlannerParams::default());

    assert_eq!(
        planner.plan(&catalog, &tokyo_context(), &StartStrategy::SoonestSetting),
        Err(CelestspError::NoStartFound)
    );

    // The westernmost strategy does not depend on time-to-set:
    // Down (-20, 10) is 260.8 from the west point, Circumpolar (40, 0) is 272.9
    let plan = planner
        .plan(&catalog, &tokyo_context(), &StartStrategy::Westernmost)
        .unwrap();
    assert_eq!(plan.tour().order(), &[0, 1]);
}

#[test]
fn test_single_body() {
    let sky = LinearSky::new(reference_epoch()).track("Solo", 10.0, -1.0, 180.0);
    let catalog = sky.catalog(&["Solo"]);
    let plan = ObservationPlanner::new(&sky, PlannerParams::default())
        .plan(&catalog, &tokyo_context(), &StartStrategy::SoonestSetting)
        .unwrap();
    assert_eq!(plan.tour().order(), &[0]);
}

#[test]
fn test_phases_are_deterministic() {
    let sky = evening_sky();
    let catalog = sky.catalog(&NAMES);
    let planner = ObservationPlanner::new(&sky, PlannerParams::default());

    let first = planner.observe(&catalog, &tokyo_context());
    let second = planner.observe(&catalog, &tokyo_context());
    assert_eq!(first, second);

    let graph_a = DistanceGraph::build(&first).unwrap();
    let graph_b = DistanceGraph::build(&second).unwrap();
    assert_eq!(graph_a, graph_b);

    let start = select_start(&first, &catalog, &StartStrategy::SoonestSetting).unwrap();
    assert_eq!(
        plan_tour(&graph_a, start.index).unwrap(),
        plan_tour(&graph_b, start.index).unwrap()
    );

    assert_eq!(
        plan_observed(&catalog, first, &StartStrategy::SoonestSetting).unwrap(),
        planner
            .plan(&catalog, &tokyo_context(), &StartStrategy::SoonestSetting)
            .unwrap()
    );
}

#[test]
fn test_tour_length_matches_graph() {
    let sky = evening_sky();
    let catalog = sky.catalog(&NAMES);
    let planner = ObservationPlanner::new(&sky, PlannerParams::default());
    let states = planner.observe(&catalog, &tokyo_context());
    let graph = DistanceGraph::build(&states).unwrap();
    let tour = plan_tour(&graph, 1).unwrap();

    let expected: f64 = tour
        .order()
        .windows(2)
        .map(|w| graph.weight(w[0], w[1]).unwrap())
        .sum();
    assert_abs_diff_eq!(tour.length(&graph), expected, epsilon = 1e-12);
}
