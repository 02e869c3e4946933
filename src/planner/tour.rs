//! Greedy nearest-neighbour tour.
//!
//! Starting from a given node, the tour repeatedly moves to the closest node not yet
//! visited until every node has been visited once. Ties go to the **lowest index**.
//! The tour is a heuristic: it is neither optimal nor a closed cycle (no return to
//! the start).
use std::fmt;

use crate::celestsp_errors::CelestspError;
use crate::planner::graph::DistanceGraph;

/// Visit order over catalog indices.
///
/// Invariants
/// -----------------
/// * A permutation of `0..n`.
/// * The first element is the requested start node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tour(Vec<usize>);

impl Tour {
    pub fn order(&self) -> &[usize] {
        &self.0
    }

    pub fn start(&self) -> usize {
        self.0[0]
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always `false`: a tour visits at least its start node.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, usize> {
        self.0.iter()
    }

    /// Sum of the edge weights along the tour, in graph units.
    pub fn length(&self, graph: &DistanceGraph) -> f64 {
        self.0
            .windows(2)
            .filter_map(|pair| graph.weight(pair[0], pair[1]))
            .sum()
    }
}

impl fmt::Display for Tour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let order: Vec<String> = self.0.iter().map(ToString::to_string).collect();
        write!(f, "[{}]", order.join(" -> "))
    }
}

impl<'a> IntoIterator for &'a Tour {
    type Item = &'a usize;
    type IntoIter = std::slice::Iter<'a, usize>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Plan a greedy nearest-neighbour tour over `graph` from `start`.
///
/// At each step the unvisited node with the **strictly** smallest edge weight from the
/// current node is chosen, scanning indices in increasing order, so the lowest index
/// wins ties. A NaN weight counts as `+∞`. Unvisited nodes are always reachable: if every
/// remaining edge is infinite (or NaN) the lowest remaining index is taken.
///
/// Arguments
/// -----------------
/// * `graph`: Complete weighted graph over the catalog.
/// * `start`: First node of the tour.
///
/// Return
/// ----------
/// * A [`Tour`] of length `graph.node_count()` beginning with `start`.
///
/// Errors
/// ----------
/// * [`CelestspError::InvalidInput`] if the graph has no node or `start` is out of range.
pub fn plan_tour(graph: &DistanceGraph, start: usize) -> Result<Tour, CelestspError> {
    let n = graph.node_count();
    if n == 0 {
        return Err(CelestspError::InvalidInput(
            "cannot plan a tour over an empty graph".into(),
        ));
    }
    if start >= n {
        return Err(CelestspError::InvalidInput(format!(
            "start node {start} out of range for {n} bodies"
        )));
    }

    let mut visited = vec![false; n];
    let mut order = Vec::with_capacity(n);
    visited[start] = true;
    order.push(start);

    let mut current = start;
    while order.len() < n {
        let mut next: Option<(usize, f64)> = None;
        for candidate in (0..n).filter(|&j| !visited[j]) {
            let w = graph
                .weight(current, candidate)
                .filter(|w| !w.is_nan())
                .unwrap_or(f64::INFINITY);
            match next {
                Some((_, best)) if !(w < best) => {}
                _ => next = Some((candidate, w)),
            }
        }

        let Some((node, _)) = next else { break };
        visited[node] = true;
        order.push(node);
        current = node;
    }

    Ok(Tour(order))
}

#[cfg(test)]
mod tour_test {
    use super::*;
    use crate::planner::observation::{ObservationState, TimeToSet};
    use crate::transform::AltAz;

    fn example_graph() -> DistanceGraph {
        DistanceGraph::from_edges(3, &[(0, 1, 1.0), (0, 2, 5.0), (1, 2, 2.0)]).unwrap()
    }

    #[test]
    fn test_nearest_neighbour_order() {
        let graph = example_graph();
        let tour = plan_tour(&graph, 0).unwrap();
        assert_eq!(tour.order(), &[0, 1, 2]);
        assert_eq!(tour.length(&graph), 3.0);

        assert_eq!(plan_tour(&graph, 2).unwrap().order(), &[2, 1, 0]);
    }

    #[test]
    fn test_ties_go_to_lowest_index() {
        let graph = DistanceGraph::from_edges(
            4,
            &[
                (0, 1, 3.0),
                (0, 2, 2.0),
                (0, 3, 2.0),
                (1, 2, 4.0),
                (1, 3, 4.0),
                (2, 3, 1.0),
            ],
        )
        .unwrap();
        assert_eq!(plan_tour(&graph, 0).unwrap().order(), &[0, 2, 3, 1]);

        let graph = DistanceGraph::from_edges(3, &[(0, 1, 1.0), (0, 2, 1.0), (1, 2, 1.0)]).unwrap();
        assert_eq!(plan_tour(&graph, 2).unwrap().order(), &[2, 0, 1]);
    }

    #[test]
    fn test_single_node() {
        let graph = DistanceGraph::from_edges(1, &[]).unwrap();
        let tour = plan_tour(&graph, 0).unwrap();
        assert_eq!(tour.order(), &[0]);
        // No edge in the tour: the `order.len() < n` loop never runs, so no weight is read
        assert!(tour.order().windows(2).next().is_none());
        assert_eq!(tour.length(&graph), 0.0);
    }

    #[test]
    fn test_nan_weight_is_not_nearest() {
        let graph =
            DistanceGraph::from_edges(3, &[(0, 1, f64::NAN), (0, 2, 1.0), (1, 2, 1.0)]).unwrap();
        assert_eq!(plan_tour(&graph, 0).unwrap().order(), &[0, 2, 1]);

        // Only NaN and infinite edges left: lowest index first
        let graph = DistanceGraph::from_edges(4, &[(0, 2, f64::NAN), (0, 3, f64::NAN)]).unwrap();
        assert_eq!(plan_tour(&graph, 0).unwrap().order(), &[0, 1, 2, 3]);
    }

    #[test]
    fn test_nan_position_goes_last() {
        let states = [
            ObservationState::new(AltAz::new(10.0, 100.0), TimeToSet::Infinite),
            ObservationState::new(AltAz::new(f64::NAN, 120.0), TimeToSet::Infinite),
            ObservationState::new(AltAz::new(12.0, 140.0), TimeToSet::Infinite),
        ];
        let graph = DistanceGraph::build(&states).unwrap();
        assert_eq!(plan_tour(&graph, 0).unwrap().order(), &[0, 2, 1]);
    }

    #[test]
    fn test_invalid_start() {
        let graph = example_graph();
        assert!(matches!(
            plan_tour(&graph, 3),
            Err(CelestspError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_missing_edges_still_visit_everything() {
        let graph = DistanceGraph::from_edges(4, &[(0, 3, 1.0)]).unwrap();
        assert_eq!(plan_tour(&graph, 0).unwrap().order(), &[0, 3, 1, 2]);
    }

    #[test]
    fn test_tour_is_a_permutation() {
        let states: Vec<ObservationState> = (0..25)
            .map(|i| {
                let x = i as f64;
                ObservationState::new(
                    AltAz::new((x * 37.0) % 80.0 - 10.0, (x * 113.0) % 360.0),
                    TimeToSet::Infinite,
                )
            })
            .collect();
        let graph = DistanceGraph::build(&states).unwrap();

        for start in [0, 7, 24] {
            let tour = plan_tour(&graph, start).unwrap();
            assert_eq!(tour.start(), start);
            let mut sorted = tour.order().to_vec();
            sorted.sort_unstable();
            assert_eq!(sorted, (0..25).collect::<Vec<_>>());
        }
    }

    #[test]
    fn test_display() {
        let tour = plan_tour(&example_graph(), 0).unwrap();
        assert_eq!(tour.to_string(), "[0 -> 1 -> 2]");
    }
}
