//! Distance graph between bodies.
//!
//! A complete, undirected, weighted graph stored as a dense symmetric matrix. Node `i`
//! is the `i`-th body of the catalog; the weight of edge `(i, j)` is the straight-line
//! distance between the two bodies' current positions in the (altitude, azimuth)
//! plane, both in degrees:
//!
//! ```text
//! w(i, j) = sqrt((alt_i − alt_j)² + (az_i − az_j)²)
//! ```
//!
//! This is **not** an angular separation on the sphere, and azimuth is not wrapped:
//! bodies at 359° and 1° are 358 units apart. The tour planner relies on these exact
//! weights, so changing the metric changes the tour.
use itertools::Itertools;
use nalgebra::DMatrix;

use crate::celestsp_errors::CelestspError;
use crate::planner::observation::ObservationState;

#[derive(Debug, Clone, PartialEq)]
pub struct DistanceGraph {
    weights: DMatrix<f64>,
}

impl DistanceGraph {
    /// Build the graph from the catalog's observation states.
    ///
    /// Arguments
    /// -----------------
    /// * `states`: One state per body, in catalog order.
    ///
    /// Return
    /// ----------
    /// * A graph with `states.len()` nodes. The diagonal is zero and `w(i, j) == w(j, i)`.
    ///
    /// Errors
    /// ----------
    /// * [`CelestspError::InvalidInput`] if `states` is empty.
    pub fn build(states: &[ObservationState]) -> Result<Self, CelestspError> {
        let n = states.len();
        if n == 0 {
            return Err(CelestspError::InvalidInput(
                "cannot build a distance graph without bodies".into(),
            ));
        }

        let mut weights = DMatrix::zeros(n, n);
        for ((i, a), (j, b)) in states.iter().enumerate().tuple_combinations() {
            let w = (a.altitude() - b.altitude()).hypot(a.azimuth() - b.azimuth());
            weights[(i, j)] = w;
            weights[(j, i)] = w;
        }

        Ok(DistanceGraph { weights })
    }

    /// Build a graph from explicit undirected edges.
    ///
    /// Pairs not listed get an infinite weight. A pair listed twice keeps the last weight.
    ///
    /// Errors
    /// ----------
    /// * [`CelestspError::InvalidInput`] if `node_count` is zero, or an edge is a self
    ///   loop or references a node outside `0..node_count`.
    pub fn from_edges(node_count: usize, edges: &[(usize, usize, f64)]) -> Result<Self, CelestspError> {
        if node_count == 0 {
            return Err(CelestspError::InvalidInput(
                "cannot build a distance graph without bodies".into(),
            ));
        }

        let mut weights = DMatrix::from_element(node_count, node_count, f64::INFINITY);
        weights.fill_diagonal(0.0);

        for &(i, j, w) in edges {
            if i == j || i >= node_count || j >= node_count {
                return Err(CelestspError::InvalidInput(format!(
                    "invalid edge ({i}, {j}) for a graph of {node_count} nodes"
                )));
            }
            weights[(i, j)] = w;
            weights[(j, i)] = w;
        }

        Ok(DistanceGraph { weights })
    }

    pub fn node_count(&self) -> usize {
        self.weights.nrows()
    }

    /// Weight of edge `(i, j)`, or `None` if either node does not exist.
    pub fn weight(&self, i: usize, j: usize) -> Option<f64> {
        self.weights.get((i, j)).copied()
    }
}
