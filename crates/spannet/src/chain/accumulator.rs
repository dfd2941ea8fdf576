//! Frequency-weighted sample accumulator.
//!
//! Each recorded state is canonicalized into its full weighted adjacency
//! matrix; structurally identical graphs (same edge set over the same fixed
//! points) collapse into one record with a count. Records keep insertion
//! order, and expectations are count-weighted averages over every recorded
//! state, not over distinct structures.

use nalgebra::DMatrix;

use crate::graph::GraphState;

/// A distinct adjacency structure with its occurrence count.
#[derive(Clone, Debug, PartialEq)]
pub struct AdjacencyRecord {
    /// Symmetric N×N weight matrix, 0 where no edge.
    pub matrix: DMatrix<f64>,
    /// Largest source distance of this structure, cached at insertion.
    pub max_source_distance: f64,
    pub count: u64,
}

impl AdjacencyRecord {
    /// Edge count: non-zero entries strictly above the diagonal.
    pub fn num_edges(&self) -> u64 {
        let n = self.matrix.nrows();
        let mut edges = 0;
        for i in 0..n {
            for j in (i + 1)..n {
                if self.matrix[(i, j)] != 0.0 {
                    edges += 1;
                }
            }
        }
        edges
    }

    /// Degree of the source node: non-zero entries in row 0.
    pub fn source_degree(&self) -> u64 {
        (0..self.matrix.ncols())
            .filter(|&j| self.matrix[(0, j)] != 0.0)
            .count() as u64
    }
}

/// Owned multiset of observed adjacency structures.
#[derive(Clone, Debug, Default)]
pub struct SampleAccumulator {
    records: Vec<AdjacencyRecord>,
}

impl SampleAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the current graph: increment a structurally identical record
    /// (equality is by full matrix content) or append a new one.
    pub fn record(&mut self, graph: &GraphState) {
        let matrix = graph.adjacency_matrix();
        if let Some(existing) = self.records.iter_mut().find(|r| r.matrix == matrix) {
            existing.count += 1;
        } else {
            self.records.push(AdjacencyRecord {
                max_source_distance: graph.max_source_distance(),
                matrix,
                count: 1,
            });
        }
    }

    pub fn records(&self) -> &[AdjacencyRecord] {
        &self.records
    }

    pub fn into_records(self) -> Vec<AdjacencyRecord> {
        self.records
    }

    /// Total number of recorded states (sum of counts).
    pub fn total(&self) -> u64 {
        self.records.iter().map(|r| r.count).sum()
    }

    fn weighted_mean(&self, value: impl Fn(&AdjacencyRecord) -> f64) -> f64 {
        let total = self.total();
        if total == 0 {
            return 0.0;
        }
        let sum: f64 = self
            .records
            .iter()
            .map(|r| r.count as f64 * value(r))
            .sum();
        sum / total as f64
    }

    /// Expected total edge count.
    pub fn expected_edges(&self) -> f64 {
        self.weighted_mean(|r| r.num_edges() as f64)
    }

    /// Expected degree of the source node.
    pub fn expected_source_degree(&self) -> f64 {
        self.weighted_mean(|r| r.source_degree() as f64)
    }

    /// Expected maximum shortest-path distance from the source.
    pub fn expected_max_source_distance(&self) -> f64 {
        self.weighted_mean(|r| r.max_source_distance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Vec2;
    use nalgebra::vector;

    fn line_points() -> Vec<Vec2> {
        (0..3).map(|k| vector![k as f64, 0.0]).collect()
    }

    #[test]
    fn identical_graphs_share_one_record() {
        let mut g = GraphState::new(line_points());
        g.add_edge(0, 1);
        g.add_edge(1, 2);
        let mut accum = SampleAccumulator::new();
        accum.record(&g);
        accum.record(&g);
        assert_eq!(accum.records().len(), 1);
        assert_eq!(accum.records()[0].count, 2);
        assert_eq!(accum.total(), 2);
    }

    #[test]
    fn a_changed_edge_opens_a_new_record() {
        let mut g = GraphState::new(line_points());
        g.add_edge(0, 1);
        g.add_edge(1, 2);
        let mut accum = SampleAccumulator::new();
        accum.record(&g);
        accum.record(&g);
        g.add_edge(0, 2);
        accum.record(&g);
        assert_eq!(accum.records().len(), 2);
        assert_eq!(accum.records()[0].count, 2);
        assert_eq!(accum.records()[1].count, 1);
        // Insertion order: the earlier structure stays first.
        assert_eq!(accum.records()[0].num_edges(), 2);
        assert_eq!(accum.records()[1].num_edges(), 3);
    }

    #[test]
    fn expectations_are_count_weighted() {
        let mut g = GraphState::new(line_points());
        g.add_edge(0, 1);
        g.add_edge(1, 2);
        let mut accum = SampleAccumulator::new();
        accum.record(&g); // path: 2 edges, source degree 1, max dist 2
        g.add_edge(0, 2);
        accum.record(&g); // triangle: 3 edges, source degree 2, max dist 2
        accum.record(&g);
        assert!((accum.expected_edges() - (2.0 + 3.0 + 3.0) / 3.0).abs() < 1e-12);
        assert!((accum.expected_source_degree() - (1.0 + 2.0 + 2.0) / 3.0).abs() < 1e-12);
        assert!((accum.expected_max_source_distance() - 2.0).abs() < 1e-12);
    }

    #[test]
    fn empty_accumulator_yields_zero_expectations() {
        let accum = SampleAccumulator::new();
        assert_eq!(accum.total(), 0);
        assert_eq!(accum.expected_edges(), 0.0);
        assert_eq!(accum.expected_source_degree(), 0.0);
        assert_eq!(accum.expected_max_source_distance(), 0.0);
    }

    #[test]
    fn record_caches_max_source_distance() {
        let mut g = GraphState::new(line_points());
        g.add_edge(0, 1);
        g.add_edge(1, 2);
        let mut accum = SampleAccumulator::new();
        accum.record(&g);
        assert!((accum.records()[0].max_source_distance - 2.0).abs() < 1e-12);
    }
}
