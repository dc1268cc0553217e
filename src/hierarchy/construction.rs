#[cfg(test)]
mod unit_test;
use crate::graph::{EdgeHierarchyGraph, EdgeRank, NodeId, RANK_INFINITY};
use crate::hierarchy::{shortest_paths_lost, BipartiteMinimumVertexCover, EdgeRanker};
use crate::query::EdgeHierarchyQuery;
use log::info;

/// Drives the edge hierarchy construction: repeatedly asks the ranker for
/// the next edge, fixes its rank to a monotonically increasing counter,
/// analyzes which shortest paths that edge was supporting, and repairs the
/// graph with weight decreases and a minimum set of shortcut edges so that
/// every shortest path stays representable as an up-down walk.
/// ```
/// use edge_hierarchies::graph::{EdgeHierarchyGraph, RANK_INFINITY};
/// use edge_hierarchies::hierarchy::{EdgeHierarchyConstruction, ShortcutCountingRoundsEdgeRanker};
/// let mut graph = EdgeHierarchyGraph::init(2);
/// graph.add_edge(0, 1, 1);
/// let ranker = ShortcutCountingRoundsEdgeRanker::init(&graph);
/// let mut construction = EdgeHierarchyConstruction::init(&graph, ranker);
/// construction.run(&mut graph);
/// assert_eq!(graph.edge_rank(0, 1), 1);
/// ```
pub struct EdgeHierarchyConstruction<R: EdgeRanker> {
    ranker: R,
    cover: BipartiteMinimumVertexCover,
    witness: EdgeHierarchyQuery,
}

impl<R: EdgeRanker> EdgeHierarchyConstruction<R> {
    /// Creates the driver for `graph` with the given ranking strategy.
    pub fn init(graph: &EdgeHierarchyGraph, ranker: R) -> Self {
        Self {
            ranker,
            cover: BipartiteMinimumVertexCover::init(graph.nb_vertices()),
            witness: EdgeHierarchyQuery::init(graph.nb_vertices()),
        }
    }

    /// Ranks every edge, shortcuts included, with ranks 1, 2, 3, ... in the
    /// order the ranking strategy returns them.
    pub fn run(&mut self, graph: &mut EdgeHierarchyGraph) {
        let mut current_rank: EdgeRank = 1;
        while self.ranker.has_next() {
            let (u, v) = self.ranker.next_edge(graph);
            self.set_edge_rank(graph, u, v, current_rank);
            current_rank += 1;
        }
        info!(
            "ranked {} edges of the augmented graph",
            current_rank as usize - 1
        );
    }

    /// Fixes the rank of one unranked edge and repairs the graph:
    /// absorbable losses become weight decreases (a decreased edge that was
    /// already ranked re-enters the hierarchy), the remaining losses are
    /// covered by the fewest shortcuts through a bipartite minimum vertex
    /// cover over their endpoints.
    pub fn set_edge_rank(
        &mut self,
        graph: &mut EdgeHierarchyGraph,
        u: NodeId,
        v: NodeId,
        rank: EdgeRank,
    ) {
        assert_eq!(
            graph.edge_rank(u, v),
            RANK_INFINITY,
            "edge to rank should be unranked"
        );
        graph.set_edge_rank(u, v, rank);
        let uv_weight = graph.edge_weight(u, v);
        let lost = shortest_paths_lost(u, v, uv_weight, graph, &mut self.witness, true);

        for &(x, y, weight) in &lost.decreases {
            graph.decrease_edge_weight(x, y, weight);
            if graph.edge_rank(x, y) < RANK_INFINITY {
                // the decreased edge re-enters the hierarchy; its future
                // rank is larger, which keeps old up-down walks valid
                graph.set_edge_rank(x, y, RANK_INFINITY);
                self.ranker.add_edge(graph, x, y);
            } else {
                self.ranker.update_edge(graph, x, y);
            }
        }

        let (left, right) = self.cover.minimum_vertex_cover(&lost.losses);
        for &u_prime in &left {
            let weight = graph.edge_weight(u_prime, u) + uv_weight;
            graph.add_edge(u_prime, v, weight);
            self.ranker.add_edge(graph, u_prime, v);
        }
        for &v_prime in &right {
            let weight = uv_weight + graph.edge_weight(v, v_prime);
            graph.add_edge(u, v_prime, weight);
            self.ranker.add_edge(graph, u, v_prime);
        }
    }
}
