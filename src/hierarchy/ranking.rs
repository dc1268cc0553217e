use crate::data_structure::{ArraySet, EdgeIdMap};
use crate::graph::{EdgeHierarchyGraph, EdgeId, NodeId, INVALID_EDGE_ID, RANK_INFINITY};
use crate::hierarchy::{shortest_paths_lost, BipartiteMinimumVertexCover};
use crate::query::EdgeHierarchyQuery;
use log::debug;

/// Supplies the next edge to rank during construction. The driver notifies
/// the ranker of every edge the graph gains ([`add_edge`](Self::add_edge),
/// shortcuts and re-entered edges included) and of every weight decrease
/// ([`update_edge`](Self::update_edge)); each edge returned by
/// [`next_edge`](Self::next_edge) currently has rank
/// [`RANK_INFINITY`](crate::graph::RANK_INFINITY).
pub trait EdgeRanker {
    fn add_edge(&mut self, graph: &EdgeHierarchyGraph, u: NodeId, v: NodeId);
    fn update_edge(&mut self, graph: &EdgeHierarchyGraph, u: NodeId, v: NodeId);
    fn has_next(&self) -> bool;
    fn next_edge(&mut self, graph: &mut EdgeHierarchyGraph) -> (NodeId, NodeId);
}

// Shared candidate-pool bookkeeping of the round-based rankers: the dense
// edge ids, the set of still-unranked edges and the per-edge score array.
#[derive(Debug)]
struct CandidatePool {
    edge_ids: EdgeIdMap,
    edges_in_graph: ArraySet,
    score: Vec<u32>,
}

impl CandidatePool {
    fn init(graph: &EdgeHierarchyGraph) -> Self {
        let capacity = graph.nb_edges().max(1);
        Self {
            edge_ids: EdgeIdMap::new(),
            edges_in_graph: ArraySet::init(capacity),
            score: vec![0; capacity],
        }
    }

    fn insert(&mut self, u: NodeId, v: NodeId) -> EdgeId {
        let edge_id = self.edge_ids.edge_id(u, v);
        if self.edges_in_graph.capacity() <= edge_id as usize {
            let new_capacity = (self.edges_in_graph.capacity() * 2).max(edge_id as usize + 1);
            self.edges_in_graph.resize(new_capacity);
            self.score.resize(new_capacity, 0);
        }
        self.edges_in_graph.insert(edge_id as usize);
        edge_id
    }

    fn unranked_ids(&self) -> Vec<EdgeId> {
        self.edges_in_graph.iter().map(|&id| id as EdgeId).collect()
    }

    // An edge qualifies for the round when no incident still-unranked edge
    // (out of its head, into its tail) has a strictly smaller score.
    fn is_local_minimum(&mut self, graph: &EdgeHierarchyGraph, edge_id: EdgeId) -> bool {
        let (u, v) = self.edge_ids.edge(edge_id);
        let current_score = self.score[edge_id as usize];
        for edge in graph.out_edges_with_min_rank(v, RANK_INFINITY) {
            let incident_id = self.edge_ids.edge_id(v, edge.neighbor);
            debug_assert!(self.edges_in_graph.contains(incident_id as usize));
            if self.score[incident_id as usize] < current_score {
                return false;
            }
        }
        for edge in graph.in_edges_with_min_rank(u, RANK_INFINITY) {
            let incident_id = self.edge_ids.edge_id(edge.neighbor, u);
            debug_assert!(self.edges_in_graph.contains(incident_id as usize));
            if self.score[incident_id as usize] < current_score {
                return false;
            }
        }
        true
    }
}

/// The default ranking strategy: shortcut-counting rounds. Every round
/// scores each still-unranked edge by the number of shortcuts its ranking
/// would force (the minimum vertex cover of its lost paths) and queues the
/// edges that are local minima of this score among their incident unranked
/// edges. Scores are recomputed from scratch each round.
pub struct ShortcutCountingRoundsEdgeRanker {
    pool: CandidatePool,
    witness: EdgeHierarchyQuery,
    cover: BipartiteMinimumVertexCover,
    current_round: Vec<EdgeId>,
}

impl ShortcutCountingRoundsEdgeRanker {
    /// Creates the ranker and enters every edge of `graph` into the
    /// candidate pool.
    pub fn init(graph: &EdgeHierarchyGraph) -> Self {
        let mut ranker = Self {
            pool: CandidatePool::init(graph),
            witness: EdgeHierarchyQuery::init(graph.nb_vertices()),
            cover: BipartiteMinimumVertexCover::init(graph.nb_vertices()),
            current_round: Vec::new(),
        };
        for u in 0..graph.nb_vertices() {
            for edge in graph.out_edges(u as NodeId) {
                ranker.add_edge(graph, u as NodeId, edge.neighbor);
            }
        }
        ranker
    }

    fn next_round(&mut self, graph: &mut EdgeHierarchyGraph) {
        for edge_id in self.pool.unranked_ids() {
            let (u, v) = self.pool.edge_ids.edge(edge_id);
            debug_assert_eq!(graph.edge_rank(u, v), RANK_INFINITY);
            // probe with a provisional rank so the witness search cannot
            // route through the edge under analysis
            graph.set_edge_rank(u, v, RANK_INFINITY - 1);
            let lost = shortest_paths_lost(
                u,
                v,
                graph.edge_weight(u, v),
                graph,
                &mut self.witness,
                false,
            );
            graph.set_edge_rank(u, v, RANK_INFINITY);
            self.pool.score[edge_id as usize] =
                self.cover.minimum_vertex_cover_size(&lost.losses) as u32;
        }

        for edge_id in self.pool.unranked_ids() {
            if self.pool.is_local_minimum(graph, edge_id) {
                self.current_round.push(edge_id);
            }
        }
        debug!(
            "queued {} out of {} edges",
            self.current_round.len(),
            self.pool.edges_in_graph.len()
        );
    }
}

impl EdgeRanker for ShortcutCountingRoundsEdgeRanker {
    fn add_edge(&mut self, _graph: &EdgeHierarchyGraph, u: NodeId, v: NodeId) {
        self.pool.insert(u, v);
    }

    fn update_edge(&mut self, _graph: &EdgeHierarchyGraph, _u: NodeId, _v: NodeId) {
        // scores are recomputed wholesale at the next round
    }

    fn has_next(&self) -> bool {
        !self.pool.edges_in_graph.is_empty()
    }

    fn next_edge(&mut self, graph: &mut EdgeHierarchyGraph) -> (NodeId, NodeId) {
        if self.current_round.is_empty() {
            self.next_round(graph);
        }
        let edge_id = self.current_round.pop().expect("round never empty here");
        self.pool.edges_in_graph.remove(edge_id as usize);
        self.pool.edge_ids.edge(edge_id)
    }
}

/// Variant of the shortcut-counting strategy where a round consists of all
/// remaining edges, emitted by ascending shortcut count.
pub struct ShortcutCountingSortingRoundsEdgeRanker {
    pool: CandidatePool,
    witness: EdgeHierarchyQuery,
    cover: BipartiteMinimumVertexCover,
    current_round: Vec<EdgeId>,
}

impl ShortcutCountingSortingRoundsEdgeRanker {
    /// Creates the ranker and enters every edge of `graph` into the
    /// candidate pool.
    pub fn init(graph: &EdgeHierarchyGraph) -> Self {
        let mut ranker = Self {
            pool: CandidatePool::init(graph),
            witness: EdgeHierarchyQuery::init(graph.nb_vertices()),
            cover: BipartiteMinimumVertexCover::init(graph.nb_vertices()),
            current_round: Vec::new(),
        };
        for u in 0..graph.nb_vertices() {
            for edge in graph.out_edges(u as NodeId) {
                ranker.add_edge(graph, u as NodeId, edge.neighbor);
            }
        }
        ranker
    }

    fn next_round(&mut self, graph: &mut EdgeHierarchyGraph) {
        for edge_id in self.pool.unranked_ids() {
            let (u, v) = self.pool.edge_ids.edge(edge_id);
            debug_assert_eq!(graph.edge_rank(u, v), RANK_INFINITY);
            graph.set_edge_rank(u, v, RANK_INFINITY - 1);
            let lost = shortest_paths_lost(
                u,
                v,
                graph.edge_weight(u, v),
                graph,
                &mut self.witness,
                false,
            );
            graph.set_edge_rank(u, v, RANK_INFINITY);
            self.pool.score[edge_id as usize] =
                self.cover.minimum_vertex_cover_size(&lost.losses) as u32;
            self.current_round.push(edge_id);
        }

        // emitted from the back, so sort by descending score
        let score = &self.pool.score;
        self.current_round
            .sort_by(|&i, &j| score[j as usize].cmp(&score[i as usize]));
        debug!("queued up {} edges", self.current_round.len());
    }
}

impl EdgeRanker for ShortcutCountingSortingRoundsEdgeRanker {
    fn add_edge(&mut self, _graph: &EdgeHierarchyGraph, u: NodeId, v: NodeId) {
        self.pool.insert(u, v);
    }

    fn update_edge(&mut self, _graph: &EdgeHierarchyGraph, _u: NodeId, _v: NodeId) {}

    fn has_next(&self) -> bool {
        !self.pool.edges_in_graph.is_empty()
    }

    fn next_edge(&mut self, graph: &mut EdgeHierarchyGraph) -> (NodeId, NodeId) {
        if self.current_round.is_empty() {
            self.next_round(graph);
        }
        let edge_id = self.current_round.pop().expect("round never empty here");
        self.pool.edges_in_graph.remove(edge_id as usize);
        self.pool.edge_ids.edge(edge_id)
    }
}

/// Round-based strategy whose score also penalizes the hop growth of the
/// forced shortcuts: `1000 * shortcut_count + (100 * hops_added) /
/// hops_of_edge`, where the hop count of an original edge is 1 and the hop
/// count of a shortcut is the sum of the two edges it bypasses.
pub struct ShortcutsHopsRoundsEdgeRanker {
    pool: CandidatePool,
    witness: EdgeHierarchyQuery,
    cover: BipartiteMinimumVertexCover,
    current_round: Vec<EdgeId>,
    nb_hops: Vec<u32>,
    last_emitted: EdgeId,
}

impl ShortcutsHopsRoundsEdgeRanker {
    /// Creates the ranker and enters every edge of `graph` into the
    /// candidate pool with a hop count of 1.
    pub fn init(graph: &EdgeHierarchyGraph) -> Self {
        let mut ranker = Self {
            pool: CandidatePool::init(graph),
            witness: EdgeHierarchyQuery::init(graph.nb_vertices()),
            cover: BipartiteMinimumVertexCover::init(graph.nb_vertices()),
            current_round: Vec::new(),
            nb_hops: vec![1; graph.nb_edges().max(1)],
            last_emitted: INVALID_EDGE_ID,
        };
        for u in 0..graph.nb_vertices() {
            for edge in graph.out_edges(u as NodeId) {
                ranker.insert(u as NodeId, edge.neighbor);
            }
        }
        ranker
    }

    fn insert(&mut self, u: NodeId, v: NodeId) -> EdgeId {
        let edge_id = self.pool.insert(u, v);
        if self.nb_hops.len() < self.pool.score.len() {
            self.nb_hops.resize(self.pool.score.len(), 1);
        }
        edge_id
    }

    // A shortcut or decrease targets an edge bypassing one hop of the last
    // emitted edge `(u, v)`: either `(x, v)` next to `(x, u)`, or `(u, y)`
    // next to `(v, y)`. Its hop count is the sum of the two parts.
    fn update_hops(&mut self, graph: &EdgeHierarchyGraph, u: NodeId, v: NodeId) {
        let (removed_u, removed_v) = self.pool.edge_ids.edge(self.last_emitted);
        let updated_id = self.pool.edge_ids.edge_id(u, v);
        if u == removed_u {
            debug_assert!(graph.has_edge(removed_v, v));
            let other_id = self.pool.edge_ids.edge_id(removed_v, v);
            self.nb_hops[updated_id as usize] =
                self.nb_hops[self.last_emitted as usize] + self.nb_hops[other_id as usize];
        } else if v == removed_v {
            debug_assert!(graph.has_edge(u, removed_u));
            let other_id = self.pool.edge_ids.edge_id(u, removed_u);
            self.nb_hops[updated_id as usize] =
                self.nb_hops[self.last_emitted as usize] + self.nb_hops[other_id as usize];
        } else {
            unreachable!("edge does not extend the last ranked edge");
        }
    }

    fn next_round(&mut self, graph: &mut EdgeHierarchyGraph) {
        for edge_id in self.pool.unranked_ids() {
            let (u, v) = self.pool.edge_ids.edge(edge_id);
            debug_assert_eq!(graph.edge_rank(u, v), RANK_INFINITY);
            graph.set_edge_rank(u, v, RANK_INFINITY - 1);
            let lost = shortest_paths_lost(
                u,
                v,
                graph.edge_weight(u, v),
                graph,
                &mut self.witness,
                false,
            );
            graph.set_edge_rank(u, v, RANK_INFINITY);
            let (left, right) = self.cover.minimum_vertex_cover(&lost.losses);

            let hops_of_edge = self.nb_hops[edge_id as usize];
            let mut hops_added = 0;
            for &u_prime in &left {
                let part_id = self.pool.edge_ids.edge_id(u_prime, u);
                hops_added += self.nb_hops[part_id as usize] + hops_of_edge;
            }
            for &v_prime in &right {
                let part_id = self.pool.edge_ids.edge_id(v, v_prime);
                hops_added += self.nb_hops[part_id as usize] + hops_of_edge;
            }
            self.pool.score[edge_id as usize] =
                1000 * (left.len() + right.len()) as u32 + (100 * hops_added) / hops_of_edge;
        }

        for edge_id in self.pool.unranked_ids() {
            if self.pool.is_local_minimum(graph, edge_id) {
                self.current_round.push(edge_id);
            }
        }
        debug!(
            "queued {} out of {} edges",
            self.current_round.len(),
            self.pool.edges_in_graph.len()
        );
    }
}

impl EdgeRanker for ShortcutsHopsRoundsEdgeRanker {
    fn add_edge(&mut self, graph: &EdgeHierarchyGraph, u: NodeId, v: NodeId) {
        self.insert(u, v);
        self.update_hops(graph, u, v);
    }

    fn update_edge(&mut self, graph: &EdgeHierarchyGraph, u: NodeId, v: NodeId) {
        self.update_hops(graph, u, v);
    }

    fn has_next(&self) -> bool {
        !self.pool.edges_in_graph.is_empty()
    }

    fn next_edge(&mut self, graph: &mut EdgeHierarchyGraph) -> (NodeId, NodeId) {
        if self.current_round.is_empty() {
            self.next_round(graph);
        }
        let edge_id = self.current_round.pop().expect("round never empty here");
        self.pool.edges_in_graph.remove(edge_id as usize);
        self.last_emitted = edge_id;
        self.pool.edge_ids.edge(edge_id)
    }
}
