use crate::data_structure::{IndexMinPriorityQueue, TimestampFlags};
use crate::graph::{EdgeHierarchyGraph, EdgeRank, EdgeWeight, NodeId, WEIGHT_INFINITY};

/// Scratch state of one direction of the bidirectional search.
#[derive(Debug, Clone)]
struct SearchSide {
    queue: IndexMinPriorityQueue,
    was_pushed: TimestampFlags,
    distance: Vec<EdgeWeight>,
    // rank of the edge by which each vertex was last relaxed on this side
    rank: Vec<EdgeRank>,
}

impl SearchSide {
    fn init(nb_vertices: usize) -> Self {
        Self {
            queue: IndexMinPriorityQueue::init(nb_vertices),
            was_pushed: TimestampFlags::init(nb_vertices),
            distance: vec![WEIGHT_INFINITY; nb_vertices],
            rank: vec![0; nb_vertices],
        }
    }

    fn start(&mut self, source: NodeId) {
        self.was_pushed.reset_all();
        self.queue.push(source as usize, 0);
        self.was_pushed.set(source as usize);
        self.distance[source as usize] = 0;
        self.rank[source as usize] = 0;
    }
}

/// Bidirectional rank-constrained query over a builder-phase
/// [`EdgeHierarchyGraph`]: two Dijkstra searches that only follow edges
/// whose rank is at least the rank by which the settled vertex was reached,
/// meeting at the peak of an up-down path.
///
/// The query object owns all scratch space and can be reused across
/// queries; the graph is borrowed per call so that construction can keep
/// mutating it between calls. During construction this same query answers
/// the witness lookups of the shortcut analysis.
/// ```
/// use edge_hierarchies::graph::EdgeHierarchyGraph;
/// use edge_hierarchies::query::EdgeHierarchyQuery;
/// let mut graph = EdgeHierarchyGraph::init(2);
/// graph.add_edge(0, 1, 1);
/// let mut query = EdgeHierarchyQuery::init(graph.nb_vertices());
/// assert_eq!(query.distance(&graph, 0, 1), 1);
/// assert_eq!(query.distance(&graph, 0, 0), 0);
/// assert_eq!(query.distance(&graph, 1, 0), u32::MAX);
/// ```
#[derive(Debug, Clone)]
pub struct EdgeHierarchyQuery {
    forward: SearchSide,
    backward: SearchSide,
    pub nb_vertices_settled: usize,
    pub nb_edges_relaxed: usize,
}

impl EdgeHierarchyQuery {
    /// Creates the query scratch for graphs with `nb_vertices` vertices.
    pub fn init(nb_vertices: usize) -> Self {
        Self {
            forward: SearchSide::init(nb_vertices),
            backward: SearchSide::init(nb_vertices),
            nb_vertices_settled: 0,
            nb_edges_relaxed: 0,
        }
    }

    /// Zeroes the search-space counters.
    pub fn reset_counters(&mut self) {
        self.nb_vertices_settled = 0;
        self.nb_edges_relaxed = 0;
    }

    /// Gives the exact shortest-path distance from `s` to `t`, or
    /// [`WEIGHT_INFINITY`](crate::graph::WEIGHT_INFINITY) when `t` is not
    /// reachable.
    pub fn distance(&mut self, graph: &EdgeHierarchyGraph, s: NodeId, t: NodeId) -> EdgeWeight {
        self.distance_bounded(graph, s, t, WEIGHT_INFINITY)
    }

    /// Like [`distance`](Self::distance) but gives up on paths of length
    /// `maximum_distance` or more, reporting
    /// [`WEIGHT_INFINITY`](crate::graph::WEIGHT_INFINITY) instead. Used as
    /// the bounded witness lookup during construction.
    pub fn distance_bounded(
        &mut self,
        graph: &EdgeHierarchyGraph,
        s: NodeId,
        t: NodeId,
        maximum_distance: EdgeWeight,
    ) -> EdgeWeight {
        self.forward.start(s);
        self.backward.start(t);

        let mut shortest_path_length = WEIGHT_INFINITY;
        let mut forward = true;

        loop {
            let forward_finished = match self.forward.queue.peek() {
                Some((_, key)) => key >= shortest_path_length || key >= maximum_distance,
                None => true,
            };
            let backward_finished = match self.backward.queue.peek() {
                Some((_, key)) => key >= shortest_path_length || key >= maximum_distance,
                None => true,
            };
            if forward_finished && backward_finished {
                break;
            }
            if forward_finished {
                forward = false;
            }
            if backward_finished {
                forward = true;
            }

            if forward {
                Self::make_step(
                    graph,
                    true,
                    &mut self.forward,
                    &self.backward,
                    &mut shortest_path_length,
                    &mut self.nb_vertices_settled,
                    &mut self.nb_edges_relaxed,
                );
            } else {
                Self::make_step(
                    graph,
                    false,
                    &mut self.backward,
                    &self.forward,
                    &mut shortest_path_length,
                    &mut self.nb_vertices_settled,
                    &mut self.nb_edges_relaxed,
                );
            }
            forward = !forward;
        }
        self.forward.queue.clear();
        self.backward.queue.clear();
        if shortest_path_length >= maximum_distance {
            return WEIGHT_INFINITY;
        }
        shortest_path_length
    }

    fn make_step(
        graph: &EdgeHierarchyGraph,
        forward: bool,
        current: &mut SearchSide,
        other: &SearchSide,
        shortest_path_length: &mut EdgeWeight,
        nb_vertices_settled: &mut usize,
        nb_edges_relaxed: &mut usize,
    ) {
        let (u, distance_u) = current.queue.pop().expect("queue checked non-empty");
        *nb_vertices_settled += 1;
        debug_assert_eq!(distance_u, current.distance[u]);

        if Self::can_stall(graph, forward, current, u as NodeId) {
            return;
        }

        if other.was_pushed.is_set(u) {
            let candidate = distance_u + other.distance[u];
            if candidate < *shortest_path_length {
                *shortest_path_length = candidate;
            }
        }

        let rank_u = current.rank[u];
        let edges = if forward {
            graph.out_edges_with_min_rank(u as NodeId, rank_u)
        } else {
            graph.in_edges_with_min_rank(u as NodeId, rank_u)
        };
        for edge in edges {
            *nb_edges_relaxed += 1;
            let v = edge.neighbor as usize;
            let distance_v = distance_u + edge.weight;
            if current.was_pushed.is_set(v) {
                if distance_v < current.distance[v] {
                    current.queue.decrease_key(v, distance_v);
                    current.distance[v] = distance_v;
                    current.rank[v] = edge.rank;
                } else if distance_v == current.distance[v] && current.rank[v] < edge.rank {
                    // prefer the higher rank for future tie-broken relaxations
                    current.rank[v] = edge.rank;
                }
            } else {
                current.queue.push(v, distance_v);
                current.distance[v] = distance_v;
                current.was_pushed.set(v);
                current.rank[v] = edge.rank;
            }
        }
    }

    // Stall-on-demand: a vertex whose tentative distance is beaten through
    // some already pushed reverse neighbor cannot lie on a shortest up-down
    // path, so its relaxation is skipped.
    fn can_stall(
        graph: &EdgeHierarchyGraph,
        forward: bool,
        current: &SearchSide,
        v: NodeId,
    ) -> bool {
        let reverse_edges = if forward {
            graph.in_edges(v)
        } else {
            graph.out_edges(v)
        };
        for edge in reverse_edges {
            let x = edge.neighbor as usize;
            if current.was_pushed.is_set(x)
                && current.distance[x] + edge.weight < current.distance[v as usize]
            {
                return true;
            }
        }
        false
    }
}
