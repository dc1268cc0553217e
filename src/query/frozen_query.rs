use crate::data_structure::{IndexMinPriorityQueue, TimestampFlags};
use crate::graph::{EdgeRank, EdgeWeight, NodeId, QueryGraph, WEIGHT_INFINITY};

/// Scratch state of one direction of the bidirectional search, including
/// the pre-stall distances fed by forward stalling.
#[derive(Debug, Clone)]
struct SearchSide {
    queue: IndexMinPriorityQueue,
    was_pushed: TimestampFlags,
    distance: Vec<EdgeWeight>,
    rank: Vec<EdgeRank>,
    // best distance proven through a lower-rank edge, per vertex
    actual_distance: Vec<EdgeWeight>,
    actual_distance_set: TimestampFlags,
    settled_log: Vec<(NodeId, EdgeWeight)>,
}

impl SearchSide {
    fn init(nb_vertices: usize) -> Self {
        Self {
            queue: IndexMinPriorityQueue::init(nb_vertices),
            was_pushed: TimestampFlags::init(nb_vertices),
            distance: vec![WEIGHT_INFINITY; nb_vertices],
            rank: vec![0; nb_vertices],
            actual_distance: vec![WEIGHT_INFINITY; nb_vertices],
            actual_distance_set: TimestampFlags::init(nb_vertices),
            settled_log: Vec::new(),
        }
    }

    fn start(&mut self, source: NodeId) {
        self.was_pushed.reset_all();
        self.actual_distance_set.reset_all();
        self.queue.push(source as usize, 0);
        self.was_pushed.set(source as usize);
        self.distance[source as usize] = 0;
        self.rank[source as usize] = 0;
    }
}

/// Bidirectional rank-constrained query over a frozen [`QueryGraph`],
/// monomorphized over the two stalling prunings so the settlement loop
/// carries no configuration branches:
///
/// * `BWD_STALL` scans (part of) the reverse adjacency of a popped vertex
///   and skips it when some already pushed neighbor proves a shorter
///   distance; the scanned share is bounded by `stall_percent`.
/// * `FWD_STALL` feeds the lower-rank edges that rank-constrained
///   relaxation skips into per-vertex pre-stall distances, and skips a
///   popped vertex whose pre-stall distance beats its tentative one.
///
/// Both prunings only suppress vertices that cannot improve the result, so
/// every configuration reports the same distances.
/// ```
/// use edge_hierarchies::graph::EdgeHierarchyGraph;
/// use edge_hierarchies::query::FrozenQuery;
/// let mut graph = EdgeHierarchyGraph::init(2);
/// graph.add_edge(0, 1, 3);
/// graph.set_edge_rank(0, 1, 1);
/// let frozen = graph.to_query_graph(false);
/// let mut query = FrozenQuery::<false, false>::init(frozen.nb_vertices());
/// assert_eq!(query.distance(&frozen, 0, 1), 3);
/// ```
#[derive(Debug, Clone)]
pub struct FrozenQuery<const FWD_STALL: bool, const BWD_STALL: bool> {
    forward: SearchSide,
    backward: SearchSide,
    stall_percent: usize,
    log_settled: bool,
    pub nb_vertices_settled: usize,
    pub nb_edges_relaxed: usize,
}

impl<const FWD_STALL: bool, const BWD_STALL: bool> FrozenQuery<FWD_STALL, BWD_STALL> {
    /// Creates the query scratch for graphs with `nb_vertices` vertices.
    /// The backward stall scan covers the full reverse adjacency.
    pub fn init(nb_vertices: usize) -> Self {
        Self::with_stall_percent(nb_vertices, 100)
    }

    /// Creates the query scratch with a bounded backward stall scan:
    /// `stall_percent` percent of each reverse adjacency, highest ranks
    /// first.
    pub fn with_stall_percent(nb_vertices: usize, stall_percent: usize) -> Self {
        assert!(stall_percent <= 100, "percentage should be at most 100");
        Self {
            forward: SearchSide::init(nb_vertices),
            backward: SearchSide::init(nb_vertices),
            stall_percent,
            log_settled: false,
            nb_vertices_settled: 0,
            nb_edges_relaxed: 0,
        }
    }

    /// Zeroes the search-space counters.
    pub fn reset_counters(&mut self) {
        self.nb_vertices_settled = 0;
        self.nb_edges_relaxed = 0;
    }

    /// Toggles recording of the settled `(vertex, distance)` pairs.
    pub fn log_settled_vertices(&mut self, log: bool) {
        self.log_settled = log;
    }

    /// Gives the vertices settled by the forward search of the last logged
    /// query, with their distances, in settlement order and in caller-facing
    /// numbering.
    pub fn settled_forward(&self) -> &[(NodeId, EdgeWeight)] {
        &self.forward.settled_log
    }

    /// Symmetric of [`settled_forward`](Self::settled_forward) for the
    /// backward search.
    pub fn settled_backward(&self) -> &[(NodeId, EdgeWeight)] {
        &self.backward.settled_log
    }

    /// Gives the exact shortest-path distance from `s` to `t` in
    /// caller-facing vertex numbers, or
    /// [`WEIGHT_INFINITY`](crate::graph::WEIGHT_INFINITY) when `t` is not
    /// reachable.
    pub fn distance(&mut self, graph: &QueryGraph, s: NodeId, t: NodeId) -> EdgeWeight {
        let source = graph.internal_node(s);
        let target = graph.internal_node(t);
        if self.log_settled {
            self.forward.settled_log.clear();
            self.backward.settled_log.clear();
        }
        self.forward.start(source);
        self.backward.start(target);

        let mut shortest_path_length = WEIGHT_INFINITY;
        let mut forward = true;

        loop {
            let forward_finished = match self.forward.queue.peek() {
                Some((_, key)) => key >= shortest_path_length,
                None => true,
            };
            let backward_finished = match self.backward.queue.peek() {
                Some((_, key)) => key >= shortest_path_length,
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
                self.make_step(graph, true, &mut shortest_path_length);
            } else {
                self.make_step(graph, false, &mut shortest_path_length);
            }
            forward = !forward;
        }
        self.forward.queue.clear();
        self.backward.queue.clear();
        shortest_path_length
    }

    fn make_step(&mut self, graph: &QueryGraph, forward: bool, shortest_path_length: &mut EdgeWeight) {
        let (current, other) = if forward {
            (&mut self.forward, &self.backward)
        } else {
            (&mut self.backward, &self.forward)
        };
        let (u, distance_u) = current.queue.pop().expect("queue checked non-empty");
        self.nb_vertices_settled += 1;
        debug_assert_eq!(distance_u, current.distance[u]);

        if FWD_STALL
            && current.actual_distance_set.is_set(u)
            && current.actual_distance[u] < current.distance[u]
        {
            return;
        }
        if BWD_STALL {
            let reverse_edges = if forward {
                graph.in_edges_limited(u as NodeId, self.stall_percent)
            } else {
                graph.out_edges_limited(u as NodeId, self.stall_percent)
            };
            for edge in reverse_edges {
                self.nb_edges_relaxed += 1;
                let x = edge.neighbor as usize;
                if current.was_pushed.is_set(x)
                    && current.distance[x] + edge.weight < current.distance[u]
                {
                    return;
                }
            }
        }

        if self.log_settled {
            current
                .settled_log
                .push((graph.external_node(u as NodeId), distance_u));
        }

        if other.was_pushed.is_set(u) {
            let candidate = distance_u + other.distance[u];
            if candidate < *shortest_path_length {
                *shortest_path_length = candidate;
            }
        }

        let rank_u = current.rank[u];
        if FWD_STALL {
            // visit the whole adjacency: high ranks relax, low ranks feed
            // the pre-stall distances
            let edges = if forward {
                graph.out_edges(u as NodeId)
            } else {
                graph.in_edges(u as NodeId)
            };
            for edge in edges {
                self.nb_edges_relaxed += 1;
                let distance_v = distance_u + edge.weight;
                let v = edge.neighbor as usize;
                if edge.rank >= rank_u {
                    Self::relax(current, v, distance_v, edge.rank);
                } else if !current.actual_distance_set.is_set(v)
                    || distance_v < current.actual_distance[v]
                {
                    current.actual_distance[v] = distance_v;
                    current.actual_distance_set.set(v);
                }
            }
        } else {
            let edges = if forward {
                graph.out_edges_with_min_rank(u as NodeId, rank_u)
            } else {
                graph.in_edges_with_min_rank(u as NodeId, rank_u)
            };
            for edge in edges {
                self.nb_edges_relaxed += 1;
                let distance_v = distance_u + edge.weight;
                Self::relax(current, edge.neighbor as usize, distance_v, edge.rank);
            }
        }
    }

    fn relax(current: &mut SearchSide, v: usize, distance_v: EdgeWeight, rank: EdgeRank) {
        if current.was_pushed.is_set(v) {
            if distance_v < current.distance[v] {
                if !FWD_STALL
                    || !current.actual_distance_set.is_set(v)
                    || distance_v < current.actual_distance[v]
                {
                    current.queue.decrease_key(v, distance_v);
                    current.distance[v] = distance_v;
                    current.rank[v] = rank;
                }
            } else if distance_v == current.distance[v] && current.rank[v] < rank {
                // prefer the higher rank for future tie-broken relaxations
                current.rank[v] = rank;
            }
        } else {
            current.queue.push(v, distance_v);
            current.distance[v] = distance_v;
            current.was_pushed.set(v);
            current.rank[v] = rank;
        }
    }
}
