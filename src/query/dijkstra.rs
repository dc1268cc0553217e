use crate::data_structure::{IndexMinPriorityQueue, TimestampFlags};
use crate::graph::{EdgeHierarchyGraph, EdgeWeight, NodeId, WEIGHT_INFINITY};
use rand::{rngs::StdRng, Rng, SeedableRng};

/// Plain single-source Dijkstra over an [`EdgeHierarchyGraph`], ignoring
/// ranks. Serves as the exact reference oracle when validating hierarchy
/// queries and as the settle-order source for Dijkstra-rank query
/// generation. Scratch space is owned by the object and reused.
/// ```
/// use edge_hierarchies::graph::EdgeHierarchyGraph;
/// use edge_hierarchies::query::Dijkstra;
/// let mut graph = EdgeHierarchyGraph::init(3);
/// graph.add_edge(0, 1, 2);
/// graph.add_edge(1, 2, 2);
/// graph.add_edge(0, 2, 5);
/// let mut dijkstra = Dijkstra::init(graph.nb_vertices());
/// assert_eq!(dijkstra.distance(&graph, 0, 2), 4);
/// assert_eq!(dijkstra.distance(&graph, 2, 0), u32::MAX);
/// ```
#[derive(Debug, Clone)]
pub struct Dijkstra {
    queue: IndexMinPriorityQueue,
    was_pushed: TimestampFlags,
    distance: Vec<EdgeWeight>,
}

impl Dijkstra {
    /// Creates the search scratch for graphs with `nb_vertices` vertices.
    pub fn init(nb_vertices: usize) -> Self {
        Self {
            queue: IndexMinPriorityQueue::init(nb_vertices),
            was_pushed: TimestampFlags::init(nb_vertices),
            distance: vec![WEIGHT_INFINITY; nb_vertices],
        }
    }

    /// Gives the shortest-path distance from `s` to `t`, or
    /// [`WEIGHT_INFINITY`](crate::graph::WEIGHT_INFINITY) when `t` is not
    /// reachable. Stops as soon as `t` is settled.
    pub fn distance(&mut self, graph: &EdgeHierarchyGraph, s: NodeId, t: NodeId) -> EdgeWeight {
        let mut result = WEIGHT_INFINITY;
        self.search(graph, s, |vertex, distance| {
            if vertex == t {
                result = distance;
                true
            } else {
                false
            }
        });
        result
    }

    /// Gives the shortest-path distances from `s` to every vertex,
    /// [`WEIGHT_INFINITY`](crate::graph::WEIGHT_INFINITY) for the
    /// unreachable ones.
    pub fn one_to_all(&mut self, graph: &EdgeHierarchyGraph, s: NodeId) -> Vec<EdgeWeight> {
        let mut distances = vec![WEIGHT_INFINITY; graph.nb_vertices()];
        self.search(graph, s, |vertex, distance| {
            distances[vertex as usize] = distance;
            false
        });
        distances
    }

    // Settles vertices in distance order, reporting each to the visitor;
    // the search stops early when the visitor returns true.
    fn search(
        &mut self,
        graph: &EdgeHierarchyGraph,
        source: NodeId,
        mut on_settle: impl FnMut(NodeId, EdgeWeight) -> bool,
    ) {
        self.was_pushed.reset_all();
        self.queue.clear();
        self.queue.push(source as usize, 0);
        self.was_pushed.set(source as usize);
        self.distance[source as usize] = 0;

        while let Some((u, distance_u)) = self.queue.pop() {
            if on_settle(u as NodeId, distance_u) {
                self.queue.clear();
                return;
            }
            for edge in graph.out_edges(u as NodeId) {
                let v = edge.neighbor as usize;
                let distance_v = distance_u + edge.weight;
                if self.was_pushed.is_set(v) {
                    // a settled v is never improved, weights are positive
                    if distance_v < self.distance[v] {
                        self.queue.decrease_key(v, distance_v);
                        self.distance[v] = distance_v;
                    }
                } else {
                    self.queue.push(v, distance_v);
                    self.was_pushed.set(v);
                    self.distance[v] = distance_v;
                }
            }
        }
    }
}

/// One synthesized query of known difficulty: `target` is the
/// `2^rank`-th vertex settled by a plain Dijkstra from `source`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DijkstraRankQuery {
    pub source: NodeId,
    pub target: NodeId,
    pub rank: u32,
    pub distance: EdgeWeight,
}

/// Synthesizes queries of progressively increasing difficulty: for each of
/// `nb_sources` random sources, a query is recorded at every settle count
/// `2^r` with `r > 5`, so targets range from the near neighborhood to the
/// far end of the reachable graph. Deterministic for a fixed seed.
pub fn dijkstra_rank_queries(
    graph: &EdgeHierarchyGraph,
    nb_sources: usize,
    seed: u64,
) -> Vec<DijkstraRankQuery> {
    let mut result = Vec::new();
    if graph.nb_vertices() == 0 {
        return result;
    }
    let mut rng = StdRng::seed_from_u64(seed);
    let mut dijkstra = Dijkstra::init(graph.nb_vertices());
    for _ in 0..nb_sources {
        let source = rng.gen_range(0..graph.nb_vertices()) as NodeId;
        let mut nb_settled: u64 = 0;
        let mut rank: u32 = 0;
        dijkstra.search(graph, source, |vertex, distance| {
            nb_settled += 1;
            if nb_settled == 1 << rank {
                if rank > 5 {
                    result.push(DijkstraRankQuery {
                        source,
                        target: vertex,
                        rank,
                        distance,
                    });
                }
                rank += 1;
            }
            false
        });
    }
    result
}
