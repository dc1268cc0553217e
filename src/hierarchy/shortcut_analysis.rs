use crate::graph::{EdgeHierarchyGraph, EdgeWeight, NodeId, RANK_INFINITY};
use crate::query::EdgeHierarchyQuery;

/// Source of witness distances for the shortcut analysis: the shortest-path
/// distance between two vertices in the current graph, capped by a bound
/// past which the caller does not care. Implementations report
/// [`WEIGHT_INFINITY`](crate::graph::WEIGHT_INFINITY) when no path below
/// the bound exists, which the analysis reads as "no witness".
pub trait WitnessOracle {
    fn witness_distance(
        &mut self,
        graph: &EdgeHierarchyGraph,
        s: NodeId,
        t: NodeId,
        maximum_distance: EdgeWeight,
    ) -> EdgeWeight;
}

/// The rank-constrained query is the default witness oracle. During
/// construction it is exact on the current graph because the repairs keep
/// every shortest path representable, while the just-ranked edge itself is
/// never part of an increasing rank sequence together with its unranked
/// neighbor edges, so the 2-hop candidate under analysis is invisible to it.
impl WitnessOracle for EdgeHierarchyQuery {
    fn witness_distance(
        &mut self,
        graph: &EdgeHierarchyGraph,
        s: NodeId,
        t: NodeId,
        maximum_distance: EdgeWeight,
    ) -> EdgeWeight {
        self.distance_bounded(graph, s, t, maximum_distance)
    }
}

/// Outcome of analyzing a just-ranked edge: the vertex pairs whose unique
/// shortest path is about to be lost and needs a fresh shortcut, and the
/// existing edges that can absorb a loss through a weight decrease instead.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ShortestPathsLost {
    pub losses: Vec<(NodeId, NodeId)>,
    pub decreases: Vec<(NodeId, NodeId, EdgeWeight)>,
}

/// Determines which 2-hop shortest paths the edge `(u, v)` of weight
/// `uv_weight` was the unique support of, now that its rank is fixed.
///
/// An up-down walk can no longer combine `(u, v)` with an unranked edge on
/// either side, so for every unranked in-neighbor `u'` of `u` and unranked
/// out-neighbor `v'` of `v` the candidate walk `(u', u, v, v')` of weight
/// `W = w(u',u) + uv_weight + w(v,v')` is checked against the witness
/// distance `D` from `u'` to `v'`:
///
/// * `D <= W`: some other walk is as good, nothing to repair (an equal
///   witness is acceptable);
/// * otherwise, when the edge `(u', v)` or `(u, v')` already exists, a
///   weight decrease of that edge restores the pair;
/// * otherwise `(u', v')` is a true loss requiring a new shortcut.
///
/// With `collect_decreases` unset only the losses are gathered, which is
/// what the rankers need when scoring candidate edges.
pub fn shortest_paths_lost<W: WitnessOracle>(
    u: NodeId,
    v: NodeId,
    uv_weight: EdgeWeight,
    graph: &EdgeHierarchyGraph,
    witness: &mut W,
    collect_decreases: bool,
) -> ShortestPathsLost {
    let mut result = ShortestPathsLost::default();
    for u_edge in graph.in_edges_with_min_rank(u, RANK_INFINITY) {
        let u_prime = u_edge.neighbor;
        let u_prime_v_weight = u_edge.weight + uv_weight;
        for v_edge in graph.out_edges_with_min_rank(v, RANK_INFINITY) {
            let v_prime = v_edge.neighbor;
            let u_prime_v_prime_weight = u_prime_v_weight + v_edge.weight;
            let distance = witness.witness_distance(
                graph,
                u_prime,
                v_prime,
                u_prime_v_prime_weight.saturating_add(1),
            );
            if distance <= u_prime_v_prime_weight {
                continue;
            }
            if graph.has_edge(u_prime, v) {
                if collect_decreases {
                    result.decreases.push((u_prime, v, u_prime_v_weight));
                }
            } else if graph.has_edge(u, v_prime) {
                if collect_decreases {
                    let u_v_prime_weight = uv_weight + v_edge.weight;
                    result.decreases.push((u, v_prime, u_v_prime_weight));
                }
            } else {
                result.losses.push((u_prime, v_prime));
            }
        }
    }
    result
}
