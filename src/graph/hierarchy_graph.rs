#[cfg(test)]
mod unit_test;
use crate::graph::{
    EdgeInfo, EdgeRank, EdgeWeight, HighRankEdges, NodeId, QueryGraph, INVALID_NODE, RANK_INFINITY,
};
use bitvec::prelude::*;

/// Directed weighted graph with a hierarchy rank on every edge.
///
/// Both the out-neighbors and the in-neighbors of every vertex are kept as
/// sequences of [`EdgeInfo`] records so that construction and queries can
/// iterate in either direction. Edges are only ever added, never removed,
/// and weights only decrease.
/// ```
/// use edge_hierarchies::graph::{EdgeHierarchyGraph, RANK_INFINITY};
/// let mut graph = EdgeHierarchyGraph::init(3);
/// graph.add_edge(0, 1, 4);
/// graph.add_edge(1, 2, 3);
/// assert_eq!(graph.nb_vertices(), 3);
/// assert_eq!(graph.nb_edges(), 2);
/// assert_eq!(graph.edge_weight(0, 1), 4);
/// assert_eq!(graph.edge_rank(0, 1), RANK_INFINITY);
/// ```
#[derive(Debug, Clone)]
pub struct EdgeHierarchyGraph {
    // vertices have indices 0, ..., nb_vertices - 1 and each vertex is
    // associated to the records of its outgoing and incoming edges
    neighbors_out: Vec<Vec<EdgeInfo>>,
    neighbors_in: Vec<Vec<EdgeInfo>>,
    nb_edges: usize,
    nb_vertices: usize,
    edges_sorted: bool,
}

impl EdgeHierarchyGraph {
    /// Creates a graph with a given number of vertices and without edges.
    /// ```
    /// use edge_hierarchies::graph::EdgeHierarchyGraph;
    /// let graph = EdgeHierarchyGraph::init(10);
    /// assert_eq!(graph.nb_vertices(), 10);
    /// assert_eq!(graph.nb_edges(), 0);
    /// ```
    pub fn init(nb_vertices: usize) -> Self {
        assert!(nb_vertices < INVALID_NODE as usize);
        Self {
            neighbors_out: vec![Vec::new(); nb_vertices],
            neighbors_in: vec![Vec::new(); nb_vertices],
            nb_edges: 0,
            nb_vertices,
            edges_sorted: false,
        }
    }

    /// Returns the number of vertices in the graph.
    pub fn nb_vertices(&self) -> usize {
        // run time complexity O(1)
        self.nb_vertices
    }

    /// Returns the number of edges in the graph, shortcuts included.
    pub fn nb_edges(&self) -> usize {
        // run time complexity O(1)
        self.nb_edges
    }

    /// Gives the number of vertices a vertex points to.
    pub fn out_degree(&self, vertex: NodeId) -> usize {
        self.neighbors_out[vertex as usize].len()
    }

    /// Gives the number of vertices pointing to a vertex.
    pub fn in_degree(&self, vertex: NodeId) -> usize {
        self.neighbors_in[vertex as usize].len()
    }

    /// Adds a new edge to the graph, unranked and with a positive weight.
    /// # Panics
    /// It panics when the edge is already present, parallel edges are
    /// forbidden.
    /// ```
    /// use edge_hierarchies::graph::EdgeHierarchyGraph;
    /// let mut graph = EdgeHierarchyGraph::init(4);
    /// graph.add_edge(1, 3, 2);
    /// graph.add_edge(1, 2, 5);
    /// assert!(graph.has_edge(1, 3));
    /// assert!(!graph.has_edge(3, 1));
    /// assert_eq!(graph.nb_edges(), 2);
    /// ```
    pub fn add_edge(&mut self, u: NodeId, v: NodeId, weight: EdgeWeight) {
        // run time complexity O(out_degree(u)) because of the precondition
        assert!(!self.has_edge(u, v), "edge already in the graph");
        assert!(weight > 0, "weights should be positive");
        self.nb_edges += 1;
        self.neighbors_out[u as usize].push(EdgeInfo {
            neighbor: v,
            weight,
            rank: RANK_INFINITY,
        });
        self.neighbors_in[v as usize].push(EdgeInfo {
            neighbor: u,
            weight,
            rank: RANK_INFINITY,
        });
    }

    /// Decreases the weight of an existing edge, keeping both mirrored
    /// records consistent. Does nothing when the new weight is not smaller.
    /// # Panics
    /// It panics when the edge is not in the graph.
    /// ```
    /// use edge_hierarchies::graph::EdgeHierarchyGraph;
    /// let mut graph = EdgeHierarchyGraph::init(2);
    /// graph.add_edge(0, 1, 7);
    /// graph.decrease_edge_weight(0, 1, 3);
    /// graph.decrease_edge_weight(0, 1, 5);
    /// assert_eq!(graph.edge_weight(0, 1), 3);
    /// ```
    pub fn decrease_edge_weight(&mut self, u: NodeId, v: NodeId, weight: EdgeWeight) {
        assert!(self.has_edge(u, v), "cannot decrease a missing edge");
        if self.edge_weight(u, v) < weight {
            return;
        }
        for edge in self.neighbors_out[u as usize].iter_mut() {
            if edge.neighbor == v {
                edge.weight = weight;
                break;
            }
        }
        for edge in self.neighbors_in[v as usize].iter_mut() {
            if edge.neighbor == u {
                edge.weight = weight;
                return;
            }
        }
        unreachable!("mirrored record not found");
    }

    /// Sets the hierarchy rank of an edge on both mirrored records.
    /// Idempotent, and also used to reset an edge back to
    /// [`RANK_INFINITY`](crate::graph::RANK_INFINITY) when a weight
    /// decrease re-enters it into the hierarchy.
    pub fn set_edge_rank(&mut self, u: NodeId, v: NodeId, rank: EdgeRank) {
        for edge in self.neighbors_out[u as usize].iter_mut() {
            if edge.neighbor == v {
                edge.rank = rank;
                break;
            }
        }
        for edge in self.neighbors_in[v as usize].iter_mut() {
            if edge.neighbor == u {
                edge.rank = rank;
                break;
            }
        }
    }

    /// Tests whether the edge `(u, v)` is in the graph.
    pub fn has_edge(&self, u: NodeId, v: NodeId) -> bool {
        // run time complexity O(out_degree(u))
        self.neighbors_out[u as usize]
            .iter()
            .any(|edge| edge.neighbor == v)
    }

    /// Gives the weight of an existing edge.
    /// # Panics
    /// It panics when the edge is not in the graph.
    pub fn edge_weight(&self, u: NodeId, v: NodeId) -> EdgeWeight {
        self.neighbors_out[u as usize]
            .iter()
            .find(|edge| edge.neighbor == v)
            .expect("edge not in the graph")
            .weight
    }

    /// Gives the rank of an existing edge,
    /// [`RANK_INFINITY`](crate::graph::RANK_INFINITY) when not ranked yet.
    /// # Panics
    /// It panics when the edge is not in the graph.
    pub fn edge_rank(&self, u: NodeId, v: NodeId) -> EdgeRank {
        self.neighbors_out[u as usize]
            .iter()
            .find(|edge| edge.neighbor == v)
            .expect("edge not in the graph")
            .rank
    }

    /// Gives the records of the edges leaving a vertex.
    pub fn out_edges(&self, vertex: NodeId) -> &[EdgeInfo] {
        // run time complexity O(1)
        &self.neighbors_out[vertex as usize]
    }

    /// Gives the records of the edges entering a vertex.
    pub fn in_edges(&self, vertex: NodeId) -> &[EdgeInfo] {
        // run time complexity O(1)
        &self.neighbors_in[vertex as usize]
    }

    /// Visits the outgoing edges of a vertex whose rank is at least
    /// `threshold`. Once [`sort_edges`](Self::sort_edges) ran, the scan
    /// stops at the first edge below the threshold.
    /// ```
    /// use edge_hierarchies::graph::EdgeHierarchyGraph;
    /// let mut graph = EdgeHierarchyGraph::init(3);
    /// graph.add_edge(1, 0, 1);
    /// graph.add_edge(1, 2, 3);
    /// graph.set_edge_rank(1, 0, 2);
    /// graph.set_edge_rank(1, 2, 1);
    /// let high: Vec<_> = graph
    ///     .out_edges_with_min_rank(1, 2)
    ///     .map(|edge| edge.neighbor)
    ///     .collect();
    /// assert_eq!(high, vec![0]);
    /// ```
    pub fn out_edges_with_min_rank(
        &self,
        vertex: NodeId,
        threshold: EdgeRank,
    ) -> HighRankEdges<'_> {
        HighRankEdges {
            edges: self.out_edges(vertex),
            pos: 0,
            threshold,
            sorted: self.edges_sorted,
        }
    }

    /// Symmetric of [`out_edges_with_min_rank`](Self::out_edges_with_min_rank)
    /// for incoming edges.
    pub fn in_edges_with_min_rank(&self, vertex: NodeId, threshold: EdgeRank) -> HighRankEdges<'_> {
        HighRankEdges {
            edges: self.in_edges(vertex),
            pos: 0,
            threshold,
            sorted: self.edges_sorted,
        }
    }

    /// Whether [`sort_edges`](Self::sort_edges) already ran.
    pub fn edges_sorted(&self) -> bool {
        self.edges_sorted
    }

    /// Sorts every adjacency list by descending rank so that thresholded
    /// iteration can stop early. Run once, after construction assigned a
    /// finite rank to every edge.
    pub fn sort_edges(&mut self) {
        for v in 0..self.nb_vertices {
            self.neighbors_out[v].sort_by(|i, j| j.rank.cmp(&i.rank));
            self.neighbors_in[v].sort_by(|i, j| j.rank.cmp(&i.rank));
        }
        self.edges_sorted = true;
    }

    /// Builds the edge graph modelling turn costs: one vertex per original
    /// outgoing edge, and an arc from the vertex of `(u, v)` to the vertex
    /// of `(v, x)` for every edge `(v, x)`, weighted by the weight of
    /// `(u, v)`, increased by `u_turn_penalty` when `x == u`.
    /// ```
    /// use edge_hierarchies::graph::EdgeHierarchyGraph;
    /// let mut graph = EdgeHierarchyGraph::init(2);
    /// graph.add_edge(0, 1, 1);
    /// graph.add_edge(1, 0, 1);
    /// let turn_graph = graph.turn_cost_graph(100);
    /// assert_eq!(turn_graph.nb_vertices(), 2);
    /// // both arcs are u-turns
    /// assert_eq!(turn_graph.edge_weight(0, 1), 101);
    /// assert_eq!(turn_graph.edge_weight(1, 0), 101);
    /// ```
    pub fn turn_cost_graph(&self, u_turn_penalty: EdgeWeight) -> Self {
        // vertex of the i-th outgoing edge of u is node_begin[u] + i
        let mut node_begin = Vec::with_capacity(self.nb_vertices + 1);
        node_begin.push(0_usize);
        for u in 0..self.nb_vertices {
            node_begin.push(node_begin[u] + self.out_degree(u as NodeId));
        }

        let mut result = Self::init(node_begin[self.nb_vertices]);
        for u in 0..self.nb_vertices {
            for (u_pos, edge) in self.neighbors_out[u].iter().enumerate() {
                let u_new = (node_begin[u] + u_pos) as NodeId;
                let v = edge.neighbor as usize;
                for (v_pos, next_edge) in self.neighbors_out[v].iter().enumerate() {
                    let v_new = (node_begin[v] + v_pos) as NodeId;
                    let mut weight = edge.weight;
                    if next_edge.neighbor as usize == u {
                        weight += u_turn_penalty;
                    }
                    result.add_edge(u_new, v_new, weight);
                }
            }
        }
        result
    }

    /// Gives the permutation renumbering vertices in depth-first order over
    /// the out-adjacency, post-order by default and pre-order on request.
    /// The search is iterative on an explicit stack so that million-vertex
    /// graphs do not exhaust the thread stack. `order[v]` is the new number
    /// of vertex `v`; every vertex receives exactly one number.
    pub fn dfs_order(&self, pre_order: bool) -> Vec<NodeId> {
        let nb = self.nb_vertices;
        let mut order = vec![INVALID_NODE; nb];
        let mut visited = bitvec![0; nb];
        let mut stack = Vec::<(NodeId, usize)>::new();
        let mut next_number: NodeId = 0;

        for root in 0..nb {
            if visited[root] {
                continue;
            }
            visited.set(root, true);
            if pre_order {
                order[root] = next_number;
                next_number += 1;
            }
            stack.push((root as NodeId, 0));
            while let Some((v, i)) = stack.pop() {
                if let Some(edge) = self.neighbors_out[v as usize].get(i) {
                    stack.push((v, i + 1));
                    let w = edge.neighbor;
                    if !visited[w as usize] {
                        visited.set(w as usize, true);
                        if pre_order {
                            order[w as usize] = next_number;
                            next_number += 1;
                        }
                        stack.push((w, 0));
                    }
                } else if !pre_order {
                    order[v as usize] = next_number;
                    next_number += 1;
                }
            }
        }
        order
    }

    /// Renumbers the vertices in depth-first order and freezes the result
    /// into a [`QueryGraph`] holding the permutation, with every adjacency
    /// rank-sorted and packed consecutively.
    pub fn to_query_graph(&self, pre_order: bool) -> QueryGraph {
        QueryGraph::from_graph_with_order(self, self.dfs_order(pre_order))
    }
}
