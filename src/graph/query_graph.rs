#[cfg(test)]
mod unit_test;
use crate::graph::{EdgeHierarchyGraph, EdgeInfo, EdgeRank, HighRankEdges, NodeId};

/// Frozen, query-only rendition of a ranked [`EdgeHierarchyGraph`].
///
/// Vertices are renumbered by a permutation chosen for cache locality
/// (depth-first order in practice), every adjacency is sorted by descending
/// rank and both directions are packed into consecutive arrays. The
/// structure is immutable and safe to share between query objects.
#[derive(Debug, Clone)]
pub struct QueryGraph {
    nb_vertices: usize,
    nb_edges: usize,
    out_begin: Vec<usize>,
    in_begin: Vec<usize>,
    out_edges: Vec<EdgeInfo>,
    in_edges: Vec<EdgeInfo>,
    // new number of an original vertex, and its inverse
    node_map: Vec<NodeId>,
    reverse_node_map: Vec<NodeId>,
}

impl QueryGraph {
    /// Freezes `graph` under the vertex renumbering `node_map`, where
    /// `node_map[v]` is the new (internal) number of vertex `v`. Edges keep
    /// their weight and rank.
    /// # Panics
    /// It panics when `node_map` is not a permutation of the vertices.
    pub fn from_graph_with_order(graph: &EdgeHierarchyGraph, node_map: Vec<NodeId>) -> Self {
        let nb = graph.nb_vertices();
        assert_eq!(node_map.len(), nb, "node map should renumber every vertex");

        let mut reverse_node_map = vec![NodeId::MAX; nb];
        for (external, &internal) in node_map.iter().enumerate() {
            assert!(
                (internal as usize) < nb && reverse_node_map[internal as usize] == NodeId::MAX,
                "node map should be a permutation"
            );
            reverse_node_map[internal as usize] = external as NodeId;
        }

        let mut neighbors_out = vec![Vec::new(); nb];
        let mut neighbors_in = vec![Vec::new(); nb];
        for external in 0..nb {
            let internal = node_map[external] as usize;
            for edge in graph.out_edges(external as NodeId) {
                neighbors_out[internal].push(EdgeInfo {
                    neighbor: node_map[edge.neighbor as usize],
                    weight: edge.weight,
                    rank: edge.rank,
                });
            }
            for edge in graph.in_edges(external as NodeId) {
                neighbors_in[internal].push(EdgeInfo {
                    neighbor: node_map[edge.neighbor as usize],
                    weight: edge.weight,
                    rank: edge.rank,
                });
            }
        }

        let mut out_begin = Vec::with_capacity(nb + 1);
        let mut in_begin = Vec::with_capacity(nb + 1);
        let mut out_edges = Vec::with_capacity(graph.nb_edges());
        let mut in_edges = Vec::with_capacity(graph.nb_edges());
        for v in 0..nb {
            neighbors_out[v].sort_by(|i, j| j.rank.cmp(&i.rank));
            neighbors_in[v].sort_by(|i, j| j.rank.cmp(&i.rank));
            out_begin.push(out_edges.len());
            in_begin.push(in_edges.len());
            out_edges.append(&mut neighbors_out[v]);
            in_edges.append(&mut neighbors_in[v]);
        }
        out_begin.push(out_edges.len());
        in_begin.push(in_edges.len());

        Self {
            nb_vertices: nb,
            nb_edges: graph.nb_edges(),
            out_begin,
            in_begin,
            out_edges,
            in_edges,
            node_map,
            reverse_node_map,
        }
    }

    /// Returns the number of vertices in the graph.
    pub fn nb_vertices(&self) -> usize {
        self.nb_vertices
    }

    /// Returns the number of edges in the graph.
    pub fn nb_edges(&self) -> usize {
        self.nb_edges
    }

    /// Translates a caller-facing vertex number to the internal numbering.
    pub fn internal_node(&self, external: NodeId) -> NodeId {
        self.node_map[external as usize]
    }

    /// Translates an internal vertex number back to the caller-facing one.
    pub fn external_node(&self, internal: NodeId) -> NodeId {
        self.reverse_node_map[internal as usize]
    }

    /// Gives the records of the edges leaving a vertex, by descending rank.
    pub fn out_edges(&self, vertex: NodeId) -> &[EdgeInfo] {
        let v = vertex as usize;
        &self.out_edges[self.out_begin[v]..self.out_begin[v + 1]]
    }

    /// Gives the records of the edges entering a vertex, by descending rank.
    pub fn in_edges(&self, vertex: NodeId) -> &[EdgeInfo] {
        let v = vertex as usize;
        &self.in_edges[self.in_begin[v]..self.in_begin[v + 1]]
    }

    /// Visits the outgoing edges of a vertex whose rank is at least
    /// `threshold`, in descending rank order, stopping at the first edge
    /// below the threshold.
    pub fn out_edges_with_min_rank(
        &self,
        vertex: NodeId,
        threshold: EdgeRank,
    ) -> HighRankEdges<'_> {
        HighRankEdges {
            edges: self.out_edges(vertex),
            pos: 0,
            threshold,
            sorted: true,
        }
    }

    /// Symmetric of [`out_edges_with_min_rank`](Self::out_edges_with_min_rank)
    /// for incoming edges.
    pub fn in_edges_with_min_rank(&self, vertex: NodeId, threshold: EdgeRank) -> HighRankEdges<'_> {
        HighRankEdges {
            edges: self.in_edges(vertex),
            pos: 0,
            threshold,
            sorted: true,
        }
    }

    /// Gives a prefix of the outgoing adjacency covering `percent` percent
    /// of its records, the highest ranks first. Used by the stall scan to
    /// bound how much of the adjacency it inspects.
    pub fn out_edges_limited(&self, vertex: NodeId, percent: usize) -> &[EdgeInfo] {
        let edges = self.out_edges(vertex);
        &edges[..edges.len() * percent / 100]
    }

    /// Symmetric of [`out_edges_limited`](Self::out_edges_limited) for
    /// incoming edges.
    pub fn in_edges_limited(&self, vertex: NodeId, percent: usize) -> &[EdgeInfo] {
        let edges = self.in_edges(vertex);
        &edges[..edges.len() * percent / 100]
    }
}
