use crate::data_structure::TimestampFlags;
use crate::graph::{NodeId, INVALID_NODE};
use bitvec::prelude::*;

/// Minimum vertex cover of small bipartite edge sets, by König's theorem:
/// a maximum matching is computed with augmenting paths, then the vertices
/// reachable from the unmatched left side by alternating edges are marked,
/// and the cover is the unmarked left vertices plus the marked right ones.
///
/// All scratch arrays are allocated once, sized to the graph's node count,
/// and recycled across calls: after a call only the local state of the
/// vertices that actually appeared is cleared, so the cost per call stays
/// proportional to the input edge set.
/// ```
/// use edge_hierarchies::hierarchy::BipartiteMinimumVertexCover;
/// let mut cover = BipartiteMinimumVertexCover::init(6);
/// let edges = vec![(1, 5), (2, 5), (3, 4), (3, 5)];
/// assert_eq!(cover.minimum_vertex_cover_size(&edges), 2);
/// let (left, right) = cover.minimum_vertex_cover(&edges);
/// assert_eq!(left, vec![3]);
/// assert_eq!(right, vec![5]);
/// ```
#[derive(Debug, Clone)]
pub struct BipartiteMinimumVertexCover {
    nb_lhs: usize,
    nb_rhs: usize,
    // adjacency between local left and local right ids
    neighbors_lhs: Vec<Vec<NodeId>>,
    neighbors_rhs: Vec<Vec<NodeId>>,
    // global id -> local id, and back
    nodes_lhs: Vec<NodeId>,
    nodes_rhs: Vec<NodeId>,
    nodes_inverse_lhs: Vec<NodeId>,
    nodes_inverse_rhs: Vec<NodeId>,
    matching_partner_lhs: Vec<NodeId>,
    matching_partner_rhs: Vec<NodeId>,
    visited: TimestampFlags,
    marked_lhs: BitVec,
    marked_rhs: BitVec,
}

impl BipartiteMinimumVertexCover {
    /// Creates the recycled scratch for inputs over at most
    /// `max_nb_nodes` global vertex ids.
    pub fn init(max_nb_nodes: usize) -> Self {
        Self {
            nb_lhs: 0,
            nb_rhs: 0,
            neighbors_lhs: vec![Vec::new(); max_nb_nodes],
            neighbors_rhs: vec![Vec::new(); max_nb_nodes],
            nodes_lhs: vec![INVALID_NODE; max_nb_nodes],
            nodes_rhs: vec![INVALID_NODE; max_nb_nodes],
            nodes_inverse_lhs: vec![INVALID_NODE; max_nb_nodes],
            nodes_inverse_rhs: vec![INVALID_NODE; max_nb_nodes],
            matching_partner_lhs: vec![INVALID_NODE; max_nb_nodes],
            matching_partner_rhs: vec![INVALID_NODE; max_nb_nodes],
            visited: TimestampFlags::init(max_nb_nodes),
            marked_lhs: bitvec![0; max_nb_nodes],
            marked_rhs: bitvec![0; max_nb_nodes],
        }
    }

    /// Gives a minimum vertex cover of the bipartite edge set, split into
    /// its left-side and right-side global vertices. Every input edge is
    /// covered by at least one of the returned vertices and the total size
    /// is the smallest possible.
    pub fn minimum_vertex_cover(
        &mut self,
        edges: &[(NodeId, NodeId)],
    ) -> (Vec<NodeId>, Vec<NodeId>) {
        self.build_local_graph(edges);
        self.find_maximum_matching();
        self.mark_vertices();

        let mut left = Vec::new();
        for u in 0..self.nb_lhs {
            if !self.marked_lhs[u] {
                left.push(self.nodes_inverse_lhs[u]);
            }
        }
        let mut right = Vec::new();
        for v in 0..self.nb_rhs {
            if self.marked_rhs[v] {
                right.push(self.nodes_inverse_rhs[v]);
            }
        }
        debug_assert_eq!(left.len() + right.len(), self.matching_size());

        self.clean_up();
        (left, right)
    }

    /// Gives only the size of a minimum vertex cover, which by König's
    /// theorem equals the maximum matching cardinality. Cheaper than
    /// [`minimum_vertex_cover`](Self::minimum_vertex_cover) because the
    /// marking pass is skipped.
    pub fn minimum_vertex_cover_size(&mut self, edges: &[(NodeId, NodeId)]) -> usize {
        self.build_local_graph(edges);
        self.find_maximum_matching();
        let size = self.matching_size();
        self.clean_up();
        size
    }

    fn matching_size(&self) -> usize {
        self.matching_partner_lhs[..self.nb_lhs]
            .iter()
            .filter(|&&partner| partner != INVALID_NODE)
            .count()
    }

    fn build_local_graph(&mut self, edges: &[(NodeId, NodeId)]) {
        for &(u_global, v_global) in edges {
            let u = self.local_id(u_global, true);
            let v = self.local_id(v_global, false);
            self.neighbors_lhs[u as usize].push(v);
            self.neighbors_rhs[v as usize].push(u);
        }
    }

    fn local_id(&mut self, global: NodeId, lhs: bool) -> NodeId {
        let (count, nodes, inverse) = if lhs {
            (&mut self.nb_lhs, &mut self.nodes_lhs, &mut self.nodes_inverse_lhs)
        } else {
            (&mut self.nb_rhs, &mut self.nodes_rhs, &mut self.nodes_inverse_rhs)
        };
        if nodes[global as usize] == INVALID_NODE {
            nodes[global as usize] = *count as NodeId;
            inverse[*count] = global;
            *count += 1;
        }
        nodes[global as usize]
    }

    fn find_maximum_matching(&mut self) {
        // one augmenting attempt per left vertex suffices for maximality
        for u in 0..self.nb_lhs {
            if self.matching_partner_lhs[u] == INVALID_NODE {
                self.visited.reset_all();
                self.augment(u as NodeId);
            }
        }
    }

    // Augmenting-path search from an unmatched left vertex, iterative on an
    // explicit stack of (left vertex, right vertex it was entered through,
    // next neighbor index).
    fn augment(&mut self, root: NodeId) -> bool {
        let mut stack: Vec<(NodeId, NodeId, usize)> = vec![(root, INVALID_NODE, 0)];
        while let Some(&(u, _, i)) = stack.last() {
            let Some(&v) = self.neighbors_lhs[u as usize].get(i) else {
                stack.pop();
                continue;
            };
            stack.last_mut().expect("frame just read").2 = i + 1;
            if self.visited.is_set(v as usize) {
                continue;
            }
            self.visited.set(v as usize);
            if self.matching_partner_rhs[v as usize] == INVALID_NODE {
                // free right vertex: flip the matching along the path
                let mut right = v;
                while let Some((left, entered_through, _)) = stack.pop() {
                    self.matching_partner_rhs[right as usize] = left;
                    self.matching_partner_lhs[left as usize] = right;
                    if entered_through == INVALID_NODE {
                        break;
                    }
                    right = entered_through;
                }
                return true;
            }
            stack.push((self.matching_partner_rhs[v as usize], v, 0));
        }
        false
    }

    // König marking from every unmatched left vertex: unmatched left -> any
    // right -> its matching partner, iteratively.
    fn mark_vertices(&mut self) {
        let mut stack = Vec::new();
        for u in 0..self.nb_lhs {
            if self.matching_partner_lhs[u] == INVALID_NODE && !self.marked_lhs[u] {
                stack.push(u as NodeId);
                while let Some(left) = stack.pop() {
                    self.marked_lhs.set(left as usize, true);
                    for i in 0..self.neighbors_lhs[left as usize].len() {
                        let right = self.neighbors_lhs[left as usize][i];
                        if self.marked_rhs[right as usize] {
                            continue;
                        }
                        self.marked_rhs.set(right as usize, true);
                        // an unmatched right vertex here would be an
                        // augmenting path, impossible after matching
                        let partner = self.matching_partner_rhs[right as usize];
                        debug_assert_ne!(partner, INVALID_NODE);
                        stack.push(partner);
                    }
                }
            }
        }
    }

    fn clean_up(&mut self) {
        for local in 0..self.nb_lhs {
            let global = self.nodes_inverse_lhs[local];
            self.neighbors_lhs[local].clear();
            self.nodes_lhs[global as usize] = INVALID_NODE;
            self.nodes_inverse_lhs[local] = INVALID_NODE;
            self.matching_partner_lhs[local] = INVALID_NODE;
            self.marked_lhs.set(local, false);
        }
        for local in 0..self.nb_rhs {
            let global = self.nodes_inverse_rhs[local];
            self.neighbors_rhs[local].clear();
            self.nodes_rhs[global as usize] = INVALID_NODE;
            self.nodes_inverse_rhs[local] = INVALID_NODE;
            self.matching_partner_rhs[local] = INVALID_NODE;
            self.marked_rhs.set(local, false);
        }
        self.nb_lhs = 0;
        self.nb_rhs = 0;
    }
}
