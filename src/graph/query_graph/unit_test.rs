#[cfg(test)]
mod tests {
    use super::super::*;
    use crate::graph::RANK_INFINITY;

    fn ranked_star() -> EdgeHierarchyGraph {
        let mut graph = EdgeHierarchyGraph::init(5);
        graph.add_edge(0, 1, 1);
        graph.add_edge(0, 2, 2);
        graph.add_edge(0, 3, 3);
        graph.add_edge(4, 0, 4);
        graph.set_edge_rank(0, 1, 1);
        graph.set_edge_rank(0, 2, 3);
        graph.set_edge_rank(0, 3, 2);
        graph.set_edge_rank(4, 0, 4);
        graph
    }

    #[test]
    fn test_identity_freeze_sorts_by_descending_rank() {
        let graph = ranked_star();
        let frozen = QueryGraph::from_graph_with_order(&graph, vec![0, 1, 2, 3, 4]);
        assert_eq!(frozen.nb_vertices(), 5);
        assert_eq!(frozen.nb_edges(), 4);

        let ranks: Vec<_> = frozen.out_edges(0).iter().map(|e| e.rank).collect();
        assert_eq!(ranks, vec![3, 2, 1]);
        let in_ranks: Vec<_> = frozen.in_edges(0).iter().map(|e| e.rank).collect();
        assert_eq!(in_ranks, vec![4]);
    }

    #[test]
    fn test_thresholded_iteration_is_exact_and_ordered() {
        let graph = ranked_star();
        let frozen = QueryGraph::from_graph_with_order(&graph, vec![0, 1, 2, 3, 4]);

        let visited: Vec<_> = frozen
            .out_edges_with_min_rank(0, 2)
            .map(|e| (e.neighbor, e.rank))
            .collect();
        assert_eq!(visited, vec![(2, 3), (3, 2)]);

        assert_eq!(frozen.out_edges_with_min_rank(0, 4).count(), 0);
        assert_eq!(frozen.out_edges_with_min_rank(0, 0).count(), 3);
        assert_eq!(frozen.in_edges_with_min_rank(0, 4).count(), 1);
        assert_eq!(frozen.in_edges_with_min_rank(1, 0).count(), 1);
    }

    #[test]
    fn test_permutation_is_applied_to_both_endpoints() {
        let graph = ranked_star();
        // send 0 to the back
        let node_map = vec![4, 0, 1, 2, 3];
        let frozen = QueryGraph::from_graph_with_order(&graph, node_map);

        assert_eq!(frozen.internal_node(0), 4);
        assert_eq!(frozen.external_node(4), 0);
        for external in 0..5 {
            assert_eq!(
                frozen.external_node(frozen.internal_node(external)),
                external
            );
        }

        let neighbors: Vec<_> = frozen.out_edges(4).iter().map(|e| e.neighbor).collect();
        // old neighbors 2, 3, 1 by descending rank, renumbered
        assert_eq!(neighbors, vec![1, 2, 0]);
    }

    #[test]
    #[should_panic]
    fn test_rejects_non_permutation() {
        let graph = ranked_star();
        QueryGraph::from_graph_with_order(&graph, vec![0, 0, 1, 2, 3]);
    }

    #[test]
    fn test_limited_adjacency_prefix() {
        let mut graph = EdgeHierarchyGraph::init(5);
        for v in 1..5 {
            graph.add_edge(0, v, v);
            graph.set_edge_rank(0, v, v);
        }
        let frozen = QueryGraph::from_graph_with_order(&graph, vec![0, 1, 2, 3, 4]);

        assert_eq!(frozen.out_edges_limited(0, 100).len(), 4);
        assert_eq!(frozen.out_edges_limited(0, 50).len(), 2);
        assert_eq!(frozen.out_edges_limited(0, 49).len(), 1);
        assert_eq!(frozen.out_edges_limited(0, 0).len(), 0);
        // the prefix keeps the highest ranks
        assert_eq!(frozen.out_edges_limited(0, 50)[0].rank, 4);
        assert_eq!(frozen.in_edges_limited(1, 100).len(), 1);
    }

    #[test]
    fn test_unranked_edges_freeze_with_infinite_rank() {
        let mut graph = EdgeHierarchyGraph::init(2);
        graph.add_edge(0, 1, 7);
        let frozen = QueryGraph::from_graph_with_order(&graph, vec![0, 1]);
        assert_eq!(frozen.out_edges(0)[0].rank, RANK_INFINITY);
    }
}
