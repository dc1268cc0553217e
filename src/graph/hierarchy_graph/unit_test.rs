#[cfg(test)]
mod tests {
    use super::super::*;
    use crate::query::Dijkstra;

    #[test]
    fn test_has_correct_size_without_edges() {
        let graph = EdgeHierarchyGraph::init(5);
        assert_eq!(graph.nb_vertices(), 5);
        assert_eq!(graph.nb_edges(), 0);
        for v in 0..5 {
            assert_eq!(graph.in_degree(v), 0);
            assert_eq!(graph.out_degree(v), 0);
        }
    }

    #[test]
    fn test_add_edge_degree() {
        let mut graph = EdgeHierarchyGraph::init(5);
        graph.add_edge(1, 2, 1);
        graph.add_edge(2, 1, 1);
        graph.add_edge(2, 3, 1);
        graph.add_edge(4, 3, 1);

        assert_eq!(graph.nb_edges(), 4);

        assert_eq!(graph.in_degree(0), 0);
        assert_eq!(graph.out_degree(0), 0);

        assert_eq!(graph.in_degree(1), 1);
        assert_eq!(graph.out_degree(1), 1);

        assert_eq!(graph.in_degree(2), 1);
        assert_eq!(graph.out_degree(2), 2);

        assert_eq!(graph.in_degree(3), 2);
        assert_eq!(graph.out_degree(3), 0);

        assert_eq!(graph.in_degree(4), 0);
        assert_eq!(graph.out_degree(4), 1);
    }

    #[test]
    fn test_add_edge_has_edge() {
        let mut graph = EdgeHierarchyGraph::init(5);
        graph.add_edge(1, 2, 1);
        graph.add_edge(2, 1, 1);
        graph.add_edge(2, 3, 1);
        graph.add_edge(4, 3, 1);

        assert!(graph.has_edge(1, 2));
        assert!(graph.has_edge(2, 1));
        assert!(graph.has_edge(2, 3));
        assert!(graph.has_edge(4, 3));

        assert!(!graph.has_edge(3, 2));
        assert!(!graph.has_edge(0, 0));
    }

    #[test]
    #[should_panic]
    fn test_add_edge_twice() {
        let mut graph = EdgeHierarchyGraph::init(3);
        graph.add_edge(0, 1, 1);
        graph.add_edge(0, 1, 2);
    }

    fn assert_mirrored(graph: &EdgeHierarchyGraph) {
        for u in 0..graph.nb_vertices() {
            for edge in graph.out_edges(u as NodeId) {
                let mirrored = graph
                    .in_edges(edge.neighbor)
                    .iter()
                    .find(|back| back.neighbor == u as NodeId)
                    .expect("missing mirrored in-record");
                assert_eq!(mirrored.weight, edge.weight);
                assert_eq!(mirrored.rank, edge.rank);
            }
            for edge in graph.in_edges(u as NodeId) {
                assert!(graph
                    .out_edges(edge.neighbor)
                    .iter()
                    .any(|forth| forth.neighbor == u as NodeId));
            }
        }
    }

    #[test]
    fn test_adjacencies_stay_mirrored() {
        let mut graph = EdgeHierarchyGraph::init(4);
        graph.add_edge(0, 1, 4);
        graph.add_edge(1, 2, 3);
        graph.add_edge(1, 0, 1);
        graph.add_edge(3, 1, 9);
        assert_mirrored(&graph);

        graph.decrease_edge_weight(3, 1, 2);
        graph.set_edge_rank(1, 2, 1);
        graph.set_edge_rank(0, 1, 2);
        assert_mirrored(&graph);

        graph.sort_edges();
        assert_mirrored(&graph);
    }

    #[test]
    fn test_decrease_edge_weight_never_increases() {
        let mut graph = EdgeHierarchyGraph::init(2);
        graph.add_edge(0, 1, 5);
        graph.decrease_edge_weight(0, 1, 7);
        assert_eq!(graph.edge_weight(0, 1), 5);
        graph.decrease_edge_weight(0, 1, 2);
        assert_eq!(graph.edge_weight(0, 1), 2);
        graph.decrease_edge_weight(0, 1, 3);
        assert_eq!(graph.edge_weight(0, 1), 2);
    }

    #[test]
    fn test_edge_ranks() {
        let mut graph = EdgeHierarchyGraph::init(3);
        graph.add_edge(0, 1, 4);
        graph.add_edge(1, 2, 3);
        graph.add_edge(1, 0, 1);

        graph.set_edge_rank(1, 2, 1);
        graph.set_edge_rank(1, 0, 2);

        assert_eq!(graph.edge_rank(0, 1), RANK_INFINITY);
        assert_eq!(graph.edge_rank(1, 2), 1);
        assert_eq!(graph.edge_rank(1, 0), 2);

        fn collect(edges: HighRankEdges<'_>) -> Vec<(NodeId, EdgeRank, EdgeWeight)> {
            edges.map(|e| (e.neighbor, e.rank, e.weight)).collect()
        }

        // outgoing edges
        let mut result = collect(graph.out_edges_with_min_rank(0, 0));
        assert_eq!(result, vec![(1, RANK_INFINITY, 4)]);

        result = collect(graph.out_edges_with_min_rank(0, RANK_INFINITY));
        assert_eq!(result, vec![(1, RANK_INFINITY, 4)]);

        result = collect(graph.out_edges_with_min_rank(1, 1));
        result.sort_unstable();
        assert_eq!(result, vec![(0, 2, 1), (2, 1, 3)]);

        result = collect(graph.out_edges_with_min_rank(1, 2));
        assert_eq!(result, vec![(0, 2, 1)]);

        result = collect(graph.out_edges_with_min_rank(1, 3));
        assert!(result.is_empty());

        // incoming edges
        result = collect(graph.in_edges_with_min_rank(0, 1));
        assert_eq!(result, vec![(1, 2, 1)]);

        result = collect(graph.in_edges_with_min_rank(0, 3));
        assert!(result.is_empty());

        result = collect(graph.in_edges_with_min_rank(0, RANK_INFINITY));
        assert!(result.is_empty());
    }

    #[test]
    fn test_sort_edges_short_circuits() {
        let mut graph = EdgeHierarchyGraph::init(4);
        graph.add_edge(0, 1, 1);
        graph.add_edge(0, 2, 1);
        graph.add_edge(0, 3, 1);
        graph.set_edge_rank(0, 1, 1);
        graph.set_edge_rank(0, 2, 3);
        graph.set_edge_rank(0, 3, 2);
        graph.sort_edges();

        let ranks: Vec<_> = graph.out_edges(0).iter().map(|e| e.rank).collect();
        assert_eq!(ranks, vec![3, 2, 1]);

        let high: Vec<_> = graph
            .out_edges_with_min_rank(0, 2)
            .map(|e| e.rank)
            .collect();
        assert_eq!(high, vec![3, 2]);
    }

    #[test]
    fn test_turn_cost_graph() {
        // 4-cycle with both orientations, unit weights
        let mut graph = EdgeHierarchyGraph::init(4);
        graph.add_edge(0, 1, 1);
        graph.add_edge(1, 2, 1);
        graph.add_edge(2, 3, 1);
        graph.add_edge(3, 0, 1);
        graph.add_edge(1, 0, 1);
        graph.add_edge(2, 1, 1);
        graph.add_edge(3, 2, 1);
        graph.add_edge(0, 3, 1);

        let turn_graph = graph.turn_cost_graph(100);
        // one vertex per original edge
        assert_eq!(turn_graph.nb_vertices(), 8);
        assert_eq!(turn_graph.nb_edges(), 16);

        // insertion order fixes the edge vertex numbers: (0,1) is vertex 0,
        // (0,3) is vertex 1, (1,2) is 2, (1,0) is 3, (3,0) is 6
        assert_eq!(turn_graph.edge_weight(0, 2), 1);
        assert_eq!(turn_graph.edge_weight(0, 3), 101);

        let mut dijkstra = Dijkstra::init(turn_graph.nb_vertices());
        // around the cycle without any u-turn
        assert_eq!(dijkstra.distance(&turn_graph, 0, 6), 3);
        // u-turn at vertex 1 costs its penalty on top of both traversals
        assert_eq!(dijkstra.distance(&turn_graph, 0, 1), 102);
    }

    #[test]
    fn test_dfs_order_is_a_permutation() {
        let mut graph = EdgeHierarchyGraph::init(7);
        graph.add_edge(0, 2, 1);
        graph.add_edge(2, 4, 1);
        graph.add_edge(4, 0, 1);
        graph.add_edge(1, 3, 1);
        graph.add_edge(5, 1, 1);
        // vertex 6 stays isolated

        for pre_order in [false, true] {
            let order = graph.dfs_order(pre_order);
            assert_eq!(order.len(), 7);
            let mut seen = vec![false; 7];
            for &new_id in &order {
                assert!((new_id as usize) < 7);
                assert!(!seen[new_id as usize], "duplicate new id");
                seen[new_id as usize] = true;
            }
            // applying the inverse recovers the original ids
            let mut inverse = vec![0; 7];
            for (old_id, &new_id) in order.iter().enumerate() {
                inverse[new_id as usize] = old_id;
            }
            for old_id in 0..7 {
                assert_eq!(inverse[order[old_id] as usize], old_id);
            }
        }
    }

    #[test]
    fn test_dfs_order_chain() {
        let mut graph = EdgeHierarchyGraph::init(3);
        graph.add_edge(0, 1, 1);
        graph.add_edge(1, 2, 1);

        assert_eq!(graph.dfs_order(true), vec![0, 1, 2]);
        // post-order numbers the deepest vertex first
        assert_eq!(graph.dfs_order(false), vec![2, 1, 0]);
    }
}
