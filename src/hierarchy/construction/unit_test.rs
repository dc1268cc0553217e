#[cfg(test)]
mod tests {
    use super::super::*;
    use crate::hierarchy::ShortcutCountingRoundsEdgeRanker;
    use std::collections::VecDeque;

    // ranks edges in the order they entered the graph; enough to exercise
    // the driver without depending on a scoring strategy
    struct InsertionOrderEdgeRanker {
        edge_queue: VecDeque<(NodeId, NodeId)>,
    }

    impl InsertionOrderEdgeRanker {
        fn init(graph: &EdgeHierarchyGraph) -> Self {
            let mut edge_queue = VecDeque::new();
            for u in 0..graph.nb_vertices() {
                for edge in graph.out_edges(u as NodeId) {
                    edge_queue.push_back((u as NodeId, edge.neighbor));
                }
            }
            Self { edge_queue }
        }
    }

    impl EdgeRanker for InsertionOrderEdgeRanker {
        fn add_edge(&mut self, _graph: &EdgeHierarchyGraph, u: NodeId, v: NodeId) {
            self.edge_queue.push_back((u, v));
        }

        fn update_edge(&mut self, _graph: &EdgeHierarchyGraph, _u: NodeId, _v: NodeId) {}

        fn has_next(&self) -> bool {
            !self.edge_queue.is_empty()
        }

        fn next_edge(&mut self, _graph: &mut EdgeHierarchyGraph) -> (NodeId, NodeId) {
            self.edge_queue.pop_front().expect("checked by has_next")
        }
    }

    fn all_pairs_match_oracle(graph: &EdgeHierarchyGraph, original: &EdgeHierarchyGraph) {
        let mut query = EdgeHierarchyQuery::init(graph.nb_vertices());
        let mut oracle = crate::query::Dijkstra::init(original.nb_vertices());
        for s in 0..graph.nb_vertices() as NodeId {
            let distances = oracle.one_to_all(original, s);
            for t in 0..graph.nb_vertices() as NodeId {
                assert_eq!(
                    query.distance(graph, s, t),
                    distances[t as usize],
                    "wrong distance for {s} and {t}"
                );
            }
        }
    }

    #[test]
    fn test_set_edge_rank_adds_a_shortcut() {
        let mut graph = EdgeHierarchyGraph::init(4);
        graph.add_edge(0, 1, 1);
        graph.add_edge(1, 2, 1);
        graph.add_edge(2, 3, 1);

        let ranker = InsertionOrderEdgeRanker::init(&graph);
        let mut construction = EdgeHierarchyConstruction::init(&graph, ranker);

        construction.set_edge_rank(&mut graph, 1, 2, 1);

        assert_eq!(graph.edge_rank(1, 2), 1);
        assert!(graph.has_edge(0, 2) || graph.has_edge(1, 3));
        if graph.has_edge(0, 2) {
            assert_eq!(graph.edge_rank(0, 2), RANK_INFINITY);
            assert_eq!(graph.edge_weight(0, 2), 2);
        } else {
            assert_eq!(graph.edge_rank(1, 3), RANK_INFINITY);
            assert_eq!(graph.edge_weight(1, 3), 2);
        }

        let mut query = EdgeHierarchyQuery::init(graph.nb_vertices());
        assert_eq!(query.distance(&graph, 0, 3), 3);
    }

    #[test]
    fn test_set_edge_rank_with_an_equal_witness_adds_nothing() {
        let mut graph = EdgeHierarchyGraph::init(4);
        graph.add_edge(0, 1, 1);
        graph.add_edge(1, 2, 1);
        graph.add_edge(2, 3, 1);
        graph.add_edge(0, 3, 3);

        let ranker = InsertionOrderEdgeRanker::init(&graph);
        let mut construction = EdgeHierarchyConstruction::init(&graph, ranker);

        construction.set_edge_rank(&mut graph, 1, 2, 1);

        assert_eq!(graph.edge_rank(1, 2), 1);
        assert!(!graph.has_edge(0, 2));
        assert!(!graph.has_edge(1, 3));

        let mut query = EdgeHierarchyQuery::init(graph.nb_vertices());
        assert_eq!(query.distance(&graph, 0, 3), 3);
    }

    #[test]
    fn test_run_bidirectional_chain() {
        let mut graph = EdgeHierarchyGraph::init(10);
        for v in 0..9 {
            graph.add_edge(v, v + 1, 1);
            graph.add_edge(v + 1, v, 1);
        }
        let original = graph.clone();

        let ranker = InsertionOrderEdgeRanker::init(&graph);
        let mut construction = EdgeHierarchyConstruction::init(&graph, ranker);
        construction.run(&mut graph);

        for u in 0..graph.nb_vertices() as NodeId {
            for edge in graph.out_edges(u) {
                assert!(edge.rank < RANK_INFINITY);
            }
        }
        assert_eq!(original.nb_edges(), 18);
        all_pairs_match_oracle(&graph, &original);
    }

    #[test]
    fn test_ranks_are_assigned_once_each() {
        let mut graph = EdgeHierarchyGraph::init(6);
        graph.add_edge(0, 1, 2);
        graph.add_edge(1, 2, 2);
        graph.add_edge(2, 3, 1);
        graph.add_edge(3, 4, 4);
        graph.add_edge(4, 5, 1);
        graph.add_edge(0, 5, 20);
        graph.add_edge(5, 0, 3);

        let ranker = ShortcutCountingRoundsEdgeRanker::init(&graph);
        let mut construction = EdgeHierarchyConstruction::init(&graph, ranker);
        construction.run(&mut graph);

        // every edge ends up with a finite rank and no rank is reused; the
        // values may have gaps when a decreased edge was re-ranked
        let mut ranks: Vec<EdgeRank> = Vec::new();
        for u in 0..graph.nb_vertices() as NodeId {
            for edge in graph.out_edges(u) {
                assert!(edge.rank < RANK_INFINITY);
                ranks.push(edge.rank);
            }
        }
        assert_eq!(ranks.len(), graph.nb_edges());
        ranks.sort_unstable();
        ranks.dedup();
        assert_eq!(ranks.len(), graph.nb_edges());
    }

    #[test]
    fn test_no_self_loops() {
        let mut graph = EdgeHierarchyGraph::init(3);
        graph.add_edge(0, 1, 1);
        graph.add_edge(1, 2, 1);
        graph.add_edge(2, 0, 1);

        let ranker = InsertionOrderEdgeRanker::init(&graph);
        let mut construction = EdgeHierarchyConstruction::init(&graph, ranker);
        construction.run(&mut graph);

        assert!(!graph.has_edge(0, 0));
        assert!(!graph.has_edge(1, 1));
        assert!(!graph.has_edge(2, 2));
    }

    // both graphs once triggered a duplicate shortcut insertion
    #[test]
    fn test_no_duplicate_shortcut() {
        {
            let mut graph = EdgeHierarchyGraph::init(4);
            graph.add_edge(0, 1, 1);
            graph.add_edge(2, 1, 4);
            graph.add_edge(2, 0, 1);
            graph.add_edge(1, 3, 1);

            let ranker = InsertionOrderEdgeRanker::init(&graph);
            let mut construction = EdgeHierarchyConstruction::init(&graph, ranker);
            construction.set_edge_rank(&mut graph, 0, 1, 1);
        }
        {
            let mut graph = EdgeHierarchyGraph::init(4);
            graph.add_edge(0, 1, 1);
            graph.add_edge(1, 2, 1);
            graph.add_edge(2, 3, 1);
            graph.add_edge(1, 3, 4);

            let ranker = InsertionOrderEdgeRanker::init(&graph);
            let mut construction = EdgeHierarchyConstruction::init(&graph, ranker);
            construction.set_edge_rank(&mut graph, 0, 1, 1);
        }
    }

    #[test]
    fn test_decrease_reenters_a_ranked_edge() {
        let mut graph = EdgeHierarchyGraph::init(5);
        graph.add_edge(0, 1, 1);
        graph.add_edge(1, 2, 1);
        graph.add_edge(2, 3, 1);
        graph.add_edge(3, 4, 1);
        graph.add_edge(1, 3, 3);
        let original = graph.clone();

        let mut ranker = InsertionOrderEdgeRanker::init(&graph);
        ranker.edge_queue.clear();
        ranker.edge_queue.push_back((1, 3));
        ranker.edge_queue.push_back((2, 3));
        let mut construction = EdgeHierarchyConstruction::init(&graph, ranker);
        construction.run(&mut graph);

        // ranking (2, 3) decreases the ranked (1, 3) to weight 2, which
        // re-enters it into the hierarchy with a fresh larger rank
        assert_eq!(graph.edge_weight(1, 3), 2);
        all_pairs_match_oracle(&graph, &original);

        let mut query = EdgeHierarchyQuery::init(graph.nb_vertices());
        assert_eq!(query.distance(&graph, 0, 4), 4);
    }

    #[test]
    fn test_chain_needs_no_shortcuts() {
        let mut graph = EdgeHierarchyGraph::init(5);
        for v in 0..4 {
            graph.add_edge(v, v + 1, 1);
            graph.add_edge(v + 1, v, 1);
        }
        let original = graph.clone();

        let ranker = ShortcutCountingRoundsEdgeRanker::init(&graph);
        let mut construction = EdgeHierarchyConstruction::init(&graph, ranker);
        construction.run(&mut graph);

        assert_eq!(graph.nb_edges(), 8);
        all_pairs_match_oracle(&graph, &original);
    }
}
