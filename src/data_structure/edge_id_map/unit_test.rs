#[cfg(test)]
mod tests {
    use super::super::*;

    #[test]
    fn test_ids_are_dense_and_stable() {
        let mut ids = EdgeIdMap::new();
        assert_eq!(ids.edge_id(0, 1), 0);
        assert_eq!(ids.edge_id(1, 0), 1);
        assert_eq!(ids.edge_id(5, 2), 2);
        assert_eq!(ids.edge_id(0, 1), 0);
        assert_eq!(ids.edge_id(5, 2), 2);
        assert_eq!(ids.nb_edges(), 3);
    }

    #[test]
    fn test_reverse_lookup() {
        let mut ids = EdgeIdMap::new();
        let pairs = [(3, 4), (4, 3), (0, 9), (9, 0), (7, 7)];
        let allocated: Vec<_> = pairs.iter().map(|&(u, v)| ids.edge_id(u, v)).collect();
        for (id, &pair) in allocated.iter().zip(pairs.iter()) {
            assert_eq!(ids.edge(*id), pair);
        }
    }

    #[test]
    fn test_endpoints_do_not_collide() {
        // (1, 0) and (0, 1 << 31) would collide under a naive sum key
        let mut ids = EdgeIdMap::new();
        let first = ids.edge_id(1, 0);
        let second = ids.edge_id(0, 1 << 31);
        assert_ne!(first, second);
    }
}
