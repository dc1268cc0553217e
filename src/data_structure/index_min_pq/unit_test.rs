#[cfg(test)]
mod tests {
    use super::super::*;
    use rand::Rng;

    #[test]
    fn test_push_pop_sorted() {
        let len = 100000;
        let mut rng = rand::thread_rng();
        let mut queue = IndexMinPriorityQueue::init(len);
        assert!(queue.is_empty());
        for id in 0..len {
            queue.push(id, rng.gen::<u32>());
        }
        assert_eq!(queue.len(), len);
        let mut previous = 0;
        while let Some((_, key)) = queue.pop() {
            assert!(key >= previous);
            previous = key;
        }
        assert!(queue.is_empty());
    }

    #[test]
    fn test_decrease_key_moves_to_front() {
        let mut queue = IndexMinPriorityQueue::init(6);
        queue.push(0, 50);
        queue.push(1, 40);
        queue.push(2, 30);
        queue.push(5, 20);
        assert_eq!(queue.peek(), Some((5, 20)));
        queue.decrease_key(0, 10);
        assert_eq!(queue.key_of(0), 10);
        assert_eq!(queue.pop(), Some((0, 10)));
        assert!(!queue.contains(0));
        assert!(queue.contains(5));
    }

    #[test]
    fn test_increase_key_moves_back() {
        let mut queue = IndexMinPriorityQueue::init(4);
        queue.push(0, 1);
        queue.push(1, 2);
        queue.push(2, 3);
        queue.increase_key(0, 10);
        assert_eq!(queue.pop(), Some((1, 2)));
        assert_eq!(queue.pop(), Some((2, 3)));
        assert_eq!(queue.pop(), Some((0, 10)));
    }

    #[test]
    fn test_clear_then_reuse() {
        let mut queue = IndexMinPriorityQueue::init(3);
        queue.push(1, 5);
        queue.push(2, 4);
        queue.clear();
        assert!(queue.is_empty());
        assert!(!queue.contains(1));
        queue.push(1, 9);
        assert_eq!(queue.pop(), Some((1, 9)));
    }

    #[test]
    fn test_positions_consistent_under_mixed_operations() {
        let len = 1000;
        let mut rng = rand::thread_rng();
        let mut queue = IndexMinPriorityQueue::init(len);
        for id in 0..len {
            queue.push(id, rng.gen_range(0..1000000));
        }
        for _ in 0..len {
            let id = rng.gen_range(0..len);
            if queue.contains(id) {
                let key = queue.key_of(id);
                queue.decrease_key(id, key / 2);
            }
        }
        for (pos, &(id, _)) in queue.heap.iter().enumerate() {
            assert_eq!(queue.position[id], pos);
        }
    }

    #[test]
    #[should_panic]
    fn test_push_twice() {
        let mut queue = IndexMinPriorityQueue::init(2);
        queue.push(0, 1);
        queue.push(0, 2);
    }
}
