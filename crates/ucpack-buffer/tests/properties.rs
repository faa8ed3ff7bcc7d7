use proptest::prelude::*;
use ucpack_buffer::RingBuffer;

proptest! {
    #[test]
    fn fifo_order_within_capacity(
        capacity in 1usize..64,
        seed in proptest::collection::vec(any::<u8>(), 0..64),
    ) {
        let bytes = &seed[..seed.len().min(capacity)];
        let mut ring = RingBuffer::new(capacity).unwrap();
        for &b in bytes {
            ring.push(b);
        }

        prop_assert_eq!(ring.len(), bytes.len());
        prop_assert_eq!(ring.is_full(), bytes.len() == capacity);

        let mut popped = Vec::new();
        while let Some(b) = ring.pop() {
            popped.push(b);
        }
        prop_assert_eq!(popped.as_slice(), bytes);
        prop_assert!(ring.is_empty());
    }

    #[test]
    fn overflow_keeps_last_capacity_bytes(
        capacity in 1usize..32,
        extra in 1usize..96,
        fill in any::<u8>(),
    ) {
        let total = capacity + extra;
        let bytes: Vec<u8> = (0..total).map(|i| fill.wrapping_add(i as u8)).collect();

        let mut ring = RingBuffer::new(capacity).unwrap();
        for &b in &bytes {
            ring.push(b);
        }

        prop_assert_eq!(ring.len(), capacity);
        prop_assert!(ring.is_full());
        let survivors = &bytes[total - capacity..];
        for (i, &expected) in survivors.iter().enumerate() {
            prop_assert_eq!(ring[i], expected);
        }
    }

    #[test]
    fn insert_matches_repeated_push(
        capacity in 1usize..32,
        prefix in proptest::collection::vec(any::<u8>(), 0..32),
        batch in proptest::collection::vec(any::<u8>(), 0..96),
    ) {
        let mut pushed = RingBuffer::new(capacity).unwrap();
        let mut inserted = RingBuffer::new(capacity).unwrap();
        for &b in &prefix {
            pushed.push(b);
            inserted.push(b);
        }

        for &b in &batch {
            pushed.push(b);
        }
        inserted.insert(&batch);

        prop_assert_eq!(pushed.len(), inserted.len());
        prop_assert_eq!(
            pushed.iter().collect::<Vec<_>>(),
            inserted.iter().collect::<Vec<_>>()
        );
    }

    #[test]
    fn interleaved_push_pop_matches_model(
        capacity in 1usize..16,
        ops in proptest::collection::vec(proptest::option::of(any::<u8>()), 0..200),
    ) {
        let mut ring = RingBuffer::new(capacity).unwrap();
        let mut model = std::collections::VecDeque::new();

        for op in ops {
            match op {
                Some(b) => {
                    if model.len() == capacity {
                        model.pop_front();
                    }
                    model.push_back(b);
                    ring.push(b);
                }
                None => {
                    prop_assert_eq!(ring.pop(), model.pop_front());
                }
            }
            prop_assert_eq!(ring.len(), model.len());
            prop_assert_eq!(ring.top(), model.front().copied());
        }
    }
}
