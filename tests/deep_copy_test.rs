use chaincopy::{Chain, ChainedTable};

const LONG_CHAIN: usize = 100_000;

fn numbered(n: usize) -> Chain<usize, String> {
    (0..n).map(|i| (i, format!("v{i}"))).collect()
}

#[test]
fn test_copy_preserves_length_and_order() {
    for n in [0, 1, 2, 17, 1000] {
        let original = numbered(n);
        let copy = original.deep_copy();

        assert_eq!(copy.len(), n);
        assert!(copy.iter().eq(original.iter()), "mismatch for length {n}");
    }
}

#[test]
fn test_copy_shares_no_entries() {
    let original = numbered(64);
    let copy = original.clone();

    let mut left = original.head();
    let mut right = copy.head();
    let mut visited = 0;
    while let (Some(a), Some(b)) = (left, right) {
        assert!(!std::ptr::eq(a, b));
        assert!(!std::ptr::eq(a.value(), b.value()));
        left = a.next();
        right = b.next();
        visited += 1;
    }
    assert_eq!(visited, 64);
}

#[test]
fn test_mutating_copy_leaves_original() {
    let original = numbered(10);
    let mut copy = original.clone();

    for (_, value) in copy.iter_mut() {
        value.push_str("-copy");
    }
    copy.insert(3, String::from("replaced"));
    copy.remove(&7);

    assert_eq!(original, numbered(10));
    assert_eq!(copy.get(&3).map(String::as_str), Some("replaced"));
    assert_eq!(copy.get(&0).map(String::as_str), Some("v0-copy"));
    assert!(!copy.contains_key(&7));
}

#[test]
fn test_mutating_original_leaves_copy() {
    let mut original = numbered(10);
    let copy = original.clone();

    if let Some(value) = original.get_mut(&5) {
        value.clear();
    }
    original.push_front(99, String::from("new"));

    assert_eq!(copy, numbered(10));
    assert_eq!(copy.get(&5).map(String::as_str), Some("v5"));
}

#[test]
fn test_long_chain_copy_and_drop() {
    let original: Chain<usize, usize> = (0..LONG_CHAIN).map(|i| (i, i)).collect();
    let copy = original.clone();

    assert_eq!(copy.len(), LONG_CHAIN);
    assert!(copy.iter().zip(0..).all(|((k, v), i)| *k == i && *v == i));

    drop(original);
    assert_eq!(copy.iter().last(), Some((&(LONG_CHAIN - 1), &(LONG_CHAIN - 1))));
    drop(copy);
}

#[test]
fn test_long_chain_into_iter() {
    let chain: Chain<usize, ()> = (0..LONG_CHAIN).map(|i| (i, ())).collect();
    let mut iter = chain.into_iter();
    assert_eq!(iter.next(), Some((0, ())));
    // Dropping a half-consumed iterator tears down the rest of the chain.
    drop(iter);
}

#[test]
fn test_table_copy_is_independent() {
    let mut original = ChainedTable::with_buckets(4);
    for i in 0..40 {
        original.insert(i, vec![i]);
    }

    let mut copy = original.clone();
    assert_eq!(copy, original);
    assert_eq!(copy.bucket_count(), original.bucket_count());

    copy.get_mut(&1).unwrap().push(100);
    copy.remove(&2);
    copy.insert(1000, vec![]);

    assert_eq!(original.get(&1), Some(&vec![1]));
    assert_eq!(original.get(&2), Some(&vec![2]));
    assert!(!original.contains_key(&1000));
    assert_eq!(original.len(), 40);
    assert_eq!(copy.len(), 40);
}

#[test]
fn test_table_copy_keeps_bucket_layout() {
    let mut original = ChainedTable::with_buckets(8);
    for i in 0..100 {
        original.insert(i, i);
    }
    let copy = original.clone();

    for (a, b) in original.chains().zip(copy.chains()) {
        assert_eq!(a, b);
    }
}

#[test]
fn test_table_single_long_chain() {
    let mut original = ChainedTable::with_buckets(1);
    for i in 0..5_000 {
        original.insert(i, i);
    }
    let copy = original.clone();

    assert_eq!(copy.chain(0).map(Chain::len), Some(5_000));
    assert_eq!(copy, original);
}
