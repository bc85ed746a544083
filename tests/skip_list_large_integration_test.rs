use hashskip::SkipList;

#[test]
fn test_one_million_entries() {
    let n: u64 = 1_000_000;
    let list: SkipList<u64, u64> = SkipList::new(18).unwrap();

    for i in 0..n {
        list.insert(i, i);
    }
    assert_eq!(list.len(), n as usize);

    for i in 0..n {
        assert_eq!(list.get(&i), Some(i));
    }

    for i in 0..n / 2 {
        assert!(list.delete(&i));
    }

    for i in 0..n {
        if i < n / 2 {
            assert_eq!(list.get(&i), None, "key {} should be gone", i);
        } else {
            assert_eq!(list.get(&i), Some(i), "key {} should remain", i);
        }
    }
    assert_eq!(list.len(), (n / 2) as usize);
    println!("top level after deletes: {}", list.top_level());
    list.validate().unwrap();
}

#[test]
fn test_random_keys() {
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    let mut rng = StdRng::seed_from_u64(99);
    let keys: Vec<u64> = (0..200_000).map(|_| rng.r#gen()).collect();
    let list: SkipList<u64, u64> = SkipList::new(18).unwrap();

    for key in &keys {
        list.insert(*key, key.wrapping_mul(3));
    }
    for key in &keys {
        assert_eq!(list.get(key), Some(key.wrapping_mul(3)));
    }

    let fingerprints = list.fingerprints();
    assert!(fingerprints.windows(2).all(|pair| pair[0] < pair[1]));
}
