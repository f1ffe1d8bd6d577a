//! Sampler - unbiased selection of `k` distinct elements.
//!
//! Draws random indices until enough distinct ones are collected. When more
//! than half the input is wanted, the drawn indices are the ones left out
//! instead, so the expected number of draws is bounded by `min(k, n - k)`.

use rand::Rng;
use std::collections::HashSet;

/// Choose `count` distinct elements of `items` uniformly at random.
///
/// Returns every element when `count >= items.len()`. Output order is not
/// meaningful.
pub fn choose<T: Clone, R: Rng + ?Sized>(items: &[T], count: usize, rng: &mut R) -> Vec<T> {
    choose_indices(items.len(), count, rng)
        .into_iter()
        .map(|i| items[i].clone())
        .collect()
}

/// Choose `count` distinct indices from `0..len`.
pub fn choose_indices<R: Rng + ?Sized>(len: usize, count: usize, rng: &mut R) -> Vec<usize> {
    let count = count.min(len);
    let n = count.min(len - count);
    let include = n == count;

    let mut drawn: HashSet<usize> = HashSet::with_capacity(n);
    let mut selected = Vec::with_capacity(count);
    while drawn.len() < n {
        let i = rng.gen_range(0..len);
        if drawn.insert(i) && include {
            selected.push(i);
        }
    }

    if !include {
        selected.extend((0..len).filter(|i| !drawn.contains(i)));
    }
    selected
}

#[cfg(test)]
mod tests {
    use super::*;
    use story_state::StoryRng;

    fn assert_distinct_subset(result: &[u32], items: &[u32]) {
        let unique: HashSet<_> = result.iter().collect();
        assert_eq!(unique.len(), result.len(), "duplicates in {result:?}");
        assert!(result.iter().all(|x| items.contains(x)));
    }

    #[test]
    fn test_zero_count_is_empty() {
        let mut rng = StoryRng::from_seed(1);
        assert!(choose(&[1, 2, 3], 0, &mut rng).is_empty());
        assert!(choose::<u32, _>(&[], 0, &mut rng).is_empty());
    }

    #[test]
    fn test_count_at_least_len_returns_all() {
        let items = [4u32, 8, 15, 16, 23, 42];
        let mut rng = StoryRng::from_seed(2);
        for count in [6, 7, 100] {
            let mut result = choose(&items, count, &mut rng);
            result.sort();
            assert_eq!(result, items.to_vec());
        }
    }

    #[test]
    fn test_exact_count_both_branches() {
        let items: Vec<u32> = (0..20).collect();
        let mut rng = StoryRng::from_seed(3);
        for count in 1..20 {
            for _ in 0..10 {
                let result = choose(&items, count, &mut rng);
                assert_eq!(result.len(), count);
                assert_distinct_subset(&result, &items);
            }
        }
    }

    #[test]
    fn test_empty_input() {
        let mut rng = StoryRng::from_seed(4);
        assert!(choose::<u32, _>(&[], 5, &mut rng).is_empty());
    }

    #[test]
    fn test_deterministic_with_seed() {
        let items: Vec<u32> = (0..50).collect();
        let a = choose(&items, 7, &mut StoryRng::from_seed(11));
        let b = choose(&items, 7, &mut StoryRng::from_seed(11));
        assert_eq!(a, b);
    }

    #[test]
    fn test_roughly_uniform() {
        // Each of 10 elements should be picked about 30% of the time for k = 3,
        // and about 70% of the time for k = 7 (the exclusion branch).
        let items: Vec<usize> = (0..10).collect();
        let mut rng = StoryRng::from_seed(12);
        let trials = 20_000;

        for (count, expected) in [(3usize, 0.3f64), (7, 0.7)] {
            let mut hits = [0u32; 10];
            for _ in 0..trials {
                for i in choose(&items, count, &mut rng) {
                    hits[i] += 1;
                }
            }
            for h in hits {
                let rate = h as f64 / trials as f64;
                assert!((rate - expected).abs() < 0.03, "k={count} rate={rate}");
            }
        }
    }
}
