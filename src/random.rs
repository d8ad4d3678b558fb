use rand::Rng;

/// The one random operation maze generation needs: a uniform index below some bound.
///
/// Every `rand::Rng` is a `RandomIndex`; tests substitute scripted sources to pin down a maze.
pub trait RandomIndex {
    /// A uniformly chosen value in `0..bound`. `bound` is never zero.
    fn index_below(&mut self, bound: usize) -> usize;
}

impl<R: Rng> RandomIndex for R {
    #[inline]
    fn index_below(&mut self, bound: usize) -> usize {
        self.gen_range(0..bound)
    }
}

/// Uniform Fisher-Yates shuffle in place.
///
/// Walks `i` from the last index down to 0, swapping element `i` with a uniformly chosen element in `0..=i`.
/// Every permutation is equally likely and no element is lost or duplicated.
pub fn shuffle<T, R: RandomIndex + ?Sized>(items: &mut [T], rng: &mut R) {
    for i in (0..items.len()).rev() {
        let j = rng.index_below(i + 1);
        items.swap(i, j);
    }
}


#[cfg(test)]
mod tests {
    use super::scripted::ScriptedIndices;
    use super::*;

    use std::collections::HashMap;

    use itertools::Itertools;
    use rand::SeedableRng;
    use rand_xorshift::XorShiftRng;

    #[test]
    fn all_zero_draws_rotate_left() {
        let mut items = ['a', 'b', 'c', 'd'];
        let mut rng = ScriptedIndices::new(&[0]);
        shuffle(&mut items, &mut rng);
        // swap(3, 0), swap(2, 0), swap(1, 0), swap(0, 0)
        assert_eq!(items, ['b', 'c', 'd', 'a']);
        assert_eq!(rng.draws(), 4);
    }

    #[test]
    fn scripted_draws_pick_the_swaps() {
        let mut items = [1, 2, 3, 4];
        shuffle(&mut items, &mut ScriptedIndices::new(&[1, 2, 0, 0]));
        // swap(3, 1) -> 1 4 3 2, swap(2, 2), swap(1, 0) -> 4 1 3 2
        assert_eq!(items, [4, 1, 3, 2]);
    }

    #[test]
    fn empty_and_single_slices() {
        let mut empty: [u8; 0] = [];
        let mut rng = ScriptedIndices::new(&[7]);
        shuffle(&mut empty, &mut rng);
        assert_eq!(rng.draws(), 0);

        let mut single = [42];
        shuffle(&mut single, &mut rng);
        assert_eq!(single, [42]);
    }

    #[test]
    fn keeps_every_element() {
        let mut rng = XorShiftRng::seed_from_u64(17);
        let mut items = (0..50).collect::<Vec<u32>>();
        for _ in 0..100 {
            shuffle(&mut items, &mut rng);
            assert_eq!(items.iter().cloned().sorted().collect::<Vec<u32>>(),
                       (0..50).collect::<Vec<u32>>());
        }
    }

    #[test]
    fn permutations_are_roughly_uniform() {
        const ROUNDS: usize = 48_000;
        let mut rng = XorShiftRng::seed_from_u64(0x5eed);
        let mut counts: HashMap<[u8; 4], usize> = HashMap::new();
        for _ in 0..ROUNDS {
            let mut items = [0u8, 1, 2, 3];
            shuffle(&mut items, &mut rng);
            *counts.entry(items).or_insert(0) += 1;
        }

        assert_eq!(counts.len(), 24);
        // 2000 expected per permutation, standard deviation ~44
        let expected = ROUNDS / 24;
        for (permutation, count) in &counts {
            assert!(*count > expected - 300 && *count < expected + 300,
                    "permutation {:?} seen {} times, expected about {}",
                    permutation,
                    count,
                    expected);
        }
    }
}
