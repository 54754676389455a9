//! Generator invariant properties
//!
//! These properties ensure that generators behave correctly with respect to
//! determinism, size bounds, range bounds, and seed splitting.

use crate::{arbitrary_seed, arbitrary_size};
use bramble::*;

/// Property: Generators should be deterministic for same size/seed
pub fn test_generator_determinism() {
    let prop = for_all(
        Gen::tuple_of(arbitrary_size(), arbitrary_seed()),
        |&(size, seed): &(Size, Seed)| {
            let gen = Gen::int_range(0, 100);
            let tree1 = gen.generate(size, seed).unwrap();
            let tree2 = gen.generate(size, seed).unwrap();
            tree1.value == tree2.value && tree1.expand(2) == tree2.expand(2)
        },
    );

    let fast_config = Config::default().with_tests(20).with_shrinks(10);
    match prop.run(&fast_config) {
        TestResult::Pass => println!("✓ Generator determinism property passed"),
        result => panic!("Generator determinism property failed: {result:?}"),
    }
}

/// Property: Generated vectors should respect size bounds
pub fn test_generator_size_bounds() {
    let prop = for_all(
        Gen::tuple_of(arbitrary_size(), arbitrary_seed()),
        |&(size, seed): &(Size, Seed)| {
            let gen = Gen::<Vec<i64>>::vec_of(Gen::int_range(0, 10));
            let tree = gen.generate(size, seed).unwrap();
            tree.value.len() <= size.get()
        },
    );

    let fast_config = Config::default().with_tests(20).with_shrinks(10);
    match prop.run(&fast_config) {
        TestResult::Pass => println!("✓ Generator size bounds property passed"),
        result => panic!("Generator size bounds property failed: {result:?}"),
    }
}

/// Property: Range generators should respect bounds for every seed
pub fn test_range_bounds() {
    let prop = for_all(
        Gen::tuple3_of(
            Gen::tuple_of(Gen::int_range(-20, 0), Gen::int_range(1, 20)),
            arbitrary_size(),
            arbitrary_seed(),
        ),
        |&((lo, hi), size, seed): &((i64, i64), Size, Seed)| {
            let gen = Gen::int_range(lo, hi);
            let tree = gen.generate(size, seed).unwrap();
            tree.value >= lo && tree.value <= hi
        },
    );

    let fast_config = Config::default().with_tests(20).with_shrinks(10);
    match prop.run(&fast_config) {
        TestResult::Pass => println!("✓ Range bounds property passed"),
        result => panic!("Range bounds property failed: {result:?}"),
    }
}

/// Property: Split halves generate independently and reproducibly
pub fn test_seed_split_independence() {
    let prop = for_all(arbitrary_seed(), |&seed: &Seed| {
        let (left, right) = seed.split();
        let gen = Gen::int_range(0, 1_000_000);
        let size = Size::new(10);

        let from_left = gen.generate(size, left).unwrap().value;
        let from_right = gen.generate(size, right).unwrap().value;

        // Both halves are fully determined by the parent seed.
        let (left_again, right_again) = seed.split();
        from_left == gen.generate(size, left_again).unwrap().value
            && from_right == gen.generate(size, right_again).unwrap().value
    });

    let fast_config = Config::default().with_tests(20).with_shrinks(10);
    match prop.run(&fast_config) {
        TestResult::Pass => println!("✓ Seed split independence property passed"),
        result => panic!("Seed split independence property failed: {result:?}"),
    }
}

/// Property: Frequency generators should not crash on weighted input
pub fn test_frequency_generator_stability() {
    let prop = for_all(
        Gen::tuple3_of(
            Gen::<Vec<i64>>::vec_of(Gen::int_range(1, 100)),
            arbitrary_size(),
            arbitrary_seed(),
        ),
        |&(ref weights, size, seed): &(Vec<i64>, Size, Seed)| {
            if weights.is_empty() {
                return true;
            }

            let choices: Vec<WeightedChoice<i64>> = weights
                .iter()
                .enumerate()
                .map(|(index, &weight)| {
                    WeightedChoice::new(weight as u64, Gen::constant(index as i64))
                })
                .collect();

            match Gen::frequency(choices) {
                Ok(gen) => gen.generate(size, seed).is_ok(),
                Err(_) => true,
            }
        },
    );

    let fast_config = Config::default().with_tests(15).with_shrinks(5);
    match prop.run(&fast_config) {
        TestResult::Pass => println!("✓ Frequency generator stability property passed"),
        result => panic!("Frequency generator stability property failed: {result:?}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn run_generator_invariant_tests() {
        test_generator_determinism();
        test_generator_size_bounds();
        test_range_bounds();
        test_seed_split_independence();
        test_frequency_generator_stability();
    }
}
