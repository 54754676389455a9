//! Shrinking properties
//!
//! These properties validate that every shrink a generator offers is a
//! valid, smaller output of that generator.

use crate::{arbitrary_seed, arbitrary_size};
use bramble::*;

/// Property: Every shrink of a range integer stays in range
pub fn test_integer_shrinks_stay_in_range() {
    let prop = for_all(
        Gen::tuple_of(arbitrary_size(), arbitrary_seed()),
        |&(size, seed): &(Size, Seed)| {
            let gen = Gen::int_range(4, 8);
            let tree = gen.generate(size, seed).unwrap();
            tree.expand(3).into_iter().all(|value| (4..=8).contains(&value))
        },
    );

    let fast_config = Config::default().with_tests(20).with_shrinks(10);
    match prop.run(&fast_config) {
        TestResult::Pass => println!("✓ Integer shrink range property passed"),
        result => panic!("Integer shrink range property failed: {result:?}"),
    }
}

/// Property: Range integers shrink all the way to the in-range value
/// closest to zero
pub fn test_integer_shrinks_reach_origin() {
    let prop = for_all(arbitrary_seed(), |&seed: &Seed| {
        let size = Size::new(10);
        let in_positive = Gen::int_range(4, 8).generate(size, seed).unwrap().minimal();
        let through_zero = Gen::int_range(-10, 10).generate(size, seed).unwrap().minimal();
        in_positive == 4 && through_zero == 0
    });

    let fast_config = Config::default().with_tests(20).with_shrinks(10);
    match prop.run(&fast_config) {
        TestResult::Pass => println!("✓ Integer shrink origin property passed"),
        result => panic!("Integer shrink origin property failed: {result:?}"),
    }
}

/// Property: List shrinks never grow
pub fn test_list_shrinks_never_grow() {
    let prop = for_all(
        Gen::tuple_of(arbitrary_size(), arbitrary_seed()),
        |&(size, seed): &(Size, Seed)| {
            let gen = Gen::<Vec<i64>>::vec_of(Gen::integer());
            let tree = gen.generate(size, seed).unwrap();
            let root_len = tree.value.len();
            tree.expand(2)
                .into_iter()
                .all(|descendant| descendant.len() <= root_len)
        },
    );

    let fast_config = Config::default().with_tests(15).with_shrinks(10);
    match prop.run(&fast_config) {
        TestResult::Pass => println!("✓ List shrink monotonicity property passed"),
        result => panic!("List shrink monotonicity property failed: {result:?}"),
    }
}

/// Property: Unique lists stay unique through shrinking
pub fn test_unique_list_shrinks_stay_unique() {
    let prop = for_all(
        Gen::tuple_of(arbitrary_size(), arbitrary_seed()),
        |&(size, seed): &(Size, Seed)| {
            let gen = Gen::<Vec<i64>>::uniq_vec_of(Gen::int_range(0, 1000));
            match gen.generate(size, seed) {
                Err(_) => true,
                Ok(tree) => tree.expand(2).into_iter().all(|descendant| {
                    let mut seen = std::collections::HashSet::new();
                    descendant.into_iter().all(|value| seen.insert(value))
                }),
            }
        },
    );

    let fast_config = Config::default().with_tests(15).with_shrinks(10);
    match prop.run(&fast_config) {
        TestResult::Pass => println!("✓ Unique list shrink property passed"),
        result => panic!("Unique list shrink property failed: {result:?}"),
    }
}

/// Property: Filtered generators only ever shrink to passing values
pub fn test_filtered_shrinks_satisfy_predicate() {
    let prop = for_all(arbitrary_seed(), |&seed: &Seed| {
        let gen = Gen::integer().filter(|value| value % 2 != 0);
        match gen.generate(Size::new(20), seed) {
            Err(_) => true,
            Ok(tree) => tree.expand(3).into_iter().all(|value| value % 2 != 0),
        }
    });

    let fast_config = Config::default().with_tests(20).with_shrinks(10);
    match prop.run(&fast_config) {
        TestResult::Pass => println!("✓ Filtered shrink property passed"),
        result => panic!("Filtered shrink property failed: {result:?}"),
    }
}

/// Property: Bound generators re-run the continuation on the same
/// random branch for every outer shrink
pub fn test_bind_reuses_the_inner_seed() {
    let prop = for_all(arbitrary_seed(), |&seed: &Seed| {
        let gen = Gen::int_range(0, 100).bind(|_| Gen::int_range(0, 1_000_000));
        let tree = gen.generate(Size::new(10), seed).unwrap();
        match tree.children().next() {
            // The continuation ignores its argument, so an outer shrink
            // regenerates the identical inner value.
            Some(child) => child.value == tree.value,
            None => true,
        }
    });

    let fast_config = Config::default().with_tests(20).with_shrinks(10);
    match prop.run(&fast_config) {
        TestResult::Pass => println!("✓ Bind seed reuse property passed"),
        result => panic!("Bind seed reuse property failed: {result:?}"),
    }
}

/// Property: Values bound through a doubling continuation never shrink
/// to odd values
pub fn test_bound_shrinks_stay_in_image() {
    let prop = for_all(arbitrary_seed(), |&seed: &Seed| {
        let gen = Gen::int_range(0, 5).bind(|n| Gen::constant(n * 2));
        let tree = gen.generate(Size::new(10), seed).unwrap();
        tree.expand(4)
            .into_iter()
            .all(|value| value % 2 == 0 && (0..=10).contains(&value))
    });

    let fast_config = Config::default().with_tests(20).with_shrinks(10);
    match prop.run(&fast_config) {
        TestResult::Pass => println!("✓ Bind image property passed"),
        result => panic!("Bind image property failed: {result:?}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn run_shrinking_property_tests() {
        test_integer_shrinks_stay_in_range();
        test_integer_shrinks_reach_origin();
        test_list_shrinks_never_grow();
        test_unique_list_shrinks_stay_unique();
        test_filtered_shrinks_satisfy_predicate();
        test_bind_reuses_the_inner_seed();
        test_bound_shrinks_stay_in_image();
    }
}
