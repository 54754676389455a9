//! Property definitions and the shrink search over lazy trees.

use crate::data::{Config, Seed, Size};
use crate::error::TestResult;
use crate::gen::Gen;
use crate::tree::LazyTree;
use std::fmt;

/// A property that can be tested with generated inputs.
pub struct Property<T> {
    generator: Gen<T>,
    test_function: Box<dyn Fn(&T) -> TestResult>,
}

impl<T> Property<T>
where
    T: 'static,
{
    /// Create a new property from a generator and test function.
    pub fn new<F>(generator: Gen<T>, test_function: F) -> Self
    where
        F: Fn(&T) -> TestResult + 'static,
    {
        Property {
            generator,
            test_function: Box::new(test_function),
        }
    }

    /// Create a property that checks a boolean condition.
    pub fn for_all<F>(generator: Gen<T>, condition: F) -> Self
    where
        F: Fn(&T) -> bool + 'static,
        T: fmt::Debug,
    {
        Property::new(generator, move |input| {
            if condition(input) {
                TestResult::Pass
            } else {
                TestResult::Fail {
                    counterexample: format!("{input:?}"),
                    tests_run: 0,
                    shrinks_performed: 0,
                }
            }
        })
    }

    /// Run this property with the given configuration and a random
    /// starting seed.
    pub fn run(&self, config: &Config) -> TestResult {
        self.run_with_seed(config, Seed::random())
    }

    /// Run this property deterministically from the given seed.
    pub fn run_with_seed(&self, config: &Config, seed: Seed) -> TestResult {
        let mut seed = seed;
        let mut discards = 0;

        for test_num in 0..config.test_limit {
            let size = Size::new((test_num * config.size_limit) / config.test_limit.max(1));
            let (test_seed, next_seed) = seed.split();
            seed = next_seed;

            match self.generator.generate(size, test_seed) {
                Ok(tree) => match self.check_tree(tree, config, test_num + 1) {
                    TestResult::Pass => continue,
                    failure => return failure,
                },
                Err(_) => {
                    discards += 1;
                    if discards > config.discard_limit {
                        return TestResult::Discard {
                            limit: config.discard_limit,
                        };
                    }
                }
            }
        }

        TestResult::Pass
    }

    /// Check a single tree, shrinking greedily on failure.
    ///
    /// The search is depth-first: try each child's root; on a child
    /// that also fails, descend into that child's tree; on one that
    /// passes, move to the next sibling; stop when no child fails or
    /// the shrink budget runs out. Laziness keeps the cost proportional
    /// to candidates visited, and every candidate is a valid output of
    /// the generator.
    fn check_tree(&self, tree: LazyTree<T>, config: &Config, tests_run: usize) -> TestResult {
        match (self.test_function)(&tree.value) {
            TestResult::Pass => TestResult::Pass,
            TestResult::Fail { counterexample, .. } => {
                let mut best = counterexample;
                let mut current = tree;
                let mut shrinks_performed = 0;
                let mut candidates_tested = 0;

                loop {
                    let mut advanced = false;
                    let mut children = current.children();
                    while candidates_tested < config.shrink_limit {
                        match children.next() {
                            None => break,
                            Some(child) => {
                                candidates_tested += 1;
                                if let TestResult::Fail { counterexample, .. } =
                                    (self.test_function)(&child.value)
                                {
                                    best = counterexample;
                                    current = child;
                                    shrinks_performed += 1;
                                    advanced = true;
                                    break;
                                }
                            }
                        }
                    }
                    if !advanced || candidates_tested >= config.shrink_limit {
                        break;
                    }
                }

                TestResult::Fail {
                    counterexample: best,
                    tests_run,
                    shrinks_performed,
                }
            }
            other => other,
        }
    }
}

/// Create a property for a generator and test function.
pub fn property<T, F>(generator: Gen<T>, test_function: F) -> Property<T>
where
    T: 'static,
    F: Fn(&T) -> TestResult + 'static,
{
    Property::new(generator, test_function)
}

/// Create a property that checks a boolean condition.
pub fn for_all<T, F>(generator: Gen<T>, condition: F) -> Property<T>
where
    T: fmt::Debug + 'static,
    F: Fn(&T) -> bool + 'static,
{
    Property::for_all(generator, condition)
}
