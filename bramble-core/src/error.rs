//! Error types for bramble test data generation.

use std::fmt;
use thiserror::Error;

/// Errors raised while constructing or running generators.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GenError {
    /// A filter predicate rejected every candidate it was offered.
    #[error(
        "filter predicate rejected {max_consecutive_failures} values in a row; \
         consider reshaping the generator (for example with map) instead of filtering"
    )]
    FilterTooNarrow { max_consecutive_failures: usize },

    /// A unique-element generator kept drawing values with keys it had
    /// already seen.
    #[error(
        "drew {max_tries} consecutive duplicates while {remaining} of the requested \
         elements were still missing ({generated} unique elements already generated)"
    )]
    TooManyDuplicates {
        max_tries: usize,
        remaining: usize,
        generated: usize,
    },

    /// A choice combinator was given nothing to choose from.
    #[error("cannot choose from an empty collection")]
    EmptyEnumerable,
}

/// Result type for bramble generator operations.
pub type Result<T> = std::result::Result<T, GenError>;

/// Outcome of a property test.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TestResult {
    /// Test passed successfully.
    Pass,

    /// Test failed with a counterexample.
    Fail {
        counterexample: String,
        tests_run: usize,
        shrinks_performed: usize,
    },

    /// Too many test cases were discarded.
    Discard { limit: usize },
}

impl fmt::Display for TestResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TestResult::Pass => write!(f, "✓ Property test passed"),
            TestResult::Fail {
                counterexample,
                tests_run,
                shrinks_performed,
            } => {
                write!(
                    f,
                    "✗ Property test failed after {} tests and {} shrinks: {}",
                    tests_run, shrinks_performed, counterexample
                )
            }
            TestResult::Discard { limit } => {
                write!(f, "? Property test gave up after {} discards", limit)
            }
        }
    }
}
