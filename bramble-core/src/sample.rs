//! Sized sampling of generator output.

use crate::data::{Seed, Size};
use crate::error::Result;
use crate::gen::Gen;

/// Size ceiling for [`Samples`]; growth saturates here.
pub const MAX_SAMPLE_SIZE: usize = 100;

/// An infinite iterator of generated values.
///
/// Each emission splits off a fresh seed, runs the generator, and
/// yields the tree's root; the shrink children are discarded
/// unevaluated. The size starts at 1 and grows by one per emission
/// until it saturates at [`MAX_SAMPLE_SIZE`]. Values are not
/// deduplicated.
pub struct Samples<T> {
    generator: Gen<T>,
    seed: Seed,
    size: usize,
}

impl<T: 'static> Iterator for Samples<T> {
    type Item = Result<T>;

    fn next(&mut self) -> Option<Self::Item> {
        let (sample_seed, next_seed) = self.seed.split();
        self.seed = next_seed;
        let result = self
            .generator
            .generate(Size::new(self.size), sample_seed)
            .map(|tree| tree.value);
        if self.size < MAX_SAMPLE_SIZE {
            self.size += 1;
        }
        Some(result)
    }
}

impl<T: 'static> Gen<T> {
    /// Stream roots from this generator with growing sizes.
    pub fn samples(&self, seed: Seed) -> Samples<T> {
        Samples {
            generator: self.clone(),
            seed,
            size: 1,
        }
    }
}
