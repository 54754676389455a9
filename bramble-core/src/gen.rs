//! Generator combinators for property-based test data.

use crate::data::{Seed, Size};
use crate::error::{GenError, Result};
use crate::tree::{zip_pair, ChildIter, LazyTree};
use std::collections::{HashMap, HashSet};
use std::hash::Hash;
use std::rc::Rc;

/// Consecutive predicate rejections tolerated by [`Gen::filter`] before
/// it gives up with [`GenError::FilterTooNarrow`].
pub const DEFAULT_FILTER_TRIES: usize = 10;

/// Consecutive duplicate keys tolerated by the unique-list generators
/// before they give up with [`GenError::TooManyDuplicates`].
pub const DEFAULT_UNIQUE_TRIES: usize = 10;

/// A generator for test data of type `T`.
///
/// Generators are explicit, first-class values: a shared pure function
/// from `(Size, Seed)` to a [`LazyTree`] whose root is the generated
/// value and whose children are its shrinks. Two generators built from
/// the same function are observationally identical, and a generator
/// holds no state between calls, so the same size and seed always yield
/// the same tree.
pub struct Gen<T> {
    run: Rc<dyn Fn(Size, Seed) -> Result<LazyTree<T>>>,
}

impl<T> Clone for Gen<T> {
    fn clone(&self) -> Self {
        Gen {
            run: Rc::clone(&self.run),
        }
    }
}

impl<T> std::fmt::Debug for Gen<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Gen").finish_non_exhaustive()
    }
}

impl<T> Gen<T> {
    /// Create a new generator from a function.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(Size, Seed) -> Result<LazyTree<T>> + 'static,
    {
        Gen { run: Rc::new(f) }
    }

    /// Generate a shrink tree using the given size and seed.
    ///
    /// The tree's root is the generated value; its children are the
    /// entry point of the shrink search.
    pub fn generate(&self, size: Size, seed: Seed) -> Result<LazyTree<T>> {
        (self.run)(size, seed)
    }
}

impl<T: Clone + 'static> Gen<T> {
    /// Create a generator that always produces the same value.
    ///
    /// Does not shrink.
    pub fn constant(value: T) -> Self {
        Gen::new(move |_size, _seed| Ok(LazyTree::singleton(value.clone())))
    }

    /// Pick uniformly from a fixed, non-empty collection of values.
    ///
    /// Shrinks toward earlier elements.
    pub fn from_elements(elements: Vec<T>) -> Result<Self> {
        if elements.is_empty() {
            return Err(GenError::EmptyEnumerable);
        }
        let last = elements.len() as i64 - 1;
        Ok(Gen::int_range(0, last).map(move |index| elements[index as usize].clone()))
    }
}

impl<T: 'static> Gen<T> {
    /// Map a function over the generated values and all their shrinks.
    pub fn map<U, F>(self, f: F) -> Gen<U>
    where
        U: 'static,
        F: Fn(T) -> U + 'static,
    {
        let f = Rc::new(f);
        Gen::new(move |size, seed| {
            let f = Rc::clone(&f);
            let tree = self.generate(size, seed)?;
            Ok(tree.map(move |value| f(value)))
        })
    }

    /// Monadic bind: feed each generated value to a generator-returning
    /// function.
    ///
    /// The seed is split once; the outer tree is drawn from the first
    /// half and every inner tree, including those for shrunk outer
    /// values, is drawn from the second. Reusing the second half keeps
    /// shrunk outer values on the same random branch as the root, which
    /// is what makes shrinking through `bind` productive.
    ///
    /// Shrink order: outer shrinks (with the continuation re-applied)
    /// are offered before inner shrinks.
    pub fn bind<U, F>(self, f: F) -> Gen<U>
    where
        U: 'static,
        F: Fn(T) -> Gen<U> + 'static,
    {
        let f = Rc::new(f);
        self.bind_filter(move |value| Some(f(value)), 0)
    }

    /// Bind through a partial function, retrying with fresh seeds when
    /// the function skips a value.
    ///
    /// Fails with [`GenError::FilterTooNarrow`] after
    /// `max_consecutive_failures` consecutive skips.
    pub fn bind_filter<U, F>(self, f: F, max_consecutive_failures: usize) -> Gen<U>
    where
        U: 'static,
        F: Fn(T) -> Option<Gen<U>> + 'static,
    {
        let f = Rc::new(f);
        Gen::new(move |size, seed| {
            let mut attempts_left = max_consecutive_failures;
            let mut seed = seed;
            loop {
                let (outer_seed, inner_seed) = seed.split();
                let outer = self.generate(size, outer_seed)?;
                let f = Rc::clone(&f);
                match outer.map_filter(move |value| f(value)) {
                    Some(gen_tree) => {
                        return Ok(run_gen_tree(gen_tree, size, inner_seed)?.flatten());
                    }
                    None => {
                        if attempts_left == 0 {
                            return Err(GenError::FilterTooNarrow {
                                max_consecutive_failures,
                            });
                        }
                        attempts_left -= 1;
                        seed = inner_seed;
                    }
                }
            }
        })
    }

    /// Filter generated values by a predicate, retrying with fresh
    /// seeds on rejection; see [`Gen::filter_with`].
    pub fn filter<F>(self, predicate: F) -> Gen<T>
    where
        F: Fn(&T) -> bool + 'static,
    {
        self.filter_with(predicate, DEFAULT_FILTER_TRIES)
    }

    /// Filter generated values by a predicate.
    ///
    /// Rejection-samples fresh roots; fails with
    /// [`GenError::FilterTooNarrow`] once the predicate has rejected
    /// `max_consecutive_failures` roots in a row. Accepted trees are
    /// filtered all the way down, so every shrink satisfies the
    /// predicate too. Prefer reshaping a generator with [`Gen::map`]
    /// over filtering when the predicate rejects a large fraction of
    /// values.
    pub fn filter_with<F>(self, predicate: F, max_consecutive_failures: usize) -> Gen<T>
    where
        F: Fn(&T) -> bool + 'static,
    {
        let predicate = Rc::new(predicate);
        Gen::new(move |size, seed| {
            let mut seed = seed;
            for _ in 0..max_consecutive_failures {
                let (attempt_seed, next_seed) = seed.split();
                let tree = self.generate(size, attempt_seed)?;
                if predicate(&tree.value) {
                    let predicate = Rc::clone(&predicate);
                    return Ok(tree.filter(move |value| predicate(value)));
                }
                seed = next_seed;
            }
            Err(GenError::FilterTooNarrow {
                max_consecutive_failures,
            })
        })
    }

    /// Pick uniformly among the given generators.
    ///
    /// Shrinks the choice toward earlier generators, then the
    /// generated value.
    pub fn one_of(generators: Vec<Gen<T>>) -> Result<Self> {
        if generators.is_empty() {
            return Err(GenError::EmptyEnumerable);
        }
        let last = generators.len() as i64 - 1;
        Ok(Gen::int_range(0, last).bind(move |index| generators[index as usize].clone()))
    }

    /// Pick among the given generators with probability proportional to
    /// their weights.
    ///
    /// Zero-weight choices are never picked. Errors eagerly when the
    /// total weight is zero (in particular on an empty list). Shrink
    /// order follows [`Gen::bind`]: the choice shrinks toward earlier
    /// generators before the generated value shrinks.
    pub fn frequency(choices: Vec<WeightedChoice<T>>) -> Result<Self> {
        let total: u64 = choices.iter().map(|choice| choice.weight).sum();
        if total == 0 {
            return Err(GenError::EmptyEnumerable);
        }
        Ok(Gen::int_range(0, total as i64 - 1).bind(move |picked| {
            let mut remaining = picked as u64;
            for choice in &choices {
                if remaining < choice.weight {
                    return choice.generator.clone();
                }
                remaining -= choice.weight;
            }
            // picked < total, so the scan always selects a choice.
            choices[choices.len() - 1].generator.clone()
        }))
    }

    /// Invoke the generator with a fixed size, ignoring the outer size.
    pub fn resize(self, size: Size) -> Gen<T> {
        Gen::new(move |_size, seed| self.generate(size, seed))
    }

    /// Build a generator from a size-indexed family of generators.
    pub fn sized<F>(f: F) -> Gen<T>
    where
        F: Fn(Size) -> Gen<T> + 'static,
    {
        Gen::new(move |size, seed| f(size).generate(size, seed))
    }

    /// Adjust the size seen by the generator.
    pub fn scale<F>(self, f: F) -> Gen<T>
    where
        F: Fn(Size) -> Size + 'static,
    {
        Gen::sized(move |size| self.clone().resize(f(size)))
    }

    /// Retain only the root of the generated tree.
    ///
    /// The resulting generator never shrinks.
    pub fn no_shrink(self) -> Gen<T> {
        Gen::new(move |size, seed| {
            let tree = self.generate(size, seed)?;
            Ok(LazyTree::singleton(tree.value))
        })
    }

    /// Generate recursive data from a leaf generator and a function
    /// that wraps a generator into one for the next level up.
    ///
    /// The size is pseudo-factorized into a bounded number of levels;
    /// each level admits the leaf case with weight 1 against weight 2
    /// for recursing, so generation terminates with depth expected
    /// logarithmic in size.
    pub fn recursive<F>(leaf: Gen<T>, subtree: F) -> Gen<T>
    where
        F: Fn(Gen<T>) -> Gen<T> + 'static,
    {
        let subtree = Rc::new(subtree);
        Gen::new(move |size, seed| {
            let (levels_seed, run_seed) = seed.split();
            let total = (size.get() as f64).powf(1.1) as u64;
            let mut data = leaf.clone();
            for nodes_on_level in random_pseudofactors(total, levels_seed) {
                let grown = subtree(data.clone()).resize(Size::new(nodes_on_level as usize));
                data = Gen::frequency(vec![
                    WeightedChoice::new(1, data),
                    WeightedChoice::new(2, grown),
                ])?;
            }
            data.generate(size, run_seed)
        })
    }
}

/// A weighted alternative for [`Gen::frequency`].
pub struct WeightedChoice<T> {
    weight: u64,
    generator: Gen<T>,
}

impl<T> WeightedChoice<T> {
    /// Pair a relative weight with a generator.
    pub fn new(weight: u64, generator: Gen<T>) -> Self {
        WeightedChoice { weight, generator }
    }
}

impl<T> Clone for WeightedChoice<T> {
    fn clone(&self) -> Self {
        WeightedChoice {
            weight: self.weight,
            generator: self.generator.clone(),
        }
    }
}

/// Run every generator in a tree of generators with one shared seed.
///
/// The root's failure propagates; a descendant that fails to generate
/// is dropped, since it has no valid value to offer the shrink search.
fn run_gen_tree<T: 'static>(
    gen_tree: LazyTree<Gen<T>>,
    size: Size,
    seed: Seed,
) -> Result<LazyTree<LazyTree<T>>> {
    let root = gen_tree.value.generate(size, seed)?;
    Ok(LazyTree::with_children(root, move || {
        Box::new(
            gen_tree
                .children()
                .filter_map(move |child| run_gen_tree(child, size, seed).ok()),
        ) as ChildIter<LazyTree<T>>
    }))
}

/// Shrink tree for an integer confined to `lo..=hi`.
///
/// Candidates jump to zero first, then halve the distance back toward
/// the value; each candidate expands recursively by the same rule.
/// Out-of-range candidates are dropped with their subtrees, which
/// steers shrinking toward the in-range value of smallest magnitude.
fn int_shrink_tree(value: i64, lo: i64, hi: i64) -> LazyTree<i64> {
    LazyTree::with_children(value, move || {
        if value == 0 {
            return Box::new(std::iter::empty()) as ChildIter<i64>;
        }
        let halvings = std::iter::successors(Some(value), |&step| {
            let half = step / 2;
            (half != 0).then_some(half)
        });
        Box::new(halvings.filter_map(move |step| {
            let candidate = value - step;
            (candidate >= lo && candidate <= hi).then(|| int_shrink_tree(candidate, lo, hi))
        })) as ChildIter<i64>
    })
}

/// Shrink tree for a list: one child per deletion index, recursively.
fn list_shrink_tree<T: Clone + 'static>(items: Vec<T>) -> LazyTree<Vec<T>> {
    LazyTree::with_children(items.clone(), move || {
        let items = items.clone();
        Box::new((0..items.len()).map(move |index| {
            let mut smaller = items.clone();
            smaller.remove(index);
            list_shrink_tree(smaller)
        })) as ChildIter<Vec<T>>
    })
}

/// Drop elements whose key was already seen, keeping first occurrences.
fn dedup_by_key<T, K, F>(elements: Vec<T>, key: &F) -> Vec<T>
where
    K: Hash + Eq,
    F: Fn(&T) -> K + ?Sized,
{
    let mut seen = HashSet::new();
    elements
        .into_iter()
        .filter(|element| seen.insert(key(element)))
        .collect()
}

/// Generate element trees with pairwise-distinct keys.
fn unique_element_trees<T, K, F>(
    element_gen: &Gen<T>,
    key: &F,
    max_tries: usize,
    length: usize,
    size: Size,
    seed: Seed,
) -> Result<Vec<LazyTree<T>>>
where
    T: Clone + 'static,
    K: Hash + Eq,
    F: Fn(&T) -> K + ?Sized,
{
    let mut current_seed = seed;
    let mut trees = Vec::with_capacity(length);
    let mut seen = HashSet::new();
    let mut consecutive_failures = 0;
    while trees.len() < length {
        let (element_seed, next_seed) = current_seed.split();
        current_seed = next_seed;
        let tree = element_gen.generate(size, element_seed)?;
        if seen.insert(key(&tree.value)) {
            consecutive_failures = 0;
            trees.push(tree);
        } else {
            consecutive_failures += 1;
            if consecutive_failures >= max_tries {
                return Err(GenError::TooManyDuplicates {
                    max_tries,
                    remaining: length - trees.len(),
                    generated: trees.len(),
                });
            }
        }
    }
    Ok(trees)
}

/// The pseudo-factorization driving [`Gen::recursive`]: divide by a
/// random factor in `1..=⌊log₂ n⌋`, stopping on factor 1 or once the
/// remainder drops below 2.
fn random_pseudofactors(n: u64, seed: Seed) -> Vec<u64> {
    if n < 2 {
        return vec![n];
    }
    let (factor_seed, rest_seed) = seed.split();
    let log2 = 63 - u64::from(n.leading_zeros());
    let (factor, _) = factor_seed.next_in_range(1, log2 as i64);
    if factor == 1 {
        vec![n]
    } else {
        let mut factors = vec![factor as u64];
        factors.extend(random_pseudofactors(n / factor as u64, rest_seed));
        factors
    }
}

/// Primitive generators.
impl Gen<i64> {
    /// Generate an integer in the inclusive range `lo..=hi`.
    ///
    /// Size is ignored. Shrinks toward the in-range value of smallest
    /// absolute magnitude.
    pub fn int_range(lo: i64, hi: i64) -> Self {
        assert!(lo <= hi, "int_range: empty range {}..={}", lo, hi);
        Gen::new(move |_size, seed| {
            let (value, _) = seed.next_in_range(lo, hi);
            Ok(int_shrink_tree(value, lo, hi))
        })
    }

    /// Generate an integer in `-size..=size`.
    ///
    /// Shrinks toward zero.
    pub fn integer() -> Self {
        Gen::sized(|size| {
            let bound = size.get() as i64;
            Gen::int_range(-bound, bound)
        })
    }
}

impl Gen<bool> {
    /// Generate a random boolean.
    ///
    /// Shrinks toward `false`.
    pub fn bool() -> Self {
        Gen::int_range(0, 1).map(|value| value == 1)
    }
}

impl Gen<u8> {
    /// Generate a uniform byte.
    ///
    /// Does not shrink.
    pub fn byte() -> Self {
        Gen::int_range(0, 255).no_shrink().map(|value| value as u8)
    }
}

impl Gen<f64> {
    /// Generate a uniform float in `[0.0, 1.0)`.
    ///
    /// Does not shrink.
    pub fn uniform_float() -> Self {
        Gen::new(|_size, seed| {
            let (value, _) = seed.next_f64();
            Ok(LazyTree::singleton(value))
        })
    }
}

impl Gen<char> {
    /// Generate a character in the inclusive range `lo..=hi`.
    ///
    /// The range must not straddle the surrogate block. Shrinks toward
    /// `lo`.
    pub fn char_range(lo: char, hi: char) -> Self {
        assert!(lo <= hi, "char_range: empty range {:?}..={:?}", lo, hi);
        assert!(
            (hi as u32) < 0xD800 || (lo as u32) > 0xDFFF,
            "char_range: range {:?}..={:?} straddles the surrogate block",
            lo,
            hi
        );
        Gen::int_range(lo as i64, hi as i64)
            .map(move |code| char::from_u32(code as u32).unwrap_or(lo))
    }

    /// Generate ASCII alphabetic characters (a-z, A-Z).
    ///
    /// Shrinks toward `'a'`.
    pub fn ascii_alpha() -> Self {
        Gen::int_range(0, 51).map(|value| {
            if value < 26 {
                (b'a' + value as u8) as char
            } else {
                (b'A' + (value - 26) as u8) as char
            }
        })
    }

    /// Generate ASCII alphanumeric characters (a-z, A-Z, 0-9).
    pub fn ascii_alphanumeric() -> Self {
        Gen::int_range(0, 61).map(|value| {
            if value < 26 {
                (b'a' + value as u8) as char
            } else if value < 52 {
                (b'A' + (value - 26) as u8) as char
            } else {
                (b'0' + (value - 52) as u8) as char
            }
        })
    }

    /// Generate printable ASCII characters (space through tilde).
    pub fn ascii_printable() -> Self {
        Gen::char_range(' ', '~')
    }
}

fn identifier_start() -> Gen<char> {
    Gen::int_range(0, 3).bind(|class| match class {
        0 | 1 => Gen::char_range('a', 'z'),
        2 => Gen::char_range('A', 'Z'),
        _ => Gen::constant('_'),
    })
}

fn identifier_rest() -> Gen<char> {
    Gen::int_range(0, 62).map(|value| {
        if value < 26 {
            (b'a' + value as u8) as char
        } else if value < 52 {
            (b'A' + (value - 26) as u8) as char
        } else if value < 62 {
            (b'0' + (value - 52) as u8) as char
        } else {
            '_'
        }
    })
}

impl Gen<String> {
    /// Generate strings using the given character generator.
    ///
    /// Shrinks like the underlying character list: character removal
    /// and character shrinking.
    pub fn string_of(char_gen: Gen<char>) -> Self {
        Gen::<Vec<char>>::vec_of(char_gen).map(|chars| chars.into_iter().collect::<String>())
    }

    /// Generate ASCII alphabetic strings.
    pub fn ascii_alpha() -> Self {
        Self::string_of(Gen::<char>::ascii_alpha())
    }

    /// Generate ASCII alphanumeric strings.
    pub fn ascii_alphanumeric() -> Self {
        Self::string_of(Gen::<char>::ascii_alphanumeric())
    }

    /// Generate printable ASCII strings.
    pub fn ascii_printable() -> Self {
        Self::string_of(Gen::<char>::ascii_printable())
    }

    /// Generate identifier-shaped strings: a lowercase-biased first
    /// character (lowercase, uppercase, or underscore) followed by
    /// alphanumerics and underscores.
    ///
    /// Length grows with the square root of size, capped at 256.
    pub fn identifier() -> Self {
        Gen::tuple_of(identifier_start(), Gen::<Vec<char>>::vec_of(identifier_rest()))
            .map(|(first, rest)| std::iter::once(first).chain(rest).collect::<String>())
            .scale(|size| Size::new(((size.get() as f64).sqrt() as usize).min(256)))
    }
}

impl Gen<Vec<u8>> {
    /// Generate byte strings.
    pub fn bytes() -> Self {
        Gen::vec_of(Gen::byte())
    }
}

impl<T: Clone + 'static> Gen<Vec<T>> {
    /// Generate vectors of length `0..=size` using the given element
    /// generator.
    ///
    /// Shrinks by deleting elements and by shrinking individual
    /// elements; a shrunk vector is never longer than its parent.
    pub fn vec_of(element_gen: Gen<T>) -> Self {
        Gen::new(move |size, seed| {
            let (len_seed, elements_seed) = seed.split();
            let (length, _) = len_seed.next_bounded(size.get() as u64 + 1);

            let mut current_seed = elements_seed;
            let mut element_trees = Vec::with_capacity(length as usize);
            for _ in 0..length {
                let (element_seed, next_seed) = current_seed.split();
                current_seed = next_seed;
                element_trees.push(element_gen.generate(size, element_seed)?);
            }

            Ok(LazyTree::zip_all(element_trees)
                .map(list_shrink_tree)
                .flatten())
        })
    }

    /// Generate vectors of exactly the given length.
    ///
    /// Shrinks element-wise only; the length is preserved.
    pub fn vec_of_length(element_gen: Gen<T>, length: usize) -> Self {
        Self::fixed_list(vec![element_gen; length])
    }

    /// Run each generator on an independent seed split and combine the
    /// results positionally.
    ///
    /// Shrinks one position at a time and never loses elements.
    pub fn fixed_list(generators: Vec<Gen<T>>) -> Self {
        Gen::new(move |size, seed| {
            let mut current_seed = seed;
            let mut trees = Vec::with_capacity(generators.len());
            for generator in &generators {
                let (element_seed, next_seed) = current_seed.split();
                current_seed = next_seed;
                trees.push(generator.generate(size, element_seed)?);
            }
            Ok(LazyTree::zip_all(trees))
        })
    }

    /// Reject empty vectors; see [`Gen::filter`].
    pub fn non_empty(self) -> Self {
        self.filter(|elements: &Vec<T>| !elements.is_empty())
    }

    /// Generate vectors whose elements are pairwise distinct, using the
    /// elements themselves as keys.
    pub fn uniq_vec_of(element_gen: Gen<T>) -> Self
    where
        T: Hash + Eq,
    {
        Self::uniq_vec_of_by(element_gen, |element: &T| element.clone(), DEFAULT_UNIQUE_TRIES)
    }

    /// Generate vectors of length `0..=size` whose elements have
    /// pairwise-distinct keys.
    ///
    /// A drawn element whose key was already seen is discarded and
    /// redrawn; `max_tries` consecutive discards fail the generator
    /// with [`GenError::TooManyDuplicates`]. Shrunk vectors are
    /// re-deduplicated by key, so every shrink is also duplicate-free.
    pub fn uniq_vec_of_by<K, F>(element_gen: Gen<T>, key: F, max_tries: usize) -> Self
    where
        K: Hash + Eq + 'static,
        F: Fn(&T) -> K + 'static,
    {
        let key = Rc::new(key);
        Gen::new(move |size, seed| {
            let (len_seed, elements_seed) = seed.split();
            let (length, _) = len_seed.next_bounded(size.get() as u64 + 1);
            let trees = unique_element_trees(
                &element_gen,
                &*key,
                max_tries,
                length as usize,
                size,
                elements_seed,
            )?;
            let key = Rc::clone(&key);
            Ok(LazyTree::zip_all(trees)
                .map(move |elements| list_shrink_tree(dedup_by_key(elements, &*key)))
                .flatten())
        })
    }

    /// Generate vectors of exactly the given length whose elements have
    /// pairwise-distinct keys; see [`Gen::uniq_vec_of_by`].
    pub fn uniq_vec_of_length_by<K, F>(
        element_gen: Gen<T>,
        key: F,
        max_tries: usize,
        length: usize,
    ) -> Self
    where
        K: Hash + Eq + 'static,
        F: Fn(&T) -> K + 'static,
    {
        let key = Rc::new(key);
        Gen::new(move |size, seed| {
            let trees = unique_element_trees(&element_gen, &*key, max_tries, length, size, seed)?;
            let key = Rc::clone(&key);
            Ok(LazyTree::zip_all(trees)
                .map(move |elements| list_shrink_tree(dedup_by_key(elements, &*key)))
                .flatten())
        })
    }
}

impl<A, B> Gen<(A, B)>
where
    A: Clone + 'static,
    B: Clone + 'static,
{
    /// Generate pairs using the given generators.
    ///
    /// Shrinks component-wise; neither component is ever dropped.
    pub fn tuple_of(first_gen: Gen<A>, second_gen: Gen<B>) -> Self {
        Gen::new(move |size, seed| {
            let (first_seed, second_seed) = seed.split();
            let first_tree = first_gen.generate(size, first_seed)?;
            let second_tree = second_gen.generate(size, second_seed)?;
            Ok(zip_pair(first_tree, second_tree))
        })
    }
}

impl<A, B, C> Gen<(A, B, C)>
where
    A: Clone + 'static,
    B: Clone + 'static,
    C: Clone + 'static,
{
    /// Generate triples using the given generators.
    pub fn tuple3_of(first_gen: Gen<A>, second_gen: Gen<B>, third_gen: Gen<C>) -> Self {
        Gen::new(move |size, seed| {
            let (first_seed, rest_seed) = seed.split();
            let (second_seed, third_seed) = rest_seed.split();
            let first_tree = first_gen.generate(size, first_seed)?;
            let second_tree = second_gen.generate(size, second_seed)?;
            let third_tree = third_gen.generate(size, third_seed)?;
            Ok(zip_pair(zip_pair(first_tree, second_tree), third_tree)
                .map(|((first, second), third)| (first, second, third)))
        })
    }
}

impl<K, V> Gen<HashMap<K, V>>
where
    K: Clone + Hash + Eq + 'static,
    V: Clone + 'static,
{
    /// Generate maps with up to `size` entries; see
    /// [`Gen::map_of_with`].
    pub fn map_of(key_gen: Gen<K>, value_gen: Gen<V>) -> Self {
        Self::map_of_with(key_gen, value_gen, DEFAULT_UNIQUE_TRIES)
    }

    /// Generate maps from a key generator and a value generator.
    ///
    /// Entries are drawn as key-value pairs unique by key, with the
    /// duplicate budget of [`Gen::uniq_vec_of_by`]. Shrinks drop
    /// entries and shrink keys and values.
    pub fn map_of_with(key_gen: Gen<K>, value_gen: Gen<V>, max_tries: usize) -> Self {
        Gen::<Vec<(K, V)>>::uniq_vec_of_by(
            Gen::tuple_of(key_gen, value_gen),
            |pair: &(K, V)| pair.0.clone(),
            max_tries,
        )
        .map(|pairs| pairs.into_iter().collect())
    }

    /// Generate maps with exactly the given keys, each value drawn from
    /// its own generator.
    ///
    /// Shrinks values only; the key set is preserved.
    pub fn fixed_map(entries: Vec<(K, Gen<V>)>) -> Self {
        let generators = entries
            .into_iter()
            .map(|(key, value_gen)| Gen::tuple_of(Gen::constant(key), value_gen))
            .collect();
        Gen::<Vec<(K, V)>>::fixed_list(generators).map(|pairs| pairs.into_iter().collect())
    }
}

impl<V: Clone + 'static> Gen<Vec<(String, V)>> {
    /// Generate keyword lists: identifier keys paired with generated
    /// values. Keys may repeat.
    pub fn keyword_of(value_gen: Gen<V>) -> Self {
        Gen::vec_of(Gen::tuple_of(Gen::<String>::identifier(), value_gen))
    }
}
