//! Lazy rose tree implementation for shrinking test values.

use std::fmt;
use std::rc::Rc;

pub mod render;

/// Iterator over the immediate children of a [`LazyTree`].
pub type ChildIter<T> = Box<dyn Iterator<Item = LazyTree<T>>>;

type Thunk<T> = Rc<dyn Fn() -> ChildIter<T>>;

/// A rose tree containing a value and its shrink possibilities.
///
/// The children are produced by a thunk and realized strictly on
/// demand: a tree whose root is all a caller needs never pays for the
/// shrinks below it, and child sequences may be enormous (or driven by
/// unbounded recursion) without diverging at construction time.
///
/// Every value reachable through `children` is a valid, smaller output
/// of whatever generator produced the tree; shrink drivers rely on
/// being able to substitute any descendant for the root.
pub struct LazyTree<T> {
    pub value: T,
    children: Thunk<T>,
}

impl<T: Clone> Clone for LazyTree<T> {
    fn clone(&self) -> Self {
        LazyTree {
            value: self.value.clone(),
            children: Rc::clone(&self.children),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for LazyTree<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LazyTree")
            .field("value", &self.value)
            .finish_non_exhaustive()
    }
}

impl<T: 'static> LazyTree<T> {
    /// Create a new tree with the given value and no children.
    pub fn singleton(value: T) -> Self {
        LazyTree {
            value,
            children: Rc::new(|| Box::new(std::iter::empty()) as ChildIter<T>),
        }
    }

    /// Create a new tree with the given value and lazy child sequence.
    pub fn with_children<F>(value: T, children: F) -> Self
    where
        F: Fn() -> ChildIter<T> + 'static,
    {
        LazyTree {
            value,
            children: Rc::new(children),
        }
    }

    /// Realize the immediate children.
    ///
    /// Each call re-runs the thunk and yields a fresh iterator; nothing
    /// is memoized.
    pub fn children(&self) -> ChildIter<T> {
        (self.children)()
    }

    /// Check whether the tree has any children (shrinks).
    ///
    /// Forces at most the first child.
    pub fn has_shrinks(&self) -> bool {
        self.children().next().is_some()
    }

    /// Map a function over the root and, lazily, every descendant.
    pub fn map<U, F>(self, f: F) -> LazyTree<U>
    where
        U: 'static,
        F: Fn(T) -> U + 'static,
    {
        self.map_shared(Rc::new(f))
    }

    fn map_shared<U: 'static>(self, f: Rc<dyn Fn(T) -> U>) -> LazyTree<U> {
        let LazyTree { value, children } = self;
        let value = f(value);
        LazyTree {
            value,
            children: Rc::new(move || {
                let f = Rc::clone(&f);
                Box::new(children().map(move |child| child.map_shared(Rc::clone(&f))))
                    as ChildIter<U>
            }),
        }
    }

    /// Filter the tree, keeping only descendants that satisfy the
    /// predicate.
    ///
    /// The root is assumed to satisfy the predicate already; callers
    /// that cannot guarantee that must use [`LazyTree::map_filter`].
    /// A child failing the predicate is dropped together with its whole
    /// subtree, since values below it were derived by shrinking a value
    /// that is no longer admissible.
    pub fn filter<F>(self, predicate: F) -> LazyTree<T>
    where
        F: Fn(&T) -> bool + 'static,
    {
        self.filter_shared(Rc::new(predicate))
    }

    fn filter_shared(self, predicate: Rc<dyn Fn(&T) -> bool>) -> LazyTree<T> {
        let LazyTree { value, children } = self;
        LazyTree {
            value,
            children: Rc::new(move || {
                let predicate = Rc::clone(&predicate);
                Box::new(children().filter_map(move |child| {
                    if predicate(&child.value) {
                        Some(child.filter_shared(Rc::clone(&predicate)))
                    } else {
                        None
                    }
                })) as ChildIter<T>
            }),
        }
    }

    /// Map a partial function over the tree.
    ///
    /// Returns `None` when the root itself is skipped. Descendants that
    /// are skipped are dropped together with their subtrees, as in
    /// [`LazyTree::filter`].
    pub fn map_filter<U, F>(self, f: F) -> Option<LazyTree<U>>
    where
        U: 'static,
        F: Fn(T) -> Option<U> + 'static,
    {
        self.map_filter_shared(Rc::new(f))
    }

    fn map_filter_shared<U: 'static>(self, f: Rc<dyn Fn(T) -> Option<U>>) -> Option<LazyTree<U>> {
        let LazyTree { value, children } = self;
        let value = f(value)?;
        Some(LazyTree {
            value,
            children: Rc::new(move || {
                let f = Rc::clone(&f);
                Box::new(
                    children().filter_map(move |child| child.map_filter_shared(Rc::clone(&f))),
                ) as ChildIter<U>
            }),
        })
    }
}

impl<T: 'static> LazyTree<LazyTree<T>> {
    /// Monadic join: collapse a tree of trees into one tree.
    ///
    /// The root is the inner tree's root. Outer children come first (each
    /// flattened in turn), then the inner tree's children, so structural
    /// shrinks are offered before value shrinks.
    pub fn flatten(self) -> LazyTree<T> {
        let LazyTree {
            value: inner,
            children: outer_children,
        } = self;
        let LazyTree {
            value,
            children: inner_children,
        } = inner;
        LazyTree {
            value,
            children: Rc::new(move || {
                let outer = outer_children().map(|tree| tree.flatten());
                Box::new(outer.chain(inner_children())) as ChildIter<T>
            }),
        }
    }
}

impl<T: Clone + 'static> LazyTree<T> {
    /// Combine a list of trees into one tree of lists.
    ///
    /// The root is the list of roots. Children shrink exactly one
    /// position at a time: for each index, for each child of the tree
    /// at that index, the list with that position replaced. The child
    /// sequence is lazy and flat.
    pub fn zip_all(trees: Vec<LazyTree<T>>) -> LazyTree<Vec<T>> {
        let value: Vec<T> = trees.iter().map(|tree| tree.value.clone()).collect();
        let trees = Rc::new(trees);
        LazyTree {
            value,
            children: Rc::new(move || {
                let trees = Rc::clone(&trees);
                let len = trees.len();
                Box::new((0..len).flat_map(move |position| {
                    let trees_for_child = Rc::clone(&trees);
                    trees[position].children().map(move |child| {
                        let mut replaced: Vec<LazyTree<T>> = (*trees_for_child).clone();
                        replaced[position] = child;
                        LazyTree::zip_all(replaced)
                    })
                })) as ChildIter<Vec<T>>
            }),
        }
    }

    /// Collect the root values of the immediate children.
    ///
    /// Forces the first level; only call on trees known to have a
    /// bounded child sequence.
    pub fn child_values(&self) -> Vec<T> {
        self.children().map(|child| child.value).collect()
    }

    /// Collect the root and all descendant values down to `max_depth`.
    pub fn expand(&self, max_depth: usize) -> Vec<T> {
        let mut result = vec![self.value.clone()];
        self.expand_into(&mut result, max_depth, 0);
        result
    }

    fn expand_into(&self, result: &mut Vec<T>, max_depth: usize, current_depth: usize) {
        if current_depth >= max_depth {
            return;
        }
        for child in self.children() {
            result.push(child.value.clone());
            child.expand_into(result, max_depth, current_depth + 1);
        }
    }

    /// Follow first children all the way down to a leaf value.
    ///
    /// For generators that order children by how aggressively they
    /// shrink, this is the fully-shrunk value.
    pub fn minimal(&self) -> T {
        let mut current = self.clone();
        loop {
            match current.children().next() {
                Some(child) => current = child,
                None => return current.value,
            }
        }
    }
}

/// Combine two trees of different types into a tree of pairs.
///
/// Children shrink the left component first, then the right, keeping
/// the other component's whole subtree available for later shrinking.
pub fn zip_pair<A, B>(left: LazyTree<A>, right: LazyTree<B>) -> LazyTree<(A, B)>
where
    A: Clone + 'static,
    B: Clone + 'static,
{
    let value = (left.value.clone(), right.value.clone());
    LazyTree {
        value,
        children: Rc::new(move || {
            let right_for_left = right.clone();
            let left_for_right = left.clone();
            let left_shrinks = left
                .children()
                .map(move |child| zip_pair(child, right_for_left.clone()));
            let right_shrinks = right
                .children()
                .map(move |child| zip_pair(left_for_right.clone(), child));
            Box::new(left_shrinks.chain(right_shrinks)) as ChildIter<(A, B)>
        }),
    }
}

impl<T: 'static> From<T> for LazyTree<T> {
    fn from(value: T) -> Self {
        LazyTree::singleton(value)
    }
}
