//! The [`Sequence`] trait: a re-iterable producer of elements.
//!
//! Every operator in the crate is a `Sequence` that wraps one or more
//! upstream sequences. Building a query only links these wrappers together;
//! nothing is evaluated until somebody pulls from a [`Cursor`].

use crate::cursor::Cursor;
use std::sync::Arc;

/// Bound for anything that flows through a query.
///
/// Elements are cloned out of shared buffers (sources, sort caches, group
/// maps), and the wrappers holding them are shared behind `Arc`, hence
/// `Clone + Send + Sync + 'static`.
pub trait Element: 'static + Send + Sync + Clone {}
impl<T> Element for T where T: 'static + Send + Sync + Clone {}

/// Shared predicate over one element.
pub type Predicate<T> = Arc<dyn Fn(&T) -> bool + Send + Sync>;

/// Shared element-to-value function.
pub type Selector<I, O> = Arc<dyn Fn(&I) -> O + Send + Sync>;

/// A custom substitute for `==`, used by the `*_by` set operators.
pub type Equivalence<T> = Arc<dyn Fn(&T, &T) -> bool + Send + Sync>;

/// A re-iterable producer of an ordered series of elements.
///
/// `cursor` must return a fresh, independent traversal each time it is
/// called. Calling it must not consume or mutate the sequence itself, so two
/// cursors over the same sequence produce the same series (sequences that
/// memoize a materialized buffer, such as ordered or grouped ones, fill it
/// once and replay it afterwards).
///
/// The size and random-access hooks are optional fast paths used by
/// `count`, `element_at`, `last` and `reverse`.
pub trait Sequence<T>: Send + Sync {
    /// Start a new traversal.
    fn cursor(&self) -> Cursor<T>;

    /// Number of elements, if known without iterating.
    fn known_len(&self) -> Option<usize> {
        None
    }

    /// Whether [`element`](Sequence::element) can answer by index.
    ///
    /// Implementations returning `true` must also return `Some` from
    /// [`known_len`](Sequence::known_len).
    fn supports_random_access(&self) -> bool {
        false
    }

    /// Element at `index`, when random access is supported and the index is
    /// in range.
    fn element(&self, _index: usize) -> Option<T> {
        None
    }
}

impl<T, S> Sequence<T> for Arc<S>
where
    S: Sequence<T> + ?Sized,
{
    fn cursor(&self) -> Cursor<T> {
        (**self).cursor()
    }

    fn known_len(&self) -> Option<usize> {
        (**self).known_len()
    }

    fn supports_random_access(&self) -> bool {
        (**self).supports_random_access()
    }

    fn element(&self, index: usize) -> Option<T> {
        (**self).element(index)
    }
}

/// Conversion into a shared sequence.
///
/// Operators that take a second sequence (`concat`, `union`, `intersect`,
/// `except`, `sequence_equals`) or that flatten sub-sequences (`flat_map`)
/// accept anything implementing this trait: a `Vec`, a slice, an array, or
/// another query.
pub trait IntoSequence<T> {
    fn into_sequence(self) -> Arc<dyn Sequence<T>>;
}

impl<T: Element> IntoSequence<T> for Arc<dyn Sequence<T>> {
    fn into_sequence(self) -> Arc<dyn Sequence<T>> {
        self
    }
}
