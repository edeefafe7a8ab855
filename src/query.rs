use crate::cursor::Cursor;
use crate::sequence::{Element, IntoSequence, Sequence};
use std::fmt;
use std::sync::Arc;

/// A lazily evaluated, re-iterable query over elements of type `T`.
///
/// A `Queryable` is a cheap handle (one `Arc`) to the outermost wrapper of an
/// operator chain. Transform methods return new handles and never evaluate
/// anything; terminal methods (`to_list`, `count`, `first`, ...) pull
/// elements through the chain one at a time. Every terminal call starts a new
/// traversal, so the same query can be evaluated repeatedly.
#[derive(Clone)]
pub struct Queryable<T> {
    pub(crate) seq: Arc<dyn Sequence<T>>,
}

impl<T: Element> Queryable<T> {
    /// Wrap any sequence.
    pub fn new<S>(seq: S) -> Self
    where
        S: Sequence<T> + 'static,
    {
        Self { seq: Arc::new(seq) }
    }

    /// Wrap an already shared sequence.
    pub fn from_sequence(seq: Arc<dyn Sequence<T>>) -> Self {
        Self { seq }
    }

    /// The shared sequence behind this query.
    pub fn sequence(&self) -> Arc<dyn Sequence<T>> {
        Arc::clone(&self.seq)
    }

    /// Start a new traversal.
    pub fn cursor(&self) -> Cursor<T> {
        self.seq.cursor()
    }

    /// Same as [`cursor`](Self::cursor); reads better in `for` loops.
    pub fn iter(&self) -> Cursor<T> {
        self.seq.cursor()
    }

    /// Length if known without iterating.
    pub fn known_len(&self) -> Option<usize> {
        self.seq.known_len()
    }
}

impl<T: Element> Sequence<T> for Queryable<T> {
    fn cursor(&self) -> Cursor<T> {
        self.seq.cursor()
    }

    fn known_len(&self) -> Option<usize> {
        self.seq.known_len()
    }

    fn supports_random_access(&self) -> bool {
        self.seq.supports_random_access()
    }

    fn element(&self, index: usize) -> Option<T> {
        self.seq.element(index)
    }
}

impl<T: Element> IntoSequence<T> for Queryable<T> {
    fn into_sequence(self) -> Arc<dyn Sequence<T>> {
        self.seq
    }
}

impl<T: Element> IntoSequence<T> for &Queryable<T> {
    fn into_sequence(self) -> Arc<dyn Sequence<T>> {
        Arc::clone(&self.seq)
    }
}

impl<T: Element> IntoIterator for &Queryable<T> {
    type Item = crate::Result<T>;
    type IntoIter = Cursor<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.cursor()
    }
}

impl<T> fmt::Debug for Queryable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Queryable")
            .field("element", &std::any::type_name::<T>())
            .field("known_len", &self.seq.known_len())
            .finish()
    }
}
