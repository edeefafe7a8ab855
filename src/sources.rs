//! Entry points that wrap raw data into a [`Queryable`].
//!
//! - [`from_vec`], [`from_slice`], [`from_iter`] - finite, indexed sources
//! - [`from_fn`] - a re-iterable generator, possibly infinite
//! - [`range`] - an inclusive integer range
//! - [`empty`] - a sequence with no elements
//!
//! Indexed sources report their length and support random access, which
//! lets `count`, `element_at`, `last` and `reverse` skip a full traversal.

use crate::cursor::Cursor;
use crate::error::{QueryError, Result};
use crate::query::Queryable;
use crate::sequence::{Element, IntoSequence, Sequence};
use std::marker::PhantomData;
use std::sync::Arc;

/* ===================== VecSequence ===================== */

/// A sequence backed by an owned, shared buffer.
pub struct VecSequence<T> {
    items: Arc<Vec<T>>,
}

impl<T> VecSequence<T> {
    pub fn new(items: Vec<T>) -> Self {
        Self {
            items: Arc::new(items),
        }
    }
}

impl<T: Element> Sequence<T> for VecSequence<T> {
    fn cursor(&self) -> Cursor<T> {
        let items = Arc::clone(&self.items);
        let mut pos = 0usize;
        Cursor::from_fn(move || {
            let next = items.get(pos).cloned();
            pos += 1;
            Ok(next)
        })
    }

    fn known_len(&self) -> Option<usize> {
        Some(self.items.len())
    }

    fn supports_random_access(&self) -> bool {
        true
    }

    fn element(&self, index: usize) -> Option<T> {
        self.items.get(index).cloned()
    }
}

impl<T: Element> IntoSequence<T> for Vec<T> {
    fn into_sequence(self) -> Arc<dyn Sequence<T>> {
        Arc::new(VecSequence::new(self))
    }
}

impl<T: Element> IntoSequence<T> for &[T] {
    fn into_sequence(self) -> Arc<dyn Sequence<T>> {
        Arc::new(VecSequence::new(self.to_vec()))
    }
}

impl<T: Element, const N: usize> IntoSequence<T> for [T; N] {
    fn into_sequence(self) -> Arc<dyn Sequence<T>> {
        Arc::new(VecSequence::new(Vec::from(self)))
    }
}

/* ===================== FnSequence ===================== */

/// A re-iterable generator: every traversal calls the factory for a fresh
/// iterator. The iterator may be infinite.
pub struct FnSequence<F> {
    factory: F,
}

impl<T, I, F> Sequence<T> for FnSequence<F>
where
    T: Element,
    I: Iterator<Item = T> + 'static,
    F: Fn() -> I + Send + Sync,
{
    fn cursor(&self) -> Cursor<T> {
        let mut it = (self.factory)();
        Cursor::from_fn(move || Ok(it.next()))
    }
}

/* ===================== RangeSequence ===================== */

/// The integers `start..=end`.
#[derive(Clone, Copy, Debug)]
pub struct RangeSequence {
    start: i64,
    end: i64,
}

impl Sequence<i64> for RangeSequence {
    fn cursor(&self) -> Cursor<i64> {
        let end = self.end;
        let mut current = Some(self.start);
        Cursor::from_fn(move || {
            let Some(value) = current else {
                return Ok(None);
            };
            current = if value < end { Some(value + 1) } else { None };
            Ok(Some(value))
        })
    }

    fn known_len(&self) -> Option<usize> {
        let span = i128::from(self.end) - i128::from(self.start) + 1;
        usize::try_from(span).ok()
    }

    fn supports_random_access(&self) -> bool {
        self.known_len().is_some()
    }

    fn element(&self, index: usize) -> Option<i64> {
        let offset = i64::try_from(index).ok()?;
        let value = self.start.checked_add(offset)?;
        (value <= self.end).then_some(value)
    }
}

/* ===================== EmptySequence ===================== */

/// A stateless sequence with no elements.
pub struct EmptySequence<T>(PhantomData<fn() -> T>);

impl<T> EmptySequence<T> {
    pub const fn new() -> Self {
        Self(PhantomData)
    }
}

impl<T> Default for EmptySequence<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Element> Sequence<T> for EmptySequence<T> {
    fn cursor(&self) -> Cursor<T> {
        Cursor::exhausted()
    }

    fn known_len(&self) -> Option<usize> {
        Some(0)
    }

    fn supports_random_access(&self) -> bool {
        true
    }
}

/* ===================== constructors ===================== */

/// Query an owned vector.
///
/// ```
/// use ironquery::*;
/// let q = from_vec(vec![1, 2, 3]);
/// assert_eq!(q.count().unwrap(), 3);
/// ```
pub fn from_vec<T: Element>(data: Vec<T>) -> Queryable<T> {
    Queryable::new(VecSequence::new(data))
}

/// Query a copy of a slice.
pub fn from_slice<T: Element>(data: &[T]) -> Queryable<T> {
    from_vec(data.to_vec())
}

/// Query the items of any finite iterator (collected up front).
pub fn from_iter<T, I>(iter: I) -> Queryable<T>
where
    T: Element,
    I: IntoIterator<Item = T>,
{
    from_vec(iter.into_iter().collect())
}

/// Query a generator. `factory` is called once per traversal and may return
/// an infinite iterator.
///
/// ```
/// use ironquery::*;
/// let naturals = from_fn(|| 0u64..);
/// assert_eq!(naturals.take(3).to_list().unwrap(), vec![0, 1, 2]);
/// ```
pub fn from_fn<T, I, F>(factory: F) -> Queryable<T>
where
    T: Element,
    I: Iterator<Item = T> + 'static,
    F: Fn() -> I + Send + Sync + 'static,
{
    Queryable::new(FnSequence { factory })
}

/// The integers `start..=end`.
///
/// # Errors
/// [`QueryError::InvalidArgument`] if `end < start`.
pub fn range(start: i64, end: i64) -> Result<Queryable<i64>> {
    if end < start {
        return Err(QueryError::invalid_argument(format!(
            "range end ({end}) must be greater than or equal to start ({start})"
        )));
    }
    Ok(Queryable::new(RangeSequence { start, end }))
}

/// A query with no elements.
pub fn empty<T: Element>() -> Queryable<T> {
    Queryable::new(EmptySequence::<T>::new())
}
