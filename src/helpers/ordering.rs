//! Sorting and reversal.
//!
//! - [`Queryable::order_by`] / [`Queryable::order_by_descending`] start an
//!   [`OrderedQueryable`] with one criterion; the `_with` forms take a
//!   comparator for the key.
//! - [`Queryable::reverse`] walks a random-access upstream backwards, and
//!   buffers any other upstream once per traversal.

use crate::cursor::Cursor;
use crate::error::Result;
use crate::ordering::{Direction, OrderFunc, OrderedQueryable};
use crate::query::Queryable;
use crate::sequence::{Element, Sequence};
use std::cmp::Ordering;
use std::sync::Arc;

struct ReverseSeq<T> {
    up: Arc<dyn Sequence<T>>,
}

impl<T: Element> Sequence<T> for ReverseSeq<T> {
    fn cursor(&self) -> Cursor<T> {
        let up = Arc::clone(&self.up);
        if let (true, Some(len)) = (up.supports_random_access(), up.known_len()) {
            let mut remaining = len;
            return Cursor::from_fn(move || {
                if remaining == 0 {
                    return Ok(None);
                }
                remaining -= 1;
                Ok(up.element(remaining))
            });
        }
        let mut buffered: Option<Vec<T>> = None;
        Cursor::from_fn(move || {
            if buffered.is_none() {
                buffered = Some(up.cursor().collect::<Result<Vec<T>>>()?);
            }
            Ok(buffered.as_mut().and_then(Vec::pop))
        })
    }

    fn known_len(&self) -> Option<usize> {
        self.up.known_len()
    }

    fn supports_random_access(&self) -> bool {
        self.up.supports_random_access()
    }

    fn element(&self, index: usize) -> Option<T> {
        let len = self.up.known_len()?;
        let mirrored = len.checked_sub(index)?.checked_sub(1)?;
        self.up.element(mirrored)
    }
}

impl<T: Element> Queryable<T> {
    /// Sort ascending by the natural order of `key`.
    ///
    /// `key` is not cached: it runs twice per comparison, O(n log n) times
    /// over the sort. A `NaN` key fails the traversal with
    /// [`QueryError::NotComparable`](crate::QueryError::NotComparable).
    ///
    /// ```
    /// use ironquery::*;
    /// let q = from_vec(vec![5, 3, 1, 4, 1, 5, 9, 2, 6]).order_by(|x: &i32| *x);
    /// assert_eq!(q.to_list().unwrap(), vec![1, 1, 2, 3, 4, 5, 5, 6, 9]);
    /// ```
    #[must_use]
    pub fn order_by<K, F>(&self, key: F) -> OrderedQueryable<T>
    where
        K: PartialOrd,
        F: Fn(&T) -> K + Send + Sync + 'static,
    {
        self.order_by_criterion(OrderFunc::by_key(key, Direction::Ascending))
    }

    /// Sort ascending by `key` compared with `comparator`.
    #[must_use]
    pub fn order_by_with<K, F, C>(&self, key: F, comparator: C) -> OrderedQueryable<T>
    where
        F: Fn(&T) -> K + Send + Sync + 'static,
        C: Fn(&K, &K) -> Ordering + Send + Sync + 'static,
    {
        self.order_by_criterion(OrderFunc::with_comparator(key, comparator, Direction::Ascending))
    }

    /// Sort descending by the natural order of `key`.
    #[must_use]
    pub fn order_by_descending<K, F>(&self, key: F) -> OrderedQueryable<T>
    where
        K: PartialOrd,
        F: Fn(&T) -> K + Send + Sync + 'static,
    {
        self.order_by_criterion(OrderFunc::by_key(key, Direction::Descending))
    }

    /// Sort descending by `key` compared with `comparator`.
    #[must_use]
    pub fn order_by_descending_with<K, F, C>(&self, key: F, comparator: C) -> OrderedQueryable<T>
    where
        F: Fn(&T) -> K + Send + Sync + 'static,
        C: Fn(&K, &K) -> Ordering + Send + Sync + 'static,
    {
        self.order_by_criterion(OrderFunc::with_comparator(
            key,
            comparator,
            Direction::Descending,
        ))
    }

    /// Sort by a prebuilt criterion.
    #[must_use]
    pub fn order_by_criterion(&self, criterion: OrderFunc<T>) -> OrderedQueryable<T> {
        OrderedQueryable::new(self.sequence(), vec![criterion])
    }

    /// The elements in reverse order.
    #[must_use]
    pub fn reverse(&self) -> Queryable<T> {
        Queryable::new(ReverseSeq {
            up: self.sequence(),
        })
    }
}
