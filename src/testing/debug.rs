//! Debug utilities for inspecting queries while they run.
//!
//! These pass-through operators log through `tracing`; install any
//! subscriber (for example `tracing-subscriber`'s `fmt`) in the test to see
//! the output. They never change the elements or their order.

use crate::cursor::{Cursor, FindNext};
use crate::error::Result;
use crate::query::Queryable;
use crate::sequence::{Element, Sequence};
use std::fmt::Debug;
use std::sync::Arc;

type Inspector<T> = Arc<dyn Fn(&T) + Send + Sync>;

struct InspectSeq<T> {
    up: Arc<dyn Sequence<T>>,
    label: Arc<str>,
    inspector: Inspector<T>,
}

impl<T: Element> Sequence<T> for InspectSeq<T> {
    fn cursor(&self) -> Cursor<T> {
        let mut up = self.up.cursor();
        let label = Arc::clone(&self.label);
        let inspector = Arc::clone(&self.inspector);
        let mut index = 0usize;
        Cursor::from_fn(move || {
            let next = up.try_next()?;
            if let Some(elem) = &next {
                tracing::debug!(label = &*label, index, "element pulled");
                inspector(elem);
                index += 1;
            }
            Ok(next)
        })
    }

    fn known_len(&self) -> Option<usize> {
        self.up.known_len()
    }
}

struct CountSeq<T> {
    up: Arc<dyn Sequence<T>>,
    label: Arc<str>,
}

struct CountCursor<T> {
    up: Cursor<T>,
    label: Arc<str>,
    seen: usize,
}

impl<T: Element> FindNext<T> for CountCursor<T> {
    fn find_next(&mut self) -> Result<Option<T>> {
        let next = self.up.try_next()?;
        match next {
            Some(_) => self.seen += 1,
            None => tracing::debug!(label = &*self.label, count = self.seen, "traversal complete"),
        }
        Ok(next)
    }
}

impl<T: Element> Sequence<T> for CountSeq<T> {
    fn cursor(&self) -> Cursor<T> {
        Cursor::new(CountCursor {
            up: self.up.cursor(),
            label: Arc::clone(&self.label),
            seen: 0,
        })
    }

    fn known_len(&self) -> Option<usize> {
        self.up.known_len()
    }
}

/// Extension trait adding debug pass-through operators to [`Queryable`].
pub trait QueryableDebugExt<T: Element> {
    /// Call `inspector` on every element as it is pulled, and emit a
    /// `debug` event with the label and position.
    ///
    /// # Example
    ///
    /// ```
    /// use ironquery::*;
    /// use ironquery::testing::QueryableDebugExt;
    /// use std::sync::atomic::{AtomicUsize, Ordering};
    /// use std::sync::Arc;
    ///
    /// let seen = Arc::new(AtomicUsize::new(0));
    /// let probe = Arc::clone(&seen);
    /// let first = from_vec(vec![1, 2, 3])
    ///     .inspect("source", move |_: &i32| {
    ///         probe.fetch_add(1, Ordering::SeqCst);
    ///     })
    ///     .first()
    ///     .unwrap();
    /// assert_eq!(first, 1);
    /// assert_eq!(seen.load(Ordering::SeqCst), 1);
    /// ```
    fn inspect<F>(&self, label: &str, inspector: F) -> Queryable<T>
    where
        F: Fn(&T) + Send + Sync + 'static;

    /// Emit a `debug` event with the `Debug` form of every pulled element.
    fn debug_inspect(&self, label: &str) -> Queryable<T>
    where
        T: Debug;

    /// Emit a `debug` event with the number of elements once a traversal
    /// reaches the end.
    fn debug_count(&self, label: &str) -> Queryable<T>;
}

impl<T: Element> QueryableDebugExt<T> for Queryable<T> {
    fn inspect<F>(&self, label: &str, inspector: F) -> Queryable<T>
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        Queryable::new(InspectSeq {
            up: self.sequence(),
            label: Arc::from(label),
            inspector: Arc::new(inspector),
        })
    }

    fn debug_inspect(&self, label: &str) -> Queryable<T>
    where
        T: Debug,
    {
        let owned: Arc<str> = Arc::from(label);
        self.inspect(label, move |elem: &T| {
            tracing::debug!(label = &*owned, element = ?elem, "inspect");
        })
    }

    fn debug_count(&self, label: &str) -> Queryable<T> {
        Queryable::new(CountSeq {
            up: self.sequence(),
            label: Arc::from(label),
        })
    }
}
