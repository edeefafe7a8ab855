//! Element-wise operators: filter, map, flat_map, take/skip (and their
//! `_while` forms), concat, default_if_empty, cast and of_type.
//!
//! Each operator is a small [`Sequence`] struct holding its upstream and its
//! function, plus a cursor struct implementing [`FindNext`]. The cursor only
//! ever pulls as many upstream elements as it needs for the element it is
//! asked for, so these operators work on infinite sources.

use crate::cursor::{Cursor, FindNext};
use crate::error::{QueryError, Result};
use crate::query::Queryable;
use crate::sequence::{Element, IntoSequence, Predicate, Selector, Sequence};
use crate::type_token::TypeTag;
use std::marker::PhantomData;
use std::sync::Arc;

/* ===================== filter ===================== */

struct FilterSeq<T> {
    up: Arc<dyn Sequence<T>>,
    pred: Predicate<T>,
}

struct FilterCursor<T> {
    up: Cursor<T>,
    pred: Predicate<T>,
}

impl<T: Element> FindNext<T> for FilterCursor<T> {
    fn find_next(&mut self) -> Result<Option<T>> {
        while let Some(elem) = self.up.try_next()? {
            if (self.pred)(&elem) {
                return Ok(Some(elem));
            }
        }
        Ok(None)
    }
}

impl<T: Element> Sequence<T> for FilterSeq<T> {
    fn cursor(&self) -> Cursor<T> {
        Cursor::new(FilterCursor {
            up: self.up.cursor(),
            pred: Arc::clone(&self.pred),
        })
    }
}

/* ===================== map ===================== */

struct MapSeq<I, O> {
    up: Arc<dyn Sequence<I>>,
    f: Selector<I, O>,
}

impl<I: Element, O: Element> Sequence<O> for MapSeq<I, O> {
    fn cursor(&self) -> Cursor<O> {
        let mut up = self.up.cursor();
        let f = Arc::clone(&self.f);
        Cursor::from_fn(move || Ok(up.try_next()?.map(|elem| f(&elem))))
    }

    fn known_len(&self) -> Option<usize> {
        self.up.known_len()
    }

    fn supports_random_access(&self) -> bool {
        self.up.supports_random_access()
    }

    fn element(&self, index: usize) -> Option<O> {
        self.up.element(index).map(|elem| (self.f)(&elem))
    }
}

/* ===================== flat_map ===================== */

struct FlatMapSeq<I, O> {
    up: Arc<dyn Sequence<I>>,
    f: Selector<I, Arc<dyn Sequence<O>>>,
}

struct FlatMapCursor<I, O> {
    up: Cursor<I>,
    sub: Option<Cursor<O>>,
    f: Selector<I, Arc<dyn Sequence<O>>>,
}

impl<I: Element, O: Element> FindNext<O> for FlatMapCursor<I, O> {
    fn find_next(&mut self) -> Result<Option<O>> {
        // Loop instead of recursing: long runs of empty sub-sequences must
        // not grow the stack.
        loop {
            if let Some(sub) = self.sub.as_mut() {
                if let Some(elem) = sub.try_next()? {
                    return Ok(Some(elem));
                }
                self.sub = None;
            }
            match self.up.try_next()? {
                Some(outer) => self.sub = Some((self.f)(&outer).cursor()),
                None => return Ok(None),
            }
        }
    }
}

impl<I: Element, O: Element> Sequence<O> for FlatMapSeq<I, O> {
    fn cursor(&self) -> Cursor<O> {
        Cursor::new(FlatMapCursor {
            up: self.up.cursor(),
            sub: None,
            f: Arc::clone(&self.f),
        })
    }
}

/* ===================== take / take_while ===================== */

struct TakeSeq<T> {
    up: Arc<dyn Sequence<T>>,
    n: usize,
}

impl<T: Element> Sequence<T> for TakeSeq<T> {
    fn cursor(&self) -> Cursor<T> {
        let mut up = self.up.cursor();
        let mut remaining = self.n;
        Cursor::from_fn(move || {
            if remaining == 0 {
                return Ok(None);
            }
            remaining -= 1;
            up.try_next()
        })
    }

    fn known_len(&self) -> Option<usize> {
        self.up.known_len().map(|len| len.min(self.n))
    }

    fn supports_random_access(&self) -> bool {
        self.up.supports_random_access()
    }

    fn element(&self, index: usize) -> Option<T> {
        if index < self.n {
            self.up.element(index)
        } else {
            None
        }
    }
}

struct TakeWhileSeq<T> {
    up: Arc<dyn Sequence<T>>,
    pred: Predicate<T>,
}

struct TakeWhileCursor<T> {
    up: Cursor<T>,
    pred: Predicate<T>,
    stopped: bool,
}

impl<T: Element> FindNext<T> for TakeWhileCursor<T> {
    fn find_next(&mut self) -> Result<Option<T>> {
        if self.stopped {
            return Ok(None);
        }
        match self.up.try_next()? {
            Some(elem) if (self.pred)(&elem) => Ok(Some(elem)),
            _ => {
                self.stopped = true;
                Ok(None)
            }
        }
    }
}

impl<T: Element> Sequence<T> for TakeWhileSeq<T> {
    fn cursor(&self) -> Cursor<T> {
        Cursor::new(TakeWhileCursor {
            up: self.up.cursor(),
            pred: Arc::clone(&self.pred),
            stopped: false,
        })
    }
}

/* ===================== skip / skip_while ===================== */

struct SkipSeq<T> {
    up: Arc<dyn Sequence<T>>,
    n: usize,
}

impl<T: Element> Sequence<T> for SkipSeq<T> {
    fn cursor(&self) -> Cursor<T> {
        let mut up = self.up.cursor();
        let mut to_skip = self.n;
        Cursor::from_fn(move || {
            while to_skip > 0 {
                to_skip -= 1;
                if up.try_next()?.is_none() {
                    to_skip = 0;
                    return Ok(None);
                }
            }
            up.try_next()
        })
    }

    fn known_len(&self) -> Option<usize> {
        self.up.known_len().map(|len| len.saturating_sub(self.n))
    }

    fn supports_random_access(&self) -> bool {
        self.up.supports_random_access()
    }

    fn element(&self, index: usize) -> Option<T> {
        self.up.element(index.checked_add(self.n)?)
    }
}

struct SkipWhileSeq<T> {
    up: Arc<dyn Sequence<T>>,
    pred: Predicate<T>,
}

struct SkipWhileCursor<T> {
    up: Cursor<T>,
    pred: Predicate<T>,
    yielding: bool,
}

impl<T: Element> FindNext<T> for SkipWhileCursor<T> {
    fn find_next(&mut self) -> Result<Option<T>> {
        if self.yielding {
            return self.up.try_next();
        }
        while let Some(elem) = self.up.try_next()? {
            if !(self.pred)(&elem) {
                self.yielding = true;
                return Ok(Some(elem));
            }
        }
        Ok(None)
    }
}

impl<T: Element> Sequence<T> for SkipWhileSeq<T> {
    fn cursor(&self) -> Cursor<T> {
        Cursor::new(SkipWhileCursor {
            up: self.up.cursor(),
            pred: Arc::clone(&self.pred),
            yielding: false,
        })
    }
}

/* ===================== concat ===================== */

pub(crate) struct ConcatSeq<T> {
    pub(crate) first: Arc<dyn Sequence<T>>,
    pub(crate) second: Arc<dyn Sequence<T>>,
}

impl<T: Element> Sequence<T> for ConcatSeq<T> {
    fn cursor(&self) -> Cursor<T> {
        let mut first = self.first.cursor();
        // The second cursor is only created once the first is exhausted.
        let second = Arc::clone(&self.second);
        let mut tail: Option<Cursor<T>> = None;
        Cursor::from_fn(move || {
            if tail.is_none() {
                if let Some(elem) = first.try_next()? {
                    return Ok(Some(elem));
                }
                tail = Some(second.cursor());
            }
            match tail.as_mut() {
                Some(rest) => rest.try_next(),
                None => Ok(None),
            }
        })
    }

    fn known_len(&self) -> Option<usize> {
        self.first
            .known_len()
            .zip(self.second.known_len())
            .and_then(|(a, b)| a.checked_add(b))
    }

    fn supports_random_access(&self) -> bool {
        self.first.supports_random_access() && self.second.supports_random_access()
    }

    fn element(&self, index: usize) -> Option<T> {
        let split = self.first.known_len()?;
        if index < split {
            self.first.element(index)
        } else {
            self.second.element(index - split)
        }
    }
}

/* ===================== default_if_empty ===================== */

struct DefaultIfEmptySeq<T> {
    up: Arc<dyn Sequence<T>>,
    fallback: T,
}

impl<T: Element> Sequence<T> for DefaultIfEmptySeq<T> {
    fn cursor(&self) -> Cursor<T> {
        let mut up = self.up.cursor();
        let mut fallback = Some(self.fallback.clone());
        Cursor::from_fn(move || match up.try_next()? {
            Some(elem) => {
                fallback = None;
                Ok(Some(elem))
            }
            None => Ok(fallback.take()),
        })
    }

    fn known_len(&self) -> Option<usize> {
        self.up.known_len().map(|len| len.max(1))
    }
}

/* ===================== cast / of_type ===================== */

struct CastSeq<T, U> {
    up: Arc<dyn Sequence<T>>,
    lenient: bool,
    _u: PhantomData<fn() -> U>,
}

impl<T, U> Sequence<U> for CastSeq<T, U>
where
    T: Element,
    U: Element + TryFrom<T>,
{
    fn cursor(&self) -> Cursor<U> {
        let mut up = self.up.cursor();
        let lenient = self.lenient;
        Cursor::from_fn(move || {
            while let Some(elem) = up.try_next()? {
                match U::try_from(elem) {
                    Ok(out) => return Ok(Some(out)),
                    Err(_) if lenient => continue,
                    Err(_) => {
                        return Err(QueryError::InvalidCast {
                            from: TypeTag::of::<T>().name,
                            to: TypeTag::of::<U>().name,
                        });
                    }
                }
            }
            Ok(None)
        })
    }

    fn known_len(&self) -> Option<usize> {
        if self.lenient {
            None
        } else {
            self.up.known_len()
        }
    }
}

/* ===================== Queryable API ===================== */

impl<T: Element> Queryable<T> {
    /// Keep the elements for which `pred` holds.
    ///
    /// Pulling one element advances upstream only until the next match.
    #[must_use]
    pub fn filter<F>(&self, pred: F) -> Queryable<T>
    where
        F: Fn(&T) -> bool + Send + Sync + 'static,
    {
        Queryable::new(FilterSeq {
            up: self.sequence(),
            pred: Arc::new(pred),
        })
    }

    /// Transform each element, one to one, preserving order.
    #[must_use]
    pub fn map<O, F>(&self, f: F) -> Queryable<O>
    where
        O: Element,
        F: Fn(&T) -> O + Send + Sync + 'static,
    {
        Queryable::new(MapSeq {
            up: self.sequence(),
            f: Arc::new(f),
        })
    }

    /// Map each element to a sub-sequence and flatten the results.
    ///
    /// ```
    /// use ironquery::*;
    /// let words = from_vec(vec!["ab", "", "c"])
    ///     .flat_map(|s: &&str| s.chars().collect::<Vec<_>>());
    /// assert_eq!(words.to_list().unwrap(), vec!['a', 'b', 'c']);
    /// ```
    #[must_use]
    pub fn flat_map<O, S, F>(&self, f: F) -> Queryable<O>
    where
        O: Element,
        S: IntoSequence<O> + 'static,
        F: Fn(&T) -> S + Send + Sync + 'static,
    {
        Queryable::new(FlatMapSeq {
            up: self.sequence(),
            f: Arc::new(move |elem: &T| f(elem).into_sequence()),
        })
    }

    /// At most the first `n` elements.
    #[must_use]
    pub fn take(&self, n: usize) -> Queryable<T> {
        Queryable::new(TakeSeq {
            up: self.sequence(),
            n,
        })
    }

    /// Elements up to (not including) the first one failing `pred`.
    /// Stops for good at that element.
    #[must_use]
    pub fn take_while<F>(&self, pred: F) -> Queryable<T>
    where
        F: Fn(&T) -> bool + Send + Sync + 'static,
    {
        Queryable::new(TakeWhileSeq {
            up: self.sequence(),
            pred: Arc::new(pred),
        })
    }

    /// Everything after the first `n` elements.
    #[must_use]
    pub fn skip(&self, n: usize) -> Queryable<T> {
        Queryable::new(SkipSeq {
            up: self.sequence(),
            n,
        })
    }

    /// Drop elements while `pred` holds; from the first failure on, yield
    /// every element regardless of `pred`.
    #[must_use]
    pub fn skip_while<F>(&self, pred: F) -> Queryable<T>
    where
        F: Fn(&T) -> bool + Send + Sync + 'static,
    {
        Queryable::new(SkipWhileSeq {
            up: self.sequence(),
            pred: Arc::new(pred),
        })
    }

    /// All elements of `self`, then all elements of `other`.
    #[must_use]
    pub fn concat<S>(&self, other: S) -> Queryable<T>
    where
        S: IntoSequence<T>,
    {
        Queryable::new(ConcatSeq {
            first: self.sequence(),
            second: other.into_sequence(),
        })
    }

    /// The elements of `self`, or just `value` if `self` is empty.
    #[must_use]
    pub fn default_if_empty(&self, value: T) -> Queryable<T> {
        Queryable::new(DefaultIfEmptySeq {
            up: self.sequence(),
            fallback: value,
        })
    }

    /// Convert each element with `TryFrom`.
    ///
    /// Conversion happens as elements are pulled; the first element that
    /// does not convert fails the traversal with [`QueryError::InvalidCast`].
    #[must_use]
    pub fn cast<U>(&self) -> Queryable<U>
    where
        U: Element + TryFrom<T>,
    {
        Queryable::new(CastSeq {
            up: self.sequence(),
            lenient: false,
            _u: PhantomData,
        })
    }

    /// Convert each element with `TryFrom`, dropping the ones that do not
    /// convert.
    #[must_use]
    pub fn of_type<U>(&self) -> Queryable<U>
    where
        U: Element + TryFrom<T>,
    {
        Queryable::new(CastSeq {
            up: self.sequence(),
            lenient: true,
            _u: PhantomData,
        })
    }
}
