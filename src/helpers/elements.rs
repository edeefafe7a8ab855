//! Element accessors and short-circuiting predicates.
//!
//! Accessors come in three forms: a throwing one that fails with
//! `NoSuchElement`, an `_or_default` one returning `Option`, and an `_or`
//! one taking an explicit fallback. `first`, `exists` and friends stop
//! pulling as soon as the answer is known.
//!
//! `single` fails on zero *and* on more than one match, with the same
//! `NoSuchElement` kind; `single_or_default` returns `None` in both cases.

use crate::error::{QueryError, Result};
use crate::query::Queryable;
use crate::sequence::{Element, IntoSequence};

/// How many matches a `single` scan saw.
enum Single<T> {
    None,
    One(T),
    Many,
}

impl<T: Element> Queryable<T> {
    fn find_first(&self, pred: impl Fn(&T) -> bool) -> Result<Option<T>> {
        for elem in self.iter() {
            let elem = elem?;
            if pred(&elem) {
                return Ok(Some(elem));
            }
        }
        Ok(None)
    }

    fn find_last(&self, pred: impl Fn(&T) -> bool) -> Result<Option<T>> {
        let mut last = None;
        for elem in self.iter() {
            let elem = elem?;
            if pred(&elem) {
                last = Some(elem);
            }
        }
        Ok(last)
    }

    fn find_single(&self, pred: impl Fn(&T) -> bool) -> Result<Single<T>> {
        let mut found = Single::None;
        for elem in self.iter() {
            let elem = elem?;
            if pred(&elem) {
                if matches!(found, Single::One(_)) {
                    return Ok(Single::Many);
                }
                found = Single::One(elem);
            }
        }
        Ok(found)
    }

    /* ---------- first ---------- */

    /// The first element.
    pub fn first(&self) -> Result<T> {
        self.first_or_default()?
            .ok_or_else(|| QueryError::no_such_element("first of an empty sequence"))
    }

    pub fn first_or_default(&self) -> Result<Option<T>> {
        self.cursor().try_next()
    }

    pub fn first_or(&self, default: T) -> Result<T> {
        Ok(self.first_or_default()?.unwrap_or(default))
    }

    /// The first element satisfying `pred`.
    pub fn first_where<F: Fn(&T) -> bool>(&self, pred: F) -> Result<T> {
        self.find_first(pred)?
            .ok_or_else(|| QueryError::no_such_element("no element matches the predicate"))
    }

    pub fn first_where_or_default<F: Fn(&T) -> bool>(&self, pred: F) -> Result<Option<T>> {
        self.find_first(pred)
    }

    pub fn first_where_or<F: Fn(&T) -> bool>(&self, pred: F, default: T) -> Result<T> {
        Ok(self.find_first(pred)?.unwrap_or(default))
    }

    /* ---------- last ---------- */

    /// The last element. Reads it by index when the source supports
    /// random access, otherwise walks the whole sequence.
    pub fn last(&self) -> Result<T> {
        self.last_or_default()?
            .ok_or_else(|| QueryError::no_such_element("last of an empty sequence"))
    }

    pub fn last_or_default(&self) -> Result<Option<T>> {
        if self.seq.supports_random_access() {
            if let Some(len) = self.known_len() {
                return Ok(len.checked_sub(1).and_then(|i| self.seq.element(i)));
            }
        }
        self.find_last(|_| true)
    }

    pub fn last_or(&self, default: T) -> Result<T> {
        Ok(self.last_or_default()?.unwrap_or(default))
    }

    /// The last element satisfying `pred`.
    pub fn last_where<F: Fn(&T) -> bool>(&self, pred: F) -> Result<T> {
        self.find_last(pred)?
            .ok_or_else(|| QueryError::no_such_element("no element matches the predicate"))
    }

    pub fn last_where_or_default<F: Fn(&T) -> bool>(&self, pred: F) -> Result<Option<T>> {
        self.find_last(pred)
    }

    pub fn last_where_or<F: Fn(&T) -> bool>(&self, pred: F, default: T) -> Result<T> {
        Ok(self.find_last(pred)?.unwrap_or(default))
    }

    /* ---------- single ---------- */

    /// The only element.
    ///
    /// # Errors
    /// `NoSuchElement` if the sequence is empty or has more than one element.
    pub fn single(&self) -> Result<T> {
        self.single_where(|_| true)
    }

    /// The only element satisfying `pred`.
    ///
    /// # Errors
    /// `NoSuchElement` if no element or more than one element matches.
    pub fn single_where<F: Fn(&T) -> bool>(&self, pred: F) -> Result<T> {
        match self.find_single(pred)? {
            Single::One(elem) => Ok(elem),
            Single::None => Err(QueryError::no_such_element("no element matches")),
            Single::Many => Err(QueryError::no_such_element("more than one element matches")),
        }
    }

    /// The only element, or `None` if there are zero or several.
    pub fn single_or_default(&self) -> Result<Option<T>> {
        self.single_where_or_default(|_| true)
    }

    /// The only element satisfying `pred`, or `None` if zero or several do.
    pub fn single_where_or_default<F: Fn(&T) -> bool>(&self, pred: F) -> Result<Option<T>> {
        Ok(match self.find_single(pred)? {
            Single::One(elem) => Some(elem),
            Single::None | Single::Many => None,
        })
    }

    /* ---------- element_at ---------- */

    /// The element at `index` (zero-based). Answers by index when the source
    /// supports random access, otherwise skips `index` elements.
    pub fn element_at(&self, index: usize) -> Result<T> {
        self.element_at_or_default(index)?.ok_or_else(|| {
            QueryError::no_such_element(format!("no element at index {index}"))
        })
    }

    pub fn element_at_or_default(&self, index: usize) -> Result<Option<T>> {
        if self.seq.supports_random_access() {
            return Ok(self.seq.element(index));
        }
        self.skip(index).first_or_default()
    }

    pub fn element_at_or(&self, index: usize, default: T) -> Result<T> {
        Ok(self.element_at_or_default(index)?.unwrap_or(default))
    }

    /* ---------- predicates ---------- */

    /// Whether there are no elements. Pulls at most one.
    pub fn is_empty(&self) -> Result<bool> {
        if let Some(len) = self.known_len() {
            return Ok(len == 0);
        }
        Ok(!self.cursor().has_next()?)
    }

    /// Whether every element satisfies `pred` (true when empty).
    pub fn all<F: Fn(&T) -> bool>(&self, pred: F) -> Result<bool> {
        Ok(self.find_first(|elem| !pred(elem))?.is_none())
    }

    /// Whether some element satisfies `pred`.
    pub fn exists<F: Fn(&T) -> bool>(&self, pred: F) -> Result<bool> {
        Ok(self.find_first(pred)?.is_some())
    }

    /// Whether some element is equivalent to `value` under `eq`.
    pub fn contains_by<F: Fn(&T, &T) -> bool>(&self, value: &T, eq: F) -> Result<bool> {
        self.exists(|elem| eq(elem, value))
    }

    /// Same length and pairwise equivalent under `eq`, in order.
    pub fn sequence_equals_by<S, F>(&self, other: S, eq: F) -> Result<bool>
    where
        S: IntoSequence<T>,
        F: Fn(&T, &T) -> bool,
    {
        let other = other.into_sequence();
        if let (Some(a), Some(b)) = (self.known_len(), other.known_len()) {
            if a != b {
                return Ok(false);
            }
        }
        let mut left = self.cursor();
        let mut right = other.cursor();
        loop {
            match (left.try_next()?, right.try_next()?) {
                (None, None) => return Ok(true),
                (Some(a), Some(b)) if eq(&a, &b) => continue,
                _ => return Ok(false),
            }
        }
    }
}

impl<T: Element + PartialEq> Queryable<T> {
    /// Whether some element equals `value`.
    pub fn contains(&self, value: &T) -> Result<bool> {
        self.exists(|elem| elem == value)
    }

    /// Same length and pairwise equal, in order.
    ///
    /// ```
    /// use ironquery::*;
    /// let q = from_vec(vec![1, 2, 3]);
    /// assert!(q.sequence_equals(range(1, 3)?.map(|x: &i64| *x as i32))?);
    /// assert!(!q.sequence_equals(vec![1, 2])?);
    /// # Ok::<(), QueryError>(())
    /// ```
    pub fn sequence_equals<S>(&self, other: S) -> Result<bool>
    where
        S: IntoSequence<T>,
    {
        self.sequence_equals_by(other, |a, b| a == b)
    }
}
