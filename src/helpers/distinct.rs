//! Set-like operators: `distinct`, `union`, `intersect` and `except`, each in
//! a default-equality form and an `_by` form taking a custom equivalence.
//!
//! # Cost
//! The default-equality forms keep a `HashSet` and check membership in O(1)
//! on average. A custom equivalence is not necessarily compatible with any
//! hash, so the `_by` forms keep a plain list and compare against every
//! retained element: O(k) per element, O(n·k) overall.
//!
//! `intersect` and `except` materialize `other` once, on the first pull from
//! the first traversal, and reuse that lookup for every later traversal.
//! Elements of `self` are streamed and keep their duplicates.

use crate::cursor::{Cursor, FindNext};
use crate::error::Result;
use crate::helpers::stateless::ConcatSeq;
use crate::query::Queryable;
use crate::sequence::{Element, Equivalence, IntoSequence, Sequence};
use std::collections::HashSet;
use std::hash::Hash;
use std::sync::{Arc, OnceLock};

/* ===================== seen-sets ===================== */

/// Membership test over a set of elements.
trait Membership<T>: Send + Sync {
    fn contains(&self, elem: &T) -> bool;
}

/// Elements collected for a custom-equivalence membership test.
struct Listed<T> {
    items: Vec<T>,
    eq: Equivalence<T>,
}

impl<T: Element> Membership<T> for Listed<T> {
    fn contains(&self, elem: &T) -> bool {
        self.items.iter().any(|seen| (self.eq)(seen, elem))
    }
}

impl<T: Element + Eq + Hash> Membership<T> for HashSet<T> {
    fn contains(&self, elem: &T) -> bool {
        HashSet::contains(self, elem)
    }
}

/* ===================== distinct ===================== */

struct DistinctSeq<T> {
    up: Arc<dyn Sequence<T>>,
}

struct DistinctCursor<T> {
    up: Cursor<T>,
    seen: HashSet<T>,
}

impl<T: Element + Eq + Hash> FindNext<T> for DistinctCursor<T> {
    fn find_next(&mut self) -> Result<Option<T>> {
        while let Some(elem) = self.up.try_next()? {
            if !self.seen.contains(&elem) {
                self.seen.insert(elem.clone());
                return Ok(Some(elem));
            }
        }
        Ok(None)
    }
}

impl<T: Element + Eq + Hash> Sequence<T> for DistinctSeq<T> {
    fn cursor(&self) -> Cursor<T> {
        Cursor::new(DistinctCursor {
            up: self.up.cursor(),
            seen: HashSet::new(),
        })
    }
}

struct DistinctBySeq<T> {
    up: Arc<dyn Sequence<T>>,
    eq: Equivalence<T>,
}

struct DistinctByCursor<T> {
    up: Cursor<T>,
    seen: Listed<T>,
}

impl<T: Element> FindNext<T> for DistinctByCursor<T> {
    fn find_next(&mut self) -> Result<Option<T>> {
        while let Some(elem) = self.up.try_next()? {
            if !self.seen.contains(&elem) {
                self.seen.items.push(elem.clone());
                return Ok(Some(elem));
            }
        }
        Ok(None)
    }
}

impl<T: Element> Sequence<T> for DistinctBySeq<T> {
    fn cursor(&self) -> Cursor<T> {
        Cursor::new(DistinctByCursor {
            up: self.up.cursor(),
            seen: Listed {
                items: Vec::new(),
                eq: Arc::clone(&self.eq),
            },
        })
    }
}

/* ===================== intersect / except ===================== */

type BuildLookup<T> = Arc<dyn Fn(Vec<T>) -> Arc<dyn Membership<T>> + Send + Sync>;

struct LookupInner<T> {
    up: Arc<dyn Sequence<T>>,
    other: Arc<dyn Sequence<T>>,
    build: BuildLookup<T>,
    lookup: OnceLock<Arc<dyn Membership<T>>>,
    /// `true` keeps elements found in `other` (intersect), `false` keeps the
    /// rest (except).
    keep_found: bool,
    op: &'static str,
}

impl<T: Element> LookupInner<T> {
    fn lookup(&self) -> Result<Arc<dyn Membership<T>>> {
        if let Some(found) = self.lookup.get() {
            return Ok(Arc::clone(found));
        }
        let items = self.other.cursor().collect::<Result<Vec<T>>>()?;
        tracing::trace!(op = self.op, other_len = items.len(), "materialized lookup");
        let built = (self.build)(items);
        // A concurrent traversal may have won the race; either lookup is valid.
        let _ = self.lookup.set(Arc::clone(&built));
        Ok(built)
    }
}

struct LookupSeq<T> {
    inner: Arc<LookupInner<T>>,
}

struct LookupCursor<T> {
    inner: Arc<LookupInner<T>>,
    up: Cursor<T>,
    lookup: Option<Arc<dyn Membership<T>>>,
}

impl<T: Element> FindNext<T> for LookupCursor<T> {
    fn find_next(&mut self) -> Result<Option<T>> {
        let lookup = match &self.lookup {
            Some(lookup) => Arc::clone(lookup),
            None => {
                let lookup = self.inner.lookup()?;
                self.lookup = Some(Arc::clone(&lookup));
                lookup
            }
        };
        while let Some(elem) = self.up.try_next()? {
            if lookup.contains(&elem) == self.inner.keep_found {
                return Ok(Some(elem));
            }
        }
        Ok(None)
    }
}

impl<T: Element> Sequence<T> for LookupSeq<T> {
    fn cursor(&self) -> Cursor<T> {
        Cursor::new(LookupCursor {
            inner: Arc::clone(&self.inner),
            up: self.inner.up.cursor(),
            lookup: None,
        })
    }
}

fn hashed<T: Element + Eq + Hash>() -> BuildLookup<T> {
    Arc::new(|items: Vec<T>| {
        let set: HashSet<T> = items.into_iter().collect();
        Arc::new(set) as Arc<dyn Membership<T>>
    })
}

fn listed<T: Element>(eq: Equivalence<T>) -> BuildLookup<T> {
    Arc::new(move |items: Vec<T>| {
        Arc::new(Listed {
            items,
            eq: Arc::clone(&eq),
        }) as Arc<dyn Membership<T>>
    })
}

impl<T: Element> Queryable<T> {
    fn with_lookup(
        &self,
        other: Arc<dyn Sequence<T>>,
        build: BuildLookup<T>,
        keep_found: bool,
        op: &'static str,
    ) -> Queryable<T> {
        Queryable::new(LookupSeq {
            inner: Arc::new(LookupInner {
                up: self.sequence(),
                other,
                build,
                lookup: OnceLock::new(),
                keep_found,
                op,
            }),
        })
    }

    /// Drop elements equivalent (by `eq`) to one already yielded.
    ///
    /// Keeps the first occurrence. Membership is checked by a linear scan
    /// over the elements yielded so far.
    #[must_use]
    pub fn distinct_by<F>(&self, eq: F) -> Queryable<T>
    where
        F: Fn(&T, &T) -> bool + Send + Sync + 'static,
    {
        Queryable::new(DistinctBySeq {
            up: self.sequence(),
            eq: Arc::new(eq),
        })
    }

    /// Distinct elements of `self` followed by `other`, by `eq`.
    #[must_use]
    pub fn union_by<S, F>(&self, other: S, eq: F) -> Queryable<T>
    where
        S: IntoSequence<T>,
        F: Fn(&T, &T) -> bool + Send + Sync + 'static,
    {
        self.concat(other).distinct_by(eq)
    }

    /// Elements of `self` with an equivalent (by `eq`) counterpart in `other`.
    #[must_use]
    pub fn intersect_by<S, F>(&self, other: S, eq: F) -> Queryable<T>
    where
        S: IntoSequence<T>,
        F: Fn(&T, &T) -> bool + Send + Sync + 'static,
    {
        self.with_lookup(other.into_sequence(), listed(Arc::new(eq)), true, "intersect_by")
    }

    /// Elements of `self` with no equivalent (by `eq`) counterpart in `other`.
    #[must_use]
    pub fn except_by<S, F>(&self, other: S, eq: F) -> Queryable<T>
    where
        S: IntoSequence<T>,
        F: Fn(&T, &T) -> bool + Send + Sync + 'static,
    {
        self.with_lookup(other.into_sequence(), listed(Arc::new(eq)), false, "except_by")
    }
}

impl<T: Element + Eq + Hash> Queryable<T> {
    /// Drop repeated elements, keeping the first occurrence of each.
    ///
    /// ```
    /// use ironquery::*;
    /// let q = from_vec(vec![1, 1, 2, 3, 3, 3]).distinct();
    /// assert_eq!(q.to_list().unwrap(), vec![1, 2, 3]);
    /// ```
    #[must_use]
    pub fn distinct(&self) -> Queryable<T> {
        Queryable::new(DistinctSeq {
            up: self.sequence(),
        })
    }

    /// Distinct elements of `self` followed by `other`.
    #[must_use]
    pub fn union<S>(&self, other: S) -> Queryable<T>
    where
        S: IntoSequence<T>,
    {
        Queryable::new(DistinctSeq {
            up: Arc::new(ConcatSeq {
                first: self.sequence(),
                second: other.into_sequence(),
            }),
        })
    }

    /// Elements of `self` that also occur in `other`.
    #[must_use]
    pub fn intersect<S>(&self, other: S) -> Queryable<T>
    where
        S: IntoSequence<T>,
    {
        self.with_lookup(other.into_sequence(), hashed(), true, "intersect")
    }

    /// Elements of `self` that do not occur in `other`.
    #[must_use]
    pub fn except<S>(&self, other: S) -> Queryable<T>
    where
        S: IntoSequence<T>,
    {
        self.with_lookup(other.into_sequence(), hashed(), false, "except")
    }
}
