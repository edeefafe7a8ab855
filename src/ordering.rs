//! Ordering criteria for `order_by` / `then_by`.
//!
//! An ordered query owns a list of [`OrderFunc`]s. Two elements compare by
//! folding over that list: the first criterion that does not report
//! `Equal` decides, and its [`Direction`] flips only its own result.
//!
//! Sorting is not streaming: the first pull from an [`OrderedQueryable`]
//! reads the whole upstream into a buffer, sorts it once (stable), and
//! caches it. Every later traversal replays the cached buffer. An infinite
//! upstream never finishes sorting.

use crate::cursor::Cursor;
use crate::error::{QueryError, Result};
use crate::query::Queryable;
use crate::sequence::{Element, IntoSequence, Sequence};
use std::cmp::Ordering;
use std::fmt;
use std::ops::Deref;
use std::sync::{Arc, OnceLock};

/// Sort direction of one criterion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Direction {
    /// Smallest first.
    #[default]
    Ascending,
    /// Largest first.
    Descending,
}

impl Direction {
    pub fn is_ascending(self) -> bool {
        matches!(self, Direction::Ascending)
    }

    /// Reverse `ordering` when descending.
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Direction::Ascending => ordering,
            Direction::Descending => ordering.reverse(),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Ascending => "asc",
            Direction::Descending => "desc",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

type CompareFn<T> = Arc<dyn Fn(&T, &T) -> Option<Ordering> + Send + Sync>;

/// One ordering criterion: a key extractor, a comparator for that key, and
/// a direction. The key type is erased once the criterion is built.
pub struct OrderFunc<T> {
    compare: CompareFn<T>,
    direction: Direction,
}

impl<T> Clone for OrderFunc<T> {
    fn clone(&self) -> Self {
        Self {
            compare: Arc::clone(&self.compare),
            direction: self.direction,
        }
    }
}

impl<T: Element> OrderFunc<T> {
    /// Order by the natural (partial) order of `key(elem)`.
    ///
    /// Keys that do not compare (`NaN`, for instance) make the sort fail with
    /// [`QueryError::NotComparable`].
    ///
    /// `key` runs on both sides of every comparison, so it is called
    /// O(n log n) times per sort. Keep it cheap, or materialize the key
    /// with `map` first.
    pub fn by_key<K, F>(key: F, direction: Direction) -> Self
    where
        K: PartialOrd,
        F: Fn(&T) -> K + Send + Sync + 'static,
    {
        Self {
            compare: Arc::new(move |a: &T, b: &T| key(a).partial_cmp(&key(b))),
            direction,
        }
    }

    /// Order by `key(elem)` using a caller-supplied total order.
    pub fn with_comparator<K, F, C>(key: F, comparator: C, direction: Direction) -> Self
    where
        F: Fn(&T) -> K + Send + Sync + 'static,
        C: Fn(&K, &K) -> Ordering + Send + Sync + 'static,
    {
        Self {
            compare: Arc::new(move |a: &T, b: &T| Some(comparator(&key(a), &key(b)))),
            direction,
        }
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Compare two elements on this criterion alone, direction applied.
    /// `None` when the keys are not comparable.
    pub fn compare(&self, a: &T, b: &T) -> Option<Ordering> {
        (self.compare)(a, b).map(|ord| self.direction.apply(ord))
    }
}

impl<T> fmt::Debug for OrderFunc<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OrderFunc")
            .field("direction", &self.direction)
            .finish_non_exhaustive()
    }
}

/// Lexicographic comparison over `criteria`. Later criteria are consulted
/// only on ties. `None` as soon as a consulted criterion cannot compare.
pub fn compare_by_criteria<T: Element>(
    a: &T,
    b: &T,
    criteria: &[OrderFunc<T>],
) -> Option<Ordering> {
    for criterion in criteria {
        match criterion.compare(a, b)? {
            Ordering::Equal => continue,
            decided => return Some(decided),
        }
    }
    Some(Ordering::Equal)
}

/// Stable sort of `items` by `criteria`.
///
/// A bottom-up merge sort over positions. The first comparison that cannot
/// be decided stops the sort. At most `n * ceil(log2 n)` comparisons are
/// made.
///
/// # Errors
/// [`QueryError::NotComparable`] if any comparison made during the sort
/// could not be decided. `items` is then left untouched.
pub fn stable_sort<T: Element>(items: &mut [T], criteria: &[OrderFunc<T>]) -> Result<()> {
    let len = items.len();
    let mut order: Vec<usize> = (0..len).collect();
    let mut scratch = order.clone();
    let mut width = 1;
    while width < len {
        for start in (0..len).step_by(2 * width) {
            let mid = (start + width).min(len);
            let end = (start + 2 * width).min(len);
            merge_runs(items, criteria, &order[start..mid], &order[mid..end], &mut scratch[start..end])?;
        }
        std::mem::swap(&mut order, &mut scratch);
        width *= 2;
    }
    let sorted: Vec<T> = order.iter().map(|&i| items[i].clone()).collect();
    items.clone_from_slice(&sorted);
    Ok(())
}

/// Merge two sorted runs of positions into `out`. Ties take from `left`.
fn merge_runs<T: Element>(
    items: &[T],
    criteria: &[OrderFunc<T>],
    left: &[usize],
    right: &[usize],
    out: &mut [usize],
) -> Result<()> {
    let (mut l, mut r) = (0, 0);
    for slot in out.iter_mut() {
        let take_right = if l == left.len() {
            true
        } else if r == right.len() {
            false
        } else {
            let ord = compare_by_criteria(&items[right[r]], &items[left[l]], criteria)
                .ok_or_else(|| {
                    QueryError::not_comparable(format!(
                        "elements of type {} have keys without a total order",
                        std::any::type_name::<T>()
                    ))
                })?;
            ord == Ordering::Less
        };
        if take_right {
            *slot = right[r];
            r += 1;
        } else {
            *slot = left[l];
            l += 1;
        }
    }
    Ok(())
}

/* ===================== sorted sequence ===================== */

struct SortInner<T> {
    source: Arc<dyn Sequence<T>>,
    criteria: Vec<OrderFunc<T>>,
    sorted: OnceLock<Arc<Vec<T>>>,
}

impl<T: Element> SortInner<T> {
    fn sorted(&self) -> Result<Arc<Vec<T>>> {
        if let Some(buf) = self.sorted.get() {
            return Ok(Arc::clone(buf));
        }
        let mut items = self.source.cursor().collect::<Result<Vec<T>>>()?;
        stable_sort(&mut items, &self.criteria)?;
        tracing::debug!(
            elements = items.len(),
            criteria = self.criteria.len(),
            "sorted and cached ordered sequence"
        );
        let buf = Arc::new(items);
        let _ = self.sorted.set(Arc::clone(&buf));
        Ok(buf)
    }
}

struct OrderedSeq<T> {
    inner: Arc<SortInner<T>>,
}

impl<T: Element> Sequence<T> for OrderedSeq<T> {
    fn cursor(&self) -> Cursor<T> {
        let inner = Arc::clone(&self.inner);
        let mut buf: Option<Arc<Vec<T>>> = None;
        let mut pos = 0usize;
        Cursor::from_fn(move || {
            if buf.is_none() {
                buf = Some(inner.sorted()?);
            }
            let next = buf.as_ref().and_then(|items| items.get(pos).cloned());
            pos += 1;
            Ok(next)
        })
    }

    fn known_len(&self) -> Option<usize> {
        match self.inner.sorted.get() {
            Some(buf) => Some(buf.len()),
            None => self.inner.source.known_len(),
        }
    }

    fn supports_random_access(&self) -> bool {
        self.inner.sorted.get().is_some()
    }

    fn element(&self, index: usize) -> Option<T> {
        self.inner.sorted.get()?.get(index).cloned()
    }
}

/* ===================== OrderedQueryable ===================== */

/// A query sorted by one or more criteria.
///
/// Dereferences to [`Queryable`], so every operator and terminal applies.
/// `then_by*` consume the ordered query and return it with one more
/// criterion appended; keep chaining on the returned value. Cloning an
/// `OrderedQueryable` and extending the clone leaves the original untouched.
///
/// ```
/// use ironquery::*;
/// let people = from_vec(vec![("bo", 30), ("al", 25), ("cy", 30)]);
/// let sorted = people
///     .order_by_descending(|p: &(&str, i32)| p.1)
///     .then_by(|p: &(&str, i32)| p.0);
/// assert_eq!(
///     sorted.to_list().unwrap(),
///     vec![("bo", 30), ("cy", 30), ("al", 25)]
/// );
/// ```
#[derive(Clone)]
pub struct OrderedQueryable<T> {
    query: Queryable<T>,
    source: Arc<dyn Sequence<T>>,
    criteria: Vec<OrderFunc<T>>,
}

impl<T: Element> OrderedQueryable<T> {
    pub(crate) fn new(source: Arc<dyn Sequence<T>>, criteria: Vec<OrderFunc<T>>) -> Self {
        let query = Queryable::new(OrderedSeq {
            inner: Arc::new(SortInner {
                source: Arc::clone(&source),
                criteria: criteria.clone(),
                sorted: OnceLock::new(),
            }),
        });
        Self {
            query,
            source,
            criteria,
        }
    }

    /// Append a criterion. The result sorts afresh on its first traversal.
    #[must_use]
    pub fn then_by_criterion(mut self, criterion: OrderFunc<T>) -> Self {
        self.criteria.push(criterion);
        Self::new(self.source, self.criteria)
    }

    /// Break ties by the natural order of `key`, ascending.
    #[must_use]
    pub fn then_by<K, F>(self, key: F) -> Self
    where
        K: PartialOrd,
        F: Fn(&T) -> K + Send + Sync + 'static,
    {
        self.then_by_criterion(OrderFunc::by_key(key, Direction::Ascending))
    }

    /// Break ties by `key` compared with `comparator`, ascending.
    #[must_use]
    pub fn then_by_with<K, F, C>(self, key: F, comparator: C) -> Self
    where
        F: Fn(&T) -> K + Send + Sync + 'static,
        C: Fn(&K, &K) -> Ordering + Send + Sync + 'static,
    {
        self.then_by_criterion(OrderFunc::with_comparator(key, comparator, Direction::Ascending))
    }

    /// Break ties by the natural order of `key`, descending.
    #[must_use]
    pub fn then_by_descending<K, F>(self, key: F) -> Self
    where
        K: PartialOrd,
        F: Fn(&T) -> K + Send + Sync + 'static,
    {
        self.then_by_criterion(OrderFunc::by_key(key, Direction::Descending))
    }

    /// Break ties by `key` compared with `comparator`, descending.
    #[must_use]
    pub fn then_by_descending_with<K, F, C>(self, key: F, comparator: C) -> Self
    where
        F: Fn(&T) -> K + Send + Sync + 'static,
        C: Fn(&K, &K) -> Ordering + Send + Sync + 'static,
    {
        self.then_by_criterion(OrderFunc::with_comparator(key, comparator, Direction::Descending))
    }

    /// The criteria, primary first.
    pub fn criteria(&self) -> &[OrderFunc<T>] {
        &self.criteria
    }

    /// Drop the ordering builder and keep the sorted query.
    pub fn into_query(self) -> Queryable<T> {
        self.query
    }
}

impl<T> Deref for OrderedQueryable<T> {
    type Target = Queryable<T>;

    fn deref(&self) -> &Queryable<T> {
        &self.query
    }
}

impl<T: Element> IntoSequence<T> for OrderedQueryable<T> {
    fn into_sequence(self) -> Arc<dyn Sequence<T>> {
        self.query.into_sequence()
    }
}

impl<T: Element> IntoSequence<T> for &OrderedQueryable<T> {
    fn into_sequence(self) -> Arc<dyn Sequence<T>> {
        self.query.sequence()
    }
}

impl<T> fmt::Debug for OrderedQueryable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OrderedQueryable")
            .field("element", &std::any::type_name::<T>())
            .field("criteria", &self.criteria)
            .finish()
    }
}
