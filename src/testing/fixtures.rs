//! Pre-built sources and datasets for common testing scenarios.

use crate::cursor::Cursor;
use crate::query::Queryable;
use crate::sequence::{Element, Sequence};
use crate::sources::from_fn;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex, PoisonError};

/// The natural numbers `0, 1, 2, ...`, without end.
///
/// # Example
///
/// ```
/// use ironquery::testing::naturals;
///
/// assert_eq!(naturals().skip(5).first().unwrap(), 5);
/// ```
#[must_use]
pub fn naturals() -> Queryable<u64> {
    from_fn(|| 0u64..)
}

/// One row of the sample employee table.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Employee {
    pub name: String,
    pub dept: String,
    pub age: u32,
    pub salary: u32,
}

impl Employee {
    pub fn new(name: &str, dept: &str, age: u32, salary: u32) -> Self {
        Self {
            name: name.to_string(),
            dept: dept.to_string(),
            age,
            salary,
        }
    }
}

/// Eight employees over three departments, with repeated ages and salaries
/// so that secondary sort keys matter.
///
/// # Example
///
/// ```
/// use ironquery::testing::sample_employees;
///
/// let staff = sample_employees();
/// assert_eq!(staff.len(), 8);
/// ```
#[must_use]
pub fn sample_employees() -> Vec<Employee> {
    vec![
        Employee::new("Alice", "Engineering", 34, 120_000),
        Employee::new("Bob", "Sales", 28, 65_000),
        Employee::new("Carol", "Engineering", 41, 135_000),
        Employee::new("Dan", "Support", 28, 48_000),
        Employee::new("Erin", "Sales", 45, 90_000),
        Employee::new("Frank", "Engineering", 28, 98_000),
        Employee::new("Grace", "Support", 39, 52_000),
        Employee::new("Heidi", "Sales", 34, 65_000),
    ]
}

/* ===================== TouchTracker ===================== */

type Produce<T> = Arc<dyn Fn(usize) -> Option<T> + Send + Sync>;

/// A source that records the position of every element it hands out.
///
/// The source deliberately reports no length and no random access, so every
/// operator has to pull through a cursor.
pub struct TouchTracker<T> {
    produce: Produce<T>,
    touched: Arc<Mutex<Vec<usize>>>,
}

impl<T: Element> TouchTracker<T> {
    /// Track pulls from a finite list.
    pub fn from_vec(items: Vec<T>) -> Self {
        let items = Arc::new(items);
        Self::with_producer(Arc::new(move |i: usize| items.get(i).cloned()))
    }

    /// Track pulls from the endless sequence `f(0), f(1), ...`.
    pub fn unbounded<F>(f: F) -> Self
    where
        F: Fn(usize) -> T + Send + Sync + 'static,
    {
        Self::with_producer(Arc::new(move |i: usize| Some(f(i))))
    }

    fn with_producer(produce: Produce<T>) -> Self {
        Self {
            produce,
            touched: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// A query over the tracked source. Every traversal records into the
    /// same log.
    pub fn query(&self) -> Queryable<T> {
        Queryable::new(TrackedSeq {
            produce: Arc::clone(&self.produce),
            touched: Arc::clone(&self.touched),
        })
    }

    /// Positions handed out so far, in pull order.
    pub fn touched(&self) -> Vec<usize> {
        self.touched
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn touch_count(&self) -> usize {
        self.touched
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Forget every recorded pull.
    pub fn reset(&self) {
        self.touched
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

struct TrackedSeq<T> {
    produce: Produce<T>,
    touched: Arc<Mutex<Vec<usize>>>,
}

impl<T: Element> Sequence<T> for TrackedSeq<T> {
    fn cursor(&self) -> Cursor<T> {
        let produce = Arc::clone(&self.produce);
        let touched = Arc::clone(&self.touched);
        let mut pos = 0usize;
        Cursor::from_fn(move || {
            let next = produce(pos);
            if next.is_some() {
                touched
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .push(pos);
                pos += 1;
            }
            Ok(next)
        })
    }
}
