//! Aggregate terminals built on [`CombineFn`].
//!
//! Each call runs one full traversal (except `count` on a sequence whose
//! length is known up front) and folds every element into the combiner.

use crate::combiners::{Average, CombineFn, Count, Max, MaxValue, Min, MinValue, Sum};
use crate::error::Result;
use crate::number::Number;
use crate::query::Queryable;
use crate::sequence::Element;

impl<T: Element> Queryable<T> {
    /// Fold every element into `comb` and return its output.
    pub fn aggregate<C, A, O>(&self, comb: C) -> Result<O>
    where
        C: CombineFn<T, A, O>,
    {
        let mut acc = comb.create();
        for elem in self.iter() {
            comb.add_input(&mut acc, elem?)?;
        }
        comb.finish(acc)
    }

    /// Number of elements. Uses the known length when the source has one.
    pub fn count(&self) -> Result<usize> {
        match self.known_len() {
            Some(len) => Ok(len),
            None => self.aggregate(Count),
        }
    }

    /// Number of elements satisfying `pred`.
    pub fn count_where<F>(&self, pred: F) -> Result<usize>
    where
        F: Fn(&T) -> bool + Send + Sync + 'static,
    {
        self.filter(pred).aggregate(Count)
    }

    /// Sum of `f(elem)`; `Int(0)` when empty.
    pub fn sum_by<V, F>(&self, f: F) -> Result<Number>
    where
        V: Into<Number> + Element,
        F: Fn(&T) -> V + Send + Sync + 'static,
    {
        self.map(f).aggregate(Sum)
    }

    /// Mean of `f(elem)`.
    ///
    /// # Errors
    /// [`QueryError::NoSuchElement`](crate::QueryError::NoSuchElement) when empty.
    pub fn average_by<V, F>(&self, f: F) -> Result<f64>
    where
        V: Into<Number> + Element,
        F: Fn(&T) -> V + Send + Sync + 'static,
    {
        self.map(f).aggregate(Average)
    }

    /// Smallest `f(elem)`, or `None` when empty.
    pub fn min_by_value<V, F>(&self, f: F) -> Result<Option<Number>>
    where
        V: Into<Number> + Element,
        F: Fn(&T) -> V + Send + Sync + 'static,
    {
        self.map(f).aggregate(MinValue)
    }

    /// Largest `f(elem)`, or `None` when empty.
    pub fn max_by_value<V, F>(&self, f: F) -> Result<Option<Number>>
    where
        V: Into<Number> + Element,
        F: Fn(&T) -> V + Send + Sync + 'static,
    {
        self.map(f).aggregate(MaxValue)
    }
}

impl<T: Element + Into<Number>> Queryable<T> {
    /// Sum of the elements; `Int(0)` when empty.
    ///
    /// ```
    /// use ironquery::*;
    /// assert_eq!(from_vec(vec![2, 4, 4, 6]).sum().unwrap(), Number::Int(16));
    /// assert_eq!(from_vec(vec![1.5, 2.0]).sum().unwrap(), Number::Float(3.5));
    /// ```
    pub fn sum(&self) -> Result<Number> {
        self.aggregate(Sum)
    }

    /// Mean of the elements, computed as a running mean.
    ///
    /// # Errors
    /// [`QueryError::NoSuchElement`](crate::QueryError::NoSuchElement) when empty.
    pub fn average(&self) -> Result<f64> {
        self.aggregate(Average)
    }
}

impl<T: Element + PartialOrd> Queryable<T> {
    /// Smallest element.
    ///
    /// # Errors
    /// `NoSuchElement` when empty, `NotComparable` when any element has no
    /// order (NaN).
    pub fn min(&self) -> Result<T> {
        self.aggregate(Min::new())
    }

    /// Largest element.
    ///
    /// # Errors
    /// `NoSuchElement` when empty, `NotComparable` when any element has no
    /// order (NaN).
    pub fn max(&self) -> Result<T> {
        self.aggregate(Max::new())
    }
}
