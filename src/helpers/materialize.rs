//! Terminals that collect a full traversal into an owned container.

use crate::error::Result;
use crate::primitive::PrimitiveArrays;
use crate::query::Queryable;
use crate::sequence::Element;
use std::collections::{HashMap, HashSet};
use std::hash::Hash;

impl<T: Element> Queryable<T> {
    /// All elements, in order.
    pub fn to_list(&self) -> Result<Vec<T>> {
        let mut out = Vec::with_capacity(self.known_len().unwrap_or(0));
        for elem in self.iter() {
            out.push(elem?);
        }
        Ok(out)
    }

    /// All elements as a boxed slice.
    pub fn to_array(&self) -> Result<Box<[T]>> {
        Ok(self.to_list()?.into_boxed_slice())
    }

    /// `key(elem) -> value(elem)` for every element. When two elements share
    /// a key, the later one wins.
    pub fn to_map<K, V, FK, FV>(&self, key: FK, value: FV) -> Result<HashMap<K, V>>
    where
        K: Eq + Hash,
        FK: Fn(&T) -> K,
        FV: Fn(&T) -> V,
    {
        let mut out = HashMap::new();
        for elem in self.iter() {
            let elem = elem?;
            out.insert(key(&elem), value(&elem));
        }
        Ok(out)
    }

    /// `key(elem) -> elem` for every element; later duplicates win.
    pub fn to_map_by_key<K, FK>(&self, key: FK) -> Result<HashMap<K, T>>
    where
        K: Eq + Hash,
        FK: Fn(&T) -> K,
    {
        let mut out = HashMap::new();
        for elem in self.iter() {
            let elem = elem?;
            out.insert(key(&elem), elem);
        }
        Ok(out)
    }

    /// Materialize once and offer narrowing conversions into primitive
    /// arrays.
    ///
    /// ```
    /// use ironquery::*;
    /// let arrays = from_vec(vec![1.9f64, -2.5, 300.0]).to_primitive_array()?;
    /// assert_eq!(arrays.i32_array(), vec![1, -2, 300]);
    /// assert_eq!(arrays.i8_array(), vec![1, -2, 127]);
    /// # Ok::<(), QueryError>(())
    /// ```
    pub fn to_primitive_array(&self) -> Result<PrimitiveArrays<T>> {
        Ok(PrimitiveArrays::new(self.to_list()?))
    }
}

impl<T: Element + Eq + Hash> Queryable<T> {
    /// The distinct elements as a set.
    pub fn to_set(&self) -> Result<HashSet<T>> {
        self.iter().collect()
    }
}
