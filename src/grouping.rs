//! Grouping types: composite keys, groups, and the single-pass grouping
//! sequence behind `group` / `group_single`.
//!
//! A [`GroupKey`] is an ordered tuple of [`KeyPart`]s. Keys compare, hash and
//! order structurally, part by part. The grouping pass walks the source
//! once, appends each element to the bucket of its key, and keeps buckets in
//! the order their keys were first seen.

use crate::cursor::Cursor;
use crate::error::Result;
use crate::query::Queryable;
use crate::sequence::{Element, Selector, Sequence};
use ordered_float::OrderedFloat;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, OnceLock};

/* ===================== KeyPart ===================== */

/// One comparable component of a [`GroupKey`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum KeyPart {
    Unit,
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float(OrderedFloat<f64>),
    Char(char),
    Str(String),
}

impl fmt::Display for KeyPart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyPart::Unit => f.write_str("()"),
            KeyPart::Bool(b) => write!(f, "{b}"),
            KeyPart::Int(i) => write!(f, "{i}"),
            KeyPart::UInt(u) => write!(f, "{u}"),
            KeyPart::Float(x) => write!(f, "{x}"),
            KeyPart::Char(c) => write!(f, "{c}"),
            KeyPart::Str(s) => f.write_str(s),
        }
    }
}

macro_rules! key_part_from {
    ($variant:ident: $($t:ty),*) => {
        $(
            impl From<$t> for KeyPart {
                fn from(v: $t) -> Self {
                    KeyPart::$variant(v.into())
                }
            }
        )*
    };
}

key_part_from!(Int: i8, i16, i32, i64);
key_part_from!(UInt: u8, u16, u32, u64);
key_part_from!(Float: f64);
key_part_from!(Bool: bool);
key_part_from!(Char: char);
key_part_from!(Str: String, &str);

impl From<()> for KeyPart {
    fn from((): ()) -> Self {
        KeyPart::Unit
    }
}

impl From<f32> for KeyPart {
    fn from(v: f32) -> Self {
        KeyPart::Float(OrderedFloat(f64::from(v)))
    }
}

impl From<usize> for KeyPart {
    fn from(v: usize) -> Self {
        KeyPart::UInt(v as u64)
    }
}

impl From<isize> for KeyPart {
    fn from(v: isize) -> Self {
        KeyPart::Int(v as i64)
    }
}

impl From<&String> for KeyPart {
    fn from(v: &String) -> Self {
        KeyPart::Str(v.clone())
    }
}

/* ===================== GroupKey ===================== */

/// An ordered, fixed-arity tuple of key parts.
///
/// ```
/// use ironquery::*;
/// let a = group_key!("x", 1);
/// let b = GroupKey::new(vec![KeyPart::from("x"), KeyPart::from(1)]);
/// assert_eq!(a, b);
/// assert_eq!(a.to_string(), "(x, 1)");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GroupKey(Vec<KeyPart>);

impl GroupKey {
    pub fn new(parts: Vec<KeyPart>) -> Self {
        Self(parts)
    }

    /// A one-part key.
    pub fn single(part: impl Into<KeyPart>) -> Self {
        Self(vec![part.into()])
    }

    pub fn parts(&self) -> &[KeyPart] {
        &self.0
    }

    pub fn arity(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, index: usize) -> Option<&KeyPart> {
        self.0.get(index)
    }
}

impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("(")?;
        for (i, part) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{part}")?;
        }
        f.write_str(")")
    }
}

impl From<KeyPart> for GroupKey {
    fn from(part: KeyPart) -> Self {
        Self(vec![part])
    }
}

impl FromIterator<KeyPart> for GroupKey {
    fn from_iter<I: IntoIterator<Item = KeyPart>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Build a [`GroupKey`] from values convertible into [`KeyPart`].
#[macro_export]
macro_rules! group_key {
    ($($part:expr),+ $(,)?) => {
        $crate::GroupKey::new(vec![$($crate::KeyPart::from($part)),+])
    };
}

/* ===================== Group ===================== */

/// Elements sharing one key, in source order.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Group<T> {
    key: GroupKey,
    elements: Vec<T>,
}

impl<T> Group<T> {
    pub fn key(&self) -> &GroupKey {
        &self.key
    }

    pub fn elements(&self) -> &[T] {
        &self.elements
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn into_parts(self) -> (GroupKey, Vec<T>) {
        (self.key, self.elements)
    }
}

impl<T: Element> Group<T> {
    /// The group's elements as a new query.
    pub fn query(&self) -> Queryable<T> {
        crate::from_vec(self.elements.clone())
    }
}

/* ===================== GroupedList ===================== */

/// A materialized list of groups, in key discovery order, with lookup by
/// key.
#[derive(Debug, Clone)]
pub struct GroupedList<T> {
    groups: Arc<Vec<Group<T>>>,
    index: Arc<HashMap<GroupKey, usize>>,
}

impl<T> GroupedList<T> {
    pub(crate) fn from_groups(groups: Vec<Group<T>>) -> Self {
        let mut index = HashMap::with_capacity(groups.len());
        for (i, g) in groups.iter().enumerate() {
            index.entry(g.key.clone()).or_insert(i);
        }
        Self {
            groups: Arc::new(groups),
            index: Arc::new(index),
        }
    }

    /// The group with `key`, if any.
    pub fn get(&self, key: &GroupKey) -> Option<&Group<T>> {
        self.index.get(key).and_then(|&i| self.groups.get(i))
    }

    pub fn element_at(&self, index: usize) -> Option<&Group<T>> {
        self.groups.get(index)
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Group<T>> {
        self.groups.iter()
    }
}

/* ===================== grouping pass ===================== */

struct GroupInner<T> {
    source: Arc<dyn Sequence<T>>,
    key: Selector<T, GroupKey>,
    groups: OnceLock<Arc<Vec<Group<T>>>>,
}

impl<T: Element> GroupInner<T> {
    fn groups(&self) -> Result<Arc<Vec<Group<T>>>> {
        if let Some(groups) = self.groups.get() {
            return Ok(Arc::clone(groups));
        }
        let mut slots: HashMap<GroupKey, usize> = HashMap::new();
        let mut groups: Vec<Group<T>> = Vec::new();
        let mut seen = 0usize;
        let mut cursor = self.source.cursor();
        while let Some(elem) = cursor.try_next()? {
            seen += 1;
            let key = (self.key)(&elem);
            match slots.get(&key) {
                Some(&slot) => groups[slot].elements.push(elem),
                None => {
                    slots.insert(key.clone(), groups.len());
                    groups.push(Group {
                        key,
                        elements: vec![elem],
                    });
                }
            }
        }
        tracing::debug!(elements = seen, groups = groups.len(), "grouping pass complete");
        let groups = Arc::new(groups);
        let _ = self.groups.set(Arc::clone(&groups));
        Ok(groups)
    }
}

/// Groups of the source, computed on the first pull and replayed afterwards.
pub(crate) struct GroupedSeq<T> {
    inner: Arc<GroupInner<T>>,
}

impl<T: Element> GroupedSeq<T> {
    pub(crate) fn new(source: Arc<dyn Sequence<T>>, key: Selector<T, GroupKey>) -> Self {
        Self {
            inner: Arc::new(GroupInner {
                source,
                key,
                groups: OnceLock::new(),
            }),
        }
    }
}

impl<T: Element> Sequence<Group<T>> for GroupedSeq<T> {
    fn cursor(&self) -> Cursor<Group<T>> {
        let inner = Arc::clone(&self.inner);
        let mut groups: Option<Arc<Vec<Group<T>>>> = None;
        let mut pos = 0usize;
        Cursor::from_fn(move || {
            if groups.is_none() {
                groups = Some(inner.groups()?);
            }
            let next = groups.as_ref().and_then(|g| g.get(pos).cloned());
            pos += 1;
            Ok(next)
        })
    }

    fn known_len(&self) -> Option<usize> {
        self.inner.groups.get().map(|g| g.len())
    }

    fn supports_random_access(&self) -> bool {
        self.inner.groups.get().is_some()
    }

    fn element(&self, index: usize) -> Option<Group<T>> {
        self.inner.groups.get()?.get(index).cloned()
    }
}
