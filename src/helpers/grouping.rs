//! Grouping operators and the accessors available on any query of groups.
//!
//! `group` and `group_single` return a `Queryable<Group<T>>`, so every other
//! operator (filter, order_by, take, ...) applies to groups as elements. The
//! lookup helpers below are defined for `Queryable<Group<T>>` and stay
//! reachable after ordering, through `OrderedQueryable`'s deref.

use crate::error::Result;
use crate::grouping::{Group, GroupKey, GroupedList, GroupedSeq, KeyPart};
use crate::query::Queryable;
use crate::sequence::Element;
use std::collections::HashMap;
use std::sync::Arc;

impl<T: Element> Queryable<T> {
    /// Partition the elements by a composite key.
    ///
    /// One pass over the source, run on the first pull and cached. Groups
    /// come out in the order their keys were first seen; elements keep
    /// their source order within a group.
    #[must_use]
    pub fn group<F>(&self, key: F) -> Queryable<Group<T>>
    where
        F: Fn(&T) -> GroupKey + Send + Sync + 'static,
    {
        Queryable::new(GroupedSeq::new(self.sequence(), Arc::new(key)))
    }

    /// Partition the elements by a one-part key.
    ///
    /// ```
    /// use ironquery::*;
    /// let staff = from_vec(vec![("A", "X"), ("B", "Y"), ("C", "X")]);
    /// let by_dept = staff.group_single(|e: &(&str, &str)| e.1);
    /// let x = by_dept.get_single("X").unwrap().unwrap();
    /// assert_eq!(x.to_list().unwrap(), vec![("A", "X"), ("C", "X")]);
    /// ```
    #[must_use]
    pub fn group_single<P, F>(&self, key: F) -> Queryable<Group<T>>
    where
        P: Into<KeyPart>,
        F: Fn(&T) -> P + Send + Sync + 'static,
    {
        self.group(move |elem: &T| GroupKey::single(key(elem)))
    }
}

impl<T: Element> Queryable<Group<T>> {
    /// The elements of the first group whose key equals `key`, or `None`
    /// when no group has it.
    pub fn get(&self, key: &GroupKey) -> Result<Option<Queryable<T>>> {
        let found = self.first_where_or_default(|g: &Group<T>| g.key() == key)?;
        Ok(found.map(|g| g.query()))
    }

    /// [`get`](Self::get) with a one-part key.
    pub fn get_single(&self, part: impl Into<KeyPart>) -> Result<Option<Queryable<T>>> {
        self.get(&GroupKey::single(part))
    }

    /// Key to elements. Keys are unique unless the groups were combined
    /// with other groups upstream; a later group then replaces an earlier one.
    pub fn to_group_map(&self) -> Result<HashMap<GroupKey, Vec<T>>> {
        let mut out = HashMap::new();
        for group in self.iter() {
            let (key, elements) = group?.into_parts();
            out.insert(key, elements);
        }
        Ok(out)
    }

    /// Materialize the groups, keeping their order, with lookup by key.
    pub fn to_grouped_list(&self) -> Result<GroupedList<T>> {
        Ok(GroupedList::from_groups(self.to_list()?))
    }
}
