//! Lightweight runtime type tags.
//!
//! [`TypeTag`] carries a `TypeId` and a readable type name. The `cast`
//! operator uses it to report which conversion failed without threading
//! generic parameters into the error type.

use std::any::{TypeId, type_name};

/// A lightweight runtime type tag for diagnostics.
///
/// ```
/// use ironquery::type_token::TypeTag;
/// let tag = TypeTag::of::<u32>();
/// assert_eq!(tag.name, "u32");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TypeTag {
    /// Stable Rust type identifier.
    pub id: TypeId,
    /// Human-readable type name (best-effort).
    pub name: &'static str,
}

impl TypeTag {
    /// Construct a tag for `T`.
    pub fn of<T: 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: type_name::<T>(),
        }
    }
}
