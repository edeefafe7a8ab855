//! Narrowing conversions from a materialized query into primitive arrays.
//!
//! Conversions follow Rust's `as` rules (truncating, saturating for floats
//! into integers), not checked or lossless casts. `bool` converts to `0`/`1`
//! and numbers convert to `bool` as `!= 0`. Numbers convert to `char` by
//! code point; invalid code points become `'\0'`.

use crate::number::Number;

/// A value that narrows into every primitive array kind.
pub trait PrimitiveValue {
    fn as_i8(&self) -> i8;
    fn as_i16(&self) -> i16;
    fn as_i32(&self) -> i32;
    fn as_i64(&self) -> i64;
    fn as_f32(&self) -> f32;
    fn as_f64(&self) -> f64;
    fn as_bool(&self) -> bool;
    fn as_char(&self) -> char;
}

fn code_point(v: u32) -> char {
    char::from_u32(v).unwrap_or('\0')
}

macro_rules! primitive_number {
    ($($t:ty),*) => {
        $(
            #[allow(
                clippy::cast_possible_truncation,
                clippy::cast_possible_wrap,
                clippy::cast_precision_loss,
                clippy::cast_sign_loss,
                clippy::cast_lossless
            )]
            impl PrimitiveValue for $t {
                fn as_i8(&self) -> i8 { *self as i8 }
                fn as_i16(&self) -> i16 { *self as i16 }
                fn as_i32(&self) -> i32 { *self as i32 }
                fn as_i64(&self) -> i64 { *self as i64 }
                fn as_f32(&self) -> f32 { *self as f32 }
                fn as_f64(&self) -> f64 { *self as f64 }
                #[allow(clippy::float_cmp)]
                fn as_bool(&self) -> bool { *self != (0 as $t) }
                fn as_char(&self) -> char { code_point(*self as u32) }
            }
        )*
    };
}

primitive_number!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64);

impl PrimitiveValue for bool {
    fn as_i8(&self) -> i8 {
        i8::from(*self)
    }
    fn as_i16(&self) -> i16 {
        i16::from(*self)
    }
    fn as_i32(&self) -> i32 {
        i32::from(*self)
    }
    fn as_i64(&self) -> i64 {
        i64::from(*self)
    }
    fn as_f32(&self) -> f32 {
        f32::from(u8::from(*self))
    }
    fn as_f64(&self) -> f64 {
        f64::from(u8::from(*self))
    }
    fn as_bool(&self) -> bool {
        *self
    }
    fn as_char(&self) -> char {
        code_point(u32::from(*self))
    }
}

impl PrimitiveValue for char {
    fn as_i8(&self) -> i8 {
        u32::from(*self).as_i8()
    }
    fn as_i16(&self) -> i16 {
        u32::from(*self).as_i16()
    }
    fn as_i32(&self) -> i32 {
        u32::from(*self).as_i32()
    }
    fn as_i64(&self) -> i64 {
        i64::from(u32::from(*self))
    }
    fn as_f32(&self) -> f32 {
        u32::from(*self).as_f32()
    }
    fn as_f64(&self) -> f64 {
        f64::from(u32::from(*self))
    }
    fn as_bool(&self) -> bool {
        *self != '\0'
    }
    fn as_char(&self) -> char {
        *self
    }
}

macro_rules! delegate_number {
    ($($method:ident -> $out:ty),*) => {
        $(
            fn $method(&self) -> $out {
                match self {
                    Number::Int(n) => n.$method(),
                    Number::Float(x) => x.$method(),
                }
            }
        )*
    };
}

impl PrimitiveValue for Number {
    delegate_number!(
        as_i8 -> i8,
        as_i16 -> i16,
        as_i32 -> i32,
        as_i64 -> i64,
        as_f32 -> f32,
        as_f64 -> f64,
        as_bool -> bool,
        as_char -> char
    );
}

/// A materialized query, ready to be narrowed into primitive arrays.
///
/// Built by [`Queryable::to_primitive_array`](crate::Queryable::to_primitive_array).
/// Every `*_array` call converts the same buffered elements; the query is
/// not traversed again.
#[derive(Debug, Clone)]
pub struct PrimitiveArrays<T> {
    items: Vec<T>,
}

impl<T> PrimitiveArrays<T> {
    pub(crate) fn new(items: Vec<T>) -> Self {
        Self { items }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

macro_rules! array_methods {
    ($($kind:ident),*) => {
        paste::paste! {
            impl<T: PrimitiveValue> PrimitiveArrays<T> {
                $(
                    #[doc = "Every element narrowed to `" $kind "`."]
                    pub fn [<$kind _array>](&self) -> Vec<$kind> {
                        self.items.iter().map(PrimitiveValue::[<as_ $kind>]).collect()
                    }
                )*
            }
        }
    };
}

array_methods!(i32, i16, i64, f32, f64, i8, bool, char);
