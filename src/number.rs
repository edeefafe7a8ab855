//! A small numeric value used by `sum`, `average` and the by-value min/max.
//!
//! Integers stay exact while they can: adding two `Int`s stays `Int` unless
//! it overflows. Anything mixed with a `Float`, or an overflowing `Int` sum,
//! widens to `Float`. Comparisons between the two kinds go through `f64`.

use crate::error::{QueryError, Result};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::ops::Add;

#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Number {
    Int(i64),
    Float(f64),
}

impl Number {
    /// The value as `f64` (lossy for very large `Int`s).
    #[allow(clippy::cast_precision_loss)]
    pub fn as_f64(self) -> f64 {
        match self {
            Number::Int(n) => n as f64,
            Number::Float(x) => x,
        }
    }

    /// The value as `i64` if it is an `Int`.
    pub fn as_i64(self) -> Option<i64> {
        match self {
            Number::Int(n) => Some(n),
            Number::Float(_) => None,
        }
    }

    pub fn is_int(self) -> bool {
        matches!(self, Number::Int(_))
    }

    /// Ordering of two numbers. `None` if either is NaN.
    pub fn compare(self, other: Number) -> Option<Ordering> {
        match (self, other) {
            (Number::Int(a), Number::Int(b)) => Some(a.cmp(&b)),
            _ => self.as_f64().partial_cmp(&other.as_f64()),
        }
    }

    /// Like [`compare`](Self::compare), failing with
    /// [`QueryError::NotComparable`] instead of returning `None`.
    pub fn try_compare(self, other: Number) -> Result<Ordering> {
        self.compare(other).ok_or_else(|| {
            QueryError::not_comparable(format!("cannot order {self} and {other}"))
        })
    }
}

impl Default for Number {
    fn default() -> Self {
        Number::Int(0)
    }
}

impl PartialEq for Number {
    fn eq(&self, other: &Self) -> bool {
        self.compare(*other) == Some(Ordering::Equal)
    }
}

impl PartialOrd for Number {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.compare(*other)
    }
}

impl Add for Number {
    type Output = Number;

    fn add(self, rhs: Number) -> Number {
        match (self, rhs) {
            (Number::Int(a), Number::Int(b)) => match a.checked_add(b) {
                Some(sum) => Number::Int(sum),
                None => Number::Float(self.as_f64() + rhs.as_f64()),
            },
            _ => Number::Float(self.as_f64() + rhs.as_f64()),
        }
    }
}

impl std::iter::Sum for Number {
    fn sum<I: Iterator<Item = Number>>(iter: I) -> Number {
        iter.fold(Number::default(), Add::add)
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Int(n) => write!(f, "{n}"),
            Number::Float(x) => write!(f, "{x}"),
        }
    }
}

macro_rules! number_from_exact {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Number {
                fn from(n: $t) -> Self {
                    Number::Int(i64::from(n))
                }
            }
        )*
    };
}

macro_rules! number_from_wide {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Number {
                #[allow(clippy::cast_precision_loss)]
                fn from(n: $t) -> Self {
                    match i64::try_from(n) {
                        Ok(n) => Number::Int(n),
                        Err(_) => Number::Float(n as f64),
                    }
                }
            }
        )*
    };
}

number_from_exact!(i8, i16, i32, i64, u8, u16, u32);
number_from_wide!(u64, usize, isize, i128, u128);

impl From<f32> for Number {
    fn from(x: f32) -> Self {
        Number::Float(f64::from(x))
    }
}

impl From<f64> for Number {
    fn from(x: f64) -> Self {
        Number::Float(x)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn int_addition_stays_exact() {
        let total: Number = [2, 4, 4, 6].into_iter().map(Number::from).sum();
        assert!(total.is_int());
        assert_eq!(total.as_i64(), Some(16));
    }

    #[test]
    fn mixing_or_overflow_widens() {
        assert!(!(Number::Int(1) + Number::Float(0.5)).is_int());
        let big = Number::Int(i64::MAX) + Number::Int(1);
        assert!(!big.is_int());
        assert!(big.as_f64() > 9.2e18);
    }

    #[test]
    fn large_unsigned_widen_to_float() {
        assert!(Number::from(u64::MAX).as_i64().is_none());
        assert_eq!(Number::from(7usize).as_i64(), Some(7));
    }

    #[test]
    fn mixed_comparison_and_nan() {
        assert_eq!(Number::Int(2), Number::Float(2.0));
        assert!(Number::Int(2) < Number::Float(2.5));
        assert!(Number::Float(f64::NAN).compare(Number::Int(1)).is_none());
        assert!(matches!(
            Number::Float(f64::NAN).try_compare(Number::Int(1)),
            Err(QueryError::NotComparable(_))
        ));
    }

    #[test]
    fn empty_sum_is_int_zero() {
        let total: Number = std::iter::empty::<Number>().sum();
        assert_eq!(total.as_i64(), Some(0));
    }
}
