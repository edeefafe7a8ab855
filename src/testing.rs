//! Testing utilities for code built on `ironquery`.
//!
//! - **Assertions**: compare a query's traversal with expected elements
//! - **Fixtures**: an infinite `naturals()` source and a small employee table
//! - **Touch tracking**: a source that records which positions were pulled,
//!   for checking that a query stays lazy
//! - **Debug utilities**: pass-through operators that log through `tracing`
//!
//! # Quick Start
//!
//! ```
//! use ironquery::*;
//! use ironquery::testing::*;
//!
//! let evens = naturals().filter(|n: &u64| n % 2 == 0).take(3);
//! assert_sequence_eq(&evens, &[0, 2, 4]);
//! ```
//!
//! # Laziness checks
//!
//! ```
//! use ironquery::testing::*;
//!
//! let tracker = TouchTracker::from_vec(vec![1, 8, 3, 10, 5]);
//! let first_big = tracker.query().filter(|n: &i32| *n > 5).first().unwrap();
//! assert_eq!(first_big, 8);
//! assert_eq!(tracker.touched(), vec![0, 1]);
//! ```

pub mod assertions;
pub mod debug;
pub mod fixtures;

pub use assertions::*;
pub use debug::*;
pub use fixtures::*;
