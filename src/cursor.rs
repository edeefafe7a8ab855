//! One-shot traversal state for a [`Sequence`](crate::sequence::Sequence).
//!
//! Every operator implements exactly one method, [`FindNext::find_next`],
//! which produces the next element or reports exhaustion. [`Cursor`] wraps
//! that producer with a single-element lookahead so that `has_next` can be
//! asked any number of times without skipping or duplicating elements, and
//! so that an exhausted producer is never polled again.

use crate::error::{QueryError, Result};

/// The single extension point of a lazy operator.
///
/// Return `Ok(Some(elem))` for the next element, `Ok(None)` once the
/// operator is exhausted. After returning `None` or an error the producer is
/// not called again by its owning [`Cursor`].
pub trait FindNext<T> {
    fn find_next(&mut self) -> Result<Option<T>>;
}

struct FnProducer<F>(F);

impl<T, F> FindNext<T> for FnProducer<F>
where
    F: FnMut() -> Result<Option<T>>,
{
    fn find_next(&mut self) -> Result<Option<T>> {
        (self.0)()
    }
}

/// A fresh, stateful traversal of a sequence.
///
/// Cursors are cheap to create and are never shared: each consumer asks the
/// sequence for its own cursor. A cursor also implements [`Iterator`] with
/// `Item = Result<T>`; the first error ends the traversal.
pub struct Cursor<T> {
    producer: Box<dyn FindNext<T>>,
    peeked: Option<T>,
    ended: bool,
}

impl<T: 'static> Cursor<T> {
    /// Wrap a producer.
    pub fn new<P>(producer: P) -> Self
    where
        P: FindNext<T> + 'static,
    {
        Self {
            producer: Box::new(producer),
            peeked: None,
            ended: false,
        }
    }

    /// Wrap a closure producer; handy for small adapters.
    pub fn from_fn<F>(f: F) -> Self
    where
        F: FnMut() -> Result<Option<T>> + 'static,
    {
        Self::new(FnProducer(f))
    }

    /// A cursor that is exhausted from the start.
    pub fn exhausted() -> Self {
        Self {
            producer: Box::new(FnProducer(|| -> Result<Option<T>> { Ok(None) })),
            peeked: None,
            ended: true,
        }
    }

    /// Whether another element is available. Does not consume it.
    ///
    /// # Errors
    /// Propagates an error raised by an upstream operator while looking ahead.
    pub fn has_next(&mut self) -> Result<bool> {
        if self.peeked.is_some() {
            return Ok(true);
        }
        self.peeked = self.pull()?;
        Ok(self.peeked.is_some())
    }

    /// Consume the next element, or `None` once exhausted.
    ///
    /// # Errors
    /// Propagates an error raised by an upstream operator.
    pub fn try_next(&mut self) -> Result<Option<T>> {
        match self.peeked.take() {
            Some(elem) => Ok(Some(elem)),
            None => self.pull(),
        }
    }

    /// Consume the next element.
    ///
    /// # Errors
    /// [`QueryError::NoSuchElement`] when the cursor is exhausted, otherwise
    /// whatever an upstream operator raised.
    pub fn next_element(&mut self) -> Result<T> {
        self.try_next()?.ok_or_else(|| {
            QueryError::no_such_element(
                "no more elements in cursor; check has_next() before calling next_element()",
            )
        })
    }

    /// Whether the cursor has reported exhaustion (or an error).
    pub fn is_ended(&self) -> bool {
        self.ended && self.peeked.is_none()
    }

    fn pull(&mut self) -> Result<Option<T>> {
        if self.ended {
            return Ok(None);
        }
        match self.producer.find_next() {
            Ok(Some(elem)) => Ok(Some(elem)),
            Ok(None) => {
                self.ended = true;
                Ok(None)
            }
            Err(e) => {
                self.ended = true;
                Err(e)
            }
        }
    }
}

impl<T: 'static> Iterator for Cursor<T> {
    type Item = Result<T>;

    fn next(&mut self) -> Option<Self::Item> {
        self.try_next().transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counting(limit: u32) -> Cursor<u32> {
        let mut n = 0;
        Cursor::from_fn(move || {
            if n < limit {
                n += 1;
                Ok(Some(n))
            } else {
                Ok(None)
            }
        })
    }

    #[test]
    fn has_next_is_idempotent() {
        let mut c = counting(2);
        assert!(c.has_next().unwrap());
        assert!(c.has_next().unwrap());
        assert_eq!(c.next_element().unwrap(), 1);
        assert_eq!(c.next_element().unwrap(), 2);
        assert!(!c.has_next().unwrap());
        assert!(!c.has_next().unwrap());
    }

    #[test]
    fn exhausted_cursor_stays_exhausted() {
        let mut flip = false;
        // A misbehaving producer that would resume after reporting none.
        let mut c = Cursor::from_fn(move || {
            flip = !flip;
            Ok(if flip { None } else { Some(7) })
        });
        assert!(!c.has_next().unwrap());
        assert_eq!(c.try_next().unwrap(), None);
        assert!(c.is_ended());
    }

    #[test]
    fn next_on_empty_is_no_such_element() {
        let mut c = Cursor::<u32>::exhausted();
        assert!(matches!(
            c.next_element(),
            Err(QueryError::NoSuchElement(_))
        ));
    }

    #[test]
    fn error_ends_iteration() {
        let mut calls = 0;
        let c = Cursor::from_fn(move || {
            calls += 1;
            if calls == 1 {
                Ok(Some(1))
            } else {
                Err(QueryError::not_comparable("boom"))
            }
        });
        let out: Vec<_> = c.collect();
        assert_eq!(out.len(), 2);
        assert!(out[1].is_err());
    }
}
