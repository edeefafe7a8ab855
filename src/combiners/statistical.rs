//! Statistical combiners: `Average`

use crate::combiners::CombineFn;
use crate::error::{QueryError, Result};
use crate::number::Number;

/* ===================== Average ===================== */

/// Arithmetic mean as `f64`.
///
/// Values must convert into [`Number`].
///
/// - Accumulator: `(running_mean, count)`
/// - Output: `f64`, or [`QueryError::NoSuchElement`] for no input
///
/// The mean is updated incrementally (`mean += (x - mean) / n`) so the
/// accumulator never holds the full sum.
#[derive(Clone, Copy, Debug, Default)]
pub struct Average;

impl<V: Into<Number>> CombineFn<V, (f64, u64), f64> for Average {
    fn create(&self) -> (f64, u64) {
        (0.0, 0)
    }

    #[allow(clippy::cast_precision_loss)]
    fn add_input(&self, acc: &mut (f64, u64), v: V) -> Result<()> {
        acc.1 += 1;
        acc.0 += (v.into().as_f64() - acc.0) / acc.1 as f64;
        Ok(())
    }

    fn finish(&self, acc: (f64, u64)) -> Result<f64> {
        if acc.1 == 0 {
            Err(QueryError::no_such_element("average of an empty sequence"))
        } else {
            Ok(acc.0)
        }
    }
}
