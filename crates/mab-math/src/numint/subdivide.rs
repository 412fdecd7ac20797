use std::fmt::Debug;

use super::{Interval, QuadratureError};

/// Splits the current partition into a finer one for the next refinement.
pub trait Subdivider: Debug + Send + Sync {
    /// Returns the flattened list of sub-intervals, in order.
    fn subdivide(&self, intervals: &[Interval]) -> Vec<Interval>;
}

/// Splits every interval into `n` pieces of equal width.
///
/// ```
/// use mab_math::{EquallySpaced, Interval, Subdivider};
///
/// let halves = EquallySpaced::new(2).unwrap();
/// let out = halves.subdivide(&[Interval::new(0.0, 1.0), Interval::new(1.0, 2.0)]);
/// assert_eq!(out.len(), 4);
/// assert_eq!(out[1], Interval::new(0.5, 1.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EquallySpaced {
    pieces: usize,
}

impl EquallySpaced {
    pub fn new(pieces: usize) -> Result<Self, QuadratureError> {
        if pieces < 2 {
            return Err(QuadratureError::InvalidSubdivision(pieces));
        }
        Ok(Self { pieces })
    }

    pub fn pieces(&self) -> usize {
        self.pieces
    }
}

impl Default for EquallySpaced {
    fn default() -> Self {
        Self { pieces: 2 }
    }
}

impl Subdivider for EquallySpaced {
    fn subdivide(&self, intervals: &[Interval]) -> Vec<Interval> {
        let mut out = Vec::with_capacity(intervals.len() * self.pieces);
        for iv in intervals {
            let h = iv.width() / self.pieces as f64;
            for k in 0..self.pieces {
                let lo = iv.a + k as f64 * h;
                // Pin the last edge so rounding never opens a gap.
                let hi = if k + 1 == self.pieces {
                    iv.b
                } else {
                    iv.a + (k + 1) as f64 * h
                };
                out.push(Interval::new(lo, hi));
            }
        }
        out
    }
}
