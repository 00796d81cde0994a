//! Duplicate-suppressing predicate placed between an index generator and the
//! Bloom filter that consumes the indices.
use crate::errors::{IndexError, Result};
use crate::shape::Shape;
use crate::tracker::{IndexTracker, TrackerCost};
use tracing::debug;

/// Receives each distinct index of a pass. Returning `false` asks the
/// generator to stop.
pub trait IndexConsumer {
    fn accept(&mut self, index: u32) -> bool;
}

impl<F: FnMut(u32) -> bool> IndexConsumer for F {
    #[inline]
    fn accept(&mut self, index: u32) -> bool { self(index) }
}

pub struct IndexFilter<'a, C: IndexConsumer + ?Sized> {
    size: u32,
    tracker: IndexTracker,
    consumer: &'a mut C,
}

impl<'a, C: IndexConsumer + ?Sized> IndexFilter<'a, C> {
    /// Builds a filter whose tracker layout is chosen from `shape`.
    pub fn new(shape: &Shape, consumer: &'a mut C) -> Self {
        let cost = TrackerCost::for_shape(shape);
        debug!(
            bits = shape.number_of_bits(),
            hashes = shape.number_of_hash_functions(),
            array_bytes = cost.array_bytes,
            bitmap_bytes = cost.bitmap_bytes,
            tracker = ?cost.kind(),
            "selected index tracker"
        );
        Self::with_tracker(shape, consumer, IndexTracker::with_kind(cost.kind(), shape))
    }

    /// Builds a filter around a caller-supplied tracker. The tracker must be
    /// able to hold every index the pass will produce.
    pub fn with_tracker(shape: &Shape, consumer: &'a mut C, tracker: IndexTracker) -> Self {
        Self { size: shape.number_of_bits(), tracker, consumer }
    }

    /// Forwards `number` to the consumer on its first occurrence and returns
    /// the consumer's answer. Repeats are absorbed and return `true`.
    pub fn test(&mut self, number: i64) -> Result<bool> {
        if number < 0 {
            return Err(IndexError::OutOfRange { index: number });
        }
        if number >= self.size as i64 {
            return Err(IndexError::OutOfRangeOfSize { index: number, size: self.size });
        }
        let index = number as u32;
        if self.tracker.test(index)? {
            return Ok(true);
        }
        Ok(self.consumer.accept(index))
    }

    /// Runs a whole pass, stopping at the first `false` or error. Returns the
    /// last predicate result (`true` for an empty pass).
    pub fn filter_all<I>(&mut self, indices: I) -> Result<bool>
    where
        I: IntoIterator<Item = i64>,
    {
        for number in indices {
            if !self.test(number)? {
                return Ok(false);
            }
        }
        Ok(true)
    }

    pub fn size(&self) -> u32 { self.size }

    pub fn tracker(&self) -> &IndexTracker { &self.tracker }
}
