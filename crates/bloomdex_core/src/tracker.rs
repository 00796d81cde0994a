//! Seen-sets used by [`IndexFilter`](crate::filter::IndexFilter) to drop
//! repeated indices within one pass.
//!
//! Two layouts exist. The array tracker keeps the recorded indices in a
//! fixed-capacity vector and scans it linearly; it wins when a shape produces
//! few indices over a large bit space. The bitmap tracker keeps one bit per
//! addressable index and answers in constant time. [`TrackerKind::select`]
//! picks whichever costs fewer bytes for a given [`Shape`], with ties going to
//! the bitmap.

use crate::consts::{ARRAY_SLOT_BYTES, BITMAP_WORD_BYTES, WORD_BITS, WORD_MASK, WORD_SHIFT};
use crate::errors::{IndexError, Result};
use crate::shape::Shape;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrackerKind {
    Array,
    Bitmap,
}

impl TrackerKind {
    pub fn select(shape: &Shape) -> Self {
        TrackerCost::for_shape(shape).kind()
    }
}

/// Byte cost of each tracker layout for one shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackerCost {
    pub array_bytes: u64,
    pub bitmap_bytes: u64,
}

impl TrackerCost {
    pub fn for_shape(shape: &Shape) -> Self {
        Self {
            array_bytes: shape.number_of_hash_functions() as u64 * ARRAY_SLOT_BYTES,
            bitmap_bytes: shape.words() as u64 * BITMAP_WORD_BYTES,
        }
    }

    pub fn kind(&self) -> TrackerKind {
        if self.bitmap_bytes <= self.array_bytes { TrackerKind::Bitmap } else { TrackerKind::Array }
    }
}

/// Linear-scan tracker with a capacity fixed at construction.
#[derive(Debug, Clone)]
pub struct ArrayTracker {
    seen: Vec<u32>,
    capacity: usize,
}

impl ArrayTracker {
    pub fn new(capacity: u32) -> Self {
        let capacity = capacity as usize;
        Self { seen: Vec::with_capacity(capacity), capacity }
    }

    pub fn test(&mut self, number: u32) -> Result<bool> {
        if self.seen.contains(&number) {
            return Ok(true);
        }
        if self.seen.len() == self.capacity {
            return Err(IndexError::CapacityExceeded { capacity: self.capacity as u64 });
        }
        self.seen.push(number);
        Ok(false)
    }

    pub fn capacity(&self) -> usize { self.capacity }

    pub fn len(&self) -> usize { self.seen.len() }

    pub fn is_empty(&self) -> bool { self.seen.is_empty() }
}

/// One bit per index, packed into `u64` words.
#[derive(Debug, Clone)]
pub struct BitmapTracker {
    words: Vec<u64>,
    len: usize,
}

impl BitmapTracker {
    /// Creates a bitmap covering at least `number_of_bits` indices.
    pub fn new(number_of_bits: u32) -> Self {
        let words = number_of_bits.div_ceil(WORD_BITS) as usize;
        Self { words: vec![0u64; words], len: 0 }
    }

    pub fn test(&mut self, number: u32) -> Result<bool> {
        let idx = (number >> WORD_SHIFT) as usize;
        let mask = 1u64 << (number & WORD_MASK);
        let capacity = self.capacity();
        let word = self
            .words
            .get_mut(idx)
            .ok_or(IndexError::CapacityExceeded { capacity })?;
        if *word & mask != 0 {
            return Ok(true);
        }
        *word |= mask;
        self.len += 1;
        Ok(false)
    }

    /// Number of indices the word storage can address.
    pub fn capacity(&self) -> u64 { self.words.len() as u64 * WORD_BITS as u64 }

    pub fn len(&self) -> usize { self.len }

    pub fn is_empty(&self) -> bool { self.len == 0 }
}

/// The seen-set of one pass. Grow-only: there is no way to forget an index.
#[derive(Debug, Clone)]
pub enum IndexTracker {
    Array(ArrayTracker),
    Bitmap(BitmapTracker),
}

impl IndexTracker {
    /// Picks the cheaper layout for `shape`.
    pub fn for_shape(shape: &Shape) -> Self {
        Self::with_kind(TrackerKind::select(shape), shape)
    }

    pub fn with_kind(kind: TrackerKind, shape: &Shape) -> Self {
        match kind {
            TrackerKind::Array => Self::Array(ArrayTracker::new(shape.number_of_hash_functions())),
            TrackerKind::Bitmap => Self::Bitmap(BitmapTracker::new(shape.number_of_bits())),
        }
    }

    /// Returns `true` if `number` was recorded before this call, otherwise
    /// records it and returns `false`.
    #[inline]
    pub fn test(&mut self, number: u32) -> Result<bool> {
        match self {
            Self::Array(t) => t.test(number),
            Self::Bitmap(t) => t.test(number),
        }
    }

    pub fn kind(&self) -> TrackerKind {
        match self {
            Self::Array(_) => TrackerKind::Array,
            Self::Bitmap(_) => TrackerKind::Bitmap,
        }
    }

    /// Count of distinct indices recorded so far.
    pub fn len(&self) -> usize {
        match self {
            Self::Array(t) => t.len(),
            Self::Bitmap(t) => t.len(),
        }
    }

    pub fn is_empty(&self) -> bool { self.len() == 0 }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shape(bits: u32, k: u32) -> Shape { Shape::new(bits, k).unwrap() }

    #[test]
    fn selection_prefers_cheaper_layout() {
        let small = TrackerCost::for_shape(&shape(64, 1));
        assert_eq!(small, TrackerCost { array_bytes: 4, bitmap_bytes: 8 });
        assert_eq!(small.kind(), TrackerKind::Array);

        let large = TrackerCost::for_shape(&shape(64, 100));
        assert_eq!(large, TrackerCost { array_bytes: 400, bitmap_bytes: 8 });
        assert_eq!(large.kind(), TrackerKind::Bitmap);
    }

    #[test]
    fn selection_tie_goes_to_bitmap() {
        let tie = TrackerCost::for_shape(&shape(64, 2));
        assert_eq!(tie.array_bytes, tie.bitmap_bytes);
        assert_eq!(TrackerKind::select(&shape(64, 2)), TrackerKind::Bitmap);
        assert_eq!(TrackerKind::select(&shape(65, 3)), TrackerKind::Array);
        assert_eq!(TrackerKind::select(&shape(65, 4)), TrackerKind::Bitmap);
    }

    #[test]
    fn second_test_reports_seen() {
        for kind in [TrackerKind::Array, TrackerKind::Bitmap] {
            let mut t = IndexTracker::with_kind(kind, &shape(128, 4));
            assert_eq!(t.kind(), kind);
            assert!(t.is_empty());
            assert!(!t.test(77).unwrap());
            assert!(t.test(77).unwrap());
            assert!(!t.test(0).unwrap());
            assert!(t.test(0).unwrap());
            assert_eq!(t.len(), 2);
        }
    }

    #[test]
    fn array_rejects_new_value_when_full() {
        let mut t = ArrayTracker::new(2);
        assert!(t.is_empty());
        assert!(!t.test(3).unwrap());
        assert!(!t.is_empty());
        assert!(!t.test(9).unwrap());
        assert_eq!(t.test(4), Err(IndexError::CapacityExceeded { capacity: 2 }));
        assert!(t.test(3).unwrap());
        assert!(t.test(9).unwrap());
        assert_eq!(t.len(), t.capacity());
    }

    #[test]
    fn bitmap_word_boundaries() {
        let mut t = BitmapTracker::new(128);
        assert!(t.is_empty());
        for n in [0, 63, 64, 127] {
            assert!(!t.test(n).unwrap());
        }
        for n in [0, 63, 64, 127] {
            assert!(t.test(n).unwrap());
        }
        assert!(!t.test(1).unwrap());
        assert_eq!(t.len(), 5);
        assert!(!t.is_empty());
    }

    #[test]
    fn undersized_bitmap_reports_capacity() {
        let mut t = BitmapTracker::new(10);
        assert_eq!(t.capacity(), 64);
        assert!(!t.test(63).unwrap());
        assert_eq!(t.test(64), Err(IndexError::CapacityExceeded { capacity: 64 }));
    }
}
