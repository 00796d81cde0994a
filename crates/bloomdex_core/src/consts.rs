// crates/bloomdex_core/src/consts.rs

/// Bits per bitmap tracker word.
pub const WORD_BITS: u32 = u64::BITS;

/// Shift turning an index into its bitmap word position.
pub const WORD_SHIFT: u32 = 6;

/// Mask selecting the bit offset of an index inside its word.
pub const WORD_MASK: u32 = WORD_BITS - 1;

/// Bytes charged per bitmap word when sizing trackers.
pub const BITMAP_WORD_BYTES: u64 = 8;

/// Bytes charged per array tracker slot when sizing trackers.
pub const ARRAY_SLOT_BYTES: u64 = 4;

const _: () = { assert!(1u32 << WORD_SHIFT == WORD_BITS); };
