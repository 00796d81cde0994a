use crate::consts::WORD_BITS;
use crate::errors::{IndexError, Result};
use serde::{Deserialize, Serialize};

/// Size of a Bloom filter: how many bits it addresses and how many indices
/// one insertion produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawShape")]
pub struct Shape {
    number_of_bits: u32,
    number_of_hash_functions: u32,
}

impl Shape {
    pub fn new(number_of_bits: u32, number_of_hash_functions: u32) -> Result<Self> {
        if number_of_bits == 0 || number_of_hash_functions == 0 {
            return Err(IndexError::InvalidShape { number_of_bits, number_of_hash_functions });
        }
        Ok(Self { number_of_bits, number_of_hash_functions })
    }

    #[inline]
    pub fn number_of_bits(&self) -> u32 { self.number_of_bits }

    #[inline]
    pub fn number_of_hash_functions(&self) -> u32 { self.number_of_hash_functions }

    /// Number of 64-bit words needed for one bit per index.
    #[inline]
    pub fn words(&self) -> usize {
        self.number_of_bits.div_ceil(WORD_BITS) as usize
    }
}

/// Wire form of [`Shape`]; deserialization goes through [`Shape::new`].
#[derive(Deserialize)]
struct RawShape {
    number_of_bits: u32,
    number_of_hash_functions: u32,
}

impl TryFrom<RawShape> for Shape {
    type Error = IndexError;

    fn try_from(raw: RawShape) -> Result<Self> {
        Shape::new(raw.number_of_bits, raw.number_of_hash_functions)
    }
}
