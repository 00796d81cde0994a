use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum IndexError {
    #[error("Index out of range: {index}")]
    OutOfRange { index: i64 },

    #[error("Index out of range: {index} >= {size}")]
    OutOfRangeOfSize { index: i64, size: u32 },

    #[error("Tracker capacity exceeded: {capacity}")]
    CapacityExceeded { capacity: u64 },

    #[error("Invalid shape: number_of_bits={number_of_bits}, number_of_hash_functions={number_of_hash_functions}")]
    InvalidShape {
        number_of_bits: u32,
        number_of_hash_functions: u32,
    },
}

pub type Result<T> = std::result::Result<T, IndexError>;
