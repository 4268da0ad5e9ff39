use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MemoryError {
    #[error("address {addr} is outside memory (ceiling: {ceiling} words)")]
    AddressOutOfBounds { addr: i64, ceiling: usize },

    #[error("program of {len} words does not fit in memory (ceiling: {ceiling} words)")]
    ProgramTooLarge { len: usize, ceiling: usize },
}
