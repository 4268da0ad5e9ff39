mod error;

pub use error::MemoryError;

/// Default memory ceiling, in words.
pub const DEFAULT_MEMORY_CEILING: usize = 1 << 20;

/// The `Memory` of a machine: a flat array of signed words holding both
/// the program and its data.
///
/// Memory starts out as the loaded program and grows on demand when a
/// write lands past its current end. Cells that were never written read
/// as zero. Any access at a negative address, or at or past the ceiling,
/// is a [`MemoryError::AddressOutOfBounds`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Memory {
    words: Vec<i64>,
    ceiling: usize,
}

impl Memory {
    /// Initializes memory with the given program.
    pub fn new(program: Vec<i64>, ceiling: usize) -> Result<Self, MemoryError> {
        if program.len() > ceiling {
            return Err(MemoryError::ProgramTooLarge {
                len: program.len(),
                ceiling,
            });
        }

        Ok(Self {
            words: program,
            ceiling,
        })
    }

    /// Number of words currently backed by storage.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub const fn ceiling(&self) -> usize {
        self.ceiling
    }

    /// Returns the words currently backed by storage.
    pub fn as_slice(&self) -> &[i64] {
        &self.words
    }

    /// Converts a signed address into an index, checking it against the
    /// ceiling.
    pub fn check_addr(&self, addr: i64) -> Result<usize, MemoryError> {
        usize::try_from(addr)
            .ok()
            .filter(|&index| index < self.ceiling)
            .ok_or(MemoryError::AddressOutOfBounds {
                addr,
                ceiling: self.ceiling,
            })
    }

    /// Reads the word at `addr`.
    pub fn read(&self, addr: i64) -> Result<i64, MemoryError> {
        let index = self.check_addr(addr)?;
        Ok(self.words.get(index).copied().unwrap_or(0))
    }

    /// Writes `value` at `addr`, growing memory if needed.
    pub fn write(&mut self, addr: i64, value: i64) -> Result<(), MemoryError> {
        let index = self.check_addr(addr)?;
        if index >= self.words.len() {
            self.words.resize(index + 1, 0);
        }
        self.words[index] = value;

        Ok(())
    }

    /// Renders memory as comma-separated decimal words.
    pub fn serialize(&self) -> String {
        self.words
            .iter()
            .map(i64::to_string)
            .collect::<Vec<_>>()
            .join(",")
    }
}
