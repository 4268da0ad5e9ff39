use thiserror::Error;

use crate::{memory::MemoryError, opcodes::Opcode, parser};

/// Broad classes of [`InterpreterError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The program text could not be loaded.
    MalformedProgram,
    /// An instruction word names an opcode or parameter mode the interpreter
    /// does not implement.
    InvalidOpcode,
    /// An address fell outside memory.
    MemoryFault,
    /// An arithmetic result does not fit in a word. Add and multiply are
    /// checked rather than wrapping, so programs relying on wraparound fail
    /// with this kind.
    Overflow,
    /// The machine exhausted its step budget.
    StepLimit,
    /// The machine already failed and cannot be stepped.
    Faulted,
    /// A ring of machines could not be set up or could not finish.
    Orchestration,
}

/// Errors raised while loading or running machines.
///
/// Every error is fatal to the machine that raised it.
#[derive(Debug, Error)]
pub enum InterpreterError {
    #[error(transparent)]
    Load(#[from] parser::Error),

    #[error("invalid opcode in word {word} at pc {pc}")]
    InvalidOpcode { word: i64, pc: usize },

    #[error("invalid mode {digit} for parameter {param} at pc {pc}")]
    InvalidParameterMode { digit: u8, param: usize, pc: usize },

    #[error("memory fault at pc {pc}: {source}")]
    Memory { pc: usize, source: MemoryError },

    #[error("{opcode} overflowed on {lhs} and {rhs} at pc {pc}")]
    ArithmeticOverflow {
        opcode: Opcode,
        lhs: i64,
        rhs: i64,
        pc: usize,
    },

    #[error("step limit of {0} instructions exceeded")]
    StepLimitExceeded(u64),

    #[error("machine has faulted and cannot be stepped")]
    Faulted,

    #[error("a ring needs at least one phase setting")]
    EmptyRing,

    #[error("ring deadlocked: every running machine is waiting for input")]
    RingDeadlock,

    #[error("last machine of the ring halted without producing output")]
    NoRingOutput,

    #[error("machine {index} of the ring failed: {source}")]
    RingInstance {
        index: usize,
        source: Box<InterpreterError>,
    },
}

impl InterpreterError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            InterpreterError::Load(_) => ErrorKind::MalformedProgram,
            InterpreterError::InvalidOpcode { .. } | InterpreterError::InvalidParameterMode { .. } => {
                ErrorKind::InvalidOpcode
            }
            InterpreterError::Memory { .. } => ErrorKind::MemoryFault,
            InterpreterError::ArithmeticOverflow { .. } => ErrorKind::Overflow,
            InterpreterError::StepLimitExceeded(_) => ErrorKind::StepLimit,
            InterpreterError::Faulted => ErrorKind::Faulted,
            InterpreterError::EmptyRing
            | InterpreterError::RingDeadlock
            | InterpreterError::NoRingOutput => ErrorKind::Orchestration,
            InterpreterError::RingInstance { source, .. } => source.kind(),
        }
    }
}
