//! IntVM: a stored-program integer virtual machine.
//!
//! Programs are comma-separated lists of signed 64-bit words. A
//! [`Machine`] loads one, decodes and executes it one instruction at a
//! time, and exchanges values with the outside world through FIFO input
//! and output queues. A [`Ring`] wires several machines together so each
//! one's output feeds the next one's input.

pub mod config;
mod event;
pub mod execution;
pub mod instruction;
pub mod isa;
pub mod memory;
pub mod opcodes;
pub mod parser;
pub mod stats;
pub mod util;

pub use config::{InputPolicy, VmConfig};
pub use execution::{
    run_ring, search_phases, ErrorKind, InterpreterError, Machine, Ring, Status, StepOutcome,
};
pub use instruction::{Instruction, ParameterMode};
pub use isa::{Capabilities, Revision};
pub use memory::{Memory, MemoryError};
pub use opcodes::Opcode;
pub use parser::parse_program;
