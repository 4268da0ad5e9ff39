//! Running programs: single machines and rings of machines.

mod error;
mod machine;
mod ring;

pub use error::{ErrorKind, InterpreterError};
pub use machine::{Machine, Status, StepOutcome};
pub use ring::{run_ring, search_phases, Ring, DEFAULT_SEED};
