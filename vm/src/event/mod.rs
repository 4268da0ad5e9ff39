//! Instruction semantics.
//!
//! Each opcode is implemented by an `Event`: a type whose `generate`
//! applies the instruction's effect to the machine through an
//! [`EventContext`] and then advances or redirects the instruction
//! pointer.

use context::EventContext;
use tracing::instrument;

use crate::{
    execution::{InterpreterError, StepOutcome},
    opcodes::Opcode,
};

pub(crate) mod branch;
pub(crate) mod comparison;
pub(crate) mod context;
pub(crate) mod integer_ops;
pub(crate) mod io;
#[macro_use]
pub(crate) mod macros;
pub(crate) mod relative_base;

#[cfg(test)]
pub(crate) mod test_utils;

pub(crate) use self::{
    branch::{JumpIfFalseEvent, JumpIfTrueEvent},
    comparison::{EqualsEvent, LessThanEvent},
    integer_ops::{AddEvent, MulEvent},
    io::{InputEvent, OutputEvent},
    relative_base::AdjustRelativeBaseEvent,
};

/// An `Event` is the effect of one instruction on the machine.
pub(crate) trait Event {
    /// Executes the instruction currently held by `ctx`.
    fn generate(ctx: &mut EventContext<'_>) -> Result<StepOutcome, InterpreterError>
    where
        Self: Sized;
}

/// An instruction of the form `dst = op(p1, p2)`.
///
/// `operation` returns `None` when the result does not fit in a word.
pub(crate) trait BinaryOperation {
    const OPCODE: Opcode;

    fn operation(lhs: i64, rhs: i64) -> Option<i64>;
}

/// Event for HALT.
///
/// Stops the machine; the instruction pointer stays on the halt word.
pub(crate) struct HaltEvent;

impl Event for HaltEvent {
    fn generate(_ctx: &mut EventContext<'_>) -> Result<StepOutcome, InterpreterError> {
        Ok(StepOutcome::Halted)
    }
}

impl Opcode {
    /// Generates the appropriate event for this opcode.
    #[instrument(level = "trace", skip(ctx), fields(pc = ctx.pc))]
    pub(crate) fn generate_event(
        self,
        ctx: &mut EventContext<'_>,
    ) -> Result<StepOutcome, InterpreterError> {
        match self {
            Opcode::Add => AddEvent::generate(ctx),
            Opcode::Mul => MulEvent::generate(ctx),
            Opcode::Input => InputEvent::generate(ctx),
            Opcode::Output => OutputEvent::generate(ctx),
            Opcode::JumpIfTrue => JumpIfTrueEvent::generate(ctx),
            Opcode::JumpIfFalse => JumpIfFalseEvent::generate(ctx),
            Opcode::LessThan => LessThanEvent::generate(ctx),
            Opcode::Equals => EqualsEvent::generate(ctx),
            Opcode::AdjustRelativeBase => AdjustRelativeBaseEvent::generate(ctx),
            Opcode::Halt => HaltEvent::generate(ctx),
        }
    }
}
