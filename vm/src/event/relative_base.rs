use super::{context::EventContext, Event};
use crate::{
    execution::{InterpreterError, StepOutcome},
    opcodes::Opcode,
};

/// Event for ADJUST_RELATIVE_BASE.
///
/// Logic:
///   1. BASE += p1
///   2. PC += 2
pub(crate) struct AdjustRelativeBaseEvent;

impl Event for AdjustRelativeBaseEvent {
    fn generate(ctx: &mut EventContext<'_>) -> Result<StepOutcome, InterpreterError> {
        let offset = ctx.load(1)?;
        let base = ctx.relative_base;
        ctx.relative_base = base
            .checked_add(offset)
            .ok_or(InterpreterError::ArithmeticOverflow {
                opcode: Opcode::AdjustRelativeBase,
                lhs: base,
                rhs: offset,
                pc: ctx.pc,
            })?;
        ctx.incr_pc();

        Ok(StepOutcome::Executed)
    }
}
