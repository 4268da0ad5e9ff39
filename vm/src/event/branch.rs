use super::{context::EventContext, Event};
use crate::execution::{InterpreterError, StepOutcome};

fn generate_conditional_jump(
    ctx: &mut EventContext<'_>,
    jump_if_zero: bool,
) -> Result<StepOutcome, InterpreterError> {
    let cond = ctx.load(1)?;
    if (cond == 0) == jump_if_zero {
        let target = ctx.load(2)?;
        ctx.jump_to(target)?;
    } else {
        ctx.incr_pc();
    }

    Ok(StepOutcome::Executed)
}

/// Event for JUMP_IF_TRUE.
///
/// Logic:
///   1. if p1 != 0, then PC = p2
///   2. if p1 == 0, then PC += 3
pub(crate) struct JumpIfTrueEvent;

impl Event for JumpIfTrueEvent {
    fn generate(ctx: &mut EventContext<'_>) -> Result<StepOutcome, InterpreterError> {
        generate_conditional_jump(ctx, false)
    }
}

/// Event for JUMP_IF_FALSE.
///
/// Logic:
///   1. if p1 == 0, then PC = p2
///   2. if p1 != 0, then PC += 3
pub(crate) struct JumpIfFalseEvent;

impl Event for JumpIfFalseEvent {
    fn generate(ctx: &mut EventContext<'_>) -> Result<StepOutcome, InterpreterError> {
        generate_conditional_jump(ctx, true)
    }
}
