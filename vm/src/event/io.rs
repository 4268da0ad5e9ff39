use tracing::trace;

use super::{context::EventContext, Event};
use crate::{
    config::InputPolicy,
    execution::{InterpreterError, StepOutcome},
};

/// Event for INPUT.
///
/// Logic:
///   1. MEM[dst] = next value of the input queue
///   2. PC += 2
///
/// With an empty queue the machine either suspends, leaving PC in place, or
/// stores 0, depending on its [`InputPolicy`].
pub(crate) struct InputEvent;

impl Event for InputEvent {
    fn generate(ctx: &mut EventContext<'_>) -> Result<StepOutcome, InterpreterError> {
        let value = match ctx.inputs.pop_front() {
            Some(value) => value,
            None => match ctx.config.input_policy {
                InputPolicy::Suspend => {
                    trace!(pc = ctx.pc, "input queue empty, suspending");
                    return Ok(StepOutcome::AwaitingInput);
                }
                InputPolicy::DefaultZero => 0,
            },
        };
        ctx.store(1, value)?;
        ctx.incr_pc();

        Ok(StepOutcome::Executed)
    }
}

/// Event for OUTPUT.
///
/// Logic:
///   1. push p1 onto the output queue
///   2. PC += 2
pub(crate) struct OutputEvent;

impl Event for OutputEvent {
    fn generate(ctx: &mut EventContext<'_>) -> Result<StepOutcome, InterpreterError> {
        let value = ctx.load(1)?;
        trace!(pc = ctx.pc, value, "output");
        ctx.outputs.push_back(value);
        ctx.incr_pc();

        Ok(StepOutcome::Executed)
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        config::{InputPolicy, VmConfig},
        event::test_utils::TestEnv,
        execution::StepOutcome,
    };

    #[test]
    fn test_input_is_fifo() {
        let mut env = TestEnv::new(&[3, 7, 3, 8, 99, 0, 0, 0, 0]);
        env.machine.push_input(11);
        env.machine.push_input(22);
        env.step().unwrap();
        env.step().unwrap();
        assert_eq!(env.get_value(7), 11);
        assert_eq!(env.get_value(8), 22);
    }

    #[test]
    fn test_input_suspends_when_empty() {
        let mut env = TestEnv::new(&[3, 3, 99, 0]);
        assert_eq!(env.step().unwrap(), StepOutcome::AwaitingInput);
        assert_eq!(env.machine.ip(), 0);
        assert_eq!(env.machine.steps(), 0);

        env.machine.push_input(5);
        assert_eq!(env.step().unwrap(), StepOutcome::Executed);
        assert_eq!(env.get_value(3), 5);
        assert_eq!(env.machine.ip(), 2);
    }

    #[test]
    fn test_input_default_zero() {
        let config = VmConfig::default().with_input_policy(InputPolicy::DefaultZero);
        let mut env = TestEnv::with_config(&[3, 3, 99, 17], config);
        assert_eq!(env.step().unwrap(), StepOutcome::Executed);
        assert_eq!(env.get_value(3), 0);
    }

    #[test]
    fn test_output_modes() {
        let mut env = TestEnv::new(&[4, 5, 104, -9, 99, 31]);
        env.step().unwrap();
        env.step().unwrap();
        assert_eq!(env.machine.drain_outputs(), vec![31, -9]);
    }
}
