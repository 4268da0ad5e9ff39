//! Helper macros for [`Event`](super::Event) definitions.

/// Implements [`Event`](crate::event::Event) for a
/// [`BinaryOperation`](crate::event::BinaryOperation): resolve parameters 1
/// and 2, apply the operation and store the result through parameter 3.
#[macro_export]
macro_rules! impl_event_for_binary_operation {
    ($t:ty) => {
        impl $crate::event::Event for $t {
            fn generate(
                ctx: &mut $crate::event::context::EventContext<'_>,
            ) -> Result<$crate::execution::StepOutcome, $crate::execution::InterpreterError> {
                use $crate::event::BinaryOperation;

                let lhs = ctx.load(1)?;
                let rhs = ctx.load(2)?;
                let value = <$t>::operation(lhs, rhs).ok_or(
                    $crate::execution::InterpreterError::ArithmeticOverflow {
                        opcode: <$t>::OPCODE,
                        lhs,
                        rhs,
                        pc: ctx.pc,
                    },
                )?;
                ctx.store(3, value)?;
                ctx.incr_pc();

                Ok($crate::execution::StepOutcome::Executed)
            }
        }
    };
}
