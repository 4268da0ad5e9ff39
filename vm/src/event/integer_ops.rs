use super::BinaryOperation;
use crate::{impl_event_for_binary_operation, opcodes::Opcode};

/// Event for ADD.
///
/// Logic:
///   1. MEM[dst] = p1 + p2
///   2. PC += 4
pub(crate) struct AddEvent;

impl BinaryOperation for AddEvent {
    const OPCODE: Opcode = Opcode::Add;

    fn operation(lhs: i64, rhs: i64) -> Option<i64> {
        lhs.checked_add(rhs)
    }
}

impl_event_for_binary_operation!(AddEvent);

/// Event for MUL.
///
/// Logic:
///   1. MEM[dst] = p1 * p2
///   2. PC += 4
pub(crate) struct MulEvent;

impl BinaryOperation for MulEvent {
    const OPCODE: Opcode = Opcode::Mul;

    fn operation(lhs: i64, rhs: i64) -> Option<i64> {
        lhs.checked_mul(rhs)
    }
}

impl_event_for_binary_operation!(MulEvent);
