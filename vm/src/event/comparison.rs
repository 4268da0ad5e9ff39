use super::BinaryOperation;
use crate::{impl_event_for_binary_operation, opcodes::Opcode};

/// Event for LESS_THAN.
///
/// Logic:
///   1. MEM[dst] = 1 if p1 < p2, else 0
///   2. PC += 4
pub(crate) struct LessThanEvent;

impl BinaryOperation for LessThanEvent {
    const OPCODE: Opcode = Opcode::LessThan;

    fn operation(lhs: i64, rhs: i64) -> Option<i64> {
        Some((lhs < rhs) as i64)
    }
}

impl_event_for_binary_operation!(LessThanEvent);

/// Event for EQUALS.
///
/// Logic:
///   1. MEM[dst] = 1 if p1 == p2, else 0
///   2. PC += 4
pub(crate) struct EqualsEvent;

impl BinaryOperation for EqualsEvent {
    const OPCODE: Opcode = Opcode::Equals;

    fn operation(lhs: i64, rhs: i64) -> Option<i64> {
        Some((lhs == rhs) as i64)
    }
}

impl_event_for_binary_operation!(EqualsEvent);

#[cfg(test)]
mod tests {
    use crate::event::test_utils::TestEnv;

    #[test]
    fn test_less_than() {
        for (lhs, rhs, expected) in [(3, 8, 1), (8, 8, 0), (9, 8, 0), (-1, 0, 1)] {
            let mut env = TestEnv::new(&[1107, lhs, rhs, 5, 99, 77]);
            env.step().unwrap();
            assert_eq!(env.get_value(5), expected, "{lhs} < {rhs}");
            assert_eq!(env.machine.ip(), 4);
        }
    }

    #[test]
    fn test_equals() {
        for (lhs, rhs, expected) in [(8, 8, 1), (7, 8, 0), (-8, 8, 0)] {
            let mut env = TestEnv::new(&[1108, lhs, rhs, 5, 99, 77]);
            env.step().unwrap();
            assert_eq!(env.get_value(5), expected, "{lhs} == {rhs}");
        }
    }
}
