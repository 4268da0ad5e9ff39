use num_enum::{IntoPrimitive, TryFromPrimitive};
use strum::EnumCount;
use strum_macros::{Display, EnumCount, EnumIter};

use crate::isa::Capabilities;

#[derive(
    Debug, Clone, Copy, EnumCount, EnumIter, Display, TryFromPrimitive, IntoPrimitive, PartialEq, Eq,
)]
#[repr(u8)]
#[strum(serialize_all = "snake_case")]
pub enum Opcode {
    // Arithmetic instructions
    Add = 1,
    Mul = 2,

    // I/O instructions
    Input = 3,
    Output = 4,

    // Branch instructions
    JumpIfTrue = 5,
    JumpIfFalse = 6,

    // Comparison instructions
    LessThan = 7,
    Equals = 8,

    // Addressing instructions
    AdjustRelativeBase = 9,

    Halt = 99,
}

impl Opcode {
    pub const OP_COUNT: usize = Self::COUNT;

    /// Returns the number of parameters following the opcode word.
    pub const fn num_args(&self) -> usize {
        match self {
            Opcode::Add => 3,
            Opcode::Mul => 3,
            Opcode::Input => 1,
            Opcode::Output => 1,
            Opcode::JumpIfTrue => 2,
            Opcode::JumpIfFalse => 2,
            Opcode::LessThan => 3,
            Opcode::Equals => 3,
            Opcode::AdjustRelativeBase => 1,
            Opcode::Halt => 0,
        }
    }

    /// Dense index in `0..OP_COUNT`, used for per-opcode tables.
    pub const fn index(&self) -> usize {
        match self {
            Opcode::Halt => 0,
            other => *other as usize,
        }
    }

    /// Whether an interpreter with the given capabilities implements this
    /// opcode.
    pub const fn is_supported_by(&self, caps: &Capabilities) -> bool {
        match self {
            Opcode::Add | Opcode::Mul | Opcode::Halt => true,
            Opcode::Input | Opcode::Output => caps.io,
            Opcode::JumpIfTrue | Opcode::JumpIfFalse | Opcode::LessThan | Opcode::Equals => {
                caps.branching
            }
            Opcode::AdjustRelativeBase => caps.dynamic_base,
        }
    }
}
