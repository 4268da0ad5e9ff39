use num_enum::{IntoPrimitive, TryFromPrimitive};
use strum_macros::Display;

use crate::{execution::InterpreterError, isa::Capabilities, opcodes::Opcode};

/// How a raw operand is turned into a value or an address.
#[derive(Debug, Clone, Copy, Default, Display, TryFromPrimitive, IntoPrimitive, PartialEq, Eq)]
#[repr(u8)]
#[strum(serialize_all = "snake_case")]
pub enum ParameterMode {
    /// The operand is an address.
    #[default]
    Position = 0,
    /// The operand is the value itself.
    Immediate = 1,
    /// The operand is an address offset by the relative base.
    Relative = 2,
}

/// A decoded instruction word.
///
/// The low two decimal digits select the opcode; the hundreds, thousands
/// and ten-thousands digits give the modes of parameters 1, 2 and 3.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Instruction {
    pub opcode: Opcode,
    pub modes: [ParameterMode; 3],
}

impl Instruction {
    /// Decodes `word`, fetched at `pc`, against the full instruction set.
    pub fn decode(word: i64, pc: usize) -> Result<Self, InterpreterError> {
        Self::decode_with(word, pc, &Capabilities::FULL)
    }

    /// Decodes `word`, rejecting opcodes and modes outside `caps`.
    ///
    /// Only the modes of parameters the opcode actually consumes are
    /// checked, so trailing digits on e.g. a halt word are ignored.
    pub fn decode_with(word: i64, pc: usize, caps: &Capabilities) -> Result<Self, InterpreterError> {
        let invalid_opcode = || InterpreterError::InvalidOpcode { word, pc };

        if word < 0 {
            return Err(invalid_opcode());
        }
        let opcode = u8::try_from(word % 100)
            .ok()
            .and_then(|op| Opcode::try_from(op).ok())
            .filter(|op| op.is_supported_by(caps))
            .ok_or_else(invalid_opcode)?;

        let mut modes = [ParameterMode::Position; 3];
        let mut digits = word / 100;
        for (param, mode) in modes.iter_mut().enumerate() {
            let digit = (digits % 10) as u8;
            digits /= 10;
            if param >= opcode.num_args() {
                continue;
            }
            *mode = ParameterMode::try_from(digit)
                .ok()
                .filter(|m| caps.supports_mode(*m))
                .ok_or(InterpreterError::InvalidParameterMode {
                    digit,
                    param: param + 1,
                    pc,
                })?;
        }

        Ok(Self { opcode, modes })
    }

    /// Mode of parameter `param`, counted from 1.
    pub fn mode(&self, param: usize) -> ParameterMode {
        self.modes[param - 1]
    }
}
