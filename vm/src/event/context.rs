use std::ops::{Deref, DerefMut};

use crate::{
    execution::{InterpreterError, Machine},
    instruction::{Instruction, ParameterMode},
    memory::MemoryError,
};

/// View of a [`Machine`] while one decoded instruction is executed.
///
/// Parameters are counted from 1, as in the instruction encoding: the raw
/// operand of parameter `n` sits at `pc + n`.
pub(crate) struct EventContext<'a> {
    pub machine: &'a mut Machine,
    pub instruction: Instruction,
    pub pc: usize,
}

impl<'a> EventContext<'a> {
    pub fn new(machine: &'a mut Machine, instruction: Instruction) -> Self {
        let pc = machine.ip;
        Self {
            machine,
            instruction,
            pc,
        }
    }

    fn fault(&self) -> impl Fn(MemoryError) -> InterpreterError {
        let pc = self.pc;
        move |source| InterpreterError::Memory { pc, source }
    }

    /// Reads the raw operand of parameter `param`.
    pub fn raw(&self, param: usize) -> Result<i64, InterpreterError> {
        let addr = (self.pc + param) as i64;
        self.memory.read(addr).map_err(self.fault())
    }

    /// Resolves parameter `param` to a value according to its mode.
    pub fn load(&self, param: usize) -> Result<i64, InterpreterError> {
        let raw = self.raw(param)?;
        match self.instruction.mode(param) {
            ParameterMode::Immediate => Ok(raw),
            ParameterMode::Position => self.memory.read(raw).map_err(self.fault()),
            ParameterMode::Relative => self
                .memory
                .read(self.relative_base.saturating_add(raw))
                .map_err(self.fault()),
        }
    }

    /// Resolves parameter `param` to a destination address.
    ///
    /// A destination in immediate mode is taken literally as an address.
    pub fn dst_addr(&self, param: usize) -> Result<i64, InterpreterError> {
        let raw = self.raw(param)?;
        match self.instruction.mode(param) {
            ParameterMode::Position | ParameterMode::Immediate => Ok(raw),
            ParameterMode::Relative => Ok(self.relative_base.saturating_add(raw)),
        }
    }

    /// Writes `value` to the destination named by parameter `param`.
    pub fn store(&mut self, param: usize, value: i64) -> Result<(), InterpreterError> {
        let addr = self.dst_addr(param)?;
        let fault = self.fault();
        self.memory.write(addr, value).map_err(fault)
    }

    /// Moves the instruction pointer past the current instruction.
    pub fn incr_pc(&mut self) {
        self.machine.ip = self.pc + 1 + self.instruction.opcode.num_args();
    }

    /// Redirects the instruction pointer to `target`.
    pub fn jump_to(&mut self, target: i64) -> Result<(), InterpreterError> {
        let ip = self.memory.check_addr(target).map_err(self.fault())?;
        self.machine.ip = ip;
        Ok(())
    }
}

impl Deref for EventContext<'_> {
    type Target = Machine;

    fn deref(&self) -> &Self::Target {
        self.machine
    }
}

impl DerefMut for EventContext<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.machine
    }
}
