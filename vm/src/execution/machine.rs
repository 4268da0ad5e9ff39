use std::collections::VecDeque;

use tracing::{debug, trace};

use super::InterpreterError;
use crate::{
    config::VmConfig, event::context::EventContext, instruction::Instruction, memory::Memory,
    opcodes::Opcode, parser::parse_program, stats::ExecutionStats,
};

/// Lifecycle state of a [`Machine`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Status {
    #[default]
    Running,
    /// Suspended on an input instruction with an empty queue.
    AwaitingInput,
    /// Decoded the halt opcode. Permanent.
    Halted,
    /// A step failed. Permanent.
    Faulted,
}

/// Result of a single [`Machine::step`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// One instruction ran.
    Executed,
    /// The machine needs input before it can go on. Nothing changed.
    AwaitingInput,
    /// The machine is halted.
    Halted,
}

/// One instance of the interpreter.
#[derive(Debug, Clone)]
pub struct Machine {
    pub(crate) memory: Memory,
    pub(crate) ip: usize,
    pub(crate) relative_base: i64,
    pub(crate) inputs: VecDeque<i64>,
    pub(crate) outputs: VecDeque<i64>,
    pub(crate) status: Status,
    pub(crate) steps: u64,
    pub(crate) stats: ExecutionStats,
    pub(crate) config: VmConfig,
}

impl Machine {
    /// Loads `program_text` with the default configuration.
    pub fn init(
        program_text: &str,
        inputs: impl IntoIterator<Item = i64>,
    ) -> Result<Self, InterpreterError> {
        Self::with_config(program_text, inputs, VmConfig::default())
    }

    pub fn with_config(
        program_text: &str,
        inputs: impl IntoIterator<Item = i64>,
        config: VmConfig,
    ) -> Result<Self, InterpreterError> {
        let words = parse_program(program_text)?;
        Self::from_words(words, inputs, config)
    }

    /// Creates a machine over already parsed program words.
    ///
    /// Useful to patch the program before running it, for example to set
    /// the two operands of the first instruction:
    ///
    /// ```
    /// use intvm::{parse_program, Machine, VmConfig};
    ///
    /// let mut words = parse_program("1,0,0,3,2,3,11,0,99,30,40,50").unwrap();
    /// words[1] = 9;
    /// words[2] = 10;
    ///
    /// let mut machine = Machine::from_words(words, [], VmConfig::default()).unwrap();
    /// machine.run().unwrap();
    /// assert_eq!(machine.memory().as_slice()[0], 3500);
    /// ```
    pub fn from_words(
        words: Vec<i64>,
        inputs: impl IntoIterator<Item = i64>,
        config: VmConfig,
    ) -> Result<Self, InterpreterError> {
        let memory = Memory::new(words, config.memory_ceiling)
            .map_err(|source| InterpreterError::Memory { pc: 0, source })?;
        let inputs: VecDeque<i64> = inputs.into_iter().collect();
        debug!(words = memory.len(), ?inputs, "New machine");

        Ok(Self {
            memory,
            ip: 0,
            relative_base: 0,
            inputs,
            outputs: VecDeque::new(),
            status: Status::Running,
            steps: 0,
            stats: ExecutionStats::default(),
            config,
        })
    }

    /// Executes the instruction at the instruction pointer.
    ///
    /// Once halted, further calls return [`StepOutcome::Halted`] without
    /// touching the machine. Once a step has failed, further calls return
    /// [`InterpreterError::Faulted`].
    pub fn step(&mut self) -> Result<StepOutcome, InterpreterError> {
        match self.status {
            Status::Halted => return Ok(StepOutcome::Halted),
            Status::Faulted => return Err(InterpreterError::Faulted),
            Status::Running | Status::AwaitingInput => {}
        }

        match self.execute_next() {
            Ok(outcome) => {
                self.status = match outcome {
                    StepOutcome::Executed => Status::Running,
                    StepOutcome::AwaitingInput => Status::AwaitingInput,
                    StepOutcome::Halted => Status::Halted,
                };
                Ok(outcome)
            }
            Err(err) => {
                debug!(pc = self.ip, %err, "Machine faulted");
                self.status = Status::Faulted;
                Err(err)
            }
        }
    }

    fn execute_next(&mut self) -> Result<StepOutcome, InterpreterError> {
        let pc = self.ip;
        let word = self
            .memory
            .read(pc as i64)
            .map_err(|source| InterpreterError::Memory { pc, source })?;
        let instruction = Instruction::decode_with(word, pc, &self.config.capabilities)?;
        trace!(pc, word, opcode = %instruction.opcode, "decoded");

        let opcode = instruction.opcode;
        if opcode != Opcode::Halt && self.steps >= self.config.max_steps {
            return Err(InterpreterError::StepLimitExceeded(self.config.max_steps));
        }

        let mut ctx = EventContext::new(self, instruction);
        let outcome = opcode.generate_event(&mut ctx)?;
        match outcome {
            StepOutcome::Executed => {
                self.steps += 1;
                self.stats.record(opcode);
            }
            StepOutcome::Halted => self.stats.record(opcode),
            StepOutcome::AwaitingInput => {}
        }

        Ok(outcome)
    }

    /// Steps until the machine halts or, under
    /// [`InputPolicy::Suspend`](crate::InputPolicy::Suspend), runs out of
    /// input. Returns the resulting status.
    pub fn run(&mut self) -> Result<Status, InterpreterError> {
        loop {
            match self.step()? {
                StepOutcome::Executed => continue,
                StepOutcome::AwaitingInput | StepOutcome::Halted => return Ok(self.status),
            }
        }
    }

    /// Returns the first queued output (0 if there is none) and the memory
    /// rendered as comma-separated words.
    pub fn snapshot(&self) -> (i64, String) {
        let primary = self.outputs.front().copied().unwrap_or(0);
        (primary, self.memory.serialize())
    }

    pub fn is_terminated(&self) -> bool {
        self.status == Status::Halted
    }

    pub const fn status(&self) -> Status {
        self.status
    }

    /// Appends a value to the input queue, waking the machine if it was
    /// suspended on input.
    pub fn push_input(&mut self, value: i64) {
        self.inputs.push_back(value);
        if self.status == Status::AwaitingInput {
            self.status = Status::Running;
        }
    }

    /// Pops the oldest pending output.
    pub fn take_output(&mut self) -> Option<i64> {
        self.outputs.pop_front()
    }

    pub fn outputs(&self) -> &VecDeque<i64> {
        &self.outputs
    }

    pub fn drain_outputs(&mut self) -> Vec<i64> {
        self.outputs.drain(..).collect()
    }

    pub fn inputs(&self) -> &VecDeque<i64> {
        &self.inputs
    }

    pub const fn memory(&self) -> &Memory {
        &self.memory
    }

    pub const fn ip(&self) -> usize {
        self.ip
    }

    pub const fn relative_base(&self) -> i64 {
        self.relative_base
    }

    /// Number of instructions executed so far, halt excluded.
    pub const fn steps(&self) -> u64 {
        self.steps
    }

    pub const fn stats(&self) -> &ExecutionStats {
        &self.stats
    }

    pub const fn config(&self) -> &VmConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::InputPolicy, execution::ErrorKind, isa::Revision};

    #[test]
    fn test_run_arithmetic() {
        let mut machine = Machine::init("1,9,10,3,2,3,11,0,99,30,40,50", []).unwrap();
        assert_eq!(machine.run().unwrap(), Status::Halted);
        assert_eq!(machine.snapshot().1, "3500,9,10,70,2,3,11,0,99,30,40,50");
        assert_eq!(machine.steps(), 2);
        assert_eq!(machine.ip(), 8);
    }

    #[test]
    fn test_step_after_halt_is_noop() {
        let mut machine = Machine::init("1,0,0,0,99", []).unwrap();
        machine.run().unwrap();
        let before = machine.clone();

        for _ in 0..3 {
            assert_eq!(machine.step().unwrap(), StepOutcome::Halted);
        }
        assert_eq!(machine.memory(), before.memory());
        assert_eq!(machine.ip(), before.ip());
        assert_eq!(machine.steps(), before.steps());
        assert_eq!(machine.stats(), before.stats());
    }

    #[test]
    fn test_fault_is_permanent() {
        let mut machine = Machine::init("1,0,0,0,42", []).unwrap();
        let err = machine.run().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidOpcode);
        assert_eq!(machine.status(), Status::Faulted);
        assert!(!machine.is_terminated());

        let err = machine.step().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Faulted);
    }

    #[test]
    fn test_memory_fault_on_source() {
        let config = VmConfig::default().with_memory_ceiling(16);
        let mut machine = Machine::with_config("1,100,0,0,99", [], config).unwrap();
        let err = machine.run().unwrap_err();
        assert!(matches!(err, InterpreterError::Memory { pc: 0, .. }));
        assert_eq!(err.kind(), ErrorKind::MemoryFault);
    }

    #[test]
    fn test_memory_fault_on_destination() {
        let mut machine = Machine::init("1101,1,1,-3,99", []).unwrap();
        let err = machine.run().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MemoryFault);
    }

    #[test]
    fn test_program_too_large() {
        let config = VmConfig::default().with_memory_ceiling(4);
        let err = Machine::with_config("1,0,0,0,99", [], config).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MemoryFault);
    }

    #[test]
    fn test_malformed_program() {
        let err = Machine::init("1,0,zero,0,99", []).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedProgram);
    }

    #[test]
    fn test_step_limit() {
        // Jumps to itself forever.
        let config = VmConfig::default().with_max_steps(1_000);
        let mut machine = Machine::with_config("1105,1,0", [], config).unwrap();
        assert_eq!(machine.config().max_steps, 1_000);
        let err = machine.run().unwrap_err();
        assert!(matches!(err, InterpreterError::StepLimitExceeded(1_000)));
        assert_eq!(machine.steps(), 1_000);
    }

    #[test]
    fn test_run_suspends_and_resumes() {
        let mut machine = Machine::init("3,11,3,12,1,11,12,13,4,13,99,0,0,0", [4]).unwrap();
        assert_eq!(machine.run().unwrap(), Status::AwaitingInput);
        assert_eq!(machine.ip(), 2);
        assert!(machine.outputs().is_empty());

        machine.push_input(5);
        assert_eq!(machine.status(), Status::Running);
        assert_eq!(machine.run().unwrap(), Status::Halted);
        assert_eq!(machine.drain_outputs(), vec![9]);
    }

    #[test]
    fn test_legacy_zero_input() {
        let config = VmConfig::default().with_input_policy(InputPolicy::DefaultZero);
        let mut machine = Machine::with_config("3,0,4,0,99", [], config).unwrap();
        assert_eq!(machine.run().unwrap(), Status::Halted);
        assert_eq!(machine.snapshot(), (0, "0,0,4,0,99".to_string()));
    }

    #[test]
    fn test_revision_rejects_newer_opcodes() {
        let config = VmConfig::default().with_capabilities(Revision::Arithmetic);
        let mut machine = Machine::with_config("3,0,99", [1], config).unwrap();
        assert_eq!(machine.run().unwrap_err().kind(), ErrorKind::InvalidOpcode);

        let config = VmConfig::default().with_capabilities(Revision::Branching);
        let mut machine = Machine::with_config("109,1,99", [], config).unwrap();
        assert_eq!(machine.run().unwrap_err().kind(), ErrorKind::InvalidOpcode);
    }

    #[test]
    fn test_stats() {
        let mut machine = Machine::init("1101,1,2,5,104,0,99", []).unwrap();
        machine.run().unwrap();
        let stats = machine.stats();
        assert_eq!(stats.count(Opcode::Add), 1);
        assert_eq!(stats.count(Opcode::Output), 1);
        assert_eq!(stats.count(Opcode::Halt), 1);
        assert_eq!(stats.total(), 3);
    }
}
