use crate::{
    config::VmConfig,
    execution::{InterpreterError, Machine, StepOutcome},
};

/// Test environment for simplified instruction testing
pub struct TestEnv {
    pub machine: Machine,
}

impl TestEnv {
    pub fn new(program: &[i64]) -> Self {
        Self::with_config(program, VmConfig::default())
    }

    pub fn with_config(program: &[i64], config: VmConfig) -> Self {
        let machine = Machine::from_words(program.to_vec(), [], config)
            .expect("test program fits in memory");
        Self { machine }
    }

    pub fn step(&mut self) -> Result<StepOutcome, InterpreterError> {
        self.machine.step()
    }

    // Helper to get a value from memory
    pub fn get_value(&self, addr: i64) -> i64 {
        self.machine.memory().read(addr).unwrap()
    }
}
