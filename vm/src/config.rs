//! Machine configuration.
//!
//! Configuration only states limits and policy; the interpreter enforces
//! them.

use crate::{isa::Capabilities, memory::DEFAULT_MEMORY_CEILING};

/// Default step budget for a single machine.
pub const DEFAULT_MAX_STEPS: u64 = 100_000_000;

/// What an input instruction does when the input queue is empty.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum InputPolicy {
    /// Leave the machine untouched and report that it awaits input.
    #[default]
    Suspend,
    /// Store 0 and carry on.
    DefaultZero,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VmConfig {
    /// Maximum number of memory words.
    pub memory_ceiling: usize,
    /// Maximum number of instructions a machine may execute.
    pub max_steps: u64,
    pub input_policy: InputPolicy,
    pub capabilities: Capabilities,
}

impl Default for VmConfig {
    fn default() -> Self {
        Self {
            memory_ceiling: DEFAULT_MEMORY_CEILING,
            max_steps: DEFAULT_MAX_STEPS,
            input_policy: InputPolicy::default(),
            capabilities: Capabilities::default(),
        }
    }
}

impl VmConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub const fn with_memory_ceiling(mut self, memory_ceiling: usize) -> Self {
        self.memory_ceiling = memory_ceiling;
        self
    }

    pub const fn with_max_steps(mut self, max_steps: u64) -> Self {
        self.max_steps = max_steps;
        self
    }

    pub const fn with_input_policy(mut self, input_policy: InputPolicy) -> Self {
        self.input_policy = input_policy;
        self
    }

    pub fn with_capabilities(mut self, capabilities: impl Into<Capabilities>) -> Self {
        self.capabilities = capabilities.into();
        self
    }
}
