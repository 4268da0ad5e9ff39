//! Instruction set revisions.
//!
//! The interpreter grew over time: first plain arithmetic, then I/O with
//! immediate operands, then branches and comparisons, and finally relative
//! addressing. Rather than keeping one interpreter per stage, a single
//! interpreter is gated by a [`Capabilities`] set.

use std::fmt;

use crate::instruction::ParameterMode;

/// The features an interpreter accepts. Anything outside the set is
/// rejected at decode time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capabilities {
    /// Parameter mode 1.
    pub immediate_mode: bool,
    /// Opcodes 3 and 4.
    pub io: bool,
    /// Opcodes 5 to 8.
    pub branching: bool,
    /// Parameter mode 2.
    pub relative_mode: bool,
    /// Opcode 9.
    pub dynamic_base: bool,
}

impl Capabilities {
    pub const ARITHMETIC: Self = Self {
        immediate_mode: false,
        io: false,
        branching: false,
        relative_mode: false,
        dynamic_base: false,
    };

    pub const IO: Self = Self {
        immediate_mode: true,
        io: true,
        ..Self::ARITHMETIC
    };

    pub const BRANCHING: Self = Self {
        branching: true,
        ..Self::IO
    };

    pub const FULL: Self = Self {
        relative_mode: true,
        dynamic_base: true,
        ..Self::BRANCHING
    };

    pub const fn supports_mode(&self, mode: ParameterMode) -> bool {
        match mode {
            ParameterMode::Position => true,
            ParameterMode::Immediate => self.immediate_mode,
            ParameterMode::Relative => self.relative_mode,
        }
    }
}

impl Default for Capabilities {
    fn default() -> Self {
        Self::FULL
    }
}

/// Named capability presets, one per stage of the instruction set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum Revision {
    /// Add, multiply and halt over position operands.
    Arithmetic,
    /// Adds input/output and immediate operands.
    Io,
    /// Adds jumps and comparisons.
    Branching,
    /// Adds relative operands and base adjustment.
    #[default]
    Full,
}

impl Revision {
    pub const fn capabilities(&self) -> Capabilities {
        match self {
            Revision::Arithmetic => Capabilities::ARITHMETIC,
            Revision::Io => Capabilities::IO,
            Revision::Branching => Capabilities::BRANCHING,
            Revision::Full => Capabilities::FULL,
        }
    }
}

impl From<Revision> for Capabilities {
    fn from(revision: Revision) -> Self {
        revision.capabilities()
    }
}

impl fmt::Display for Revision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Revision::Arithmetic => "arithmetic",
            Revision::Io => "io",
            Revision::Branching => "branching",
            Revision::Full => "full",
        };
        f.write_str(name)
    }
}
