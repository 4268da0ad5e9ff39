use strum::IntoEnumIterator;
use tracing::info;

use crate::opcodes::Opcode;

/// Number of times each opcode was executed by a machine.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ExecutionStats {
    counts: [u64; Opcode::OP_COUNT],
}

impl ExecutionStats {
    pub(crate) fn record(&mut self, opcode: Opcode) {
        self.counts[opcode.index()] += 1;
    }

    pub fn count(&self, opcode: Opcode) -> u64 {
        self.counts[opcode.index()]
    }

    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// Yields `(opcode, count)` for every opcode that ran at least once.
    pub fn iter(&self) -> impl Iterator<Item = (Opcode, u64)> + '_ {
        Opcode::iter()
            .map(|op| (op, self.count(op)))
            .filter(|&(_, count)| count != 0)
    }

    pub fn log(&self) {
        for (opcode, count) in self.iter() {
            info!("Opcode: {opcode}, executed {count} times");
        }
    }
}
