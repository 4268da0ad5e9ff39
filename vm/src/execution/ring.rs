//! Several machines running the same program, chained output to input.
//!
//! In chain mode the last machine's output leaves the ring; in feedback
//! mode it is fed back into the first machine.

use tracing::{debug, instrument};

use super::{InterpreterError, Machine, StepOutcome};
use crate::{config::VmConfig, parser::parse_program};

/// Value appended to the first machine's input after its phase setting.
pub const DEFAULT_SEED: i64 = 0;

#[derive(Debug, Clone)]
pub struct Ring {
    machines: Vec<Machine>,
    feedback: bool,
    /// Last value emitted by the final machine.
    result: Option<i64>,
}

impl Ring {
    /// Builds one machine per phase setting, seeding the first with
    /// [`DEFAULT_SEED`].
    pub fn new(
        program_text: &str,
        phase_settings: &[i64],
        feedback: bool,
        config: VmConfig,
    ) -> Result<Self, InterpreterError> {
        Self::with_seed(program_text, phase_settings, DEFAULT_SEED, feedback, config)
    }

    pub fn with_seed(
        program_text: &str,
        phase_settings: &[i64],
        seed: i64,
        feedback: bool,
        config: VmConfig,
    ) -> Result<Self, InterpreterError> {
        let words = parse_program(program_text)?;
        Self::from_words(&words, phase_settings, seed, feedback, config)
    }

    /// Machine `i` starts with `[phase_settings[i]]` as input; machine 0
    /// additionally gets `seed` right after its phase setting.
    pub fn from_words(
        words: &[i64],
        phase_settings: &[i64],
        seed: i64,
        feedback: bool,
        config: VmConfig,
    ) -> Result<Self, InterpreterError> {
        if phase_settings.is_empty() {
            return Err(InterpreterError::EmptyRing);
        }

        let machines = phase_settings
            .iter()
            .enumerate()
            .map(|(index, &phase)| {
                let inputs = if index == 0 {
                    vec![phase, seed]
                } else {
                    vec![phase]
                };
                Machine::from_words(words.to_vec(), inputs, config)
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            machines,
            feedback,
            result: None,
        })
    }

    pub fn machines(&self) -> &[Machine] {
        &self.machines
    }

    pub const fn feedback(&self) -> bool {
        self.feedback
    }

    /// Runs the machines round-robin until the last one halts and returns
    /// the last value it emitted.
    ///
    /// Each turn steps one machine until it emits a value, suspends on
    /// input or halts. Emitted values go to the successor's input queue.
    /// Halted machines are skipped. Once the last machine has halted, further
    /// calls return the same result without running anything.
    #[instrument(level = "debug", skip(self), fields(machines = self.machines.len(), feedback = self.feedback))]
    pub fn run(&mut self) -> Result<i64, InterpreterError> {
        let count = self.machines.len();
        let last = count - 1;

        while !self.machines[last].is_terminated() {
            let mut progressed = false;

            for index in 0..count {
                if self.machines[index].is_terminated() {
                    continue;
                }

                let (made_progress, emitted) = self.turn(index)?;
                progressed |= made_progress;

                let Some(value) = emitted else {
                    continue;
                };
                if index == last {
                    self.result = Some(value);
                }
                if self.feedback || index != last {
                    let next = (index + 1) % count;
                    debug!(from = index, to = next, value, "relay");
                    self.machines[next].push_input(value);
                }
            }

            if !progressed {
                return Err(InterpreterError::RingDeadlock);
            }
        }

        self.result.ok_or(InterpreterError::NoRingOutput)
    }

    /// Steps machine `index` until it emits, suspends or halts. Returns
    /// whether any instruction ran and the emitted value, if any.
    fn turn(&mut self, index: usize) -> Result<(bool, Option<i64>), InterpreterError> {
        let machine = &mut self.machines[index];
        let mut progressed = false;

        loop {
            let outcome = machine
                .step()
                .map_err(|source| InterpreterError::RingInstance {
                    index,
                    source: Box::new(source),
                })?;

            match outcome {
                StepOutcome::Executed => {
                    progressed = true;
                    if let Some(value) = machine.take_output() {
                        return Ok((true, Some(value)));
                    }
                }
                StepOutcome::Halted => return Ok((true, None)),
                StepOutcome::AwaitingInput => return Ok((progressed, None)),
            }
        }
    }
}

/// Runs `program_text` on a ring with one machine per phase setting and the
/// default configuration.
pub fn run_ring(
    program_text: &str,
    phase_settings: &[i64],
    feedback: bool,
) -> Result<i64, InterpreterError> {
    Ring::new(program_text, phase_settings, feedback, VmConfig::default())?.run()
}

/// Tries every ordering of `phases` and returns the largest ring result
/// together with the ordering that produced it. On ties the first ordering
/// found wins.
pub fn search_phases(
    program_text: &str,
    phases: &[i64],
    feedback: bool,
    config: VmConfig,
) -> Result<(i64, Vec<i64>), InterpreterError> {
    if phases.is_empty() {
        return Err(InterpreterError::EmptyRing);
    }

    let words = parse_program(program_text)?;
    let mut best: Option<(i64, Vec<i64>)> = None;
    let mut order = phases.to_vec();

    for_each_permutation::<InterpreterError>(&mut order, |candidate| {
        let result =
            Ring::from_words(&words, candidate, DEFAULT_SEED, feedback, config)?.run()?;
        if best.as_ref().map_or(true, |(value, _)| result > *value) {
            best = Some((result, candidate.to_vec()));
        }
        Ok(())
    })?;

    best.ok_or(InterpreterError::EmptyRing)
}

/// Heap's algorithm, iteratively. The first visited permutation is `items`
/// as given.
fn for_each_permutation<E>(
    items: &mut [i64],
    mut visit: impl FnMut(&[i64]) -> Result<(), E>,
) -> Result<(), E> {
    let n = items.len();
    let mut counters = vec![0usize; n];

    visit(items)?;
    let mut i = 1;
    while i < n {
        if counters[i] < i {
            if i % 2 == 0 {
                items.swap(0, i);
            } else {
                items.swap(counters[i], i);
            }
            visit(items)?;
            counters[i] += 1;
            i = 1;
        } else {
            counters[i] = 0;
            i += 1;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::execution::ErrorKind;

    const CHAIN_PROGRAM: &str = "3,15,3,16,1002,16,10,16,1,16,15,15,4,15,99,0,0";

    #[test]
    fn test_permutations_are_exhaustive() {
        let mut items = vec![1, 2, 3, 4];
        let mut seen = HashSet::new();
        for_each_permutation(&mut items, |p| {
            seen.insert(p.to_vec());
            Ok::<_, ()>(())
        })
        .unwrap();
        assert_eq!(seen.len(), 24);
    }

    #[test]
    fn test_first_permutation_is_identity() {
        let mut items = vec![7, 8, 9];
        let mut first = None;
        for_each_permutation(&mut items, |p| {
            first.get_or_insert_with(|| p.to_vec());
            Ok::<_, ()>(())
        })
        .unwrap();
        assert_eq!(first, Some(vec![7, 8, 9]));
    }

    #[test]
    fn test_chain() {
        assert_eq!(run_ring(CHAIN_PROGRAM, &[4, 3, 2, 1, 0], false).unwrap(), 43210);
    }

    #[test]
    fn test_run_after_finish_keeps_result() {
        let mut ring = Ring::new(CHAIN_PROGRAM, &[4, 3, 2, 1, 0], false, VmConfig::default()).unwrap();
        assert!(!ring.feedback());
        assert_eq!(ring.machines()[0].inputs(), &[4, 0]);
        assert_eq!(ring.machines()[1].inputs(), &[3]);

        assert_eq!(ring.run().unwrap(), 43210);
        assert_eq!(ring.run().unwrap(), 43210);
        assert!(ring.machines().iter().all(Machine::is_terminated));
    }

    #[test]
    fn test_single_machine_chain() {
        // Emits seed * 10 + phase.
        let mut ring =
            Ring::with_seed(CHAIN_PROGRAM, &[7], 3, false, VmConfig::default()).unwrap();
        assert_eq!(ring.run().unwrap(), 37);
        assert!(ring.machines()[0].is_terminated());
    }

    #[test]
    fn test_empty_ring() {
        let err = run_ring(CHAIN_PROGRAM, &[], false).unwrap_err();
        assert!(matches!(err, InterpreterError::EmptyRing));
        assert_eq!(err.kind(), ErrorKind::Orchestration);

        let err = search_phases(CHAIN_PROGRAM, &[], true, VmConfig::default()).unwrap_err();
        assert!(matches!(err, InterpreterError::EmptyRing));
    }

    #[test]
    fn test_deadlock() {
        // Wants a third input nobody will ever provide.
        let err = run_ring("3,0,3,0,3,0,99", &[1], false).unwrap_err();
        assert!(matches!(err, InterpreterError::RingDeadlock));
    }

    #[test]
    fn test_no_output() {
        let err = run_ring("3,0,99", &[1, 2], false).unwrap_err();
        assert!(matches!(err, InterpreterError::NoRingOutput));
    }

    #[test]
    fn test_instance_fault() {
        // Jumps to the address given by the phase setting when it is nonzero.
        let program = "3,6,5,6,6,99,0";
        let err = run_ring(program, &[0, 50], false).unwrap_err();
        match &err {
            InterpreterError::RingInstance { index, source } => {
                assert_eq!(*index, 1);
                assert_eq!(source.kind(), ErrorKind::InvalidOpcode);
            }
            other => panic!("Expected RingInstance, got {other:?}"),
        }
        assert_eq!(err.kind(), ErrorKind::InvalidOpcode);
    }

    #[test]
    fn test_search_finds_best_order() {
        let (best, order) =
            search_phases(CHAIN_PROGRAM, &[0, 1, 2, 3, 4], false, VmConfig::default()).unwrap();
        assert_eq!(best, 43210);
        assert_eq!(order, vec![4, 3, 2, 1, 0]);
    }
}
