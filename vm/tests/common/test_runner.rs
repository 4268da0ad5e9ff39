use intvm::{Machine, Status, VmConfig};

/// Runs `program` to completion with the given inputs and returns the
/// halted machine.
pub fn run_program(program: &str, inputs: &[i64]) -> Machine {
    run_program_with(program, inputs, VmConfig::default())
}

pub fn run_program_with(program: &str, inputs: &[i64], config: VmConfig) -> Machine {
    let mut machine = Machine::with_config(program, inputs.iter().copied(), config)
        .unwrap_or_else(|err| panic!("failed to load {program}: {err}"));
    let status = machine
        .run()
        .unwrap_or_else(|err| panic!("failed to run {program}: {err}"));
    assert_eq!(status, Status::Halted, "{program} did not halt");
    machine
}

/// Runs `program` and returns everything it emitted, oldest first.
pub fn outputs_of(program: &str, inputs: &[i64]) -> Vec<i64> {
    run_program(program, inputs).drain_outputs()
}

/// Runs `program` without input and returns its final memory.
pub fn final_memory(program: &str) -> String {
    run_program(program, &[]).snapshot().1
}

/// Parses a phase string such as `"43210"` into one setting per digit.
pub fn phases(digits: &str) -> Vec<i64> {
    digits
        .chars()
        .map(|c| c.to_digit(10).expect("phase digit") as i64)
        .collect()
}
