//! Command-line driver.
//!
//! Usage:
//! - `intvm run <FILE> [-i N]...`
//! - `intvm ring <FILE> --phases 4,3,2,1,0 [--feedback]`
//! - `intvm search <FILE> --phases 0,1,2,3,4 [--feedback]`

use std::{fs, path::PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use intvm::{
    memory::DEFAULT_MEMORY_CEILING, search_phases, util::init_logger, InputPolicy, Machine,
    Revision, Ring, VmConfig,
};
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "intvm")]
#[command(about = "Run integer programs on one machine or on a ring of machines")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run a program on a single machine
    Run {
        #[command(flatten)]
        machine: MachineArgs,

        /// Value to queue as input; repeat for more
        #[arg(short = 'i', long = "input", allow_negative_numbers = true)]
        inputs: Vec<i64>,

        /// Read 0 instead of suspending when the input queue is empty
        #[arg(long)]
        legacy_input: bool,

        /// Print the final memory
        #[arg(long)]
        dump_memory: bool,

        /// Print per-opcode instruction counts
        #[arg(long)]
        stats: bool,
    },
    /// Run a program on a ring of machines, one per phase setting
    Ring {
        #[command(flatten)]
        machine: MachineArgs,

        /// Phase settings, one per machine
        #[arg(long, value_delimiter = ',', required = true, allow_negative_numbers = true)]
        phases: Vec<i64>,

        /// Feed the last machine's output back into the first
        #[arg(long)]
        feedback: bool,

        /// Value given to the first machine after its phase setting
        #[arg(long, default_value_t = intvm::execution::DEFAULT_SEED, allow_negative_numbers = true)]
        seed: i64,
    },
    /// Find the ordering of phase settings that maximizes the ring output
    Search {
        #[command(flatten)]
        machine: MachineArgs,

        /// Phase settings to permute
        #[arg(long, value_delimiter = ',', required = true, allow_negative_numbers = true)]
        phases: Vec<i64>,

        /// Feed the last machine's output back into the first
        #[arg(long)]
        feedback: bool,
    },
}

#[derive(Args, Debug)]
struct MachineArgs {
    /// Program file: comma-separated integers
    program: PathBuf,

    /// Instruction set revision to accept
    #[arg(long, value_enum, default_value_t = Revision::Full)]
    revision: Revision,

    /// Maximum number of memory words per machine
    #[arg(long, default_value_t = DEFAULT_MEMORY_CEILING)]
    memory_ceiling: usize,

    /// Maximum number of instructions per machine
    #[arg(long, default_value_t = intvm::config::DEFAULT_MAX_STEPS)]
    max_steps: u64,
}

impl MachineArgs {
    fn load(&self) -> Result<String> {
        let text = fs::read_to_string(&self.program)
            .with_context(|| format!("failed to read program {}", self.program.display()))?;
        Ok(text.trim().to_string())
    }

    fn config(&self) -> VmConfig {
        VmConfig::new()
            .with_capabilities(self.revision)
            .with_memory_ceiling(self.memory_ceiling)
            .with_max_steps(self.max_steps)
    }
}

fn main() -> Result<()> {
    let _guard = init_logger();

    match Cli::parse().command {
        Command::Run {
            machine,
            inputs,
            legacy_input,
            dump_memory,
            stats,
        } => {
            let text = machine.load()?;
            let mut config = machine.config();
            if legacy_input {
                config = config.with_input_policy(InputPolicy::DefaultZero);
            }

            let mut vm = Machine::with_config(&text, inputs, config)?;
            let status = vm.run()?;
            let (primary, memory) = vm.snapshot();
            info!(?status, steps = vm.steps(), primary, "Run finished");
            info!("Outputs: {:?}", vm.outputs());

            if dump_memory {
                info!("Memory: {memory}");
            }
            if stats {
                vm.stats().log();
            }
        }
        Command::Ring {
            machine,
            phases,
            feedback,
            seed,
        } => {
            let text = machine.load()?;
            let mut ring = Ring::with_seed(&text, &phases, seed, feedback, machine.config())?;
            let result = ring.run()?;
            info!(?phases, feedback, result, "Ring finished");
        }
        Command::Search {
            machine,
            phases,
            feedback,
        } => {
            let text = machine.load()?;
            let (best, order) = search_phases(&text, &phases, feedback, machine.config())?;
            info!(?order, feedback, best, "Best phase ordering");
        }
    }

    Ok(())
}
