//! Run command: generate, then build.

use crate::commands::{BuildArgs, Workload, WorkloadArgs, build_workspace, generate_workspace};
use crate::core::CliError;
use crate::utils::ui;
use clap::Parser;

/// Arguments for the run command.
#[derive(Parser)]
pub struct RunArgs {
    #[command(flatten)]
    pub workload: WorkloadArgs,

    #[command(flatten)]
    pub build: BuildArgs,
}

/// Generate a fresh workspace and build it.
pub fn run_workload(args: RunArgs) -> Result<(), CliError> {
    ui::print_header();
    let workload = Workload::resolve(args.workload)?;
    generate_workspace(&workload)?;
    build_workspace(&workload, &args.build)?;
    Ok(())
}
