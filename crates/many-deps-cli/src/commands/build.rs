//! Build command implementation.

use crate::commands::{BuildArgs, Workload, WorkloadArgs, build_workspace};
use crate::core::CliError;
use crate::utils::ui;
use clap::Parser;

/// Arguments for the build command.
///
/// The workload arguments must match the ones the workspace was generated with.
#[derive(Parser)]
pub struct BuildCommandArgs {
    #[command(flatten)]
    pub workload: WorkloadArgs,

    #[command(flatten)]
    pub build: BuildArgs,
}

/// Run the build command against an already generated workspace.
pub fn run_build(args: BuildCommandArgs) -> Result<(), CliError> {
    ui::print_header();
    let workload = Workload::resolve(args.workload)?;
    build_workspace(&workload, &args.build)?;
    Ok(())
}
