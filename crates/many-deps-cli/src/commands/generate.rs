//! Generate command implementation.

use crate::commands::{Workload, WorkloadArgs, generate_workspace};
use crate::core::CliError;
use crate::utils::ui;
use clap::Parser;

/// Arguments for the generate command.
#[derive(Parser)]
pub struct GenerateArgs {
    #[command(flatten)]
    pub workload: WorkloadArgs,
}

/// Run the generate command.
pub fn run_generate(args: GenerateArgs) -> Result<(), CliError> {
    ui::print_header();
    let workload = Workload::resolve(args.workload)?;
    generate_workspace(&workload)?;
    Ok(())
}
