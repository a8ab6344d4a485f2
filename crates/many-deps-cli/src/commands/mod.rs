//! CLI command implementations.

mod build;
mod common;
mod generate;
mod run;

pub use build::{BuildCommandArgs, run_build};
pub use common::{BuildArgs, Workload, WorkloadArgs, build_workspace, generate_workspace};
pub use generate::{GenerateArgs, run_generate};
pub use run::{RunArgs, run_workload};
