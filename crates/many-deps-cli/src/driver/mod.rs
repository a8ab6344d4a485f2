//! Build driver.
//!
//! Either invokes `rustc` once per generated crate, in rank order, or hands
//! the whole workspace to bazel.

mod args;
mod bazel;
mod plan;
mod runner;
mod rustc;

pub use args::{ArgsMode, CommandLine, INLINE_ARGS_LIMIT, command_line, write_param_file};
pub use bazel::{DEFAULT_BAZEL, build_with_bazel};
pub use plan::{BuildPlan, CrateType, Invocation};
pub use runner::{ProcessRunner, ToolExit, ToolRunner};
pub use rustc::{DEFAULT_RUSTC, build_direct};
