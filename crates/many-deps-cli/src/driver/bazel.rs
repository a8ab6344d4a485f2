use crate::core::{BuildEvent, BuildSummary, CliError, InvocationFailedError};
use crate::driver::runner::ToolRunner;
use crate::driver::rustc::{ensure_available, spawn_failed};
use many_deps_shared::{WorkloadConfig, WorkspaceLayout};
use std::path::Path;
use std::time::Instant;

/// Default orchestrator executable.
pub const DEFAULT_BAZEL: &str = "bazel";

/// Delegates the whole build to `bazel build //<root>:<root>`, run from the workspace root.
///
/// Bazel reads the generated `BUILD.bazel` files and orders the crates itself.
pub fn build_with_bazel(
    config: &WorkloadConfig,
    layout: &WorkspaceLayout,
    program: &Path,
    runner: &mut impl ToolRunner,
    mut on_event: impl FnMut(BuildEvent<'_>),
) -> Result<BuildSummary, CliError> {
    ensure_available(runner, program, "bazel")?;

    let label = config.root_label();
    let args = vec!["build".to_string(), label.clone()];

    on_event(BuildEvent::Started {
        target: &label,
        param_file_len: None,
    });

    let start = Instant::now();
    let exit = runner
        .run(program, &args, Some(layout.root()))
        .map_err(|err| spawn_failed(&label, program, err))?;
    let duration = start.elapsed();

    if !exit.success() {
        return Err(InvocationFailedError {
            target: label,
            program: program.display().to_string(),
            status: exit.describe(),
        }
        .into());
    }

    on_event(BuildEvent::Finished {
        target: &label,
        duration,
    });

    Ok(BuildSummary {
        invocations: 1,
        duration,
    })
}
