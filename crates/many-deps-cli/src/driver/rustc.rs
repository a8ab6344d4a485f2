use crate::core::{
    BuildEvent, BuildSummary, CliError, InvocationFailedError, SpawnFailedError, ToolNotFoundError,
};
use crate::driver::args::{ArgsMode, command_line};
use crate::driver::plan::BuildPlan;
use crate::driver::runner::ToolRunner;
use fs_err as fs;
use many_deps_shared::WorkspaceLayout;
use std::io;
use std::path::Path;
use std::time::{Duration, Instant};

/// Default compiler executable.
pub const DEFAULT_RUSTC: &str = if cfg!(windows) { "rustc.exe" } else { "rustc" };

/// Runs every invocation of `plan` in order, stopping at the first failure.
///
/// The build directory is recreated before the first invocation. Nothing
/// built before a failure is removed.
pub fn build_direct(
    plan: &BuildPlan,
    layout: &WorkspaceLayout,
    program: &Path,
    mode: ArgsMode,
    runner: &mut impl ToolRunner,
    mut on_event: impl FnMut(BuildEvent<'_>),
) -> Result<BuildSummary, CliError> {
    ensure_available(runner, program, "rustc")?;

    let build_dir = layout.build_dir();
    if build_dir.exists() {
        fs::remove_dir_all(&build_dir)?;
    }
    fs::create_dir_all(&build_dir)?;

    let mut total = Duration::ZERO;
    for invocation in &plan.invocations {
        fs::create_dir(&invocation.out_dir)?;
        let line = command_line(
            mode,
            &invocation.args,
            &layout.param_file_path(&invocation.name),
        )?;

        on_event(BuildEvent::Started {
            target: &invocation.name,
            param_file_len: line.param_file_len,
        });

        let start = Instant::now();
        let exit = runner
            .run(program, &line.args, None)
            .map_err(|err| spawn_failed(&invocation.name, program, err))?;
        let duration = start.elapsed();

        if !exit.success() {
            return Err(InvocationFailedError {
                target: invocation.name.clone(),
                program: program.display().to_string(),
                status: exit.describe(),
            }
            .into());
        }

        tracing::debug!(krate = %invocation.name, ?duration, "built");
        total += duration;
        on_event(BuildEvent::Finished {
            target: &invocation.name,
            duration,
        });
    }

    Ok(BuildSummary {
        invocations: plan.invocations.len(),
        duration: total,
    })
}

/// Fails with `ToolNotFound` when `program` cannot be spawned.
pub(crate) fn ensure_available(
    runner: &mut impl ToolRunner,
    program: &Path,
    flag: &'static str,
) -> Result<(), CliError> {
    runner.probe(program).map_err(|err| {
        if err.kind() == io::ErrorKind::NotFound {
            ToolNotFoundError {
                program: program.display().to_string(),
                flag,
                source: err,
            }
            .into()
        } else {
            CliError::Io(err)
        }
    })
}

/// Spawn failure of the invocation building `target`.
pub(crate) fn spawn_failed(target: &str, program: &Path, err: io::Error) -> CliError {
    SpawnFailedError {
        target: target.to_string(),
        program: program.display().to_string(),
        source: err,
    }
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::driver::runner::ToolExit;
    use many_deps_shared::WorkloadConfig;
    use std::path::PathBuf;
    use tempfile::TempDir;

    /// Records invocations and fails the one whose `@file` names `fail_on`.
    #[derive(Default)]
    struct FakeRunner {
        calls: Vec<Vec<String>>,
        fail_on: Option<String>,
        missing: bool,
        /// Error returned by every `run` call.
        spawn_error: Option<io::ErrorKind>,
    }

    impl ToolRunner for FakeRunner {
        fn run(
            &mut self,
            _program: &Path,
            args: &[String],
            _cwd: Option<&Path>,
        ) -> io::Result<ToolExit> {
            if let Some(kind) = self.spawn_error {
                return Err(io::Error::from(kind));
            }
            self.calls.push(args.to_vec());
            let failing = self
                .fail_on
                .as_ref()
                .is_some_and(|name| args[0].ends_with(&format!("{}.params", name)));
            Ok(if failing {
                ToolExit { code: Some(1) }
            } else {
                ToolExit::SUCCESS
            })
        }

        fn probe(&mut self, _program: &Path) -> io::Result<()> {
            if self.missing {
                Err(io::Error::from(io::ErrorKind::NotFound))
            } else {
                Ok(())
            }
        }
    }

    fn setup(count: usize) -> (TempDir, WorkspaceLayout, BuildPlan) {
        let temp_dir = TempDir::new().unwrap();
        let layout = WorkspaceLayout::new(temp_dir.path());
        let plan = BuildPlan::direct(&WorkloadConfig::default(), &layout, count, None);
        (temp_dir, layout, plan)
    }

    #[test]
    fn test_builds_in_rank_order_then_root() {
        let (_temp, layout, plan) = setup(3);
        let mut runner = FakeRunner::default();
        let mut started = Vec::new();

        let summary = build_direct(
            &plan,
            &layout,
            Path::new("rustc"),
            ArgsMode::ParamFile,
            &mut runner,
            |event| {
                if let BuildEvent::Started { target, .. } = event {
                    started.push(target.to_string());
                }
            },
        )
        .unwrap();

        assert_eq!(summary.invocations, 4);
        assert_eq!(
            started,
            vec![
                "some_long_and_annoying_name_0",
                "some_long_and_annoying_name_1",
                "some_long_and_annoying_name_2",
                "so_many_deps",
            ]
        );
        for call in &runner.calls {
            assert_eq!(call.len(), 1);
            assert!(call[0].starts_with('@'));
        }
        assert!(layout.param_file_path("so_many_deps").is_file());
    }

    #[test]
    fn test_stops_at_first_failure() {
        let (_temp, layout, plan) = setup(5);
        let mut runner = FakeRunner {
            fail_on: Some("some_long_and_annoying_name_2".to_string()),
            ..FakeRunner::default()
        };

        let err = build_direct(
            &plan,
            &layout,
            Path::new("rustc"),
            ArgsMode::ParamFile,
            &mut runner,
            |_| {},
        )
        .unwrap_err();

        assert_eq!(runner.calls.len(), 3);
        match err {
            CliError::InvocationFailed(e) => {
                assert_eq!(e.target, "some_long_and_annoying_name_2");
                assert_eq!(e.status, "exited with code 1");
            },
            other => panic!("expected InvocationFailed, got {:?}", other),
        }
        assert!(!layout.out_dir("some_long_and_annoying_name_3").exists());
        assert!(!layout.out_dir("so_many_deps").exists());
    }

    #[test]
    fn test_missing_compiler_is_reported_before_any_invocation() {
        let (_temp, layout, plan) = setup(2);
        let mut runner = FakeRunner {
            missing: true,
            ..FakeRunner::default()
        };

        let err = build_direct(
            &plan,
            &layout,
            &PathBuf::from("rustc-nightly"),
            ArgsMode::ParamFile,
            &mut runner,
            |_| {},
        )
        .unwrap_err();

        assert!(matches!(err, CliError::ToolNotFound(_)));
        assert!(runner.calls.is_empty());
        assert!(!layout.build_dir().exists());
    }

    #[test]
    fn test_spawn_failure_names_the_crate() {
        let (_temp, layout, plan) = setup(2);
        let mut runner = FakeRunner {
            spawn_error: Some(io::ErrorKind::ArgumentListTooLong),
            ..FakeRunner::default()
        };

        let err = build_direct(
            &plan,
            &layout,
            Path::new("rustc"),
            ArgsMode::Inline,
            &mut runner,
            |_| {},
        )
        .unwrap_err();

        match err {
            CliError::SpawnFailed(e) => {
                assert_eq!(e.target, "some_long_and_annoying_name_0");
                assert_eq!(e.program, "rustc");
                assert_eq!(e.source.kind(), io::ErrorKind::ArgumentListTooLong);
            },
            other => panic!("expected SpawnFailed, got {:?}", other),
        }
        assert!(!layout.out_dir("some_long_and_annoying_name_1").exists());
    }

    #[test]
    fn test_empty_workload_issues_one_invocation() {
        let (_temp, layout, plan) = setup(0);
        let mut runner = FakeRunner::default();

        let summary = build_direct(
            &plan,
            &layout,
            Path::new("rustc"),
            ArgsMode::Inline,
            &mut runner,
            |_| {},
        )
        .unwrap();

        assert_eq!(summary.invocations, 1);
        assert_eq!(runner.calls.len(), 1);
        assert!(runner.calls[0].contains(&"--crate-type=cdylib".to_string()));
    }

    #[test]
    fn test_rebuild_replaces_build_dir() {
        let (_temp, layout, plan) = setup(1);
        fs::create_dir_all(layout.out_dir("stale")).unwrap();

        build_direct(
            &plan,
            &layout,
            Path::new("rustc"),
            ArgsMode::ParamFile,
            &mut FakeRunner::default(),
            |_| {},
        )
        .unwrap();

        assert!(!layout.out_dir("stale").exists());
    }
}
