use std::io;
use std::path::Path;
use std::process::{Command, ExitStatus, Stdio};

/// Exit status of an external tool.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ToolExit {
    /// Exit code, `None` when the process was killed by a signal.
    pub code: Option<i32>,
}

impl ToolExit {
    pub const SUCCESS: ToolExit = ToolExit { code: Some(0) };

    pub fn success(&self) -> bool {
        self.code == Some(0)
    }

    /// Describes the status the way it reads after a program name.
    pub fn describe(&self) -> String {
        match self.code {
            Some(code) => format!("exited with code {}", code),
            None => "was terminated by a signal".to_string(),
        }
    }
}

impl From<ExitStatus> for ToolExit {
    fn from(status: ExitStatus) -> Self {
        Self {
            code: status.code(),
        }
    }
}

/// Spawns external tools on behalf of the driver.
pub trait ToolRunner {
    /// Runs `program` to completion. Output goes straight to the terminal.
    fn run(&mut self, program: &Path, args: &[String], cwd: Option<&Path>) -> io::Result<ToolExit>;

    /// Checks that `program` can be spawned at all.
    fn probe(&mut self, program: &Path) -> io::Result<()>;
}

/// Runs tools as child processes with inherited stdio.
#[derive(Clone, Copy, Debug, Default)]
pub struct ProcessRunner;

impl ToolRunner for ProcessRunner {
    fn run(&mut self, program: &Path, args: &[String], cwd: Option<&Path>) -> io::Result<ToolExit> {
        let mut cmd = Command::new(program);
        cmd.args(args);
        if let Some(dir) = cwd {
            cmd.current_dir(dir);
        }

        tracing::debug!(program = %program.display(), args = args.len(), "spawning");
        Ok(cmd.status()?.into())
    }

    fn probe(&mut self, program: &Path) -> io::Result<()> {
        Command::new(program)
            .arg("--version")
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe() {
        assert_eq!(ToolExit { code: Some(101) }.describe(), "exited with code 101");
        assert_eq!(ToolExit { code: None }.describe(), "was terminated by a signal");
        assert!(ToolExit::SUCCESS.success());
    }

    #[test]
    fn test_probe_missing_program() {
        let err = ProcessRunner
            .probe(Path::new("/definitely/not/a/real/compiler"))
            .unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }
}
