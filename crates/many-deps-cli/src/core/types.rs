use std::time::Duration;

/// Progress notifications emitted by the build driver.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum BuildEvent<'a> {
    /// An invocation is about to start.
    Started {
        /// Crate name or orchestrator label.
        target: &'a str,
        /// Length of the param file, when one was written.
        param_file_len: Option<usize>,
    },
    /// An invocation exited successfully.
    Finished {
        target: &'a str,
        duration: Duration,
    },
}

/// Outcome of a successful build.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BuildSummary {
    /// Number of external invocations issued.
    pub invocations: usize,
    /// Wall time across all invocations.
    pub duration: Duration,
}
