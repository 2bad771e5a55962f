//! Execution backend trait
//!
//! The compiler never runs generated code itself; an execution backend takes
//! the generated text and runs it out of process.

use crate::utils::Result;

/// Captured result of one execution
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionOutput {
    pub stdout: String,
    pub stderr: String,
    /// Exit code, `None` if the process was killed by a signal
    pub status: Option<i32>,
}

impl ExecutionOutput {
    /// Printed lines, in order
    pub fn lines(&self) -> Vec<&str> {
        self.stdout.lines().collect()
    }
}

/// Runs generated source text
pub trait ExecutionBackend {
    /// Execute `code`, failing if the backend rejects or aborts it
    fn execute(&self, code: &str) -> Result<ExecutionOutput>;

    /// Get the backend name
    fn name(&self) -> &str;
}
