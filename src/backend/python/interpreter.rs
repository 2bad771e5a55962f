//! Python interpreter backend
//!
//! Hands generated code to an external `python3` process.

use std::path::{Path, PathBuf};
use std::process::Command;

use log::{debug, info};

use crate::backend::execution::{ExecutionBackend, ExecutionOutput};
use crate::utils::{Error, Result};

/// Interpreter names tried by [`PythonBackend::discover`], in order
const CANDIDATES: [&str; 2] = ["python3", "python"];

#[derive(Debug, Clone)]
pub struct PythonBackend {
    interpreter: PathBuf,
}

impl PythonBackend {
    /// Find an interpreter on `PATH`
    pub fn discover() -> Result<Self> {
        for candidate in CANDIDATES {
            if let Ok(path) = which::which(candidate) {
                info!("using python interpreter {}", path.display());
                return Ok(Self { interpreter: path });
            }
        }
        Err(Error::Backend(format!(
            "no Python interpreter found on PATH (tried {})",
            CANDIDATES.join(", ")
        )))
    }

    /// Use an explicit interpreter, given as a path or a program name
    pub fn with_interpreter(interpreter: impl AsRef<Path>) -> Result<Self> {
        let requested = interpreter.as_ref();
        let path = which::which(requested).map_err(|e| {
            Error::Backend(format!("interpreter '{}' not found: {}", requested.display(), e))
        })?;
        Ok(Self { interpreter: path })
    }

    pub fn interpreter(&self) -> &Path {
        &self.interpreter
    }
}

impl ExecutionBackend for PythonBackend {
    fn execute(&self, code: &str) -> Result<ExecutionOutput> {
        debug!("executing {} bytes with {}", code.len(), self.interpreter.display());

        let output = Command::new(&self.interpreter)
            .arg("-c")
            .arg(code)
            .output()
            .map_err(|e| {
                Error::Backend(format!("failed to start {}: {}", self.interpreter.display(), e))
            })?;

        let result = ExecutionOutput {
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            status: output.status.code(),
        };

        if !output.status.success() {
            return Err(Error::Backend(format!(
                "{} exited with {}: {}",
                self.interpreter.display(),
                result
                    .status
                    .map(|c| c.to_string())
                    .unwrap_or_else(|| "signal".to_string()),
                result.stderr.trim()
            )));
        }
        Ok(result)
    }

    fn name(&self) -> &str {
        "python"
    }
}
