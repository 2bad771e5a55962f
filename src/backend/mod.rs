//! Backend module - Code generation and execution

pub mod codegen;
pub mod execution;

// Python Backend (the only host language)
pub mod python;

pub use codegen::CodeGen;
pub use execution::{ExecutionBackend, ExecutionOutput};
pub use python::{PythonBackend, PythonCodeGen};
