//! Python Backend - Generate and run Python 3 source
//!
//! Python is the host language: loop records map onto `for ... in range(...)`
//! and `print(...)`.

mod interpreter;
mod python_codegen;

pub use interpreter::PythonBackend;
pub use python_codegen::{generate, PythonCodeGen};
