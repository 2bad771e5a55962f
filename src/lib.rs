//! para - a tiny loop language translated to Python
//!
//! ```text
//! para i no intervalo 1, 4 : escreva i
//! ```
//!
//! becomes
//!
//! ```text
//! for i in range(1, 4):
//!     print(i)
//! ```
//!
//! The pipeline is lexer -> parser -> semantic analysis -> code generation.
//! Running the generated code is left to an [`backend::ExecutionBackend`].

pub mod backend;
pub mod compiler;
pub mod feedback;
pub mod frontend;
pub mod utils;

pub use backend::python::generate;
pub use compiler::{compile, Compilation, Compiler};
pub use frontend::lexer::scan;
pub use frontend::parser::parse;
pub use frontend::semantic::analyze;
pub use utils::{Error, Result};
