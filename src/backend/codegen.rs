//! Code Generation trait - Backend abstraction
//!
//! Generators turn analyzed records into host-language source text.

use crate::frontend::semantic::AnalyzedRecord;
use crate::utils::Result;

/// Code generation backend trait
pub trait CodeGen {
    /// Render source text from analyzed records
    fn generate(&mut self, records: &[AnalyzedRecord]) -> Result<String>;

    /// Get the backend name
    fn name(&self) -> &str;
}
