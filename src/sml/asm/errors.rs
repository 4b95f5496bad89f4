use crate::sml::errors::SmlError;
use thiserror::Error;

/// Translation failure tied to the source line it came from.
///
/// `line` is 0-based; it is shown 1-based.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("line {}: {kind}", .line + 1)]
pub struct AsmError {
    pub line: usize,
    pub kind: SmlError,
}

impl AsmError {
    pub fn new(line: usize, kind: SmlError) -> Self {
        Self { line, kind }
    }
}
