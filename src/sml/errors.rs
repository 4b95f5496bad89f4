use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by the SML machine, its label table and the source loader.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SmlError {
    /// Mnemonic outside `add sub mul div mov out jnz`.
    #[error("unknown opcode: {0:?}")]
    UnknownOpcode(String),

    /// Too many tokens, a missing `jnz` target, an empty label or a label with no opcode.
    #[error("malformed line: {0}")]
    MalformedLine(String),

    /// Register operand that is not one of the eight register names.
    #[error("invalid register name: {0:?}")]
    InvalidRegisterName(String),

    /// Literal operand that does not parse as an `i32`.
    #[error("invalid integer literal: {0:?}")]
    InvalidIntegerLiteral(String),

    /// Label bound twice in one translation.
    #[error("duplicate label: {0}")]
    DuplicateLabel(String),

    /// `jnz` target with no bound address.
    #[error("undefined label: {0}")]
    UndefinedLabel(String),

    /// Division where the dividend or the divisor holds zero.
    #[error("division by zero while executing `{0}`")]
    DivideByZero(String),

    /// Chain of nested jumps deeper than the machine allows.
    #[error("jump nesting deeper than {0} while executing `{1}`")]
    JumpDepthExceeded(usize, String),

    /// The output sink refused a `out` line.
    #[error("output error: {0}")]
    OutputFailure(String),

    /// Source file missing.
    #[error("{} not found", .0.display())]
    FileNotFound(PathBuf),

    /// Source file present but unreadable.
    #[error("io error when reading the program from {}: {reason}", .path.display())]
    ReadFailure { path: PathBuf, reason: String },
}
