// src/sml/asm/mod.rs
//! Translation of SML source text into a [`Program`] and its [`Labels`].
//!
//! One instruction per line: `[label:] opcode operand [operand]`.

pub mod errors;
mod utils;


pub use errors::AsmError;

use crate::sml::{
    errors::SmlError,
    instruction::{Instruction, Op},
    labels::Labels,
    machine::Machine,
    program::Program,
};
use log::debug;
use std::io::ErrorKind;
use std::path::Path;
use utils::{strip_label, Scanner};

// ---------- Opcode table ----------

/// Builds the operation for one mnemonic from the rest of the line.
type Constructor = fn(&mut Scanner<'_>) -> Result<Op, SmlError>;

static OPCODES: [(&str, Constructor); 7] = [
    ("add", add),
    ("sub", sub),
    ("mul", mul),
    ("div", div),
    ("mov", mov),
    ("out", out),
    ("jnz", jnz),
];

fn add(ops: &mut Scanner<'_>) -> Result<Op, SmlError> {
    let result = ops.register()?;
    let source = ops.register()?;
    Ok(Op::Add { result, source })
}

fn sub(ops: &mut Scanner<'_>) -> Result<Op, SmlError> {
    let result = ops.register()?;
    let source = ops.register()?;
    Ok(Op::Sub { result, source })
}

fn mul(ops: &mut Scanner<'_>) -> Result<Op, SmlError> {
    let result = ops.register()?;
    let source = ops.register()?;
    Ok(Op::Mul { result, source })
}

fn div(ops: &mut Scanner<'_>) -> Result<Op, SmlError> {
    let result = ops.register()?;
    let source = ops.register()?;
    Ok(Op::Div { result, source })
}

fn mov(ops: &mut Scanner<'_>) -> Result<Op, SmlError> {
    let result = ops.register()?;
    let value = ops.integer()?;
    Ok(Op::Mov { result, value })
}

fn out(ops: &mut Scanner<'_>) -> Result<Op, SmlError> {
    let source = ops.register()?;
    Ok(Op::Out { source })
}

fn jnz(ops: &mut Scanner<'_>) -> Result<Op, SmlError> {
    let source = ops.register()?;
    let target = ops.label()?;
    Ok(Op::Jnz { source, target })
}

fn constructor(mnemonic: &str) -> Option<Constructor> {
    OPCODES
        .iter()
        .find(|(name, _)| *name == mnemonic)
        .map(|(_, build)| *build)
}

/// Mnemonics the translator accepts.
#[cfg(test)]
fn mnemonics() -> impl Iterator<Item = &'static str> {
    OPCODES.iter().map(|(name, _)| *name)
}

// ---------- API ----------

/// Translates a whole source text.
pub fn translate(text: &str) -> Result<(Program, Labels), AsmError> {
    let mut program = Program::new();
    let mut labels = Labels::new();
    translate_into(text, &mut program, &mut labels)?;
    Ok((program, labels))
}

/// Clears `program` and `labels`, then fills them from `text`.
///
/// On error both may hold the lines translated so far; callers that need all-or-nothing
/// use [`translate`] or [`load`].
pub fn translate_into(
    text: &str,
    program: &mut Program,
    labels: &mut Labels,
) -> Result<(), AsmError> {
    program.clear();
    labels.reset();

    for (i, line) in text.lines().enumerate() {
        let Some(instr) = translate_line(line).map_err(|e| AsmError::new(i, e))? else {
            continue;
        };
        if let Some(label) = instr.label() {
            labels
                .add_label(label, program.len())
                .map_err(|e| AsmError::new(i, e))?;
        }
        debug!("{:>4}: {instr}", program.len());
        program.push(instr);
    }
    Ok(())
}

/// Translates `text` and installs the result in `machine`. The machine is untouched if
/// translation fails.
pub fn load(text: &str, machine: &mut Machine) -> Result<(), AsmError> {
    let (program, labels) = translate(text)?;
    machine.load(program, labels);
    Ok(())
}

/// Translates one line. Blank lines give `None`; a label must be followed by an opcode.
pub fn translate_line(line: &str) -> Result<Option<Instruction>, SmlError> {
    let mut words = Scanner::new(line)?;
    let Some(first) = words.next_word() else {
        return Ok(None);
    };

    let (label, opcode) = match strip_label(first) {
        Some(label) => {
            if label.is_empty() {
                return Err(SmlError::MalformedLine("empty label".into()));
            }
            let opcode = words.next_word().ok_or_else(|| {
                SmlError::MalformedLine(format!("label {label:?} without instruction"))
            })?;
            (Some(label), opcode)
        }
        None => (None, first),
    };

    let build = constructor(opcode).ok_or_else(|| SmlError::UnknownOpcode(opcode.to_string()))?;
    let op = build(&mut words)?;
    words.finish()?;
    Ok(Some(Instruction::new(label.map(str::to_string), op)))
}

/// Reads a source file, separating a missing file from other read failures.
pub fn read_source(path: &Path) -> Result<String, SmlError> {
    std::fs::read_to_string(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => SmlError::FileNotFound(path.to_path_buf()),
        _ => SmlError::ReadFailure {
            path: path.to_path_buf(),
            reason: e.to_string(),
        },
    })
}
