// sml/exec.rs
use crate::sml::{
    errors::SmlError,
    instruction::{Instruction, Op},
    labels::Labels,
    program::Program,
    registers::Registers,
};
use log::{debug, trace};
use std::io::Write;

/// How many `jnz` calls may be nested inside one another before execution is aborted.
pub const MAX_JUMP_DEPTH: usize = 1024;

/// Program-counter update requested by an executed instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Continue with the next address.
    Next,
    /// Continue at the given address. No current opcode produces this.
    Jump(usize),
}

/// Machine state an instruction runs against.
pub struct Context<'a> {
    pub program: &'a Program,
    pub labels: &'a Labels,
    pub registers: &'a mut Registers,
}

/// Executes `instr`, whether or not it carries a label.
pub fn execute<W: Write + ?Sized>(
    instr: &Instruction,
    ctx: &mut Context<'_>,
    out: &mut W,
) -> Result<Flow, SmlError> {
    execute_nested(instr, ctx, out, 0)
}

fn execute_nested<W: Write + ?Sized>(
    instr: &Instruction,
    ctx: &mut Context<'_>,
    out: &mut W,
    depth: usize,
) -> Result<Flow, SmlError> {
    trace!("exec {instr}");
    let regs = &mut *ctx.registers;

    match &instr.op {
        Op::Add { result, source } => {
            regs.set(*result, regs.get(*result).wrapping_add(regs.get(*source)))
        }
        Op::Sub { result, source } => {
            regs.set(*result, regs.get(*result).wrapping_sub(regs.get(*source)))
        }
        Op::Mul { result, source } => {
            regs.set(*result, regs.get(*result).wrapping_mul(regs.get(*source)))
        }
        Op::Div { result, source } => {
            let num = regs.get(*result);
            let den = regs.get(*source);
            // a zero dividend is rejected as well
            if num == 0 || den == 0 {
                return Err(SmlError::DivideByZero(instr.to_string()));
            }
            regs.set(*result, num.wrapping_div(den));
        }
        Op::Mov { result, value } => regs.set(*result, *value),
        Op::Out { source } => {
            writeln!(out, "{} - {}", source, regs.get(*source))
                .map_err(|e| SmlError::OutputFailure(e.to_string()))?;
        }
        Op::Jnz { source, target } => {
            if regs.get(*source) == 0 {
                debug!("did not execute `{instr}` as {source} = 0");
                return Ok(Flow::Next);
            }
            let program: &Program = ctx.program;
            let address = ctx.labels.get_address(target)?;
            let callee = program
                .get(address)
                .ok_or_else(|| SmlError::UndefinedLabel(target.clone()))?;
            if depth >= MAX_JUMP_DEPTH {
                return Err(SmlError::JumpDepthExceeded(MAX_JUMP_DEPTH, instr.to_string()));
            }
            // the callee runs in place; its own flow result does not move the caller
            execute_nested(callee, ctx, out, depth + 1)?;
        }
    }
    Ok(Flow::Next)
}
