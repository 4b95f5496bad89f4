// sml/instruction.rs
use crate::sml::registers::Register;
use std::fmt;

/// Operation and operands of one instruction.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Op {
    Add { result: Register, source: Register },
    Sub { result: Register, source: Register },
    Mul { result: Register, source: Register },
    Div { result: Register, source: Register },
    Mov { result: Register, value: i32 },
    Out { source: Register },
    Jnz { source: Register, target: String },
}

impl Op {
    /// Mnemonic as written in source text.
    pub const fn opcode(&self) -> &'static str {
        match self {
            Op::Add { .. } => "add",
            Op::Sub { .. } => "sub",
            Op::Mul { .. } => "mul",
            Op::Div { .. } => "div",
            Op::Mov { .. } => "mov",
            Op::Out { .. } => "out",
            Op::Jnz { .. } => "jnz",
        }
    }
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let opcode = self.opcode();
        match self {
            Op::Add { result, source }
            | Op::Sub { result, source }
            | Op::Mul { result, source }
            | Op::Div { result, source } => write!(f, "{opcode} {result} {source}"),
            Op::Mov { result, value } => write!(f, "{opcode} {result} {value}"),
            Op::Out { source } => write!(f, "{opcode} {source}"),
            Op::Jnz { source, target } => write!(f, "{opcode} {source} {target}"),
        }
    }
}

/// A translated instruction: an optional attached label plus its operation.
///
/// Equality compares the operation only; two instructions that differ just in their
/// label are equal.
#[derive(Debug, Clone)]
pub struct Instruction {
    pub label: Option<String>,
    pub op: Op,
}

impl Instruction {
    pub fn new(label: Option<String>, op: Op) -> Self {
        Self { label, op }
    }

    pub fn unlabelled(op: Op) -> Self {
        Self { label: None, op }
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub const fn opcode(&self) -> &'static str {
        self.op.opcode()
    }

    pub fn is_labelled(&self) -> bool {
        self.label.is_some()
    }
}

impl PartialEq for Instruction {
    fn eq(&self, other: &Self) -> bool {
        self.op == other.op
    }
}

impl Eq for Instruction {}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(label) = &self.label {
            write!(f, "{label}: ")?;
        }
        write!(f, "{}", self.op)
    }
}

impl From<Op> for Instruction {
    fn from(op: Op) -> Self {
        Instruction::unlabelled(op)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use Register::*;

    #[test]
    fn renders_canonical_text() {
        let add = Instruction::unlabelled(Op::Add { result: EAX, source: ECX });
        assert_eq!(add.to_string(), "add EAX ECX");

        let mov = Instruction::new(Some("f3".into()), Op::Mov { result: EBX, value: -42 });
        assert_eq!(mov.to_string(), "f3: mov EBX -42");

        let out = Instruction::unlabelled(Op::Out { source: EDI });
        assert_eq!(out.to_string(), "out EDI");

        let jnz = Instruction::unlabelled(Op::Jnz { source: ECX, target: "test".into() });
        assert_eq!(jnz.to_string(), "jnz ECX test");
    }

    #[test]
    fn equality_is_over_operands() {
        let a = Instruction::new(Some("x".into()), Op::Div { result: EAX, source: EBX });
        let b = Instruction::unlabelled(Op::Div { result: EAX, source: EBX });
        let c = Instruction::unlabelled(Op::Div { result: EBX, source: EAX });
        let d = Instruction::unlabelled(Op::Mul { result: EAX, source: EBX });
        assert_eq!(a, b);
        assert_ne!(b, c);
        assert_ne!(b, d);
    }

    #[test]
    fn opcode_tags() {
        let ops = [
            (Op::Add { result: EAX, source: EAX }, "add"),
            (Op::Sub { result: EAX, source: EAX }, "sub"),
            (Op::Mul { result: EAX, source: EAX }, "mul"),
            (Op::Div { result: EAX, source: EAX }, "div"),
            (Op::Mov { result: EAX, value: 0 }, "mov"),
            (Op::Out { source: EAX }, "out"),
            (Op::Jnz { source: EAX, target: "l".into() }, "jnz"),
        ];
        for (op, tag) in ops {
            assert_eq!(Instruction::from(op).opcode(), tag);
        }
    }
}
