use crate::sml::{
    errors::SmlError,
    exec::{self, Context, Flow},
    instruction::Instruction,
    labels::Labels,
    program::Program,
    registers::Registers,
};
use log::trace;
use std::fmt;
use std::io::Write;

/// The context in which SML programs run.
///
/// Owns the program, its label table, the register bank and the program counter.
/// The translator hands a finished program over with [`Machine::load`].
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Machine {
    labels: Labels,
    program: Program,
    registers: Registers,
    pc: usize,
}

impl Machine {
    pub fn new(registers: Registers) -> Self {
        Self {
            registers,
            ..Self::default()
        }
    }

    /// Replaces the program and labels and rewinds the program counter.
    pub fn load(&mut self, program: Program, labels: Labels) {
        self.program = program;
        self.labels = labels;
        self.pc = 0;
    }

    pub fn labels(&self) -> &Labels {
        &self.labels
    }

    pub fn program(&self) -> &Program {
        &self.program
    }

    pub fn registers(&self) -> &Registers {
        &self.registers
    }

    pub fn registers_mut(&mut self) -> &mut Registers {
        &mut self.registers
    }

    pub fn program_counter(&self) -> usize {
        self.pc
    }

    pub fn is_finished(&self) -> bool {
        self.pc >= self.program.len()
    }

    /// Runs the program from address 0 with all registers cleared.
    ///
    /// Output of `out` instructions goes to `out`. Whatever was written before an error
    /// stays written.
    pub fn execute<W: Write + ?Sized>(&mut self, out: &mut W) -> Result<(), SmlError> {
        self.pc = 0;
        self.registers.clear();
        while self.step(out)? {}
        Ok(())
    }

    /// One turn of the fetch-execute loop. Returns `false` once the program counter has
    /// run off the end of the program.
    ///
    /// Labelled instructions are stepped over: they only run when a `jnz` calls them.
    pub fn step<W: Write + ?Sized>(&mut self, out: &mut W) -> Result<bool, SmlError> {
        let Some(instr) = self.program.get(self.pc) else {
            return Ok(false);
        };
        if instr.is_labelled() {
            trace!("skip {}: {instr}", self.pc);
            self.pc += 1;
            return Ok(!self.is_finished());
        }
        let mut ctx = Context {
            program: &self.program,
            labels: &self.labels,
            registers: &mut self.registers,
        };
        let flow = exec::execute(instr, &mut ctx, out)?;
        self.pc = next_pc(self.pc, flow, self.program.len());
        Ok(!self.is_finished())
    }

    /// Executes a single instruction against the current state, labelled or not.
    /// The program counter is left alone.
    pub fn execute_instruction<W: Write + ?Sized>(
        &mut self,
        instr: &Instruction,
        out: &mut W,
    ) -> Result<Flow, SmlError> {
        let mut ctx = Context {
            program: &self.program,
            labels: &self.labels,
            registers: &mut self.registers,
        };
        exec::execute(instr, &mut ctx, out)
    }
}

/// Program counter after an instruction at `pc` asked for `flow`, clamped to `len`.
fn next_pc(pc: usize, flow: Flow, len: usize) -> usize {
    match flow {
        Flow::Next => pc + 1,
        Flow::Jump(address) => address.min(len),
    }
}

impl fmt::Display for Machine {
    /// Program listing, one instruction per line.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)
    }
}
