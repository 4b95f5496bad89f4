pub mod errors;
pub mod exec;
pub mod instruction;
pub mod labels;
pub mod machine;
pub mod program;
pub mod registers;

pub mod asm;

pub use errors::SmlError;
pub use instruction::{Instruction, Op};
pub use labels::Labels;
pub use machine::Machine;
pub use program::Program;
pub use registers::{Register, Registers};
