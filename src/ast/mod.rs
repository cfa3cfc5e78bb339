//! An abstract syntax tree representation of disassembled code

mod instr;
mod label;
mod line;
mod literal;
mod operand;

pub use instr::Instruction;
pub use label::Label;
pub use line::Line;
pub use literal::Literal;
pub use operand::Operand;
