//! Instruction AST type

use crate::ast::Operand;
use std::slice;

#[derive(Clone, Debug, PartialEq)]
pub struct Instruction {
    /// The instruction being executed
    opcode: String,

    /// Operands for the instruction, if any
    operands: Vec<Operand>,
}

impl Instruction {
    pub fn new(opcode: &str, operands: Vec<Operand>) -> Self {
        Instruction {
            opcode: opcode.to_string(),
            operands,
        }
    }

    pub fn opcode(&self) -> &str {
        &self.opcode
    }

    pub fn iter_operands(&self) -> slice::Iter<Operand> {
        self.operands.iter()
    }
}
