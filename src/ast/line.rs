//! AST type for a single listing line

use crate::ast::{Instruction, Label};
use crate::maths::u24;

/// One line of a rendered listing: an optional label declaration, an optional
/// instruction (or data directive), and an optional trailing comment.
#[derive(Clone, Debug, PartialEq)]
pub struct Line {
    label: Option<Label>,
    instruction: Option<Instruction>,
    comment: Option<String>,
    source_address: u24,
}

impl Line {
    pub fn new(
        label: Option<Label>,
        instruction: Option<Instruction>,
        comment: Option<String>,
        source_address: u24,
    ) -> Self {
        Line {
            label,
            instruction,
            comment,
            source_address,
        }
    }

    pub fn label(&self) -> Option<&Label> {
        self.label.as_ref()
    }

    pub fn instr(&self) -> Option<&Instruction> {
        self.instruction.as_ref()
    }

    pub fn comment(&self) -> Option<&str> {
        self.comment.as_deref()
    }

    pub fn source_address(&self) -> u24 {
        self.source_address
    }
}
