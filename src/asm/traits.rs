//! Traits for assembler syntax backends

use crate::ast::{Label, Line, Literal, Operand};
use std::io::{Result, Write};

/// A syntax backend that can serialize rendered code for one assembler.
///
/// The operand tree walk is syntax independent and provided as default
/// methods; backends supply the leaf spellings (literals, separators,
/// comments, label declarations).
pub trait Assembler {
    fn emit_line(&self, stream: &mut dyn Write, line: &Line) -> Result<()> {
        if let Some(label) = line.label() {
            self.emit_label_decl(stream, label)?;
        }

        if let Some(instr) = line.instr() {
            self.emit_mnemonic(stream, instr.opcode())?;

            for (index, operand) in instr.iter_operands().enumerate() {
                self.emit_operand_start(stream, index)?;
                self.emit_operand(stream, operand)?;
            }
        }

        if let Some(comment) = line.comment() {
            self.emit_comment(stream, comment)?;
        }

        Ok(())
    }

    fn emit_operand(&self, stream: &mut dyn Write, operand: &Operand) -> Result<()> {
        match operand {
            Operand::Symbol(s) => self.emit_symbol(stream, s),
            Operand::Literal(literal) => self.emit_literal(stream, literal),
            Operand::Label(label) => self.emit_label_operand(stream, label),
            Operand::DataReference(op) | Operand::CodeReference(op) => {
                self.emit_operand(stream, op)
            }
            Operand::PrefixSymbol(s, op) => {
                self.emit_symbol(stream, s)?;
                self.emit_operand(stream, op)
            }
            Operand::WrapperSymbol(s1, ops, s2) => {
                self.emit_symbol(stream, s1)?;

                for (index, op) in ops.iter().enumerate() {
                    if index > 0 {
                        self.emit_operand_separator(stream)?;
                    }

                    self.emit_operand(stream, op)?;
                }

                self.emit_symbol(stream, s2)
            }
        }
    }

    fn emit_label_decl(&self, stream: &mut dyn Write, label: &Label) -> Result<()>;
    fn emit_mnemonic(&self, stream: &mut dyn Write, mnemonic: &str) -> Result<()>;
    fn emit_operand_start(&self, stream: &mut dyn Write, index: usize) -> Result<()>;
    fn emit_operand_separator(&self, stream: &mut dyn Write) -> Result<()>;
    fn emit_symbol(&self, stream: &mut dyn Write, symbol: &str) -> Result<()>;
    fn emit_literal(&self, stream: &mut dyn Write, literal: &Literal) -> Result<()>;
    fn emit_label_operand(&self, stream: &mut dyn Write, label: &Label) -> Result<()>;
    fn emit_comment(&self, stream: &mut dyn Write, comment: &str) -> Result<()>;
}
