//! Assembler support and integration for ca65-flavored syntax.

use crate::asm::traits::Assembler;
use crate::ast::{Label, Literal};
use std::io::{Result, Write};

/// The ca65-flavored syntax the listing output targets.
///
/// Hex values are `$`-prefixed and zero-padded to the width the instruction
/// encodes, which keeps columns of bytes, words, and long addresses aligned.
#[derive(Copy, Clone)]
pub struct Ca65();

impl Assembler for Ca65 {
    fn emit_label_decl(&self, stream: &mut dyn Write, label: &Label) -> Result<()> {
        if label.parent_name().is_some() {
            writeln!(stream, ".{}:", label.name())
        } else {
            writeln!(stream, "{}:", label.name())
        }
    }

    fn emit_mnemonic(&self, stream: &mut dyn Write, mnemonic: &str) -> Result<()> {
        write!(stream, "    {}", mnemonic)
    }

    fn emit_operand_start(&self, stream: &mut dyn Write, index: usize) -> Result<()> {
        if index == 0 {
            write!(stream, " ")
        } else {
            write!(stream, ",")
        }
    }

    fn emit_operand_separator(&self, stream: &mut dyn Write) -> Result<()> {
        write!(stream, ",")
    }

    fn emit_symbol(&self, stream: &mut dyn Write, symbol: &str) -> Result<()> {
        write!(stream, "{}", symbol)
    }

    fn emit_literal(&self, stream: &mut dyn Write, literal: &Literal) -> Result<()> {
        match literal {
            Literal::Byte(v) => write!(stream, "${:02X}", v),
            Literal::Word(v) => write!(stream, "${:04X}", v),
            Literal::Pointer(v) => write!(stream, "${:06X}", v),
        }
    }

    fn emit_label_operand(&self, stream: &mut dyn Write, label: &Label) -> Result<()> {
        if label.parent_name().is_none() {
            write!(stream, "{}", label.name())
        } else {
            write!(stream, ".{}", label.name())
        }
    }

    fn emit_comment(&self, stream: &mut dyn Write, comment: &str) -> Result<()> {
        write!(stream, " ; {}", comment)
    }
}
