//! Operand AST type

use crate::ast::{Label, Literal};
use crate::maths::u24;

#[derive(Clone, Debug, PartialEq)]
pub enum Operand {
    /// The name of an architecturally defined register, or another
    /// non-register symbol defined by the architecture.
    Symbol(String),

    /// A literal constant value.
    Literal(Literal),

    /// A reference to a user-defined label.
    Label(Label),

    /// An operand which constitutes a data reference.
    DataReference(Box<Operand>),

    /// An operand which constitutes a code reference.
    CodeReference(Box<Operand>),

    /// A symbol prefixed to an operand.
    PrefixSymbol(String, Box<Operand>),

    /// A symbol that wraps a list of operands.
    WrapperSymbol(String, Vec<Operand>, String),
}

impl Operand {
    pub fn sym(sym: &str) -> Self {
        Operand::Symbol(sym.to_string())
    }

    pub fn lit<L>(literal: L) -> Self
    where
        Literal: From<L>,
    {
        Operand::Literal(Literal::from(literal))
    }

    pub fn dptr(ptr: u24) -> Self {
        Operand::DataReference(Box::new(Operand::Literal(Literal::Pointer(ptr))))
    }

    pub fn cptr(ptr: u24) -> Self {
        Operand::CodeReference(Box::new(Operand::Literal(Literal::Pointer(ptr))))
    }

    pub fn dlbl(label: Label) -> Self {
        Operand::DataReference(Box::new(Operand::Label(label)))
    }

    pub fn clbl(label: Label) -> Self {
        Operand::CodeReference(Box::new(Operand::Label(label)))
    }

    pub fn pref(sym: &str, op: Self) -> Self {
        Operand::PrefixSymbol(sym.to_string(), Box::new(op))
    }

    pub fn wrap(sym1: &str, ops: Vec<Self>, sym2: &str) -> Self {
        Operand::WrapperSymbol(sym1.to_string(), ops, sym2.to_string())
    }
}
