//! Types needed to analyze references

use crate::maths::u24;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReferenceKind {
    /// Ordinary execution flow into the next instruction.
    Flow,

    /// A jump or branch to another location.
    Jump,

    /// A subroutine call.
    Call,

    /// A read of or write to a data location.
    Data,
}

impl ReferenceKind {
    /// Whether this reference models the movement of the program counter.
    pub fn is_code(self) -> bool {
        !matches!(self, ReferenceKind::Data)
    }
}

impl Display for ReferenceKind {
    fn fmt(&self, f: &mut Formatter) -> Result {
        match self {
            ReferenceKind::Flow => write!(f, "FLO"),
            ReferenceKind::Jump => write!(f, "JMP"),
            ReferenceKind::Call => write!(f, "FUN"),
            ReferenceKind::Data => write!(f, "DAT"),
        }
    }
}

/// A single edge in the cross-reference graph.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Reference {
    from: u24,
    to: u24,
    kind: ReferenceKind,
}

impl Reference {
    pub fn new(from: u24, to: u24, kind: ReferenceKind) -> Self {
        Reference { from, to, kind }
    }

    pub fn as_source(&self) -> u24 {
        self.from
    }

    pub fn as_target(&self) -> u24 {
        self.to
    }

    pub fn kind(&self) -> ReferenceKind {
        self.kind
    }
}
