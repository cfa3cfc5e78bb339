//! Error type for analysis

use crate::maths::u24;
use std::{error, fmt, result};

/// Error type for analysis.
#[derive(Debug, PartialEq, Eq)]
pub enum Error {
    /// Read an unconstrained value from memory.
    ///
    /// Unconstrained means that the byte at the given address has more than
    /// one possible value. This happens when decoding runs off the end of a
    /// loaded image or into rewritable memory with no image at all.
    UnconstrainedMemory(u24),

    /// The opcode at this address is administratively disabled.
    ///
    /// This is a deliberate "this isn't code" outcome, not a report of bad
    /// input: platforms which never use BRK, COP, or WDM treat those bytes
    /// as proof that the analysis strayed into data.
    Disabled,

    /// The instruction names a control-flow target outside the mapped
    /// address space.
    ///
    /// Such an instruction is not emitted at all; a jump to nowhere would
    /// corrupt everything downstream of it.
    Unmapped(u24),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use Error::*;

        match self {
            UnconstrainedMemory(ea) => {
                write!(f, "Invalid location ${:06X} (e.g. in uninitialized memory)", ea)
            }
            Disabled => write!(f, "Opcode is disabled for this program"),
            Unmapped(ea) => write!(f, "Control flow target ${:06X} is not mapped", ea),
        }
    }
}

impl error::Error for Error {}

pub type Result<T> = result::Result<T, Error>;
