//! Analysis of instruction control flow

/// Indicates what kind of control flow a particular instruction involves.
///
/// Control flow determines in what order instructions are executed within a
/// subroutine. This implies the notion of a "next" instruction, present at
/// the address directly following the current instruction, and zero or more
/// possible alternative targets.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Flow {
    /// Normal control flow.
    ///
    /// Instruction control predictably flows from the current instruction to
    /// the following instruction.
    Normal,

    /// Branching control flow.
    ///
    /// Instruction control diverges at this point. The boolean parameter
    /// indicates whether or not the next instruction is one of the possible
    /// branches.
    Branching(bool),

    /// Returning control flow.
    ///
    /// Instruction control flow for this subroutine ends.
    Returning,
}

impl Flow {
    pub fn is_nonfinal(self) -> bool {
        use Flow::*;

        match self {
            Normal => true,
            Branching(with_next) => with_next,
            Returning => false,
        }
    }
}
