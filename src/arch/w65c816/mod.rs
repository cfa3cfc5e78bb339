//! 65C816 CPU architecture. Extension of the 6502 to ""16-bit"" operation.
//!
//! Used as the main CPU for Apple ][gs and Super Famicom platforms. Also used
//! as accelerator chips for Commodore 64 and Super Famicom.
//!
//! The analysis headache this chip causes is all in two processor status
//! bits: M and X shrink the accumulator and index registers to 8 bits, and in
//! doing so shrink the *encoding* of two immediate addressing modes. A
//! decoder positioned at a lone address cannot know those bits; they have to
//! be inferred from whoever flows into that address and remembered per
//! address, which is what the annotation database is for.

mod actions;
mod dis;
mod fmt;
mod tables;
mod types;
mod xref;

pub use actions::can_change_idx_mode;
pub use actions::can_change_mem_mode;
pub use actions::set_offset_bank;
pub use actions::switch_bitmode;
pub use actions::BankChoice;
pub use dis::disassemble;
pub use dis::Disasm;
pub use dis::Operand;
pub use dis::OperandKind;
pub use fmt::render_data;
pub use fmt::render_instr;
pub use types::AddrMode;
pub use types::Bus;
pub use types::DecoderOptions;
pub use types::Opcode;
pub use types::StatusFlags;
pub use xref::emit;

#[cfg(test)]
mod tests;
