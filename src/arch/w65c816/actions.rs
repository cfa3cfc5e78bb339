//! User actions over the annotation store
//!
//! The interactive layer that binds these to keys is someone else's
//! problem; each action here is a plain state transition on the database,
//! so it can be driven from a UI, a script, or a test equally well.

use crate::arch::w65c816::dis::disassemble;
use crate::arch::w65c816::tables::OPCODE_MODES;
use crate::arch::w65c816::types::{AddrMode, Bus, DecoderOptions, StatusFlags};
use crate::database::Database;
use crate::maths::u24;
use num::traits::Zero;

/// Name the interactive layer binds the width toggle under.
pub static SWITCH_BITMODE_ACTION: &str = "switch-bitmode";

/// Whether the opcode at this address has a memory-width-dependent
/// immediate, i.e. whether toggling `P.m` here changes anything.
pub fn can_change_mem_mode(ea: u24, bus: &Bus) -> bool {
    match bus.read_unit(ea) {
        Some(opcode) => OPCODE_MODES[opcode as usize] == AddrMode::Imm,
        None => false,
    }
}

/// Whether the opcode at this address has an index-width-dependent
/// immediate.
pub fn can_change_idx_mode(ea: u24, bus: &Bus) -> bool {
    match bus.read_unit(ea) {
        Some(opcode) => OPCODE_MODES[opcode as usize] == AddrMode::Imx,
        None => false,
    }
}

/// Flip the ambiguous width bit at this address and latch it against
/// automatic inference.
///
/// Returns false when the opcode at this address has no ambiguous width,
/// in which case nothing is recorded.
pub fn switch_bitmode(ea: u24, bus: &Bus, db: &mut Database) -> bool {
    let mut flags = StatusFlags::from_bits_truncate(db.flags_at(ea));

    if can_change_mem_mode(ea, bus) {
        flags.toggle(StatusFlags::MEM8);
    } else if can_change_idx_mode(ea, bus) {
        flags.toggle(StatusFlags::IDX8);
    } else {
        return false;
    }

    db.set_flags(ea, flags.bits());
    db.set_manual_bitmode(ea, true);

    true
}

/// Which bank a bank-override action should assume.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum BankChoice {
    /// The bank containing the instruction itself.
    Current,

    /// A segment the user picked, carried as that segment's start address.
    Segment(u24),

    /// The working-RAM segment that the zero page mirrors into.
    Wram,

    /// Bank zero.
    Zero,
}

/// Record an assumed bank for the operand at this address.
///
/// Modes whose encoding already names a bank only ever accept the zero
/// bank; any other request collapses to it. Returns true when an override
/// was recorded, false when no usable segment could be resolved (in which
/// case any previous override stays cleared).
pub fn set_offset_bank(
    ea: u24,
    choice: BankChoice,
    bus: &Bus,
    db: &mut Database,
    opts: &DecoderOptions,
) -> bool {
    db.clear_bank(ea);

    let mut choice = choice;

    if let Ok(disasm) = disassemble(ea, bus, db, opts) {
        if disasm.mode().has_explicit_bank() {
            choice = BankChoice::Zero;
        }
    }

    let start = match choice {
        BankChoice::Current => {
            let bank = ea.bank();

            if bus.is_mapped(bank) {
                Some(bank)
            } else {
                bus.region_at(ea).map(|r| r.start())
            }
        }
        BankChoice::Segment(start) => Some(start),
        BankChoice::Wram => bus.region_at(bus.use_mapping(u24::zero())).map(|r| r.start()),
        BankChoice::Zero => bus.region_at(u24::zero()).map(|r| r.start()),
    };

    match start {
        Some(start) => {
            db.set_bank(ea, start);
            db.set_offset_operand(ea, 0);

            true
        }
        None => false,
    }
}
