//! Reference emission for the 65C816

use crate::analysis::{Reference, ReferenceKind};
use crate::arch::w65c816::dis::{Disasm, Operand, OperandKind};
use crate::arch::w65c816::tables::operand_uses;
use crate::arch::w65c816::types::{AddrMode, Bus, Opcode};
use crate::database::{Database, Problem, ProblemKind};

/// Emit the reference and advisory side effects of one decoded instruction.
///
/// Every operand is visited once per direction it is used in, reads before
/// writes. Memory operands become data references when the annotations say
/// they should, and heal themselves when they should not: a stale reference
/// or bank override is deleted instead of left dangling. Near operands
/// become call or jump edges. Unless the instruction unconditionally stops
/// control flow, the next instruction gets a fallthrough edge.
pub fn emit(disasm: &Disasm, bus: &Bus, db: &mut Database) {
    let uses = operand_uses(disasm.kind());

    for (n, operand) in disasm.operands().iter().enumerate() {
        if uses[n].read {
            handle_operand(operand, n as u8, true, disasm, bus, db);
        }
    }

    for (n, operand) in disasm.operands().iter().enumerate() {
        if uses[n].write {
            handle_operand(operand, n as u8, false, disasm, bus, db);
        }
    }

    if disasm.flow().is_nonfinal() {
        let next = disasm.ea() + u32::from(disasm.size());

        db.insert_xref(Reference::new(disasm.ea(), next, ReferenceKind::Flow));
    }

    match disasm.kind() {
        Opcode::Plb => db.remember_problem(
            disasm.ea(),
            Problem::new(ProblemKind::Attention, "Data Bank Change"),
        ),
        Opcode::Pld | Opcode::Tcd => db.remember_problem(
            disasm.ea(),
            Problem::new(ProblemKind::Attention, "Direct Page Reg Change"),
        ),
        Opcode::Nop => db.remember_problem(
            disasm.ea(),
            Problem::new(ProblemKind::Attention, "Rare instruction"),
        ),
        _ => {}
    }
}

fn handle_operand(
    operand: &Operand,
    n: u8,
    read_access: bool,
    disasm: &Disasm,
    bus: &Bus,
    db: &mut Database,
) {
    match operand.kind() {
        OperandKind::Void => {}
        OperandKind::Mem => {
            use AddrMode::*;

            match disasm.mode() {
                // Direct page and stack relative: the framework only hangs a
                // reference here once the user types the operand as an
                // offset.
                Sr | Dp | Dps | Dpx | Dpy | Idp | Idx | Idy | Idl | Idly | Isy => {
                    add_possible_dref(operand, n, disasm, bus, db, false);
                }
                // Absolute data references: a read always names a real
                // location, a bare write only counts once marked.
                Absd | Abx | Aby | Alx | Abld => {
                    add_possible_dref(operand, n, disasm, bus, db, read_access);
                }
                _ => {}
            }
        }
        OperandKind::Near => add_cref(operand, disasm, bus, db),
        OperandKind::Imm => {
            db.set_immediate(disasm.ea());
            add_possible_dref(operand, n, disasm, bus, db, false);
        }
    }
}

fn add_possible_dref(
    operand: &Operand,
    n: u8,
    disasm: &Disasm,
    bus: &Bus,
    db: &mut Database,
    ref_anyway: bool,
) {
    let target = bus.use_mapping(operand.value());

    if ref_anyway || db.is_offset_operand(disasm.ea(), n) {
        if bus.is_mapped(target) {
            db.insert_xref(Reference::new(disasm.ea(), target, ReferenceKind::Data));
            db.mark_data(target);
        }
    } else {
        db.clear_bank(disasm.ea());
        db.remove_dref(disasm.ea(), target);
    }
}

fn add_cref(operand: &Operand, disasm: &Disasm, bus: &Bus, db: &mut Database) {
    let kind = if disasm.kind().is_call() {
        ReferenceKind::Call
    } else {
        ReferenceKind::Jump
    };

    let target = bus.use_mapping(operand.value());

    if bus.is_mapped(target) {
        db.insert_xref(Reference::new(disasm.ea(), target, kind));
    } else {
        db.remove_code_xref(disasm.ea(), target);
    }
}
