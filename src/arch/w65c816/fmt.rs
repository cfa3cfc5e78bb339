//! Listing output for the 65C816

use crate::arch::w65c816::actions;
use crate::arch::w65c816::actions::{can_change_idx_mode, can_change_mem_mode};
use crate::arch::w65c816::dis::{Disasm, OperandKind};
use crate::arch::w65c816::types::{AddrMode, Bus, Opcode, StatusFlags};
use crate::ast::Operand as op;
use crate::ast::{Instruction, Line, Literal};
use crate::database::Database;
use crate::maths::u24;

/// Render one decoded instruction as a listing line.
///
/// The operand text prefers a resolved symbol over a raw numeral wherever
/// the database can produce one. At most one advisory comment follows the
/// operands, and a user comment at the address beats every advisory.
pub fn render_instr(disasm: &Disasm, bus: &Bus, db: &Database) -> Line {
    let ea = disasm.ea();
    let label = db.symbol_at(ea).cloned();
    let instr = Instruction::new(&mnemonic(disasm), operand_ast(disasm, bus, db));
    let comment = match db.comment_at(ea) {
        Some(text) => Some(text.to_string()),
        None => advisory(disasm, bus, db),
    };

    Line::new(label, Some(instr), comment, ea)
}

/// Mnemonic text, with a width suffix wherever the mode's width isn't
/// already implied by its syntax.
fn mnemonic(disasm: &Disasm) -> String {
    use AddrMode::*;

    let suffix = match disasm.mode() {
        Rel | Rell | Im8 | Regs | Stk | Bm => "",
        _ => match disasm.size() {
            2 => ".B",
            3 => ".W",
            4 => ".L",
            _ => "",
        },
    };

    format!("{}{}", disasm.kind().mnemonic(), suffix)
}

fn operand_ast(disasm: &Disasm, bus: &Bus, db: &Database) -> Vec<op> {
    use AddrMode::*;

    match disasm.mode() {
        Im8 => vec![op::pref("#", byte_lit(disasm, 0))],
        Imm | Imx => vec![op::pref("#", byteword_or_off(disasm, 0, bus, db))],
        Sr => vec![byte_or_off(disasm, 0, bus, db), op::sym("S")],
        Dp => vec![byte_or_off(disasm, 0, bus, db)],
        Dps | Idp => vec![op::wrap("(", vec![byte_or_off(disasm, 0, bus, db)], ")")],
        Dpx => vec![byte_or_off(disasm, 0, bus, db), op::sym("X")],
        Dpy => vec![byte_or_off(disasm, 0, bus, db), op::sym("Y")],
        Idx => vec![op::wrap(
            "(",
            vec![byte_or_off(disasm, 0, bus, db), op::sym("X")],
            ")",
        )],
        Idy => vec![
            op::wrap("(", vec![byte_or_off(disasm, 0, bus, db)], ")"),
            op::sym("Y"),
        ],
        Idl => vec![op::wrap("[", vec![byte_or_off(disasm, 0, bus, db)], "]")],
        Idly => vec![
            op::wrap("[", vec![byte_or_off(disasm, 0, bus, db)], "]"),
            op::sym("Y"),
        ],
        Isy => vec![
            op::wrap(
                "(",
                vec![byte_or_off(disasm, 0, bus, db), op::sym("S")],
                ")",
            ),
            op::sym("Y"),
        ],
        Absd | Absp | Rel | Rell => vec![word_or_off(disasm, 0, bus, db)],
        Abx => vec![word_or_off(disasm, 0, bus, db), op::sym("X")],
        Aby => vec![word_or_off(disasm, 0, bus, db), op::sym("Y")],
        Ablp | Abld => vec![long_or_off(disasm, 0, bus, db)],
        Alx => vec![long_or_off(disasm, 0, bus, db), op::sym("X")],
        Ind => vec![op::wrap("(", vec![word_or_off(disasm, 0, bus, db)], ")")],
        Iax => vec![op::wrap(
            "(",
            vec![word_or_off(disasm, 0, bus, db), op::sym("X")],
            ")",
        )],
        Ial => vec![op::wrap("[", vec![long_or_off(disasm, 0, bus, db)], "]")],
        Bm => vec![
            byte_or_off(disasm, 0, bus, db),
            byte_or_off(disasm, 1, bus, db),
        ],
        Stk | Regs => vec![],
    }
}

fn byte_lit(disasm: &Disasm, n: usize) -> op {
    op::lit((u32::from(disasm.operands()[n].value()) & 0xFF) as u8)
}

/// Resolve an address to a symbol operand if the database knows a name for
/// its canonical home.
fn name_expr(addr: u24, code: bool, bus: &Bus, db: &Database) -> Option<op> {
    let target = bus.use_mapping(addr);

    db.symbol_at(target).map(|label| {
        if code {
            op::clbl(label.clone())
        } else {
            op::dlbl(label.clone())
        }
    })
}

/// A one-byte operand: a plain numeral until the user types it as an
/// offset, a name (or canonical address) afterwards.
fn byte_or_off(disasm: &Disasm, n: usize, bus: &Bus, db: &Database) -> op {
    let operand = &disasm.operands()[n];

    if !db.is_offset_operand(disasm.ea(), n as u8) {
        return byte_lit(disasm, n);
    }

    name_expr(operand.value(), false, bus, db)
        .unwrap_or_else(|| op::dptr(bus.use_mapping(operand.value())))
}

/// A dynamic-width immediate: plain numeral at the instruction's decoded
/// width until typed as an offset.
fn byteword_or_off(disasm: &Disasm, n: usize, bus: &Bus, db: &Database) -> op {
    let operand = &disasm.operands()[n];

    if !db.is_offset_operand(disasm.ea(), n as u8) {
        return if disasm.size() == 2 {
            byte_lit(disasm, n)
        } else {
            op::lit(operand.value().low16())
        };
    }

    name_expr(operand.value(), false, bus, db)
        .unwrap_or_else(|| op::dptr(bus.use_mapping(operand.value())))
}

/// A word-encoded address: always symbolic when a name resolves; numerals
/// stay at word width unless a bank override pushed them out of bank zero.
fn word_or_off(disasm: &Disasm, n: usize, bus: &Bus, db: &Database) -> op {
    let operand = &disasm.operands()[n];
    let code = operand.kind() == OperandKind::Near;

    match name_expr(operand.value(), code, bus, db) {
        Some(name) => name,
        None => {
            let value = operand.value();

            if u32::from(value) <= 0xFFFF {
                op::lit(value.low16())
            } else if code {
                op::cptr(value)
            } else {
                op::dptr(value)
            }
        }
    }
}

fn long_or_off(disasm: &Disasm, n: usize, bus: &Bus, db: &Database) -> op {
    let operand = &disasm.operands()[n];
    let code = operand.kind() == OperandKind::Near;

    match name_expr(operand.value(), code, bus, db) {
        Some(name) => name,
        None if code => op::cptr(operand.value()),
        None => op::dptr(operand.value()),
    }
}

/// Select the single advisory comment for an instruction, in priority
/// order: width-bit changes, then ambiguous width, then register changes,
/// then implied register use.
fn advisory(disasm: &Disasm, bus: &Bus, db: &Database) -> Option<String> {
    let ea = disasm.ea();

    match disasm.kind() {
        Opcode::Sep | Opcode::Rep => {
            let value = if disasm.kind() == Opcode::Rep { 0 } else { 1 };
            let imm = StatusFlags::from_bits_truncate(
                (u32::from(disasm.operands()[0].value()) & 0xFF) as u8,
            );

            match (
                imm.contains(StatusFlags::MEM8),
                imm.contains(StatusFlags::IDX8),
            ) {
                (true, true) => Some(format!("P.m=>{}, P.x=>{}", value, value)),
                (true, false) => Some(format!("P.m=>{}", value)),
                (false, true) => Some(format!("P.x=>{}", value)),
                (false, false) => None,
            }
        }
        _ => {
            let flags = StatusFlags::from_bits_truncate(db.flags_at(ea));

            if can_change_idx_mode(ea, bus) && !db.is_manual_bitmode(ea) {
                Some(format!(
                    "P.x={} ({} to change)",
                    flags.contains(StatusFlags::IDX8) as u8,
                    actions::SWITCH_BITMODE_ACTION
                ))
            } else if can_change_mem_mode(ea, bus) && !db.is_manual_bitmode(ea) {
                Some(format!(
                    "P.m={} ({} to change)",
                    flags.contains(StatusFlags::MEM8) as u8,
                    actions::SWITCH_BITMODE_ACTION
                ))
            } else {
                match disasm.kind() {
                    Opcode::Plb => Some("Stack -> Data Bank Reg".to_string()),
                    Opcode::Pld => Some("Stack -> Direct Page Reg".to_string()),
                    Opcode::Tcd => Some("ACC -> Direct Page Reg".to_string()),
                    _ => {
                        if disasm.mode().uses_direct_page() {
                            Some("Uses Direct Page Reg".to_string())
                        } else if disasm.mode().uses_data_bank() {
                            Some("Uses Data Bank Reg".to_string())
                        } else if disasm.mode() == AddrMode::Bm {
                            Some("Src(X),Dst(Y) [ACC.W]".to_string())
                        } else {
                            None
                        }
                    }
                }
            }
        }
    }
}

/// Render a data location as a listing line.
///
/// Offset-typed locations reconstruct their stored value (with any bank
/// override folded in), resolve it through the mapping layer, and print a
/// symbol when one resolves. A three-byte item is a packed 24-bit address.
pub fn render_data(ea: u24, bus: &Bus, db: &Database) -> Line {
    let label = db.symbol_at(ea).cloned();
    let comment = db.comment_at(ea).map(|s| s.to_string());
    let width = db.data_width(ea).unwrap_or(1);

    let instr = match width {
        3 => match bus.read_le24(ea) {
            Some(value) => {
                let operand = if db.is_offset_operand(ea, 0) {
                    name_expr(value, false, bus, db)
                        .unwrap_or_else(|| op::dptr(bus.use_mapping(value)))
                } else {
                    op::lit(value)
                };

                Instruction::new("dl", vec![operand])
            }
            None => Instruction::new("dl", vec![op::sym("?")]),
        },
        2 => match bus.read_leword(ea) {
            Some(value) => Instruction::new(
                "dw",
                vec![banked_or_plain(
                    ea,
                    u24::from(value),
                    Literal::Word(value),
                    bus,
                    db,
                )],
            ),
            None => Instruction::new("dw", vec![op::sym("?")]),
        },
        _ => match bus.read_unit(ea) {
            Some(value) => Instruction::new(
                "db",
                vec![banked_or_plain(
                    ea,
                    u24::from(value),
                    Literal::Byte(value),
                    bus,
                    db,
                )],
            ),
            None => Instruction::new("db", vec![op::sym("?")]),
        },
    };

    Line::new(label, Some(instr), comment, ea)
}

/// An offset-typed data value resolves through its bank override and the
/// mapping layer; anything else renders at its stored width.
fn banked_or_plain(ea: u24, raw: u24, plain: Literal, bus: &Bus, db: &Database) -> op {
    if !db.is_offset_operand(ea, 0) {
        return op::Literal(plain);
    }

    let mut value = raw;

    if let Some(bank) = db.bank_at(ea) {
        value = value | bank;
    }

    let target = bus.use_mapping(value);

    if bus.is_mapped(target) {
        name_expr(value, false, bus, db).unwrap_or_else(|| op::dptr(target))
    } else {
        op::Literal(plain)
    }
}
