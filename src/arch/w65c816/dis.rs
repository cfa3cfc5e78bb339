//! Instruction decoding for the 65C816

use crate::analysis::{Error, Flow, Result};
use crate::arch::w65c816::tables::{OPCODE_KINDS, OPCODE_MODES};
use crate::arch::w65c816::types::{AddrMode, Bus, DecoderOptions, Opcode, StatusFlags};
use crate::database::{Database, ProblemKind};
use crate::maths::u24;

/// The kind of thing a decoded operand refers to.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum OperandKind {
    /// No operand in this slot.
    Void,

    /// An immediate constant.
    Imm,

    /// A data location.
    Mem,

    /// A control-flow target.
    Near,
}

/// One decoded operand.
///
/// `offset` is where the operand's encoding begins within the instruction,
/// so that reference tooling can point at the exact bytes.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Operand {
    kind: OperandKind,
    value: u24,
    offset: u8,
}

impl Operand {
    fn void() -> Self {
        Operand {
            kind: OperandKind::Void,
            value: u24::new(0),
            offset: 0,
        }
    }

    fn new(kind: OperandKind, value: u24, offset: u8) -> Self {
        Operand {
            kind,
            value,
            offset,
        }
    }

    pub fn kind(&self) -> OperandKind {
        self.kind
    }

    pub fn value(&self) -> u24 {
        self.value
    }

    pub fn offset(&self) -> u8 {
        self.offset
    }
}

/// One decoded instruction.
///
/// This record only lives for one decode/emit/render cycle; everything worth
/// keeping across cycles goes through the database instead.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Disasm {
    ea: u24,
    kind: Opcode,
    mode: AddrMode,
    size: u8,
    ops: [Operand; 2],
}

impl Disasm {
    pub fn ea(&self) -> u24 {
        self.ea
    }

    pub fn kind(&self) -> Opcode {
        self.kind
    }

    pub fn mode(&self) -> AddrMode {
        self.mode
    }

    pub fn size(&self) -> u8 {
        self.size
    }

    pub fn operands(&self) -> &[Operand; 2] {
        &self.ops
    }

    pub fn flow(&self) -> Flow {
        if self.kind.is_return() || self.kind == Opcode::Stp {
            Flow::Returning
        } else if self.kind.stops_flow() {
            Flow::Branching(false)
        } else if self.kind.is_conditional() {
            Flow::Branching(true)
        } else {
            Flow::Normal
        }
    }
}

/// Decode the instruction at `ea`.
///
/// Decoding reads the annotation database for the width flags and bank
/// override at `ea`, and writes it in two places: the SEP/REP width side
/// effect, and the flow-sensitive width borrow. The borrow is an explicit
/// retry-once: when `ea` has no manual override and some code location is
/// known to flow into it, that predecessor's flags are copied here and the
/// instruction is decoded a second time under them. One hop only; this
/// deliberately is not a dataflow fixed point, it trusts the nearest
/// already-decoded predecessor.
pub fn disassemble(ea: u24, bus: &Bus, db: &mut Database, opts: &DecoderOptions) -> Result<Disasm> {
    let disasm = decode_one(ea, bus, db, opts)?;

    match disasm.kind() {
        Opcode::Sep | Opcode::Rep => {
            apply_width_effect(&disasm, db);

            Ok(disasm)
        }
        _ => {
            if db.is_manual_bitmode(ea) {
                return Ok(disasm);
            }

            match db.code_predecessor(ea) {
                Some(pred) => {
                    db.set_flags(ea, db.flags_at(pred));

                    decode_one(ea, bus, db, opts)
                }
                None => Ok(disasm),
            }
        }
    }
}

/// A single decode pass under whatever flags the database currently holds.
fn decode_one(ea: u24, bus: &Bus, db: &mut Database, opts: &DecoderOptions) -> Result<Disasm> {
    let opcode = bus.read_unit(ea).ok_or(Error::UnconstrainedMemory(ea))?;

    let disabled = match opcode {
        0x00 => opts.no_brk,
        0x02 => opts.no_cop,
        0x42 => opts.no_wdm,
        _ => false,
    };

    if disabled {
        db.forget_problem(ea, ProblemKind::Disasm);

        return Err(Error::Disabled);
    }

    let mode = OPCODE_MODES[opcode as usize];
    let kind = OPCODE_KINDS[opcode as usize];
    let flags = StatusFlags::from_bits_truncate(db.flags_at(ea));
    let size = instr_size(mode, flags);

    let mut raw: u32 = 0;

    for i in 1..u32::from(size) {
        let byte = bus
            .read_unit(ea + i)
            .ok_or(Error::UnconstrainedMemory(ea + i))?;

        raw |= u32::from(byte) << ((i - 1) * 8);
    }

    let opaddr = operand_address(ea, mode, size, raw, db);
    let mut ops = [Operand::void(), Operand::void()];

    match mode {
        AddrMode::Im8 | AddrMode::Imm | AddrMode::Imx => {
            ops[0] = Operand::new(OperandKind::Imm, opaddr, 1);
        }
        AddrMode::Sr
        | AddrMode::Dp
        | AddrMode::Dps
        | AddrMode::Dpx
        | AddrMode::Dpy
        | AddrMode::Idp
        | AddrMode::Idx
        | AddrMode::Idy
        | AddrMode::Idl
        | AddrMode::Idly
        | AddrMode::Isy
        | AddrMode::Absd
        | AddrMode::Abx
        | AddrMode::Aby
        | AddrMode::Abld
        | AddrMode::Alx => {
            ops[0] = Operand::new(OperandKind::Mem, opaddr, 1);
        }
        AddrMode::Absp | AddrMode::Ind | AddrMode::Iax => {
            let target = ea.bank() | opaddr;

            if !bus.is_mapped(bus.use_mapping(target)) {
                return Err(Error::Unmapped(target));
            }

            ops[0] = Operand::new(OperandKind::Near, target, 1);
        }
        AddrMode::Ablp | AddrMode::Ial | AddrMode::Rel | AddrMode::Rell => {
            ops[0] = Operand::new(OperandKind::Near, opaddr, 1);
        }
        AddrMode::Bm => {
            ops[0] = Operand::new(OperandKind::Mem, u24::new(raw & 0xFF), 1);
            ops[1] = Operand::new(OperandKind::Mem, u24::new((raw >> 8) & 0xFF), 2);
        }
        AddrMode::Stk | AddrMode::Regs => {}
    }

    Ok(Disasm {
        ea,
        kind,
        mode,
        size,
        ops,
    })
}

fn instr_size(mode: AddrMode, flags: StatusFlags) -> u8 {
    match mode {
        AddrMode::Imm => {
            if flags.contains(StatusFlags::MEM8) {
                2
            } else {
                3
            }
        }
        AddrMode::Imx => {
            if flags.contains(StatusFlags::IDX8) {
                2
            } else {
                3
            }
        }
        _ => mode.nominal_size().unwrap_or(3),
    }
}

/// Reconstruct the operand address from the raw encoded bytes.
///
/// PC-relative displacements are taken relative to the address directly
/// after the instruction and wrap within the instruction's own bank. A bank
/// override combines with every other address-forming mode except the four
/// whose encoding already names a bank.
fn operand_address(ea: u24, mode: AddrMode, size: u8, raw: u32, db: &Database) -> u24 {
    let mut opaddr = match mode {
        AddrMode::Rel => {
            let disp = i32::from(raw as u8 as i8);
            let next = i32::from(ea.low16()) + i32::from(size);

            ea.bank() | u24::new(((next + disp) & 0xFFFF) as u32)
        }
        AddrMode::Rell => {
            let disp = i32::from(raw as u16 as i16);
            let next = i32::from(ea.low16()) + i32::from(size);

            ea.bank() | u24::new(((next + disp) & 0xFFFF) as u32)
        }
        _ => u24::new(raw),
    };

    if let Some(bank) = db.bank_at(ea) {
        let skip = mode.has_explicit_bank()
            || matches!(
                mode,
                AddrMode::Rel | AddrMode::Rell | AddrMode::Bm | AddrMode::Stk | AddrMode::Regs
            );

        if !skip {
            opaddr = opaddr | bank;
        }
    }

    opaddr
}

/// The SEP/REP width side effect: the immediate names which status bits to
/// set or clear, and the result is recorded at the instruction's own
/// address for successors to inherit.
fn apply_width_effect(disasm: &Disasm, db: &mut Database) {
    let imm = StatusFlags::from_bits_truncate((u32::from(disasm.operands()[0].value()) & 0xFF) as u8);

    if !imm.intersects(StatusFlags::MEM8 | StatusFlags::IDX8) {
        return;
    }

    let set = disasm.kind() == Opcode::Sep;
    let mut flags = StatusFlags::from_bits_truncate(db.flags_at(disasm.ea()));

    if imm.contains(StatusFlags::MEM8) {
        flags.set(StatusFlags::MEM8, set);
    }

    if imm.contains(StatusFlags::IDX8) {
        flags.set(StatusFlags::IDX8, set);
    }

    db.set_flags(disasm.ea(), flags.bits());
}
