//! Opcode lookup tables for the 65C816
//!
//! These are pure data: every opcode byte maps to exactly one addressing
//! mode and one instruction kind, fixed at build time. The tests enumerate
//! all 256 entries, so a transcription slip in here fails loudly.

use crate::arch::w65c816::types::AddrMode;
use crate::arch::w65c816::types::AddrMode as M;
use crate::arch::w65c816::types::Opcode;
use crate::arch::w65c816::types::Opcode as O;

/// Addressing mode for every opcode byte.
#[rustfmt::skip]
pub static OPCODE_MODES: [AddrMode; 256] = [
    // 0       1       2        3       4        5       6       7        8        9       A        B        C        D        E       F
    M::Im8,  M::Idx, M::Im8,  M::Sr,  M::Dp,   M::Dp,  M::Dp,  M::Idl,  M::Stk,  M::Imm, M::Regs, M::Stk,  M::Absd, M::Absd, M::Absd, M::Abld, // 0
    M::Rel,  M::Idy, M::Idp,  M::Isy, M::Dp,   M::Dpx, M::Dpx, M::Idly, M::Regs, M::Aby, M::Regs, M::Regs, M::Absd, M::Abx,  M::Abx,  M::Alx,  // 1
    M::Absp, M::Idx, M::Ablp, M::Sr,  M::Dp,   M::Dp,  M::Dp,  M::Idl,  M::Stk,  M::Imm, M::Regs, M::Stk,  M::Absd, M::Absd, M::Absd, M::Abld, // 2
    M::Rel,  M::Idy, M::Idp,  M::Isy, M::Dpx,  M::Dpx, M::Dpx, M::Idly, M::Regs, M::Aby, M::Regs, M::Regs, M::Abx,  M::Abx,  M::Abx,  M::Alx,  // 3
    M::Stk,  M::Idx, M::Im8,  M::Sr,  M::Bm,   M::Dp,  M::Dp,  M::Idl,  M::Stk,  M::Imm, M::Regs, M::Stk,  M::Absp, M::Absd, M::Absd, M::Abld, // 4
    M::Rel,  M::Idy, M::Idp,  M::Isy, M::Bm,   M::Dpx, M::Dpx, M::Idly, M::Regs, M::Aby, M::Stk,  M::Regs, M::Ablp, M::Abx,  M::Abx,  M::Alx,  // 5
    M::Stk,  M::Idx, M::Rell, M::Sr,  M::Dp,   M::Dp,  M::Dp,  M::Idl,  M::Stk,  M::Imm, M::Regs, M::Stk,  M::Ind,  M::Absd, M::Absd, M::Abld, // 6
    M::Rel,  M::Idy, M::Idp,  M::Isy, M::Dpx,  M::Dpx, M::Dpx, M::Idly, M::Regs, M::Aby, M::Stk,  M::Regs, M::Iax,  M::Abx,  M::Abx,  M::Alx,  // 7
    M::Rel,  M::Idx, M::Rell, M::Sr,  M::Dp,   M::Dp,  M::Dp,  M::Idl,  M::Regs, M::Imm, M::Regs, M::Stk,  M::Absd, M::Absd, M::Absd, M::Abld, // 8
    M::Rel,  M::Idy, M::Idp,  M::Isy, M::Dpx,  M::Dpx, M::Dpy, M::Idly, M::Regs, M::Aby, M::Regs, M::Regs, M::Absd, M::Abx,  M::Abx,  M::Alx,  // 9
    M::Imx,  M::Idx, M::Imx,  M::Sr,  M::Dp,   M::Dp,  M::Dp,  M::Idl,  M::Regs, M::Imm, M::Regs, M::Stk,  M::Absd, M::Absd, M::Absd, M::Abld, // A
    M::Rel,  M::Idy, M::Idp,  M::Isy, M::Dpx,  M::Dpx, M::Dpy, M::Idly, M::Regs, M::Aby, M::Regs, M::Regs, M::Abx,  M::Abx,  M::Aby,  M::Alx,  // B
    M::Imx,  M::Idx, M::Im8,  M::Sr,  M::Dp,   M::Dp,  M::Dp,  M::Idl,  M::Regs, M::Imm, M::Regs, M::Regs, M::Absd, M::Absd, M::Absd, M::Abld, // C
    M::Rel,  M::Idy, M::Idp,  M::Isy, M::Dps,  M::Dpx, M::Dpx, M::Idly, M::Regs, M::Aby, M::Stk,  M::Regs, M::Ial,  M::Abx,  M::Abx,  M::Alx,  // D
    M::Imx,  M::Idx, M::Im8,  M::Sr,  M::Dp,   M::Dp,  M::Dp,  M::Idl,  M::Regs, M::Imm, M::Regs, M::Regs, M::Absd, M::Absd, M::Absd, M::Abld, // E
    M::Rel,  M::Idy, M::Idp,  M::Isy, M::Absd, M::Dpx, M::Dpx, M::Idly, M::Regs, M::Aby, M::Stk,  M::Regs, M::Iax,  M::Abx,  M::Abx,  M::Alx,  // F
];

/// Instruction kind for every opcode byte.
#[rustfmt::skip]
pub static OPCODE_KINDS: [Opcode; 256] = [
    // 0    1       2       3       4       5       6       7       8       9       A       B       C       D       E       F
    O::Brk, O::Ora, O::Cop, O::Ora, O::Tsb, O::Ora, O::Asl, O::Ora, O::Php, O::Ora, O::Asl, O::Phd, O::Tsb, O::Ora, O::Asl, O::Ora, // 0
    O::Bpl, O::Ora, O::Ora, O::Ora, O::Trb, O::Ora, O::Asl, O::Ora, O::Clc, O::Ora, O::Inc, O::Tcs, O::Trb, O::Ora, O::Asl, O::Ora, // 1
    O::Jsr, O::And, O::Jsl, O::And, O::Bit, O::And, O::Rol, O::And, O::Plp, O::And, O::Rol, O::Pld, O::Bit, O::And, O::Rol, O::And, // 2
    O::Bmi, O::And, O::And, O::And, O::Bit, O::And, O::Rol, O::And, O::Sec, O::And, O::Dec, O::Tsc, O::Bit, O::And, O::Rol, O::And, // 3
    O::Rti, O::Eor, O::Wdm, O::Eor, O::Mvp, O::Eor, O::Lsr, O::Eor, O::Pha, O::Eor, O::Lsr, O::Phk, O::Jmp, O::Eor, O::Lsr, O::Eor, // 4
    O::Bvc, O::Eor, O::Eor, O::Eor, O::Mvn, O::Eor, O::Lsr, O::Eor, O::Cli, O::Eor, O::Phy, O::Tcd, O::Jml, O::Eor, O::Lsr, O::Eor, // 5
    O::Rts, O::Adc, O::Per, O::Adc, O::Stz, O::Adc, O::Ror, O::Adc, O::Pla, O::Adc, O::Ror, O::Rtl, O::Jmp, O::Adc, O::Ror, O::Adc, // 6
    O::Bvs, O::Adc, O::Adc, O::Adc, O::Stz, O::Adc, O::Ror, O::Adc, O::Sei, O::Adc, O::Ply, O::Tdc, O::Jmp, O::Adc, O::Ror, O::Adc, // 7
    O::Bra, O::Sta, O::Brl, O::Sta, O::Sty, O::Sta, O::Stx, O::Sta, O::Dey, O::Bit, O::Txa, O::Phb, O::Sty, O::Sta, O::Stx, O::Sta, // 8
    O::Bcc, O::Sta, O::Sta, O::Sta, O::Sty, O::Sta, O::Stx, O::Sta, O::Tya, O::Sta, O::Txs, O::Txy, O::Stz, O::Sta, O::Stz, O::Sta, // 9
    O::Ldy, O::Lda, O::Ldx, O::Lda, O::Ldy, O::Lda, O::Ldx, O::Lda, O::Tay, O::Lda, O::Tax, O::Plb, O::Ldy, O::Lda, O::Ldx, O::Lda, // A
    O::Bcs, O::Lda, O::Lda, O::Lda, O::Ldy, O::Lda, O::Ldx, O::Lda, O::Clv, O::Lda, O::Tsx, O::Tyx, O::Ldy, O::Lda, O::Ldx, O::Lda, // B
    O::Cpy, O::Cmp, O::Rep, O::Cmp, O::Cpy, O::Cmp, O::Dec, O::Cmp, O::Iny, O::Cmp, O::Dex, O::Wai, O::Cpy, O::Cmp, O::Dec, O::Cmp, // C
    O::Bne, O::Cmp, O::Cmp, O::Cmp, O::Pei, O::Cmp, O::Dec, O::Cmp, O::Cld, O::Cmp, O::Phx, O::Stp, O::Jml, O::Cmp, O::Dec, O::Cmp, // D
    O::Cpx, O::Sbc, O::Sep, O::Sbc, O::Cpx, O::Sbc, O::Inc, O::Sbc, O::Inx, O::Sbc, O::Nop, O::Xba, O::Cpx, O::Sbc, O::Inc, O::Sbc, // E
    O::Beq, O::Sbc, O::Sbc, O::Sbc, O::Pea, O::Sbc, O::Inc, O::Sbc, O::Sed, O::Sbc, O::Plx, O::Xce, O::Jsr, O::Sbc, O::Inc, O::Sbc, // F
];

/// How an instruction kind touches one of its encoded operands.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct OperandUse {
    pub read: bool,
    pub write: bool,
}

const R: OperandUse = OperandUse {
    read: true,
    write: false,
};
const W: OperandUse = OperandUse {
    read: false,
    write: true,
};
const RW: OperandUse = OperandUse {
    read: true,
    write: true,
};
const NONE: OperandUse = OperandUse {
    read: false,
    write: false,
};

/// How each instruction kind uses its two operand slots.
///
/// Kinds whose modes encode no operand never consult this, so the catch-all
/// read entry is harmless for them.
pub fn operand_uses(kind: Opcode) -> [OperandUse; 2] {
    use Opcode::*;

    match kind {
        Sta | Stx | Sty | Stz => [W, NONE],
        Asl | Rol | Lsr | Ror | Inc | Dec | Tsb | Trb => [RW, NONE],
        // Block moves write through the destination bank and read from the
        // source bank.
        Mvp | Mvn => [W, R],
        _ => [R, NONE],
    }
}
