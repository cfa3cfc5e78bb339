//! Types used in modeling the 65C816

use crate::memory;
use bitflags::bitflags;
use serde::{Deserialize, Serialize};

/// The compatible memory model type necessary to analyze 65C816 programs.
pub type Bus = memory::Memory;

bitflags! {
    /// The processor status byte, as it would be if execution reached a
    /// given address.
    ///
    /// Only `MEM8` and `IDX8` matter to decoding; the arithmetic bits are
    /// carried so that a stored status byte means the same thing it does on
    /// the silicon.
    pub struct StatusFlags: u8 {
        const CARRY = 0x01;
        const ZERO = 0x02;
        const IRQ_DISABLE = 0x04;
        const DECIMAL = 0x08;

        /// Index registers (and their immediates) are 8 bits wide.
        const IDX8 = 0x10;

        /// Accumulator and memory accesses (and their immediates) are 8
        /// bits wide.
        const MEM8 = 0x20;

        const OVERFLOW = 0x40;
        const NEGATIVE = 0x80;
    }
}

/// Addressing modes of the 65C816.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum AddrMode {
    /// `#$00` - immediate, always one byte
    Im8,
    /// `#$00` or `#$0000` - immediate, sized by the memory-width flag
    Imm,
    /// `#$00` or `#$0000` - immediate, sized by the index-width flag
    Imx,
    /// `$00,S` - stack relative
    Sr,
    /// `$00` - direct page
    Dp,
    /// `($00)` - direct page, pushed by PEI
    Dps,
    /// `$00,X` - direct page indexed
    Dpx,
    /// `$00,Y` - direct page indexed
    Dpy,
    /// `($00)` - direct page indirect
    Idp,
    /// `($00,X)` - direct page indexed indirect
    Idx,
    /// `($00),Y` - direct page indirect indexed
    Idy,
    /// `[$00]` - direct page indirect long
    Idl,
    /// `[$00],Y` - direct page indirect long indexed
    Idly,
    /// `($00,S),Y` - stack relative indirect indexed
    Isy,
    /// `$0000` - absolute data reference through the data bank register
    Absd,
    /// `$0000` - absolute jump target within the program bank
    Absp,
    /// `$0000,X` - absolute indexed, data bank
    Abx,
    /// `$0000,Y` - absolute indexed, data bank
    Aby,
    /// `$000000` - absolute long jump
    Ablp,
    /// `$000000` - absolute long data reference
    Abld,
    /// `$000000,X` - absolute long indexed
    Alx,
    /// `($0000)` - indirect jump through a bank-zero pointer
    Ind,
    /// `($0000,X)` - indexed indirect jump, program bank
    Iax,
    /// `[$000000]` - indirect long jump
    Ial,
    /// 8-bit PC-relative branch
    Rel,
    /// 16-bit PC-relative branch
    Rell,
    /// `$00,$00` - block move bank pair
    Bm,
    /// No encoded operand; works the stack
    Stk,
    /// No encoded operand; works registers
    Regs,
}

impl AddrMode {
    /// Total instruction size in bytes, or `None` for the two modes whose
    /// size is resolved from the processor width flags at decode time.
    pub fn nominal_size(self) -> Option<u8> {
        use AddrMode::*;

        match self {
            Imm | Imx => None,
            Stk | Regs => Some(1),
            Im8 | Sr | Dp | Dps | Dpx | Dpy | Idp | Idx | Idy | Idl | Idly | Isy | Rel => Some(2),
            Absd | Absp | Abx | Aby | Ind | Iax | Ial | Rell | Bm => Some(3),
            Ablp | Abld | Alx => Some(4),
        }
    }

    /// Whether the operand encoding already carries a bank of its own.
    ///
    /// A bank override must never combine with these; their operands mean
    /// what they say.
    pub fn has_explicit_bank(self) -> bool {
        use AddrMode::*;

        matches!(self, Ablp | Abld | Alx | Ial)
    }

    /// Whether the operand is located through the direct page register.
    pub fn uses_direct_page(self) -> bool {
        use AddrMode::*;

        matches!(self, Dp | Dps | Dpx | Dpy | Idp | Idx | Idy | Idl | Idly)
    }

    /// Whether the operand is located through the data bank register.
    pub fn uses_data_bank(self) -> bool {
        use AddrMode::*;

        matches!(self, Absd | Abx | Aby)
    }
}

/// Instruction kinds (mnemonic identities) of the 65C816.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Opcode {
    Adc, And, Asl, Bcc, Bcs, Beq, Bit, Bmi, Bne, Bpl, Bra, Brk, Brl, Bvc,
    Bvs, Clc, Cld, Cli, Clv, Cmp, Cop, Cpx, Cpy, Dec, Dex, Dey, Eor, Inc,
    Inx, Iny, Jml, Jmp, Jsl, Jsr, Lda, Ldx, Ldy, Lsr, Mvn, Mvp, Nop, Ora,
    Pea, Pei, Per, Pha, Phb, Phd, Phk, Php, Phx, Phy, Pla, Plb, Pld, Plp,
    Plx, Ply, Rep, Rol, Ror, Rti, Rtl, Rts, Sbc, Sec, Sed, Sei, Sep, Sta,
    Stp, Stx, Sty, Stz, Tax, Tay, Tcd, Tcs, Tdc, Trb, Tsb, Tsc, Tsx, Txa,
    Txs, Txy, Tya, Tyx, Wai, Wdm, Xba, Xce,
}

impl Opcode {
    pub fn mnemonic(self) -> &'static str {
        use Opcode::*;

        match self {
            Adc => "ADC", And => "AND", Asl => "ASL", Bcc => "BCC", Bcs => "BCS",
            Beq => "BEQ", Bit => "BIT", Bmi => "BMI", Bne => "BNE", Bpl => "BPL",
            Bra => "BRA", Brk => "BRK", Brl => "BRL", Bvc => "BVC", Bvs => "BVS",
            Clc => "CLC", Cld => "CLD", Cli => "CLI", Clv => "CLV", Cmp => "CMP",
            Cop => "COP", Cpx => "CPX", Cpy => "CPY", Dec => "DEC", Dex => "DEX",
            Dey => "DEY", Eor => "EOR", Inc => "INC", Inx => "INX", Iny => "INY",
            Jml => "JML", Jmp => "JMP", Jsl => "JSL", Jsr => "JSR", Lda => "LDA",
            Ldx => "LDX", Ldy => "LDY", Lsr => "LSR", Mvn => "MVN", Mvp => "MVP",
            Nop => "NOP", Ora => "ORA", Pea => "PEA", Pei => "PEI", Per => "PER",
            Pha => "PHA", Phb => "PHB", Phd => "PHD", Phk => "PHK", Php => "PHP",
            Phx => "PHX", Phy => "PHY", Pla => "PLA", Plb => "PLB", Pld => "PLD",
            Plp => "PLP", Plx => "PLX", Ply => "PLY", Rep => "REP", Rol => "ROL",
            Ror => "ROR", Rti => "RTI", Rtl => "RTL", Rts => "RTS", Sbc => "SBC",
            Sec => "SEC", Sed => "SED", Sei => "SEI", Sep => "SEP", Sta => "STA",
            Stp => "STP", Stx => "STX", Sty => "STY", Stz => "STZ", Tax => "TAX",
            Tay => "TAY", Tcd => "TCD", Tcs => "TCS", Tdc => "TDC", Trb => "TRB",
            Tsb => "TSB", Tsc => "TSC", Tsx => "TSX", Txa => "TXA", Txs => "TXS",
            Txy => "TXY", Tya => "TYA", Tyx => "TYX", Wai => "WAI", Wdm => "WDM",
            Xba => "XBA", Xce => "XCE",
        }
    }

    /// Kinds with subroutine-call semantics. BRK and COP vector through the
    /// interrupt table, which is a call as far as flow analysis cares.
    pub fn is_call(self) -> bool {
        use Opcode::*;

        matches!(self, Jsr | Jsl | Brk | Cop)
    }

    pub fn is_return(self) -> bool {
        use Opcode::*;

        matches!(self, Rts | Rtl | Rti)
    }

    pub fn is_conditional(self) -> bool {
        use Opcode::*;

        matches!(self, Bpl | Bmi | Bvc | Bvs | Bcc | Bcs | Bne | Beq)
    }

    /// Kinds after which execution never reaches the following address.
    pub fn stops_flow(self) -> bool {
        use Opcode::*;

        matches!(self, Jmp | Jml | Bra | Brl | Rts | Rtl | Rti | Stp)
    }
}

/// ROM-specific decode switches.
///
/// Most commercial programs never execute BRK, COP, or WDM, so running into
/// one usually means the analysis strayed into data. All three default to
/// disabled; enable them per program when they are genuinely used.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecoderOptions {
    pub no_brk: bool,
    pub no_cop: bool,
    pub no_wdm: bool,
}

impl Default for DecoderOptions {
    fn default() -> Self {
        DecoderOptions {
            no_brk: true,
            no_cop: true,
            no_wdm: true,
        }
    }
}
