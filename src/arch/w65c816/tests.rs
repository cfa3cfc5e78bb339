//! 65C816 test suite

use crate::analysis::{Error, Flow, Reference, ReferenceKind};
use crate::arch::w65c816::actions::{set_offset_bank, switch_bitmode, BankChoice};
use crate::arch::w65c816::dis::{disassemble, OperandKind};
use crate::arch::w65c816::tables::{OPCODE_KINDS, OPCODE_MODES};
use crate::arch::w65c816::types::{Bus, DecoderOptions, Opcode, StatusFlags};
use crate::arch::w65c816::xref::emit;
use crate::arch::w65c816::{fmt, render_data, render_instr};
use crate::asm::{line_to_string, Ca65};
use crate::ast::Label;
use crate::database::{Database, Problem, ProblemKind};
use crate::maths::u24;
use crate::memory::Memory;

const ORG: u24 = u24::new(0x00_8000);

fn permissive() -> DecoderOptions {
    DecoderOptions {
        no_brk: false,
        no_cop: false,
        no_wdm: false,
    }
}

/// A ROM covering all of $008000..$00FFFF, so in-bank jump targets stay
/// mapped no matter what operand bytes a test encodes.
fn wide_bus(data: &[u8]) -> Bus {
    let mut image = vec![0_u8; 0x8000];
    image[..data.len()].copy_from_slice(data);

    Memory::test_rom(ORG, image)
}

/// The wide ROM plus WRAM and the low-page mirror into it.
fn platform_bus(data: &[u8]) -> Bus {
    let mut bus = wide_bus(data);

    bus.install_ram("WRAM", u24::new(0x7E_0000), u24::new(0x2_0000));
    bus.install_mirror("LOPAGES", u24::new(0), u24::new(0x2000), u24::new(0x7E_0000));

    bus
}

fn decode(data: &[u8], db: &mut Database) -> crate::analysis::Result<super::dis::Disasm> {
    disassemble(ORG, &wide_bus(data), db, &permissive())
}

fn render(data: &[u8], setup: impl FnOnce(&mut Database)) -> String {
    let bus = wide_bus(data);
    let mut db = Database::new();

    setup(&mut db);

    let disasm = disassemble(ORG, &bus, &mut db, &permissive()).expect("instruction should decode");

    line_to_string(&Ca65(), &render_instr(&disasm, &bus, &db))
}

#[test]
fn every_fixed_mode_decodes_at_its_nominal_size() {
    for opcode in 0..=255_u16 {
        let opcode = opcode as u8;
        let mut data = vec![0x90_u8; 4];
        data[0] = opcode;

        let bus = wide_bus(&data);
        let mode = OPCODE_MODES[opcode as usize];
        let kind = OPCODE_KINDS[opcode as usize];

        for &flag_bits in &[0x00_u8, 0x30] {
            let mut db = Database::new();
            db.set_flags(ORG, flag_bits);

            let disasm = disassemble(ORG, &bus, &mut db, &permissive())
                .unwrap_or_else(|e| panic!("opcode {:02X} failed to decode: {}", opcode, e));

            assert_eq!(disasm.mode(), mode, "opcode {:02X}", opcode);
            assert_eq!(disasm.kind(), kind, "opcode {:02X}", opcode);

            let expected = match mode.nominal_size() {
                Some(nominal) => nominal,
                None if flag_bits == 0x30 => 2,
                None => 3,
            };

            assert_eq!(disasm.size(), expected, "opcode {:02X}", opcode);
        }
    }
}

#[test]
fn dynamic_width_depends_only_on_its_own_flag() {
    // LDA #imm sizes by P.m; LDX #imm sizes by P.x, and not vice versa.
    let mut db = Database::new();
    db.set_flags(ORG, StatusFlags::IDX8.bits());
    let disasm = decode(&[0xA9, 0x34, 0x12], &mut db).unwrap();
    assert_eq!(disasm.size(), 3);

    let mut db = Database::new();
    db.set_flags(ORG, StatusFlags::MEM8.bits());
    let disasm = decode(&[0xA2, 0x34, 0x12], &mut db).unwrap();
    assert_eq!(disasm.size(), 3);

    let mut db = Database::new();
    db.set_flags(ORG, StatusFlags::IDX8.bits());
    let disasm = decode(&[0xA2, 0x34, 0x12], &mut db).unwrap();
    assert_eq!(disasm.size(), 2);
}

#[test]
fn lda_immediate_wide() {
    // $A9 with P.m clear: three bytes, operand read low byte first.
    let mut db = Database::new();
    let disasm = decode(&[0xA9, 0x34, 0x12], &mut db).unwrap();

    assert_eq!(disasm.kind(), Opcode::Lda);
    assert_eq!(disasm.size(), 3);
    assert_eq!(disasm.operands()[0].kind(), OperandKind::Imm);
    assert_eq!(disasm.operands()[0].value(), u24::new(0x1234));
    assert_eq!(disasm.operands()[0].offset(), 1);
}

#[test]
fn lda_immediate_narrow() {
    let mut db = Database::new();
    db.set_flags(ORG, StatusFlags::MEM8.bits());

    let disasm = decode(&[0xA9, 0x34, 0x12], &mut db).unwrap();

    assert_eq!(disasm.size(), 2);
    assert_eq!(disasm.operands()[0].value(), u24::new(0x34));
}

#[test]
fn sep_records_width_bits_at_its_own_address() {
    let mut db = Database::new();
    decode(&[0xE2, 0x20], &mut db).unwrap();

    let flags = StatusFlags::from_bits_truncate(db.flags_at(ORG));
    assert!(flags.contains(StatusFlags::MEM8));
    assert!(!flags.contains(StatusFlags::IDX8));
}

#[test]
fn rep_clears_width_bits_at_its_own_address() {
    let mut db = Database::new();
    db.set_flags(ORG, 0x30);

    decode(&[0xC2, 0x30], &mut db).unwrap();

    assert_eq!(db.flags_at(ORG), 0);
}

#[test]
fn sep_rep_leave_unrelated_bits_alone() {
    let mut db = Database::new();
    db.set_flags(ORG, (StatusFlags::CARRY | StatusFlags::DECIMAL).bits());

    decode(&[0xE2, 0x20], &mut db).unwrap();

    let flags = StatusFlags::from_bits_truncate(db.flags_at(ORG));
    assert!(flags.contains(StatusFlags::CARRY));
    assert!(flags.contains(StatusFlags::DECIMAL));
    assert!(flags.contains(StatusFlags::MEM8));
}

#[test]
fn branch_targets_are_relative_to_the_next_instruction() {
    let mut db = Database::new();
    let disasm = decode(&[0x80, 0x05], &mut db).unwrap();

    assert_eq!(disasm.operands()[0].kind(), OperandKind::Near);
    assert_eq!(disasm.operands()[0].value(), u24::new(0x00_8007));
}

#[test]
fn branch_displacements_roundtrip() {
    // Encoding a target as a signed displacement and decoding it back must
    // be the identity, across the whole displacement range.
    for disp in -128_i32..=127 {
        let mut db = Database::new();
        let disasm = decode(&[0x80, disp as i8 as u8], &mut db).unwrap();

        let expected = u24::new(((0x8000 + 2 + disp) & 0xFFFF) as u32);
        assert_eq!(disasm.operands()[0].value(), expected, "disp {}", disp);
    }
}

#[test]
fn long_branch_goes_backwards() {
    // BRL with displacement -3 lands back on itself.
    let mut db = Database::new();
    let disasm = decode(&[0x82, 0xFD, 0xFF], &mut db).unwrap();

    assert_eq!(disasm.kind(), Opcode::Brl);
    assert_eq!(disasm.operands()[0].value(), ORG);
}

#[test]
fn branches_wrap_within_their_own_bank() {
    let mut image = vec![0_u8; 0x8000];
    image[0x7FFE] = 0x80; // BRA +$10 at $00FFFE
    image[0x7FFF] = 0x10;

    let bus = Memory::test_rom(ORG, image);
    let mut db = Database::new();
    let disasm = disassemble(u24::new(0x00_FFFE), &bus, &mut db, &permissive()).unwrap();

    assert_eq!(disasm.operands()[0].value(), u24::new(0x00_0010));
}

#[test]
fn disabled_opcodes_fail_decode_and_clear_their_problem() {
    for &opcode in &[0x00_u8, 0x02, 0x42] {
        let bus = wide_bus(&[opcode]);
        let mut db = Database::new();
        db.remember_problem(ORG, Problem::new(ProblemKind::Disasm, "undecodable"));

        let result = disassemble(ORG, &bus, &mut db, &DecoderOptions::default());

        assert_eq!(result.unwrap_err(), Error::Disabled);
        assert_eq!(db.problem_at(ORG), None);
    }
}

#[test]
fn enabled_brk_decodes_as_a_two_byte_call() {
    let mut db = Database::new();
    let disasm = decode(&[0x00, 0xFE], &mut db).unwrap();

    assert_eq!(disasm.kind(), Opcode::Brk);
    assert_eq!(disasm.size(), 2);
    assert!(disasm.kind().is_call());
}

#[test]
fn program_bank_jump_to_unmapped_space_fails() {
    // JMP $0000 would land in unmapped bank-zero space.
    let mut db = Database::new();
    let result = decode(&[0x4C, 0x00, 0x00], &mut db);

    assert_eq!(result.unwrap_err(), Error::Unmapped(u24::new(0)));
}

#[test]
fn program_bank_jump_keeps_the_current_bank() {
    let mut db = Database::new();
    let disasm = decode(&[0x4C, 0x34, 0x90], &mut db).unwrap();

    assert_eq!(disasm.operands()[0].kind(), OperandKind::Near);
    assert_eq!(disasm.operands()[0].value(), u24::new(0x00_9034));
}

#[test]
fn block_move_decodes_two_bank_operands() {
    let mut db = Database::new();
    let disasm = decode(&[0x44, 0x01, 0x02], &mut db).unwrap();

    assert_eq!(disasm.kind(), Opcode::Mvp);
    assert_eq!(disasm.size(), 3);
    assert_eq!(disasm.operands()[0].kind(), OperandKind::Mem);
    assert_eq!(disasm.operands()[0].value(), u24::new(0x01));
    assert_eq!(disasm.operands()[0].offset(), 1);
    assert_eq!(disasm.operands()[1].value(), u24::new(0x02));
    assert_eq!(disasm.operands()[1].offset(), 2);
}

#[test]
fn bank_override_combines_with_bankless_modes() {
    let mut db = Database::new();
    db.set_bank(ORG, u24::new(0x7E_0000));

    let disasm = decode(&[0xA5, 0x10], &mut db).unwrap();

    assert_eq!(disasm.operands()[0].value(), u24::new(0x7E_0010));
}

#[test]
fn bank_override_never_touches_explicit_bank_modes() {
    // JSL $009000, LDA $123456, LDA $123456,X and JML [$1234] all carry
    // their own bank; a stored override must not perturb them.
    let cases: [(&[u8], u32); 4] = [
        (&[0x22, 0x00, 0x90, 0x00], 0x00_9000),
        (&[0xAF, 0x56, 0x34, 0x12], 0x12_3456),
        (&[0xBF, 0x56, 0x34, 0x12], 0x12_3456),
        (&[0xDC, 0x34, 0x12], 0x1234),
    ];

    for (data, expected) in cases.iter() {
        let mut clean = Database::new();
        let without = decode(data, &mut clean).unwrap();

        let mut overridden = Database::new();
        overridden.set_bank(ORG, u24::new(0x7E_0000));
        let with = decode(data, &mut overridden).unwrap();

        assert_eq!(without.operands()[0].value(), u24::new(*expected));
        assert_eq!(with.operands()[0].value(), without.operands()[0].value());
    }
}

#[test]
fn inference_borrows_the_predecessor_width() {
    let mut image = vec![0_u8; 0x8000];
    image[0x10] = 0xA9; // LDA #imm at $008010
    image[0x11] = 0x12;
    image[0x12] = 0x60;

    let bus = Memory::test_rom(ORG, image);
    let mut db = Database::new();

    db.set_flags(ORG, StatusFlags::MEM8.bits());
    db.insert_xref(Reference::new(ORG, u24::new(0x00_8010), ReferenceKind::Flow));

    let disasm = disassemble(u24::new(0x00_8010), &bus, &mut db, &permissive()).unwrap();

    assert_eq!(disasm.size(), 2);
    assert_eq!(db.flags_at(u24::new(0x00_8010)), StatusFlags::MEM8.bits());
}

#[test]
fn inference_is_bounded_to_one_hop() {
    // $008000 knows P.m; $008005 has never been decoded. An instruction
    // whose only predecessor is $008005 must not reach through it.
    let mut image = vec![0_u8; 0x8000];
    image[0x10] = 0xA9;
    image[0x11] = 0x12;
    image[0x12] = 0x34;

    let bus = Memory::test_rom(ORG, image);
    let mut db = Database::new();

    db.set_flags(ORG, StatusFlags::MEM8.bits());
    db.insert_xref(Reference::new(ORG, u24::new(0x00_8005), ReferenceKind::Flow));
    db.insert_xref(Reference::new(
        u24::new(0x00_8005),
        u24::new(0x00_8010),
        ReferenceKind::Flow,
    ));

    let disasm = disassemble(u24::new(0x00_8010), &bus, &mut db, &permissive()).unwrap();

    assert_eq!(disasm.size(), 3);
    assert_eq!(db.flags_at(u24::new(0x00_8010)), 0);
}

#[test]
fn manual_override_is_immune_to_inference() {
    let mut image = vec![0_u8; 0x8000];
    image[0x10] = 0xA9;
    image[0x11] = 0x12;
    image[0x12] = 0x34;

    let bus = Memory::test_rom(ORG, image);
    let target = u24::new(0x00_8010);

    let mut db = Database::new();
    db.set_flags(ORG, StatusFlags::MEM8.bits());
    db.insert_xref(Reference::new(ORG, target, ReferenceKind::Flow));
    db.set_manual_bitmode(target, true);

    let first = disassemble(target, &bus, &mut db, &permissive()).unwrap();
    assert_eq!(first.size(), 3);
    assert_eq!(db.flags_at(target), 0);

    // Decoding again with different predecessor flags changes nothing.
    db.set_flags(ORG, 0);
    let second = disassemble(target, &bus, &mut db, &permissive()).unwrap();
    assert_eq!(second.size(), 3);
    assert_eq!(db.flags_at(target), 0);
}

#[test]
fn flow_classification() {
    let mut db = Database::new();

    assert_eq!(decode(&[0xA9, 0x12, 0x34], &mut db).unwrap().flow(), Flow::Normal);
    assert_eq!(
        decode(&[0x80, 0x05], &mut db).unwrap().flow(),
        Flow::Branching(false)
    );
    assert_eq!(
        decode(&[0xD0, 0x05], &mut db).unwrap().flow(),
        Flow::Branching(true)
    );
    assert_eq!(decode(&[0x60], &mut db).unwrap().flow(), Flow::Returning);
    assert_eq!(decode(&[0xDB], &mut db).unwrap().flow(), Flow::Returning);
    assert_eq!(
        decode(&[0x20, 0x34, 0x90], &mut db).unwrap().flow(),
        Flow::Normal
    );
}

#[test]
fn emit_adds_fallthrough_for_nonfinal_instructions() {
    let bus = wide_bus(&[0xA9, 0x12, 0x34]);
    let mut db = Database::new();
    let disasm = disassemble(ORG, &bus, &mut db, &permissive()).unwrap();

    emit(&disasm, &bus, &mut db);

    assert_eq!(db.code_predecessor(u24::new(0x00_8003)), Some(ORG));
    assert!(db.is_immediate(ORG));
}

#[test]
fn emit_skips_fallthrough_after_a_stop() {
    let bus = wide_bus(&[0x60]);
    let mut db = Database::new();
    let disasm = disassemble(ORG, &bus, &mut db, &permissive()).unwrap();

    emit(&disasm, &bus, &mut db);

    assert_eq!(db.xrefs_to(u24::new(0x00_8001)).count(), 0);
}

#[test]
fn emit_creates_call_and_jump_edges() {
    let bus = wide_bus(&[0x20, 0x34, 0x90]);
    let mut db = Database::new();
    let disasm = disassemble(ORG, &bus, &mut db, &permissive()).unwrap();

    emit(&disasm, &bus, &mut db);

    let kinds: Vec<_> = db.xrefs_to(u24::new(0x00_9034)).map(|x| x.kind()).collect();
    assert_eq!(kinds, vec![ReferenceKind::Call]);

    let bus = wide_bus(&[0x4C, 0x34, 0x90]);
    let mut db = Database::new();
    let disasm = disassemble(ORG, &bus, &mut db, &permissive()).unwrap();

    emit(&disasm, &bus, &mut db);

    let kinds: Vec<_> = db.xrefs_to(u24::new(0x00_9034)).map(|x| x.kind()).collect();
    assert_eq!(kinds, vec![ReferenceKind::Jump]);
}

#[test]
fn emit_deletes_stale_edges_to_unmapped_targets() {
    // JSL into unmapped space decodes fine; the emitter self-heals any
    // edge recorded before the mapping went away.
    let bus = wide_bus(&[0x22, 0x00, 0x00, 0x40]);
    let mut db = Database::new();
    db.insert_xref(Reference::new(ORG, u24::new(0x40_0000), ReferenceKind::Call));

    let disasm = disassemble(ORG, &bus, &mut db, &permissive()).unwrap();
    emit(&disasm, &bus, &mut db);

    assert_eq!(db.xrefs_to(u24::new(0x40_0000)).count(), 0);
}

#[test]
fn emit_reads_create_data_references() {
    let bus = wide_bus(&[0xAD, 0x34, 0x90]);
    let mut db = Database::new();
    let disasm = disassemble(ORG, &bus, &mut db, &permissive()).unwrap();

    emit(&disasm, &bus, &mut db);

    let kinds: Vec<_> = db.xrefs_to(u24::new(0x00_9034)).map(|x| x.kind()).collect();
    assert_eq!(kinds, vec![ReferenceKind::Data]);
    assert_eq!(db.data_width(u24::new(0x00_9034)), Some(1));
}

#[test]
fn emit_unmarked_writes_heal_stale_annotations() {
    // STA $9034 with no offset mark: any old reference and bank override
    // must be dropped, not left dangling.
    let bus = wide_bus(&[0x8D, 0x34, 0x90]);
    let mut db = Database::new();
    db.set_bank(ORG, u24::new(0x7E_0000));
    db.insert_xref(Reference::new(ORG, u24::new(0x7E_9034), ReferenceKind::Data));

    let disasm = disassemble(ORG, &bus, &mut db, &permissive()).unwrap();
    emit(&disasm, &bus, &mut db);

    assert_eq!(db.bank_at(ORG), None);
    assert_eq!(db.xrefs_to(u24::new(0x7E_9034)).count(), 0);
}

#[test]
fn emit_direct_page_references_require_an_offset_mark() {
    let bus = platform_bus(&[0xA5, 0x10]);

    let mut db = Database::new();
    let disasm = disassemble(ORG, &bus, &mut db, &permissive()).unwrap();
    emit(&disasm, &bus, &mut db);
    assert_eq!(db.xrefs_to(u24::new(0x7E_0010)).count(), 0);

    // With the operand typed as an offset, the low page resolves through
    // the mirror into WRAM.
    let mut db = Database::new();
    db.set_offset_operand(ORG, 0);
    let disasm = disassemble(ORG, &bus, &mut db, &permissive()).unwrap();
    emit(&disasm, &bus, &mut db);

    let kinds: Vec<_> = db.xrefs_to(u24::new(0x7E_0010)).map(|x| x.kind()).collect();
    assert_eq!(kinds, vec![ReferenceKind::Data]);
}

#[test]
fn emit_raises_register_change_advisories() {
    for (data, note) in [
        (vec![0xAB_u8], "Data Bank Change"),
        (vec![0x2B], "Direct Page Reg Change"),
        (vec![0x5B], "Direct Page Reg Change"),
        (vec![0xEA], "Rare instruction"),
    ]
    .iter()
    {
        let bus = wide_bus(data);
        let mut db = Database::new();
        let disasm = disassemble(ORG, &bus, &mut db, &permissive()).unwrap();

        emit(&disasm, &bus, &mut db);

        let problem = db.problem_at(ORG).expect("advisory should be recorded");
        assert_eq!(problem.kind(), ProblemKind::Attention);
        assert_eq!(problem.note(), *note);
    }
}

#[test]
fn render_immediate_widths() {
    assert_eq!(
        render(&[0xA9, 0x12, 0x34], |db| db
            .set_flags(ORG, StatusFlags::MEM8.bits())),
        "    LDA.B #$12 ; P.m=1 (switch-bitmode to change)"
    );
    assert_eq!(
        render(&[0xA9, 0x34, 0x12], |_| ()),
        "    LDA.W #$1234 ; P.m=0 (switch-bitmode to change)"
    );
}

#[test]
fn render_manual_width_drops_the_hint() {
    assert_eq!(
        render(&[0xA9, 0x34, 0x12], |db| db.set_manual_bitmode(ORG, true)),
        "    LDA.W #$1234"
    );
}

#[test]
fn render_user_comments_beat_advisories() {
    assert_eq!(
        render(&[0xA5, 0x12], |db| db.set_comment(ORG, "scratch pointer")),
        "    LDA.B $12 ; scratch pointer"
    );
}

#[test]
fn render_addressing_mode_syntax() {
    assert_eq!(
        render(&[0xA5, 0x12], |_| ()),
        "    LDA.B $12 ; Uses Direct Page Reg"
    );
    assert_eq!(
        render(&[0xB5, 0x12], |_| ()),
        "    LDA.B $12,X ; Uses Direct Page Reg"
    );
    assert_eq!(
        render(&[0xA1, 0x12], |_| ()),
        "    LDA.B ($12,X) ; Uses Direct Page Reg"
    );
    assert_eq!(
        render(&[0xB1, 0x12], |_| ()),
        "    LDA.B ($12),Y ; Uses Direct Page Reg"
    );
    assert_eq!(
        render(&[0xA7, 0x12], |_| ()),
        "    LDA.B [$12] ; Uses Direct Page Reg"
    );
    assert_eq!(
        render(&[0xB7, 0x12], |_| ()),
        "    LDA.B [$12],Y ; Uses Direct Page Reg"
    );
    assert_eq!(render(&[0xA3, 0x12], |_| ()), "    LDA.B $12,S");
    assert_eq!(render(&[0xB3, 0x12], |_| ()), "    LDA.B ($12,S),Y");
    assert_eq!(
        render(&[0xAD, 0x34, 0x12], |_| ()),
        "    LDA.W $1234 ; Uses Data Bank Reg"
    );
    assert_eq!(
        render(&[0xBD, 0x34, 0x12], |_| ()),
        "    LDA.W $1234,X ; Uses Data Bank Reg"
    );
    assert_eq!(render(&[0xAF, 0x56, 0x34, 0x12], |_| ()), "    LDA.L $123456");
    assert_eq!(
        render(&[0xBF, 0x56, 0x34, 0x12], |_| ()),
        "    LDA.L $123456,X"
    );
    assert_eq!(render(&[0x6C, 0x34, 0x90], |_| ()), "    JMP.W ($9034)");
    assert_eq!(render(&[0x7C, 0x34, 0x90], |_| ()), "    JMP.W ($9034,X)");
    assert_eq!(render(&[0xDC, 0x34, 0x12], |_| ()), "    JML.W [$001234]");
    assert_eq!(
        render(&[0x44, 0x01, 0x02], |_| ()),
        "    MVP $01,$02 ; Src(X),Dst(Y) [ACC.W]"
    );
    assert_eq!(render(&[0x80, 0x05], |_| ()), "    BRA $8007");
    assert_eq!(render(&[0x60], |_| ()), "    RTS");
}

#[test]
fn render_sep_rep_advisories() {
    assert_eq!(render(&[0xE2, 0x20], |_| ()), "    SEP #$20 ; P.m=>1");
    assert_eq!(render(&[0xE2, 0x10], |_| ()), "    SEP #$10 ; P.x=>1");
    assert_eq!(
        render(&[0xC2, 0x30], |_| ()),
        "    REP #$30 ; P.m=>0, P.x=>0"
    );
    assert_eq!(render(&[0xE2, 0x01], |_| ()), "    SEP #$01");
}

#[test]
fn render_prefers_symbols_over_numerals() {
    assert_eq!(
        render(&[0x20, 0x34, 0x90], |db| {
            db.insert_symbol(u24::new(0x00_9034), Label::global("do_thing"));
        }),
        "    JSR.W do_thing"
    );
}

#[test]
fn render_labels_the_line_when_the_address_is_named() {
    assert_eq!(
        render(&[0x60], |db| db.insert_symbol(ORG, Label::global("leave"))),
        "leave:\n    RTS"
    );
}

#[test]
fn render_direct_page_offsets_resolve_through_the_mirror() {
    let bus = platform_bus(&[0xA5, 0x10]);
    let mut db = Database::new();

    db.set_offset_operand(ORG, 0);
    db.insert_symbol(u24::new(0x7E_0010), Label::global("frame_count"));

    let disasm = disassemble(ORG, &bus, &mut db, &permissive()).unwrap();

    assert_eq!(
        line_to_string(&Ca65(), &render_instr(&disasm, &bus, &db)),
        "    LDA.B frame_count ; Uses Direct Page Reg"
    );
}

#[test]
fn render_data_widths() {
    let bus = platform_bus(&[0x56, 0x34, 0x12]);

    let mut db = Database::new();
    assert_eq!(
        line_to_string(&Ca65(), &render_data(ORG, &bus, &db)),
        "    db $56"
    );

    db.set_data_width(ORG, 2);
    assert_eq!(
        line_to_string(&Ca65(), &render_data(ORG, &bus, &db)),
        "    dw $3456"
    );

    db.set_data_width(ORG, 3);
    assert_eq!(
        line_to_string(&Ca65(), &render_data(ORG, &bus, &db)),
        "    dl $123456"
    );
}

#[test]
fn render_data_resolves_packed_addresses() {
    let bus = platform_bus(&[0x00, 0x80, 0x00]);
    let mut db = Database::new();

    db.set_data_width(ORG, 3);
    db.set_offset_operand(ORG, 0);
    db.insert_symbol(ORG, Label::global("reset"));

    // The packed pointer names this very location.
    assert_eq!(
        line_to_string(&Ca65(), &render_data(ORG, &bus, &db)),
        "reset:\n    dl reset"
    );
}

#[test]
fn render_data_applies_bank_overrides() {
    let bus = platform_bus(&[0x10]);
    let mut db = Database::new();

    db.set_offset_operand(ORG, 0);
    db.set_bank(ORG, u24::new(0x7F_0000));
    db.insert_symbol(u24::new(0x7F_0010), Label::global("save_slot"));

    assert_eq!(
        line_to_string(&Ca65(), &render_data(ORG, &bus, &db)),
        "    db save_slot"
    );

    // Without the override the byte resolves through the low-page mirror
    // instead, where no name is known.
    db.clear_bank(ORG);
    assert_eq!(
        line_to_string(&Ca65(), &render_data(ORG, &bus, &db)),
        "    db $7E0010"
    );
}

#[test]
fn switch_bitmode_latches_a_manual_override() {
    let bus = wide_bus(&[0xA9, 0x12, 0x34]);
    let mut db = Database::new();

    assert!(switch_bitmode(ORG, &bus, &mut db));
    assert!(db.is_manual_bitmode(ORG));
    assert_eq!(db.flags_at(ORG), StatusFlags::MEM8.bits());

    assert!(switch_bitmode(ORG, &bus, &mut db));
    assert_eq!(db.flags_at(ORG), 0);
}

#[test]
fn switch_bitmode_picks_the_index_flag_for_index_immediates() {
    let bus = wide_bus(&[0xA2, 0x12, 0x34]);
    let mut db = Database::new();

    assert!(switch_bitmode(ORG, &bus, &mut db));
    assert_eq!(db.flags_at(ORG), StatusFlags::IDX8.bits());
}

#[test]
fn switch_bitmode_rejects_unambiguous_opcodes() {
    let bus = wide_bus(&[0xEA]);
    let mut db = Database::new();

    assert!(!switch_bitmode(ORG, &bus, &mut db));
    assert!(!db.is_manual_bitmode(ORG));
}

#[test]
fn set_offset_bank_current_falls_back_to_the_segment() {
    // Bank zero of a bare ROM bus is unmapped, so "current bank" resolves
    // to the segment holding the instruction.
    let bus = wide_bus(&[0xA5, 0x10]);
    let mut db = Database::new();

    assert!(set_offset_bank(ORG, BankChoice::Current, &bus, &mut db, &permissive()));
    assert_eq!(db.bank_at(ORG), Some(ORG));
    assert!(db.is_offset_operand(ORG, 0));
}

#[test]
fn set_offset_bank_wram_resolves_through_the_mirror() {
    let bus = platform_bus(&[0xA5, 0x10]);
    let mut db = Database::new();

    assert!(set_offset_bank(ORG, BankChoice::Wram, &bus, &mut db, &permissive()));
    assert_eq!(db.bank_at(ORG), Some(u24::new(0x7E_0000)));
}

#[test]
fn set_offset_bank_forces_zero_for_explicit_bank_modes() {
    let bus = platform_bus(&[0xAF, 0x56, 0x34, 0x12]);
    let mut db = Database::new();

    assert!(set_offset_bank(
        ORG,
        BankChoice::Segment(u24::new(0x7E_0000)),
        &bus,
        &mut db,
        &permissive()
    ));
    assert_eq!(db.bank_at(ORG), Some(u24::new(0)));
}

#[test]
fn set_offset_bank_fails_without_a_usable_segment() {
    // No segment maps address zero here, so the zero bank cannot resolve.
    let bus = wide_bus(&[0xAF, 0x56, 0x34, 0x12]);
    let mut db = Database::new();
    db.set_bank(ORG, u24::new(0x7E_0000));

    assert!(!set_offset_bank(ORG, BankChoice::Zero, &bus, &mut db, &permissive()));
    assert_eq!(db.bank_at(ORG), None);
}

#[test]
fn status_flags_match_the_silicon_layout() {
    assert_eq!(StatusFlags::CARRY.bits(), 0x01);
    assert_eq!(StatusFlags::ZERO.bits(), 0x02);
    assert_eq!(StatusFlags::IRQ_DISABLE.bits(), 0x04);
    assert_eq!(StatusFlags::DECIMAL.bits(), 0x08);
    assert_eq!(StatusFlags::IDX8.bits(), 0x10);
    assert_eq!(StatusFlags::MEM8.bits(), 0x20);
    assert_eq!(StatusFlags::OVERFLOW.bits(), 0x40);
    assert_eq!(StatusFlags::NEGATIVE.bits(), 0x80);
    assert_eq!(StatusFlags::all().bits(), 0xFF);
}

#[test]
fn ambiguity_queries_track_the_opcode_table() {
    use crate::arch::w65c816::actions::{can_change_idx_mode, can_change_mem_mode};

    let bus = wide_bus(&[0xA9, 0xA2, 0xEA]);

    assert!(can_change_mem_mode(ORG, &bus));
    assert!(!can_change_idx_mode(ORG, &bus));
    assert!(can_change_idx_mode(ORG + 1, &bus));
    assert!(!can_change_mem_mode(ORG + 2, &bus));
    assert!(!can_change_idx_mode(u24::new(0x40_0000), &bus));
}

#[test]
fn renderer_does_not_write_the_database() {
    // The renderer is read-only; only the emitter may touch annotations.
    let bus = wide_bus(&[0xAD, 0x34, 0x90]);
    let mut db = Database::new();
    let disasm = disassemble(ORG, &bus, &mut db, &permissive()).unwrap();

    let before = format!("{:?}", db);
    let _ = fmt::render_instr(&disasm, &bus, &db);
    let _ = fmt::render_data(ORG, &bus, &db);
    let after = format!("{:?}", db);

    assert_eq!(before, after);
}
