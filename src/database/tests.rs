use crate::analysis::{Reference, ReferenceKind};
use crate::ast::Label;
use crate::database::{Database, Problem, ProblemKind};
use crate::maths::u24;

#[test]
fn flags_default_to_zero() {
    let mut db = Database::new();
    let ea = u24::new(0x00_8000);

    assert_eq!(db.flags_at(ea), 0);

    db.set_flags(ea, 0x30);
    assert_eq!(db.flags_at(ea), 0x30);

    db.del_flags(ea);
    assert_eq!(db.flags_at(ea), 0);
}

#[test]
fn manual_bitmode_latch() {
    let mut db = Database::new();
    let ea = u24::new(0x00_8000);

    assert!(!db.is_manual_bitmode(ea));

    db.set_manual_bitmode(ea, true);
    assert!(db.is_manual_bitmode(ea));

    db.set_manual_bitmode(ea, false);
    assert!(!db.is_manual_bitmode(ea));
}

#[test]
fn bank_overrides() {
    let mut db = Database::new();
    let ea = u24::new(0x00_8000);

    assert_eq!(db.bank_at(ea), None);

    db.set_bank(ea, u24::new(0x7E_0000));
    assert_eq!(db.bank_at(ea), Some(u24::new(0x7E_0000)));

    db.clear_bank(ea);
    assert_eq!(db.bank_at(ea), None);
}

#[test]
fn xrefs_dedupe() {
    let mut db = Database::new();
    let edge = Reference::new(u24::new(0x8000), u24::new(0x8003), ReferenceKind::Flow);

    db.insert_xref(edge);
    db.insert_xref(edge);

    assert_eq!(db.xrefs_to(u24::new(0x8003)).count(), 1);
}

#[test]
fn code_predecessor_ignores_data_edges() {
    let mut db = Database::new();
    let target = u24::new(0x9000);

    db.insert_xref(Reference::new(u24::new(0x8800), target, ReferenceKind::Data));
    assert_eq!(db.code_predecessor(target), None);

    db.insert_xref(Reference::new(u24::new(0x8400), target, ReferenceKind::Jump));
    db.insert_xref(Reference::new(u24::new(0x8200), target, ReferenceKind::Flow));

    // Lowest source address wins regardless of insertion order.
    assert_eq!(db.code_predecessor(target), Some(u24::new(0x8200)));
}

#[test]
fn stale_edges_can_be_removed() {
    let mut db = Database::new();
    let from = u24::new(0x8000);
    let to = u24::new(0x9000);

    db.insert_xref(Reference::new(from, to, ReferenceKind::Data));
    db.insert_xref(Reference::new(from, to, ReferenceKind::Call));

    db.remove_dref(from, to);
    assert_eq!(db.xrefs_to(to).count(), 1);

    db.remove_code_xref(from, to);
    assert_eq!(db.xrefs_to(to).count(), 0);
}

#[test]
fn problems_are_kind_scoped() {
    let mut db = Database::new();
    let ea = u24::new(0x8000);

    db.remember_problem(ea, Problem::new(ProblemKind::Attention, "Data Bank Change"));

    // Forgetting the wrong kind leaves the marker alone.
    db.forget_problem(ea, ProblemKind::Disasm);
    assert_eq!(db.problem_at(ea).map(|p| p.note()), Some("Data Bank Change"));

    db.forget_problem(ea, ProblemKind::Attention);
    assert_eq!(db.problem_at(ea), None);
}

#[test]
fn data_marks_keep_user_widths() {
    let mut db = Database::new();
    let ea = u24::new(0x9000);

    db.mark_data(ea);
    assert_eq!(db.data_width(ea), Some(1));

    db.set_data_width(ea, 3);
    db.mark_data(ea);
    assert_eq!(db.data_width(ea), Some(3));
}

#[test]
fn database_roundtrips_through_json() {
    let mut db = Database::new();
    let ea = u24::new(0x00_8000);

    db.insert_symbol(ea, Label::global("reset"));
    db.insert_xref(Reference::new(ea, u24::new(0x00_9000), ReferenceKind::Call));
    db.set_flags(ea, 0x30);
    db.set_manual_bitmode(ea, true);
    db.set_bank(u24::new(0x00_8010), u24::new(0x7E_0000));
    db.set_offset_operand(ea, 0);
    db.set_comment(ea, "entry point");

    let mut buf = Vec::new();
    db.save(&mut buf).expect("database should serialize");

    let reloaded = Database::load(buf.as_slice()).expect("database should deserialize");

    assert_eq!(reloaded.symbol_at(ea).map(|l| l.name()), Some("reset"));
    assert_eq!(reloaded.code_predecessor(u24::new(0x00_9000)), Some(ea));
    assert_eq!(reloaded.flags_at(ea), 0x30);
    assert!(reloaded.is_manual_bitmode(ea));
    assert_eq!(reloaded.bank_at(u24::new(0x00_8010)), Some(u24::new(0x7E_0000)));
    assert!(reloaded.is_offset_operand(ea, 0));
    assert_eq!(reloaded.comment_at(ea), Some("entry point"));
}
