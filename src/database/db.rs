//! Implementation of core database type

use crate::analysis::{Reference, ReferenceKind};
use crate::ast::Label;
use crate::database::Error;
use crate::maths::u24;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::io::{Read, Write};

/// The kind of problem recorded against an address.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProblemKind {
    /// The bytes at this address failed to disassemble.
    Disasm,

    /// The instruction decoded, but an analyst should look at it.
    Attention,
}

/// A non-fatal marker left for the analyst.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Problem {
    kind: ProblemKind,
    note: String,
}

impl Problem {
    pub fn new(kind: ProblemKind, note: &str) -> Self {
        Problem {
            kind,
            note: note.to_string(),
        }
    }

    pub fn kind(&self) -> ProblemKind {
        self.kind
    }

    pub fn note(&self) -> &str {
        &self.note
    }
}

/// A repository of information obtained from the program under analysis.
///
/// This carries the cross-reference graph plus every per-address annotation
/// the decoder, emitter, and renderer agree through: processor width flags,
/// the manual-override latch that protects user-fixed flags from inference,
/// bank overrides for encodings with no bank byte, data/immediate/offset
/// marks, user comments, and advisory problems.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Database {
    symbols: HashMap<u24, Label>,

    /// Every cross-reference in the program.
    xrefs: Vec<Reference>,

    /// Processor status bits as they would be if execution reached each
    /// address. Absent means zero.
    flags: HashMap<u24, u8>,

    /// Addresses whose flags were fixed by the user and must not be touched
    /// by flow inference.
    manual_flags: HashSet<u24>,

    /// Assumed upper address byte for operands whose encoding carries none.
    bank_overrides: HashMap<u24, u24>,

    /// Locations known to hold data, with their item width in bytes.
    data_marks: HashMap<u24, u8>,

    /// Locations whose first operand is a plain immediate.
    immediate_marks: HashSet<u24>,

    /// (address, operand) pairs the user typed as address-valued offsets.
    offset_marks: HashSet<(u24, u8)>,

    comments: HashMap<u24, String>,

    problems: HashMap<u24, Problem>,
}

impl Database {
    pub fn new() -> Self {
        Database::default()
    }

    pub fn insert_symbol(&mut self, ea: u24, label: Label) {
        self.symbols.insert(ea, label);
    }

    pub fn symbol_at(&self, ea: u24) -> Option<&Label> {
        self.symbols.get(&ea)
    }

    /// Record a cross-reference. Duplicate edges collapse into one.
    pub fn insert_xref(&mut self, xref: Reference) {
        if !self.xrefs.contains(&xref) {
            self.xrefs.push(xref);
        }
    }

    /// Remove a data reference between two addresses, if one exists.
    pub fn remove_dref(&mut self, from: u24, to: u24) {
        self.xrefs.retain(|x| {
            !(x.as_source() == from && x.as_target() == to && x.kind() == ReferenceKind::Data)
        });
    }

    /// Remove any code edge (flow, jump, or call) between two addresses.
    pub fn remove_code_xref(&mut self, from: u24, to: u24) {
        self.xrefs
            .retain(|x| !(x.as_source() == from && x.as_target() == to && x.kind().is_code()));
    }

    pub fn xrefs_to(&self, ea: u24) -> impl Iterator<Item = &Reference> {
        self.xrefs.iter().filter(move |x| x.as_target() == ea)
    }

    /// The first code location known to flow into the given address.
    ///
    /// "First" means the lowest source address, which makes inference
    /// deterministic no matter what order edges were discovered in.
    pub fn code_predecessor(&self, ea: u24) -> Option<u24> {
        self.xrefs_to(ea)
            .filter(|x| x.kind().is_code())
            .map(|x| x.as_source())
            .min()
    }

    pub fn flags_at(&self, ea: u24) -> u8 {
        self.flags.get(&ea).copied().unwrap_or(0)
    }

    pub fn set_flags(&mut self, ea: u24, flags: u8) {
        self.flags.insert(ea, flags);
    }

    pub fn del_flags(&mut self, ea: u24) {
        self.flags.remove(&ea);
    }

    pub fn is_manual_bitmode(&self, ea: u24) -> bool {
        self.manual_flags.contains(&ea)
    }

    pub fn set_manual_bitmode(&mut self, ea: u24, manual: bool) {
        if manual {
            self.manual_flags.insert(ea);
        } else {
            self.manual_flags.remove(&ea);
        }
    }

    pub fn bank_at(&self, ea: u24) -> Option<u24> {
        self.bank_overrides.get(&ea).copied()
    }

    pub fn set_bank(&mut self, ea: u24, bank: u24) {
        self.bank_overrides.insert(ea, bank);
    }

    pub fn clear_bank(&mut self, ea: u24) {
        self.bank_overrides.remove(&ea);
    }

    /// Mark a location as holding data. Existing width typing is kept.
    pub fn mark_data(&mut self, ea: u24) {
        self.data_marks.entry(ea).or_insert(1);
    }

    pub fn set_data_width(&mut self, ea: u24, width: u8) {
        self.data_marks.insert(ea, width);
    }

    pub fn data_width(&self, ea: u24) -> Option<u8> {
        self.data_marks.get(&ea).copied()
    }

    pub fn set_immediate(&mut self, ea: u24) {
        self.immediate_marks.insert(ea);
    }

    pub fn is_immediate(&self, ea: u24) -> bool {
        self.immediate_marks.contains(&ea)
    }

    pub fn set_offset_operand(&mut self, ea: u24, operand: u8) {
        self.offset_marks.insert((ea, operand));
    }

    pub fn is_offset_operand(&self, ea: u24, operand: u8) -> bool {
        self.offset_marks.contains(&(ea, operand))
    }

    pub fn set_comment(&mut self, ea: u24, comment: &str) {
        self.comments.insert(ea, comment.to_string());
    }

    pub fn comment_at(&self, ea: u24) -> Option<&str> {
        self.comments.get(&ea).map(|s| s.as_str())
    }

    /// Leave a problem marker at an address. A newer problem replaces an
    /// older one.
    pub fn remember_problem(&mut self, ea: u24, problem: Problem) {
        self.problems.insert(ea, problem);
    }

    /// Clear a problem marker, but only if it is of the named kind.
    pub fn forget_problem(&mut self, ea: u24, kind: ProblemKind) {
        if self.problems.get(&ea).map(|p| p.kind()) == Some(kind) {
            self.problems.remove(&ea);
        }
    }

    pub fn problem_at(&self, ea: u24) -> Option<&Problem> {
        self.problems.get(&ea)
    }

    pub fn save<W: Write>(&self, writer: W) -> Result<(), Error> {
        serde_json::to_writer_pretty(writer, self)?;

        Ok(())
    }

    pub fn load<R: Read>(reader: R) -> Result<Database, Error> {
        Ok(serde_json::from_reader(reader)?)
    }
}
