//! Interop with different assembler syntaxes

mod ca65;
mod traits;

pub use ca65::Ca65;
pub use traits::Assembler;

use crate::ast::Line;

/// Render a single listing line to an owned string.
///
/// Writing into a byte buffer cannot fail, so the `io::Result` plumbing of
/// the `Assembler` trait collapses away here.
pub fn line_to_string(asm: &dyn Assembler, line: &Line) -> String {
    let mut buf = Vec::new();
    let _ = asm.emit_line(&mut buf, line);

    String::from_utf8_lossy(&buf).into_owned()
}
