//! Number types for a 24-bit address space

#[macro_use]
mod macros;
mod num24bit;
mod traits;

pub use num24bit::u24;
pub use traits::FromStrRadix;
