//! 24-bit arithmetic

use crate::maths::FromStrRadix;
use num_traits::{Bounded, One, Zero};
use std::convert::TryFrom;
use std::fmt;
use std::fmt::{Display, Formatter};
use std::num::ParseIntError;
use std::ops::{Add, AddAssign, BitAnd, BitOr, Mul, Not, Shl, Shr, Sub};
use std::str::FromStr;

/// An unsigned integer which wraps at 24 bits.
///
/// This is the natural scalar of a 65816 address space: banks are the top
/// byte, and the lower sixteen bits are the offset the 16-bit program counter
/// actually increments through.
#[allow(non_camel_case_types)]
#[derive(Copy, Clone, Hash, PartialEq, Eq, PartialOrd, Ord, Debug, Default)]
pub struct u24 {
    v: u32,
}

impl u24 {
    pub const fn new(v: u32) -> Self {
        u24 { v: v & 0xFF_FFFF }
    }

    /// The bank byte of the address, kept in place (e.g. `$7E0000`).
    pub fn bank(self) -> u24 {
        u24 {
            v: self.v & 0xFF_0000,
        }
    }

    /// The in-bank offset of the address.
    pub fn low16(self) -> u16 {
        (self.v & 0xFFFF) as u16
    }
}

impl Display for u24 {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}", self.v)
    }
}

impl fmt::LowerHex for u24 {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        fmt::LowerHex::fmt(&self.v, f)
    }
}

impl fmt::UpperHex for u24 {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        fmt::UpperHex::fmt(&self.v, f)
    }
}

impl FromStr for u24 {
    type Err = <u32 as FromStr>::Err;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(u24::new(u32::from_str(s)?))
    }
}

impl FromStrRadix for u24 {
    fn from_str_radix(src: &str, radix: u32) -> Result<Self, ParseIntError> {
        u32::from_str_radix(src, radix).map(u24::new)
    }
}

impl Zero for u24 {
    fn zero() -> Self {
        u24 { v: 0 }
    }

    fn is_zero(&self) -> bool {
        self.v.is_zero()
    }
}

impl One for u24 {
    fn one() -> Self {
        u24 { v: 1 }
    }

    fn is_one(&self) -> bool {
        self.v.is_one()
    }
}

impl Bounded for u24 {
    fn min_value() -> Self {
        u24 { v: 0 }
    }

    fn max_value() -> Self {
        u24 { v: 0xFF_FFFF }
    }
}

impl Not for u24 {
    type Output = Self;

    fn not(self) -> Self {
        u24 {
            v: !self.v & 0xFF_FFFF,
        }
    }
}

masked_conv_impl!(u24, u32, u8, 0xFF_FFFF);
masked_conv_impl!(u24, u32, u16, 0xFF_FFFF);
masked_tryconv_impl!(u24, u32, u32, 0xFF_FFFF);

unwrap_impl!(u24, u32, u32);
unwrap_impl!(u24, u32, u64);

binary_op_masked_impl!(u24, Add, add, 0xFF_FFFF);
binary_op_masked_impl!(u24, Mul, mul, 0xFF_FFFF);

// Subtraction borrows out of the mask rather than out of the backing u32.
impl Sub for u24 {
    type Output = u24;

    fn sub(self, rhs: Self) -> Self {
        u24 {
            v: self.v.wrapping_sub(rhs.v) & 0xFF_FFFF,
        }
    }
}

impl Sub<u32> for u24 {
    type Output = u24;

    fn sub(self, rhs: u32) -> Self {
        u24 {
            v: self.v.wrapping_sub(rhs) & 0xFF_FFFF,
        }
    }
}
binary_op_masked_impl!(u24, BitAnd, bitand, 0xFF_FFFF);
binary_op_masked_impl!(u24, BitOr, bitor, 0xFF_FFFF);

binary_op_masked_impl!(u24, u32, Add, add, 0xFF_FFFF);
binary_op_masked_impl!(u24, u32, BitAnd, bitand, 0xFF_FFFF);
binary_op_masked_impl!(u24, u32, BitOr, bitor, 0xFF_FFFF);
binary_op_masked_impl!(u24, u32, Shl, shl, 0xFF_FFFF);
binary_op_masked_impl!(u24, u32, Shr, shr, 0xFF_FFFF);

assign_binary_op_masked_impl!(u24, AddAssign, add_assign, 0xFF_FFFF);

derive_serialize_from_display!(u24);
derive_deserialize_from_str!(u24, "valid 24-bit integer");
