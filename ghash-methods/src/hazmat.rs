//! Hazardous materials: functionality which can be misused and needs to be used with care.
//!
//! <div class="warning">
//! Functionality provided in this module is low-level and intended for constructing higher-level
//! primitives as opposed to being used directly.
//! </div>

pub use crate::field_element::FieldElement;

use crate::{BLOCK_SIZE, clmul::Clmul, field_element};

/// Multiply `v` by `x` modulo `x^128 + x^7 + x^2 + x + 1`.
///
/// In the reflected byte order this is a right shift by one bit, XORing `0xE1` into byte 0 when
/// the coefficient of `x^127` falls off the end.
#[inline]
pub fn double(v: &mut [u8; BLOCK_SIZE]) {
    field_element::double(v);
}

/// Multiply `v` by `x^4`.
#[inline]
pub fn double4(v: &mut [u8; BLOCK_SIZE]) {
    field_element::double4(v);
}

/// Multiply `v` by `x^8`.
#[inline]
pub fn double8(v: &mut [u8; BLOCK_SIZE]) {
    field_element::double8(v);
}

/// Field addition in place: `dst ^= src`.
#[inline]
pub fn xor(dst: &mut [u8; BLOCK_SIZE], src: &[u8; BLOCK_SIZE]) {
    field_element::xor(dst, src);
}

/// Reverse the order of the low 4 bits of `i`.
#[inline]
#[must_use]
pub const fn reflect4_bits(i: usize) -> usize {
    field_element::reflect4_bits(i)
}

/// Reverse the order of the low 8 bits of `i`.
#[inline]
#[must_use]
pub const fn reflect8_bits(i: usize) -> usize {
    field_element::reflect8_bits(i)
}

/// Carry-less multiply of two 64-bit polynomials over GF(2).
///
/// Bit `i` of the result is the XOR over `j` of `a_j & b_(i-j)`. No reduction is performed.
#[inline]
#[must_use]
pub fn clmul(a: u64, b: u64) -> u128 {
    Clmul::new().mul(a, b)
}
