//! GHASH field element and the byte-level primitives the table methods are built from.
//!
//! Each element is a vector of 128 bits. Bit `i` of an element `X` is the coefficient of `x^i`,
//! stored "reflected": bit 0 is the most significant bit of byte 0, bit 7 is the least
//! significant bit of byte 0, bit 8 is the most significant bit of byte 1, and bit 127 is the
//! least significant bit of byte 15.

use crate::{BLOCK_SIZE, Block, karatsuba};
use core::{
    fmt::{self, Debug},
    ops::{Add, AddAssign, Mul, MulAssign},
};

#[cfg(feature = "zeroize")]
use zeroize::Zeroize;

/// Reflected `x^128 + x^7 + x^2 + x + 1` minus its `x^128` term: `x^0`, `x^1`, `x^2` and `x^7`
/// are the top bits of byte 0.
pub(crate) const R: u8 = 0xE1;

/// An element in GHASH's field.
///
/// This type represents an element of the binary field GF(2^128) modulo the irreducible polynomial
/// `x^128 + x^7 + x^2 + x + 1` as described in [NIST SP 800-38D §6.3].
///
/// # Representation
///
/// The element is represented as 16-bytes in the reflected order used by the GCM specification,
/// using a `repr(C)` ABI and 16-byte alignment enforced with `align(16)`.
///
/// - Addition is equivalent to the XOR operation applied to the two field elements
/// - Multiplication is carryless, reduced modulo the polynomial above
///
/// [NIST SP 800-38D §6.3]: https://csrc.nist.gov/publications/detail/sp/800-38d/final
#[derive(Clone, Copy, Default, Eq, PartialEq)]
#[repr(C, align(16))] // Make ABI and alignment compatible with SIMD registers
pub struct FieldElement([u8; BLOCK_SIZE]);

impl FieldElement {
    /// The additive identity.
    pub const ZERO: Self = Self([0u8; BLOCK_SIZE]);

    /// Multiply this element by `x`, reducing modulo the field polynomial.
    #[inline]
    #[must_use]
    pub fn double(mut self) -> Self {
        double(&mut self.0);
        self
    }

    /// Borrow the reflected byte representation of this element.
    #[inline]
    #[must_use]
    pub fn as_bytes(&self) -> &[u8; BLOCK_SIZE] {
        &self.0
    }
}

/// Multiply `v` by `x`.
///
/// Shifts the 128-bit string right by one bit. If a bit falls off the end it was the coefficient
/// of `x^127`, so `x^128` is replaced with `x^7 + x^2 + x + 1`.
#[inline]
pub(crate) fn double(v: &mut [u8; BLOCK_SIZE]) {
    let mut carry_in = 0u8;
    for byte in v.iter_mut() {
        let carry_out = (*byte & 1) << 7;
        *byte = (*byte >> 1) | carry_in;
        carry_in = carry_out;
    }
    if carry_in != 0 {
        v[0] ^= R;
    }
}

/// Multiply `v` by `x^4`.
#[inline]
pub(crate) fn double4(v: &mut [u8; BLOCK_SIZE]) {
    for _ in 0..4 {
        double(v);
    }
}

/// Multiply `v` by `x^8`.
#[inline]
pub(crate) fn double8(v: &mut [u8; BLOCK_SIZE]) {
    for _ in 0..8 {
        double(v);
    }
}

/// Field addition: `dst ^= src`.
#[inline]
pub(crate) fn xor(dst: &mut [u8; BLOCK_SIZE], src: &[u8; BLOCK_SIZE]) {
    for (d, s) in dst.iter_mut().zip(src) {
        *d ^= s;
    }
}

/// Reverse the order of the low 4 bits of `i`.
///
/// Window values taken from a reflected element have their bits in the opposite order from the
/// counting order tables are filled in.
#[inline]
#[must_use]
pub(crate) const fn reflect4_bits(i: usize) -> usize {
    let i = ((i << 2) & 0xc) | ((i >> 2) & 0x3);
    ((i << 1) & 0xa) | ((i >> 1) & 0x5)
}

/// Reverse the order of the low 8 bits of `i`.
#[inline]
#[must_use]
pub(crate) const fn reflect8_bits(i: usize) -> usize {
    (reflect4_bits(i & 0xf) << 4) | reflect4_bits((i >> 4) & 0xf)
}

impl Debug for FieldElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FieldElement(")?;
        for byte in self.0 {
            write!(f, "{:02x}", byte)?;
        }
        write!(f, ")")
    }
}

impl From<Block> for FieldElement {
    #[inline]
    fn from(block: Block) -> Self {
        Self(block.into())
    }
}

impl From<&Block> for FieldElement {
    #[inline]
    fn from(block: &Block) -> Self {
        Self::from(*block)
    }
}

impl From<FieldElement> for Block {
    #[inline]
    fn from(fe: FieldElement) -> Self {
        fe.0.into()
    }
}

impl From<[u8; BLOCK_SIZE]> for FieldElement {
    #[inline]
    fn from(bytes: [u8; BLOCK_SIZE]) -> Self {
        Self(bytes)
    }
}

impl From<FieldElement> for [u8; BLOCK_SIZE] {
    #[inline]
    fn from(fe: FieldElement) -> Self {
        fe.0
    }
}

/// Big-endian: the coefficient of `x^0` is the most significant bit.
impl From<u128> for FieldElement {
    #[inline]
    fn from(x: u128) -> Self {
        Self(x.to_be_bytes())
    }
}

impl From<FieldElement> for u128 {
    #[inline]
    fn from(fe: FieldElement) -> Self {
        u128::from_be_bytes(fe.0)
    }
}

impl Add for FieldElement {
    type Output = Self;

    /// Adds two GHASH field elements.
    ///
    /// In GHASH's field, addition is the equivalent operation to XOR.
    #[inline]
    fn add(self, rhs: Self) -> Self::Output {
        (u128::from(self) ^ u128::from(rhs)).into()
    }
}

impl AddAssign for FieldElement {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Mul for FieldElement {
    type Output = Self;

    /// Perform carryless multiplication within GHASH's field modulo its polynomial.
    #[inline]
    fn mul(self, rhs: Self) -> Self {
        karatsuba::polymul(self, rhs)
    }
}

impl MulAssign for FieldElement {
    #[inline]
    fn mul_assign(&mut self, rhs: Self) {
        *self = *self * rhs;
    }
}

#[cfg(feature = "zeroize")]
impl Zeroize for FieldElement {
    fn zeroize(&mut self) {
        self.0.zeroize();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hex_literal::hex;

    const A: [u8; 16] = hex!("66e94bd4ef8a2c3b884cfa59ca342b2e");
    const B: [u8; 16] = hex!("0388dace60b6a392f328c2b971b2fe78");

    #[test]
    fn fe_add() {
        let a = FieldElement::from(A);
        let b = FieldElement::from(hex!("ff000000000000000000000000000000"));

        let expected = FieldElement::from(hex!("99e94bd4ef8a2c3b884cfa59ca342b2e"));
        assert_eq!(a + b, expected);
        assert_eq!(b + a, expected);
        assert_eq!(a + a, FieldElement::ZERO);
    }

    #[test]
    fn fe_mul() {
        let a = FieldElement::from(A);
        let b = FieldElement::from(B);

        let expected = FieldElement::from(hex!("5e2ec746917062882c85b0685353deb7"));
        assert_eq!(a * b, expected);
        assert_eq!(b * a, expected);
    }

    #[test]
    fn double_is_mul_by_x() {
        // x is bit 1, i.e. 0x40 in byte 0
        let x = FieldElement::from(hex!("40000000000000000000000000000000"));
        let a = FieldElement::from(A);
        assert_eq!(a.double(), a * x);
    }

    #[test]
    fn double_reduces_x127() {
        let mut v = hex!("00000000000000000000000000000001");
        double(&mut v);
        assert_eq!(v, hex!("e1000000000000000000000000000000"));
    }

    #[test]
    fn double4_and_double8() {
        let mut v4 = A;
        let mut v8 = A;
        double4(&mut v4);
        double4(&mut v4);
        double8(&mut v8);
        assert_eq!(v4, v8);
    }

    #[test]
    fn xor_self_inverse() {
        let mut v = A;
        xor(&mut v, &B);
        xor(&mut v, &B);
        assert_eq!(v, A);
        xor(&mut v, &A);
        assert_eq!(v, [0u8; 16]);
    }

    #[test]
    fn reflect4_bits_matches_bitwise_reversal() {
        for i in 0..16 {
            let expected = (i & 1) << 3 | (i & 2) << 1 | (i & 4) >> 1 | (i & 8) >> 3;
            assert_eq!(reflect4_bits(i), expected);
            assert_eq!(reflect4_bits(reflect4_bits(i)), i);
        }
    }

    #[test]
    fn reflect8_bits_matches_reverse_bits() {
        for i in 0..=255u8 {
            let r = reflect8_bits(usize::from(i));
            assert_eq!(r, usize::from(i.reverse_bits()));
            assert_eq!(reflect8_bits(r), usize::from(i));
        }
    }
}
