//! Reference GHASH in natural word order, used to validate every other method.
//!
//! A field element is a pair of 64-bit words loaded big-endian from the block, so that
//!
//! - the coefficient of `x^0` is `low >> 63`
//! - the coefficient of `x^63` is `low & 1`
//! - the coefficient of `x^64` is `high >> 63`
//! - the coefficient of `x^127` is `high & 1`
//!
//! Multiplication consumes the multiplier 4 bits at a time, highest degree first, from a
//! 16-entry product table and the 16-entry "times 16" reduction table.

use crate::{BLOCK_SIZE, GhashMethod, field_element::reflect4_bits};

#[cfg(feature = "zeroize")]
use zeroize::Zeroize;

/// Reduction of the 4 coefficients of `x^124..x^127` after multiplying by `x^4`, in the top 16
/// bits of `low`.
///
/// For example `x^127·x^4 = x^3·x^128 ≡ x^10 + x^5 + x^4 + x^3`, whose bits are `0x1c20`; the
/// reversed nibble of `x^127` is `0b0001`, so `REDUCTION_TABLE[1] = 0x1c20`.
const REDUCTION_TABLE: [u16; 16] = [
    0x0000, 0x1c20, 0x3840, 0x2460, 0x7080, 0x6ca0, 0x48c0, 0x54e0, 0xe100, 0xfd20, 0xd940, 0xc560,
    0x9180, 0x8da0, 0xa9c0, 0xb5e0,
];

/// GF(2^128) element as a pair of big-endian words.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
struct NaturalElement {
    low: u64,
    high: u64,
}

impl NaturalElement {
    #[inline]
    fn from_bytes(bytes: &[u8; BLOCK_SIZE]) -> Self {
        let (low, high) = bytes.split_at(8);
        let mut low_bytes = [0u8; 8];
        let mut high_bytes = [0u8; 8];
        low_bytes.copy_from_slice(low);
        high_bytes.copy_from_slice(high);
        Self {
            low: u64::from_be_bytes(low_bytes),
            high: u64::from_be_bytes(high_bytes),
        }
    }

    #[inline]
    fn to_bytes(self) -> [u8; BLOCK_SIZE] {
        let mut out = [0u8; BLOCK_SIZE];
        out[..8].copy_from_slice(&self.low.to_be_bytes());
        out[8..].copy_from_slice(&self.high.to_be_bytes());
        out
    }

    #[inline]
    fn xor(self, rhs: Self) -> Self {
        Self {
            low: self.low ^ rhs.low,
            high: self.high ^ rhs.high,
        }
    }

    /// Multiply by `x`.
    #[inline]
    fn double(self) -> Self {
        let msb = self.high & 1;

        let high = (self.high >> 1) | (self.low << 63);
        let mut low = self.low >> 1;

        // The coefficient of x^127 became a term of x^128, which is replaced by the rest of the
        // irreducible polynomial 1 + x + x^2 + x^7.
        if msb == 1 {
            low ^= 0xe100_0000_0000_0000;
        }
        Self { low, high }
    }
}

/// Natural-order GHASH with a 16-entry product table.
#[derive(Clone)]
pub struct GcmMethod {
    /// The first sixteen multiples of `H`, indexed by reversed nibble: `4·H` is at index
    /// `0b0010`, not `0b0100`.
    product_table: [NaturalElement; 16],
}

impl GcmMethod {
    /// Initialize with the given `H` field element.
    #[must_use]
    pub fn new(h: &[u8; BLOCK_SIZE]) -> Self {
        let x = NaturalElement::from_bytes(h);

        let mut product_table = [NaturalElement::default(); 16];
        product_table[reflect4_bits(1)] = x;
        for i in (2..16).step_by(2) {
            product_table[reflect4_bits(i)] = product_table[reflect4_bits(i / 2)].double();
            product_table[reflect4_bits(i + 1)] = product_table[reflect4_bits(i)].xor(x);
        }

        Self { product_table }
    }

    /// Set `y` to `y·H`.
    fn mul_element(&self, y: NaturalElement) -> NaturalElement {
        let mut z = NaturalElement::default();

        for mut word in [y.high, y.low] {
            // Multiply z by x^4 and add one of the precomputed multiples of H.
            for _ in 0..16 {
                let msw = z.high & 0xf;
                z.high >>= 4;
                z.high |= z.low << 60;
                z.low >>= 4;
                #[allow(clippy::cast_possible_truncation)]
                let reduction = REDUCTION_TABLE[msw as usize];
                z.low ^= u64::from(reduction) << 48;

                #[allow(clippy::cast_possible_truncation)]
                let t = self.product_table[(word & 0xf) as usize];
                z = z.xor(t);
                word >>= 4;
            }
        }

        z
    }
}

impl GhashMethod for GcmMethod {
    fn mul(&self, y: &mut [u8; BLOCK_SIZE]) {
        *y = self.mul_element(NaturalElement::from_bytes(y)).to_bytes();
    }

    fn hash(&self, tag: &mut [u8; BLOCK_SIZE], data: &[u8]) {
        let mut y = NaturalElement::from_bytes(tag);
        for chunk in data.chunks(BLOCK_SIZE) {
            let mut block = [0u8; BLOCK_SIZE];
            block[..chunk.len()].copy_from_slice(chunk);
            y = self.mul_element(y.xor(NaturalElement::from_bytes(&block)));
        }
        *tag = y.to_bytes();
    }
}

opaque_debug::implement!(GcmMethod);

#[cfg(feature = "zeroize")]
impl Zeroize for NaturalElement {
    fn zeroize(&mut self) {
        self.low.zeroize();
        self.high.zeroize();
    }
}

impl Drop for GcmMethod {
    fn drop(&mut self) {
        #[cfg(feature = "zeroize")]
        self.product_table.zeroize();
    }
}
