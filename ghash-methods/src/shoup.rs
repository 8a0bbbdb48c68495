//! Shoup's method: a single product table plus a reduction table.
//!
//! `m0[w] = w·H` holds the products with every window value, with no position offset. The
//! multiplier is consumed from its highest-degree window down. Between windows the accumulator is
//! multiplied by `x^W`: shifting it right by `W` bits pushes a window of coefficients past `x^127`,
//! and `r[c]` is that window's reduction, a 16-bit value landing in the top two bytes.

use crate::{
    BLOCK_SIZE, GhashMethod,
    field_element::{FieldElement, double, reflect4_bits, reflect8_bits},
    table::fill_window,
};

#[cfg(feature = "zeroize")]
use zeroize::Zeroize;

/// Reduction of `c`, a window of coefficients of `x^(128-W)..x^127`, after multiplying by `x^W`.
///
/// Place `c` in the lowest byte, double `W` times and keep the top two bytes.
fn reduction_entry(c: u8, bits: usize) -> u16 {
    let mut v = [0u8; BLOCK_SIZE];
    v[BLOCK_SIZE - 1] = c;
    for _ in 0..bits {
        double(&mut v);
    }
    debug_assert!(v[2..].iter().all(|&b| b == 0), "reduction spilled past 16 bits");
    u16::from_be_bytes([v[0], v[1]])
}

/// Multiply the reflected accumulator `z` by `x^bits` modulo the field polynomial.
#[inline]
fn shift_reduce<const N: usize>(z: u128, r: &[u16; N], bits: u32) -> u128 {
    #[allow(clippy::cast_possible_truncation)]
    let carry = (z as usize) & (N - 1);
    (z >> bits) ^ (u128::from(r[carry]) << 112)
}

/// Shoup's method with 8-bit windows: a 256-entry product table and a 256-entry reduction table.
#[derive(Clone)]
pub struct ShoupMethod8Bits {
    /// `m0[w] = w·H`
    m0: [FieldElement; 256],

    /// Reduction of each byte shifted out by a multiplication by `x^8`.
    r: [u16; 256],
}

impl ShoupMethod8Bits {
    /// Initialize with the given `H` field element.
    #[must_use]
    pub fn new(h: &[u8; BLOCK_SIZE]) -> Self {
        let mut m0 = [FieldElement::ZERO; 256];
        fill_window(&mut m0, (*h).into(), reflect8_bits);

        let mut r = [0u16; 256];
        for (c, entry) in (0..=u8::MAX).zip(r.iter_mut()) {
            *entry = reduction_entry(c, 8);
        }

        Self { m0, r }
    }
}

impl GhashMethod for ShoupMethod8Bits {
    fn mul(&self, y: &mut [u8; BLOCK_SIZE]) {
        let mut z = 0u128;
        for &byte in y.iter().rev() {
            z = shift_reduce(z, &self.r, 8);
            z ^= u128::from(self.m0[usize::from(byte)]);
        }
        *y = z.to_be_bytes();
    }
}

/// Shoup's method with 4-bit windows: a 16-entry product table and a 16-entry reduction table.
#[derive(Clone)]
pub struct ShoupMethod4Bits {
    /// `m0[w] = w·H`
    m0: [FieldElement; 16],

    /// Reduction of each nibble shifted out by a multiplication by `x^4`.
    r: [u16; 16],
}

impl ShoupMethod4Bits {
    /// Initialize with the given `H` field element.
    #[must_use]
    pub fn new(h: &[u8; BLOCK_SIZE]) -> Self {
        let mut m0 = [FieldElement::ZERO; 16];
        fill_window(&mut m0, (*h).into(), reflect4_bits);

        let mut r = [0u16; 16];
        for (c, entry) in (0..16u8).zip(r.iter_mut()) {
            *entry = reduction_entry(c, 4);
        }

        Self { m0, r }
    }
}

impl GhashMethod for ShoupMethod4Bits {
    fn mul(&self, y: &mut [u8; BLOCK_SIZE]) {
        let mut z = 0u128;
        for &byte in y.iter().rev() {
            // low nibble holds the higher-degree coefficients
            z = shift_reduce(z, &self.r, 4);
            z ^= u128::from(self.m0[usize::from(byte & 0xf)]);
            z = shift_reduce(z, &self.r, 4);
            z ^= u128::from(self.m0[usize::from(byte >> 4)]);
        }
        *y = z.to_be_bytes();
    }
}

opaque_debug::implement!(ShoupMethod8Bits);
opaque_debug::implement!(ShoupMethod4Bits);

impl Drop for ShoupMethod8Bits {
    fn drop(&mut self) {
        #[cfg(feature = "zeroize")]
        {
            self.m0.zeroize();
            self.r.zeroize();
        }
    }
}

impl Drop for ShoupMethod4Bits {
    fn drop(&mut self) {
        #[cfg(feature = "zeroize")]
        {
            self.m0.zeroize();
            self.r.zeroize();
        }
    }
}
