//! "Simple" windowed table methods.
//!
//! The multiplier is split into `W`-bit windows. For window position `i` a table holds
//! `w·H·x^(W·i)` for every window value `w`, so a multiplication is one table lookup and one XOR
//! per window, with no doublings at all.

use crate::{
    BLOCK_SIZE, GhashMethod,
    field_element::{FieldElement, double4, double8, reflect4_bits, reflect8_bits},
};

#[cfg(feature = "zeroize")]
use zeroize::Zeroize;

/// Fill the products of `v` with every `W`-bit window value, `W = log2(N)`.
///
/// Window values arrive in reflected bit order, so slot `reflect(j)` holds `j·v`. Even multiples
/// are the doubling of the half multiple, odd ones add `v` to the preceding even multiple.
pub(crate) fn fill_window<const N: usize>(
    window: &mut [FieldElement; N],
    v: FieldElement,
    reflect: fn(usize) -> usize,
) {
    window[0] = FieldElement::ZERO;
    window[reflect(1)] = v;
    for j in (2..N).step_by(2) {
        let even = window[reflect(j / 2)].double();
        window[reflect(j)] = even;
        window[reflect(j + 1)] = even + v;
    }
}

/// GHASH multiplication with 16 tables of 256 entries (64 KiB), one per byte of the multiplier.
#[derive(Clone)]
pub struct SimpleMethod8Bits {
    /// `m[i][w] = w·H·x^(8i)`
    m: [[FieldElement; 256]; BLOCK_SIZE],
}

impl SimpleMethod8Bits {
    /// Initialize with the given `H` field element.
    #[must_use]
    pub fn new(h: &[u8; BLOCK_SIZE]) -> Self {
        let mut m = [[FieldElement::ZERO; 256]; BLOCK_SIZE];
        let mut v = *h;
        for window in m.iter_mut() {
            fill_window(window, v.into(), reflect8_bits);
            double8(&mut v);
        }
        Self { m }
    }
}

impl GhashMethod for SimpleMethod8Bits {
    fn mul(&self, y: &mut [u8; BLOCK_SIZE]) {
        let mut z = FieldElement::ZERO;
        for (table, &byte) in self.m.iter().zip(y.iter()) {
            z += table[usize::from(byte)];
        }
        *y = z.into();
    }
}

/// GHASH multiplication with 32 tables of 16 entries (8 KiB), one per nibble of the multiplier.
#[derive(Clone)]
pub struct SimpleMethod4Bits {
    /// `m[i][w] = w·H·x^(4i)`
    m: [[FieldElement; 16]; 2 * BLOCK_SIZE],
}

impl SimpleMethod4Bits {
    /// Initialize with the given `H` field element.
    #[must_use]
    pub fn new(h: &[u8; BLOCK_SIZE]) -> Self {
        let mut m = [[FieldElement::ZERO; 16]; 2 * BLOCK_SIZE];
        let mut v = *h;
        for window in m.iter_mut() {
            fill_window(window, v.into(), reflect4_bits);
            double4(&mut v);
        }
        Self { m }
    }
}

impl GhashMethod for SimpleMethod4Bits {
    fn mul(&self, y: &mut [u8; BLOCK_SIZE]) {
        let mut z = FieldElement::ZERO;
        for (tables, &byte) in self.m.chunks_exact(2).zip(y.iter()) {
            // high nibble holds the lower-degree coefficients
            z += tables[0][usize::from(byte >> 4)];
            z += tables[1][usize::from(byte & 0xf)];
        }
        *y = z.into();
    }
}

opaque_debug::implement!(SimpleMethod8Bits);
opaque_debug::implement!(SimpleMethod4Bits);

impl Drop for SimpleMethod8Bits {
    fn drop(&mut self) {
        #[cfg(feature = "zeroize")]
        self.m.zeroize();
    }
}

impl Drop for SimpleMethod4Bits {
    fn drop(&mut self) {
        #[cfg(feature = "zeroize")]
        self.m.zeroize();
    }
}
