//! Bit-serial GHASH multiplication: one conditional XOR and one doubling per key bit.
//!
//! Slow, but short enough to check by eye. The other methods are validated against it.

use crate::{
    BLOCK_SIZE, GhashMethod,
    field_element::{double, xor},
};

#[cfg(feature = "zeroize")]
use zeroize::Zeroize;

/// GHASH multiplication with no precomputation.
#[derive(Clone)]
pub struct RawMethod {
    /// Subkey `H`.
    key: [u8; BLOCK_SIZE],
}

impl RawMethod {
    /// Initialize with the given `H` field element.
    #[must_use]
    pub fn new(h: &[u8; BLOCK_SIZE]) -> Self {
        Self { key: *h }
    }
}

impl GhashMethod for RawMethod {
    fn mul(&self, y: &mut [u8; BLOCK_SIZE]) {
        let mut z = [0u8; BLOCK_SIZE];
        for byte in self.key {
            for k in 0..8 {
                if (byte >> (7 - k)) & 1 == 1 {
                    xor(&mut z, y);
                }
                double(y);
            }
        }
        *y = z;
    }
}

opaque_debug::implement!(RawMethod);

impl Drop for RawMethod {
    fn drop(&mut self) {
        #[cfg(feature = "zeroize")]
        self.key.zeroize();
    }
}
