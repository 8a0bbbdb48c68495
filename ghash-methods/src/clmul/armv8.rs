//! ARMv8 `PMULL`-accelerated carry-less multiply.
//!
//! Uses the 64-bit polynomial multiply from the cryptography extensions.

use core::arch::aarch64::*;

cpufeatures::new!(pmull_intrinsics, "aes"); // `aes` implies PMULL
pub(crate) use pmull_intrinsics::InitToken;

/// Carry-less multiply of two 64-bit polynomials.
///
/// # Safety
///
/// The NEON and AES (PMULL) target features must be enabled.
#[inline]
#[target_feature(enable = "neon,aes")]
#[allow(unused_unsafe)]
pub(super) unsafe fn clmul(a: u64, b: u64) -> u128 {
    // SAFETY: requires the `neon` and `aes` features, which the caller has checked
    unsafe { vmull_p64(a, b) }
}
