//! Intel `CLMUL`-accelerated carry-less multiply for modern x86/x86_64 CPUs
//! (i.e. Intel Sandy Bridge-compatible or newer)

#[cfg(target_arch = "x86")]
use core::arch::x86::*;
#[cfg(target_arch = "x86_64")]
use core::arch::x86_64::*;

cpufeatures::new!(clmul_intrinsics, "sse2", "pclmulqdq");
pub(crate) use clmul_intrinsics::InitToken;

/// Carry-less multiply of the low 64-bit lanes.
///
/// # Safety
///
/// The SSE2 and pclmulqdq target features must be enabled.
#[inline]
#[target_feature(enable = "sse2,pclmulqdq")]
#[allow(unused_unsafe, clippy::cast_possible_wrap)]
pub(super) unsafe fn clmul(a: u64, b: u64) -> u128 {
    let mut out = [0u8; 16];
    // SAFETY: `out` is 16 bytes and `_mm_storeu_si128` performs an unaligned store
    unsafe {
        let a = _mm_set_epi64x(0, a as i64);
        let b = _mm_set_epi64x(0, b as i64);
        _mm_storeu_si128(out.as_mut_ptr().cast(), _mm_clmulepi64_si128(a, b, 0x00));
    }
    u128::from_le_bytes(out)
}
