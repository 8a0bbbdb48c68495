//! Carry-less multiplication of 64-bit operands, the one primitive the Karatsuba engine needs.
//!
//! Uses `PCLMULQDQ` on x86/x86_64 and `PMULL` on aarch64 when the CPU supports them, with
//! fallback to the portable "soft" implementation.

mod soft;

use cpubits::cfg_if;

cfg_if! {
    if #[cfg(all(
        any(target_arch = "aarch64", target_arch = "x86_64", target_arch = "x86"),
        not(ghash_backend = "soft")
    ))] {
        #[cfg_attr(target_arch = "aarch64", path = "clmul/armv8.rs")]
        #[cfg_attr(any(target_arch = "x86_64", target_arch = "x86"), path = "clmul/x86.rs")]
        mod intrinsics;

        /// Carry-less multiplier with runtime CPU feature detection.
        #[derive(Clone, Copy)]
        pub(crate) struct Clmul(intrinsics::InitToken);

        impl Clmul {
            /// Detect CPU support for carry-less multiplication instructions.
            #[inline]
            pub(crate) fn new() -> Self {
                Self(intrinsics::InitToken::init())
            }

            /// Compute the 127-bit carry-less product `a·b`.
            #[inline]
            pub(crate) fn mul(self, a: u64, b: u64) -> u128 {
                if self.0.get() {
                    // SAFETY: we have checked the CPU has the necessary intrinsics above
                    unsafe { intrinsics::clmul(a, b) }
                } else {
                    soft::clmul(a, b)
                }
            }
        }
    } else {
        /// Carry-less multiplier, portable implementation only.
        #[derive(Clone, Copy, Default)]
        pub(crate) struct Clmul;

        impl Clmul {
            #[inline]
            pub(crate) fn new() -> Self {
                Self
            }

            /// Compute the 127-bit carry-less product `a·b`.
            #[inline]
            pub(crate) fn mul(self, a: u64, b: u64) -> u128 {
                soft::clmul(a, b)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Clmul, soft};

    /// Schoolbook shift-and-XOR product.
    fn naive(a: u64, b: u64) -> u128 {
        let mut r = 0u128;
        for i in 0..64 {
            if (b >> i) & 1 == 1 {
                r ^= u128::from(a) << i;
            }
        }
        r
    }

    const SAMPLES: [u64; 8] = [
        0,
        1,
        0x8000_0000_0000_0000,
        0xffff_ffff_ffff_ffff,
        0xc200_0000_0000_0000,
        0x66e9_4bd4_ef8a_2c3b,
        0x884c_fa59_ca34_2b2e,
        0x0388_dace_60b6_a392,
    ];

    #[test]
    fn soft_matches_naive() {
        for a in SAMPLES {
            for b in SAMPLES {
                assert_eq!(soft::clmul(a, b), naive(a, b), "{a:x} * {b:x}");
            }
        }
    }

    #[test]
    fn detected_backend_matches_soft() {
        let clmul = Clmul::new();
        for a in SAMPLES {
            for b in SAMPLES {
                assert_eq!(clmul.mul(a, b), soft::clmul(a, b));
            }
        }
    }

    #[test]
    fn top_bit_stays_clear() {
        let p = soft::clmul(u64::MAX, u64::MAX);
        assert_eq!(p >> 127, 0);
        assert_eq!(p, 0x5555_5555_5555_5555_5555_5555_5555_5555);
    }
}
