//! Portable pure Rust carry-less multiplication in constant time. Both 32-bit and 64-bit
//! backends are available.
//!
//! Method described at: <https://www.bearssl.org/constanttime.html#ghash-for-gcm>
//!
//! Integer multiplication is used with "holes" (runs of zero bits) in the operands so carries
//! never reach a bit that is kept. Only the low half of each product is needed: the high half is
//! recovered by multiplying the bit-reversed operands, since in GF(2)[X]
//!
//! ```text
//! x.reverse_bits() * y.reverse_bits() = (x * y).reverse_bits()
//! ```

cpubits::cpubits! {
    16 | 32 => {
        #[path = "soft/soft32.rs"]
        mod soft_impl;
    }
    64 => {
        #[path = "soft/soft64.rs"]
        mod soft_impl;
    }
}

pub(super) use soft_impl::clmul;
