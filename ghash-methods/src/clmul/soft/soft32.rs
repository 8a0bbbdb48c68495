//! Constant-time carry-less multiplication for 32-bit architectures.
//! Adapted from BearSSL's `ghash_ctmul32.c`:
//!
//! <https://bearssl.org/gitweb/?p=BearSSL;a=blob;f=src/hash/ghash_ctmul32.c;hb=4b6046412>
//!
//! Copyright (c) 2016 Thomas Pornin <pornin@bolet.org>
//!
//! Only the low 32 bits of each integer multiplication are used. This is meant primarily for
//! the ARM Cortex M0 and M0+, whose multiplication opcode does not yield the upper 32 bits.

use core::num::Wrapping;

/// Full 127-bit carry-less product of two 64-bit operands, as one Karatsuba step over
/// 32-bit halves.
#[inline]
pub(crate) fn clmul(a: u64, b: u64) -> u128 {
    let (a0, a1) = split(a);
    let (b0, b1) = split(b);

    let lo = clmul32(a0, b0);
    let hi = clmul32(a1, b1);
    let mid = clmul32(a0 ^ a1, b0 ^ b1) ^ lo ^ hi;

    u128::from(lo) ^ (u128::from(mid) << 32) ^ (u128::from(hi) << 64)
}

#[inline]
#[allow(clippy::cast_possible_truncation)]
fn split(x: u64) -> (u32, u32) {
    (x as u32, (x >> 32) as u32)
}

/// Full 63-bit carry-less product of two 32-bit operands.
#[inline]
fn clmul32(a: u32, b: u32) -> u64 {
    let lo = bmul32(a, b);
    let hi = bmul32(a.reverse_bits(), b.reverse_bits()).reverse_bits() >> 1;
    (u64::from(hi) << 32) | u64::from(lo)
}

/// Multiplication in GF(2)[X], truncated to the low 32-bits, with "holes" (sequences of zeroes) to
/// avoid carry spilling.
///
/// When carries do occur, they wind up in a "hole" and are subsequently masked out of the result.
fn bmul32(x: u32, y: u32) -> u32 {
    const M0: u32 = 0x1111_1111;
    const M1: u32 = 0x2222_2222;
    const M2: u32 = 0x4444_4444;
    const M3: u32 = 0x8888_8888;

    let x0 = Wrapping(x & M0);
    let x1 = Wrapping(x & M1);
    let x2 = Wrapping(x & M2);
    let x3 = Wrapping(x & M3);

    let y0 = Wrapping(y & M0);
    let y1 = Wrapping(y & M1);
    let y2 = Wrapping(y & M2);
    let y3 = Wrapping(y & M3);

    let z0 = (x0 * y0) ^ (x1 * y3) ^ (x2 * y2) ^ (x3 * y1);
    let z1 = (x0 * y1) ^ (x1 * y0) ^ (x2 * y3) ^ (x3 * y2);
    let z2 = (x0 * y2) ^ (x1 * y1) ^ (x2 * y0) ^ (x3 * y3);
    let z3 = (x0 * y3) ^ (x1 * y2) ^ (x2 * y1) ^ (x3 * y0);

    (z0.0 & M0) | (z1.0 & M1) | (z2.0 & M2) | (z3.0 & M3)
}
