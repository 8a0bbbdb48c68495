//! Karatsuba carry-less multiplication engine processing up to 8 blocks per reduction.
//!
//! Blocks are byte-reversed on load, so an element becomes the 128-bit integer whose most
//! significant bit is the coefficient of `x^0`. In this bit order the carry-less product of two
//! elements comes out multiplied by `x`, so the keys are stored premultiplied by `x^-1`:
//! "2H", shifting the integer left by one bit.
//!
//! Products are computed with three 64x64 carry-less multiplies (Karatsuba) and their partial
//! sums are accumulated over a whole batch of blocks. Since field addition is XOR, one reduction
//! of the summed 256-bit product replaces one reduction per block:
//!
//! ```text
//! (((Y ⊕ X0)·H ⊕ X1)·H ⊕ ... ⊕ X7)·H = (Y ⊕ X0)·H^8 ⊕ X1·H^7 ⊕ ... ⊕ X7·H
//! ```

use crate::{BLOCK_SIZE, GhashMethod, clmul::Clmul, field_element::FieldElement};

#[cfg(feature = "zeroize")]
use zeroize::Zeroize;

/// Number of blocks folded per reduction.
pub(crate) const PAR_BLOCKS: usize = 8;

/// High word of the reduction constant `0xc2000000_00000000_00000000_00000001`: the reflection of
/// `x^128 + x^7 + x^2 + x + 1` without its `x^128` term, times `x^-1`.
const POLY: u64 = 0xc200_0000_0000_0000;

/// Byte-reversed field element split into two 64-bit halves.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
struct U64x2 {
    hi: u64,
    lo: u64,
}

impl U64x2 {
    /// Load a block of at most 16 bytes, zero-padding it on the right.
    #[inline]
    fn load(chunk: &[u8]) -> Self {
        debug_assert!(chunk.len() <= BLOCK_SIZE);
        let mut block = [0u8; BLOCK_SIZE];
        block[..chunk.len()].copy_from_slice(chunk);
        u128::from_be_bytes(block).into()
    }

    #[inline]
    fn store(self) -> [u8; BLOCK_SIZE] {
        u128::from(self).to_be_bytes()
    }

    /// Multiply by `x^-1`: shift left by one bit, folding the coefficient of `x^0` back in as
    /// `x^-1 = x^127 + x^6 + x + 1`.
    #[inline]
    fn div_x(self) -> Self {
        let x = u128::from(self);
        let mut r = x << 1;
        if x >> 127 == 1 {
            r ^= (u128::from(POLY) << 64) | 1;
        }
        r.into()
    }

    #[inline]
    fn xor(self, rhs: Self) -> Self {
        Self {
            hi: self.hi ^ rhs.hi,
            lo: self.lo ^ rhs.lo,
        }
    }
}

impl From<u128> for U64x2 {
    #[inline]
    #[allow(clippy::cast_possible_truncation)]
    fn from(x: u128) -> Self {
        Self {
            hi: (x >> 64) as u64,
            lo: x as u64,
        }
    }
}

impl From<U64x2> for u128 {
    #[inline]
    fn from(x: U64x2) -> Self {
        (u128::from(x.hi) << 64) | u128::from(x.lo)
    }
}

/// A power of `H` in the Karatsuba form consumed by [`Partials::accumulate`].
#[derive(Clone, Copy, Debug, Default)]
struct KaratsubaKey {
    /// `2H^k`
    h: U64x2,
    /// `hi(2H^k) ⊕ lo(2H^k)`
    m: u64,
}

impl From<U64x2> for KaratsubaKey {
    #[inline]
    fn from(h: U64x2) -> Self {
        Self { h, m: h.hi ^ h.lo }
    }
}

/// Unreduced Karatsuba partial products, summed across blocks.
#[derive(Clone, Copy, Default)]
struct Partials {
    /// Σ lo(X)·lo(K)
    lo: u128,
    /// Σ hi(X)·hi(K)
    hi: u128,
    /// Σ (lo(X) ⊕ hi(X))·(lo(K) ⊕ hi(K))
    mid: u128,
}

impl Partials {
    #[inline]
    fn accumulate(&mut self, clmul: Clmul, x: U64x2, key: &KaratsubaKey) {
        self.lo ^= clmul.mul(x.lo, key.h.lo);
        self.hi ^= clmul.mul(x.hi, key.h.hi);
        self.mid ^= clmul.mul(x.lo ^ x.hi, key.m);
    }

    /// Recombine into the 256-bit product and reduce it to 128 bits.
    #[inline]
    fn reduce(self, clmul: Clmul) -> U64x2 {
        // Karatsuba recombination: the middle term straddles both halves
        let mid = self.mid ^ self.lo ^ self.hi;
        let hi = self.hi ^ (mid >> 64);
        let mut lo = self.lo ^ (mid << 64);

        // Two folding rounds of the low 128 bits into the high 128 bits
        for _ in 0..2 {
            #[allow(clippy::cast_possible_truncation)]
            let t = clmul.mul(POLY, lo as u64);
            lo = lo.rotate_left(64) ^ t;
        }

        (lo ^ hi).into()
    }
}

/// Compute the first `N` powers of `h`, in reverse order.
#[inline]
fn powers_of_h<T, Mul, const N: usize>(h: T, mul: Mul) -> [T; N]
where
    T: Copy,
    Mul: Fn(T, T) -> T,
{
    let mut pow = [h; N];

    let mut prev = h;
    for (i, v) in pow.iter_mut().rev().enumerate() {
        *v = h;
        if i > 0 {
            *v = mul(*v, prev);
        }
        prev = *v;
    }
    pow
}

/// Multiply `x` by the key `k`, where `k` is `K·x^-1`: the result is `x·K`.
#[inline]
fn mul_single(clmul: Clmul, x: U64x2, k: &KaratsubaKey) -> U64x2 {
    let mut partials = Partials::default();
    partials.accumulate(clmul, x, k);
    partials.reduce(clmul)
}

/// Multiplication of two field elements without precomputation.
pub(crate) fn polymul(a: FieldElement, b: FieldElement) -> FieldElement {
    let b = KaratsubaKey::from(U64x2::load(b.as_bytes()).div_x());
    mul_single(Clmul::new(), U64x2::load(a.as_bytes()), &b).store().into()
}

/// GHASH by Karatsuba carry-less multiplication with aggregated reduction.
///
/// Precomputes `2H^8, ..., 2H^1` in Karatsuba form. Runs of 8 blocks cost 24 carry-less
/// multiplies plus a 2-multiply reduction; the rest are processed one at a time against `2H`.
#[derive(Clone)]
pub struct ClmulMethod {
    /// `keys[i] = 2H^(8-i)`, i.e. `keys[PAR_BLOCKS - 1]` is `2H`.
    keys: [KaratsubaKey; PAR_BLOCKS],

    /// Carry-less multiply backend.
    clmul: Clmul,
}

impl ClmulMethod {
    /// Initialize with the given `H` field element.
    #[must_use]
    pub fn new(h: &[u8; BLOCK_SIZE]) -> Self {
        let clmul = Clmul::new();
        let h2 = U64x2::load(h).div_x();

        // 2H^a · 2H^b = 2H^(a+b): the product of the two stored keys is itself stored form
        let powers: [U64x2; PAR_BLOCKS] =
            powers_of_h(h2, |a, b| mul_single(clmul, a, &KaratsubaKey::from(b)));

        Self {
            keys: powers.map(KaratsubaKey::from),
            clmul,
        }
    }

    #[inline]
    fn proc_block(&self, acc: U64x2, block: U64x2) -> U64x2 {
        mul_single(self.clmul, acc.xor(block), &self.keys[PAR_BLOCKS - 1])
    }

    #[inline]
    fn proc_par_blocks(&self, acc: U64x2, blocks: &[U64x2; PAR_BLOCKS]) -> U64x2 {
        let mut partials = Partials::default();
        for (i, (block, key)) in blocks.iter().zip(&self.keys).enumerate() {
            let x = if i == 0 { acc.xor(*block) } else { *block };
            partials.accumulate(self.clmul, x, key);
        }
        partials.reduce(self.clmul)
    }

    /// Fold exactly [`PAR_BLOCKS`] whole blocks into `tag` with one reduction.
    pub(crate) fn hash_par_blocks(
        &self,
        tag: &mut [u8; BLOCK_SIZE],
        blocks: &[[u8; BLOCK_SIZE]; PAR_BLOCKS],
    ) {
        let blocks: [U64x2; PAR_BLOCKS] = core::array::from_fn(|i| U64x2::load(&blocks[i]));
        *tag = self.proc_par_blocks(U64x2::load(&tag[..]), &blocks).store();
    }
}

impl GhashMethod for ClmulMethod {
    fn mul(&self, y: &mut [u8; BLOCK_SIZE]) {
        *y = mul_single(self.clmul, U64x2::load(&y[..]), &self.keys[PAR_BLOCKS - 1]).store();
    }

    fn hash(&self, tag: &mut [u8; BLOCK_SIZE], data: &[u8]) {
        let mut acc = U64x2::load(&tag[..]);

        let mut batches = data.chunks_exact(BLOCK_SIZE * PAR_BLOCKS);
        for batch in &mut batches {
            let mut blocks = [U64x2::default(); PAR_BLOCKS];
            for (block, chunk) in blocks.iter_mut().zip(batch.chunks_exact(BLOCK_SIZE)) {
                *block = U64x2::load(chunk);
            }
            acc = self.proc_par_blocks(acc, &blocks);
        }

        // whole blocks, then a zero-padded partial block
        for chunk in batches.remainder().chunks(BLOCK_SIZE) {
            acc = self.proc_block(acc, U64x2::load(chunk));
        }

        *tag = acc.store();
    }
}

opaque_debug::implement!(ClmulMethod);

impl Drop for ClmulMethod {
    fn drop(&mut self) {
        #[cfg(feature = "zeroize")]
        for key in &mut self.keys {
            key.h.hi.zeroize();
            key.h.lo.zeroize();
            key.m.zeroize();
        }
    }
}
