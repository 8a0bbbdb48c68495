#![no_std]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]
#![doc(
    html_logo_url = "https://raw.githubusercontent.com/RustCrypto/media/8f1a9894/logo.svg",
    html_favicon_url = "https://raw.githubusercontent.com/RustCrypto/media/8f1a9894/logo.svg"
)]

#[cfg(feature = "hazmat")]
pub mod hazmat;

mod clmul;
mod field_element;
mod karatsuba;
mod oracle;
mod raw;
mod shoup;
mod table;

pub use crate::{
    karatsuba::ClmulMethod,
    oracle::GcmMethod,
    raw::RawMethod,
    shoup::{ShoupMethod4Bits, ShoupMethod8Bits},
    table::{SimpleMethod4Bits, SimpleMethod8Bits},
};
pub use universal_hash;

use crate::{field_element::xor, karatsuba::PAR_BLOCKS};
use universal_hash::{
    KeyInit, Reset, UhfBackend, UhfClosure, UniversalHash,
    common::{BlockSizeUser, KeySizeUser, ParBlocksSizeUser},
    consts::{U8, U16},
};

#[cfg(feature = "zeroize")]
use zeroize::Zeroize;

/// Size of a GHASH block in bytes
pub const BLOCK_SIZE: usize = 16;

/// Size of a GHASH key in bytes
pub const KEY_SIZE: usize = 16;

/// GHASH keys (16-bytes)
pub type Key = universal_hash::Key<GHash>;

/// GHASH blocks (16-bytes)
pub type Block = universal_hash::Block<GHash>;

/// GHASH parallel blocks (8 x 16-bytes)
pub type ParBlocks = universal_hash::ParBlocks<GHash>;

/// GHASH tags (16-bytes)
pub type Tag = universal_hash::Block<GHash>;

/// A way of multiplying by a fixed subkey `H` in GHASH's field.
///
/// Every implementation in this crate produces bit-identical results; they differ only in
/// precomputation size and speed.
pub trait GhashMethod {
    /// Set `y` to `y·H`.
    fn mul(&self, y: &mut [u8; BLOCK_SIZE]);

    /// Fold `data` into `tag` using Horner's rule: for each block `X`, `tag = (tag ⊕ X)·H`.
    ///
    /// A trailing partial block is zero-padded to [`BLOCK_SIZE`]. The GCM length block is not
    /// appended.
    fn hash(&self, tag: &mut [u8; BLOCK_SIZE], data: &[u8]) {
        for chunk in data.chunks(BLOCK_SIZE) {
            let mut block = [0u8; BLOCK_SIZE];
            block[..chunk.len()].copy_from_slice(chunk);
            xor(tag, &block);
            self.mul(tag);
        }
    }
}

/// **GHASH**: universal hash over GF(2^128) used by AES-GCM.
///
/// Backed by [`ClmulMethod`], processing [`ParBlocks`] with a single reduction.
#[derive(Clone)]
pub struct GHash {
    /// Precomputed powers of `H`.
    method: ClmulMethod,

    /// Accumulator for the GHASH computation in progress.
    tag: [u8; BLOCK_SIZE],
}

impl GHash {
    /// Initialize GHASH with the given `H` field element and initial accumulator value.
    #[must_use]
    pub fn new_with_init_block(h: &Key, init_block: u128) -> Self {
        Self {
            method: ClmulMethod::new(&h.0),
            tag: init_block.to_be_bytes(),
        }
    }
}

impl KeySizeUser for GHash {
    type KeySize = U16;
}

impl KeyInit for GHash {
    /// Initialize GHASH with the given `H` field element
    fn new(h: &Key) -> Self {
        Self::new_with_init_block(h, 0)
    }
}

impl BlockSizeUser for GHash {
    type BlockSize = U16;
}

impl ParBlocksSizeUser for GHash {
    type ParBlocksSize = U8;
}

impl UhfBackend for GHash {
    fn proc_block(&mut self, block: &Block) {
        self.method.hash(&mut self.tag, &block.0);
    }

    fn proc_par_blocks(&mut self, blocks: &ParBlocks) {
        let blocks: [[u8; BLOCK_SIZE]; PAR_BLOCKS] = core::array::from_fn(|i| blocks[i].0);
        self.method.hash_par_blocks(&mut self.tag, &blocks);
    }
}

impl UniversalHash for GHash {
    fn update_with_backend(&mut self, f: impl UhfClosure<BlockSize = Self::BlockSize>) {
        f.call(self);
    }

    /// Get GHASH output
    fn finalize(self) -> Tag {
        self.tag.into()
    }
}

impl Reset for GHash {
    fn reset(&mut self) {
        self.tag = [0u8; BLOCK_SIZE];
    }
}

opaque_debug::implement!(GHash);

impl Drop for GHash {
    fn drop(&mut self) {
        #[cfg(feature = "zeroize")]
        self.tag.zeroize();
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        BLOCK_SIZE, ClmulMethod, GHash, GhashMethod,
        universal_hash::{KeyInit, UniversalHash},
    };
    use hex_literal::hex;

    //
    // Test Case 2 of the GCM paper (McGrew & Viega), AES-128 with an all-zero key:
    // H = E(K, 0^128), C = E(K, J0 + 1).
    //

    const H: [u8; BLOCK_SIZE] = hex!("66e94bd4ef8a2c3b884cfa59ca342b2e");
    const C: [u8; BLOCK_SIZE] = hex!("0388dace60b6a392f328c2b971b2fe78");
    const LEN_BLOCK: [u8; BLOCK_SIZE] = hex!("00000000000000000000000000000080");

    /// GHASH(H, {}, C)
    const GHASH_RESULT: [u8; BLOCK_SIZE] = hex!("f38cbb1ad69223dcc3457ae5b6b0f885");

    #[test]
    fn ghash_test_vector() {
        let mut ghash = GHash::new(&H.into());
        ghash.update(&[C.into(), LEN_BLOCK.into()]);

        let result = ghash.finalize();
        assert_eq!(&GHASH_RESULT[..], result.as_slice());
    }

    #[test]
    fn init_block_seeds_accumulator() {
        let init = hex!("0123456789abcdeffedcba9876543210");

        let mut ghash = GHash::new_with_init_block(&H.into(), u128::from_be_bytes(init));
        ghash.update(&[C.into(), LEN_BLOCK.into()]);
        let tag = ghash.finalize();

        let mut expected = init;
        let mut data = [0u8; 2 * BLOCK_SIZE];
        data[..BLOCK_SIZE].copy_from_slice(&C);
        data[BLOCK_SIZE..].copy_from_slice(&LEN_BLOCK);
        ClmulMethod::new(&H).hash(&mut expected, &data);

        assert_eq!(tag.as_slice(), &expected[..]);
        assert_ne!(expected, GHASH_RESULT);
    }
}
