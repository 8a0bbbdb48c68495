//! Longer test cases to ensure that the 8-block batches agree with block-by-block processing.

use ghash_methods::{
    BLOCK_SIZE, ClmulMethod, GHash, GcmMethod, GhashMethod, ShoupMethod8Bits,
    universal_hash::{KeyInit, UniversalHash},
};
use hex_literal::hex;

const H: [u8; BLOCK_SIZE] = hex!("66e94bd4ef8a2c3b884cfa59ca342b2e");

fn input() -> Vec<u8> {
    (1u16..=4096)
        .map(|n| ((n * 3) % 0xFF) as u8)
        .collect::<Vec<u8>>()
}

#[test]
fn longer_test() {
    let inp = input();
    let clmul = ClmulMethod::new(&H);

    // Try computing GHASH all at once.
    let mut result1 = [0u8; BLOCK_SIZE];
    clmul.hash(&mut result1, &inp);

    // Try computing GHASH one block at a time.
    let mut result2 = [0u8; BLOCK_SIZE];
    for block in inp.chunks(BLOCK_SIZE) {
        clmul.hash(&mut result2, block);
    }

    // And with Shoup's method.
    let shoup = ShoupMethod8Bits::new(&H);
    let mut result3 = [0u8; BLOCK_SIZE];
    shoup.hash(&mut result3, &inp);

    // Make sure the results are the same.
    assert_eq!(result1, result2);
    assert_eq!(result1, result3);
}

#[test]
fn boundary_lengths() {
    let inp = input();
    let clmul = ClmulMethod::new(&H);
    let oracle = GcmMethod::new(&H);

    for len in [0, 1, 15, 16, 17, 127, 128, 129, 255, 256, 257, 1024, 1039, 4096] {
        let data = &inp[..len];

        let mut expected = [0u8; BLOCK_SIZE];
        oracle.hash(&mut expected, data);

        let mut tag = [0u8; BLOCK_SIZE];
        clmul.hash(&mut tag, data);
        assert_eq!(tag, expected, "length {len}");

        let mut ghash = GHash::new(&H.into());
        ghash.update_padded(data);
        let tag = ghash.finalize();
        assert_eq!(tag.as_slice(), &expected[..], "length {len}");
    }
}
