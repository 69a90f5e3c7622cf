//! Validate our digest against the sha2 crate.
//!
//! Both implementations hash the same inputs independently; any difference
//! means ours is wrong.

use rand::{Rng, RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;
use sha2::{Digest as _, Sha256 as RefSha256};
use sha_nums_hash::{block_count, blocks, digest, Sha256};

fn reference(data: &[u8]) -> [u8; 32] {
    RefSha256::digest(data).into()
}

#[test]
fn test_every_length_up_to_200_matches_reference() {
    let sha = Sha256::new().unwrap();
    let data: Vec<u8> = (0..200u32).map(|i| (i * 31 + 7) as u8).collect();

    for len in 0..=data.len() {
        assert_eq!(
            sha.digest(&data[..len]).unwrap(),
            reference(&data[..len]),
            "mismatch for input len {}",
            len
        );
    }
}

#[test]
fn test_common_inputs_match_reference() {
    let test_cases = [
        b"".as_slice(),
        b"hello world",
        b"The quick brown fox jumps over the lazy dog",
        &[0u8; 55],  // largest single-block message
        &[0u8; 56],  // smallest message that spills
        &[0u8; 64],  // exactly one data block
        &[0u8; 65],  // just over one block
        &[0u8; 128], // exactly two data blocks
        &[0xffu8; 119],
    ];

    for data in test_cases {
        assert_eq!(
            digest(data).unwrap(),
            reference(data),
            "mismatch for input len {}",
            data.len()
        );
    }
}

#[test]
fn test_random_messages_match_reference() {
    let mut rng = ChaCha20Rng::seed_from_u64(0x5eed);
    let sha = Sha256::new().unwrap();

    for _ in 0..64 {
        let len = rng.gen_range(0..4096);
        let mut data = vec![0u8; len];
        rng.fill_bytes(&mut data);
        assert_eq!(sha.digest(&data).unwrap(), reference(&data), "len {}", len);
    }
}

#[test]
fn test_padding_boundary_block_counts() {
    assert_eq!(blocks(&[0u8; 55]).unwrap().count(), 1);
    assert_eq!(blocks(&[0u8; 56]).unwrap().count(), 2);
    assert_eq!(blocks(&[0u8; 64]).unwrap().count(), 2);
    assert_eq!(block_count(0), 1);
    assert_eq!(block_count(119), 2);
    assert_eq!(block_count(120), 3);
}

#[test]
fn test_concurrent_digests_agree() {
    let handles: Vec<_> = (0..8u8)
        .map(|i| {
            std::thread::spawn(move || {
                let data = vec![i; 1000 + i as usize];
                (digest(&data).unwrap(), reference(&data))
            })
        })
        .collect();

    for handle in handles {
        let (ours, theirs) = handle.join().unwrap();
        assert_eq!(ours, theirs);
    }
}
