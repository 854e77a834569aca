//! Shared helpers for integration tests.
//!
//! Generated data mixes sections with very different byte distributions so
//! the resulting trees have uneven depths:
//! - Runs of a single byte
//! - Text-like data from a small alphabet
//! - Short repeating patterns
//! - Uniformly random bytes

#![allow(dead_code)]

use huff_core::Node;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Generate `size_bytes` of mixed-compressibility data from `seed`.
pub fn generate_sample_data(seed: u64, size_bytes: usize) -> Vec<u8> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut data = Vec::with_capacity(size_bytes);

    let mut remaining = size_bytes;
    while remaining > 0 {
        let section = remaining.min(rng.gen_range(64..=2048));

        match rng.gen_range(0..10u8) {
            0..=2 => {
                let byte: u8 = rng.gen();
                data.extend(std::iter::repeat(byte).take(section));
            }
            3..=5 => {
                let alphabet = b"etaoin shrdlu,.\n";
                for _ in 0..section {
                    // Skew toward the front of the alphabet
                    let a = rng.gen_range(0..alphabet.len());
                    let b = rng.gen_range(0..alphabet.len());
                    let idx = a.min(b);
                    data.push(alphabet[idx]);
                }
            }
            6..=7 => {
                let pattern_len = rng.gen_range(3..=24);
                let pattern: Vec<u8> = (0..pattern_len).map(|_| rng.gen()).collect();
                data.extend(pattern.iter().cycle().take(section));
            }
            _ => {
                for _ in 0..section {
                    data.push(rng.gen());
                }
            }
        }

        remaining -= section;
    }

    data
}

/// Expand `count` symbols from an LSB-first payload by walking `tree`.
///
/// A single-leaf tree consumes no bits and yields its byte `count` times.
pub fn expand_payload(tree: &Node, payload: &[u8], count: usize) -> Vec<u8> {
    let mut out = Vec::with_capacity(count);
    let mut bit = 0usize;

    while out.len() < count {
        let mut node = tree;
        while let Some((left, right)) = node.children() {
            let byte = payload[bit / 8];
            node = if (byte >> (bit % 8)) & 1 == 1 { right } else { left };
            bit += 1;
        }
        out.push(node.byte().expect("walk ends on a leaf"));
    }

    out
}
