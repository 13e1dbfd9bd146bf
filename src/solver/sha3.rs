// src/solver/sha3.rs
//! Keccak-256 digest and sponge midstate reuse
//!
//! Full digests go through the `sha3` crate. The midstate path avoids the
//! streaming hasher entirely: the 84-byte message is shorter than the
//! 136-byte keccak rate, so the whole padded input occupies a single sponge
//! block. All fixed message bytes and the pad10*1 padding can therefore be
//! absorbed once per round; producing a candidate digest is then one lane
//! XOR plus one keccak-f[1600] permutation.

use crate::solver::message::{MESSAGE_LENGTH, MessageTemplate, NONCE_OFFSET, UINT256_LENGTH};
use sha3::{Digest, Keccak256};

/// Keccak-256 rate (block size) in bytes
pub const KECCAK_RATE: usize = 136;

/// Number of 64-bit lanes in the keccak sponge state
pub const SPONGE_WORDS: usize = 25;

/// State lane holding the 8 nonce bytes (message bytes 72..80)
const NONCE_LANE: usize = NONCE_OFFSET / 8;

/// Computes the keccak-256 digest of an arbitrary input
///
/// Deterministic and side-effect free; this is the reference the midstate
/// path must agree with bit-for-bit.
pub fn keccak256(input: &[u8]) -> [u8; UINT256_LENGTH] {
    let mut hasher = Keccak256::new();
    hasher.update(input);
    hasher.finalize().into()
}

/// Precomputed sponge state for one work round
///
/// Holds the keccak state with every fixed byte of the message (and the
/// padding) already XOR-ed in and the nonce field zeroed. Valid only for the
/// single-block message layout: `MESSAGE_LENGTH < KECCAK_RATE` and the nonce
/// field aligned to a state lane, both guaranteed by the layout constants.
#[derive(Debug, Clone, Copy)]
pub struct MidState {
    lanes: [u64; SPONGE_WORDS],
}

impl MidState {
    /// Absorbs the fixed portion of the message into a fresh sponge state
    pub fn init(message: &MessageTemplate) -> Self {
        // Serializing with nonce 0 leaves the nonce lane clear for resume.
        let mut block = [0u8; KECCAK_RATE];
        block[..MESSAGE_LENGTH].copy_from_slice(&message.to_bytes(0));

        // keccak pad10*1 within the single rate block
        block[MESSAGE_LENGTH] ^= 0x01;
        block[KECCAK_RATE - 1] ^= 0x80;

        let mut lanes = [0u64; SPONGE_WORDS];
        for (i, lane) in lanes.iter_mut().take(KECCAK_RATE / 8).enumerate() {
            *lane = u64::from_le_bytes(block[i * 8..(i + 1) * 8].try_into().expect("8-byte lane"));
        }
        Self { lanes }
    }

    /// Produces the digest for one candidate nonce from a private state copy
    ///
    /// Bit-identical to [`keccak256`] over the fully serialized message for
    /// the same nonce.
    pub fn digest(&self, nonce: u64) -> [u8; UINT256_LENGTH] {
        let mut state = self.lanes;
        state[NONCE_LANE] ^= nonce;
        keccak::f1600(&mut state);

        let mut digest = [0u8; UINT256_LENGTH];
        for (i, chunk) in digest.chunks_exact_mut(8).enumerate() {
            chunk.copy_from_slice(&state[i].to_le_bytes());
        }
        digest
    }
}

/// Extracts the high 64 bits of a digest as a big-endian integer
///
/// Used for the truncated fast-rejection test in midstate scanning.
pub fn digest_high64(digest: &[u8; UINT256_LENGTH]) -> u64 {
    u64::from_be_bytes(digest[..8].try_into().expect("8-byte prefix"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solver::message::SolutionTemplate;
    use hex_literal::hex;

    #[test]
    fn test_keccak256_known_vectors() {
        assert_eq!(
            keccak256(b""),
            hex!("c5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a470")
        );
        assert_eq!(
            keccak256(b"abc"),
            hex!("4e03657aea45a94fc7d47ba826c8d667c0d1e6e33a64a036ec44f58fa12d6c45")
        );
    }

    #[test]
    fn test_midstate_matches_full_hash() {
        let solution = SolutionTemplate::new(hex!(
            "17f1b77a0d1e4a2a5c4e06e6e6c4a00d24b7eb1a000000000000000000000000"
        ));
        let message = MessageTemplate::new(
            hex!("3e8b2a4f0c91d7e5a6b3f8c2d4e5f6a7b8c9d0e1f2a3b4c5d6e7f8091a2b3c4d"),
            hex!("17f1b77a0d1e4a2a5c4e06e6e6c4a00d24b7eb1a"),
            solution,
        );
        let mid = MidState::init(&message);

        for nonce in [0u64, 1, 5, 0xDEAD_BEEF, u64::MAX, u64::MAX - 1] {
            assert_eq!(
                mid.digest(nonce),
                keccak256(&message.to_bytes(nonce)),
                "midstate digest diverged for nonce {}",
                nonce
            );
        }
    }

    #[test]
    fn test_digest_high64_is_big_endian_prefix() {
        let mut digest = [0u8; 32];
        digest[0] = 0x01;
        digest[7] = 0xFF;
        assert_eq!(digest_high64(&digest), 0x0100_0000_0000_00FF);
    }
}
