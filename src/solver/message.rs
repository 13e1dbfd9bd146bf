// src/solver/message.rs
//! Message and solution layout for SoliditySHA3 proof-of-work
//!
//! The hash input is a fixed 84-byte message:
//! challenge (32 bytes) || minting address (20 bytes) || solution (32 bytes).
//! Only 8 bytes of the solution vary per candidate; everything else is fixed
//! for the duration of a work round. The types here model that layout as a
//! record with a serialize-with-nonce operation so that callers never deal
//! in raw byte offsets.

/// Length of a 256-bit value in bytes
pub const UINT256_LENGTH: usize = 32;

/// Length of a 64-bit value in bytes
pub const UINT64_LENGTH: usize = 8;

/// Length of an Ethereum address in bytes
pub const ADDRESS_LENGTH: usize = 20;

/// Total length of the hash input message in bytes
pub const MESSAGE_LENGTH: usize = UINT256_LENGTH + ADDRESS_LENGTH + UINT256_LENGTH;

/// Byte offset of the solution field within the message
pub const SOLUTION_OFFSET: usize = UINT256_LENGTH + ADDRESS_LENGTH;

/// Byte offset of the nonce within the message (solution field + address-length prefix)
pub const NONCE_OFFSET: usize = SOLUTION_OFFSET + ADDRESS_LENGTH;

/// Length of the fixed tail following the nonce inside the solution field
const SOLUTION_TAIL_LENGTH: usize = UINT256_LENGTH - ADDRESS_LENGTH - UINT64_LENGTH;

/// 32-byte solution value with a variable 64-bit nonce field
///
/// The first 20 bytes and the last 4 bytes are fixed for a round (typically
/// derived from the minting address plus random filler); the 8 bytes in
/// between hold the candidate nonce, little-endian.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SolutionTemplate {
    /// Fixed prefix occupying the first 20 bytes of the solution
    prefix: [u8; ADDRESS_LENGTH],
    /// Fixed tail occupying the last 4 bytes of the solution
    tail: [u8; SOLUTION_TAIL_LENGTH],
}

impl SolutionTemplate {
    /// Creates a solution template from a full 32-byte value
    ///
    /// The 8 bytes of the nonce field are ignored; they are rewritten for
    /// every candidate.
    pub fn new(template: [u8; UINT256_LENGTH]) -> Self {
        let mut prefix = [0u8; ADDRESS_LENGTH];
        let mut tail = [0u8; SOLUTION_TAIL_LENGTH];
        prefix.copy_from_slice(&template[..ADDRESS_LENGTH]);
        tail.copy_from_slice(&template[ADDRESS_LENGTH + UINT64_LENGTH..]);
        Self { prefix, tail }
    }

    /// Serializes the solution with the given nonce in its variable field
    ///
    /// The nonce is written little-endian, matching the on-chain submission
    /// format produced by the original solver.
    pub fn with_nonce(&self, nonce: u64) -> [u8; UINT256_LENGTH] {
        let mut solution = [0u8; UINT256_LENGTH];
        solution[..ADDRESS_LENGTH].copy_from_slice(&self.prefix);
        solution[ADDRESS_LENGTH..ADDRESS_LENGTH + UINT64_LENGTH]
            .copy_from_slice(&nonce.to_le_bytes());
        solution[ADDRESS_LENGTH + UINT64_LENGTH..].copy_from_slice(&self.tail);
        solution
    }
}

/// The fixed 84-byte hash input with its variable nonce field
///
/// Shared read-only across workers for a round; serialization always writes
/// into a caller-owned buffer, so concurrent workers never observe each
/// other's in-flight candidate bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MessageTemplate {
    /// Current challenge number from the mint contract
    pub challenge: [u8; UINT256_LENGTH],
    /// Minting address the solution is bound to
    pub address: [u8; ADDRESS_LENGTH],
    /// Solution template carrying the variable nonce field
    pub solution: SolutionTemplate,
}

impl MessageTemplate {
    /// Creates a message template from its three fields
    pub fn new(
        challenge: [u8; UINT256_LENGTH],
        address: [u8; ADDRESS_LENGTH],
        solution: SolutionTemplate,
    ) -> Self {
        Self {
            challenge,
            address,
            solution,
        }
    }

    /// Serializes the full message for one candidate nonce
    pub fn to_bytes(&self, nonce: u64) -> [u8; MESSAGE_LENGTH] {
        let mut message = [0u8; MESSAGE_LENGTH];
        message[..UINT256_LENGTH].copy_from_slice(&self.challenge);
        message[UINT256_LENGTH..SOLUTION_OFFSET].copy_from_slice(&self.address);
        message[SOLUTION_OFFSET..].copy_from_slice(&self.solution.with_nonce(nonce));
        message
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nonce_lands_at_fixed_offset() {
        let template = SolutionTemplate::new([0xAB; UINT256_LENGTH]);
        let message = MessageTemplate::new([0x11; 32], [0x22; 20], template);

        let bytes = message.to_bytes(0x0102_0304_0506_0708);
        assert_eq!(&bytes[..32], &[0x11; 32]);
        assert_eq!(&bytes[32..52], &[0x22; 20]);
        assert_eq!(&bytes[52..72], &[0xAB; 20]);
        assert_eq!(
            &bytes[NONCE_OFFSET..NONCE_OFFSET + 8],
            &0x0102_0304_0506_0708u64.to_le_bytes()
        );
        assert_eq!(&bytes[80..], &[0xAB; 4]);
    }

    #[test]
    fn test_solution_tail_survives_nonce_writes() {
        let mut raw = [0u8; UINT256_LENGTH];
        raw[..20].copy_from_slice(&[0x33; 20]);
        raw[28..].copy_from_slice(&[0x44; 4]);
        let template = SolutionTemplate::new(raw);

        let a = template.with_nonce(1);
        let b = template.with_nonce(u64::MAX);
        assert_eq!(&a[..20], &b[..20], "prefix must not vary with the nonce");
        assert_eq!(&a[28..], &b[28..], "tail must not vary with the nonce");
        assert_ne!(&a[20..28], &b[20..28]);
    }

    #[test]
    fn test_template_ignores_stale_nonce_bytes() {
        let mut raw = [0u8; UINT256_LENGTH];
        raw[20..28].copy_from_slice(&[0xFF; 8]); // stale nonce bytes in the input
        let template = SolutionTemplate::new(raw);

        assert_eq!(&template.with_nonce(0)[20..28], &[0u8; 8]);
    }
}
