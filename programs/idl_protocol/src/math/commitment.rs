//! # Commitments
//!
//! Byte layouts wallets must reproduce exactly:
//!
//! ```text
//! bet        = sha256(amount_u64_le || side_byte || nonce_u64_le || salt[32])
//! resolution = sha256(actual_value_u64_le || nonce_u64_le)
//! ```
//!
//! `side_byte` is `1` for YES and `0` for NO.

use anchor_lang::solana_program::hash::hashv;

use crate::state::Side;

pub fn bet_commitment(amount: u64, side: Side, nonce: u64, salt: &[u8; 32]) -> [u8; 32] {
    hashv(&[
        &amount.to_le_bytes(),
        &[side.as_byte()],
        &nonce.to_le_bytes(),
        salt,
    ])
    .to_bytes()
}

pub fn resolution_commitment(actual_value: u64, nonce: u64) -> [u8; 32] {
    hashv(&[&actual_value.to_le_bytes(), &nonce.to_le_bytes()]).to_bytes()
}

#[cfg(test)]
mod tests {
    use super::*;
    use anchor_lang::solana_program::hash::hash;

    const SALT: [u8; 32] = [7u8; 32];

    #[test]
    fn test_bet_layout_matches_concatenation() {
        let mut preimage = Vec::with_capacity(49);
        preimage.extend_from_slice(&1_500u64.to_le_bytes());
        preimage.push(1);
        preimage.extend_from_slice(&42u64.to_le_bytes());
        preimage.extend_from_slice(&SALT);

        assert_eq!(preimage.len(), 49);
        assert_eq!(bet_commitment(1_500, Side::Yes, 42, &SALT), hash(&preimage).to_bytes());
    }

    #[test]
    fn test_resolution_layout_matches_concatenation() {
        let mut preimage = Vec::with_capacity(16);
        preimage.extend_from_slice(&1_500u64.to_le_bytes());
        preimage.extend_from_slice(&9u64.to_le_bytes());

        assert_eq!(resolution_commitment(1_500, 9), hash(&preimage).to_bytes());
    }

    #[test]
    fn test_every_bet_field_is_bound() {
        let base = bet_commitment(100, Side::Yes, 1, &SALT);
        let mut other_salt = SALT;
        other_salt[31] ^= 1;

        assert_ne!(base, bet_commitment(101, Side::Yes, 1, &SALT));
        assert_ne!(base, bet_commitment(100, Side::No, 1, &SALT));
        assert_ne!(base, bet_commitment(100, Side::Yes, 2, &SALT));
        assert_ne!(base, bet_commitment(100, Side::Yes, 1, &other_salt));
    }

    #[test]
    fn test_every_resolution_field_is_bound() {
        let base = resolution_commitment(1_000, 5);
        assert_ne!(base, resolution_commitment(1_001, 5));
        assert_ne!(base, resolution_commitment(1_000, 6));
    }
}
