//! Bet Commitments and Revealed Bets
//!
//! A bettor first commits to `sha256(amount || side || nonce || salt)` and
//! reveals the preimage once the commit window has passed. Only a revealed
//! bet moves tokens.

use anchor_lang::prelude::*;

use crate::constants::{BET_COMMIT_WINDOW, BET_REVEAL_WINDOW};
use crate::errors::ProtocolError;
use crate::math::bet_commitment;

/// Side of a binary market
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq, InitSpace, Debug, Default)]
pub enum Side {
    #[default]
    No,
    Yes,
}

impl Side {
    /// Byte used in the bet commitment preimage
    pub fn as_byte(self) -> u8 {
        match self {
            Side::No => 0,
            Side::Yes => 1,
        }
    }
}

/// Pending commitment, one per (market, owner)
///
/// Seeds: ["bet_commitment", market, owner]
#[account]
#[derive(InitSpace, Default)]
pub struct BetCommitment {
    pub owner: Pubkey,
    pub market: Pubkey,
    pub commitment: [u8; 32],
    pub commit_ts: i64,
    pub revealed: bool,
    pub bump: u8,
}

impl BetCommitment {
    pub const SEED: &'static [u8] = b"bet_commitment";

    fn reveal_opens_at(&self) -> Result<i64> {
        self.commit_ts
            .checked_add(BET_COMMIT_WINDOW)
            .ok_or_else(|| error!(ProtocolError::MathOverflow))
    }

    fn reveal_closes_at(&self) -> Result<i64> {
        self.reveal_opens_at()?
            .checked_add(BET_REVEAL_WINDOW)
            .ok_or_else(|| error!(ProtocolError::MathOverflow))
    }

    /// Unrevealed and still inside its reveal window
    pub fn is_live(&self, now: i64) -> Result<bool> {
        if self.commit_ts == 0 || self.revealed {
            return Ok(false);
        }
        Ok(now <= self.reveal_closes_at()?)
    }

    /// Record a new commitment, replacing a revealed or lapsed one
    pub fn commit(&mut self, owner: Pubkey, market: Pubkey, commitment: [u8; 32], now: i64) -> Result<()> {
        require!(!self.is_live(now)?, ProtocolError::CommitmentOutstanding);

        self.owner = owner;
        self.market = market;
        self.commitment = commitment;
        self.commit_ts = now;
        self.revealed = false;
        Ok(())
    }

    /// Check a reveal against the stored commitment and consume it.
    ///
    /// On any error the commitment is left untouched.
    pub fn reveal(&mut self, amount: u64, side: Side, nonce: u64, salt: &[u8; 32], now: i64) -> Result<()> {
        require!(self.commit_ts != 0, ProtocolError::NoBetCommitted);
        require!(!self.revealed, ProtocolError::CommitmentAlreadyRevealed);
        require!(now >= self.reveal_opens_at()?, ProtocolError::RevealTooEarly);
        require!(now <= self.reveal_closes_at()?, ProtocolError::RevealTooLate);
        require!(
            bet_commitment(amount, side, nonce, salt) == self.commitment,
            ProtocolError::CommitmentMismatch
        );

        self.revealed = true;
        Ok(())
    }
}

/// Revealed bet holding a claim on the market pool
///
/// Seeds: ["bet", market, owner, nonce.to_le_bytes()]
#[account]
#[derive(InitSpace, Default)]
pub struct Bet {
    pub owner: Pubkey,
    pub market: Pubkey,
    pub amount: u64,
    pub side: Side,
    pub nonce: u64,
    pub placed_at: i64,
    pub claimed: bool,
    pub bump: u8,
}

impl Bet {
    pub const SEED: &'static [u8] = b"bet";

    pub fn mark_claimed(&mut self) -> Result<()> {
        require!(!self.claimed, ProtocolError::AlreadyClaimed);
        self.claimed = true;
        Ok(())
    }
}

// ============================================================================
// TESTS
// ============================================================================
