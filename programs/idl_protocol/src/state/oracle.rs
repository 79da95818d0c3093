//! Oracle Bonds
//!
//! Collateral an oracle keeps in the vault while it backs markets. A
//! successful dispute forfeits `ORACLE_SLASH_PERCENT` of it to the
//! insurance fund, after which the oracle must top up before committing
//! another resolution.

use anchor_lang::prelude::*;

use crate::constants::{ORACLE_BOND_AMOUNT, ORACLE_SLASH_PERCENT};
use crate::errors::ProtocolError;

/// Seeds: ["oracle_bond", oracle]
#[account]
#[derive(InitSpace, Default)]
pub struct OracleBond {
    pub oracle: Pubkey,

    /// Collateral currently held for this oracle
    pub bond_amount: u64,

    /// Set by a slash, cleared once the bond is back to full
    pub slashed: bool,

    pub total_slashed: u64,

    /// Markets naming this oracle that are not yet Resolved or Cancelled
    pub active_market_count: u32,

    pub bump: u8,
}

impl OracleBond {
    pub const SEED: &'static [u8] = b"oracle_bond";

    /// Tokens needed to bring the bond back to `ORACLE_BOND_AMOUNT`
    pub fn top_up_amount(&self) -> Result<u64> {
        require!(self.bond_amount < ORACLE_BOND_AMOUNT, ProtocolError::BondAlreadyPosted);
        Ok(ORACLE_BOND_AMOUNT - self.bond_amount)
    }

    pub fn deposit(&mut self, oracle: Pubkey, amount: u64) -> Result<()> {
        self.oracle = oracle;
        self.bond_amount = self.bond_amount.checked_add(amount).ok_or(ProtocolError::MathOverflow)?;
        if self.is_active() {
            self.slashed = false;
        }
        Ok(())
    }

    pub fn is_active(&self) -> bool {
        self.bond_amount >= ORACLE_BOND_AMOUNT
    }

    pub fn assert_active(&self) -> Result<()> {
        require!(self.is_active(), ProtocolError::OracleNotBonded);
        Ok(())
    }

    /// Count a new market against this bond; `oracle` is the key that signed
    /// the market creation
    pub fn attach_market(&mut self, oracle: &Pubkey) -> Result<()> {
        require_keys_eq!(self.oracle, *oracle, ProtocolError::Unauthorized);
        self.assert_active()?;
        self.active_market_count = self
            .active_market_count
            .checked_add(1)
            .ok_or(ProtocolError::MathOverflow)?;
        Ok(())
    }

    pub fn release_market(&mut self) {
        self.active_market_count = self.active_market_count.saturating_sub(1);
    }

    /// Forfeit `ORACLE_SLASH_PERCENT` of the current bond; returns the amount
    pub fn slash(&mut self) -> Result<u64> {
        let amount = self
            .bond_amount
            .checked_mul(ORACLE_SLASH_PERCENT)
            .map(|v| v / 100)
            .ok_or(ProtocolError::MathOverflow)?;

        self.bond_amount -= amount;
        self.total_slashed = self.total_slashed.checked_add(amount).ok_or(ProtocolError::MathOverflow)?;
        self.slashed = true;
        Ok(amount)
    }

    /// Release the whole bond; only once no market depends on this oracle
    pub fn withdraw_all(&mut self) -> Result<u64> {
        require!(self.active_market_count == 0, ProtocolError::OracleHasActiveMarkets);
        require!(self.bond_amount > 0, ProtocolError::InvalidAmount);

        let amount = self.bond_amount;
        self.bond_amount = 0;
        Ok(amount)
    }
}

// ============================================================================
// TESTS
// ============================================================================
