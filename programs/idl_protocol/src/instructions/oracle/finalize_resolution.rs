//! Finalize an undisputed resolution. Permissionless.

use anchor_lang::prelude::*;

use crate::state::{OracleBond, PredictionMarket, ProtocolOp, ProtocolState, Side};

/// Event emitted when a market's outcome becomes final
#[event]
pub struct MarketResolved {
    pub market: Pubkey,
    pub outcome: Option<Side>,
    pub actual_value: Option<u64>,
    pub resolved_at: i64,
}

#[derive(Accounts)]
pub struct FinalizeResolution<'info> {
    pub caller: Signer<'info>,

    #[account(
        seeds = [ProtocolState::SEED],
        bump = state.bump,
    )]
    pub state: Box<Account<'info, ProtocolState>>,

    #[account(mut)]
    pub market: Box<Account<'info, PredictionMarket>>,

    #[account(
        mut,
        seeds = [OracleBond::SEED, market.oracle.as_ref()],
        bump = oracle_bond.bump,
    )]
    pub oracle_bond: Box<Account<'info, OracleBond>>,
}

impl<'info> FinalizeResolution<'info> {
    pub fn finalize_resolution(&mut self) -> Result<()> {
        let now = Clock::get()?.unix_timestamp;
        self.state.assert_allowed(ProtocolOp::FinalizeResolution)?;

        self.market.finalize(now)?;
        self.oracle_bond.release_market();

        emit!(MarketResolved {
            market: self.market.key(),
            outcome: self.market.outcome,
            actual_value: self.market.actual_value,
            resolved_at: now,
        });

        Ok(())
    }
}
