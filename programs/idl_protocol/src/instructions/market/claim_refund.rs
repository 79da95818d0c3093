//! Refund the exact principal of a bet on a cancelled market, or on a
//! resolved market whose winning side holds no bets. No fee.

use anchor_lang::prelude::*;
use anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface};

use crate::custody::transfer_out;
use crate::errors::ProtocolError;
use crate::state::{Bet, PredictionMarket, ProtocolOp, ProtocolState};

#[event]
pub struct RefundClaimed {
    pub market: Pubkey,
    pub owner: Pubkey,
    pub amount: u64,
}

#[derive(Accounts)]
pub struct ClaimRefund<'info> {
    pub owner: Signer<'info>,

    #[account(
        seeds = [ProtocolState::SEED],
        bump = state.bump,
    )]
    pub state: Box<Account<'info, ProtocolState>>,

    #[account(mut)]
    pub market: Box<Account<'info, PredictionMarket>>,

    #[account(
        mut,
        seeds = [Bet::SEED, market.key().as_ref(), owner.key().as_ref(), bet.nonce.to_le_bytes().as_ref()],
        bump = bet.bump,
        has_one = owner @ ProtocolError::Unauthorized,
        has_one = market @ ProtocolError::InvalidInput,
    )]
    pub bet: Box<Account<'info, Bet>>,

    #[account(address = state.idl_mint @ ProtocolError::InvalidMint)]
    pub idl_mint: Box<InterfaceAccount<'info, Mint>>,

    #[account(
        mut,
        token::mint = idl_mint,
        token::authority = owner,
    )]
    pub owner_tokens: Box<InterfaceAccount<'info, TokenAccount>>,

    #[account(
        mut,
        seeds = [PredictionMarket::POOL_SEED, market.key().as_ref()],
        bump = market.pool_bump,
    )]
    pub market_pool: Box<InterfaceAccount<'info, TokenAccount>>,

    pub token_program: Interface<'info, TokenInterface>,
}

impl<'info> ClaimRefund<'info> {
    pub fn claim_refund(&mut self) -> Result<()> {
        self.state.assert_allowed(ProtocolOp::ClaimRefund)?;
        self.market.assert_refundable()?;
        self.bet.mark_claimed()?;

        let amount = self.bet.amount;
        self.market.record_payout(amount)?;

        let resolution_ts = self.market.resolution_ts.to_le_bytes();
        let market_seeds: &[&[u8]] = &[
            PredictionMarket::SEED,
            self.market.protocol_id.as_bytes(),
            &resolution_ts,
            &[self.market.bump],
        ];
        transfer_out(
            &self.token_program,
            &self.idl_mint,
            self.market_pool.to_account_info(),
            self.owner_tokens.to_account_info(),
            self.market.to_account_info(),
            &[market_seeds],
            amount,
        )?;

        emit!(RefundClaimed {
            market: self.market.key(),
            owner: self.owner.key(),
            amount,
        });

        Ok(())
    }
}
