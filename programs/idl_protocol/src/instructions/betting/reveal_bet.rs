//! Bet Reveal
//!
//! Second half of commit-reveal betting. A matching preimage moves the
//! principal into the market pool, updates the side totals and records a
//! `Bet` keyed by the revealed nonce. The bettor's lifetime volume grows by
//! the same amount.

use anchor_lang::prelude::*;
use anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface};

use crate::custody::transfer_in;
use crate::errors::ProtocolError;
use crate::state::{Bet, BetCommitment, PredictionMarket, ProtocolOp, ProtocolState, Side, UserVolume};

/// Event emitted when a bet is revealed
#[event]
pub struct BetRevealed {
    pub market: Pubkey,
    pub bettor: Pubkey,
    pub amount: u64,
    pub side: Side,
    pub nonce: u64,
    pub total_yes_actual: u64,
    pub total_no_actual: u64,
}

#[derive(Accounts)]
#[instruction(amount: u64, side: Side, nonce: u64)]
pub struct RevealBet<'info> {
    #[account(mut)]
    pub bettor: Signer<'info>,

    #[account(
        seeds = [ProtocolState::SEED],
        bump = state.bump,
    )]
    pub state: Box<Account<'info, ProtocolState>>,

    #[account(mut)]
    pub market: Box<Account<'info, PredictionMarket>>,

    #[account(
        mut,
        seeds = [BetCommitment::SEED, market.key().as_ref(), bettor.key().as_ref()],
        bump = bet_commitment.bump,
    )]
    pub bet_commitment: Box<Account<'info, BetCommitment>>,

    #[account(
        init,
        payer = bettor,
        space = 8 + Bet::INIT_SPACE,
        seeds = [Bet::SEED, market.key().as_ref(), bettor.key().as_ref(), nonce.to_le_bytes().as_ref()],
        bump,
    )]
    pub bet: Box<Account<'info, Bet>>,

    #[account(
        init_if_needed,
        payer = bettor,
        space = 8 + UserVolume::INIT_SPACE,
        seeds = [UserVolume::SEED, bettor.key().as_ref()],
        bump,
    )]
    pub user_volume: Box<Account<'info, UserVolume>>,

    #[account(address = state.idl_mint @ ProtocolError::InvalidMint)]
    pub idl_mint: Box<InterfaceAccount<'info, Mint>>,

    #[account(
        mut,
        token::mint = idl_mint,
        token::authority = bettor,
    )]
    pub bettor_tokens: Box<InterfaceAccount<'info, TokenAccount>>,

    #[account(
        mut,
        seeds = [PredictionMarket::POOL_SEED, market.key().as_ref()],
        bump = market.pool_bump,
    )]
    pub market_pool: Box<InterfaceAccount<'info, TokenAccount>>,

    pub token_program: Interface<'info, TokenInterface>,
    pub system_program: Program<'info, System>,
}

impl<'info> RevealBet<'info> {
    pub fn reveal_bet(
        &mut self,
        amount: u64,
        side: Side,
        nonce: u64,
        salt: [u8; 32],
        bumps: &RevealBetBumps,
    ) -> Result<()> {
        let now = Clock::get()?.unix_timestamp;

        self.state.assert_allowed(ProtocolOp::RevealBet)?;
        self.market.assert_accepting_reveals(now)?;
        self.market.assert_not_participant(&self.bettor.key())?;

        self.bet_commitment.reveal(amount, side, nonce, &salt, now)?;
        self.market.record_bet(amount, side)?;

        self.bet.set_inner(Bet {
            owner: self.bettor.key(),
            market: self.market.key(),
            amount,
            side,
            nonce,
            placed_at: now,
            claimed: false,
            bump: bumps.bet,
        });

        if self.user_volume.owner == Pubkey::default() {
            self.user_volume.bump = bumps.user_volume;
        }
        self.user_volume.record(self.bettor.key(), amount, now)?;

        transfer_in(
            &self.token_program,
            &self.idl_mint,
            self.bettor_tokens.to_account_info(),
            self.market_pool.to_account_info(),
            self.bettor.to_account_info(),
            amount,
        )?;

        emit!(BetRevealed {
            market: self.market.key(),
            bettor: self.bettor.key(),
            amount,
            side,
            nonce,
            total_yes_actual: self.market.total_yes_actual,
            total_no_actual: self.market.total_no_actual,
        });

        Ok(())
    }
}
