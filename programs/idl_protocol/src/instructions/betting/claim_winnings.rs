//! Winning Claims
//!
//! Pays a winning bet its principal plus a floored pro-rata share of the
//! losing side, less the bet fee. All outflows come from the market pool:
//!
//! ```text
//! net       -> bettor
//! staker    -> vault (credited to the reward accumulator)
//! creator   -> market creator
//! treasury  -> treasury
//! burn      -> burn vault
//! ```
//!
//! A badge held for `BADGE_HOLD_TIME` returns part of the fee to the bettor.

use anchor_lang::prelude::*;
use anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface};

use crate::custody::transfer_out;
use crate::errors::ProtocolError;
use crate::math::winning_payout;
use crate::state::{Badge, Bet, PredictionMarket, ProtocolOp, ProtocolState};

/// Event emitted when winnings are claimed
#[event]
pub struct WinningsClaimed {
    pub market: Pubkey,
    pub owner: Pubkey,
    pub amount: u64,
    pub gross: u64,
    pub fee: u64,
    pub net: u64,
    pub rebate_bps: u64,
}

#[derive(Accounts)]
pub struct ClaimWinnings<'info> {
    pub owner: Signer<'info>,

    #[account(
        mut,
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

    /// Owner's badge, if any, for the fee rebate
    #[account(
        seeds = [Badge::SEED, owner.key().as_ref()],
        bump = badge.bump,
    )]
    pub badge: Option<Box<Account<'info, Badge>>>,

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

    #[account(
        mut,
        seeds = [ProtocolState::VAULT_SEED],
        bump = state.vault_bump,
    )]
    pub vault: Box<InterfaceAccount<'info, TokenAccount>>,

    #[account(
        mut,
        token::mint = idl_mint,
        constraint = creator_tokens.owner == market.creator @ ProtocolError::Unauthorized,
    )]
    pub creator_tokens: Box<InterfaceAccount<'info, TokenAccount>>,

    #[account(mut, address = state.treasury @ ProtocolError::Unauthorized)]
    pub treasury: Box<InterfaceAccount<'info, TokenAccount>>,

    #[account(
        mut,
        seeds = [ProtocolState::BURN_VAULT_SEED],
        bump = state.burn_vault_bump,
    )]
    pub burn_vault: Box<InterfaceAccount<'info, TokenAccount>>,

    pub token_program: Interface<'info, TokenInterface>,
}

impl<'info> ClaimWinnings<'info> {
    pub fn claim_winnings(&mut self) -> Result<u64> {
        let now = Clock::get()?.unix_timestamp;

        self.state.assert_allowed(ProtocolOp::ClaimWinnings)?;
        self.market.assert_claimable(now)?;

        let (winning_side, winning_actual, losing_actual) = self.market.winning_pools()?;
        require!(self.bet.side == winning_side, ProtocolError::BetLost);
        self.bet.mark_claimed()?;

        let rebate_bps = self.badge.as_ref().map_or(0, |badge| badge.rebate_bps_at(now));
        let payout = winning_payout(self.bet.amount, winning_actual, losing_actual, rebate_bps)?;

        self.market.record_payout(payout.gross)?;
        self.state.distribute_rewards(payout.split.staker)?;
        self.state.record_fee(payout.fee, payout.split.burn)?;

        let resolution_ts = self.market.resolution_ts.to_le_bytes();
        let market_seeds: &[&[u8]] = &[
            PredictionMarket::SEED,
            self.market.protocol_id.as_bytes(),
            &resolution_ts,
            &[self.market.bump],
        ];
        let signer = &[market_seeds];

        let outflows = [
            (self.owner_tokens.to_account_info(), payout.net),
            (self.vault.to_account_info(), payout.split.staker),
            (self.creator_tokens.to_account_info(), payout.split.creator),
            (self.treasury.to_account_info(), payout.split.treasury),
            (self.burn_vault.to_account_info(), payout.split.burn),
        ];
        for (destination, amount) in outflows {
            transfer_out(
                &self.token_program,
                &self.idl_mint,
                self.market_pool.to_account_info(),
                destination,
                self.market.to_account_info(),
                signer,
                amount,
            )?;
        }

        emit!(WinningsClaimed {
            market: self.market.key(),
            owner: self.owner.key(),
            amount: self.bet.amount,
            gross: payout.gross,
            fee: payout.fee,
            net: payout.net,
            rebate_bps,
        });

        msg!(
            "Claimed {} (gross {}, fee {}) from market {}",
            payout.net,
            payout.gross,
            payout.fee,
            self.market.key()
        );

        Ok(payout.net)
    }
}
